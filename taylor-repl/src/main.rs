mod cli;
mod form;
mod panel;

use clap::Parser;
use cli::Cli;
use form::Form;
use panel::ResultsPanel;
use rustyline::error::ReadlineError;
use std::{env, io::{self, IsTerminal}, process::ExitCode};
use taylor_series::{calculate, input::Inputs, ExpansionOptions};
use tracing::level_filters::LevelFilter;
use tracing_subscriber::{
    fmt::{self, format::FmtSpan},
    layer::SubscriberExt,
    util::SubscriberInitExt,
    EnvFilter,
    Layer,
};

/// Builds the log filter from the `RUST_LOG` directives, with the level picked with `-d` as the
/// default directive.
fn log_filter(level: LevelFilter, directives: Option<&str>) -> EnvFilter {
    EnvFilter::builder()
        .with_default_directive(level.into())
        .parse_lossy(directives.unwrap_or_default())
}

fn setup_logging(verbosity: u8) {
    let filter = match verbosity {
        0 => LevelFilter::WARN,
        1 => LevelFilter::INFO,
        2 => LevelFilter::DEBUG,
        3 => LevelFilter::TRACE,
        _ => {
            eprintln!("Don't be crazy, max is -d -d -d");
            LevelFilter::TRACE
        },
    };

    // diagnostics go to stderr, so that stdout only carries results
    let fmt_layer = fmt::layer()
        .with_writer(io::stderr)
        .with_target(true)
        .with_thread_names(false)
        .with_span_events(FmtSpan::CLOSE);

    let directives = env::var("RUST_LOG").ok();
    let env_filter = log_filter(filter, directives.as_deref());
    tracing_subscriber::registry().with(fmt_layer.with_filter(env_filter)).init();
    tracing::debug!(%filter, rust_log = ?directives, "logging initialized");
}

/// Runs one expansion and writes its outcome to the panel. Returns true if it succeeded.
fn run<O: io::Write, E: io::Write>(
    inputs: &Inputs,
    options: &ExpansionOptions,
    cli: &Cli,
    panel: &mut ResultsPanel<O, E>,
) -> io::Result<bool> {
    match calculate(inputs, options) {
        Ok(expansion) => {
            panel.write_result(&expansion, cli.latex, cli.steps)?;
            Ok(true)
        },
        Err(failure) => {
            panel.write_error(&failure, inputs)?;
            Ok(false)
        },
    }
}

/// Asks for the form again and again, until the user quits. Once a form is submitted, the previous
/// outcome and the prompts are replaced with the new outcome.
fn interactive(cli: &Cli, options: &ExpansionOptions) -> Result<(), ReadlineError> {
    let mut form = Form::new(cli.order)?;
    let erase = panel::can_erase(io::stdout().is_terminal(), io::stderr().is_terminal());
    let mut panel = ResultsPanel::stdio(erase);
    loop {
        let inputs = match form.read() {
            Ok(inputs) => inputs,
            Err(ReadlineError::Eof | ReadlineError::Interrupted) => return Ok(()),
            Err(err) => return Err(err),
        };
        panel.clear(form.lines())?;
        panel.write_inputs(&inputs)?;
        run(&inputs, options, cli, &mut panel)?;
    }
}

fn main() -> ExitCode {
    let cli = Cli::parse();
    setup_logging(cli.debug);
    let options = cli.options();

    let inputs = match cli.inputs() {
        Some(inputs) => inputs,
        None if io::stdin().is_terminal() => {
            return match interactive(&cli, &options) {
                Ok(()) => ExitCode::SUCCESS,
                Err(err) => {
                    eprintln!("{}", err);
                    ExitCode::FAILURE
                },
            };
        },
        None => match form::read_lines(io::stdin().lock(), cli.order) {
            Ok(inputs) => inputs,
            Err(err) => {
                eprintln!("{}", err);
                return ExitCode::FAILURE;
            },
        },
    };

    let mut panel = ResultsPanel::stdio(false);
    match run(&inputs, &options, &cli, &mut panel) {
        Ok(true) => ExitCode::SUCCESS,
        Ok(false) => ExitCode::FAILURE,
        Err(err) => {
            eprintln!("{}", err);
            ExitCode::FAILURE
        },
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    #[test]
    fn verbosity_without_rust_log() {
        assert_eq!(log_filter(LevelFilter::WARN, None).max_level_hint(), Some(LevelFilter::WARN));
        assert_eq!(log_filter(LevelFilter::DEBUG, Some("")).max_level_hint(), Some(LevelFilter::DEBUG));
    }

    #[test]
    fn rust_log_directives() {
        let filter = log_filter(LevelFilter::WARN, Some("taylor_series=trace"));
        assert_eq!(filter.max_level_hint(), Some(LevelFilter::TRACE));
    }
}
