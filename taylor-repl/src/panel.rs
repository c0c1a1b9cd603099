use std::io::{self, Write};
use taylor_series::{input::Inputs, PipelineFailure, TaylorExpansion};

/// Writes the outcome of an expansion, and erases it again before the next one.
///
/// Results go to stdout and error reports go to stderr. On a terminal, [`ResultsPanel::clear`]
/// moves the cursor back over everything the panel wrote, and over anything written after it, and
/// erases it.
pub struct ResultsPanel<O, E> {
    out: O,
    err: E,

    /// Whether the output can be erased with ANSI escape codes.
    erase: bool,

    /// The number of lines written since the last clear.
    lines: usize,
}

/// Whether the panel can erase its output. Results and prompts go to stdout, and the erase codes
/// go to stderr, so both have to be the same terminal.
pub fn can_erase(stdout_is_terminal: bool, stderr_is_terminal: bool) -> bool {
    stdout_is_terminal && stderr_is_terminal
}

impl ResultsPanel<io::Stdout, io::Stderr> {
    /// Creates a panel writing to stdout and stderr.
    pub fn stdio(erase: bool) -> Self {
        Self::new(io::stdout(), io::stderr(), erase)
    }
}

impl<O: Write, E: Write> ResultsPanel<O, E> {
    pub fn new(out: O, err: E, erase: bool) -> Self {
        Self { out, err, erase, lines: 0 }
    }

    /// Erases the output of the previous expansion, along with the given number of lines that
    /// were written below it by someone else.
    pub fn clear(&mut self, below: usize) -> io::Result<()> {
        let lines = self.lines + below;
        if self.erase && lines > 0 {
            // move to the start of the first line written, then erase to the end of the screen
            write!(self.err, "\x1b[{}F\x1b[J", lines)?;
            self.err.flush()?;
        }
        self.lines = 0;
        Ok(())
    }

    /// Writes a one-line summary of the inputs.
    pub fn write_inputs(&mut self, inputs: &Inputs) -> io::Result<()> {
        writeln!(
            self.out,
            "{} in {} at {}, order {}",
            inputs.function.trim(),
            inputs.variables.trim(),
            inputs.expansions.trim(),
            inputs.order,
        )?;
        self.lines += 1;
        Ok(())
    }

    /// Writes the result, and the steps if requested.
    pub fn write_result<X: std::fmt::Display>(
        &mut self,
        expansion: &TaylorExpansion<X>,
        latex: bool,
        steps: bool,
    ) -> io::Result<()> {
        let mut text = String::new();
        if steps {
            for step in &expansion.steps {
                text.push_str(&format!("{}\n", step));
            }
        }
        if latex {
            text.push_str(&format!("{}\n", expansion.to_latex()));
        } else {
            text.push_str(&format!("{}\n", expansion));
        }

        self.out.write_all(text.as_bytes())?;
        self.out.flush()?;
        self.lines += text.lines().count();
        Ok(())
    }

    /// Writes the report of the failure.
    pub fn write_error(&mut self, failure: &PipelineFailure, inputs: &Inputs) -> io::Result<()> {
        let report = failure.report_to_string(inputs);
        self.err.write_all(report.as_bytes())?;
        if !report.ends_with('\n') {
            self.err.write_all(b"\n")?;
        }
        self.err.flush()?;
        self.lines += report.lines().count();
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;
    use taylor_series::{calculate, ExpansionOptions};

    fn inputs(expansions: &str) -> Inputs {
        Inputs {
            function: "x^2".to_string(),
            variables: "x".to_string(),
            expansions: expansions.to_string(),
            order: 2,
        }
    }

    #[test]
    fn result_and_steps() {
        let expansion = calculate(&inputs("x=1"), &ExpansionOptions::default()).unwrap();
        let mut panel = ResultsPanel::new(Vec::new(), Vec::new(), false);
        panel.write_result(&expansion, false, true).unwrap();

        let out = String::from_utf8(panel.out.clone()).unwrap();
        assert_eq!(out, "x^2 in x at 1: x^2\nx^2\n");
        assert_eq!(panel.lines, 2);
    }

    #[test]
    fn inputs_summary() {
        let mut panel = ResultsPanel::new(Vec::new(), Vec::new(), true);
        panel.write_inputs(&inputs(" x=1 ")).unwrap();
        assert_eq!(String::from_utf8(panel.out.clone()).unwrap(), "x^2 in x at x=1, order 2\n");
        assert_eq!(panel.lines, 1);
    }

    #[test]
    fn erasing_needs_both_streams_on_a_terminal() {
        assert!(can_erase(true, true));
        assert!(!can_erase(false, true));
        assert!(!can_erase(true, false));
        assert!(!can_erase(false, false));
    }

    #[test]
    fn clear_erases_what_was_written() {
        let failure = calculate(&inputs("x=abc"), &ExpansionOptions::default()).unwrap_err();
        let mut panel = ResultsPanel::new(Vec::new(), Vec::new(), true);
        panel.write_error(&failure, &inputs("x=abc")).unwrap();
        let lines = panel.lines;
        assert!(lines > 1);

        panel.err.clear();
        panel.clear(4).unwrap();
        assert_eq!(String::from_utf8(panel.err.clone()).unwrap(), format!("\x1b[{}F\x1b[J", lines + 4));
        assert_eq!(panel.lines, 0);

        // nothing to erase
        panel.err.clear();
        panel.clear(0).unwrap();
        assert!(panel.err.is_empty());
    }
}
