use clap::Parser;
use taylor_series::{input::Inputs, Composition, ExpansionOptions};

/// Computes multivariate Taylor series expansions.
///
/// Without a function, an interactive form asks for the function, the variables, the expansion
/// points and the order.
#[derive(Parser, Debug)]
#[command(name = "taylor")]
#[command(author, version, about, long_about = None)]
pub struct Cli {
    /// The function to expand, such as `sin(x) * exp(y)`
    #[arg(value_name = "FUNCTION")]
    pub function_arg: Option<String>,

    /// The comma-separated variables, such as `x, y`
    #[arg(value_name = "VARIABLES")]
    pub variables_arg: Option<String>,

    /// The semicolon-separated expansion points, such as `x=0; y=1`
    #[arg(value_name = "EXPANSIONS")]
    pub expansions_arg: Option<String>,

    /// The function to expand
    #[arg(short, long, conflicts_with = "function_arg")]
    pub function: Option<String>,

    /// The comma-separated variables
    #[arg(short, long, conflicts_with = "variables_arg")]
    pub variables: Option<String>,

    /// The semicolon-separated expansion points
    #[arg(short, long, conflicts_with = "expansions_arg")]
    pub expansions: Option<String>,

    /// The highest derivative order computed per variable
    #[arg(
        short = 'n',
        long,
        env = "TAYLOR_ORDER",
        default_value_t = 3,
        value_parser = clap::value_parser!(u32).range(1..=10),
    )]
    pub order: u32,

    /// How the expansions of the individual variables are combined: `reexpand` or `substitute`
    #[arg(long, env = "TAYLOR_COMPOSITION", default_value_t = Composition::Reexpand)]
    pub composition: Composition,

    /// Keep symbols that are not variables as symbolic parameters
    #[arg(long)]
    pub allow_parameters: bool,

    /// Print the result as LaTeX
    #[arg(long)]
    pub latex: bool,

    /// Print the expansion of every factor in every variable
    #[arg(long)]
    pub steps: bool,

    /// Print debug information to stderr; repeat for more detail
    #[arg(short, long, action = clap::ArgAction::Count)]
    pub debug: u8,
}

impl Cli {
    /// Returns the options of the expansion.
    pub fn options(&self) -> ExpansionOptions {
        ExpansionOptions {
            order: self.order,
            composition: self.composition,
            allow_parameters: self.allow_parameters,
            ..Default::default()
        }
    }

    /// Returns the inputs given on the command line, or [`None`] if no function was given.
    /// Missing variables and expansion points are left empty.
    pub fn inputs(&self) -> Option<Inputs> {
        let function = self.function.as_ref().or(self.function_arg.as_ref())?;
        let variables = self.variables.as_ref().or(self.variables_arg.as_ref());
        let expansions = self.expansions.as_ref().or(self.expansions_arg.as_ref());
        Some(Inputs {
            function: function.clone(),
            variables: variables.cloned().unwrap_or_default(),
            expansions: expansions.cloned().unwrap_or_default(),
            order: self.order,
        })
    }
}
