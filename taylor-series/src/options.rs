use std::{fmt, str::FromStr};

/// How the expansions of the individual variables of a component are combined.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub enum Composition {
    /// Expand the untouched component in each variable, and substitute each expansion for its
    /// variable in the accumulated expression, in the order the variables were listed.
    Substitute,

    /// Expand the component in the first variable, then expand that result in the second
    /// variable, and so on, in the order the variables were listed.
    #[default]
    Reexpand,
}

impl fmt::Display for Composition {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Self::Substitute => write!(f, "substitute"),
            Self::Reexpand => write!(f, "reexpand"),
        }
    }
}

impl FromStr for Composition {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.to_ascii_lowercase().as_str() {
            "substitute" => Ok(Self::Substitute),
            "reexpand" => Ok(Self::Reexpand),
            _ => Err(format!("unknown composition `{}`, expected `substitute` or `reexpand`", s)),
        }
    }
}

/// Options that control the expansion.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ExpansionOptions {
    /// The highest derivative order computed per variable. Any value is accepted, including 0.
    pub order: u32,

    /// How the per-variable expansions are combined.
    pub composition: Composition,

    /// Whether each derivative is simplified before the next one is taken. Simplifying keeps the
    /// derivatives from growing with every order.
    pub simplify_derivatives: bool,

    /// Whether symbols that are neither variables nor constants are kept as symbolic parameters.
    /// Otherwise, they are reported as undefined.
    pub allow_parameters: bool,
}

impl Default for ExpansionOptions {
    fn default() -> Self {
        Self {
            order: 3,
            composition: Composition::default(),
            simplify_derivatives: true,
            allow_parameters: false,
        }
    }
}
