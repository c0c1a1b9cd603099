use std::fmt;
use taylor_error::Error;
use crate::input::Inputs;

/// A field of the calculator form.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Field {
    Function,
    Variables,
    Expansions,
}

impl Field {
    /// The name used as the source id in reports.
    pub fn name(&self) -> &'static str {
        match self {
            Self::Function => "function",
            Self::Variables => "variables",
            Self::Expansions => "expansions",
        }
    }
}

impl fmt::Display for Field {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.name())
    }
}

/// The error returned when any stage of the expansion fails.
///
/// The spans of the inner [`Error`] refer to the text of [`PipelineFailure::field`].
#[derive(Debug)]
pub struct PipelineFailure {
    /// The field of the form that the error points into.
    pub field: Field,

    /// The error itself.
    pub error: Error,
}

impl PipelineFailure {
    /// Creates a new failure pointing into the given field.
    pub fn new(field: Field, error: Error) -> Self {
        Self { field, error }
    }

    /// Report this failure to stderr, highlighting the field of the inputs it points into.
    pub fn report_to_stderr(&self, inputs: &Inputs) {
        self.error.report_to_stderr(self.field.name(), inputs.field(self.field));
    }

    /// Renders the report for this failure into a string, highlighting the field of the inputs it
    /// points into.
    pub fn report_to_string(&self, inputs: &Inputs) -> String {
        self.error.report_to_string(self.field.name(), inputs.field(self.field))
    }
}

impl fmt::Display for PipelineFailure {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.error)
    }
}

impl std::error::Error for PipelineFailure {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        Some(&self.error)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn report_points_into_field() {
        let inputs = Inputs {
            function: "x".to_string(),
            variables: "x".to_string(),
            expansions: "x=abc".to_string(),
            order: 1,
        };
        let failure = inputs.parse().unwrap_err();
        let report = failure.report_to_string(&inputs);
        let report = String::from_utf8(strip_ansi_escapes::strip(report.as_bytes())).unwrap();
        assert!(report.contains("expansions"));
        assert!(report.contains("x=abc"));
        assert!(report.contains("expected a finite number here"));
    }
}
