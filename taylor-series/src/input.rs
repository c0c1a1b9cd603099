//! Parsing of the four text fields of the calculator form.
//!
//! The variables field is a comma-separated list of names, and the expansions field is a
//! semicolon-separated list of `name=value` pairs. Every problem is reported with a span into the
//! field it was found in, so [`PipelineFailure`] can point at it.

use ariadne::Fmt;
use std::{collections::HashMap, ops::Range};
use taylor_attrs::ErrorKind;
use taylor_compute::consts;
use taylor_error::{Error, EXPR};
use crate::error::{Field, PipelineFailure};

/// A field of the form was left empty.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the {} field is empty", field),
    labels = ["nothing here"],
)]
pub struct EmptyInput {
    /// The field that was empty.
    pub field: Field,
}

/// A variable name is not an identifier.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = if name.is_empty() {
        "missing variable name".to_string()
    } else {
        format!("`{}` is not a valid variable name", name)
    },
    labels = ["this variable"],
    help = format!(
        "variable names start with a letter or `_`, followed by letters, digits or `_`, such as {}",
        "x, y".fg(EXPR),
    ),
)]
pub struct InvalidVariableName {
    /// The invalid name.
    pub name: String,
}

/// A variable has the name of a constant.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is a constant and cannot be used as a variable", name),
    labels = ["this variable"],
    help = "choose a different name for the variable",
)]
pub struct ConstantAsVariable {
    /// The name of the constant.
    pub name: String,
}

/// An expansion point is not of the form `name=value`.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = "malformed expansion point",
    labels = ["this expansion point"],
    help = format!("expansion points are written as {}, separated by `;`", "name=value".fg(EXPR)),
)]
pub struct MalformedExpansionPoint;

/// The value of an expansion point is not a finite number.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not a valid expansion point for `{}`", value, name),
    labels = ["expected a finite number here"],
)]
pub struct InvalidExpansionValue {
    /// The variable whose point is invalid.
    pub name: String,

    /// The invalid value.
    pub value: String,
}

/// An expansion point was given for a variable that was not declared.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` is not one of the declared variables", name),
    labels = ["this variable"],
    help = format!("add `{}` to the variables, or remove this expansion point", name.fg(EXPR)),
)]
pub struct UndeclaredExpansionVariable {
    /// The undeclared variable.
    pub name: String,
}

/// Two expansion points were given for the same variable.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("`{}` has more than one expansion point", name),
    labels = ["first given here", "and again here"],
)]
pub struct DuplicateExpansionPoint {
    /// The variable with more than one point.
    pub name: String,
}

/// A variable has no expansion point.
#[derive(Debug, Clone, ErrorKind, PartialEq)]
#[error(
    message = format!("the variable `{}` has no expansion point", name),
    labels = ["this variable"],
    help = format!("add an expansion point for it, such as {}", format!("{}=0", name).fg(EXPR)),
)]
pub struct MissingExpansionPoint {
    /// The variable without an expansion point.
    pub name: String,
}

/// The raw text of the calculator form.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Inputs {
    /// The function to expand, such as `sin(x) * exp(y)`.
    pub function: String,

    /// The comma-separated variables, such as `x, y`.
    pub variables: String,

    /// The semicolon-separated expansion points, such as `x=0; y=1.5`.
    pub expansions: String,

    /// The highest derivative order computed per variable.
    pub order: u32,
}

impl Inputs {
    /// Returns the text of the given field.
    pub fn field(&self, field: Field) -> &str {
        match field {
            Field::Function => &self.function,
            Field::Variables => &self.variables,
            Field::Expansions => &self.expansions,
        }
    }

    /// Parses the variables and expansion points.
    pub fn parse(&self) -> Result<ParsedInputs, PipelineFailure> {
        for field in [Field::Function, Field::Variables, Field::Expansions] {
            let text = self.field(field);
            if text.trim().is_empty() {
                let span = 0..text.len();
                return Err(PipelineFailure::new(field, Error::new(vec![span], EmptyInput { field })));
            }
        }

        let variables = parse_variables(&self.variables)
            .map_err(|err| PipelineFailure::new(Field::Variables, err))?;
        let points = parse_points(&self.expansions, &variables)
            .map_err(|err| PipelineFailure::new(Field::Expansions, err))?;

        if let Some((name, span)) = variables.iter().find(|(name, _)| !points.contains_key(name)) {
            return Err(PipelineFailure::new(
                Field::Variables,
                Error::new(vec![span.clone()], MissingExpansionPoint { name: name.clone() }),
            ));
        }

        Ok(ParsedInputs {
            function: self.function.clone(),
            variables: variables.into_iter().map(|(name, _)| name).collect(),
            points: points.into_iter().map(|(name, (value, _))| (name, value)).collect(),
            order: self.order,
        })
    }
}

/// The calculator form after its fields have been checked and split up.
#[derive(Debug, Clone, PartialEq)]
pub struct ParsedInputs {
    /// The function to expand, exactly as it was entered.
    pub function: String,

    /// The variables, in the order they were listed. Duplicates are kept.
    pub variables: Vec<String>,

    /// The expansion point of every variable.
    pub points: HashMap<String, f64>,

    /// The highest derivative order computed per variable.
    pub order: u32,
}

/// Splits the text on `separator`, returning every trimmed segment together with its span.
fn segments(text: &str, separator: char) -> impl Iterator<Item = (&str, Range<usize>)> {
    let mut start = 0;
    text.split(separator).map(move |segment| {
        let offset = start + (segment.len() - segment.trim_start().len());
        start += segment.len() + separator.len_utf8();
        let trimmed = segment.trim();
        (trimmed, offset..offset + trimmed.len())
    })
}

/// Returns true if the name is an identifier, the same as the ones accepted in the function text.
fn is_identifier(name: &str) -> bool {
    let mut chars = name.chars();
    chars.next().is_some_and(|c| c.is_ascii_alphabetic() || c == '_')
        && chars.all(|c| c.is_ascii_alphanumeric() || c == '_')
}

fn parse_variables(text: &str) -> Result<Vec<(String, Range<usize>)>, Error> {
    segments(text, ',')
        .map(|(name, span)| {
            if !is_identifier(name) {
                Err(Error::new(vec![span], InvalidVariableName { name: name.to_owned() }))
            } else if consts::NAMES.contains(&name) {
                Err(Error::new(vec![span], ConstantAsVariable { name: name.to_owned() }))
            } else {
                Ok((name.to_owned(), span))
            }
        })
        .collect()
}

/// Parses the expansion points, returning each value together with the span of its segment.
fn parse_points(
    text: &str,
    variables: &[(String, Range<usize>)],
) -> Result<HashMap<String, (f64, Range<usize>)>, Error> {
    let mut points = HashMap::new();
    for (segment, span) in segments(text, ';').filter(|(segment, _)| !segment.is_empty()) {
        let Some((name, value)) = segment.split_once('=') else {
            return Err(Error::new(vec![span], MalformedExpansionPoint));
        };
        if value.contains('=') {
            return Err(Error::new(vec![span], MalformedExpansionPoint));
        }

        let (name, value) = (name.trim(), value.trim());
        // segments are trimmed, so the name starts and the value ends with the segment
        let name_span = span.start..span.start + name.len();
        let value_span = span.end - value.len()..span.end;

        if name.is_empty() {
            return Err(Error::new(vec![span], MalformedExpansionPoint));
        }
        if !variables.iter().any(|(variable, _)| variable == name) {
            return Err(Error::new(vec![name_span], UndeclaredExpansionVariable { name: name.to_owned() }));
        }

        let parsed = value.parse::<f64>().ok().filter(|value| value.is_finite());
        let Some(parsed) = parsed else {
            return Err(Error::new(vec![value_span], InvalidExpansionValue {
                name: name.to_owned(),
                value: value.to_owned(),
            }));
        };

        if let Some((_, first)) = points.get(name) {
            return Err(Error::new(vec![first.clone(), span], DuplicateExpansionPoint {
                name: name.to_owned(),
            }));
        }
        points.insert(name.to_owned(), (parsed, span));
    }
    Ok(points)
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::*;

    fn inputs(variables: &str, expansions: &str) -> Inputs {
        Inputs {
            function: "x*y".to_string(),
            variables: variables.to_string(),
            expansions: expansions.to_string(),
            order: 2,
        }
    }

    fn failure(variables: &str, expansions: &str) -> PipelineFailure {
        inputs(variables, expansions).parse().unwrap_err()
    }

    #[test]
    fn parse_fields() {
        let parsed = inputs(" x ,y", "x=0; y = -1.5;").parse().unwrap();
        assert_eq!(parsed.variables, vec!["x", "y"]);
        assert_eq!(parsed.points, HashMap::from([("x".to_string(), 0.0), ("y".to_string(), -1.5)]));
        assert_eq!(parsed.order, 2);
    }

    #[test]
    fn duplicate_variables_are_kept() {
        let parsed = inputs("x, x", "x=1").parse().unwrap();
        assert_eq!(parsed.variables, vec!["x", "x"]);
    }

    #[test]
    fn segment_spans() {
        let segments = segments(" x ,, yy", ',').collect::<Vec<_>>();
        assert_eq!(segments, vec![("x", 1..2), ("", 4..4), ("yy", 6..8)]);
    }

    #[test]
    fn empty_fields() {
        let err = failure("  ", "x=0");
        assert_eq!(err.field, Field::Variables);
        assert_eq!(err.error.downcast_kind::<EmptyInput>(), Some(&EmptyInput { field: Field::Variables }));

        let mut blank = inputs("x", "x=0");
        blank.function = String::new();
        assert_eq!(blank.parse().unwrap_err().field, Field::Function);
    }

    #[test]
    fn invalid_variables() {
        let err = failure("x,,y", "x=0");
        assert_eq!(err.error.spans, vec![2..2]);
        assert!(err.error.downcast_kind::<InvalidVariableName>().is_some());

        let err = failure("x, 2y", "x=0");
        assert_eq!(err.error.spans, vec![3..5]);

        let err = failure("x, pi", "x=0");
        assert!(err.error.downcast_kind::<ConstantAsVariable>().is_some());
    }

    #[test]
    fn malformed_points() {
        for expansions in ["x", "x=1=2", "=1"] {
            let err = failure("x", expansions);
            assert_eq!(err.field, Field::Expansions);
            assert!(err.error.downcast_kind::<MalformedExpansionPoint>().is_some(), "{}", expansions);
        }
    }

    #[test]
    fn invalid_values() {
        let err = failure("x", "x=abc");
        assert_eq!(err.error.spans, vec![2..5]);
        assert_eq!(err.to_string(), "`abc` is not a valid expansion point for `x`");

        for expansions in ["x=", "x=nan", "x=inf"] {
            let err = failure("x", expansions);
            assert!(err.error.downcast_kind::<InvalidExpansionValue>().is_some(), "{}", expansions);
        }
    }

    #[test]
    fn unknown_and_duplicate_points() {
        let err = failure("x", "x=0; z=1");
        assert_eq!(err.error.spans, vec![5..6]);
        assert!(err.error.downcast_kind::<UndeclaredExpansionVariable>().is_some());

        let err = failure("x", "x=0;x=1");
        assert_eq!(err.error.spans, vec![0..3, 4..7]);
        assert!(err.error.downcast_kind::<DuplicateExpansionPoint>().is_some());
    }

    #[test]
    fn missing_point() {
        let err = failure("x, y", "x=0");
        assert_eq!(err.field, Field::Variables);
        assert_eq!(err.error.spans, vec![3..4]);
        assert_eq!(err.to_string(), "the variable `y` has no expansion point");
    }
}
