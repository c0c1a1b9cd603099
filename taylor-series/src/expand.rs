//! The multivariate Taylor expansion.
//!
//! [`calculate_taylor`] runs the whole pipeline: the function is parsed and split into the factors
//! of its top-level product, each factor is expanded in every variable with
//! [`calculate_component_taylor`], and the expanded factors are multiplied back together and
//! simplified. The univariate expansion itself is [`expand_taylor`].
//!
//! Every step only talks to the symbolic-math [`Engine`], so the pipeline works with any engine.
//!
//! ```
//! use std::collections::HashMap;
//! use taylor_series::{calculate_taylor, engine::Cas, ExpansionOptions};
//!
//! let variables = vec!["x".to_string()];
//! let points = HashMap::from([("x".to_string(), 0.0)]);
//! let options = ExpansionOptions { order: 3, ..Default::default() };
//!
//! let result = calculate_taylor(&Cas, "sin(x)", &variables, &points, &options).unwrap();
//! assert_eq!(result.to_string(), "-x^3/6 + x");
//! ```

use std::{collections::HashMap, fmt, ops::Range};
use taylor_compute::{consts, numerical::error::UndefinedVariable, primitive::float_literal, symbolic::StepCollector};
use taylor_error::Error;
use tracing::{debug, trace};
use crate::{
    engine::{Cas, Engine},
    error::{Field, PipelineFailure},
    input::{Inputs, MissingExpansionPoint},
    options::{Composition, ExpansionOptions},
};

/// The expansion of one factor of the function in one variable.
#[derive(Debug, Clone, PartialEq)]
pub struct ExpansionStep {
    /// The factor of the function that was expanded.
    pub component: String,

    /// The variable the factor was expanded in.
    pub variable: String,

    /// The expansion point of the variable.
    pub point: f64,

    /// The simplified expansion.
    pub expansion: String,
}

impl fmt::Display for ExpansionStep {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(
            f,
            "{} in {} at {}: {}",
            self.component,
            self.variable,
            fmt_point(self.point),
            self.expansion,
        )
    }
}

/// The result of an expansion, along with the steps taken to produce it.
#[derive(Debug, Clone)]
pub struct TaylorExpansion<X> {
    /// The simplified expansion.
    pub result: X,

    /// The expansion of every factor in every variable, in the order they were computed.
    pub steps: Vec<ExpansionStep>,

    latex: String,
}

impl<X> TaylorExpansion<X> {
    /// Returns the result as LaTeX.
    pub fn to_latex(&self) -> &str {
        &self.latex
    }
}

impl<X: fmt::Display> fmt::Display for TaylorExpansion<X> {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}", self.result)
    }
}

/// Formats an expansion point so that the engine reads it back as the same value.
fn fmt_point(point: f64) -> String {
    if point.fract() == 0.0 && point.abs() < 1e15 {
        // also turns `-0` into `0`
        format!("{}", point as i64)
    } else {
        float_literal(point)
    }
}

/// Computes the Taylor expansion of `expr` in the variable `var` around `point`, up to and
/// including the term of the given order.
///
/// The result is the unevaluated sum of the terms `(f⁽ⁿ⁾(a)) * (var - (a))^n / n!`, as text. Each
/// derivative is taken from the previous one, and the other symbols of the expression are kept in
/// the coefficients.
pub fn expand_taylor<E: Engine>(
    engine: &E,
    expr: &E::Expr,
    var: &str,
    point: f64,
    options: &ExpansionOptions,
) -> Result<String, Error> {
    let bindings = HashMap::from([(var.to_owned(), point)]);
    expand_taylor_with(engine, expr, var, point, &bindings, options)
}

/// Like [`expand_taylor`], but the coefficients are evaluated with the given bindings, which must
/// include `var`.
fn expand_taylor_with<E: Engine>(
    engine: &E,
    expr: &E::Expr,
    var: &str,
    point: f64,
    bindings: &HashMap<String, f64>,
    options: &ExpansionOptions,
) -> Result<String, Error> {
    let point = fmt_point(point);

    let mut current = expr.clone();
    let mut terms = Vec::new();
    for n in 0..=options.order {
        if n > 0 {
            current = engine.differentiate(&current, var, options.simplify_derivatives)?;
        }

        let coefficient = engine.evaluate(&current, bindings)?;
        let term = format!("({}) * ({} - ({}))^{} / {}", coefficient, var, point, n, engine.factorial(n));
        trace!(var, n, derivative = %current, %term, "taylor term");
        terms.push(term);
    }

    Ok(terms.join(" + "))
}

/// Expands the component in every variable, reporting the expansion of each variable to the
/// collector.
fn expand_component<E: Engine>(
    engine: &E,
    component: &E::Expr,
    variables: &[String],
    points: &HashMap<String, f64>,
    options: &ExpansionOptions,
    step_collector: &mut dyn StepCollector<ExpansionStep>,
) -> Result<E::Expr, Error> {
    let mut current = component.clone();
    for var in variables {
        let point = *points.get(var).ok_or_else(|| {
            Error::new(Vec::new(), MissingExpansionPoint { name: var.clone() })
        })?;

        // a substituted expansion must only contain its own variable, or the later substitutions
        // would replace the leftover symbols a second time
        let text = match options.composition {
            Composition::Substitute => expand_taylor_with(engine, component, var, point, points, options)?,
            Composition::Reexpand => expand_taylor(engine, &current, var, point, options)?,
        };
        let expansion = engine.simplify(&text)?;
        debug!(component = %component, var, point, %expansion, "expanded component");

        step_collector.push(ExpansionStep {
            component: component.to_string(),
            variable: var.clone(),
            point,
            expansion: expansion.to_string(),
        });

        current = match options.composition {
            Composition::Substitute => engine.substitute(&current, var, &expansion),
            Composition::Reexpand => expansion,
        };
    }

    Ok(current)
}

/// Expands one factor of the function in each of the given variables, in order.
///
/// With [`Composition::Substitute`], each variable is expanded from the untouched component, with
/// every other variable at its expansion point, and the expansion replaces the variable in the
/// accumulated expression. A variable that does not
/// appear in the component leaves it unchanged. With [`Composition::Reexpand`], the accumulated
/// expression is expanded in each variable in turn.
pub fn calculate_component_taylor<E: Engine>(
    engine: &E,
    component: &E::Expr,
    variables: &[String],
    points: &HashMap<String, f64>,
    options: &ExpansionOptions,
) -> Result<E::Expr, Error> {
    expand_component(engine, component, variables, points, options, &mut ())
}

/// Returns the span of the function text without surrounding whitespace.
fn trimmed_span(text: &str) -> Range<usize> {
    let start = text.len() - text.trim_start().len();
    start..text.trim_end().len().max(start)
}

/// Checks that every symbol in the function is a variable or a constant.
fn check_symbols<E: Engine>(engine: &E, expr: &E::Expr, variables: &[String]) -> Result<(), Error> {
    let undefined = engine.free_symbols(expr)
        .into_iter()
        .find(|(name, _)| !variables.contains(name) && consts::get(name).is_none());
    match undefined {
        Some((name, span)) => Err(Error::new(vec![span], UndefinedVariable { name })),
        None => Ok(()),
    }
}

/// Points an error raised while expanding at the function text. Missing expansion points are
/// pointed at the uses of their variable, and everything else at the whole function.
fn locate<E: Engine>(engine: &E, expr: &E::Expr, function: &str, err: Error) -> Error {
    let spans = match err.downcast_kind::<MissingExpansionPoint>() {
        Some(MissingExpansionPoint { name }) => engine.free_symbols(expr)
            .into_iter()
            .filter(|(symbol, _)| symbol == name)
            .map(|(_, span)| span)
            .collect(),
        None => Vec::new(),
    };

    if spans.is_empty() {
        err.with_spans(vec![trimmed_span(function)])
    } else {
        err.with_spans(spans)
    }
}

fn inner_calculate_taylor<E: Engine>(
    engine: &E,
    function: &str,
    variables: &[String],
    points: &HashMap<String, f64>,
    options: &ExpansionOptions,
    step_collector: &mut dyn StepCollector<ExpansionStep>,
) -> Result<E::Expr, PipelineFailure> {
    let fail = |err| PipelineFailure::new(Field::Function, err);

    let expr = engine.parse(function).map_err(fail)?;
    if !options.allow_parameters {
        check_symbols(engine, &expr, variables).map_err(fail)?;
    }

    let components = engine.factors(&expr);
    debug!(function, components = components.len(), order = options.order, "expanding");

    let mut product: Option<E::Expr> = None;
    for component in &components {
        let expanded = expand_component(engine, component, variables, points, options, step_collector)
            .map_err(|err| fail(locate(engine, &expr, function, err)))?;
        product = Some(match product {
            Some(product) => engine.multiply(&product, &expanded),
            None => expanded,
        });
    }

    // `factors` always returns at least the expression itself
    let recombined = product.unwrap_or_else(|| expr.clone());
    debug!(%recombined, "simplifying");
    engine.simplify(&recombined.to_string())
        .map_err(|err| fail(locate(engine, &expr, function, err)))
}

/// Computes the multivariate Taylor expansion of the function.
///
/// The function is split into the factors of its top-level product. Each factor is expanded in
/// every variable with [`calculate_component_taylor`], and the expanded factors are multiplied
/// back together in order and simplified. The first failure aborts the expansion.
///
/// Unless [`ExpansionOptions::allow_parameters`] is set, every symbol in the function must be one
/// of the variables or a constant.
pub fn calculate_taylor<E: Engine>(
    engine: &E,
    function: &str,
    variables: &[String],
    points: &HashMap<String, f64>,
    options: &ExpansionOptions,
) -> Result<E::Expr, PipelineFailure> {
    inner_calculate_taylor(engine, function, variables, points, options, &mut ())
}

/// Computes the multivariate Taylor expansion of the function, like [`calculate_taylor`], and
/// also returns the expansion of every factor in every variable.
pub fn calculate_taylor_with_steps<E: Engine>(
    engine: &E,
    function: &str,
    variables: &[String],
    points: &HashMap<String, f64>,
    options: &ExpansionOptions,
) -> Result<TaylorExpansion<E::Expr>, PipelineFailure> {
    let mut steps = Vec::new();
    let result = inner_calculate_taylor(engine, function, variables, points, options, &mut steps)?;
    let latex = engine.to_latex(&result);
    Ok(TaylorExpansion { result, steps, latex })
}

/// Parses the calculator form and computes its expansion with [`Cas`]. The order of the form
/// takes precedence over the order of the options.
pub fn calculate(
    inputs: &Inputs,
    options: &ExpansionOptions,
) -> Result<TaylorExpansion<<Cas as Engine>::Expr>, PipelineFailure> {
    let parsed = inputs.parse()?;
    let options = ExpansionOptions { order: parsed.order, ..options.clone() };
    calculate_taylor_with_steps(&Cas, &parsed.function, &parsed.variables, &parsed.points, &options)
}
