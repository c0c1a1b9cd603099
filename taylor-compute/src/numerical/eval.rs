use crate::funcs;
use crate::primitive::{float, is_integral};
use crate::symbolic::{
    expr::{Primary, SymExpr},
    simplify::fraction::integer_fraction,
};
use rug::{ops::Pow, Float, Rational};
use super::{ctxt::Ctxt, error::{DivisionByZero, NonFinite}};
use taylor_error::Error;

/// Exact powers with exponents larger than this in magnitude are computed with floats instead.
const MAX_EXACT_EXPONENT: i32 = 1 << 12;

/// The value of a subexpression during evaluation.
#[derive(Debug, Clone)]
enum Value {
    /// An exact rational number.
    Exact(Rational),

    /// An approximate number.
    Approx(Float),

    /// An expression that still contains unbound symbols.
    Symbolic(SymExpr),
}

impl Value {
    /// Returns the value as a float, if it is a number.
    fn to_float(&self) -> Option<Float> {
        match self {
            Value::Exact(r) => Some(float(r)),
            Value::Approx(f) => Some(f.clone()),
            Value::Symbolic(_) => None,
        }
    }

    /// Converts the value back into an expression.
    fn into_expr(self) -> SymExpr {
        match self {
            Value::Exact(r) => {
                let (numer, denom) = r.into_numer_denom();
                integer_fraction(numer, denom)
            },
            Value::Approx(f) => SymExpr::Primary(Primary::Float(f)),
            Value::Symbolic(expr) => expr,
        }
    }
}

/// Checks that an approximate value is finite, reporting `expr` as the culprit otherwise.
fn finite(value: Float, expr: &SymExpr) -> Result<Value, Error> {
    if value.is_finite() {
        Ok(Value::Approx(value))
    } else {
        Err(Error::new(Vec::new(), NonFinite { expr: expr.to_string() }))
    }
}

/// Evaluates a call to a builtin function.
fn eval_call(expr: &SymExpr, name: &str, args: &[SymExpr], ctxt: &Ctxt) -> Result<Value, Error> {
    let builtin = funcs::check_call(name, args.len())?;

    let values = args.iter()
        .map(|arg| eval_value(arg, ctxt))
        .collect::<Result<Vec<_>, _>>()?;
    let Some(floats) = values.iter().map(Value::to_float).collect::<Option<Vec<_>>>() else {
        let args = values.into_iter().map(Value::into_expr).collect();
        return Ok(Value::Symbolic(SymExpr::call(name, args)));
    };

    let result = (builtin.eval)(&floats);
    if is_integral(&result) {
        if let Some(int) = result.to_integer() {
            return Ok(Value::Exact(Rational::from(int)));
        }
    }
    finite(result, expr)
}

/// Evaluates a sum, folding all of its numeric terms into one.
fn eval_add(expr: &SymExpr, terms: &[SymExpr], ctxt: &Ctxt) -> Result<Value, Error> {
    let mut exact = Rational::new();
    let mut approx: Option<Float> = None;
    let mut symbolic = Vec::new();
    for term in terms {
        match eval_value(term, ctxt)? {
            Value::Exact(r) => exact += r,
            Value::Approx(f) => approx = Some(approx.map_or_else(|| f.clone(), |sum| sum + &f)),
            Value::Symbolic(expr) => symbolic.push(expr),
        }
    }

    let numeric = match approx {
        Some(approx) => finite(approx + &exact, expr)?,
        None => Value::Exact(exact),
    };
    if symbolic.is_empty() {
        return Ok(numeric);
    }

    symbolic.push(numeric.into_expr());
    Ok(Value::Symbolic(SymExpr::Add(symbolic)))
}

/// Evaluates a product, folding all of its numeric factors into one.
fn eval_mul(expr: &SymExpr, factors: &[SymExpr], ctxt: &Ctxt) -> Result<Value, Error> {
    let mut exact = Rational::from(1);
    let mut approx: Option<Float> = None;
    let mut symbolic = Vec::new();
    for factor in factors {
        match eval_value(factor, ctxt)? {
            Value::Exact(r) => exact *= r,
            Value::Approx(f) => approx = Some(approx.map_or_else(|| f.clone(), |product| product * &f)),
            Value::Symbolic(expr) => symbolic.push(expr),
        }
    }

    let numeric = match approx {
        Some(approx) => finite(approx * &exact, expr)?,
        None => Value::Exact(exact),
    };
    if symbolic.is_empty() {
        return Ok(numeric);
    }

    symbolic.insert(0, numeric.into_expr());
    Ok(Value::Symbolic(SymExpr::Mul(symbolic)))
}

/// Evaluates a power.
fn eval_exp(expr: &SymExpr, base: &SymExpr, exp: &SymExpr, ctxt: &Ctxt) -> Result<Value, Error> {
    let base = eval_value(base, ctxt)?;
    let exp = eval_value(exp, ctxt)?;

    let division_by_zero = || Error::new(Vec::new(), DivisionByZero { expr: expr.to_string() });

    if let (Value::Exact(base), Value::Exact(exp)) = (&base, &exp) {
        let small_exp = exp.is_integer()
            .then(|| exp.numer().to_i32())
            .flatten()
            .filter(|exp| exp.abs() <= MAX_EXACT_EXPONENT);
        if let Some(exp) = small_exp {
            if *base == 0 && exp < 0 {
                return Err(division_by_zero());
            }
            return Ok(Value::Exact(base.clone().pow(exp)));
        }
    }

    match (base.to_float(), exp.to_float()) {
        (Some(base), Some(exp)) => {
            if base.is_zero() && exp.is_sign_negative() && !exp.is_zero() {
                return Err(division_by_zero());
            }
            finite(base.pow(exp), expr)
        },
        _ => Ok(Value::Symbolic(SymExpr::pow(base.into_expr(), exp.into_expr()))),
    }
}

/// Evaluates an expression into a [`Value`].
fn eval_value(expr: &SymExpr, ctxt: &Ctxt) -> Result<Value, Error> {
    match expr {
        SymExpr::Primary(Primary::Integer(n)) => Ok(Value::Exact(Rational::from(n))),
        SymExpr::Primary(Primary::Float(f)) => Ok(Value::Approx(f.clone())),
        SymExpr::Primary(Primary::Symbol(name)) => match ctxt.get_var(name) {
            Some(value) => eval_value(&value, &Ctxt::new()),
            None => Ok(Value::Symbolic(expr.clone())),
        },
        SymExpr::Primary(Primary::Call(name, args)) => eval_call(expr, name, args, ctxt),
        SymExpr::Add(terms) => eval_add(expr, terms, ctxt),
        SymExpr::Mul(factors) => eval_mul(expr, factors, ctxt),
        SymExpr::Exp(base, exp) => eval_exp(expr, base, exp, ctxt),
    }
}

/// Evaluates the expression with the variables bound in the given context.
///
/// Every subexpression that is fully numeric after substitution is folded, and unbound symbols
/// are kept. The result is not simplified any further.
///
/// ```
/// use taylor_compute::numerical::{eval, Ctxt};
/// use taylor_compute::symbolic::SymExpr;
/// use taylor_parser::parser::{ast::Expr, Parser};
///
/// let expr = SymExpr::from(Parser::new("x^2 / 3 + y").try_parse_full::<Expr>().unwrap());
/// let ctxt = [("x", 2.0)].into_iter().collect::<Ctxt>();
/// assert_eq!(eval(&expr, &ctxt).unwrap().to_string(), "y + 4/3");
/// ```
pub fn eval(expr: &SymExpr, ctxt: &Ctxt) -> Result<SymExpr, Error> {
    eval_value(expr, ctxt).map(Value::into_expr)
}
