use super::ast::{expr::Expr, literal::{Literal, LitSym}};

/// Post-order traversal of an [`Expr`], created by [`Expr::post_order_iter`].
pub struct ExprIter<'a> {
    /// Nodes still to be yielded. The flag is set once the node's children have been pushed
    /// above it.
    stack: Vec<(&'a Expr, bool)>,
}

impl<'a> ExprIter<'a> {
    pub fn new(expr: &'a Expr) -> Self {
        Self { stack: vec![(expr, false)] }
    }

    /// Yields only the symbols used as values. Function names are not symbols.
    pub fn symbols(self) -> impl Iterator<Item = &'a LitSym> {
        self.filter_map(|expr| match expr {
            Expr::Literal(Literal::Symbol(sym)) => Some(sym),
            _ => None,
        })
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a Expr;

    fn next(&mut self) -> Option<Self::Item> {
        while let Some((expr, expanded)) = self.stack.pop() {
            if expanded {
                return Some(expr);
            }
            self.stack.push((expr, true));

            // pushed right to left, so that the leftmost child is on top
            match expr {
                Expr::Literal(_) => {},
                Expr::Paren(paren) => self.stack.push((&paren.expr, false)),
                Expr::Call(call) => self.stack.extend(call.args.iter().rev().map(|arg| (arg, false))),
                Expr::Unary(unary) => self.stack.push((&unary.operand, false)),
                Expr::Binary(binary) => {
                    self.stack.push((&binary.rhs, false));
                    self.stack.push((&binary.lhs, false));
                },
            }
        }
        None
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use crate::parser::Parser;
    use super::*;

    fn parse(source: &str) -> Expr {
        Parser::new(source).try_parse_full::<Expr>().unwrap()
    }

    #[test]
    fn children_before_parents() {
        let expr = parse("1 + sin(-x)");
        let visited = expr.post_order_iter().map(ToString::to_string).collect::<Vec<_>>();
        assert_eq!(visited, vec!["1", "x", "-x", "sin(-x)", "1 + sin(-x)"]);
    }

    #[test]
    fn symbols_skip_function_names() {
        let expr = parse("f(x) + g(y, x)*(z)");
        let names = expr.post_order_iter().symbols().map(|sym| sym.name.as_str()).collect::<Vec<_>>();
        assert_eq!(names, vec!["x", "y", "x", "z"]);
    }
}
