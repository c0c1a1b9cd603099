use super::{Primary, SymExpr};

/// Returns the direct children of the expression, from left to right.
fn children(expr: &SymExpr) -> &[SymExpr] {
    match expr {
        SymExpr::Primary(Primary::Call(_, args)) => args,
        SymExpr::Primary(_) => &[],
        SymExpr::Add(terms) => terms,
        SymExpr::Mul(factors) => factors,
        SymExpr::Exp(..) => &[],
    }
}

/// An iterator over the nodes of an expression in left-to-right post-order, so every node comes
/// after its children. The arguments of a call come before the call itself.
///
/// This iterator is created by [`SymExpr::post_order_iter`].
pub struct ExprIter<'a> {
    /// Nodes still to visit. The flag is set once the node's children were pushed above it.
    stack: Vec<(&'a SymExpr, bool)>,
}

impl<'a> ExprIter<'a> {
    pub fn new(expr: &'a SymExpr) -> Self {
        Self { stack: vec![(expr, false)] }
    }

    /// Restricts the iterator to the names of the symbols in the expression, in the order they
    /// are visited. Function names are not symbols.
    pub fn symbols(self) -> impl Iterator<Item = &'a str> {
        self.filter_map(SymExpr::as_symbol)
    }
}

impl<'a> Iterator for ExprIter<'a> {
    type Item = &'a SymExpr;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            let (expr, expanded) = self.stack.pop()?;
            if expanded {
                return Some(expr);
            }

            self.stack.push((expr, true));
            match expr {
                SymExpr::Exp(base, exp) => {
                    self.stack.push((exp, false));
                    self.stack.push((base, false));
                },
                _ => self.stack.extend(children(expr).iter().rev().map(|child| (child, false))),
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use pretty_assertions::assert_eq;
    use super::super::tests::parse_expr;

    #[test]
    fn visits_call_arguments() {
        let expr = parse_expr("sin(x^2)");
        let visited = expr.post_order_iter()
            .map(|expr| expr.to_string())
            .collect::<Vec<_>>();
        assert_eq!(visited, vec!["x", "2", "x^2", "sin(x^2)"]);
    }

    #[test]
    fn children_before_parents() {
        let expr = parse_expr("x y + 1");
        let visited = expr.post_order_iter()
            .map(|expr| expr.to_string())
            .collect::<Vec<_>>();
        assert_eq!(visited.last(), Some(&expr.to_string()));
        assert_eq!(visited.len(), 5);
    }

    #[test]
    fn symbols() {
        let expr = parse_expr("exp(a) + b^c");
        let mut symbols = expr.post_order_iter().symbols().collect::<Vec<_>>();
        symbols.sort();
        assert_eq!(symbols, vec!["a", "b", "c"]);
    }
}
