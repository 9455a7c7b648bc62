use std::f64::consts::{E, PI};

use super::{
    Expr, Func, ParseError, Var,
    lexer::{Token, TokenKind, tokenize},
};

/// Parses expression text into a tree.
///
/// Grammar, lowest precedence first:
///
/// ```text
/// sum     := product (('+' | '-') product)*
/// product := unary (('*' | '/') unary | unary)*     // juxtaposition multiplies
/// unary   := ('+' | '-') unary | power
/// power   := primary ('^' unary)?                   // right-associative
/// primary := number | 'x' | 'y' | 'pi' | 'e' | func '(' sum ')' | '(' sum ')'
/// ```
pub(super) fn parse(source: &str) -> Result<Expr, ParseError> {
    let tokens = tokenize(source)?;
    if tokens.is_empty() {
        return Err(ParseError::Empty);
    }

    let mut parser = Parser {
        tokens,
        next: 0,
        end: source.len(),
        nesting: 0,
    };
    let node = parser.sum()?;

    match parser.peek() {
        None => Ok(node.expr),
        Some(token) => Err(unexpected(token)),
    }
}

/// Deepest expression tree, and deepest nesting of parentheses, calls and
/// prefix operators, that the parser accepts.
pub const MAX_DEPTH: usize = 256;

/// A parsed subtree and its height.
struct Node {
    expr: Expr,
    depth: usize,
}

impl Node {
    fn leaf(expr: Expr) -> Self {
        Self { expr, depth: 1 }
    }
}

struct Parser {
    tokens: Vec<Token>,
    next: usize,
    end: usize,
    nesting: usize,
}

impl Parser {
    fn peek(&self) -> Option<&Token> {
        self.tokens.get(self.next)
    }

    fn pos(&self) -> usize {
        self.peek().map_or(self.end, |t| t.pos)
    }

    fn advance(&mut self) -> Option<Token> {
        let token = self.tokens.get(self.next).cloned();
        if token.is_some() {
            self.next += 1;
        }
        token
    }

    fn eat(&mut self, kind: &TokenKind) -> bool {
        if self.peek().is_some_and(|t| t.kind == *kind) {
            self.next += 1;
            true
        } else {
            false
        }
    }

    fn expect(&mut self, kind: &TokenKind) -> Result<(), ParseError> {
        match self.advance() {
            Some(token) if token.kind == *kind => Ok(()),
            Some(token) => Err(unexpected(&token)),
            None => Err(ParseError::UnexpectedEnd),
        }
    }

    /// Runs `rule` one nesting level deeper.
    fn nested<F>(&mut self, rule: F) -> Result<Node, ParseError>
    where
        F: FnOnce(&mut Self) -> Result<Node, ParseError>,
    {
        if self.nesting >= MAX_DEPTH {
            return Err(ParseError::TooDeep { pos: self.pos() });
        }
        self.nesting += 1;
        let node = rule(self);
        self.nesting -= 1;
        node
    }

    fn unary_node<F>(&self, child: Node, build: F) -> Result<Node, ParseError>
    where
        F: FnOnce(Box<Expr>) -> Expr,
    {
        self.join(child.depth, build(Box::new(child.expr)))
    }

    fn binary_node(
        &self,
        lhs: Node,
        rhs: Node,
        build: fn(Box<Expr>, Box<Expr>) -> Expr,
    ) -> Result<Node, ParseError> {
        let child_depth = lhs.depth.max(rhs.depth);
        self.join(child_depth, build(Box::new(lhs.expr), Box::new(rhs.expr)))
    }

    fn join(&self, child_depth: usize, expr: Expr) -> Result<Node, ParseError> {
        let depth = child_depth + 1;
        if depth > MAX_DEPTH {
            return Err(ParseError::TooDeep { pos: self.pos() });
        }
        Ok(Node { expr, depth })
    }

    fn sum(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.product()?;
        loop {
            if self.eat(&TokenKind::Plus) {
                let rhs = self.product()?;
                lhs = self.binary_node(lhs, rhs, Expr::Add)?;
            } else if self.eat(&TokenKind::Minus) {
                let rhs = self.product()?;
                lhs = self.binary_node(lhs, rhs, Expr::Sub)?;
            } else {
                return Ok(lhs);
            }
        }
    }

    fn product(&mut self) -> Result<Node, ParseError> {
        let mut lhs = self.unary()?;
        loop {
            if self.eat(&TokenKind::Star) {
                let rhs = self.unary()?;
                lhs = self.binary_node(lhs, rhs, Expr::Mul)?;
            } else if self.eat(&TokenKind::Slash) {
                let rhs = self.unary()?;
                lhs = self.binary_node(lhs, rhs, Expr::Div)?;
            } else if self.starts_operand() {
                let rhs = self.power()?;
                lhs = self.binary_node(lhs, rhs, Expr::Mul)?;
            } else {
                return Ok(lhs);
            }
        }
    }

    fn starts_operand(&self) -> bool {
        matches!(
            self.peek().map(|t| &t.kind),
            Some(TokenKind::Number(_) | TokenKind::Ident(_) | TokenKind::LParen)
        )
    }

    fn unary(&mut self) -> Result<Node, ParseError> {
        if self.eat(&TokenKind::Minus) {
            let operand = self.nested(Self::unary)?;
            return self.unary_node(operand, Expr::Neg);
        }
        if self.eat(&TokenKind::Plus) {
            return self.nested(Self::unary);
        }
        self.power()
    }

    fn power(&mut self) -> Result<Node, ParseError> {
        let base = self.primary()?;
        if self.eat(&TokenKind::Caret) {
            let exponent = self.nested(Self::unary)?;
            return self.binary_node(base, exponent, Expr::Pow);
        }
        Ok(base)
    }

    fn primary(&mut self) -> Result<Node, ParseError> {
        let token = self.advance().ok_or(ParseError::UnexpectedEnd)?;
        match token.kind {
            TokenKind::Number(n) => Ok(Node::leaf(Expr::Num(n))),
            TokenKind::LParen => {
                let inner = self.nested(Self::sum)?;
                self.expect(&TokenKind::RParen)?;
                Ok(inner)
            }
            TokenKind::Ident(name) => self.identifier(name, token.pos),
            _ => Err(unexpected(&token)),
        }
    }

    fn identifier(&mut self, name: String, pos: usize) -> Result<Node, ParseError> {
        match name.as_str() {
            "x" => return Ok(Node::leaf(Expr::Var(Var::X))),
            "y" => return Ok(Node::leaf(Expr::Var(Var::Y))),
            "pi" => return Ok(Node::leaf(Expr::Num(PI))),
            "e" => return Ok(Node::leaf(Expr::Num(E))),
            _ => {}
        }

        let Some(func) = Func::from_name(&name) else {
            return Err(ParseError::UnknownIdentifier { name, pos });
        };
        if !self.eat(&TokenKind::LParen) {
            return Err(ParseError::MissingArgument { name, pos });
        }
        let arg = self.nested(Self::sum)?;
        self.expect(&TokenKind::RParen)?;
        self.unary_node(arg, |arg| Expr::Call(func, arg))
    }
}

fn unexpected(token: &Token) -> ParseError {
    ParseError::UnexpectedToken {
        found: token.kind.describe(),
        pos: token.pos,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    use approx::assert_relative_eq;

    fn eval(source: &str, x: f64, y: f64) -> f64 {
        parse(source).unwrap().eval(x, y)
    }

    #[test]
    fn operator_precedence() {
        assert_relative_eq!(eval("1 + 2 * 3", 0.0, 0.0), 7.0);
        assert_relative_eq!(eval("(1 + 2) * 3", 0.0, 0.0), 9.0);
        assert_relative_eq!(eval("8 / 4 / 2", 0.0, 0.0), 1.0);
        assert_relative_eq!(eval("10 - 4 - 3", 0.0, 0.0), 3.0);
    }

    #[test]
    fn power_is_right_associative() {
        assert_relative_eq!(eval("2 ^ 3 ^ 2", 0.0, 0.0), 512.0);
    }

    #[test]
    fn unary_minus_binds_looser_than_power() {
        assert_relative_eq!(eval("-x^2", 3.0, 0.0), -9.0);
        assert_relative_eq!(eval("2^-1", 0.0, 0.0), 0.5);
    }

    #[test]
    fn negative_base_with_integer_exponent() {
        assert_relative_eq!(eval("x^3", -2.0, 0.0), -8.0);
    }

    #[test]
    fn implicit_multiplication() {
        assert_relative_eq!(eval("2x", 3.0, 0.0), 6.0);
        assert_relative_eq!(eval("3(x + 1)", 1.0, 0.0), 6.0);
        assert_relative_eq!(eval("(x + 1)(y - 1)", 1.0, 3.0), 4.0);
        assert_relative_eq!(eval("2 sin(x)", 0.5, 0.0), 2.0 * 0.5_f64.sin());
    }

    #[test]
    fn functions_and_constants() {
        assert_relative_eq!(eval("sin(x) * cos(y)", 0.3, 0.7), 0.3_f64.sin() * 0.7_f64.cos());
        assert_relative_eq!(eval("exp(log(x))", 2.5, 0.0), 2.5, epsilon = 1e-12);
        assert_relative_eq!(eval("sqrt(abs(x))", -4.0, 0.0), 2.0);
        assert_relative_eq!(eval("cos(pi)", 0.0, 0.0), -1.0);
        assert_relative_eq!(eval("log(e)", 0.0, 0.0), 1.0);
        assert_relative_eq!(eval("log10(100)", 0.0, 0.0), 2.0);
    }

    #[test]
    fn rejects_empty_input() {
        assert_eq!(parse("   "), Err(ParseError::Empty));
    }

    #[test]
    fn rejects_unknown_identifiers() {
        assert_eq!(
            parse("x + z"),
            Err(ParseError::UnknownIdentifier {
                name: "z".into(),
                pos: 4
            })
        );
    }

    #[test]
    fn rejects_bare_function_names() {
        assert!(matches!(
            parse("sin x"),
            Err(ParseError::MissingArgument { .. })
        ));
    }

    #[test]
    fn rejects_dangling_operators() {
        assert_eq!(parse("x +"), Err(ParseError::UnexpectedEnd));
        assert!(matches!(
            parse("x * * y"),
            Err(ParseError::UnexpectedToken { pos: 4, .. })
        ));
    }

    #[test]
    fn nesting_up_to_the_limit_parses() {
        let source = format!("{}x{}", "(".repeat(MAX_DEPTH), ")".repeat(MAX_DEPTH));
        assert_relative_eq!(eval(&source, 2.0, 0.0), 2.0);

        let source = format!("{}x", "-".repeat(MAX_DEPTH - 1));
        assert_relative_eq!(eval(&source, 2.0, 0.0), -2.0);
    }

    #[test]
    fn rejects_deep_parentheses() {
        let source = format!("{}x{}", "(".repeat(10_000), ")".repeat(10_000));
        assert!(matches!(parse(&source), Err(ParseError::TooDeep { .. })));
    }

    #[test]
    fn rejects_long_prefix_chains() {
        for op in ["-", "+"] {
            let source = format!("{}x", op.repeat(10_000));
            assert!(matches!(parse(&source), Err(ParseError::TooDeep { .. })));
        }
    }

    #[test]
    fn rejects_deep_operator_chains() {
        let sum = vec!["x"; 10_000].join(" + ");
        assert!(matches!(parse(&sum), Err(ParseError::TooDeep { .. })));

        let tower = vec!["x"; 10_000].join("^");
        assert!(matches!(parse(&tower), Err(ParseError::TooDeep { .. })));
    }

    #[test]
    fn rejects_unbalanced_parens() {
        assert_eq!(parse("(x + 1"), Err(ParseError::UnexpectedEnd));
        assert!(matches!(
            parse("x + 1)"),
            Err(ParseError::UnexpectedToken { pos: 5, .. })
        ));
    }
}
