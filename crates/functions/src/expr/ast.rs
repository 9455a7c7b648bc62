use std::fmt;

/// A free variable of a surface expression.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Var {
    X,
    Y,
}

/// A named single-argument function.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Func {
    Sin,
    Cos,
    Tan,
    Asin,
    Acos,
    Atan,
    Sinh,
    Cosh,
    Tanh,
    Exp,
    /// Natural logarithm.
    Log,
    Log10,
    Sqrt,
    Abs,
}

impl Func {
    /// Looks up a function by the name used in expression text.
    #[must_use]
    pub fn from_name(name: &str) -> Option<Self> {
        let func = match name {
            "sin" => Self::Sin,
            "cos" => Self::Cos,
            "tan" => Self::Tan,
            "asin" => Self::Asin,
            "acos" => Self::Acos,
            "atan" => Self::Atan,
            "sinh" => Self::Sinh,
            "cosh" => Self::Cosh,
            "tanh" => Self::Tanh,
            "exp" => Self::Exp,
            "log" | "ln" => Self::Log,
            "log10" => Self::Log10,
            "sqrt" => Self::Sqrt,
            "abs" => Self::Abs,
            _ => return None,
        };
        Some(func)
    }

    #[must_use]
    pub fn name(self) -> &'static str {
        match self {
            Self::Sin => "sin",
            Self::Cos => "cos",
            Self::Tan => "tan",
            Self::Asin => "asin",
            Self::Acos => "acos",
            Self::Atan => "atan",
            Self::Sinh => "sinh",
            Self::Cosh => "cosh",
            Self::Tanh => "tanh",
            Self::Exp => "exp",
            Self::Log => "log",
            Self::Log10 => "log10",
            Self::Sqrt => "sqrt",
            Self::Abs => "abs",
        }
    }

    fn apply(self, u: f64) -> f64 {
        match self {
            Self::Sin => u.sin(),
            Self::Cos => u.cos(),
            Self::Tan => u.tan(),
            Self::Asin => u.asin(),
            Self::Acos => u.acos(),
            Self::Atan => u.atan(),
            Self::Sinh => u.sinh(),
            Self::Cosh => u.cosh(),
            Self::Tanh => u.tanh(),
            Self::Exp => u.exp(),
            Self::Log => u.ln(),
            Self::Log10 => u.log10(),
            Self::Sqrt => u.sqrt(),
            Self::Abs => u.abs(),
        }
    }
}

/// Expression tree over `x` and `y`.
#[derive(Debug, Clone, PartialEq)]
pub enum Expr {
    Num(f64),
    Var(Var),
    Neg(Box<Expr>),
    Add(Box<Expr>, Box<Expr>),
    Sub(Box<Expr>, Box<Expr>),
    Mul(Box<Expr>, Box<Expr>),
    Div(Box<Expr>, Box<Expr>),
    Pow(Box<Expr>, Box<Expr>),
    Call(Func, Box<Expr>),
}

impl Expr {
    /// Evaluates the tree at `(x, y)` with IEEE semantics.
    ///
    /// Domain errors surface as NaN and division by zero as ±∞.
    #[must_use]
    pub fn eval(&self, x: f64, y: f64) -> f64 {
        match self {
            Self::Num(n) => *n,
            Self::Var(Var::X) => x,
            Self::Var(Var::Y) => y,
            Self::Neg(a) => -a.eval(x, y),
            Self::Add(a, b) => a.eval(x, y) + b.eval(x, y),
            Self::Sub(a, b) => a.eval(x, y) - b.eval(x, y),
            Self::Mul(a, b) => a.eval(x, y) * b.eval(x, y),
            Self::Div(a, b) => a.eval(x, y) / b.eval(x, y),
            Self::Pow(a, b) => pow(a.eval(x, y), b.eval(x, y)),
            Self::Call(func, a) => func.apply(a.eval(x, y)),
        }
    }

    /// Returns `true` if the tree references `var`.
    #[must_use]
    pub fn depends_on(&self, var: Var) -> bool {
        match self {
            Self::Num(_) => false,
            Self::Var(v) => *v == var,
            Self::Neg(a) | Self::Call(_, a) => a.depends_on(var),
            Self::Add(a, b)
            | Self::Sub(a, b)
            | Self::Mul(a, b)
            | Self::Div(a, b)
            | Self::Pow(a, b) => a.depends_on(var) || b.depends_on(var),
        }
    }
}

/// Uses `powi` for small integral exponents so negative bases stay real.
fn pow(base: f64, exponent: f64) -> f64 {
    if exponent.fract() == 0.0 && exponent.abs() <= f64::from(i32::MAX) {
        #[allow(clippy::cast_possible_truncation)]
        let n = exponent as i32;
        base.powi(n)
    } else {
        base.powf(exponent)
    }
}

impl fmt::Display for Expr {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Num(n) => write!(f, "{n}"),
            Self::Var(Var::X) => f.write_str("x"),
            Self::Var(Var::Y) => f.write_str("y"),
            Self::Neg(a) => write!(f, "-({a})"),
            Self::Add(a, b) => write!(f, "({a} + {b})"),
            Self::Sub(a, b) => write!(f, "({a} - {b})"),
            Self::Mul(a, b) => write!(f, "({a} * {b})"),
            Self::Div(a, b) => write!(f, "({a} / {b})"),
            Self::Pow(a, b) => write!(f, "({a} ^ {b})"),
            Self::Call(func, a) => write!(f, "{}({a})", func.name()),
        }
    }
}
