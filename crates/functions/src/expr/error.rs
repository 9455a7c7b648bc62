use thiserror::Error;

/// Errors that can occur when parsing expression text.
///
/// Positions are byte offsets into the source text.
#[derive(Debug, Error, Clone, PartialEq)]
pub enum ParseError {
    #[error("expression is empty")]
    Empty,

    #[error("unexpected character '{ch}' at {pos}")]
    UnexpectedChar { ch: char, pos: usize },

    #[error("invalid number '{text}' at {pos}")]
    InvalidNumber { text: String, pos: usize },

    #[error("unknown identifier '{name}' at {pos}")]
    UnknownIdentifier { name: String, pos: usize },

    #[error("function '{name}' at {pos} must be followed by '('")]
    MissingArgument { name: String, pos: usize },

    #[error("unexpected '{found}' at {pos}")]
    UnexpectedToken { found: String, pos: usize },

    #[error("unexpected end of expression")]
    UnexpectedEnd,

    #[error("expression nests too deeply at {pos}")]
    TooDeep { pos: usize },
}

/// Errors that can occur when evaluating a compiled expression.
#[derive(Debug, Error, Clone, Copy, PartialEq)]
pub enum EvalError {
    #[error("expression is not a number at ({x}, {y})")]
    NotANumber { x: f64, y: f64 },
}
