use super::ParseError;

#[derive(Debug, Clone, PartialEq)]
pub(super) enum TokenKind {
    Number(f64),
    Ident(String),
    Plus,
    Minus,
    Star,
    Slash,
    Caret,
    LParen,
    RParen,
}

impl TokenKind {
    pub(super) fn describe(&self) -> String {
        match self {
            Self::Number(n) => n.to_string(),
            Self::Ident(name) => name.clone(),
            Self::Plus => "+".into(),
            Self::Minus => "-".into(),
            Self::Star => "*".into(),
            Self::Slash => "/".into(),
            Self::Caret => "^".into(),
            Self::LParen => "(".into(),
            Self::RParen => ")".into(),
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub(super) struct Token {
    pub(super) kind: TokenKind,
    pub(super) pos: usize,
}

/// Splits expression text into tokens.
pub(super) fn tokenize(source: &str) -> Result<Vec<Token>, ParseError> {
    let bytes = source.as_bytes();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < bytes.len() {
        let ch = bytes[pos];
        if ch.is_ascii_whitespace() {
            pos += 1;
            continue;
        }

        let kind = match ch {
            b'+' => TokenKind::Plus,
            b'-' => TokenKind::Minus,
            b'*' => TokenKind::Star,
            b'/' => TokenKind::Slash,
            b'^' => TokenKind::Caret,
            b'(' => TokenKind::LParen,
            b')' => TokenKind::RParen,
            b'0'..=b'9' | b'.' => {
                let (token, end) = number(source, pos)?;
                tokens.push(token);
                pos = end;
                continue;
            }
            c if c.is_ascii_alphabetic() || c == b'_' => {
                let end = scan(bytes, pos, |c| c.is_ascii_alphanumeric() || c == b'_');
                tokens.push(Token {
                    kind: TokenKind::Ident(source[pos..end].to_owned()),
                    pos,
                });
                pos = end;
                continue;
            }
            _ => {
                // Report the full (possibly multi-byte) character.
                let ch = source[pos..].chars().next().unwrap_or('?');
                return Err(ParseError::UnexpectedChar { ch, pos });
            }
        };

        tokens.push(Token { kind, pos });
        pos += 1;
    }

    Ok(tokens)
}

fn scan(bytes: &[u8], start: usize, accept: impl Fn(u8) -> bool) -> usize {
    let mut end = start;
    while end < bytes.len() && accept(bytes[end]) {
        end += 1;
    }
    end
}

/// Scans a decimal literal with an optional exponent, e.g. `1.5e-3`.
fn number(source: &str, start: usize) -> Result<(Token, usize), ParseError> {
    let bytes = source.as_bytes();
    let mut end = scan(bytes, start, |c| c.is_ascii_digit() || c == b'.');

    if end < bytes.len() && matches!(bytes[end], b'e' | b'E') {
        let mut exp_end = end + 1;
        if exp_end < bytes.len() && matches!(bytes[exp_end], b'+' | b'-') {
            exp_end += 1;
        }
        let digits_end = scan(bytes, exp_end, |c| c.is_ascii_digit());
        // Only an exponent if digits follow; otherwise `2e` is `2 * e`.
        if digits_end > exp_end {
            end = digits_end;
        }
    }

    let text = &source[start..end];
    let value = text
        .parse::<f64>()
        .map_err(|_| ParseError::InvalidNumber {
            text: text.to_owned(),
            pos: start,
        })?;

    Ok((
        Token {
            kind: TokenKind::Number(value),
            pos: start,
        },
        end,
    ))
}
