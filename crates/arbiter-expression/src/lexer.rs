//! Expression tokenizer

use crate::error::{ExpressionError, Result};

#[derive(Debug, Clone, PartialEq)]
pub(crate) enum Token {
    Number(f64),
    Str(String),
    Ident(String),
    /// Symbolic operator such as `==`, `&&` or `+`
    Op(&'static str),
    LParen,
    RParen,
    LBracket,
    RBracket,
    Comma,
    Dot,
    Question,
    Colon,
}

/// Longer operators first so `===` is not read as `==` followed by `=`
const OPERATORS: &[&str] = &[
    "===", "!==", "==", "!=", "<=", ">=", "&&", "||", "<", ">", "+", "-", "*", "/", "%", "!",
];

pub(crate) fn tokenize(input: &str) -> Result<Vec<Token>> {
    let chars: Vec<char> = input.chars().collect();
    let mut tokens = Vec::new();
    let mut pos = 0;

    while pos < chars.len() {
        let c = chars[pos];

        if c.is_whitespace() {
            pos += 1;
            continue;
        }

        if c.is_ascii_digit() {
            let start = pos;
            while pos < chars.len() && chars[pos].is_ascii_digit() {
                pos += 1;
            }
            if pos + 1 < chars.len() && chars[pos] == '.' && chars[pos + 1].is_ascii_digit() {
                pos += 1;
                while pos < chars.len() && chars[pos].is_ascii_digit() {
                    pos += 1;
                }
            }
            let text: String = chars[start..pos].iter().collect();
            let number = text
                .parse::<f64>()
                .map_err(|_| ExpressionError::Syntax(format!("invalid number '{}'", text)))?;
            tokens.push(Token::Number(number));
            continue;
        }

        if c == '"' || c == '\'' {
            let (literal, next) = read_string(&chars, pos)?;
            tokens.push(Token::Str(literal));
            pos = next;
            continue;
        }

        if c.is_alphabetic() || c == '_' {
            let start = pos;
            while pos < chars.len() && (chars[pos].is_alphanumeric() || chars[pos] == '_') {
                pos += 1;
            }
            tokens.push(Token::Ident(chars[start..pos].iter().collect()));
            continue;
        }

        let punctuation = match c {
            '(' => Some(Token::LParen),
            ')' => Some(Token::RParen),
            '[' => Some(Token::LBracket),
            ']' => Some(Token::RBracket),
            ',' => Some(Token::Comma),
            '.' => Some(Token::Dot),
            '?' => Some(Token::Question),
            ':' => Some(Token::Colon),
            _ => None,
        };
        if let Some(token) = punctuation {
            tokens.push(token);
            pos += 1;
            continue;
        }

        let op = OPERATORS.iter().find(|op| {
            let len = op.chars().count();
            pos + len <= chars.len() && chars[pos..pos + len].iter().copied().eq(op.chars())
        });
        match op {
            Some(op) => {
                tokens.push(Token::Op(*op));
                pos += op.chars().count();
            }
            None => {
                return Err(ExpressionError::Syntax(format!(
                    "unexpected character '{}' at position {}",
                    c, pos
                )))
            }
        }
    }

    Ok(tokens)
}

/// Read a quoted string starting at `start`, returning the literal and the
/// position after the closing quote
fn read_string(chars: &[char], start: usize) -> Result<(String, usize)> {
    let quote = chars[start];
    let mut literal = String::new();
    let mut pos = start + 1;

    while pos < chars.len() {
        match chars[pos] {
            '\\' if pos + 1 < chars.len() => {
                let escaped = chars[pos + 1];
                literal.push(match escaped {
                    'n' => '\n',
                    't' => '\t',
                    other => other,
                });
                pos += 2;
            }
            c if c == quote => return Ok((literal, pos + 1)),
            c => {
                literal.push(c);
                pos += 1;
            }
        }
    }

    Err(ExpressionError::Syntax(format!(
        "unterminated string starting at position {}",
        start
    )))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_tokenize_function_call() {
        let tokens = tokenize("add(5)").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("add".to_string()),
                Token::LParen,
                Token::Number(5.0),
                Token::RParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_strict_equality() {
        let tokens = tokenize("value === 1").unwrap();
        assert_eq!(
            tokens,
            vec![Token::Ident("value".to_string()), Token::Op("==="), Token::Number(1.0)]
        );
    }

    #[test]
    fn test_tokenize_decimal_and_path() {
        let tokens = tokenize("context.rate * 2.5").unwrap();
        assert_eq!(
            tokens,
            vec![
                Token::Ident("context".to_string()),
                Token::Dot,
                Token::Ident("rate".to_string()),
                Token::Op("*"),
                Token::Number(2.5),
            ]
        );
    }

    #[test]
    fn test_tokenize_escaped_string() {
        let tokens = tokenize(r#"'it\'s' "a\"b""#).unwrap();
        assert_eq!(
            tokens,
            vec![Token::Str("it's".to_string()), Token::Str("a\"b".to_string())]
        );
    }

    #[test]
    fn test_tokenize_errors() {
        assert!(tokenize("\"open").is_err());
        assert!(tokenize("a # b").is_err());
    }
}
