//! Tokenizer for arithmetic over monetary literals.
//!
//! Numeric literals are kept as raw text: separator disambiguation needs to
//! know where the literal sits in the expression, which only the parser does.

use super::error::{ExprError, ExprResult};

/// Lexical tokens.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Token {
    /// Raw numeric literal: digits, `.`, `,`, `'` and grouping spaces.
    Number(String),
    /// `+`
    Plus,
    /// `-`
    Minus,
    /// `*`
    Star,
    /// `/`
    Slash,
    /// `(`
    LeftParen,
    /// `)`
    RightParen,
}

impl Token {
    /// Returns true for the four arithmetic operators.
    #[must_use]
    pub fn is_operator(&self) -> bool {
        matches!(self, Self::Plus | Self::Minus | Self::Star | Self::Slash)
    }
}

impl std::fmt::Display for Token {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Number(raw) => write!(f, "number {raw:?}"),
            Self::Plus => f.write_str("'+'"),
            Self::Minus => f.write_str("'-'"),
            Self::Star => f.write_str("'*'"),
            Self::Slash => f.write_str("'/'"),
            Self::LeftParen => f.write_str("'('"),
            Self::RightParen => f.write_str("')'"),
        }
    }
}

/// Returns true for characters that may appear inside a numeric literal.
#[must_use]
pub fn is_number_char(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '.' | ',' | '\'')
}

/// Returns true for characters with an arithmetic meaning.
#[must_use]
pub fn is_operator_char(ch: char) -> bool {
    matches!(ch, '+' | '-' | '*' | '/' | '(' | ')')
}

/// Splits `input` into tokens.
///
/// A space is part of a literal only when it sits between a digit and a
/// group of exactly three digits (`3 000.00`); any other whitespace separates
/// tokens.
pub fn tokenize(input: &str) -> ExprResult<Vec<Token>> {
    let chars: Vec<(usize, char)> = input.char_indices().collect();
    let mut tokens = Vec::new();
    let mut i = 0;

    while i < chars.len() {
        let (pos, ch) = chars[i];
        let token = match ch {
            c if c.is_whitespace() => {
                i += 1;
                continue;
            }
            '+' => Token::Plus,
            '-' => Token::Minus,
            '*' => Token::Star,
            '/' => Token::Slash,
            '(' => Token::LeftParen,
            ')' => Token::RightParen,
            c if is_number_char(c) => {
                let (raw, next) = read_number(&chars, i);
                tokens.push(Token::Number(raw));
                i = next;
                continue;
            }
            _ => return Err(ExprError::UnexpectedChar { ch, pos }),
        };
        tokens.push(token);
        i += 1;
    }

    Ok(tokens)
}

fn read_number(chars: &[(usize, char)], start: usize) -> (String, usize) {
    let mut raw = String::new();
    let mut i = start;
    while i < chars.len() {
        let ch = chars[i].1;
        if is_number_char(ch) {
            raw.push(ch);
            i += 1;
        } else if ch == ' ' && is_grouping_space(chars, i) {
            raw.push(ch);
            i += 1;
        } else {
            break;
        }
    }
    (raw, i)
}

fn is_grouping_space(chars: &[(usize, char)], at: usize) -> bool {
    let digit_at = |i: usize| chars.get(i).is_some_and(|(_, c)| c.is_ascii_digit());
    at > 0
        && digit_at(at - 1)
        && (1..=3).all(|offset| digit_at(at + offset))
        && !digit_at(at + 4)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn num(raw: &str) -> Token {
        Token::Number(raw.to_string())
    }

    #[test]
    fn test_tokenize_operators() {
        assert_eq!(
            tokenize("21 * 4 / (1 + 1)").unwrap(),
            vec![
                num("21"),
                Token::Star,
                num("4"),
                Token::Slash,
                Token::LeftParen,
                num("1"),
                Token::Plus,
                num("1"),
                Token::RightParen,
            ]
        );
    }

    #[test]
    fn test_tokenize_keeps_separators_raw() {
        assert_eq!(tokenize("1,454,67").unwrap(), vec![num("1,454,67")]);
        assert_eq!(tokenize("1'234.56").unwrap(), vec![num("1'234.56")]);
        assert_eq!(tokenize(".42").unwrap(), vec![num(".42")]);
    }

    #[test]
    fn test_grouping_space() {
        assert_eq!(tokenize("3 000.00").unwrap(), vec![num("3 000.00")]);
        assert_eq!(tokenize("1 234 567").unwrap(), vec![num("1 234 567")]);
        // Not a three-digit group
        assert_eq!(tokenize("12 34").unwrap(), vec![num("12"), num("34")]);
        assert_eq!(tokenize("1 2345").unwrap(), vec![num("1"), num("2345")]);
    }

    #[test]
    fn test_trailing_space_ignored() {
        assert_eq!(tokenize("1234 ").unwrap(), vec![num("1234")]);
    }

    #[test]
    fn test_unexpected_char() {
        assert_eq!(
            tokenize("1 # 2"),
            Err(ExprError::UnexpectedChar { ch: '#', pos: 2 })
        );
    }

    #[test]
    fn test_is_operator() {
        assert!(Token::Slash.is_operator());
        assert!(!Token::LeftParen.is_operator());
        assert!(!num("1").is_operator());
    }
}
