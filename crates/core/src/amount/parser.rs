//! Free-form amount parsing.
//!
//! Turns user input such as `CAD 3 000.00`, `eur42.12`, `(12.34)` or
//! `21 * 4 / (1 + 1) EUR` into an [`Amount`]. Currency words and symbols are
//! extracted first, then the remaining text goes through the expression
//! parser with a separator-aware literal reader.

use std::sync::Arc;

use tracing::{debug, trace};

use super::error::ParseError;
use super::separators::SeparatorReader;
use super::value::Amount;
use crate::currency::{Currency, CurrencyRegistry, DEFAULT_EXPONENT};
use crate::expr::{tokenize, Parser, Token};

/// Parsing switches.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParseOptions {
    /// Currency used when the text carries none.
    pub default_currency: Option<String>,
    /// Read plain digit runs as smallest units (`1234` → `12.34`).
    pub auto_decimal_place: bool,
    /// Fail unless a currency resolves, explicitly or from the default.
    pub strict_currency: bool,
    /// Allow arithmetic; when off, only a signed literal is accepted.
    pub with_expression: bool,
}

impl Default for ParseOptions {
    fn default() -> Self {
        Self {
            default_currency: None,
            auto_decimal_place: false,
            strict_currency: false,
            with_expression: true,
        }
    }
}

impl ParseOptions {
    /// Options with `code` as the default currency.
    #[must_use]
    pub fn with_default(code: impl Into<String>) -> Self {
        Self {
            default_currency: Some(code.into()),
            ..Self::default()
        }
    }
}

/// Amount parser bound to a currency registry.
#[derive(Debug, Clone, Copy)]
pub struct AmountParser<'a> {
    registry: &'a CurrencyRegistry,
}

impl<'a> AmountParser<'a> {
    /// Creates a parser resolving currencies against `registry`.
    #[must_use]
    pub const fn new(registry: &'a CurrencyRegistry) -> Self {
        Self { registry }
    }

    /// Parses `text` into an amount.
    ///
    /// Empty input is a zero amount without currency.
    ///
    /// # Errors
    ///
    /// Returns a [`ParseError`] for unknown currency words, leftover garbage,
    /// malformed numbers or expressions, division by zero, a missing currency
    /// in strict mode and values that overflow 64 bits.
    pub fn parse(&self, text: &str, options: &ParseOptions) -> Result<Amount, ParseError> {
        let text = text.trim();
        if text.is_empty() {
            return Ok(Amount::zero());
        }

        let extracted = self.extract_currency(text)?;
        let currency = match extracted.currency {
            Some(currency) => Some(currency),
            None => options
                .default_currency
                .as_deref()
                .and_then(|code| self.registry.get(code)),
        };
        debug!(
            text,
            currency = currency.as_ref().map(|c| c.code.as_str()),
            numeric = %extracted.numeric,
            "Resolved currency"
        );
        if options.strict_currency && currency.is_none() {
            return Err(ParseError::MissingCurrency);
        }
        let exponent = currency.as_ref().map_or(DEFAULT_EXPONENT, |c| c.exponent);

        let tokens = tokenize(&extracted.numeric)?;
        if tokens.is_empty() {
            return Ok(currency.map_or_else(Amount::zero, Amount::zero_of));
        }
        let (tokens, wrapped) = unwrap_negation(tokens);
        let plain = plain_literal(&tokens);
        if plain.is_none() && !options.with_expression {
            return Err(ParseError::ExpressionNotAllowed);
        }

        let units = match plain {
            Some((negative, raw)) if options.auto_decimal_place => {
                trace!(raw, exponent, "Auto decimal placement");
                Some(smallest_units(raw, negative)?)
            }
            _ => None,
        };

        let amount = if let Some(val) = units {
            match currency {
                Some(currency) => Amount::new(val, currency),
                None if val == 0 => Amount::zero(),
                None => return Err(ParseError::MissingCurrency),
            }
        } else {
            let reader = SeparatorReader::new(exponent);
            let value = Parser::new(tokens, &reader).parse()?.eval()?;
            Amount::from_decimal(value, currency)?
        };

        if wrapped {
            Ok(amount.checked_neg()?)
        } else {
            Ok(amount)
        }
    }

    /// Strips currency words and symbols, returning what is left to evaluate.
    fn extract_currency(&self, text: &str) -> Result<Extracted, ParseError> {
        let chars: Vec<char> = text.chars().collect();
        let mut numeric: Vec<char> = chars.clone();
        let mut code: Option<Arc<Currency>> = None;
        let mut symbol: Option<Arc<Currency>> = None;

        let mut i = 0;
        while i < chars.len() {
            let ch = chars[i];
            if !is_word_char(ch) && !is_symbol_char(ch) {
                i += 1;
                continue;
            }
            let is_word = is_word_char(ch);
            let end = chars[i..]
                .iter()
                .position(|&c| {
                    if is_word {
                        !is_word_char(c)
                    } else {
                        !is_symbol_char(c)
                    }
                })
                .map_or(chars.len(), |n| i + n);
            let run: String = chars[i..end].iter().collect();
            let at_edge = !chars[..i].iter().any(|c| c.is_alphanumeric())
                || !chars[end..].iter().any(|c| c.is_alphanumeric());

            if is_word {
                let glued = (i > 0 && is_number_neighbor(chars[i - 1]))
                    || chars.get(end).is_some_and(|&c| is_number_neighbor(c));
                let three_letters = run.chars().count() == 3;
                let registered = if three_letters {
                    self.registry.get(&run)
                } else {
                    None
                };
                match registered {
                    Some(found) if at_edge => {
                        if let Some(previous) = &code {
                            if previous.code != found.code {
                                return Err(ParseError::ConflictingCurrencies {
                                    first: previous.code.clone(),
                                    second: found.code.clone(),
                                });
                            }
                        }
                        code = Some(found);
                    }
                    // A known code between two numbers is misplaced, not unknown.
                    Some(_) => return Err(ParseError::Garbage(run)),
                    None if !glued => {
                        return Err(if three_letters {
                            ParseError::UnknownCurrency(run.to_uppercase())
                        } else {
                            ParseError::Garbage(run)
                        });
                    }
                    None if !at_edge => return Err(ParseError::Garbage(run)),
                    None => {}
                }
            } else {
                if !at_edge {
                    return Err(ParseError::Garbage(run));
                }
                if symbol.is_none() {
                    symbol = self.registry.lookup_symbol(&run);
                }
            }

            trace!(run = %run, "Stripped from amount text");
            for slot in &mut numeric[i..end] {
                *slot = ' ';
            }
            i = end;
        }

        Ok(Extracted {
            currency: code.or(symbol),
            numeric: numeric.into_iter().collect(),
        })
    }
}

struct Extracted {
    currency: Option<Arc<Currency>>,
    numeric: String,
}

fn is_word_char(ch: char) -> bool {
    ch.is_alphabetic()
}

fn is_symbol_char(ch: char) -> bool {
    !ch.is_alphanumeric()
        && !ch.is_whitespace()
        && !crate::expr::lexer::is_number_char(ch)
        && !crate::expr::lexer::is_operator_char(ch)
}

fn is_number_neighbor(ch: char) -> bool {
    ch.is_ascii_digit() || matches!(ch, '.' | ',')
}

/// Removes an accounting negation: `(x)` or `-(x)` around the whole input.
fn unwrap_negation(mut tokens: Vec<Token>) -> (Vec<Token>, bool) {
    let skip = usize::from(tokens.first() == Some(&Token::Minus));
    if tokens.get(skip) != Some(&Token::LeftParen) || tokens.last() != Some(&Token::RightParen) {
        return (tokens, false);
    }

    let mut depth = 0usize;
    let last = tokens.len() - 1;
    for (i, token) in tokens.iter().enumerate().skip(skip) {
        match token {
            Token::LeftParen => depth += 1,
            Token::RightParen => {
                depth = depth.saturating_sub(1);
                if depth == 0 && i != last {
                    return (tokens, false);
                }
            }
            _ => {}
        }
    }

    tokens.truncate(last);
    (tokens.split_off(skip + 1), true)
}

/// Returns the sign and literal if `tokens` is a lone, optionally signed, number.
fn plain_literal(tokens: &[Token]) -> Option<(bool, &str)> {
    match tokens {
        [Token::Number(raw)] | [Token::Plus, Token::Number(raw)] => Some((false, raw.as_str())),
        [Token::Minus, Token::Number(raw)] => Some((true, raw.as_str())),
        _ => None,
    }
}

fn smallest_units(raw: &str, negative: bool) -> Result<i64, ParseError> {
    let digits: String = raw.chars().filter(char::is_ascii_digit).collect();
    if digits.is_empty() {
        return Err(ParseError::InvalidNumber(raw.to_string()));
    }
    let val: i64 = digits.parse().map_err(|_| ParseError::Overflow)?;
    Ok(if negative { -val } else { val })
}

#[cfg(test)]
#[path = "parser_tests.rs"]
mod tests;
