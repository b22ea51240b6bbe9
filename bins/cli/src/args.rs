//! Command-line argument handling.

use centime_shared::AppError;

/// Usage text printed by `centime help`.
pub const USAGE: &str = "\
Usage:
  centime parse <text> [--currency CODE] [--auto-decimal] [--strict] [--json]
  centime format <val> <CODE|-> [--no-currency] [--blank-zero]
  centime balance <amount>... [--currency CODE] [--json]
  centime help";

/// A parsed command line.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Command {
    /// Parse free-form text into an amount.
    Parse {
        /// Text to parse.
        text: String,
        /// Default currency override.
        currency: Option<String>,
        /// Force auto decimal placement.
        auto_decimal: bool,
        /// Force strict currency mode.
        strict: bool,
        /// Emit JSON.
        json: bool,
    },
    /// Format a smallest-unit value.
    Format {
        /// Value in smallest units.
        val: i64,
        /// Currency code, `None` for a currency-less zero.
        currency: Option<String>,
        /// Hide the currency code.
        no_currency: bool,
        /// Render zero as an empty string.
        blank_zero: bool,
    },
    /// Balance a transaction made of the given amounts.
    Balance {
        /// One split per amount text.
        amounts: Vec<String>,
        /// Default currency override.
        currency: Option<String>,
        /// Emit JSON.
        json: bool,
    },
    /// Print usage.
    Help,
}

fn usage_error(message: impl Into<String>) -> AppError {
    AppError::Validation(format!("{}\n\n{USAGE}", message.into()))
}

/// Parses the arguments following the program name.
///
/// # Errors
///
/// Returns `AppError::Validation` with the usage text for malformed input.
pub fn parse_args<I>(args: I) -> Result<Command, AppError>
where
    I: IntoIterator<Item = String>,
{
    let mut args = args.into_iter();
    let Some(command) = args.next() else {
        return Ok(Command::Help);
    };

    let mut positional = Vec::new();
    let mut currency = None;
    let mut flags = Vec::new();
    while let Some(arg) = args.next() {
        match arg.as_str() {
            "--currency" | "-c" => {
                currency = Some(args.next().ok_or_else(|| usage_error("--currency needs a code"))?);
            }
            "--auto-decimal" | "--strict" | "--json" | "--no-currency" | "--blank-zero" => {
                flags.push(arg);
            }
            "--" => positional.extend(args.by_ref()),
            other if other.starts_with("--") => {
                return Err(usage_error(format!("unknown option {other}")));
            }
            _ => positional.push(arg),
        }
    }
    let has = |flag: &str| flags.iter().any(|f| f == flag);

    match command.as_str() {
        "parse" => {
            let [text] = <[String; 1]>::try_from(positional)
                .map_err(|_| usage_error("parse takes exactly one text argument"))?;
            Ok(Command::Parse {
                text,
                currency,
                auto_decimal: has("--auto-decimal"),
                strict: has("--strict"),
                json: has("--json"),
            })
        }
        "format" => {
            let [val, code] = <[String; 2]>::try_from(positional)
                .map_err(|_| usage_error("format takes a value and a currency code"))?;
            let val = val
                .parse()
                .map_err(|_| usage_error(format!("invalid value {val:?}")))?;
            Ok(Command::Format {
                val,
                currency: (code != "-").then_some(code),
                no_currency: has("--no-currency"),
                blank_zero: has("--blank-zero"),
            })
        }
        "balance" => {
            if positional.is_empty() {
                return Err(usage_error("balance needs at least one amount"));
            }
            Ok(Command::Balance {
                amounts: positional,
                currency,
                json: has("--json"),
            })
        }
        "help" | "--help" | "-h" => Ok(Command::Help),
        other => Err(usage_error(format!("unknown command {other}"))),
    }
}
