//! Positional and `--flag` parsing shared by the command handlers.

use std::collections::HashMap;

use chrono::NaiveDate;

use tally_domain::{CustomRange, MonthSelection, PeriodSelector, TransactionType};

use crate::cli::core::CommandError;

/// Flags that never take a value.
const SWITCHES: [&str; 2] = ["json", "save"];

const DATE_FORMAT: &str = "%Y-%m-%d";

/// Arguments split into positionals, `--key value` options and bare switches.
#[derive(Debug, Default)]
pub struct ParsedArgs<'a> {
    pub positional: Vec<&'a str>,
    options: HashMap<&'a str, &'a str>,
    switches: Vec<&'a str>,
}

impl<'a> ParsedArgs<'a> {
    pub fn parse(args: &[&'a str]) -> Result<Self, CommandError> {
        let mut parsed = ParsedArgs::default();
        let mut iter = args.iter().copied();
        while let Some(arg) = iter.next() {
            match arg.strip_prefix("--") {
                Some(name) if SWITCHES.contains(&name) => parsed.switches.push(name),
                Some(name) if !name.is_empty() => {
                    let value = iter.next().ok_or_else(|| {
                        CommandError::invalid(format!("option `--{}` expects a value", name))
                    })?;
                    parsed.options.insert(name, value);
                }
                _ => parsed.positional.push(arg),
            }
        }
        Ok(parsed)
    }

    pub fn flag(&self, name: &str) -> bool {
        self.switches.iter().any(|switch| *switch == name)
    }

    pub fn option(&self, name: &str) -> Option<&'a str> {
        self.options.get(name).copied()
    }

    pub fn date_option(&self, name: &str) -> Result<Option<NaiveDate>, CommandError> {
        self.option(name).map(parse_date).transpose()
    }

    pub fn int_option(&self, name: &str) -> Result<Option<i32>, CommandError> {
        self.option(name)
            .map(|raw| {
                raw.parse::<i32>().map_err(|_| {
                    CommandError::invalid(format!("`--{}` expects a whole number, got `{}`", name, raw))
                })
            })
            .transpose()
    }
}

pub fn parse_date(raw: &str) -> Result<NaiveDate, CommandError> {
    NaiveDate::parse_from_str(raw.trim(), DATE_FORMAT)
        .map_err(|_| CommandError::invalid(format!("invalid date `{}`; expected YYYY-MM-DD", raw)))
}

/// How entered amounts map onto signed totals.
pub const AMOUNT_CONVENTION: &str =
    "amounts are positive magnitudes; income or expense decides the sign";

/// Parses a finite, strictly positive amount.
pub fn parse_amount(raw: &str) -> Result<f64, CommandError> {
    match raw.trim().parse::<f64>() {
        Ok(value) if value.is_finite() && value > 0.0 => Ok(value),
        _ => Err(CommandError::invalid(format!(
            "invalid amount `{}`; {}",
            raw, AMOUNT_CONVENTION
        ))),
    }
}

pub fn parse_kind(raw: &str) -> Result<TransactionType, CommandError> {
    match raw.trim().to_ascii_lowercase().as_str() {
        "income" | "in" => Ok(TransactionType::Income),
        "expense" | "out" => Ok(TransactionType::Expense),
        _ => Err(CommandError::invalid(format!(
            "unknown entry type `{}`; expected income or expense",
            raw
        ))),
    }
}

/// A period selector with whatever extra input it needs.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct PeriodArgs {
    pub selector: PeriodSelector,
    pub custom: Option<CustomRange>,
    pub month: Option<MonthSelection>,
}

impl PeriodArgs {
    /// Reads `<selector> [YYYY-MM | from [to]]`, falling back to `default`
    /// when no selector is given.
    pub fn parse(tokens: &[&str], default: PeriodSelector) -> Result<Self, CommandError> {
        let Some((first, rest)) = tokens.split_first() else {
            return Ok(Self {
                selector: default,
                custom: None,
                month: None,
            });
        };
        let selector = first
            .parse::<PeriodSelector>()
            .map_err(|err| CommandError::invalid(err.to_string()))?;
        let mut args = Self {
            selector,
            custom: None,
            month: None,
        };
        match selector {
            PeriodSelector::SelectMonth => {
                let [raw] = rest else {
                    return Err(CommandError::invalid("usage: month <YYYY-MM>"));
                };
                args.month = Some(raw.parse::<MonthSelection>().map_err(CommandError::invalid)?);
            }
            PeriodSelector::CustomPeriod => {
                if rest.len() > 2 {
                    return Err(CommandError::invalid("usage: custom <from> <to>"));
                }
                let from = rest.first().copied().map(parse_date).transpose()?;
                let to = rest.get(1).copied().map(parse_date).transpose()?;
                args.custom = Some(CustomRange::new(from, to));
            }
            _ if !rest.is_empty() => {
                return Err(CommandError::invalid(format!(
                    "`{}` takes no extra arguments",
                    selector.key()
                )));
            }
            _ => {}
        }
        Ok(args)
    }
}
