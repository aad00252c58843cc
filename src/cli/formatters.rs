use tally_config::Config;
use tally_domain::{Activity, ActivitySource, TransactionType};
use uuid::Uuid;

/// Renders amounts with the configured currency and precision.
#[derive(Debug, Clone)]
pub struct AmountFormat {
    currency: String,
    precision: usize,
}

impl AmountFormat {
    pub fn from_config(config: &Config) -> Self {
        Self {
            currency: config.currency.clone(),
            precision: usize::from(config.currency_precision),
        }
    }

    pub fn amount(&self, value: f64) -> String {
        format!("{:.*} {}", self.precision, value, self.currency)
    }

    /// Income shows as `+`, expenses as `-`, regardless of the stored sign.
    pub fn signed(&self, value: f64, kind: TransactionType) -> String {
        let sign = match kind {
            TransactionType::Income => '+',
            TransactionType::Expense => '-',
        };
        format!("{}{}", sign, self.amount(value.abs()))
    }
}

/// First eight hex digits of an id, enough to address it from the shell.
pub fn short_id(id: &Uuid) -> String {
    id.simple().to_string()[..8].to_string()
}

pub fn activity_line(activity: &Activity, format: &AmountFormat) -> String {
    let marker = match activity.source {
        ActivitySource::Transaction => ' ',
        ActivitySource::RecurringBill => '*',
    };
    let category = activity
        .category
        .as_deref()
        .map(|name| format!(" [{}]", name))
        .unwrap_or_default();
    format!(
        "{} {}{:>16}  {}{}",
        activity.date,
        marker,
        format.signed(activity.amount, activity.activity_type),
        activity.description,
        category
    )
}
