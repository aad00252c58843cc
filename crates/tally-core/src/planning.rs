//! Generation of planned entries from a cadence template.

use tracing::debug;

use tally_domain::{PlannedEntry, Transaction};

use crate::{time::shift_month, CoreError};

/// Planning horizon used when the caller does not pick one.
pub const DEFAULT_PLANNING_HORIZON_MONTHS: u32 = 12;

/// Longest accepted planning horizon, one hundred years.
pub const MAX_PLANNING_HORIZON_MONTHS: u32 = 1200;

pub struct PlanningGenerator;

impl PlanningGenerator {
    /// Creates one transaction every cadence step, starting at the entry's start
    /// date, for all steps that begin within `horizon_months`.
    ///
    /// Over twelve months this yields 12 monthly, 4 quarterly, 2 semiannual and
    /// 1 annual entry; longer horizons keep repeating every cadence.
    pub fn generate(
        entry: &PlannedEntry,
        horizon_months: u32,
    ) -> Result<Vec<Transaction>, CoreError> {
        if horizon_months == 0 {
            return Err(CoreError::Validation(
                "planning horizon must be at least one month".into(),
            ));
        }
        if horizon_months > MAX_PLANNING_HORIZON_MONTHS {
            return Err(CoreError::Validation(format!(
                "planning horizon of {} months exceeds the maximum of {}",
                horizon_months, MAX_PLANNING_HORIZON_MONTHS
            )));
        }
        let step = entry.cadence.step_months();
        let total = horizon_months.div_ceil(step);
        let mut generated = Vec::new();
        for k in 0..total {
            let date = shift_month(entry.start_date, i64::from(k * step))
                .ok_or_else(|| CoreError::OutOfRange(entry.start_date.to_string()))?;
            let mut txn = Transaction::new(
                format!("{} ({}/{})", entry.description, k + 1, total),
                entry.amount,
                entry.transaction_type,
                date,
            );
            txn.category = entry.category.clone();
            txn.status = Some("planned".into());
            generated.push(txn);
        }
        debug!(
            cadence = %entry.cadence,
            horizon_months,
            generated = generated.len(),
            "generated planned entries"
        );
        Ok(generated)
    }
}
