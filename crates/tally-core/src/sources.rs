//! Data-access seams to the backing store. Implementations live outside the core.

use async_trait::async_trait;

use tally_domain::{DateRange, RecurringBillDefinition, Transaction, UserContext};

use crate::CoreError;

/// Fetches ledger transactions for a user.
#[async_trait]
pub trait TransactionSource: Send + Sync {
    /// Transactions whose date lies inside `window`, both bounds inclusive.
    async fn transactions_in_range(
        &self,
        context: &UserContext,
        window: DateRange,
    ) -> Result<Vec<Transaction>, CoreError>;
}

/// Fetches recurring bill templates for a user.
#[async_trait]
pub trait RecurringBillSource: Send + Sync {
    /// Every active definition, unfiltered by date.
    async fn active_recurring_bills(
        &self,
        context: &UserContext,
    ) -> Result<Vec<RecurringBillDefinition>, CoreError>;
}
