//! tally-storage-json
//!
//! Filesystem JSON store keeping one snapshot per user. Implements the core
//! data-source traits so the organizer can run without the hosted backend.

use std::{
    fs::{self, File},
    io::Write,
    path::{Path, PathBuf},
};

use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use tracing::{debug, info};
use uuid::Uuid;

use tally_core::{CoreError, RecurringBillSource, TransactionSource};
use tally_domain::{
    DateRange, RecurringBillDefinition, SavingsGoal, Transaction, UserContext,
    CURRENT_SCHEMA_VERSION,
};

const SNAPSHOT_EXTENSION: &str = "json";
const TMP_SUFFIX: &str = "tmp";

/// Everything persisted for one user.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq)]
pub struct UserSnapshot {
    #[serde(default = "current_schema_version")]
    pub schema_version: u8,
    #[serde(default)]
    pub transactions: Vec<Transaction>,
    #[serde(default)]
    pub recurring_bills: Vec<RecurringBillDefinition>,
    #[serde(default)]
    pub goals: Vec<SavingsGoal>,
}

impl Default for UserSnapshot {
    fn default() -> Self {
        Self {
            schema_version: CURRENT_SCHEMA_VERSION,
            transactions: Vec::new(),
            recurring_bills: Vec::new(),
            goals: Vec::new(),
        }
    }
}

fn current_schema_version() -> u8 {
    CURRENT_SCHEMA_VERSION
}

/// Filesystem-backed JSON persistence, one `<user_id>.json` file per user.
#[derive(Debug, Clone)]
pub struct JsonDataStore {
    root: PathBuf,
}

impl JsonDataStore {
    pub fn new(root: PathBuf) -> Result<Self, CoreError> {
        fs::create_dir_all(&root)?;
        Ok(Self { root })
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    pub fn snapshot_path(&self, context: &UserContext) -> PathBuf {
        self.root.join(format!("{}.{}", context.user_id, SNAPSHOT_EXTENSION))
    }

    /// Loads the user's snapshot; a missing file is an empty snapshot.
    pub fn load(&self, context: &UserContext) -> Result<UserSnapshot, CoreError> {
        let path = self.snapshot_path(context);
        if !path.exists() {
            debug!(user = %context.user_id, "no snapshot on disk, starting empty");
            return Ok(UserSnapshot::default());
        }
        let snapshot = load_snapshot_from_path(&path)?;
        if snapshot.schema_version > CURRENT_SCHEMA_VERSION {
            return Err(CoreError::Storage(format!(
                "snapshot `{}` uses schema {} but only {} is supported",
                path.display(),
                snapshot.schema_version,
                CURRENT_SCHEMA_VERSION
            )));
        }
        Ok(snapshot)
    }

    pub fn save(&self, context: &UserContext, snapshot: &UserSnapshot) -> Result<(), CoreError> {
        let path = self.snapshot_path(context);
        save_snapshot_to_path(snapshot, &path)?;
        debug!(
            user = %context.user_id,
            transactions = snapshot.transactions.len(),
            recurring_bills = snapshot.recurring_bills.len(),
            goals = snapshot.goals.len(),
            "saved snapshot"
        );
        Ok(())
    }

    /// Loads, applies `change`, and saves the snapshot back.
    pub fn update<F, T>(&self, context: &UserContext, change: F) -> Result<T, CoreError>
    where
        F: FnOnce(&mut UserSnapshot) -> T,
    {
        let mut snapshot = self.load(context)?;
        let result = change(&mut snapshot);
        snapshot.schema_version = CURRENT_SCHEMA_VERSION;
        self.save(context, &snapshot)?;
        Ok(result)
    }

    pub fn add_transaction(
        &self,
        context: &UserContext,
        transaction: Transaction,
    ) -> Result<Uuid, CoreError> {
        let id = transaction.id;
        self.update(context, |snapshot| snapshot.transactions.push(transaction))?;
        info!(user = %context.user_id, transaction = %id, "transaction stored");
        Ok(id)
    }

    pub fn add_transactions(
        &self,
        context: &UserContext,
        transactions: Vec<Transaction>,
    ) -> Result<usize, CoreError> {
        let count = transactions.len();
        self.update(context, |snapshot| snapshot.transactions.extend(transactions))?;
        info!(user = %context.user_id, count, "transactions stored");
        Ok(count)
    }

    pub fn add_recurring_bill(
        &self,
        context: &UserContext,
        definition: RecurringBillDefinition,
    ) -> Result<Uuid, CoreError> {
        let id = definition.id;
        self.update(context, |snapshot| snapshot.recurring_bills.push(definition))?;
        info!(user = %context.user_id, definition = %id, "recurring bill stored");
        Ok(id)
    }

    /// Removes a definition. Returns whether anything was removed.
    pub fn remove_recurring_bill(&self, context: &UserContext, id: Uuid) -> Result<bool, CoreError> {
        self.update(context, |snapshot| {
            let before = snapshot.recurring_bills.len();
            snapshot.recurring_bills.retain(|bill| bill.id != id);
            snapshot.recurring_bills.len() != before
        })
    }

    pub fn add_goal(&self, context: &UserContext, goal: SavingsGoal) -> Result<Uuid, CoreError> {
        let id = goal.id;
        self.update(context, |snapshot| snapshot.goals.push(goal))?;
        Ok(id)
    }

    pub fn goals(&self, context: &UserContext) -> Result<Vec<SavingsGoal>, CoreError> {
        Ok(self.load(context)?.goals)
    }
}

#[async_trait]
impl TransactionSource for JsonDataStore {
    async fn transactions_in_range(
        &self,
        context: &UserContext,
        window: DateRange,
    ) -> Result<Vec<Transaction>, CoreError> {
        let snapshot = self.load(context)?;
        Ok(snapshot
            .transactions
            .into_iter()
            .filter(|txn| window.contains(txn.date))
            .collect())
    }
}

#[async_trait]
impl RecurringBillSource for JsonDataStore {
    async fn active_recurring_bills(
        &self,
        context: &UserContext,
    ) -> Result<Vec<RecurringBillDefinition>, CoreError> {
        Ok(self.load(context)?.recurring_bills)
    }
}

/// Saves a snapshot to an arbitrary path on disk.
pub fn save_snapshot_to_path(snapshot: &UserSnapshot, path: &Path) -> Result<(), CoreError> {
    if let Some(parent) = path.parent() {
        fs::create_dir_all(parent)?;
    }
    let json =
        serde_json::to_string_pretty(snapshot).map_err(|err| CoreError::Serde(err.to_string()))?;
    let tmp = tmp_path(path);
    write_atomic(&tmp, &json)?;
    fs::rename(&tmp, path)?;
    Ok(())
}

/// Loads a snapshot from the provided filesystem path.
pub fn load_snapshot_from_path(path: &Path) -> Result<UserSnapshot, CoreError> {
    let data = fs::read_to_string(path)?;
    serde_json::from_str(&data).map_err(|err| CoreError::Serde(err.to_string()))
}

fn tmp_path(path: &Path) -> PathBuf {
    let mut tmp = path.to_path_buf();
    let ext = match path.extension().and_then(|ext| ext.to_str()) {
        Some(existing) => format!("{}.{}", existing, TMP_SUFFIX),
        None => TMP_SUFFIX.to_string(),
    };
    tmp.set_extension(ext);
    tmp
}

fn write_atomic(path: &Path, data: &str) -> Result<(), CoreError> {
    let mut file = File::create(path)?;
    file.write_all(data.as_bytes())?;
    file.sync_all()?;
    Ok(())
}
