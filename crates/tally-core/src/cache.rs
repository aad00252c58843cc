//! Explicit, injectable cache in front of the data sources.
//!
//! Nothing here expires on its own; callers invalidate after writes.

use std::collections::HashMap;
use std::sync::RwLock;

use async_trait::async_trait;
use tracing::{debug, trace};

use tally_domain::{DateRange, RecurringBillDefinition, Transaction, UserContext};

use crate::{
    sources::{RecurringBillSource, TransactionSource},
    CoreError,
};

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum QueryKey {
    Transactions {
        context: UserContext,
        window: DateRange,
    },
    RecurringBills {
        context: UserContext,
    },
}

impl QueryKey {
    pub fn context(&self) -> UserContext {
        match self {
            QueryKey::Transactions { context, .. } | QueryKey::RecurringBills { context } => {
                *context
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq)]
pub enum QueryResult {
    Transactions(Vec<Transaction>),
    RecurringBills(Vec<RecurringBillDefinition>),
}

pub trait QueryCache: Send + Sync {
    fn get(&self, key: &QueryKey) -> Option<QueryResult>;
    fn put(&self, key: QueryKey, value: QueryResult);
    fn invalidate(&self, key: &QueryKey);
    /// Drops every entry scoped to `context`.
    fn invalidate_user(&self, context: &UserContext);
    fn clear(&self);
}

/// Process-local cache. A poisoned lock behaves like an empty cache.
#[derive(Debug, Default)]
pub struct MemoryQueryCache {
    entries: RwLock<HashMap<QueryKey, QueryResult>>,
}

impl MemoryQueryCache {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn len(&self) -> usize {
        self.entries.read().map(|map| map.len()).unwrap_or(0)
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl QueryCache for MemoryQueryCache {
    fn get(&self, key: &QueryKey) -> Option<QueryResult> {
        self.entries.read().ok()?.get(key).cloned()
    }

    fn put(&self, key: QueryKey, value: QueryResult) {
        if let Ok(mut map) = self.entries.write() {
            map.insert(key, value);
        }
    }

    fn invalidate(&self, key: &QueryKey) {
        if let Ok(mut map) = self.entries.write() {
            map.remove(key);
        }
    }

    fn invalidate_user(&self, context: &UserContext) {
        if let Ok(mut map) = self.entries.write() {
            map.retain(|key, _| key.context() != *context);
        }
    }

    fn clear(&self) {
        if let Ok(mut map) = self.entries.write() {
            map.clear();
        }
    }
}

/// Wraps a source so repeated identical fetches are served from `cache`.
/// Only successful fetches are stored.
pub struct CachedSource<S, C> {
    inner: S,
    cache: C,
}

impl<S, C: QueryCache> CachedSource<S, C> {
    pub fn new(inner: S, cache: C) -> Self {
        Self { inner, cache }
    }

    pub fn inner(&self) -> &S {
        &self.inner
    }

    pub fn cache(&self) -> &C {
        &self.cache
    }

    pub fn invalidate_user(&self, context: &UserContext) {
        debug!(user = %context.user_id, "invalidating cached queries");
        self.cache.invalidate_user(context);
    }
}

#[async_trait]
impl<S, C> TransactionSource for CachedSource<S, C>
where
    S: TransactionSource,
    C: QueryCache,
{
    async fn transactions_in_range(
        &self,
        context: &UserContext,
        window: DateRange,
    ) -> Result<Vec<Transaction>, CoreError> {
        let key = QueryKey::Transactions {
            context: *context,
            window,
        };
        if let Some(QueryResult::Transactions(hit)) = self.cache.get(&key) {
            trace!(window = %window, "transaction cache hit");
            return Ok(hit);
        }
        let fetched = self.inner.transactions_in_range(context, window).await?;
        self.cache.put(key, QueryResult::Transactions(fetched.clone()));
        Ok(fetched)
    }
}

#[async_trait]
impl<S, C> RecurringBillSource for CachedSource<S, C>
where
    S: RecurringBillSource,
    C: QueryCache,
{
    async fn active_recurring_bills(
        &self,
        context: &UserContext,
    ) -> Result<Vec<RecurringBillDefinition>, CoreError> {
        let key = QueryKey::RecurringBills { context: *context };
        if let Some(QueryResult::RecurringBills(hit)) = self.cache.get(&key) {
            trace!("recurring bill cache hit");
            return Ok(hit);
        }
        let fetched = self.inner.active_recurring_bills(context).await?;
        self.cache.put(key, QueryResult::RecurringBills(fetched.clone()));
        Ok(fetched)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::sync::atomic::{AtomicUsize, Ordering};

    use chrono::NaiveDate;
    use futures::executor::block_on;
    use tally_domain::{RecurrenceType, TransactionType};
    use uuid::Uuid;

    #[derive(Default)]
    struct CountingSource {
        calls: AtomicUsize,
        fail: bool,
    }

    #[async_trait]
    impl TransactionSource for CountingSource {
        async fn transactions_in_range(
            &self,
            _context: &UserContext,
            window: DateRange,
        ) -> Result<Vec<Transaction>, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            if self.fail {
                return Err(CoreError::Upstream("offline".into()));
            }
            Ok(vec![Transaction::new(
                "Coffee",
                3.5,
                TransactionType::Expense,
                window.from(),
            )])
        }
    }

    #[async_trait]
    impl RecurringBillSource for CountingSource {
        async fn active_recurring_bills(
            &self,
            _context: &UserContext,
        ) -> Result<Vec<RecurringBillDefinition>, CoreError> {
            self.calls.fetch_add(1, Ordering::SeqCst);
            Ok(vec![RecurringBillDefinition::new(
                "Rent",
                1200.0,
                NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
                RecurrenceType::Monthly,
            )])
        }
    }

    fn window() -> DateRange {
        DateRange::new(
            NaiveDate::from_ymd_opt(2024, 6, 1).unwrap(),
            NaiveDate::from_ymd_opt(2024, 6, 30).unwrap(),
        )
        .unwrap()
    }

    #[test]
    fn repeated_fetches_hit_the_cache() {
        let source = CachedSource::new(CountingSource::default(), MemoryQueryCache::new());
        let context = UserContext::new(Uuid::new_v4());
        let first = block_on(source.transactions_in_range(&context, window())).unwrap();
        let second = block_on(source.transactions_in_range(&context, window())).unwrap();
        assert_eq!(first, second);
        assert_eq!(source.inner().calls.load(Ordering::SeqCst), 1);

        block_on(source.active_recurring_bills(&context)).unwrap();
        assert_eq!(source.cache().len(), 2);
        source.invalidate_user(&context);
        assert!(source.cache().is_empty());
    }

    #[test]
    fn failures_are_not_cached() {
        let failing = CountingSource {
            fail: true,
            ..CountingSource::default()
        };
        let source = CachedSource::new(failing, MemoryQueryCache::new());
        let context = UserContext::new(Uuid::new_v4());
        assert!(block_on(source.transactions_in_range(&context, window())).is_err());
        assert!(block_on(source.transactions_in_range(&context, window())).is_err());
        assert_eq!(source.inner().calls.load(Ordering::SeqCst), 2);
        assert!(source.cache().is_empty());
    }

    #[test]
    fn invalidate_user_keeps_other_users() {
        let cache = MemoryQueryCache::new();
        let alice = UserContext::new(Uuid::new_v4());
        let bob = UserContext::new(Uuid::new_v4());
        cache.put(
            QueryKey::RecurringBills { context: alice },
            QueryResult::RecurringBills(Vec::new()),
        );
        cache.put(
            QueryKey::RecurringBills { context: bob },
            QueryResult::RecurringBills(Vec::new()),
        );
        cache.invalidate_user(&alice);
        assert!(cache.get(&QueryKey::RecurringBills { context: alice }).is_none());
        assert!(cache.get(&QueryKey::RecurringBills { context: bob }).is_some());
    }
}
