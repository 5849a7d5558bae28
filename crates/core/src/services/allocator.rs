//! Registration number allocation.
//!
//! A submitted report receives the lowest free sequence number of its
//! calendar period, rendered as `NNN-DPMDPPA-<roman month>-<year>`. The
//! probe walks candidates `001..=999` and returns the first number the
//! store does not know yet.
//!
//! The whole probe runs inside a process-wide async lock, so concurrent
//! submissions in the same period do not race to a candidate. The store's
//! unique constraint on the registration number column is the actual
//! uniqueness guarantee; callers re-run the allocation once when an insert
//! still reports a duplicate key (e.g. a second service instance).

use std::sync::Arc;

use async_trait::async_trait;
use pedika_common::{AppError, AppResult, MAX_SEQUENCE, RegistrationPeriod};
use pedika_db::repositories::ReportRepository;
use tokio::sync::Mutex;

/// Store probe used by the allocator.
///
/// Implemented by the report repository in production and by in-memory
/// fakes in tests.
#[async_trait]
pub trait RegistrationStore: Send + Sync {
    /// Number of reports already carrying this registration number (0 or 1).
    async fn count_by_registration_number(&self, registration_number: &str) -> AppResult<u64>;
}

#[async_trait]
impl RegistrationStore for ReportRepository {
    async fn count_by_registration_number(&self, registration_number: &str) -> AppResult<u64> {
        Self::count_by_registration_number(self, registration_number).await
    }
}

/// Allocates registration numbers for newly submitted reports.
///
/// The allocator performs no writes; it only probes for free numbers.
#[derive(Clone)]
pub struct RegistrationAllocator {
    store: Arc<dyn RegistrationStore>,
    lock: Arc<Mutex<()>>,
}

impl RegistrationAllocator {
    /// Create a new allocator over the given store.
    #[must_use]
    pub fn new(store: Arc<dyn RegistrationStore>) -> Self {
        Self {
            store,
            lock: Arc::new(Mutex::new(())),
        }
    }

    /// Find the lowest free sequence number in the period.
    ///
    /// Fails with [`AppError::AllocationExhausted`] once all 999 slots of
    /// the period are taken. The lock is held for the entire search, not
    /// just the winning probe.
    pub async fn allocate(&self, period: &RegistrationPeriod) -> AppResult<String> {
        let _guard = self.lock.lock().await;

        for seq in 1..=MAX_SEQUENCE {
            let candidate = period.registration_number(seq);
            if self
                .store
                .count_by_registration_number(&candidate)
                .await?
                == 0
            {
                return Ok(candidate);
            }
        }

        Err(AppError::AllocationExhausted(period.label()))
    }
}

#[cfg(test)]
#[allow(clippy::unwrap_used)]
mod tests {
    use super::*;
    use std::collections::HashSet;
    use std::sync::Mutex as StdMutex;

    /// In-memory stand-in for the report store.
    ///
    /// `commit` mimics the database insert: it succeeds only if the number
    /// was still free, so tests can drive the same allocate-commit-retry
    /// loop the submission service runs.
    #[derive(Default)]
    struct FakeStore {
        taken: StdMutex<HashSet<String>>,
    }

    impl FakeStore {
        fn with_taken(numbers: &[&str]) -> Arc<Self> {
            let store = Self::default();
            {
                let mut taken = store.taken.lock().unwrap();
                for n in numbers {
                    taken.insert((*n).to_string());
                }
            }
            Arc::new(store)
        }

        fn commit(&self, registration_number: &str) -> bool {
            self.taken
                .lock()
                .unwrap()
                .insert(registration_number.to_string())
        }

        fn taken(&self) -> HashSet<String> {
            self.taken.lock().unwrap().clone()
        }
    }

    #[async_trait]
    impl RegistrationStore for FakeStore {
        async fn count_by_registration_number(
            &self,
            registration_number: &str,
        ) -> AppResult<u64> {
            Ok(u64::from(
                self.taken.lock().unwrap().contains(registration_number),
            ))
        }
    }

    fn march_2025() -> RegistrationPeriod {
        RegistrationPeriod::new(3, 2025).unwrap()
    }

    #[tokio::test]
    async fn test_empty_period_starts_at_001() {
        let store = FakeStore::with_taken(&[]);
        let allocator = RegistrationAllocator::new(store);

        let number = allocator.allocate(&march_2025()).await.unwrap();

        assert_eq!(number, "001-DPMDPPA-III-2025");
    }

    #[tokio::test]
    async fn test_sequential_allocations_are_dense() {
        let store = FakeStore::with_taken(&[]);
        let allocator = RegistrationAllocator::new(Arc::clone(&store) as Arc<dyn RegistrationStore>);
        let period = march_2025();

        let mut numbers = Vec::new();
        for _ in 0..3 {
            let number = allocator.allocate(&period).await.unwrap();
            assert!(store.commit(&number));
            numbers.push(number);
        }

        assert_eq!(
            numbers,
            vec![
                "001-DPMDPPA-III-2025",
                "002-DPMDPPA-III-2025",
                "003-DPMDPPA-III-2025",
            ]
        );
    }

    #[tokio::test]
    async fn test_returns_smallest_free_sequence() {
        let store = FakeStore::with_taken(&["001-DPMDPPA-III-2025", "003-DPMDPPA-III-2025"]);
        let allocator = RegistrationAllocator::new(store);

        let number = allocator.allocate(&march_2025()).await.unwrap();

        assert_eq!(number, "002-DPMDPPA-III-2025");
    }

    #[tokio::test]
    async fn test_periods_do_not_interfere() {
        let store = FakeStore::with_taken(&["001-DPMDPPA-III-2025"]);
        let allocator = RegistrationAllocator::new(store);

        let april = RegistrationPeriod::new(4, 2025).unwrap();
        let number = allocator.allocate(&april).await.unwrap();

        assert_eq!(number, "001-DPMDPPA-IV-2025");
    }

    #[tokio::test]
    async fn test_exhausted_period_fails_without_writes() {
        let period = march_2025();
        let all: Vec<String> = (1..=MAX_SEQUENCE)
            .map(|seq| period.registration_number(seq))
            .collect();
        let refs: Vec<&str> = all.iter().map(String::as_str).collect();
        let store = FakeStore::with_taken(&refs);
        let allocator = RegistrationAllocator::new(Arc::clone(&store) as Arc<dyn RegistrationStore>);

        let result = allocator.allocate(&period).await;

        match result {
            Err(AppError::AllocationExhausted(label)) => assert_eq!(label, "III-2025"),
            other => panic!("expected AllocationExhausted, got {other:?}"),
        }
        // The store saw probes only, never a new number.
        assert_eq!(store.taken().len(), usize::from(MAX_SEQUENCE));
    }

    #[tokio::test]
    async fn test_lost_commit_race_reallocates_next_free() {
        let store = FakeStore::with_taken(&[]);
        let allocator = RegistrationAllocator::new(Arc::clone(&store) as Arc<dyn RegistrationStore>);
        let period = march_2025();

        let first = allocator.allocate(&period).await.unwrap();
        assert_eq!(first, "001-DPMDPPA-III-2025");

        // A rival submission wins the insert before we commit.
        assert!(store.commit("001-DPMDPPA-III-2025"));
        assert!(!store.commit(&first));

        let second = allocator.allocate(&period).await.unwrap();
        assert_eq!(second, "002-DPMDPPA-III-2025");
        assert!(store.commit(&second));
    }

    #[tokio::test(flavor = "multi_thread", worker_threads = 4)]
    async fn test_concurrent_allocations_stay_unique() {
        let store = FakeStore::with_taken(&[]);
        let allocator = RegistrationAllocator::new(Arc::clone(&store) as Arc<dyn RegistrationStore>);
        let period = march_2025();

        let mut handles = Vec::new();
        for _ in 0..25 {
            let allocator = allocator.clone();
            let store = Arc::clone(&store);
            handles.push(tokio::spawn(async move {
                loop {
                    let number = allocator.allocate(&period).await.unwrap();
                    // Losing the commit race means another task claimed the
                    // number first; allocate again like the service does.
                    if store.commit(&number) {
                        return number;
                    }
                }
            }));
        }

        let mut numbers = HashSet::new();
        for handle in futures::future::join_all(handles).await {
            assert!(numbers.insert(handle.unwrap()));
        }

        assert_eq!(numbers.len(), 25);
        let expected: HashSet<String> = (1..=25).map(|seq| period.registration_number(seq)).collect();
        assert_eq!(numbers, expected);
    }
}
