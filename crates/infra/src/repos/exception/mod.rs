mod inmemory;

pub use inmemory::InMemoryExceptionRepo;
use praxis_scheduler_domain::{RecurrenceException, ID};

/// The exception ledger: calendar days permanently excluded from a
/// series. Written by the delete-one-occurrence flow, read before every
/// series regeneration, cleared when the whole series goes away.
#[async_trait::async_trait]
pub trait IExceptionRepo: Send + Sync {
    async fn insert(&self, exception: &RecurrenceException) -> anyhow::Result<()>;
    async fn find_by_series(&self, series_id: ID) -> anyhow::Result<Vec<RecurrenceException>>;
    async fn delete_by_series(&self, series_id: ID) -> anyhow::Result<usize>;
}
