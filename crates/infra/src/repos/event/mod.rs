mod inmemory;

pub use inmemory::InMemoryEventRepo;
use praxis_scheduler_domain::{CalendarEvent, ID};

#[async_trait::async_trait]
pub trait IEventRepo: Send + Sync {
    /// Stores the event. A `Pending` id is replaced with a store-assigned
    /// `Persisted` one; the returned row is what was actually stored.
    async fn insert(&self, event: &CalendarEvent) -> anyhow::Result<CalendarEvent>;
    async fn insert_many(&self, events: &[CalendarEvent]) -> anyhow::Result<Vec<CalendarEvent>>;
    async fn save(&self, event: &CalendarEvent) -> anyhow::Result<()>;
    async fn find(&self, event_id: ID) -> Option<CalendarEvent>;
    async fn find_all(&self) -> anyhow::Result<Vec<CalendarEvent>>;
    async fn find_by_series(&self, series_id: ID) -> anyhow::Result<Vec<CalendarEvent>>;
    async fn delete(&self, event_id: ID) -> Option<CalendarEvent>;
    /// Deletes the regenerable rows of a series. Override rows survive,
    /// they belong to the user now.
    async fn delete_by_series(&self, series_id: ID) -> anyhow::Result<usize>;
}
