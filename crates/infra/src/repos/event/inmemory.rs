use super::IEventRepo;
use praxis_scheduler_domain::{CalendarEvent, Entity, EventId, ID};
use std::sync::Mutex;

pub struct InMemoryEventRepo {
    events: Mutex<Vec<CalendarEvent>>,
}

impl InMemoryEventRepo {
    pub fn new() -> Self {
        Self {
            events: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryEventRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IEventRepo for InMemoryEventRepo {
    async fn insert(&self, event: &CalendarEvent) -> anyhow::Result<CalendarEvent> {
        let mut stored = event.clone();
        if stored.id.is_pending() {
            stored.id = EventId::Persisted(ID::new());
        }
        self.events.lock().unwrap().push(stored.clone());
        Ok(stored)
    }

    async fn insert_many(&self, events: &[CalendarEvent]) -> anyhow::Result<Vec<CalendarEvent>> {
        let mut inserted = Vec::with_capacity(events.len());
        for event in events {
            inserted.push(self.insert(event).await?);
        }
        Ok(inserted)
    }

    async fn save(&self, event: &CalendarEvent) -> anyhow::Result<()> {
        let mut events = self.events.lock().unwrap();
        if let Some(pos) = events.iter().position(|e| e.id() == event.id()) {
            events[pos] = event.clone();
        }
        Ok(())
    }

    async fn find(&self, event_id: ID) -> Option<CalendarEvent> {
        self.events
            .lock()
            .unwrap()
            .iter()
            .find(|e| e.id.value() == event_id)
            .cloned()
    }

    async fn find_all(&self) -> anyhow::Result<Vec<CalendarEvent>> {
        Ok(self.events.lock().unwrap().clone())
    }

    async fn find_by_series(&self, series_id: ID) -> anyhow::Result<Vec<CalendarEvent>> {
        let events = self.events.lock().unwrap();
        Ok(events
            .iter()
            .filter(|e| e.series_id == Some(series_id))
            .cloned()
            .collect())
    }

    async fn delete(&self, event_id: ID) -> Option<CalendarEvent> {
        let mut events = self.events.lock().unwrap();
        let pos = events.iter().position(|e| e.id.value() == event_id)?;
        Some(events.remove(pos))
    }

    async fn delete_by_series(&self, series_id: ID) -> anyhow::Result<usize> {
        let mut events = self.events.lock().unwrap();
        let before = events.len();
        events.retain(|e| !e.is_regenerable(series_id));
        Ok(before - events.len())
    }
}
