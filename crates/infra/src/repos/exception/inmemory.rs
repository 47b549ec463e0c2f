use super::IExceptionRepo;
use praxis_scheduler_domain::{RecurrenceException, ID};
use std::sync::Mutex;

pub struct InMemoryExceptionRepo {
    exceptions: Mutex<Vec<RecurrenceException>>,
}

impl InMemoryExceptionRepo {
    pub fn new() -> Self {
        Self {
            exceptions: Mutex::new(Vec::new()),
        }
    }
}

impl Default for InMemoryExceptionRepo {
    fn default() -> Self {
        Self::new()
    }
}

#[async_trait::async_trait]
impl IExceptionRepo for InMemoryExceptionRepo {
    async fn insert(&self, exception: &RecurrenceException) -> anyhow::Result<()> {
        let mut exceptions = self.exceptions.lock().unwrap();
        // recording the same day twice is a no-op
        if !exceptions.contains(exception) {
            exceptions.push(exception.clone());
        }
        Ok(())
    }

    async fn find_by_series(&self, series_id: ID) -> anyhow::Result<Vec<RecurrenceException>> {
        let exceptions = self.exceptions.lock().unwrap();
        Ok(exceptions
            .iter()
            .filter(|e| e.series_id == series_id)
            .cloned()
            .collect())
    }

    async fn delete_by_series(&self, series_id: ID) -> anyhow::Result<usize> {
        let mut exceptions = self.exceptions.lock().unwrap();
        let before = exceptions.len();
        exceptions.retain(|e| e.series_id != series_id);
        Ok(before - exceptions.len())
    }
}
