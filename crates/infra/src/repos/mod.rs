mod event;
mod exception;

pub use event::IEventRepo;
use event::InMemoryEventRepo;
pub use exception::IExceptionRepo;
use exception::InMemoryExceptionRepo;
use std::sync::Arc;

#[derive(Clone)]
pub struct Repos {
    pub events: Arc<dyn IEventRepo>,
    pub exceptions: Arc<dyn IExceptionRepo>,
}

impl Repos {
    pub fn create_inmemory() -> Self {
        Self {
            events: Arc::new(InMemoryEventRepo::new()),
            exceptions: Arc::new(InMemoryExceptionRepo::new()),
        }
    }
}
