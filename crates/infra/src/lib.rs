mod config;
mod repos;
mod system;

pub use config::Config;
pub use repos::{IEventRepo, IExceptionRepo, Repos};
use std::sync::Arc;
pub use system::ISys;
use system::RealSys;

#[derive(Clone)]
pub struct PraxisContext {
    pub repos: Repos,
    pub config: Config,
    pub sys: Arc<dyn ISys>,
}

impl PraxisContext {
    fn create_inmemory() -> Self {
        Self {
            repos: Repos::create_inmemory(),
            config: Config::new(),
            sys: Arc::new(RealSys {}),
        }
    }
}

/// Will setup the infrastructure context given the environment. Durable
/// persistence lives in the external event store; this process keeps the
/// working snapshot in memory.
pub fn setup_context() -> PraxisContext {
    PraxisContext::create_inmemory()
}
