pub mod config;
pub mod logic;
pub mod model;
pub mod seed;
pub mod session;
pub mod store;

use std::sync::Arc;

// Export logic types
pub use logic::{
    filter_rows, parse_filter_expr, AttendanceStatus, DashboardSummary, FilterExpr, Gateway,
    NameLookup, Resolver, RosterEntry, ValidationError, ValidationErrorType, ValidationErrors,
};

// Export all model types
pub use model::*;

// Export seed module
pub use seed::{load_seed_data, load_seed_data_at};

pub use session::{guard, Credentials, Route, RouteDecision, SessionGate};

// Export store types
pub use store::{CollectionStore, MemoryStore, Store, StoreSnapshot};

/// Everything the dashboard needs, wired together
#[derive(Debug)]
pub struct AppContext {
    pub store: Arc<MemoryStore>,
    pub gateway: Gateway<MemoryStore>,
    pub session: SessionGate,
}

impl AppContext {
    pub fn bootstrap(config: &config::AppConfig) -> anyhow::Result<Self> {
        let store = Arc::new(MemoryStore::new());

        if config.seed.load_on_start {
            load_seed_data(&*store);
        } else {
            log::info!("seed data disabled, starting with empty collections");
        }

        Ok(Self {
            gateway: Gateway::new(Arc::clone(&store)),
            session: SessionGate::new(config.session.credentials()),
            store,
        })
    }

    pub fn summary(&self, today: chrono::NaiveDate) -> DashboardSummary {
        DashboardSummary::compute(&self.store.snapshot(), today)
    }
}
