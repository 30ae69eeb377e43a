use std::sync::Arc;

use anyhow::Result;
use tracing::info;

pub mod config;
pub mod error;
mod floor_service;
mod floor_snapshot;
mod offices;
pub mod seat_policy;
mod stats_cache;
pub mod transport;

pub use config::{load_settings, ClientSettings};
pub use error::{SeatAction, SeatingError, TransportError};
pub use floor_service::{FloorService, SelectedFloor};
pub use floor_snapshot::FloorSnapshot;
pub use offices::{EmployeeDirectory, MissingEmployeeDirectory, OfficeDesk, RoomLabel};
pub use stats_cache::DashboardStatsCache;
pub use transport::{HttpSeatingApi, SeatingApi};

/// Session-scoped wiring of the floor state, stats cache and office
/// workflows over one API backend.
pub struct SeatingClient {
    pub floors: Arc<FloorService>,
    pub stats: Arc<DashboardStatsCache>,
    pub desk: OfficeDesk,
}

impl SeatingClient {
    /// Connects over HTTP using `settings` and loads the floor list.
    pub async fn connect(settings: &ClientSettings) -> Result<Self> {
        let api: Arc<dyn SeatingApi> = Arc::new(HttpSeatingApi::from_settings(settings)?);
        info!("client: using seating api at {}", settings.api_base()?);
        Ok(Self::start(api, settings.max_seats_per_room).await)
    }

    pub async fn start(api: Arc<dyn SeatingApi>, max_seats_per_room: usize) -> Self {
        let floors = FloorService::start(Arc::clone(&api)).await;
        let stats = DashboardStatsCache::new(api);
        let desk = OfficeDesk::new(Arc::clone(&floors), Arc::clone(&stats), max_seats_per_room);
        Self {
            floors,
            stats,
            desk,
        }
    }

    pub fn with_employee_directory(mut self, employees: Arc<dyn EmployeeDirectory>) -> Self {
        self.desk = self.desk.with_employee_directory(employees);
        self
    }
}

#[cfg(test)]
#[path = "tests/fixtures.rs"]
mod fixtures;

#[cfg(test)]
#[path = "tests/lib_tests.rs"]
mod tests;
