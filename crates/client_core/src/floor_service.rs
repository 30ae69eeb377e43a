use std::sync::{
    atomic::{AtomicU64, Ordering},
    Arc,
};

use shared::{
    domain::{Floor, RoomId, Seat, SeatId},
    protocol::{NewSeatRequest, SeatPatch, SeatUpdate},
};
use tokio::sync::{broadcast, watch};
use tokio_stream::wrappers::WatchStream;
use tracing::{debug, error, info};

use crate::{
    error::{SeatAction, SeatingError},
    floor_snapshot::FloorSnapshot,
    transport::SeatingApi,
};

pub type SelectedFloor = Option<Arc<FloorSnapshot>>;

/// Holds the floor list, the selected floor and per-seat notifications.
///
/// Consumers only get receivers; every publish goes through this type and
/// replaces the held value rather than editing it.
pub struct FloorService {
    api: Arc<dyn SeatingApi>,
    floors: watch::Sender<Arc<Vec<Floor>>>,
    selected_floor: watch::Sender<SelectedFloor>,
    seat_updates: broadcast::Sender<SeatUpdate>,
    load_generation: AtomicU64,
}

impl FloorService {
    pub fn new(api: Arc<dyn SeatingApi>) -> Arc<Self> {
        let (floors, _) = watch::channel(Arc::new(Vec::new()));
        let (selected_floor, _) = watch::channel(None);
        let (seat_updates, _) = broadcast::channel(256);
        Arc::new(Self {
            api,
            floors,
            selected_floor,
            seat_updates,
            load_generation: AtomicU64::new(0),
        })
    }

    /// Builds the service and loads the floor list. A failed load leaves
    /// the list empty.
    pub async fn start(api: Arc<dyn SeatingApi>) -> Arc<Self> {
        let service = Self::new(api);
        let _ = service.list_floors().await;
        service
    }

    pub fn floors(&self) -> Arc<Vec<Floor>> {
        self.floors.borrow().clone()
    }

    pub fn watch_floors(&self) -> watch::Receiver<Arc<Vec<Floor>>> {
        self.floors.subscribe()
    }

    pub fn selected_floor(&self) -> SelectedFloor {
        self.selected_floor.borrow().clone()
    }

    pub fn watch_selected_floor(&self) -> watch::Receiver<SelectedFloor> {
        self.selected_floor.subscribe()
    }

    pub fn selected_floor_stream(&self) -> WatchStream<SelectedFloor> {
        WatchStream::new(self.selected_floor.subscribe())
    }

    pub fn subscribe_seat_updates(&self) -> broadcast::Receiver<SeatUpdate> {
        self.seat_updates.subscribe()
    }

    /// Replaces the floor list; on failure the list is cleared and the
    /// generic error is returned.
    pub async fn list_floors(&self) -> Result<(), SeatingError> {
        match self.api.list_floors().await {
            Ok(floors) => {
                info!("floors: received {} floors", floors.len());
                self.floors.send_replace(Arc::new(floors));
                Ok(())
            }
            Err(err) => {
                error!("floors: error loading floors: {err}");
                self.floors.send_replace(Arc::new(Vec::new()));
                Err(SeatingError::Unavailable(err))
            }
        }
    }

    /// Fetches a floor and makes it the selected floor, or clears the
    /// selection on failure. A response that arrives after a newer
    /// `load_floor` call was issued is dropped.
    pub async fn load_floor(&self, floor_number: i64) -> Result<(), SeatingError> {
        let generation = self.load_generation.fetch_add(1, Ordering::SeqCst) + 1;

        let (next, outcome) = match self.api.floor(floor_number).await {
            Ok(floor) => {
                info!(
                    "floors: received floor {floor_number} with {} rooms",
                    floor.rooms.len()
                );
                (Some(Arc::new(FloorSnapshot::new(floor))), Ok(()))
            }
            Err(err) => {
                error!("floors: error loading floor {floor_number}: {err}");
                (None, Err(SeatingError::Unavailable(err)))
            }
        };

        let applied = self.selected_floor.send_if_modified(|current| {
            if self.load_generation.load(Ordering::SeqCst) != generation {
                return false;
            }
            *current = next;
            true
        });
        if !applied {
            debug!("floors: discarded stale response for floor {floor_number} (generation {generation})");
        }
        outcome
    }

    pub async fn get_seat_info(&self, seat_id: SeatId) -> Result<Seat, SeatingError> {
        self.api.seat(seat_id).await.map_err(|err| {
            error!("seats: error fetching seat info for {}: {err}", seat_id.0);
            SeatingError::Transport(err)
        })
    }

    /// Creates a seat, then appends the server's copy to its room in the
    /// selected floor.
    pub async fn add_seat(&self, request: NewSeatRequest) -> Result<Seat, SeatingError> {
        let seat = self.api.create_seat(&request).await.map_err(|err| {
            error!("seats: error adding new seat {}: {err}", request.seat_number);
            SeatingError::seat_mutation(SeatAction::Add, err)
        })?;

        let room_id = seat.room.map_or(request.room.id, |room| room.id);
        let patched = self.patch_selected(|snapshot| snapshot.with_seat_added(room_id, seat.clone()));
        debug!(
            "seats: created seat {} ({}) in room {}, local floor patched={patched}",
            seat.id.0, seat.seat_number, room_id.0
        );
        Ok(seat)
    }

    pub async fn delete_seat(&self, seat_id: SeatId) -> Result<(), SeatingError> {
        self.api.delete_seat(seat_id).await.map_err(|err| {
            error!("seats: error deleting seat with id {}: {err}", seat_id.0);
            SeatingError::seat_mutation(SeatAction::Delete, err)
        })?;

        let patched = self.patch_selected(|snapshot| snapshot.with_seat_removed(seat_id));
        debug!(
            "seats: deleted seat {}, local floor patched={patched}",
            seat_id.0
        );
        Ok(())
    }

    /// Merges `patch` into the seat on the selected floor and notifies seat
    /// subscribers. Returns `false`, leaving state untouched, if the seat is
    /// not on the selected floor.
    pub fn update_seat(&self, seat_id: SeatId, patch: SeatPatch) -> bool {
        let found = self.patch_selected(|snapshot| snapshot.with_seat_patched(seat_id, &patch));
        if found {
            let _ = self.seat_updates.send(SeatUpdate { seat_id, patch });
        }
        found
    }

    /// Local-only: sets `occupied` to whether the seat has no employees.
    pub fn toggle_seat_occupancy(&self, room_id: RoomId, seat_id: SeatId) -> bool {
        self.patch_selected(|snapshot| snapshot.with_occupancy_toggled(room_id, seat_id))
    }

    fn patch_selected<F>(&self, patch: F) -> bool
    where
        F: FnOnce(&FloorSnapshot) -> Option<FloorSnapshot>,
    {
        self.selected_floor.send_if_modified(|current| {
            let Some(next) = current.as_deref().and_then(patch) else {
                return false;
            };
            *current = Some(Arc::new(next));
            true
        })
    }
}

#[cfg(test)]
#[path = "tests/floor_service_tests.rs"]
mod tests;
