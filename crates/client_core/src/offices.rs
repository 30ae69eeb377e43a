use std::sync::Arc;

use anyhow::{anyhow, Result};
use async_trait::async_trait;
use shared::{
    domain::{EmployeeId, RoomId, RoomRef, Seat, SeatId},
    protocol::NewSeatRequest,
};
use tracing::{info, warn};

use crate::{
    error::SeatingError,
    floor_service::FloorService,
    seat_policy::{
        generate_seat_number, is_occupied, is_room_empty, is_seat_limit_reached, seat_index,
    },
    stats_cache::DashboardStatsCache,
};

/// Employee-side operations owned by another service.
#[async_trait]
pub trait EmployeeDirectory: Send + Sync {
    async fn unassign_seat(&self, employee_id: EmployeeId, seat_id: SeatId) -> Result<()>;
}

pub struct MissingEmployeeDirectory;

#[async_trait]
impl EmployeeDirectory for MissingEmployeeDirectory {
    async fn unassign_seat(&self, employee_id: EmployeeId, seat_id: SeatId) -> Result<()> {
        Err(anyhow!(
            "employee directory is unavailable; cannot unassign employee {} from seat {}",
            employee_id.0,
            seat_id.0
        ))
    }
}

/// Printable content for a room's door label.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RoomLabel {
    pub title: String,
    pub floor_name: String,
    pub lines: Vec<String>,
    pub file_name: String,
}

/// Seat administration as driven from the offices view: each mutation that
/// changes head or seat counts also invalidates the dashboard stats.
pub struct OfficeDesk {
    floors: Arc<FloorService>,
    stats: Arc<DashboardStatsCache>,
    employees: Arc<dyn EmployeeDirectory>,
    max_seats_per_room: usize,
}

impl OfficeDesk {
    pub fn new(
        floors: Arc<FloorService>,
        stats: Arc<DashboardStatsCache>,
        max_seats_per_room: usize,
    ) -> Self {
        Self {
            floors,
            stats,
            employees: Arc::new(MissingEmployeeDirectory),
            max_seats_per_room,
        }
    }

    pub fn with_employee_directory(mut self, employees: Arc<dyn EmployeeDirectory>) -> Self {
        self.employees = employees;
        self
    }

    pub fn max_seats_per_room(&self) -> usize {
        self.max_seats_per_room
    }

    /// Loads the first listed floor when nothing is selected yet and
    /// returns its number.
    pub async fn select_initial_floor(&self) -> Result<Option<i64>, SeatingError> {
        if self.floors.selected_floor().is_some() {
            return Ok(None);
        }
        let Some(floor_number) = self.floors.floors().first().map(|floor| floor.floor_number)
        else {
            return Ok(None);
        };
        self.floors.load_floor(floor_number).await?;
        Ok(Some(floor_number))
    }

    pub async fn add_seat_to_room(&self, room_id: RoomId) -> Result<Seat, SeatingError> {
        let selected = self
            .floors
            .selected_floor()
            .ok_or(SeatingError::NoFloorSelected)?;
        let room = selected
            .room(room_id)
            .ok_or(SeatingError::RoomNotLoaded { room_id })?;

        if is_seat_limit_reached(room, self.max_seats_per_room) {
            return Err(SeatingError::SeatLimitReached {
                room_id,
                limit: self.max_seats_per_room,
            });
        }

        let request = NewSeatRequest {
            room: RoomRef { id: room_id },
            seat_number: generate_seat_number(room),
        };
        let seat = self.floors.add_seat(request).await?;
        self.stats.reset_stats();
        info!("offices: seat {} added to room {}", seat.seat_number, room_id.0);
        Ok(seat)
    }

    pub async fn delete_seat(&self, seat_id: SeatId) -> Result<(), SeatingError> {
        self.floors.delete_seat(seat_id).await?;
        self.stats.reset_stats();
        info!("offices: seat {} deleted", seat_id.0);
        Ok(())
    }

    /// Unassigns through the employee directory, then reloads the selected
    /// floor from the server.
    pub async fn unassign_seat(
        &self,
        employee_id: EmployeeId,
        seat_id: SeatId,
    ) -> Result<(), SeatingError> {
        self.employees
            .unassign_seat(employee_id, seat_id)
            .await
            .map_err(|source| {
                warn!(
                    "offices: error unassigning employee {} from seat {}: {source}",
                    employee_id.0, seat_id.0
                );
                SeatingError::Unassign {
                    employee_id,
                    seat_id,
                    source,
                }
            })?;

        if let Some(selected) = self.floors.selected_floor() {
            if let Err(err) = self.floors.load_floor(selected.floor_number()).await {
                warn!("offices: floor reload after unassign failed: {err}");
            }
        }
        self.stats.reset_stats();
        info!(
            "offices: employee {} unassigned from seat {}",
            employee_id.0, seat_id.0
        );
        Ok(())
    }

    pub fn is_room_empty(&self, room_id: RoomId) -> Option<bool> {
        let selected = self.floors.selected_floor()?;
        selected.room(room_id).map(is_room_empty)
    }

    pub fn is_seat_limit_reached(&self, room_id: RoomId) -> Option<bool> {
        let selected = self.floors.selected_floor()?;
        selected
            .room(room_id)
            .map(|room| is_seat_limit_reached(room, self.max_seats_per_room))
    }

    pub fn room_label(&self, room_id: RoomId) -> Option<RoomLabel> {
        let selected = self.floors.selected_floor()?;
        let room = selected.room(room_id)?;

        let mut occupied: Vec<&Seat> = room
            .seats
            .iter()
            .filter(|seat| is_occupied(seat))
            .collect();
        occupied.sort_by(|a, b| {
            seat_index(&a.seat_number)
                .cmp(&seat_index(&b.seat_number))
                .then_with(|| a.seat_number.cmp(&b.seat_number))
        });

        let lines = occupied
            .into_iter()
            .flat_map(|seat| {
                seat.employees.iter().map(move |employee| {
                    format!(
                        "{}: {} - {}",
                        seat.seat_number, employee.full_name, employee.occupation
                    )
                })
            })
            .collect();

        Some(RoomLabel {
            title: format!("{} (Room {})", room.name, room.room_number),
            floor_name: selected.floor().name.clone(),
            lines,
            file_name: format!("room-{}-label.pdf", room.room_number),
        })
    }
}

#[cfg(test)]
#[path = "tests/offices_tests.rs"]
mod tests;
