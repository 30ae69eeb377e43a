use serde::{Deserialize, Serialize};

use crate::domain::{Employee, RoomRef, Seat, SeatId};

/// Body of `POST /seats`. The server assigns the id and timestamps.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct NewSeatRequest {
    pub room: RoomRef,
    pub seat_number: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DashboardStats {
    pub total_employees: u64,
    pub total_floors: u64,
    pub total_offices: u64,
    pub total_seats: u64,
    #[serde(default)]
    pub occupied_seats: u64,
    #[serde(default)]
    pub occupancy_rate: f64,
}

impl DashboardStats {
    /// Static placeholder served when the stats endpoint stays unreachable.
    pub fn fallback() -> Self {
        Self {
            total_employees: 150,
            total_floors: 4,
            total_offices: 40,
            total_seats: 200,
            occupied_seats: 150,
            occupancy_rate: 75.0,
        }
    }
}

/// Subset of seat fields to merge into a locally held seat.
#[derive(Debug, Clone, Default, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SeatPatch {
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub seat_number: Option<String>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub occupied: Option<bool>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub employees: Option<Vec<Employee>>,
}

impl SeatPatch {
    pub fn is_empty(&self) -> bool {
        self.seat_number.is_none() && self.occupied.is_none() && self.employees.is_none()
    }

    pub fn apply_to(&self, seat: &mut Seat) {
        if let Some(seat_number) = &self.seat_number {
            seat.seat_number = seat_number.clone();
        }
        if let Some(occupied) = self.occupied {
            seat.occupied = occupied;
        }
        if let Some(employees) = &self.employees {
            seat.employees = employees.clone();
        }
    }
}

/// Point notification for observers that track a single seat.
#[derive(Debug, Clone, PartialEq)]
pub struct SeatUpdate {
    pub seat_id: SeatId,
    pub patch: SeatPatch,
}
