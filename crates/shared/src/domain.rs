use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};

macro_rules! id_newtype {
    ($name:ident) => {
        #[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
        pub struct $name(pub i64);
    };
}

id_newtype!(FloorId);
id_newtype!(RoomId);
id_newtype!(SeatId);
id_newtype!(EmployeeId);

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Floor {
    pub id: FloorId,
    pub floor_number: i64,
    pub name: String,
    #[serde(default)]
    pub rooms: Vec<Room>,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Room {
    pub id: RoomId,
    pub room_number: String,
    pub name: String,
    #[serde(default)]
    pub seats: Vec<Seat>,
}

/// Foreign-key reference from a seat to the room that owns it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoomRef {
    pub id: RoomId,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Seat {
    pub id: SeatId,
    pub seat_number: String,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub room: Option<RoomRef>,
    #[serde(default)]
    pub occupied: bool,
    #[serde(default)]
    pub employees: Vec<Employee>,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub created_at: Option<DateTime<Utc>>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Employee {
    pub id: EmployeeId,
    pub full_name: String,
    #[serde(default)]
    pub occupation: String,
}

impl Floor {
    pub fn room(&self, room_id: RoomId) -> Option<&Room> {
        self.rooms.iter().find(|room| room.id == room_id)
    }
}

impl Room {
    pub fn seat(&self, seat_id: SeatId) -> Option<&Seat> {
        self.seats.iter().find(|seat| seat.id == seat_id)
    }
}
