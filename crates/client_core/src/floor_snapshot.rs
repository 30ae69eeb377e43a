use std::collections::HashMap;

use shared::{
    domain::{Floor, Room, RoomId, Seat, SeatId},
    protocol::SeatPatch,
};

use crate::seat_policy::{sort_rooms, toggled_occupancy};

/// Immutable view of one floor with its rooms sorted numerically, plus
/// id indices for rooms and seats. Every change yields a new snapshot.
///
/// Ids are not assumed unique: both indices map an id to every room
/// position where it occurs, and changes apply to all occurrences.
#[derive(Debug, Clone, PartialEq)]
pub struct FloorSnapshot {
    floor: Floor,
    room_positions: HashMap<RoomId, Vec<usize>>,
    seat_positions: HashMap<SeatId, Vec<usize>>,
}

impl FloorSnapshot {
    pub fn new(mut floor: Floor) -> Self {
        sort_rooms(&mut floor.rooms);
        Self::indexed(floor)
    }

    fn indexed(floor: Floor) -> Self {
        let mut room_positions: HashMap<RoomId, Vec<usize>> = HashMap::new();
        let mut seat_positions: HashMap<SeatId, Vec<usize>> = HashMap::new();
        for (position, room) in floor.rooms.iter().enumerate() {
            room_positions.entry(room.id).or_default().push(position);
            for seat in &room.seats {
                let positions = seat_positions.entry(seat.id).or_default();
                if positions.last() != Some(&position) {
                    positions.push(position);
                }
            }
        }
        Self {
            floor,
            room_positions,
            seat_positions,
        }
    }

    pub fn floor(&self) -> &Floor {
        &self.floor
    }

    pub fn floor_number(&self) -> i64 {
        self.floor.floor_number
    }

    pub fn rooms(&self) -> &[Room] {
        &self.floor.rooms
    }

    /// First room with `room_id` in display order.
    pub fn room(&self, room_id: RoomId) -> Option<&Room> {
        let position = *self.room_positions.get(&room_id)?.first()?;
        self.floor.rooms.get(position)
    }

    /// First room holding `seat_id` in display order.
    pub fn room_of_seat(&self, seat_id: SeatId) -> Option<RoomId> {
        let position = *self.seat_positions.get(&seat_id)?.first()?;
        self.floor.rooms.get(position).map(|room| room.id)
    }

    pub fn seat(&self, seat_id: SeatId) -> Option<&Seat> {
        let position = *self.seat_positions.get(&seat_id)?.first()?;
        self.floor.rooms.get(position)?.seat(seat_id)
    }

    pub fn seat_count(&self) -> usize {
        self.floor.rooms.iter().map(|room| room.seats.len()).sum()
    }

    /// Appends `seat` to every room with `room_id`. Returns `None` when the
    /// room is not on this floor. A seat id already present elsewhere is
    /// moved, not duplicated.
    pub fn with_seat_added(&self, room_id: RoomId, seat: Seat) -> Option<Self> {
        let targets = self.room_positions.get(&room_id)?;
        let mut floor = self.floor.clone();
        strip_seat(&mut floor, self.seat_positions.get(&seat.id), seat.id);
        for position in targets {
            floor.rooms[*position].seats.push(seat.clone());
        }
        Some(Self::indexed(floor))
    }

    /// Removes every seat with `seat_id`, whichever rooms hold it.
    pub fn with_seat_removed(&self, seat_id: SeatId) -> Option<Self> {
        let positions = self.seat_positions.get(&seat_id)?;
        let mut floor = self.floor.clone();
        strip_seat(&mut floor, Some(positions), seat_id);
        Some(Self::indexed(floor))
    }

    /// Merges `patch` into every seat with `seat_id`.
    pub fn with_seat_patched(&self, seat_id: SeatId, patch: &SeatPatch) -> Option<Self> {
        let positions = self.seat_positions.get(&seat_id)?;
        self.with_seats_mut(positions, seat_id, |seat| patch.apply_to(seat))
    }

    /// Local occupancy toggle of `seat_id` within rooms `room_id`. Returns
    /// `None` unless the seat sits in such a room.
    pub fn with_occupancy_toggled(&self, room_id: RoomId, seat_id: SeatId) -> Option<Self> {
        let rooms = self.room_positions.get(&room_id)?;
        let positions: Vec<usize> = self
            .seat_positions
            .get(&seat_id)?
            .iter()
            .copied()
            .filter(|position| rooms.contains(position))
            .collect();
        if positions.is_empty() {
            return None;
        }
        self.with_seats_mut(&positions, seat_id, |seat| {
            seat.occupied = toggled_occupancy(seat)
        })
    }

    fn with_seats_mut(
        &self,
        positions: &[usize],
        seat_id: SeatId,
        mut update: impl FnMut(&mut Seat),
    ) -> Option<Self> {
        let mut next = self.clone();
        let mut found = false;
        for position in positions {
            for seat in next.floor.rooms[*position]
                .seats
                .iter_mut()
                .filter(|seat| seat.id == seat_id)
            {
                update(seat);
                found = true;
            }
        }
        found.then_some(next)
    }
}

fn strip_seat(floor: &mut Floor, positions: Option<&Vec<usize>>, seat_id: SeatId) {
    for position in positions.into_iter().flatten() {
        floor.rooms[*position]
            .seats
            .retain(|seat| seat.id != seat_id);
    }
}

#[cfg(test)]
#[path = "tests/floor_snapshot_tests.rs"]
mod tests;
