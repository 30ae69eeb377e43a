//! Seat numbering and occupancy rules.
//!
//! Seat numbers have the form `<roomNumber>-<NN>`, with `NN` the seat's
//! index inside its room, zero-padded to two digits.

use std::cmp::Ordering;

use shared::domain::{Room, Seat};

/// Parses the leading integer of `raw`, ignoring leading whitespace and any
/// trailing non-digit text (`"12b"` is 12, `"b12"` is `None`).
pub fn parse_leading_int(raw: &str) -> Option<i64> {
    let trimmed = raw.trim_start();
    let (sign, digits) = match trimmed.strip_prefix('-') {
        Some(rest) => (-1, rest),
        None => (1, trimmed.strip_prefix('+').unwrap_or(trimmed)),
    };
    let end = digits
        .find(|c: char| !c.is_ascii_digit())
        .unwrap_or(digits.len());
    if end == 0 {
        return None;
    }
    digits[..end].parse::<i64>().ok().map(|value| sign * value)
}

/// Index part of a seat number, or 0 when the number is not `<room>-<index>`.
pub fn seat_index(seat_number: &str) -> u32 {
    let mut parts = seat_number.split('-');
    let (Some(_), Some(index), None) = (parts.next(), parts.next(), parts.next()) else {
        return 0;
    };
    parse_leading_int(index)
        .and_then(|value| u32::try_from(value).ok())
        .unwrap_or(0)
}

/// Next free seat number for `room`: the lowest unused positive index,
/// or one past the highest when there is no gap.
pub fn generate_seat_number(room: &Room) -> String {
    let mut indices: Vec<u32> = room
        .seats
        .iter()
        .map(|seat| seat_index(&seat.seat_number))
        .filter(|index| *index > 0)
        .collect();
    indices.sort_unstable();

    let mut next = 1;
    for index in indices {
        if index == next {
            next += 1;
        } else if index > next {
            break;
        }
    }

    format!("{}-{next:02}", room.room_number)
}

pub fn is_occupied(seat: &Seat) -> bool {
    !seat.employees.is_empty()
}

/// Value the local occupancy toggle writes into `seat.occupied`.
pub fn toggled_occupancy(seat: &Seat) -> bool {
    !is_occupied(seat)
}

pub fn is_room_empty(room: &Room) -> bool {
    !room.seats.iter().any(is_occupied)
}

pub fn is_seat_limit_reached(room: &Room, limit: usize) -> bool {
    room.seats.len() >= limit
}

/// Sort key of a room number; `None` for room numbers without a leading
/// integer.
pub fn room_number_key(room_number: &str) -> Option<i64> {
    parse_leading_int(room_number)
}

/// Numeric ordering for room numbers. Non-numeric room numbers sort after
/// numeric ones and compare equal to each other.
pub fn compare_room_numbers(a: &str, b: &str) -> Ordering {
    match (room_number_key(a), room_number_key(b)) {
        (Some(a), Some(b)) => a.cmp(&b),
        (Some(_), None) => Ordering::Less,
        (None, Some(_)) => Ordering::Greater,
        (None, None) => Ordering::Equal,
    }
}

/// Stable numeric sort of a floor's rooms.
pub fn sort_rooms(rooms: &mut [Room]) {
    rooms.sort_by(|a, b| compare_room_numbers(&a.room_number, &b.room_number));
}

#[cfg(test)]
#[path = "tests/seat_policy_tests.rs"]
mod tests;
