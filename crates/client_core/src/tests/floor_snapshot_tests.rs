use super::*;

use crate::fixtures::{employee, floor, room, sample_floor, seat};

#[test]
fn rooms_are_sorted_numerically_on_construction() {
    let snapshot = FloorSnapshot::new(sample_floor());
    let order: Vec<&str> = snapshot
        .rooms()
        .iter()
        .map(|room| room.room_number.as_str())
        .collect();
    assert_eq!(order, ["1", "2", "10"]);
    assert_eq!(snapshot.room(RoomId(10)).map(|r| r.name.as_str()), Some("Office 10"));
    assert_eq!(snapshot.room_of_seat(SeatId(22)), Some(RoomId(2)));
    assert_eq!(snapshot.seat_count(), 4);
}

#[test]
fn added_seat_lands_once_in_its_room_only() {
    let snapshot = FloorSnapshot::new(sample_floor());
    let next = snapshot
        .with_seat_added(RoomId(1), seat(500, 1, "1-01"))
        .expect("room on floor");

    assert_eq!(next.room(RoomId(1)).expect("room").seats.len(), 1);
    assert_eq!(next.room(RoomId(2)), snapshot.room(RoomId(2)));
    assert_eq!(next.room(RoomId(10)), snapshot.room(RoomId(10)));
    assert_eq!(next.room_of_seat(SeatId(500)), Some(RoomId(1)));

    let again = next
        .with_seat_added(RoomId(1), seat(500, 1, "1-01"))
        .expect("room on floor");
    let occurrences = again
        .rooms()
        .iter()
        .flat_map(|room| room.seats.iter())
        .filter(|s| s.id == SeatId(500))
        .count();
    assert_eq!(occurrences, 1);
}

#[test]
fn adding_to_unknown_room_yields_nothing() {
    let snapshot = FloorSnapshot::new(sample_floor());
    assert!(snapshot
        .with_seat_added(RoomId(99), seat(500, 99, "99-01"))
        .is_none());
}

#[test]
fn removed_seat_disappears_from_every_room() {
    let snapshot = FloorSnapshot::new(sample_floor());
    let next = snapshot.with_seat_removed(SeatId(102)).expect("seat present");
    assert!(next.seat(SeatId(102)).is_none());
    assert!(next
        .rooms()
        .iter()
        .all(|room| room.seats.iter().all(|s| s.id != SeatId(102))));
    assert!(snapshot.seat(SeatId(102)).is_some());
    assert!(next.with_seat_removed(SeatId(102)).is_none());
}

#[test]
fn patch_merges_fields_into_a_new_snapshot() {
    let snapshot = FloorSnapshot::new(sample_floor());
    let patch = SeatPatch {
        employees: Some(vec![employee(9, "Alan Turing", "Mathematician")]),
        ..SeatPatch::default()
    };
    let next = snapshot
        .with_seat_patched(SeatId(22), &patch)
        .expect("seat present");
    assert_eq!(next.seat(SeatId(22)).expect("seat").employees.len(), 1);
    assert!(snapshot.seat(SeatId(22)).expect("seat").employees.is_empty());
    assert!(snapshot.with_seat_patched(SeatId(404), &patch).is_none());
}

#[test]
fn toggle_requires_matching_room() {
    let snapshot = FloorSnapshot::new(sample_floor());
    assert!(snapshot
        .with_occupancy_toggled(RoomId(10), SeatId(21))
        .is_none());

    let next = snapshot
        .with_occupancy_toggled(RoomId(2), SeatId(21))
        .expect("seat in room");
    assert!(!next.seat(SeatId(21)).expect("seat").occupied);

    let next = next
        .with_occupancy_toggled(RoomId(2), SeatId(22))
        .expect("seat in room");
    assert!(next.seat(SeatId(22)).expect("seat").occupied);
}

fn floor_with_shared_seat_id() -> FloorSnapshot {
    FloorSnapshot::new(floor(
        4,
        vec![
            room(1, "401", vec![seat(7, 1, "401-01"), seat(8, 1, "401-02")]),
            room(2, "402", vec![seat(7, 2, "402-01")]),
        ],
    ))
}

#[test]
fn removing_a_seat_id_held_by_two_rooms_clears_both() {
    let snapshot = floor_with_shared_seat_id();
    let next = snapshot.with_seat_removed(SeatId(7)).expect("seat present");

    let left: Vec<usize> = next.rooms().iter().map(|room| room.seats.len()).collect();
    assert_eq!(left, [1, 0]);
    assert!(next
        .rooms()
        .iter()
        .all(|room| room.seats.iter().all(|s| s.id != SeatId(7))));
    assert!(next.seat(SeatId(7)).is_none());
    assert_eq!(next.seat_count(), 1);
}

#[test]
fn patch_reaches_every_copy_of_a_seat_id() {
    let snapshot = floor_with_shared_seat_id();
    let patch = SeatPatch {
        occupied: Some(true),
        ..SeatPatch::default()
    };
    let next = snapshot
        .with_seat_patched(SeatId(7), &patch)
        .expect("seat present");

    let copies: Vec<bool> = next
        .rooms()
        .iter()
        .flat_map(|room| room.seats.iter())
        .filter(|s| s.id == SeatId(7))
        .map(|s| s.occupied)
        .collect();
    assert_eq!(copies, [true, true]);
}

#[test]
fn duplicate_room_ids_are_all_patched() {
    let snapshot = FloorSnapshot::new(floor(
        5,
        vec![
            room(3, "501", vec![seat(1, 3, "501-01")]),
            room(3, "502", vec![seat(1, 3, "502-01")]),
        ],
    ));

    let added = snapshot
        .with_seat_added(RoomId(3), seat(9, 3, "501-02"))
        .expect("room on floor");
    assert!(added.rooms().iter().all(|room| room.seat(SeatId(9)).is_some()));

    let removed = added.with_seat_removed(SeatId(1)).expect("seat present");
    assert!(removed.rooms().iter().all(|room| room.seat(SeatId(1)).is_none()));
}
