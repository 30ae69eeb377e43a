use super::*;

use shared::domain::{Employee, EmployeeId, RoomId, SeatId};

fn seat(id: i64, seat_number: &str) -> Seat {
    Seat {
        id: SeatId(id),
        seat_number: seat_number.to_string(),
        room: None,
        occupied: false,
        employees: Vec::new(),
        created_at: None,
    }
}

fn room_with(room_number: &str, seat_numbers: &[&str]) -> Room {
    Room {
        id: RoomId(1),
        room_number: room_number.to_string(),
        name: format!("Room {room_number}"),
        seats: seat_numbers
            .iter()
            .enumerate()
            .map(|(i, number)| seat(i as i64 + 1, number))
            .collect(),
    }
}

fn employee(id: i64) -> Employee {
    Employee {
        id: EmployeeId(id),
        full_name: format!("Employee {id}"),
        occupation: "Analyst".to_string(),
    }
}

#[test]
fn empty_room_starts_at_one() {
    assert_eq!(generate_seat_number(&room_with("101", &[])), "101-01");
}

#[test]
fn fills_lowest_gap() {
    let room = room_with("101", &["101-04", "101-01", "101-02"]);
    assert_eq!(generate_seat_number(&room), "101-03");
}

#[test]
fn appends_past_maximum_without_gap() {
    let room = room_with("101", &["101-02", "101-03", "101-01"]);
    assert_eq!(generate_seat_number(&room), "101-04");
}

#[test]
fn malformed_seat_numbers_are_ignored() {
    let room = room_with("7", &["7-01", "garbage", "7-x", "7-02-b", "7-00"]);
    assert_eq!(generate_seat_number(&room), "7-02");
    assert_eq!(seat_index("garbage"), 0);
    assert_eq!(seat_index("7-02-b"), 0);
    assert_eq!(seat_index("7-x"), 0);
}

#[test]
fn duplicate_indices_do_not_stall_the_scan() {
    let room = room_with("5", &["5-01", "5-01", "5-02"]);
    assert_eq!(generate_seat_number(&room), "5-03");
}

#[test]
fn indices_above_two_digits_are_not_truncated() {
    let numbers: Vec<String> = (1..=100).map(|i| format!("9-{i:02}")).collect();
    let refs: Vec<&str> = numbers.iter().map(String::as_str).collect();
    assert_eq!(generate_seat_number(&room_with("9", &refs)), "9-101");
}

#[test]
fn seat_index_reads_leading_digits() {
    assert_eq!(seat_index("101-03"), 3);
    assert_eq!(seat_index("101-03a"), 3);
    assert_eq!(seat_index("101-"), 0);
}

#[test]
fn occupancy_follows_employee_assignment() {
    let mut s = seat(1, "1-01");
    s.occupied = true;
    assert!(!is_occupied(&s));
    assert!(toggled_occupancy(&s));

    s.employees.push(employee(3));
    s.occupied = false;
    assert!(is_occupied(&s));
    assert!(!toggled_occupancy(&s));
}

#[test]
fn room_emptiness_and_seat_limit() {
    let mut room = room_with("3", &["3-01", "3-02"]);
    assert!(is_room_empty(&room));
    assert!(!is_seat_limit_reached(&room, 4));
    assert!(is_seat_limit_reached(&room, 2));

    room.seats[1].employees.push(employee(8));
    assert!(!is_room_empty(&room));
}

#[test]
fn rooms_sort_numerically_with_non_numeric_last() {
    let mut rooms = vec![
        room_with("10", &[]),
        room_with("lobby", &[]),
        room_with("2", &[]),
        room_with("1", &[]),
    ];
    sort_rooms(&mut rooms);
    let order: Vec<&str> = rooms.iter().map(|r| r.room_number.as_str()).collect();
    assert_eq!(order, ["1", "2", "10", "lobby"]);
}

#[test]
fn room_number_key_reads_leading_integer() {
    assert_eq!(room_number_key("12"), Some(12));
    assert_eq!(room_number_key("3b"), Some(3));
    assert_eq!(room_number_key("lobby"), None);
}
