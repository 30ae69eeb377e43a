use anyhow::{anyhow, Result};
use clap::{Parser, Subcommand};
use client_core::{load_settings, seat_policy::is_occupied, SeatingClient};
use shared::domain::{RoomId, SeatId};
use tracing::info;
use tracing_subscriber::EnvFilter;

#[derive(Parser, Debug)]
struct Args {
    /// Overrides the API base url from seating.toml / environment.
    #[arg(long)]
    api_url: Option<String>,
    #[command(subcommand)]
    command: Command,
}

#[derive(Subcommand, Debug)]
enum Command {
    /// List all floors.
    Floors,
    /// Show one floor with its rooms and seats.
    Floor { floor_number: i64 },
    /// Show one seat as returned by the API.
    Seat { seat_id: i64 },
    /// Add the next free seat to a room on a floor.
    AddSeat { floor_number: i64, room_id: i64 },
    /// Delete a seat from a floor.
    DeleteSeat { floor_number: i64, seat_id: i64 },
    /// Print dashboard statistics.
    Stats,
    /// Print the door label content for a room.
    Label { floor_number: i64, room_id: i64 },
}

#[tokio::main]
async fn main() -> Result<()> {
    tracing_subscriber::fmt()
        .with_env_filter(
            EnvFilter::try_from_default_env().unwrap_or_else(|_| EnvFilter::new("warn")),
        )
        .init();
    let args = Args::parse();

    let mut settings = load_settings();
    if let Some(api_url) = args.api_url {
        settings.api_base_url = api_url;
    }
    let client = SeatingClient::connect(&settings).await?;
    info!("cli: {} floors available", client.floors.floors().len());

    match args.command {
        Command::Floors => {
            for floor in client.floors.floors().iter() {
                println!(
                    "{:>3}  {}  ({} rooms)",
                    floor.floor_number,
                    floor.name,
                    floor.rooms.len()
                );
            }
        }
        Command::Floor { floor_number } => {
            select_floor(&client, floor_number).await?;
            print_floor(&client)?;
        }
        Command::Seat { seat_id } => {
            let seat = client.floors.get_seat_info(SeatId(seat_id)).await?;
            println!("{}", serde_json::to_string_pretty(&seat)?);
        }
        Command::AddSeat {
            floor_number,
            room_id,
        } => {
            select_floor(&client, floor_number).await?;
            let seat = client.desk.add_seat_to_room(RoomId(room_id)).await?;
            println!("Seat {} added (id={})", seat.seat_number, seat.id.0);
        }
        Command::DeleteSeat {
            floor_number,
            seat_id,
        } => {
            select_floor(&client, floor_number).await?;
            client.desk.delete_seat(SeatId(seat_id)).await?;
            println!("Seat {seat_id} deleted");
        }
        Command::Stats => {
            let stats = client.stats.get_stats().await;
            println!("{}", serde_json::to_string_pretty(&stats)?);
        }
        Command::Label {
            floor_number,
            room_id,
        } => {
            select_floor(&client, floor_number).await?;
            let label = client
                .desk
                .room_label(RoomId(room_id))
                .ok_or_else(|| anyhow!("room {room_id} is not on floor {floor_number}"))?;
            println!("{}\n{}\n", label.title, label.floor_name);
            for line in &label.lines {
                println!("{line}");
            }
            println!("\n(would be saved as {})", label.file_name);
        }
    }

    Ok(())
}

async fn select_floor(client: &SeatingClient, floor_number: i64) -> Result<()> {
    client.floors.load_floor(floor_number).await?;
    if client.floors.selected_floor().is_none() {
        return Err(anyhow!("floor {floor_number} could not be loaded"));
    }
    Ok(())
}

fn print_floor(client: &SeatingClient) -> Result<()> {
    let snapshot = client
        .floors
        .selected_floor()
        .ok_or_else(|| anyhow!("no floor selected"))?;
    println!("{} (floor {})", snapshot.floor().name, snapshot.floor_number());
    for room in snapshot.rooms() {
        let full = client.desk.is_seat_limit_reached(room.id).unwrap_or(false);
        println!(
            "  room {} [id={}] {}{}",
            room.room_number,
            room.id.0,
            room.name,
            if full { " (full)" } else { "" }
        );
        let mut seats: Vec<_> = room.seats.iter().collect();
        seats.sort_by(|a, b| a.seat_number.cmp(&b.seat_number));
        for seat in seats {
            let occupants: Vec<&str> = seat
                .employees
                .iter()
                .map(|employee| employee.full_name.as_str())
                .collect();
            println!(
                "    {} [id={}] {}{}",
                seat.seat_number,
                seat.id.0,
                if is_occupied(seat) { "occupied" } else { "free" },
                if occupants.is_empty() {
                    String::new()
                } else {
                    format!(": {}", occupants.join(", "))
                }
            );
        }
    }
    Ok(())
}
