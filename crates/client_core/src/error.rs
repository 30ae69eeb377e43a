use std::fmt;

use shared::domain::{EmployeeId, RoomId, SeatId};
use thiserror::Error;

/// Failure of a single REST exchange, after retries.
#[derive(Debug, Clone, Error)]
pub enum TransportError {
    #[error("request to {url} failed: {message}")]
    Network { url: String, message: String },
    #[error("{method} {url} returned status {status}")]
    Status {
        method: &'static str,
        url: String,
        status: u16,
        body: String,
    },
    #[error("failed to decode response from {url}: {message}")]
    Decode { url: String, message: String },
}

impl TransportError {
    /// HTTP status of the failed exchange; 0 when no response arrived.
    pub fn status(&self) -> u16 {
        match self {
            Self::Status { status, .. } => *status,
            Self::Network { .. } | Self::Decode { .. } => 0,
        }
    }

    pub fn is_transient(&self) -> bool {
        match self {
            Self::Network { .. } => true,
            Self::Status { status, .. } => *status >= 500 || *status == 408 || *status == 429,
            Self::Decode { .. } => false,
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SeatAction {
    Add,
    Delete,
}

impl fmt::Display for SeatAction {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Add => f.write_str("add"),
            Self::Delete => f.write_str("delete"),
        }
    }
}

#[derive(Debug, Error)]
pub enum SeatingError {
    #[error("Something went wrong; please try again later.")]
    Unavailable(#[source] TransportError),
    #[error("Failed to {action} seat. Status: {status}")]
    SeatMutation {
        action: SeatAction,
        status: u16,
        #[source]
        source: TransportError,
    },
    #[error(transparent)]
    Transport(#[from] TransportError),
    #[error("no floor is selected")]
    NoFloorSelected,
    #[error("room {} is not part of the selected floor", .room_id.0)]
    RoomNotLoaded { room_id: RoomId },
    #[error("room {} already holds the maximum of {limit} seats", .room_id.0)]
    SeatLimitReached { room_id: RoomId, limit: usize },
    #[error("failed to unassign employee {} from seat {}: {source}", .employee_id.0, .seat_id.0)]
    Unassign {
        employee_id: EmployeeId,
        seat_id: SeatId,
        source: anyhow::Error,
    },
}

impl SeatingError {
    pub(crate) fn seat_mutation(action: SeatAction, source: TransportError) -> Self {
        Self::SeatMutation {
            action,
            status: source.status(),
            source,
        }
    }
}
