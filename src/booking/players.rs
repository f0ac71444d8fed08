//! Player-count recommendations per booking type.
//!
//! Players never change the price; the count is only nudged into the range
//! that suits the facility.

use crate::pricing::BookingType;

pub const MATCH_MIN_PLAYERS: u32 = 20;
pub const NETS_MAX_PLAYERS: u32 = 6;

pub fn players_hint(booking_type: BookingType) -> &'static str {
    match booking_type {
        BookingType::Match => "Match booking: recommended 20+ players.",
        BookingType::Nets => "Net practice: recommended 1–6 players.",
    }
}

/// Pull a player count into the recommended range for `booking_type`.
/// An unset count counts as zero.
pub fn adjust_players(booking_type: BookingType, players: Option<u32>) -> Option<u32> {
    match booking_type {
        BookingType::Match => Some(players.unwrap_or(0).max(MATCH_MIN_PLAYERS)),
        BookingType::Nets => players.map(|p| p.min(NETS_MAX_PLAYERS)),
    }
}
