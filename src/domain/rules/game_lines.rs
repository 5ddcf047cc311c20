//! Assembly of booked game lines from parallel id/price/slot lists.

use serde::Serialize;

use super::pricing::round2;
use crate::domain::entities::BookingGameLine;

#[derive(Debug, Clone, PartialEq, Serialize)]
pub struct GameLineValidation {
    pub is_valid: bool,
    pub lines: Vec<BookingGameLine>,
    pub errors: Vec<String>,
}

/// Zips game ids with their prices and optional slot ids.
///
/// A missing or non-finite price falls back to an even share of `total`.
/// Non-positive game ids are reported and skipped. The result is valid when
/// at least one line survives.
pub fn validate_game_lines(
    game_ids: &[i64],
    prices: &[Option<f64>],
    total: f64,
    slot_ids: Option<&[i64]>,
) -> GameLineValidation {
    let mut lines = Vec::with_capacity(game_ids.len());
    let mut errors = Vec::new();

    if game_ids.is_empty() {
        errors.push("No game ids provided".to_string());
    }

    let even_share = if game_ids.is_empty() {
        0.0
    } else {
        round2(total / game_ids.len() as f64)
    };

    for (i, &game_id) in game_ids.iter().enumerate() {
        if game_id <= 0 {
            errors.push(format!("Invalid game id at position {}: {}", i, game_id));
            continue;
        }

        let game_price = match prices.get(i).copied().flatten() {
            Some(price) if price.is_finite() => price,
            _ => even_share,
        };

        lines.push(BookingGameLine {
            game_id,
            slot_id: slot_ids.and_then(|ids| ids.get(i).copied()),
            game_price,
        });
    }

    GameLineValidation {
        is_valid: !lines.is_empty(),
        lines,
        errors,
    }
}
