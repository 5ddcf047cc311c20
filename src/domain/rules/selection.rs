//! The set of game slots and add-ons chosen for one child.

use serde::{Deserialize, Serialize};
use serde_json::json;

use crate::domain::entities::{BookingAddOnLine, GameSlot};
use crate::error::AppError;

/// One chosen slot of one game.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct SlotSelection {
    pub game_id: i64,
    pub slot_id: i64,
}

/// One chosen add-on, optionally a specific variant of it.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct AddOnLine {
    pub add_on_id: i64,
    pub variant_id: Option<i64>,
    pub quantity: u32,
}

impl From<AddOnLine> for BookingAddOnLine {
    fn from(line: AddOnLine) -> Self {
        BookingAddOnLine {
            add_on_id: line.add_on_id,
            variant_id: line.variant_id,
            quantity: line.quantity,
        }
    }
}

/// What [`SelectionSet::select_slot`] did.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum SlotChange {
    Selected,
    /// Another slot of the same game was dropped in favour of this one.
    Replaced { previous_slot_id: i64 },
    /// The slot was already selected and has been removed.
    Deselected,
}

/// Games and add-ons picked for a booking.
///
/// Holds at most one slot per game.
#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize, Deserialize)]
pub struct SelectionSet {
    #[serde(default)]
    games: Vec<SlotSelection>,
    #[serde(default)]
    add_ons: Vec<AddOnLine>,
}

impl SelectionSet {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn games(&self) -> &[SlotSelection] {
        &self.games
    }

    pub fn add_ons(&self) -> &[AddOnLine] {
        &self.add_ons
    }

    pub fn is_empty(&self) -> bool {
        self.games.is_empty()
    }

    pub fn contains_slot(&self, slot_id: i64) -> bool {
        self.games.iter().any(|g| g.slot_id == slot_id)
    }

    /// Toggles `slot`: deselects it if already chosen, otherwise selects it
    /// in place of any other slot of the same game.
    ///
    /// # Errors
    ///
    /// Returns [`AppError::Unprocessable`] when selecting a slot with no seats left.
    pub fn select_slot(&mut self, slot: &GameSlot) -> Result<SlotChange, AppError> {
        if let Some(pos) = self.games.iter().position(|g| g.slot_id == slot.id) {
            self.games.remove(pos);
            return Ok(SlotChange::Deselected);
        }

        if slot.is_full() {
            return Err(AppError::unprocessable(
                format!("Slot '{}' is fully booked", slot.game_title),
                json!({ "slot_id": slot.id, "capacity": slot.capacity }),
            ));
        }

        let selection = SlotSelection {
            game_id: slot.game_id,
            slot_id: slot.id,
        };

        match self.games.iter_mut().find(|g| g.game_id == slot.game_id) {
            Some(existing) => {
                let previous_slot_id = existing.slot_id;
                *existing = selection;
                Ok(SlotChange::Replaced { previous_slot_id })
            }
            None => {
                self.games.push(selection);
                Ok(SlotChange::Selected)
            }
        }
    }

    /// Sets the quantity of an add-on line. Zero removes the line.
    pub fn set_add_on(&mut self, add_on_id: i64, variant_id: Option<i64>, quantity: u32) {
        let pos = self
            .add_ons
            .iter()
            .position(|l| l.add_on_id == add_on_id && l.variant_id == variant_id);

        match (pos, quantity) {
            (Some(i), 0) => {
                self.add_ons.remove(i);
            }
            (Some(i), q) => self.add_ons[i].quantity = q,
            (None, 0) => {}
            (None, q) => self.add_ons.push(AddOnLine {
                add_on_id,
                variant_id,
                quantity: q,
            }),
        }
    }

    /// Distinct game ids in selection order.
    pub fn game_ids(&self) -> Vec<i64> {
        let mut ids = Vec::with_capacity(self.games.len());
        for g in &self.games {
            if !ids.contains(&g.game_id) {
                ids.push(g.game_id);
            }
        }
        ids
    }

    pub fn slot_ids(&self) -> Vec<i64> {
        self.games.iter().map(|g| g.slot_id).collect()
    }

    pub fn clear(&mut self) {
        self.games.clear();
        self.add_ons.clear();
    }
}
