use crate::{SlotError, core::shape::Shape};

/// Number of tray slots.
pub const TRAY_SLOTS: usize = 3;

/// The three-slot holding area for shapes awaiting placement.
///
/// Slots empty one by one as shapes are placed. The session refills the tray
/// in the same call that empties the last slot, so an outside observer never
/// sees a fully empty tray after a committed placement.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Tray {
    slots: [Option<Shape>; TRAY_SLOTS],
}

impl Tray {
    /// Creates a tray holding a fresh batch.
    #[must_use]
    pub fn new(batch: [Shape; TRAY_SLOTS]) -> Self {
        Self {
            slots: batch.map(Some),
        }
    }

    /// Creates a tray with explicit per-slot contents.
    ///
    /// Mainly useful for tests and position analysis; normal play only ever
    /// sees trays produced by [`Self::new`] and emptied by placements.
    #[must_use]
    pub fn from_slots(slots: [Option<Shape>; TRAY_SLOTS]) -> Self {
        Self { slots }
    }

    /// Returns the slot contents in slot order.
    #[must_use]
    pub fn slots(&self) -> &[Option<Shape>; TRAY_SLOTS] {
        &self.slots
    }

    /// Iterates the occupied slots as `(index, shape)` pairs.
    pub fn occupied_slots(&self) -> impl Iterator<Item = (usize, Shape)> + '_ {
        self.slots
            .iter()
            .enumerate()
            .filter_map(|(index, slot)| slot.map(|shape| (index, shape)))
    }

    /// Returns the shape in slot `index` without removing it.
    pub fn peek_slot(&self, index: usize) -> Result<Shape, SlotError> {
        match self.slots.get(index) {
            None => Err(SlotError::IndexOutOfRange { index }),
            Some(None) => Err(SlotError::Empty { index }),
            Some(Some(shape)) => Ok(*shape),
        }
    }

    /// Removes and returns the shape in slot `index`, leaving it empty.
    pub fn take_from_slot(&mut self, index: usize) -> Result<Shape, SlotError> {
        let slot = self
            .slots
            .get_mut(index)
            .ok_or(SlotError::IndexOutOfRange { index })?;
        slot.take().ok_or(SlotError::Empty { index })
    }

    /// Checks whether every slot is empty.
    #[must_use]
    pub fn is_fully_empty(&self) -> bool {
        self.slots.iter().all(Option::is_none)
    }

    /// Replaces all slots with a fresh batch.
    ///
    /// Unconditional: anything still in the tray is discarded. The session
    /// only invokes this once the tray is fully empty.
    pub fn refill(&mut self, batch: [Shape; TRAY_SLOTS]) {
        self.slots = batch.map(Some);
    }
}
