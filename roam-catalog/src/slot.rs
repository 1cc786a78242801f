use chrono::{NaiveDate, NaiveTime};
use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// A dated departure of an experience with fixed capacity.
///
/// Invariant: `0 <= booked <= capacity`. `booked` only moves through the
/// store's reserve path (and the orchestrator's compensating release), never
/// through plain field writes.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Slot {
    pub id: Uuid,
    pub experience_id: Uuid,
    pub date: NaiveDate,
    pub time: NaiveTime,
    pub capacity: i32,
    pub booked: i32,
    /// Per-guest adjustment shown to the storefront; the charged amount is
    /// always recomputed from the experience's base rate.
    pub price_modifier_cents: Option<i64>,
}

impl Slot {
    /// Spots still open on this slot.
    pub fn remaining(&self) -> i32 {
        self.capacity - self.booked
    }

    /// Admission test for a party of `num_guests`. The in-memory store runs
    /// this under its lock; Postgres enforces the same predicate inside the
    /// conditional UPDATE.
    pub fn check_admission(&self, num_guests: i32) -> Result<(), AvailabilityError> {
        if self.booked + num_guests > self.capacity {
            return Err(AvailabilityError::CapacityExceeded {
                requested: num_guests,
                remaining: self.remaining(),
            });
        }
        Ok(())
    }
}

#[derive(Debug, thiserror::Error)]
pub enum AvailabilityError {
    #[error("Slot not found: {0}")]
    NotFound(String),

    #[error("Not enough spots left: requested {requested}, remaining {remaining}")]
    CapacityExceeded { requested: i32, remaining: i32 },
}
