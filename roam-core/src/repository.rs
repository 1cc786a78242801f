use async_trait::async_trait;
use chrono::NaiveDate;
use uuid::Uuid;

use roam_catalog::{Experience, PromoCode, Slot};

use crate::booking::Booking;

/// Failure surface of the storage layer. Capacity rejections and reference
/// collisions stay structured so callers can react to them; everything else
/// is an opaque backend fault.
#[derive(Debug, thiserror::Error)]
pub enum StoreError {
    #[error("Record not found")]
    NotFound,

    #[error("Not enough spots left: requested {requested}, remaining {remaining}")]
    CapacityExceeded { requested: i32, remaining: i32 },

    #[error("Booking reference already taken")]
    DuplicateReference,

    #[error(transparent)]
    Backend(#[from] anyhow::Error),
}

/// Repository trait for experience catalog reads
#[async_trait]
pub trait ExperienceRepository: Send + Sync {
    /// All experiences, newest first.
    async fn list_experiences(&self) -> Result<Vec<Experience>, StoreError>;

    async fn get_experience(&self, id: Uuid) -> Result<Option<Experience>, StoreError>;

    /// Slots of an experience on or after `from`, ordered by date then time.
    async fn list_upcoming_slots(
        &self,
        experience_id: Uuid,
        from: NaiveDate,
    ) -> Result<Vec<Slot>, StoreError>;
}

/// Repository trait for slot capacity. `reserve` is the only sanctioned way
/// `booked` moves up, and implementations must apply the admission test and
/// the increment as one atomic step; a read-then-write pair would let two
/// concurrent parties both observe room and overbook the slot.
#[async_trait]
pub trait SlotRepository: Send + Sync {
    async fn get_slot(&self, id: Uuid) -> Result<Option<Slot>, StoreError>;

    /// Admit `num_guests` if `booked + num_guests <= capacity`, atomically
    /// incrementing `booked`. Returns the updated slot, or
    /// `StoreError::CapacityExceeded` carrying the exact remaining spots.
    async fn reserve(&self, id: Uuid, num_guests: i32) -> Result<Slot, StoreError>;

    /// Compensating decrement used when a reservation's booking never landed.
    /// Saturates at zero. Not exposed to callers outside the orchestrator;
    /// there is no customer-facing cancellation path.
    async fn release(&self, id: Uuid, num_guests: i32) -> Result<(), StoreError>;
}

/// Repository trait for promo code reads
#[async_trait]
pub trait PromoRepository: Send + Sync {
    /// Case-insensitive lookup by code. Returns inactive codes too; validity
    /// rules live in the promo validator, not the store.
    async fn find_by_code(&self, code: &str) -> Result<Option<PromoCode>, StoreError>;
}

/// Repository trait for booking persistence
#[async_trait]
pub trait BookingRepository: Send + Sync {
    /// Insert a booking. `StoreError::DuplicateReference` signals a
    /// `booking_reference` collision so the caller can regenerate and retry.
    async fn insert(&self, booking: &Booking) -> Result<(), StoreError>;

    async fn find_by_reference(&self, reference: &str) -> Result<Option<Booking>, StoreError>;
}
