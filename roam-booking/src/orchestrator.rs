use std::sync::Arc;

use chrono::Utc;
use tracing::{info, warn};
use uuid::Uuid;

use roam_catalog::{check_promo, pricing, Experience, PromoCode, PromoRejection};
use roam_core::{
    Booking, BookingRepository, BookingRequest, BookingStatus, ExperienceRepository,
    PromoRepository, SlotRepository, StoreError,
};

use crate::reference::generate_reference;

/// Bounded regeneration budget for booking-reference collisions.
const REFERENCE_ATTEMPTS: u32 = 5;

#[derive(Debug, thiserror::Error)]
pub enum BookingError {
    #[error("Invalid request: {0}")]
    InvalidRequest(String),

    #[error("Experience not found")]
    ExperienceNotFound,

    #[error("Slot not found")]
    SlotNotFound,

    #[error("Not enough spots left: requested {requested}, remaining {remaining}")]
    CapacityExceeded { requested: i32, remaining: i32 },

    #[error("{0}")]
    InvalidPromo(#[from] PromoRejection),

    #[error("Could not allocate a unique booking reference")]
    ReferenceGenerationFailed,

    #[error("Booking could not be stored")]
    Persistence(#[source] StoreError),
}

/// Coordinates a booking attempt end to end:
/// validate -> reserve capacity -> re-validate promo -> price -> persist.
///
/// Each attempt is terminal on its first failure. Capacity is taken before
/// the booking row is written, so every failure past the reserve step runs a
/// compensating release; a reservation must never outlive a booking that
/// was not stored.
pub struct BookingOrchestrator {
    experiences: Arc<dyn ExperienceRepository>,
    slots: Arc<dyn SlotRepository>,
    promos: Arc<dyn PromoRepository>,
    bookings: Arc<dyn BookingRepository>,
}

impl BookingOrchestrator {
    pub fn new(
        experiences: Arc<dyn ExperienceRepository>,
        slots: Arc<dyn SlotRepository>,
        promos: Arc<dyn PromoRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        Self {
            experiences,
            slots,
            promos,
            bookings,
        }
    }

    pub async fn create_booking(&self, req: BookingRequest) -> Result<Booking, BookingError> {
        // 1. Validate the request shape before touching the store
        validate(&req)?;

        // 2. Load experience and slot
        let experience = self
            .experiences
            .get_experience(req.experience_id)
            .await
            .map_err(BookingError::Persistence)?
            .ok_or(BookingError::ExperienceNotFound)?;

        let slot = self
            .slots
            .get_slot(req.slot_id)
            .await
            .map_err(BookingError::Persistence)?
            .ok_or(BookingError::SlotNotFound)?;

        if slot.experience_id != experience.id {
            return Err(BookingError::InvalidRequest(
                "slot does not belong to the requested experience".to_string(),
            ));
        }

        // 3. Reserve capacity; the store applies the admission test and the
        //    increment as one atomic step
        match self.slots.reserve(req.slot_id, req.num_guests).await {
            Ok(_) => {}
            Err(StoreError::NotFound) => return Err(BookingError::SlotNotFound),
            Err(StoreError::CapacityExceeded {
                requested,
                remaining,
            }) => {
                return Err(BookingError::CapacityExceeded {
                    requested,
                    remaining,
                })
            }
            Err(e) => return Err(BookingError::Persistence(e)),
        }

        // From here on we hold a reservation with no booking row behind it
        let result = self.price_and_persist(&req, &experience).await;

        if result.is_err() {
            if let Err(e) = self.slots.release(req.slot_id, req.num_guests).await {
                warn!(slot_id = %req.slot_id, error = %e, "failed to release reserved capacity");
            }
        }

        result
    }

    async fn price_and_persist(
        &self,
        req: &BookingRequest,
        experience: &Experience,
    ) -> Result<Booking, BookingError> {
        // 4. Recompute the base amount server-side and re-validate the promo
        //    against it; a quote the client obtained earlier carries no weight
        let base_amount_cents = experience.price_cents * req.num_guests as i64;

        let promo: Option<PromoCode> = match &req.promo_code {
            Some(code) => {
                let promo = self
                    .promos
                    .find_by_code(code)
                    .await
                    .map_err(BookingError::Persistence)?
                    .ok_or(PromoRejection::NotFound)?;
                check_promo(&promo, base_amount_cents, Utc::now())?;
                Some(promo)
            }
            None => None,
        };

        // 5. Final pricing
        let quote = pricing::quote(experience.price_cents, req.num_guests, promo.as_ref());

        // 6./7. Persist as confirmed, regenerating the reference on collision
        for attempt in 1..=REFERENCE_ATTEMPTS {
            let booking = Booking {
                id: Uuid::new_v4(),
                experience_id: req.experience_id,
                slot_id: req.slot_id,
                customer_name: req.customer_name.clone(),
                customer_email: req.customer_email.clone(),
                customer_phone: req.customer_phone.clone(),
                num_guests: req.num_guests,
                base_amount_cents: quote.base_amount_cents,
                discount_amount_cents: quote.discount_amount_cents,
                final_amount_cents: quote.final_amount_cents,
                promo_code: promo.as_ref().map(|p| p.code.clone()),
                status: BookingStatus::Confirmed,
                booking_reference: generate_reference(),
                created_at: Utc::now(),
            };

            match self.bookings.insert(&booking).await {
                Ok(()) => {
                    info!(
                        reference = %booking.booking_reference,
                        slot_id = %booking.slot_id,
                        guests = booking.num_guests,
                        "booking confirmed"
                    );
                    return Ok(booking);
                }
                Err(StoreError::DuplicateReference) => {
                    warn!(attempt, "booking reference collision, regenerating");
                    continue;
                }
                Err(e) => return Err(BookingError::Persistence(e)),
            }
        }

        Err(BookingError::ReferenceGenerationFailed)
    }
}

fn validate(req: &BookingRequest) -> Result<(), BookingError> {
    if req.customer_name.trim().is_empty() {
        return Err(BookingError::InvalidRequest(
            "customer name is required".to_string(),
        ));
    }
    if req.customer_email.trim().is_empty() || !req.customer_email.contains('@') {
        return Err(BookingError::InvalidRequest(
            "a valid customer email is required".to_string(),
        ));
    }
    if req.customer_phone.trim().is_empty() {
        return Err(BookingError::InvalidRequest(
            "customer phone is required".to_string(),
        ));
    }
    if req.num_guests <= 0 {
        return Err(BookingError::InvalidRequest(
            "guest count must be at least 1".to_string(),
        ));
    }
    Ok(())
}
