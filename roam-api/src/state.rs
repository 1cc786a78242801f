use std::sync::Arc;

use roam_booking::BookingOrchestrator;
use roam_core::{BookingRepository, ExperienceRepository, PromoRepository, SlotRepository};

#[derive(Clone)]
pub struct AppState {
    pub experiences: Arc<dyn ExperienceRepository>,
    pub promos: Arc<dyn PromoRepository>,
    pub bookings: Arc<dyn BookingRepository>,
    pub orchestrator: Arc<BookingOrchestrator>,
}

impl AppState {
    pub fn new(
        experiences: Arc<dyn ExperienceRepository>,
        slots: Arc<dyn SlotRepository>,
        promos: Arc<dyn PromoRepository>,
        bookings: Arc<dyn BookingRepository>,
    ) -> Self {
        let orchestrator = Arc::new(BookingOrchestrator::new(
            experiences.clone(),
            slots,
            promos.clone(),
            bookings.clone(),
        ));

        Self {
            experiences,
            promos,
            bookings,
            orchestrator,
        }
    }
}
