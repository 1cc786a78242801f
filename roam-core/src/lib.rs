pub mod booking;
pub mod repository;

pub use booking::{Booking, BookingRequest, BookingStatus};
pub use repository::{
    BookingRepository, ExperienceRepository, PromoRepository, SlotRepository, StoreError,
};
