pub mod app_config;
pub mod booking_repo;
pub mod catalog_repo;
pub mod database;
pub mod memory;
pub mod promo_repo;
pub mod slot_repo;

pub use app_config::Config;
pub use booking_repo::StoreBookingRepository;
pub use catalog_repo::StoreExperienceRepository;
pub use database::DbClient;
pub use memory::MemoryStore;
pub use promo_repo::StorePromoRepository;
pub use slot_repo::StoreSlotRepository;

use roam_core::StoreError;

pub(crate) fn db_err(e: sqlx::Error) -> StoreError {
    StoreError::Backend(e.into())
}
