pub mod experience;
pub mod slot;
pub mod pricing;
pub mod promo;

pub use experience::Experience;
pub use slot::{AvailabilityError, Slot};
pub use pricing::{quote, Quote};
pub use promo::{check_promo, DiscountType, PromoCode, PromoRejection};
