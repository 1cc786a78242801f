pub mod orchestrator;
pub mod reference;

pub use orchestrator::{BookingError, BookingOrchestrator};
pub use reference::generate_reference;
