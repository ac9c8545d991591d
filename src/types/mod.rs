//! Type definitions

pub mod itinerary;
pub mod money;
pub mod schedule;
pub mod tracking;

pub use itinerary::*;
pub use money::*;
pub use schedule::*;
pub use tracking::*;
