//! Venue Adapters
//!
//! Implementations of [`VenuePort`](crate::application::ports::VenuePort).

mod paper;

pub use paper::PaperVenue;
