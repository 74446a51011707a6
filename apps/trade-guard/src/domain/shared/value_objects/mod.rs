//! Shared Value Objects
//!
//! Immutable domain types used across bounded contexts.
//! Value objects are compared by value, not identity.

mod exact_decimal;
mod identifiers;
mod money;
mod quantity;
mod symbol;
mod timestamp;

pub use identifiers::VenueOrderId;
pub use money::Money;
pub use quantity::Quantity;
pub use symbol::Symbol;
pub use timestamp::Timestamp;
