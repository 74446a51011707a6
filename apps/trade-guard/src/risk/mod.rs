//! Position sizing.
//!
//! Pure Kelly-criterion helpers used upstream of the engine to turn an edge
//! estimate into a candidate order size. Nothing here touches engine state.
//!
//! # Example
//!
//! ```rust,ignore
//! use trade_guard::risk::{PositionSizer, kelly_fraction};
//! use rust_decimal_macros::dec;
//!
//! let fraction = kelly_fraction(dec!(0.6), dec!(1), dec!(-1)); // 0.2
//! let size = PositionSizer::default().position_size(
//!     Money::new(dec!(100000)), fraction, dec!(0.5), Money::new(dec!(5000)),
//! );
//! ```

pub mod sizing;

pub use sizing::{PositionSizer, PositionSizerConfig, kelly_fraction};
