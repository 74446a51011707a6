//! Kelly-criterion position sizing.
//!
//! - [`kelly_fraction`]: optimal bankroll fraction from win probability and payoff
//! - [`PositionSizer`]: scaled, capped and truncated allocation

mod kelly;
mod sizer;

pub use kelly::kelly_fraction;
pub use sizer::{PositionSizer, PositionSizerConfig};
