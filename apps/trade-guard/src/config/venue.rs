//! Paper venue configuration.

use rust_decimal::Decimal;
use serde::{Deserialize, Serialize};

use crate::domain::shared::Money;

/// Paper venue settings.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PaperVenueSettings {
    /// Fill price for market orders that carry no price.
    #[serde(default = "default_reference_price")]
    pub reference_price: Money,
}

impl Default for PaperVenueSettings {
    fn default() -> Self {
        Self {
            reference_price: default_reference_price(),
        }
    }
}

const fn default_reference_price() -> Money {
    Money::new(Decimal::ONE_HUNDRED)
}
