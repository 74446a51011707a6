//! Risk validation rejections.

use thiserror::Error;

/// Why the validator refused an order.
///
/// The display strings are part of the audit contract.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Error)]
pub enum ValidationRejection {
    /// Daily trade count already at the cap.
    #[error("daily trade limit reached")]
    DailyTradeLimit,

    /// Order size above the per-order maximum.
    #[error("size exceeds maximum")]
    SizeExceedsMaximum,

    /// Notional would push cumulative exposure over the cap.
    #[error("would exceed max exposure")]
    ExposureLimit,
}

impl ValidationRejection {
    /// Stable code for logs and metrics.
    #[must_use]
    pub const fn code(&self) -> &'static str {
        match self {
            Self::DailyTradeLimit => "DAILY_TRADE_LIMIT",
            Self::SizeExceedsMaximum => "SIZE_EXCEEDS_MAXIMUM",
            Self::ExposureLimit => "EXPOSURE_LIMIT",
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn rejection_reasons_are_stable() {
        assert_eq!(
            ValidationRejection::DailyTradeLimit.to_string(),
            "daily trade limit reached"
        );
        assert_eq!(
            ValidationRejection::SizeExceedsMaximum.to_string(),
            "size exceeds maximum"
        );
        assert_eq!(
            ValidationRejection::ExposureLimit.to_string(),
            "would exceed max exposure"
        );
    }

    #[test]
    fn rejection_codes() {
        assert_eq!(ValidationRejection::ExposureLimit.code(), "EXPOSURE_LIMIT");
    }
}
