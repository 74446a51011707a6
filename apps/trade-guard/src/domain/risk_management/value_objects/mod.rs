//! Risk Management Value Objects

mod risk_limits;
mod risk_state;

pub use risk_limits::RiskLimits;
pub use risk_state::RiskState;
