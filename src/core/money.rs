//! Currency rounding helpers shared across the engine.

/// Half-cent band inside which a balance counts as settled. Absorbs the
/// floating-point drift left behind by uneven splits.
pub const SETTLE_TOLERANCE: f64 = 0.005;

/// Rounds a currency amount to two decimal places.
pub fn round2(amount: f64) -> f64 {
    (amount * 100.0).round() / 100.0
}

/// True when a balance is close enough to zero to be ignored.
pub fn is_settled(amount: f64) -> bool {
    amount.abs() <= SETTLE_TOLERANCE
}
