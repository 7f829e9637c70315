use super::WindowError;

/// Normalized value of a day with no price change.
pub const NO_CHANGE: f64 = 0.5;

/// Maps a price ratio into the network's preferred output range:
/// 1.00 (no change) becomes 0.5, 1.05 becomes 0.55, 0.75 becomes 0.25.
#[inline]
pub fn normalize(current: f64, previous: f64) -> Result<f64, WindowError> {
    if previous == 0.0 {
        return Err(WindowError::ZeroPrice);
    }
    let normalized = current / previous - NO_CHANGE;
    if !normalized.is_finite() {
        return Err(WindowError::NonFinite);
    }
    Ok(normalized)
}

/// Signed fractional change from a normalized value: -0.12 means a 12% drop.
#[inline]
pub fn denormalize(normalized: f64) -> f64 {
    normalized - NO_CHANGE
}
