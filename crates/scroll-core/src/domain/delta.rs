//! Wheel delta arithmetic.
//!
//! A low-level mouse hook receives the wheel movement in the high word of
//! `MSLLHOOKSTRUCT::mouseData`. [`ScrollDelta`] wraps that signed value and
//! knows how to turn it into a fractional adjustment step.

/// The OS unit for one notch of a standard mouse wheel.
pub const WHEEL_DELTA: i16 = 120;

/// A signed wheel delta, as reported by the OS for a single wheel message.
///
/// Positive values mean the wheel moved away from the user (scroll up),
/// negative values toward the user (scroll down).
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct ScrollDelta(i16);

impl ScrollDelta {
    /// Wraps a raw signed delta.
    pub const fn new(raw: i16) -> Self {
        Self(raw)
    }

    /// Extracts the delta from the `mouseData` field of a low-level hook struct.
    ///
    /// The delta occupies the high word and is reinterpreted as signed.
    pub const fn from_mouse_data(mouse_data: u32) -> Self {
        Self((mouse_data >> 16) as u16 as i16)
    }

    /// Returns the raw signed value.
    pub const fn raw(self) -> i16 {
        self.0
    }

    /// Absolute size of the movement in wheel units.
    ///
    /// Computed in `f64` so that `i16::MIN` does not overflow.
    pub fn magnitude(self) -> f64 {
        f64::from(self.0).abs()
    }

    /// `-1.0` for movement toward the user, `1.0` otherwise (zero included).
    pub fn direction(self) -> f64 {
        if self.0 < 0 {
            -1.0
        } else {
            1.0
        }
    }

    /// Returns `true` when the delta is exactly one notch in either direction.
    pub fn is_whole_notch(self) -> bool {
        self.0.unsigned_abs() == WHEEL_DELTA as u16
    }

    /// The amount by which the toolkit's own one-notch step must be corrected.
    ///
    /// `step_increment * ((|delta| - 120) / 120)`. Zero for exactly one notch,
    /// negative for sub-notch deltas, positive for multi-notch deltas.
    pub fn compensation(self, step_increment: f64) -> f64 {
        let notch = f64::from(WHEEL_DELTA);
        step_increment * ((self.magnitude() - notch) / notch)
    }

    /// Applies the compensation to an adjustment `value`.
    pub fn apply(self, value: f64, step_increment: f64) -> f64 {
        value - self.compensation(step_increment) * self.direction()
    }
}

impl From<i16> for ScrollDelta {
    fn from(raw: i16) -> Self {
        Self::new(raw)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const STEP: f64 = 10.0;

    #[test]
    fn test_from_mouse_data_reads_high_word_as_signed() {
        assert_eq!(ScrollDelta::from_mouse_data(0x0078_0000).raw(), 120);
        assert_eq!(ScrollDelta::from_mouse_data(0xFF88_0000).raw(), -120);
        // Low word carries no wheel information.
        assert_eq!(ScrollDelta::from_mouse_data(0x003C_FFFF).raw(), 60);
    }

    #[test]
    fn test_one_notch_produces_zero_compensation() {
        assert_eq!(ScrollDelta::new(120).compensation(STEP), 0.0);
        assert_eq!(ScrollDelta::new(-120).compensation(STEP), 0.0);
        assert_eq!(ScrollDelta::new(120).apply(50.0, STEP), 50.0);
    }

    #[test]
    fn test_two_notches_up_subtract_one_step() {
        // Arrange
        let delta = ScrollDelta::new(240);

        // Act
        let value = delta.apply(100.0, STEP);

        // Assert
        assert_eq!(value, 90.0);
    }

    #[test]
    fn test_two_notches_down_add_one_step() {
        assert_eq!(ScrollDelta::new(-240).apply(100.0, STEP), 110.0);
    }

    #[test]
    fn test_half_notch_up_gives_back_half_a_step() {
        // diff = 10 * (60 - 120) / 120 = -5
        let delta = ScrollDelta::new(60);
        assert_eq!(delta.compensation(STEP), -5.0);
        assert_eq!(delta.apply(100.0, STEP), 105.0);
    }

    #[test]
    fn test_half_notch_down_gives_back_half_a_step() {
        assert_eq!(ScrollDelta::new(-60).apply(100.0, STEP), 95.0);
    }

    #[test]
    fn test_zero_delta_is_treated_as_positive_direction() {
        // diff = 10 * (0 - 120) / 120 = -10, direction +1
        let delta = ScrollDelta::new(0);
        assert_eq!(delta.direction(), 1.0);
        assert_eq!(delta.apply(100.0, STEP), 110.0);
    }

    #[test]
    fn test_min_value_magnitude_does_not_overflow() {
        let delta = ScrollDelta::new(i16::MIN);
        assert_eq!(delta.magnitude(), 32768.0);
        assert_eq!(delta.direction(), -1.0);
    }

    #[test]
    fn test_is_whole_notch() {
        assert!(ScrollDelta::new(120).is_whole_notch());
        assert!(ScrollDelta::new(-120).is_whole_notch());
        assert!(!ScrollDelta::new(60).is_whole_notch());
        assert!(!ScrollDelta::new(240).is_whole_notch());
    }

    #[test]
    fn test_zero_step_increment_never_moves() {
        assert_eq!(ScrollDelta::new(37).apply(12.5, 0.0), 12.5);
    }
}
