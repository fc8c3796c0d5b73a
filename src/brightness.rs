//! Global brightness applied at transmission time.
//!
//! Brightness never touches stored pixel data. The strip keeps one logical
//! level in `0..=255` and scales each byte as it goes out on the wire, so
//! changing brightness and re-showing always starts from the original
//! colors with no accumulated rounding loss.
//!
//! Internally the level is held pre-biased for the fixed-point multiply:
//! full brightness is a pass-through tag with no multiply at all, and any
//! other level `b` is stored as the scale factor `b + 1` so that
//! `(byte * scale) >> 8` lands on the intended attenuation.

/// Scales `value` by `scale / 256` using a widening multiply.
#[inline]
#[allow(clippy::cast_lossless)]
pub(crate) const fn scale8(value: u8, scale: u8) -> u8 {
    ((value as u16 * scale as u16) >> 8) as u8
}

/// A deferred global brightness level.
///
/// The default is full brightness (no attenuation). Setting a level is
/// cheap and does no I/O; the effect shows up on the next transmission.
///
/// # Example
/// ```
/// use dotstar::Brightness;
///
/// let mut brightness = Brightness::default();
/// assert_eq!(brightness.get(), 255);
/// assert_eq!(brightness.apply(200), 200);
///
/// brightness.set(128);
/// assert_eq!(brightness.get(), 128);
/// assert_eq!(brightness.apply(20), 10);
/// ```
#[derive(Clone, Copy, Default, PartialEq, Eq)]
pub struct Brightness {
    /// `None` is pass-through; `Some(s)` holds the scale factor `level + 1`.
    scale: Option<u8>,
}

impl Brightness {
    /// Creates a brightness at the given logical level.
    #[must_use]
    pub const fn new(level: u8) -> Self {
        Self {
            scale: if level == 255 { None } else { Some(level + 1) },
        }
    }

    /// Sets the logical level, 0 = off, 255 = full.
    pub fn set(&mut self, level: u8) {
        *self = Self::new(level);
    }

    /// Returns the logical level previously set.
    #[must_use]
    pub const fn get(self) -> u8 {
        match self.scale {
            None => 255,
            Some(scale) => scale - 1,
        }
    }

    /// Returns the raw scale factor, or `None` when no scaling applies.
    ///
    /// Lets the transmission loop pick the pass-through path once instead
    /// of per byte.
    pub(crate) const fn scale(self) -> Option<u8> {
        self.scale
    }

    /// Attenuates one channel byte.
    ///
    /// At level 255 the byte passes through untouched; at level 0 the
    /// result is 0 for every input, since the minimum stored scale factor
    /// is 1 and `(byte * 1) >> 8` truncates to 0 for any byte.
    #[must_use]
    pub const fn apply(self, byte: u8) -> u8 {
        match self.scale {
            None => byte,
            Some(scale) => scale8(byte, scale),
        }
    }
}

impl core::fmt::Debug for Brightness {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_tuple("Brightness").field(&self.get()).finish()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for Brightness {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(f, "Brightness({=u8})", self.get());
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::format;

    use super::*;

    #[test]
    fn level_round_trips_for_every_value() {
        let mut brightness = Brightness::default();
        for level in 0..=255u8 {
            brightness.set(level);
            assert_eq!(brightness.get(), level);
        }
    }

    #[test]
    fn default_is_full_brightness() {
        assert_eq!(Brightness::default(), Brightness::new(255));
        assert_eq!(Brightness::default().get(), 255);
    }

    #[test]
    fn full_brightness_passes_bytes_through() {
        let brightness = Brightness::new(255);
        for byte in 0..=255u8 {
            assert_eq!(brightness.apply(byte), byte);
        }
    }

    #[test]
    fn zero_brightness_blacks_out_every_byte() {
        let brightness = Brightness::new(0);
        for byte in 0..=255u8 {
            assert_eq!(brightness.apply(byte), 0);
        }
    }

    #[test]
    fn minimum_scale_factor_truncates_to_zero() {
        for byte in 0..=255u8 {
            assert_eq!(scale8(byte, 1), 0);
        }
    }

    #[test]
    fn half_brightness_scenario() {
        // level 128 stores a scale factor of 129
        let brightness = Brightness::new(128);
        assert_eq!(brightness.apply(10), 5);
        assert_eq!(brightness.apply(20), 10);
        assert_eq!(brightness.apply(30), 15);
    }

    #[test]
    fn scaling_never_exceeds_input() {
        for level in (0..=255u8).step_by(17) {
            let brightness = Brightness::new(level);
            for byte in (0..=255u8).step_by(13) {
                assert!(brightness.apply(byte) <= byte);
            }
        }
    }

    #[test]
    fn debug_shows_logical_level() {
        assert_eq!(format!("{:?}", Brightness::new(128)), "Brightness(128)");
    }
}
