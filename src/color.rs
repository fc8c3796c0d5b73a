//! Color ordering and logical color packing.
//!
//! Strips in this family store each pixel as a 3-byte triplet, but the
//! physical position of the red, green, and blue bytes inside the triplet
//! varies by strip model. [`ColorOrder`] names the six possible layouts and
//! maps each channel to its byte position. The mapping only affects how
//! bytes land in the buffer: the API boundary always speaks canonical RGB.
//!
//! A layout can also be exchanged as a packed one-byte descriptor, with two
//! bits per channel holding that channel's byte position:
//! - Bits 0-1: position of red
//! - Bits 2-3: position of green
//! - Bits 4-5: position of blue
//! - Bits 6-7: unused, must be zero

use bitfield::bitfield;
use smart_leds_trait::RGB8;

/// Bits of a descriptor byte that carry channel positions.
const CODE_MASK: u8 = 0x3F;

bitfield! {
    /// A packed color-order descriptor byte.
    ///
    /// Each 2-bit field holds the physical byte position (0-2) of one
    /// channel within a pixel triplet.
    #[derive(Clone, Copy, Default, PartialEq)]
    #[repr(transparent)]
    struct Descriptor(u8);
    impl Debug;
    red_pos, set_red_pos: 1, 0;
    green_pos, set_green_pos: 3, 2;
    blue_pos, set_blue_pos: 5, 4;
}

/// Physical byte layout of one pixel triplet.
///
/// The variant name lists the channels in their physical byte order. `Bgr`
/// is the layout used by the common strips this driver targets and is the
/// default.
///
/// # Example
/// ```
/// use dotstar::ColorOrder;
///
/// let order = ColorOrder::Grb;
/// assert_eq!(order.offsets(), [1, 0, 2]);
/// assert_eq!(ColorOrder::from_code(order.code()), Some(order));
/// ```
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub enum ColorOrder {
    /// Red, green, blue.
    Rgb,
    /// Red, blue, green.
    Rbg,
    /// Green, red, blue.
    Grb,
    /// Green, blue, red.
    Gbr,
    /// Blue, red, green.
    Brg,
    /// Blue, green, red.
    #[default]
    Bgr,
}

impl ColorOrder {
    /// Returns the byte position of red, green, and blue (in that order)
    /// within a pixel triplet.
    #[must_use]
    pub const fn offsets(self) -> [usize; 3] {
        match self {
            Self::Rgb => [0, 1, 2],
            Self::Rbg => [0, 2, 1],
            Self::Grb => [1, 0, 2],
            Self::Gbr => [2, 0, 1],
            Self::Brg => [1, 2, 0],
            Self::Bgr => [2, 1, 0],
        }
    }

    /// Packs this layout into its one-byte descriptor form.
    #[must_use]
    pub fn code(self) -> u8 {
        let [red, green, blue] = self.offsets();
        let mut descriptor = Descriptor::default();
        descriptor.set_red_pos(red as u8);
        descriptor.set_green_pos(green as u8);
        descriptor.set_blue_pos(blue as u8);
        descriptor.0
    }

    /// Decodes a packed descriptor byte.
    ///
    /// Returns `None` unless the three decoded positions form a permutation
    /// of `{0, 1, 2}` and the unused high bits are zero.
    #[must_use]
    pub fn from_code(code: u8) -> Option<Self> {
        if code & !CODE_MASK != 0 {
            return None;
        }
        let descriptor = Descriptor(code);
        match (
            descriptor.red_pos(),
            descriptor.green_pos(),
            descriptor.blue_pos(),
        ) {
            (0, 1, 2) => Some(Self::Rgb),
            (0, 2, 1) => Some(Self::Rbg),
            (1, 0, 2) => Some(Self::Grb),
            (2, 0, 1) => Some(Self::Gbr),
            (1, 2, 0) => Some(Self::Brg),
            (2, 1, 0) => Some(Self::Bgr),
            _ => None,
        }
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for ColorOrder {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Rgb => defmt::write!(f, "Rgb"),
            Self::Rbg => defmt::write!(f, "Rbg"),
            Self::Grb => defmt::write!(f, "Grb"),
            Self::Gbr => defmt::write!(f, "Gbr"),
            Self::Brg => defmt::write!(f, "Brg"),
            Self::Bgr => defmt::write!(f, "Bgr"),
        }
    }
}

/// Packs three 8-bit channels into one logical color value.
///
/// The layout is fixed regardless of the strip's physical color order:
/// bits 16-23 hold red, bits 8-15 green, bits 0-7 blue.
///
/// # Example
/// ```
/// assert_eq!(dotstar::pack_rgb(255, 0, 0), 0xFF0000);
/// ```
#[must_use]
#[allow(clippy::cast_lossless)]
pub const fn pack_rgb(red: u8, green: u8, blue: u8) -> u32 {
    ((red as u32) << 16) | ((green as u32) << 8) | (blue as u32)
}

/// Splits a packed logical color value back into its channels.
///
/// Inverse of [`pack_rgb`]; bits 24-31 are ignored.
#[must_use]
pub const fn unpack_rgb(color: u32) -> RGB8 {
    RGB8::new((color >> 16) as u8, (color >> 8) as u8, color as u8)
}
