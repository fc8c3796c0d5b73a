//! In-memory pixel storage.
//!
//! [`PixelBuffer`] owns one contiguous byte buffer holding a 3-byte triplet
//! per pixel, laid out in the strip's physical [`ColorOrder`]. All accessors
//! speak canonical RGB and translate through the order map, so callers never
//! deal with physical byte positions unless they ask for the raw buffer.
//!
//! Mutating the buffer performs no I/O. Nothing reaches the strip until the
//! buffer is transmitted.

use alloc::vec::Vec;

use smart_leds_trait::RGB8;

use crate::color::pack_rgb;
use crate::color::unpack_rgb;
use crate::ColorOrder;
use crate::DotStarError;

/// Bytes occupied by one pixel in the buffer.
pub const BYTES_PER_PIXEL: usize = 3;

/// A resizable buffer of pixel color triplets.
///
/// The buffer's byte length is always exactly three times its pixel count.
/// Out-of-range reads return black and out-of-range writes do nothing;
/// neither can touch neighboring pixels.
pub struct PixelBuffer {
    bytes: Vec<u8>,
    order: ColorOrder,
}

impl PixelBuffer {
    /// Allocates a zeroed buffer for `n` pixels in the given color order.
    ///
    /// # Errors
    /// Returns [`DotStarError::Alloc`] if the buffer cannot be allocated.
    pub fn new(n: u16, order: ColorOrder) -> Result<Self, DotStarError> {
        let mut buffer = Self {
            bytes: Vec::new(),
            order,
        };
        buffer.update_length(n)?;
        Ok(buffer)
    }

    /// Returns the number of pixels.
    #[must_use]
    pub fn len(&self) -> u16 {
        (self.bytes.len() / BYTES_PER_PIXEL) as u16
    }

    /// Returns `true` if the buffer holds no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.bytes.is_empty()
    }

    /// Returns the physical color order the buffer was built with.
    #[must_use]
    pub const fn color_order(&self) -> ColorOrder {
        self.order
    }

    /// Stores a color at pixel `n`. Out-of-range indices are ignored.
    pub fn set_pixel(&mut self, n: u16, color: RGB8) {
        let base = usize::from(n) * BYTES_PER_PIXEL;
        if base >= self.bytes.len() {
            return;
        }
        let [red, green, blue] = self.order.offsets();
        self.bytes[base + red] = color.r;
        self.bytes[base + green] = color.g;
        self.bytes[base + blue] = color.b;
    }

    /// Stores a packed `0x00RRGGBB` color at pixel `n`.
    ///
    /// See [`pack_rgb`](crate::pack_rgb) for the layout. Out-of-range
    /// indices are ignored.
    pub fn set_pixel_packed(&mut self, n: u16, color: u32) {
        self.set_pixel(n, unpack_rgb(color));
    }

    /// Reads back the color stored at pixel `n`.
    ///
    /// The value is the stored one, unaffected by brightness. Out-of-range
    /// indices read as black.
    #[must_use]
    pub fn get_pixel(&self, n: u16) -> RGB8 {
        let base = usize::from(n) * BYTES_PER_PIXEL;
        if base >= self.bytes.len() {
            return RGB8::new(0, 0, 0);
        }
        let [red, green, blue] = self.order.offsets();
        RGB8::new(
            self.bytes[base + red],
            self.bytes[base + green],
            self.bytes[base + blue],
        )
    }

    /// Reads back the color stored at pixel `n` in packed `0x00RRGGBB`
    /// form. Out-of-range indices read as 0.
    #[must_use]
    pub fn get_pixel_packed(&self, n: u16) -> u32 {
        let color = self.get_pixel(n);
        pack_rgb(color.r, color.g, color.b)
    }

    /// Turns every pixel off.
    pub fn clear(&mut self) {
        self.bytes.fill(0);
    }

    /// Sets every pixel to the same color.
    pub fn fill(&mut self, color: RGB8) {
        let [red, green, blue] = self.order.offsets();
        for pixel in self.bytes.chunks_exact_mut(BYTES_PER_PIXEL) {
            pixel[red] = color.r;
            pixel[green] = color.g;
            pixel[blue] = color.b;
        }
    }

    /// Returns the raw buffer in physical byte order.
    ///
    /// Bytes appear in the strip's color order, not canonical RGB. Intended
    /// for bulk transfers; pair it with [`color_order`](Self::color_order)
    /// to interpret the triplets.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        &self.bytes
    }

    /// Returns the raw buffer mutably, for bulk writes.
    ///
    /// The caller is responsible for honoring the physical color order and
    /// 3-byte pixel boundaries.
    #[must_use]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        &mut self.bytes
    }

    /// Resizes the buffer to hold `n` pixels.
    ///
    /// Pixels below `min(old, new)` keep their colors; pixels added by
    /// growth start black. On failure the buffer is left at its previous
    /// length.
    ///
    /// # Errors
    /// Returns [`DotStarError::Alloc`] if the grown buffer cannot be
    /// allocated.
    pub fn update_length(&mut self, n: u16) -> Result<(), DotStarError> {
        let new_len = usize::from(n) * BYTES_PER_PIXEL;
        if let Some(additional) = new_len.checked_sub(self.bytes.len()) {
            self.bytes.try_reserve_exact(additional)?;
        }
        self.bytes.resize(new_len, 0);
        Ok(())
    }
}

impl core::fmt::Debug for PixelBuffer {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("PixelBuffer")
            .field("len", &self.len())
            .field("order", &self.order)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "defmt")]
impl defmt::Format for PixelBuffer {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "PixelBuffer {{ len: {=u16}, order: {} }}",
            self.len(),
            self.order
        );
    }
}
