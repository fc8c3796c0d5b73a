//! The strip controller.
//!
//! [`DotStar`] owns the pixel buffer, the global brightness, and one
//! transmitter, and is the type applications hold on to. Pixel and
//! brightness updates are plain memory writes; nothing touches the wire
//! until [`show`](DotStar::show) streams the whole strip out in one
//! blocking pass. A controller is single-owner state with no interior
//! locking: share it across contexts with whatever mutual exclusion the
//! platform provides.
//!
//! # Example
//! ```
//! use dotstar::ColorOrder;
//! use dotstar::DotStar;
//! use dotstar::RGB8;
//! # use core::convert::Infallible;
//! # struct NullLink;
//! # impl dotstar::Transmitter for NullLink {
//! #     type Error = Infallible;
//! #     fn prime(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn stream_byte(&mut self, _byte: u8) -> Result<(), Infallible> { Ok(()) }
//! #     fn finish(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//!
//! let mut strip = DotStar::new(8, ColorOrder::Bgr, NullLink).unwrap();
//! strip.fill(RGB8::new(0, 64, 0));
//! strip.set_pixel(0, RGB8::new(255, 0, 0));
//! strip.set_brightness(96);
//! strip.show().unwrap();
//! ```

use embedded_hal::digital::OutputPin;
use embedded_hal::spi::SpiBus;
use smart_leds_trait::SmartLedsWrite;
use smart_leds_trait::RGB8;

use crate::bitbang::BitBangTransmitter;
use crate::brightness::scale8;
use crate::brightness::Brightness;
use crate::buffer::PixelBuffer;
use crate::spi::SpiTransmitter;
use crate::transmit::Transmitter;
use crate::transmit::END_FRAME;
use crate::transmit::START_FRAME;
use crate::ColorOrder;
use crate::DotStarError;

/// A two-wire addressable LED strip.
///
/// Generic over the [`Transmitter`] that moves bytes to the hardware; see
/// [`new_spi`](Self::new_spi) and [`new_bitbang`](Self::new_bitbang) for
/// the two built-in modes.
pub struct DotStar<T: Transmitter> {
    buffer: PixelBuffer,
    brightness: Brightness,
    transmitter: T,
    primed: bool,
}

impl<T: Transmitter> DotStar<T> {
    /// Creates a strip of `n` pixels driven through `transmitter`.
    ///
    /// All pixels start black and brightness starts at full.
    ///
    /// # Errors
    /// Returns [`DotStarError::Alloc`] if the pixel buffer cannot be
    /// allocated.
    pub fn new(n: u16, order: ColorOrder, transmitter: T) -> Result<Self, DotStarError> {
        Ok(Self {
            buffer: PixelBuffer::new(n, order)?,
            brightness: Brightness::default(),
            transmitter,
            primed: false,
        })
    }

    /// Transmits the entire strip state.
    ///
    /// Blocks until done; duration grows linearly with the pixel count. On
    /// first use of a transmitter this primes it once; later calls skip
    /// straight to streaming. The wire stream is the start frame, every
    /// pixel's three bytes in physical order with brightness applied, then
    /// the latch frame. At full brightness the pixel bytes go out exactly
    /// as stored.
    ///
    /// # Errors
    /// Propagates the transmitter's hardware error. A failed priming is
    /// retried on the next call.
    pub fn show(&mut self) -> Result<(), T::Error> {
        if !self.primed {
            self.transmitter.prime()?;
            self.primed = true;
        }
        for byte in START_FRAME {
            self.transmitter.stream_byte(byte)?;
        }
        match self.brightness.scale() {
            None => {
                for &byte in self.buffer.bytes() {
                    self.transmitter.stream_byte(byte)?;
                }
            }
            Some(scale) => {
                for &byte in self.buffer.bytes() {
                    self.transmitter.stream_byte(scale8(byte, scale))?;
                }
            }
        }
        for byte in END_FRAME {
            self.transmitter.stream_byte(byte)?;
        }
        self.transmitter.finish()
    }

    /// Swaps in a different transmitter, returning the old one.
    ///
    /// This is the mode/pin reconfiguration path: move a strip from the
    /// hardware bus to bit-banged pins (or back, or to fresh pins) without
    /// disturbing its pixel data or brightness. The old transmitter is torn
    /// down first in the sense that it is fully relinquished before the new
    /// one is touched; the new one is primed on the next
    /// [`show`](Self::show).
    #[must_use]
    pub fn replace_transmitter<U: Transmitter>(self, transmitter: U) -> (DotStar<U>, T) {
        #[cfg(feature = "defmt")]
        defmt::debug!("transmitter replaced, priming deferred to next show");
        #[cfg(feature = "log")]
        log::debug!("transmitter replaced, priming deferred to next show");
        let strip = DotStar {
            buffer: self.buffer,
            brightness: self.brightness,
            transmitter,
            primed: false,
        };
        (strip, self.transmitter)
    }

    /// Tears the strip down and returns the transmitter.
    #[must_use]
    pub fn release(self) -> T {
        self.transmitter
    }

    /// Stores a color at pixel `n`. Out-of-range indices are ignored.
    pub fn set_pixel(&mut self, n: u16, color: RGB8) {
        self.buffer.set_pixel(n, color);
    }

    /// Stores a packed `0x00RRGGBB` color at pixel `n`. Out-of-range
    /// indices are ignored.
    pub fn set_pixel_packed(&mut self, n: u16, color: u32) {
        self.buffer.set_pixel_packed(n, color);
    }

    /// Reads back the stored (unscaled) color of pixel `n`; black when out
    /// of range.
    #[must_use]
    pub fn get_pixel(&self, n: u16) -> RGB8 {
        self.buffer.get_pixel(n)
    }

    /// Reads back the stored color of pixel `n` in packed `0x00RRGGBB`
    /// form; 0 when out of range.
    #[must_use]
    pub fn get_pixel_packed(&self, n: u16) -> u32 {
        self.buffer.get_pixel_packed(n)
    }

    /// Turns every pixel off in the buffer.
    pub fn clear(&mut self) {
        self.buffer.clear();
    }

    /// Sets every pixel in the buffer to the same color.
    pub fn fill(&mut self, color: RGB8) {
        self.buffer.fill(color);
    }

    /// Returns the number of pixels.
    #[must_use]
    pub fn len(&self) -> u16 {
        self.buffer.len()
    }

    /// Returns `true` if the strip has no pixels.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.buffer.is_empty()
    }

    /// Returns the physical color order of the buffer.
    #[must_use]
    pub const fn color_order(&self) -> ColorOrder {
        self.buffer.color_order()
    }

    /// Returns the raw pixel buffer in physical byte order.
    #[must_use]
    pub fn bytes(&self) -> &[u8] {
        self.buffer.bytes()
    }

    /// Returns the raw pixel buffer mutably, for bulk writes in physical
    /// byte order.
    #[must_use]
    pub fn bytes_mut(&mut self) -> &mut [u8] {
        self.buffer.bytes_mut()
    }

    /// Resizes the strip, keeping the first `min(old, new)` pixels and
    /// zero-filling growth.
    ///
    /// # Errors
    /// Returns [`DotStarError::Alloc`] if the grown buffer cannot be
    /// allocated; the strip then keeps its previous length.
    pub fn update_length(&mut self, n: u16) -> Result<(), DotStarError> {
        self.buffer.update_length(n)?;
        #[cfg(feature = "defmt")]
        defmt::debug!("strip length now {=u16} pixels", n);
        #[cfg(feature = "log")]
        log::debug!("strip length now {n} pixels");
        Ok(())
    }

    /// Sets the global brightness, 0 = off, 255 = full.
    ///
    /// Stored pixel data is never modified; the level is applied to the
    /// bytes of the next transmission.
    pub fn set_brightness(&mut self, level: u8) {
        self.brightness.set(level);
    }

    /// Returns the brightness level previously set.
    #[must_use]
    pub fn get_brightness(&self) -> u8 {
        self.brightness.get()
    }
}

impl<SPI> DotStar<SpiTransmitter<SPI>>
where
    SPI: SpiBus,
{
    /// Creates a strip in hardware mode, driven through an SPI bus.
    ///
    /// The bus should be configured for [`MODE`](crate::spi::MODE).
    ///
    /// # Errors
    /// Returns [`DotStarError::Alloc`] if the pixel buffer cannot be
    /// allocated.
    pub fn new_spi(n: u16, order: ColorOrder, spi: SPI) -> Result<Self, DotStarError> {
        Self::new(n, order, SpiTransmitter::new(spi))
    }
}

impl<E, DATA, CLK> DotStar<BitBangTransmitter<DATA, CLK>>
where
    DATA: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
{
    /// Creates a strip in software mode, bit-banged over two GPIO lines.
    ///
    /// # Errors
    /// Returns [`DotStarError::Alloc`] if the pixel buffer cannot be
    /// allocated.
    pub fn new_bitbang(
        n: u16,
        order: ColorOrder,
        data: DATA,
        clock: CLK,
    ) -> Result<Self, DotStarError> {
        Self::new(n, order, BitBangTransmitter::new(data, clock))
    }
}

impl<T: Transmitter> SmartLedsWrite for DotStar<T> {
    type Error = T::Error;
    type Color = RGB8;

    /// Fills the strip from an iterator of colors and transmits.
    ///
    /// Missing trailing colors are written as black; items beyond the pixel
    /// count are ignored.
    fn write<I, C>(&mut self, iterator: I) -> Result<(), Self::Error>
    where
        I: IntoIterator<Item = C>,
        C: Into<Self::Color>,
    {
        let mut colors = iterator.into_iter();
        for n in 0..self.buffer.len() {
            let color = colors.next().map_or(RGB8::new(0, 0, 0), Into::into);
            self.buffer.set_pixel(n, color);
        }
        self.show()
    }
}

impl<T: Transmitter> core::fmt::Debug for DotStar<T> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        f.debug_struct("DotStar")
            .field("len", &self.buffer.len())
            .field("order", &self.buffer.color_order())
            .field("brightness", &self.brightness)
            .field("primed", &self.primed)
            .finish_non_exhaustive()
    }
}

#[cfg(feature = "defmt")]
impl<T: Transmitter> defmt::Format for DotStar<T> {
    fn format(&self, f: defmt::Formatter) {
        defmt::write!(
            f,
            "DotStar {{ len: {=u16}, order: {}, brightness: {}, primed: {=bool} }}",
            self.buffer.len(),
            self.buffer.color_order(),
            self.brightness,
            self.primed
        );
    }
}
