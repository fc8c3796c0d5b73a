//! Platform-agnostic driver for two-wire addressable RGB LED strips of the
//! APA102/DotStar family.
//!
//! These strips take a clock line and a data line. Each pixel stores a
//! 3-byte color triplet in a strip-specific physical order, and the whole
//! strip is rewritten in one pass: pixel and brightness updates happen in
//! memory, then [`DotStar::show`] streams the buffer out. Global brightness
//! is applied to the outgoing bytes only, so stored colors never degrade
//! from repeated brightness changes.
//!
//! # Wire format
//! A transmission is, in order:
//! 1. A start frame of 32 zero bits
//! 2. Three bytes per pixel in the strip's physical [`ColorOrder`], with
//!    brightness applied
//! 3. A latch frame of 32 one bits
//!
//! # Transmission modes
//! Byte delivery is pluggable through the [`Transmitter`] trait:
//! - [`SpiTransmitter`] drives the strip from a hardware SPI bus
//!   ([`DotStar::new_spi`])
//! - [`BitBangTransmitter`] toggles two GPIO lines directly
//!   ([`DotStar::new_bitbang`])
//!
//! Both sit behind [`embedded-hal`](embedded_hal) traits, so any HAL that
//! provides an `SpiBus` or two `OutputPin`s can drive a strip.
//!
//! # Example
//! ```
//! use dotstar::ColorOrder;
//! use dotstar::DotStar;
//! use dotstar::RGB8;
//! # use core::convert::Infallible;
//! # struct Pin;
//! # impl embedded_hal::digital::ErrorType for Pin { type Error = Infallible; }
//! # impl embedded_hal::digital::OutputPin for Pin {
//! #     fn set_low(&mut self) -> Result<(), Infallible> { Ok(()) }
//! #     fn set_high(&mut self) -> Result<(), Infallible> { Ok(()) }
//! # }
//!
//! // Pin and Pin are any two embedded-hal output pins.
//! let mut strip = DotStar::new_bitbang(30, ColorOrder::Bgr, Pin, Pin).unwrap();
//! strip.set_pixel(0, RGB8::new(255, 0, 0));
//! strip.set_brightness(32);
//! strip.show().unwrap();
//! ```
//!
//! # Feature flags
//! - `defmt`: `defmt::Format` impls on the public types and `defmt` debug
//!   output at reconfiguration points.
//! - `log`: the same debug output through the `log` facade.
//!
//! Both are off by default.

#![no_std]
#![warn(missing_docs)]
#![warn(clippy::all)]
#![warn(clippy::pedantic)]
#![allow(clippy::cast_possible_truncation)]
#![allow(clippy::module_name_repetitions)]

extern crate alloc;

use alloc::collections::TryReserveError;

pub mod bitbang;
pub mod brightness;
pub mod buffer;
pub mod color;
pub mod spi;
pub mod strip;
pub mod transmit;

pub use bitbang::BitBangTransmitter;
pub use brightness::Brightness;
pub use buffer::PixelBuffer;
pub use color::pack_rgb;
pub use color::unpack_rgb;
pub use color::ColorOrder;
pub use smart_leds_trait::SmartLedsWrite;
pub use smart_leds_trait::RGB8;
pub use spi::SpiTransmitter;
pub use strip::DotStar;
pub use transmit::Transmitter;

/// Errors from strip construction and buffer reconfiguration.
///
/// The wire protocol is push-only with no acknowledgment from the strip, so
/// transmission defines no errors of its own; hardware failures surface
/// through [`Transmitter::Error`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum DotStarError {
    /// The pixel buffer could not be allocated.
    Alloc(TryReserveError),
}

impl From<TryReserveError> for DotStarError {
    fn from(err: TryReserveError) -> Self {
        Self::Alloc(err)
    }
}

impl core::fmt::Display for DotStarError {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            Self::Alloc(_) => f.write_str("pixel buffer allocation failed"),
        }
    }
}

impl core::error::Error for DotStarError {}

#[cfg(feature = "defmt")]
impl defmt::Format for DotStarError {
    fn format(&self, f: defmt::Formatter) {
        match self {
            Self::Alloc(_) => defmt::write!(f, "DotStarError::Alloc"),
        }
    }
}
