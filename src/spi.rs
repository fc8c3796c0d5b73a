//! Hardware transmission over a synchronous serial peripheral.
//!
//! This backend hands every wire byte to an [`SpiBus`], letting the
//! peripheral generate the clock. Only the clock and MOSI lines are
//! physically connected to the strip; nothing is ever read back.
//!
//! The bus arrives already configured by the platform. Configure it for
//! [`MODE`] (clock idle low, data sampled on the rising edge) at whatever
//! frequency the strip's signal path tolerates.
//!
//! # Example
//! ```rust,ignore
//! let spi = platform_spi_bus(); // any embedded-hal SpiBus
//! let mut strip = DotStar::new_spi(30, ColorOrder::Bgr, spi)?;
//! ```

use embedded_hal::spi::Mode;
use embedded_hal::spi::SpiBus;
use embedded_hal::spi::MODE_0;

use crate::transmit::Transmitter;

/// SPI mode the strip expects from the bus.
pub const MODE: Mode = MODE_0;

/// Streams wire bytes through a hardware SPI peripheral.
pub struct SpiTransmitter<SPI> {
    spi: SPI,
}

impl<SPI> SpiTransmitter<SPI> {
    /// Wraps a configured bus.
    pub const fn new(spi: SPI) -> Self {
        Self { spi }
    }

    /// Tears the transmitter down and returns the bus.
    #[must_use]
    pub fn release(self) -> SPI {
        self.spi
    }
}

impl<SPI> Transmitter for SpiTransmitter<SPI>
where
    SPI: SpiBus,
{
    type Error = SPI::Error;

    /// The peripheral needs no per-use setup; priming is a no-op.
    fn prime(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }

    fn stream_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        self.spi.write(&[byte])
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        self.spi.flush()
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::vec::Vec;

    use core::convert::Infallible;

    use super::*;

    #[derive(Default)]
    struct RecordingBus {
        written: Vec<u8>,
        flushes: usize,
    }

    impl embedded_hal::spi::ErrorType for RecordingBus {
        type Error = Infallible;
    }

    impl SpiBus for RecordingBus {
        fn read(&mut self, words: &mut [u8]) -> Result<(), Infallible> {
            words.fill(0);
            Ok(())
        }

        fn write(&mut self, words: &[u8]) -> Result<(), Infallible> {
            self.written.extend_from_slice(words);
            Ok(())
        }

        fn transfer(&mut self, read: &mut [u8], write: &[u8]) -> Result<(), Infallible> {
            read.fill(0);
            self.written.extend_from_slice(write);
            Ok(())
        }

        fn transfer_in_place(&mut self, words: &mut [u8]) -> Result<(), Infallible> {
            self.written.extend_from_slice(words);
            words.fill(0);
            Ok(())
        }

        fn flush(&mut self) -> Result<(), Infallible> {
            self.flushes += 1;
            Ok(())
        }
    }

    #[test]
    fn bytes_pass_through_unchanged() {
        let mut transmitter = SpiTransmitter::new(RecordingBus::default());
        transmitter.prime().unwrap();
        for byte in [0x00, 0x5A, 0xFF] {
            transmitter.stream_byte(byte).unwrap();
        }
        let bus = transmitter.release();
        assert_eq!(bus.written, [0x00, 0x5A, 0xFF]);
    }

    #[test]
    fn finish_flushes_the_bus() {
        let mut transmitter = SpiTransmitter::new(RecordingBus::default());
        transmitter.stream_byte(0x42).unwrap();
        transmitter.finish().unwrap();
        let bus = transmitter.release();
        assert_eq!(bus.flushes, 1);
    }

    #[test]
    fn expected_mode_idles_low_and_samples_on_rise() {
        use embedded_hal::spi::Phase;
        use embedded_hal::spi::Polarity;

        assert_eq!(MODE.polarity, Polarity::IdleLow);
        assert_eq!(MODE.phase, Phase::CaptureOnFirstTransition);
    }
}
