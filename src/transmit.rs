//! The transmission seam between the strip controller and the wire.
//!
//! A [`Transmitter`] moves bytes onto the two-wire bus. The strip
//! controller decides *what* goes out (framing, color order, brightness
//! scaling); the transmitter decides *how* each byte is clocked onto the
//! wires. The crate ships a hardware implementation over an SPI bus
//! ([`SpiTransmitter`](crate::SpiTransmitter)) and a software one over two
//! GPIO lines ([`BitBangTransmitter`](crate::BitBangTransmitter)); platform
//! code can supply its own.
//!
//! The protocol is push-only. The strip never acknowledges, so a completed
//! transmission is all the confirmation there is; errors can only originate
//! in the transmitter's own hardware resources.

/// Marker written before the first pixel: 32 zero bits.
pub const START_FRAME: [u8; 4] = [0x00; 4];

/// Latch marker written after the last pixel: 32 one bits.
pub const END_FRAME: [u8; 4] = [0xFF; 4];

/// A byte-at-a-time output channel to the strip.
///
/// Implementations are driven in a fixed sequence per transmission:
/// [`prime`](Self::prime) once when the transmitter is first used, then
/// [`stream_byte`](Self::stream_byte) for every wire byte in order, then
/// [`finish`](Self::finish). The caller handles prime-once bookkeeping;
/// implementations may treat `prime` as infallible setup or a no-op.
pub trait Transmitter {
    /// Error produced by the underlying hardware resources.
    type Error;

    /// Prepares the output lines or peripheral for streaming.
    ///
    /// # Errors
    /// Propagates failures from the underlying pins or peripheral.
    fn prime(&mut self) -> Result<(), Self::Error>;

    /// Puts one byte on the wire, most significant bit first.
    ///
    /// # Errors
    /// Propagates failures from the underlying pins or peripheral.
    fn stream_byte(&mut self, byte: u8) -> Result<(), Self::Error>;

    /// Completes a transmission, flushing anything still queued.
    ///
    /// # Errors
    /// Propagates failures from the underlying pins or peripheral.
    fn finish(&mut self) -> Result<(), Self::Error>;
}
