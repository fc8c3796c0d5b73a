//! Software transmission over two GPIO lines.
//!
//! This backend clocks the protocol out manually: for each bit, the data
//! line is driven to the bit value and the clock line is pulsed high then
//! low. Bits go out most significant first. No delays are inserted between
//! edges; instruction timing sets the clock period, which these strips
//! accept at any rate a GPIO can produce. A transmission therefore runs to
//! completion with no mid-stream failure path of its own, and pin errors
//! are the only thing that can interrupt it.
//!
//! Use this mode when the hardware serial peripheral is unavailable or its
//! pins are spoken for.

use embedded_hal::digital::OutputPin;

use crate::transmit::Transmitter;

/// Streams wire bytes by toggling a data and a clock line.
///
/// Both pins must be push-pull outputs sharing one error type, which is the
/// case for any two pins from the same HAL.
pub struct BitBangTransmitter<DATA, CLK> {
    data: DATA,
    clock: CLK,
}

impl<DATA, CLK> BitBangTransmitter<DATA, CLK> {
    /// Takes ownership of the data and clock lines.
    pub const fn new(data: DATA, clock: CLK) -> Self {
        Self { data, clock }
    }

    /// Tears the transmitter down and returns the pins.
    #[must_use]
    pub fn release(self) -> (DATA, CLK) {
        (self.data, self.clock)
    }
}

impl<E, DATA, CLK> Transmitter for BitBangTransmitter<DATA, CLK>
where
    DATA: OutputPin<Error = E>,
    CLK: OutputPin<Error = E>,
{
    type Error = E;

    /// Parks both lines low, the idle state between transmissions.
    fn prime(&mut self) -> Result<(), Self::Error> {
        self.data.set_low()?;
        self.clock.set_low()
    }

    fn stream_byte(&mut self, byte: u8) -> Result<(), Self::Error> {
        for bit in (0..8).rev() {
            self.data.set_state(((byte & (1 << bit)) != 0).into())?;
            self.clock.set_high()?;
            self.clock.set_low()?;
        }
        Ok(())
    }

    fn finish(&mut self) -> Result<(), Self::Error> {
        Ok(())
    }
}

#[cfg(test)]
mod tests {
    extern crate std;

    use std::rc::Rc;
    use std::vec::Vec;

    use core::cell::RefCell;
    use core::convert::Infallible;

    use super::*;

    #[derive(Clone, Copy, PartialEq, Debug)]
    enum Edge {
        Data(bool),
        Clock(bool),
    }

    #[derive(Clone, Default)]
    struct Trace(Rc<RefCell<Vec<Edge>>>);

    struct TracePin {
        trace: Trace,
        is_clock: bool,
    }

    impl Trace {
        fn pins(&self) -> (TracePin, TracePin) {
            let data = TracePin {
                trace: self.clone(),
                is_clock: false,
            };
            let clock = TracePin {
                trace: self.clone(),
                is_clock: true,
            };
            (data, clock)
        }

        /// Reads the data level at each rising clock edge back into bytes.
        fn decode(&self) -> Vec<u8> {
            let mut bytes = Vec::new();
            let mut bits = 0usize;
            let mut current = 0u8;
            let mut data_level = false;
            for &edge in self.0.borrow().iter() {
                match edge {
                    Edge::Data(level) => data_level = level,
                    Edge::Clock(true) => {
                        current = (current << 1) | u8::from(data_level);
                        bits += 1;
                        if bits == 8 {
                            bytes.push(current);
                            bits = 0;
                            current = 0;
                        }
                    }
                    Edge::Clock(false) => {}
                }
            }
            assert_eq!(bits, 0, "partial byte on the wire");
            bytes
        }

        fn rising_clock_edges(&self) -> usize {
            self.0
                .borrow()
                .iter()
                .filter(|edge| matches!(edge, Edge::Clock(true)))
                .count()
        }
    }

    impl TracePin {
        fn record(&mut self, level: bool) {
            let edge = if self.is_clock {
                Edge::Clock(level)
            } else {
                Edge::Data(level)
            };
            self.trace.0.borrow_mut().push(edge);
        }
    }

    impl embedded_hal::digital::ErrorType for TracePin {
        type Error = Infallible;
    }

    impl OutputPin for TracePin {
        fn set_low(&mut self) -> Result<(), Infallible> {
            self.record(false);
            Ok(())
        }

        fn set_high(&mut self) -> Result<(), Infallible> {
            self.record(true);
            Ok(())
        }
    }

    #[test]
    fn bytes_go_out_msb_first() {
        let trace = Trace::default();
        let (data, clock) = trace.pins();
        let mut transmitter = BitBangTransmitter::new(data, clock);
        transmitter.stream_byte(0b1000_0010).unwrap();
        let edges = trace.0.borrow();
        // first bit on the wire is the most significant one
        assert_eq!(edges[0], Edge::Data(true));
        assert_eq!(edges[1], Edge::Clock(true));
        assert_eq!(edges[2], Edge::Clock(false));
        assert_eq!(edges[3], Edge::Data(false));
    }

    #[test]
    fn eight_clock_pulses_per_byte() {
        let trace = Trace::default();
        let (data, clock) = trace.pins();
        let mut transmitter = BitBangTransmitter::new(data, clock);
        transmitter.stream_byte(0xA5).unwrap();
        transmitter.stream_byte(0x00).unwrap();
        assert_eq!(trace.rising_clock_edges(), 16);
    }

    #[test]
    fn decoded_wire_bytes_match_input() {
        let trace = Trace::default();
        let (data, clock) = trace.pins();
        let mut transmitter = BitBangTransmitter::new(data, clock);
        let payload = [0x00, 0xFF, 0xA5, 0x5A, 0x81, 0x18];
        for byte in payload {
            transmitter.stream_byte(byte).unwrap();
        }
        assert_eq!(trace.decode(), payload);
    }

    #[test]
    fn prime_parks_both_lines_low() {
        let trace = Trace::default();
        let (data, clock) = trace.pins();
        let mut transmitter = BitBangTransmitter::new(data, clock);
        transmitter.prime().unwrap();
        assert_eq!(
            trace.0.borrow().as_slice(),
            &[Edge::Data(false), Edge::Clock(false)]
        );
    }

    #[test]
    fn release_returns_both_pins() {
        let trace = Trace::default();
        let (data, clock) = trace.pins();
        let transmitter = BitBangTransmitter::new(data, clock);
        let (data, clock) = transmitter.release();
        assert!(!data.is_clock);
        assert!(clock.is_clock);
    }
}
