//! Seconds readout from a BCD real-time-clock peripheral.
//!
//! Provides [`RtcClock`], a driver for DS3231-style clock chips that exposes
//! the seconds register over I2C, and the [`SecondsClock`] trait that lets the
//! game runner take any seconds source (or none at all via [`NoRtc`]).
//!
//! The readout is auxiliary: the game's elapsed-time measurement always comes
//! from the monotonic tick counter, never from this clock.

use core::fmt::Debug;

use embedded_hal::i2c::I2c;

/// Factory-default 7-bit bus address of DS3231-style clock chips.
pub const DS3231_ADDRESS: u8 = 0x68;

/// Register offset of the seconds register.
pub const SECONDS_REGISTER: u8 = 0x00;

/// Bit 7 of the seconds register is the clock-halt flag, not part of the
/// BCD value.
const CLOCK_HALT_MASK: u8 = 0x7F;

/// Decodes the raw seconds register byte into a decimal seconds count.
///
/// The register holds binary-coded decimal: bits 4-6 are the tens digit,
/// bits 0-3 the ones digit. Bit 7 (the clock-halt flag) is masked off and
/// never influences the result.
///
/// The tens digit is extracted with the full 3-bit field mask (`0x07`), so a
/// chip reporting an out-of-range tens digit of 6 or 7 decodes to 60-79
/// rather than being clamped to the valid 0-59 range. Callers see exactly
/// what the clock encoded.
pub fn decode_seconds(raw: u8) -> u8 {
    let bcd = raw & CLOCK_HALT_MASK;
    let tens = (bcd >> 4) & 0x07;
    let ones = bcd & 0x0F;
    tens * 10 + ones
}

/// Errors that can occur while talking to the clock peripheral.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum RtcError<E> {
    /// The bus transaction failed (no acknowledge, timeout, ...).
    ///
    /// Deliberately distinct from a successful zero-seconds readout: a clock
    /// that cannot be reached never reports as midnight.
    Bus(E),
}

impl<E: Debug> core::fmt::Display for RtcError<E> {
    fn fmt(&self, f: &mut core::fmt::Formatter<'_>) -> core::fmt::Result {
        match self {
            RtcError::Bus(err) => write!(f, "clock bus read failed: {:?}", err),
        }
    }
}

#[cfg(feature = "std")]
impl<E: Debug> std::error::Error for RtcError<E> {}

/// Trait for auxiliary wall-clock seconds sources.
///
/// Implemented by [`RtcClock`] for real hardware; test code substitutes a
/// scripted fake.
pub trait SecondsClock {
    /// Error produced by a failed readout.
    type Error: Debug;

    /// Returns the current seconds-of-minute value, 0-59 for a well-formed
    /// clock.
    fn read_seconds(&mut self) -> Result<u8, Self::Error>;
}

/// Placeholder seconds source for games run without a clock peripheral.
///
/// Uninhabited: it can never be constructed, so a runner parameterized over
/// it provably performs no auxiliary reads.
pub enum NoRtc {}

impl SecondsClock for NoRtc {
    type Error = core::convert::Infallible;

    fn read_seconds(&mut self) -> Result<u8, Self::Error> {
        match *self {}
    }
}

/// Driver for the seconds register of a DS3231-style real-time clock.
pub struct RtcClock<I2C> {
    i2c: I2C,
    address: u8,
}

impl<I2C: I2c> RtcClock<I2C> {
    /// Creates a driver at the factory-default bus address.
    pub fn new(i2c: I2C) -> Self {
        Self::with_address(i2c, DS3231_ADDRESS)
    }

    /// Creates a driver at a non-default bus address.
    pub fn with_address(i2c: I2C, address: u8) -> Self {
        Self { i2c, address }
    }

    /// Fetches the raw seconds register byte, clock-halt flag included.
    pub fn read_seconds_register(&mut self) -> Result<u8, RtcError<I2C::Error>> {
        let mut buffer = [0u8; 1];
        self.i2c
            .write_read(self.address, &[SECONDS_REGISTER], &mut buffer)
            .map_err(RtcError::Bus)?;
        Ok(buffer[0])
    }

    /// Consumes the driver, handing the bus back.
    pub fn release(self) -> I2C {
        self.i2c
    }
}

impl<I2C: I2c> SecondsClock for RtcClock<I2C> {
    type Error = RtcError<I2C::Error>;

    fn read_seconds(&mut self) -> Result<u8, Self::Error> {
        self.read_seconds_register().map(decode_seconds)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use embedded_hal::i2c::{ErrorKind, ErrorType, Operation};
    extern crate std;
    use std::format;

    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    struct BusFault;

    impl embedded_hal::i2c::Error for BusFault {
        fn kind(&self) -> ErrorKind {
            ErrorKind::Other
        }
    }

    // Bus with a single readable register; records what was addressed
    struct FakeBus {
        register: u8,
        last_address: Option<u8>,
        last_register: Option<u8>,
    }

    impl FakeBus {
        fn new(register: u8) -> Self {
            Self {
                register,
                last_address: None,
                last_register: None,
            }
        }
    }

    impl ErrorType for FakeBus {
        type Error = BusFault;
    }

    impl I2c for FakeBus {
        fn transaction(
            &mut self,
            address: u8,
            operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            self.last_address = Some(address);
            for operation in operations.iter_mut() {
                match operation {
                    Operation::Write(bytes) => {
                        self.last_register = bytes.first().copied();
                    }
                    Operation::Read(buffer) => {
                        for byte in buffer.iter_mut() {
                            *byte = self.register;
                        }
                    }
                }
            }
            Ok(())
        }
    }

    struct FailingBus;

    impl ErrorType for FailingBus {
        type Error = BusFault;
    }

    impl I2c for FailingBus {
        fn transaction(
            &mut self,
            _address: u8,
            _operations: &mut [Operation<'_>],
        ) -> Result<(), Self::Error> {
            Err(BusFault)
        }
    }

    #[test]
    fn decodes_plain_bcd() {
        assert_eq!(decode_seconds(0x00), 0);
        assert_eq!(decode_seconds(0x09), 9);
        assert_eq!(decode_seconds(0x10), 10);
        assert_eq!(decode_seconds(0x45), 45);
        assert_eq!(decode_seconds(0x59), 59);
    }

    #[test]
    fn clock_halt_flag_never_influences_the_value() {
        for byte in 0x00..=0x7Fu8 {
            assert_eq!(decode_seconds(byte | 0x80), decode_seconds(byte));
        }
    }

    #[test]
    fn decode_matches_nibble_arithmetic_for_all_masked_bytes() {
        for byte in 0x00..=0x7Fu8 {
            let expected = 10 * ((byte >> 4) & 0x07) + (byte & 0x0F);
            assert_eq!(decode_seconds(byte), expected);
        }
    }

    #[test]
    fn malformed_tens_digits_pass_through_unclamped() {
        // Tens field is three bits wide, so 6 and 7 decode past 59 instead
        // of being clamped.
        assert_eq!(decode_seconds(0x60), 60);
        assert_eq!(decode_seconds(0x75), 75);
        assert_eq!(decode_seconds(0x7F), 85);
    }

    #[test]
    fn reads_the_seconds_register_at_the_default_address() {
        let mut clock = RtcClock::new(FakeBus::new(0x45));
        assert_eq!(clock.read_seconds().unwrap(), 45);

        let bus = clock.release();
        assert_eq!(bus.last_address, Some(DS3231_ADDRESS));
        assert_eq!(bus.last_register, Some(SECONDS_REGISTER));
    }

    #[test]
    fn raw_register_readout_keeps_the_halt_flag() {
        let mut clock = RtcClock::new(FakeBus::new(0xC5));
        assert_eq!(clock.read_seconds_register().unwrap(), 0xC5);
        assert_eq!(clock.read_seconds().unwrap(), 45);
    }

    #[test]
    fn custom_address_is_used_on_the_bus() {
        let mut clock = RtcClock::with_address(FakeBus::new(0x12), 0x51);
        clock.read_seconds().unwrap();
        assert_eq!(clock.release().last_address, Some(0x51));
    }

    #[test]
    fn bus_failure_surfaces_as_a_communication_error() {
        let mut clock = RtcClock::new(FailingBus);
        assert_eq!(clock.read_seconds(), Err(RtcError::Bus(BusFault)));
    }

    #[test]
    fn error_messages_format_correctly_for_display() {
        let error = RtcError::Bus(BusFault);
        let error_str = format!("{}", error);
        assert!(error_str.contains("bus read failed"));
    }
}
