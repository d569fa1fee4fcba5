//! Hardware capability consumed by the dispatcher.
//!
//! Pin numbers, modes, and levels are passed through unchanged, so their
//! meaning is whatever the board's pin layer defines. The constants below
//! are the conventional values the host tooling uses.

pub const INPUT: u8 = 0x0;
pub const OUTPUT: u8 = 0x1;
pub const INPUT_PULLUP: u8 = 0x2;

pub const LOW: u8 = 0x0;
pub const HIGH: u8 = 0x1;

pub const A0: u8 = 14;
pub const A1: u8 = 15;
pub const A2: u8 = 16;
pub const A3: u8 = 17;
pub const A4: u8 = 18;
pub const A5: u8 = 19;
pub const A6: u8 = 20;
pub const A7: u8 = 21;

/// Synchronous, infallible pin operations addressed by pin number.
///
/// Pin configuration persists in the implementer, never in the dispatcher.
pub trait PinIo {
    /// Set the direction/mode of a pin.
    fn set_pin_mode(&mut self, pin: u8, mode: u8);

    /// Drive a pin high or low.
    fn write_digital(&mut self, pin: u8, value: u8);

    /// Read the level of a pin.
    fn read_digital(&mut self, pin: u8) -> u8;

    /// Drive the PWM duty cycle of a pin.
    fn write_analog(&mut self, pin: u8, duty: u8);

    /// Read the analog level of a pin.
    fn read_analog(&mut self, pin: u8) -> u16;
}

impl<T: PinIo + ?Sized> PinIo for &mut T {
    #[inline]
    fn set_pin_mode(&mut self, pin: u8, mode: u8) {
        (**self).set_pin_mode(pin, mode)
    }

    #[inline]
    fn write_digital(&mut self, pin: u8, value: u8) {
        (**self).write_digital(pin, value)
    }

    #[inline]
    fn read_digital(&mut self, pin: u8) -> u8 {
        (**self).read_digital(pin)
    }

    #[inline]
    fn write_analog(&mut self, pin: u8, duty: u8) {
        (**self).write_analog(pin, duty)
    }

    #[inline]
    fn read_analog(&mut self, pin: u8) -> u16 {
        (**self).read_analog(pin)
    }
}
