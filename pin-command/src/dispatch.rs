//! Single-byte opcode dispatch.
//!
//! ```text
//! command: [opcode] [payload ..]
//! reply:   [opcode] [status] [data ..]    opcode is registered
//!          [ERR_NO_COMMAND]               otherwise
//! ```

use macros::opcodes;

use crate::{pins::PinIo, status::Status};

/// Echoed opcode, status, and up to two data bytes.
pub const MAX_REPLY_LEN: usize = 4;

/// Caller-owned reply buffer, large enough for any reply.
pub type Reply = [u8; MAX_REPLY_LEN];

/// One handler per [`Opcode`].
///
/// A handler receives the payload with the opcode stripped and the reply
/// buffer past the echoed opcode. It returns the number of bytes it wrote,
/// starting with a status byte.
pub trait Handlers {
    fn pin_mode(&mut self, payload: &[u8], reply: &mut [u8]) -> usize;
    fn digital_write(&mut self, payload: &[u8], reply: &mut [u8]) -> usize;
    fn digital_read(&mut self, payload: &[u8], reply: &mut [u8]) -> usize;
    fn analog_write(&mut self, payload: &[u8], reply: &mut [u8]) -> usize;
    fn analog_read(&mut self, payload: &[u8], reply: &mut [u8]) -> usize;
}

#[opcodes(Handlers)]
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Opcode {
    /// `[pin, mode]` -> `[status]`
    PinMode = 0x01,
    /// `[pin, value]` -> `[status]`
    DigitalWrite = 0x02,
    /// `[pin]` -> `[status, value]`
    DigitalRead = 0x03,
    /// `[pin, duty]` -> `[status]`
    AnalogWrite = 0x04,
    /// `[pin]` -> `[status, low, high]`
    AnalogRead = 0x05,
}

/// Write a status followed by result data.
fn respond(reply: &mut [u8], status: Status, data: &[u8]) -> usize {
    reply[0] = status.into();
    reply[1..=data.len()].copy_from_slice(data);

    1 + data.len()
}

/// Routes commands to the pins it owns.
///
/// Stateless across calls: a malformed command only affects its own reply.
pub struct Dispatcher<P: PinIo> {
    pins: P,
}

impl<P: PinIo> Dispatcher<P> {
    pub const fn new(pins: P) -> Self {
        Self { pins }
    }

    #[inline]
    pub fn pins(&self) -> &P {
        &self.pins
    }

    #[inline]
    pub fn pins_mut(&mut self) -> &mut P {
        &mut self.pins
    }

    /// Give back the pins.
    pub fn release(self) -> P {
        self.pins
    }

    /// Execute a command and fill in the reply.
    ///
    /// Returns the length of the reply. Unknown opcodes, including an
    /// empty command, produce `[ERR_NO_COMMAND]` without touching the pins.
    pub fn dispatch(&mut self, command: &[u8], reply: &mut Reply) -> usize {
        let Some((&byte, payload)) = command.split_first() else {
            reply[0] = Status::NoCommand.into();
            return 1;
        };

        match Opcode::try_from(byte) {
            Ok(opcode) => {
                let (echo, rest) = reply.split_at_mut(1);
                echo[0] = byte;

                opcode.route(self, payload, rest) + 1
            }
            Err(_) => {
                reply[0] = Status::NoCommand.into();
                1
            }
        }
    }
}

impl<P: PinIo> Handlers for Dispatcher<P> {
    fn pin_mode(&mut self, payload: &[u8], reply: &mut [u8]) -> usize {
        let Ok([pin, mode]) = <[u8; 2]>::try_from(payload) else {
            return respond(reply, Status::InvalidFormat, &[]);
        };

        self.pins.set_pin_mode(pin, mode);
        respond(reply, Status::Ok, &[])
    }

    fn digital_write(&mut self, payload: &[u8], reply: &mut [u8]) -> usize {
        let Ok([pin, value]) = <[u8; 2]>::try_from(payload) else {
            return respond(reply, Status::InvalidFormat, &[]);
        };

        self.pins.write_digital(pin, value);
        respond(reply, Status::Ok, &[])
    }

    fn digital_read(&mut self, payload: &[u8], reply: &mut [u8]) -> usize {
        let Ok([pin]) = <[u8; 1]>::try_from(payload) else {
            return respond(reply, Status::InvalidFormat, &[]);
        };

        let value = self.pins.read_digital(pin);
        respond(reply, Status::Ok, &[value])
    }

    fn analog_write(&mut self, payload: &[u8], reply: &mut [u8]) -> usize {
        let Ok([pin, duty]) = <[u8; 2]>::try_from(payload) else {
            return respond(reply, Status::InvalidFormat, &[]);
        };

        self.pins.write_analog(pin, duty);
        respond(reply, Status::Ok, &[])
    }

    fn analog_read(&mut self, payload: &[u8], reply: &mut [u8]) -> usize {
        let Ok([pin]) = <[u8; 1]>::try_from(payload) else {
            return respond(reply, Status::InvalidFormat, &[]);
        };

        // little-endian regardless of either side's native order
        let value = self.pins.read_analog(pin);
        respond(reply, Status::Ok, &value.to_le_bytes())
    }
}
