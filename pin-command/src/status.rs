use crate::error;

/// Status byte of a reply.
///
/// The range is disjoint from every opcode, so a status in the first
/// position of a reply can never be mistaken for an echoed opcode.
#[repr(u8)]
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Status {
    Ok = 0x80,
    /// The payload length does not match the opcode.
    InvalidFormat = 0x81,
    InvalidMsg = 0x82,
    NoData = 0x83,
    I2cMaxRetries = 0x84,
    /// No command is registered for the opcode.
    NoCommand = 0x85,
    TooLong = 0x86,
}

pub const PONG_MSG: &[u8] = b"00\n";
pub const RESET_MSG: &[u8] = b"00 FF\n";
pub const OK_MSG: &[u8] = b"00 80\n";
pub const ERR_INVALID_FORMAT_MSG: &[u8] = b"00 81\n";
pub const ERR_INVALID_MSG_MSG: &[u8] = b"00 82\n";
pub const ERR_NO_DATA_MSG: &[u8] = b"00 83\n";
pub const ERR_I2C_MAX_RETRIES_MSG: &[u8] = b"00 84\n";
pub const ERR_NO_COMMAND_MSG: &[u8] = b"00 85\n";
pub const ERR_TOO_LONG_MSG: &[u8] = b"00 86\n";

impl Status {
    const ALL: [Self; 7] = [
        Self::Ok,
        Self::InvalidFormat,
        Self::InvalidMsg,
        Self::NoData,
        Self::I2cMaxRetries,
        Self::NoCommand,
        Self::TooLong,
    ];

    #[inline]
    pub fn is_ok(&self) -> bool {
        matches!(self, Self::Ok)
    }

    /// The newline-terminated line announcing this status on the wire.
    pub fn ascii_message(&self) -> &'static [u8] {
        match self {
            Self::Ok => OK_MSG,
            Self::InvalidFormat => ERR_INVALID_FORMAT_MSG,
            Self::InvalidMsg => ERR_INVALID_MSG_MSG,
            Self::NoData => ERR_NO_DATA_MSG,
            Self::I2cMaxRetries => ERR_I2C_MAX_RETRIES_MSG,
            Self::NoCommand => ERR_NO_COMMAND_MSG,
            Self::TooLong => ERR_TOO_LONG_MSG,
        }
    }
}

impl From<Status> for u8 {
    #[inline]
    fn from(value: Status) -> Self {
        value as u8
    }
}

impl TryFrom<u8> for Status {
    type Error = error::UnknownStatus;

    fn try_from(value: u8) -> Result<Self, Self::Error> {
        Self::ALL
            .into_iter()
            .find(|status| u8::from(*status) == value)
            .ok_or(error::UnknownStatus(value))
    }
}
