#![no_std]

pub mod dispatch;
pub mod link;
pub mod pins;
pub mod status;

pub use dispatch::{Dispatcher, Handlers, Opcode, Reply, MAX_REPLY_LEN};
pub use pins::PinIo;
pub use status::Status;

pub mod error {
    /// A byte outside of the status code range.
    #[derive(Debug, Clone, Copy, PartialEq, Eq)]
    #[cfg_attr(feature = "defmt", derive(defmt::Format))]
    pub struct UnknownStatus(pub u8);
}
