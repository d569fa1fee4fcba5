//! Newline-terminated hex text framing of the dispatcher.
//!
//! Every line carries one frame, `[address] [command ..]` in hex text.
//! Frames for [`LOCAL_ADDRESS`] are handled by the board itself:
//!
//! ```text
//! host  -> "00\n"             ping
//! board -> "00\n"             pong
//! host  -> "00 05 0e\n"       analog read of pin 14
//! board -> "00 05 80 34 12\n"
//! ```

use hex_codec::{bytes_to_hex, error::EndOfInput, hex_to_bytes};

use crate::{
    dispatch::{Dispatcher, Reply, MAX_REPLY_LEN},
    pins::PinIo,
    status::{Status, PONG_MSG, RESET_MSG},
};

mod processor;

pub use processor::{Error, LineProcessor};

/// Bus address of the board itself.
pub const LOCAL_ADDRESS: u8 = 0x00;

/// Largest decoded frame.
pub const MAX_FRAME_LEN: usize = 32;

/// Largest rendered answer: address, reply, separators, and terminator.
pub const MAX_ANSWER_LEN: usize = 3 + MAX_REPLY_LEN * 3;

const TERMINATOR: u8 = b'\n';
const REPLY_PREFIX: &[u8] = b"00 ";

/// What the board says back to a line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum Answer {
    Pong,
    /// Announced once after boot.
    Reset,
    Status(Status),
    Reply { bytes: Reply, len: usize },
}

fn put<'a>(dst: &mut impl Iterator<Item = &'a mut u8>, src: &[u8]) -> Result<usize, EndOfInput> {
    for &byte in src {
        *dst.next().ok_or(EndOfInput)? = byte;
    }

    Ok(src.len())
}

impl Answer {
    /// Render the answer to text for transmission.
    ///
    /// Returns the number of bytes written, terminator included.
    pub fn render<'a>(&self, dst: impl IntoIterator<Item = &'a mut u8>) -> Result<usize, EndOfInput> {
        let mut dst = dst.into_iter();

        match self {
            Self::Pong => put(&mut dst, PONG_MSG),
            Self::Reset => put(&mut dst, RESET_MSG),
            Self::Status(status) => put(&mut dst, status.ascii_message()),
            Self::Reply { bytes, len } => {
                let reply = bytes.get(..*len).ok_or(EndOfInput)?;

                let mut written = put(&mut dst, REPLY_PREFIX)?;
                written += bytes_to_hex(reply, &mut dst)?;
                written += put(&mut dst, &[TERMINATOR])?;

                Ok(written)
            }
        }
    }
}

/// Turns lines of hex text into answers.
pub struct Link<P: PinIo> {
    dispatcher: Dispatcher<P>,
}

impl<P: PinIo> Link<P> {
    pub const fn new(dispatcher: Dispatcher<P>) -> Self {
        Self { dispatcher }
    }

    #[inline]
    pub fn dispatcher(&mut self) -> &mut Dispatcher<P> {
        &mut self.dispatcher
    }

    pub fn release(self) -> Dispatcher<P> {
        self.dispatcher
    }

    /// Handle one line, without its terminator.
    pub fn handle_line(&mut self, line: &[u8]) -> Answer {
        let mut frame = [0u8; MAX_FRAME_LEN];

        let Ok(len) = hex_to_bytes(line, frame.iter_mut()) else {
            #[cfg(feature = "defmt")]
            defmt::warn!("frame exceeds {=usize} bytes", MAX_FRAME_LEN);

            return Answer::Status(Status::TooLong);
        };

        match frame[..len].split_first() {
            None => {
                #[cfg(feature = "defmt")]
                defmt::debug!("line without data");

                Answer::Status(Status::NoData)
            }
            Some((&LOCAL_ADDRESS, [])) => Answer::Pong,
            Some((&LOCAL_ADDRESS, command)) => {
                let mut bytes = Reply::default();
                let len = self.dispatcher.dispatch(command, &mut bytes);

                Answer::Reply { bytes, len }
            }
            Some((&_address, _)) => {
                #[cfg(feature = "defmt")]
                defmt::debug!("frame for address {=u8:#x} ignored", _address);

                Answer::Status(Status::InvalidMsg)
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::pins::mock::{Call, MockPins};

    fn link() -> Link<MockPins> {
        Link::new(Dispatcher::new(MockPins::new()))
    }

    fn rendered(answer: Answer) -> ([u8; MAX_ANSWER_LEN], usize) {
        let mut text = [0u8; MAX_ANSWER_LEN];
        let len = answer.render(text.iter_mut()).unwrap();

        (text, len)
    }

    mod lines {
        use super::*;

        #[test]
        fn ping() {
            assert_eq!(Answer::Pong, link().handle_line(b"00"));
        }

        #[test]
        fn command() {
            let mut link = link();

            let answer = link.handle_line(b"00 01 0d 01");

            assert_eq!(
                Answer::Reply {
                    bytes: [0x01, 0x80, 0, 0],
                    len: 2
                },
                answer
            );
            assert_eq!(
                [Call::PinMode { pin: 13, mode: 1 }],
                link.dispatcher().pins().calls[..]
            );
        }

        #[test]
        fn carriage_return() {
            let answer = link().handle_line(b"00 05 0e\r");

            assert_eq!(
                Answer::Reply {
                    bytes: [0x05, 0x80, 0x34, 0x12],
                    len: 4
                },
                answer
            );
        }

        #[test]
        fn unknown_command() {
            let answer = link().handle_line(b"00 99");

            assert!(matches!(answer, Answer::Reply { bytes: [0x85, ..], len: 1 }));
        }

        #[test]
        fn no_data() {
            assert_eq!(Answer::Status(Status::NoData), link().handle_line(b""));
            assert_eq!(Answer::Status(Status::NoData), link().handle_line(b"  x"));
        }

        #[test]
        fn other_address() {
            let mut link = link();

            assert_eq!(
                Answer::Status(Status::InvalidMsg),
                link.handle_line(b"20 06 01")
            );
            assert!(link.dispatcher().pins().calls.is_empty());
        }

        #[test]
        fn too_long() {
            let mut line = [0u8; (MAX_FRAME_LEN + 1) * 2];
            line.fill(b'0');

            assert_eq!(Answer::Status(Status::TooLong), link().handle_line(&line));
        }
    }

    mod render {
        use super::*;

        #[test]
        fn reply() {
            let (text, len) = rendered(Answer::Reply {
                bytes: [0x05, 0x80, 0x34, 0x12],
                len: 4,
            });

            assert_eq!(MAX_ANSWER_LEN, len);
            assert_eq!(b"00 05 80 34 12\n", &text[..len]);
        }

        #[test]
        fn short_reply() {
            let (text, len) = rendered(Answer::Reply {
                bytes: [0x85, 0, 0, 0],
                len: 1,
            });

            assert_eq!(b"00 85\n", &text[..len]);
        }

        #[test]
        fn fixed() {
            let (text, len) = rendered(Answer::Pong);
            assert_eq!(b"00\n", &text[..len]);

            let (text, len) = rendered(Answer::Reset);
            assert_eq!(b"00 FF\n", &text[..len]);

            let (text, len) = rendered(Answer::Status(Status::TooLong));
            assert_eq!(b"00 86\n", &text[..len]);
        }

        #[test]
        fn overflow() {
            let mut text = [0u8; 4];

            assert_eq!(
                Err(EndOfInput),
                Answer::Status(Status::Ok).render(text.iter_mut())
            );
        }

        #[test]
        fn bad_length() {
            let mut text = [0u8; MAX_ANSWER_LEN];

            assert_eq!(
                Err(EndOfInput),
                Answer::Reply {
                    bytes: [0; MAX_REPLY_LEN],
                    len: MAX_REPLY_LEN + 1
                }
                .render(text.iter_mut())
            );
        }
    }
}
