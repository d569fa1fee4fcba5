use embedded_io_async::{BufRead, Write};
use hex_codec::error::EndOfInput;
use heapless::Vec;

use super::{Answer, Link, MAX_ANSWER_LEN, TERMINATOR};
use crate::{pins::PinIo, status::Status};

type LineBuffer<const N: usize> = Vec<u8, N>;

#[derive(Debug)]
pub enum Error<E> {
    Port(E),
    Render(EndOfInput),
}

impl<E> From<EndOfInput> for Error<E> {
    fn from(value: EndOfInput) -> Self {
        Self::Render(value)
    }
}

/// Serves a [`Link`] over a byte port, one line at a time.
///
/// Lines longer than `N` bytes are answered with `ERR_TOO_LONG`.
pub struct LineProcessor<Port, P, const N: usize>
where
    Port: BufRead + Write,
    P: PinIo,
{
    port: Port,
    link: Link<P>,
    buf: LineBuffer<N>,
    overflowed: bool,
}

impl<Port, P, const N: usize> LineProcessor<Port, P, N>
where
    Port: BufRead + Write,
    P: PinIo,
{
    pub const fn new(port: Port, link: Link<P>) -> Self {
        Self {
            port,
            link,
            buf: LineBuffer::new(),
            overflowed: false,
        }
    }

    /// Give back the port and the link.
    pub fn release(self) -> (Port, Link<P>) {
        (self.port, self.link)
    }

    /// Ingest bytes from the port until a line is complete.
    ///
    /// Returns `false` once the port has no more input.
    async fn poll(&mut self) -> Result<bool, Port::Error> {
        loop {
            let available = self.port.fill_buf().await?;

            if available.is_empty() {
                return Ok(false);
            }

            let mut consumed = 0;
            let mut complete = false;

            for &byte in available {
                consumed += 1;

                match byte {
                    TERMINATOR => {
                        complete = true;
                        break;
                    }
                    b'\r' => {}
                    _ if self.overflowed => {}
                    _ => self.overflowed = self.buf.push(byte).is_err(),
                }
            }

            self.port.consume(consumed);

            if complete {
                return Ok(true);
            }
        }
    }

    /// Answer the buffered line and start a new one.
    fn process(&mut self) -> Answer {
        let answer = if self.overflowed {
            #[cfg(feature = "defmt")]
            defmt::warn!("line exceeds {=usize} bytes, dropped", N);

            Answer::Status(Status::TooLong)
        } else {
            self.link.handle_line(&self.buf)
        };

        self.buf.clear();
        self.overflowed = false;

        answer
    }

    async fn send(&mut self, answer: Answer) -> Result<(), Error<Port::Error>> {
        let mut text = [0u8; MAX_ANSWER_LEN];
        let len = answer.render(text.iter_mut())?;

        self.port.write_all(&text[..len]).await.map_err(Error::Port)?;
        self.port.flush().await.map_err(Error::Port)
    }

    /// Announce the reset, then answer lines until the port runs dry.
    pub async fn run(&mut self) -> Result<(), Error<Port::Error>> {
        self.send(Answer::Reset).await?;

        while self.poll().await.map_err(Error::Port)? {
            let answer = self.process();
            self.send(answer).await?;
        }

        Ok(())
    }
}
