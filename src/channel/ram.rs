//! RAM capture channel

use crate::buffer::ByteBuffer;
use crate::channel::{Channel, LineEnding};
use core::borrow::BorrowMut;

/// [BufferChannel] error
#[derive(Debug, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum BufferError {
    /// Not enough space left, the text was truncated
    Overflow,
}

/// Channel that keeps everything written to it in a caller-provided buffer.
///
/// Useful for capturing output before a real port is attached and replaying
/// it later with [drain_into]. The channel becomes ready as soon as [begin]
/// is called. Writes made before that are kept as well.
///
/// [drain_into]: BufferChannel::drain_into
/// [begin]: Channel::begin
pub struct BufferChannel<T: BorrowMut<[u8]>> {
    buf: ByteBuffer<T>,
    baud: Option<u32>,
    line_ending: LineEnding,
}

impl<T: BorrowMut<[u8]>> BufferChannel<T> {
    pub fn new(buf: T) -> BufferChannel<T> {
        BufferChannel {
            buf: ByteBuffer::new(buf),
            baud: None,
            line_ending: LineEnding::default(),
        }
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Rate passed to the last [Channel::begin], if any
    pub fn baud(&self) -> Option<u32> {
        self.baud
    }

    /// Bytes written and not drained yet
    pub fn contents(&self) -> &[u8] {
        self.buf.unread()
    }

    /// Forwards the captured bytes to `out`, returning how many were sent.
    ///
    /// Bytes go out one at a time and are consumed once `out` accepted them.
    /// After an error the next call resumes at the first rejected byte.
    pub fn drain_into<C: Channel + ?Sized>(&mut self, out: &mut C) -> Result<usize, C::Error> {
        let mut sent = 0;
        while let Some(&byte) = self.buf.unread().first() {
            out.write_bytes(&[byte])?;
            self.buf.consume(1);
            sent += 1;
        }
        debug!("dprint: drained {} bytes", sent);
        Ok(sent)
    }

    pub fn clear(&mut self) {
        self.buf.clear();
    }
}

impl<T: BorrowMut<[u8]>> Channel for BufferChannel<T> {
    type Error = BufferError;

    fn begin(&mut self, baud: u32) -> Result<(), BufferError> {
        self.baud = Some(baud);
        Ok(())
    }

    fn is_ready(&mut self) -> bool {
        self.baud.is_some()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), BufferError> {
        let stored = self.buf.push(bytes);
        if stored < bytes.len() {
            warn!("dprint: buffer full, dropped {} bytes", bytes.len() - stored);
            return Err(BufferError::Overflow);
        }
        Ok(())
    }

    fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}
