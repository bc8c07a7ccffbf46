//! [embedded-hal] serial adapter
//!
//! [embedded-hal]: https://crates.io/crates/embedded-hal

use crate::channel::{Channel, LineEnding};
use core::fmt::Debug;
use embedded_hal::serial::Write;

/// [Channel] over any blocking-capable `embedded_hal::serial::Write<u8>`.
///
/// A HAL serial port gets its baud rate when it is constructed, so [begin]
/// only records the requested rate and warns when it differs from the one
/// given to [HalSerial::new]. The port counts as ready once `begin` was called
/// and the transmitter has flushed whatever was queued before.
///
/// [begin]: Channel::begin
pub struct HalSerial<W> {
    tx: W,
    configured: u32,
    baud: Option<u32>,
    ready: bool,
    flush_failed: bool,
    line_ending: LineEnding,
}

impl<W> HalSerial<W>
where
    W: Write<u8>,
    W::Error: Debug,
{
    /// Wraps `tx`, which was set up for `configured_baud`
    pub fn new(tx: W, configured_baud: u32) -> HalSerial<W> {
        HalSerial {
            tx,
            configured: configured_baud,
            baud: None,
            ready: false,
            flush_failed: false,
            line_ending: LineEnding::default(),
        }
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    /// Rate the writer was set up for
    pub fn configured_baud(&self) -> u32 {
        self.configured
    }

    /// Rate passed to the last [Channel::begin], if any
    pub fn baud(&self) -> Option<u32> {
        self.baud
    }

    /// Whether the readiness poll hit a flush error since the last [Channel::begin]
    pub fn flush_failed(&self) -> bool {
        self.flush_failed
    }

    /// Gives the serial writer back
    pub fn release(self) -> W {
        self.tx
    }
}

impl<W> Channel for HalSerial<W>
where
    W: Write<u8>,
    W::Error: Debug,
{
    type Error = W::Error;

    fn begin(&mut self, baud: u32) -> Result<(), W::Error> {
        info!("dprint: hal: begin at {} baud", baud);
        if baud != self.configured {
            warn!(
                "dprint: hal: begin asks for {} baud, port runs at {}",
                baud,
                self.configured
            );
        }
        self.baud = Some(baud);
        self.ready = false;
        self.flush_failed = false;
        Ok(())
    }

    fn is_ready(&mut self) -> bool {
        if self.ready {
            return true;
        }
        if self.baud.is_none() {
            return false;
        }
        match self.tx.flush() {
            Ok(()) => {
                self.ready = true;
                self.flush_failed = false;
                true
            }
            Err(nb::Error::WouldBlock) => false,
            Err(nb::Error::Other(_)) => {
                if !self.flush_failed {
                    warn!("dprint: hal: flush failed, port not ready");
                    self.flush_failed = true;
                }
                trace!("dprint: hal: flush failed");
                false
            }
        }
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), W::Error> {
        for &byte in bytes {
            nb::block!(self.tx.write(byte))?;
        }
        Ok(())
    }

    fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}
