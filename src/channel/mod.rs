//! Serial output channels

use core::fmt::{self, Debug, Write};

#[cfg(feature = "hal")]
pub mod hal;
pub mod ram;

/// Line terminator appended by [ChannelExt::emit_line_fmt]
#[derive(Debug, Default, Copy, Clone, PartialEq, Eq)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum LineEnding {
    /// `\r\n`, what the usual serial monitors expect
    #[default]
    CrLf,
    /// `\n`
    Lf,
    /// `\r`
    Cr,
}

impl LineEnding {
    /// Terminator as written to the channel
    pub const fn as_bytes(self) -> &'static [u8] {
        match self {
            LineEnding::CrLf => b"\r\n",
            LineEnding::Lf => b"\n",
            LineEnding::Cr => b"\r",
        }
    }
}

/// Line-oriented text output, e.g. a UART or a USB serial port.
///
/// Readiness may arrive some time after [begin]: [ChannelExt::start_and_wait]
/// keeps polling [is_ready] until it does.
///
/// A channel is written through `&mut` only, so there is a single writer by
/// construction. Sharing one between threads or interrupt handlers needs
/// external synchronization.
///
/// [begin]: Channel::begin
/// [is_ready]: Channel::is_ready
pub trait Channel {
    type Error: Debug;

    /// Opens the channel at `baud` symbols per second
    fn begin(&mut self, baud: u32) -> Result<(), Self::Error>;

    /// Whether the channel accepts writes
    fn is_ready(&mut self) -> bool;

    /// Writes all of `bytes`
    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error>;

    /// Terminator written by [ChannelExt::emit_line_fmt], `\r\n` unless overridden
    fn line_ending(&self) -> LineEnding {
        LineEnding::CrLf
    }
}

impl<C: Channel + ?Sized> Channel for &mut C {
    type Error = C::Error;

    fn begin(&mut self, baud: u32) -> Result<(), Self::Error> {
        (**self).begin(baud)
    }

    fn is_ready(&mut self) -> bool {
        (**self).is_ready()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), Self::Error> {
        (**self).write_bytes(bytes)
    }

    fn line_ending(&self) -> LineEnding {
        (**self).line_ending()
    }
}

/// Error of the [ChannelExt] operations.
#[derive(Debug)]
#[cfg_attr(feature = "defmt", derive(defmt::Format))]
pub enum ChannelError<E: Debug> {
    /// The channel failed to write
    Channel(E),
    /// A `Display` or `Debug` impl of an argument failed
    Format,
}

/// Operations behind [dstart], [dprint] and [dprintln].
///
/// These run unconditionally: the build-mode gate lives in the macros.
///
/// [dstart]: crate::dstart
/// [dprint]: crate::dprint
/// [dprintln]: crate::dprintln
pub trait ChannelExt: Channel {
    /// Opens the channel and spins until it reports ready.
    ///
    /// There is no timeout. A channel that never becomes ready (e.g. a USB
    /// serial port no host ever opens) hangs the caller here.
    fn start_and_wait(&mut self, baud: u32) {
        info!("dprint: start at {} baud", baud);
        if self.begin(baud).is_err() {
            warn!("dprint: begin at {} baud failed, waiting anyway", baud);
        }

        let mut polls: u32 = 0;
        while !self.is_ready() {
            polls = polls.wrapping_add(1);
            core::hint::spin_loop();
        }
        trace!("dprint: channel ready after {} polls", polls);
    }

    /// Writes formatted text without a line terminator
    fn emit_fmt(&mut self, args: fmt::Arguments<'_>) -> Result<(), ChannelError<Self::Error>> {
        let mut writer = Writer {
            channel: self,
            error: None,
        };
        match writer.write_fmt(args) {
            Ok(()) => Ok(()),
            Err(fmt::Error) => Err(writer
                .error
                .take()
                .map_or(ChannelError::Format, ChannelError::Channel)),
        }
    }

    /// Writes formatted text followed by exactly one [LineEnding]
    fn emit_line_fmt(
        &mut self,
        args: fmt::Arguments<'_>,
    ) -> Result<(), ChannelError<Self::Error>> {
        self.emit_fmt(args)?;
        let ending = self.line_ending();
        self.write_bytes(ending.as_bytes())
            .map_err(ChannelError::Channel)
    }
}

impl<C: Channel + ?Sized> ChannelExt for C {}

// `fmt::Error` carries nothing, so the channel error is parked here
struct Writer<'a, C: Channel + ?Sized> {
    channel: &'a mut C,
    error: Option<C::Error>,
}

impl<C: Channel + ?Sized> Write for Writer<'_, C> {
    fn write_str(&mut self, s: &str) -> fmt::Result {
        self.channel.write_bytes(s.as_bytes()).map_err(|e| {
            self.error = Some(e);
            fmt::Error
        })
    }
}
