//! Debug-only serial output for embedded targets
//!
//! Three macros wrap a serial [Channel]:
//! * [dstart] - open the channel and wait until it is ready
//! * [dprint] - write formatted text
//! * [dprintln] - write formatted text and a line terminator
//!
//! In debug builds they write to the channel. In release builds they compile
//! to nothing: arguments are type-checked but never evaluated, so call sites
//! stay the same in both modes.
//!
//! ```no_run
//! use serial_dprint::{dprintln, dstart};
//! use serial_dprint::channel::ram::BufferChannel;
//!
//! let mut serial = BufferChannel::new([0u8; 64]);
//! dstart!(serial, 9600);
//! dprintln!(serial, "hello");
//! ```
//!
//! # Channels:
//! * [BufferChannel] - capture into RAM
//! * [HalSerial] - any `embedded-hal` 0.2 serial writer
//! * Custom - implement [Channel] trait
//!
//! # Features
//! | Feature | Description                           |
//! | ------- |---------------------------------------|
//! | `hal` | Include the `embedded-hal` serial adapter |
//! | `release-output` | Keep the macros active without debug assertions |
//! | `silent` | Compile the macros out even with debug assertions |
//! | `defmt` | Enable logging via [defmt](https://crates.io/crates/defmt) crate |
//!
//! [Channel]: crate::channel::Channel
//! [BufferChannel]: crate::channel::ram::BufferChannel
//! [HalSerial]: crate::channel::hal::HalSerial

#![no_std]

// must come first, the logging macros are textually scoped
pub(crate) mod fmt;

pub(crate) mod buffer;
pub mod channel;

pub use channel::{Channel, ChannelError, ChannelExt, LineEnding};

/// Whether [dstart], [dprint] and [dprintln] do anything in this build.
///
/// Follows `debug_assertions` of this crate. `release-output` turns it on
/// regardless, `silent` turns it off and wins over everything else.
pub const ENABLED: bool = cfg!(all(
    any(debug_assertions, feature = "release-output"),
    not(feature = "silent")
));

/// Opens `channel` at `baud` and spins until it is ready.
///
/// Never returns if the channel never becomes ready. No-op when
/// [ENABLED] is false.
#[macro_export]
macro_rules! dstart {
    ($channel:expr, $baud:expr $(,)?) => {
        if $crate::ENABLED {
            #[allow(unused_imports)]
            use $crate::ChannelExt as _;
            $channel.start_and_wait($baud);
        }
    };
}

/// Writes formatted text to `channel`, without a line terminator.
///
/// Write errors are ignored. No-op when [ENABLED] is false.
#[macro_export]
macro_rules! dprint {
    ($channel:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        if $crate::ENABLED {
            #[allow(unused_imports)]
            use $crate::ChannelExt as _;
            let _ = $channel.emit_fmt(::core::format_args!($fmt $(, $arg)*));
        }
    };
}

/// Writes formatted text to `channel` followed by its line terminator.
///
/// Write errors are ignored. No-op when [ENABLED] is false.
#[macro_export]
macro_rules! dprintln {
    ($channel:expr $(,)?) => {
        $crate::dprintln!($channel, "")
    };
    ($channel:expr, $fmt:literal $(, $arg:expr)* $(,)?) => {
        if $crate::ENABLED {
            #[allow(unused_imports)]
            use $crate::ChannelExt as _;
            let _ = $channel.emit_line_fmt(::core::format_args!($fmt $(, $arg)*));
        }
    };
}
