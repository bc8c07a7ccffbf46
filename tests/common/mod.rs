#![allow(dead_code)]

use serial_dprint::{Channel, LineEnding};
use std::sync::mpsc::sync_channel;
use std::sync::{Arc, Mutex};
use std::thread;
use std::time::Duration;

pub const TIMEOUT: Duration = Duration::from_secs(1);

#[derive(Debug, Eq, PartialEq)]
pub struct DummyError;

struct Inner {
    /// Polls answered with "not ready" before the port comes up, `None` never comes up
    ready_after: Option<u32>,
    polls: u32,
    begun: Vec<u32>,
    output: Vec<u8>,
    /// Bytes written while the port was not ready yet
    lost: usize,
    fail_writes: bool,
    fail_begin: bool,
}

/// Scripted serial port, all clones share the same state
#[derive(Clone)]
pub struct DummySerial {
    inner: Arc<Mutex<Inner>>,
    line_ending: LineEnding,
}

impl DummySerial {
    pub fn new() -> Self {
        Self::ready_after(0)
    }

    pub fn ready_after(polls: u32) -> Self {
        Self::with_readiness(Some(polls))
    }

    pub fn never_ready() -> Self {
        Self::with_readiness(None)
    }

    fn with_readiness(ready_after: Option<u32>) -> Self {
        Self {
            inner: Arc::new(Mutex::new(Inner {
                ready_after,
                polls: 0,
                begun: vec![],
                output: vec![],
                lost: 0,
                fail_writes: false,
                fail_begin: false,
            })),
            line_ending: LineEnding::default(),
        }
    }

    pub fn with_line_ending(mut self, line_ending: LineEnding) -> Self {
        self.line_ending = line_ending;
        self
    }

    pub fn fail_writes(&self) {
        self.inner.lock().unwrap().fail_writes = true;
    }

    pub fn fail_begin(&self) {
        self.inner.lock().unwrap().fail_begin = true;
    }

    pub fn begun(&self) -> Vec<u32> {
        self.inner.lock().unwrap().begun.clone()
    }

    pub fn polls(&self) -> u32 {
        self.inner.lock().unwrap().polls
    }

    pub fn lost(&self) -> usize {
        self.inner.lock().unwrap().lost
    }

    pub fn output(&self) -> String {
        String::from_utf8(self.inner.lock().unwrap().output.clone()).unwrap()
    }
}

impl Inner {
    fn ready(&self) -> bool {
        !self.begun.is_empty() && self.ready_after.map_or(false, |after| self.polls > after)
    }
}

impl Channel for DummySerial {
    type Error = DummyError;

    fn begin(&mut self, baud: u32) -> Result<(), DummyError> {
        let mut lock = self.inner.lock().unwrap();
        lock.begun.push(baud);
        if lock.fail_begin {
            return Err(DummyError);
        }
        Ok(())
    }

    fn is_ready(&mut self) -> bool {
        let mut lock = self.inner.lock().unwrap();
        lock.polls += 1;
        lock.ready()
    }

    fn write_bytes(&mut self, bytes: &[u8]) -> Result<(), DummyError> {
        let mut lock = self.inner.lock().unwrap();
        if lock.fail_writes {
            return Err(DummyError);
        }
        if !lock.ready() {
            lock.lost += bytes.len();
        }
        lock.output.extend_from_slice(bytes);
        Ok(())
    }

    fn line_ending(&self) -> LineEnding {
        self.line_ending
    }
}

pub fn timeout<F, T>(timeout: Duration, f: F) -> T
where
    F: FnOnce() -> T,
    F: Send + 'static,
    T: Send + 'static,
{
    let (tx, rx) = sync_channel(1);
    thread::spawn(move || {
        tx.send(f()).unwrap();
    });
    rx.recv_timeout(timeout).expect("timeout")
}
