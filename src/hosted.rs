//! Host-side adapters backed by the standard library.
//!
//! Available with the `std` cargo feature. These let the game run unchanged
//! on a PC (or a Linux single-board computer) for development: the tick
//! source wraps [`std::time::Instant`], the round log is a text file opened
//! in append mode per entry, the console is stdout and the polling delay is
//! a thread sleep.
//!
//! Signal wiring is left to the application: install your interrupt handler
//! of choice and have it store `true` into the [`AtomicBool`] used as the
//! runner's stop token.
//!
//! [`AtomicBool`]: core::sync::atomic::AtomicBool

use std::fs::OpenOptions;
use std::io::Write;
use std::time::Instant;

use embedded_hal::delay::DelayNs;

use crate::report::{Console, RoundSink};
use crate::time::{TickMs64, TickSource};

/// Millisecond tick source anchored at construction time.
pub struct SystemTicks {
    origin: Instant,
}

impl SystemTicks {
    /// Creates a tick source whose counter starts at zero now.
    pub fn new() -> Self {
        Self {
            origin: Instant::now(),
        }
    }
}

impl Default for SystemTicks {
    fn default() -> Self {
        Self::new()
    }
}

impl TickSource<TickMs64> for SystemTicks {
    fn now(&self) -> TickMs64 {
        TickMs64(self.origin.elapsed().as_millis() as u64)
    }
}

/// Round log backed by a text file.
///
/// Every append opens the file in append mode (creating it on first use),
/// writes one line and closes it again, so each entry reaches the
/// filesystem before the next round starts. The file is never read,
/// truncated or rotated.
pub struct FileRoundLog {
    path: String,
}

impl FileRoundLog {
    /// Creates a log writing to `path`.
    pub fn new(path: impl Into<String>) -> Self {
        Self { path: path.into() }
    }
}

impl RoundSink for FileRoundLog {
    type Error = std::io::Error;

    fn append(&mut self, line: &str) -> Result<(), Self::Error> {
        let mut file = OpenOptions::new()
            .create(true)
            .append(true)
            .open(&self.path)?;
        writeln!(file, "{line}")
    }

    fn destination(&self) -> &str {
        &self.path
    }
}

/// Console printing to stdout.
pub struct StdoutConsole;

impl Console for StdoutConsole {
    fn line(&mut self, text: &str) {
        println!("{text}");
    }
}

/// Polling delay backed by [`std::thread::sleep`].
pub struct ThreadDelay;

impl DelayNs for ThreadDelay {
    fn delay_ns(&mut self, ns: u32) {
        std::thread::sleep(core::time::Duration::from_nanos(u64::from(ns)));
    }
}
