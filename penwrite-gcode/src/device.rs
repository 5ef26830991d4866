//! Device-channel abstraction for command transmission.
//!
//! The plot driver hands each command line to a [`DeviceChannel`] and
//! blocks on the acknowledgment before producing the next line; a physical
//! controller may refuse commands sent before the previous one completes.
//! Transmission success is entirely the channel's concern — the driver
//! neither retries nor inspects replies beyond the acknowledgment.
//!
//! Two implementations live here: [`NullDevice`] for tests that only need
//! a sink, and [`ScriptDevice`] for tests and dry runs that want to see
//! what was sent. The CLI crate provides the real serial implementation.

use std::io;

/// A channel that accepts plotter command lines.
pub trait DeviceChannel {
    /// Open the underlying channel and perform any handshake.
    fn open(&mut self) -> io::Result<()>;

    /// Whether the device is ready to accept commands.
    fn is_ready(&self) -> bool;

    /// Send one newline-terminated command line.
    fn transmit(&mut self, line: &str) -> io::Result<()>;

    /// Block until the device acknowledges the last command.
    fn await_acknowledgment(&mut self) -> io::Result<()>;

    /// Close the channel.
    fn close(&mut self) -> io::Result<()>;
}

// ---------------------------------------------------------------------------
// Null device
// ---------------------------------------------------------------------------

/// Discards every command; always ready.
#[derive(Debug, Clone, Copy, Default)]
pub struct NullDevice;

impl DeviceChannel for NullDevice {
    fn open(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn transmit(&mut self, _line: &str) -> io::Result<()> {
        Ok(())
    }

    fn await_acknowledgment(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Script device
// ---------------------------------------------------------------------------

/// Records transmitted lines in order, with the trailing newline stripped.
#[derive(Debug, Clone, Default)]
pub struct ScriptDevice {
    lines: Vec<String>,
}

impl ScriptDevice {
    /// Create an empty recorder.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// The recorded lines, in transmission order.
    #[must_use]
    pub fn lines(&self) -> &[String] {
        &self.lines
    }

    /// Consume the recorder, returning its lines.
    #[must_use]
    pub fn into_lines(self) -> Vec<String> {
        self.lines
    }
}

impl DeviceChannel for ScriptDevice {
    fn open(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn is_ready(&self) -> bool {
        true
    }

    fn transmit(&mut self, line: &str) -> io::Result<()> {
        self.lines.push(line.trim_end_matches('\n').to_owned());
        Ok(())
    }

    fn await_acknowledgment(&mut self) -> io::Result<()> {
        Ok(())
    }

    fn close(&mut self) -> io::Result<()> {
        Ok(())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
