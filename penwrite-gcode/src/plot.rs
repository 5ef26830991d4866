//! Streaming plot driver.
//!
//! Wires the layout engine to a device channel: each layout placement is
//! expanded to stroke commands and handed to the device one line at a
//! time, waiting for the acknowledgment between lines. Nothing is
//! buffered beyond the word currently being placed, so memory use is
//! independent of document length.

use std::io::BufRead;

use penwrite_core::config::ScaleFactor;
use penwrite_core::error::{ErrorKind, PlotError, PlotResult};
use penwrite_core::glyph::GlyphTable;
use penwrite_core::layout::{Layout, LayoutEvent, LayoutOptions};

use crate::command::{preamble, Command};
use crate::device::DeviceChannel;

// ---------------------------------------------------------------------------
// Summary
// ---------------------------------------------------------------------------

/// Counters reported after a completed plot.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq)]
pub struct PlotSummary {
    /// Glyphs placed on the page.
    pub glyphs: usize,
    /// Command lines transmitted, preamble included.
    pub commands: usize,
    /// Line breaks taken (forced and wrap).
    pub line_breaks: usize,
}

// ---------------------------------------------------------------------------
// Driver
// ---------------------------------------------------------------------------

/// Plot a document to a device.
///
/// The device must already be open. The preamble is sent first, then the
/// stroke commands in document order; every line waits for its
/// acknowledgment before the next is produced.
pub fn plot_document<R: BufRead>(
    text: R,
    table: &GlyphTable,
    scale: ScaleFactor,
    options: LayoutOptions,
    feed_rate: u32,
    device: &mut dyn DeviceChannel,
) -> PlotResult<PlotSummary> {
    if !device.is_ready() {
        return Err(PlotError::new(
            ErrorKind::Io,
            "device is not ready to accept commands",
        ));
    }

    let mut summary = PlotSummary::default();

    for command in preamble(feed_rate) {
        send(device, &command, &mut summary)?;
    }

    for event in Layout::new(text, table, scale, options) {
        match event? {
            LayoutEvent::Place(placement) => {
                let Some(glyph) = table.get(placement.code) else {
                    continue;
                };
                summary.glyphs += 1;
                for command in crate::emit::glyph_commands(glyph, placement.origin, scale) {
                    send(device, &command, &mut summary)?;
                }
            }
            LayoutEvent::Break(_) => summary.line_breaks += 1,
        }
    }

    Ok(summary)
}

/// Transmit one command and wait for its acknowledgment.
fn send(
    device: &mut dyn DeviceChannel,
    command: &Command,
    summary: &mut PlotSummary,
) -> PlotResult<()> {
    device.transmit(&command.to_wire())?;
    device.await_acknowledgment()?;
    summary.commands += 1;
    Ok(())
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
