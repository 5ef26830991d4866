//! Stroke emitter: replays a placed glyph's strokes as motion commands.
//!
//! Each stroke becomes exactly one command. The target is the glyph origin
//! plus the stroke offset scaled into millimetres; the motion mode follows
//! the pen state. Strokes replay literally and in order — no reordering,
//! no interpolation.

use std::io::BufRead;

use kurbo::Point;

use penwrite_core::config::ScaleFactor;
use penwrite_core::error::PlotResult;
use penwrite_core::glyph::{Glyph, GlyphTable, PenState};
use penwrite_core::layout::{Layout, LayoutEvent, LayoutOptions};

use crate::command::{preamble, Command};

/// The motion commands for one glyph placed at `origin`.
pub fn glyph_commands(
    glyph: &Glyph,
    origin: Point,
    scale: ScaleFactor,
) -> impl Iterator<Item = Command> + '_ {
    let ratio = scale.ratio();
    glyph.strokes.iter().map(move |stroke| {
        let target = Point::new(
            f64::from(stroke.dx).mul_add(ratio, origin.x),
            f64::from(stroke.dy).mul_add(ratio, origin.y),
        );
        match stroke.pen {
            PenState::Up => Command::Rapid(target),
            PenState::Down => Command::Draw(target),
        }
    })
}

/// Collect the complete command sequence for a document, preamble included.
///
/// This buffers every command and exists for previews and tests; use
/// [`plot_document`](crate::plot::plot_document) to stream to a device
/// without holding the whole document.
pub fn document_commands<R: BufRead>(
    text: R,
    table: &GlyphTable,
    scale: ScaleFactor,
    options: LayoutOptions,
    feed_rate: u32,
) -> PlotResult<Vec<Command>> {
    let mut commands: Vec<Command> = preamble(feed_rate).to_vec();

    for event in Layout::new(text, table, scale, options) {
        if let LayoutEvent::Place(placement) = event? {
            if let Some(glyph) = table.get(placement.code) {
                commands.extend(glyph_commands(glyph, placement.origin, scale));
            }
        }
    }

    Ok(commands)
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;
    use penwrite_core::font::load_font_str;

    const TRIANGLE_A: &str = "999 65 3\n0 0 0\n5 18 1\n10 0 1\n";

    #[test]
    fn strokes_replay_in_order_with_pen_modes() {
        let table = load_font_str(TRIANGLE_A).expect("font");
        let glyph = table.get(b'A').expect("glyph A");

        // Reference-height text: scale 1.0.
        let lines: Vec<String> =
            glyph_commands(glyph, Point::ZERO, ScaleFactor::from_height(18.0))
                .map(|c| c.to_string())
                .collect();
        assert_eq!(lines, vec!["G0 X0.00 Y0.00", "G1 X5.00 Y18.00", "G1 X10.00 Y0.00"]);
    }

    #[test]
    fn origin_offsets_every_target() {
        let table = load_font_str(TRIANGLE_A).expect("font");
        let glyph = table.get(b'A').expect("glyph A");

        let lines: Vec<String> = glyph_commands(
            glyph,
            Point::new(20.0, -10.0),
            ScaleFactor::from_height(18.0),
        )
        .map(|c| c.to_string())
        .collect();
        assert_eq!(
            lines,
            vec!["G0 X20.00 Y-10.00", "G1 X25.00 Y8.00", "G1 X30.00 Y-10.00"]
        );
    }

    #[test]
    fn scale_contracts_stroke_offsets() {
        let table = load_font_str(TRIANGLE_A).expect("font");
        let glyph = table.get(b'A').expect("glyph A");

        // 9 mm text over an 18-unit design space: scale 0.5.
        let lines: Vec<String> = glyph_commands(glyph, Point::ZERO, ScaleFactor::from_height(9.0))
            .map(|c| c.to_string())
            .collect();
        assert_eq!(lines, vec!["G0 X0.00 Y0.00", "G1 X2.50 Y9.00", "G1 X5.00 Y0.00"]);
    }

    #[test]
    fn document_starts_with_the_preamble() {
        let table = load_font_str(TRIANGLE_A).expect("font");
        let commands = document_commands(
            "A".as_bytes(),
            &table,
            ScaleFactor::from_height(18.0),
            LayoutOptions::default(),
            1000,
        )
        .expect("document");

        let lines: Vec<String> = commands.iter().map(Command::to_string).collect();
        assert_eq!(&lines[..3], ["G1 X0 Y0 F1000", "M3", "S0"]);
        assert_eq!(
            &lines[3..],
            ["G0 X0.00 Y0.00", "G1 X5.00 Y18.00", "G1 X10.00 Y0.00"]
        );
    }

    #[test]
    fn unsupported_characters_emit_no_commands() {
        let table = load_font_str(TRIANGLE_A).expect("font");
        let commands = document_commands(
            "?!".as_bytes(),
            &table,
            ScaleFactor::from_height(18.0),
            LayoutOptions::default(),
            1000,
        )
        .expect("document");

        // Preamble only.
        assert_eq!(commands.len(), 3);
    }

    #[test]
    fn blank_glyph_emits_no_commands() {
        let source = format!("999 32 0\n{TRIANGLE_A}");
        let table = load_font_str(&source).expect("font");
        let commands = document_commands(
            " A ".as_bytes(),
            &table,
            ScaleFactor::from_height(18.0),
            LayoutOptions::default(),
            1000,
        )
        .expect("document");

        // Preamble plus the three strokes of 'A'.
        assert_eq!(commands.len(), 6);
    }
}
