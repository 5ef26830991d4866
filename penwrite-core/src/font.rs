//! Loader for the single-stroke font description format.
//!
//! The format is line-oriented with three whitespace-separated integers
//! per line. A glyph record is a header line followed by its strokes:
//!
//! ```text
//! 999 65 3      % header: marker, character code, stroke count
//! 0 0 0         % stroke: dx, dy, pen (0 = up, 1 = down)
//! 5 18 1
//! 10 0 1
//! ```
//!
//! `999` is the only recognized record marker. Records repeat until end of
//! input. Once at least one record has loaded, a line that no longer looks
//! like a header ends parsing without error (permissive truncation); the
//! same line before any record is a format error, since an empty font is
//! unusable. A malformed *stroke* line is always a format error — the
//! loader never fills in offsets it did not read.

use std::fs::File;
use std::io::{BufRead, BufReader};
use std::path::Path;

use crate::error::{ErrorKind, PlotError, PlotResult};
use crate::glyph::{Glyph, GlyphTable, PenState, Stroke, BLANK_CODE, CODE_SPACE};

/// Record marker introducing a glyph header line.
pub const GLYPH_MARKER: i64 = 999;

/// Most records a single font may supply (one per character code).
const MAX_RECORDS: usize = CODE_SPACE;

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Load a font from a file on disk.
pub fn load_font_file(path: &Path) -> PlotResult<GlyphTable> {
    let file = File::open(path).map_err(|e| {
        PlotError::new(
            ErrorKind::Io,
            format!("cannot open font file {}: {e}", path.display()),
        )
    })?;
    load_font(BufReader::new(file))
}

/// Load a font from an in-memory string.
pub fn load_font_str(source: &str) -> PlotResult<GlyphTable> {
    load_font(source.as_bytes())
}

/// Load a font from any buffered reader.
pub fn load_font<R: BufRead>(reader: R) -> PlotResult<GlyphTable> {
    let mut table = GlyphTable::new();
    let mut records = 0usize;
    let mut lines = reader.lines().enumerate();

    while let Some((idx, line)) = lines.next() {
        let lineno = idx + 1;
        let line = line.map_err(|e| PlotError::from(e).with_line(lineno))?;
        if line.trim().is_empty() {
            continue;
        }

        let header = match parse_triple(&line) {
            Some([marker, code, count]) if marker == GLYPH_MARKER => [code, count],
            _ if records > 0 => break, // end of records
            _ => {
                return Err(PlotError::new(
                    ErrorKind::Format,
                    format!("expected glyph header `{GLYPH_MARKER} <code> <count>`, got {line:?}"),
                )
                .with_line(lineno));
            }
        };
        let [code, count] = header;

        if records == MAX_RECORDS {
            return Err(PlotError::new(
                ErrorKind::Capacity,
                format!("font supplies more than {MAX_RECORDS} glyph records"),
            )
            .with_line(lineno));
        }
        if count < 0 {
            return Err(PlotError::new(
                ErrorKind::Format,
                format!("negative stroke count {count} for character code {code}"),
            )
            .with_line(lineno));
        }
        if !(0..CODE_SPACE as i64).contains(&code) {
            return Err(PlotError::new(
                ErrorKind::Format,
                format!("character code {code} outside 0..{CODE_SPACE}"),
            )
            .with_line(lineno));
        }
        #[allow(clippy::cast_possible_truncation, clippy::cast_sign_loss)]
        let code = code as u8;
        if count == 0 && code != BLANK_CODE {
            return Err(PlotError::new(
                ErrorKind::Format,
                format!("character code {code} declares zero strokes but is not the blank glyph"),
            )
            .with_line(lineno));
        }

        let strokes = read_strokes(&mut lines, code, count as usize)?;
        table.insert(Glyph { code, strokes });
        records += 1;
    }

    Ok(table)
}

// ---------------------------------------------------------------------------
// Internals
// ---------------------------------------------------------------------------

/// Read the declared number of stroke lines for one glyph.
fn read_strokes<I>(lines: &mut I, code: u8, count: usize) -> PlotResult<Vec<Stroke>>
where
    I: Iterator<Item = (usize, std::io::Result<String>)>,
{
    // The declared count is untrusted input; bound the pre-allocation.
    let mut strokes = Vec::with_capacity(count.min(256));

    while strokes.len() < count {
        let Some((idx, line)) = lines.next() else {
            return Err(PlotError::new(
                ErrorKind::Format,
                format!(
                    "character code {code}: expected {count} stroke lines, input ended after {}",
                    strokes.len()
                ),
            ));
        };
        let lineno = idx + 1;
        let line = line.map_err(|e| PlotError::from(e).with_line(lineno))?;
        if line.trim().is_empty() {
            continue;
        }

        let Some([dx, dy, flag]) = parse_triple(&line) else {
            return Err(PlotError::new(
                ErrorKind::Format,
                format!("character code {code}: malformed stroke line {line:?}"),
            )
            .with_line(lineno));
        };
        let Some(pen) = PenState::from_flag(flag) else {
            return Err(PlotError::new(
                ErrorKind::Format,
                format!("character code {code}: pen state must be 0 or 1, got {flag}"),
            )
            .with_line(lineno));
        };
        let (Ok(dx), Ok(dy)) = (i32::try_from(dx), i32::try_from(dy)) else {
            return Err(PlotError::new(
                ErrorKind::Format,
                format!("character code {code}: stroke offset out of range in {line:?}"),
            )
            .with_line(lineno));
        };

        strokes.push(Stroke::new(dx, dy, pen));
    }

    Ok(strokes)
}

/// Parse a line of exactly three whitespace-separated integers.
fn parse_triple(line: &str) -> Option<[i64; 3]> {
    let mut fields = line.split_whitespace();
    let a = fields.next()?.parse().ok()?;
    let b = fields.next()?.parse().ok()?;
    let c = fields.next()?.parse().ok()?;
    if fields.next().is_some() {
        return None;
    }
    Some([a, b, c])
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
