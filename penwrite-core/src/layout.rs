//! Greedy word-wrap layout over a glyph table.
//!
//! The engine consumes tokens from [`WordScanner`](crate::text::WordScanner)
//! and produces a lazy sequence of [`LayoutEvent`]s: one placement per
//! supported character, plus explicit break events. Wrapping is greedy and
//! whole-word: a word's full width is measured before any of its characters
//! is placed, and a word that would overflow the line wraps first — never
//! mid-word.
//!
//! Characters without a glyph-table entry are not errors. They contribute
//! zero width and emit no placement, but still occupy their slot in the
//! word (truncation accounting is unchanged).
//!
//! The Y axis points up, as on the plotter: each new line *decrements* the
//! cursor's Y by the line spacing.

use std::collections::VecDeque;
use std::io::BufRead;

use kurbo::Point;

use crate::config::{Scalar, ScaleFactor};
use crate::error::{PlotError, PlotResult};
use crate::glyph::GlyphTable;
use crate::text::{TextToken, WordScanner};

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// What a lone carriage return does to the cursor.
///
/// Plotter text sources disagree on this; the default treats `\r` as a
/// same-line cursor reset.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum CrPolicy {
    /// Reset X to the line start; Y is unchanged. No break event.
    #[default]
    ResetX,
    /// Treat `\r` exactly like `\n`: a forced line break.
    LineBreak,
}

/// Layout tuning constants.
///
/// Physical quantities (`max_line_width`, `line_spacing`) are in
/// millimetres. Advance and gap constants are in font design units and are
/// multiplied by the scale factor, so spacing tracks the text height.
#[derive(Debug, Clone, PartialEq)]
pub struct LayoutOptions {
    /// Maximum writing width, in millimetres.
    pub max_line_width: Scalar,
    /// Vertical distance between lines, in millimetres. A fixed constant;
    /// never derived from glyph geometry.
    pub line_spacing: Scalar,
    /// Nominal glyph advance, in design units.
    pub advance_units: Scalar,
    /// Extra gap between the characters of a word, in design units.
    pub char_gap_units: Scalar,
    /// Gap appended after each word, in design units.
    pub word_gap_units: Scalar,
    /// Carriage-return handling.
    pub cr_policy: CrPolicy,
}

impl Default for LayoutOptions {
    fn default() -> Self {
        Self {
            max_line_width: 100.0,
            line_spacing: 10.0,
            advance_units: 15.0,
            char_gap_units: 2.0,
            word_gap_units: 10.0,
            cr_policy: CrPolicy::ResetX,
        }
    }
}

// ---------------------------------------------------------------------------
// Events
// ---------------------------------------------------------------------------

/// Why a line ended.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum BreakKind {
    /// An explicit newline in the input.
    Forced,
    /// The next word would have overflowed the line.
    Wrap,
}

/// One character placed at an absolute origin, in millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Placement {
    /// The character code; always present in the glyph table.
    pub code: u8,
    /// Bottom-left origin of the glyph.
    pub origin: Point,
}

/// One event of the layout sequence, in document order.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LayoutEvent {
    /// Place a glyph.
    Place(Placement),
    /// Start a new line.
    Break(BreakKind),
}

// ---------------------------------------------------------------------------
// Layout engine
// ---------------------------------------------------------------------------

/// Lazy single-pass layout over a text source.
///
/// The cursor is owned by the pass; iterating twice over the same source
/// requires re-opening it.
pub struct Layout<'a, R: BufRead> {
    scanner: WordScanner<R>,
    table: &'a GlyphTable,
    options: LayoutOptions,
    scale: Scalar,
    cursor: Point,
    /// Events staged for the word being placed; drained before the next
    /// token is pulled.
    staged: VecDeque<LayoutEvent>,
}

impl<'a, R: BufRead> Layout<'a, R> {
    /// Create a layout pass over `text`.
    pub fn new(text: R, table: &'a GlyphTable, scale: ScaleFactor, options: LayoutOptions) -> Self {
        Self {
            scanner: WordScanner::new(text),
            table,
            options,
            scale: scale.ratio(),
            cursor: Point::ZERO,
            staged: VecDeque::new(),
        }
    }

    /// Scaled advance of one supported character, gap included.
    fn char_step(&self) -> Scalar {
        (self.options.advance_units + self.options.char_gap_units) * self.scale
    }

    /// Scaled width of a whole word. Unsupported characters count zero.
    fn word_width(&self, word: &[u8]) -> Scalar {
        let supported = word.iter().filter(|&&b| self.table.contains(b)).count();
        supported as Scalar * self.char_step()
    }

    /// Reset the cursor to the start of the next line.
    fn break_line(&mut self) {
        self.cursor.x = 0.0;
        self.cursor.y -= self.options.line_spacing;
    }

    /// Stage the events for one word: an optional wrap break, then one
    /// placement per supported character.
    fn stage_word(&mut self, word: &[u8]) {
        if self.cursor.x + self.word_width(word) > self.options.max_line_width {
            self.staged.push_back(LayoutEvent::Break(BreakKind::Wrap));
            self.break_line();
        }

        let step = self.char_step();
        for &code in word {
            if self.table.contains(code) {
                self.staged.push_back(LayoutEvent::Place(Placement {
                    code,
                    origin: self.cursor,
                }));
                self.cursor.x += step;
            }
        }
        self.cursor.x += self.options.word_gap_units * self.scale;
    }
}

impl<R: BufRead> Iterator for Layout<'_, R> {
    type Item = PlotResult<LayoutEvent>;

    fn next(&mut self) -> Option<Self::Item> {
        loop {
            if let Some(event) = self.staged.pop_front() {
                return Some(Ok(event));
            }

            let token = match self.scanner.next()? {
                Ok(token) => token,
                Err(e) => return Some(Err(PlotError::from(e))),
            };

            match token {
                TextToken::Word(word) => self.stage_word(&word),
                TextToken::LineBreak => {
                    self.break_line();
                    return Some(Ok(LayoutEvent::Break(BreakKind::Forced)));
                }
                TextToken::CarriageReturn => match self.options.cr_policy {
                    CrPolicy::ResetX => self.cursor.x = 0.0,
                    CrPolicy::LineBreak => {
                        self.break_line();
                        return Some(Ok(LayoutEvent::Break(BreakKind::Forced)));
                    }
                },
            }
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
