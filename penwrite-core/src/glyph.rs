//! Glyph and stroke data model.
//!
//! A glyph is the stroke program for one character: an ordered list of pen
//! movements in font design units. Glyphs are owned by the [`GlyphTable`],
//! built once by the font loader and read-only thereafter. Lookup is
//! direct-indexed over the 7-bit character-code space, so every query is
//! O(1) regardless of how many glyphs the font supplies.

// ---------------------------------------------------------------------------
// Code space
// ---------------------------------------------------------------------------

/// Number of addressable character codes (7-bit ASCII).
pub const CODE_SPACE: usize = 128;

/// The character code of the blank glyph, the only glyph permitted to
/// carry zero strokes.
pub const BLANK_CODE: u8 = b' ';

// ---------------------------------------------------------------------------
// Pen state
// ---------------------------------------------------------------------------

/// Pen state for one stroke.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum PenState {
    /// Travel move: the pen is lifted.
    Up,
    /// Drawing move: the pen is on the page.
    Down,
}

impl PenState {
    /// Decode the font file's pen flag: 0 = up, 1 = down.
    #[must_use]
    pub const fn from_flag(flag: i64) -> Option<Self> {
        match flag {
            0 => Some(Self::Up),
            1 => Some(Self::Down),
            _ => None,
        }
    }

    /// Returns `true` for a drawing move.
    #[must_use]
    pub const fn is_down(self) -> bool {
        matches!(self, Self::Down)
    }
}

// ---------------------------------------------------------------------------
// Stroke and glyph
// ---------------------------------------------------------------------------

/// One pen movement within a glyph: an offset from the glyph origin, in
/// font design units.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Stroke {
    /// Horizontal offset from the glyph origin.
    pub dx: i32,
    /// Vertical offset from the glyph origin.
    pub dy: i32,
    /// Whether the pen draws while moving to this offset.
    pub pen: PenState,
}

impl Stroke {
    /// Create a new stroke.
    #[must_use]
    pub const fn new(dx: i32, dy: i32, pen: PenState) -> Self {
        Self { dx, dy, pen }
    }
}

/// The stroke program for one character.
///
/// Stroke order is drawing order and is preserved exactly as loaded.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct Glyph {
    /// The character code this glyph represents.
    pub code: u8,
    /// The ordered stroke sequence.
    pub strokes: Vec<Stroke>,
}

// ---------------------------------------------------------------------------
// Glyph table
// ---------------------------------------------------------------------------

/// Read-only mapping from character code to glyph.
///
/// Built once by the font loader; queried by the layout engine and the
/// stroke emitter. Iteration over [`glyphs`](Self::glyphs) follows
/// insertion (file) order, which keeps loader output deterministic.
#[derive(Debug, Clone)]
pub struct GlyphTable {
    /// Direct-indexed slots, one per character code.
    slots: Vec<Option<Glyph>>,
    /// Codes in insertion order.
    order: Vec<u8>,
}

impl GlyphTable {
    /// Create an empty table.
    #[must_use]
    pub fn new() -> Self {
        Self {
            slots: vec![None; CODE_SPACE],
            order: Vec::new(),
        }
    }

    /// Insert a glyph, replacing any earlier glyph for the same code.
    ///
    /// A replaced code keeps its original position in insertion order.
    pub(crate) fn insert(&mut self, glyph: Glyph) {
        let idx = glyph.code as usize;
        if self.slots[idx].is_none() {
            self.order.push(glyph.code);
        }
        self.slots[idx] = Some(glyph);
    }

    /// Look up the glyph for a character code.
    #[must_use]
    pub fn get(&self, code: u8) -> Option<&Glyph> {
        self.slots.get(code as usize)?.as_ref()
    }

    /// Whether the table has a glyph for `code`.
    #[must_use]
    pub fn contains(&self, code: u8) -> bool {
        self.get(code).is_some()
    }

    /// Number of distinct glyphs in the table.
    #[must_use]
    pub fn len(&self) -> usize {
        self.order.len()
    }

    /// Whether the table is empty.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.order.is_empty()
    }

    /// Iterate over glyphs in insertion order.
    pub fn glyphs(&self) -> impl Iterator<Item = &Glyph> {
        self.order
            .iter()
            .filter_map(|&code| self.slots[code as usize].as_ref())
    }
}

impl Default for GlyphTable {
    fn default() -> Self {
        Self::new()
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn glyph(code: u8, strokes: usize) -> Glyph {
        Glyph {
            code,
            strokes: vec![Stroke::new(0, 0, PenState::Up); strokes],
        }
    }

    #[test]
    fn pen_flag_decoding() {
        assert_eq!(PenState::from_flag(0), Some(PenState::Up));
        assert_eq!(PenState::from_flag(1), Some(PenState::Down));
        assert_eq!(PenState::from_flag(2), None);
        assert_eq!(PenState::from_flag(-1), None);
        assert!(PenState::Down.is_down());
        assert!(!PenState::Up.is_down());
    }

    #[test]
    fn empty_table() {
        let table = GlyphTable::new();
        assert!(table.is_empty());
        assert_eq!(table.len(), 0);
        assert!(table.get(b'A').is_none());
        assert!(!table.contains(b'A'));
    }

    #[test]
    fn insert_and_lookup() {
        let mut table = GlyphTable::new();
        table.insert(glyph(b'A', 3));
        table.insert(glyph(b'B', 5));

        assert_eq!(table.len(), 2);
        assert_eq!(table.get(b'A').map(|g| g.strokes.len()), Some(3));
        assert_eq!(table.get(b'B').map(|g| g.strokes.len()), Some(5));
        assert!(table.get(b'C').is_none());
    }

    #[test]
    fn lookup_ignores_high_codes() {
        let table = GlyphTable::new();
        assert!(table.get(200).is_none());
        assert!(table.get(u8::MAX).is_none());
    }

    #[test]
    fn iteration_follows_insertion_order() {
        let mut table = GlyphTable::new();
        table.insert(glyph(b'Z', 1));
        table.insert(glyph(b'A', 1));
        table.insert(glyph(b'M', 1));

        let codes: Vec<u8> = table.glyphs().map(|g| g.code).collect();
        assert_eq!(codes, vec![b'Z', b'A', b'M']);
    }

    #[test]
    fn replacement_keeps_order_position() {
        let mut table = GlyphTable::new();
        table.insert(glyph(b'A', 1));
        table.insert(glyph(b'B', 1));
        table.insert(glyph(b'A', 9));

        assert_eq!(table.len(), 2);
        let codes: Vec<u8> = table.glyphs().map(|g| g.code).collect();
        assert_eq!(codes, vec![b'A', b'B']);
        assert_eq!(table.get(b'A').map(|g| g.strokes.len()), Some(9));
    }
}
