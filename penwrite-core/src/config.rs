//! Plot configuration: text height validation and scale derivation.
//!
//! The scale factor is a pure ratio from font design units to output
//! millimetres. The font's design space is [`REFERENCE_HEIGHT_UNITS`] tall,
//! so requesting a text height equal to that constant yields scale 1.0.
//! Height *bounds* are a separate, CLI-facing concern: [`TextHeight`]
//! enforces them, [`ScaleFactor`] does not.

use crate::error::{ErrorKind, PlotError, PlotResult};

/// Convenience alias for all physical quantities (millimetres).
pub type Scalar = f64;

// ---------------------------------------------------------------------------
// Constants
// ---------------------------------------------------------------------------

/// Height of the font's design space, in design units.
pub const REFERENCE_HEIGHT_UNITS: Scalar = 18.0;

/// Smallest accepted text height, in millimetres.
pub const MIN_TEXT_HEIGHT_MM: Scalar = 4.0;

/// Largest accepted text height, in millimetres.
pub const MAX_TEXT_HEIGHT_MM: Scalar = 10.0;

// ---------------------------------------------------------------------------
// Text height
// ---------------------------------------------------------------------------

/// A validated text height in millimetres.
///
/// Construction fails with a [`ErrorKind::Validation`] error outside the
/// `[4, 10]` mm range. Recovery (re-prompting) is the caller's concern.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct TextHeight(Scalar);

impl TextHeight {
    /// Validate a height in millimetres.
    pub fn new(mm: Scalar) -> PlotResult<Self> {
        if !mm.is_finite() || mm < MIN_TEXT_HEIGHT_MM || mm > MAX_TEXT_HEIGHT_MM {
            return Err(PlotError::new(
                ErrorKind::Validation,
                format!(
                    "text height {mm} mm is outside the accepted range \
                     {MIN_TEXT_HEIGHT_MM}-{MAX_TEXT_HEIGHT_MM} mm"
                ),
            ));
        }
        Ok(Self(mm))
    }

    /// The height in millimetres.
    #[must_use]
    pub const fn millimetres(self) -> Scalar {
        self.0
    }
}

// ---------------------------------------------------------------------------
// Scale factor
// ---------------------------------------------------------------------------

/// Ratio converting font design units to output millimetres.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ScaleFactor(Scalar);

impl ScaleFactor {
    /// Derive the scale for an arbitrary text height.
    ///
    /// This is the pure ratio `height / REFERENCE_HEIGHT_UNITS`; it does
    /// not enforce the CLI height bounds.
    #[must_use]
    pub fn from_height(height_mm: Scalar) -> Self {
        Self(height_mm / REFERENCE_HEIGHT_UNITS)
    }

    /// The raw ratio.
    #[must_use]
    pub const fn ratio(self) -> Scalar {
        self.0
    }
}

impl From<TextHeight> for ScaleFactor {
    fn from(height: TextHeight) -> Self {
        Self::from_height(height.millimetres())
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
