//! SVG preview of a command stream.
//!
//! Renders the toolpath a device would draw: `G1` runs chain into path
//! subpaths, `G0` moves break them. Plotter coordinates have Y pointing
//! **up**; SVG has Y pointing **down**. All Y coordinates are negated at
//! render time so no global transform or `viewBox` trick is needed. Path
//! data is built as raw `d` strings to keep full `f64` precision under
//! our own formatting control.

use kurbo::Point;
use svg::node::element::Path as SvgPath;
use svg::Document;

use penwrite_core::config::Scalar;

use crate::command::Command;

// ---------------------------------------------------------------------------
// Options
// ---------------------------------------------------------------------------

/// Options controlling SVG output.
#[derive(Debug, Clone)]
pub struct PreviewOptions {
    /// Extra margin around the bounding box, in millimetres.
    pub margin: Scalar,
    /// Decimal places for coordinates.
    pub precision: usize,
    /// Stroke width of the drawn line, in millimetres.
    pub stroke_width: Scalar,
}

impl Default for PreviewOptions {
    fn default() -> Self {
        Self {
            margin: 2.0,
            precision: 2,
            stroke_width: 0.35,
        }
    }
}

// ---------------------------------------------------------------------------
// Public API
// ---------------------------------------------------------------------------

/// Render a command stream to an SVG [`Document`].
#[must_use]
pub fn render(commands: &[Command], opts: &PreviewOptions) -> Document {
    let mut walk = Walk::new(opts.precision);
    for command in commands {
        walk.step(command);
    }

    let (min, max) = walk.bounds();
    let view_x = min.x - opts.margin;
    let view_y = -max.y - opts.margin;
    let view_w = (max.x - min.x) + 2.0 * opts.margin;
    let view_h = (max.y - min.y) + 2.0 * opts.margin;

    let path = SvgPath::new()
        .set("d", walk.data)
        .set("fill", "none")
        .set("stroke", "black")
        .set("stroke-width", opts.stroke_width)
        .set("stroke-linecap", "round")
        .set("stroke-linejoin", "round");

    Document::new()
        .set("width", format!("{view_w}mm"))
        .set("height", format!("{view_h}mm"))
        .set("viewBox", (view_x, view_y, view_w, view_h))
        .add(path)
}

/// Render a command stream to an SVG string.
#[must_use]
pub fn render_to_string(commands: &[Command], opts: &PreviewOptions) -> String {
    render(commands, opts).to_string()
}

// ---------------------------------------------------------------------------
// Toolpath walk
// ---------------------------------------------------------------------------

/// Walks the command stream, accumulating path data and ink bounds.
struct Walk {
    precision: usize,
    position: Point,
    /// Whether the previous command was a draw (the subpath is open).
    chained: bool,
    data: String,
    ink_min: Option<Point>,
    ink_max: Point,
}

impl Walk {
    fn new(precision: usize) -> Self {
        Self {
            precision,
            position: Point::ZERO,
            chained: false,
            data: String::new(),
            ink_min: None,
            ink_max: Point::ZERO,
        }
    }

    fn step(&mut self, command: &Command) {
        match command {
            Command::Draw(target) => {
                if !self.chained {
                    let start = self.position;
                    self.push_move(start);
                    self.cover(start);
                }
                self.push_line(*target);
                self.cover(*target);
                self.position = *target;
                self.chained = true;
            }
            Command::Rapid(target) => {
                self.position = *target;
                self.chained = false;
            }
            Command::Home { .. } => {
                self.position = Point::ZERO;
                self.chained = false;
            }
            Command::PenMotorOn | Command::Speed(_) => {}
        }
    }

    fn push_move(&mut self, p: Point) {
        if !self.data.is_empty() {
            self.data.push(' ');
        }
        let prec = self.precision;
        self.data
            .push_str(&format!("M{:.prec$} {:.prec$}", p.x, -p.y));
    }

    fn push_line(&mut self, p: Point) {
        let prec = self.precision;
        self.data
            .push_str(&format!(" L{:.prec$} {:.prec$}", p.x, -p.y));
    }

    /// Extend the ink bounds to cover `p`.
    fn cover(&mut self, p: Point) {
        match &mut self.ink_min {
            None => {
                self.ink_min = Some(p);
                self.ink_max = p;
            }
            Some(min) => {
                min.x = min.x.min(p.x);
                min.y = min.y.min(p.y);
                self.ink_max.x = self.ink_max.x.max(p.x);
                self.ink_max.y = self.ink_max.y.max(p.y);
            }
        }
    }

    fn bounds(&self) -> (Point, Point) {
        match self.ink_min {
            Some(min) => (min, self.ink_max),
            None => (Point::ZERO, Point::ZERO),
        }
    }
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------

#[cfg(test)]
mod tests {
    use super::*;

    fn svg_of(commands: &[Command]) -> String {
        render_to_string(commands, &PreviewOptions::default())
    }

    #[test]
    fn draw_chain_becomes_one_subpath() {
        let svg = svg_of(&[
            Command::Rapid(Point::new(0.0, 0.0)),
            Command::Draw(Point::new(5.0, 18.0)),
            Command::Draw(Point::new(10.0, 0.0)),
        ]);
        assert!(svg.contains("<svg"), "missing svg root: {svg}");
        assert!(
            svg.contains("M0.00 0.00 L5.00 -18.00 L10.00 0.00"),
            "missing chained subpath: {svg}"
        );
    }

    #[test]
    fn rapid_breaks_the_subpath() {
        let svg = svg_of(&[
            Command::Draw(Point::new(10.0, 0.0)),
            Command::Rapid(Point::new(20.0, 0.0)),
            Command::Draw(Point::new(30.0, 0.0)),
        ]);
        assert!(
            svg.contains("M20.00 0.00 L30.00 0.00"),
            "second subpath must restart after the rapid: {svg}"
        );
    }

    #[test]
    fn setup_commands_leave_no_ink() {
        let svg = svg_of(&[
            Command::Home { feed_rate: 1000 },
            Command::PenMotorOn,
            Command::Speed(0),
        ]);
        assert!(!svg.contains('L'), "setup must not draw: {svg}");
    }

    #[test]
    fn y_axis_is_flipped() {
        let svg = svg_of(&[Command::Draw(Point::new(0.0, 18.0))]);
        assert!(svg.contains("L0.00 -18.00"), "Y must be negated: {svg}");
    }
}
