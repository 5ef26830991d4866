//! Motion-command model and its textual wire format.
//!
//! The plotter protocol is line-oriented G-code with a fixed shape: every
//! command is one `\n`-terminated line, and moves carry two-decimal-place
//! coordinates. Only straight moves exist — no arcs, no interpolation.
//!
//! | Command              | Wire form              |
//! |----------------------|------------------------|
//! | Travel move (pen up) | `G0 X12.00 Y-3.50`     |
//! | Draw move (pen down) | `G1 X12.00 Y-3.50`     |
//! | Home with feed rate  | `G1 X0 Y0 F1000`       |
//! | Pen motor enable     | `M3`                   |
//! | Actuator speed       | `S0`                   |

use std::fmt;

use kurbo::Point;

/// Default feed rate for the homing move, in mm/min.
pub const DEFAULT_FEED_RATE: u32 = 1000;

// ---------------------------------------------------------------------------
// Command
// ---------------------------------------------------------------------------

/// A single line of the plotter protocol.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum Command {
    /// `G0` — travel move with the pen up.
    Rapid(Point),
    /// `G1` — drawing move with the pen down.
    Draw(Point),
    /// `G1 X0 Y0 F<rate>` — home the carriage and set the feed rate.
    Home {
        /// Feed rate in mm/min.
        feed_rate: u32,
    },
    /// `M3` — enable the pen actuator.
    PenMotorOn,
    /// `S<speed>` — set the actuator speed.
    Speed(u32),
}

impl Command {
    /// The wire representation: the display form plus the terminating
    /// newline the device expects.
    #[must_use]
    pub fn to_wire(&self) -> String {
        format!("{self}\n")
    }
}

impl fmt::Display for Command {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Rapid(p) => write!(f, "G0 X{:.2} Y{:.2}", p.x, p.y),
            Self::Draw(p) => write!(f, "G1 X{:.2} Y{:.2}", p.x, p.y),
            Self::Home { feed_rate } => write!(f, "G1 X0 Y0 F{feed_rate}"),
            Self::PenMotorOn => write!(f, "M3"),
            Self::Speed(speed) => write!(f, "S{speed}"),
        }
    }
}

// ---------------------------------------------------------------------------
// Preamble
// ---------------------------------------------------------------------------

/// The fixed initialization sequence sent once before any text commands:
/// home with a feed rate, enable the pen motor, zero the speed. Order
/// matters; the values are configuration, never derived from input.
#[must_use]
pub fn preamble(feed_rate: u32) -> [Command; 3] {
    [
        Command::Home { feed_rate },
        Command::PenMotorOn,
        Command::Speed(0),
    ]
}

// ---------------------------------------------------------------------------
// Tests
// ---------------------------------------------------------------------------
