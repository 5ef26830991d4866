//! Motion-command generation and device transmission for penwrite.

pub mod command;
pub mod device;
pub mod emit;
pub mod plot;
pub mod preview;
