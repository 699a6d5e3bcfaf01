//! Collaborator traits
//!
//! These traits define the interface between the control cycle and the
//! parts of the firmware that are outside the transport: the transport
//! itself (as seen from the foreground task), local sampling, the output
//! stage, the display and the diagnostic indicator.

pub mod io;
pub mod transport;

pub use io::{ControlOutput, Indicator, SettingsSource, StatusDisplay};
pub use transport::Transport;
