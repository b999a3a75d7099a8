//! Operator side of the announcer: collecting positions, showing the next
//! stops and keeping the session going between updates.

pub mod announcer;
pub mod input;
pub mod viewer;

pub use announcer::{run_session, TripAnnouncer};
pub use input::{ConsoleInput, PositionSource, ScriptedInput};
pub use viewer::{format_countdown, ConsoleViewer, TripViewer};
