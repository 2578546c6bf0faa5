mod core;
mod event_loop;
mod input_ops;
pub(crate) mod terminal_session;

#[cfg(test)]
mod tests;

pub use self::core::{App, StatusState};
pub use input_ops::InputOutcome;
