pub mod events;
pub mod state;
pub mod view;

pub use events::apply_edit;
pub use state::FormState;
pub use view::{TerminalView, Widgets};

#[cfg(test)]
#[path = "tests/ui_tests.rs"]
mod ui_tests;
