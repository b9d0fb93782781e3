//! Subcommand handlers.

pub mod catalog;
pub mod onboard;
pub mod tunnel;

pub use onboard::OnboardArgs;
