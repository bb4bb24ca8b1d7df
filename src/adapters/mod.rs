//! Adapters - production implementations of the core's ports

pub mod console;
pub mod system_trash;

pub use console::ConsoleProgress;
pub use system_trash::SystemTrash;
