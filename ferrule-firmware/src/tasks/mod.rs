//! Embassy async tasks

pub mod console;

pub use console::console_task;
