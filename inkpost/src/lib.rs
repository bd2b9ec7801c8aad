pub mod command;
pub mod display;
pub mod utils;

pub const VERSION: &str = env!("CARGO_PKG_VERSION");
