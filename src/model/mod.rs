pub mod config;
pub mod defaults;
pub mod roster;
pub mod stats;

pub use config::*;
pub use defaults::*;
pub use roster::*;
pub use stats::*;
