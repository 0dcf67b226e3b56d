pub mod roster_ops;
pub mod stats;
