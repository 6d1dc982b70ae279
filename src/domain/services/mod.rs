// Domain services hold the core logic: which category a log belongs to,
// what a packet turns into, and how the engine is driven.
// They reach infrastructure only through the ports.

pub mod classifier;
pub mod decoder;
pub mod runner;

pub use classifier::*;
pub use decoder::*;
pub use runner::*;
