pub mod main;
pub mod sentence;

pub use main::*;
pub use sentence::*;
