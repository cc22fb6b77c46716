pub mod fix;
pub mod sentence;
pub mod track;

pub use fix::*;
pub use sentence::*;
pub use track::*;
