pub mod calculation;

pub use calculation::*;
