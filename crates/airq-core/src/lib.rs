pub mod reading;
pub mod scoring;

pub use reading::*;
pub use scoring::*;
