pub mod chart;
pub mod controls;
pub mod dashboard;
pub mod render;
pub mod table;

pub use chart::*;
pub use controls::*;
pub use dashboard::*;
pub use render::*;
pub use table::*;
