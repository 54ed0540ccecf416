pub use {burrow::*, solver::*, util::*};

pub mod burrow;
pub mod solver;
pub mod util;
