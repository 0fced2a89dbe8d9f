//! Product routing and stock movements.

mod actions;
pub mod entity;

pub use actions::*;
