//! Text rendering of the list screens.

pub mod pagination;
pub mod tables;

pub use pagination::page_links;
pub use tables::*;
