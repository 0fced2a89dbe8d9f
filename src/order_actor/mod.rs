//! Routing for order resources.

pub mod entity;
