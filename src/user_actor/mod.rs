//! Routing for user resources.

pub mod entity;
