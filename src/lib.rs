//! Star field rendering core: fixed-width catalog lookup, the sky-to-pixel projection and the
//! pass that turns one into drawing directives via the other.

pub mod catalog;
pub mod coordinates;
pub mod render;
