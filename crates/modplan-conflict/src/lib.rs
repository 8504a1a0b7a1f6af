//! Conflict detection for modpacks: loader-family incompatibilities,
//! known-incompatible mod pairs, declared conflicts, namespace collisions,
//! and a heuristic load order built from explicit ordering hints.

pub mod detector;
pub mod loader;
pub mod tables;
