//! Core

// Re-export.
pub mod camera;
pub mod film;
pub mod geometry;
pub mod glint;
pub mod integrator;
pub mod light;
pub mod reflection;
pub mod rng;
pub mod sampling;
pub mod scene;
pub mod spectrum;
