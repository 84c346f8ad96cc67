#![deny(unsafe_code)]
//! Core types for the metaballs engine.
//!
//! Provides the `Rgba` color type, the clamped `SimConfig` simulation
//! configuration (`BoundaryPolicy`, `DrawLayers`), the `Xorshift64` PRNG,
//! `SimError`, and JSON parameter helpers.

pub mod color;
pub mod config;
pub mod error;
pub mod params;
pub mod prng;

pub use color::Rgba;
pub use config::{
    BoundaryPolicy, DrawLayers, SimConfig, MAX_BALL_COUNT, MAX_BALL_RADIUS, MAX_RESOLUTION,
    MIN_BALL_COUNT, MIN_BALL_RADIUS, MIN_RESOLUTION,
};
pub use error::SimError;
pub use prng::Xorshift64;
