#![deny(unsafe_code)]
//! Metaball field sampling and marching-squares contouring.
//!
//! A set of moving, radius-weighted point sources ([`Ball`]) induces a scalar
//! field sampled on a fixed grid ([`FieldGrid`]). Each grid cell
//! ([`ContourCell`]) classifies its four corners against the activation
//! threshold and emits contour geometry (outline segments or filled
//! polygons) through a 16-case lookup table. The [`Simulation`] driver ties
//! source motion, field recomputation, and contouring together once per
//! frame, drawing through the [`DrawSurface`] trait.

pub mod cell;
pub mod grid;
pub mod raster;
pub mod sim;
pub mod source;
pub mod surface;

pub use cell::{CellPoint, ContourCell, ACTIVATION_THRESHOLD};
pub use grid::{FieldGrid, GridNode};
pub use raster::Raster;
pub use sim::Simulation;
pub use source::{Ball, BoundaryOutcome};
pub use surface::{DrawCommand, DrawSurface, Recording};
