//! Roots of Littlewood polynomials, drawn as a brightness field.
//!
//! For each degree every polynomial with coefficients in `{-1, +1}` is solved
//! with the Aberth-Ehrlich method ([`aberth`]), the roots are merged
//! ([`accumulate`]), rendered as an inverse-distance field on the GPU or CPU
//! ([`render`]) and added into one image ([`compositor`]).

pub mod aberth;
pub mod accumulate;
pub mod colour;
pub mod compositor;
pub mod config;
pub mod error;
pub mod littlewood;
pub mod pipeline;
pub mod polynomial;
pub mod raster;
pub mod render;

pub use aberth::{AberthSolver, Solution};
pub use accumulate::{accumulate_roots, RootSet};
pub use compositor::Compositor;
pub use config::{Backend, Config};
pub use error::{Error, Result};
pub use littlewood::Littlewood;
pub use polynomial::Polynomial;
pub use raster::Raster;
