//! Post-processing filters
//!
//! Optional passes that run after the style's own stages:
//!
//! - [`smooth_edges`]: blend with a Gaussian blur, softening block edges.
//! - [`harden_edges`]: unsharp mask, the opposite of smoothing.
//! - [`cartoon`]: overlay inverted luma edges.
//!
//! All three blend in floating point and round back to 8 bits once, so
//! their output may contain colors outside the quantized palette.

mod blur;
mod effects;

pub use effects::{cartoon, harden_edges, smooth_edges, CARTOON_EDGE_WEIGHT};
