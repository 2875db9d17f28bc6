//! hueramp engine crate.
//!
//! Turns a sparse, user-edited set of positioned color points into a densely
//! sampled RGBA lookup table. Control points carry a position in [0, 1], an
//! HSVA color, and a per-channel activation set; each of the four channels
//! interpolates independently over the points active on it. The model
//! persists to a versioned text format and exports flat RGBA tables at any
//! resolution, optionally through a remap expression from [`hueramp_expr`].
//!
//! The engine is single-threaded and synchronous: every edit operation runs
//! a full recompute before returning, so sampled tables are never stale.

pub mod codec;
pub mod color;
pub mod config;
pub mod error;
pub mod gradient;
pub mod logging;
pub mod point;

pub use codec::{parse_gradient_file, write_flat_table, write_gradient_file};
pub use color::{Hsva, Rgba};
pub use config::EngineConfig;
pub use error::FormatError;
pub use gradient::Gradient;
pub use point::{Channel, ChannelSet, ColorPoint};

// Re-export the remap surface so embedders rarely need hueramp-expr directly.
pub use hueramp_expr::{CompileError, RemapFn};
