//! Utility helpers: generational ids, vector math, logging and profiling.

pub mod allocator;
pub mod logging;
pub mod math;
pub mod profiling;

pub use allocator::{Arena, EntityId};
pub use math::*;
pub use profiling::{PassProfiler, ScopedTimer};
