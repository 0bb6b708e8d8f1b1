//! Domain types for slicelab

pub mod bar;
pub mod execution;
pub mod order;

pub use bar::Bar;
pub use execution::{ExecutionResult, ExecutionSlice};
pub use order::{Order, Side, DEFAULT_NUM_SLICES};
