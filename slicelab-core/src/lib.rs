//! slicelab core: order slicing against historical daily bars.
//!
//! This crate contains the execution engine:
//! - Domain types (bars, orders, slices, execution results)
//! - Validated market data with a single missing-volume cleaning step
//! - CSV ingestion and synthetic bars behind a provider trait
//! - TWAP and VWAP allocation policies
//! - One shared simulator that prices slices at the close and measures
//!   slippage against the close at the window start

pub mod allocation;
pub mod data;
pub mod domain;
pub mod engine;
pub mod error;

pub use allocation::{AllocationPolicy, Strategy};
pub use data::{DataError, MarketData};
pub use domain::{Bar, ExecutionResult, ExecutionSlice, Order, Side};
pub use engine::{
    execute, execute_twap, execute_vwap, ExecutionObserver, LogObserver, NullObserver,
};
pub use error::ExecutionError;
