//! Execution simulator and its diagnostic hook.

pub mod observer;
pub mod simulator;

pub use observer::{ExecutionObserver, LogObserver, NullObserver};
pub use simulator::{execute, execute_twap, execute_vwap, slippage_bps};
