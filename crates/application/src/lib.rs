//! Application layer - Conveyor actuation use cases

pub mod conveyor;

pub use conveyor::{ActuationDispatcher, ActuationPolicy, ActuationReport, ConveyorDriver};
