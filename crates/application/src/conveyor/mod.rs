mod dispatcher;
mod driver;
mod report;

pub use dispatcher::{ActuationDispatcher, ActuationPolicy};
pub use driver::ConveyorDriver;
pub use report::{ActuationOutcome, ActuationReport};
