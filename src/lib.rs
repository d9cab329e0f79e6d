pub mod core;
pub mod error;
pub mod policy;
pub mod sim;

pub use crate::core::{Process, ProcessId, ReadyQueue, SchedEvent, Segment, Ticks};
pub use crate::error::SimError;
pub use crate::policy::Policy;
pub use crate::sim::{simulate, SimOutcome};
