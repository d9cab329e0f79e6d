pub mod activity;
pub mod driver;
pub mod event;
pub mod feeder;
pub mod observer;
pub mod state;

pub use activity::{Activity, Step};
pub use driver::{ActivityId, Engine};
pub use event::SchedEvent;
pub use feeder::ArrivalFeeder;
pub use state::{Priority, Process, ProcessId, ReadyQueue, Segment, SimCtx, Ticks};
