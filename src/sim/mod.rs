pub mod driver;
pub mod metrics;
pub mod trainer;
pub mod workload;

pub use driver::{simulate, SimOutcome};
pub use metrics::{average_response, average_turnaround, average_waiting};
pub use trainer::{evaluate, train, EpisodeStats, TrainingConfig};
pub use workload::{generate_processes, sample_processes};
