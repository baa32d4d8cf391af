pub mod batch;
pub mod partition;
pub mod scheduler;

pub use batch::PointBatch;
pub use partition::partition;
pub use scheduler::Scheduler;
