pub mod change;
pub mod dispatch;
pub mod error;
pub mod queue;
pub mod source;
pub mod target;

pub use change::{ChangeRecord, TriggerEvent, TypeTag};
pub use dispatch::DispatchResult;
pub use error::NormalizeError;
pub use queue::QueueMetadata;
pub use source::{EntryPoint, EventSource};
pub use target::{Target, TargetTable};
