mod deferred_queue;
mod deferred_task;

pub use deferred_queue::DeferredQueue;
pub use deferred_task::{DeferredAction, DeferredTask, Precondition};
