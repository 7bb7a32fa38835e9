mod event_ingestor;
mod lifecycle_event;
mod notifier;

pub use lifecycle_event::LifecycleEvent;
pub use notifier::Notifier;

pub(crate) use event_ingestor::EventIngestor;
pub(crate) use notifier::NotificationQueue;
