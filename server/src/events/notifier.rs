use std::sync::mpsc::{channel, Receiver, Sender};

use log::debug;

use nametag_shared::AgentId;

use crate::events::LifecycleEvent;

/// Hands notifications from any thread over to the tick context.
///
/// Cloning is cheap. Nothing sent through a notifier is acted upon until the
/// server's next tick.
pub struct Notifier<E> {
    sender: Sender<LifecycleEvent<E>>,
}

impl<E> Clone for Notifier<E> {
    fn clone(&self) -> Self {
        Self {
            sender: self.sender.clone(),
        }
    }
}

impl<E> Notifier<E> {
    /// Queues `event`. Returns false if the server is gone.
    pub fn notify(&self, event: LifecycleEvent<E>) -> bool {
        match self.sender.send(event) {
            Ok(()) => true,
            Err(_) => {
                debug!("notification dropped, server is gone");
                false
            }
        }
    }

    pub fn cloak_on(&self, agent_id: AgentId) -> bool {
        self.notify(LifecycleEvent::CloakOn(agent_id))
    }

    pub fn cloak_off(&self, agent_id: AgentId) -> bool {
        self.notify(LifecycleEvent::CloakOff(agent_id))
    }

    pub fn profile_changed(&self, agent_id: AgentId) -> bool {
        self.notify(LifecycleEvent::ProfileChanged(agent_id))
    }
}

/// Receiving end of every `Notifier`, drained at the start of each tick
pub(crate) struct NotificationQueue<E> {
    sender: Sender<LifecycleEvent<E>>,
    receiver: Receiver<LifecycleEvent<E>>,
}

impl<E> NotificationQueue<E> {
    pub fn new() -> Self {
        let (sender, receiver) = channel();
        Self { sender, receiver }
    }

    pub fn notifier(&self) -> Notifier<E> {
        Notifier {
            sender: self.sender.clone(),
        }
    }

    /// Everything queued so far, in arrival order
    pub fn drain(&self) -> Vec<LifecycleEvent<E>> {
        self.receiver.try_iter().collect()
    }
}
