use std::{cmp::Reverse, collections::BinaryHeap};

use nametag_shared::{AgentId, Tick, WorldId};

use crate::schedule::{DeferredAction, DeferredTask, Precondition};

/// Tick-ordered queue of one-shot tasks. Tasks due on the same tick come out
/// in the order they were scheduled.
#[derive(Default)]
pub struct DeferredQueue {
    tasks: BinaryHeap<Reverse<DeferredTask>>,
    next_seq: u64,
}

impl DeferredQueue {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn schedule(
        &mut self,
        fire_at: Tick,
        agent_id: AgentId,
        action: DeferredAction,
        precondition: Precondition,
    ) {
        self.schedule_from(fire_at, agent_id, action, precondition, None);
    }

    /// Like `schedule`, remembering the world the agent was in
    pub fn schedule_from(
        &mut self,
        fire_at: Tick,
        agent_id: AgentId,
        action: DeferredAction,
        precondition: Precondition,
        origin: Option<WorldId>,
    ) {
        let seq = self.next_seq;
        self.next_seq = self.next_seq.wrapping_add(1);
        self.tasks.push(Reverse(DeferredTask {
            fire_at,
            seq,
            agent_id,
            action,
            precondition,
            origin,
        }));
    }

    /// Removes and returns every task due at or before `now`, earliest first
    pub fn take_due(&mut self, now: Tick) -> Vec<DeferredTask> {
        let mut due = Vec::new();
        while self
            .tasks
            .peek()
            .is_some_and(|Reverse(task)| task.fire_at <= now)
        {
            if let Some(Reverse(task)) = self.tasks.pop() {
                due.push(task);
            }
        }
        due
    }

    pub fn next_fire_at(&self) -> Option<Tick> {
        self.tasks.peek().map(|Reverse(task)| task.fire_at)
    }

    /// Number of tasks still waiting for the given agent
    pub fn pending_for(&self, agent_id: &AgentId) -> usize {
        self.tasks
            .iter()
            .filter(|Reverse(task)| task.agent_id == *agent_id)
            .count()
    }

    pub fn len(&self) -> usize {
        self.tasks.len()
    }

    pub fn is_empty(&self) -> bool {
        self.tasks.is_empty()
    }

    pub fn clear(&mut self) {
        self.tasks.clear();
    }
}
