use nametag_shared::Tick;

/// Fires once every `period` ticks
pub struct Timer {
    period: Tick,
    next: Tick,
}

impl Timer {
    /// A timer that first rings one full period after `start`
    pub fn new(period: Tick, start: Tick) -> Self {
        let period = period.max(1);
        Self {
            period,
            next: start.saturating_add(period),
        }
    }

    pub fn ringing(&self, now: Tick) -> bool {
        now >= self.next
    }

    pub fn reset(&mut self, now: Tick) {
        self.next = now.saturating_add(self.period);
    }

    pub fn period(&self) -> Tick {
        self.period
    }
}
