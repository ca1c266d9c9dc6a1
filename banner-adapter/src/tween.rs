/// A linear, duration-based offset tween for surface-driven smooth scrolling.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Tween {
    pub from: u64,
    pub to: u64,
    pub start_ms: u64,
    pub duration_ms: u64,
}

impl Tween {
    pub fn new(from: u64, to: u64, start_ms: u64, duration_ms: u64) -> Self {
        Self {
            from,
            to,
            start_ms,
            duration_ms: duration_ms.max(1),
        }
    }

    pub fn is_done(&self, now_ms: u64) -> bool {
        now_ms.saturating_sub(self.start_ms) >= self.duration_ms
    }

    pub fn sample(&self, now_ms: u64) -> u64 {
        let elapsed = now_ms
            .saturating_sub(self.start_ms)
            .min(self.duration_ms);
        let span = u128::from(self.from.abs_diff(self.to));
        let covered = span * u128::from(elapsed) / u128::from(self.duration_ms);
        let covered = u64::try_from(covered).unwrap_or(u64::MAX);
        if self.to >= self.from {
            self.from.saturating_add(covered)
        } else {
            self.from.saturating_sub(covered)
        }
    }

    /// Restarts from the current sample towards `new_to`.
    pub fn retarget(&mut self, now_ms: u64, new_to: u64, duration_ms: u64) {
        let cur = self.sample(now_ms);
        *self = Self::new(cur, new_to, now_ms, duration_ms);
    }
}
