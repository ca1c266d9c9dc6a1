use crate::options::STEP_INTERVAL_MS;
use crate::{AutoplayMode, AutoplayState, BannerView, ItemView, ScrollSurface};

/// Autoplay scheduler.
///
/// Owns the [`AutoplayState`] and its transitions. What happens when a callback comes due is
/// decided by [`BannerView`], which owns the surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
pub(crate) struct Autoplay {
    state: AutoplayState,
}

/// A callback that came due.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub(crate) struct Due {
    pub at_ms: u64,
    pub scrolled: u32,
}

impl Autoplay {
    pub fn state(&self) -> AutoplayState {
        self.state
    }

    /// Returns `false` if autoplay was already running.
    pub fn start(&mut self, now_ms: u64, gap_ms: u64) -> bool {
        if self.state.is_running() {
            return false;
        }
        self.state = AutoplayState::Scheduled {
            due_ms: now_ms.saturating_add(gap_ms),
        };
        true
    }

    /// Returns `false` if autoplay was not running.
    pub fn stop(&mut self) -> bool {
        if !self.state.is_running() {
            return false;
        }
        self.state = AutoplayState::Stopped;
        true
    }

    /// Drops the pending callback but stays running.
    pub fn suspend(&mut self) {
        self.state = match self.state {
            AutoplayState::Stopped => AutoplayState::Stopped,
            paused @ AutoplayState::Paused { .. } => paused,
            AutoplayState::Scheduled { .. } => AutoplayState::Paused {
                resume_animation: false,
            },
            AutoplayState::Animating { .. } => AutoplayState::Paused {
                resume_animation: true,
            },
        };
    }

    /// Reschedules a running autoplay: immediately when a transition was interrupted,
    /// otherwise after a full gap.
    pub fn resume(&mut self, now_ms: u64, gap_ms: u64) {
        if !self.state.is_running() {
            return;
        }
        let due_ms = if self.state.is_animating() {
            now_ms
        } else {
            now_ms.saturating_add(gap_ms)
        };
        self.state = AutoplayState::Scheduled { due_ms };
    }

    pub fn schedule(&mut self, due_ms: u64) {
        if self.state.is_running() {
            self.state = AutoplayState::Scheduled { due_ms };
        }
    }

    pub fn animate(&mut self, due_ms: u64, scrolled: u32) {
        if self.state.is_running() {
            self.state = AutoplayState::Animating { due_ms, scrolled };
        }
    }

    /// Ends an in-flight stepped transition once the surface was moved back onto a page.
    ///
    /// The next transition starts a full gap after the step that was pending. Returns `false`
    /// when no transition was in flight.
    pub fn abort_transition(&mut self, gap_ms: u64) -> bool {
        match self.state {
            AutoplayState::Animating { due_ms, .. } => {
                self.state = AutoplayState::Scheduled {
                    due_ms: due_ms.saturating_add(gap_ms),
                };
                true
            }
            _ => false,
        }
    }

    pub fn due(&self, now_ms: u64) -> Option<Due> {
        match self.state {
            AutoplayState::Scheduled { due_ms } if due_ms <= now_ms => Some(Due {
                at_ms: due_ms,
                scrolled: 0,
            }),
            AutoplayState::Animating { due_ms, scrolled } if due_ms <= now_ms => Some(Due {
                at_ms: due_ms,
                scrolled,
            }),
            _ => None,
        }
    }
}

/// Distance of one incremental scroll so that `extent` is covered in roughly `duration_ms`.
///
/// Never zero, so a transition always terminates.
pub(crate) fn step_distance(extent: u32, duration_ms: u64) -> u32 {
    let steps = (duration_ms / STEP_INTERVAL_MS).max(1);
    let per_step = u64::from(extent) / steps;
    u32::try_from(per_step).unwrap_or(u32::MAX).max(1)
}

impl<H: ItemView, S: ScrollSurface> BannerView<H, S> {
    /// Runs every autoplay callback due at or before `now_ms`.
    ///
    /// Missed animation steps are caught up; a gap is always measured from `now_ms`, so a late
    /// tick moves at most one page.
    pub(crate) fn run_autoplay(&mut self, now_ms: u64) {
        while let Some(due) = self.autoplay.due(now_ms) {
            match self.options.mode {
                AutoplayMode::Paged => self.jump_tick(now_ms),
                AutoplayMode::Stepped => self.step_tick(due, now_ms),
            }
        }
    }

    fn jump_tick(&mut self, now_ms: u64) {
        let next_due = now_ms.saturating_add(self.options.effective_gap_ms());
        let count = self.wrapper.item_count();
        if count <= 1 {
            self.autoplay.schedule(next_due);
            return;
        }

        let next = (self.current_index + 1) % count;
        match self.surface.set_current_item(next) {
            Ok(()) => {
                self.current_index = next;
                btrace!(position = next, "autoplay: jumped");
                self.emit_selected();
            }
            Err(_err) => {
                bwarn!(position = next, error = %_err, "autoplay: jump failed, retrying next tick");
            }
        }
        self.autoplay.schedule(next_due);
    }

    fn step_tick(&mut self, due: Due, now_ms: u64) {
        let next_due = now_ms.saturating_add(self.options.effective_gap_ms());
        let count = self.wrapper.item_count();
        let orientation = self.options.orientation;
        let extent = self.surface.viewport().extent(orientation);
        if count <= 1 || extent == 0 {
            self.autoplay.schedule(next_due);
            return;
        }

        let remaining = extent.saturating_sub(due.scrolled);
        let step = step_distance(extent, self.options.scroll_duration_ms).min(remaining);
        if step > 0 {
            let (dx, dy) = orientation.delta(i32::try_from(step).unwrap_or(i32::MAX));
            self.surface.scroll_by(dx, dy);
        }

        let scrolled = due.scrolled.saturating_add(step);
        if scrolled < extent {
            self.autoplay
                .animate(due.at_ms.saturating_add(STEP_INTERVAL_MS), scrolled);
            return;
        }

        self.current_index = (self.current_index + 1) % count;
        btrace!(position = self.current_index, "autoplay: transition finished");
        self.autoplay.schedule(next_due);
        self.emit_selected();
    }
}
