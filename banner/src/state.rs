/// Autoplay lifecycle.
///
/// A pending autoplay callback only exists as the `due_ms` of `Scheduled`/`Animating`, so
/// replacing the state is what cancels it.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum AutoplayState {
    #[default]
    Stopped,
    /// Running, but suspended while the user interacts with the surface.
    Paused {
        /// The suspension interrupted a stepped animation.
        resume_animation: bool,
    },
    /// Waiting for the next move.
    Scheduled { due_ms: u64 },
    /// In the middle of a stepped page transition.
    Animating { due_ms: u64, scrolled: u32 },
}

impl AutoplayState {
    pub fn is_running(&self) -> bool {
        !matches!(self, Self::Stopped)
    }

    pub fn is_animating(&self) -> bool {
        matches!(
            self,
            Self::Animating { .. }
                | Self::Paused {
                    resume_animation: true
                }
        )
    }

    pub fn due_ms(&self) -> Option<u64> {
        match *self {
            Self::Scheduled { due_ms } | Self::Animating { due_ms, .. } => Some(due_ms),
            Self::Stopped | Self::Paused { .. } => None,
        }
    }

    pub fn scrolled_distance(&self) -> u32 {
        match *self {
            Self::Animating { scrolled, .. } => scrolled,
            _ => 0,
        }
    }
}

/// A lightweight, serializable snapshot of the carousel state.
///
/// With `feature = "serde"`, this type implements `Serialize`/`Deserialize`.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct CarouselSnapshot {
    /// Current virtual position.
    pub current_index: usize,
    pub is_running: bool,
    pub is_animating: bool,
    /// Distance covered so far by the in-flight stepped transition.
    pub scrolled_distance: u32,
}
