use crate::LayoutParams;

/// Configuration errors surfaced by [`crate::BannerView`].
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum BannerError {
    /// An attached item view does not fill the viewport on both axes.
    #[error("item at position {position} must fill the whole banner (got {params:?})")]
    ItemDoesNotFillViewport {
        position: usize,
        params: LayoutParams,
    },
}

/// Failures reported by a [`crate::ScrollSurface`] while moving programmatically.
///
/// Autoplay treats these as transient: they are logged and the next tick tries again.
#[derive(Clone, Debug, PartialEq, Eq, thiserror::Error)]
pub enum ScrollError {
    #[error("scroll surface is mid-transition")]
    Busy,
    #[error("position {position} is out of range (count {count})")]
    OutOfRange { position: usize, count: usize },
}
