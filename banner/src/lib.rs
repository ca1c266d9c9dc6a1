//! A headless, auto-rotating banner carousel.
//!
//! For host-side utilities (a `Vec`-backed list adapter, a simulated paged track), see the
//! `banner-adapter` crate.
//!
//! The carousel wraps a finite item adapter so it appears infinitely scrollable, advances on a
//! fixed cadence, and gets out of the way while the user drags:
//! - [`real_position`] maps the boundless virtual positions onto the backing list
//! - [`AdapterWrapper`] exposes an effectively unbounded item count and forwards the backing
//!   adapter's change notifications
//! - autoplay either jumps a page at a time ([`AutoplayMode::Paged`]) or drives the surface in
//!   small steps ([`AutoplayMode::Stepped`])
//! - drags suspend autoplay and settle to the nearest page with a 45% rule
//!
//! It is UI-agnostic. A TUI/GUI layer is expected to provide:
//! - a [`ScrollSurface`] (viewport size, paging and scrolling primitives)
//! - an [`ItemAdapter`] whose holders implement [`ItemView`]
//! - a clock, by calling [`BannerView::tick`] with the current time in milliseconds
#![forbid(unsafe_code)]

#[macro_use]
mod macros;

mod adapter;
mod autoplay;
mod error;
mod gesture;
mod options;
mod position;
mod state;
mod surface;
mod types;
mod view;

#[cfg(test)]
mod tests;

pub use adapter::{
    AdapterChange, AdapterObserver, AdapterWrapper, ItemAdapter, ObserverId, ObserverSet,
    Payload, SharedAdapter,
};
pub use error::{BannerError, ScrollError};
pub use gesture::{SETTLE_THRESHOLD_PERCENT, settles_forward};
pub use options::{
    BannerOptions, DEFAULT_PAGED_GAP_INTERVAL_MS, DEFAULT_SCROLL_DURATION_MS,
    DEFAULT_STEPPED_GAP_INTERVAL_MS, STEP_INTERVAL_MS,
};
pub use position::{UNBOUNDED_ITEM_COUNT, exposed_count, real_position};
pub use state::{AutoplayState, CarouselSnapshot};
pub use surface::ScrollSurface;
pub use types::{
    AutoplayMode, Dimension, ItemView, LayoutParams, Orientation, PageCallbackId, PageEvent,
    ScrollState, Size,
};
pub use view::{AttachedItem, BannerView};
