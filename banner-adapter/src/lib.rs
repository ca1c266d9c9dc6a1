//! Host-side utilities for the `banner` crate.
//!
//! The `banner` crate is UI-agnostic and focuses on the carousel state machine. This crate
//! provides small, framework-neutral pieces a host commonly needs around it:
//!
//! - [`ListAdapter`]: a `Vec`-backed item adapter with change notifications and click callbacks
//! - [`PagedTrack`]: a simulated one-page-per-viewport scroll surface with drag input
//! - [`Tween`]: linear, duration-based smooth scrolling used by the track
//!
//! This crate is intentionally framework-agnostic (no ratatui/egui bindings).
#![forbid(unsafe_code)]

mod list;
mod track;
mod tween;


pub use list::{ClickCallback, ClickCallbackId, ListAdapter, ListHolder};
pub use track::{DEFAULT_SMOOTH_SCROLL_MS, PagedTrack};
pub use tween::Tween;
