/// Scroll axis of the carousel.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum Orientation {
    #[default]
    Horizontal,
    Vertical,
}

impl Orientation {
    /// Splits a main-axis delta into an `(dx, dy)` pair.
    pub fn delta(self, main: i32) -> (i32, i32) {
        match self {
            Self::Horizontal => (main, 0),
            Self::Vertical => (0, main),
        }
    }
}

/// How autoplay moves between items.
///
/// `Paged` asks the surface to jump to the next page and leaves gesture settling to the
/// surface. `Stepped` drives the surface manually in small increments and settles drags
/// itself.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[cfg_attr(feature = "serde", serde(rename_all = "lowercase"))]
pub enum AutoplayMode {
    Paged,
    #[default]
    Stepped,
}

/// Scroll-state of the underlying surface.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum ScrollState {
    #[default]
    Idle,
    /// The user is touching and moving the content.
    Dragging,
    /// The content is moving towards a final position without user input.
    Settling,
}

/// Viewport size in pixels.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct Size {
    pub width: u32,
    pub height: u32,
}

impl Size {
    pub fn new(width: u32, height: u32) -> Self {
        Self { width, height }
    }

    /// Extent along the scroll axis.
    pub fn extent(&self, orientation: Orientation) -> u32 {
        match orientation {
            Orientation::Horizontal => self.width,
            Orientation::Vertical => self.height,
        }
    }
}

#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum Dimension {
    MatchParent,
    WrapContent,
    Exact(u32),
}

/// Requested size of an item view.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub struct LayoutParams {
    pub width: Dimension,
    pub height: Dimension,
}

impl LayoutParams {
    pub const MATCH_PARENT: Self = Self {
        width: Dimension::MatchParent,
        height: Dimension::MatchParent,
    };

    pub fn new(width: Dimension, height: Dimension) -> Self {
        Self { width, height }
    }

    pub fn fills_parent(&self) -> bool {
        self.width == Dimension::MatchParent && self.height == Dimension::MatchParent
    }
}

impl Default for LayoutParams {
    fn default() -> Self {
        Self::MATCH_PARENT
    }
}

/// An item view produced by an [`crate::ItemAdapter`].
///
/// Every attached item must fill the whole carousel; see [`crate::BannerView::layout`].
pub trait ItemView {
    fn layout_params(&self) -> LayoutParams;
}

/// Notifications delivered to page-change callbacks.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
pub enum PageEvent {
    /// A new page became current. `position` is virtual, `item` is the real index.
    Selected { position: usize, item: usize },
    ScrollStateChanged(ScrollState),
}

#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct PageCallbackId(pub(crate) u64);
