pub mod config;
pub mod easing;
pub mod error;
pub mod gesture;
pub mod geometry;
pub mod motion;
pub mod pager;
pub mod selector;
pub mod style;

pub use config::{AppConfig, DeckConfig, KeymapConfig, PageContent, PagingConfig, SelectorConfig};
pub use easing::EasingType;
pub use error::{Error, Result};
pub use geometry::{Extent, Orientation, PageLayout, Padding, PagingAxis, Point, Size};
pub use gesture::{InputDisposition, PointerButton, PointerEvent, PointerKind};
pub use pager::{PageHost, Pager, PagerConfig, PagerEvent, PagerStateKind};
pub use selector::{HighlightRect, SegmentSelector, SelectorEvent};
