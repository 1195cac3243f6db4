//! Geometry for the scrolling marquee.

mod marquee;

pub use marquee::{MarqueeLayout, VisibleRow, REPEAT_COUNT};
