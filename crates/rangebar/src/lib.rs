//! Rangebar: a dual-handle range slider bound to two numeric fields.
//!
//! Two front ends share one state model:
//!
//! - [`widgets::RangeSlider`], a native widget painted through a
//!   [`Canvas`] and driven by [`Event`]s
//! - `browser::DomRange` (wasm32 only), which binds existing page markup
//!
//! # Browser Usage (WASM)
//!
//! The module mounts itself on the first `.filter--price` element once the
//! document has loaded. Other markup can be bound explicitly:
//!
//! ```javascript
//! import init, { DomRange } from './rangebar.js';
//!
//! await init();
//! const range = DomRange.fromYaml(document.querySelector('.filter--size'), 'min: 0\nmax: 60\n');
//! range.onChange((frame) => console.log(JSON.parse(frame)));
//! ```

pub use rangebar_core::*;
pub use rangebar_widgets as widgets;
pub use rangebar_widgets::{
    Handle, RangeChanged, RangeConfig, RangeError, RangeFrame, RangeResult, RangeSlider,
    RangeState, TrackGeometry, ValueMapping,
};

pub mod browser;

#[cfg(target_arch = "wasm32")]
pub use browser::{mount_price_filter, mount_price_filter_or_report, DomRange};
