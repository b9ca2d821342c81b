//! Range slider widgets.
//!
//! A [`RangeSlider`] picks a `from..to` range over a numeric domain with two
//! draggable handles, each bound to a [`NumberField`]. The handle and field
//! logic lives in [`RangeState`], which has no rendering dependencies and is
//! shared with the browser binding.

pub mod config;
pub mod drag;
pub mod error;
pub mod number_field;
pub mod range_model;
pub mod range_slider;

pub use config::{RangeConfig, RangeSelectors};
pub use drag::DragSession;
pub use error::{RangeError, RangeResult};
pub use number_field::{format_number, parse_number, NumberCommitted, NumberField};
pub use range_model::{Handle, RangeFrame, RangeState, TrackGeometry, ValueMapping};
pub use range_slider::{RangeChanged, RangeSlider};
