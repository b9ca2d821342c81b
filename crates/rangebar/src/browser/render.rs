//! Style and value writes for range markup.
//!
//! Computed on every target so the render step can be tested without a
//! browser; only applying a [`DomPatch`] needs the DOM.

use rangebar_widgets::{format_number, RangeFrame};

/// Writes that bring the page markup in line with a [`RangeFrame`].
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct DomPatch {
    /// `left` of the min handle
    pub min_thumb_left: String,
    /// `left` of the max handle
    pub max_thumb_left: String,
    /// `left` of the bar
    pub bar_left: String,
    /// `width` of the bar
    pub bar_width: String,
    /// Value of the from-field, when it is written
    pub from_value: Option<String>,
    /// Value of the to-field, when it is written
    pub to_value: Option<String>,
}

impl DomPatch {
    /// Patch writing every style and both field values of a frame.
    #[must_use]
    pub fn from_frame(frame: &RangeFrame) -> Self {
        Self {
            min_thumb_left: px(frame.min_handle_left),
            max_thumb_left: px(frame.max_handle_left),
            bar_left: px(frame.bar_left),
            bar_width: px(frame.bar_width),
            from_value: Some(format_number(frame.from_field)),
            to_value: Some(format_number(frame.to_field)),
        }
    }

    /// Patch from `previous` to `frame`.
    ///
    /// Styles are always written. A field value is written only when it
    /// changed, so a field the range never set keeps the page's text.
    #[must_use]
    pub fn since(previous: &RangeFrame, frame: &RangeFrame) -> Self {
        let mut patch = Self::from_frame(frame);
        if previous.from_field == frame.from_field {
            patch.from_value = None;
        }
        if previous.to_field == frame.to_field {
            patch.to_value = None;
        }
        patch
    }
}

/// CSS pixel length.
#[must_use]
pub fn px(value: f32) -> String {
    format!("{value}px")
}

/// JSON form of a frame, handed to change callbacks.
#[must_use]
pub fn frame_json(frame: &RangeFrame) -> String {
    serde_json::to_string(frame).unwrap_or_default()
}
