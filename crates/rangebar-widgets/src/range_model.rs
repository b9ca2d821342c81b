//! Pure range slider state.
//!
//! [`RangeState`] owns the two handle offsets, the two field values and the
//! drag session. Every mutation goes through the clamp-and-set routines, so
//! the offsets always satisfy
//!
//! ```text
//! 0 <= min_offset <= max_offset - overlap_margin
//! max_offset <= scale_width - handle_width
//! ```
//!
//! Nothing here touches a canvas or the DOM. After each mutation the caller
//! runs its render step from [`RangeState::frame`].

use crate::config::{overlap_margin, RangeConfig};
use crate::drag::DragSession;
use serde::{Deserialize, Serialize};
use tracing::{debug, trace};

/// Slack allowed when checking invariants on `f32` offsets.
const INVARIANT_EPSILON: f32 = 1e-3;

/// One of the two slider handles.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Handle {
    /// Lower handle, bound to the from-field
    Min,
    /// Upper handle, bound to the to-field
    Max,
}

/// How handle offsets map to domain values.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
pub enum ValueMapping {
    /// The to-value is `(max_offset + handle_width) / scale_width * interval`
    /// without adding the domain minimum, and typed values convert to
    /// offsets as `value / interval * scale_width`. Identical to the
    /// symmetric mapping when the domain starts at zero.
    #[default]
    Legacy,
    /// Both values are shifted by the domain minimum.
    Symmetric,
}

/// Track measurements captured once at initialization.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct TrackGeometry {
    /// Track width in pixels
    pub scale_width: f32,
    /// Handle width in pixels
    pub handle_width: f32,
}

impl TrackGeometry {
    /// Create a geometry from track and handle widths.
    #[must_use]
    pub const fn new(scale_width: f32, handle_width: f32) -> Self {
        Self {
            scale_width,
            handle_width,
        }
    }

    /// Rightmost offset a handle's left edge may reach.
    #[must_use]
    pub fn max_offset(&self) -> f32 {
        self.scale_width - self.handle_width
    }
}

/// Everything the render step writes, in track-relative pixels and
/// domain units.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct RangeFrame {
    /// Left edge of the min handle
    pub min_handle_left: f32,
    /// Left edge of the max handle
    pub max_handle_left: f32,
    /// Left edge of the highlighted bar
    pub bar_left: f32,
    /// Width of the highlighted bar
    pub bar_width: f32,
    /// Value shown in the from-field
    pub from_field: f32,
    /// Value shown in the to-field
    pub to_field: f32,
}

/// State of one range slider.
#[derive(Debug, Clone)]
pub struct RangeState {
    min: f32,
    max: f32,
    mapping: ValueMapping,
    geometry: TrackGeometry,
    overlap_margin: f32,
    min_offset: f32,
    max_offset: f32,
    from_field: f32,
    to_field: f32,
    drag: DragSession,
}

impl RangeState {
    /// Full-range state: min handle at the track start, max handle at the
    /// track end, fields showing the derived values.
    #[must_use]
    pub fn new(config: &RangeConfig, geometry: TrackGeometry) -> Self {
        let mut state = Self {
            min: config.min,
            max: config.max,
            mapping: config.value_mapping,
            geometry,
            overlap_margin: overlap_margin(geometry.handle_width, config.overlap_ratio),
            min_offset: 0.0,
            max_offset: geometry.max_offset().max(0.0),
            from_field: 0.0,
            to_field: 0.0,
            drag: DragSession::Idle,
        };
        state.from_field = state.from_value();
        state.to_field = state.to_value();
        state
    }

    /// Replace both offsets with positions measured from rendered markup.
    ///
    /// Offsets are taken as-is; the next drag or commit clamps them.
    #[must_use]
    pub const fn with_offsets(mut self, min_offset: f32, max_offset: f32) -> Self {
        self.min_offset = min_offset;
        self.max_offset = max_offset;
        self
    }

    /// Move the handles as if `to` and then `from` had been typed into the
    /// fields.
    #[must_use]
    pub fn with_values(mut self, from: f32, to: f32) -> Self {
        self.commit_to(to);
        self.commit_from(from);
        self
    }

    /// Overwrite the field values without moving the handles.
    pub fn set_fields(&mut self, from: f32, to: f32) {
        self.from_field = from;
        self.to_field = to;
    }

    // =========================================================================
    // Clamp-and-set
    // =========================================================================

    /// Move the min handle, clamped to `[0, max_offset - overlap_margin]`.
    ///
    /// Returns whether the offset changed. Non-finite offsets are ignored.
    pub fn set_min_handle(&mut self, new_offset: f32) -> bool {
        if !new_offset.is_finite() {
            return false;
        }
        let right_edge = self.max_offset - self.overlap_margin;
        let offset = new_offset.max(0.0).min(right_edge);
        let changed = offset != self.min_offset;
        self.min_offset = offset;
        changed
    }

    /// Move the max handle, clamped to
    /// `[min_offset + overlap_margin, scale_width - handle_width]`.
    ///
    /// Returns whether the offset changed. Non-finite offsets are ignored.
    pub fn set_max_handle(&mut self, new_offset: f32) -> bool {
        if !new_offset.is_finite() {
            return false;
        }
        let left_edge = self.min_offset + self.overlap_margin;
        let offset = new_offset.max(left_edge).min(self.geometry.max_offset());
        let changed = offset != self.max_offset;
        self.max_offset = offset;
        changed
    }

    // =========================================================================
    // Drag protocol
    // =========================================================================

    /// Start dragging `handle` with the pointer at `pointer_x` and the track
    /// starting at `track_start_x`.
    pub fn begin_drag(&mut self, handle: Handle, pointer_x: f32, track_start_x: f32) {
        let handle_left_x = track_start_x + self.offset(handle);
        self.drag.begin(handle, pointer_x, handle_left_x);
        debug!(?handle, pointer_x, track_start_x, "range drag started");
    }

    /// Follow the pointer with the active handle and refresh its field.
    ///
    /// Returns the moved handle, or `None` when no drag is active.
    pub fn drag_to(&mut self, pointer_x: f32, track_start_x: f32) -> Option<Handle> {
        let (handle, offset) = self.drag.update(pointer_x, track_start_x)?;
        match handle {
            Handle::Min => {
                self.set_min_handle(offset);
                self.from_field = self.from_value();
            }
            Handle::Max => {
                self.set_max_handle(offset);
                self.to_field = self.to_value();
            }
        }
        trace!(?handle, offset, min_offset = self.min_offset, max_offset = self.max_offset, "range drag");
        Some(handle)
    }

    /// End the drag session.
    pub fn end_drag(&mut self) -> Option<Handle> {
        let handle = self.drag.end();
        if let Some(handle) = handle {
            debug!(?handle, from = self.from_field, to = self.to_field, "range drag ended");
        }
        handle
    }

    /// Current drag session.
    #[must_use]
    pub const fn drag(&self) -> DragSession {
        self.drag
    }

    // =========================================================================
    // Field edits
    // =========================================================================

    /// Apply a value committed in the from-field.
    ///
    /// Below the domain minimum the min handle snaps to the track start.
    /// Above the to-field's value the field is capped at that value and the
    /// handle is pushed against the max handle. Otherwise the value is
    /// converted to an offset.
    pub fn commit_from(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        self.from_field = value;
        if value < self.min {
            self.set_min_handle(0.0);
        } else if value > self.to_field {
            self.from_field = self.to_field;
            self.set_min_handle(self.max_offset - self.overlap_margin);
        } else {
            self.set_min_handle(self.value_to_offset(value));
        }
    }

    /// Apply a value committed in the to-field.
    ///
    /// Below the from-field's value the field is raised to that value and
    /// the handle is pushed against the min handle. Above the domain maximum
    /// the max handle goes to the track end. Otherwise the value is
    /// converted to an offset.
    pub fn commit_to(&mut self, value: f32) {
        if !value.is_finite() {
            return;
        }
        self.to_field = value;
        if value < self.from_field {
            self.to_field = self.from_field;
            self.set_max_handle(self.min_offset + self.overlap_margin);
        } else if value > self.max {
            self.set_max_handle(self.geometry.scale_width);
        } else {
            self.set_max_handle(self.value_to_offset(value));
        }
    }

    // =========================================================================
    // Derived values
    // =========================================================================

    /// Domain value under the min handle's left edge.
    #[must_use]
    pub fn from_value(&self) -> f32 {
        if self.geometry.scale_width <= 0.0 {
            return self.min;
        }
        round_half_up((self.min_offset / self.geometry.scale_width).mul_add(self.interval(), self.min))
    }

    /// Domain value under the max handle's right edge.
    #[must_use]
    pub fn to_value(&self) -> f32 {
        if self.geometry.scale_width <= 0.0 {
            return self.max;
        }
        let span = (self.max_offset + self.geometry.handle_width) / self.geometry.scale_width
            * self.interval();
        match self.mapping {
            ValueMapping::Legacy => round_half_up(span),
            ValueMapping::Symmetric => round_half_up(span + self.min),
        }
    }

    /// Track offset for a typed domain value.
    #[must_use]
    pub fn value_to_offset(&self, value: f32) -> f32 {
        let interval = self.interval();
        if interval <= 0.0 {
            return 0.0;
        }
        let value = match self.mapping {
            ValueMapping::Legacy => value,
            ValueMapping::Symmetric => value - self.min,
        };
        value / interval * self.geometry.scale_width
    }

    /// Left edge and width of the highlighted bar.
    #[must_use]
    pub fn bar(&self) -> (f32, f32) {
        let left = self.min_offset;
        let right = self.max_offset + self.geometry.handle_width;
        (left, right - left)
    }

    /// Snapshot for the render step.
    #[must_use]
    pub fn frame(&self) -> RangeFrame {
        let (bar_left, bar_width) = self.bar();
        RangeFrame {
            min_handle_left: self.min_offset,
            max_handle_left: self.max_offset,
            bar_left,
            bar_width,
            from_field: self.from_field,
            to_field: self.to_field,
        }
    }

    // =========================================================================
    // Accessors
    // =========================================================================

    /// Offset of a handle's left edge.
    #[must_use]
    pub const fn offset(&self, handle: Handle) -> f32 {
        match handle {
            Handle::Min => self.min_offset,
            Handle::Max => self.max_offset,
        }
    }

    /// Offset of the min handle.
    #[must_use]
    pub const fn min_offset(&self) -> f32 {
        self.min_offset
    }

    /// Offset of the max handle.
    #[must_use]
    pub const fn max_offset(&self) -> f32 {
        self.max_offset
    }

    /// Value shown in the from-field.
    #[must_use]
    pub const fn from_field(&self) -> f32 {
        self.from_field
    }

    /// Value shown in the to-field.
    #[must_use]
    pub const fn to_field(&self) -> f32 {
        self.to_field
    }

    /// Domain bounds.
    #[must_use]
    pub const fn bounds(&self) -> (f32, f32) {
        (self.min, self.max)
    }

    /// `max - min`.
    #[must_use]
    pub fn interval(&self) -> f32 {
        self.max - self.min
    }

    /// Minimum pixel gap between the handles.
    #[must_use]
    pub const fn overlap_margin(&self) -> f32 {
        self.overlap_margin
    }

    /// Captured track geometry.
    #[must_use]
    pub const fn geometry(&self) -> TrackGeometry {
        self.geometry
    }

    /// Value mapping in use.
    #[must_use]
    pub const fn value_mapping(&self) -> ValueMapping {
        self.mapping
    }

    // =========================================================================
    // Invariants
    // =========================================================================

    /// Handles are at least `overlap_margin` apart.
    #[must_use]
    pub fn handles_ordered(&self) -> bool {
        self.max_offset - self.min_offset >= self.overlap_margin - INVARIANT_EPSILON
    }

    /// Both handles lie on the track.
    #[must_use]
    pub fn handles_on_track(&self) -> bool {
        self.min_offset >= -INVARIANT_EPSILON
            && self.max_offset <= self.geometry.max_offset() + INVARIANT_EPSILON
    }

    /// Offsets and field values are finite numbers.
    #[must_use]
    pub fn is_finite(&self) -> bool {
        self.min_offset.is_finite()
            && self.max_offset.is_finite()
            && self.from_field.is_finite()
            && self.to_field.is_finite()
    }
}

/// Round to the nearest integer, halves towards positive infinity.
fn round_half_up(value: f32) -> f32 {
    (value + 0.5).floor()
}
