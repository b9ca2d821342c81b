//! Drag session state machine for the two slider handles.
//!
//! ```text
//!            begin(Min)            end
//!   Idle ─────────────────▶ Dragging(Min) ─────▶ Idle
//!     │                                            ▲
//!     └──────── begin(Max) ──▶ Dragging(Max) ──────┘
//! ```
//!
//! At most one handle is dragged at a time. The cursor shift recorded on
//! `begin` keeps the grabbed handle from jumping under the pointer.

use crate::range_model::Handle;

/// Current drag state of a range slider.
#[derive(Debug, Clone, Copy, PartialEq, Default)]
pub enum DragSession {
    /// No handle is being dragged
    #[default]
    Idle,
    /// A handle is being dragged
    Dragging {
        /// Handle under the pointer
        handle: Handle,
        /// Pointer X minus the handle's left edge at drag start
        cursor_shift: f32,
    },
}

impl DragSession {
    /// Start dragging `handle`, grabbed at `pointer_x` while its left edge
    /// sits at `handle_left_x`. Replaces any session in progress.
    pub fn begin(&mut self, handle: Handle, pointer_x: f32, handle_left_x: f32) {
        *self = Self::Dragging {
            handle,
            cursor_shift: pointer_x - handle_left_x,
        };
    }

    /// Track offset the active handle should move to for a pointer at
    /// `pointer_x`, with the track starting at `track_start_x`.
    ///
    /// Returns `None` when idle.
    #[must_use]
    pub fn update(&self, pointer_x: f32, track_start_x: f32) -> Option<(Handle, f32)> {
        match *self {
            Self::Idle => None,
            Self::Dragging {
                handle,
                cursor_shift,
            } => Some((handle, pointer_x - cursor_shift - track_start_x)),
        }
    }

    /// End the session, returning the handle that was being dragged.
    pub fn end(&mut self) -> Option<Handle> {
        let handle = self.active_handle();
        *self = Self::Idle;
        handle
    }

    /// Handle being dragged, if any.
    #[must_use]
    pub const fn active_handle(&self) -> Option<Handle> {
        match self {
            Self::Idle => None,
            Self::Dragging { handle, .. } => Some(*handle),
        }
    }

    /// Whether a drag is in progress.
    #[must_use]
    pub const fn is_dragging(&self) -> bool {
        matches!(self, Self::Dragging { .. })
    }
}
