//! Page-coordinate helpers for browser mouse events.

use web_sys::{Element, MouseEvent, Window};

/// Pointer X in page coordinates.
pub fn page_x(event: &MouseEvent) -> f32 {
    event.page_x() as f32
}

/// Left edge of `element` in page coordinates.
///
/// Re-read on every event: scrolling or reflow moves the element.
pub fn element_page_x(element: &Element, window: &Window) -> f32 {
    let scroll_x = window.page_x_offset().unwrap_or(0.0);
    (element.get_bounding_client_rect().x() + scroll_x) as f32
}
