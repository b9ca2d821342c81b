//! Browser binding for range markup already on the page.
//!
//! [`DomRange`] finds the track, bar, handles and fields inside a root
//! element, drives a [`rangebar_widgets::RangeState`] from mouse and
//! `change` events and writes the result back as inline styles and input
//! values.

// WASM-only modules
#[cfg(target_arch = "wasm32")]
pub mod dom_range;
#[cfg(target_arch = "wasm32")]
pub mod events;

// Cross-platform modules
pub mod render;

#[cfg(target_arch = "wasm32")]
pub use dom_range::{mount_price_filter, mount_price_filter_or_report, DomRange};
pub use render::{frame_json, px, DomPatch};
