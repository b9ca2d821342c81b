//! Core types and traits for the rangebar widgets.
//!
//! This crate provides the foundation the slider widgets are built on:
//! - Geometric primitives: [`Point`], [`Size`], [`Rect`]
//! - Colors: [`Color`]
//! - Layout constraints: [`Constraints`]
//! - Input events: [`Event`], [`MouseButton`], [`Key`]
//! - The [`Widget`], [`Canvas`] and [`Brick`] traits
//! - A [`RecordingCanvas`] that captures paint calls as [`draw::DrawCommand`]s

mod brick_types;
mod canvas;
mod color;
mod constraints;
pub mod draw;
mod event;
mod geometry;
pub mod widget;

pub use brick_types::{
    Brick, BrickAssertion, BrickBudget, BrickError, BrickResult, BrickVerification,
};
pub use canvas::RecordingCanvas;
pub use color::Color;
pub use constraints::Constraints;
pub use event::{Event, Key, MouseButton};
pub use geometry::{Point, Rect, Size};
pub use widget::{AccessibleRole, Canvas, LayoutResult, TextStyle, TypeId, Widget};
