//! `RangeSlider` widget: a two-handle slider bound to two number fields.
//!
//! The track spans the widget's full width. Handles sit on the track at
//! offsets held by a [`RangeState`]; the from/to fields sit below it.
//! Track geometry is captured on the first layout and kept afterwards.
//! Later layouts only move the track origin, which the drag path re-reads
//! on every pointer event.

use crate::config::RangeConfig;
use crate::error::RangeResult;
use crate::number_field::{NumberCommitted, NumberField};
use crate::range_model::{Handle, RangeFrame, RangeState, TrackGeometry, ValueMapping};
use rangebar_core::{
    widget::{AccessibleRole, LayoutResult},
    Brick, BrickAssertion, BrickBudget, BrickVerification, Canvas, Color, Constraints, Event,
    MouseButton, Point, Rect, Size, TypeId, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::time::Instant;
use tracing::debug;

/// Message emitted when the selected range changes.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct RangeChanged {
    /// Value shown in the from-field
    pub from: f32,
    /// Value shown in the to-field
    pub to: f32,
}

const ASSERTIONS: &[BrickAssertion] = &[
    BrickAssertion::MaxLatencyMs(16),
    BrickAssertion::Invariant("handle-order"),
    BrickAssertion::Invariant("track-bounds"),
    BrickAssertion::Invariant("finite-offsets"),
];

/// `RangeSlider` widget for selecting a `from..to` range.
#[derive(Serialize, Deserialize)]
pub struct RangeSlider {
    /// Domain, overlap and markup settings
    config: RangeConfig,
    /// Whether the slider is disabled
    disabled: bool,
    /// Track color
    track_color: Color,
    /// Color of the bar between the handles
    bar_color: Color,
    /// Handle fill color
    thumb_color: Color,
    /// Handle border color
    thumb_border_color: Color,
    /// Track height
    track_height: f32,
    /// Handle height
    thumb_height: f32,
    /// Gap between the track and the fields, and between the fields
    field_gap: f32,
    /// Minimum width
    min_width: f32,
    /// From field
    from_field: NumberField,
    /// To field
    to_field: NumberField,
    /// Test ID
    test_id_value: Option<String>,
    /// Accessible name
    accessible_name_value: Option<String>,
    /// Handle and field state, created on first layout
    #[serde(skip)]
    state: Option<RangeState>,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
}

impl RangeSlider {
    /// Create a slider over `min..max` with default settings.
    #[must_use]
    pub fn new(min: f32, max: f32) -> Self {
        Self::build(RangeConfig::new(min, max))
    }

    /// Create a slider from a validated configuration.
    pub fn from_config(config: RangeConfig) -> RangeResult<Self> {
        config.validate()?;
        Ok(Self::build(config))
    }

    fn build(config: RangeConfig) -> Self {
        let from_field = NumberField::new()
            .value(config.min)
            .min_attr(config.min)
            .class_name(selector_class(&config.selectors.min_input))
            .with_accessible_name("From");
        let to_field = NumberField::new()
            .value(config.max)
            .max_attr(config.max)
            .class_name(selector_class(&config.selectors.max_input))
            .with_accessible_name("To");
        let mut slider = Self {
            config,
            disabled: false,
            track_color: Color::new(0.85, 0.85, 0.85, 1.0),
            bar_color: Color::new(0.2, 0.47, 0.96, 1.0),
            thumb_color: Color::WHITE,
            thumb_border_color: Color::new(0.6, 0.6, 0.6, 1.0),
            track_height: 4.0,
            thumb_height: 20.0,
            field_gap: 8.0,
            min_width: 200.0,
            from_field,
            to_field,
            test_id_value: None,
            accessible_name_value: None,
            state: None,
            bounds: Rect::default(),
        };
        if let Some((from, to)) = slider.config.initial {
            slider.from_field.set_number(from);
            slider.to_field.set_number(to);
        }
        slider
    }

    /// Set the overlap ratio.
    #[must_use]
    pub fn overlap_ratio(mut self, ratio: f32) -> Self {
        self.config.overlap_ratio = ratio.clamp(0.0, crate::config::MAX_OVERLAP_RATIO);
        self
    }

    /// Set the handle width.
    #[must_use]
    pub fn handle_width(mut self, width: f32) -> Self {
        self.config.handle_width = width.max(1.0);
        self
    }

    /// Set the value mapping.
    #[must_use]
    pub const fn value_mapping(mut self, mapping: ValueMapping) -> Self {
        self.config.value_mapping = mapping;
        self
    }

    /// Set the initial from/to values, applied on first layout.
    #[must_use]
    pub fn values(mut self, from: f32, to: f32) -> Self {
        self.config.initial = Some((from, to));
        self.from_field.set_number(from);
        self.to_field.set_number(to);
        self
    }

    /// Set track color.
    #[must_use]
    pub const fn track_color(mut self, color: Color) -> Self {
        self.track_color = color;
        self
    }

    /// Set bar color.
    #[must_use]
    pub const fn bar_color(mut self, color: Color) -> Self {
        self.bar_color = color;
        self
    }

    /// Set handle color.
    #[must_use]
    pub const fn thumb_color(mut self, color: Color) -> Self {
        self.thumb_color = color;
        self
    }

    /// Set disabled state.
    #[must_use]
    pub fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self.from_field = self.from_field.disabled(disabled);
        self.to_field = self.to_field.disabled(disabled);
        self
    }

    /// Set test ID.
    #[must_use]
    pub fn with_test_id(mut self, id: impl Into<String>) -> Self {
        self.test_id_value = Some(id.into());
        self
    }

    /// Set accessible name.
    #[must_use]
    pub fn with_accessible_name(mut self, name: impl Into<String>) -> Self {
        self.accessible_name_value = Some(name.into());
        self
    }

    /// Get the configuration.
    #[must_use]
    pub const fn config(&self) -> &RangeConfig {
        &self.config
    }

    /// Get the slider state, `None` before the first layout.
    #[must_use]
    pub const fn state(&self) -> Option<&RangeState> {
        self.state.as_ref()
    }

    /// Snapshot of the current render state, `None` before the first layout.
    #[must_use]
    pub fn frame(&self) -> Option<RangeFrame> {
        self.state.as_ref().map(RangeState::frame)
    }

    /// Value shown in the from-field.
    #[must_use]
    pub fn from_value(&self) -> f32 {
        self.state
            .as_ref()
            .map_or_else(|| self.from_field.number().unwrap_or(self.config.min), RangeState::from_field)
    }

    /// Value shown in the to-field.
    #[must_use]
    pub fn to_value(&self) -> f32 {
        self.state
            .as_ref()
            .map_or_else(|| self.to_field.number().unwrap_or(self.config.max), RangeState::to_field)
    }

    /// Handle being dragged, if any.
    #[must_use]
    pub fn active_handle(&self) -> Option<Handle> {
        self.state.as_ref().and_then(|s| s.drag().active_handle())
    }

    /// Get the from field.
    #[must_use]
    pub const fn from_field(&self) -> &NumberField {
        &self.from_field
    }

    /// Get the to field.
    #[must_use]
    pub const fn to_field(&self) -> &NumberField {
        &self.to_field
    }

    /// Apply a value committed in the from-field.
    ///
    /// Returns `None` before the first layout or when nothing changed.
    pub fn commit_from(&mut self, value: f32) -> Option<RangeChanged> {
        let state = self.state.as_mut()?;
        let before = state.frame();
        state.commit_from(value);
        self.sync_fields();
        self.changed_since(before)
    }

    /// Apply a value committed in the to-field.
    ///
    /// Returns `None` before the first layout or when nothing changed.
    pub fn commit_to(&mut self, value: f32) -> Option<RangeChanged> {
        let state = self.state.as_mut()?;
        let before = state.frame();
        state.commit_to(value);
        self.sync_fields();
        self.changed_since(before)
    }

    fn sync_fields(&mut self) {
        if let Some(state) = &self.state {
            self.from_field.set_number(state.from_field());
            self.to_field.set_number(state.to_field());
        }
    }

    fn changed_since(&self, before: RangeFrame) -> Option<RangeChanged> {
        let frame = self.frame()?;
        (frame != before).then_some(RangeChanged {
            from: frame.from_field,
            to: frame.to_field,
        })
    }

    fn track_rect(&self) -> Rect {
        Rect::new(
            self.bounds.x,
            self.bounds.y + (self.thumb_height - self.track_height) / 2.0,
            self.bounds.width,
            self.track_height,
        )
    }

    fn handle_rect(&self, state: &RangeState, handle: Handle) -> Rect {
        Rect::new(
            self.bounds.x + state.offset(handle),
            self.bounds.y,
            state.geometry().handle_width,
            self.thumb_height,
        )
    }

    /// Handle under `position`. The max handle is drawn on top and wins
    /// when both overlap.
    fn handle_at(&self, position: &Point) -> Option<Handle> {
        let state = self.state.as_ref()?;
        [Handle::Max, Handle::Min]
            .into_iter()
            .find(|handle| self.handle_rect(state, *handle).contains_point(position))
    }

    /// Forward an event to both fields and apply any commit.
    fn forward_to_fields(&mut self, event: &Event) -> Option<RangeChanged> {
        let from = committed_value(self.from_field.event(event));
        let to = committed_value(self.to_field.event(event));
        match (from, to) {
            (Some(value), _) => self.commit_from(value),
            (None, Some(value)) => self.commit_to(value),
            (None, None) => None,
        }
    }

    fn field_size(&self, width: f32) -> Size {
        let height = self.from_field.measure(Constraints::default()).height;
        let width = ((width - self.field_gap) / 2.0).max(0.0);
        Size::new(width, height)
    }
}

fn committed_value(message: Option<Box<dyn Any + Send>>) -> Option<f32> {
    message
        .and_then(|m| m.downcast::<NumberCommitted>().ok())
        .map(|m| m.value)
}

/// Class name rendered for a class selector.
fn selector_class(selector: &str) -> &str {
    selector.trim_start_matches('.')
}

impl Widget for RangeSlider {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let width = self.min_width.max(constraints.min_width);
        let field_height = self.from_field.measure(constraints).height;
        let height = self.thumb_height + self.field_gap + field_height;
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        if self.state.is_none() {
            let geometry = TrackGeometry::new(bounds.width, self.config.handle_width);
            let mut state = RangeState::new(&self.config, geometry);
            if let Some((from, to)) = self.config.initial {
                state = state.with_values(from, to);
            }
            debug!(
                scale_width = geometry.scale_width,
                handle_width = geometry.handle_width,
                overlap_margin = state.overlap_margin(),
                "range slider initialized"
            );
            self.state = Some(state);
            self.sync_fields();
        }

        let field = self.field_size(bounds.width);
        let field_y = bounds.y + self.thumb_height + self.field_gap;
        self.from_field
            .layout(Rect::new(bounds.x, field_y, field.width, field.height));
        self.to_field.layout(Rect::new(
            bounds.right() - field.width,
            field_y,
            field.width,
            field.height,
        ));

        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        let track = self.track_rect();
        canvas.fill_rect(track, self.track_color);

        if let Some(state) = &self.state {
            let frame = state.frame();
            let bar = track
                .with_x(track.x + frame.bar_left)
                .with_width(frame.bar_width);
            let (bar_color, thumb_color) = if self.disabled {
                let grey = Color::new(0.6, 0.6, 0.6, 1.0);
                (grey, grey)
            } else {
                (self.bar_color, self.thumb_color)
            };
            canvas.fill_rect(bar, bar_color);

            for handle in [Handle::Min, Handle::Max] {
                let rect = self.handle_rect(state, handle);
                canvas.fill_rect(rect, thumb_color);
                canvas.stroke_rect(rect, self.thumb_border_color, 1.0);
            }
        }

        self.from_field.paint(canvas);
        self.to_field.paint(canvas);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.disabled {
            return None;
        }

        let changed = match event {
            Event::MouseDown { position, button } => {
                let changed = self.forward_to_fields(event);
                if *button == MouseButton::Left {
                    if let Some(handle) = self.handle_at(position) {
                        let track_x = self.bounds.x;
                        if let Some(state) = self.state.as_mut() {
                            state.begin_drag(handle, position.x, track_x);
                        }
                    }
                }
                changed
            }
            Event::MouseMove { position } => {
                let track_x = self.bounds.x;
                let state = self.state.as_mut()?;
                let before = state.frame();
                state.drag_to(position.x, track_x)?;
                self.sync_fields();
                self.changed_since(before)
            }
            Event::MouseUp {
                button: MouseButton::Left,
                ..
            } => {
                if let Some(state) = self.state.as_mut() {
                    state.end_drag();
                }
                None
            }
            Event::FocusIn => None,
            _ => self.forward_to_fields(event),
        };

        changed.map(|msg| Box::new(msg) as Box<dyn Any + Send>)
    }

    fn is_interactive(&self) -> bool {
        !self.disabled
    }

    fn is_focusable(&self) -> bool {
        !self.disabled
    }

    fn accessible_name(&self) -> Option<&str> {
        self.accessible_name_value.as_deref()
    }

    fn accessible_role(&self) -> AccessibleRole {
        AccessibleRole::Slider
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for RangeSlider {
    fn brick_name(&self) -> &'static str {
        "RangeSlider"
    }

    fn assertions(&self) -> &[BrickAssertion] {
        ASSERTIONS
    }

    fn budget(&self) -> BrickBudget {
        BrickBudget::uniform(16)
    }

    fn verify(&self) -> BrickVerification {
        let start = Instant::now();
        let mut verification = BrickVerification::default();

        // Nothing to check before the first layout.
        let (ordered, on_track, finite) = self.state.as_ref().map_or((true, true, true), |s| {
            (s.handles_ordered(), s.handles_on_track(), s.is_finite())
        });
        verification.check(BrickAssertion::Invariant("handle-order"), ordered, || {
            format!("handles closer than the overlap margin: {:?}", self.frame())
        });
        verification.check(BrickAssertion::Invariant("track-bounds"), on_track, || {
            format!("handle off the track: {:?}", self.frame())
        });
        verification.check(BrickAssertion::Invariant("finite-offsets"), finite, || {
            format!("non-finite state: {:?}", self.frame())
        });

        verification.check_latency(self.budget(), start.elapsed());
        verification
    }

    fn to_html(&self) -> String {
        let selectors = &self.config.selectors;
        let test_id = self.test_id_value.as_deref().unwrap_or("range-slider");
        let label = self.accessible_name_value.as_deref().unwrap_or("Range");
        let (bar_style, min_style, max_style) = self.frame().map_or_else(
            || (String::new(), String::new(), String::new()),
            |f| {
                (
                    format!(r#" style="left: {}px; width: {}px""#, f.bar_left, f.bar_width),
                    format!(r#" style="left: {}px""#, f.min_handle_left),
                    format!(r#" style="left: {}px""#, f.max_handle_left),
                )
            },
        );
        let disabled = if self.disabled { " disabled" } else { "" };
        format!(
            concat!(
                r#"<div class="{root}" data-testid="{test_id}" role="group" aria-label="{label}">"#,
                r#"<div class="{scale}">"#,
                r#"<div class="{bar}"{bar_style}></div>"#,
                r#"<button type="button" class="{min_thumb}" aria-label="From"{min_style}{disabled}></button>"#,
                r#"<button type="button" class="{max_thumb}" aria-label="To"{max_style}{disabled}></button>"#,
                "</div>{from}{to}</div>"
            ),
            root = selector_class(&selectors.root),
            test_id = test_id,
            label = label,
            scale = selector_class(&selectors.scale),
            bar = selector_class(&selectors.bar),
            bar_style = bar_style,
            min_thumb = selector_class(&selectors.min_thumb),
            min_style = min_style,
            max_thumb = selector_class(&selectors.max_thumb),
            max_style = max_style,
            disabled = disabled,
            from = self.from_field.to_html(),
            to = self.to_field.to_html(),
        )
    }

    fn to_css(&self) -> String {
        let selectors = &self.config.selectors;
        format!(
            "{scale} {{ position: relative; height: {h}px; }}\n\
             {bar}, {min}, {max} {{ position: absolute; }}\n\
             {bar} {{ background: {bar_bg}; }}\n\
             {min}, {max} {{ width: {w}px; background: {thumb_bg}; }}",
            scale = selectors.scale,
            bar = selectors.bar,
            min = selectors.min_thumb,
            max = selectors.max_thumb,
            h = self.thumb_height,
            w = self.config.handle_width,
            bar_bg = self.bar_color.to_hex(),
            thumb_bg = self.thumb_color.to_hex(),
        )
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::error::RangeError;
    use rangebar_core::{draw::DrawCommand, Key, RecordingCanvas};

    const EPS: f32 = 1e-3;

    /// Price slider laid out at x=10 with a 300px track.
    fn laid_out() -> RangeSlider {
        let mut slider = RangeSlider::new(0.0, 35_000.0);
        slider.layout(Rect::new(10.0, 0.0, 300.0, 80.0));
        slider
    }

    fn changed(msg: Option<Box<dyn Any + Send>>) -> Option<RangeChanged> {
        msg.and_then(|m| m.downcast::<RangeChanged>().ok()).map(|m| *m)
    }

    fn down(x: f32, y: f32) -> Event {
        Event::MouseDown {
            position: Point::new(x, y),
            button: MouseButton::Left,
        }
    }

    fn move_to(x: f32) -> Event {
        Event::MouseMove {
            position: Point::new(x, 10.0),
        }
    }

    fn up(x: f32) -> Event {
        Event::MouseUp {
            position: Point::new(x, 10.0),
            button: MouseButton::Left,
        }
    }

    fn type_into_field(slider: &mut RangeSlider, field_x: f32, text: &str) -> Option<RangeChanged> {
        slider.event(&down(field_x, 40.0));
        for _ in 0..8 {
            slider.event(&Event::KeyDown {
                key: Key::Backspace,
            });
        }
        slider.event(&Event::TextInput { text: text.into() });
        changed(slider.event(&Event::KeyDown { key: Key::Enter }))
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_range_slider_new() {
        let slider = RangeSlider::new(0.0, 35_000.0);
        assert!(slider.state().is_none());
        assert!(slider.frame().is_none());
        assert_eq!(slider.from_value(), 0.0);
        assert_eq!(slider.to_value(), 35_000.0);
        assert_eq!(slider.from_field().get_min_attr(), Some(0.0));
        assert_eq!(slider.to_field().get_max_attr(), Some(35_000.0));
        assert_eq!(slider.from_field().get_max_attr(), None);
    }

    #[test]
    fn test_range_slider_builder() {
        let slider = RangeSlider::new(0.0, 100.0)
            .overlap_ratio(5.0)
            .handle_width(16.0)
            .value_mapping(ValueMapping::Symmetric)
            .values(10.0, 90.0)
            .with_test_id("price")
            .with_accessible_name("Price");

        assert_eq!(slider.config().overlap_ratio, 2.0);
        assert_eq!(slider.config().handle_width, 16.0);
        assert_eq!(slider.config().value_mapping, ValueMapping::Symmetric);
        assert_eq!(slider.from_value(), 10.0);
        assert_eq!(slider.to_value(), 90.0);
        assert_eq!(Brick::test_id(&slider), Some("price"));
        assert_eq!(slider.accessible_name(), Some("Price"));
        assert_eq!(slider.accessible_role(), AccessibleRole::Slider);
    }

    #[test]
    fn test_from_config_validates() {
        let err = RangeSlider::from_config(RangeConfig::new(5.0, 1.0)).err();
        assert!(matches!(err, Some(RangeError::InvalidBounds { .. })));
        assert!(RangeSlider::from_config(RangeConfig::default()).is_ok());
    }

    // =========================================================================
    // Layout
    // =========================================================================

    #[test]
    fn test_first_layout_spans_full_range() {
        let slider = laid_out();
        let frame = slider.frame().unwrap();
        assert_eq!(frame.min_handle_left, 0.0);
        assert_eq!(frame.max_handle_left, 280.0);
        assert_eq!(slider.from_field().text(), "0");
        assert_eq!(slider.to_field().text(), "35000");
    }

    #[test]
    fn test_first_layout_applies_initial_values() {
        let mut slider = RangeSlider::new(0.0, 35_000.0).values(7000.0, 28_000.0);
        slider.layout(Rect::new(0.0, 0.0, 300.0, 80.0));
        let frame = slider.frame().unwrap();
        assert!((frame.min_handle_left - 60.0).abs() < EPS);
        assert!((frame.max_handle_left - 240.0).abs() < EPS);
        assert_eq!(slider.from_field().text(), "7000");
    }

    #[test]
    fn test_relayout_keeps_geometry() {
        let mut slider = laid_out();
        slider.layout(Rect::new(50.0, 0.0, 600.0, 80.0));
        let state = slider.state().unwrap();
        assert_eq!(state.geometry().scale_width, 300.0);
        assert_eq!(state.max_offset(), 280.0);
    }

    #[test]
    fn test_fields_laid_out_below_track() {
        let slider = laid_out();
        let from = Widget::bounds(slider.from_field());
        let to = Widget::bounds(slider.to_field());
        assert_eq!(from.x, 10.0);
        assert_eq!(from.y, 28.0);
        assert_eq!(from.width, 146.0);
        assert_eq!(to.right(), 310.0);
    }

    #[test]
    fn test_measure() {
        let slider = RangeSlider::new(0.0, 1.0);
        let size = slider.measure(Constraints::loose(Size::new(1000.0, 1000.0)));
        assert_eq!(size, Size::new(200.0, 60.0));
    }

    // =========================================================================
    // Dragging
    // =========================================================================

    #[test]
    fn test_drag_min_handle() {
        let mut slider = laid_out();
        assert!(slider.event(&down(15.0, 10.0)).is_none());
        assert_eq!(slider.active_handle(), Some(Handle::Min));

        let msg = changed(slider.event(&move_to(165.0)));
        assert_eq!(
            msg,
            Some(RangeChanged {
                from: 17_500.0,
                to: 35_000.0
            })
        );
        assert_eq!(slider.from_field().text(), "17500");

        slider.event(&up(165.0));
        assert_eq!(slider.active_handle(), None);
        assert!(slider.event(&move_to(200.0)).is_none());
    }

    #[test]
    fn test_drag_max_handle() {
        let mut slider = laid_out();
        slider.event(&down(300.0, 10.0));
        assert_eq!(slider.active_handle(), Some(Handle::Max));
        let msg = changed(slider.event(&move_to(150.0)));
        assert_eq!(msg.map(|m| m.to), Some(17_500.0));
        assert_eq!(slider.to_field().text(), "17500");
    }

    #[test]
    fn test_drag_clamps_at_edges() {
        let mut slider = laid_out();
        slider.event(&down(300.0, 10.0));
        assert!(slider.event(&move_to(900.0)).is_none());
        assert_eq!(slider.frame().unwrap().max_handle_left, 280.0);
    }

    #[test]
    fn test_move_without_drag_is_ignored() {
        let mut slider = laid_out();
        assert!(slider.event(&move_to(100.0)).is_none());
        assert_eq!(slider.frame().unwrap().min_handle_left, 0.0);
    }

    #[test]
    fn test_press_off_handles_starts_no_drag() {
        let mut slider = laid_out();
        slider.event(&down(150.0, 10.0));
        assert_eq!(slider.active_handle(), None);
    }

    #[test]
    fn test_right_button_starts_no_drag() {
        let mut slider = laid_out();
        slider.event(&Event::MouseDown {
            position: Point::new(300.0, 10.0),
            button: MouseButton::Right,
        });
        assert_eq!(slider.active_handle(), None);
    }

    #[test]
    fn test_overlapping_handles_pick_max() {
        let mut slider = laid_out();
        slider.commit_from(35_000.0);
        slider.event(&down(295.0, 10.0));
        assert_eq!(slider.active_handle(), Some(Handle::Max));
    }

    #[test]
    fn test_drag_follows_moved_track() {
        let mut slider = laid_out();
        slider.layout(Rect::new(110.0, 0.0, 300.0, 80.0));
        slider.event(&down(115.0, 10.0));
        slider.event(&move_to(265.0));
        assert_eq!(slider.from_value(), 17_500.0);
    }

    // =========================================================================
    // Field commits
    // =========================================================================

    #[test]
    fn test_typing_from_value_moves_handle() {
        let mut slider = laid_out();
        let msg = type_into_field(&mut slider, 20.0, "7000");
        assert_eq!(
            msg,
            Some(RangeChanged {
                from: 7000.0,
                to: 35_000.0
            })
        );
        assert!((slider.frame().unwrap().min_handle_left - 60.0).abs() < EPS);
    }

    #[test]
    fn test_typing_to_above_max_keeps_text() {
        let mut slider = laid_out();
        let msg = type_into_field(&mut slider, 300.0, "40000");
        assert_eq!(msg.map(|m| m.to), Some(40_000.0));
        assert_eq!(slider.frame().unwrap().max_handle_left, 280.0);
        assert_eq!(slider.to_field().text(), "40000");
    }

    #[test]
    fn test_typing_invalid_reverts() {
        let mut slider = laid_out();
        assert!(type_into_field(&mut slider, 300.0, "-").is_none());
        assert_eq!(slider.to_field().text(), "35000");
        assert_eq!(slider.frame().unwrap().max_handle_left, 280.0);
    }

    #[test]
    fn test_clicking_away_commits() {
        let mut slider = laid_out();
        slider.event(&down(20.0, 40.0));
        slider.event(&Event::KeyDown {
            key: Key::Backspace,
        });
        slider.event(&Event::TextInput {
            text: "3500".into(),
        });
        let msg = changed(slider.event(&down(150.0, 10.0)));
        assert_eq!(msg.map(|m| m.from), Some(3500.0));
    }

    #[test]
    fn test_commit_from_above_to_caps_field() {
        let mut slider = laid_out();
        slider.commit_to(20_000.0);
        let msg = slider.commit_from(25_000.0);
        assert_eq!(msg.map(|m| m.from), Some(20_000.0));
        assert_eq!(slider.from_field().text(), "20000");
    }

    #[test]
    fn test_commit_before_layout_is_ignored() {
        let mut slider = RangeSlider::new(0.0, 100.0);
        assert!(slider.commit_from(10.0).is_none());
    }

    #[test]
    fn test_disabled_ignores_events() {
        let mut slider = RangeSlider::new(0.0, 35_000.0).disabled(true);
        slider.layout(Rect::new(10.0, 0.0, 300.0, 80.0));
        slider.event(&down(15.0, 10.0));
        assert_eq!(slider.active_handle(), None);
        assert!(!slider.is_interactive());
    }

    // =========================================================================
    // Paint
    // =========================================================================

    #[test]
    fn test_paint_commands() {
        let slider = laid_out();
        let mut canvas = RecordingCanvas::new();
        slider.paint(&mut canvas);

        // track, bar, 2 x (handle fill + border), 2 x field (fill + border + text)
        assert_eq!(canvas.command_count(), 12);
        let track = canvas.commands()[0].rect_bounds().unwrap();
        assert_eq!(track, Rect::new(10.0, 8.0, 300.0, 4.0));
        let bar = canvas.commands()[1].rect_bounds().unwrap();
        assert_eq!(bar, Rect::new(10.0, 8.0, 300.0, 4.0));
        let max = canvas.commands()[4].rect_bounds().unwrap();
        assert_eq!(max, Rect::new(290.0, 0.0, 20.0, 20.0));
    }

    #[test]
    fn test_paint_before_layout_draws_track_and_fields() {
        let slider = RangeSlider::new(0.0, 1.0);
        let mut canvas = RecordingCanvas::new();
        slider.paint(&mut canvas);
        assert_eq!(canvas.command_count(), 7);
        assert!(matches!(canvas.commands()[6], DrawCommand::Text { .. }));
    }

    // =========================================================================
    // Brick
    // =========================================================================

    #[test]
    fn test_verify_after_interaction() {
        let mut slider = laid_out();
        slider.event(&down(15.0, 10.0));
        slider.event(&move_to(400.0));
        slider.event(&up(400.0));
        slider.commit_to(-100.0);

        let verification = slider.verify();
        assert!(verification.is_valid(), "{:?}", verification.failed);
        assert_eq!(verification.passed.len(), 4);
        assert!(slider.can_render());
    }

    #[test]
    fn test_to_html_uses_markup_classes() {
        let html = laid_out().to_html();
        assert!(html.starts_with(r#"<div class="filter--price""#));
        assert!(html.contains(r#"<div class="range__bar" style="left: 0px; width: 300px"></div>"#));
        assert!(html.contains(r#"class="range__thumb--max" aria-label="To" style="left: 280px""#));
        assert!(html.contains(r#"class="filter__number-field--min" aria-label="From" min="0" value="0""#));
        assert!(html.contains(r#"max="35000" value="35000""#));
    }

    #[test]
    fn test_to_css() {
        let css = RangeSlider::new(0.0, 1.0).to_css();
        assert!(css.contains(".range__scale { position: relative; height: 20px; }"));
        assert!(css.contains(".range__thumb--min, .range__thumb--max { width: 20px; background: #"));
        let css = RangeSlider::new(0.0, 1.0)
            .bar_color(Color::rgb(1.0, 0.5, 0.0))
            .to_css();
        assert!(css.contains(".range__bar { background: #ff8000; }"));
    }
}
