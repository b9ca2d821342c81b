//! `NumberField` widget for numeric entry.
//!
//! The field edits its text freely and only reports a value when the edit
//! is committed: on Enter, or when focus leaves the field. Text that does
//! not parse as a finite number is rejected and the field reverts to the
//! last committed text.

use crate::error::{RangeError, RangeResult};
use rangebar_core::{
    widget::{AccessibleRole, LayoutResult, TextStyle},
    Brick, BrickAssertion, BrickBudget, BrickVerification, Canvas, Color, Constraints, Event, Key,
    Point, Rect, Size, TypeId, Widget,
};
use serde::{Deserialize, Serialize};
use std::any::Any;
use std::time::Instant;
use tracing::{debug, warn};

/// Message emitted when a new value is committed.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct NumberCommitted {
    /// The committed value
    pub value: f32,
}

const ASSERTIONS: &[BrickAssertion] = &[
    BrickAssertion::MaxLatencyMs(16),
    BrickAssertion::Invariant("numeric-value"),
];

/// `NumberField` widget for numeric entry.
#[derive(Serialize, Deserialize)]
pub struct NumberField {
    /// Text being edited
    text: String,
    /// Text at the last commit, restored on rejection
    committed_text: String,
    /// Value of the `min` attribute
    min_attr: Option<f32>,
    /// Value of the `max` attribute
    max_attr: Option<f32>,
    /// CSS classes for the HTML rendition
    class_name: String,
    /// Whether the field is disabled
    disabled: bool,
    /// Text style
    text_style: TextStyle,
    /// Background color
    background_color: Color,
    /// Border color
    border_color: Color,
    /// Focused border color
    focus_border_color: Color,
    /// Padding
    padding: f32,
    /// Minimum width
    min_width: f32,
    /// Test ID
    test_id_value: Option<String>,
    /// Accessible name
    accessible_name_value: Option<String>,
    /// Cached bounds
    #[serde(skip)]
    bounds: Rect,
    /// Whether focused
    #[serde(skip)]
    focused: bool,
    /// Cursor position (byte index, text is ASCII)
    #[serde(skip)]
    cursor: usize,
}

impl Default for NumberField {
    fn default() -> Self {
        Self::new()
    }
}

impl NumberField {
    /// Create an empty number field.
    #[must_use]
    pub fn new() -> Self {
        Self {
            text: String::new(),
            committed_text: String::new(),
            min_attr: None,
            max_attr: None,
            class_name: "number-field".into(),
            disabled: false,
            text_style: TextStyle::default(),
            background_color: Color::WHITE,
            border_color: Color::new(0.8, 0.8, 0.8, 1.0),
            focus_border_color: Color::new(0.2, 0.6, 1.0, 1.0),
            padding: 8.0,
            min_width: 80.0,
            test_id_value: None,
            accessible_name_value: None,
            bounds: Rect::default(),
            focused: false,
            cursor: 0,
        }
    }

    /// Set the displayed value.
    #[must_use]
    pub fn value(mut self, value: f32) -> Self {
        self.set_number(value);
        self
    }

    /// Set the `min` attribute.
    #[must_use]
    pub const fn min_attr(mut self, min: f32) -> Self {
        self.min_attr = Some(min);
        self
    }

    /// Set the `max` attribute.
    #[must_use]
    pub const fn max_attr(mut self, max: f32) -> Self {
        self.max_attr = Some(max);
        self
    }

    /// Set the CSS classes used in the HTML rendition.
    #[must_use]
    pub fn class_name(mut self, class_name: impl Into<String>) -> Self {
        self.class_name = class_name.into();
        self
    }

    /// Set disabled state.
    #[must_use]
    pub const fn disabled(mut self, disabled: bool) -> Self {
        self.disabled = disabled;
        self
    }

    /// Set text style.
    #[must_use]
    pub const fn text_style(mut self, style: TextStyle) -> Self {
        self.text_style = style;
        self
    }

    /// Set background color.
    #[must_use]
    pub const fn background_color(mut self, color: Color) -> Self {
        self.background_color = color;
        self
    }

    /// Set border color.
    #[must_use]
    pub const fn border_color(mut self, color: Color) -> Self {
        self.border_color = color;
        self
    }

    /// Set padding.
    #[must_use]
    pub fn padding(mut self, padding: f32) -> Self {
        self.padding = padding.max(0.0);
        self
    }

    /// Set minimum width.
    #[must_use]
    pub fn min_width(mut self, width: f32) -> Self {
        self.min_width = width.max(0.0);
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

    /// Replace the text with `value`, as if it had been committed.
    pub fn set_number(&mut self, value: f32) {
        self.text = format_number(value);
        self.committed_text.clone_from(&self.text);
        self.cursor = self.text.len();
    }

    /// Get the text being edited.
    #[must_use]
    pub fn text(&self) -> &str {
        &self.text
    }

    /// Get the last committed value, if the field holds one.
    #[must_use]
    pub fn number(&self) -> Option<f32> {
        parse_number(&self.committed_text).ok()
    }

    /// Get the `min` attribute.
    #[must_use]
    pub const fn get_min_attr(&self) -> Option<f32> {
        self.min_attr
    }

    /// Get the `max` attribute.
    #[must_use]
    pub const fn get_max_attr(&self) -> Option<f32> {
        self.max_attr
    }

    /// Check if focused.
    #[must_use]
    pub const fn is_focused(&self) -> bool {
        self.focused
    }

    /// Get cursor position.
    #[must_use]
    pub const fn cursor_position(&self) -> usize {
        self.cursor
    }

    /// Whether the text differs from the last committed text.
    #[must_use]
    pub fn is_dirty(&self) -> bool {
        self.text != self.committed_text
    }

    /// Commit the current text.
    ///
    /// Unchanged text commits nothing. Text that is not a number is logged,
    /// reverted and commits nothing.
    pub fn commit(&mut self) -> Option<NumberCommitted> {
        if !self.is_dirty() {
            return None;
        }
        match parse_number(&self.text) {
            Ok(value) => {
                self.committed_text.clone_from(&self.text);
                debug!(field = %self.class_name, value, "number field committed");
                Some(NumberCommitted { value })
            }
            Err(error) => {
                warn!(field = %self.class_name, %error, "number field input rejected");
                self.revert();
                None
            }
        }
    }

    /// Drop uncommitted edits.
    pub fn revert(&mut self) {
        self.text.clone_from(&self.committed_text);
        self.cursor = self.text.len();
    }

    fn insert_text(&mut self, text: &str) -> bool {
        let mut changed = false;
        for c in text.chars().filter(|c| is_number_char(*c)) {
            self.text.insert(self.cursor, c);
            self.cursor += 1;
            changed = true;
        }
        changed
    }

    fn backspace(&mut self) -> bool {
        if self.cursor == 0 {
            return false;
        }
        self.cursor -= 1;
        self.text.remove(self.cursor);
        true
    }

    fn delete(&mut self) -> bool {
        if self.cursor >= self.text.len() {
            return false;
        }
        self.text.remove(self.cursor);
        true
    }

    fn blur(&mut self) -> Option<NumberCommitted> {
        self.focused = false;
        self.commit()
    }
}

/// Characters a number field accepts from text input.
fn is_number_char(c: char) -> bool {
    c.is_ascii_digit() || matches!(c, '.' | '-' | '+' | 'e' | 'E')
}

/// Parse field text as a finite number.
pub fn parse_number(text: &str) -> RangeResult<f32> {
    let trimmed = text.trim();
    match trimmed.parse::<f32>() {
        Ok(value) if value.is_finite() => Ok(value),
        _ => Err(RangeError::NotANumber(trimmed.to_string())),
    }
}

/// Format a value the way a number input shows it: integers without a
/// fractional part.
#[must_use]
pub fn format_number(value: f32) -> String {
    if value.fract() == 0.0 && value.abs() < 1e9 {
        format!("{value:.0}")
    } else {
        value.to_string()
    }
}

impl Widget for NumberField {
    fn type_id(&self) -> TypeId {
        TypeId::of::<Self>()
    }

    fn measure(&self, constraints: Constraints) -> Size {
        let height = 2.0f32.mul_add(self.padding, self.text_style.size);
        let width = self.min_width.max(constraints.min_width);
        constraints.constrain(Size::new(width, height))
    }

    fn layout(&mut self, bounds: Rect) -> LayoutResult {
        self.bounds = bounds;
        LayoutResult {
            size: bounds.size(),
        }
    }

    fn paint(&self, canvas: &mut dyn Canvas) {
        canvas.fill_rect(self.bounds, self.background_color);

        let border_color = if self.focused {
            self.focus_border_color
        } else {
            self.border_color
        };
        canvas.stroke_rect(self.bounds, border_color, 1.0);

        let position = Point::new(self.bounds.x, self.bounds.y) + Point::new(self.padding, self.padding);
        canvas.draw_text(&self.text, position, &self.text_style);
    }

    fn event(&mut self, event: &Event) -> Option<Box<dyn Any + Send>> {
        if self.disabled {
            return None;
        }

        let committed = match event {
            Event::MouseDown { position, .. } => {
                let inside = self.bounds.contains_point(position);
                if inside {
                    if !self.focused {
                        self.focused = true;
                        self.cursor = self.text.len();
                    }
                    None
                } else if self.focused {
                    self.blur()
                } else {
                    None
                }
            }
            Event::FocusIn => {
                self.focused = true;
                None
            }
            Event::FocusOut if self.focused => self.blur(),
            Event::TextInput { text } if self.focused => {
                self.insert_text(text);
                None
            }
            Event::KeyDown { key } if self.focused => match key {
                Key::Enter => self.commit(),
                Key::Escape => {
                    self.revert();
                    None
                }
                Key::Tab => self.blur(),
                Key::Backspace => {
                    self.backspace();
                    None
                }
                Key::Delete => {
                    self.delete();
                    None
                }
                Key::Left => {
                    self.cursor = self.cursor.saturating_sub(1);
                    None
                }
                Key::Right => {
                    self.cursor = (self.cursor + 1).min(self.text.len());
                    None
                }
                Key::Home => {
                    self.cursor = 0;
                    None
                }
                Key::End => {
                    self.cursor = self.text.len();
                    None
                }
            },
            _ => None,
        };

        committed.map(|msg| Box::new(msg) as Box<dyn Any + Send>)
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
        AccessibleRole::SpinButton
    }

    fn bounds(&self) -> Rect {
        self.bounds
    }
}

impl Brick for NumberField {
    fn brick_name(&self) -> &'static str {
        "NumberField"
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
        verification.check(
            BrickAssertion::Invariant("numeric-value"),
            self.committed_text.is_empty() || self.number().is_some(),
            || format!("committed text {:?} is not a number", self.committed_text),
        );
        verification.check_latency(self.budget(), start.elapsed());
        verification
    }

    fn to_html(&self) -> String {
        let mut attrs = String::new();
        if let Some(test_id) = &self.test_id_value {
            attrs.push_str(&format!(r#" data-testid="{test_id}""#));
        }
        if let Some(name) = &self.accessible_name_value {
            attrs.push_str(&format!(r#" aria-label="{name}""#));
        }
        if let Some(min) = self.min_attr {
            attrs.push_str(&format!(r#" min="{}""#, format_number(min)));
        }
        if let Some(max) = self.max_attr {
            attrs.push_str(&format!(r#" max="{}""#, format_number(max)));
        }
        if self.disabled {
            attrs.push_str(" disabled");
        }
        format!(
            r#"<input type="number" class="{}"{} value="{}"/>"#,
            self.class_name, attrs, self.committed_text
        )
    }

    fn to_css(&self) -> String {
        format!(".{} {{ display: inline-block; }}", self.class_name.replace(' ', "."))
    }

    fn test_id(&self) -> Option<&str> {
        self.test_id_value.as_deref()
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use rangebar_core::{draw::DrawCommand, MouseButton, RecordingCanvas};

    fn focused_field(value: f32) -> NumberField {
        let mut field = NumberField::new().value(value);
        field.layout(Rect::new(0.0, 0.0, 100.0, 32.0));
        field.event(&Event::FocusIn);
        field
    }

    fn type_text(field: &mut NumberField, text: &str) {
        field.event(&Event::TextInput { text: text.into() });
    }

    fn committed(msg: Option<Box<dyn Any + Send>>) -> Option<f32> {
        msg.and_then(|m| m.downcast::<NumberCommitted>().ok())
            .map(|m| m.value)
    }

    // =========================================================================
    // Parsing and formatting
    // =========================================================================

    #[test]
    fn test_parse_number() {
        assert_eq!(parse_number("35000").unwrap(), 35_000.0);
        assert_eq!(parse_number(" -12.5 ").unwrap(), -12.5);
        assert_eq!(parse_number("1e3").unwrap(), 1000.0);
    }

    #[test]
    fn test_parse_number_rejects() {
        assert!(matches!(parse_number(""), Err(RangeError::NotANumber(_))));
        assert!(matches!(parse_number("1-2"), Err(RangeError::NotANumber(_))));
        assert!(matches!(parse_number("1e40"), Err(RangeError::NotANumber(_))));
    }

    #[test]
    fn test_format_number() {
        assert_eq!(format_number(35_000.0), "35000");
        assert_eq!(format_number(-3.0), "-3");
        assert_eq!(format_number(12.5), "12.5");
    }

    // =========================================================================
    // Construction
    // =========================================================================

    #[test]
    fn test_number_field_builder() {
        let field = NumberField::new()
            .value(100.0)
            .min_attr(0.0)
            .max_attr(35_000.0)
            .class_name("filter__number-field--min")
            .with_test_id("price-from")
            .with_accessible_name("Price from");

        assert_eq!(field.text(), "100");
        assert_eq!(field.number(), Some(100.0));
        assert_eq!(field.get_min_attr(), Some(0.0));
        assert_eq!(field.get_max_attr(), Some(35_000.0));
        assert_eq!(Brick::test_id(&field), Some("price-from"));
        assert_eq!(field.accessible_name(), Some("Price from"));
        assert_eq!(field.accessible_role(), AccessibleRole::SpinButton);
        assert!(!field.is_dirty());
    }

    #[test]
    fn test_empty_field_has_no_number() {
        assert_eq!(NumberField::default().number(), None);
    }

    // =========================================================================
    // Editing
    // =========================================================================

    #[test]
    fn test_text_input_filters_non_numeric() {
        let mut field = focused_field(1.0);
        type_text(&mut field, "2a b3");
        assert_eq!(field.text(), "123");
        assert_eq!(field.cursor_position(), 3);
    }

    #[test]
    fn test_text_input_ignored_when_unfocused() {
        let mut field = NumberField::new().value(1.0);
        type_text(&mut field, "2");
        assert_eq!(field.text(), "1");
    }

    #[test]
    fn test_backspace_and_cursor_keys() {
        let mut field = focused_field(1234.0);
        field.event(&Event::KeyDown { key: Key::Left });
        field.event(&Event::KeyDown { key: Key::Backspace });
        assert_eq!(field.text(), "124");
        field.event(&Event::KeyDown { key: Key::Home });
        field.event(&Event::KeyDown { key: Key::Delete });
        assert_eq!(field.text(), "24");
        field.event(&Event::KeyDown { key: Key::End });
        assert_eq!(field.cursor_position(), 2);
    }

    #[test]
    fn test_edits_emit_no_message() {
        let mut field = focused_field(1.0);
        assert!(field.event(&Event::TextInput { text: "5".into() }).is_none());
        assert!(field.event(&Event::KeyDown { key: Key::Backspace }).is_none());
    }

    // =========================================================================
    // Commit
    // =========================================================================

    #[test]
    fn test_enter_commits_value() {
        let mut field = focused_field(1.0);
        type_text(&mut field, "5");
        let value = committed(field.event(&Event::KeyDown { key: Key::Enter }));
        assert_eq!(value, Some(15.0));
        assert!(field.is_focused());
        assert_eq!(field.number(), Some(15.0));
    }

    #[test]
    fn test_focus_out_commits_value() {
        let mut field = focused_field(1.0);
        type_text(&mut field, "0");
        assert_eq!(committed(field.event(&Event::FocusOut)), Some(10.0));
        assert!(!field.is_focused());
    }

    #[test]
    fn test_click_outside_commits_value() {
        let mut field = focused_field(7.0);
        type_text(&mut field, "7");
        let msg = field.event(&Event::MouseDown {
            position: Point::new(500.0, 500.0),
            button: MouseButton::Left,
        });
        assert_eq!(committed(msg), Some(77.0));
    }

    #[test]
    fn test_unchanged_text_commits_nothing() {
        let mut field = focused_field(7.0);
        assert!(field.event(&Event::KeyDown { key: Key::Enter }).is_none());
        assert!(field.event(&Event::FocusOut).is_none());
    }

    #[test]
    fn test_invalid_text_reverts() {
        let mut field = focused_field(500.0);
        type_text(&mut field, "-");
        assert_eq!(field.text(), "500-");
        assert!(field.event(&Event::KeyDown { key: Key::Enter }).is_none());
        assert_eq!(field.text(), "500");
        assert!(!field.is_dirty());
    }

    #[test]
    fn test_escape_reverts() {
        let mut field = focused_field(500.0);
        type_text(&mut field, "9");
        field.event(&Event::KeyDown { key: Key::Escape });
        assert_eq!(field.text(), "500");
        assert!(field.event(&Event::FocusOut).is_none());
    }

    #[test]
    fn test_disabled_ignores_events() {
        let mut field = NumberField::new().value(1.0).disabled(true);
        field.event(&Event::FocusIn);
        assert!(!field.is_focused());
        assert!(!field.is_interactive());
    }

    // =========================================================================
    // Paint and Brick
    // =========================================================================

    #[test]
    fn test_paint_draws_box_and_text() {
        let mut field = NumberField::new().value(35_000.0);
        field.layout(Rect::new(10.0, 20.0, 100.0, 32.0));
        let mut canvas = RecordingCanvas::new();
        field.paint(&mut canvas);

        assert_eq!(canvas.command_count(), 3);
        match &canvas.commands()[2] {
            DrawCommand::Text {
                content, position, ..
            } => {
                assert_eq!(content, "35000");
                assert_eq!(*position, Point::new(18.0, 28.0));
            }
            DrawCommand::Rect { .. } => panic!("Expected Text command"),
        }
    }

    #[test]
    fn test_measure_uses_padding() {
        let field = NumberField::new().padding(4.0);
        let size = field.measure(Constraints::loose(Size::new(500.0, 500.0)));
        assert_eq!(size, Size::new(80.0, 24.0));
    }

    #[test]
    fn test_to_html_renders_input() {
        let field = NumberField::new()
            .value(0.0)
            .min_attr(0.0)
            .class_name("filter__number-field filter__number-field--min");
        assert_eq!(
            field.to_html(),
            r#"<input type="number" class="filter__number-field filter__number-field--min" min="0" value="0"/>"#
        );
        assert!(field.to_css().starts_with(".filter__number-field.filter__number-field--min"));
    }

    #[test]
    fn test_verify_passes() {
        let field = NumberField::new().value(3.0);
        assert!(field.verify().is_valid());
        assert!(field.can_render());
        assert_eq!(field.assertions().len(), 2);
    }
}
