//! Range slider bound to page markup.

use super::events::{element_page_x, page_x};
use super::render::{frame_json, DomPatch};
use rangebar_core::{BrickError, BrickResult};
use rangebar_widgets::{
    format_number, parse_number, Handle, RangeConfig, RangeFrame, RangeSelectors, RangeState,
    TrackGeometry,
};
use std::cell::RefCell;
use std::rc::Rc;
use tracing::{debug, warn};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{
    window, Document, Element, EventTarget, HtmlElement, HtmlInputElement, MouseEvent, Window,
};

type Listener = Closure<dyn FnMut(web_sys::Event)>;

/// Change callback and the JSON frame to hand it.
type Notice = (js_sys::Function, String);

thread_local! {
    static MOUNTED: RefCell<Vec<DomRange>> = const { RefCell::new(Vec::new()) };
}

/// Elements making up one range.
struct Parts {
    scale: HtmlElement,
    bar: HtmlElement,
    min_thumb: HtmlElement,
    max_thumb: HtmlElement,
    min_input: HtmlInputElement,
    max_input: HtmlInputElement,
}

impl Parts {
    fn find(root: &Element, selectors: &RangeSelectors) -> BrickResult<Self> {
        Ok(Self {
            scale: query(root, &selectors.scale)?,
            bar: query(root, &selectors.bar)?,
            min_thumb: query(root, &selectors.min_thumb)?,
            max_thumb: query(root, &selectors.max_thumb)?,
            min_input: query(root, &selectors.min_input)?,
            max_input: query(root, &selectors.max_input)?,
        })
    }

    const fn thumb(&self, handle: Handle) -> &HtmlElement {
        match handle {
            Handle::Min => &self.min_thumb,
            Handle::Max => &self.max_thumb,
        }
    }

    const fn input(&self, handle: Handle) -> &HtmlInputElement {
        match handle {
            Handle::Min => &self.min_input,
            Handle::Max => &self.max_input,
        }
    }
}

fn query<T: JsCast>(root: &Element, selector: &str) -> BrickResult<T> {
    root.query_selector(selector)
        .ok()
        .flatten()
        .and_then(|el| el.dyn_into::<T>().ok())
        .ok_or_else(|| BrickError::MissingElement {
            selector: selector.to_string(),
        })
}

fn set_style(element: &HtmlElement, property: &str, value: &str) {
    element.style().set_property(property, value).ok();
}

fn to_js(error: impl std::fmt::Display) -> JsValue {
    JsValue::from_str(&error.to_string())
}

fn notify(notice: Option<Notice>) {
    if let Some((callback, json)) = notice {
        callback
            .call1(&JsValue::NULL, &JsValue::from_str(&json))
            .ok();
    }
}

/// State shared between the event listeners of one range.
struct Shared {
    window: Window,
    document: Document,
    parts: Parts,
    state: RangeState,
    last_frame: RangeFrame,
    drag_move: Option<js_sys::Function>,
    drag_end: Option<js_sys::Function>,
    on_change: Option<js_sys::Function>,
}

impl Shared {
    fn track_start(&self) -> f32 {
        element_page_x(&self.parts.scale, &self.window)
    }

    /// Write the current frame to the markup. Returns a change notice when
    /// the frame differs from the last one written.
    fn render(&mut self) -> Option<Notice> {
        let frame = self.state.frame();
        let patch = DomPatch::since(&self.last_frame, &frame);
        set_style(&self.parts.min_thumb, "left", &patch.min_thumb_left);
        set_style(&self.parts.max_thumb, "left", &patch.max_thumb_left);
        set_style(&self.parts.bar, "left", &patch.bar_left);
        set_style(&self.parts.bar, "width", &patch.bar_width);
        if let Some(value) = &patch.from_value {
            self.parts.min_input.set_value(value);
        }
        if let Some(value) = &patch.to_value {
            self.parts.max_input.set_value(value);
        }

        if frame == self.last_frame {
            return None;
        }
        self.last_frame = frame;
        self.on_change
            .clone()
            .map(|callback| (callback, frame_json(&frame)))
    }

    fn begin_drag(&mut self, handle: Handle, event: &MouseEvent) {
        let track_start = self.track_start();
        self.state.begin_drag(handle, page_x(event), track_start);
        if let (Some(on_move), Some(on_end)) = (&self.drag_move, &self.drag_end) {
            self.document
                .add_event_listener_with_callback("mousemove", on_move)
                .ok();
            self.document
                .add_event_listener_with_callback("mouseup", on_end)
                .ok();
        }
    }

    fn drag(&mut self, event: &MouseEvent) -> Option<Notice> {
        let track_start = self.track_start();
        self.state.drag_to(page_x(event), track_start)?;
        self.render()
    }

    fn end_drag(&mut self) {
        self.state.end_drag();
        if let (Some(on_move), Some(on_end)) = (&self.drag_move, &self.drag_end) {
            self.document
                .remove_event_listener_with_callback("mousemove", on_move)
                .ok();
            self.document
                .remove_event_listener_with_callback("mouseup", on_end)
                .ok();
        }
    }

    fn commit(&mut self, handle: Handle) -> Option<Notice> {
        let input = self.parts.input(handle).clone();
        match parse_number(&input.value()) {
            Ok(value) => match handle {
                Handle::Min => self.state.commit_from(value),
                Handle::Max => self.state.commit_to(value),
            },
            Err(error) => {
                warn!(?handle, %error, "range field input rejected");
                web_sys::console::warn_1(&JsValue::from_str(&format!(
                    "range field input rejected: {error}"
                )));
            }
        }
        let notice = self.render();
        // the edited field shows the accepted value even when the frame did not move
        let accepted = match handle {
            Handle::Min => self.state.from_field(),
            Handle::Max => self.state.to_field(),
        };
        input.set_value(&format_number(accepted));
        notice
    }
}

/// A listener attached to an event target, detached on drop.
struct Binding {
    target: EventTarget,
    kind: &'static str,
    listener: Listener,
}

/// Range slider driving existing page markup.
#[wasm_bindgen]
pub struct DomRange {
    shared: Rc<RefCell<Shared>>,
    bindings: Vec<Binding>,
}

impl DomRange {
    /// Bind a range to the markup inside `root`.
    ///
    /// Handle offsets, handle width and track width are measured once
    /// here. The field values are read from the inputs when both hold
    /// numbers.
    pub fn mount(root: &Element, config: &RangeConfig) -> Result<Self, JsValue> {
        config.validate().map_err(to_js)?;
        let window = window().ok_or("No window")?;
        let document = window.document().ok_or("No document")?;
        let parts = Parts::find(root, &config.selectors).map_err(to_js)?;

        let track_start = element_page_x(&parts.scale, &window);
        let geometry = TrackGeometry::new(
            parts.scale.offset_width() as f32,
            parts.min_thumb.offset_width() as f32,
        );
        let min_left = element_page_x(&parts.min_thumb, &window) - track_start;
        let max_left = element_page_x(&parts.max_thumb, &window) - track_start;
        let mut state = RangeState::new(config, geometry).with_offsets(min_left, max_left);
        if let (Ok(from), Ok(to)) = (
            parse_number(&parts.min_input.value()),
            parse_number(&parts.max_input.value()),
        ) {
            state.set_fields(from, to);
        }

        parts
            .min_input
            .set_attribute("min", &format_number(config.min))?;
        parts
            .max_input
            .set_attribute("max", &format_number(config.max))?;

        debug!(
            scale_width = geometry.scale_width,
            handle_width = geometry.handle_width,
            min_left,
            max_left,
            "range mounted"
        );

        let last_frame = state.frame();
        let shared = Rc::new(RefCell::new(Shared {
            window,
            document,
            parts,
            state,
            last_frame,
            drag_move: None,
            drag_end: None,
            on_change: None,
        }));
        let mut range = Self {
            shared,
            bindings: Vec::new(),
        };
        range.bind()?;
        Ok(range)
    }

    fn listen(
        &mut self,
        target: &EventTarget,
        kind: &'static str,
        listener: Listener,
    ) -> Result<(), JsValue> {
        target.add_event_listener_with_callback(kind, listener.as_ref().unchecked_ref())?;
        self.bindings.push(Binding {
            target: target.clone(),
            kind,
            listener,
        });
        Ok(())
    }

    fn bind(&mut self) -> Result<(), JsValue> {
        // Move and release listeners go on the document while a drag is active.
        let shared = Rc::clone(&self.shared);
        let on_move: Listener = Closure::new(move |e: web_sys::Event| {
            if let Some(event) = e.dyn_ref::<MouseEvent>() {
                let notice = shared.borrow_mut().drag(event);
                notify(notice);
            }
        });
        let shared = Rc::clone(&self.shared);
        let on_end: Listener = Closure::new(move |_: web_sys::Event| {
            shared.borrow_mut().end_drag();
        });
        let document: EventTarget = self.shared.borrow().document.clone().into();
        {
            let mut shared = self.shared.borrow_mut();
            shared.drag_move = Some(on_move.as_ref().unchecked_ref::<js_sys::Function>().clone());
            shared.drag_end = Some(on_end.as_ref().unchecked_ref::<js_sys::Function>().clone());
        }
        self.bindings.push(Binding {
            target: document.clone(),
            kind: "mousemove",
            listener: on_move,
        });
        self.bindings.push(Binding {
            target: document,
            kind: "mouseup",
            listener: on_end,
        });

        for handle in [Handle::Min, Handle::Max] {
            let (thumb, input) = {
                let shared = self.shared.borrow();
                (
                    shared.parts.thumb(handle).clone(),
                    shared.parts.input(handle).clone(),
                )
            };

            let shared = Rc::clone(&self.shared);
            let on_press: Listener = Closure::new(move |e: web_sys::Event| {
                if let Some(event) = e.dyn_ref::<MouseEvent>() {
                    shared.borrow_mut().begin_drag(handle, event);
                }
            });
            self.listen(&thumb, "mousedown", on_press)?;

            // native image drag would swallow the mouse events
            let no_native_drag: Listener =
                Closure::new(|e: web_sys::Event| e.prevent_default());
            self.listen(&thumb, "dragstart", no_native_drag)?;

            let shared = Rc::clone(&self.shared);
            let on_change: Listener = Closure::new(move |_: web_sys::Event| {
                let notice = shared.borrow_mut().commit(handle);
                notify(notice);
            });
            self.listen(&input, "change", on_change)?;
        }
        Ok(())
    }
}

#[wasm_bindgen]
impl DomRange {
    /// Bind a range to the markup inside `root` using a YAML config.
    #[wasm_bindgen(js_name = fromYaml)]
    pub fn from_yaml(root: &Element, yaml: &str) -> Result<DomRange, JsValue> {
        let config = RangeConfig::from_yaml(yaml).map_err(to_js)?;
        Self::mount(root, &config)
    }

    /// Value shown in the from-field.
    #[wasm_bindgen(js_name = fromValue)]
    pub fn from_value(&self) -> f32 {
        self.shared.borrow().state.from_field()
    }

    /// Value shown in the to-field.
    #[wasm_bindgen(js_name = toValue)]
    pub fn to_value(&self) -> f32 {
        self.shared.borrow().state.to_field()
    }

    /// Current frame as JSON.
    #[wasm_bindgen(js_name = frameJson)]
    pub fn frame_json(&self) -> String {
        frame_json(&self.shared.borrow().state.frame())
    }

    /// Call `callback` with the frame JSON whenever the range changes.
    #[wasm_bindgen(js_name = onChange)]
    pub fn on_change(&self, callback: js_sys::Function) {
        self.shared.borrow_mut().on_change = Some(callback);
    }
}

impl Drop for DomRange {
    fn drop(&mut self) {
        for binding in &self.bindings {
            binding
                .target
                .remove_event_listener_with_callback(
                    binding.kind,
                    binding.listener.as_ref().unchecked_ref(),
                )
                .ok();
        }
    }
}

/// Mount a range on the first price filter on the page.
///
/// Returns `false` when the page has no price filter.
#[wasm_bindgen(js_name = mountPriceFilter)]
pub fn mount_price_filter() -> Result<bool, JsValue> {
    let config = RangeConfig::default();
    let document = window()
        .and_then(|w| w.document())
        .ok_or("No document")?;
    let Some(root) = document.query_selector(&config.selectors.root)? else {
        debug!(selector = %config.selectors.root, "no price filter on page");
        return Ok(false);
    };
    let range = DomRange::mount(&root, &config)?;
    MOUNTED.with(|mounted| mounted.borrow_mut().push(range));
    Ok(true)
}

/// Mount the price filter, sending a failure to the browser console.
///
/// Returns whether a range was mounted.
#[wasm_bindgen(js_name = mountPriceFilterOrReport)]
pub fn mount_price_filter_or_report() -> bool {
    match mount_price_filter() {
        Ok(mounted) => mounted,
        Err(error) => {
            let reason = error.as_string().unwrap_or_else(|| format!("{error:?}"));
            warn!(%reason, "price filter mount failed");
            web_sys::console::error_1(&JsValue::from_str(&format!(
                "price filter mount failed: {reason}"
            )));
            false
        }
    }
}

/// Mount the price filter once the document has loaded.
#[wasm_bindgen(start)]
pub fn start() -> Result<(), JsValue> {
    console_error_panic_hook::set_once();

    let document = window()
        .and_then(|w| w.document())
        .ok_or("No document")?;
    if document.ready_state() == "loading" {
        let on_ready = Closure::once_into_js(|| {
            mount_price_filter_or_report();
        });
        document.add_event_listener_with_callback("DOMContentLoaded", on_ready.unchecked_ref())?;
    } else {
        mount_price_filter_or_report();
    }
    Ok(())
}
