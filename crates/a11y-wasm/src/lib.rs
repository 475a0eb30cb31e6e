// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>

//! Browser host for the accessibility overlay.
//!
//! Wraps [`a11y_widget::WidgetController`] in a wasm-bindgen class that owns
//! the page integration: `localStorage` persistence, the live DOM, console
//! logging and the delegated document listeners.
//!
//! # Usage (from JavaScript)
//!
//! ```js
//! import init, { AccessibilityWidget } from 'a11y-wasm';
//!
//! await init();
//! const widget = new AccessibilityWidget({ position: 'left', primaryColor: '#224488' });
//!
//! widget.open();
//! console.log(widget.preferences().textSize);
//! widget.reset();
//! ```

#![deny(missing_docs)]

pub mod dom;
pub mod events;
pub mod logging;
pub mod storage;

use std::cell::RefCell;
use std::rc::Rc;

use a11y_app_core::widget_config::WidgetConfig;
use a11y_widget::pointer::PointerPosition;
use a11y_widget::surface::{CONTROL_ATTR, FEATURE_ATTR, SLIDER_ATTR};
use a11y_widget::{Key, WidgetController, WidgetEvent};
use tracing::{debug, info, warn, Level};
use wasm_bindgen::prelude::*;
use wasm_bindgen::JsCast;
use web_sys::{Document, Element, Event, HtmlInputElement, KeyboardEvent, MouseEvent, Node};

use crate::dom::WebDocument;
use crate::storage::LocalStorageStore;

type Controller = WidgetController<LocalStorageStore, WebDocument>;
type Shared = Rc<RefCell<Controller>>;
type Route = fn(&Controller, &Event) -> Option<WidgetEvent>;

/// One delegated listener registered on the document.
struct Listener {
    kind: &'static str,
    callback: Closure<dyn FnMut(Event)>,
}

// ─── AccessibilityWidget ───

/// The accessibility widget mounted into the current page.
///
/// Listeners stay attached for as long as the value lives; freeing it from
/// JavaScript detaches them. The mounted elements and the applied classes stay
/// in the page.
#[wasm_bindgen]
pub struct AccessibilityWidget {
    controller: Shared,
    document: Document,
    listeners: Vec<Listener>,
}

#[wasm_bindgen]
impl AccessibilityWidget {
    /// Mount the widget into the current document.
    ///
    /// `config` is the host configuration object (`position`, `primaryColor`,
    /// `buttonSize`); `undefined` and unusable fields fall back to defaults.
    ///
    /// # Errors
    ///
    /// Fails when there is no window, document or body to attach to, or when
    /// the document refuses a listener.
    #[wasm_bindgen(constructor)]
    pub fn new(config: JsValue) -> Result<AccessibilityWidget, JsError> {
        #[cfg(feature = "console-panic")]
        console_error_panic_hook::set_once();
        logging::init(Level::INFO);

        let config = host_config(config);
        let doc = WebDocument::from_window().map_err(|e| JsError::new(&e.to_string()))?;
        let document = doc.dom().clone();
        let controller = WidgetController::init(config, LocalStorageStore::from_window(), doc);
        let controller: Shared = Rc::new(RefCell::new(controller));

        let mut widget = Self {
            controller,
            document,
            listeners: Vec::new(),
        };
        widget.listen("click", on_click)?;
        widget.listen("input", on_input)?;
        widget.listen("keydown", on_keydown)?;
        widget.listen("mousedown", on_mousedown)?;
        widget.listen("mousemove", on_mousemove)?;
        info!("accessibility widget ready");
        Ok(widget)
    }

    /// Open the panel.
    pub fn open(&self) {
        self.with(Controller::open);
    }

    /// Close the panel.
    pub fn close(&self) {
        self.with(Controller::close);
    }

    /// Whether the panel is open.
    #[wasm_bindgen(js_name = isOpen)]
    pub fn is_open(&self) -> bool {
        self.controller
            .try_borrow()
            .map(|c| c.is_open())
            .unwrap_or(false)
    }

    /// Snapshot of the current preferences as a plain object.
    ///
    /// # Errors
    ///
    /// Fails if the record cannot be converted to a JavaScript value.
    pub fn preferences(&self) -> Result<JsValue, JsError> {
        let controller = self
            .controller
            .try_borrow()
            .map_err(|_| JsError::new("widget is busy handling an event"))?;
        serde_wasm_bindgen::to_value(controller.preferences())
            .map_err(|e| JsError::new(&e.to_string()))
    }

    /// Reset every preference to its default.
    pub fn reset(&self) {
        self.with(Controller::reset_preferences);
    }
}

impl AccessibilityWidget {
    fn with(&self, f: impl FnOnce(&mut Controller)) {
        match self.controller.try_borrow_mut() {
            Ok(mut c) => f(&mut c),
            Err(_) => debug!("widget call re-entered from an event handler; ignored"),
        }
    }

    fn listen(&mut self, kind: &'static str, route: Route) -> Result<(), JsError> {
        let controller = Rc::clone(&self.controller);
        let callback = Closure::<dyn FnMut(Event)>::new(move |event: Event| {
            dispatch(&controller, &event, route);
        });
        self.document
            .add_event_listener_with_callback(kind, callback.as_ref().unchecked_ref())
            .map_err(|e| JsError::new(&format!("could not listen for {kind}: {e:?}")))?;
        self.listeners.push(Listener { kind, callback });
        Ok(())
    }
}

impl Drop for AccessibilityWidget {
    fn drop(&mut self) {
        for listener in self.listeners.drain(..) {
            let removed = self.document.remove_event_listener_with_callback(
                listener.kind,
                listener.callback.as_ref().unchecked_ref(),
            );
            if removed.is_err() {
                debug!(kind = listener.kind, "listener already gone");
            }
        }
    }
}

fn host_config(config: JsValue) -> WidgetConfig {
    if config.is_undefined() || config.is_null() {
        return WidgetConfig::default();
    }
    serde_wasm_bindgen::from_value::<WidgetConfig>(config).unwrap_or_else(|err| {
        warn!(%err, "unreadable widget configuration; using defaults");
        WidgetConfig::default()
    })
}

// ─── Event routing ───

fn dispatch(controller: &Shared, event: &Event, route: Route) {
    let Ok(mut c) = controller.try_borrow_mut() else {
        debug!(kind = %event.type_(), "event arrived while busy; dropped");
        return;
    };
    if let Some(widget_event) = route(&c, event) {
        c.handle(widget_event);
    }
}

fn on_click(c: &Controller, event: &Event) -> Option<WidgetEvent> {
    let target = event.target()?.dyn_into::<Node>().ok()?;
    let inside = c.document().inside_widget(&target);
    let control = target
        .dyn_ref::<Element>()
        .and_then(|el| el.closest(&format!("[{CONTROL_ATTR}]")).ok().flatten());
    let kind = control.as_ref().and_then(|el| el.get_attribute(CONTROL_ATTR));
    let feature = control.as_ref().and_then(|el| el.get_attribute(FEATURE_ATTR));
    events::click(kind.as_deref(), feature.as_deref(), inside)
}

fn on_input(_: &Controller, event: &Event) -> Option<WidgetEvent> {
    let input = event.target()?.dyn_into::<HtmlInputElement>().ok()?;
    let slider = input.get_attribute(SLIDER_ATTR)?;
    events::slider_input(&slider, &input.value())
}

fn on_keydown(_: &Controller, event: &Event) -> Option<WidgetEvent> {
    let key = event.dyn_ref::<KeyboardEvent>()?.key();
    Some(WidgetEvent::KeyPressed(Key::from_dom(&key)))
}

fn on_mousedown(_: &Controller, _: &Event) -> Option<WidgetEvent> {
    Some(WidgetEvent::PointerPressed)
}

fn on_mousemove(_: &Controller, event: &Event) -> Option<WidgetEvent> {
    let mouse = event.dyn_ref::<MouseEvent>()?;
    Some(WidgetEvent::PointerMoved(PointerPosition::new(
        f64::from(mouse.client_x()),
        f64::from(mouse.client_y()),
    )))
}
