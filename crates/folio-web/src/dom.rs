//! Live-document host for the page behaviors
//!
//! [`WebEnvironment`] implements [`Environment`] over `web-sys`. Listener
//! closures live as long as the page and are leaked with `Closure::forget`;
//! timers are `gloo_timers` timeouts kept in an id-keyed table so they can be
//! cancelled.

use std::cell::{Cell, RefCell};
use std::collections::HashMap;
use std::rc::Rc;

use chrono::Datelike;
use folio_core::env::{
    ElementEvent, ElementHandler, Environment, EventDisposition, IntersectionHandler,
    IntersectionSample, ObserverOptions, PointerPosition, Rect, TimerCallback, TimerId,
    WindowHandler,
};
use folio_core::{BehaviorError, Result};
use gloo_timers::callback::Timeout;
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;
use web_sys::{
    Document, Element, Event, HtmlElement, IntersectionObserver, IntersectionObserverEntry,
    IntersectionObserverInit, MouseEvent, ScrollBehavior, ScrollIntoViewOptions,
    ScrollLogicalPosition, Window,
};

type TimerTable = Rc<RefCell<HashMap<u32, Timeout>>>;

/// [`Environment`] backed by the browser window and document
pub struct WebEnvironment {
    window: Window,
    document: Document,
    timers: TimerTable,
    next_timer: Cell<u32>,
    observers: RefCell<Vec<IntersectionObserver>>,
}

impl WebEnvironment {
    /// Bind to the global window and document.
    ///
    /// # Errors
    ///
    /// Returns [`BehaviorError::EnvironmentUnavailable`] outside a browser
    /// main thread.
    pub fn new() -> Result<Self> {
        let window = web_sys::window()
            .ok_or_else(|| BehaviorError::EnvironmentUnavailable("window".to_string()))?;
        let document = window
            .document()
            .ok_or_else(|| BehaviorError::EnvironmentUnavailable("document".to_string()))?;

        Ok(Self {
            window,
            document,
            timers: Rc::new(RefCell::new(HashMap::new())),
            next_timer: Cell::new(0),
            observers: RefCell::new(Vec::new()),
        })
    }

    #[must_use]
    pub const fn document(&self) -> &Document {
        &self.document
    }

    #[must_use]
    pub const fn window(&self) -> &Window {
        &self.window
    }

    fn add_window_listener(&self, event: &str, handler: WindowHandler) -> Result<()> {
        let closure = Closure::wrap(handler);
        self.window
            .add_event_listener_with_callback(event, closure.as_ref().unchecked_ref())
            .map_err(|e| BehaviorError::listener_failed(event, format!("{e:?}")))?;

        // Keep closure alive
        closure.forget();
        Ok(())
    }
}

fn as_html(element: &Element) -> Option<&HtmlElement> {
    element.dyn_ref::<HtmlElement>()
}

fn pointer_of(event: &Event) -> PointerPosition {
    event
        .dyn_ref::<MouseEvent>()
        .map(|mouse| {
            PointerPosition::new(f64::from(mouse.client_x()), f64::from(mouse.client_y()))
        })
        .unwrap_or_default()
}

impl Environment for WebEnvironment {
    type Element = Element;

    fn query(&self, selector: &str) -> Option<Element> {
        match self.document.query_selector(selector) {
            Ok(found) => found,
            Err(e) => {
                tracing::debug!(selector, "query rejected: {e:?}");
                None
            }
        }
    }

    fn query_all(&self, selector: &str) -> Vec<Element> {
        let Ok(nodes) = self.document.query_selector_all(selector) else {
            tracing::debug!(selector, "query_all rejected");
            return Vec::new();
        };

        (0..nodes.length())
            .filter_map(|index| nodes.item(index))
            .filter_map(|node| node.dyn_into::<Element>().ok())
            .collect()
    }

    fn body(&self) -> Option<Element> {
        self.document.body().map(Element::from)
    }

    fn attribute(&self, element: &Element, name: &str) -> Option<String> {
        element.get_attribute(name)
    }

    fn text(&self, element: &Element) -> String {
        element.text_content().unwrap_or_default()
    }

    fn set_text(&self, element: &Element, text: &str) {
        element.set_text_content(Some(text));
    }

    fn set_style(&self, element: &Element, property: &str, value: &str) {
        let Some(html) = as_html(element) else {
            return;
        };
        if let Err(e) = html.style().set_property(property, value) {
            tracing::debug!(property, "style rejected: {e:?}");
        }
    }

    fn add_class(&self, element: &Element, class: &str) {
        if let Err(e) = element.class_list().add_1(class) {
            tracing::debug!(class, "class add rejected: {e:?}");
        }
    }

    fn remove_class(&self, element: &Element, class: &str) {
        if let Err(e) = element.class_list().remove_1(class) {
            tracing::debug!(class, "class remove rejected: {e:?}");
        }
    }

    fn offset_top(&self, element: &Element) -> f64 {
        as_html(element).map_or(0.0, |html| f64::from(html.offset_top()))
    }

    fn bounding_rect(&self, element: &Element) -> Rect {
        let rect = element.get_bounding_client_rect();
        Rect::new(rect.left(), rect.top(), rect.width(), rect.height())
    }

    fn scroll_offset(&self) -> f64 {
        self.window.page_y_offset().unwrap_or(0.0)
    }

    fn viewport_height(&self) -> f64 {
        self.window
            .inner_height()
            .ok()
            .and_then(|height| height.as_f64())
            .unwrap_or(0.0)
    }

    fn scroll_into_view(&self, element: &Element) {
        let options = ScrollIntoViewOptions::new();
        options.set_behavior(ScrollBehavior::Smooth);
        options.set_block(ScrollLogicalPosition::Start);
        element.scroll_into_view_with_scroll_into_view_options(&options);
    }

    fn current_year(&self) -> i32 {
        chrono::Local::now().year()
    }

    fn console_styled(&self, message: &str, css: &str) {
        web_sys::console::log_2(
            &JsValue::from_str(&format!("%c{message}")),
            &JsValue::from_str(css),
        );
    }

    fn on_scroll(&self, handler: WindowHandler) -> Result<()> {
        self.add_window_listener("scroll", handler)
    }

    fn on_load(&self, mut handler: WindowHandler) -> Result<()> {
        // The load event has already fired when the module boots late
        if self.document.ready_state() == "complete" {
            handler();
            return Ok(());
        }
        self.add_window_listener("load", handler)
    }

    fn on_element(
        &self,
        element: &Element,
        event: ElementEvent,
        mut handler: ElementHandler,
    ) -> Result<()> {
        let closure = Closure::wrap(Box::new(move |dom_event: Event| {
            if handler(pointer_of(&dom_event)) == EventDisposition::PreventDefault {
                dom_event.prevent_default();
            }
        }) as Box<dyn FnMut(Event)>);

        element
            .add_event_listener_with_callback(event.dom_name(), closure.as_ref().unchecked_ref())
            .map_err(|e| BehaviorError::listener_failed(event.dom_name(), format!("{e:?}")))?;

        closure.forget();
        Ok(())
    }

    fn observe_intersections(
        &self,
        elements: &[Element],
        options: &ObserverOptions,
        mut handler: IntersectionHandler<Element>,
    ) -> Result<()> {
        let callback = Closure::wrap(Box::new(
            move |entries: js_sys::Array, _observer: IntersectionObserver| {
                for entry in entries.iter() {
                    let Ok(entry) = entry.dyn_into::<IntersectionObserverEntry>() else {
                        continue;
                    };
                    let sample = IntersectionSample {
                        ratio: entry.intersection_ratio(),
                        is_intersecting: entry.is_intersecting(),
                    };
                    handler(&entry.target(), sample);
                }
            },
        ) as Box<dyn FnMut(js_sys::Array, IntersectionObserver)>);

        let init = IntersectionObserverInit::new();
        init.set_threshold(&JsValue::from_f64(options.threshold));
        init.set_root_margin(&options.root_margin);

        let observer =
            IntersectionObserver::new_with_options(callback.as_ref().unchecked_ref(), &init)
                .map_err(|e| BehaviorError::ObserverFailed(format!("{e:?}")))?;

        for element in elements {
            observer.observe(element);
        }

        callback.forget();
        self.observers.borrow_mut().push(observer);
        Ok(())
    }

    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<TimerId> {
        let id = self.next_timer.get();
        self.next_timer.set(id.wrapping_add(1));

        let timers = Rc::clone(&self.timers);
        let timeout = Timeout::new(delay_ms, move || {
            let fired = timers.borrow_mut().remove(&id);
            callback();
            drop(fired);
        });
        self.timers.borrow_mut().insert(id, timeout);

        Ok(TimerId(id))
    }

    fn clear_timeout(&self, id: TimerId) {
        // Dropping a gloo timeout clears it
        let pending = self.timers.borrow_mut().remove(&id.0);
        drop(pending);
    }
}
