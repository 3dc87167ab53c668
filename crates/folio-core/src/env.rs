//! Host capability interface
//!
//! Behaviors never touch the browser directly. Everything they need from the
//! host page (element lookup, style mutation, geometry, listeners, observers
//! and timers) goes through [`Environment`], which the browser binding
//! implements over `web-sys` and tests implement with
//! [`crate::fake::FakeEnvironment`].

use crate::error::Result;

/// Element-level events the behaviors listen to
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum ElementEvent {
    Click,
    PointerEnter,
    PointerLeave,
    PointerMove,
}

impl ElementEvent {
    /// DOM event name
    #[must_use]
    pub const fn dom_name(self) -> &'static str {
        match self {
            Self::Click => "click",
            Self::PointerEnter => "mouseenter",
            Self::PointerLeave => "mouseleave",
            Self::PointerMove => "mousemove",
        }
    }
}

/// Pointer position delivered with element events, in client coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct PointerPosition {
    pub client_x: f64,
    pub client_y: f64,
}

impl PointerPosition {
    #[must_use]
    pub const fn new(client_x: f64, client_y: f64) -> Self {
        Self { client_x, client_y }
    }
}

/// What the host should do with the event after the handler ran
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum EventDisposition {
    /// Let the default action (e.g. navigation) happen
    Continue,
    /// Suppress the default action
    PreventDefault,
}

/// Element bounding rectangle in client coordinates
#[derive(Debug, Clone, Copy, Default, PartialEq)]
pub struct Rect {
    pub left: f64,
    pub top: f64,
    pub width: f64,
    pub height: f64,
}

impl Rect {
    #[must_use]
    pub const fn new(left: f64, top: f64, width: f64, height: f64) -> Self {
        Self {
            left,
            top,
            width,
            height,
        }
    }
}

/// Intersection observer configuration
#[derive(Debug, Clone, PartialEq)]
pub struct ObserverOptions {
    pub threshold: f64,
    pub root_margin: String,
}

/// One intersection report for an observed element
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct IntersectionSample {
    pub ratio: f64,
    pub is_intersecting: bool,
}

/// Opaque handle for a scheduled deferred callback
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TimerId(pub u32);

/// Handler for window-level notifications (scroll, load)
pub type WindowHandler = Box<dyn FnMut()>;

/// Handler for element events
pub type ElementHandler = Box<dyn FnMut(PointerPosition) -> EventDisposition>;

/// Handler for intersection reports
pub type IntersectionHandler<E> = Box<dyn FnMut(&E, IntersectionSample)>;

/// Deferred callback
pub type TimerCallback = Box<dyn FnOnce()>;

/// Everything the page behaviors need from their host.
///
/// Implementations are single-threaded and are shared between listeners via
/// `Rc`. Handlers run on the host's event loop and must not re-enter the
/// registration methods while a notification for the same event is being
/// dispatched.
pub trait Environment: 'static {
    /// Host element handle
    type Element: Clone + 'static;

    /// First element matching `selector`, if any
    fn query(&self, selector: &str) -> Option<Self::Element>;

    /// All elements matching `selector`, in document order
    fn query_all(&self, selector: &str) -> Vec<Self::Element>;

    /// Document body
    fn body(&self) -> Option<Self::Element>;

    fn attribute(&self, element: &Self::Element, name: &str) -> Option<String>;

    fn text(&self, element: &Self::Element) -> String;

    fn set_text(&self, element: &Self::Element, text: &str);

    /// Set an inline style property (kebab-case CSS name)
    fn set_style(&self, element: &Self::Element, property: &str, value: &str);

    fn add_class(&self, element: &Self::Element, class: &str);

    fn remove_class(&self, element: &Self::Element, class: &str);

    /// Layout offset of the element's top edge from the document top
    fn offset_top(&self, element: &Self::Element) -> f64;

    fn bounding_rect(&self, element: &Self::Element) -> Rect;

    /// Current vertical scroll offset of the window
    fn scroll_offset(&self) -> f64;

    /// Inner height of the window
    fn viewport_height(&self) -> f64;

    /// Smoothly scroll `element` so its top aligns with the viewport top
    fn scroll_into_view(&self, element: &Self::Element);

    fn current_year(&self) -> i32;

    /// Styled developer console message
    fn console_styled(&self, message: &str, css: &str);

    /// Register a window scroll listener.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses the listener.
    fn on_scroll(&self, handler: WindowHandler) -> Result<()>;

    /// Register a listener for the window's full-load notification.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses the listener.
    fn on_load(&self, handler: WindowHandler) -> Result<()>;

    /// Register an element event listener.
    ///
    /// # Errors
    ///
    /// Returns an error if the host refuses the listener.
    fn on_element(
        &self,
        element: &Self::Element,
        event: ElementEvent,
        handler: ElementHandler,
    ) -> Result<()>;

    /// Observe `elements` with a single intersection observer.
    ///
    /// # Errors
    ///
    /// Returns an error if the observer cannot be created.
    fn observe_intersections(
        &self,
        elements: &[Self::Element],
        options: &ObserverOptions,
        handler: IntersectionHandler<Self::Element>,
    ) -> Result<()>;

    /// Run `callback` once after `delay_ms`.
    ///
    /// # Errors
    ///
    /// Returns an error if the host cannot schedule timers.
    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<TimerId>;

    /// Cancel a pending callback; unknown or fired ids are ignored
    fn clear_timeout(&self, id: TimerId);
}
