//! Deterministic in-memory host
//!
//! [`FakeEnvironment`] models just enough of a page for the behaviors: a flat
//! list of elements matched by literal selector strings (plus `#id`), inline
//! styles, classes, geometry, a scroll offset, a virtual millisecond clock and
//! the registered listeners. Tests drive it explicitly: scroll, click, hover,
//! report intersections and advance time.

use std::cell::{Cell, RefCell};
use std::collections::{BTreeMap, HashMap};

use crate::env::{
    ElementEvent, ElementHandler, Environment, EventDisposition, IntersectionHandler,
    IntersectionSample, ObserverOptions, PointerPosition, Rect, TimerCallback, TimerId,
    WindowHandler,
};
use crate::error::{BehaviorError, Result};

/// Element handle in a [`FakeEnvironment`]
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct ElementId(usize);

#[derive(Debug, Default)]
struct FakeElement {
    selectors: Vec<String>,
    attributes: HashMap<String, String>,
    text: String,
    styles: BTreeMap<String, String>,
    classes: Vec<String>,
    offset_top: f64,
    rect: Rect,
}

impl FakeElement {
    fn matches(&self, selector: &str) -> bool {
        if self.selectors.iter().any(|s| s == selector) {
            return true;
        }
        selector
            .strip_prefix('#')
            .filter(|id| !id.is_empty())
            .is_some_and(|id| self.attributes.get("id").is_some_and(|own| own == id))
    }
}

struct Scheduled {
    id: TimerId,
    due: u64,
    callback: TimerCallback,
}

#[derive(Default)]
struct Clock {
    now: u64,
    next_id: u32,
    queue: Vec<Scheduled>,
}

struct Observer {
    elements: Vec<ElementId>,
    options: ObserverOptions,
    handler: IntersectionHandler<ElementId>,
}

type ElementHandlers = HashMap<(ElementId, ElementEvent), Vec<ElementHandler>>;

/// Scriptable [`Environment`] for tests
pub struct FakeEnvironment {
    elements: RefCell<Vec<FakeElement>>,
    body: ElementId,
    scroll_offset: Cell<f64>,
    viewport_height: Cell<f64>,
    year: Cell<i32>,
    refuse_listeners: Cell<bool>,
    scroll_handlers: RefCell<Vec<WindowHandler>>,
    load_handlers: RefCell<Vec<WindowHandler>>,
    element_handlers: RefCell<ElementHandlers>,
    observers: RefCell<Vec<Observer>>,
    clock: RefCell<Clock>,
    scroll_requests: RefCell<Vec<ElementId>>,
    console: RefCell<Vec<(String, String)>>,
}

impl Default for FakeEnvironment {
    fn default() -> Self {
        Self::new()
    }
}

impl std::fmt::Debug for FakeEnvironment {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("FakeEnvironment")
            .field("elements", &self.elements.borrow().len())
            .field("scroll_offset", &self.scroll_offset.get())
            .field("now", &self.clock.borrow().now)
            .finish_non_exhaustive()
    }
}

impl FakeEnvironment {
    /// Empty page with a body, a 900px viewport, scrolled to the top
    #[must_use]
    pub fn new() -> Self {
        let body = FakeElement {
            selectors: vec!["body".to_string()],
            ..FakeElement::default()
        };
        Self {
            elements: RefCell::new(vec![body]),
            body: ElementId(0),
            scroll_offset: Cell::new(0.0),
            viewport_height: Cell::new(900.0),
            year: Cell::new(2026),
            refuse_listeners: Cell::new(false),
            scroll_handlers: RefCell::new(Vec::new()),
            load_handlers: RefCell::new(Vec::new()),
            element_handlers: RefCell::new(HashMap::new()),
            observers: RefCell::new(Vec::new()),
            clock: RefCell::new(Clock::default()),
            scroll_requests: RefCell::new(Vec::new()),
            console: RefCell::new(Vec::new()),
        }
    }

    // ------------------------------------------------------------------
    // Page construction
    // ------------------------------------------------------------------

    /// Append an element matched by each of `selectors`
    pub fn add_element(&self, selectors: &[&str]) -> ElementId {
        let mut elements = self.elements.borrow_mut();
        let id = ElementId(elements.len());
        elements.push(FakeElement {
            selectors: selectors.iter().map(ToString::to_string).collect(),
            ..FakeElement::default()
        });
        id
    }

    pub fn set_attribute(&self, id: ElementId, name: &str, value: &str) {
        self.with_element(id, |el| {
            el.attributes.insert(name.to_string(), value.to_string());
        });
    }

    pub fn set_offset_top(&self, id: ElementId, top: f64) {
        self.with_element(id, |el| el.offset_top = top);
    }

    pub fn set_rect(&self, id: ElementId, rect: Rect) {
        self.with_element(id, |el| el.rect = rect);
    }

    pub fn set_viewport_height(&self, height: f64) {
        self.viewport_height.set(height);
    }

    pub fn set_year(&self, year: i32) {
        self.year.set(year);
    }

    /// Make every later listener, observer and timer registration fail
    pub fn refuse_listeners(&self) {
        self.refuse_listeners.set(true);
    }

    // ------------------------------------------------------------------
    // Driving events
    // ------------------------------------------------------------------

    /// Set the scroll offset and notify scroll listeners
    pub fn scroll_to(&self, offset: f64) {
        self.scroll_offset.set(offset);
        Self::dispatch_window(&self.scroll_handlers);
    }

    /// Notify load listeners
    pub fn fire_load(&self) {
        Self::dispatch_window(&self.load_handlers);
    }

    /// Click `id`. Returns `None` if no click listener is attached, otherwise
    /// whether any handler suppressed the default action.
    pub fn click(&self, id: ElementId) -> Option<EventDisposition> {
        self.dispatch_element(id, ElementEvent::Click, PointerPosition::default())
    }

    pub fn pointer(
        &self,
        id: ElementId,
        event: ElementEvent,
        position: PointerPosition,
    ) -> Option<EventDisposition> {
        self.dispatch_element(id, event, position)
    }

    /// Deliver an intersection report for `id` to every observer watching it
    pub fn report_intersection(&self, id: ElementId, sample: IntersectionSample) {
        let mut observers = std::mem::take(&mut *self.observers.borrow_mut());
        for observer in observers
            .iter_mut()
            .filter(|observer| observer.elements.contains(&id))
        {
            (observer.handler)(&id, sample);
        }
        let mut slot = self.observers.borrow_mut();
        observers.append(&mut slot);
        *slot = observers;
    }

    /// Move the virtual clock forward, running every timer that falls due,
    /// including timers scheduled by callbacks during the advance.
    pub fn advance(&self, ms: u64) {
        let target = self.clock.borrow().now.saturating_add(ms);
        loop {
            let next = {
                let mut clock = self.clock.borrow_mut();
                let due = clock
                    .queue
                    .iter()
                    .enumerate()
                    .filter(|(_, timer)| timer.due <= target)
                    .min_by_key(|(_, timer)| (timer.due, timer.id.0))
                    .map(|(index, _)| index);
                due.map(|index| {
                    let timer = clock.queue.swap_remove(index);
                    clock.now = timer.due;
                    timer
                })
            };
            match next {
                Some(timer) => (timer.callback)(),
                None => break,
            }
        }
        self.clock.borrow_mut().now = target;
    }

    // ------------------------------------------------------------------
    // Inspection
    // ------------------------------------------------------------------

    #[must_use]
    pub fn now(&self) -> u64 {
        self.clock.borrow().now
    }

    #[must_use]
    pub fn pending_timers(&self) -> usize {
        self.clock.borrow().queue.len()
    }

    #[must_use]
    pub fn style(&self, id: ElementId, property: &str) -> Option<String> {
        self.elements
            .borrow()
            .get(id.0)
            .and_then(|el| el.styles.get(property).cloned())
    }

    #[must_use]
    pub fn has_class(&self, id: ElementId, class: &str) -> bool {
        self.elements
            .borrow()
            .get(id.0)
            .is_some_and(|el| el.classes.iter().any(|c| c == class))
    }

    #[must_use]
    pub fn body_id(&self) -> ElementId {
        self.body
    }

    /// Elements passed to `scroll_into_view`, in call order
    #[must_use]
    pub fn scroll_requests(&self) -> Vec<ElementId> {
        self.scroll_requests.borrow().clone()
    }

    /// `(message, css)` pairs written to the console
    #[must_use]
    pub fn console_lines(&self) -> Vec<(String, String)> {
        self.console.borrow().clone()
    }

    #[must_use]
    pub fn scroll_listener_count(&self) -> usize {
        self.scroll_handlers.borrow().len()
    }

    #[must_use]
    pub fn listener_count(&self, id: ElementId, event: ElementEvent) -> usize {
        self.element_handlers
            .borrow()
            .get(&(id, event))
            .map_or(0, Vec::len)
    }

    /// Options of every observer created so far
    #[must_use]
    pub fn observer_options(&self) -> Vec<ObserverOptions> {
        self.observers
            .borrow()
            .iter()
            .map(|observer| observer.options.clone())
            .collect()
    }

    #[must_use]
    pub fn is_observed(&self, id: ElementId) -> bool {
        self.observers
            .borrow()
            .iter()
            .any(|observer| observer.elements.contains(&id))
    }

    // ------------------------------------------------------------------
    // Internals
    // ------------------------------------------------------------------

    fn with_element<F: FnOnce(&mut FakeElement)>(&self, id: ElementId, f: F) {
        if let Some(el) = self.elements.borrow_mut().get_mut(id.0) {
            f(el);
        }
    }

    fn refusal(&self, event: &str) -> Result<()> {
        if self.refuse_listeners.get() {
            Err(BehaviorError::listener_failed(event, "listener refused by host"))
        } else {
            Ok(())
        }
    }

    fn dispatch_window(handlers: &RefCell<Vec<WindowHandler>>) {
        let mut taken = std::mem::take(&mut *handlers.borrow_mut());
        for handler in &mut taken {
            handler();
        }
        let mut slot = handlers.borrow_mut();
        taken.append(&mut slot);
        *slot = taken;
    }

    fn dispatch_element(
        &self,
        id: ElementId,
        event: ElementEvent,
        position: PointerPosition,
    ) -> Option<EventDisposition> {
        let mut taken = self.element_handlers.borrow_mut().remove(&(id, event))?;
        let prevented = taken
            .iter_mut()
            .map(|handler| handler(position))
            .fold(false, |prevented, disposition| {
                prevented || disposition == EventDisposition::PreventDefault
            });

        let mut handlers = self.element_handlers.borrow_mut();
        let slot = handlers.entry((id, event)).or_default();
        taken.append(slot);
        *slot = taken;

        Some(if prevented {
            EventDisposition::PreventDefault
        } else {
            EventDisposition::Continue
        })
    }
}

impl Environment for FakeEnvironment {
    type Element = ElementId;

    fn query(&self, selector: &str) -> Option<ElementId> {
        self.elements
            .borrow()
            .iter()
            .position(|el| el.matches(selector))
            .map(ElementId)
    }

    fn query_all(&self, selector: &str) -> Vec<ElementId> {
        self.elements
            .borrow()
            .iter()
            .enumerate()
            .filter(|(_, el)| el.matches(selector))
            .map(|(index, _)| ElementId(index))
            .collect()
    }

    fn body(&self) -> Option<ElementId> {
        Some(self.body)
    }

    fn attribute(&self, element: &ElementId, name: &str) -> Option<String> {
        self.elements
            .borrow()
            .get(element.0)
            .and_then(|el| el.attributes.get(name).cloned())
    }

    fn text(&self, element: &ElementId) -> String {
        self.elements
            .borrow()
            .get(element.0)
            .map(|el| el.text.clone())
            .unwrap_or_default()
    }

    fn set_text(&self, element: &ElementId, text: &str) {
        self.with_element(*element, |el| el.text = text.to_string());
    }

    fn set_style(&self, element: &ElementId, property: &str, value: &str) {
        self.with_element(*element, |el| {
            el.styles.insert(property.to_string(), value.to_string());
        });
    }

    fn add_class(&self, element: &ElementId, class: &str) {
        self.with_element(*element, |el| {
            if !el.classes.iter().any(|c| c == class) {
                el.classes.push(class.to_string());
            }
        });
    }

    fn remove_class(&self, element: &ElementId, class: &str) {
        self.with_element(*element, |el| el.classes.retain(|c| c != class));
    }

    fn offset_top(&self, element: &ElementId) -> f64 {
        self.elements
            .borrow()
            .get(element.0)
            .map_or(0.0, |el| el.offset_top)
    }

    fn bounding_rect(&self, element: &ElementId) -> Rect {
        self.elements
            .borrow()
            .get(element.0)
            .map(|el| el.rect)
            .unwrap_or_default()
    }

    fn scroll_offset(&self) -> f64 {
        self.scroll_offset.get()
    }

    fn viewport_height(&self) -> f64 {
        self.viewport_height.get()
    }

    fn scroll_into_view(&self, element: &ElementId) {
        self.scroll_requests.borrow_mut().push(*element);
    }

    fn current_year(&self) -> i32 {
        self.year.get()
    }

    fn console_styled(&self, message: &str, css: &str) {
        self.console
            .borrow_mut()
            .push((message.to_string(), css.to_string()));
    }

    fn on_scroll(&self, handler: WindowHandler) -> Result<()> {
        self.refusal("scroll")?;
        self.scroll_handlers.borrow_mut().push(handler);
        Ok(())
    }

    fn on_load(&self, handler: WindowHandler) -> Result<()> {
        self.refusal("load")?;
        self.load_handlers.borrow_mut().push(handler);
        Ok(())
    }

    fn on_element(
        &self,
        element: &ElementId,
        event: ElementEvent,
        handler: ElementHandler,
    ) -> Result<()> {
        self.refusal(event.dom_name())?;
        self.element_handlers
            .borrow_mut()
            .entry((*element, event))
            .or_default()
            .push(handler);
        Ok(())
    }

    fn observe_intersections(
        &self,
        elements: &[ElementId],
        options: &ObserverOptions,
        handler: IntersectionHandler<ElementId>,
    ) -> Result<()> {
        if self.refuse_listeners.get() {
            return Err(BehaviorError::ObserverFailed(
                "observer refused by host".to_string(),
            ));
        }
        self.observers.borrow_mut().push(Observer {
            elements: elements.to_vec(),
            options: options.clone(),
            handler,
        });
        Ok(())
    }

    fn set_timeout(&self, delay_ms: u32, callback: TimerCallback) -> Result<TimerId> {
        if self.refuse_listeners.get() {
            return Err(BehaviorError::SchedulerFailed(
                "timer refused by host".to_string(),
            ));
        }
        let mut clock = self.clock.borrow_mut();
        let id = TimerId(clock.next_id);
        clock.next_id = clock.next_id.wrapping_add(1);
        let due = clock.now.saturating_add(u64::from(delay_ms));
        clock.queue.push(Scheduled { id, due, callback });
        Ok(id)
    }

    fn clear_timeout(&self, id: TimerId) {
        self.clock.borrow_mut().queue.retain(|timer| timer.id != id);
    }
}
