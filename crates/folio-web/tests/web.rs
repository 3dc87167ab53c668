//! Browser tests for the live-document host
//!
//! Run with `wasm-pack test --headless --firefox crates/folio-web`.

#![cfg(target_arch = "wasm32")]
#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

use std::cell::Cell;
use std::rc::Rc;

use folio_core::env::{ElementEvent, Environment, EventDisposition};
use folio_core::{BehaviorConfig, BehaviorKind, PageBehaviors};
use folio_web::WebEnvironment;
use gloo_timers::future::TimeoutFuture;
use wasm_bindgen::JsCast;
use wasm_bindgen_test::{wasm_bindgen_test, wasm_bindgen_test_configure};
use web_sys::{Element, Event, EventInit, HtmlElement};

wasm_bindgen_test_configure!(run_in_browser);

fn mount(env: &WebEnvironment, tag: &str, class: &str, text: &str) -> Element {
    let document = env.document();
    let element = document.create_element(tag).unwrap();
    element.set_class_name(class);
    element.set_text_content(Some(text));
    document.body().unwrap().append_child(&element).unwrap();
    element
}

#[wasm_bindgen_test]
fn styles_and_classes_reach_the_dom() {
    let env = WebEnvironment::new().unwrap();
    let badge = mount(&env, "span", "badge test-styles", "Rust");

    env.set_style(&badge, "transform", "scale(1.1) rotate(2deg)");
    env.add_class(&badge, "active");

    let html = badge.dyn_ref::<HtmlElement>().unwrap();
    assert_eq!(
        html.style().get_property_value("transform").unwrap(),
        "scale(1.1) rotate(2deg)"
    );
    assert!(badge.class_list().contains("active"));

    env.remove_class(&badge, "active");
    assert!(!badge.class_list().contains("active"));
    badge.remove();
}

#[wasm_bindgen_test]
fn query_all_returns_document_order() {
    let env = WebEnvironment::new().unwrap();
    let first = mount(&env, "div", "ordered", "one");
    let second = mount(&env, "div", "ordered", "two");

    let found = env.query_all(".ordered");
    let texts: Vec<String> = found.iter().map(|el| env.text(el)).collect();
    assert_eq!(texts, vec!["one".to_string(), "two".to_string()]);

    assert!(env.query("###").is_none());
    first.remove();
    second.remove();
}

#[wasm_bindgen_test]
async fn cleared_timeout_never_fires() {
    let env = WebEnvironment::new().unwrap();
    let cleared = Rc::new(Cell::new(false));
    let kept = Rc::new(Cell::new(false));

    let flag = Rc::clone(&cleared);
    let id = env.set_timeout(0, Box::new(move || flag.set(true))).unwrap();
    let flag = Rc::clone(&kept);
    env.set_timeout(0, Box::new(move || flag.set(true))).unwrap();
    env.clear_timeout(id);

    TimeoutFuture::new(50).await;

    assert!(!cleared.get());
    assert!(kept.get());
}

fn dispatch_click(target: &Element) -> Event {
    let init = EventInit::new();
    init.set_bubbles(true);
    init.set_cancelable(true);
    let event = Event::new_with_event_init_dict("click", &init).unwrap();
    target.dispatch_event(&event).unwrap();
    event
}

#[wasm_bindgen_test]
fn prevent_default_disposition_cancels_the_dom_event() {
    let env = WebEnvironment::new().unwrap();
    let link = mount(&env, "a", "test-prevented", "About");
    link.set_attribute("href", "#about").unwrap();

    env.on_element(
        &link,
        ElementEvent::Click,
        Box::new(|_| EventDisposition::PreventDefault),
    )
    .unwrap();

    assert!(dispatch_click(&link).default_prevented());
    link.remove();
}

#[wasm_bindgen_test]
fn continue_disposition_leaves_the_dom_event_alone() {
    let env = WebEnvironment::new().unwrap();
    let link = mount(&env, "a", "test-continued", "About");
    let clicks = Rc::new(Cell::new(0_u32));
    let counter = Rc::clone(&clicks);

    env.on_element(
        &link,
        ElementEvent::Click,
        Box::new(move |_| {
            counter.set(counter.get() + 1);
            EventDisposition::Continue
        }),
    )
    .unwrap();

    assert!(!dispatch_click(&link).default_prevented());
    assert_eq!(clicks.get(), 1);
    link.remove();
}

#[wasm_bindgen_test]
fn viewport_height_matches_the_window() {
    let env = WebEnvironment::new().unwrap();
    let inner = env.window().inner_height().unwrap().as_f64().unwrap();

    assert!((env.viewport_height() - inner).abs() < f64::EPSILON);
}

#[wasm_bindgen_test]
fn footer_year_is_rewritten_on_install() {
    let env = Rc::new(WebEnvironment::new().unwrap());
    let footer = mount(&env, "p", "folio-footer", "\u{a9} 2025 Alex Machulsky");

    let mut config = BehaviorConfig::default().with_only(&[BehaviorKind::DynamicYear]);
    config.selectors.footer = ".folio-footer".to_string();
    let installed = PageBehaviors::new(Rc::clone(&env), config)
        .and_then(PageBehaviors::install)
        .unwrap();

    assert!(installed.report().is_installed(BehaviorKind::DynamicYear));
    let year = env.current_year().to_string();
    assert_eq!(env.text(&footer), format!("\u{a9} {year} Alex Machulsky"));
    footer.remove();
}
