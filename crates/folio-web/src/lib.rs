//! WASM entry point for the folio page behaviors
//!
//! Loading the module installs every behavior on the live document. The
//! registry runs once the document is interactive: immediately if the module
//! boots after `DOMContentLoaded`, otherwise from that event.
//!
//! ## Page hooks
//! - `<script type="application/json" id="folio-config">` holds an optional
//!   JSON override of the behavior configuration
//! - `<body data-folio-log="...">` sets the console log filter
//!
//! `cancelTypewriter()` and `restartTypewriter()` are exported for page
//! scripts.

#![forbid(unsafe_code)]

pub mod dom;
pub mod logging;

use std::cell::RefCell;
use std::rc::Rc;

use folio_core::{BehaviorConfig, BehaviorError, InstalledBehaviors, PageBehaviors, Result};
use wasm_bindgen::JsCast;
use wasm_bindgen::prelude::*;

pub use dom::WebEnvironment;

/// Id of the inline JSON configuration element
pub const CONFIG_ELEMENT_ID: &str = "folio-config";

/// Body attribute carrying the log filter
pub const LOG_ATTRIBUTE: &str = "data-folio-log";

thread_local! {
    static INSTALLED: RefCell<Option<InstalledBehaviors<WebEnvironment>>> =
        const { RefCell::new(None) };
}

/// Module start: panic hook, logging, then install.
#[wasm_bindgen(start)]
pub fn start() {
    console_error_panic_hook::set_once();

    let env = match WebEnvironment::new() {
        Ok(env) => env,
        Err(e) => {
            web_sys::console::error_1(&format!("folio: {e}").into());
            return;
        }
    };

    let directive = env
        .document()
        .body()
        .and_then(|body| body.get_attribute(LOG_ATTRIBUTE))
        .unwrap_or_else(|| logging::DEFAULT_FILTER.to_string());
    logging::init(&directive);

    if let Err(e) = boot(env) {
        tracing::error!("page behaviors not installed: {e}");
    }
}

/// Install now, or defer to `DOMContentLoaded` while the document is loading.
fn boot(env: WebEnvironment) -> Result<()> {
    if env.document().ready_state() != "loading" {
        return install(env);
    }

    let document = env.document().clone();
    let on_ready = Closure::once(move || {
        if let Err(e) = install(env) {
            tracing::error!("page behaviors not installed: {e}");
        }
    });
    document
        .add_event_listener_with_callback("DOMContentLoaded", on_ready.as_ref().unchecked_ref())
        .map_err(|e| BehaviorError::listener_failed("DOMContentLoaded", format!("{e:?}")))?;

    // Keep closure alive
    on_ready.forget();
    Ok(())
}

fn install(env: WebEnvironment) -> Result<()> {
    let config = load_config(&env);
    let installed = PageBehaviors::new(Rc::new(env), config)?.install()?;

    for (kind, reason) in installed.report().skipped() {
        tracing::info!(behavior = kind.name(), reason, "behavior skipped");
    }

    INSTALLED.with(|slot| *slot.borrow_mut() = Some(installed));
    Ok(())
}

/// Read the inline JSON override; fall back to defaults when absent or invalid.
fn load_config(env: &WebEnvironment) -> BehaviorConfig {
    let Some(text) = env
        .document()
        .get_element_by_id(CONFIG_ELEMENT_ID)
        .and_then(|element| element.text_content())
    else {
        return BehaviorConfig::default();
    };

    BehaviorConfig::from_json(&text).unwrap_or_else(|e| {
        tracing::warn!("ignoring #{CONFIG_ELEMENT_ID}: {e}");
        BehaviorConfig::default()
    })
}

/// Stop the subtitle typing effect, leaving the text typed so far.
#[wasm_bindgen(js_name = cancelTypewriter)]
pub fn cancel_typewriter() {
    INSTALLED.with(|slot| {
        if let Some(task) = slot.borrow().as_ref().and_then(InstalledBehaviors::typewriter) {
            task.cancel();
        }
    });
}

/// Type the subtitle again from the beginning.
///
/// # Errors
///
/// Returns the scheduling error as a JS string.
#[wasm_bindgen(js_name = restartTypewriter)]
pub fn restart_typewriter() -> std::result::Result<(), JsValue> {
    let task = INSTALLED.with(|slot| {
        slot.borrow()
            .as_ref()
            .and_then(InstalledBehaviors::typewriter)
            .cloned()
    });

    match task {
        Some(task) => task.restart().map_err(|e| JsValue::from_str(&e.to_string())),
        None => Ok(()),
    }
}
