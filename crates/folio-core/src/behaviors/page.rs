//! Page-level one-shots: footer year, load marker and the console greeting.

use std::rc::Rc;

use crate::behaviors::Outcome;
use crate::config::BehaviorConfig;
use crate::env::Environment;
use crate::error::Result;
use crate::style::substitute_year;

/// Replace the placeholder year in the footer with the current one.
#[must_use]
pub fn install_dynamic_year<E: Environment>(env: &Rc<E>, config: &BehaviorConfig) -> Outcome {
    let Some(footer) = env.query(&config.selectors.footer) else {
        return Outcome::skipped("no footer paragraph");
    };

    if apply_current_year(env.as_ref(), &footer, &config.placeholder_year) {
        Outcome::installed(1)
    } else {
        Outcome::skipped(format!("footer has no '{}'", config.placeholder_year))
    }
}

/// Rewrite `footer`'s text with the current year. Returns whether it changed.
pub fn apply_current_year<E: Environment>(env: &E, footer: &E::Element, placeholder: &str) -> bool {
    let text = env.text(footer);
    match substitute_year(&text, placeholder, env.current_year()) {
        Some(updated) => {
            env.set_text(footer, &updated);
            true
        }
        None => false,
    }
}

/// Mark the body once every resource has loaded.
///
/// # Errors
///
/// Returns an error if the load listener cannot be attached.
pub fn install_load_marker<E: Environment>(env: &Rc<E>, config: &BehaviorConfig) -> Result<Outcome> {
    let env_ref = Rc::clone(env);
    let class = config.loaded_class.clone();
    env.on_load(Box::new(move || {
        if let Some(body) = env_ref.body() {
            env_ref.add_class(&body, &class);
        }
    }))?;

    Ok(Outcome::installed(1))
}

/// Print the styled greeting lines to the developer console.
#[must_use]
pub fn install_console_greeting<E: Environment>(env: &Rc<E>, config: &BehaviorConfig) -> Outcome {
    for line in &config.console {
        env.console_styled(&line.message, &line.css);
    }
    Outcome::installed(config.console.len())
}
