//! Hero section: subtitle typing effect and scroll parallax.

use std::rc::Rc;

use crate::behaviors::Outcome;
use crate::config::{BehaviorConfig, ParallaxConfig};
use crate::env::Environment;
use crate::error::Result;
use crate::style::parallax_frame;
use crate::typewriter::TypewriterTask;

/// Start typing the subtitle, if the page has one.
///
/// # Errors
///
/// Returns an error if the first typing step cannot be scheduled.
pub fn install_typewriter<E: Environment>(
    env: &Rc<E>,
    config: &BehaviorConfig,
) -> Result<(Outcome, Option<TypewriterTask<E>>)> {
    let Some(subtitle) = env.query(&config.selectors.subtitle) else {
        return Ok((Outcome::skipped("no subtitle"), None));
    };

    let text = env.text(&subtitle);
    let task = TypewriterTask::start(Rc::clone(env), subtitle, &text, config.typewriter.clone())?;

    Ok((Outcome::installed(1), Some(task)))
}

/// Shift and fade the hero content while the first screen is scrolled.
///
/// The hero is looked up on every scroll, so a page without one just gets a
/// listener that does nothing.
///
/// # Errors
///
/// Returns an error if the scroll listener cannot be attached.
pub fn install_parallax<E: Environment>(env: &Rc<E>, config: &BehaviorConfig) -> Result<Outcome> {
    let env_ref = Rc::clone(env);
    let selector = config.selectors.hero.clone();
    let parallax = config.parallax;
    env.on_scroll(Box::new(move || {
        apply_parallax(env_ref.as_ref(), &selector, &parallax);
    }))?;

    Ok(Outcome::installed(1))
}

/// Apply one parallax frame to the hero. Returns whether the hero changed.
pub fn apply_parallax<E: Environment>(env: &E, selector: &str, config: &ParallaxConfig) -> bool {
    let Some(hero) = env.query(selector) else {
        return false;
    };
    let Some(frame) = parallax_frame(env.scroll_offset(), env.viewport_height(), config) else {
        return false;
    };

    env.set_style(&hero, "transform", &frame.transform);
    env.set_style(&hero, "opacity", &frame.opacity);
    true
}
