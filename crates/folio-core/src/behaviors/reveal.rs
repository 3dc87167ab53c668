//! Reveal-on-scroll animation for skill and project cards.
//!
//! Cards start hidden and shifted down; an intersection observer fades them
//! in once enough of the card is on screen. Cards are never unobserved, so a
//! repeated report just re-applies the revealed style.

use std::rc::Rc;

use crate::behaviors::Outcome;
use crate::config::{BehaviorConfig, RevealConfig};
use crate::env::{Environment, IntersectionSample, ObserverOptions};
use crate::error::Result;

/// Hide every reveal target and observe it.
///
/// # Errors
///
/// Returns an error if the intersection observer cannot be created.
pub fn install_reveal<E: Environment>(env: &Rc<E>, config: &BehaviorConfig) -> Result<Outcome> {
    let targets: Vec<E::Element> = config
        .selectors
        .reveal_targets
        .iter()
        .flat_map(|selector| env.query_all(selector))
        .collect();

    if targets.is_empty() {
        return Ok(Outcome::skipped("no reveal targets on page"));
    }

    let reveal = config.reveal.clone();
    for target in &targets {
        hide(env.as_ref(), target, &reveal);
    }

    let options = ObserverOptions {
        threshold: reveal.threshold,
        root_margin: reveal.root_margin.clone(),
    };
    let env_ref = Rc::clone(env);
    env.observe_intersections(
        &targets,
        &options,
        Box::new(move |element, sample| {
            if should_reveal(sample, reveal.threshold) {
                show(env_ref.as_ref(), element, &reveal);
            }
        }),
    )?;

    Ok(Outcome::installed(targets.len()))
}

/// Whether an intersection report is enough to reveal the element
#[must_use]
pub fn should_reveal(sample: IntersectionSample, threshold: f64) -> bool {
    sample.is_intersecting && sample.ratio >= threshold
}

fn hide<E: Environment>(env: &E, element: &E::Element, config: &RevealConfig) {
    env.set_style(element, "opacity", "0");
    env.set_style(element, "transform", &config.hidden_transform);
    env.set_style(element, "transition", &config.transition);
}

fn show<E: Environment>(env: &E, element: &E::Element, config: &RevealConfig) {
    env.set_style(element, "opacity", "1");
    env.set_style(element, "transform", &config.revealed_transform);
}
