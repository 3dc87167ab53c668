//! Pointer micro-interactions: badge hover and project card tilt.

use std::rc::Rc;

use crate::behaviors::Outcome;
use crate::config::{BehaviorConfig, TiltConfig};
use crate::env::{ElementEvent, Environment, EventDisposition, PointerPosition};
use crate::error::Result;
use crate::style::{tilt_rest_transform, tilt_transform};

/// Scale and tint badges under the pointer.
///
/// # Errors
///
/// Returns an error if a pointer listener cannot be attached.
pub fn install_badge_hover<E: Environment>(
    env: &Rc<E>,
    config: &BehaviorConfig,
) -> Result<Outcome> {
    let badges = env.query_all(&config.selectors.badges);

    for badge in &badges {
        let style = config.badge.clone();
        let (env_ref, target) = (Rc::clone(env), badge.clone());
        env.on_element(
            badge,
            ElementEvent::PointerEnter,
            Box::new(move |_| {
                env_ref.set_style(&target, "transform", &style.hover_transform);
                env_ref.set_style(&target, "background-color", &style.hover_background);
                EventDisposition::Continue
            }),
        )?;

        let style = config.badge.clone();
        let (env_ref, target) = (Rc::clone(env), badge.clone());
        env.on_element(
            badge,
            ElementEvent::PointerLeave,
            Box::new(move |_| {
                env_ref.set_style(&target, "transform", &style.rest_transform);
                env_ref.set_style(&target, "background-color", &style.rest_background);
                EventDisposition::Continue
            }),
        )?;
    }

    Ok(Outcome::installed(badges.len()))
}

/// Tilt project cards toward the pointer.
///
/// # Errors
///
/// Returns an error if a pointer listener cannot be attached.
pub fn install_card_tilt<E: Environment>(env: &Rc<E>, config: &BehaviorConfig) -> Result<Outcome> {
    let cards = env.query_all(&config.selectors.tilt_cards);
    let tilt = config.tilt;
    let rest = tilt_rest_transform(&tilt);

    for card in &cards {
        let (env_ref, target) = (Rc::clone(env), card.clone());
        env.on_element(
            card,
            ElementEvent::PointerMove,
            Box::new(move |pointer| {
                apply_tilt(env_ref.as_ref(), &target, pointer, &tilt);
                EventDisposition::Continue
            }),
        )?;

        let (env_ref, target, rest) = (Rc::clone(env), card.clone(), rest.clone());
        env.on_element(
            card,
            ElementEvent::PointerLeave,
            Box::new(move |_| {
                env_ref.set_style(&target, "transform", &rest);
                EventDisposition::Continue
            }),
        )?;
    }

    Ok(Outcome::installed(cards.len()))
}

/// Tilt `card` for a pointer at `pointer`, measured against its current
/// bounding rectangle.
pub fn apply_tilt<E: Environment>(
    env: &E,
    card: &E::Element,
    pointer: PointerPosition,
    config: &TiltConfig,
) {
    let rect = env.bounding_rect(card);
    env.set_style(card, "transform", &tilt_transform(pointer, rect, config));
}
