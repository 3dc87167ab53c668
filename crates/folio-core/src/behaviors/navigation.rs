//! Navigation behaviors: smooth fragment scrolling, navbar styling and
//! active-link highlighting.

use std::rc::Rc;

use crate::behaviors::{Outcome, require_all, require_one};
use crate::config::{ActiveLinkConfig, BehaviorConfig, NavbarConfig};
use crate::env::{ElementEvent, Environment, EventDisposition};
use crate::error::Result;
use crate::style::{active_section, fragment_href, navbar_style};

/// Intercept clicks on in-page links and scroll their target into view.
///
/// # Errors
///
/// Returns an error if a click listener cannot be attached.
pub fn install_smooth_scroll<E: Environment>(
    env: &Rc<E>,
    config: &BehaviorConfig,
) -> Result<Outcome> {
    let links = env.query_all(&config.selectors.fragment_links);

    for link in &links {
        let env_ref = Rc::clone(env);
        let target_link = link.clone();
        env.on_element(
            link,
            ElementEvent::Click,
            Box::new(move |_| {
                scroll_to_fragment(env_ref.as_ref(), &target_link);
                EventDisposition::PreventDefault
            }),
        )?;
    }

    Ok(Outcome::installed(links.len()))
}

/// Scroll to the element named by `link`'s `href` fragment.
///
/// Returns `false` when the link has no usable fragment or nothing matches it.
pub fn scroll_to_fragment<E: Environment>(env: &E, link: &E::Element) -> bool {
    let Some(href) = env.attribute(link, "href") else {
        return false;
    };
    if href.len() < 2 || !href.starts_with('#') {
        return false;
    }

    match env.query(&href) {
        Some(target) => {
            env.scroll_into_view(&target);
            true
        }
        None => {
            tracing::debug!(href, "fragment target not found");
            false
        }
    }
}

/// Restyle the navbar on every scroll.
///
/// # Errors
///
/// Returns an error if the navbar is missing in strict mode or the scroll
/// listener cannot be attached.
pub fn install_navbar_style<E: Environment>(
    env: &Rc<E>,
    config: &BehaviorConfig,
) -> Result<Outcome> {
    let Some(navbar) = require_one(env.as_ref(), &config.selectors.navbar, config.strictness)?
    else {
        return Ok(Outcome::skipped(format!(
            "{} not found",
            config.selectors.navbar
        )));
    };

    let env_ref = Rc::clone(env);
    let navbar_config = config.navbar.clone();
    env.on_scroll(Box::new(move || {
        apply_navbar_style(env_ref.as_ref(), &navbar, &navbar_config);
    }))?;

    Ok(Outcome::installed(1))
}

/// Apply the scrolled or resting navbar style for the current offset
pub fn apply_navbar_style<E: Environment>(env: &E, navbar: &E::Element, config: &NavbarConfig) {
    let style = navbar_style(env.scroll_offset(), config);
    env.set_style(navbar, "background-color", &style.background);
    env.set_style(navbar, "box-shadow", &style.shadow);
}

/// Keep the nav link of the current section marked active.
///
/// # Errors
///
/// Returns an error if sections or nav links are missing in strict mode or
/// the scroll listener cannot be attached.
pub fn install_active_link<E: Environment>(
    env: &Rc<E>,
    config: &BehaviorConfig,
) -> Result<Outcome> {
    let selectors = &config.selectors;
    let sections = require_all(env.as_ref(), &selectors.sections, config.strictness)?;
    let links = require_all(env.as_ref(), &selectors.nav_links, config.strictness)?;

    if sections.is_empty() || links.is_empty() {
        return Ok(Outcome::skipped(format!(
            "{} or {} not found",
            selectors.sections, selectors.nav_links
        )));
    }

    let targets = links.len();
    let env_ref = Rc::clone(env);
    let link_config = config.active_link.clone();
    env.on_scroll(Box::new(move || {
        highlight_active_link(env_ref.as_ref(), &sections, &links, &link_config);
    }))?;

    Ok(Outcome::installed(targets))
}

/// Mark exactly the links pointing at the current section.
///
/// Returns the active section id, if any section has been reached.
pub fn highlight_active_link<E: Environment>(
    env: &E,
    sections: &[E::Element],
    links: &[E::Element],
    config: &ActiveLinkConfig,
) -> Option<String> {
    let tops: Vec<(String, f64)> = sections
        .iter()
        .filter_map(|section| {
            env.attribute(section, "id")
                .map(|id| (id, env.offset_top(section)))
        })
        .collect();

    let current = active_section(
        env.scroll_offset(),
        tops.iter().map(|(id, top)| (id.as_str(), *top)),
        config.section_offset,
    )
    .map(ToString::to_string);

    let active_href = current.as_deref().map(fragment_href);
    for link in links {
        env.remove_class(link, &config.active_class);
        if active_href.is_some() && env.attribute(link, "href") == active_href {
            env.add_class(link, &config.active_class);
        }
    }

    current
}
