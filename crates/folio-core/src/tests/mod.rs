//! Behavioral tests for the installed registry
//!
//! Given-when-then style tests that build a portfolio page in the fake host,
//! install the registry and drive scroll, pointer, intersection and clock
//! events through it.

#![allow(clippy::unwrap_used)]
#![allow(clippy::expect_used)]

pub mod page_behaviors;
pub mod registry_behaviors;

use std::rc::Rc;

use crate::env::{Environment, Rect};
use crate::fake::{ElementId, FakeEnvironment};
use crate::{BehaviorConfig, InstalledBehaviors, PageBehaviors};

/// Handles to the interesting elements of [`portfolio_page`]
pub struct Page {
    pub env: Rc<FakeEnvironment>,
    pub navbar: ElementId,
    pub nav_links: Vec<ElementId>,
    pub sections: Vec<ElementId>,
    pub hero: ElementId,
    pub subtitle: ElementId,
    pub skill_cards: Vec<ElementId>,
    pub project_cards: Vec<ElementId>,
    pub badges: Vec<ElementId>,
    pub footer: ElementId,
}

/// A page shaped like the portfolio markup: navbar with fragment links,
/// four sections, a hero, cards, badges and a footer.
pub fn portfolio_page() -> Page {
    let env = Rc::new(FakeEnvironment::new());
    env.set_viewport_height(900.0);

    let navbar = env.add_element(&[".navbar"]);
    let section_layout = [("home", 0.0), ("about", 800.0), ("projects", 1600.0), ("contact", 2600.0)];

    let nav_links = section_layout
        .iter()
        .map(|(id, _)| {
            let link = env.add_element(&[".nav-link", "a[href^=\"#\"]"]);
            env.set_attribute(link, "href", &format!("#{id}"));
            link
        })
        .collect();

    let hero = env.add_element(&[".hero-content"]);
    let subtitle = env.add_element(&[".hero-subtitle"]);
    env.set_text(&subtitle, "DevOps Engineer");

    let sections = section_layout
        .iter()
        .map(|(id, top)| {
            let section = env.add_element(&["section[id]"]);
            env.set_attribute(section, "id", id);
            env.set_offset_top(section, *top);
            section
        })
        .collect();

    let skill_cards = (0..3).map(|_| env.add_element(&[".skill-card"])).collect();
    let badges = (0..2).map(|_| env.add_element(&[".badge"])).collect();
    let project_cards = (0..2)
        .map(|i| {
            let card = env.add_element(&[".project-card"]);
            let top = 1700.0 + f64::from(i) * 450.0;
            env.set_rect(card, Rect::new(100.0, top, 400.0, 300.0));
            card
        })
        .collect();

    let footer = env.add_element(&[".footer p"]);
    env.set_text(&footer, "\u{a9} 2025 Alex Machulsky. All rights reserved.");

    Page {
        env,
        navbar,
        nav_links,
        sections,
        hero,
        subtitle,
        skill_cards,
        project_cards,
        badges,
        footer,
    }
}

/// Install the default registry on `page`
pub fn install(page: &Page) -> InstalledBehaviors<FakeEnvironment> {
    install_with(page, BehaviorConfig::default())
}

pub fn install_with(page: &Page, config: BehaviorConfig) -> InstalledBehaviors<FakeEnvironment> {
    PageBehaviors::new(Rc::clone(&page.env), config)
        .and_then(PageBehaviors::install)
        .expect("install should succeed")
}
