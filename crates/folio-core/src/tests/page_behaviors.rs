//! Behavioral tests for the typing effect, footer year, load marker and console

use crate::env::Environment;
use crate::typewriter::TypewriterState;

use super::{install, portfolio_page};

// ============================================================================
// TYPEWRITER BEHAVIORS
// ============================================================================

#[test]
fn given_installed_page_when_installed_then_subtitle_cleared_with_cursor() {
    let page = portfolio_page();
    let installed = install(&page);

    assert_eq!(page.env.text(&page.subtitle), "");
    assert_eq!(
        page.env.style(page.subtitle, "border-right").as_deref(),
        Some("2px solid var(--accent-yellow)")
    );
    assert_eq!(
        installed.typewriter().map(crate::TypewriterTask::text).as_deref(),
        Some("DevOps Engineer")
    );
}

#[test]
fn given_installed_page_when_400ms_past_start_then_five_characters_shown() {
    let page = portfolio_page();
    let _installed = install(&page);

    page.env.advance(1900);

    assert_eq!(page.env.text(&page.subtitle), "DevOp");
}

#[test]
fn given_installed_page_when_typing_completes_then_cursor_removed_500ms_later() {
    let page = portfolio_page();
    let installed = install(&page);
    // 15 characters: last at 1500 + 14 * 100 = 2900, hold from 3000
    page.env.advance(2900);
    assert_eq!(page.env.text(&page.subtitle), "DevOps Engineer");

    page.env.advance(599);
    assert_ne!(
        page.env.style(page.subtitle, "border-right").as_deref(),
        Some("none")
    );

    page.env.advance(1);
    assert_eq!(
        page.env.style(page.subtitle, "border-right").as_deref(),
        Some("none")
    );
    assert_eq!(
        installed.typewriter().map(crate::TypewriterTask::state),
        Some(TypewriterState::Done)
    );
}

#[test]
fn given_typing_in_progress_when_cancelled_then_text_frozen() {
    let page = portfolio_page();
    let installed = install(&page);

    page.env.advance(1700);
    if let Some(task) = installed.typewriter() {
        task.cancel();
    }
    page.env.advance(10_000);

    assert_eq!(page.env.text(&page.subtitle), "Dev");
}

#[test]
fn given_page_without_subtitle_when_installed_then_no_typewriter() {
    let page = portfolio_page();
    let config = crate::BehaviorConfig {
        selectors: crate::config::Selectors {
            subtitle: ".tagline".to_string(),
            ..crate::config::Selectors::default()
        },
        ..crate::BehaviorConfig::default()
    };
    let installed = super::install_with(&page, config);

    assert!(installed.typewriter().is_none());
    assert_eq!(page.env.text(&page.subtitle), "DevOps Engineer");
}

// ============================================================================
// FOOTER, LOAD AND CONSOLE BEHAVIORS
// ============================================================================

#[test]
fn given_footer_with_placeholder_when_installed_then_year_is_current() {
    let page = portfolio_page();
    page.env.set_year(2027);
    let _installed = install(&page);

    assert_eq!(
        page.env.text(&page.footer),
        "\u{a9} 2027 Alex Machulsky. All rights reserved."
    );
}

#[test]
fn given_installed_page_when_load_fires_then_body_marked_loaded() {
    let page = portfolio_page();
    let _installed = install(&page);
    let body = page.env.body_id();

    assert!(!page.env.has_class(body, "loaded"));
    page.env.fire_load();
    assert!(page.env.has_class(body, "loaded"));
}

#[test]
fn given_installed_page_when_installed_then_three_styled_console_lines() {
    let page = portfolio_page();
    let _installed = install(&page);

    let lines = page.env.console_lines();
    assert_eq!(lines.len(), 3);
    let (message, css) = lines.first().unwrap();
    assert_eq!(message, "\u{1f44b} Hello Developer!");
    assert_eq!(css, "color: #f4e04d; font-size: 20px; font-weight: bold;");
}
