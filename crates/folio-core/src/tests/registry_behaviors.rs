//! Behavioral tests for registry configuration, strictness and reporting

use std::rc::Rc;

use crate::behaviors::Outcome;
use crate::fake::FakeEnvironment;
use crate::{BehaviorConfig, BehaviorError, BehaviorKind, PageBehaviors, Strictness};

use super::{install, install_with, portfolio_page};

#[test]
fn given_full_page_when_installed_then_every_behavior_reports_installed() {
    let page = portfolio_page();
    let installed = install(&page);

    let report = installed.report();
    for kind in BehaviorKind::ALL {
        assert!(report.is_installed(kind), "{} should be installed", kind.name());
    }
    assert_eq!(report.skipped().count(), 0);
    assert_eq!(
        report.outcome(BehaviorKind::Reveal),
        Some(&Outcome::installed(5))
    );
}

#[test]
fn given_full_page_when_installed_then_report_lists_behaviors_in_install_order() {
    let page = portfolio_page();
    let installed = install(&page);

    let kinds: Vec<BehaviorKind> = installed
        .report()
        .entries()
        .iter()
        .map(|(kind, _)| *kind)
        .collect();

    assert_eq!(kinds, BehaviorKind::ALL.to_vec());
    assert!(Rc::ptr_eq(installed.env(), &page.env));
}

#[test]
fn given_full_page_when_installed_then_three_independent_scroll_listeners() {
    let page = portfolio_page();
    let _installed = install(&page);

    // navbar, active link, parallax
    assert_eq!(page.env.scroll_listener_count(), 3);
}

#[test]
fn given_behavior_disabled_when_installed_then_its_effect_is_absent() {
    let page = portfolio_page();
    let config = BehaviorConfig::default().with_only(&[BehaviorKind::ActiveLink]);
    let installed = install_with(&page, config);

    page.env.scroll_to(500.0);

    assert_eq!(
        installed.report().outcome(BehaviorKind::NavbarStyle),
        Some(&Outcome::Disabled)
    );
    assert_eq!(page.env.style(page.navbar, "background-color"), None);
    assert!(page.env.console_lines().is_empty());
    assert!(installed.typewriter().is_none());
}

#[test]
fn given_empty_page_when_installed_leniently_then_required_behaviors_skipped() {
    let env = Rc::new(FakeEnvironment::new());
    let installed = PageBehaviors::with_defaults(Rc::clone(&env))
        .install()
        .unwrap();

    let skipped: Vec<BehaviorKind> = installed.report().skipped().map(|(k, _)| k).collect();
    assert!(skipped.contains(&BehaviorKind::NavbarStyle));
    assert!(skipped.contains(&BehaviorKind::ActiveLink));
    assert!(skipped.contains(&BehaviorKind::Reveal));
    assert!(skipped.contains(&BehaviorKind::Typewriter));
    assert!(skipped.contains(&BehaviorKind::DynamicYear));

    // scrolling an empty page must be harmless
    env.scroll_to(400.0);
    env.fire_load();
    assert!(env.has_class(env.body_id(), "loaded"));
}

#[test]
fn given_missing_navbar_when_installed_strictly_then_fails_naming_selector() {
    let env = Rc::new(FakeEnvironment::new());
    let config = BehaviorConfig::default().with_strictness(Strictness::Strict);

    let result = PageBehaviors::new(env, config).and_then(PageBehaviors::install);

    assert_eq!(
        result.map(|_| ()),
        Err(BehaviorError::missing_element(".navbar"))
    );
}

#[test]
fn given_full_page_when_installed_strictly_then_succeeds() {
    let page = portfolio_page();
    let config = BehaviorConfig::default().with_strictness(Strictness::Strict);
    let installed = install_with(&page, config);

    assert_eq!(installed.report().installed().count(), BehaviorKind::ALL.len());
}

#[test]
fn given_host_refusing_listeners_when_installed_then_error_propagates() {
    let page = portfolio_page();
    page.env.refuse_listeners();

    let result = PageBehaviors::with_defaults(Rc::clone(&page.env)).install();

    assert!(matches!(
        result,
        Err(BehaviorError::ListenerFailed { ref event, .. }) if event == "click"
    ));
}

#[test]
fn given_invalid_config_when_registry_created_then_rejected() {
    let env = Rc::new(FakeEnvironment::new());
    let mut config = BehaviorConfig::default();
    config.parallax.fade_distance = 0.0;

    let result = PageBehaviors::new(env, config);

    assert!(matches!(result, Err(BehaviorError::InvalidConfig(_))));
}
