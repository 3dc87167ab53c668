//! Page Behavior Registry
//!
//! Installs every enabled behavior against one shared environment. Behaviors
//! are independent; the registry only decides which run, applies the
//! configured strictness and collects an [`InstallReport`].

use std::rc::Rc;

use crate::behaviors::{Outcome, hero, hover, navigation, page, reveal};
use crate::config::{BehaviorConfig, BehaviorKind};
use crate::env::Environment;
use crate::error::Result;
use crate::typewriter::TypewriterTask;

/// Per-behavior installation outcomes, in installation order
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct InstallReport {
    entries: Vec<(BehaviorKind, Outcome)>,
}

impl InstallReport {
    fn record(&mut self, kind: BehaviorKind, outcome: Outcome) {
        self.entries.push((kind, outcome));
    }

    /// Outcome recorded for `kind`
    #[must_use]
    pub fn outcome(&self, kind: BehaviorKind) -> Option<&Outcome> {
        self.entries
            .iter()
            .find(|(k, _)| *k == kind)
            .map(|(_, outcome)| outcome)
    }

    #[must_use]
    pub fn is_installed(&self, kind: BehaviorKind) -> bool {
        self.outcome(kind).is_some_and(Outcome::is_installed)
    }

    /// Behaviors that attached at least one listener or mutation
    pub fn installed(&self) -> impl Iterator<Item = BehaviorKind> + '_ {
        self.entries
            .iter()
            .filter(|(_, outcome)| outcome.is_installed())
            .map(|(kind, _)| *kind)
    }

    /// Behaviors skipped because their markup was missing
    pub fn skipped(&self) -> impl Iterator<Item = (BehaviorKind, &str)> + '_ {
        self.entries.iter().filter_map(|(kind, outcome)| match outcome {
            Outcome::Skipped { reason } => Some((*kind, reason.as_str())),
            Outcome::Installed { .. } | Outcome::Disabled => None,
        })
    }

    pub fn entries(&self) -> &[(BehaviorKind, Outcome)] {
        &self.entries
    }
}

/// Registry bound to an environment and a validated configuration
pub struct PageBehaviors<E: Environment> {
    env: Rc<E>,
    config: BehaviorConfig,
}

impl<E: Environment> PageBehaviors<E> {
    /// Create a registry.
    ///
    /// # Errors
    ///
    /// Returns [`crate::BehaviorError::InvalidConfig`] if `config` fails validation.
    pub fn new(env: Rc<E>, config: BehaviorConfig) -> Result<Self> {
        config.validate()?;
        Ok(Self { env, config })
    }

    /// Registry with the default configuration
    pub fn with_defaults(env: Rc<E>) -> Self {
        Self {
            env,
            config: BehaviorConfig::default(),
        }
    }

    #[must_use]
    pub const fn config(&self) -> &BehaviorConfig {
        &self.config
    }

    /// Wire every enabled behavior.
    ///
    /// # Errors
    ///
    /// Returns the first error raised by a behavior: a host registration
    /// failure, or a missing required element in strict mode.
    pub fn install(self) -> Result<InstalledBehaviors<E>> {
        let Self { env, config } = self;
        let mut report = InstallReport::default();
        let mut typewriter = None;

        for kind in BehaviorKind::ALL {
            let outcome = if config.is_enabled(kind) {
                match kind {
                    BehaviorKind::SmoothScroll => navigation::install_smooth_scroll(&env, &config)?,
                    BehaviorKind::NavbarStyle => navigation::install_navbar_style(&env, &config)?,
                    BehaviorKind::ActiveLink => navigation::install_active_link(&env, &config)?,
                    BehaviorKind::Reveal => reveal::install_reveal(&env, &config)?,
                    BehaviorKind::Typewriter => {
                        let (outcome, task) = hero::install_typewriter(&env, &config)?;
                        typewriter = task;
                        outcome
                    }
                    BehaviorKind::Parallax => hero::install_parallax(&env, &config)?,
                    BehaviorKind::DynamicYear => page::install_dynamic_year(&env, &config),
                    BehaviorKind::LoadMarker => page::install_load_marker(&env, &config)?,
                    BehaviorKind::BadgeHover => hover::install_badge_hover(&env, &config)?,
                    BehaviorKind::CardTilt => hover::install_card_tilt(&env, &config)?,
                    BehaviorKind::ConsoleGreeting => page::install_console_greeting(&env, &config),
                }
            } else {
                Outcome::Disabled
            };

            tracing::debug!(behavior = kind.name(), ?outcome, "behavior wired");
            report.record(kind, outcome);
        }

        tracing::info!(
            installed = report.installed().count(),
            skipped = report.skipped().count(),
            "page behaviors installed"
        );

        Ok(InstalledBehaviors {
            env,
            report,
            typewriter,
        })
    }
}

/// Handle returned by [`PageBehaviors::install`]
pub struct InstalledBehaviors<E: Environment> {
    env: Rc<E>,
    report: InstallReport,
    typewriter: Option<TypewriterTask<E>>,
}

impl<E: Environment> InstalledBehaviors<E> {
    #[must_use]
    pub const fn report(&self) -> &InstallReport {
        &self.report
    }

    /// Subtitle typing task, if the page has a subtitle
    #[must_use]
    pub const fn typewriter(&self) -> Option<&TypewriterTask<E>> {
        self.typewriter.as_ref()
    }

    #[must_use]
    pub fn env(&self) -> &Rc<E> {
        &self.env
    }
}

impl<E: Environment> std::fmt::Debug for InstalledBehaviors<E> {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        f.debug_struct("InstalledBehaviors")
            .field("report", &self.report)
            .field("typewriter", &self.typewriter)
            .finish_non_exhaustive()
    }
}
