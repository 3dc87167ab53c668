//! Individual page behaviors
//!
//! Each submodule wires one or more independent listeners. Every `install_*`
//! function takes the shared environment and the configuration, attaches its
//! listeners, and reports what it did as an [`Outcome`]. The per-event work is
//! exposed as plain functions (`apply_*`, `highlight_*`, ...) so it can be
//! exercised without dispatching through the host.

pub mod hero;
pub mod hover;
pub mod navigation;
pub mod page;
pub mod reveal;

use crate::config::Strictness;
use crate::env::Environment;
use crate::error::{BehaviorError, Result};

/// Result of installing one behavior
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum Outcome {
    /// Listeners attached to `targets` elements (window-level behaviors count 1)
    Installed { targets: usize },
    /// Markup was missing; nothing attached
    Skipped { reason: String },
    /// Turned off in configuration
    Disabled,
}

impl Outcome {
    #[must_use]
    pub const fn installed(targets: usize) -> Self {
        Self::Installed { targets }
    }

    pub fn skipped(reason: impl Into<String>) -> Self {
        Self::Skipped {
            reason: reason.into(),
        }
    }

    #[must_use]
    pub const fn is_installed(&self) -> bool {
        matches!(self, Self::Installed { .. })
    }
}

/// Look up an element the page is expected to have.
///
/// In lenient mode a missing element is logged and `None` is returned; in
/// strict mode it is an error.
pub(crate) fn require_one<E: Environment>(
    env: &E,
    selector: &str,
    strictness: Strictness,
) -> Result<Option<E::Element>> {
    match env.query(selector) {
        Some(element) => Ok(Some(element)),
        None => missing(selector, strictness).map(|()| None),
    }
}

/// Like [`require_one`] for collections; an empty match counts as missing.
pub(crate) fn require_all<E: Environment>(
    env: &E,
    selector: &str,
    strictness: Strictness,
) -> Result<Vec<E::Element>> {
    let found = env.query_all(selector);
    if found.is_empty() {
        missing(selector, strictness)?;
    }
    Ok(found)
}

fn missing(selector: &str, strictness: Strictness) -> Result<()> {
    match strictness {
        Strictness::Strict => Err(BehaviorError::missing_element(selector)),
        Strictness::Lenient => {
            tracing::warn!(selector, "required element missing, behavior skipped");
            Ok(())
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::fake::FakeEnvironment;

    #[test]
    fn test_require_one_lenient_missing_is_none() {
        let env = FakeEnvironment::new();
        let found = require_one(&env, ".navbar", Strictness::Lenient);
        assert_eq!(found, Ok(None));
    }

    #[test]
    fn test_require_one_strict_missing_is_error() {
        let env = FakeEnvironment::new();
        let found = require_one(&env, ".navbar", Strictness::Strict);
        assert_eq!(found, Err(BehaviorError::missing_element(".navbar")));
    }

    #[test]
    fn test_require_all_strict_empty_is_error() {
        let env = FakeEnvironment::new();
        let found = require_all(&env, ".nav-link", Strictness::Strict);
        assert!(matches!(found, Err(BehaviorError::MissingElement { .. })));
    }

    #[test]
    fn test_require_all_present() {
        let env = FakeEnvironment::new();
        let first = env.add_element(&[".nav-link"]);
        let second = env.add_element(&[".nav-link"]);
        let found = require_all(&env, ".nav-link", Strictness::Strict);
        assert_eq!(found, Ok(vec![first, second]));
    }
}
