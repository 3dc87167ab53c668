//! Presentational behaviors for the folio portfolio page
//!
//! This crate wires the page's cosmetic effects (smooth fragment scrolling,
//! navbar restyling, active-link highlighting, reveal-on-scroll, the subtitle
//! typing effect, hero parallax, footer year, load marker, badge hover, card
//! tilt and the console greeting) against a host [`Environment`].
//!
//! ## Architecture
//! - `env`: capability trait the host implements (DOM queries, styles,
//!   listeners, intersection observers, timers)
//! - `registry`: installs every enabled behavior and reports the outcome
//! - `behaviors`: one module per group of related listeners
//! - `style`: pure style arithmetic, no host access
//! - `typewriter`: cancelable, restartable typing task
//! - `config`: selectors, thresholds and style strings, serde-loadable
//! - `fake`: deterministic in-memory host for tests
//! - `error`: error types
//!
//! ## Example
//!
//! ```
//! use std::rc::Rc;
//! use folio_core::{BehaviorConfig, BehaviorKind, PageBehaviors};
//! use folio_core::fake::FakeEnvironment;
//!
//! let env = Rc::new(FakeEnvironment::new());
//! let navbar = env.add_element(&[".navbar"]);
//!
//! let config = BehaviorConfig::default().with_only(&[BehaviorKind::NavbarStyle]);
//! let installed = PageBehaviors::new(Rc::clone(&env), config)?.install()?;
//! assert!(installed.report().is_installed(BehaviorKind::NavbarStyle));
//!
//! env.scroll_to(250.0);
//! assert_eq!(
//!     env.style(navbar, "background-color").as_deref(),
//!     Some("rgba(26, 26, 26, 0.98)")
//! );
//! # Ok::<(), folio_core::BehaviorError>(())
//! ```

#![forbid(unsafe_code)]

pub mod behaviors;
pub mod config;
pub mod env;
pub mod error;
pub mod fake;
pub mod registry;
pub mod style;
pub mod typewriter;

pub use config::{BehaviorConfig, BehaviorKind, Strictness};
pub use env::Environment;
pub use error::{BehaviorError, Result};
pub use registry::{InstallReport, InstalledBehaviors, PageBehaviors};
pub use typewriter::{TypewriterState, TypewriterTask};

#[cfg(test)]
mod tests;
