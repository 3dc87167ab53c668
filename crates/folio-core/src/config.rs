//! Behavior configuration
//!
//! Every value the behaviors use (selectors, thresholds, timings and style
//! strings) lives here with defaults matching the portfolio stylesheet. A page
//! can override any subset through a JSON document; missing fields keep their
//! defaults.

use serde::{Deserialize, Serialize};

use crate::error::{BehaviorError, Result};

/// Identifies one independent page behavior
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum BehaviorKind {
    SmoothScroll,
    NavbarStyle,
    ActiveLink,
    Reveal,
    Typewriter,
    Parallax,
    DynamicYear,
    LoadMarker,
    BadgeHover,
    CardTilt,
    ConsoleGreeting,
}

impl BehaviorKind {
    /// Every behavior, in installation order
    pub const ALL: [Self; 11] = [
        Self::SmoothScroll,
        Self::NavbarStyle,
        Self::ActiveLink,
        Self::Reveal,
        Self::Typewriter,
        Self::Parallax,
        Self::DynamicYear,
        Self::LoadMarker,
        Self::BadgeHover,
        Self::CardTilt,
        Self::ConsoleGreeting,
    ];

    /// Stable name used in logs and configuration
    #[must_use]
    pub const fn name(self) -> &'static str {
        match self {
            Self::SmoothScroll => "smooth_scroll",
            Self::NavbarStyle => "navbar_style",
            Self::ActiveLink => "active_link",
            Self::Reveal => "reveal",
            Self::Typewriter => "typewriter",
            Self::Parallax => "parallax",
            Self::DynamicYear => "dynamic_year",
            Self::LoadMarker => "load_marker",
            Self::BadgeHover => "badge_hover",
            Self::CardTilt => "card_tilt",
            Self::ConsoleGreeting => "console_greeting",
        }
    }
}

/// How missing required elements (navbar, sections, nav links) are treated
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum Strictness {
    /// Log a warning and skip the behavior
    #[default]
    Lenient,
    /// Fail installation with [`BehaviorError::MissingElement`]
    Strict,
}

/// CSS selectors for the markup the behaviors attach to
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct Selectors {
    pub fragment_links: String,
    pub navbar: String,
    pub sections: String,
    pub nav_links: String,
    pub reveal_targets: Vec<String>,
    pub subtitle: String,
    pub hero: String,
    pub footer: String,
    pub badges: String,
    pub tilt_cards: String,
}

impl Default for Selectors {
    fn default() -> Self {
        Self {
            fragment_links: "a[href^=\"#\"]".to_string(),
            navbar: ".navbar".to_string(),
            sections: "section[id]".to_string(),
            nav_links: ".nav-link".to_string(),
            reveal_targets: vec![".skill-card".to_string(), ".project-card".to_string()],
            subtitle: ".hero-subtitle".to_string(),
            hero: ".hero-content".to_string(),
            footer: ".footer p".to_string(),
            badges: ".badge".to_string(),
            tilt_cards: ".project-card".to_string(),
        }
    }
}

/// Background and shadow pair applied to the navbar
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NavbarStyle {
    pub background: String,
    pub shadow: String,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct NavbarConfig {
    /// Offsets strictly above this use the scrolled style
    pub threshold: f64,
    pub scrolled: NavbarStyle,
    pub resting: NavbarStyle,
}

impl Default for NavbarConfig {
    fn default() -> Self {
        Self {
            threshold: 100.0,
            scrolled: NavbarStyle {
                background: "rgba(26, 26, 26, 0.98)".to_string(),
                shadow: "0 4px 20px rgba(0, 0, 0, 0.5)".to_string(),
            },
            resting: NavbarStyle {
                background: "rgba(29, 29, 29, 0.95)".to_string(),
                shadow: "0 2px 10px rgba(0, 0, 0, 0.3)".to_string(),
            },
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ActiveLinkConfig {
    /// A section counts as reached this many pixels before its top
    pub section_offset: f64,
    pub active_class: String,
}

impl Default for ActiveLinkConfig {
    fn default() -> Self {
        Self {
            section_offset: 200.0,
            active_class: "active".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct RevealConfig {
    /// Minimum visible fraction before an element is revealed
    pub threshold: f64,
    pub root_margin: String,
    pub hidden_transform: String,
    pub revealed_transform: String,
    pub transition: String,
}

impl Default for RevealConfig {
    fn default() -> Self {
        Self {
            threshold: 0.1,
            root_margin: "0px 0px -100px 0px".to_string(),
            hidden_transform: "translateY(30px)".to_string(),
            revealed_transform: "translateY(0)".to_string(),
            transition: "all 0.6s ease-out".to_string(),
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct TypewriterTiming {
    pub start_delay_ms: u32,
    pub step_ms: u32,
    /// How long the cursor stays after the last step
    pub cursor_hold_ms: u32,
    pub cursor_border: String,
}

impl Default for TypewriterTiming {
    fn default() -> Self {
        Self {
            start_delay_ms: 1500,
            step_ms: 100,
            cursor_hold_ms: 500,
            cursor_border: "2px solid var(--accent-yellow)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ParallaxConfig {
    /// Fraction of the scroll offset the hero is translated by
    pub factor: f64,
    /// Offset at which the hero is fully transparent
    pub fade_distance: f64,
}

impl Default for ParallaxConfig {
    fn default() -> Self {
        Self {
            factor: 0.4,
            fade_distance: 700.0,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(default)]
pub struct BadgeConfig {
    pub hover_transform: String,
    pub hover_background: String,
    pub rest_transform: String,
    pub rest_background: String,
}

impl Default for BadgeConfig {
    fn default() -> Self {
        Self {
            hover_transform: "scale(1.1) rotate(2deg)".to_string(),
            hover_background: "rgba(244, 224, 77, 0.25)".to_string(),
            rest_transform: "scale(1) rotate(0deg)".to_string(),
            rest_background: "rgba(244, 224, 77, 0.1)".to_string(),
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct TiltConfig {
    pub perspective_px: f64,
    /// Pointer distance from center is divided by this to get degrees
    pub divisor: f64,
    pub lift_px: f64,
}

impl Default for TiltConfig {
    fn default() -> Self {
        Self {
            perspective_px: 1000.0,
            divisor: 20.0,
            lift_px: 10.0,
        }
    }
}

/// One styled developer console message
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ConsoleLine {
    pub message: String,
    pub css: String,
}

impl ConsoleLine {
    fn new(message: &str, css: &str) -> Self {
        Self {
            message: message.to_string(),
            css: css.to_string(),
        }
    }
}

fn default_console_lines() -> Vec<ConsoleLine> {
    vec![
        ConsoleLine::new(
            "\u{1f44b} Hello Developer!",
            "color: #f4e04d; font-size: 20px; font-weight: bold;",
        ),
        ConsoleLine::new(
            "This portfolio is built with DevOps best practices!",
            "color: #e0e0e0; font-size: 14px;",
        ),
        ConsoleLine::new(
            "Check out the GitHub repo: https://github.com/alexmachulsky",
            "color: #f4e04d; font-size: 12px;",
        ),
    ]
}

/// Complete configuration for [`crate::PageBehaviors`]
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct BehaviorConfig {
    pub strictness: Strictness,
    pub enabled: Vec<BehaviorKind>,
    pub selectors: Selectors,
    pub navbar: NavbarConfig,
    pub active_link: ActiveLinkConfig,
    pub reveal: RevealConfig,
    pub typewriter: TypewriterTiming,
    pub parallax: ParallaxConfig,
    /// Literal year replaced in the footer text
    pub placeholder_year: String,
    /// Class added to the body once the page has loaded
    pub loaded_class: String,
    pub badge: BadgeConfig,
    pub tilt: TiltConfig,
    pub console: Vec<ConsoleLine>,
}

impl Default for BehaviorConfig {
    fn default() -> Self {
        Self {
            strictness: Strictness::default(),
            enabled: BehaviorKind::ALL.to_vec(),
            selectors: Selectors::default(),
            navbar: NavbarConfig::default(),
            active_link: ActiveLinkConfig::default(),
            reveal: RevealConfig::default(),
            typewriter: TypewriterTiming::default(),
            parallax: ParallaxConfig::default(),
            placeholder_year: "2025".to_string(),
            loaded_class: "loaded".to_string(),
            badge: BadgeConfig::default(),
            tilt: TiltConfig::default(),
            console: default_console_lines(),
        }
    }
}

impl BehaviorConfig {
    /// Parse a (possibly partial) JSON override and validate the result.
    ///
    /// # Errors
    ///
    /// Returns [`BehaviorError::InvalidConfig`] if the JSON is malformed or the
    /// resulting configuration fails [`BehaviorConfig::validate`].
    pub fn from_json(json: &str) -> Result<Self> {
        let config: Self = serde_json::from_str(json)
            .map_err(|e| BehaviorError::InvalidConfig(format!("JSON parse error: {e}")))?;
        config.validate()?;
        Ok(config)
    }

    /// Builder-style strictness override
    #[must_use]
    pub fn with_strictness(mut self, strictness: Strictness) -> Self {
        self.strictness = strictness;
        self
    }

    /// Builder-style restriction to the given behaviors
    #[must_use]
    pub fn with_only(mut self, kinds: &[BehaviorKind]) -> Self {
        self.enabled = kinds.to_vec();
        self
    }

    /// Whether a behavior should be installed
    #[must_use]
    pub fn is_enabled(&self, kind: BehaviorKind) -> bool {
        self.enabled.contains(&kind)
    }

    /// Check numeric ranges and selectors.
    ///
    /// # Errors
    ///
    /// Returns [`BehaviorError::InvalidConfig`] describing the first problem found.
    pub fn validate(&self) -> Result<()> {
        let finite = [
            ("navbar.threshold", self.navbar.threshold),
            ("active_link.section_offset", self.active_link.section_offset),
            ("parallax.factor", self.parallax.factor),
            ("tilt.perspective_px", self.tilt.perspective_px),
            ("tilt.lift_px", self.tilt.lift_px),
        ];
        if let Some((name, _)) = finite.iter().find(|(_, value)| !value.is_finite()) {
            return Err(BehaviorError::InvalidConfig(format!("{name} must be finite")));
        }

        let positive = [
            ("parallax.fade_distance", self.parallax.fade_distance),
            ("tilt.divisor", self.tilt.divisor),
        ];
        if let Some((name, value)) = positive
            .iter()
            .find(|(_, value)| !value.is_finite() || *value <= 0.0)
        {
            return Err(BehaviorError::InvalidConfig(format!(
                "{name} must be positive, got {value}"
            )));
        }

        if !(0.0..=1.0).contains(&self.reveal.threshold) {
            return Err(BehaviorError::InvalidConfig(format!(
                "reveal.threshold must be within 0..=1, got {}",
                self.reveal.threshold
            )));
        }

        let selectors = &self.selectors;
        let single = [
            &selectors.fragment_links,
            &selectors.navbar,
            &selectors.sections,
            &selectors.nav_links,
            &selectors.subtitle,
            &selectors.hero,
            &selectors.footer,
            &selectors.badges,
            &selectors.tilt_cards,
        ];
        if single
            .into_iter()
            .chain(selectors.reveal_targets.iter())
            .any(|selector| selector.trim().is_empty())
        {
            return Err(BehaviorError::InvalidConfig(
                "selectors must not be empty".to_string(),
            ));
        }

        Ok(())
    }
}
