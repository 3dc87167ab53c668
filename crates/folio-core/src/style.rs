//! Pure style computations
//!
//! Each function maps an input (scroll offset, pointer position, text) to the
//! exact style string a behavior writes. Nothing here touches the host, so the
//! arithmetic is tested directly.

use crate::config::{NavbarConfig, NavbarStyle, ParallaxConfig, TiltConfig};
use crate::env::{PointerPosition, Rect};

/// Format a number the way CSS text is interpolated on the page:
/// shortest round-trip form, no trailing `.0`, and `-0` written as `0`.
#[must_use]
pub fn css_number(value: f64) -> String {
    if value == 0.0 {
        "0".to_string()
    } else {
        format!("{value}")
    }
}

/// Navbar style for the given scroll offset.
///
/// The scrolled style applies strictly above the threshold.
#[must_use]
pub fn navbar_style(offset: f64, config: &NavbarConfig) -> &NavbarStyle {
    if offset > config.threshold {
        &config.scrolled
    } else {
        &config.resting
    }
}

/// Identifier of the section the reader is currently in.
///
/// `sections` yields `(id, top)` pairs in document order. A section is reached
/// once `offset >= top - section_offset`; the last reached section wins.
///
/// # Examples
///
/// ```
/// use folio_core::style::active_section;
///
/// let sections = [("a", 0.0), ("b", 500.0), ("c", 1200.0)];
/// assert_eq!(active_section(650.0, sections, 200.0), Some("b"));
/// assert_eq!(active_section(1000.0, sections, 200.0), Some("c"));
/// ```
pub fn active_section<'a, I>(offset: f64, sections: I, section_offset: f64) -> Option<&'a str>
where
    I: IntoIterator<Item = (&'a str, f64)>,
{
    sections
        .into_iter()
        .filter(|(_, top)| offset >= top - section_offset)
        .last()
        .map(|(id, _)| id)
}

/// `href` value a nav link must carry to point at section `id`
#[must_use]
pub fn fragment_href(id: &str) -> String {
    format!("#{id}")
}

/// Transform and opacity applied to the hero for one scroll position
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct ParallaxFrame {
    pub transform: String,
    pub opacity: String,
}

/// Parallax frame for `offset`, or `None` once the offset reaches the
/// viewport height (the hero keeps its last frame).
#[must_use]
pub fn parallax_frame(
    offset: f64,
    viewport_height: f64,
    config: &ParallaxConfig,
) -> Option<ParallaxFrame> {
    if offset >= viewport_height {
        return None;
    }

    let shift = offset * config.factor;
    let opacity = (1.0 - offset / config.fade_distance).clamp(0.0, 1.0);

    Some(ParallaxFrame {
        transform: format!("translateY({}px)", css_number(shift)),
        opacity: css_number(opacity),
    })
}

/// Rotation angles in degrees `(rotate_x, rotate_y)` for a pointer over a card
#[must_use]
pub fn tilt_angles(pointer: PointerPosition, rect: Rect, divisor: f64) -> (f64, f64) {
    let x = pointer.client_x - rect.left;
    let y = pointer.client_y - rect.top;

    let center_x = rect.width / 2.0;
    let center_y = rect.height / 2.0;

    ((y - center_y) / divisor, (center_x - x) / divisor)
}

/// 3D transform for a card under the pointer
#[must_use]
pub fn tilt_transform(pointer: PointerPosition, rect: Rect, config: &TiltConfig) -> String {
    let (rotate_x, rotate_y) = tilt_angles(pointer, rect, config.divisor);
    format!(
        "perspective({}px) rotateX({}deg) rotateY({}deg) translateY(-{}px)",
        css_number(config.perspective_px),
        css_number(rotate_x),
        css_number(rotate_y),
        css_number(config.lift_px),
    )
}

/// Neutral card transform after the pointer leaves
#[must_use]
pub fn tilt_rest_transform(config: &TiltConfig) -> String {
    format!(
        "perspective({}px) rotateX(0) rotateY(0) translateY(0)",
        css_number(config.perspective_px)
    )
}

/// Replace the first occurrence of `placeholder` in `text` with `year`.
///
/// Returns `None` when the placeholder does not occur.
#[must_use]
pub fn substitute_year(text: &str, placeholder: &str, year: i32) -> Option<String> {
    if placeholder.is_empty() || !text.contains(placeholder) {
        return None;
    }
    Some(text.replacen(placeholder, &year.to_string(), 1))
}
