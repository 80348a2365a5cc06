//! Style-property resolution
//!
//! Hosts expose configuration as named string properties (CSS-like custom
//! properties). They are resolved once per style change into typed
//! structures with documented fallbacks, so the state machines never see a
//! malformed value:
//!
//! | property | type | fallback |
//! |---|---|---|
//! | `--snap-easing` | curve name | `linear` |
//! | `--snap-duration` | time units, floor 0 | 320 |
//! | `--snap-padding-{left,right,top,bottom}` | length, floor 0 | 0 |
//! | `--stepper-easing` | curve name | `linear` |
//! | `--stepper-duration` | time units, floor 0 | 170 |

use std::collections::BTreeMap;
use std::time::Duration;

use crate::easing::EasingType;
use crate::geometry::Padding;

pub const SNAP_EASING: &str = "--snap-easing";
pub const SNAP_DURATION: &str = "--snap-duration";
pub const SNAP_PADDING_LEFT: &str = "--snap-padding-left";
pub const SNAP_PADDING_RIGHT: &str = "--snap-padding-right";
pub const SNAP_PADDING_TOP: &str = "--snap-padding-top";
pub const SNAP_PADDING_BOTTOM: &str = "--snap-padding-bottom";
pub const STEPPER_EASING: &str = "--stepper-easing";
pub const STEPPER_DURATION: &str = "--stepper-duration";

/// Default page transition length in milliseconds
pub const DEFAULT_SNAP_DURATION_MS: u64 = 320;

/// Default selector highlight transition length in milliseconds
pub const DEFAULT_STEPPER_DURATION_MS: u64 = 170;

/// Parse a length such as `"12px"`, `"1.5em"` or `" 40 "`.
///
/// Trailing unit characters are stripped; anything unparsable (including
/// NaN and infinities) yields 0.
pub fn parse_length(value: &str) -> f32 {
    let trimmed = value.trim();
    let numeric = trimmed.trim_end_matches(|c: char| c.is_ascii_alphabetic() || c == '%');
    match numeric.trim_end().parse::<f32>() {
        Ok(parsed) if parsed.is_finite() => parsed,
        _ => {
            if !trimmed.is_empty() {
                tracing::debug!(value, "Unparsable length, using 0");
            }
            0.0
        }
    }
}

/// Named string properties delivered by the host's style system
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StyleProperties {
    values: BTreeMap<String, String>,
}

impl StyleProperties {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn set(&mut self, name: impl Into<String>, value: impl Into<String>) {
        self.values.insert(name.into(), value.into());
    }

    pub fn with(mut self, name: impl Into<String>, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    pub fn get(&self, name: &str) -> Option<&str> {
        self.values.get(name).map(String::as_str)
    }

    pub fn is_empty(&self) -> bool {
        self.values.is_empty()
    }

    /// Length property, 0 when absent or malformed
    pub fn length(&self, name: &str) -> f32 {
        self.get(name).map(parse_length).unwrap_or(0.0)
    }

    /// Non-negative duration in milliseconds, `default_ms` when absent
    pub fn duration_ms(&self, name: &str, default_ms: u64) -> Duration {
        match self.get(name) {
            Some(value) => Duration::from_millis(parse_length(value).max(0.0).round() as u64),
            None => Duration::from_millis(default_ms),
        }
    }

    /// Easing curve, `Linear` when absent or unrecognised
    pub fn easing(&self, name: &str) -> EasingType {
        EasingType::resolve(self.get(name))
    }
}

impl<K: Into<String>, V: Into<String>> FromIterator<(K, V)> for StyleProperties {
    fn from_iter<I: IntoIterator<Item = (K, V)>>(iter: I) -> Self {
        let mut properties = Self::new();
        for (name, value) in iter {
            properties.set(name, value);
        }
        properties
    }
}

/// Typed paging configuration resolved from style properties
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PagerStyle {
    pub easing: EasingType,
    pub transition_duration: Duration,
    pub padding: Padding,
}

impl Default for PagerStyle {
    fn default() -> Self {
        Self {
            easing: EasingType::Linear,
            transition_duration: Duration::from_millis(DEFAULT_SNAP_DURATION_MS),
            padding: Padding::default(),
        }
    }
}

impl PagerStyle {
    pub fn resolve(properties: &StyleProperties) -> Self {
        Self {
            easing: properties.easing(SNAP_EASING),
            transition_duration: properties.duration_ms(SNAP_DURATION, DEFAULT_SNAP_DURATION_MS),
            padding: Padding::new(
                properties.length(SNAP_PADDING_LEFT),
                properties.length(SNAP_PADDING_RIGHT),
                properties.length(SNAP_PADDING_TOP),
                properties.length(SNAP_PADDING_BOTTOM),
            ),
        }
    }
}

/// Typed selector configuration resolved from style properties
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct SelectorStyle {
    pub easing: EasingType,
    pub transition_duration: Duration,
}

impl Default for SelectorStyle {
    fn default() -> Self {
        Self {
            easing: EasingType::Linear,
            transition_duration: Duration::from_millis(DEFAULT_STEPPER_DURATION_MS),
        }
    }
}

impl SelectorStyle {
    pub fn resolve(properties: &StyleProperties) -> Self {
        Self {
            easing: properties.easing(STEPPER_EASING),
            transition_duration: properties
                .duration_ms(STEPPER_DURATION, DEFAULT_STEPPER_DURATION_MS),
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_length_strips_units() {
        assert_eq!(parse_length("12px"), 12.0);
        assert_eq!(parse_length(" 1.5em "), 1.5);
        assert_eq!(parse_length("40"), 40.0);
        assert_eq!(parse_length("50%"), 50.0);
        assert_eq!(parse_length("-4px"), -4.0);
    }

    #[test]
    fn test_parse_length_defaults_to_zero() {
        assert_eq!(parse_length(""), 0.0);
        assert_eq!(parse_length("px"), 0.0);
        assert_eq!(parse_length("wide"), 0.0);
        assert_eq!(parse_length("1.2.3px"), 0.0);
        assert_eq!(parse_length("NaN"), 0.0);
    }

    #[test]
    fn test_pager_style_defaults() {
        let style = PagerStyle::resolve(&StyleProperties::new());
        assert_eq!(style, PagerStyle::default());
        assert_eq!(style.transition_duration, Duration::from_millis(320));
    }

    #[test]
    fn test_pager_style_resolves_values() {
        let properties: StyleProperties = [
            (SNAP_EASING, "OutCubic"),
            (SNAP_DURATION, "250ms"),
            (SNAP_PADDING_LEFT, "8px"),
            (SNAP_PADDING_RIGHT, "-3px"),
            (SNAP_PADDING_TOP, "garbage"),
        ]
        .into_iter()
        .collect();
        let style = PagerStyle::resolve(&properties);
        assert_eq!(style.easing, EasingType::OutCubic);
        assert_eq!(style.transition_duration, Duration::from_millis(250));
        assert_eq!(style.padding.left, 8.0);
        assert_eq!(style.padding.right, 0.0);
        assert_eq!(style.padding.top, 0.0);
    }

    #[test]
    fn test_selector_style_floor_and_fallback() {
        let properties = StyleProperties::new()
            .with(STEPPER_DURATION, "-50")
            .with(STEPPER_EASING, "sproing");
        let style = SelectorStyle::resolve(&properties);
        assert_eq!(style.transition_duration, Duration::ZERO);
        assert_eq!(style.easing, EasingType::Linear);

        let style = SelectorStyle::resolve(&StyleProperties::new());
        assert_eq!(style.transition_duration, Duration::from_millis(170));
    }
}
