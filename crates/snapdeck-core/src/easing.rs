//! Pure easing functions mapping normalized time to normalized progress
//!
//! Every curve maps `0 -> 0` and `1 -> 1`. `Back` and `Elastic` overshoot in
//! between, `Bounce` is not monotonic. Curve lookup by name is a static table
//! with no mutable state; unknown names resolve to [`EasingType::Linear`].

use std::f64::consts::PI;
use std::fmt;

use serde::{Deserialize, Deserializer, Serialize};

/// Named easing curve
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Default, Serialize)]
#[serde(rename_all = "kebab-case")]
pub enum EasingType {
    #[default]
    Linear,
    InSine,
    OutSine,
    InOutSine,
    InQuad,
    OutQuad,
    InOutQuad,
    InCubic,
    OutCubic,
    InOutCubic,
    InQuart,
    OutQuart,
    InOutQuart,
    InQuint,
    OutQuint,
    InOutQuint,
    InExpo,
    OutExpo,
    InOutExpo,
    InCirc,
    OutCirc,
    InOutCirc,
    InBack,
    OutBack,
    InOutBack,
    InElastic,
    OutElastic,
    InOutElastic,
    InBounce,
    OutBounce,
    InOutBounce,
}

/// Lookup table: normalized name -> curve
const NAMES: [(&str, EasingType); 31] = [
    ("linear", EasingType::Linear),
    ("insine", EasingType::InSine),
    ("outsine", EasingType::OutSine),
    ("inoutsine", EasingType::InOutSine),
    ("inquad", EasingType::InQuad),
    ("outquad", EasingType::OutQuad),
    ("inoutquad", EasingType::InOutQuad),
    ("incubic", EasingType::InCubic),
    ("outcubic", EasingType::OutCubic),
    ("inoutcubic", EasingType::InOutCubic),
    ("inquart", EasingType::InQuart),
    ("outquart", EasingType::OutQuart),
    ("inoutquart", EasingType::InOutQuart),
    ("inquint", EasingType::InQuint),
    ("outquint", EasingType::OutQuint),
    ("inoutquint", EasingType::InOutQuint),
    ("inexpo", EasingType::InExpo),
    ("outexpo", EasingType::OutExpo),
    ("inoutexpo", EasingType::InOutExpo),
    ("incirc", EasingType::InCirc),
    ("outcirc", EasingType::OutCirc),
    ("inoutcirc", EasingType::InOutCirc),
    ("inback", EasingType::InBack),
    ("outback", EasingType::OutBack),
    ("inoutback", EasingType::InOutBack),
    ("inelastic", EasingType::InElastic),
    ("outelastic", EasingType::OutElastic),
    ("inoutelastic", EasingType::InOutElastic),
    ("inbounce", EasingType::InBounce),
    ("outbounce", EasingType::OutBounce),
    ("inoutbounce", EasingType::InOutBounce),
];

impl EasingType {
    /// Every available curve, in declaration order
    pub const ALL: [EasingType; 31] = {
        let mut all = [EasingType::Linear; 31];
        let mut i = 0;
        while i < NAMES.len() {
            all[i] = NAMES[i].1;
            i += 1;
        }
        all
    };

    /// Look up a curve by name.
    ///
    /// Matching ignores case, `-`, `_`, whitespace and a leading `ease`, so
    /// `OutCubic`, `out-cubic`, `out_cubic` and `easeOutCubic` all resolve to
    /// the same curve.
    pub fn from_name(name: &str) -> Option<Self> {
        let key: String = name
            .chars()
            .filter(|c| !matches!(c, '-' | '_') && !c.is_whitespace())
            .flat_map(char::to_lowercase)
            .collect();
        let key = key.strip_prefix("ease").unwrap_or(&key);
        NAMES
            .iter()
            .find(|(candidate, _)| *candidate == key)
            .map(|(_, easing)| *easing)
    }

    /// Resolve an optional name, falling back to `Linear` when absent or unknown
    pub fn resolve(name: Option<&str>) -> Self {
        match name {
            Some(name) => Self::from_name(name).unwrap_or_else(|| {
                tracing::debug!(name, "Unknown easing name, falling back to linear");
                Self::Linear
            }),
            None => Self::Linear,
        }
    }

    /// Canonical kebab-case name
    pub fn name(&self) -> &'static str {
        match self {
            EasingType::Linear => "linear",
            EasingType::InSine => "in-sine",
            EasingType::OutSine => "out-sine",
            EasingType::InOutSine => "in-out-sine",
            EasingType::InQuad => "in-quad",
            EasingType::OutQuad => "out-quad",
            EasingType::InOutQuad => "in-out-quad",
            EasingType::InCubic => "in-cubic",
            EasingType::OutCubic => "out-cubic",
            EasingType::InOutCubic => "in-out-cubic",
            EasingType::InQuart => "in-quart",
            EasingType::OutQuart => "out-quart",
            EasingType::InOutQuart => "in-out-quart",
            EasingType::InQuint => "in-quint",
            EasingType::OutQuint => "out-quint",
            EasingType::InOutQuint => "in-out-quint",
            EasingType::InExpo => "in-expo",
            EasingType::OutExpo => "out-expo",
            EasingType::InOutExpo => "in-out-expo",
            EasingType::InCirc => "in-circ",
            EasingType::OutCirc => "out-circ",
            EasingType::InOutCirc => "in-out-circ",
            EasingType::InBack => "in-back",
            EasingType::OutBack => "out-back",
            EasingType::InOutBack => "in-out-back",
            EasingType::InElastic => "in-elastic",
            EasingType::OutElastic => "out-elastic",
            EasingType::InOutElastic => "in-out-elastic",
            EasingType::InBounce => "in-bounce",
            EasingType::OutBounce => "out-bounce",
            EasingType::InOutBounce => "in-out-bounce",
        }
    }

    /// Apply the easing function to a progress value
    ///
    /// # Arguments
    /// * `t` - Progress value, clamped to [0, 1]
    ///
    /// # Returns
    /// Eased progress; exactly 0 at `t <= 0` and exactly 1 at `t >= 1`
    pub fn apply(&self, t: f64) -> f64 {
        if t.is_nan() || t <= 0.0 {
            return 0.0;
        }
        if t >= 1.0 {
            return 1.0;
        }
        match self {
            EasingType::Linear => t,
            EasingType::InSine => 1.0 - (t * PI / 2.0).cos(),
            EasingType::OutSine => (t * PI / 2.0).sin(),
            EasingType::InOutSine => -((PI * t).cos() - 1.0) / 2.0,
            EasingType::InQuad => ease_in_pow(t, 2),
            EasingType::OutQuad => ease_out_pow(t, 2),
            EasingType::InOutQuad => ease_in_out_pow(t, 2),
            EasingType::InCubic => ease_in_pow(t, 3),
            EasingType::OutCubic => ease_out_pow(t, 3),
            EasingType::InOutCubic => ease_in_out_pow(t, 3),
            EasingType::InQuart => ease_in_pow(t, 4),
            EasingType::OutQuart => ease_out_pow(t, 4),
            EasingType::InOutQuart => ease_in_out_pow(t, 4),
            EasingType::InQuint => ease_in_pow(t, 5),
            EasingType::OutQuint => ease_out_pow(t, 5),
            EasingType::InOutQuint => ease_in_out_pow(t, 5),
            EasingType::InExpo => 2.0_f64.powf(10.0 * t - 10.0),
            EasingType::OutExpo => 1.0 - 2.0_f64.powf(-10.0 * t),
            EasingType::InOutExpo => {
                if t < 0.5 {
                    2.0_f64.powf(20.0 * t - 10.0) / 2.0
                } else {
                    (2.0 - 2.0_f64.powf(-20.0 * t + 10.0)) / 2.0
                }
            }
            EasingType::InCirc => 1.0 - (1.0 - t * t).sqrt(),
            EasingType::OutCirc => (1.0 - (t - 1.0).powi(2)).sqrt(),
            EasingType::InOutCirc => {
                if t < 0.5 {
                    (1.0 - (1.0 - (2.0 * t).powi(2)).sqrt()) / 2.0
                } else {
                    ((1.0 - (-2.0 * t + 2.0).powi(2)).sqrt() + 1.0) / 2.0
                }
            }
            EasingType::InBack => BACK_C3 * t * t * t - BACK_C1 * t * t,
            EasingType::OutBack => {
                1.0 + BACK_C3 * (t - 1.0).powi(3) + BACK_C1 * (t - 1.0).powi(2)
            }
            EasingType::InOutBack => {
                let c2 = BACK_C1 * 1.525;
                if t < 0.5 {
                    ((2.0 * t).powi(2) * ((c2 + 1.0) * 2.0 * t - c2)) / 2.0
                } else {
                    ((2.0 * t - 2.0).powi(2) * ((c2 + 1.0) * (t * 2.0 - 2.0) + c2) + 2.0) / 2.0
                }
            }
            EasingType::InElastic => {
                let c4 = (2.0 * PI) / 3.0;
                -(2.0_f64.powf(10.0 * t - 10.0)) * ((t * 10.0 - 10.75) * c4).sin()
            }
            EasingType::OutElastic => {
                let c4 = (2.0 * PI) / 3.0;
                2.0_f64.powf(-10.0 * t) * ((t * 10.0 - 0.75) * c4).sin() + 1.0
            }
            EasingType::InOutElastic => {
                let c5 = (2.0 * PI) / 4.5;
                if t < 0.5 {
                    -(2.0_f64.powf(20.0 * t - 10.0) * ((20.0 * t - 11.125) * c5).sin()) / 2.0
                } else {
                    (2.0_f64.powf(-20.0 * t + 10.0) * ((20.0 * t - 11.125) * c5).sin()) / 2.0
                        + 1.0
                }
            }
            EasingType::InBounce => 1.0 - bounce_out(1.0 - t),
            EasingType::OutBounce => bounce_out(t),
            EasingType::InOutBounce => {
                if t < 0.5 {
                    (1.0 - bounce_out(1.0 - 2.0 * t)) / 2.0
                } else {
                    (1.0 + bounce_out(2.0 * t - 1.0)) / 2.0
                }
            }
        }
    }

    /// Whether the curve stays inside [0, 1] and never reverses direction
    pub fn is_monotonic(&self) -> bool {
        !matches!(
            self,
            EasingType::InBack
                | EasingType::OutBack
                | EasingType::InOutBack
                | EasingType::InElastic
                | EasingType::OutElastic
                | EasingType::InOutElastic
                | EasingType::InBounce
                | EasingType::OutBounce
                | EasingType::InOutBounce
        )
    }
}

impl fmt::Display for EasingType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.name())
    }
}

/// Accepts any spelling `from_name` accepts; unknown names load as `Linear`
impl<'de> Deserialize<'de> for EasingType {
    fn deserialize<D>(deserializer: D) -> Result<Self, D::Error>
    where
        D: Deserializer<'de>,
    {
        let name = String::deserialize(deserializer)?;
        Ok(Self::from_name(&name).unwrap_or_else(|| {
            tracing::warn!(name = %name, "Unknown easing in configuration, using linear");
            Self::Linear
        }))
    }
}

const BACK_C1: f64 = 1.70158;
const BACK_C3: f64 = BACK_C1 + 1.0;

/// f(t) = t^n
#[inline]
fn ease_in_pow(t: f64, n: i32) -> f64 {
    t.powi(n)
}

/// f(t) = 1 - (1-t)^n
#[inline]
fn ease_out_pow(t: f64, n: i32) -> f64 {
    1.0 - (1.0 - t).powi(n)
}

#[inline]
fn ease_in_out_pow(t: f64, n: i32) -> f64 {
    if t < 0.5 {
        2.0_f64.powi(n - 1) * t.powi(n)
    } else {
        1.0 - (-2.0 * t + 2.0).powi(n) / 2.0
    }
}

fn bounce_out(t: f64) -> f64 {
    const N1: f64 = 7.5625;
    const D1: f64 = 2.75;

    if t < 1.0 / D1 {
        N1 * t * t
    } else if t < 2.0 / D1 {
        let t = t - 1.5 / D1;
        N1 * t * t + 0.75
    } else if t < 2.5 / D1 {
        let t = t - 2.25 / D1;
        N1 * t * t + 0.9375
    } else {
        let t = t - 2.625 / D1;
        N1 * t * t + 0.984375
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_easing_boundaries() {
        for easing in EasingType::ALL {
            assert_eq!(easing.apply(0.0), 0.0, "{:?} at t=0", easing);
            assert_eq!(easing.apply(1.0), 1.0, "{:?} at t=1", easing);
            assert_eq!(easing.apply(-3.0), 0.0, "{:?} below range", easing);
            assert_eq!(easing.apply(7.0), 1.0, "{:?} above range", easing);
        }
    }

    #[test]
    fn test_easing_continuous_near_ends() {
        for easing in EasingType::ALL {
            assert!(easing.apply(0.0001).abs() < 0.01, "{:?} near t=0", easing);
            assert!((easing.apply(0.9999) - 1.0).abs() < 0.01, "{:?} near t=1", easing);
        }
    }

    #[test]
    fn test_easing_monotonic() {
        for easing in EasingType::ALL.into_iter().filter(EasingType::is_monotonic) {
            let mut prev = 0.0;
            for i in 0..=20 {
                let t = i as f64 / 20.0;
                let v = easing.apply(t);
                assert!(v >= prev - 1e-12, "{:?} not monotonic at t={}", easing, t);
                assert!((0.0..=1.0).contains(&v), "{:?} out of range at t={}", easing, t);
                prev = v;
            }
        }
    }

    #[test]
    fn test_in_out_midpoint() {
        for easing in [
            EasingType::InOutSine,
            EasingType::InOutQuad,
            EasingType::InOutCubic,
            EasingType::InOutQuart,
            EasingType::InOutQuint,
            EasingType::InOutCirc,
        ] {
            assert!((easing.apply(0.5) - 0.5).abs() < 1e-9, "{:?} at t=0.5", easing);
        }
    }

    #[test]
    fn test_back_overshoots() {
        assert!(EasingType::InBack.apply(0.2) < 0.0);
        assert!(EasingType::OutBack.apply(0.8) > 1.0);
    }

    #[test]
    fn test_all_curves_distinct_in_table() {
        assert_eq!(EasingType::ALL.len(), 31);
        for (i, a) in EasingType::ALL.iter().enumerate() {
            for b in &EasingType::ALL[i + 1..] {
                assert_ne!(a, b);
            }
        }
    }

    #[test]
    fn test_from_name_variants() {
        assert_eq!(EasingType::from_name("OutCubic"), Some(EasingType::OutCubic));
        assert_eq!(EasingType::from_name("out-cubic"), Some(EasingType::OutCubic));
        assert_eq!(EasingType::from_name("out_cubic"), Some(EasingType::OutCubic));
        assert_eq!(EasingType::from_name("easeOutCubic"), Some(EasingType::OutCubic));
        assert_eq!(EasingType::from_name(" Linear "), Some(EasingType::Linear));
        assert_eq!(EasingType::from_name("wobble"), None);
    }

    #[test]
    fn test_canonical_names_round_trip() {
        for easing in EasingType::ALL {
            assert_eq!(EasingType::from_name(easing.name()), Some(easing));
        }
    }

    #[test]
    fn test_resolve_falls_back_to_linear() {
        assert_eq!(EasingType::resolve(None), EasingType::Linear);
        assert_eq!(EasingType::resolve(Some("")), EasingType::Linear);
        assert_eq!(EasingType::resolve(Some("nope")), EasingType::Linear);
        assert_eq!(EasingType::resolve(Some("InOutBounce")), EasingType::InOutBounce);
    }
}
