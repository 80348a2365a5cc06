use anyhow::{bail, Result};

use snapdeck_core::EasingType;

pub fn run(name: Option<&str>, samples: usize) -> Result<()> {
    let curves: Vec<EasingType> = match name {
        Some(name) => match EasingType::from_name(name) {
            Some(easing) => vec![easing],
            None => bail!("Unknown easing curve '{}'. Run `snapdeck easings` to list them.", name),
        },
        None => EasingType::ALL.to_vec(),
    };

    for easing in curves {
        let overshoot = if easing.is_monotonic() { "" } else { "  (overshoots)" };
        println!("{:<14}{}", easing.name(), overshoot);
        if samples > 0 {
            println!("    {}", format_samples(easing, samples));
        }
    }

    Ok(())
}

/// `samples + 1` evenly spaced values from t = 0 to t = 1
fn format_samples(easing: EasingType, samples: usize) -> String {
    (0..=samples)
        .map(|i| format!("{:.3}", easing.apply(i as f64 / samples as f64)))
        .collect::<Vec<_>>()
        .join(" ")
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_format_samples_linear() {
        assert_eq!(
            format_samples(EasingType::Linear, 4),
            "0.000 0.250 0.500 0.750 1.000"
        );
    }

    #[test]
    fn test_unknown_curve_is_an_error() {
        assert!(run(Some("wobble"), 0).is_err());
    }
}
