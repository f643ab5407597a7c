//! Nearest-style classification of a final eDPI

use super::baseline::{Style, StyleBaseline};

/// Style whose baseline eDPI is closest to `edpi`; ties go to the earlier of low, mid, high
pub fn classify(edpi: f64, baseline: &StyleBaseline) -> Style {
    let mut best = Style::Low;
    let mut best_diff = (edpi - baseline.low).abs();

    for style in [Style::Mid, Style::High] {
        let diff = (edpi - baseline.edpi(style)).abs();
        if diff < best_diff {
            best = style;
            best_diff = diff;
        }
    }

    best
}

#[cfg(test)]
mod tests {
    use super::*;

    fn valorant() -> StyleBaseline {
        StyleBaseline::from_mid(262.0)
    }

    #[test]
    fn test_classify_nearest() {
        let baseline = valorant();
        assert_eq!(classify(300.0, &baseline), Style::Mid);
        assert_eq!(classify(100.0, &baseline), Style::Low);
        assert_eq!(classify(380.0, &baseline), Style::High);
        assert_eq!(classify(5000.0, &baseline), Style::High);
        assert_eq!(classify(0.0, &baseline), Style::Low);
    }

    #[test]
    fn test_classify_ties_prefer_lower_style() {
        let baseline = StyleBaseline { low: 100.0, mid: 200.0, high: 300.0 };
        assert_eq!(classify(150.0, &baseline), Style::Low);
        assert_eq!(classify(250.0, &baseline), Style::Mid);
    }

    #[test]
    fn test_classify_exact_hits() {
        let baseline = valorant();
        for style in Style::ALL {
            assert_eq!(classify(baseline.edpi(style), &baseline), style);
        }
    }
}
