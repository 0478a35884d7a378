/// One axis of the integrity radar
#[derive(Debug, Clone, PartialEq)]
pub struct IntegrityMetric {
    pub subject: &'static str,
    pub value: f64,
    pub full_mark: f64,
}

/// Derive the five displayed sub-metrics from an overall integrity score
pub fn integrity_breakdown(score: f64) -> Vec<IntegrityMetric> {
    let metric = |subject, value: f64| IntegrityMetric {
        subject,
        value,
        full_mark: 100.0,
    };

    vec![
        metric("Independence", score * 0.9),
        metric("Variety", (score * 1.1).min(100.0)),
        metric("Organic Growth", score * 0.8),
        metric("Curator Trust", score),
        metric("Fair Placement", (score * 1.2).min(100.0)),
    ]
}

#[cfg(test)]
mod tests {
    use super::*;
    use approx::assert_relative_eq;

    #[test]
    fn test_breakdown_values() {
        let metrics = integrity_breakdown(50.0);
        let values: Vec<f64> = metrics.iter().map(|m| m.value).collect();
        assert_relative_eq!(values[0], 45.0);
        assert_relative_eq!(values[1], 55.0);
        assert_relative_eq!(values[2], 40.0);
        assert_relative_eq!(values[3], 50.0);
        assert_relative_eq!(values[4], 60.0);
    }

    #[test]
    fn test_breakdown_caps_at_full_mark() {
        let metrics = integrity_breakdown(95.0);
        assert_eq!(metrics[1].subject, "Variety");
        assert_relative_eq!(metrics[1].value, 100.0);
        assert_relative_eq!(metrics[4].value, 100.0);
        assert!(metrics.iter().all(|m| m.value <= m.full_mark));
    }

    #[test]
    fn test_zero_score() {
        assert!(integrity_breakdown(0.0).iter().all(|m| m.value == 0.0));
    }
}
