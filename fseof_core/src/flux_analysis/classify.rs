//! Correlation labeling and reaction classification for scanned slopes

use crate::flux_analysis::targets::AmplificationTarget;

/// Boundary separating a clear trend from noise
///
/// The same value is applied to both the flux trend (`q_slope`) and the flux
/// capacity trend (`l_sol`). Whether the capacity trend should use its own
/// boundary is an open question inherited from the method's reference
/// implementation, which reuses one constant for both.
pub const CORRELATION_THRESHOLD: f64 = 1.0;

/// Label a slope as positively correlated (`1`), negatively correlated (`-1`),
/// or uncorrelated (`0`) with the enforced target flux
pub fn correlation_label(slope: f64) -> i8 {
    if slope > CORRELATION_THRESHOLD {
        1
    } else if slope < -CORRELATION_THRESHOLD {
        -1
    } else {
        0
    }
}

/// Combine the flux trend and capacity trend labels into one of nine ordinal
/// reaction classes
///
/// Class 1 (both trends positive) marks the strongest amplification candidates,
/// class 9 (both neutral) the weakest
pub fn reaction_class(q_label: i8, l_label: i8) -> u8 {
    match (q_label, l_label) {
        (1, 1) => 1,
        (1, -1) => 2,
        (1, _) => 3,
        (-1, 1) => 4,
        (-1, -1) => 5,
        (-1, _) => 6,
        (_, 1) => 7,
        (_, -1) => 8,
        _ => 9,
    }
}

/// Order targets by relevance
///
/// In range mode, ascending by reaction class (lower class = stronger
/// candidate). In point mode, descending by raw `q_slope`, with reactions
/// whose fit failed sorted last.
pub fn rank_targets(targets: &mut [AmplificationTarget], use_fva: bool) {
    if use_fva {
        targets.sort_by_key(|target| target.reaction_class.unwrap_or(u8::MAX));
    } else {
        targets.sort_by(|a, b| {
            let a_slope = a.q_slope.unwrap_or(f64::NEG_INFINITY);
            let b_slope = b.q_slope.unwrap_or(f64::NEG_INFINITY);
            b_slope.total_cmp(&a_slope)
        });
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn labels() {
        assert_eq!(correlation_label(5.0), 1);
        assert_eq!(correlation_label(1.0001), 1);
        assert_eq!(correlation_label(1.0), 0);
        assert_eq!(correlation_label(0.5), 0);
        assert_eq!(correlation_label(0.0), 0);
        assert_eq!(correlation_label(-0.5), 0);
        assert_eq!(correlation_label(-1.0), 0);
        assert_eq!(correlation_label(-2.0), -1);
    }

    #[test]
    fn class_table() {
        let expected = [
            ((1, 1), 1),
            ((1, -1), 2),
            ((1, 0), 3),
            ((-1, 1), 4),
            ((-1, -1), 5),
            ((-1, 0), 6),
            ((0, 1), 7),
            ((0, -1), 8),
            ((0, 0), 9),
        ];
        for ((q, l), class) in expected {
            assert_eq!(reaction_class(q, l), class, "labels ({}, {})", q, l);
        }
    }

    #[test]
    fn classification_determinism() {
        // Fixed slopes always map to the same class
        let class = reaction_class(correlation_label(5.0), correlation_label(-2.0));
        assert_eq!(class, 2);
        let class = reaction_class(correlation_label(0.5), correlation_label(0.5));
        assert_eq!(class, 9);
    }

    #[test]
    fn rank_by_class() {
        let mut targets = vec![
            AmplificationTarget::with_class("r9", 9),
            AmplificationTarget::with_class("r1", 1),
            AmplificationTarget::with_class("r5", 5),
        ];
        rank_targets(&mut targets, true);
        let order: Vec<&str> = targets.iter().map(|t| t.reaction.as_str()).collect();
        assert_eq!(order, vec!["r1", "r5", "r9"]);
        let classes: Vec<u8> = targets.iter().filter_map(|t| t.reaction_class).collect();
        assert!(classes.windows(2).all(|pair| pair[0] <= pair[1]));
    }

    #[test]
    fn rank_by_slope() {
        let mut targets = vec![
            AmplificationTarget::new("low".to_string(), Some(-0.5), None),
            AmplificationTarget::new("failed".to_string(), None, None),
            AmplificationTarget::new("high".to_string(), Some(3.0), None),
        ];
        rank_targets(&mut targets, false);
        let order: Vec<&str> = targets.iter().map(|t| t.reaction.as_str()).collect();
        assert_eq!(order, vec!["high", "low", "failed"]);
    }
}
