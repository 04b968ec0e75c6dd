#![allow(dead_code)]

use framecheck::framing::{CONFIDENCE_THRESHOLD, MIN_HEIGHT_RATIO};
use framecheck::pose::{Keypoint, KeypointLabel, KeypointSet};
use proptest::prelude::*;
use proptest::test_runner::{Config as ProptestConfig, FileFailurePersistence};

pub fn proptest_config() -> ProptestConfig {
    let cases = std::env::var("PROPTEST_CASES")
        .ok()
        .and_then(|v| v.parse::<u32>().ok())
        .unwrap_or(256);

    let mut config = ProptestConfig::with_failure_persistence(FileFailurePersistence::WithSource(
        "proptest-regressions",
    ));
    config.cases = cases;
    config.max_shrink_iters = 1024;
    config
}

/// Any keypoint, including positions slightly outside the frame.
pub fn arb_keypoint() -> impl Strategy<Value = Keypoint> {
    (-0.1f64..1.1, -0.1f64..1.1, 0.0f64..=1.0).prop_map(|(x, y, c)| Keypoint::new(x, y, c))
}

/// A confidence that clears the visibility threshold.
pub fn visible_confidence() -> impl Strategy<Value = f64> {
    (CONFIDENCE_THRESHOLD + 1e-6)..=1.0
}

/// A confidence at or below the visibility threshold.
pub fn hidden_confidence() -> impl Strategy<Value = f64> {
    prop_oneof![0.0f64..CONFIDENCE_THRESHOLD, Just(CONFIDENCE_THRESHOLD)]
}

/// A keypoint set with every keypoint drawn independently.
pub fn arb_keypoint_set() -> impl Strategy<Value = KeypointSet> {
    proptest::collection::vec(arb_keypoint(), KeypointLabel::COUNT).prop_map(|kps| {
        let mut set = KeypointSet::default();
        for (label, kp) in KeypointLabel::ALL.into_iter().zip(kps) {
            set.set(label, kp);
        }
        set
    })
}

/// A keypoint set that satisfies every framing rule with some margin.
///
/// At least one ankle is visible; an invisible ankle may sit anywhere.
pub fn arb_well_framed_set() -> impl Strategy<Value = KeypointSet> {
    (
        arb_keypoint_set(),
        visible_confidence(),
        0.05f64..0.55,
        (MIN_HEIGHT_RATIO + 0.01)..0.9,
        visible_confidence(),
        prop_oneof![visible_confidence(), hidden_confidence()],
        0.0f64..=1.0,
        any::<bool>(),
    )
        .prop_filter_map(
            "lowest ankle must stay inside the bottom margin",
            |(base, nose_conf, nose_y, span, main_conf, other_conf, other_frac, swap)| {
                let ankle_y = nose_y + span;
                if ankle_y > 0.95 {
                    return None;
                }
                // A visible second ankle must not sit lower than the main one.
                let other_y = if other_conf > CONFIDENCE_THRESHOLD {
                    nose_y + span * other_frac
                } else {
                    other_frac
                };
                let (left, right) = if swap {
                    ((other_conf, other_y), (main_conf, ankle_y))
                } else {
                    ((main_conf, ankle_y), (other_conf, other_y))
                };
                Some(
                    base.with(KeypointLabel::Nose, Keypoint::new(0.5, nose_y, nose_conf))
                        .with(KeypointLabel::LeftAnkle, Keypoint::new(0.45, left.1, left.0))
                        .with(KeypointLabel::RightAnkle, Keypoint::new(0.55, right.1, right.0)),
                )
            },
        )
}
