use super::*;
use crate::analysis::features::{HandShape, FINGERTIPS};
use crate::error::ErrorCode;
use crate::landmarks::{Landmark, HAND_LANDMARK_COUNT};
use crate::signatures::{GestureSignature, SignatureFeatures};

/// Static left hand at a fixed position, open (all tips raised) or fist
fn hand(open: bool) -> Vec<Landmark> {
    let mut landmarks = vec![Landmark::new(0.4, 0.5, 0.2); HAND_LANDMARK_COUNT];
    if open {
        for &tip in FINGERTIPS.iter() {
            landmarks[tip].y = 0.3;
        }
    }
    landmarks
}

fn fist_frames(count: usize) -> Vec<Frame> {
    (0..count)
        .map(|_| Frame {
            left_hand: Some(hand(false)),
            ..Frame::default()
        })
        .collect()
}

fn open_frames(count: usize) -> Vec<Frame> {
    (0..count)
        .map(|_| Frame {
            left_hand: Some(hand(true)),
            ..Frame::default()
        })
        .collect()
}

fn empty_frames(count: usize) -> Vec<Frame> {
    vec![Frame::default(); count]
}

fn shape_signature(name: &str, shape: HandShape) -> GestureSignature {
    GestureSignature::new(
        name,
        SignatureFeatures {
            hand_shape: Some(shape),
            ..SignatureFeatures::default()
        },
    )
}

/// YES = fist, HELLO = open
fn create_recognizer() -> SequenceRecognizer {
    let db = SignatureDatabase::from_signatures(vec![
        shape_signature("YES", HandShape::Fist),
        shape_signature("HELLO", HandShape::Open),
    ]);
    SequenceRecognizer::with_defaults(Arc::new(db))
}

fn recognizer_with(db: SignatureDatabase, config: RecognitionConfig) -> SequenceRecognizer {
    SequenceRecognizer::new(Arc::new(db), config).expect("valid config")
}

#[test]
fn test_short_input_returns_fallback() {
    let recognizer = create_recognizer();
    for count in 0..5 {
        let report = recognizer.recognize(&fist_frames(count));
        assert_eq!(report.words, vec!["HELLO".to_string()], "{} frames", count);
        assert!(report.used_fallback);
        assert!(report.windows.is_empty());
    }
}

#[test]
fn test_output_is_never_empty_with_fallback() {
    let recognizer = create_recognizer();
    for count in [0, 3, 5, 9, 10, 14, 15, 27, 40] {
        assert!(!recognizer.recognize_sequence(&empty_frames(count)).is_empty());
        assert!(!recognizer.recognize_sequence(&fist_frames(count)).is_empty());
    }
}

#[test]
fn test_window_count_drops_short_trailing_window() {
    let recognizer = create_recognizer();
    for count in 0..=35 {
        let expected = count / 10 + usize::from(count % 10 >= 5);
        let report = recognizer.recognize(&empty_frames(count));
        assert_eq!(report.windows.len(), expected, "{} frames", count);
        assert_eq!(report.frame_count, count);
    }
}

#[test]
fn test_window_positions() {
    let recognizer = create_recognizer();
    let report = recognizer.recognize(&fist_frames(27));

    let positions: Vec<(usize, usize, usize)> = report
        .windows
        .iter()
        .map(|w| (w.window_index, w.start_frame, w.frame_count))
        .collect();
    assert_eq!(positions, vec![(0, 0, 10), (1, 10, 10), (2, 20, 7)]);
}

#[test]
fn test_consecutive_identical_words_collapse() {
    let recognizer = create_recognizer();
    let frames = fist_frames(30);
    assert_eq!(recognizer.recognize_sequence(&frames), vec!["YES".to_string()]);
}

#[test]
fn test_rejected_window_does_not_reset_dedup() {
    let recognizer = create_recognizer();
    let mut frames = fist_frames(10);
    frames.extend(empty_frames(10));
    frames.extend(fist_frames(10));

    let report = recognizer.recognize(&frames);
    assert_eq!(report.words, vec!["YES".to_string()]);
    assert_eq!(report.accepted_windows(), 2);
    assert!(!report.windows[1].result.accepted);
}

#[test]
fn test_alternating_words_are_kept() {
    let recognizer = create_recognizer();
    let mut frames = fist_frames(10);
    frames.extend(open_frames(10));
    frames.extend(fist_frames(10));

    assert_eq!(
        recognizer.recognize_sequence(&frames),
        vec!["YES".to_string(), "HELLO".to_string(), "YES".to_string()]
    );
}

#[test]
fn test_tie_break_prefers_first_signature() {
    let first = SignatureDatabase::from_signatures(vec![
        shape_signature("A", HandShape::Fist),
        shape_signature("B", HandShape::Fist),
    ]);
    let second = SignatureDatabase::from_signatures(vec![
        shape_signature("B", HandShape::Fist),
        shape_signature("A", HandShape::Fist),
    ]);

    let frames = fist_frames(10);
    let recognizer = SequenceRecognizer::with_defaults(Arc::new(first));
    assert_eq!(recognizer.recognize_sequence(&frames), vec!["A".to_string()]);

    let recognizer = SequenceRecognizer::with_defaults(Arc::new(second));
    assert_eq!(recognizer.recognize_sequence(&frames), vec!["B".to_string()]);
}

#[test]
fn test_threshold_is_strict() {
    // Shape matches (0.3) but movement is far off (0.0 of 0.3): exactly 0.5.
    let db = SignatureDatabase::from_signatures(vec![GestureSignature::new(
        "HALF",
        SignatureFeatures {
            hand_shape: Some(HandShape::Fist),
            hand_movement: Some(5.0),
            ..SignatureFeatures::default()
        },
    )]);
    let frames = fist_frames(10);

    let strict = recognizer_with(db.clone(), RecognitionConfig::default());
    let window = strict.recognize_window(&frames);
    assert_eq!(window.score, 0.5);
    assert_eq!(window.best_match.as_deref(), Some("HALF"));
    assert!(!window.accepted);
    assert_eq!(window.word(), None);
    assert_eq!(strict.recognize_sequence(&frames), vec!["HELLO".to_string()]);

    let lenient = recognizer_with(
        db,
        RecognitionConfig {
            acceptance_threshold: 0.49,
            ..RecognitionConfig::default()
        },
    );
    assert_eq!(lenient.recognize_sequence(&frames), vec!["HALF".to_string()]);
}

#[test]
fn test_empty_database_always_falls_back() {
    let recognizer = SequenceRecognizer::with_defaults(Arc::new(SignatureDatabase::empty()));
    let mut frames = fist_frames(20);
    frames.extend(open_frames(20));

    let report = recognizer.recognize(&frames);
    assert_eq!(report.words, vec!["HELLO".to_string()]);
    assert!(report.used_fallback);
    assert!(report.windows.iter().all(|w| w.result.best_match.is_none()));
    assert_eq!(report.confidence(), 0.0);
}

#[test]
fn test_disabled_fallback_returns_empty_list() {
    let recognizer = recognizer_with(
        SignatureDatabase::empty(),
        RecognitionConfig {
            fallback_word: None,
            ..RecognitionConfig::default()
        },
    );

    let report = recognizer.recognize(&fist_frames(20));
    assert!(report.words.is_empty());
    assert!(!report.used_fallback);
}

#[test]
fn test_custom_fallback_word() {
    let recognizer = recognizer_with(
        SignatureDatabase::empty(),
        RecognitionConfig {
            fallback_word: Some("NO-MATCH".to_string()),
            ..RecognitionConfig::default()
        },
    );
    assert_eq!(
        recognizer.recognize_sequence(&[]),
        vec!["NO-MATCH".to_string()]
    );
}

#[test]
fn test_custom_window_size() {
    let recognizer = recognizer_with(
        SignatureDatabase::from_signatures(vec![shape_signature("YES", HandShape::Fist)]),
        RecognitionConfig {
            window_size: 4,
            min_window_frames: 2,
            ..RecognitionConfig::default()
        },
    );

    // 4 + 4 + 1: the single trailing frame is dropped.
    let report = recognizer.recognize(&fist_frames(9));
    assert_eq!(report.windows.len(), 2);
    assert_eq!(report.words, vec!["YES".to_string()]);
}

#[test]
fn test_confidence_averages_accepted_windows() {
    let recognizer = create_recognizer();
    let mut frames = fist_frames(10);
    frames.extend(empty_frames(10));
    frames.extend(open_frames(10));

    let report = recognizer.recognize(&frames);
    assert_eq!(report.accepted_windows(), 2);
    assert_eq!(report.confidence(), 1.0);
}

#[test]
fn test_invalid_configs_are_rejected() {
    let cases = [
        (
            RecognitionConfig {
                window_size: 0,
                ..RecognitionConfig::default()
            },
            4001,
        ),
        (
            RecognitionConfig {
                acceptance_threshold: 1.5,
                ..RecognitionConfig::default()
            },
            4002,
        ),
        (
            RecognitionConfig {
                acceptance_threshold: f64::NAN,
                ..RecognitionConfig::default()
            },
            4002,
        ),
        (
            RecognitionConfig {
                min_window_frames: 0,
                ..RecognitionConfig::default()
            },
            4003,
        ),
        (
            RecognitionConfig {
                min_window_frames: 11,
                ..RecognitionConfig::default()
            },
            4003,
        ),
    ];

    for (config, code) in cases {
        match SequenceRecognizer::new(Arc::new(SignatureDatabase::empty()), config) {
            Err(err) => assert_eq!(err.code(), code, "{}", err),
            Ok(_) => panic!("expected ConfigError with code {}", code),
        }
    }
}

#[test]
fn test_recognizer_is_shareable_across_threads() {
    fn assert_send_sync<T: Send + Sync>() {}
    assert_send_sync::<SequenceRecognizer>();

    let recognizer = Arc::new(create_recognizer());
    let mut frames = fist_frames(10);
    frames.extend(open_frames(10));
    let expected = recognizer.recognize_sequence(&frames);

    std::thread::scope(|scope| {
        let handles: Vec<_> = (0..4)
            .map(|_| {
                let recognizer = Arc::clone(&recognizer);
                let frames = &frames;
                scope.spawn(move || recognizer.recognize_sequence(frames))
            })
            .collect();

        for handle in handles {
            assert_eq!(handle.join().expect("worker panicked"), expected);
        }
    });
}

#[test]
fn test_random_frames_always_produce_words() {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};

    let recognizer = create_recognizer();
    let mut rng = StdRng::seed_from_u64(0x5eed);

    for _ in 0..50 {
        let count = rng.gen_range(0..60);
        let frames: Vec<Frame> = (0..count)
            .map(|_| {
                let mut random_hand = || -> Option<Vec<Landmark>> {
                    if rng.gen_bool(0.6) {
                        let len = if rng.gen_bool(0.9) { HAND_LANDMARK_COUNT } else { 7 };
                        Some(
                            (0..len)
                                .map(|_| Landmark::new(rng.gen(), rng.gen(), rng.gen()))
                                .collect(),
                        )
                    } else {
                        None
                    }
                };
                let left_hand = random_hand();
                let right_hand = random_hand();
                Frame {
                    left_hand,
                    right_hand,
                    ..Frame::default()
                }
            })
            .collect();

        let report = recognizer.recognize(&frames);
        assert!(!report.words.is_empty());
        for pair in report.words.windows(2) {
            assert_ne!(pair[0], pair[1], "adjacent duplicates in {:?}", report.words);
        }
        for window in &report.windows {
            assert!((0.0..=1.0).contains(&window.result.score));
            assert!(window.result.features.hand_movement >= 0.0);
        }
    }
}
