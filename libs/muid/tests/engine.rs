//! End-to-end behavior of the public entry points.

use std::collections::HashSet;
use std::sync::atomic::{AtomicU64, Ordering};
use std::sync::Arc;

use muid::{
    Alphabet, Clock, MemorySequence, MuidConfig, MuidFactory, SignatureAlgorithm, Strategy,
    GLOBAL_KEY,
};
use proptest::prelude::*;

#[derive(Debug)]
struct ManualClock(AtomicU64);

impl ManualClock {
    fn at(ms: u64) -> Arc<Self> {
        Arc::new(Self(AtomicU64::new(ms)))
    }

    fn set(&self, ms: u64) {
        self.0.store(ms, Ordering::SeqCst);
    }
}

impl Clock for ManualClock {
    fn now_ms(&self) -> u64 {
        self.0.load(Ordering::SeqCst)
    }
}

fn factory() -> MuidFactory {
    MuidFactory::new(MuidConfig::default()).unwrap()
}

fn signed_factory(algorithm: SignatureAlgorithm) -> MuidFactory {
    let mut config = MuidConfig::default();
    config.signature.enabled = true;
    config.signature.algorithm = algorithm;
    config.signature.secret = "s3cret".into();
    MuidFactory::new(config).unwrap()
}

#[test]
fn test_roundtrip_every_strategy() {
    let f = factory();
    for strategy in Strategy::ALL {
        let muid = f.generate("usr", Some(strategy), None).unwrap();
        let parsed = f.parse(&muid, Some(strategy)).unwrap();
        assert_eq!(parsed.to_string(), muid);
        assert_eq!(parsed.strategy(), strategy);
        assert!(f.is_valid(&muid, Some("usr"), Some(strategy)));
    }
}

#[test]
fn test_incremental_sequence() {
    let f = factory();
    f.set_sequence("ord", 0);
    let ids: Vec<String> = (0..3)
        .map(|_| f.generate("ord", Some(Strategy::Incremental), None).unwrap())
        .collect();
    assert_eq!(ids, ["ord_1", "ord_2", "ord_3"]);
}

#[test]
fn test_padded_sequence_and_overflow() {
    let f = factory();
    f.set_sequence("inv", 0);
    assert_eq!(f.generate("inv", Some(Strategy::Padded), None).unwrap(), "inv_0000001");
    assert_eq!(f.generate("inv", Some(Strategy::Padded), None).unwrap(), "inv_0000002");

    f.set_sequence("inv", 9_999_999);
    let err = f.generate("inv", Some(Strategy::Padded), None).unwrap_err();
    assert!(err.is_overflow());
}

#[test]
fn test_rejections() {
    let f = factory();
    for muid in ["", "usr", "usr_", "1usr_body", "us__body"] {
        assert!(!f.is_valid(muid, None, None), "{muid:?} should be invalid");
        assert!(f.parse(muid, None).is_none(), "{muid:?} should not parse");
    }
}

#[test]
fn test_non_ascii_prefixes_rejected() {
    let f = factory();
    for prefix in ["\u{212A}ey", "u\u{17F}r"] {
        for strategy in Strategy::ALL {
            let err = f.generate(prefix, Some(strategy), None).unwrap_err();
            assert!(err.is_invalid_input(), "{prefix:?} {strategy}");
        }
        assert!(!f.is_valid(&format!("{prefix}_1"), None, None));
        assert!(!f.is_valid(&format!("{prefix}_0OjWdK4gABCD"), None, None));
        assert!(f.parse(&format!("{prefix}_0000001"), None).is_none());
    }
}

#[test]
fn test_signed_engine_accepts_unsigned_short_body() {
    let f = signed_factory(SignatureAlgorithm::Crc32);
    let parsed = f.parse("usr_0OjWdK4gABCD", Some(Strategy::Ordered)).unwrap();
    assert_eq!(parsed.random(), Some("ABCD"));
    assert_eq!(parsed.signature(), None);
    assert!(f.is_valid("usr_0OjWdK4gABCD", Some("usr"), None));
}

#[test]
fn test_mixed_counter_strategies_do_not_skip() {
    let f = factory();
    assert_eq!(f.generate("ord", Some(Strategy::Incremental), None).unwrap(), "ord_1");
    assert_eq!(f.generate("ord", Some(Strategy::Padded), None).unwrap(), "ord_0000001");
    assert_eq!(f.generate("ord", Some(Strategy::Incremental), None).unwrap(), "ord_2");
}

#[test]
fn test_ordered_bodies_sort_with_time() {
    let clock = ManualClock::at(1_705_000_000_000);
    let f = factory().with_clock(clock.clone());

    let first = f.generate("usr", None, None).unwrap();
    clock.set(1_705_000_000_001);
    let second = f.generate("usr", None, None).unwrap();
    clock.set(1_805_000_000_000);
    let third = f.generate("usr", None, None).unwrap();

    assert!(first[4..12] < second[4..12]);
    assert!(second[4..12] < third[4..12]);
    assert_eq!(f.parse(&second, None).unwrap().timestamp(), Some(1_705_000_000_001));
}

#[test]
fn test_ordered_ids_are_unique() {
    let f = factory();
    let ids: HashSet<String> = (0..1000)
        .map(|_| f.generate("usr", None, None).unwrap())
        .collect();
    assert_eq!(ids.len(), 1000);
}

#[test]
fn test_signed_ids() {
    for algorithm in [SignatureAlgorithm::Crc32, SignatureAlgorithm::Sha256] {
        let f = signed_factory(algorithm);
        let muid = f.generate("usr", None, None).unwrap();
        assert_eq!(muid.len(), 36);

        let parsed = f.parse(&muid, None).unwrap();
        assert!(parsed.has_signature());
        assert!(f.is_valid(&muid, Some("usr"), None));

        // Same body under another prefix carries the wrong signature.
        let moved = muid.replacen("usr", "cus", 1);
        assert!(!f.is_valid(&moved, None, None));

        // A different secret rejects it too.
        let mut config = f.config().clone();
        config.signature.secret = "another".into();
        let other = MuidFactory::new(config).unwrap();
        assert!(!other.is_valid(&muid, None, None));
    }
}

#[test]
fn test_base36_engine() {
    let mut config = MuidConfig::default();
    config.encoding = Alphabet::Base36;
    let f = MuidFactory::new(config).unwrap();

    let muid = f.generate("usr", None, None).unwrap();
    let body = f.extract_body(&muid).unwrap();
    assert!(body.bytes().all(|b| b.is_ascii_digit() || b.is_ascii_lowercase()));
    assert!(f.is_valid(&muid, None, None));
    assert!(!f.is_valid("usr_0OJWDK4GABCD", None, None));
}

#[test]
fn test_seeded_external_counter() {
    let counter = Arc::new(MemorySequence::with_seed(|key: &str| match key {
        "ord" => 500,
        _ => 0,
    }));
    let f = factory().with_sequences(counter.clone());

    assert_eq!(f.generate("ord", Some(Strategy::Incremental), None).unwrap(), "ord_501");
    assert_eq!(f.generate("inv", Some(Strategy::Padded), None).unwrap(), "inv_0000001");
    assert_eq!(counter.current("ord"), Some(501));
}

#[test]
fn test_global_sequencing() {
    let mut config = MuidConfig::default();
    config.incremental.per_prefix = false;
    let counter = Arc::new(MemorySequence::new());
    let f = MuidFactory::new(config).unwrap().with_sequences(counter.clone());

    assert_eq!(f.generate("ord", Some(Strategy::Incremental), None).unwrap(), "ord_1");
    assert_eq!(f.generate("inv", Some(Strategy::Incremental), None).unwrap(), "inv_2");
    f.set_sequence("anything", 10);
    assert_eq!(counter.current(GLOBAL_KEY), Some(10));
}

#[test]
fn test_concurrent_sequences_never_repeat() {
    let f = Arc::new(factory());
    let handles: Vec<_> = (0..8)
        .map(|_| {
            let f = Arc::clone(&f);
            std::thread::spawn(move || {
                (0..200)
                    .map(|_| f.generate("ord", Some(Strategy::Incremental), None).unwrap())
                    .collect::<Vec<_>>()
            })
        })
        .collect();

    let ids: HashSet<String> = handles
        .into_iter()
        .flat_map(|h| h.join().unwrap())
        .collect();
    assert_eq!(ids.len(), 1600);
    assert!(ids.contains("ord_1600"));
}

#[test]
fn test_default_strategy_from_config() {
    let mut config = MuidConfig::default();
    config.default_strategy = Strategy::Padded;
    let f = MuidFactory::new(config).unwrap();
    assert_eq!(f.generate("inv", None, None).unwrap(), "inv_0000001");
}

#[test]
fn test_decimal_ordered_body_is_misdetected() {
    // Auto-detection cannot tell an all-digit ordered body from a counter.
    let f = factory();
    let muid = "usr_000000011234";
    assert_eq!(f.parse(muid, None).unwrap().strategy(), Strategy::Padded);
    assert_eq!(
        f.parse(muid, Some(Strategy::Ordered)).unwrap().timestamp(),
        Some(1)
    );
}

fn prefix_strategy() -> impl proptest::strategy::Strategy<Value = String> {
    "[a-z][a-z0-9]{1,7}"
}

fn muid_strategy() -> impl proptest::strategy::Strategy<Value = Strategy> {
    prop_oneof![
        Just(Strategy::Ordered),
        Just(Strategy::Incremental),
        Just(Strategy::Padded),
    ]
}

proptest! {
    #[test]
    fn prop_generate_parse_roundtrip(prefix in prefix_strategy(), strategy in muid_strategy()) {
        let f = factory();
        let muid = f.generate(&prefix, Some(strategy), None).unwrap();
        let parsed = f.parse(&muid, Some(strategy)).unwrap();
        prop_assert_eq!(parsed.to_string(), muid.clone());
        prop_assert_eq!(parsed.prefix(), prefix.as_str());
        prop_assert!(f.is_valid(&muid, Some(&prefix), Some(strategy)));
    }

    #[test]
    fn prop_length_bound(prefix in prefix_strategy(), strategy in muid_strategy(), extra in 0usize..40) {
        let f = factory();
        // Smallest length every strategy can satisfy for this prefix.
        let max_length = prefix.len() + 1 + muid::TIMESTAMP_LENGTH + muid::MIN_RANDOM_LENGTH + extra;
        let muid = f.generate(&prefix, Some(strategy), Some(max_length)).unwrap();
        prop_assert!(muid.len() <= max_length);
    }
}
