use std::{collections::HashSet, thread};

use proptest::prelude::*;

use crate::*;

#[test]
fn test_sizeof() {
    assert!(size_of::<FastId>() <= 32);
    assert_eq!(size_of::<Option<FastId>>(), size_of::<FastId>());
}

#[test]
const fn test_send_sync() {
    const fn assert_send<T: Send>() {}
    const fn assert_sync<T: Sync>() {}

    assert_send::<FastId>();
    assert_sync::<FastId>();

    assert_send::<Error>();
    assert_sync::<Error>();
}

#[test]
fn test_epoch() {
    assert_eq!(epoch().duration_since(SystemTime::UNIX_EPOCH).unwrap().as_secs(), 1_735_689_600);
    assert_eq!(FastId::from_parts(0, 1).unwrap().datetime(), epoch());
}

#[test]
fn test_generate() {
    let id = FastId::generate();

    assert!(!id.is_empty());
    assert_ne!(id.to_string(), "0");
    assert!(id.datetime() <= SystemTime::now());
    assert!(id.timestamp() > 0);
    assert_eq!(id.cached_text(), None);
}

#[test]
fn test_generate_roundtrip() {
    for _ in 0..100 {
        let id = FastId::generate();
        let text = id.to_string();

        assert!(text.len() <= MAX_TEXT_LEN);
        assert_eq!(text.parse::<FastId>().map(FastId::to_i64), Ok(id.to_i64()));
    }
}

#[test]
fn test_generate_uniques() {
    let ids: HashSet<FastId> = (0..1000).map(|_| FastId::generate()).collect();
    assert!(ids.len() > 990);
}

#[test]
#[cfg_attr(miri, ignore)] // miri execution is to slow
fn test_generate_concurrently() {
    let handles: Vec<_> = (0..4)
        .map(|_| thread::spawn(|| (0..250).map(|_| FastId::generate()).collect::<Vec<_>>()))
        .collect();

    let ids: Vec<FastId> = handles.into_iter().flat_map(|h| h.join().unwrap()).collect();

    assert_eq!(ids.len(), 1000);
    assert!(ids.iter().all(|id| !id.is_empty()));
}

#[test]
fn test_parse() {
    assert_eq!("123".parse::<FastId>().map(FastId::to_i64), Ok(123));
    assert_eq!("*".parse::<FastId>(), Err(Error::InvalidChar));

    assert_eq!("O".parse::<FastId>(), "0".parse::<FastId>());
    assert_eq!("I".parse::<FastId>(), "1".parse::<FastId>());
    assert_eq!("l".parse::<FastId>(), "1".parse::<FastId>());

    assert_eq!(FastId::try_parse("*"), None);
}

#[test]
fn test_canonicalize() {
    let c1 = canonicalize("c5jp9xchp4j1").unwrap();
    assert!(matches!(c1, Cow::Owned(_)));
    assert_eq!(c1, "C5JP9XCHP4J1");

    let c2 = canonicalize(&c1).unwrap();
    assert!(matches!(c2, Cow::Borrowed(_)));
    assert_eq!(c2, "C5JP9XCHP4J1");

    // leading zeros are dropped
    assert_eq!(canonicalize("000ABC"), Ok(canonicalize("ABC").unwrap()));
    assert_eq!(canonicalize("0"), Ok("0".into()));

    assert_eq!(canonicalize("*"), Err(Error::InvalidChar));
    assert_eq!(canonicalize(""), Err(Error::Malformed));
}

#[test]
fn test_validate() {
    assert!(validate("FZZZZZZZZZZZZ").is_ok());
    assert!(validate("fzzzzzzzzzzzz").is_ok());
    assert!(validate("oooo").is_ok());
    assert!(validate("iiii").is_ok());
    assert!(validate("LLLL").is_ok());

    assert_eq!(validate("GZZZZZZZZZZZZ"), Err(Error::Overflow));
    assert_eq!(validate("UUUU"), Err(Error::InvalidChar));
    assert_eq!(validate("ABCDEFGHJKMNPQ"), Err(Error::Malformed));
    assert_eq!(validate("\t"), Err(Error::Malformed));
}

#[test]
fn test_derivation_from_fixed_uuid_at_epoch() {
    let uuid = uuid::uuid!("1a721394-6a63-4a55-89e5-8246c63749d2");

    let id = FastId::from_uuid_within(uuid, epoch()).unwrap();

    assert_eq!(id.timestamp(), 0);
    assert_eq!(id, FastId::from_uuid_within(uuid, epoch()).unwrap());
}

#[test]
fn test_derivation_from_random_uuid_at_epoch() {
    let id = FastId::from_uuid_within(uuid::Uuid::new_v4(), epoch()).unwrap();
    assert_eq!(id.datetime(), epoch());
}

#[test]
fn test_derivation_extreme_uuids() {
    let max_timestamp = epoch() + Duration::from_secs(16_848_000);

    for uuid in [uuid::Uuid::nil(), uuid::Uuid::from_u128(u128::MAX)] {
        let id = FastId::from_uuid_within(uuid, max_timestamp).unwrap();
        assert!(id.datetime() >= epoch());
        assert!(id.datetime() <= max_timestamp);
    }
}

proptest! {
    #[test]
    fn derived_uuid_stays_within_bounds(uuid in any::<u128>(), max in 0..=TIMESTAMP_MAX) {
        let max_timestamp = epoch() + Duration::from_secs(max);
        let id = FastId::from_uuid_within(uuid::Uuid::from_u128(uuid), max_timestamp).unwrap();

        prop_assert!(id.timestamp() <= max);
        prop_assert_eq!(id, FastId::from_uuid_within(uuid::Uuid::from_u128(uuid), max_timestamp).unwrap());
    }

    #[test]
    fn derived_key_stays_within_bounds(key in ".+", max in 0..=TIMESTAMP_MAX) {
        let max_timestamp = epoch() + Duration::from_secs(max);
        let id = FastId::from_str_within(&key, max_timestamp).unwrap();

        prop_assert!(id.datetime() >= epoch());
        prop_assert!(id.datetime() <= max_timestamp);
    }

    #[test]
    fn parse_inverts_display(raw in any::<i64>()) {
        let id = FastId::from_i64(raw);
        let text = id.to_string();

        // all-digit tokens are read as decimal literals
        prop_assume!(!text.bytes().all(|b| b.is_ascii_digit()));

        prop_assert_eq!(text.parse::<FastId>().map(FastId::to_i64), Ok(raw));
        prop_assert_eq!(text.to_lowercase().parse::<FastId>().map(FastId::to_i64), Ok(raw));
    }

    #[test]
    fn decimal_literal_is_raw_value(raw in any::<i64>()) {
        let text = raw.to_string();
        let id: FastId = text.parse().unwrap();

        prop_assert_eq!(id.to_i64(), raw);
        prop_assert_eq!(id.to_string(), text);
    }
}
