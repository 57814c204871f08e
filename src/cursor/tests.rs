//! Tests for cursor module

use super::*;
use crate::error::Error;
use bson::oid::ObjectId;
use bson::Bson;

// ============================================================================
// Decode Tests
// ============================================================================

#[test]
fn test_decode_forward_int() {
    let cursor = Cursor::<i64>::decode("10").unwrap();
    assert_eq!(cursor.direction, Direction::Forward);
    assert_eq!(cursor.key, 10);
    assert!(!cursor.is_backward());
}

#[test]
fn test_decode_backward_int() {
    let cursor = Cursor::<i64>::decode("prev_11").unwrap();
    assert_eq!(cursor.direction, Direction::Backward);
    assert_eq!(cursor.key, 11);
    assert!(cursor.is_backward());
}

#[test]
fn test_decode_object_id() {
    let oid = ObjectId::parse_str("65a1b2c3d4e5f60718293a4b").unwrap();

    let cursor = Cursor::<ObjectId>::decode("65a1b2c3d4e5f60718293a4b").unwrap();
    assert_eq!(cursor, Cursor::forward(oid));

    let cursor = Cursor::<ObjectId>::decode("prev_65a1b2c3d4e5f60718293a4b").unwrap();
    assert_eq!(cursor, Cursor::backward(oid));
}

#[test]
fn test_decode_invalid_object_id() {
    let err = Cursor::<ObjectId>::decode("prev_not-an-id").unwrap_err();
    match err {
        Error::InvalidCursor { cursor } => assert_eq!(cursor, "prev_not-an-id"),
        other => panic!("Expected InvalidCursor, got {other:?}"),
    }

    assert!(Cursor::<ObjectId>::decode("").is_err());
    assert!(Cursor::<ObjectId>::decode("prev_").is_err());
    assert!(Cursor::<ObjectId>::decode("65a1b2c3d4e5f60718293a4").is_err());
}

#[test]
fn test_decode_rejects_non_canonical_ints() {
    assert!(Cursor::<i64>::decode("+5").is_err());
    assert!(Cursor::<i64>::decode("05").is_err());
    assert!(Cursor::<i64>::decode("five").is_err());
    assert!(Cursor::<i32>::decode("99999999999").is_err());
}

#[test]
fn test_decode_only_strips_one_prefix() {
    // "prev_prev_3" leaves "prev_3" as the key, which is not an integer
    assert!(Cursor::<i64>::decode("prev_prev_3").is_err());
}

// ============================================================================
// Encode Tests
// ============================================================================

#[test]
fn test_encode() {
    assert_eq!(Cursor::forward(20_i64).encode(), "20");
    assert_eq!(Cursor::backward(1_i64).encode(), "prev_1");
    assert_eq!(Cursor::backward(-4_i32).to_string(), "prev_-4");
}

#[test]
fn test_codec_round_trip() {
    let oid = ObjectId::new();
    for cursor in [Cursor::forward(oid), Cursor::backward(oid)] {
        assert_eq!(Cursor::<ObjectId>::decode(&cursor.encode()).unwrap(), cursor);
    }

    for key in [i64::MIN, -1, 0, 7, i64::MAX] {
        for cursor in [Cursor::forward(key), Cursor::backward(key)] {
            assert_eq!(Cursor::<i64>::decode(&cursor.encode()).unwrap(), cursor);
        }
    }
}

#[test]
fn test_boundary_token() {
    assert_eq!(boundary_token(Direction::Forward, Some(&10_i64)), Some("10".to_string()));
    assert_eq!(
        boundary_token(Direction::Backward, Some(&1_i64)),
        Some("prev_1".to_string())
    );
    assert_eq!(boundary_token::<i64>(Direction::Forward, None), None);
}

// ============================================================================
// Key Conversion Tests
// ============================================================================

#[test]
fn test_key_from_bson() {
    assert_eq!(i64::from_bson(&Bson::Int32(3)), Some(3));
    assert_eq!(i64::from_bson(&Bson::Int64(3)), Some(3));
    assert_eq!(i64::from_bson(&Bson::String("3".into())), None);

    assert_eq!(i32::from_bson(&Bson::Int64(3)), Some(3));
    assert_eq!(i32::from_bson(&Bson::Int64(i64::MAX)), None);

    let oid = ObjectId::new();
    assert_eq!(ObjectId::from_bson(&Bson::ObjectId(oid)), Some(oid));
    assert_eq!(ObjectId::from_bson(&Bson::Int32(1)), None);
}

#[test]
fn test_key_to_bson() {
    assert_eq!(5_i64.to_bson(), Bson::Int64(5));
    assert_eq!(5_i32.to_bson(), Bson::Int32(5));
}
