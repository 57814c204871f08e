//! Primary-key types usable in cursor tokens

use bson::oid::ObjectId;
use bson::Bson;

/// A primary-key type that can be carried inside a cursor token.
///
/// Implementations need a canonical string form (`encode_key` followed by
/// `parse_key` gives the same value back) and a lossless mapping to and from
/// BSON so the key can be read off returned documents and written into filters.
pub trait CursorKey: Sized + Clone + PartialEq + std::fmt::Debug + Send + Sync {
    /// Parse the canonical string form, `None` if malformed
    fn parse_key(s: &str) -> Option<Self>;

    /// Canonical string form
    fn encode_key(&self) -> String;

    /// Read the key from a BSON value, `None` on a type mismatch
    fn from_bson(value: &Bson) -> Option<Self>;

    /// BSON value used in keyset filters
    fn to_bson(&self) -> Bson;
}

impl CursorKey for ObjectId {
    fn parse_key(s: &str) -> Option<Self> {
        ObjectId::parse_str(s).ok()
    }

    fn encode_key(&self) -> String {
        self.to_hex()
    }

    fn from_bson(value: &Bson) -> Option<Self> {
        match value {
            Bson::ObjectId(oid) => Some(*oid),
            _ => None,
        }
    }

    fn to_bson(&self) -> Bson {
        Bson::ObjectId(*self)
    }
}

impl CursorKey for i64 {
    fn parse_key(s: &str) -> Option<Self> {
        // Reject "+5" and "05" so every key has exactly one token
        let parsed: i64 = s.parse().ok()?;
        (parsed.to_string() == s).then_some(parsed)
    }

    fn encode_key(&self) -> String {
        self.to_string()
    }

    fn from_bson(value: &Bson) -> Option<Self> {
        match value {
            Bson::Int64(v) => Some(*v),
            Bson::Int32(v) => Some(i64::from(*v)),
            _ => None,
        }
    }

    fn to_bson(&self) -> Bson {
        Bson::Int64(*self)
    }
}

impl CursorKey for i32 {
    fn parse_key(s: &str) -> Option<Self> {
        let parsed: i32 = s.parse().ok()?;
        (parsed.to_string() == s).then_some(parsed)
    }

    fn encode_key(&self) -> String {
        self.to_string()
    }

    fn from_bson(value: &Bson) -> Option<Self> {
        match value {
            Bson::Int32(v) => Some(*v),
            Bson::Int64(v) => i32::try_from(*v).ok(),
            _ => None,
        }
    }

    fn to_bson(&self) -> Bson {
        Bson::Int32(*self)
    }
}
