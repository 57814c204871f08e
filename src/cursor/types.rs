//! Cursor token types

use super::key::CursorKey;
use crate::error::{Error, Result};
use std::fmt;

/// Prefix marking a backward token
pub const BACKWARD_PREFIX: &str = "prev_";

/// Which way a cursor continues from its key
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Direction {
    /// Items with a greater key, ascending
    Forward,
    /// Items with a smaller key, fetched descending
    Backward,
}

/// A decoded cursor token
#[derive(Debug, Clone, PartialEq)]
pub struct Cursor<K> {
    /// Direction to continue in
    pub direction: Direction,
    /// Boundary key (exclusive)
    pub key: K,
}

impl<K: CursorKey> Cursor<K> {
    /// Cursor continuing after `key`
    pub fn forward(key: K) -> Self {
        Self {
            direction: Direction::Forward,
            key,
        }
    }

    /// Cursor continuing before `key`
    pub fn backward(key: K) -> Self {
        Self {
            direction: Direction::Backward,
            key,
        }
    }

    /// Decode a `[prev_]<key>` token
    pub fn decode(token: &str) -> Result<Self> {
        let (direction, raw_key) = match token.strip_prefix(BACKWARD_PREFIX) {
            Some(rest) => (Direction::Backward, rest),
            None => (Direction::Forward, token),
        };

        let key = K::parse_key(raw_key).ok_or_else(|| Error::invalid_cursor(token))?;
        Ok(Self { direction, key })
    }

    /// Encode back into a token
    pub fn encode(&self) -> String {
        match self.direction {
            Direction::Forward => self.key.encode_key(),
            Direction::Backward => format!("{BACKWARD_PREFIX}{}", self.key.encode_key()),
        }
    }

    /// Whether this cursor walks backward
    pub fn is_backward(&self) -> bool {
        self.direction == Direction::Backward
    }
}

impl<K: CursorKey> fmt::Display for Cursor<K> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(&self.encode())
    }
}

/// Token for a window boundary, `None` when there is no boundary item
pub fn boundary_token<K: CursorKey>(direction: Direction, key: Option<&K>) -> Option<String> {
    key.map(|key| {
        Cursor {
            direction,
            key: key.clone(),
        }
        .encode()
    })
}
