//! Binary snapshot format for word sets
//!
//! A snapshot is a pre-order walk of the tree, all integers little-endian:
//!
//! ```text
//! node := tag:i8 [ weight:i64 key_len:i64 key:[u8; key_len] node(left) node(right) ]
//! tag  := 0 (absent) | 1 (present)
//! ```
//!
//! Only words and weights are stored; the cached aggregates are recomputed on
//! load and the decoded tree is validated before it is handed out. Any stream
//! describing a valid ordered, balanced tree is accepted, whatever its shape.

use super::node::{self, Link, Node};
use super::{WeightedWord, WeightedWordSet};
use crate::{CoreError, Result};
use bytes::{Buf, BufMut, Bytes, BytesMut};
use std::io::{Read, Write};
use tracing::instrument;

/// Tag for an absent subtree
pub const TAG_ABSENT: i8 = 0;

/// Tag for a node followed by its payload and both subtrees
pub const TAG_PRESENT: i8 = 1;

/// Deepest nesting accepted while decoding
///
/// A balanced tree holding `i64::MAX` words is well under this depth, so
/// anything deeper cannot pass validation anyway.
pub const MAX_DECODE_DEPTH: usize = 128;

impl WeightedWordSet {
    /// Encode this set into a snapshot
    pub fn to_bytes(&self) -> Bytes {
        let mut buf = BytesMut::with_capacity(self.encoded_len_hint());
        encode_link(&self.root, &mut buf);
        buf.freeze()
    }

    /// Write a snapshot of this set
    pub fn serialize<W: Write>(&self, out: &mut W) -> Result<()> {
        out.write_all(&self.to_bytes())?;
        Ok(())
    }

    /// Decode a snapshot held in memory
    #[instrument(skip(data), fields(bytes = data.len()))]
    pub fn from_bytes(data: &[u8]) -> Result<Self> {
        let mut buf = data;
        let root = decode_link(&mut buf, 0)?;
        if buf.has_remaining() {
            return Err(CoreError::Deserialization(format!(
                "{} trailing bytes after snapshot",
                buf.remaining()
            )));
        }

        let set = Self { root };
        set.check()?;
        tracing::debug!(words = set.len(), height = set.height(), "Decoded word set snapshot");
        Ok(set)
    }

    /// Read a snapshot until the end of `input`
    pub fn deserialize<R: Read>(mut input: R) -> Result<Self> {
        let mut data = Vec::new();
        input.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    fn encoded_len_hint(&self) -> usize {
        // Per word: tag, weight, length, two child tags at most; keys average short.
        1 + self.len() * (1 + 8 + 8 + 8)
    }
}

fn encode_link(link: &Link, buf: &mut BytesMut) {
    let Some(node) = link else {
        buf.put_i8(TAG_ABSENT);
        return;
    };
    buf.put_i8(TAG_PRESENT);
    buf.put_i64_le(node.entry.weight);
    buf.put_i64_le(node.entry.word.len() as i64);
    buf.put_slice(node.entry.word.as_bytes());
    encode_link(&node.left, buf);
    encode_link(&node.right, buf);
}

fn decode_link(buf: &mut &[u8], depth: usize) -> Result<Link> {
    if depth > MAX_DECODE_DEPTH {
        return Err(CoreError::Deserialization(format!(
            "snapshot nests deeper than {MAX_DECODE_DEPTH} levels"
        )));
    }

    ensure_remaining(buf, 1)?;
    match buf.get_i8() {
        TAG_ABSENT => return Ok(None),
        TAG_PRESENT => {}
        tag => return Err(CoreError::UnknownTag(tag)),
    }

    ensure_remaining(buf, 16)?;
    let weight = buf.get_i64_le();
    let key_len = buf.get_i64_le();
    let key_len = usize::try_from(key_len)
        .map_err(|_| CoreError::Deserialization(format!("negative key length {key_len}")))?;
    ensure_remaining(buf, key_len)?;
    let word = String::from_utf8(buf[..key_len].to_vec())
        .map_err(|e| CoreError::Deserialization(format!("key is not UTF-8: {e}")))?;
    buf.advance(key_len);

    let left = decode_link(buf, depth + 1)?;
    let right = decode_link(buf, depth + 1)?;

    weight
        .checked_add(node::total_weight(&left))
        .and_then(|w| w.checked_add(node::total_weight(&right)))
        .ok_or_else(|| CoreError::WeightOverflow(format!("subtree total at {word:?}")))?;

    Ok(Some(Node::with_children(WeightedWord { word, weight }, left, right)))
}

fn ensure_remaining(buf: &&[u8], needed: usize) -> Result<()> {
    if buf.remaining() < needed {
        return Err(CoreError::TruncatedSnapshot {
            needed,
            remaining: buf.remaining(),
        });
    }
    Ok(())
}
