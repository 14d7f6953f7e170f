//! Key normalization.
//!
//! Every key reaching the trie is a sequence of Unicode scalar values. Callers
//! hand over text in whatever form they hold it (Rust strings, UTF-8 bytes,
//! UTF-16 or UCS-4 code units) and [`TrieKey`] turns it into `char`s, or
//! reports [`TrieError::InvalidKey`] when the input does not decode.
//!
//! Narrow and wide characters share one trie: a key is split into scalar
//! values, never into encoding units, so a surrogate pair or a multi-byte
//! UTF-8 sequence always lands on a single edge.

use std::borrow::Cow;

use super::error::{TrieError, TrieResult};

/// Types that can be used as trie keys.
pub trait TrieKey {
    /// Decodes the key into scalar values.
    fn scalars(&self) -> TrieResult<Cow<'_, [char]>>;
}

impl TrieKey for str {
    fn scalars(&self) -> TrieResult<Cow<'_, [char]>> {
        Ok(Cow::Owned(self.chars().collect()))
    }
}

impl TrieKey for String {
    fn scalars(&self) -> TrieResult<Cow<'_, [char]>> {
        self.as_str().scalars()
    }
}

impl TrieKey for char {
    fn scalars(&self) -> TrieResult<Cow<'_, [char]>> {
        Ok(Cow::Borrowed(std::slice::from_ref(self)))
    }
}

impl TrieKey for [char] {
    fn scalars(&self) -> TrieResult<Cow<'_, [char]>> {
        Ok(Cow::Borrowed(self))
    }
}

impl TrieKey for Vec<char> {
    fn scalars(&self) -> TrieResult<Cow<'_, [char]>> {
        Ok(Cow::Borrowed(self.as_slice()))
    }
}

/// UTF-8 encoded bytes.
impl TrieKey for [u8] {
    fn scalars(&self) -> TrieResult<Cow<'_, [char]>> {
        let text = std::str::from_utf8(self).map_err(|e| {
            TrieError::InvalidKey(format!(
                "invalid UTF-8 at byte {}",
                e.valid_up_to()
            ))
        })?;
        Ok(Cow::Owned(text.chars().collect()))
    }
}

/// UTF-16 code units. Surrogate pairs decode to one scalar value.
impl TrieKey for [u16] {
    fn scalars(&self) -> TrieResult<Cow<'_, [char]>> {
        char::decode_utf16(self.iter().copied())
            .map(|unit| {
                unit.map_err(|e| {
                    TrieError::InvalidKey(format!(
                        "unpaired surrogate 0x{:04X}",
                        e.unpaired_surrogate()
                    ))
                })
            })
            .collect::<TrieResult<Vec<char>>>()
            .map(Cow::Owned)
    }
}

/// UCS-4 code points.
impl TrieKey for [u32] {
    fn scalars(&self) -> TrieResult<Cow<'_, [char]>> {
        self.iter()
            .map(|&point| {
                char::from_u32(point).ok_or_else(|| {
                    TrieError::InvalidKey(format!("0x{point:X} is not a Unicode scalar value"))
                })
            })
            .collect::<TrieResult<Vec<char>>>()
            .map(Cow::Owned)
    }
}

impl<K: TrieKey + ?Sized> TrieKey for &K {
    fn scalars(&self) -> TrieResult<Cow<'_, [char]>> {
        (**self).scalars()
    }
}
