use crate::shared::error::DdgError;
use std::collections::BTreeSet;

/// URL-safe symbol alphabet; symbol `i` encodes the 6-bit group value `i`
const ALPHABET: &[u8; 64] = b"ABCDEFGHIJKLMNOPQRSTUVWXYZabcdefghijklmnopqrstuvwxyz0123456789-_";

/// Number of visibility indices packed into one symbol
const GROUP_BITS: usize = 6;

/// Canonical key for the empty set: a single all-zero group
pub const EMPTY_KEY: &str = "A";

/// Upper bound on accepted key length (393,216 indices)
pub const MAX_KEY_LENGTH: usize = 64 * 1024;

/// VisibilityCodec service: lossless conversion between a set of visibility
/// indices and a compact key that can sit unescaped in a URL query value
///
/// Layout: the set is a bitset over `[0, max]`. Bit `i` lives in group `i / 6`
/// at bit position `i % 6`; each group is written as one symbol of `ALPHABET`,
/// lowest group first. Trailing all-zero groups are never written, so every
/// non-empty key ends in a non-`A` symbol and each set has exactly one key.
pub struct VisibilityCodec;

impl VisibilityCodec {
    /// Encodes a set of visibility indices into a key
    ///
    /// Duplicates and ordering of `indices` do not affect the result.
    pub fn encode<I>(indices: I) -> String
    where
        I: IntoIterator<Item = usize>,
    {
        let mut groups: Vec<u8> = Vec::new();
        for idx in indices {
            let group = idx / GROUP_BITS;
            if group >= groups.len() {
                groups.resize(group + 1, 0);
            }
            groups[group] |= 1 << (idx % GROUP_BITS);
        }

        // Groups are only allocated up to the largest index, so the last one is never zero.
        if groups.is_empty() {
            return EMPTY_KEY.to_string();
        }

        groups
            .into_iter()
            .map(|group| ALPHABET[usize::from(group)] as char)
            .collect()
    }

    /// Decodes a key back into the set of visibility indices it encodes
    ///
    /// # Errors
    /// Returns `DdgError::MalformedKey` when the key:
    /// - is empty or longer than `MAX_KEY_LENGTH`
    /// - contains a character outside the URL-safe alphabet
    /// - ends with an all-zero group (non-canonical padding)
    pub fn decode(key: &str) -> Result<BTreeSet<usize>, DdgError> {
        let mut indices = BTreeSet::new();
        Self::decode_each(key, |idx| {
            indices.insert(idx);
        })?;
        Ok(indices)
    }

    /// Validates `key`, then calls `visit` with each index it encodes in
    /// ascending order
    ///
    /// Nothing is visited when the key is rejected. Lets callers filter or
    /// count indices without holding the whole set.
    ///
    /// # Errors
    /// Same as [`VisibilityCodec::decode`].
    pub fn decode_each<F>(key: &str, mut visit: F) -> Result<(), DdgError>
    where
        F: FnMut(usize),
    {
        let groups = Self::groups(key)?;
        for (position, value) in groups.into_iter().enumerate() {
            for bit in 0..GROUP_BITS {
                if value & (1 << bit) != 0 {
                    visit(position * GROUP_BITS + bit);
                }
            }
        }
        Ok(())
    }

    /// Checks `key` without materializing its indices
    ///
    /// # Errors
    /// Same as [`VisibilityCodec::decode`].
    pub fn validate(key: &str) -> Result<(), DdgError> {
        Self::groups(key).map(|_| ())
    }

    /// Returns true when `key` decodes without error
    pub fn is_valid(key: &str) -> bool {
        Self::validate(key).is_ok()
    }

    /// Group values of a well-formed key, lowest group first
    fn groups(key: &str) -> Result<Vec<u8>, DdgError> {
        if key.is_empty() {
            return Err(DdgError::malformed_key(key, "key is empty"));
        }
        if key.len() > MAX_KEY_LENGTH {
            return Err(DdgError::malformed_key(
                &key[..key.char_indices().nth(32).map_or(key.len(), |(i, _)| i)],
                format!(
                    "key is {} bytes long; the maximum is {} bytes",
                    key.len(),
                    MAX_KEY_LENGTH
                ),
            ));
        }
        if key == EMPTY_KEY {
            return Ok(Vec::new());
        }

        let groups = key
            .chars()
            .enumerate()
            .map(|(position, ch)| {
                symbol_value(ch).ok_or_else(|| {
                    DdgError::malformed_key(
                        key,
                        format!("invalid character {:?} at position {}", ch, position),
                    )
                })
            })
            .collect::<Result<Vec<u8>, DdgError>>()?;

        if groups.last() == Some(&0) {
            return Err(DdgError::malformed_key(
                key,
                "key ends with an empty group; trailing 'A' symbols are not canonical",
            ));
        }

        Ok(groups)
    }
}

fn symbol_value(ch: char) -> Option<u8> {
    let value = match ch {
        'A'..='Z' => ch as u8 - b'A',
        'a'..='z' => ch as u8 - b'a' + 26,
        '0'..='9' => ch as u8 - b'0' + 52,
        '-' => 62,
        '_' => 63,
        _ => return None,
    };
    Some(value)
}
