//! Name labels.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use super::NameError;
use crate::base::node::LabelHash;
use alloy_primitives::hex;
use std::borrow::Cow;

//------------ Normalization -------------------------------------------------

/// Normalizes a single label.
///
/// Returns the label unchanged if it already is in normal form. Encoded
/// label hashes are accepted and have their hex digits lowercased.
pub fn normalize_label(label: &str) -> Result<Cow<'_, str>, NameError> {
    if label.is_empty() {
        return Err(NameError::EmptyLabel);
    }
    if is_encoded_labelhash(label) {
        return Ok(lowercase(label));
    }
    check_chars(label)?;

    // Letters, digits, and hyphens only map to their lowercase selves
    // unless the label carries the ACE prefix and needs decoding.
    if label.is_ascii() && !has_ace_prefix(label) {
        return Ok(lowercase(label));
    }

    let (mapped, res) = idna::domain_to_unicode(label);
    if res.is_err() {
        return Err(NameError::InvalidLabel(label.into()));
    }
    if mapped.is_empty() {
        return Err(NameError::EmptyLabel);
    }
    if mapped.contains('.') {
        // Some characters, e.g., the ideographic full stop, map to a dot.
        return Err(NameError::InvalidLabel(label.into()));
    }
    check_chars(&mapped)?;
    Ok(Cow::Owned(mapped))
}

/// Replaces the characters UTS #46 maps to a full stop with a dot.
///
/// These are the ideographic full stop U+3002, the fullwidth full stop
/// U+FF0E, and the halfwidth ideographic full stop U+FF61. They separate
/// labels just like the ASCII dot, so this has to happen before a name is
/// split into its labels.
pub(crate) fn map_full_stops(name: &str) -> Cow<'_, str> {
    if name.contains(is_full_stop) {
        Cow::Owned(
            name.chars()
                .map(|ch| if is_full_stop(ch) { '.' } else { ch })
                .collect(),
        )
    } else {
        Cow::Borrowed(name)
    }
}

fn is_full_stop(ch: char) -> bool {
    matches!(ch, '\u{3002}' | '\u{FF0E}' | '\u{FF61}')
}

/// Checks that a label doesn’t contain any disallowed characters.
fn check_chars(label: &str) -> Result<(), NameError> {
    match label.chars().find(|&ch| !is_allowed_char(ch)) {
        Some(ch) => Err(NameError::IllegalChar(ch)),
        None => Ok(()),
    }
}

/// Returns whether a character may appear in a label at all.
///
/// Non-ASCII characters are further checked by the UTS #46 processing.
fn is_allowed_char(ch: char) -> bool {
    if ch.is_ascii() {
        ch.is_ascii_alphanumeric() || ch == '-'
    } else {
        !ch.is_control()
    }
}

fn has_ace_prefix(label: &str) -> bool {
    label.len() >= 4 && label.as_bytes()[..4].eq_ignore_ascii_case(b"xn--")
}

fn lowercase(label: &str) -> Cow<'_, str> {
    if label.bytes().any(|ch| ch.is_ascii_uppercase()) {
        Cow::Owned(label.to_ascii_lowercase())
    } else {
        Cow::Borrowed(label)
    }
}

/// Returns the hash of a label that has already been normalized.
pub(crate) fn hash_normalized_label(label: &str) -> LabelHash {
    decode_labelhash(label).unwrap_or_else(|_| LabelHash::of(label))
}

//------------ Encoded Label Hashes ------------------------------------------

/// The length of an encoded label hash: 64 hex digits plus two brackets.
const ENCODED_LEN: usize = 66;

/// Encodes a label hash into a label.
///
/// If only the hash of a label is known, this label can be used in its
/// stead. It consists of the hash’s 64 hex digits in square brackets. The
/// result is not a valid label in the strict sense since brackets aren’t
/// allowed, but [`Name`][super::Name] and the hash functions recognize it
/// and use the hash directly.
pub fn encode_labelhash(hash: &LabelHash) -> String {
    format!("[{}]", hex::encode(hash))
}

/// Decodes an encoded label hash.
pub fn decode_labelhash(label: &str) -> Result<LabelHash, NameError> {
    if !is_encoded_labelhash(label) {
        return Err(NameError::BadLabelHash);
    }
    let mut res = [0u8; 32];
    hex::decode_to_slice(&label[1..ENCODED_LEN - 1], &mut res)
        .map_err(|_| NameError::BadLabelHash)?;
    Ok(LabelHash::from_bytes(res))
}

/// Returns whether a label is an encoded label hash.
pub fn is_encoded_labelhash(label: &str) -> bool {
    label.len() == ENCODED_LEN
        && label.starts_with('[')
        && label.ends_with(']')
        && label.as_bytes()[1..ENCODED_LEN - 1]
            .iter()
            .all(u8::is_ascii_hexdigit)
}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    #[rstest]
    #[case("vitalik", "vitalik")]
    #[case("Vitalik", "vitalik")]
    #[case("VITALIK-1", "vitalik-1")]
    #[case("Ünïcödé", "ünïcödé")]
    #[case("xn--bcher-kva", "bücher")]
    fn normalizes(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(normalize_label(input).unwrap(), expected);
    }

    #[rstest]
    #[case("$vitalik", '$')]
    #[case("#vitalik", '#')]
    #[case("vitalik ", ' ')]
    #[case("vit_alik", '_')]
    #[case("vit\u{7}alik", '\u{7}')]
    fn refuses_illegal_chars(#[case] input: &str, #[case] ch: char) {
        assert_eq!(normalize_label(input), Err(NameError::IllegalChar(ch)));
    }

    #[rstest]
    #[case("vitalik.one", "vitalik.one")]
    #[case("vitalik\u{3002}one", "vitalik.one")]
    #[case("vitalik\u{FF0E}one", "vitalik.one")]
    #[case("sub\u{FF61}vitalik\u{3002}one", "sub.vitalik.one")]
    fn maps_full_stops(#[case] input: &str, #[case] expected: &str) {
        assert_eq!(map_full_stops(input), expected);
    }

    #[test]
    fn refuses_empty() {
        assert_eq!(normalize_label(""), Err(NameError::EmptyLabel));
    }

    #[test]
    fn borrows_normal_labels() {
        assert!(matches!(normalize_label("vitalik"), Ok(Cow::Borrowed(_))));
    }

    #[test]
    fn encoded_label_hash() {
        let hash = LabelHash::of("eth");
        let encoded = encode_labelhash(&hash);
        assert_eq!(
            encoded,
            "[4f5b812789fc606be1b3b16908db13fc7a9adf7ca72641f84d75b47069d3d7f0]"
        );
        assert!(is_encoded_labelhash(&encoded));
        assert_eq!(decode_labelhash(&encoded), Ok(hash));
        assert_eq!(
            normalize_label(&encoded.to_ascii_uppercase()).unwrap(),
            encoded
        );

        assert!(!is_encoded_labelhash("[eth]"));
        assert!(!is_encoded_labelhash(&encoded[..65]));
        assert_eq!(decode_labelhash("eth"), Err(NameError::BadLabelHash));
    }

    #[test]
    fn hashes_normalized_labels() {
        assert_eq!(hash_normalized_label("eth"), LabelHash::of("eth"));
        assert_eq!(
            hash_normalized_label(&encode_labelhash(&LabelHash::of("eth"))),
            LabelHash::of("eth")
        );
    }
}
