//! Node identifiers and label hashes.

use super::name::{hash_normalized_label, normalize_label, Name, NameError};
use alloy_primitives::keccak256;
use core::fmt;
use core::str::FromStr;

//------------ NodeId --------------------------------------------------------

hash_type! {
    /// The identifier of a name’s node in the registry.
    ///
    /// The identifier is derived from a name by hashing its labels from the
    /// right, see [`namehash`]. The root, i.e., the empty name, has an
    /// identifier of all zeros available as [`NodeId::ROOT`].
    NodeId
}

impl NodeId {
    /// The identifier of the root node.
    pub const ROOT: Self = NodeId::ZERO;

    /// Returns the identifier of a child node.
    ///
    /// The child is identified by the hash of its label relative to `self`.
    /// This is the step performed for each label in [`namehash`] and can be
    /// used when the parent’s identifier is already known.
    #[must_use]
    pub fn child(&self, label: &LabelHash) -> Self {
        let mut buf = [0u8; 64];
        buf[..32].copy_from_slice(self.as_slice());
        buf[32..].copy_from_slice(label.as_slice());
        NodeId(keccak256(buf))
    }
}

//------------ LabelHash -----------------------------------------------------

hash_type! {
    /// The hash of a single label.
    ///
    /// The registry never sees a label itself, only this hash. It appears
    /// in event data, most notably in the `NewOwner` event, which is how
    /// subdomains can be discovered.
    LabelHash
}

impl LabelHash {
    /// Hashes the octets of a label as is.
    ///
    /// No normalization happens. Use [`labelhash`] for that.
    #[must_use]
    pub fn of(label: impl AsRef<[u8]>) -> Self {
        LabelHash(keccak256(label))
    }
}

//------------ Convenience Functions -----------------------------------------

/// Returns the node identifier of a name.
///
/// The name is normalized first. This fails if any of its labels contains
/// a character that is not allowed.
///
/// ```
/// use fns::base::{namehash, NodeId};
///
/// assert_eq!(namehash("").unwrap(), NodeId::ROOT);
/// assert_eq!(namehash("Foo.ETH").unwrap(), namehash("foo.eth").unwrap());
/// assert!(namehash("$foo.eth").is_err());
/// ```
pub fn namehash(name: &str) -> Result<NodeId, NameError> {
    Name::from_str(name).map(|name| name.node())
}

/// Returns the node identifier of a child from its parent and label hash.
pub fn namehash_with_labelhash(parent: &NodeId, label: &LabelHash) -> NodeId {
    parent.child(label)
}

/// Returns the hash of a single label.
///
/// The label is normalized first. An encoded label hash is returned as the
/// hash it encodes.
pub fn labelhash(label: &str) -> Result<LabelHash, NameError> {
    let label = normalize_label(label)?;
    Ok(hash_normalized_label(&label))
}

//============ Error Types ===================================================

//------------ HashFromStrError ----------------------------------------------

/// A string could not be converted into a hash value.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum HashFromStrError {
    /// The string did not contain exactly 64 hex digits.
    Length,

    /// The string contained a character that isn’t a hex digit.
    Digit,
}

//--- Display and Error

impl fmt::Display for HashFromStrError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            HashFromStrError::Length => f.write_str("expected 64 hex digits"),
            HashFromStrError::Digit => f.write_str("invalid hex digit"),
        }
    }
}

impl std::error::Error for HashFromStrError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;

    fn node(s: &str) -> NodeId {
        NodeId::from_str(s).unwrap()
    }

    #[test]
    fn well_known_names() {
        assert_eq!(namehash("").unwrap(), NodeId::ROOT);
        assert_eq!(
            namehash("eth").unwrap(),
            node("0x93cdeb708b7545dc668eb9280176169d1c33cfd8ed6f04690a0bcc88a93fc4ae")
        );
        assert_eq!(
            namehash("foo.eth").unwrap(),
            node("0xde9b09fd7c5f901e23a3f19fecc54828e9c848539801e86591bd9801b019f84f")
        );
        assert_eq!(
            namehash("alice.eth").unwrap(),
            node("0x787192fc5378cc32aa956ddfdedbf26b24e8d78e40109add0eea2c1a012c3dec")
        );
        assert_eq!(
            namehash("addr.reverse").unwrap(),
            node("0x91d1777781884d03a6757a803996e38de2a42967fb37eeaca72729271025a9e2")
        );
    }

    #[test]
    fn label_hash() {
        assert_eq!(
            labelhash("eth").unwrap(),
            LabelHash::from_str(
                "4f5b812789fc606be1b3b16908db13fc7a9adf7ca72641f84d75b47069d3d7f0"
            )
            .unwrap()
        );
        assert_eq!(labelhash("ETH").unwrap(), LabelHash::of("eth"));
        assert!(labelhash("e th").is_err());
    }

    #[test]
    fn case_insensitive() {
        assert_eq!(
            namehash("Vitalik.ONE").unwrap(),
            namehash("vitalik.one").unwrap()
        );
    }

    #[test]
    fn unicode_full_stops() {
        let plain = namehash("vitalik.one").unwrap();
        assert_eq!(namehash("vitalik\u{3002}one").unwrap(), plain);
        assert_eq!(namehash("vitalik\u{FF0E}one").unwrap(), plain);
        assert_eq!(namehash("vitalik\u{FF61}one").unwrap(), plain);
        assert_eq!(namehash("VITALIK\u{3002}ONE").unwrap(), plain);
    }

    #[test]
    fn child_matches_namehash() {
        let parent = namehash("resolver.one").unwrap();
        assert_eq!(
            namehash("sub.resolver.one").unwrap(),
            namehash_with_labelhash(&parent, &labelhash("sub").unwrap())
        );
        assert_eq!(
            namehash("one").unwrap(),
            NodeId::ROOT.child(&LabelHash::of("one"))
        );
    }

    #[test]
    fn encoded_label_hashes() {
        let eth = "[4f5b812789fc606be1b3b16908db13fc7a9adf7ca72641f84d75b47069d3d7f0]";
        assert_eq!(namehash(eth).unwrap(), namehash("eth").unwrap());
        assert_eq!(
            namehash(&format!("foo.{}", eth)).unwrap(),
            namehash("foo.eth").unwrap()
        );
        assert_eq!(labelhash(eth).unwrap(), LabelHash::of("eth"));
    }

    #[test]
    fn hash_from_str() {
        assert_eq!(
            NodeId::from_str("0x00").unwrap_err(),
            HashFromStrError::Length
        );
        assert_eq!(
            NodeId::from_str(&"g".repeat(64)).unwrap_err(),
            HashFromStrError::Digit
        );
        let zero = "0".repeat(64);
        assert_eq!(NodeId::from_str(&zero).unwrap(), NodeId::ROOT);
        assert_eq!(NodeId::ROOT.to_string(), format!("0x{}", zero));
    }
}
