//! Normalized names.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use super::label::{
    encode_labelhash, hash_normalized_label, map_full_stops, normalize_label,
};
use crate::base::node::{LabelHash, NodeId};
use alloy_primitives::{hex, Address};
use core::{fmt, str};

//------------ Name ----------------------------------------------------------

/// A normalized name.
///
/// A name is a sequence of labels separated by dots. Values of this type
/// are always normalized: each label has been run through
/// [`normalize_label`][super::normalize_label], so two names that differ
/// only in case or Unicode representation are equal. The empty name is the
/// root.
///
/// Names are created from strings via [`FromStr`][str::FromStr]:
///
/// ```
/// use fns::base::Name;
///
/// let name: Name = "Sub.Vitalik.ONE".parse().unwrap();
/// assert_eq!(name.as_str(), "sub.vitalik.one");
/// assert_eq!(name.parent().unwrap().as_str(), "vitalik.one");
/// ```
#[derive(Clone, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
pub struct Name(String);

/// # Creation
///
impl Name {
    /// The suffix of all reverse names.
    pub const REVERSE_SUFFIX: &'static str = "addr.reverse";

    /// Returns the root name.
    #[must_use]
    pub fn root() -> Self {
        Name(String::new())
    }

    /// Returns the reverse name for an address.
    ///
    /// This is the name `<address>.addr.reverse` with the address given as
    /// lowercase hex digits without prefix. The reverse registrar assigns
    /// this name to each account that claims it.
    #[must_use]
    pub fn reverse(address: &Address) -> Self {
        Name(format!("{}.{}", hex::encode(address), Self::REVERSE_SUFFIX))
    }

    /// Returns the name of a child of this name.
    pub fn prepend(&self, label: &str) -> Result<Self, NameError> {
        let label = normalize_label(label)?;
        Ok(self.prepend_normalized(&label))
    }

    /// Returns the name of a child known only by its label hash.
    ///
    /// The child’s first label will be the encoded label hash.
    #[must_use]
    pub fn prepend_labelhash(&self, label: &LabelHash) -> Self {
        self.prepend_normalized(&encode_labelhash(label))
    }

    /// Returns the name of a child with an already normalized label.
    pub(crate) fn prepend_normalized(&self, label: &str) -> Self {
        if self.is_root() {
            Name(label.into())
        } else {
            Name(format!("{}.{}", label, self.0))
        }
    }
}

/// # Access to Labels
///
impl Name {
    /// Returns whether this is the root name.
    pub fn is_root(&self) -> bool {
        self.0.is_empty()
    }

    /// Returns the normalized text of the name.
    pub fn as_str(&self) -> &str {
        &self.0
    }

    /// Converts the name into its normalized text.
    pub fn into_string(self) -> String {
        self.0
    }

    /// Returns an iterator over the labels from left to right.
    ///
    /// The root name has no labels.
    pub fn labels(&self) -> impl DoubleEndedIterator<Item = &str> + '_ {
        self.0.split('.').filter(|label| !label.is_empty())
    }

    /// Returns the number of labels.
    pub fn label_count(&self) -> usize {
        self.labels().count()
    }

    /// Returns the first, i.e., leftmost label.
    pub fn first_label(&self) -> Option<&str> {
        self.labels().next()
    }

    /// Returns the name of the parent.
    ///
    /// Returns `None` for the root.
    pub fn parent(&self) -> Option<Name> {
        self.split_first().map(|(_, parent)| parent)
    }

    /// Splits the name into its first label and the name of its parent.
    ///
    /// Returns `None` for the root.
    pub fn split_first(&self) -> Option<(&str, Name)> {
        if self.is_root() {
            return None;
        }
        Some(match self.0.split_once('.') {
            Some((label, parent)) => (label, Name(parent.into())),
            None => (self.0.as_str(), Name::root()),
        })
    }
}

/// # Hashing
///
impl Name {
    /// Returns the hash of the first label.
    ///
    /// Returns `None` for the root.
    pub fn first_labelhash(&self) -> Option<LabelHash> {
        self.first_label().map(hash_normalized_label)
    }

    /// Returns the node identifier of the name.
    pub fn node(&self) -> NodeId {
        self.labels()
            .rev()
            .fold(NodeId::ROOT, |node, label| {
                node.child(&hash_normalized_label(label))
            })
    }
}

//--- FromStr

impl str::FromStr for Name {
    type Err = NameError;

    /// Parses and normalizes a name.
    ///
    /// The empty string is the root. Otherwise, none of the labels may be
    /// empty, so leading, trailing, or consecutive dots are an error.
    /// Characters that UTS #46 maps to a full stop separate labels, too.
    fn from_str(s: &str) -> Result<Self, Self::Err> {
        if s.is_empty() {
            return Ok(Name::root());
        }
        let s = map_full_stops(s);
        let mut res = String::with_capacity(s.len());
        for label in s.split('.') {
            if !res.is_empty() {
                res.push('.');
            }
            res.push_str(&normalize_label(label)?);
        }
        Ok(Name(res))
    }
}

//--- AsRef

impl AsRef<str> for Name {
    fn as_ref(&self) -> &str {
        self.as_str()
    }
}

//--- Display and Debug

impl fmt::Display for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl fmt::Debug for Name {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "Name({:?})", self.0)
    }
}

//------------ validate_name -------------------------------------------------

/// Validates a name and returns its normalized form.
pub fn validate_name(name: &str) -> Result<String, NameError> {
    name.parse::<Name>().map(Name::into_string)
}

//============ Error Types ===================================================

//------------ NameError -----------------------------------------------------

/// A name or label is not valid.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum NameError {
    /// The name contains an empty label.
    EmptyLabel,

    /// A label contains a character that is not allowed.
    IllegalChar(char),

    /// A label was refused by the UTS #46 processing.
    InvalidLabel(String),

    /// A label looked like an encoded label hash but isn’t one.
    BadLabelHash,
}

//--- Display and Error

impl fmt::Display for NameError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            NameError::EmptyLabel => {
                f.write_str("name cannot have empty labels")
            }
            NameError::IllegalChar(ch) => write!(f, "illegal char {:?}", ch),
            NameError::InvalidLabel(ref label) => {
                write!(f, "invalid label {:?}", label)
            }
            NameError::BadLabelHash => f.write_str("invalid encoded label hash"),
        }
    }
}

impl std::error::Error for NameError {}

//============ Testing =======================================================
