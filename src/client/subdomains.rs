//! Recovering the labels of subdomains.
//!
//! The registry only ever sees label hashes. When listing the subdomains
//! of a name, all that is known are the hashes carried by its `NewOwner`
//! events. This module turns them back into labels where possible, using
//! two sources: a local dictionary of known labels and a [`Decryptor`]
//! that may know labels registered elsewhere.

use super::chain::Decryptor;
use super::records::SubdomainEntry;
use crate::base::name::normalize_label;
use crate::base::{LabelHash, Name, NameError};
use alloy_primitives::Address;
use std::collections::{HashMap, HashSet};
use tracing::warn;

//------------ LocalLabels ---------------------------------------------------

/// A source of labels available without I/O.
pub trait LocalLabels: Send + Sync {
    /// Returns the label for a hash if it is known.
    fn lookup(&self, hash: &LabelHash) -> Option<&str>;
}

//------------ LabelDictionary -----------------------------------------------

/// An in-memory dictionary of labels keyed by their hash.
#[derive(Clone, Debug, Default)]
pub struct LabelDictionary {
    labels: HashMap<LabelHash, String>,
}

impl LabelDictionary {
    /// Creates an empty dictionary.
    pub fn new() -> Self {
        Default::default()
    }

    /// Adds a label to the dictionary.
    ///
    /// The label is normalized first. Returns its hash.
    pub fn insert(&mut self, label: &str) -> Result<LabelHash, NameError> {
        let label = normalize_label(label)?;
        let hash = LabelHash::of(label.as_bytes());
        self.labels.insert(hash, label.into_owned());
        Ok(hash)
    }

    /// Returns the number of labels in the dictionary.
    pub fn len(&self) -> usize {
        self.labels.len()
    }

    /// Returns whether the dictionary is empty.
    pub fn is_empty(&self) -> bool {
        self.labels.is_empty()
    }
}

impl LocalLabels for LabelDictionary {
    fn lookup(&self, hash: &LabelHash) -> Option<&str> {
        self.labels.get(hash).map(String::as_str)
    }
}

/// Collects labels into a dictionary, skipping those that are invalid.
impl<S: AsRef<str>> FromIterator<S> for LabelDictionary {
    fn from_iter<I: IntoIterator<Item = S>>(iter: I) -> Self {
        let mut res = Self::new();
        for label in iter {
            let _ = res.insert(label.as_ref());
        }
        res
    }
}

//------------ EventOrder ----------------------------------------------------

/// The order of a sequence of events.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum EventOrder {
    /// Oldest event first.
    Chronological,

    /// Newest event first.
    ReverseChronological,
}

//------------ SubdomainLabel ------------------------------------------------

/// A subdomain with its label recovered if possible.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubdomainLabel {
    /// The label if it could be recovered.
    pub label: Option<String>,

    /// The hash of the label.
    pub labelhash: LabelHash,

    /// The name of the parent.
    pub node: Name,

    /// The full name of the subdomain.
    pub name: Name,
}

impl SubdomainLabel {
    /// Returns whether the label has been recovered.
    pub fn decrypted(&self) -> bool {
        self.label.is_some()
    }

    /// Converts the label into a subdomain entry with the given owner.
    pub fn into_entry(self, owner: Address) -> SubdomainEntry {
        SubdomainEntry::new(self, owner)
    }
}

//------------ reconcile -----------------------------------------------------

/// Recovers the labels of the subdomains given by their label hashes.
///
/// The hashes are taken from the `NewOwner` events of the parent in the
/// given order. The result is in chronological order and contains each
/// label hash only once, at the position of its first appearance.
///
/// Labels from the decryptor are preferred over those from the
/// dictionary. A label that doesn’t hash to its label hash is ignored. If
/// the decryptor fails as a whole, only the dictionary is used.
pub async fn reconcile(
    parent: &Name,
    label_hashes: &[LabelHash],
    order: EventOrder,
    dictionary: &dyn LocalLabels,
    decryptor: &dyn Decryptor,
) -> Vec<SubdomainLabel> {
    let hashes = unique_hashes(label_hashes, order);
    if hashes.is_empty() {
        return Vec::new();
    }
    let decrypted = match decryptor.decrypt(&hashes).await {
        Ok(labels) if labels.len() == hashes.len() => labels,
        Ok(labels) => {
            warn!(
                "decryptor returned {} labels for {} hashes",
                labels.len(),
                hashes.len()
            );
            vec![None; hashes.len()]
        }
        Err(err) => {
            warn!("decrypting labels of {} failed: {}", parent, err);
            vec![None; hashes.len()]
        }
    };
    hashes
        .into_iter()
        .zip(decrypted)
        .map(|(hash, decrypted)| {
            let label = decrypted
                .and_then(|label| verify_label(&label, &hash))
                .or_else(|| {
                    dictionary
                        .lookup(&hash)
                        .and_then(|label| verify_label(label, &hash))
                });
            let name = match label {
                Some(ref label) => parent.prepend_normalized(label),
                None => parent.prepend_labelhash(&hash),
            };
            SubdomainLabel {
                label,
                labelhash: hash,
                node: parent.clone(),
                name,
            }
        })
        .collect()
}

/// Returns the label hashes in chronological order without duplicates.
fn unique_hashes(hashes: &[LabelHash], order: EventOrder) -> Vec<LabelHash> {
    let mut res = match order {
        EventOrder::Chronological => hashes.to_vec(),
        EventOrder::ReverseChronological => {
            hashes.iter().rev().copied().collect()
        }
    };
    let mut seen = HashSet::new();
    res.retain(|hash| seen.insert(*hash));
    res
}

/// Returns the normalized label if it hashes to the given hash.
fn verify_label(label: &str, hash: &LabelHash) -> Option<String> {
    let label = normalize_label(label).ok()?;
    if LabelHash::of(label.as_bytes()) == *hash {
        Some(label.into_owned())
    } else {
        warn!("ignoring label {:?} not matching hash {}", label, hash);
        None
    }
}

//============ Testing =======================================================
