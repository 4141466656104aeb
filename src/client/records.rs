//! Records returned by the client.

use super::subdomains::SubdomainLabel;
use crate::base::{LabelHash, Name};
use alloy_primitives::{Address, B256};
use core::fmt;

//------------ EMPTY_ADDRESS -------------------------------------------------

/// The address string returned when no address is set for a coin.
pub const EMPTY_ADDRESS: &str = "0x0000000000000000000000000000000000000000";

//------------ Content -------------------------------------------------------

/// The content record of a name.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Content {
    /// A decoded content hash URI such as `ipfs://bafy…`.
    ContentHash(String),

    /// The legacy 32 byte content record.
    OldContent(B256),

    /// The record could not be retrieved or decoded.
    Error(String),

    /// The name has no content record.
    Empty,
}

impl Content {
    /// Returns the name of the kind of content.
    pub fn content_type(&self) -> &'static str {
        match self {
            Content::ContentHash(_) => "contenthash",
            Content::OldContent(_) => "oldcontent",
            Content::Error(_) => "error",
            Content::Empty => "empty",
        }
    }

    /// Returns whether the content is an error.
    pub fn is_error(&self) -> bool {
        matches!(self, Content::Error(_))
    }
}

impl fmt::Display for Content {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match self {
            Content::ContentHash(uri) => f.write_str(uri),
            Content::OldContent(value) => write!(f, "{}", value),
            Content::Error(msg) => f.write_str(msg),
            Content::Empty => f.write_str("0x0"),
        }
    }
}

//------------ DomainNode ----------------------------------------------------

/// A name with its registry entry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DomainNode {
    /// The name.
    pub name: Name,

    /// The first label of the name unless it is an encoded label hash.
    pub label: Option<String>,

    /// The hash of the first label.
    ///
    /// This is `None` only for the root.
    pub labelhash: Option<LabelHash>,

    /// The owner of the name.
    pub owner: Address,

    /// The resolver of the name.
    pub resolver: Address,
}

impl DomainNode {
    /// Returns whether the name has a resolver.
    pub fn has_resolver(&self) -> bool {
        !self.resolver.is_zero()
    }
}

//------------ DomainDetails -------------------------------------------------

/// A name with its registry entry and the main resolver records.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct DomainDetails {
    /// The registry entry.
    pub node: DomainNode,

    /// The address record.
    ///
    /// This is `None` if the name has no resolver.
    pub addr: Option<Address>,

    /// The content record.
    ///
    /// This is `None` if the name has no resolver.
    pub content: Option<Content>,
}

//------------ SubdomainEntry ------------------------------------------------

/// A subdomain as returned by a subdomain listing.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct SubdomainEntry {
    /// The label of the subdomain if it could be recovered.
    pub label: Option<String>,

    /// The hash of the label.
    pub labelhash: LabelHash,

    /// Whether the label was recovered.
    pub decrypted: bool,

    /// The name of the parent.
    pub node: Name,

    /// The full name of the subdomain.
    ///
    /// If the label wasn’t recovered, the first label is the encoded label
    /// hash.
    pub name: Name,

    /// The current owner of the subdomain.
    pub owner: Address,
}

impl SubdomainEntry {
    /// Creates an entry from a reconciled label and its owner.
    pub fn new(label: SubdomainLabel, owner: Address) -> Self {
        SubdomainEntry {
            decrypted: label.label.is_some(),
            label: label.label,
            labelhash: label.labelhash,
            node: label.node,
            name: label.name,
            owner,
        }
    }
}

//============ Testing =======================================================
