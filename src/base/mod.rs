//! Basics.
//!
//! This module provides the fundamental types for addressing entries in the
//! name registry. Every operation of the registry and its resolvers refers
//! to a name not by its text but by a 32 octet *node identifier* derived
//! from it. The types here allow going from the former to the latter.
//!
//! # Names and Labels
//!
//! A [`Name`] is a sequence of labels separated by dots, much like a domain
//! name. The ‘most significant’ label is the last one. Unlike in the DNS,
//! names are always normalized before use: labels are mapped per UTS #46,
//! which among other things lowercases them, and a small set of characters
//! is refused outright. The empty name is the *root* of the hierarchy.
//!
//! Because only hashes of labels are ever stored on chain, a label may be
//! known only by its hash. Such labels can still appear in names in their
//! *encoded* form, the label hash in hex wrapped in square brackets. See
//! [`encode_labelhash`] for details.
//!
//! # Node Identifiers
//!
//! The [`NodeId`] of a name is computed by hashing its labels right to left:
//! starting with 32 zero octets, the identifier of a name is the Keccak-256
//! hash of the identifier of its parent followed by the hash of its first
//! label, the [`LabelHash`]. The functions [`namehash`] and [`labelhash`]
//! provide the computation starting from text.

#[macro_use]
mod macros;

pub mod name;
pub mod node;

pub use self::name::{
    decode_labelhash, encode_labelhash, is_encoded_labelhash,
    validate_name, Name, NameError,
};
pub use self::node::{
    labelhash, namehash, namehash_with_labelhash, HashFromStrError,
    LabelHash, NodeId,
};
