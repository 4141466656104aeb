//! Names.
//!
//! This module provides the [`Name`] type, a normalized name, as well as
//! functions for normalizing individual labels and for dealing with
//! encoded label hashes.
//!
//! Normalization follows the processing of UTS #46 in non-transitional
//! mode with the STD3 rules applied: labels are case-folded and mapped to
//! their normalized form, and apart from letters, digits, and the hyphen no
//! ASCII characters are allowed. In particular, the space, the underscore,
//! and all control characters are refused.

pub use self::absolute::{validate_name, Name, NameError};
pub use self::label::{
    decode_labelhash, encode_labelhash, is_encoded_labelhash,
    normalize_label,
};

pub(crate) use self::label::hash_normalized_label;

mod absolute;
mod label;
