//! A client library for ENS-style name registries.
//!
//! Name registries on EVM chains map human readable, dot separated names
//! to entries in a registry contract. Each entry has an owner and may point
//! to a resolver contract that holds its records, such as an address or a
//! content hash. This crate provides the building blocks for working with
//! such a registry as well as a client that wraps the contract calls into
//! operations on names.
//!
//! # Modules
//!
//! A set of modules providing fundamental types and functionality is always
//! enabled:
//!
//! * [base] contains names and their normalization as well as the hashing
//!   of names into the node identifiers used by the contracts,
//! * [contenthash] converts content hashes between their text and binary
//!   forms, and
//! * [utils] contains the varint encoding used by content hashes.
//!
//! In addition, there are modules hidden behind feature flags:
//!
#![cfg_attr(feature = "client", doc = "* [client]:")]
#![cfg_attr(not(feature = "client"), doc = "* client:")]
//!   The client for the registry, its resolvers, and the reverse registrar.
//!
//! # Reference of feature flags
//!
//! * `client`: Enables the `client` module. This feature is enabled by
//!   default.
//! * `logging`: Provides [`init_logging`] which sets up a `tracing`
//!   subscriber driven by the `RUST_LOG` environment variable.
//! * `serde`: Enables serde serialization for the node identifier and label
//!   hash types as well as deserialization of the client configuration.

#![allow(renamed_and_removed_lints)]
#![allow(clippy::unknown_clippy_lints)]
#![cfg_attr(docsrs, feature(doc_cfg))]

pub mod base;
pub mod client;
pub mod contenthash;
pub mod utils;

mod logging;

#[cfg(feature = "logging")]
pub use self::logging::init_logging;
