//! Access to the chain.
//!
//! The client doesn’t talk to the chain itself. Instead, it is given
//! collaborators implementing the traits of this module: a
//! [`ChainReader`] for contract calls and event logs, an optional
//! [`ChainWriter`] for submitting transactions, and a [`Decryptor`] that
//! recovers labels from their hashes.
//!
//! Contract calls are described by a [`Call`]: the Solidity signature of
//! the function and its arguments as [`Token`]s. Return values come back
//! as a single token. How calls are encoded on the wire is up to the
//! collaborator.

use super::error::CollaboratorError;
use crate::base::{LabelHash, NodeId};
use alloy_primitives::{keccak256, Address, FixedBytes, B256, U256};
use bytes::Bytes;
use core::fmt;
use std::future::Future;
use std::pin::Pin;

//------------ CallFuture ----------------------------------------------------

/// The future returned by collaborator methods.
pub type CallFuture<'a, T> =
    Pin<Box<dyn Future<Output = Result<T, CollaboratorError>> + Send + 'a>>;

//------------ Token ---------------------------------------------------------

/// An argument to or the return value of a contract call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum Token {
    /// An `address`.
    Address(Address),

    /// A `bytes32`.
    Word(B256),

    /// A `bytes4` as used for interface identifiers.
    InterfaceId(FixedBytes<4>),

    /// A `uint256` or `uint64`.
    Uint(U256),

    /// A `bytes`.
    Bytes(Bytes),

    /// A `string`.
    String(String),

    /// A `bool`.
    Bool(bool),
}

impl Token {
    /// Converts the token into an address if it is one.
    pub fn into_address(self) -> Option<Address> {
        match self {
            Token::Address(value) => Some(value),
            _ => None,
        }
    }

    /// Converts the token into a word if it is one.
    pub fn into_word(self) -> Option<B256> {
        match self {
            Token::Word(value) => Some(value),
            _ => None,
        }
    }

    /// Converts the token into an unsigned integer if it is one.
    pub fn into_uint(self) -> Option<U256> {
        match self {
            Token::Uint(value) => Some(value),
            _ => None,
        }
    }

    /// Converts the token into bytes if it is a byte string.
    pub fn into_bytes(self) -> Option<Bytes> {
        match self {
            Token::Bytes(value) => Some(value),
            _ => None,
        }
    }

    /// Converts the token into a string if it is one.
    pub fn into_string(self) -> Option<String> {
        match self {
            Token::String(value) => Some(value),
            _ => None,
        }
    }

    /// Converts the token into a boolean if it is one.
    pub fn into_bool(self) -> Option<bool> {
        match self {
            Token::Bool(value) => Some(value),
            _ => None,
        }
    }
}

//--- From

impl From<Address> for Token {
    fn from(value: Address) -> Self {
        Token::Address(value)
    }
}

impl From<B256> for Token {
    fn from(value: B256) -> Self {
        Token::Word(value)
    }
}

impl From<NodeId> for Token {
    fn from(value: NodeId) -> Self {
        Token::Word(value.into_b256())
    }
}

impl From<LabelHash> for Token {
    fn from(value: LabelHash) -> Self {
        Token::Word(value.into_b256())
    }
}

impl From<FixedBytes<4>> for Token {
    fn from(value: FixedBytes<4>) -> Self {
        Token::InterfaceId(value)
    }
}

impl From<U256> for Token {
    fn from(value: U256) -> Self {
        Token::Uint(value)
    }
}

impl From<u64> for Token {
    fn from(value: u64) -> Self {
        Token::Uint(U256::from(value))
    }
}

impl From<Bytes> for Token {
    fn from(value: Bytes) -> Self {
        Token::Bytes(value)
    }
}

impl From<Vec<u8>> for Token {
    fn from(value: Vec<u8>) -> Self {
        Token::Bytes(value.into())
    }
}

impl From<String> for Token {
    fn from(value: String) -> Self {
        Token::String(value)
    }
}

impl From<&str> for Token {
    fn from(value: &str) -> Self {
        Token::String(value.into())
    }
}

impl From<bool> for Token {
    fn from(value: bool) -> Self {
        Token::Bool(value)
    }
}

//------------ Call ----------------------------------------------------------

/// A contract function call.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Call {
    /// The Solidity signature of the function, e.g., `owner(bytes32)`.
    pub signature: &'static str,

    /// The arguments in order.
    pub args: Vec<Token>,
}

impl Call {
    /// Creates a new call.
    pub fn new(signature: &'static str, args: Vec<Token>) -> Self {
        Call { signature, args }
    }

    /// Returns the four byte function selector of the call.
    pub fn selector(&self) -> FixedBytes<4> {
        selector(self.signature)
    }
}

/// Returns the four byte selector for a function signature.
///
/// This is also the interface identifier of an interface consisting of
/// only this function.
pub fn selector(signature: &str) -> FixedBytes<4> {
    let hash = keccak256(signature);
    FixedBytes([hash[0], hash[1], hash[2], hash[3]])
}

//------------ BlockNumber ---------------------------------------------------

/// A block to start or end a log query at.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub enum BlockNumber {
    /// A specific block.
    Number(u64),

    /// The latest block.
    Latest,
}

impl BlockNumber {
    /// Returns whether the given block is at or before this block.
    pub fn includes(self, block: u64) -> bool {
        match self {
            BlockNumber::Number(number) => block <= number,
            BlockNumber::Latest => true,
        }
    }
}

impl From<u64> for BlockNumber {
    fn from(number: u64) -> Self {
        BlockNumber::Number(number)
    }
}

//------------ LogFilter -----------------------------------------------------

/// A query for event logs.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct LogFilter {
    /// The first block to include.
    pub from_block: BlockNumber,

    /// The last block to include.
    pub to_block: BlockNumber,

    /// The contract that emitted the event.
    pub address: Address,

    /// The topics to match.
    ///
    /// A `None` matches any value of the topic at that position.
    pub topics: Vec<Option<B256>>,
}

impl LogFilter {
    /// Returns whether a log matches the filter.
    pub fn matches(&self, log: &Log) -> bool {
        if log.address != self.address {
            return false;
        }
        if let Some(block) = log.block_number {
            let after_start = match self.from_block {
                BlockNumber::Number(number) => block >= number,
                BlockNumber::Latest => false,
            };
            if !after_start || !self.to_block.includes(block) {
                return false;
            }
        }
        self.topics.iter().enumerate().all(|(idx, topic)| match topic {
            Some(topic) => log.topics.get(idx) == Some(topic),
            None => true,
        })
    }
}

//------------ Log -----------------------------------------------------------

/// An event log.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Log {
    /// The contract that emitted the event.
    pub address: Address,

    /// The topics of the event, the first being the event’s hash.
    pub topics: Vec<B256>,

    /// The non-indexed event data.
    pub data: Bytes,

    /// The block the event was emitted in if known.
    pub block_number: Option<u64>,
}

//------------ ChainReader ---------------------------------------------------

/// Read access to the chain.
pub trait ChainReader: Send + Sync {
    /// Performs a read-only call of a contract function.
    fn call<'a>(&'a self, to: Address, call: &'a Call) -> CallFuture<'a, Token>;

    /// Returns the event logs matching the filter.
    ///
    /// The logs must be in the order they were emitted.
    fn logs<'a>(&'a self, filter: &'a LogFilter) -> CallFuture<'a, Vec<Log>>;
}

//------------ ChainWriter ---------------------------------------------------

/// Write access to the chain.
pub trait ChainWriter: Send + Sync {
    /// Returns the account that signs transactions.
    fn account(&self) -> CallFuture<'_, Address>;

    /// Submits a transaction calling a contract function.
    fn submit(
        &self,
        to: Address,
        call: Call,
    ) -> CallFuture<'_, Box<dyn PendingTransaction>>;
}

//------------ PendingTransaction --------------------------------------------

/// A submitted transaction.
pub trait PendingTransaction: fmt::Debug + Send + Sync {
    /// Returns the hash of the transaction.
    fn hash(&self) -> B256;

    /// Waits until the transaction has been confirmed.
    fn confirm(self: Box<Self>) -> CallFuture<'static, ()>;
}

//------------ Decryptor -----------------------------------------------------

/// Recovers labels from their hashes.
pub trait Decryptor: Send + Sync {
    /// Returns the labels for a sequence of label hashes.
    ///
    /// The result must have one element per hash, in the same order. An
    /// element is `None` if the label for that hash is unknown.
    fn decrypt<'a>(
        &'a self,
        hashes: &'a [LabelHash],
    ) -> CallFuture<'a, Vec<Option<String>>>;
}

//------------ NoDecryptor ---------------------------------------------------

/// A decryptor that doesn’t know any labels.
#[derive(Clone, Copy, Debug, Default)]
pub struct NoDecryptor;

impl Decryptor for NoDecryptor {
    fn decrypt<'a>(
        &'a self,
        hashes: &'a [LabelHash],
    ) -> CallFuture<'a, Vec<Option<String>>> {
        let res = vec![None; hashes.len()];
        Box::pin(async move { Ok(res) })
    }
}

//============ Testing =======================================================
