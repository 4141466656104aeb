//! Typed calls of the naming contracts.
//!
//! There are three contracts involved. The [`Registry`] keeps the owner,
//! resolver, and TTL of every node and emits a [`NewOwner`] event whenever
//! a subnode changes hands. A [`Resolver`] keeps the records of the nodes
//! pointing to it. The [`ReverseRegistrar`] owns the `addr.reverse` node
//! and lets accounts claim their reverse name.
//!
//! Each type has one method per contract function. Read methods perform
//! the call through a [`ChainReader`] and check the type of the return
//! value. Write methods only produce the [`Call`] to be submitted.

use super::chain::{selector, BlockNumber, Call, ChainReader, Log, LogFilter, Token};
use super::error::Error;
use crate::base::{LabelHash, NodeId};
use alloy_primitives::{keccak256, Address, FixedBytes, B256};
use bytes::Bytes;

//------------ Signatures ----------------------------------------------------

const OWNER: &str = "owner(bytes32)";
const RESOLVER: &str = "resolver(bytes32)";
const TTL: &str = "ttl(bytes32)";
const RECORD_EXISTS: &str = "recordExists(bytes32)";
const SET_OWNER: &str = "setOwner(bytes32,address)";
const SET_SUBNODE_OWNER: &str = "setSubnodeOwner(bytes32,bytes32,address)";
const SET_SUBNODE_RECORD: &str =
    "setSubnodeRecord(bytes32,bytes32,address,address,uint64)";
const SET_RESOLVER: &str = "setResolver(bytes32,address)";

const ADDR: &str = "addr(bytes32)";
const ADDR_COIN: &str = "addr(bytes32,uint256)";
const CONTENTHASH: &str = "contenthash(bytes32)";
const CONTENT: &str = "content(bytes32)";
const TEXT: &str = "text(bytes32,string)";
const NAME: &str = "name(bytes32)";
const SUPPORTS_INTERFACE: &str = "supportsInterface(bytes4)";
const SET_ADDR: &str = "setAddr(bytes32,address)";
const SET_ADDR_COIN: &str = "setAddr(bytes32,uint256,bytes)";
const SET_CONTENTHASH: &str = "setContenthash(bytes32,bytes)";
const SET_CONTENT: &str = "setContent(bytes32,bytes32)";
const SET_TEXT: &str = "setText(bytes32,string,string)";
const SET_NAME_NODE: &str = "setName(bytes32,string)";

const SET_NAME: &str = "setName(string)";

//------------ Registry ------------------------------------------------------

/// The registry contract.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Registry {
    address: Address,
}

impl Registry {
    /// Creates a value for the registry at the given address.
    pub const fn new(address: Address) -> Self {
        Registry { address }
    }

    /// Returns the address of the registry.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Returns the owner of a node.
    pub async fn owner(
        &self,
        reader: &dyn ChainReader,
        node: &NodeId,
    ) -> Result<Address, Error> {
        call(reader, self.address, OWNER, vec![(*node).into()])
            .await?
            .into_address()
            .ok_or(Error::UnexpectedReturn(OWNER))
    }

    /// Returns the resolver of a node.
    pub async fn resolver(
        &self,
        reader: &dyn ChainReader,
        node: &NodeId,
    ) -> Result<Address, Error> {
        call(reader, self.address, RESOLVER, vec![(*node).into()])
            .await?
            .into_address()
            .ok_or(Error::UnexpectedReturn(RESOLVER))
    }

    /// Returns the caching time-to-live of a node.
    pub async fn ttl(
        &self,
        reader: &dyn ChainReader,
        node: &NodeId,
    ) -> Result<u64, Error> {
        call(reader, self.address, TTL, vec![(*node).into()])
            .await?
            .into_uint()
            .and_then(|ttl| u64::try_from(ttl).ok())
            .ok_or(Error::UnexpectedReturn(TTL))
    }

    /// Returns whether the registry has a record for a node.
    ///
    /// A registry that was migrated from an older registry only has
    /// records for nodes that have been written since.
    pub async fn record_exists(
        &self,
        reader: &dyn ChainReader,
        node: &NodeId,
    ) -> Result<bool, Error> {
        call(reader, self.address, RECORD_EXISTS, vec![(*node).into()])
            .await?
            .into_bool()
            .ok_or(Error::UnexpectedReturn(RECORD_EXISTS))
    }

    /// Transfers a node to a new owner.
    pub fn set_owner(&self, node: &NodeId, owner: Address) -> Call {
        Call::new(SET_OWNER, vec![(*node).into(), owner.into()])
    }

    /// Transfers a subnode to a new owner.
    pub fn set_subnode_owner(
        &self,
        node: &NodeId,
        label: &LabelHash,
        owner: Address,
    ) -> Call {
        Call::new(
            SET_SUBNODE_OWNER,
            vec![(*node).into(), (*label).into(), owner.into()],
        )
    }

    /// Sets owner, resolver, and TTL of a subnode at once.
    pub fn set_subnode_record(
        &self,
        node: &NodeId,
        label: &LabelHash,
        owner: Address,
        resolver: Address,
        ttl: u64,
    ) -> Call {
        Call::new(
            SET_SUBNODE_RECORD,
            vec![
                (*node).into(),
                (*label).into(),
                owner.into(),
                resolver.into(),
                ttl.into(),
            ],
        )
    }

    /// Sets the resolver of a node.
    pub fn set_resolver(&self, node: &NodeId, resolver: Address) -> Call {
        Call::new(SET_RESOLVER, vec![(*node).into(), resolver.into()])
    }

    /// Returns a filter for the `NewOwner` events of subnodes of a node.
    pub fn new_owner_filter(
        &self,
        node: &NodeId,
        from_block: BlockNumber,
    ) -> LogFilter {
        LogFilter {
            from_block,
            to_block: BlockNumber::Latest,
            address: self.address,
            topics: vec![Some(NewOwner::topic()), Some(node.into_b256())],
        }
    }
}

//------------ NewOwner ------------------------------------------------------

/// The event emitted by the registry when a subnode gets a new owner.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct NewOwner {
    /// The parent node.
    pub node: NodeId,

    /// The hash of the subnode’s label.
    pub label: LabelHash,

    /// The new owner of the subnode.
    pub owner: Address,

    /// The block the event was emitted in.
    pub block_number: Option<u64>,
}

impl NewOwner {
    /// The signature of the event.
    pub const SIGNATURE: &'static str = "NewOwner(bytes32,bytes32,address)";

    /// Returns the first topic of all `NewOwner` events.
    pub fn topic() -> B256 {
        keccak256(Self::SIGNATURE)
    }

    /// Parses an event from a log.
    ///
    /// The node and label are indexed and thus the second and third topic.
    /// The owner is the only data word.
    pub fn from_log(log: &Log) -> Result<Self, Error> {
        let [topic, node, label] = log.topics.as_slice() else {
            return Err(Error::BadEvent("NewOwner"));
        };
        if *topic != Self::topic() || log.data.len() != 32 {
            return Err(Error::BadEvent("NewOwner"));
        }
        Ok(NewOwner {
            node: (*node).into(),
            label: (*label).into(),
            owner: Address::from_word(B256::from_slice(&log.data)),
            block_number: log.block_number,
        })
    }
}

//------------ Resolver ------------------------------------------------------

/// A resolver contract.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct Resolver {
    address: Address,
}

impl Resolver {
    /// Creates a value for the resolver at the given address.
    pub const fn new(address: Address) -> Self {
        Resolver { address }
    }

    /// Returns the address of the resolver.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Returns the interface identifier of content hash support.
    pub fn contenthash_interface() -> FixedBytes<4> {
        selector(CONTENTHASH)
    }

    /// Returns whether the resolver implements an interface.
    pub async fn supports_interface(
        &self,
        reader: &dyn ChainReader,
        interface: FixedBytes<4>,
    ) -> Result<bool, Error> {
        call(reader, self.address, SUPPORTS_INTERFACE, vec![interface.into()])
            .await?
            .into_bool()
            .ok_or(Error::UnexpectedReturn(SUPPORTS_INTERFACE))
    }

    /// Returns the Ethereum address record of a node.
    pub async fn addr(
        &self,
        reader: &dyn ChainReader,
        node: &NodeId,
    ) -> Result<Address, Error> {
        call(reader, self.address, ADDR, vec![(*node).into()])
            .await?
            .into_address()
            .ok_or(Error::UnexpectedReturn(ADDR))
    }

    /// Returns the address record of a node for a coin type.
    pub async fn addr_for_coin(
        &self,
        reader: &dyn ChainReader,
        node: &NodeId,
        coin_type: u64,
    ) -> Result<Bytes, Error> {
        call(
            reader,
            self.address,
            ADDR_COIN,
            vec![(*node).into(), coin_type.into()],
        )
        .await?
        .into_bytes()
        .ok_or(Error::UnexpectedReturn(ADDR_COIN))
    }

    /// Returns the encoded content hash of a node.
    pub async fn contenthash(
        &self,
        reader: &dyn ChainReader,
        node: &NodeId,
    ) -> Result<Bytes, Error> {
        call(reader, self.address, CONTENTHASH, vec![(*node).into()])
            .await?
            .into_bytes()
            .ok_or(Error::UnexpectedReturn(CONTENTHASH))
    }

    /// Returns the legacy content record of a node.
    pub async fn content(
        &self,
        reader: &dyn ChainReader,
        node: &NodeId,
    ) -> Result<B256, Error> {
        call(reader, self.address, CONTENT, vec![(*node).into()])
            .await?
            .into_word()
            .ok_or(Error::UnexpectedReturn(CONTENT))
    }

    /// Returns a text record of a node.
    pub async fn text(
        &self,
        reader: &dyn ChainReader,
        node: &NodeId,
        key: &str,
    ) -> Result<String, Error> {
        call(reader, self.address, TEXT, vec![(*node).into(), key.into()])
            .await?
            .into_string()
            .ok_or(Error::UnexpectedReturn(TEXT))
    }

    /// Returns the name record of a reverse node.
    pub async fn name(
        &self,
        reader: &dyn ChainReader,
        node: &NodeId,
    ) -> Result<String, Error> {
        call(reader, self.address, NAME, vec![(*node).into()])
            .await?
            .into_string()
            .ok_or(Error::UnexpectedReturn(NAME))
    }

    /// Sets the Ethereum address record of a node.
    pub fn set_addr(&self, node: &NodeId, address: Address) -> Call {
        Call::new(SET_ADDR, vec![(*node).into(), address.into()])
    }

    /// Sets the address record of a node for a coin type.
    pub fn set_addr_for_coin(
        &self,
        node: &NodeId,
        coin_type: u64,
        address: Vec<u8>,
    ) -> Call {
        Call::new(
            SET_ADDR_COIN,
            vec![(*node).into(), coin_type.into(), address.into()],
        )
    }

    /// Sets the encoded content hash of a node.
    pub fn set_contenthash(&self, node: &NodeId, hash: Vec<u8>) -> Call {
        Call::new(SET_CONTENTHASH, vec![(*node).into(), hash.into()])
    }

    /// Sets the legacy content record of a node.
    pub fn set_content(&self, node: &NodeId, content: B256) -> Call {
        Call::new(SET_CONTENT, vec![(*node).into(), content.into()])
    }

    /// Sets a text record of a node.
    pub fn set_text(&self, node: &NodeId, key: &str, value: &str) -> Call {
        Call::new(
            SET_TEXT,
            vec![(*node).into(), key.into(), value.into()],
        )
    }

    /// Sets the name record of a reverse node.
    pub fn set_name(&self, node: &NodeId, name: &str) -> Call {
        Call::new(SET_NAME_NODE, vec![(*node).into(), name.into()])
    }
}

//------------ ReverseRegistrar ----------------------------------------------

/// The reverse registrar.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct ReverseRegistrar {
    address: Address,
}

impl ReverseRegistrar {
    /// Creates a value for the reverse registrar at the given address.
    pub const fn new(address: Address) -> Self {
        ReverseRegistrar { address }
    }

    /// Returns the address of the reverse registrar.
    pub fn address(&self) -> Address {
        self.address
    }

    /// Claims the sender’s reverse node and sets its name record.
    pub fn set_name(&self, name: &str) -> Call {
        Call::new(SET_NAME, vec![name.into()])
    }
}

//------------ Helpers -------------------------------------------------------

async fn call(
    reader: &dyn ChainReader,
    to: Address,
    signature: &'static str,
    args: Vec<Token>,
) -> Result<Token, Error> {
    let call = Call::new(signature, args);
    Ok(reader.call(to, &call).await?)
}

//============ Testing =======================================================
