//! An in-memory chain with a registry, resolvers, and a reverse registrar.

#![allow(dead_code)]

use alloy_primitives::{address, keccak256, Address, FixedBytes, B256};
use bytes::Bytes;
use fns::base::{LabelHash, Name, NodeId};
use fns::client::{
    Call, CallFuture, ChainReader, ChainWriter, CollaboratorError, Config,
    Decryptor, Fns, Log, LogFilter, NewOwner, PendingTransaction, Resolver,
    Token,
};
use std::collections::HashMap;
use std::str::FromStr;
use std::sync::{Arc, Mutex, MutexGuard};

//------------ Addresses -----------------------------------------------------

pub const REGISTRY: Address =
    address!("1111111111111111111111111111111111111111");
pub const REVERSE_REGISTRAR: Address =
    address!("2222222222222222222222222222222222222222");
pub const PUBLIC_RESOLVER: Address =
    address!("3333333333333333333333333333333333333333");
pub const LEGACY_RESOLVER: Address =
    address!("4444444444444444444444444444444444444444");
pub const BROKEN_RESOLVER: Address =
    address!("5555555555555555555555555555555555555555");
pub const ACCOUNT: Address =
    address!("d8dA6BF26964aF9D7eEd9e03E53415D37aA96045");

pub const NETWORK_ID: u64 = 4002;

//------------ MockChain -----------------------------------------------------

/// A chain keeping the state of the naming contracts in memory.
///
/// Submitted transactions are applied right away. Every transaction
/// is performed on behalf of [`ACCOUNT`] and no permissions are checked.
pub struct MockChain {
    state: Mutex<State>,
}

#[derive(Default)]
struct State {
    nodes: HashMap<B256, Entry>,
    resolvers: HashMap<Address, ResolverState>,
    logs: Vec<Log>,
    block: u64,
    reads: usize,
    submitted: Vec<(Address, Call)>,
}

#[derive(Clone, Copy, Default)]
struct Entry {
    owner: Address,
    resolver: Address,
    ttl: u64,
}

impl MockChain {
    /// Creates a chain with the resolvers and the reverse registrar.
    ///
    /// The account owns the root and `resolver.ftm` has the public
    /// resolver as its address record.
    pub fn new() -> Arc<Self> {
        let mut state = State::default();
        state.resolvers.insert(
            PUBLIC_RESOLVER,
            ResolverState::new(ResolverKind::Modern),
        );
        state.resolvers.insert(
            LEGACY_RESOLVER,
            ResolverState::new(ResolverKind::Legacy),
        );
        state.resolvers.insert(
            BROKEN_RESOLVER,
            ResolverState::new(ResolverKind::Broken),
        );
        state.nodes.entry(B256::ZERO).or_default().owner = ACCOUNT;
        let res = Arc::new(MockChain {
            state: Mutex::new(state),
        });
        res.register("reverse", ACCOUNT, Address::ZERO);
        res.register("addr.reverse", REVERSE_REGISTRAR, Address::ZERO);
        res.register("ftm", ACCOUNT, PUBLIC_RESOLVER);
        res.register("resolver.ftm", ACCOUNT, PUBLIC_RESOLVER);
        res.state()
            .resolvers
            .get_mut(&PUBLIC_RESOLVER)
            .unwrap()
            .addrs
            .insert(node_of("resolver.ftm"), PUBLIC_RESOLVER);
        res
    }

    /// Returns a client that can read and write.
    pub fn client(self: &Arc<Self>) -> Fns {
        self.reader_only().with_writer(self.clone())
    }

    /// Returns a client that can only read.
    pub fn reader_only(self: &Arc<Self>) -> Fns {
        let mut conf = Config::new();
        conf.set_registry(Some(REGISTRY));
        Fns::new(self.clone(), NETWORK_ID, &conf).unwrap()
    }

    /// Sets owner and resolver of a name, emitting a `NewOwner` event.
    pub fn register(&self, name: &str, owner: Address, resolver: Address) {
        let name = Name::from_str(name).unwrap();
        let (_, parent) = name.split_first().unwrap();
        let label = name.first_labelhash().unwrap();
        let mut state = self.state();
        let entry = state.nodes.entry(name.node().into_b256()).or_default();
        entry.owner = owner;
        entry.resolver = resolver;
        state.emit_new_owner(parent.node().into_b256(), label.into_b256(), owner);
    }

    /// Sets a raw content hash at a resolver.
    pub fn set_raw_contenthash(&self, resolver: Address, name: &str, raw: &[u8]) {
        self.state()
            .resolvers
            .get_mut(&resolver)
            .unwrap()
            .contenthashes
            .insert(node_of(name), Bytes::copy_from_slice(raw));
    }

    /// Returns the number of contract reads performed so far.
    pub fn reads(&self) -> usize {
        self.state().reads
    }

    /// Returns the transactions submitted so far.
    pub fn submitted(&self) -> Vec<(Address, Call)> {
        self.state().submitted.clone()
    }

    fn state(&self) -> MutexGuard<State> {
        self.state.lock().unwrap()
    }

    fn read(&self, to: Address, call: &Call) -> Result<Token, CollaboratorError> {
        let mut state = self.state();
        state.reads += 1;
        if to == REGISTRY {
            let node = word(call, 0);
            let entry = state.nodes.get(&node).copied().unwrap_or_default();
            return match call.signature {
                "owner(bytes32)" => Ok(entry.owner.into()),
                "resolver(bytes32)" => Ok(entry.resolver.into()),
                "ttl(bytes32)" => Ok(entry.ttl.into()),
                "recordExists(bytes32)" => {
                    Ok(state.nodes.contains_key(&node).into())
                }
                _ => Err(not_found(call)),
            };
        }
        match state.resolvers.get(&to) {
            Some(resolver) => resolver.read(call),
            None => Err(CollaboratorError::msg("call to non-contract")),
        }
    }

    fn apply(&self, to: Address, call: &Call) -> Result<(), CollaboratorError> {
        let mut state = self.state();
        state.submitted.push((to, call.clone()));
        if to == REGISTRY {
            match call.signature {
                "setOwner(bytes32,address)" => {
                    state.nodes.entry(word(call, 0)).or_default().owner =
                        address_arg(call, 1);
                }
                "setSubnodeOwner(bytes32,bytes32,address)" => {
                    let (parent, label) = (word(call, 0), word(call, 1));
                    let owner = address_arg(call, 2);
                    state.nodes.entry(child(parent, label)).or_default().owner =
                        owner;
                    state.emit_new_owner(parent, label, owner);
                }
                "setSubnodeRecord(bytes32,bytes32,address,address,uint64)" => {
                    let (parent, label) = (word(call, 0), word(call, 1));
                    let owner = address_arg(call, 2);
                    state.nodes.insert(
                        child(parent, label),
                        Entry {
                            owner,
                            resolver: address_arg(call, 3),
                            ttl: uint(call, 4),
                        },
                    );
                    state.emit_new_owner(parent, label, owner);
                }
                "setResolver(bytes32,address)" => {
                    state.nodes.entry(word(call, 0)).or_default().resolver =
                        address_arg(call, 1);
                }
                _ => return Err(not_found(call)),
            }
            return Ok(());
        }
        if to == REVERSE_REGISTRAR {
            if call.signature != "setName(string)" {
                return Err(not_found(call));
            }
            let node = Name::reverse(&ACCOUNT).node().into_b256();
            state.nodes.insert(
                node,
                Entry {
                    owner: ACCOUNT,
                    resolver: PUBLIC_RESOLVER,
                    ttl: 0,
                },
            );
            let name = string(call, 0);
            state
                .resolvers
                .get_mut(&PUBLIC_RESOLVER)
                .unwrap()
                .names
                .insert(node, name);
            return Ok(());
        }
        match state.resolvers.get_mut(&to) {
            Some(resolver) => resolver.write(call),
            None => Err(CollaboratorError::msg("call to non-contract")),
        }
    }
}

impl State {
    fn emit_new_owner(&mut self, node: B256, label: B256, owner: Address) {
        self.block += 1;
        self.logs.push(Log {
            address: REGISTRY,
            topics: vec![NewOwner::topic(), node, label],
            data: owner.into_word().to_vec().into(),
            block_number: Some(self.block),
        });
    }
}

impl ChainReader for MockChain {
    fn call<'a>(&'a self, to: Address, call: &'a Call) -> CallFuture<'a, Token> {
        let res = self.read(to, call);
        Box::pin(async move { res })
    }

    fn logs<'a>(&'a self, filter: &'a LogFilter) -> CallFuture<'a, Vec<Log>> {
        let res: Vec<_> = self
            .state()
            .logs
            .iter()
            .filter(|log| filter.matches(log))
            .cloned()
            .collect();
        Box::pin(async move { Ok(res) })
    }
}

impl ChainWriter for MockChain {
    fn account(&self) -> CallFuture<'_, Address> {
        Box::pin(async { Ok(ACCOUNT) })
    }

    fn submit(
        &self,
        to: Address,
        call: Call,
    ) -> CallFuture<'_, Box<dyn PendingTransaction>> {
        let res = self.apply(to, &call).map(|_| {
            let count = self.state().submitted.len() as u64;
            Box::new(MockTransaction(keccak256(count.to_be_bytes())))
                as Box<dyn PendingTransaction>
        });
        Box::pin(async move { res })
    }
}

//------------ MockTransaction -----------------------------------------------

#[derive(Debug)]
pub struct MockTransaction(B256);

impl PendingTransaction for MockTransaction {
    fn hash(&self) -> B256 {
        self.0
    }

    fn confirm(self: Box<Self>) -> CallFuture<'static, ()> {
        Box::pin(async { Ok(()) })
    }
}

//------------ ResolverState -------------------------------------------------

#[derive(Clone, Copy, Eq, PartialEq)]
enum ResolverKind {
    /// Supports content hashes.
    Modern,

    /// Only has the old content record.
    Legacy,

    /// Reverts every call.
    Broken,
}

struct ResolverState {
    kind: ResolverKind,
    addrs: HashMap<B256, Address>,
    coin_addrs: HashMap<(B256, u64), Bytes>,
    contenthashes: HashMap<B256, Bytes>,
    contents: HashMap<B256, B256>,
    texts: HashMap<(B256, String), String>,
    names: HashMap<B256, String>,
}

impl ResolverState {
    fn new(kind: ResolverKind) -> Self {
        ResolverState {
            kind,
            addrs: HashMap::new(),
            coin_addrs: HashMap::new(),
            contenthashes: HashMap::new(),
            contents: HashMap::new(),
            texts: HashMap::new(),
            names: HashMap::new(),
        }
    }

    fn read(&self, call: &Call) -> Result<Token, CollaboratorError> {
        if self.kind == ResolverKind::Broken {
            return Err(CollaboratorError::msg("execution reverted"));
        }
        match call.signature {
            "supportsInterface(bytes4)" => Ok(Token::Bool(
                self.kind == ResolverKind::Modern
                    && interface(call, 0) == Resolver::contenthash_interface(),
            )),
            "addr(bytes32)" => Ok(self
                .addrs
                .get(&word(call, 0))
                .copied()
                .unwrap_or_default()
                .into()),
            "addr(bytes32,uint256)" => Ok(Token::Bytes(
                self.coin_addrs
                    .get(&(word(call, 0), uint(call, 1)))
                    .cloned()
                    .unwrap_or_default(),
            )),
            "contenthash(bytes32)" if self.kind == ResolverKind::Modern => {
                Ok(Token::Bytes(
                    self.contenthashes
                        .get(&word(call, 0))
                        .cloned()
                        .unwrap_or_default(),
                ))
            }
            "content(bytes32)" => Ok(self
                .contents
                .get(&word(call, 0))
                .copied()
                .unwrap_or_default()
                .into()),
            "text(bytes32,string)" => Ok(self
                .texts
                .get(&(word(call, 0), string(call, 1)))
                .cloned()
                .unwrap_or_default()
                .into()),
            "name(bytes32)" => Ok(self
                .names
                .get(&word(call, 0))
                .cloned()
                .unwrap_or_default()
                .into()),
            _ => Err(not_found(call)),
        }
    }

    fn write(&mut self, call: &Call) -> Result<(), CollaboratorError> {
        if self.kind == ResolverKind::Broken {
            return Err(CollaboratorError::msg("execution reverted"));
        }
        let node = word(call, 0);
        match call.signature {
            "setAddr(bytes32,address)" => {
                self.addrs.insert(node, address_arg(call, 1));
            }
            "setAddr(bytes32,uint256,bytes)" => {
                self.coin_addrs.insert((node, uint(call, 1)), bytes(call, 2));
            }
            "setContenthash(bytes32,bytes)" => {
                self.contenthashes.insert(node, bytes(call, 1));
            }
            "setContent(bytes32,bytes32)" => {
                self.contents.insert(node, word(call, 1));
            }
            "setText(bytes32,string,string)" => {
                self.texts.insert((node, string(call, 1)), string(call, 2));
            }
            "setName(bytes32,string)" => {
                self.names.insert(node, string(call, 1));
            }
            _ => return Err(not_found(call)),
        }
        Ok(())
    }
}

//------------ MapDecryptor --------------------------------------------------

/// A decryptor knowing a fixed set of labels.
pub struct MapDecryptor(HashMap<LabelHash, String>);

impl MapDecryptor {
    pub fn new(labels: &[&str]) -> Arc<Self> {
        Arc::new(MapDecryptor(
            labels
                .iter()
                .map(|label| (LabelHash::of(label), label.to_string()))
                .collect(),
        ))
    }
}

impl Decryptor for MapDecryptor {
    fn decrypt<'a>(
        &'a self,
        hashes: &'a [LabelHash],
    ) -> CallFuture<'a, Vec<Option<String>>> {
        let res: Vec<_> =
            hashes.iter().map(|hash| self.0.get(hash).cloned()).collect();
        Box::pin(async move { Ok(res) })
    }
}

//------------ Helpers -------------------------------------------------------

pub fn node_of(name: &str) -> B256 {
    Name::from_str(name).unwrap().node().into_b256()
}

fn child(parent: B256, label: B256) -> B256 {
    NodeId::from(parent).child(&LabelHash::from(label)).into_b256()
}

fn not_found(call: &Call) -> CollaboratorError {
    CollaboratorError::msg(format!("function {} not found", call.signature))
}

fn word(call: &Call, idx: usize) -> B256 {
    match call.args.get(idx) {
        Some(Token::Word(value)) => *value,
        other => panic!("{}: expected word, got {:?}", call.signature, other),
    }
}

fn address_arg(call: &Call, idx: usize) -> Address {
    match call.args.get(idx) {
        Some(Token::Address(value)) => *value,
        other => panic!("{}: expected address, got {:?}", call.signature, other),
    }
}

fn uint(call: &Call, idx: usize) -> u64 {
    match call.args.get(idx) {
        Some(Token::Uint(value)) => u64::try_from(*value).unwrap(),
        other => panic!("{}: expected uint, got {:?}", call.signature, other),
    }
}

fn string(call: &Call, idx: usize) -> String {
    match call.args.get(idx) {
        Some(Token::String(value)) => value.clone(),
        other => panic!("{}: expected string, got {:?}", call.signature, other),
    }
}

fn bytes(call: &Call, idx: usize) -> Bytes {
    match call.args.get(idx) {
        Some(Token::Bytes(value)) => value.clone(),
        other => panic!("{}: expected bytes, got {:?}", call.signature, other),
    }
}

fn interface(call: &Call, idx: usize) -> FixedBytes<4> {
    match call.args.get(idx) {
        Some(Token::InterfaceId(value)) => *value,
        other => panic!("{}: expected bytes4, got {:?}", call.signature, other),
    }
}
