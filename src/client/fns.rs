//! The client.
//!
//! This is a private module. Its public types are re-exported by the parent
//! module.

use super::chain::{
    BlockNumber, Call, ChainReader, ChainWriter, Decryptor, NoDecryptor,
    PendingTransaction,
};
use super::coin::{AddressFormat, CoinRegistry, StaticCoinRegistry};
use super::conf::Config;
use super::contract::{NewOwner, Registry, Resolver, ReverseRegistrar};
use super::error::Error;
use super::records::{
    Content, DomainDetails, DomainNode, SubdomainEntry, EMPTY_ADDRESS,
};
use super::subdomains::{reconcile, EventOrder, LabelDictionary, LocalLabels};
use crate::base::{is_encoded_labelhash, LabelHash, Name, NodeId};
use crate::contenthash;
use alloy_primitives::{Address, B256};
use futures_util::future::{join, try_join, try_join_all};
use std::str::FromStr;
use std::sync::Arc;
use tracing::{debug, warn};

//------------ Fns -----------------------------------------------------------

/// A client for a name registry.
///
/// The client is created for a network with a [`ChainReader`] used for
/// all read operations. State-changing operations additionally need a
/// [`ChainWriter`] provided via [`with_writer`][Self::with_writer].
///
/// All operations take names as strings. These are normalized and hashed
/// before any contract is contacted, so an invalid name always fails
/// without I/O.
///
/// Read operations that query a resolver don’t fail if the resolver
/// misbehaves. Instead they log a warning and return a sentinel value as
/// documented with each operation. Errors from the registry itself are
/// returned.
#[derive(Clone)]
pub struct Fns {
    /// Read access to the chain.
    reader: Arc<dyn ChainReader>,

    /// Write access to the chain if available.
    writer: Option<Arc<dyn ChainWriter>>,

    /// The source for labels of subdomains.
    decryptor: Arc<dyn Decryptor>,

    /// The known coin address formats.
    coins: Arc<dyn CoinRegistry>,

    /// Locally known labels of subdomains.
    labels: Arc<dyn LocalLabels>,

    /// The registry contract.
    registry: Registry,

    /// The network we are talking to.
    network_id: u64,

    /// The block to start scanning for registry events.
    start_block: u64,

    /// The name of the public resolver.
    public_resolver: Name,
}

/// # Creation
///
impl Fns {
    /// Creates a new client for the given network.
    ///
    /// Fails if the config has no registry for the network or if the
    /// configured public resolver isn’t a valid name.
    pub fn new(
        reader: Arc<dyn ChainReader>,
        network_id: u64,
        conf: &Config,
    ) -> Result<Self, Error> {
        let network = conf
            .network(network_id)
            .ok_or(Error::UnsupportedNetwork(network_id))?;
        Ok(Fns {
            reader,
            writer: None,
            decryptor: Arc::new(NoDecryptor),
            coins: Arc::new(StaticCoinRegistry::default()),
            labels: Arc::new(LabelDictionary::new()),
            registry: Registry::new(network.registry),
            network_id,
            start_block: network.start_block,
            public_resolver: Name::from_str(conf.public_resolver())?,
        })
    }

    /// Adds write access to the client.
    pub fn with_writer(mut self, writer: Arc<dyn ChainWriter>) -> Self {
        self.writer = Some(writer);
        self
    }

    /// Replaces the decryptor for subdomain labels.
    ///
    /// By default, no labels are decrypted.
    pub fn with_decryptor(mut self, decryptor: Arc<dyn Decryptor>) -> Self {
        self.decryptor = decryptor;
        self
    }

    /// Replaces the coin registry.
    ///
    /// By default, a [`StaticCoinRegistry::default()`] is used.
    pub fn with_coins(mut self, coins: Arc<dyn CoinRegistry>) -> Self {
        self.coins = coins;
        self
    }

    /// Replaces the local dictionary of subdomain labels.
    ///
    /// By default, the dictionary is empty.
    pub fn with_labels(mut self, labels: Arc<dyn LocalLabels>) -> Self {
        self.labels = labels;
        self
    }
}

/// # Access to Properties
///
impl Fns {
    /// Returns the network ID.
    pub fn network_id(&self) -> u64 {
        self.network_id
    }

    /// Returns the registry contract.
    pub fn registry(&self) -> Registry {
        self.registry
    }

    /// Returns the block where scanning for registry events starts.
    pub fn start_block(&self) -> u64 {
        self.start_block
    }

    /// Returns whether the client can perform state-changing operations.
    pub fn has_writer(&self) -> bool {
        self.writer.is_some()
    }

    fn reader(&self) -> &dyn ChainReader {
        self.reader.as_ref()
    }

    fn writer(&self) -> Result<&dyn ChainWriter, Error> {
        self.writer.as_deref().ok_or(Error::NoSigner)
    }
}

/// # Registry Queries
///
impl Fns {
    /// Returns the owner of a name.
    pub async fn get_owner(&self, name: &str) -> Result<Address, Error> {
        let node = parse_node(name)?;
        self.registry.owner(self.reader(), &node).await
    }

    /// Returns the resolver of a name.
    pub async fn get_resolver(&self, name: &str) -> Result<Address, Error> {
        let node = parse_node(name)?;
        self.registry.resolver(self.reader(), &node).await
    }

    /// Returns the caching time-to-live of a name.
    pub async fn get_ttl(&self, name: &str) -> Result<u64, Error> {
        let node = parse_node(name)?;
        self.registry.ttl(self.reader(), &node).await
    }

    /// Returns whether the registry has its own record for a name.
    pub async fn is_migrated(&self, name: &str) -> Result<bool, Error> {
        let node = parse_node(name)?;
        self.registry.record_exists(self.reader(), &node).await
    }

    /// Returns the owner of a subnode given by label hash and parent.
    pub async fn get_owner_with_labelhash(
        &self,
        labelhash: &LabelHash,
        parent: &NodeId,
    ) -> Result<Address, Error> {
        self.registry
            .owner(self.reader(), &parent.child(labelhash))
            .await
    }

    /// Returns the resolver of a subnode given by label hash and parent.
    pub async fn get_resolver_with_labelhash(
        &self,
        labelhash: &LabelHash,
        parent: &NodeId,
    ) -> Result<Address, Error> {
        self.registry
            .resolver(self.reader(), &parent.child(labelhash))
            .await
    }

    /// Returns the `NewOwner` events for subnodes of a node.
    ///
    /// The events are returned in the order they were emitted.
    pub async fn get_new_owner_events(
        &self,
        node: &NodeId,
        from_block: BlockNumber,
    ) -> Result<Vec<NewOwner>, Error> {
        let filter = self.registry.new_owner_filter(node, from_block);
        debug!("querying NewOwner events for {} from {:?}", node, from_block);
        let logs = self.reader().logs(&filter).await?;
        logs.iter().map(NewOwner::from_log).collect()
    }
}

/// # Resolver Queries
///
impl Fns {
    /// Returns the Ethereum address of a name.
    ///
    /// Returns [`Address::ZERO`] if the name has no resolver or the
    /// resolver doesn’t answer.
    pub async fn get_address(&self, name: &str) -> Result<Address, Error> {
        let resolver = self.get_resolver(name).await?;
        self.get_eth_address_with_resolver(name, resolver).await
    }

    /// Returns the Ethereum address of a name from the given resolver.
    ///
    /// Returns [`Address::ZERO`] if the resolver is zero or doesn’t answer.
    pub async fn get_eth_address_with_resolver(
        &self,
        name: &str,
        resolver: Address,
    ) -> Result<Address, Error> {
        let node = parse_node(name)?;
        if resolver.is_zero() {
            return Ok(Address::ZERO);
        }
        match Resolver::new(resolver).addr(self.reader(), &node).await {
            Ok(addr) => Ok(addr),
            Err(err) => {
                warn!("address of {} from resolver {}: {}", name, resolver, err);
                Ok(Address::ZERO)
            }
        }
    }

    /// Returns the address of a name for the given coin.
    ///
    /// Returns [`EMPTY_ADDRESS`] if the name has no resolver, the address
    /// isn’t set, or the resolver doesn’t answer. Fails right away if the
    /// coin key is unknown.
    pub async fn get_addr(&self, name: &str, key: &str) -> Result<String, Error> {
        self.coins.lookup(key)?;
        let resolver = self.get_resolver(name).await?;
        self.get_addr_with_resolver(name, key, resolver).await
    }

    /// Returns the address of a name for a coin from the given resolver.
    ///
    /// Returns [`EMPTY_ADDRESS`] if the resolver is zero, the address
    /// isn’t set, or the resolver doesn’t answer.
    pub async fn get_addr_with_resolver(
        &self,
        name: &str,
        key: &str,
        resolver: Address,
    ) -> Result<String, Error> {
        let format = self.coins.lookup(key)?;
        let node = parse_node(name)?;
        if resolver.is_zero() {
            return Ok(EMPTY_ADDRESS.into());
        }
        let addr = Resolver::new(resolver)
            .addr_for_coin(self.reader(), &node, format.coin_type())
            .await;
        let addr = match addr {
            Ok(addr) if addr.is_empty() => return Ok(EMPTY_ADDRESS.into()),
            Ok(addr) => addr,
            Err(err) => {
                warn!("{} address of {} from {}: {}", key, name, resolver, err);
                return Ok(EMPTY_ADDRESS.into());
            }
        };
        match format.encode(&addr) {
            Ok(addr) => Ok(addr),
            Err(err) => {
                warn!("{} address of {}: {}", key, name, err);
                Ok(EMPTY_ADDRESS.into())
            }
        }
    }

    /// Returns the content record of a name.
    ///
    /// Returns [`Content::Empty`] if the name has no resolver and
    /// [`Content::Error`] if the record can’t be retrieved or decoded.
    pub async fn get_content(&self, name: &str) -> Result<Content, Error> {
        let resolver = self.get_resolver(name).await?;
        self.get_content_with_resolver(name, resolver).await
    }

    /// Returns the content record of a name from the given resolver.
    ///
    /// If the resolver supports content hashes, the decoded content hash
    /// is returned. Otherwise the legacy content record is.
    pub async fn get_content_with_resolver(
        &self,
        name: &str,
        resolver: Address,
    ) -> Result<Content, Error> {
        let node = parse_node(name)?;
        if resolver.is_zero() {
            return Ok(Content::Empty);
        }
        match self.query_content(&node, Resolver::new(resolver)).await {
            Ok(content) => Ok(content),
            Err(err) => {
                warn!("content of {} from resolver {}: {}", name, resolver, err);
                Ok(Content::Error(format!(
                    "cannot get content from resolver {}",
                    resolver
                )))
            }
        }
    }

    async fn query_content(
        &self,
        node: &NodeId,
        resolver: Resolver,
    ) -> Result<Content, Error> {
        let supported = resolver
            .supports_interface(
                self.reader(),
                Resolver::contenthash_interface(),
            )
            .await?;
        if !supported {
            let content = resolver.content(self.reader(), node).await?;
            return Ok(Content::OldContent(content));
        }
        let encoded = resolver.contenthash(self.reader(), node).await?;
        Ok(match contenthash::decode(&encoded) {
            Ok(decoded) => Content::ContentHash(decoded.to_string()),
            Err(err) => Content::Error(err.to_string()),
        })
    }

    /// Returns a text record of a name.
    ///
    /// Returns an empty string if the name has no resolver or the
    /// resolver doesn’t answer.
    pub async fn get_text(&self, name: &str, key: &str) -> Result<String, Error> {
        let resolver = self.get_resolver(name).await?;
        self.get_text_with_resolver(name, key, resolver).await
    }

    /// Returns a text record of a name from the given resolver.
    pub async fn get_text_with_resolver(
        &self,
        name: &str,
        key: &str,
        resolver: Address,
    ) -> Result<String, Error> {
        let node = parse_node(name)?;
        if resolver.is_zero() {
            return Ok(String::new());
        }
        match Resolver::new(resolver).text(self.reader(), &node, key).await {
            Ok(text) => Ok(text),
            Err(err) => {
                warn!("text {:?} of {} from {}: {}", key, name, resolver, err);
                Ok(String::new())
            }
        }
    }

    /// Returns the name an address has claimed for itself.
    ///
    /// Returns `None` if the address’s reverse name has no resolver, no
    /// name record, or the resolver doesn’t answer.
    pub async fn get_name(
        &self,
        address: Address,
    ) -> Result<Option<String>, Error> {
        let reverse = Name::reverse(&address);
        let resolver =
            self.registry.resolver(self.reader(), &reverse.node()).await?;
        Ok(self.get_name_with_resolver(address, resolver).await)
    }

    /// Returns the name of an address from the given resolver.
    pub async fn get_name_with_resolver(
        &self,
        address: Address,
        resolver: Address,
    ) -> Option<String> {
        if resolver.is_zero() {
            return None;
        }
        let node = Name::reverse(&address).node();
        match Resolver::new(resolver).name(self.reader(), &node).await {
            Ok(name) if name.is_empty() => None,
            Ok(name) => Some(name),
            Err(err) => {
                warn!("name of {} from resolver {}: {}", address, resolver, err);
                None
            }
        }
    }
}

/// # Combined Queries
///
impl Fns {
    /// Adds the address and content records to a registry entry.
    ///
    /// Both records are queried at the same time. If either fails, the
    /// address is zero and the content is an error.
    pub async fn get_resolver_details(&self, node: DomainNode) -> DomainDetails {
        let name = node.name.as_str();
        let (addr, content) = join(
            self.get_eth_address_with_resolver(name, node.resolver),
            self.get_content_with_resolver(name, node.resolver),
        )
        .await;
        let (addr, content) = match (addr, content) {
            (Ok(addr), Ok(content)) => (addr, content),
            (Err(err), _) | (_, Err(err)) => {
                warn!("resolver details of {}: {}", name, err);
                (
                    Address::ZERO,
                    Content::Error(format!("cannot get details: {}", err)),
                )
            }
        };
        DomainDetails {
            node,
            addr: Some(addr),
            content: Some(content),
        }
    }

    /// Returns the registry entry and main records of a name.
    ///
    /// The records are only present if the name has a resolver.
    pub async fn get_domain_details(
        &self,
        name: &str,
    ) -> Result<DomainDetails, Error> {
        let name = Name::from_str(name)?;
        let node = name.node();
        let (owner, resolver) = try_join(
            self.registry.owner(self.reader(), &node),
            self.registry.resolver(self.reader(), &node),
        )
        .await?;
        let node = DomainNode {
            label: name
                .first_label()
                .filter(|label| !is_encoded_labelhash(label))
                .map(Into::into),
            labelhash: name.first_labelhash(),
            name,
            owner,
            resolver,
        };
        if node.has_resolver() {
            Ok(self.get_resolver_details(node).await)
        } else {
            Ok(DomainDetails {
                node,
                addr: None,
                content: None,
            })
        }
    }

    /// Returns the subdomains of a name.
    ///
    /// The subdomains are taken from the registry’s `NewOwner` events and
    /// listed in the order they first appeared. Their labels are recovered
    /// from the local dictionary and the decryptor where possible.
    pub async fn get_subdomains(
        &self,
        name: &str,
    ) -> Result<Vec<SubdomainEntry>, Error> {
        let parent = Name::from_str(name)?;
        let parent_node = parent.node();
        let events = self
            .get_new_owner_events(
                &parent_node,
                BlockNumber::Number(self.start_block),
            )
            .await?;
        let hashes: Vec<_> = events.iter().map(|event| event.label).collect();
        let labels = reconcile(
            &parent,
            &hashes,
            EventOrder::Chronological,
            self.labels.as_ref(),
            self.decryptor.as_ref(),
        )
        .await;
        let owners = try_join_all(labels.iter().map(|label| {
            self.get_owner_with_labelhash(&label.labelhash, &parent_node)
        }))
        .await?;
        Ok(labels
            .into_iter()
            .zip(owners)
            .map(|(label, owner)| label.into_entry(owner))
            .collect())
    }
}

/// # Registry Updates
///
impl Fns {
    /// Transfers a name to a new owner.
    pub async fn set_owner(
        &self,
        name: &str,
        owner: Address,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        let node = parse_node(name)?;
        self.submit(self.registry.address(), self.registry.set_owner(&node, owner))
            .await
    }

    /// Transfers a name to a new owner via its parent.
    ///
    /// This needs to be done by the owner of the parent.
    pub async fn set_subnode_owner(
        &self,
        name: &str,
        owner: Address,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        let (parent, label) = parse_subnode(name)?;
        self.submit(
            self.registry.address(),
            self.registry.set_subnode_owner(&parent, &label, owner),
        )
        .await
    }

    /// Sets owner, resolver, and TTL of a name via its parent.
    ///
    /// If `ttl` is `None`, the current TTL of the name is kept.
    pub async fn set_subnode_record(
        &self,
        name: &str,
        owner: Address,
        resolver: Address,
        ttl: Option<u64>,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        let (parent, label) = parse_subnode(name)?;
        let writer = self.writer()?;
        let ttl = match ttl {
            Some(ttl) => ttl,
            None => {
                self.registry
                    .ttl(self.reader(), &parent.child(&label))
                    .await?
            }
        };
        let call = self
            .registry
            .set_subnode_record(&parent, &label, owner, resolver, ttl);
        submit(writer, self.registry.address(), call).await
    }

    /// Sets the resolver of a name.
    pub async fn set_resolver(
        &self,
        name: &str,
        resolver: Address,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        let node = parse_node(name)?;
        self.submit(
            self.registry.address(),
            self.registry.set_resolver(&node, resolver),
        )
        .await
    }

    /// Creates a subdomain owned by the signer.
    ///
    /// The subdomain uses the public resolver.
    pub async fn create_subdomain(
        &self,
        name: &str,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        parse_subnode(name)?;
        let account = self.writer()?.account().await?;
        let resolver = self.get_address(self.public_resolver.as_str()).await?;
        self.set_subnode_record(name, account, resolver, None).await
    }

    /// Deletes a subdomain.
    ///
    /// This sets both owner and resolver to zero. The TTL is kept.
    pub async fn delete_subdomain(
        &self,
        name: &str,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        self.set_subnode_record(name, Address::ZERO, Address::ZERO, None)
            .await
    }
}

/// # Resolver Updates
///
/// Each update has two versions: one that takes the resolver as an
/// argument and one that looks it up first. Updates fail with
/// [`Error::NoResolver`] if the resolver is zero.
impl Fns {
    /// Sets the Ethereum address of a name.
    pub async fn set_address(
        &self,
        name: &str,
        address: Address,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        let resolver = self.get_resolver(name).await?;
        self.set_address_with_resolver(name, address, resolver).await
    }

    /// Sets the Ethereum address of a name at the given resolver.
    pub async fn set_address_with_resolver(
        &self,
        name: &str,
        address: Address,
        resolver: Address,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        let node = parse_node(name)?;
        let resolver = resolver_of(resolver)?;
        self.submit(resolver.address(), resolver.set_addr(&node, address))
            .await
    }

    /// Sets the address of a name for a coin.
    ///
    /// An empty address removes the record. The address is converted
    /// before anything else happens, so an unknown coin key or invalid
    /// address fails without I/O.
    pub async fn set_addr(
        &self,
        name: &str,
        key: &str,
        address: &str,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        parse_node(name)?;
        decode_coin_address(self.coins.lookup(key)?, address)?;
        let resolver = self.get_resolver(name).await?;
        self.set_addr_with_resolver(name, key, address, resolver).await
    }

    /// Sets the address of a name for a coin at the given resolver.
    pub async fn set_addr_with_resolver(
        &self,
        name: &str,
        key: &str,
        address: &str,
        resolver: Address,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        let format = self.coins.lookup(key)?;
        let bytes = decode_coin_address(format, address)?;
        let node = parse_node(name)?;
        let resolver = resolver_of(resolver)?;
        self.submit(
            resolver.address(),
            resolver.set_addr_for_coin(&node, format.coin_type(), bytes),
        )
        .await
    }

    /// Sets the legacy content record of a name.
    pub async fn set_content(
        &self,
        name: &str,
        content: B256,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        let resolver = self.get_resolver(name).await?;
        self.set_content_with_resolver(name, content, resolver).await
    }

    /// Sets the legacy content record of a name at the given resolver.
    pub async fn set_content_with_resolver(
        &self,
        name: &str,
        content: B256,
        resolver: Address,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        let node = parse_node(name)?;
        let resolver = resolver_of(resolver)?;
        self.submit(resolver.address(), resolver.set_content(&node, content))
            .await
    }

    /// Sets the content hash of a name.
    ///
    /// The content is given as a URI such as `ipfs://…`. An empty string
    /// or a hex string of only zeros removes the record. The URI is
    /// encoded before anything else happens.
    pub async fn set_contenthash(
        &self,
        name: &str,
        content: &str,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        parse_node(name)?;
        encode_contenthash(content)?;
        let resolver = self.get_resolver(name).await?;
        self.set_contenthash_with_resolver(name, content, resolver)
            .await
    }

    /// Sets the content hash of a name at the given resolver.
    pub async fn set_contenthash_with_resolver(
        &self,
        name: &str,
        content: &str,
        resolver: Address,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        let encoded = encode_contenthash(content)?;
        let node = parse_node(name)?;
        let resolver = resolver_of(resolver)?;
        self.submit(
            resolver.address(),
            resolver.set_contenthash(&node, encoded),
        )
        .await
    }

    /// Sets a text record of a name.
    pub async fn set_text(
        &self,
        name: &str,
        key: &str,
        value: &str,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        let resolver = self.get_resolver(name).await?;
        self.set_text_with_resolver(name, key, value, resolver).await
    }

    /// Sets a text record of a name at the given resolver.
    pub async fn set_text_with_resolver(
        &self,
        name: &str,
        key: &str,
        value: &str,
        resolver: Address,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        let node = parse_node(name)?;
        let resolver = resolver_of(resolver)?;
        self.submit(resolver.address(), resolver.set_text(&node, key, value))
            .await
    }
}

/// # Reverse Names
///
impl Fns {
    /// Claims the signer’s reverse name and sets its name record.
    ///
    /// This goes through the reverse registrar, which is the owner of
    /// `addr.reverse`.
    pub async fn claim_and_set_reverse_record_name(
        &self,
        name: &str,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        let name = Name::from_str(name)?;
        let writer = self.writer()?;
        let reverse_node = Name::from_str(Name::REVERSE_SUFFIX)?.node();
        let registrar = ReverseRegistrar::new(
            self.registry.owner(self.reader(), &reverse_node).await?,
        );
        submit(writer, registrar.address(), registrar.set_name(name.as_str()))
            .await
    }

    /// Sets the name record of the signer’s reverse name.
    ///
    /// The reverse name must have been claimed before and have a resolver.
    pub async fn set_reverse_record_name(
        &self,
        name: &str,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        let name = Name::from_str(name)?;
        let writer = self.writer()?;
        let account = writer.account().await?;
        let reverse_node = Name::reverse(&account).node();
        let resolver = resolver_of(
            self.registry.resolver(self.reader(), &reverse_node).await?,
        )?;
        submit(
            writer,
            resolver.address(),
            resolver.set_name(&reverse_node, name.as_str()),
        )
        .await
    }
}

/// # Helpers
///
impl Fns {
    async fn submit(
        &self,
        to: Address,
        call: Call,
    ) -> Result<Box<dyn PendingTransaction>, Error> {
        submit(self.writer()?, to, call).await
    }
}

async fn submit(
    writer: &dyn ChainWriter,
    to: Address,
    call: Call,
) -> Result<Box<dyn PendingTransaction>, Error> {
    debug!("submitting {} to {}", call.signature, to);
    let tx = writer.submit(to, call).await?;
    debug!("submitted transaction {}", tx.hash());
    Ok(tx)
}

fn parse_node(name: &str) -> Result<NodeId, Error> {
    Ok(Name::from_str(name)?.node())
}

/// Returns the parent node and label hash of a name.
fn parse_subnode(name: &str) -> Result<(NodeId, LabelHash), Error> {
    let name = Name::from_str(name)?;
    match (name.parent(), name.first_labelhash()) {
        (Some(parent), Some(label)) => Ok((parent.node(), label)),
        _ => Err(Error::RootName),
    }
}

fn resolver_of(address: Address) -> Result<Resolver, Error> {
    if address.is_zero() {
        Err(Error::NoResolver)
    } else {
        Ok(Resolver::new(address))
    }
}

fn decode_coin_address(
    format: &dyn AddressFormat,
    address: &str,
) -> Result<Vec<u8>, Error> {
    if address.is_empty() {
        Ok(Vec::new())
    } else {
        Ok(format.decode(address)?)
    }
}

/// Encodes a content hash URI for a resolver.
///
/// An empty string or all-zero hex clears the record.
fn encode_contenthash(content: &str) -> Result<Vec<u8>, Error> {
    let digits = content.strip_prefix("0x").unwrap_or(content);
    if digits.bytes().all(|ch| ch == b'0') {
        Ok(Vec::new())
    } else {
        Ok(contenthash::encode(content)?)
    }
}

//============ Testing =======================================================
