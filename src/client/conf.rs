//! Client configuration.
//!
//! The configuration mostly determines where the registry contract lives.
//! It contains a table of known networks, each with the address of its
//! registry and the block the registry was deployed in. The client picks
//! the entry for the network it is talking to unless an explicit registry
//! address overrides the table.

use alloy_primitives::{address, Address};
use std::collections::HashMap;

#[cfg(feature = "serde")]
use serde::{Deserialize, Serialize};

//------------ Default Values ------------------------------------------------

/// The name whose address record points to the public resolver.
const DEF_PUBLIC_RESOLVER: &str = "resolver.ftm";

/// The networks known by default.
const DEF_NETWORKS: &[(u64, Address, u64)] = &[
    // Fantom testnet.
    (4002, address!("7ab9cf80efb603938Ed723202c5Cbf80DD653217"), 0),
    // Harmony testnet.
    (
        1666700000,
        address!("23ca23b6f2C40BF71fe4Da7C5d6396EE2C018e6A"),
        0,
    ),
    // Harmony mainnet.
    (
        1666600000,
        address!("3fa4135B88cE1035Fed373F0801118a3340B37e7"),
        0,
    ),
];

//------------ NetworkConf ---------------------------------------------------

/// The deployment of the registry on one network.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(rename_all = "kebab-case")
)]
pub struct NetworkConf {
    /// The address of the registry contract.
    pub registry: Address,

    /// The block to start scanning for registry events.
    #[cfg_attr(feature = "serde", serde(default))]
    pub start_block: u64,
}

impl NetworkConf {
    /// Creates a new network entry.
    pub fn new(registry: Address, start_block: u64) -> Self {
        NetworkConf {
            registry,
            start_block,
        }
    }
}

//------------ Config --------------------------------------------------------

/// Configuration of a client.
#[derive(Clone, Debug, Eq, PartialEq)]
#[cfg_attr(
    feature = "serde",
    derive(Deserialize, Serialize),
    serde(default, rename_all = "kebab-case")
)]
pub struct Config {
    /// The registries of the known networks by network ID.
    networks: HashMap<u64, NetworkConf>,

    /// A registry address that overrides the network table.
    registry: Option<Address>,

    /// The name of the public resolver.
    public_resolver: String,
}

impl Config {
    /// Creates a new config with default values.
    ///
    /// The default values are documented with the relevant methods.
    pub fn new() -> Self {
        Default::default()
    }

    /// Returns the table of known networks.
    ///
    /// By default, this contains the Fantom testnet as well as Harmony
    /// testnet and mainnet.
    pub fn networks(&self) -> &HashMap<u64, NetworkConf> {
        &self.networks
    }

    /// Adds or replaces the entry for a network.
    pub fn set_network(&mut self, network_id: u64, conf: NetworkConf) {
        self.networks.insert(network_id, conf);
    }

    /// Removes the entry for a network.
    pub fn remove_network(&mut self, network_id: u64) -> Option<NetworkConf> {
        self.networks.remove(&network_id)
    }

    /// Returns the registry override.
    ///
    /// If this is `Some(_)`, the address is used as the registry for any
    /// network. The default is `None`.
    pub fn registry(&self) -> Option<Address> {
        self.registry
    }

    /// Sets the registry override.
    pub fn set_registry(&mut self, registry: Option<Address>) {
        self.registry = registry;
    }

    /// Returns the name of the public resolver.
    ///
    /// The address record of this name is used as the resolver of newly
    /// created subdomains. The default is `"resolver.ftm"`.
    pub fn public_resolver(&self) -> &str {
        &self.public_resolver
    }

    /// Sets the name of the public resolver.
    pub fn set_public_resolver(&mut self, name: impl Into<String>) {
        self.public_resolver = name.into();
    }

    /// Returns the registry deployment to use for a network.
    ///
    /// With a registry override present, this is the override and events
    /// are scanned from the network’s start block if it is known or the
    /// genesis block otherwise.
    pub fn network(&self, network_id: u64) -> Option<NetworkConf> {
        let known = self.networks.get(&network_id).copied();
        match self.registry {
            Some(registry) => Some(NetworkConf::new(
                registry,
                known.map(|conf| conf.start_block).unwrap_or(0),
            )),
            None => known,
        }
    }
}

//--- Default

impl Default for Config {
    fn default() -> Self {
        Config {
            networks: DEF_NETWORKS
                .iter()
                .map(|&(id, registry, start_block)| {
                    (id, NetworkConf::new(registry, start_block))
                })
                .collect(),
            registry: None,
            public_resolver: DEF_PUBLIC_RESOLVER.into(),
        }
    }
}

//============ Testing =======================================================
