//! Multi-coin addresses.
//!
//! Resolvers store addresses for other chains as raw bytes under a
//! numeric coin type. The [`CoinRegistry`] maps human readable coin keys
//! such as `"ETH"` to an [`AddressFormat`] which knows the coin type and
//! how to convert between the text form of an address and its bytes.

use alloy_primitives::Address;
use core::fmt;
use core::str::FromStr;
use std::collections::HashMap;

//------------ AddressFormat -------------------------------------------------

/// The address format of a coin.
pub trait AddressFormat: Send + Sync {
    /// Returns the coin type used by resolvers.
    fn coin_type(&self) -> u64;

    /// Converts the bytes stored by a resolver into an address string.
    fn encode(&self, address: &[u8]) -> Result<String, CoinAddressError>;

    /// Converts an address string into the bytes stored by a resolver.
    fn decode(&self, address: &str) -> Result<Vec<u8>, CoinAddressError>;
}

//------------ EvmFormat -----------------------------------------------------

/// The address format of EVM compatible chains.
///
/// Addresses are twenty bytes. Their text form is hex with a `0x` prefix
/// and the mixed case checksum.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct EvmFormat {
    coin_type: u64,
}

impl EvmFormat {
    /// Creates the format for the given coin type.
    pub const fn new(coin_type: u64) -> Self {
        EvmFormat { coin_type }
    }
}

impl AddressFormat for EvmFormat {
    fn coin_type(&self) -> u64 {
        self.coin_type
    }

    fn encode(&self, address: &[u8]) -> Result<String, CoinAddressError> {
        if address.len() != 20 {
            return Err(CoinAddressError::new(self.coin_type));
        }
        Ok(Address::from_slice(address).to_checksum(None))
    }

    fn decode(&self, address: &str) -> Result<Vec<u8>, CoinAddressError> {
        Address::from_str(address)
            .map(|address| address.to_vec())
            .map_err(|_| CoinAddressError::new(self.coin_type))
    }
}

//------------ CoinRegistry --------------------------------------------------

/// Maps coin keys to address formats.
pub trait CoinRegistry: Send + Sync {
    /// Looks up the format for a coin key.
    fn lookup(&self, key: &str) -> Result<&dyn AddressFormat, UnknownCoinKey>;
}

//------------ StaticCoinRegistry --------------------------------------------

/// A coin registry with a fixed set of formats.
///
/// The default registry knows `ETH` (coin type 60) and `FTM` (coin type
/// 1007). More formats can be added via [`register`][Self::register].
pub struct StaticCoinRegistry {
    formats: HashMap<String, Box<dyn AddressFormat>>,
}

impl StaticCoinRegistry {
    /// The coin type of Ether.
    pub const ETH: u64 = 60;

    /// The coin type of Fantom.
    pub const FTM: u64 = 1007;

    /// Creates a registry without any formats.
    pub fn empty() -> Self {
        StaticCoinRegistry {
            formats: HashMap::new(),
        }
    }

    /// Adds a format under the given key.
    ///
    /// Replaces any format previously registered for the key.
    pub fn register(
        &mut self,
        key: impl Into<String>,
        format: impl AddressFormat + 'static,
    ) {
        self.formats.insert(key.into(), Box::new(format));
    }

    /// Returns an iterator over the registered keys.
    pub fn keys(&self) -> impl Iterator<Item = &str> + '_ {
        self.formats.keys().map(String::as_str)
    }
}

impl Default for StaticCoinRegistry {
    fn default() -> Self {
        let mut res = Self::empty();
        res.register("ETH", EvmFormat::new(Self::ETH));
        res.register("FTM", EvmFormat::new(Self::FTM));
        res
    }
}

impl CoinRegistry for StaticCoinRegistry {
    fn lookup(&self, key: &str) -> Result<&dyn AddressFormat, UnknownCoinKey> {
        self.formats
            .get(key)
            .map(|format| format.as_ref())
            .ok_or_else(|| UnknownCoinKey(key.into()))
    }
}

impl fmt::Debug for StaticCoinRegistry {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.debug_map()
            .entries(
                self.formats
                    .iter()
                    .map(|(key, format)| (key, format.coin_type())),
            )
            .finish()
    }
}

//============ Error Types ===================================================

//------------ UnknownCoinKey ------------------------------------------------

/// A coin key is not known to the registry.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct UnknownCoinKey(String);

impl UnknownCoinKey {
    /// Returns the key that wasn’t found.
    pub fn key(&self) -> &str {
        &self.0
    }
}

impl fmt::Display for UnknownCoinKey {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "unknown coin key {:?}", self.0)
    }
}

impl std::error::Error for UnknownCoinKey {}

//------------ CoinAddressError ----------------------------------------------

/// An address could not be converted for a coin.
#[derive(Clone, Copy, Debug, Eq, PartialEq)]
pub struct CoinAddressError {
    coin_type: u64,
}

impl CoinAddressError {
    /// Creates an error for the given coin type.
    pub const fn new(coin_type: u64) -> Self {
        CoinAddressError { coin_type }
    }

    /// Returns the coin type of the failed conversion.
    pub fn coin_type(&self) -> u64 {
        self.coin_type
    }
}

impl fmt::Display for CoinAddressError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "invalid address for coin type {}", self.coin_type)
    }
}

impl std::error::Error for CoinAddressError {}

//============ Testing =======================================================
