//! A client for the naming contracts.
//!
//! The central type of this module is [`Fns`]. It translates operations
//! on names, such as looking up the address of a name or changing its
//! resolver, into calls of the registry and resolver contracts.
//!
//! The client does not contain any transport itself. Instead, it talks to
//! the chain through the collaborator traits defined in [`chain`]:
//! [`ChainReader`] performs read-only contract calls and fetches event
//! logs, [`ChainWriter`] submits transactions on behalf of an account.
//! Labels of subdomains are recovered through a [`Decryptor`] and a
//! [`LocalLabels`] dictionary, addresses of other chains are converted
//! through a [`CoinRegistry`].
//!
//! ```no_run
//! # async fn example(reader: std::sync::Arc<dyn fns::client::ChainReader>)
//! #     -> Result<(), fns::client::Error>
//! # {
//! use fns::client::{Config, Fns};
//!
//! let fns = Fns::new(reader, 4002, &Config::new())?;
//! let owner = fns.get_owner("vitalik.ftm").await?;
//! let content = fns.get_content("vitalik.ftm").await?;
//! println!("{} {} {}", owner, content.content_type(), content);
//! # Ok(())
//! # }
//! ```
#![cfg(feature = "client")]
#![cfg_attr(docsrs, doc(cfg(feature = "client")))]

pub use self::chain::{
    BlockNumber, Call, CallFuture, ChainReader, ChainWriter, Decryptor, Log,
    LogFilter, NoDecryptor, PendingTransaction, Token,
};
pub use self::coin::{
    AddressFormat, CoinAddressError, CoinRegistry, EvmFormat,
    StaticCoinRegistry, UnknownCoinKey,
};
pub use self::conf::{Config, NetworkConf};
pub use self::contract::{NewOwner, Registry, Resolver, ReverseRegistrar};
pub use self::error::{CollaboratorError, Error};
pub use self::fns::Fns;
pub use self::records::{
    Content, DomainDetails, DomainNode, SubdomainEntry, EMPTY_ADDRESS,
};
pub use self::subdomains::{
    reconcile, EventOrder, LabelDictionary, LocalLabels, SubdomainLabel,
};

pub mod chain;
pub mod coin;
pub mod conf;
pub mod contract;
pub mod error;
pub mod subdomains;

mod fns;
mod records;
