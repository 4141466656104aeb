//! Error types for the client.

use super::coin::{CoinAddressError, UnknownCoinKey};
use crate::base::NameError;
use crate::contenthash::ContentHashError;
use std::error;
use std::fmt::{self, Display, Formatter};
use std::sync::Arc;

//------------ Error ---------------------------------------------------------

/// Error type for client operations.
#[derive(Clone, Debug)]
pub enum Error {
    /// A name given to the operation is not valid.
    InvalidName(NameError),

    /// A content hash given to the operation cannot be encoded.
    ContentHash(ContentHashError),

    /// The coin key is not known to the coin registry.
    UnknownCoinKey(UnknownCoinKey),

    /// An address given for a coin cannot be converted.
    CoinAddress(CoinAddressError),

    /// A collaborator failed.
    Collaborator(CollaboratorError),

    /// There is no registry known for the network.
    UnsupportedNetwork(u64),

    /// A state-changing operation was attempted without a signer.
    NoSigner,

    /// The operation needs a resolver but the name doesn’t have one.
    NoResolver,

    /// The operation needs a name other than the root.
    RootName,

    /// A contract call returned a value of the wrong type.
    UnexpectedReturn(&'static str),

    /// An event log could not be parsed.
    BadEvent(&'static str),
}

//--- From

impl From<NameError> for Error {
    fn from(err: NameError) -> Self {
        Error::InvalidName(err)
    }
}

impl From<ContentHashError> for Error {
    fn from(err: ContentHashError) -> Self {
        Error::ContentHash(err)
    }
}

impl From<UnknownCoinKey> for Error {
    fn from(err: UnknownCoinKey) -> Self {
        Error::UnknownCoinKey(err)
    }
}

impl From<CoinAddressError> for Error {
    fn from(err: CoinAddressError) -> Self {
        Error::CoinAddress(err)
    }
}

impl From<CollaboratorError> for Error {
    fn from(err: CollaboratorError) -> Self {
        Error::Collaborator(err)
    }
}

//--- Display and Error

impl Display for Error {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidName(err) => write!(f, "invalid name: {}", err),
            Error::ContentHash(err) => write!(f, "{}", err),
            Error::UnknownCoinKey(err) => write!(f, "{}", err),
            Error::CoinAddress(err) => write!(f, "{}", err),
            Error::Collaborator(err) => write!(f, "{}", err),
            Error::UnsupportedNetwork(id) => {
                write!(f, "unsupported network {}", id)
            }
            Error::NoSigner => f.write_str("no signer available"),
            Error::NoResolver => f.write_str("name has no resolver"),
            Error::RootName => {
                f.write_str("operation not possible for the root name")
            }
            Error::UnexpectedReturn(method) => {
                write!(f, "unexpected return value from {}", method)
            }
            Error::BadEvent(event) => write!(f, "malformed {} event", event),
        }
    }
}

impl error::Error for Error {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        match self {
            Error::InvalidName(err) => Some(err),
            Error::ContentHash(err) => Some(err),
            Error::UnknownCoinKey(err) => Some(err),
            Error::CoinAddress(err) => Some(err),
            Error::Collaborator(err) => Some(err),
            Error::UnsupportedNetwork(_) => None,
            Error::NoSigner => None,
            Error::NoResolver => None,
            Error::RootName => None,
            Error::UnexpectedReturn(_) => None,
            Error::BadEvent(_) => None,
        }
    }
}

//------------ CollaboratorError ---------------------------------------------

/// A chain reader, chain writer, or decryptor failed.
///
/// This wraps whatever error the collaborator produced.
#[derive(Clone)]
pub struct CollaboratorError(Arc<dyn error::Error + Send + Sync>);

impl CollaboratorError {
    /// Creates a collaborator error from another error.
    pub fn new(err: impl error::Error + Send + Sync + 'static) -> Self {
        CollaboratorError(Arc::new(err))
    }

    /// Creates a collaborator error from a message.
    pub fn msg(msg: impl Into<String>) -> Self {
        CollaboratorError(Arc::new(Message(msg.into())))
    }
}

impl fmt::Debug for CollaboratorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.debug_tuple("CollaboratorError").field(&self.0).finish()
    }
}

impl Display for CollaboratorError {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        write!(f, "collaborator failed: {}", self.0)
    }
}

impl error::Error for CollaboratorError {
    fn source(&self) -> Option<&(dyn error::Error + 'static)> {
        Some(self.0.as_ref())
    }
}

/// A plain error message.
#[derive(Debug)]
struct Message(String);

impl Display for Message {
    fn fmt(&self, f: &mut Formatter<'_>) -> fmt::Result {
        f.write_str(&self.0)
    }
}

impl error::Error for Message {}
