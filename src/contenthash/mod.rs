//! Content hashes.
//!
//! A resolver can store a *content hash* for a name, a pointer to content
//! in some content-addressed storage network. Its text form is a URI-like
//! string `<scheme>://<payload>` such as
//! `ipfs://bafybeico3uuyj3vphxpvbowchdwjlrlrh62awxscrnii7w7flu5z6fk77y`.
//! On chain, it is stored in a compact binary form: the protocol code as
//! an unsigned varint followed by the payload in the protocol’s binary
//! format.
//!
//! The supported protocols are:
//!
//! * `ipfs` (code `0xe3`): the payload is a binary CIDv1. Version 0 CIDs
//!   are upgraded when encoding. When decoding, the CID is printed in its
//!   canonical base32 form.
//! * `bzz` (code `0xe4`): the payload is a CIDv1 with the swarm-manifest
//!   codec wrapping the Keccak-256 multihash of the 32 octet swarm hash.
//!   The text form of the payload is the swarm hash in hex.
//! * `onion` (code `0x01bc`) and `onion3` (code `0x01bd`): the payload is
//!   the onion address as ASCII text of 16 and 56 characters, respectively.
//!
//! Use [`encode`] and [`decode`] for conversion and
//! [`is_valid_contenthash`] for checking the text form.

use crate::utils::varint;
use alloy_primitives::hex;
use cid::Cid;
use core::{fmt, str};
use multihash::Multihash;

//------------ Multicodec Values ---------------------------------------------

/// The multicodec value for swarm manifests.
const SWARM_MANIFEST: u64 = 0xfa;

/// The multicodec value for the Keccak-256 hash function.
const KECCAK_256: u64 = 0x1b;

/// The length of a swarm hash.
const SWARM_HASH_LEN: usize = 32;

//------------ Protocol ------------------------------------------------------

/// The storage protocol of a content hash.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum Protocol {
    /// The InterPlanetary File System.
    Ipfs,

    /// Swarm.
    Swarm,

    /// A Tor onion service, version 2.
    Onion,

    /// A Tor onion service, version 3.
    Onion3,
}

impl Protocol {
    /// Returns the multicodec value identifying the protocol.
    #[must_use]
    pub const fn code(self) -> u64 {
        match self {
            Protocol::Ipfs => 0xe3,
            Protocol::Swarm => 0xe4,
            Protocol::Onion => 0x01bc,
            Protocol::Onion3 => 0x01bd,
        }
    }

    /// Returns the URI scheme of the text representation.
    #[must_use]
    pub const fn scheme(self) -> &'static str {
        match self {
            Protocol::Ipfs => "ipfs",
            Protocol::Swarm => "bzz",
            Protocol::Onion => "onion",
            Protocol::Onion3 => "onion3",
        }
    }

    /// Returns the protocol for a multicodec value.
    #[must_use]
    pub fn from_code(code: u64) -> Option<Self> {
        [Protocol::Ipfs, Protocol::Swarm, Protocol::Onion, Protocol::Onion3]
            .into_iter()
            .find(|protocol| protocol.code() == code)
    }

    /// Returns the protocol for a URI scheme.
    #[must_use]
    pub fn from_scheme(scheme: &str) -> Option<Self> {
        match scheme {
            "ipfs" => Some(Protocol::Ipfs),
            "bzz" => Some(Protocol::Swarm),
            "onion" => Some(Protocol::Onion),
            "onion3" => Some(Protocol::Onion3),
            _ => None,
        }
    }

    /// Returns the length of the onion address for the onion protocols.
    fn onion_len(self) -> Option<usize> {
        match self {
            Protocol::Onion => Some(16),
            Protocol::Onion3 => Some(56),
            _ => None,
        }
    }
}

//--- Display

impl fmt::Display for Protocol {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        f.write_str(self.scheme())
    }
}

//------------ Decoded -------------------------------------------------------

/// A decoded content hash.
///
/// The `Display` impl produces the text form `<scheme>://<payload>`.
#[derive(Clone, Debug, Eq, PartialEq)]
pub struct Decoded {
    /// The storage protocol.
    pub protocol: Protocol,

    /// The text representation of the payload.
    pub payload: String,
}

impl fmt::Display for Decoded {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        write!(f, "{}://{}", self.protocol, self.payload)
    }
}

//------------ Convenience Functions -----------------------------------------

/// Encodes the text form of a content hash into its binary form.
///
/// Besides `<scheme>://<payload>`, IPFS content hashes can be given as a
/// path containing `/ipfs/<cid>`.
pub fn encode(uri: &str) -> Result<Vec<u8>, ContentHashError> {
    let (protocol, payload) = split_uri(uri)?;
    let mut res = varint::encode_vec(protocol.code());
    match protocol {
        Protocol::Ipfs => {
            let cid = Cid::try_from(payload)
                .and_then(Cid::into_v1)
                .map_err(|_| ContentHashError::MalformedPayload(protocol))?;
            res.extend_from_slice(&cid.to_bytes());
        }
        Protocol::Swarm => {
            let hash = hex::decode(payload)
                .ok()
                .filter(|hash| hash.len() == SWARM_HASH_LEN)
                .ok_or(ContentHashError::MalformedPayload(protocol))?;
            let hash = Multihash::<64>::wrap(KECCAK_256, &hash)
                .map_err(|_| ContentHashError::MalformedPayload(protocol))?;
            res.extend_from_slice(&Cid::new_v1(SWARM_MANIFEST, hash).to_bytes());
        }
        Protocol::Onion | Protocol::Onion3 => {
            if Some(payload.len()) != protocol.onion_len()
                || !payload.bytes().all(|ch| ch.is_ascii_alphanumeric())
            {
                return Err(ContentHashError::MalformedPayload(protocol));
            }
            res.extend_from_slice(payload.as_bytes());
        }
    }
    Ok(res)
}

/// Decodes the binary form of a content hash.
pub fn decode(octets: &[u8]) -> Result<Decoded, ContentHashError> {
    let (code, payload) = varint::split_from(octets)
        .map_err(|_| ContentHashError::UnrecognizedEncoding)?;
    let protocol = Protocol::from_code(code)
        .ok_or(ContentHashError::UnrecognizedEncoding)?;
    let payload = match protocol {
        Protocol::Ipfs => read_cid(protocol, payload)?
            .into_v1()
            .map_err(|_| ContentHashError::MalformedPayload(protocol))?
            .to_string(),
        Protocol::Swarm => {
            hex::encode(read_cid(protocol, payload)?.hash().digest())
        }
        Protocol::Onion | Protocol::Onion3 => str::from_utf8(payload)
            .map_err(|_| ContentHashError::MalformedPayload(protocol))?
            .into(),
    };
    Ok(Decoded { protocol, payload })
}

/// Returns whether the text form of a content hash can be encoded.
pub fn is_valid_contenthash(uri: &str) -> bool {
    encode(uri).is_ok()
}

/// Splits the text form into protocol and payload.
fn split_uri(uri: &str) -> Result<(Protocol, &str), ContentHashError> {
    let scheme = uri.split_once("://");
    if let Some((scheme, payload)) = scheme {
        if let Some(protocol) = Protocol::from_scheme(scheme) {
            return Ok((protocol, payload));
        }
    }
    if let Some((_, payload)) = uri.split_once("/ipfs/") {
        return Ok((Protocol::Ipfs, payload));
    }
    Err(ContentHashError::UnsupportedScheme(
        scheme.map(|(scheme, _)| scheme).unwrap_or_default().into(),
    ))
}

/// Reads a binary CID that must take up all of `payload`.
fn read_cid(protocol: Protocol, payload: &[u8]) -> Result<Cid, ContentHashError> {
    let mut rest = payload;
    let cid = Cid::read_bytes(&mut rest)
        .map_err(|_| ContentHashError::MalformedPayload(protocol))?;
    if !rest.is_empty() {
        return Err(ContentHashError::MalformedPayload(protocol));
    }
    Ok(cid)
}

//============ Error Types ===================================================

//------------ ContentHashError ----------------------------------------------

/// A content hash could not be encoded or decoded.
#[derive(Clone, Debug, Eq, PartialEq)]
pub enum ContentHashError {
    /// The text form uses a scheme that isn’t supported.
    ///
    /// Contains the scheme or an empty string if there was none.
    UnsupportedScheme(String),

    /// The payload is not valid for its protocol.
    MalformedPayload(Protocol),

    /// The binary form doesn’t start with a known protocol code.
    UnrecognizedEncoding,
}

//--- Display and Error

impl fmt::Display for ContentHashError {
    fn fmt(&self, f: &mut fmt::Formatter) -> fmt::Result {
        match *self {
            ContentHashError::UnsupportedScheme(ref scheme) => {
                write!(f, "unsupported content hash scheme {:?}", scheme)
            }
            ContentHashError::MalformedPayload(protocol) => {
                write!(f, "malformed {} content hash", protocol)
            }
            ContentHashError::UnrecognizedEncoding => {
                f.write_str("unrecognized content hash encoding")
            }
        }
    }
}

impl std::error::Error for ContentHashError {}

//============ Testing =======================================================

#[cfg(test)]
mod test {
    use super::*;
    use rstest::rstest;

    const SWARM: &str =
        "d1de9994b4d039f6548d191eb26786769f580809256b4685ef316805265ea162";

    #[test]
    fn ipfs_is_canonicalized() {
        let encoded =
            encode("ipfs://QmTeW79w7QQ6Npa3b1d5tANreCDxF2iDaAPsDvW6KtLmfB")
                .unwrap();
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded.protocol, Protocol::Ipfs);
        assert_eq!(
            decoded.payload,
            "bafybeico3uuyj3vphxpvbowchdwjlrlrh62awxscrnii7w7flu5z6fk77y"
        );
        assert_eq!(
            decoded.to_string(),
            "ipfs://bafybeico3uuyj3vphxpvbowchdwjlrlrh62awxscrnii7w7flu5z6fk77y"
        );
        assert_eq!(encode(&decoded.to_string()).unwrap(), encoded);
    }

    #[test]
    fn ipfs_binary_layout() {
        let encoded =
            encode("ipfs://QmRAQB6YaCyidP37UdDnjFY5vQuiBrcqdyoW1CuDgwxkD4")
                .unwrap();
        assert_eq!(
            hex::encode(&encoded),
            "e3010170122029f2d17be6139079dc48696d1f582a8530eb9805b561eda517e22a892c7e3f1f"
        );
    }

    #[test]
    fn ipfs_path_form() {
        assert_eq!(
            encode("/ipfs/QmRAQB6YaCyidP37UdDnjFY5vQuiBrcqdyoW1CuDgwxkD4"),
            encode("ipfs://QmRAQB6YaCyidP37UdDnjFY5vQuiBrcqdyoW1CuDgwxkD4")
        );
        assert_eq!(
            encode("https://gateway.example/ipfs/QmRAQB6YaCyidP37UdDnjFY5vQuiBrcqdyoW1CuDgwxkD4"),
            encode("ipfs://QmRAQB6YaCyidP37UdDnjFY5vQuiBrcqdyoW1CuDgwxkD4")
        );
    }

    #[test]
    fn swarm() {
        let encoded = encode(&format!("bzz://{}", SWARM)).unwrap();
        assert_eq!(hex::encode(&encoded), format!("e40101fa011b20{}", SWARM));
        let decoded = decode(&encoded).unwrap();
        assert_eq!(decoded.protocol, Protocol::Swarm);
        assert_eq!(decoded.payload, SWARM);
    }

    #[test]
    fn onion() {
        let encoded = encode("onion://zqktlwi4fecvo6ri").unwrap();
        assert_eq!(
            hex::encode(&encoded),
            "bc037a716b746c776934666563766f367269"
        );
        assert_eq!(
            decode(&encoded).unwrap().to_string(),
            "onion://zqktlwi4fecvo6ri"
        );

        let onion3 =
            "onion3://p53lf57qovyuvwsc6xnrppyply3vtqm7l6pcobkmyqsiofyeznfu5uqd";
        let encoded = encode(onion3).unwrap();
        assert_eq!(&encoded[..2], b"\xbd\x03");
        assert_eq!(decode(&encoded).unwrap().to_string(), onion3);
    }

    #[test]
    fn unsupported_scheme() {
        assert_eq!(
            encode("foo://xyz"),
            Err(ContentHashError::UnsupportedScheme("foo".into()))
        );
        assert_eq!(
            encode("QmRAQB6YaCyidP37UdDnjFY5vQuiBrcqdyoW1CuDgwxkD4"),
            Err(ContentHashError::UnsupportedScheme(String::new()))
        );
        assert!(!is_valid_contenthash("foo://xyz"));
    }

    #[rstest]
    #[case("ipfs://notacid", Protocol::Ipfs)]
    #[case("ipfs://", Protocol::Ipfs)]
    #[case("bzz://d1de99", Protocol::Swarm)]
    #[case("bzz://not-hex-at-all", Protocol::Swarm)]
    #[case("onion://tooshort", Protocol::Onion)]
    #[case("onion3://zqktlwi4fecvo6ri", Protocol::Onion3)]
    fn malformed_payload(#[case] uri: &str, #[case] protocol: Protocol) {
        assert_eq!(
            encode(uri),
            Err(ContentHashError::MalformedPayload(protocol))
        );
        assert!(!is_valid_contenthash(uri));
    }

    #[test]
    fn valid() {
        assert!(is_valid_contenthash(&format!("bzz://{}", SWARM)));
        assert!(is_valid_contenthash(
            "ipfs://bafybeico3uuyj3vphxpvbowchdwjlrlrh62awxscrnii7w7flu5z6fk77y"
        ));
    }

    #[test]
    fn unrecognized_encoding() {
        assert_eq!(decode(b""), Err(ContentHashError::UnrecognizedEncoding));
        assert_eq!(
            decode(b"\x01\x02"),
            Err(ContentHashError::UnrecognizedEncoding)
        );
        assert_eq!(
            decode(b"\xe3"),
            Err(ContentHashError::UnrecognizedEncoding)
        );
    }

    #[test]
    fn malformed_binary() {
        let mut encoded = encode(&format!("bzz://{}", SWARM)).unwrap();
        encoded.push(0);
        assert_eq!(
            decode(&encoded),
            Err(ContentHashError::MalformedPayload(Protocol::Swarm))
        );
        assert_eq!(
            decode(b"\xe3\x01\x01"),
            Err(ContentHashError::MalformedPayload(Protocol::Ipfs))
        );
    }

    #[test]
    fn protocol_codes() {
        for protocol in [
            Protocol::Ipfs,
            Protocol::Swarm,
            Protocol::Onion,
            Protocol::Onion3,
        ] {
            assert_eq!(Protocol::from_code(protocol.code()), Some(protocol));
            assert_eq!(
                Protocol::from_scheme(protocol.scheme()),
                Some(protocol)
            );
        }
        assert_eq!(Protocol::from_code(0x70), None);
    }
}
