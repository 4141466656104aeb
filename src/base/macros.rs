//! Macros for implementing the 32 octet hash types.

/// Creates a type wrapping a 32 octet hash value.
///
/// This adds the constant `ZERO`, conversions from and into `B256`, the
/// comparison traits and `Hash`, as well as `FromStr`, `Display`, and
/// `Debug` impls for the `0x`-prefixed hex representation.
macro_rules! hash_type {
    ( $(#[$attr:meta])* $hashtype:ident ) => {
        $(#[$attr])*
        #[derive(Clone, Copy, Default, Eq, Hash, Ord, PartialEq, PartialOrd)]
        #[cfg_attr(
            feature = "serde",
            derive(serde::Serialize, serde::Deserialize),
            serde(transparent)
        )]
        #[repr(transparent)]
        pub struct $hashtype(alloy_primitives::B256);

        impl $hashtype {
            /// The value with all octets zero.
            pub const ZERO: Self = $hashtype(alloy_primitives::B256::ZERO);

            /// Creates a value from an array of octets.
            #[must_use]
            pub const fn from_bytes(bytes: [u8; 32]) -> Self {
                $hashtype(alloy_primitives::B256::new(bytes))
            }

            /// Returns a reference to the underlying `B256`.
            pub const fn as_b256(&self) -> &alloy_primitives::B256 {
                &self.0
            }

            /// Converts the value into the underlying `B256`.
            pub const fn into_b256(self) -> alloy_primitives::B256 {
                self.0
            }

            /// Returns the octets of the value.
            pub fn as_slice(&self) -> &[u8] {
                self.0.as_slice()
            }

            /// Returns whether all octets are zero.
            pub fn is_zero(&self) -> bool {
                self.0.is_zero()
            }
        }

        //--- From

        impl From<alloy_primitives::B256> for $hashtype {
            fn from(value: alloy_primitives::B256) -> Self {
                $hashtype(value)
            }
        }

        impl From<$hashtype> for alloy_primitives::B256 {
            fn from(value: $hashtype) -> Self {
                value.0
            }
        }

        impl From<[u8; 32]> for $hashtype {
            fn from(value: [u8; 32]) -> Self {
                $hashtype::from_bytes(value)
            }
        }

        //--- AsRef

        impl AsRef<[u8]> for $hashtype {
            fn as_ref(&self) -> &[u8] {
                self.as_slice()
            }
        }

        //--- FromStr

        impl core::str::FromStr for $hashtype {
            type Err = $crate::base::node::HashFromStrError;

            /// Parses 64 hex digits with or without a `0x` prefix.
            fn from_str(s: &str) -> Result<Self, Self::Err> {
                let digits = s.strip_prefix("0x").unwrap_or(s);
                if digits.len() != 64 {
                    return Err($crate::base::node::HashFromStrError::Length);
                }
                <alloy_primitives::B256 as core::str::FromStr>::from_str(digits)
                    .map($hashtype)
                    .map_err(|_| $crate::base::node::HashFromStrError::Digit)
            }
        }

        //--- Display and Debug

        impl core::fmt::Display for $hashtype {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                f.write_str("0x")?;
                f.write_str(&alloy_primitives::hex::encode(self.0))
            }
        }

        impl core::fmt::Debug for $hashtype {
            fn fmt(&self, f: &mut core::fmt::Formatter) -> core::fmt::Result {
                write!(f, concat!(stringify!($hashtype), "({})"), self)
            }
        }
    }
}
