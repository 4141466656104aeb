//! Various utility modules.

pub mod varint;
