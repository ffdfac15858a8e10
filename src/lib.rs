//! Bencoding of in-memory values as defined in [BEP 3].
//!
//! | Value | Wire form |
//! |---|---|
//! | [`Value::Str`] | `<len>:<bytes>` |
//! | [`Value::Int`], [`Value::Uint`] | `i<n>e` |
//! | [`Value::Duration`] | `i<seconds>e` |
//! | [`Value::Raw`] | bytes, verbatim |
//! | [`Value::Dict`] | `d<key><value>...e`, keys sorted by byte value |
//! | [`Value::DictList`], [`Value::StrList`] | `l<item>...e` |
//! | [`Value::Custom`] | whatever the [`Marshaler`] returns |
//!
//! ```
//! use std::time::Duration;
//! use bencoder::{to_bytes, Dictionary, Value};
//!
//! let mut resp = Dictionary::new();
//! resp.insert("interval", Duration::from_secs(1800));
//! resp.insert("complete", 5u32);
//!
//! let out = to_bytes(&Value::Dict(resp)).unwrap();
//! assert_eq!(&out[..], b"d8:completei5e8:intervali1800ee");
//! ```
//!
//! Only encoding is provided.
//!
//! [BEP 3]: https://www.bittorrent.org/beps/bep_0003.html

mod bencode;
mod bytestring;
mod dict;
mod encoder;
mod error;
mod marshal;
mod value;

#[cfg(test)]
mod bdecode;

pub use bytestring::{ByteString, ToByteString};
pub use dict::Dictionary;
pub use encoder::{encode, encode_any, encode_marshaler, to_bytes, to_bytes_any, to_bytes_marshaler, Encoder};
pub use error::EncodeError;
pub use marshal::{BoxError, Marshaler};
pub use value::Value;
