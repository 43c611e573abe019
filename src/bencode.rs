//! Canonical bencode encoding and decoding ([BEP-3]).
//!
//! Bencode is the serialization format used throughout BitTorrent for storing
//! and transmitting structured data, including `.torrent` files and tracker
//! responses.
//!
//! # Data Types
//!
//! | Type | Format | Example |
//! |------|--------|---------|
//! | Integer | `i<number>e` | `i42e` → 42 |
//! | Byte String | `<length>:<data>` | `4:spam` → "spam" |
//! | List | `l<items>e` | `l4:spami42ee` → ["spam", 42] |
//! | Dictionary | `d<key><value>...e` | `d3:foo3:bare` → {"foo": "bar"} |
//!
//! # Canonical form
//!
//! Every value has exactly one legal encoding, and this module only speaks
//! that one. The decoder rejects misordered or repeated dictionary keys and
//! numbers with leading zeros; the encoder sorts keys and never pads. As a
//! result `encode(&decode(b)?)? == b` for every input `b` that decodes, which
//! is what makes the info hash of a torrent stable.
//!
//! # Examples
//!
//! ## Decoding
//!
//! ```
//! use btmeta::bencode::{decode, Value};
//!
//! let value = decode(b"l4:spami42ee").unwrap();
//! assert_eq!(value.at(0).unwrap().as_str(), Some("spam"));
//! assert_eq!(value.at(1).unwrap().integer().unwrap(), 42);
//!
//! let value = decode(b"d3:foo3:bare").unwrap();
//! assert_eq!(value.get(b"foo").and_then(Value::as_str), Some("bar"));
//! ```
//!
//! ## Building and encoding
//!
//! ```
//! use btmeta::bencode::{encode, Value};
//!
//! let mut info = Value::new_dict();
//! info.insert("name", "example.txt").unwrap();
//! info.insert("piece length", 16384i64).unwrap();
//! info.insert("length", 1024i64).unwrap();
//!
//! let encoded = encode(&info).unwrap();
//! assert_eq!(encoded, b"d6:lengthi1024e4:name11:example.txt12:piece lengthi16384ee");
//! ```
//!
//! # Errors
//!
//! - [`ParseError`] - the input is not canonical bencode
//! - [`DumpError`] - a [`Value::Null`] was handed to the encoder
//! - [`AccessError`] - a [`Value`] was used through the wrong accessor
//! - [`StreamError`] - a decode/encode failure or an I/O error from the
//!   reader/writer entry points
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod decode;
mod encode;
mod error;
mod value;

pub use decode::{decode, decode_from_reader};
pub use encode::{encode, encode_to, encode_to_writer};
pub use error::{AccessError, DumpError, ParseError, StreamError};
pub use value::{Value, ValueKind};

#[cfg(test)]
mod tests;
