//! btmeta - BitTorrent metainfo parsing
//!
//! A strict bencode codec and a validator that turns a `.torrent` document
//! into a checked description of its files, pieces and info hash.
//!
//! # Modules
//!
//! - [`bencode`] - BEP-3 canonical bencode encoding/decoding
//! - [`metainfo`] - BEP-3 torrent metainfo validation and piece-to-file mapping
//! - [`constants`] - Format constants and decoder limits
//!
//! # Example
//!
//! ```
//! use btmeta::{encode, Metainfo, Value};
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut torrent = Value::new_dict();
//! torrent.insert("announce", "http://tracker.test/announce")?;
//! let info = torrent.entry("info")?;
//! info.insert("name", "hello.txt")?;
//! info.insert("piece length", 32768i64)?;
//! info.insert("length", 5i64)?;
//! info.insert("pieces", vec![0u8; 20])?;
//!
//! let metainfo = Metainfo::from_bytes(&encode(&torrent)?)?;
//! assert_eq!(metainfo.total_length(), 5);
//! assert_eq!(metainfo.info_hash().to_hex().len(), 40);
//! # Ok(())
//! # }
//! ```

pub mod bencode;
pub mod constants;
pub mod metainfo;

pub use bencode::{decode, encode, AccessError, DumpError, ParseError, StreamError, Value};
pub use metainfo::{File, InfoHash, Metainfo, MetainfoError, Piece};
