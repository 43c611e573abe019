//! Torrent metainfo validation ([BEP-3]).
//!
//! A `.torrent` file is a bencoded dictionary. [`Metainfo`] checks its
//! schema, works out the file layout, splits the `pieces` string into
//! [`Piece`]s and maps them onto files, and computes the [`InfoHash`].
//!
//! # Torrent Structure
//!
//! - **announce** - Tracker URL, kept as an opaque string
//! - **info** - Core torrent metadata (hashed to create the info hash)
//!   - `name` - Suggested file/directory name
//!   - `piece length` - Size of each piece in bytes
//!   - `pieces` - Concatenated SHA1 hashes of each piece
//!   - `length` - Total size (single-file) OR `files` list (multi-file),
//!     each entry holding a `length` and a `path` list
//!
//! # Pieces and files
//!
//! Pieces cover the concatenation of all files, so a piece may end in the
//! middle of one file and continue into the next. Such a piece is listed
//! whole in both files:
//!
//! ```
//! use btmeta::bencode::{encode, Value};
//! use btmeta::metainfo::Metainfo;
//!
//! # fn main() -> Result<(), Box<dyn std::error::Error>> {
//! let mut first = Value::new_dict();
//! first.insert("length", 100i64)?;
//! first.insert("path", Value::List(vec!["a".into()]))?;
//! let mut second = Value::new_dict();
//! second.insert("length", 100i64)?;
//! second.insert("path", Value::List(vec!["b".into()]))?;
//!
//! let mut doc = Value::new_dict();
//! doc.insert("announce", "http://tracker.test/announce")?;
//! let info = doc.entry("info")?;
//! info.insert("name", "dir")?;
//! info.insert("piece length", 1024i64)?;
//! info.insert("files", Value::List(vec![first, second]))?;
//! info.insert("pieces", vec![7u8; 20])?;
//!
//! let metainfo = Metainfo::from_bytes(&encode(&doc)?)?;
//! assert_eq!(metainfo.piece_count(), 1);
//! assert_eq!(metainfo.pieces()[0].length(), 200);
//! for file in metainfo.files() {
//!     assert_eq!(file.pieces().len(), 1);
//! }
//! # Ok(())
//! # }
//! ```
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

mod announce;
mod error;
mod info_hash;
mod piece;
mod torrent;

pub use error::MetainfoError;
pub use info_hash::InfoHash;
pub use piece::Piece;
pub use torrent::{File, Metainfo};
