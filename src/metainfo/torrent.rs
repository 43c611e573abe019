use std::collections::BTreeMap;
use std::io::Read;
use std::sync::Arc;

use bytes::Bytes;

use super::error::MetainfoError;
use super::info_hash::InfoHash;
use super::piece::{map_pieces_to_files, split_pieces, Piece};
use crate::bencode::{decode, encode, Value};
use crate::constants::PATH_SEPARATOR;

/// A validated torrent metainfo document.
///
/// Built once from a decoded document and immutable afterwards. Files share
/// their [`Piece`]s with the metainfo's piece list, so the whole structure is
/// cheap to clone and safe to hand to other threads.
///
/// # Examples
///
/// ```
/// use btmeta::metainfo::Metainfo;
///
/// # fn main() -> Result<(), Box<dyn std::error::Error>> {
/// let mut data = b"d8:announce21:http://tracker.test/a4:infod".to_vec();
/// data.extend_from_slice(b"6:lengthi100e4:name8:file.bin12:piece lengthi60e6:pieces40:");
/// data.extend_from_slice(&[0xab; 40]);
/// data.extend_from_slice(b"ee");
///
/// let metainfo = Metainfo::from_bytes(&data)?;
/// assert_eq!(metainfo.name_str(), Some("file.bin"));
/// assert_eq!(metainfo.total_length(), 100);
/// assert_eq!(metainfo.piece_count(), 2);
/// assert_eq!(metainfo.pieces()[1].length(), 40);
/// assert_eq!(metainfo.files()[0].pieces().len(), 2);
/// # Ok(())
/// # }
/// ```
#[derive(Debug, Clone)]
pub struct Metainfo {
    announce: Bytes,
    name: Bytes,
    piece_length: u64,
    total_length: u64,
    files: Vec<File>,
    pieces: Vec<Arc<Piece>>,
    info_hash: InfoHash,
    single_file: bool,
}

/// A file within a torrent.
///
/// For single-file torrents the path is the torrent name. For multi-file
/// torrents it is the entry's path segments joined with `/`, relative to the
/// torrent's root directory.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct File {
    path: Bytes,
    length: u64,
    pieces: Vec<Arc<Piece>>,
}

impl File {
    pub fn path(&self) -> &[u8] {
        &self.path
    }

    /// The path as UTF-8, if it is valid UTF-8.
    pub fn path_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.path).ok()
    }

    pub fn length(&self) -> u64 {
        self.length
    }

    /// Pieces overlapping this file's bytes, in order.
    ///
    /// A piece straddling a file boundary appears in both files' lists.
    pub fn pieces(&self) -> &[Arc<Piece>] {
        &self.pieces
    }
}

impl Metainfo {
    /// Validates a decoded metainfo document.
    ///
    /// Checks run in a fixed order and the first failure is returned:
    /// root type, `announce`, `info`, `name`, `piece length`, the
    /// `length`/`files` layout, then `pieces` and the piece count. The info
    /// hash is computed over the canonical encoding of `info`.
    ///
    /// # Errors
    ///
    /// Returns the [`MetainfoError`] naming the first check that failed.
    pub fn from_value(root: &Value) -> Result<Self, MetainfoError> {
        match validate(root) {
            Ok(metainfo) => {
                tracing::debug!(
                    name = %String::from_utf8_lossy(&metainfo.name),
                    files = metainfo.files.len(),
                    pieces = metainfo.pieces.len(),
                    info_hash = %metainfo.info_hash,
                    "parsed metainfo"
                );
                Ok(metainfo)
            }
            Err(e) => {
                tracing::debug!(error = %e, "rejected metainfo");
                Err(e)
            }
        }
    }

    /// Decodes and validates a torrent file.
    ///
    /// # Errors
    ///
    /// [`MetainfoError::Bencode`] if `data` is not canonical bencode, and any
    /// validation error from [`Metainfo::from_value`].
    ///
    /// # Examples
    ///
    /// ```
    /// use btmeta::metainfo::{Metainfo, MetainfoError};
    ///
    /// assert!(matches!(Metainfo::from_bytes(b"le"), Err(MetainfoError::TopLevelNotDict)));
    /// assert!(matches!(Metainfo::from_bytes(b"de"), Err(MetainfoError::MissingAnnounce)));
    /// assert!(matches!(Metainfo::from_bytes(b"a"), Err(MetainfoError::Bencode(_))));
    /// ```
    pub fn from_bytes(data: &[u8]) -> Result<Self, MetainfoError> {
        let value = decode(data)?;
        Self::from_value(&value)
    }

    /// Reads `reader` to the end, then decodes and validates it.
    ///
    /// ```no_run
    /// use btmeta::metainfo::Metainfo;
    ///
    /// # fn main() -> Result<(), Box<dyn std::error::Error>> {
    /// let file = std::fs::File::open("example.torrent")?;
    /// let metainfo = Metainfo::from_reader(file)?;
    /// println!("{} ({} bytes)", metainfo.info_hash(), metainfo.total_length());
    /// # Ok(())
    /// # }
    /// ```
    pub fn from_reader<R: Read>(mut reader: R) -> Result<Self, MetainfoError> {
        let mut data = Vec::new();
        reader.read_to_end(&mut data)?;
        Self::from_bytes(&data)
    }

    /// The raw announce string. It is not interpreted during validation; see
    /// [`Metainfo::tracker_url`].
    pub fn announce(&self) -> &[u8] {
        &self.announce
    }

    pub fn announce_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.announce).ok()
    }

    pub fn name(&self) -> &[u8] {
        &self.name
    }

    pub fn name_str(&self) -> Option<&str> {
        std::str::from_utf8(&self.name).ok()
    }

    pub fn piece_length(&self) -> u64 {
        self.piece_length
    }

    /// Sum of all file lengths.
    pub fn total_length(&self) -> u64 {
        self.total_length
    }

    pub fn files(&self) -> &[File] {
        &self.files
    }

    pub fn pieces(&self) -> &[Arc<Piece>] {
        &self.pieces
    }

    pub fn piece_count(&self) -> usize {
        self.pieces.len()
    }

    pub fn info_hash(&self) -> InfoHash {
        self.info_hash
    }

    /// Returns `true` if the info dictionary used the `length` form.
    pub fn is_single_file(&self) -> bool {
        self.single_file
    }
}

impl TryFrom<&Value> for Metainfo {
    type Error = MetainfoError;

    fn try_from(value: &Value) -> Result<Self, Self::Error> {
        Self::from_value(value)
    }
}

fn lookup<'a>(dict: &'a BTreeMap<Bytes, Value>, key: &str) -> Option<&'a Value> {
    dict.get(key.as_bytes())
}

fn validate(root: &Value) -> Result<Metainfo, MetainfoError> {
    let root = root.as_dict().ok_or(MetainfoError::TopLevelNotDict)?;

    let announce = lookup(root, "announce")
        .ok_or(MetainfoError::MissingAnnounce)?
        .as_bytes()
        .ok_or(MetainfoError::AnnounceNotString)?
        .clone();

    let info_value = lookup(root, "info").ok_or(MetainfoError::MissingInfo)?;
    let info = info_value.as_dict().ok_or(MetainfoError::InfoNotDict)?;

    let name = lookup(info, "name")
        .ok_or(MetainfoError::MissingName)?
        .as_bytes()
        .ok_or(MetainfoError::NameNotString)?
        .clone();

    let piece_length = lookup(info, "piece length")
        .ok_or(MetainfoError::MissingPieceLength)?
        .as_integer()
        .ok_or(MetainfoError::PieceLengthNotInt)?;
    if piece_length < 1 {
        return Err(MetainfoError::PieceLengthInvalid);
    }
    let piece_length = piece_length as u64;

    let single_file;
    let entries = match (lookup(info, "length"), lookup(info, "files")) {
        (None, None) => return Err(MetainfoError::MissingLengthAndFiles),
        (Some(_), Some(_)) => return Err(MetainfoError::BothLengthAndFiles),
        (Some(length), None) => {
            single_file = true;
            vec![parse_single_file(&name, length)?]
        }
        (None, Some(files)) => {
            single_file = false;
            parse_file_list(files)?
        }
    };

    let total_length = entries
        .iter()
        .try_fold(0i64, |total, (_, length)| total.checked_add(*length as i64))
        .ok_or(MetainfoError::TotalLengthOverflow)? as u64;

    let hashes = lookup(info, "pieces")
        .ok_or(MetainfoError::MissingPieces)?
        .as_bytes()
        .ok_or(MetainfoError::PiecesNotString)?;
    let pieces = split_pieces(hashes, piece_length, total_length)?;

    let info_hash = InfoHash::from_info_bytes(&encode(info_value)?);

    let lengths: Vec<u64> = entries.iter().map(|(_, length)| *length).collect();
    let files = entries
        .into_iter()
        .zip(map_pieces_to_files(&lengths, &pieces))
        .map(|((path, length), pieces)| File {
            path,
            length,
            pieces,
        })
        .collect();

    Ok(Metainfo {
        announce,
        name,
        piece_length,
        total_length,
        files,
        pieces,
        info_hash,
        single_file,
    })
}

fn parse_single_file(name: &Bytes, length: &Value) -> Result<(Bytes, u64), MetainfoError> {
    let length = length.as_integer().ok_or(MetainfoError::LengthNotInt)?;
    if length < 1 {
        return Err(MetainfoError::LengthInvalid);
    }
    Ok((name.clone(), length as u64))
}

fn parse_file_list(files: &Value) -> Result<Vec<(Bytes, u64)>, MetainfoError> {
    let files = files.as_list().ok_or(MetainfoError::FilesNotList)?;
    if files.is_empty() {
        return Err(MetainfoError::FilesEmpty);
    }
    files.iter().map(parse_file_entry).collect()
}

fn parse_file_entry(entry: &Value) -> Result<(Bytes, u64), MetainfoError> {
    let entry = entry.as_dict().ok_or(MetainfoError::FileNotDict)?;

    let length = lookup(entry, "length")
        .ok_or(MetainfoError::FileMissingLength)?
        .as_integer()
        .ok_or(MetainfoError::FileLengthNotInt)?;
    if length < 0 {
        return Err(MetainfoError::FileLengthInvalid);
    }

    let segments = lookup(entry, "path")
        .ok_or(MetainfoError::FileMissingPath)?
        .as_list()
        .ok_or(MetainfoError::FilePathNotList)?;
    if segments.is_empty() {
        return Err(MetainfoError::FilePathEmpty);
    }

    let mut path = Vec::new();
    for (i, segment) in segments.iter().enumerate() {
        let segment = segment.as_bytes().ok_or(MetainfoError::SubPathNotString)?;
        if i > 0 {
            path.push(PATH_SEPARATOR);
        }
        path.extend_from_slice(segment);
    }

    Ok((Bytes::from(path), length as u64))
}
