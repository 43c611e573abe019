use thiserror::Error;

use crate::bencode::{DumpError, ParseError};

/// Errors that can occur when validating a torrent metainfo document.
///
/// Validation is fail-fast: the variant names the first check that did not
/// hold, and no partial [`Metainfo`](super::Metainfo) is produced.
#[derive(Debug, Error)]
pub enum MetainfoError {
    /// The document is not valid canonical bencode.
    #[error("bencode error: {0}")]
    Bencode(#[from] ParseError),

    /// The info dictionary could not be re-encoded for hashing.
    #[error("encode error: {0}")]
    Dump(#[from] DumpError),

    /// An I/O error occurred while reading the torrent file.
    #[error("io error: {0}")]
    Io(#[from] std::io::Error),

    #[error("root element is not a dictionary")]
    TopLevelNotDict,

    #[error("missing announce field")]
    MissingAnnounce,

    #[error("expected announce field to be a string")]
    AnnounceNotString,

    #[error("missing info field")]
    MissingInfo,

    #[error("expected info field to be a dictionary")]
    InfoNotDict,

    #[error("missing name field")]
    MissingName,

    #[error("expected name field to be a string")]
    NameNotString,

    #[error("missing piece length field")]
    MissingPieceLength,

    #[error("expected piece length field to be an integer")]
    PieceLengthNotInt,

    #[error("piece length must be greater than 0")]
    PieceLengthInvalid,

    #[error("expected either length or files field")]
    MissingLengthAndFiles,

    #[error("info contains both length and files fields")]
    BothLengthAndFiles,

    #[error("expected length field to be an integer")]
    LengthNotInt,

    #[error("length must be greater than 0")]
    LengthInvalid,

    #[error("expected files field to be a list")]
    FilesNotList,

    #[error("files list is empty")]
    FilesEmpty,

    #[error("expected file entry to be a dictionary")]
    FileNotDict,

    #[error("missing file length field")]
    FileMissingLength,

    #[error("expected file length field to be an integer")]
    FileLengthNotInt,

    /// A file entry declared a negative length. Empty files are allowed.
    #[error("file length must not be negative")]
    FileLengthInvalid,

    #[error("missing file path field")]
    FileMissingPath,

    #[error("expected file path field to be a list")]
    FilePathNotList,

    #[error("file path is empty")]
    FilePathEmpty,

    #[error("expected file path element to be a string")]
    SubPathNotString,

    /// The file lengths add up to more than a signed 64-bit integer can hold.
    #[error("total length overflows")]
    TotalLengthOverflow,

    #[error("missing pieces field")]
    MissingPieces,

    #[error("expected pieces field to be a string")]
    PiecesNotString,

    #[error("pieces length must be a non-zero multiple of 20")]
    PiecesInvalid,

    #[error("number of pieces doesn't match total length")]
    PiecesLengthMismatch,

    /// The announce string is not a URL. Only produced by
    /// [`Metainfo::tracker_url`](super::Metainfo::tracker_url).
    #[error("invalid announce url: {0}")]
    InvalidAnnounceUrl(String),

    #[error("unsupported announce scheme: {0}")]
    UnsupportedAnnounceScheme(String),
}
