use std::fmt;

use sha1::{Digest, Sha1};

use crate::constants::INFO_HASH_LEN;

/// SHA-1 digest of the canonical encoding of a torrent's info dictionary.
///
/// This is the torrent's content identity. `Display` and `Debug` print it as
/// 40 lowercase hex digits.
///
/// # Examples
///
/// ```
/// use btmeta::metainfo::InfoHash;
///
/// let hash = InfoHash::from_hex("c12fe1c06bba254a9dc9f519b335aa7c1367a88a").unwrap();
/// assert_eq!(hash.as_bytes()[0], 0xc1);
/// assert_eq!(hash.to_string(), "c12fe1c06bba254a9dc9f519b335aa7c1367a88a");
///
/// assert!(InfoHash::from_hex("c12f").is_none());
/// ```
#[derive(Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct InfoHash([u8; INFO_HASH_LEN]);

impl InfoHash {
    pub fn from_bytes(bytes: [u8; INFO_HASH_LEN]) -> Self {
        InfoHash(bytes)
    }

    /// Hashes an already-encoded info dictionary.
    pub fn from_info_bytes(encoded_info: &[u8]) -> Self {
        let mut hasher = Sha1::new();
        hasher.update(encoded_info);
        InfoHash(hasher.finalize().into())
    }

    /// Parses 40 hex digits, either case.
    pub fn from_hex(s: &str) -> Option<Self> {
        let bytes = hex_decode(s)?;
        let arr: [u8; INFO_HASH_LEN] = bytes.try_into().ok()?;
        Some(InfoHash(arr))
    }

    pub fn as_bytes(&self) -> &[u8; INFO_HASH_LEN] {
        &self.0
    }

    pub fn to_hex(&self) -> String {
        hex_encode(&self.0)
    }
}

impl AsRef<[u8]> for InfoHash {
    fn as_ref(&self) -> &[u8] {
        &self.0
    }
}

impl fmt::Debug for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "InfoHash({})", self.to_hex())
    }
}

impl fmt::Display for InfoHash {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.to_hex())
    }
}

pub(crate) fn hex_encode(bytes: &[u8]) -> String {
    bytes.iter().fold(String::with_capacity(bytes.len() * 2), |mut s, b| {
        use std::fmt::Write;
        let _ = write!(s, "{:02x}", b);
        s
    })
}

fn hex_decode(s: &str) -> Option<Vec<u8>> {
    if s.len() % 2 != 0 || !s.bytes().all(|c| c.is_ascii_hexdigit()) {
        return None;
    }
    (0..s.len())
        .step_by(2)
        .map(|i| u8::from_str_radix(&s[i..i + 2], 16).ok())
        .collect()
}
