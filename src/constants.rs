//! Format constants and limits.
//!
//! These values are fixed by the BitTorrent metainfo format ([BEP-3]) except
//! for [`MAX_NESTING_DEPTH`], which bounds how far the recursive decoder will
//! descend before giving up.
//!
//! [BEP-3]: http://bittorrent.org/beps/bep_0003.html

// ============================================================================
// Hashes
// ============================================================================

/// Width of a single SHA1 piece hash inside the `pieces` string.
pub const PIECE_HASH_LEN: usize = 20;

/// Width of a v1 info hash (SHA1 over the bencoded info dictionary).
pub const INFO_HASH_LEN: usize = 20;

// ============================================================================
// Decoder limits
// ============================================================================

/// Maximum container nesting accepted by [`crate::bencode::decode`].
///
/// Real torrents nest four or five levels deep.
pub const MAX_NESTING_DEPTH: usize = 256;

// ============================================================================
// Metainfo layout
// ============================================================================

/// Separator used when joining the segments of a multi-file `path` list.
pub const PATH_SEPARATOR: u8 = b'/';

/// Tracker URL schemes accepted by [`crate::metainfo::Metainfo::tracker_url`].
pub const ANNOUNCE_SCHEMES: &[&str] = &["http", "https"];
