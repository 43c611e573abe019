use std::fmt;
use std::sync::Arc;

use super::error::MetainfoError;
use super::info_hash::hex_encode;
use crate::constants::PIECE_HASH_LEN;

/// One content-addressed unit of torrent data.
///
/// Every piece is `piece length` bytes long except the last, which holds the
/// remainder of the total length. Pieces are shared via [`Arc`] between the
/// metainfo's piece list and the files whose byte ranges they cover.
#[derive(Clone, PartialEq, Eq, Hash)]
pub struct Piece {
    hash: [u8; PIECE_HASH_LEN],
    length: u64,
}

impl Piece {
    pub fn new(hash: [u8; PIECE_HASH_LEN], length: u64) -> Self {
        Self { hash, length }
    }

    /// The SHA-1 digest the piece's content must match.
    pub fn hash(&self) -> &[u8; PIECE_HASH_LEN] {
        &self.hash
    }

    pub fn length(&self) -> u64 {
        self.length
    }
}

impl fmt::Debug for Piece {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Piece")
            .field("hash", &hex_encode(&self.hash))
            .field("length", &self.length)
            .finish()
    }
}

/// Splits the `pieces` string into 20-byte hashes and assigns each piece its
/// length.
///
/// The number of hashes must be exactly `ceil(total_length / piece_length)`.
/// `piece_length` must be non-zero.
pub(crate) fn split_pieces(
    hashes: &[u8],
    piece_length: u64,
    total_length: u64,
) -> Result<Vec<Arc<Piece>>, MetainfoError> {
    if hashes.is_empty() || hashes.len() % PIECE_HASH_LEN != 0 {
        return Err(MetainfoError::PiecesInvalid);
    }

    let count = hashes.len() / PIECE_HASH_LEN;
    if count as u64 != total_length.div_ceil(piece_length) {
        return Err(MetainfoError::PiecesLengthMismatch);
    }

    // count >= 1 and (count - 1) * piece_length < total_length from here on.
    let last_length = total_length - (count as u64 - 1) * piece_length;

    let pieces = hashes
        .chunks_exact(PIECE_HASH_LEN)
        .enumerate()
        .map(|(i, chunk)| {
            let mut hash = [0u8; PIECE_HASH_LEN];
            hash.copy_from_slice(chunk);
            let length = if i + 1 == count {
                last_length
            } else {
                piece_length
            };
            Arc::new(Piece::new(hash, length))
        })
        .collect();

    Ok(pieces)
}

/// Attributes pieces to files, in file order.
///
/// Returns one piece list per entry of `file_lengths`. A piece that straddles
/// the boundary between two files appears, whole, in the lists of both.
///
/// The piece lengths must sum to the file lengths, and that sum must fit in
/// an `i64`.
pub(crate) fn map_pieces_to_files(
    file_lengths: &[u64],
    pieces: &[Arc<Piece>],
) -> Vec<Vec<Arc<Piece>>> {
    // Bytes of the current file not yet covered (> 0), or bytes of the piece
    // at `cursor - 1` not yet consumed by any file (< 0).
    let mut carry: i64 = 0;
    let mut cursor = 0usize;

    file_lengths
        .iter()
        .enumerate()
        .map(|(file_index, &length)| {
            let mut covering = Vec::new();

            if carry < 0 {
                if let Some(shared) = cursor.checked_sub(1).and_then(|i| pieces.get(i)) {
                    tracing::trace!(
                        piece = cursor - 1,
                        file = file_index,
                        "piece shared across file boundary"
                    );
                    covering.push(Arc::clone(shared));
                }
            }

            carry += length as i64;
            while carry > 0 {
                let Some(piece) = pieces.get(cursor) else {
                    break;
                };
                covering.push(Arc::clone(piece));
                carry -= piece.length as i64;
                cursor += 1;
            }

            covering
        })
        .collect()
}
