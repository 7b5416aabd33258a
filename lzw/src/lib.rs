//! LZW encoders and decoders for the picture archives of the Imagination Pilots titles.
//!
//! Two unrelated LZW variants are in use:
//!
//! * The 16-bit titles compress whole pictures with a GIF style LZW: 9 to 12 bit codes,
//!   least significant bit first, no sub-blocks. See [encoder::GifLzwEncoder] and
//!   [decoder::GifLzwDecoder].
//! * The 32-bit titles compress 16KB chunks with a hash table LZW: 9 to 13 bit codes,
//!   most significant bit first, and a dictionary reset driven by the compression ratio.
//!   See [encoder::HashLzwEncoder] and [decoder::HashLzwDecoder].
//!
//! Encoders and decoders keep their dictionaries between calls to save allocations, but
//! every call starts from a clean state.
//!
//! # Examples
//!
//! ```
//! use ipe_lzw::{decoder::GifLzwDecoder, encoder::GifLzwEncoder};
//!
//! let data = b"TOBEORNOTTOBEORTOBEORNOT";
//!
//! let compressed = GifLzwEncoder::new().encode_to_vec(data).unwrap();
//! let decompressed = GifLzwDecoder::new().decode(&compressed, data.len()).unwrap();
//!
//! assert_eq!(decompressed, data);
//! ```

pub mod decoder;
pub mod encoder;
mod io;

/// Resets the dictionary and the code width.
pub(crate) const CLEAR_CODE: u16 = 256;
/// Ends the stream.
pub(crate) const END_CODE: u16 = 257;
pub(crate) const FIRST_CODE: u16 = 258;
