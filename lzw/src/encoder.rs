//! Contains the GIF style encoder of the 16-bit titles and the hash table encoder of the
//! 32-bit titles.

use std::{fmt::Display, io::Write};

use crate::{
    io::{BigEndianWriter, BitWriter, LittleEndianWriter},
    CLEAR_CODE, END_CODE, FIRST_CODE,
};

/// The error type for encoding operations.
#[derive(Debug)]
pub enum EncodingError {
    /// An I/O error happened when writing compressed data.
    Io(std::io::Error),
}

impl Display for EncodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            EncodingError::Io(error) => std::fmt::Display::fmt(&error, f),
        }
    }
}

impl std::error::Error for EncodingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            EncodingError::Io(error) => Some(error),
        }
    }
}

impl From<std::io::Error> for EncodingError {
    fn from(error: std::io::Error) -> Self {
        EncodingError::Io(error)
    }
}

/// Most prefixes in the dictionary have zero or one follower, so a vec of children is only
/// allocated once a second one shows up.
#[derive(Debug, Clone)]
enum Node {
    NoChild,
    OneChild(u8, u16),
    ManyChildren(Vec<u16>),
}

/// Trie addressed by (prefix code, next byte). Node indices are the LZW codes, so the
/// first added node gets [FIRST_CODE].
struct Tree {
    nodes: Vec<Node>,
}

impl Tree {
    fn new() -> Self {
        Self {
            nodes: Vec::with_capacity(GIF_MAX_CODE as usize + 1),
        }
    }

    #[inline(always)]
    fn reset(&mut self) {
        self.nodes.clear();
        self.nodes.resize(FIRST_CODE as usize, Node::NoChild);
    }

    #[inline(always)]
    fn find_word(&self, prefix: u16, k: u8) -> Option<u16> {
        match &self.nodes[prefix as usize] {
            Node::NoChild => None,
            &Node::OneChild(child_k, child) => (child_k == k).then_some(child),
            Node::ManyChildren(children) => match children[k as usize] {
                0 => None,
                child => Some(child),
            },
        }
    }

    #[inline(always)]
    fn add(&mut self, prefix: u16, k: u8) -> u16 {
        let code = self.nodes.len() as u16;

        let replacement = match &mut self.nodes[prefix as usize] {
            Node::NoChild => Some(Node::OneChild(k, code)),
            Node::OneChild(other_k, other_code) => {
                let mut children = vec![0; 256];
                children[*other_k as usize] = *other_code;
                children[k as usize] = code;
                Some(Node::ManyChildren(children))
            }
            Node::ManyChildren(children) => {
                children[k as usize] = code;
                None
            }
        };
        if let Some(node) = replacement {
            self.nodes[prefix as usize] = node;
        }
        self.nodes.push(Node::NoChild);
        code
    }
}

const GIF_MIN_BITS: u8 = 9;
const GIF_MAX_CODE: u16 = 4095;

/// Tracks the running code and the current write width of the GIF style stream.
struct GifCodeWriter<B: BitWriter> {
    bits: B,
    running_code: u16,
    running_bits: u8,
    max_code_plus_one: u16,
}

impl<B: BitWriter> GifCodeWriter<B> {
    fn new(bits: B) -> Self {
        Self {
            bits,
            running_code: FIRST_CODE,
            running_bits: GIF_MIN_BITS,
            max_code_plus_one: 1 << GIF_MIN_BITS,
        }
    }

    fn reset(&mut self) {
        self.running_code = FIRST_CODE;
        self.running_bits = GIF_MIN_BITS;
        self.max_code_plus_one = 1 << GIF_MIN_BITS;
    }

    #[inline]
    fn write_code(&mut self, code: u16) -> Result<(), std::io::Error> {
        self.bits.write(code, self.running_bits)?;

        if self.running_code >= self.max_code_plus_one && code <= GIF_MAX_CODE {
            self.running_bits += 1;
            self.max_code_plus_one = 1 << self.running_bits;
        }
        Ok(())
    }

    fn finish(mut self) -> Result<(), std::io::Error> {
        self.bits.fill()?;
        self.bits.flush()
    }
}

/// LZW encoder of the 16-bit titles.
///
/// Codes are 9 to 12 bits wide, packed least significant bit first, and the stream is not
/// split in sub-blocks. The dictionary is cleared, with a `CLEAR` code, as soon as it is full.
///
/// The encoder owns its dictionary so it can be reused for several pictures.
pub struct GifLzwEncoder {
    tree: Tree,
}

impl GifLzwEncoder {
    pub fn new() -> Self {
        Self { tree: Tree::new() }
    }

    /// Compress data with the GIF style LZW.
    ///
    /// # Arguments
    ///
    /// * `data` - The pixels to be compressed.
    /// * `into` - The output where compressed data should be written.
    ///
    /// # Errors
    ///
    /// This function can only fail on an [std::io::Error] from `into`.
    ///
    /// # Examples
    ///
    /// ```
    /// use ipe_lzw::encoder::{EncodingError, GifLzwEncoder};
    ///
    /// fn main() -> Result<(), EncodingError> {
    ///     let mut output = vec![];
    ///
    ///     GifLzwEncoder::new().encode(b"AAA", &mut output)?;
    ///
    ///     assert_eq!(output, [0x00, 0x83, 0x08, 0x0C, 0x08]);
    ///     Ok(())
    /// }
    /// ```
    pub fn encode<W: Write>(&mut self, data: &[u8], into: W) -> Result<(), EncodingError> {
        let mut writer = GifCodeWriter::new(LittleEndianWriter::new(into));
        self.tree.reset();

        writer.write_code(CLEAR_CODE)?;

        let (&first, rest) = match data.split_first() {
            Some(split) => split,
            None => {
                writer.write_code(END_CODE)?;
                writer.finish()?;
                return Ok(());
            }
        };

        let mut current = first as u16;
        for &k in rest {
            if let Some(word) = self.tree.find_word(current, k) {
                current = word;
                continue;
            }

            writer.write_code(current)?;
            let prefix = current;
            current = k as u16;

            if writer.running_code >= GIF_MAX_CODE {
                writer.write_code(CLEAR_CODE)?;
                writer.reset();
                self.tree.reset();
            } else {
                let code = self.tree.add(prefix, k);
                debug_assert_eq!(code, writer.running_code);
                writer.running_code += 1;
            }
        }

        writer.write_code(current)?;
        writer.write_code(END_CODE)?;
        writer.finish()?;

        Ok(())
    }

    /// Compress data with the GIF style LZW.
    /// Convenient wrapper that creates a [Vec<u8>] under the hood.
    ///
    /// # Examples
    ///
    /// ```
    /// use ipe_lzw::encoder::{EncodingError, GifLzwEncoder};
    ///
    /// fn main() -> Result<(), EncodingError> {
    ///     let output = GifLzwEncoder::new().encode_to_vec(b"AAA")?;
    ///
    ///     assert_eq!(output, [0x00, 0x83, 0x08, 0x0C, 0x08]);
    ///     Ok(())
    /// }
    /// ```
    pub fn encode_to_vec(&mut self, data: &[u8]) -> Result<Vec<u8>, EncodingError> {
        let mut output = Vec::with_capacity(data.len() / 2);
        self.encode(data, &mut output)?;
        Ok(output)
    }
}

impl Default for GifLzwEncoder {
    fn default() -> Self {
        Self::new()
    }
}

pub(crate) const HASH_MIN_BITS: u8 = 9;
pub(crate) const HASH_MAX_BITS: u8 = 13;
const HASH_TABLE_SIZE: usize = 9029;
const CHECK_INTERVAL: usize = 100;

pub(crate) const fn max_value(bits: u8) -> u16 {
    (1 << bits) - 1
}

#[derive(Debug, Clone, Copy)]
struct Slot {
    key: u32,
    code: u16,
}

/// LZW encoder of the 32-bit titles.
///
/// Codes are 9 to 13 bits wide, packed most significant bit first. Once the dictionary is
/// full, the compression ratio is checked every 100 input bytes and the dictionary is
/// dropped with a `CLEAR_TABLE` code when the ratio got worse.
///
/// The stream ends with `TERMINATOR` and three zero codes, and any bits that do not
/// complete a byte are dropped.
pub struct HashLzwEncoder {
    slots: Vec<Option<Slot>>,
    resets: usize,
}

impl HashLzwEncoder {
    pub fn new() -> Self {
        Self {
            slots: vec![None; HASH_TABLE_SIZE],
            resets: 0,
        }
    }

    /// How many times the last call to [HashLzwEncoder::encode] emitted `CLEAR_TABLE`.
    pub fn resets(&self) -> usize {
        self.resets
    }

    /// Compress one chunk of data.
    ///
    /// # Examples
    ///
    /// ```
    /// use ipe_lzw::encoder::{EncodingError, HashLzwEncoder};
    ///
    /// fn main() -> Result<(), EncodingError> {
    ///     let output = HashLzwEncoder::new().encode(b"AAA")?;
    ///
    ///     assert_eq!(output, [0x20, 0xC0, 0xA0, 0x20, 0x00, 0x00]);
    ///     Ok(())
    /// }
    /// ```
    pub fn encode(&mut self, data: &[u8]) -> Result<Vec<u8>, EncodingError> {
        let mut output = Vec::with_capacity(data.len() / 2);
        let mut writer = BigEndianWriter::new(&mut output);

        self.clear_table();
        self.resets = 0;

        let mut bits = HASH_MIN_BITS;
        let mut max_code = max_value(bits);
        let mut next_code = FIRST_CODE;

        let mut bytes_in = 0;
        let mut bytes_out_at_reset = 0;
        let mut checkpoint = CHECK_INTERVAL;
        let mut ratio_old = 100;

        if let Some((&first, rest)) = data.split_first() {
            let mut string_code = first as u16;

            for &character in rest {
                bytes_in += 1;

                let index = self.find_slot(string_code, character);
                if let Some(slot) = self.slots[index] {
                    string_code = slot.code;
                    continue;
                }

                if next_code <= max_code {
                    self.slots[index] = Some(Slot {
                        key: Self::key(string_code, character),
                        code: next_code,
                    });
                    next_code += 1;
                }

                writer.write(string_code, bits)?;
                string_code = character as u16;

                if next_code > max_code {
                    if bits < HASH_MAX_BITS {
                        bits += 1;
                        max_code = max_value(bits);
                    } else if bytes_in > checkpoint {
                        let bytes_out = writer.bytes_written() - bytes_out_at_reset;
                        let ratio_new = bytes_out * 100 / bytes_in;

                        if ratio_new > ratio_old {
                            writer.write(CLEAR_CODE, bits)?;
                            self.resets += 1;

                            bits = HASH_MIN_BITS;
                            max_code = max_value(bits);
                            next_code = FIRST_CODE;
                            bytes_in = 0;
                            bytes_out_at_reset = writer.bytes_written();
                            ratio_old = 100;
                            self.clear_table();
                        } else {
                            ratio_old = ratio_new;
                        }
                        checkpoint = bytes_in + CHECK_INTERVAL;
                    }
                }
            }

            writer.write(string_code, bits)?;

            // The decoder widens after the entry it adds for the last code.
            if next_code == max_code && bits < HASH_MAX_BITS {
                bits += 1;
            }
        }

        writer.write(END_CODE, bits)?;
        for _ in 0..3 {
            writer.write(0, bits)?;
        }
        writer.flush()?;
        drop(writer);

        Ok(output)
    }

    fn clear_table(&mut self) {
        self.slots.iter_mut().for_each(|slot| *slot = None);
    }

    #[inline(always)]
    fn key(prefix: u16, character: u8) -> u32 {
        ((prefix as u32) << 8) | character as u32
    }

    /// Index of the slot holding `(prefix, character)`, or of the empty slot where it belongs.
    #[inline]
    fn find_slot(&self, prefix: u16, character: u8) -> usize {
        let key = Self::key(prefix, character);
        let mut index = key as usize % HASH_TABLE_SIZE;

        while let Some(slot) = self.slots[index] {
            if slot.key == key {
                break;
            }
            index = (index + 1) % HASH_TABLE_SIZE;
        }
        index
    }
}

impl Default for HashLzwEncoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;

    #[test]
    fn encode_run_of_three_gif() -> Result<(), EncodingError> {
        let output = GifLzwEncoder::new().encode_to_vec(b"AAA")?;

        assert_eq!(output, [0x00, 0x83, 0x08, 0x0C, 0x08]);
        Ok(())
    }

    #[test]
    fn encode_empty_gif() -> Result<(), EncodingError> {
        let output = GifLzwEncoder::new().encode_to_vec(&[])?;

        // CLEAR then END, 9 bits each.
        assert_eq!(output, [0x00, 0x03, 0x02]);
        Ok(())
    }

    #[test]
    fn encoder_can_be_reused_gif() -> Result<(), EncodingError> {
        let mut rng = StdRng::seed_from_u64(7);
        let noise: Vec<u8> = (0..10_000).map(|_| rng.gen()).collect();

        let mut encoder = GifLzwEncoder::new();
        encoder.encode_to_vec(&noise)?;
        let output = encoder.encode_to_vec(b"AAA")?;

        assert_eq!(output, [0x00, 0x83, 0x08, 0x0C, 0x08]);
        Ok(())
    }

    #[test]
    fn encode_run_of_three_hash() -> Result<(), EncodingError> {
        let output = HashLzwEncoder::new().encode(b"AAA")?;

        assert_eq!(output, [0x20, 0xC0, 0xA0, 0x20, 0x00, 0x00]);
        Ok(())
    }

    #[test]
    fn encode_empty_hash() -> Result<(), EncodingError> {
        let output = HashLzwEncoder::new().encode(&[])?;

        // TERMINATOR and three zero codes, the last 4 bits are dropped.
        assert_eq!(output, [0x80, 0x80, 0x00, 0x00]);
        Ok(())
    }

    #[test]
    fn noise_triggers_a_table_reset() -> Result<(), EncodingError> {
        let mut rng = StdRng::seed_from_u64(42);
        let noise: Vec<u8> = (0..0x3FFE).map(|_| rng.gen()).collect();

        let mut encoder = HashLzwEncoder::new();
        encoder.encode(&noise)?;
        assert!(encoder.resets() >= 1);

        encoder.encode(&vec![0; 0x3FFE])?;
        assert_eq!(encoder.resets(), 0);
        Ok(())
    }
}
