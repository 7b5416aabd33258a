//! Contains the GIF style decoder of the 16-bit titles and the hash table decoder of the
//! 32-bit titles.

use std::fmt::Display;

use crate::{
    encoder::{max_value, HASH_MAX_BITS, HASH_MIN_BITS},
    io::{BigEndianReader, BitReader, LittleEndianReader},
    CLEAR_CODE, END_CODE, FIRST_CODE,
};

/// The error type for decoding operations.
///
/// Truncated input is told apart from structural corruption so callers can log what went
/// wrong with a given picture.
#[derive(Debug)]
pub enum DecodingError {
    /// An I/O error happened when reading compressed data.
    Io(std::io::Error),
    /// The compressed data ran out before the expected output was produced.
    Truncated,
    /// A code outside of the range valid at this point of the stream.
    InvalidCode { code: u16, next_code: u16 },
    /// A prefix chain that loops, runs too deep or points outside of the dictionary.
    CorruptPrefixChain { code: u16 },
    /// The end code showed up before the expected output was produced.
    UnexpectedEnd { position: usize, expected: usize },
    /// The stream decodes to more than the expected output.
    OutputOverflow { capacity: usize },
}

impl Display for DecodingError {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            DecodingError::Io(error) => error.fmt(f),
            DecodingError::Truncated => f.write_str("Compressed data is truncated."),
            DecodingError::InvalidCode { code, next_code } => f.write_fmt(format_args!(
                "Invalid code {code}, next dictionary code is {next_code}."
            )),
            DecodingError::CorruptPrefixChain { code } => {
                f.write_fmt(format_args!("Corrupt prefix chain for code {code}."))
            }
            DecodingError::UnexpectedEnd { position, expected } => f.write_fmt(format_args!(
                "End code after {position} bytes, expected {expected} bytes."
            )),
            DecodingError::OutputOverflow { capacity } => f.write_fmt(format_args!(
                "Decoded data does not fit in {capacity} bytes."
            )),
        }
    }
}

impl std::error::Error for DecodingError {
    fn source(&self) -> Option<&(dyn std::error::Error + 'static)> {
        match self {
            DecodingError::Io(error) => Some(error),
            _ => None,
        }
    }
}

impl From<std::io::Error> for DecodingError {
    fn from(error: std::io::Error) -> Self {
        if error.kind() == std::io::ErrorKind::UnexpectedEof {
            DecodingError::Truncated
        } else {
            DecodingError::Io(error)
        }
    }
}

const GIF_MIN_BITS: u8 = 9;
const GIF_MAX_BITS: u8 = 12;
const GIF_MAX_CODE: u16 = 4095;
const NO_SUCH_CODE: u16 = 4098;

/// Tracks the running code and the current read width of the GIF style stream.
struct GifCodeReader<B: BitReader> {
    bits: B,
    running_code: u16,
    running_bits: u8,
    max_code_plus_one: u16,
}

impl<B: BitReader> GifCodeReader<B> {
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
    fn read_code(&mut self) -> Result<u16, std::io::Error> {
        let code = self.bits.read_one(self.running_bits)?;

        self.running_code += 1;
        if self.running_code > self.max_code_plus_one && self.running_bits < GIF_MAX_BITS {
            self.max_code_plus_one <<= 1;
            self.running_bits += 1;
        }
        Ok(code)
    }
}

/// LZW decoder of the 16-bit titles.
///
/// The decoder owns its dictionary and stack, and resets them at the start of every call.
pub struct GifLzwDecoder {
    prefix: Vec<u16>,
    suffix: Vec<u8>,
    stack: Vec<u8>,
}

impl GifLzwDecoder {
    pub fn new() -> Self {
        Self {
            prefix: vec![NO_SUCH_CODE; GIF_MAX_CODE as usize + 1],
            suffix: vec![0; GIF_MAX_CODE as usize + 1],
            stack: Vec::with_capacity(GIF_MAX_CODE as usize + 1),
        }
    }

    /// Decompress exactly `capacity` bytes of GIF style LZW data.
    ///
    /// # Arguments
    ///
    /// * `data` - The compressed data. Anything after the last needed code is ignored.
    /// * `capacity` - The expected size of the output, width times height for a picture.
    ///
    /// # Errors
    ///
    /// Fails with [DecodingError::Truncated] if `data` runs out, with
    /// [DecodingError::UnexpectedEnd] on an early end code, and with
    /// [DecodingError::InvalidCode] or [DecodingError::CorruptPrefixChain] on corrupt data.
    ///
    /// # Examples
    ///
    /// ```
    /// use ipe_lzw::decoder::{DecodingError, GifLzwDecoder};
    ///
    /// fn main() -> Result<(), DecodingError> {
    ///     let compressed = [0x00, 0x83, 0x08, 0x0C, 0x08];
    ///     let output = GifLzwDecoder::new().decode(&compressed, 3)?;
    ///
    ///     assert_eq!(output, b"AAA");
    ///     Ok(())
    /// }
    /// ```
    pub fn decode(&mut self, data: &[u8], capacity: usize) -> Result<Vec<u8>, DecodingError> {
        let mut reader = GifCodeReader::new(LittleEndianReader::new(data));
        let mut output = Vec::with_capacity(output_reserve(data, capacity));
        let mut prev_code = NO_SUCH_CODE;

        self.clear();

        while output.len() < capacity {
            let code = reader.read_code()?;

            if code == END_CODE {
                return Err(DecodingError::UnexpectedEnd {
                    position: output.len(),
                    expected: capacity,
                });
            }

            if code == CLEAR_CODE {
                self.clear();
                reader.reset();
                prev_code = NO_SUCH_CODE;
                continue;
            }

            let next_code = reader.running_code - 2;

            if code < CLEAR_CODE {
                output.push(code as u8);
            } else {
                let mut current = if self.prefix[code as usize] != NO_SUCH_CODE {
                    code
                } else if code == next_code && prev_code != NO_SUCH_CODE {
                    // The code is being defined right now: its last byte is the first byte
                    // of the previous string.
                    let first = self.root_of(prev_code)?;
                    self.suffix[code as usize] = first;
                    self.stack.push(first);
                    prev_code
                } else {
                    return Err(DecodingError::InvalidCode { code, next_code });
                };

                let mut steps = 0;
                while current > CLEAR_CODE && current <= GIF_MAX_CODE {
                    if steps > GIF_MAX_CODE {
                        return Err(DecodingError::CorruptPrefixChain { code });
                    }
                    self.stack.push(self.suffix[current as usize]);
                    current = self.prefix[current as usize];
                    steps += 1;
                }
                if current >= CLEAR_CODE {
                    return Err(DecodingError::CorruptPrefixChain { code });
                }
                self.stack.push(current as u8);

                while output.len() < capacity {
                    match self.stack.pop() {
                        Some(byte) => output.push(byte),
                        None => break,
                    }
                }
                self.stack.clear();
            }

            if prev_code != NO_SUCH_CODE {
                if next_code > GIF_MAX_CODE {
                    return Err(DecodingError::InvalidCode { code, next_code });
                }
                self.prefix[next_code as usize] = prev_code;
                self.suffix[next_code as usize] = if code == next_code {
                    self.root_of(prev_code)?
                } else {
                    self.root_of(code)?
                };
            }
            prev_code = code;
        }

        Ok(output)
    }

    fn clear(&mut self) {
        self.prefix.iter_mut().for_each(|prefix| *prefix = NO_SUCH_CODE);
        self.stack.clear();
    }

    /// First byte of the string behind `code`.
    fn root_of(&self, code: u16) -> Result<u8, DecodingError> {
        let mut current = code;
        let mut steps = 0;
        while current > CLEAR_CODE {
            if current > GIF_MAX_CODE || steps > GIF_MAX_CODE {
                return Err(DecodingError::CorruptPrefixChain { code });
            }
            current = self.prefix[current as usize];
            steps += 1;
        }
        if current == CLEAR_CODE {
            return Err(DecodingError::CorruptPrefixChain { code });
        }
        Ok(current as u8)
    }
}

impl Default for GifLzwDecoder {
    fn default() -> Self {
        Self::new()
    }
}

/// Longest string a single code expands to, in either variant.
const MAX_STRING_LEN: usize = 4096;

/// Bytes to reserve up front. `capacity` comes from headers and is only trusted as far as
/// `data` could actually decode to.
fn output_reserve(data: &[u8], capacity: usize) -> usize {
    capacity.min(data.len().saturating_mul(MAX_STRING_LEN))
}

const HASH_TABLE_SIZE: usize = 9029;
const MAX_STACK_DEPTH: usize = 4000;

/// LZW decoder of the 32-bit titles.
///
/// The decoder owns its dictionary and stack. Every call decodes one independent chunk.
pub struct HashLzwDecoder {
    prefix_code: Vec<u16>,
    append_character: Vec<u8>,
    stack: Vec<u8>,
}

impl HashLzwDecoder {
    pub fn new() -> Self {
        Self {
            prefix_code: vec![0; HASH_TABLE_SIZE],
            append_character: vec![0; HASH_TABLE_SIZE],
            stack: Vec::with_capacity(MAX_STACK_DEPTH + 1),
        }
    }

    /// Decompress one chunk, up to its terminator code.
    ///
    /// # Arguments
    ///
    /// * `data` - The compressed chunk.
    /// * `capacity` - The most bytes the chunk may decode to.
    ///
    /// # Errors
    ///
    /// Fails with [DecodingError::Truncated] if `data` runs out before the terminator, with
    /// [DecodingError::OutputOverflow] if the output does not fit in `capacity`, and with
    /// [DecodingError::InvalidCode] or [DecodingError::CorruptPrefixChain] on corrupt data.
    ///
    /// # Examples
    ///
    /// ```
    /// use ipe_lzw::decoder::{DecodingError, HashLzwDecoder};
    ///
    /// fn main() -> Result<(), DecodingError> {
    ///     let compressed = [0x20, 0xC0, 0xA0, 0x20, 0x00, 0x00];
    ///     let output = HashLzwDecoder::new().decode(&compressed, 0x3FFE)?;
    ///
    ///     assert_eq!(output, b"AAA");
    ///     Ok(())
    /// }
    /// ```
    pub fn decode(&mut self, data: &[u8], capacity: usize) -> Result<Vec<u8>, DecodingError> {
        let mut reader = BigEndianReader::new(data);
        let mut output = Vec::with_capacity(output_reserve(data, capacity));

        let mut bits = HASH_MIN_BITS;
        let mut max_code = max_value(bits);
        let mut next_code = FIRST_CODE;
        let mut after_clear = true;
        let mut old_code = 0;
        let mut character = 0;

        loop {
            let code = reader.read_one(bits)?;
            if code == END_CODE {
                break;
            }

            if after_clear {
                if code >= CLEAR_CODE {
                    return Err(DecodingError::InvalidCode { code, next_code });
                }
                after_clear = false;
                old_code = code;
                character = code as u8;
                Self::push(&mut output, character, capacity)?;
                continue;
            }

            if code == CLEAR_CODE {
                after_clear = true;
                bits = HASH_MIN_BITS;
                max_code = max_value(bits);
                next_code = FIRST_CODE;
                continue;
            }

            self.stack.clear();
            if code >= next_code {
                if code > next_code {
                    return Err(DecodingError::InvalidCode { code, next_code });
                }
                // The string of the previous code followed by its own first byte.
                self.stack.push(character);
                self.expand(old_code)?;
            } else {
                self.expand(code)?;
            }

            if let Some(&first) = self.stack.last() {
                character = first;
            }
            for &byte in self.stack.iter().rev() {
                Self::push(&mut output, byte, capacity)?;
            }

            if next_code <= max_code {
                self.prefix_code[next_code as usize] = old_code;
                self.append_character[next_code as usize] = character;
                next_code += 1;

                if next_code == max_code && bits < HASH_MAX_BITS {
                    bits += 1;
                    max_code = max_value(bits);
                }
            }
            old_code = code;
        }

        Ok(output)
    }

    /// Push the string behind `code` on the stack, last byte first.
    fn expand(&mut self, code: u16) -> Result<(), DecodingError> {
        let mut current = code;
        while current > 255 {
            if self.stack.len() >= MAX_STACK_DEPTH {
                return Err(DecodingError::CorruptPrefixChain { code });
            }
            self.stack.push(self.append_character[current as usize]);
            current = self.prefix_code[current as usize];
        }
        self.stack.push(current as u8);
        Ok(())
    }

    #[inline]
    fn push(output: &mut Vec<u8>, byte: u8, capacity: usize) -> Result<(), DecodingError> {
        if output.len() == capacity {
            return Err(DecodingError::OutputOverflow { capacity });
        }
        output.push(byte);
        Ok(())
    }
}

impl Default for HashLzwDecoder {
    fn default() -> Self {
        Self::new()
    }
}

#[cfg(test)]
mod tests {
    use rand::{rngs::StdRng, Rng, SeedableRng};

    use super::*;
    use crate::encoder::{EncodingError, GifLzwEncoder, HashLzwEncoder};

    fn samples() -> Vec<Vec<u8>> {
        let mut rng = StdRng::seed_from_u64(1234);
        let noise: Vec<u8> = (0..20_000).map(|_| rng.gen()).collect();
        let few_colors: Vec<u8> = (0..20_000).map(|_| rng.gen_range(0..4)).collect();
        let gradient: Vec<u8> = (0..64_000).map(|i| (i / 251) as u8).collect();

        vec![
            vec![],
            vec![42],
            b"TOBEORNOTTOBEORTOBEORNOT".to_vec(),
            vec![0; 5000],
            noise,
            few_colors,
            gradient,
        ]
    }

    #[test]
    fn decode_self_reference_gif() -> Result<(), DecodingError> {
        // CLEAR, 'A', 258 while 258 is being defined, END.
        let compressed = [0x00, 0x83, 0x08, 0x0C, 0x08];
        let output = GifLzwDecoder::new().decode(&compressed, 3)?;

        assert_eq!(output, b"AAA");
        Ok(())
    }

    #[test]
    fn round_trip_gif() -> Result<(), Box<dyn std::error::Error>> {
        let mut encoder = GifLzwEncoder::new();
        let mut decoder = GifLzwDecoder::new();

        for sample in samples() {
            let compressed = encoder.encode_to_vec(&sample)?;
            let decompressed = decoder.decode(&compressed, sample.len())?;
            assert_eq!(decompressed, sample);
        }
        Ok(())
    }

    #[test]
    fn gif_output_is_plain_gif_lzw() -> Result<(), Box<dyn std::error::Error>> {
        let mut encoder = GifLzwEncoder::new();

        for sample in samples() {
            let compressed = encoder.encode_to_vec(&sample)?;
            let decompressed =
                weezl::decode::Decoder::new(weezl::BitOrder::Lsb, 8).decode(&compressed)?;
            assert_eq!(decompressed, sample);
        }
        Ok(())
    }

    #[test]
    fn truncated_gif() -> Result<(), EncodingError> {
        let compressed = GifLzwEncoder::new().encode_to_vec(b"TOBEORNOTTOBEORTOBEORNOT")?;
        let result = GifLzwDecoder::new().decode(&compressed[..4], 24);

        assert!(matches!(result, Err(DecodingError::Truncated)));
        Ok(())
    }

    #[test]
    fn early_end_code_gif() -> Result<(), EncodingError> {
        let compressed = GifLzwEncoder::new().encode_to_vec(b"AAA")?;
        let result = GifLzwDecoder::new().decode(&compressed, 4);

        assert!(matches!(
            result,
            Err(DecodingError::UnexpectedEnd {
                position: 3,
                expected: 4
            })
        ));
        Ok(())
    }

    #[test]
    fn undefined_code_gif() {
        // CLEAR then code 300, which is not defined yet.
        let compressed = [0x00, 0x59, 0x02, 0x00];
        let result = GifLzwDecoder::new().decode(&compressed, 10);

        assert!(matches!(
            result,
            Err(DecodingError::InvalidCode { code: 300, .. })
        ));
    }

    #[test]
    fn huge_capacity_is_not_reserved() {
        let compressed = [0x00, 0x83, 0x08, 0x0C, 0x08];

        assert!(matches!(
            GifLzwDecoder::new().decode(&compressed, usize::MAX),
            Err(DecodingError::UnexpectedEnd { position: 3, .. })
        ));
        assert_eq!(
            HashLzwDecoder::new()
                .decode(&[0x20, 0xC0, 0xA0, 0x20, 0x00, 0x00], usize::MAX)
                .ok()
                .as_deref(),
            Some(&b"AAA"[..])
        );
    }

    #[test]
    fn decode_self_reference_hash() -> Result<(), DecodingError> {
        let compressed = [0x20, 0xC0, 0xA0, 0x20, 0x00, 0x00];
        let output = HashLzwDecoder::new().decode(&compressed, 3)?;

        assert_eq!(output, b"AAA");
        Ok(())
    }

    #[test]
    fn round_trip_hash() -> Result<(), Box<dyn std::error::Error>> {
        let mut encoder = HashLzwEncoder::new();
        let mut decoder = HashLzwDecoder::new();

        for sample in samples() {
            for chunk in sample.chunks(0x3FFE) {
                let compressed = encoder.encode(chunk)?;
                let decompressed = decoder.decode(&compressed, chunk.len())?;
                assert_eq!(decompressed, chunk);
            }
        }
        Ok(())
    }

    #[test]
    fn output_overflow_hash() -> Result<(), EncodingError> {
        let compressed = HashLzwEncoder::new().encode(b"AAA")?;
        let result = HashLzwDecoder::new().decode(&compressed, 2);

        assert!(matches!(
            result,
            Err(DecodingError::OutputOverflow { capacity: 2 })
        ));
        Ok(())
    }

    #[test]
    fn truncated_hash() -> Result<(), EncodingError> {
        let compressed = HashLzwEncoder::new().encode(b"TOBEORNOTTOBEORTOBEORNOT")?;
        let result = HashLzwDecoder::new().decode(&compressed[..6], 24);

        assert!(matches!(result, Err(DecodingError::Truncated)));
        Ok(())
    }

    #[test]
    fn code_beyond_dictionary_hash() {
        // 'A' then code 300 while the next code is 258.
        let compressed = [0x20, 0xCB, 0x00, 0x00];
        let result = HashLzwDecoder::new().decode(&compressed, 100);

        assert!(matches!(
            result,
            Err(DecodingError::InvalidCode {
                code: 300,
                next_code: 258
            })
        ));
    }
}
