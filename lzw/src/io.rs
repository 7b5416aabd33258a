//! Bit level readers and writers for the two code packings used by the ART codecs.
//!
//! The 16-bit titles pack codes least significant bit first (like GIF), the 32-bit titles
//! pack them most significant bit first.

use std::io::{Read, Write};

pub(crate) trait BitReader {
    /// Read the next `amount` bits as a code. Fails with [std::io::ErrorKind::UnexpectedEof]
    /// when the source runs dry before the code is complete.
    fn read_one(&mut self, amount: u8) -> Result<u16, std::io::Error>;
}

pub(crate) struct LittleEndianReader<R>
where
    R: Read,
{
    read: R,
    cursor: u8,
    bit_buffer: u32,
    byte: [u8; 1],
}

impl<R> LittleEndianReader<R>
where
    R: Read,
{
    pub fn new(read: R) -> Self {
        Self {
            read,
            cursor: 0,
            bit_buffer: 0,
            byte: [0; 1],
        }
    }
}

impl<R> BitReader for LittleEndianReader<R>
where
    R: Read,
{
    #[inline]
    fn read_one(&mut self, amount: u8) -> Result<u16, std::io::Error> {
        while self.cursor < amount {
            self.read.read_exact(&mut self.byte)?;
            self.bit_buffer |= (self.byte[0] as u32) << self.cursor;
            self.cursor += 8;
        }

        let mask = (1 << amount) - 1;
        let code = (self.bit_buffer & mask) as u16;
        self.bit_buffer >>= amount;
        self.cursor -= amount;
        Ok(code)
    }
}

pub(crate) struct BigEndianReader<R>
where
    R: Read,
{
    read: R,
    cursor: u8,
    bit_buffer: u32,
    byte: [u8; 1],
}

impl<R> BigEndianReader<R>
where
    R: Read,
{
    pub fn new(read: R) -> Self {
        Self {
            read,
            cursor: 0,
            bit_buffer: 0,
            byte: [0; 1],
        }
    }
}

impl<R> BitReader for BigEndianReader<R>
where
    R: Read,
{
    #[inline]
    fn read_one(&mut self, amount: u8) -> Result<u16, std::io::Error> {
        while self.cursor < amount {
            self.read.read_exact(&mut self.byte)?;
            self.bit_buffer |= (self.byte[0] as u32) << (24 - self.cursor);
            self.cursor += 8;
        }

        let code = (self.bit_buffer >> (32 - amount)) as u16;
        self.bit_buffer <<= amount;
        self.cursor -= amount;
        Ok(code)
    }
}

pub(crate) trait BitWriter {
    fn write(&mut self, code: u16, amount: u8) -> Result<(), std::io::Error>;

    /// Pad the pending bits with zeroes up to a byte boundary and write them.
    fn fill(&mut self) -> Result<(), std::io::Error>;

    fn flush(&mut self) -> Result<(), std::io::Error>;

    /// Number of whole bytes handed to the underlying writer so far.
    fn bytes_written(&self) -> usize;
}

pub(crate) struct LittleEndianWriter<W>
where
    W: Write,
{
    write: W,
    cursor: u8,
    bit_buffer: u32,
    written: usize,
}

impl<W> LittleEndianWriter<W>
where
    W: Write,
{
    pub fn new(write: W) -> Self {
        Self {
            write,
            cursor: 0,
            bit_buffer: 0,
            written: 0,
        }
    }
}

impl<W> BitWriter for LittleEndianWriter<W>
where
    W: Write,
{
    #[inline]
    fn write(&mut self, code: u16, amount: u8) -> Result<(), std::io::Error> {
        let mask = (1 << amount) - 1;
        self.bit_buffer |= (code as u32 & mask) << self.cursor;
        self.cursor += amount;

        while self.cursor >= 8 {
            self.write.write_all(&[self.bit_buffer as u8])?;
            self.bit_buffer >>= 8;
            self.cursor -= 8;
            self.written += 1;
        }

        Ok(())
    }

    #[inline]
    fn fill(&mut self) -> Result<(), std::io::Error> {
        if self.cursor > 0 {
            self.write.write_all(&[self.bit_buffer as u8])?;
            self.bit_buffer = 0;
            self.cursor = 0;
            self.written += 1;
        }

        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> Result<(), std::io::Error> {
        self.write.flush()
    }

    fn bytes_written(&self) -> usize {
        self.written
    }
}

pub(crate) struct BigEndianWriter<W>
where
    W: Write,
{
    write: W,
    cursor: u8,
    bit_buffer: u32,
    written: usize,
}

impl<W> BigEndianWriter<W>
where
    W: Write,
{
    pub fn new(write: W) -> Self {
        Self {
            write,
            cursor: 0,
            bit_buffer: 0,
            written: 0,
        }
    }
}

impl<W> BitWriter for BigEndianWriter<W>
where
    W: Write,
{
    #[inline]
    fn write(&mut self, code: u16, amount: u8) -> Result<(), std::io::Error> {
        let mask = (1 << amount) - 1;
        self.bit_buffer |= (code as u32 & mask) << (32 - amount - self.cursor);
        self.cursor += amount;

        while self.cursor >= 8 {
            self.write.write_all(&[(self.bit_buffer >> 24) as u8])?;
            self.bit_buffer <<= 8;
            self.cursor -= 8;
            self.written += 1;
        }

        Ok(())
    }

    #[inline]
    fn fill(&mut self) -> Result<(), std::io::Error> {
        if self.cursor > 0 {
            self.write.write_all(&[(self.bit_buffer >> 24) as u8])?;
            self.bit_buffer = 0;
            self.cursor = 0;
            self.written += 1;
        }

        Ok(())
    }

    #[inline]
    fn flush(&mut self) -> Result<(), std::io::Error> {
        self.write.flush()
    }

    fn bytes_written(&self) -> usize {
        self.written
    }
}
