use alloc::vec::Vec;
use core::fmt;

#[derive(Debug, PartialEq)]
pub enum Error {
    /// Key is empty
    InvalidArgument,
    /// Key character has no single-byte code
    KeyCodePoint(char),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::InvalidArgument => write!(f, "invalid argument: key must not be empty"),
            Error::KeyCodePoint(c) => {
                write!(f, "key character {:?} (U+{:04X}) is above U+00FF", c, *c as u32)
            }
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Position of the key cursor
///
/// `Key(j)` points at a real key byte, `Empty` is the one-past-the-end
/// position that contributes a zero byte before the cursor wraps.
#[derive(Clone, Copy, Debug, PartialEq, Eq)]
pub enum Cursor {
    Key(usize),
    Empty,
}

impl Cursor {
    pub fn start() -> Self {
        Cursor::Key(0)
    }

    /// Key byte at the cursor, zero in the empty position
    pub fn key_byte(self, key: &[u8]) -> u8 {
        match self {
            Cursor::Key(j) => key[j],
            Cursor::Empty => 0,
        }
    }

    /// Next cursor position for a key of `key_len` bytes
    ///
    /// Cycles `Key(0), .., Key(key_len - 1), Empty, Key(0), ..`
    pub fn advance(self, key_len: usize) -> Self {
        match self {
            Cursor::Key(j) if j + 1 < key_len => Cursor::Key(j + 1),
            Cursor::Key(_) => Cursor::Empty,
            Cursor::Empty => Cursor::Key(0),
        }
    }
}

/// Number of input bytes consumed by one full cursor cycle
pub fn period(key_len: usize) -> usize {
    key_len + 1
}

/// Infinite sequence of key bytes, one per input byte
pub struct Keystream<'k> {
    key: &'k [u8],
    cursor: Cursor,
}

impl<'k> Keystream<'k> {
    /// Key must be non-empty, see `StreamXor::new`
    fn new(key: &'k [u8]) -> Self {
        Self {
            key: key,
            cursor: Cursor::start(),
        }
    }
}

impl Iterator for Keystream<'_> {
    type Item = u8;

    fn next(&mut self) -> Option<u8> {
        let byte = self.cursor.key_byte(self.key);
        self.cursor = self.cursor.advance(self.key.len());
        Some(byte)
    }
}

/// Repeating-key XOR with one pass-through byte after every full key cycle
pub struct StreamXor {
    key: Vec<u8>,
}

impl StreamXor {
    /// Create a new codec from raw key bytes
    ///
    /// errors: returns InvalidArgument on an empty key
    pub fn new(key: &[u8]) -> Result<Self, Error> {
        if key.is_empty() {
            return Err(Error::InvalidArgument);
        }

        if key.len() == 1 {
            log::warn!(
                "single-byte key {:#04x}: only even offsets are enciphered, odd offsets pass through",
                key[0]
            );
        }

        Ok(Self { key: key.to_vec() })
    }

    /// Create a one-byte codec from a character's code point
    ///
    /// `'5'` gives the key byte 53, not 5
    pub fn from_char(c: char) -> Result<Self, Error> {
        Self::new(&[code_point(c)?])
    }

    /// Create a codec from each character's code point
    pub fn from_key_str(key: &str) -> Result<Self, Error> {
        let bytes = key.chars().map(code_point).collect::<Result<Vec<u8>, Error>>()?;
        Self::new(&bytes)
    }

    pub fn key(&self) -> &[u8] {
        &self.key
    }

    pub fn keystream(&self) -> Keystream<'_> {
        Keystream::new(&self.key)
    }

    /// Encrypt a message
    pub fn encrypt(&self, msg: &[u8]) -> Vec<u8> {
        self.transform(msg)
    }

    /// Decrypt a ciphertext
    ///
    /// Same cursor sequence as `encrypt`, so the two are interchangeable
    pub fn decrypt(&self, cipher: &[u8]) -> Vec<u8> {
        self.transform(cipher)
    }

    pub fn transform(&self, input: &[u8]) -> Vec<u8> {
        log::trace!("transform: {} bytes, key length {}", input.len(), self.key.len());
        input.iter().zip(self.keystream()).map(|(b, k)| b ^ k).collect()
    }

    pub fn transform_assign(&self, buf: &mut [u8]) {
        for (b, k) in buf.iter_mut().zip(self.keystream()) {
            *b ^= k;
        }
    }
}

fn code_point(c: char) -> Result<u8, Error> {
    let cp = c as u32;
    if cp > 0xff {
        return Err(Error::KeyCodePoint(c));
    }
    Ok(cp as u8)
}

/// XOR a byte slice with a key byte slice
///
/// Key repeats every key_len + 1 bytes, the extra byte passing through, e.g.
///
/// b"hello world!"
/// b"key\0key\0key\0"
///
/// errors: returns InvalidArgument on an empty key
pub fn transform(input: &[u8], key: &[u8]) -> Result<Vec<u8>, Error> {
    Ok(StreamXor::new(key)?.transform(input))
}

/// In-place variant of `transform`
///
/// errors: returns InvalidArgument on an empty key, leaving `buf` untouched
pub fn transform_assign(buf: &mut [u8], key: &[u8]) -> Result<(), Error> {
    StreamXor::new(key)?.transform_assign(buf);
    Ok(())
}
