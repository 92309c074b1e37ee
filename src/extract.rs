use alloc::string::String;
use core::fmt;

use crate::encoding::{printable, unescape, Error as EncodingError};
use crate::stream::{Error as StreamError, StreamXor};

/// Comment label preceding the encoded payload
pub const MARKER: &[u8] = b"super secret txt";

const BACKTICK: u8 = b'`';

#[derive(Debug, PartialEq)]
pub enum Error {
    NotFound,
    Encoding(EncodingError),
    Stream(StreamError),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::NotFound => write!(f, "no backtick block after the secret marker"),
            Error::Encoding(e) => write!(f, "encoding error: {}", e),
            Error::Stream(e) => write!(f, "stream error: {}", e),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

impl From<EncodingError> for Error {
    fn from(e: EncodingError) -> Self {
        Error::Encoding(e)
    }
}

impl From<StreamError> for Error {
    fn from(e: StreamError) -> Self {
        Error::Stream(e)
    }
}

// \s in a byte regex, which unlike is_ascii_whitespace includes \x0b
fn is_space(b: u8) -> bool {
    matches!(b, b' ' | b'\t' | b'\n' | b'\r' | 0x0b | 0x0c)
}

fn skip_space(page: &[u8], mut i: usize) -> usize {
    while i < page.len() && is_space(page[i]) {
        i += 1;
    }
    i
}

/// Match `= `...`` after a marker ending at `i`, returning the payload bounds
fn match_block(page: &[u8], i: usize) -> Option<(usize, usize)> {
    let i = skip_space(page, i);
    if page.get(i) != Some(&b'=') {
        return None;
    }

    let i = skip_space(page, i + 1);
    if page.get(i) != Some(&BACKTICK) {
        return None;
    }

    let start = i + 1;
    let len = page[start..].iter().position(|&b| b == BACKTICK)?;
    Some((start, start + len))
}

/// Find the backtick-quoted payload following the secret marker
///
/// The marker is matched case-insensitively, the payload is returned byte-for-byte.
/// Occurrences of the marker that are not followed by a complete block are skipped.
pub fn find_secret(page: &[u8]) -> Result<&[u8], Error> {
    if page.len() < MARKER.len() {
        return Err(Error::NotFound);
    }

    for pos in 0..=page.len() - MARKER.len() {
        if !page[pos..pos + MARKER.len()].eq_ignore_ascii_case(MARKER) {
            continue;
        }

        if let Some((start, end)) = match_block(page, pos + MARKER.len()) {
            log::debug!("secret block at offset {}, {} bytes", start, end - start);
            return Ok(&page[start..end]);
        }
    }

    Err(Error::NotFound)
}

/// Extract the payload from a raw page, decrypt it, and keep the printable bytes
pub fn recover(page: &[u8], codec: &StreamXor) -> Result<String, Error> {
    let secret = find_secret(page)?;
    Ok(printable(&codec.decrypt(secret)))
}

/// Decrypt a payload copied out as printable-escaped text
pub fn recover_escaped(text: &[u8], codec: &StreamXor) -> Result<String, Error> {
    let secret = unescape(text)?;
    Ok(printable(&codec.decrypt(&secret)))
}

/// Recover with a one-character key, e.g. the page's literal `'5'`
pub fn recover_with_char(page: &[u8], key: char) -> Result<String, Error> {
    let codec = StreamXor::from_char(key)?;
    recover(page, &codec)
}
