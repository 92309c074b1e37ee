use alloc::{format, string::String, vec::Vec};
use core::fmt;

#[derive(Debug, PartialEq)]
pub enum Error {
    HexLength,
    ParseHex,
    TruncatedEscape,
    BadEscape(usize),
    NonLatin1(u32),
}

impl fmt::Display for Error {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Error::HexLength => write!(f, "hex string is empty or has an odd digit count"),
            Error::ParseHex => write!(f, "invalid hex digit"),
            Error::TruncatedEscape => write!(f, "\\ at end of string"),
            Error::BadEscape(off) => write!(f, "malformed escape at offset {}", off),
            Error::NonLatin1(cp) => write!(f, "escape U+{:04X} has no single-byte code", cp),
        }
    }
}

#[cfg(feature = "std")]
impl std::error::Error for Error {}

/// Hex-decode a string
///
/// ASCII whitespace between digits is ignored, so dumps like "53 6c 54" decode directly
///
/// errors: returns Error on odd length and empty hex strings
pub fn from_hex(hex: &str) -> Result<Vec<u8>, Error> {
    let digits: Vec<u8> = hex.bytes().filter(|b| !b.is_ascii_whitespace()).collect();
    if digits.len() % 2 != 0 || digits.is_empty() {
        return Err(Error::HexLength);
    }

    hex::decode(&digits).map_err(|err| match err {
        hex::FromHexError::InvalidHexCharacter { .. } => Error::ParseHex,
        hex::FromHexError::OddLength | hex::FromHexError::InvalidStringLength => Error::HexLength,
    })
}

pub fn to_hex(bytes: &[u8]) -> String {
    hex::encode(bytes)
}

/// Hex-encode with a single space between bytes
pub fn to_hex_spaced(bytes: &[u8]) -> String {
    bytes
        .iter()
        .map(|b| format!("{:02x}", b))
        .collect::<Vec<String>>()
        .join(" ")
}

pub fn is_printable(byte: u8) -> bool {
    (0x20..=0x7e).contains(&byte)
}

/// Keep only the printable ASCII bytes (32..=126)
pub fn printable(bytes: &[u8]) -> String {
    bytes
        .iter()
        .filter(|&&b| is_printable(b))
        .map(|&b| b as char)
        .collect()
}

/// Render bytes as printable-escaped text
///
/// Inverse of `unescape`: backslash, tab, newline and carriage return get their short
/// escapes, every other byte outside 0x20..=0x7e becomes `\xhh`
pub fn escape(bytes: &[u8]) -> String {
    let mut res = String::with_capacity(bytes.len());
    for &b in bytes {
        match b {
            b'\\' => res.push_str("\\\\"),
            b'\t' => res.push_str("\\t"),
            b'\n' => res.push_str("\\n"),
            b'\r' => res.push_str("\\r"),
            _ if is_printable(b) => res.push(b as char),
            _ => res.push_str(&format!("\\x{:02x}", b)),
        }
    }
    res
}

/// Decode printable-escaped text into raw bytes
///
/// Bytes outside an escape are taken as-is (Latin-1). Escapes decoding above 0xff are
/// rejected, unknown escapes are kept literally, backslash included.
///
/// errors: returns Error on a trailing backslash, malformed hex/octal/unicode escapes
pub fn unescape(text: &[u8]) -> Result<Vec<u8>, Error> {
    let mut res = Vec::with_capacity(text.len());
    let mut i = 0;

    while i < text.len() {
        if text[i] != b'\\' {
            res.push(text[i]);
            i += 1;
            continue;
        }

        let start = i;
        let esc = *text.get(i + 1).ok_or(Error::TruncatedEscape)?;
        i += 2;

        match esc {
            b'\n' => (),
            b'\\' | b'\'' | b'"' => res.push(esc),
            b'a' => res.push(0x07),
            b'b' => res.push(0x08),
            b'f' => res.push(0x0c),
            b'n' => res.push(b'\n'),
            b'r' => res.push(b'\r'),
            b't' => res.push(b'\t'),
            b'v' => res.push(0x0b),
            b'0'..=b'7' => {
                // up to three octal digits, the first already consumed
                let mut cp = (esc - b'0') as u32;
                let mut count = 1;
                while count < 3 && i < text.len() && (b'0'..=b'7').contains(&text[i]) {
                    cp = cp * 8 + (text[i] - b'0') as u32;
                    i += 1;
                    count += 1;
                }
                res.push(latin1(cp)?);
            }
            b'x' | b'u' | b'U' => {
                let width = match esc {
                    b'x' => 2,
                    b'u' => 4,
                    _ => 8,
                };
                let digits = text.get(i..i + width).ok_or(Error::BadEscape(start))?;
                let cp = hex_value(digits).ok_or(Error::BadEscape(start))?;
                i += width;
                res.push(latin1(cp)?);
            }
            _ => {
                res.push(b'\\');
                res.push(esc);
            }
        }
    }

    Ok(res)
}

fn hex_value(digits: &[u8]) -> Option<u32> {
    digits.iter().try_fold(0_u32, |acc, &d| {
        let v = (d as char).to_digit(16)?;
        acc.checked_mul(16)?.checked_add(v)
    })
}

fn latin1(cp: u32) -> Result<u8, Error> {
    if cp > 0xff {
        return Err(Error::NonLatin1(cp));
    }
    Ok(cp as u8)
}

#[cfg(test)]
mod tests {
    use super::*;
    use alloc::vec;

    #[test]
    fn check_from_hex() {
        assert_eq!(from_hex("536c54").unwrap(), vec![0x53, 0x6c, 0x54]);
        assert_eq!(from_hex("53 6c\n54").unwrap(), vec![0x53, 0x6c, 0x54]);
        assert_eq!(from_hex("DEADbeef").unwrap(), vec![0xde, 0xad, 0xbe, 0xef]);

        assert_eq!(from_hex(""), Err(Error::HexLength));
        assert_eq!(from_hex("  "), Err(Error::HexLength));
        assert_eq!(from_hex("536"), Err(Error::HexLength));
        assert_eq!(from_hex("5g"), Err(Error::ParseHex));
    }

    #[test]
    fn check_to_hex() {
        assert_eq!(to_hex(&[0x1b, 0x6c, 0xff]), "1b6cff");
        assert_eq!(to_hex_spaced(&[0x1b, 0x6c, 0xff]), "1b 6c ff");
        assert_eq!(to_hex_spaced(&[]), "");
    }

    #[test]
    fn check_printable() {
        assert!(is_printable(b' '));
        assert!(is_printable(b'~'));
        assert!(!is_printable(0x1f));
        assert!(!is_printable(0x7f));

        assert_eq!(printable(b"\x1bfl\x00ag\x7f{}\xff"), "flag{}");
    }

    #[test]
    fn check_unescape() {
        let raw = br#"Ye\x1blZg\x1d\"]e"#;
        assert_eq!(
            unescape(raw).unwrap(),
            vec![0x59, 0x65, 0x1b, 0x6c, 0x5a, 0x67, 0x1d, 0x22, 0x5d, 0x65]
        );

        assert_eq!(unescape(br"\\\'\a\b\f\n\r\t\v").unwrap(), b"\\'\x07\x08\x0c\n\r\t\x0b".to_vec());
        assert_eq!(unescape(b"a\\\nb").unwrap(), b"ab".to_vec());
        assert_eq!(unescape(br"\0\101\1010").unwrap(), b"\x00AA0".to_vec());
        assert_eq!(unescape(br"\u00e9\U0000001c").unwrap(), vec![0xe9, 0x1c]);
        assert_eq!(unescape(br"\q").unwrap(), b"\\q".to_vec());
        assert_eq!(unescape(b"\xe9").unwrap(), vec![0xe9]);
    }

    #[test]
    fn check_unescape_errors() {
        assert_eq!(unescape(b"abc\\"), Err(Error::TruncatedEscape));
        assert_eq!(unescape(br"ab\x1"), Err(Error::BadEscape(2)));
        assert_eq!(unescape(br"\xzz"), Err(Error::BadEscape(0)));
        assert_eq!(unescape(br"\u263a"), Err(Error::NonLatin1(0x263a)));
        assert_eq!(unescape(br"\777"), Err(Error::NonLatin1(0o777)));
    }

    #[test]
    fn check_escape() {
        let bytes = b"Ye\x1blZ\\g\"\n\xff";
        let text = escape(bytes);
        assert_eq!(text, "Ye\\x1blZ\\\\g\"\\n\\xff");
        assert_eq!(unescape(text.as_bytes()).unwrap()[..], bytes[..]);
    }
}
