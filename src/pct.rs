use std::fmt::Write;
use std::str::CharIndices;

pub(crate) fn is_unreserved(c: char) -> bool {
    matches!(c, 'A'..='Z' | 'a'..='z' | '0'..='9' | '-' | '.' | '_' | '~')
}
pub(crate) const RE_UNRESERVED: &str = r"A-Za-z0-9\-._~";

pub(crate) fn is_reserved(c: char) -> bool {
    matches!(
        c,
        ':' | '/'
            | '?'
            | '#'
            | '['
            | ']'
            | '@'
            | '!'
            | '$'
            | '&'
            | '\'' // https://www.rfc-editor.org/errata/eid6937
            | '('
            | ')'
            | '*'
            | '+'
            | ','
            | ';'
            | '='
    )
}

pub(crate) fn encode_char(ch: char, out: &mut String) {
    for b in ch.encode_utf8(&mut [0; 4]).as_bytes() {
        write!(out, "%{b:02X}").unwrap();
    }
}

/// Encodes everything outside the unreserved set, `%` included.
pub(crate) fn encode_unreserved(s: &str, out: &mut String) {
    for ch in s.chars() {
        if is_unreserved(ch) {
            out.push(ch);
        } else {
            encode_char(ch, out);
        }
    }
}

/// Encodes everything outside unreserved ∪ reserved. Existing percent
/// triplets pass through undecoded; a `%` that does not start a valid
/// triplet is encoded as `%25`.
pub(crate) fn encode_reserved(s: &str, out: &mut String) {
    for d in DecodedIter::new(s) {
        match d {
            Decoded::Char(ch) => {
                if is_unreserved(ch) || is_reserved(ch) {
                    out.push(ch);
                } else {
                    encode_char(ch, out);
                }
            }
            Decoded::Byte { triplet, .. } => {
                out.push_str(triplet);
            }
        }
    }
}

/// Percent-decodes `s`. `None` if the decoded bytes are not valid UTF-8.
pub(crate) fn decode(s: &str) -> Option<String> {
    let mut out = String::new();
    let mut bytes = Vec::new();
    for d in DecodedIter::new(s) {
        match d {
            Decoded::Char(ch) => {
                commit_bytes(&mut bytes, &mut out)?;
                out.push(ch);
            }
            Decoded::Byte { b, .. } => {
                bytes.push(b);
            }
        }
    }
    commit_bytes(&mut bytes, &mut out)?;
    Some(out)
}

fn commit_bytes(bytes: &mut Vec<u8>, out: &mut String) -> Option<()> {
    for chunk in bytes.utf8_chunks() {
        out.push_str(chunk.valid());
        if !chunk.invalid().is_empty() {
            return None;
        }
    }
    bytes.clear();
    Some(())
}

fn to_u8(c: char) -> Option<u8> {
    match c {
        '0'..='9' => Some(c as u8 - b'0'),
        'a'..='f' => Some(c as u8 - b'a' + 10),
        'A'..='F' => Some(c as u8 - b'A' + 10),
        _ => None,
    }
}

/// One source item: a plain character, or the byte a percent triplet
/// encodes together with its raw text.
#[derive(Clone, Copy)]
enum Decoded<'a> {
    Char(char),
    Byte { b: u8, triplet: &'a str },
}

#[derive(Clone)]
struct DecodedIter<'a> {
    source: &'a str,
    chars_indices: CharIndices<'a>,
}
impl<'a> DecodedIter<'a> {
    fn new(source: &'a str) -> Self {
        Self {
            source,
            chars_indices: source.char_indices(),
        }
    }
}
impl<'a> Iterator for DecodedIter<'a> {
    type Item = Decoded<'a>;

    fn next(&mut self) -> Option<Self::Item> {
        let (index, ch) = self.chars_indices.next()?;
        if ch == '%' {
            let this = self.clone();
            if let Some(b) = next_decoded_u8(&mut self.chars_indices) {
                Some(Decoded::Byte {
                    b,
                    triplet: &self.source[index..][..3],
                })
            } else {
                *self = this;
                Some(Decoded::Char('%'))
            }
        } else {
            Some(Decoded::Char(ch))
        }
    }
}

fn next_decoded_u8(chars_indices: &mut CharIndices) -> Option<u8> {
    let c0 = next_hex(chars_indices)?;
    let c1 = next_hex(chars_indices)?;
    Some(c0 * 16 + c1)
}
fn next_hex(chars_indices: &mut CharIndices) -> Option<u8> {
    let (_, c) = chars_indices.next()?;
    to_u8(c)
}
