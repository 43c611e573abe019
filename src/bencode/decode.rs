use super::error::{ParseError, StreamError};
use super::value::Value;
use crate::constants::MAX_NESTING_DEPTH;
use bytes::Bytes;
use std::collections::BTreeMap;
use std::io::Read;

/// Decodes a complete bencode document.
///
/// Only the canonical encoding of a value is accepted: dictionary keys must be
/// strictly ascending and unique, and numbers may not carry leading zeros.
/// Anything accepted here re-encodes to exactly the input bytes.
///
/// An empty input decodes to [`Value::Null`].
///
/// # Errors
///
/// Returns the first [`ParseError`] encountered, including
/// [`ParseError::TooMuchData`] if bytes remain after the root value.
///
/// # Examples
///
/// ```
/// use btmeta::bencode::{decode, ParseError, Value};
///
/// assert_eq!(decode(b"i-89e").unwrap(), Value::Integer(-89));
/// assert_eq!(decode(b"").unwrap(), Value::Null);
/// assert_eq!(decode(b"d3:fooi2e3:bar5:helloe"), Err(ParseError::DictBadOrder));
/// ```
pub fn decode(data: &[u8]) -> Result<Value, ParseError> {
    if data.is_empty() {
        return Ok(Value::Null);
    }

    let mut pos = 0;
    let value = decode_value(data, &mut pos, 0)?;

    if pos != data.len() {
        return Err(ParseError::TooMuchData);
    }

    Ok(value)
}

/// Reads `reader` to the end and decodes the bytes as one document.
///
/// This is not an incremental parser: the whole input is buffered first.
///
/// # Errors
///
/// [`StreamError::Io`] if reading fails, [`StreamError::Parse`] otherwise.
///
/// # Examples
///
/// ```
/// use btmeta::bencode::{decode_from_reader, Value};
///
/// let value = decode_from_reader(&b"l3:fooe"[..]).unwrap();
/// assert_eq!(value, Value::List(vec![Value::string("foo")]));
/// ```
pub fn decode_from_reader<R: Read>(mut reader: R) -> Result<Value, StreamError> {
    let mut data = Vec::new();
    reader.read_to_end(&mut data)?;
    Ok(decode(&data)?)
}

fn decode_value(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, ParseError> {
    match data.get(*pos) {
        None => Err(ParseError::UnexpectedEof),
        Some(b'i') => decode_integer(data, pos),
        Some(b'l') => decode_list(data, pos, depth),
        Some(b'd') => decode_dict(data, pos, depth),
        Some(b'0'..=b'9' | b'-') => decode_bytes(data, pos),
        Some(_) => Err(ParseError::BadPrefix),
    }
}

/// Advances past a run of ASCII digits and returns it.
fn take_digits<'a>(data: &'a [u8], pos: &mut usize) -> &'a [u8] {
    let start = *pos;
    while let Some(b'0'..=b'9') = data.get(*pos) {
        *pos += 1;
    }
    &data[start..*pos]
}

fn decode_integer(data: &[u8], pos: &mut usize) -> Result<Value, ParseError> {
    *pos += 1;
    let start = *pos;

    let negative = match data.get(*pos) {
        None => return Err(ParseError::UnexpectedEof),
        Some(b'e') => return Err(ParseError::IntegerEmpty),
        Some(b'-') => true,
        Some(b'0'..=b'9') => false,
        Some(_) => return Err(ParseError::IntegerNonDecimal),
    };
    if negative {
        *pos += 1;
    }

    let digits = take_digits(data, pos);
    if digits.is_empty() {
        return Err(match data.get(*pos) {
            None => ParseError::UnexpectedEof,
            Some(_) => ParseError::IntegerNonDecimal,
        });
    }

    match data.get(*pos) {
        None => return Err(ParseError::UnexpectedEof),
        Some(b'e') => {}
        Some(_) => return Err(ParseError::MissingPostfix),
    }

    // "-0" and "0<digit>" both have a shorter spelling.
    if digits[0] == b'0' && (negative || digits.len() > 1) {
        return Err(ParseError::LeadingZero);
    }

    let int_str =
        std::str::from_utf8(&data[start..*pos]).map_err(|_| ParseError::IntegerNonDecimal)?;
    let value: i64 = int_str.parse().map_err(|_| ParseError::IntegerOverflow)?;

    *pos += 1;
    Ok(Value::Integer(value))
}

fn decode_bytes(data: &[u8], pos: &mut usize) -> Result<Value, ParseError> {
    if data.get(*pos) == Some(&b'-') {
        return Err(ParseError::NegativeStringLength);
    }

    let digits = take_digits(data, pos);
    if digits.len() > 1 && digits[0] == b'0' {
        return Err(ParseError::LeadingZero);
    }

    if data.get(*pos) != Some(&b':') {
        return Err(ParseError::StringMissingColon);
    }
    *pos += 1;

    // A length that does not even fit in usize can never be satisfied.
    let len: usize = std::str::from_utf8(digits)
        .ok()
        .and_then(|s| s.parse().ok())
        .ok_or(ParseError::UnexpectedEof)?;

    let end = pos
        .checked_add(len)
        .filter(|&end| end <= data.len())
        .ok_or(ParseError::UnexpectedEof)?;

    let bytes = Bytes::copy_from_slice(&data[*pos..end]);
    *pos = end;

    Ok(Value::Bytes(bytes))
}

fn decode_list(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, ParseError> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(ParseError::NestingTooDeep);
    }

    *pos += 1;
    let mut list = Vec::new();

    while *pos < data.len() && data[*pos] != b'e' {
        list.push(decode_value(data, pos, depth + 1)?);
    }

    if *pos >= data.len() {
        return Err(ParseError::UnexpectedEof);
    }

    *pos += 1;
    Ok(Value::List(list))
}

fn decode_dict(data: &[u8], pos: &mut usize, depth: usize) -> Result<Value, ParseError> {
    if depth >= MAX_NESTING_DEPTH {
        return Err(ParseError::NestingTooDeep);
    }

    *pos += 1;
    let mut dict = BTreeMap::new();
    let mut keys = Vec::new();

    while *pos < data.len() && data[*pos] != b'e' {
        let key = match decode_value(data, pos, depth + 1)? {
            Value::Bytes(b) => b,
            _ => return Err(ParseError::DictKeyNotString),
        };

        if *pos >= data.len() || data[*pos] == b'e' {
            return Err(ParseError::DictIncompletePair);
        }

        let value = decode_value(data, pos, depth + 1)?;
        keys.push(key.clone());
        dict.insert(key, value);
    }

    if *pos >= data.len() {
        return Err(ParseError::UnexpectedEof);
    }

    // Checked over the keys as they were read, not the map's sorted view.
    if keys.windows(2).any(|pair| pair[0] > pair[1]) {
        return Err(ParseError::DictBadOrder);
    }
    if keys.windows(2).any(|pair| pair[0] == pair[1]) {
        return Err(ParseError::DictDuplicateKeys);
    }

    *pos += 1;
    Ok(Value::Dict(dict))
}
