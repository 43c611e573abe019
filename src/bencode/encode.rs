use super::error::{DumpError, StreamError};
use super::value::Value;
use std::io::Write;

/// Encodes a bencode value to a byte vector.
///
/// The output is always canonical:
/// - Integers: `i<number>e`, no leading zeros
/// - Byte strings: `<length>:<data>`
/// - Lists: `l<items>e`
/// - Dictionaries: `d<key><value>...e` (keys in ascending byte order)
///
/// # Errors
///
/// Returns [`DumpError::Null`] if the value, or anything nested in it, is
/// [`Value::Null`].
///
/// # Examples
///
/// ```
/// use btmeta::bencode::{encode, DumpError, Value};
/// use std::collections::BTreeMap;
/// use bytes::Bytes;
///
/// assert_eq!(encode(&Value::Integer(42)).unwrap(), b"i42e");
/// assert_eq!(encode(&Value::string("hello")).unwrap(), b"5:hello");
///
/// let list = Value::List(vec![Value::Integer(1), Value::string("two")]);
/// assert_eq!(encode(&list).unwrap(), b"li1e3:twoe");
///
/// let mut dict = BTreeMap::new();
/// dict.insert(Bytes::from_static(b"b"), Value::Integer(2));
/// dict.insert(Bytes::from_static(b"a"), Value::Integer(1));
/// assert_eq!(encode(&Value::Dict(dict)).unwrap(), b"d1:ai1e1:bi2ee");
///
/// assert_eq!(encode(&Value::Null), Err(DumpError::Null));
/// ```
pub fn encode(value: &Value) -> Result<Vec<u8>, DumpError> {
    let mut buf = Vec::new();
    encode_to(value, &mut buf)?;
    Ok(buf)
}

/// Appends the canonical encoding of `value` to `buf`.
///
/// On error `buf` may hold a partial encoding.
pub fn encode_to(value: &Value, buf: &mut Vec<u8>) -> Result<(), DumpError> {
    match value {
        Value::Null => return Err(DumpError::Null),
        Value::Integer(i) => {
            buf.push(b'i');
            buf.extend_from_slice(i.to_string().as_bytes());
            buf.push(b'e');
        }
        Value::Bytes(b) => write_bytes(b, buf),
        Value::List(l) => {
            buf.push(b'l');
            for item in l {
                encode_to(item, buf)?;
            }
            buf.push(b'e');
        }
        Value::Dict(d) => {
            buf.push(b'd');
            for (key, val) in d {
                write_bytes(key, buf);
                encode_to(val, buf)?;
            }
            buf.push(b'e');
        }
    }
    Ok(())
}

/// Encodes `value` and writes it to `writer`.
///
/// The value is encoded in full before anything is written, so a nested
/// [`Value::Null`] leaves the writer untouched.
///
/// # Examples
///
/// ```
/// use btmeta::bencode::{encode_to_writer, Value};
///
/// let mut out = Vec::new();
/// encode_to_writer(&Value::string("spam"), &mut out).unwrap();
/// assert_eq!(out, b"4:spam");
/// ```
pub fn encode_to_writer<W: Write>(value: &Value, writer: &mut W) -> Result<(), StreamError> {
    let buf = encode(value)?;
    writer.write_all(&buf)?;
    Ok(())
}

fn write_bytes(bytes: &[u8], buf: &mut Vec<u8>) {
    buf.extend_from_slice(bytes.len().to_string().as_bytes());
    buf.push(b':');
    buf.extend_from_slice(bytes);
}
