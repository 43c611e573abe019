use std::collections::BTreeMap;

use bytes::Bytes;
use proptest::prelude::*;

use super::*;

fn b(s: &'static [u8]) -> Bytes {
    Bytes::from_static(s)
}

#[test]
fn test_decode_empty_input_is_null() {
    assert_eq!(decode(b"").unwrap(), Value::Null);
}

#[test]
fn test_decode_bad_prefix() {
    assert_eq!(decode(b"a"), Err(ParseError::BadPrefix));
    assert_eq!(decode(b"lae"), Err(ParseError::BadPrefix));
    assert_eq!(decode(b"dae"), Err(ParseError::BadPrefix));
    assert_eq!(decode(b"d3:fooae"), Err(ParseError::BadPrefix));
}

#[test]
fn test_decode_bytes() {
    assert_eq!(decode(b"3:foo").unwrap(), Value::Bytes(b(b"foo")));
    assert_eq!(decode(b"0:").unwrap(), Value::Bytes(b(b"")));
    assert_eq!(
        decode(b"11:Hello world").unwrap(),
        Value::Bytes(b(b"Hello world"))
    );
}

#[test]
fn test_decode_bytes_non_utf8() {
    let value = decode(b"2:\xff\xfe").unwrap();
    assert_eq!(value.bytes().unwrap(), b"\xff\xfe");
    assert_eq!(value.as_str(), None);
}

#[test]
fn test_decode_bytes_invalid() {
    assert_eq!(decode(b"-1"), Err(ParseError::NegativeStringLength));
    assert_eq!(decode(b"01:f"), Err(ParseError::LeadingZero));
    assert_eq!(decode(b"00:"), Err(ParseError::LeadingZero));
    assert_eq!(decode(b"1a"), Err(ParseError::StringMissingColon));
    assert_eq!(decode(b"3foo"), Err(ParseError::StringMissingColon));
    assert_eq!(decode(b"3"), Err(ParseError::StringMissingColon));
    assert_eq!(decode(b"3:fo"), Err(ParseError::UnexpectedEof));
    assert_eq!(
        decode(b"99999999999999999999999:x"),
        Err(ParseError::UnexpectedEof)
    );
}

#[test]
fn test_decode_trailing_data_error() {
    assert_eq!(decode(b"11:Hello world3:foo"), Err(ParseError::TooMuchData));
    assert_eq!(decode(b"i42eextra"), Err(ParseError::TooMuchData));
}

#[test]
fn test_decode_integer() {
    assert_eq!(decode(b"i6e").unwrap(), Value::Integer(6));
    assert_eq!(decode(b"i43e").unwrap(), Value::Integer(43));
    assert_eq!(decode(b"i-89e").unwrap(), Value::Integer(-89));
    assert_eq!(decode(b"i0e").unwrap(), Value::Integer(0));
    assert_eq!(
        decode(b"i9223372036854775807e").unwrap(),
        Value::Integer(i64::MAX)
    );
    assert_eq!(
        decode(b"i-9223372036854775808e").unwrap(),
        Value::Integer(i64::MIN)
    );
}

#[test]
fn test_decode_integer_invalid() {
    assert_eq!(decode(b"i"), Err(ParseError::UnexpectedEof));
    assert_eq!(decode(b"ie"), Err(ParseError::IntegerEmpty));
    assert_eq!(decode(b"i6"), Err(ParseError::UnexpectedEof));
    assert_eq!(decode(b"i-"), Err(ParseError::UnexpectedEof));
    assert_eq!(decode(b"i6a"), Err(ParseError::MissingPostfix));
    assert_eq!(decode(b"ia6e"), Err(ParseError::IntegerNonDecimal));
    assert_eq!(decode(b"i-e"), Err(ParseError::IntegerNonDecimal));
    assert_eq!(decode(b"i--1e"), Err(ParseError::IntegerNonDecimal));
}

#[test]
fn test_decode_integer_non_canonical() {
    assert_eq!(decode(b"i-0e"), Err(ParseError::LeadingZero));
    assert_eq!(decode(b"i03e"), Err(ParseError::LeadingZero));
    assert_eq!(decode(b"i-03e"), Err(ParseError::LeadingZero));
    assert_eq!(decode(b"i00e"), Err(ParseError::LeadingZero));
}

#[test]
fn test_decode_integer_overflow() {
    assert_eq!(
        decode(b"i9223372036854775808e"),
        Err(ParseError::IntegerOverflow)
    );
    assert_eq!(
        decode(b"i-9223372036854775809e"),
        Err(ParseError::IntegerOverflow)
    );
}

#[test]
fn test_decode_list() {
    assert_eq!(decode(b"le").unwrap(), Value::List(vec![]));
    assert_eq!(decode(b"l"), Err(ParseError::UnexpectedEof));
    assert_eq!(decode(b"li64e"), Err(ParseError::UnexpectedEof));

    let result = decode(b"llei-89e3:bare").unwrap();
    assert_eq!(result.len(), 3);
    assert_eq!(result.at(0).unwrap(), &Value::List(vec![]));
    assert_eq!(result.at(1).unwrap().integer().unwrap(), -89);
    assert_eq!(result.at(2).unwrap().bytes().unwrap(), b"bar");
}

#[test]
fn test_decode_list_nested_containers() {
    assert_eq!(
        decode(b"llee").unwrap(),
        Value::List(vec![Value::List(vec![])])
    );
    assert_eq!(
        decode(b"ldee").unwrap(),
        Value::List(vec![Value::Dict(BTreeMap::new())])
    );
}

#[test]
fn test_decode_dict() {
    assert_eq!(decode(b"de").unwrap(), Value::Dict(BTreeMap::new()));

    let result = decode(b"d3:bari2e3:foo5:helloe").unwrap();
    assert_eq!(result.len(), 2);
    assert_eq!(result.at_key("bar").unwrap().integer().unwrap(), 2);
    assert_eq!(result.at_key("foo").unwrap().bytes().unwrap(), b"hello");

    assert_eq!(
        decode(b"d3:foolee").unwrap().at_key("foo").unwrap(),
        &Value::new_list()
    );
    assert_eq!(
        decode(b"d3:foodee").unwrap().at_key("foo").unwrap(),
        &Value::new_dict()
    );
}

#[test]
fn test_decode_dict_invalid() {
    assert_eq!(decode(b"d"), Err(ParseError::UnexpectedEof));
    assert_eq!(decode(b"di0e3:fooe"), Err(ParseError::DictKeyNotString));
    assert_eq!(decode(b"dle3:fooe"), Err(ParseError::DictKeyNotString));
    assert_eq!(decode(b"d3:fooe"), Err(ParseError::DictIncompletePair));
    assert_eq!(decode(b"d3:foo"), Err(ParseError::DictIncompletePair));
    assert_eq!(decode(b"d3:foo3:bar"), Err(ParseError::UnexpectedEof));
}

#[test]
fn test_decode_dict_key_order() {
    assert_eq!(
        decode(b"d3:fooi2e3:bar5:helloe"),
        Err(ParseError::DictBadOrder)
    );
    assert_eq!(
        decode(b"d3:fooi2e3:foo5:helloe"),
        Err(ParseError::DictDuplicateKeys)
    );
    // Byte order, not length order: "ab" sorts before "b".
    assert!(decode(b"d2:abi1e1:bi2ee").is_ok());
    assert_eq!(decode(b"d1:bi2e2:abi1ee"), Err(ParseError::DictBadOrder));
}

#[test]
fn test_decode_dict_order_checked_after_pairs() {
    // The stream ends before the order check can run.
    assert_eq!(decode(b"d1:bi1e1:ai2e"), Err(ParseError::UnexpectedEof));
}

#[test]
fn test_decode_nesting_limit() {
    let depth = crate::constants::MAX_NESTING_DEPTH;

    let mut ok = vec![b'l'; depth];
    ok.extend(std::iter::repeat(b'e').take(depth));
    assert!(decode(&ok).is_ok());

    let mut too_deep = vec![b'l'; depth + 1];
    too_deep.extend(std::iter::repeat(b'e').take(depth + 1));
    assert_eq!(decode(&too_deep), Err(ParseError::NestingTooDeep));
}

#[test]
fn test_encode_integer() {
    assert_eq!(encode(&Value::Integer(64)).unwrap(), b"i64e");
    assert_eq!(encode(&Value::Integer(-9)).unwrap(), b"i-9e");
    assert_eq!(encode(&Value::Integer(0)).unwrap(), b"i0e");
}

#[test]
fn test_encode_bytes() {
    assert_eq!(encode(&Value::string("Hello world")).unwrap(), b"11:Hello world");
    assert_eq!(encode(&Value::string("")).unwrap(), b"0:");
}

#[test]
fn test_encode_list() {
    assert_eq!(encode(&Value::new_list()).unwrap(), b"le");

    let list = Value::List(vec![
        Value::string("foo"),
        Value::Integer(64),
        Value::new_list(),
        Value::new_dict(),
    ]);
    assert_eq!(encode(&list).unwrap(), b"l3:fooi64eledee");
}

#[test]
fn test_encode_dict_sorts_keys() {
    let value: Value = [
        ("foo", Value::Integer(-89)),
        ("bar", Value::new_list()),
        ("hello", Value::new_dict()),
    ]
    .into_iter()
    .collect();
    assert_eq!(encode(&value).unwrap(), b"d3:barle3:fooi-89e5:hellodee");
}

#[test]
fn test_encode_null() {
    assert_eq!(encode(&Value::Null), Err(DumpError::Null));
    assert_eq!(
        encode(&Value::List(vec![Value::Integer(1), Value::Null])),
        Err(DumpError::Null)
    );
}

#[test]
fn test_encode_to_appends() {
    let mut buf = b"prefix".to_vec();
    encode_to(&Value::Integer(7), &mut buf).unwrap();
    assert_eq!(buf, b"prefixi7e");
}

#[test]
fn test_roundtrip() {
    let original = b"d8:announce15:http://test.com4:infod4:name4:test12:piece lengthi16384eee";
    let decoded = decode(original).unwrap();
    let encoded = encode(&decoded).unwrap();
    assert_eq!(encoded, original);
}

#[test]
fn test_value_accessors() {
    let value = Value::Integer(42);
    assert_eq!(value.as_integer(), Some(42));
    assert!(value.as_bytes().is_none());

    let value = Value::Bytes(b(b"test"));
    assert_eq!(value.as_str(), Some("test"));
    assert!(value.as_integer().is_none());

    let value = Value::List(vec![]);
    assert!(value.as_list().is_some());
    assert!(value.as_dict().is_none());
}

#[test]
fn test_strict_accessors_type_mismatch() {
    let samples = [
        Value::Null,
        Value::Integer(1),
        Value::new_list(),
        Value::new_dict(),
    ];
    for value in &samples {
        assert_eq!(
            value.bytes(),
            Err(AccessError::TypeMismatch {
                expected: ValueKind::Bytes,
                found: value.kind(),
            })
        );
    }

    let err = Value::string("x").integer().unwrap_err();
    assert_eq!(
        err,
        AccessError::TypeMismatch {
            expected: ValueKind::Integer,
            found: ValueKind::Bytes,
        }
    );
    assert_eq!(err.to_string(), "type mismatch: expected integer, found string");

    assert!(matches!(
        Value::Null.at(0),
        Err(AccessError::TypeMismatch { .. })
    ));
    assert!(matches!(
        Value::string("foo").at_key("foo"),
        Err(AccessError::TypeMismatch { .. })
    ));
    assert!(matches!(
        Value::Integer(1).items(),
        Err(AccessError::TypeMismatch { .. })
    ));
    assert!(matches!(
        Value::new_dict().elements(),
        Err(AccessError::TypeMismatch { .. })
    ));
}

#[test]
fn test_list_index_bounds() {
    let mut list: Value = vec![Value::Integer(1)].into();
    assert_eq!(list.at(0).unwrap(), &Value::Integer(1));
    assert_eq!(
        list.at(1),
        Err(AccessError::IndexOutOfBounds { index: 1, len: 1 })
    );
    assert_eq!(
        list.at_mut(1),
        Err(AccessError::IndexOutOfBounds { index: 1, len: 1 })
    );
    assert_eq!(
        list.remove_at(3),
        Err(AccessError::IndexOutOfBounds { index: 3, len: 1 })
    );
}

#[test]
fn test_list_mutation() {
    let mut list = Value::Null;
    list.push("foo").unwrap();
    list.push(Value::Integer(2)).unwrap();
    assert_eq!(list.len(), 2);

    *list.at_mut(0).unwrap() = Value::string("bar");
    assert_eq!(list.at(0).unwrap().as_str(), Some("bar"));

    assert_eq!(list.remove_at(0).unwrap(), Value::string("bar"));
    assert_eq!(list, Value::List(vec![Value::Integer(2)]));

    list.clear();
    assert!(list.is_empty());
    assert_eq!(list.kind(), ValueKind::List);
}

#[test]
fn test_push_on_non_list() {
    for mut value in [Value::string("s"), Value::Integer(1), Value::new_dict()] {
        assert!(matches!(
            value.push("foo"),
            Err(AccessError::TypeMismatch {
                expected: ValueKind::List,
                ..
            })
        ));
    }
}

#[test]
fn test_dict_mutation() {
    let mut dict = Value::Null;
    assert_eq!(dict.insert("foo", 1i64).unwrap(), None);
    assert_eq!(dict.kind(), ValueKind::Dict);
    assert_eq!(
        dict.insert("foo", 2i64).unwrap(),
        Some(Value::Integer(1))
    );

    *dict.entry("bar").unwrap() = Value::string("baz");
    assert!(dict.contains_key("bar"));
    assert!(!dict.contains_key("qux"));

    *dict.at_key_mut("foo").unwrap() = Value::Integer(3);
    assert_eq!(dict.at_key("foo").unwrap().integer().unwrap(), 3);

    assert_eq!(dict.remove_key("foo").unwrap(), Some(Value::Integer(3)));
    assert_eq!(dict.remove_key("foo").unwrap(), None);
    assert_eq!(
        dict.at_key("foo"),
        Err(AccessError::KeyNotFound("foo".into()))
    );
}

#[test]
fn test_entry_inserts_null() {
    let mut dict = Value::new_dict();
    assert!(dict.entry("new").unwrap().is_null());
    assert!(dict.contains_key("new"));
    assert_eq!(encode(&dict), Err(DumpError::Null));
}

#[test]
fn test_keyed_mutation_on_non_dict() {
    for mut value in [Value::string("s"), Value::Integer(1), Value::new_list()] {
        assert!(value.insert("k", 1i64).is_err());
        assert!(value.entry("k").is_err());
        assert!(value.remove_key("k").is_err());
        assert!(!value.contains_key("k"));
    }
    assert!(Value::Null.remove_key("k").is_err());
    assert!(Value::Null.remove_at(0).is_err());
}

#[test]
fn test_clear_keeps_tag() {
    let mut value = Value::Null;
    value.clear();
    assert!(value.is_null());

    let mut value = Value::string("foo");
    value.clear();
    assert_eq!(value, Value::string(""));

    let mut value = Value::Integer(10);
    value.clear();
    assert_eq!(value, Value::Integer(0));

    let mut value = decode(b"d3:fooi1ee").unwrap();
    value.clear();
    assert_eq!(value, Value::new_dict());
}

#[test]
fn test_len_by_kind() {
    assert_eq!(Value::Null.len(), 0);
    assert!(Value::Null.is_empty());
    assert_eq!(Value::string("long string").len(), 1);
    assert_eq!(Value::Integer(0).len(), 1);
}

#[test]
fn test_iteration() {
    let list = decode(b"l3:fooi1ee").unwrap();
    let elements: Vec<&Value> = list.elements().unwrap().collect();
    assert_eq!(elements, [&Value::string("foo"), &Value::Integer(1)]);

    let mut dict = Value::new_dict();
    dict.insert("zeta", 1i64).unwrap();
    dict.insert("alpha", 2i64).unwrap();
    dict.insert("mu", 3i64).unwrap();
    let keys: Vec<Bytes> = dict.items().unwrap().map(|(k, _)| k.clone()).collect();
    assert_eq!(keys, [b(b"alpha"), b(b"mu"), b(b"zeta")]);
}

#[test]
fn test_from_conversions() {
    assert_eq!(Value::from(5i64), Value::Integer(5));
    assert_eq!(Value::from("a"), Value::Bytes(b(b"a")));
    assert_eq!(Value::from(String::from("a")), Value::Bytes(b(b"a")));
    assert_eq!(Value::from(b"a".as_slice()), Value::Bytes(b(b"a")));
    assert_eq!(Value::from(vec![b'a']), Value::Bytes(b(b"a")));

    let list: Value = [Value::Integer(1), Value::Integer(2)].into_iter().collect();
    assert_eq!(encode(&list).unwrap(), b"li1ei2ee");
}

fn arb_value() -> impl Strategy<Value = Value> {
    let leaf = prop_oneof![
        any::<i64>().prop_map(Value::Integer),
        proptest::collection::vec(any::<u8>(), 0..16).prop_map(Value::from),
    ];
    leaf.prop_recursive(4, 64, 8, |inner| {
        prop_oneof![
            proptest::collection::vec(inner.clone(), 0..8).prop_map(Value::List),
            proptest::collection::btree_map(
                proptest::collection::vec(any::<u8>(), 0..8).prop_map(Bytes::from),
                inner,
                0..8,
            )
            .prop_map(Value::Dict),
        ]
    })
}

fn dict_keys_ascending(value: &Value) -> bool {
    match value {
        Value::List(l) => l.iter().all(dict_keys_ascending),
        Value::Dict(d) => {
            let keys: Vec<&Bytes> = d.keys().collect();
            keys.windows(2).all(|pair| pair[0] < pair[1])
                && d.values().all(dict_keys_ascending)
        }
        _ => true,
    }
}

proptest! {
    #[test]
    fn prop_decode_inverts_encode(value in arb_value()) {
        let encoded = encode(&value).unwrap();
        prop_assert_eq!(decode(&encoded).unwrap(), value);
    }

    #[test]
    fn prop_canonicalization_is_idempotent(value in arb_value()) {
        let once = encode(&value).unwrap();
        let twice = encode(&decode(&once).unwrap()).unwrap();
        prop_assert_eq!(once, twice);
    }

    #[test]
    fn prop_decoded_dicts_are_ordered(value in arb_value()) {
        let decoded = decode(&encode(&value).unwrap()).unwrap();
        prop_assert!(dict_keys_ascending(&decoded));
    }

    #[test]
    fn prop_accepted_input_roundtrips(data in proptest::collection::vec(any::<u8>(), 1..64)) {
        if let Ok(value) = decode(&data) {
            prop_assert_eq!(encode(&value).unwrap(), data);
        }
    }
}

struct FailingIo;

impl std::io::Read for FailingIo {
    fn read(&mut self, _buf: &mut [u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }
}

impl std::io::Write for FailingIo {
    fn write(&mut self, _buf: &[u8]) -> std::io::Result<usize> {
        Err(std::io::Error::new(std::io::ErrorKind::BrokenPipe, "closed"))
    }

    fn flush(&mut self) -> std::io::Result<()> {
        Ok(())
    }
}

#[test]
fn test_decode_from_reader() {
    let value = decode_from_reader(std::io::Cursor::new(b"d3:bari2ee".to_vec())).unwrap();
    assert_eq!(value.at_key("bar").unwrap().integer().unwrap(), 2);

    assert!(matches!(
        decode_from_reader(&b"i6a"[..]),
        Err(StreamError::Parse(ParseError::MissingPostfix))
    ));
    assert!(matches!(
        decode_from_reader(FailingIo),
        Err(StreamError::Io(_))
    ));
}

#[test]
fn test_encode_to_writer() {
    let value = decode(b"l3:fooi64eledee").unwrap();
    let mut out = Vec::new();
    encode_to_writer(&value, &mut out).unwrap();
    assert_eq!(out, b"l3:fooi64eledee");

    let mut out = b"keep".to_vec();
    let with_null = Value::List(vec![Value::Integer(1), Value::Null]);
    assert!(matches!(
        encode_to_writer(&with_null, &mut out),
        Err(StreamError::Dump(DumpError::Null))
    ));
    assert_eq!(out, b"keep");

    assert!(matches!(
        encode_to_writer(&Value::Integer(1), &mut FailingIo),
        Err(StreamError::Io(_))
    ));
}
