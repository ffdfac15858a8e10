// A small nom parser used to check encoder output. It trusts its input more than a real
// decoder should and is only compiled for tests.

use std::str::FromStr;

use nom::branch::alt;
use nom::character::complete::{char, digit1};
use nom::combinator::{map, map_res, opt, recognize};
use nom::multi::{length_data, many0};
use nom::sequence::{delimited, pair, terminated};
use nom::IResult;

use crate::bytestring::ByteString;
use crate::dict::Dictionary;
use crate::value::Value;

#[derive(Debug, Clone, Eq, PartialEq)]
pub(crate) enum BValue {
    Integer(i128),
    String(Vec<u8>),
    List(Vec<BValue>),
    // wire order, so tests can see whether keys came out sorted
    Dictionary(Vec<(Vec<u8>, BValue)>),
}

impl BValue {
    /// Dictionary keys strictly ascending at every level.
    pub(crate) fn is_canonical(&self) -> bool {
        match self {
            BValue::Integer(_) | BValue::String(_) => true,
            BValue::List(items) => items.iter().all(BValue::is_canonical),
            BValue::Dictionary(items) => {
                items.windows(2).all(|w| w[0].0 < w[1].0) && items.iter().all(|(_, v)| v.is_canonical())
            }
        }
    }

    /// Maps back onto the encoder's model. Mixed lists have no counterpart and yield `None`.
    pub(crate) fn into_value(self) -> Option<Value> {
        match self {
            BValue::Integer(i) => match i64::try_from(i) {
                Ok(int) => Some(Value::Int(int)),
                Err(_) => u64::try_from(i).ok().map(Value::Uint),
            },
            BValue::String(s) => Some(Value::Str(ByteString(s))),
            BValue::Dictionary(items) => into_dictionary(items).map(Value::Dict),
            BValue::List(items) => {
                if items.iter().all(|v| matches!(v, BValue::String(_))) {
                    let strings = items
                        .into_iter()
                        .filter_map(|v| match v {
                            BValue::String(s) => Some(ByteString(s)),
                            _ => None,
                        })
                        .collect();
                    Some(Value::StrList(strings))
                } else {
                    let mut dicts = Vec::with_capacity(items.len());
                    for item in items {
                        match item {
                            BValue::Dictionary(d) => dicts.push(into_dictionary(d)?),
                            _ => return None,
                        }
                    }
                    Some(Value::DictList(dicts))
                }
            }
        }
    }
}

fn into_dictionary(items: Vec<(Vec<u8>, BValue)>) -> Option<Dictionary> {
    let mut dict = Dictionary::with_capacity(items.len());
    for (key, value) in items {
        dict.insert(key, value.into_value()?);
    }
    Some(dict)
}

/// Parses exactly one value, rejecting trailing bytes.
pub(crate) fn decode(inp: &[u8]) -> Option<BValue> {
    match parse_type(inp) {
        Ok((rest, value)) if rest.is_empty() => Some(value),
        _ => None,
    }
}

fn parse_type(inp: &[u8]) -> IResult<&[u8], BValue> {
    alt((parse_integer, parse_string, parse_list, parse_dictionary))(inp)
}

fn parse_dictionary(inp: &[u8]) -> IResult<&[u8], BValue> {
    map(
        delimited(char('d'), many0(pair(parse_string_raw, parse_type)), char('e')),
        |items| BValue::Dictionary(items.into_iter().map(|(k, v)| (k.to_vec(), v)).collect()),
    )(inp)
}

fn parse_list(inp: &[u8]) -> IResult<&[u8], BValue> {
    map(delimited(char('l'), many0(parse_type), char('e')), BValue::List)(inp)
}

fn parse_string(inp: &[u8]) -> IResult<&[u8], BValue> {
    map(parse_string_raw, |s: &[u8]| BValue::String(s.to_vec()))(inp)
}

fn parse_string_raw(inp: &[u8]) -> IResult<&[u8], &[u8]> {
    length_data(terminated(map_res(digit1, ascii_num::<usize>), char(':')))(inp)
}

fn parse_integer(inp: &[u8]) -> IResult<&[u8], BValue> {
    delimited(
        char('i'),
        map(map_res(recognize(pair(opt(char('-')), digit1)), ascii_num::<i128>), BValue::Integer),
        char('e'),
    )(inp)
}

fn ascii_num<T: FromStr>(digits: &[u8]) -> Result<T, ()> {
    std::str::from_utf8(digits).map_err(|_| ())?.parse().map_err(|_| ())
}

#[cfg(test)]
mod test {
    use std::time::Duration;

    use proptest::prelude::*;

    use super::*;
    use crate::encoder::to_bytes;

    #[test]
    pub fn test_parse_integer() {
        assert_eq!(Some(BValue::Integer(123)), decode(b"i123e"));
        assert_eq!(Some(BValue::Integer(-123)), decode(b"i-123e"));
        assert_eq!(Some(BValue::Integer(u64::MAX as i128)), decode(b"i18446744073709551615e"));
        assert_eq!(None, decode(b"iabc"));
        assert_eq!(None, decode(b"i23f"));
    }

    #[test]
    pub fn test_parse_string() {
        assert_eq!(Some(BValue::String(b"abc".to_vec())), decode(b"3:abc"));
        assert_eq!(Some(BValue::String(vec![])), decode(b"0:"));
        assert_eq!(Some(BValue::String(vec![0xff, b':'])), decode(b"2:\xff:"));
        assert_eq!(None, decode(b"3:ab"));
        assert_eq!(None, decode(b"3:abcd"));
    }

    #[test]
    pub fn test_parse_containers() {
        assert_eq!(Some(BValue::List(vec![])), decode(b"le"));
        assert_eq!(Some(BValue::Dictionary(vec![])), decode(b"de"));
        assert_eq!(
            Some(BValue::Dictionary(vec![
                (b"a".to_vec(), BValue::List(vec![BValue::String(b"hey".to_vec())])),
                (b"b".to_vec(), BValue::List(vec![])),
            ])),
            decode(b"d1:al3:heye1:blee")
        );
        assert_eq!(None, decode(b"d4:iteme"));
    }

    #[test]
    pub fn canonical_checks_key_order() {
        assert!(decode(b"d1:ai1e1:bi2ee").unwrap().is_canonical());
        assert!(!decode(b"d1:bi1e1:ai2ee").unwrap().is_canonical());
        assert!(!decode(b"d1:ai1e1:ai2ee").unwrap().is_canonical());
        assert!(!decode(b"ld1:bi1e1:ai2eee").unwrap().is_canonical());
    }

    fn arb_key() -> impl Strategy<Value = Vec<u8>> {
        prop::collection::vec(any::<u8>(), 0..8)
    }

    fn arb_dictionary(inner: impl Strategy<Value = Value> + Clone) -> impl Strategy<Value = Dictionary> {
        prop::collection::vec((arb_key(), inner), 0..6).prop_map(|pairs| pairs.into_iter().collect())
    }

    fn arb_value() -> impl Strategy<Value = Value> {
        let leaf = prop_oneof![
            any::<i64>().prop_map(Value::Int),
            any::<u64>().prop_map(Value::Uint),
            prop::collection::vec(any::<u8>(), 0..16).prop_map(|s| Value::Str(ByteString(s))),
            any::<u64>().prop_map(|ms| Value::Duration(Duration::from_millis(ms))),
        ];
        leaf.prop_recursive(4, 32, 6, |inner| {
            prop_oneof![
                arb_dictionary(inner.clone()).prop_map(Value::Dict),
                prop::collection::vec(arb_dictionary(inner), 0..4).prop_map(Value::DictList),
                prop::collection::vec(arb_key(), 0..6)
                    .prop_map(|l| Value::StrList(l.into_iter().map(ByteString).collect())),
            ]
        })
    }

    proptest! {
        #[test]
        fn reencoding_is_idempotent(value in arb_value()) {
            let first = to_bytes(&value).unwrap();
            let decoded = decode(&first).expect("encoder output must parse");
            prop_assert!(decoded.is_canonical());

            let second = to_bytes(&decoded.into_value().expect("maps back")).unwrap();
            prop_assert_eq!(first, second);
        }
    }
}
