use std::io::Write;
use std::time::Duration;

use crate::dict::Dictionary;
use crate::error::EncodeError;
use crate::marshal::Marshaler;
use crate::value::{AnyRef, Value};

type Result<T> = std::result::Result<T, EncodeError>;

pub(crate) fn encode_value<W: Write + ?Sized>(value: &Value, w: &mut W) -> Result<()> {
    match value {
        Value::Custom(m) => encode_custom(&**m, w)?,
        Value::Str(bs) => encode_bytestring(bs, w)?,
        Value::Int(int) => encode_int(*int, w)?,
        Value::Uint(uint) => encode_uint(*uint, w)?,
        Value::Raw(raw) => w.write_all(raw)?,
        Value::Duration(d) => encode_duration(*d, w)?,
        Value::Dict(dict) => encode_dict(dict, w)?,
        Value::DictList(list) => encode_list(list, w, |dict, w| encode_dict(dict, w))?,
        Value::StrList(list) => encode_list(list, w, |bs, w| encode_bytestring(bs, w))?,
    };
    Ok(())
}

// Same rules as `encode_value`, straight from the borrowed view.
pub(crate) fn encode_any_ref<W: Write + ?Sized>(value: &AnyRef<'_>, w: &mut W) -> Result<()> {
    match *value {
        AnyRef::Shared(m) => encode_custom(&**m, w),
        AnyRef::Boxed(m) => encode_custom(m, w),
        AnyRef::Value(v) => encode_value(v, w),
        AnyRef::Str(s) => encode_bytestring(s, w),
        AnyRef::Int(int) => encode_int(int, w),
        AnyRef::Uint(uint) => encode_uint(uint, w),
        AnyRef::Bytes(raw) => Ok(w.write_all(raw)?),
        AnyRef::Raw(raw) => Ok(w.write_all(raw)?),
        AnyRef::Duration(d) => encode_duration(d, w),
        AnyRef::Dict(dict) => encode_dict(dict, w),
        AnyRef::DictList(list) => encode_list(list, w, |dict, w| encode_dict(dict, w)),
        AnyRef::ByteStrings(list) => encode_list(list, w, |bs, w| encode_bytestring(bs, w)),
        AnyRef::Strings(list) => encode_list(list, w, |s, w| encode_bytestring(s.as_bytes(), w)),
        AnyRef::Strs(list) => encode_list(list, w, |s, w| encode_bytestring(s.as_bytes(), w)),
    }
}

pub(crate) fn encode_custom<M, W>(m: &M, w: &mut W) -> Result<()>
where
    M: Marshaler + ?Sized,
    W: Write + ?Sized,
{
    let bencoded = m.marshal_bencode().map_err(EncodeError::Custom)?;
    tracing::trace!(len = bencoded.len(), "writing custom bencode");
    w.write_all(&bencoded)?;
    Ok(())
}

fn encode_dict<W: Write + ?Sized>(dict: &Dictionary, w: &mut W) -> Result<()> {
    w.write_all(b"d")?;
    for (key, val) in dict.sorted_entries() {
        encode_bytestring(key, w)?;
        encode_value(val, w)?;
    }
    w.write_all(b"e")?;
    Ok(())
}

fn encode_list<T, W, F>(list: &[T], w: &mut W, mut encode_item: F) -> Result<()>
where
    W: Write + ?Sized,
    F: FnMut(&T, &mut W) -> Result<()>,
{
    w.write_all(b"l")?;
    for item in list {
        encode_item(item, w)?;
    }
    w.write_all(b"e")?;
    Ok(())
}

fn encode_bytestring<W: Write + ?Sized>(bs: &[u8], w: &mut W) -> Result<()> {
    write!(w, "{}:", bs.len())?;
    w.write_all(bs)?;
    Ok(())
}

fn encode_int<W: Write + ?Sized>(int: i64, w: &mut W) -> Result<()> {
    write!(w, "i{}e", int)?;
    Ok(())
}

fn encode_uint<W: Write + ?Sized>(uint: u64, w: &mut W) -> Result<()> {
    write!(w, "i{}e", uint)?;
    Ok(())
}

// Signed like every other integer on the wire, saturating past i64::MAX seconds.
fn encode_duration<W: Write + ?Sized>(d: Duration, w: &mut W) -> Result<()> {
    encode_int(i64::try_from(d.as_secs()).unwrap_or(i64::MAX), w)
}
