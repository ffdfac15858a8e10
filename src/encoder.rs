use std::any::Any;
use std::io::Write;

use bytes::{BufMut, Bytes, BytesMut};

use crate::bencode::{encode_any_ref, encode_custom, encode_value};
use crate::error::EncodeError;
use crate::marshal::Marshaler;
use crate::value::{AnyRef, Value};

/// Writes bencoded values to an output stream.
///
/// The encoder holds nothing but the sink. It never flushes or closes it, and bytes written
/// before a failure stay written.
#[derive(Debug)]
pub struct Encoder<W> {
    w: W,
}

impl<W: Write> Encoder<W> {
    pub fn new(w: W) -> Encoder<W> {
        Encoder { w }
    }

    /// Writes the bencoding of `value` to the stream.
    pub fn encode(&mut self, value: &Value) -> Result<(), EncodeError> {
        tracing::trace!(kind = value.kind(), "encoding bencode value");
        encode_value(value, &mut self.w)
    }

    /// Classifies `value` like [`Value::from_any`] and encodes it in place, without copying.
    ///
    /// An unsupported type is reported before anything reaches the sink. `Arc<dyn Marshaler>`
    /// and `Box<dyn Marshaler>` are honoured first; a bare [`Marshaler`] type is invisible
    /// through `Any`, use [`Encoder::encode_marshaler`] for those.
    pub fn encode_any<T: Any>(&mut self, value: &T) -> Result<(), EncodeError> {
        let value = AnyRef::classify(value)?;
        tracing::trace!(type_name = std::any::type_name::<T>(), "encoding type-erased value");
        encode_any_ref(&value, &mut self.w)
    }

    /// Writes exactly the bytes `m` produces.
    pub fn encode_marshaler<M: Marshaler + ?Sized>(&mut self, m: &M) -> Result<(), EncodeError> {
        encode_custom(m, &mut self.w)
    }

    pub fn get_ref(&self) -> &W {
        &self.w
    }

    pub fn get_mut(&mut self) -> &mut W {
        &mut self.w
    }

    pub fn into_inner(self) -> W {
        self.w
    }
}

/// Writes the bencoding of `value` to `w`.
pub fn encode<W: Write>(w: &mut W, value: &Value) -> Result<(), EncodeError> {
    Encoder::new(w).encode(value)
}

/// Writes the bencoding of an arbitrary value to `w`, see [`Value::from_any`].
pub fn encode_any<W: Write, T: Any>(w: &mut W, value: &T) -> Result<(), EncodeError> {
    Encoder::new(w).encode_any(value)
}

/// Writes the bytes produced by a [`Marshaler`] to `w`.
pub fn encode_marshaler<W: Write, M: Marshaler + ?Sized>(w: &mut W, m: &M) -> Result<(), EncodeError> {
    Encoder::new(w).encode_marshaler(m)
}

/// Returns the bencoding of `value`.
///
/// ```
/// use bencoder::{to_bytes, Dictionary, Value};
///
/// let mut dict = Dictionary::new();
/// dict.insert("b", 1i64);
/// dict.insert("a", 2i64);
///
/// assert_eq!(&to_bytes(&Value::Dict(dict)).unwrap()[..], b"d1:ai2e1:bi1ee");
/// ```
pub fn to_bytes(value: &Value) -> Result<Bytes, EncodeError> {
    let mut buf = BytesMut::new().writer();
    encode(&mut buf, value)?;
    Ok(buf.into_inner().freeze())
}

/// Returns the bencoding of an arbitrary value, see [`Value::from_any`].
pub fn to_bytes_any<T: Any>(value: &T) -> Result<Bytes, EncodeError> {
    let mut buf = BytesMut::new().writer();
    encode_any(&mut buf, value)?;
    Ok(buf.into_inner().freeze())
}

/// Returns the bytes produced by a [`Marshaler`].
pub fn to_bytes_marshaler<M: Marshaler + ?Sized>(m: &M) -> Result<Bytes, EncodeError> {
    let mut buf = BytesMut::new().writer();
    encode_marshaler(&mut buf, m)?;
    Ok(buf.into_inner().freeze())
}
