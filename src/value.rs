use std::any::{type_name, Any};
use std::sync::Arc;
use std::time::Duration;

use bytes::Bytes;

use crate::bytestring::ByteString;
use crate::dict::Dictionary;
use crate::error::EncodeError;
use crate::marshal::Marshaler;

/// Every shape the encoder knows how to write.
#[derive(Debug, Clone)]
pub enum Value {
    /// Supplies its own bytes. Takes precedence over every other rule.
    Custom(Arc<dyn Marshaler>),
    /// `<len>:<bytes>`
    Str(ByteString),
    /// `i<n>e`
    Int(i64),
    /// `i<n>e`
    Uint(u64),
    /// Written verbatim with no framing.
    Raw(Bytes),
    /// Whole seconds as `i<n>e`, sub-second part dropped.
    Duration(Duration),
    Dict(Dictionary),
    DictList(Vec<Dictionary>),
    StrList(Vec<ByteString>),
}

impl Value {
    pub fn custom<M: Marshaler + 'static>(marshaler: M) -> Value {
        Value::Custom(Arc::new(marshaler))
    }

    pub fn raw<B: Into<Bytes>>(bytes: B) -> Value {
        Value::Raw(bytes.into())
    }

    pub fn kind(&self) -> &'static str {
        match self {
            Value::Custom(_) => "custom",
            Value::Str(_) => "string",
            Value::Int(_) => "int",
            Value::Uint(_) => "uint",
            Value::Raw(_) => "raw",
            Value::Duration(_) => "duration",
            Value::Dict(_) => "dict",
            Value::DictList(_) => "dict list",
            Value::StrList(_) => "string list",
        }
    }

    /// Classifies a type-erased value into an owned [`Value`].
    ///
    /// A shared or boxed [`Marshaler`] is recognised before anything else, so a caller can
    /// always override the built-in rules. A boxed marshaler cannot be shared, so its bytes
    /// are produced here and come back as [`Value::Raw`].
    ///
    /// `Any` only exposes concrete types, so a bare type implementing [`Marshaler`] is not
    /// seen as one. Wrap it with [`Value::custom`], put it behind `Arc<dyn Marshaler>` or
    /// `Box<dyn Marshaler>`, or hand it to [`crate::to_bytes_marshaler`]. Types outside the
    /// known set are rejected with [`EncodeError::UnsupportedType`] naming the type.
    ///
    /// ```
    /// use bencoder::{EncodeError, Value};
    ///
    /// assert!(matches!(Value::from_any(&42i32), Ok(Value::Int(42))));
    /// assert!(matches!(Value::from_any(&1.5f64), Err(EncodeError::UnsupportedType("f64"))));
    /// ```
    pub fn from_any<T: Any>(value: &T) -> Result<Value, EncodeError> {
        AnyRef::classify(value)?.to_value()
    }
}

/// Borrowed view of a type-erased value, so the dynamic path can encode without copying.
pub(crate) enum AnyRef<'a> {
    Shared(&'a Arc<dyn Marshaler>),
    Boxed(&'a dyn Marshaler),
    Value(&'a Value),
    Str(&'a [u8]),
    Int(i64),
    Uint(u64),
    Bytes(&'a Bytes),
    Raw(&'a [u8]),
    Duration(Duration),
    Dict(&'a Dictionary),
    DictList(&'a [Dictionary]),
    ByteStrings(&'a [ByteString]),
    Strings(&'a [String]),
    Strs(&'a [&'static str]),
}

impl<'a> AnyRef<'a> {
    pub(crate) fn classify<T: Any>(value: &'a T) -> Result<AnyRef<'a>, EncodeError> {
        let any = value as &dyn Any;

        macro_rules! classify {
            ($any:ident; $($ty:ty => $conv:expr),+ $(,)?) => {
                $(
                    if let Some(v) = $any.downcast_ref::<$ty>() {
                        return Ok($conv(v));
                    }
                )+
            };
        }

        // marshalers first
        classify! {
            any;
            Arc<dyn Marshaler> => AnyRef::Shared,
            Box<dyn Marshaler> => |v: &'a Box<dyn Marshaler>| AnyRef::Boxed(&**v),
            Value => AnyRef::Value,
            ByteString => |v: &'a ByteString| AnyRef::Str(v.as_bytes()),
            String => |v: &'a String| AnyRef::Str(v.as_bytes()),
            &'static str => |v: &&'static str| AnyRef::Str((*v).as_bytes()),
            i64 => |v: &i64| AnyRef::Int(*v),
            i32 => |v: &i32| AnyRef::Int(i64::from(*v)),
            i16 => |v: &i16| AnyRef::Int(i64::from(*v)),
            i8 => |v: &i8| AnyRef::Int(i64::from(*v)),
            isize => |v: &isize| AnyRef::Int(*v as i64),
            u64 => |v: &u64| AnyRef::Uint(*v),
            u32 => |v: &u32| AnyRef::Uint(u64::from(*v)),
            u16 => |v: &u16| AnyRef::Uint(u64::from(*v)),
            u8 => |v: &u8| AnyRef::Uint(u64::from(*v)),
            usize => |v: &usize| AnyRef::Uint(*v as u64),
            Bytes => AnyRef::Bytes,
            Vec<u8> => |v: &'a Vec<u8>| AnyRef::Raw(v.as_slice()),
            Duration => |v: &Duration| AnyRef::Duration(*v),
            Dictionary => AnyRef::Dict,
            Vec<Dictionary> => |v: &'a Vec<Dictionary>| AnyRef::DictList(v.as_slice()),
            Vec<ByteString> => |v: &'a Vec<ByteString>| AnyRef::ByteStrings(v.as_slice()),
            Vec<String> => |v: &'a Vec<String>| AnyRef::Strings(v.as_slice()),
            Vec<&'static str> => |v: &'a Vec<&'static str>| AnyRef::Strs(v.as_slice()),
        }

        Err(EncodeError::UnsupportedType(type_name::<T>()))
    }

    fn to_value(&self) -> Result<Value, EncodeError> {
        let value = match *self {
            AnyRef::Shared(m) => Value::Custom(Arc::clone(m)),
            AnyRef::Boxed(m) => Value::Raw(m.marshal_bencode().map_err(EncodeError::Custom)?.into()),
            AnyRef::Value(v) => v.clone(),
            AnyRef::Str(s) => Value::Str(ByteString::from(s)),
            AnyRef::Int(i) => Value::Int(i),
            AnyRef::Uint(u) => Value::Uint(u),
            AnyRef::Bytes(b) => Value::Raw(b.clone()),
            AnyRef::Raw(r) => Value::Raw(Bytes::copy_from_slice(r)),
            AnyRef::Duration(d) => Value::Duration(d),
            AnyRef::Dict(d) => Value::Dict(d.clone()),
            AnyRef::DictList(l) => Value::DictList(l.to_vec()),
            AnyRef::ByteStrings(l) => Value::StrList(l.to_vec()),
            AnyRef::Strings(l) => Value::StrList(l.iter().map(|s| ByteString::from(s.as_str())).collect()),
            AnyRef::Strs(l) => Value::StrList(l.iter().map(|s| ByteString::from(*s)).collect()),
        };
        Ok(value)
    }
}

macro_rules! from_signed {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Int(v as i64)
                }
            }
        )+
    };
}

macro_rules! from_unsigned {
    ($($ty:ty),+) => {
        $(
            impl From<$ty> for Value {
                fn from(v: $ty) -> Self {
                    Value::Uint(v as u64)
                }
            }
        )+
    };
}

from_signed!(i8, i16, i32, i64, isize);
from_unsigned!(u8, u16, u32, u64, usize);

impl From<&str> for Value {
    fn from(s: &str) -> Self {
        Value::Str(ByteString::from(s))
    }
}

impl From<String> for Value {
    fn from(s: String) -> Self {
        Value::Str(ByteString::from(s))
    }
}

impl From<ByteString> for Value {
    fn from(s: ByteString) -> Self {
        Value::Str(s)
    }
}

impl From<Bytes> for Value {
    fn from(b: Bytes) -> Self {
        Value::Raw(b)
    }
}

impl From<Duration> for Value {
    fn from(d: Duration) -> Self {
        Value::Duration(d)
    }
}

impl From<Dictionary> for Value {
    fn from(d: Dictionary) -> Self {
        Value::Dict(d)
    }
}

impl From<Vec<Dictionary>> for Value {
    fn from(list: Vec<Dictionary>) -> Self {
        Value::DictList(list)
    }
}

impl From<Vec<ByteString>> for Value {
    fn from(list: Vec<ByteString>) -> Self {
        Value::StrList(list)
    }
}

impl From<Vec<String>> for Value {
    fn from(list: Vec<String>) -> Self {
        Value::StrList(list.into_iter().map(ByteString::from).collect())
    }
}

impl From<Vec<&str>> for Value {
    fn from(list: Vec<&str>) -> Self {
        Value::StrList(list.into_iter().map(ByteString::from).collect())
    }
}

impl From<Arc<dyn Marshaler>> for Value {
    fn from(m: Arc<dyn Marshaler>) -> Self {
        Value::Custom(m)
    }
}
