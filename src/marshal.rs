use std::error::Error;
use std::fmt::Debug;

/// Error type a [`Marshaler`] may fail with.
pub type BoxError = Box<dyn Error + Send + Sync>;

/// Implemented by values that produce their own bencode.
///
/// The returned bytes are copied to the sink unchanged. Nothing checks that they are
/// well-formed bencode, so an implementor that emits garbage produces a garbage document.
///
/// ```
/// use bencoder::{to_bytes, BoxError, Marshaler, Value};
///
/// #[derive(Debug)]
/// struct Port(u16);
///
/// impl Marshaler for Port {
///     fn marshal_bencode(&self) -> Result<Vec<u8>, BoxError> {
///         Ok(format!("i{}e", self.0).into_bytes())
///     }
/// }
///
/// let out = to_bytes(&Value::custom(Port(6881))).unwrap();
/// assert_eq!(&out[..], b"i6881e");
/// ```
pub trait Marshaler: Debug + Send + Sync {
    fn marshal_bencode(&self) -> Result<Vec<u8>, BoxError>;
}
