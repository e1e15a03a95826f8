use std::error::Error;

/// A boundary between two error types.
///
/// Lower layers (the transport, storage backends) have their own error
/// enums. A boundary states once how such an error becomes the caller's
/// error, so call sites can use `?` instead of repeating `map_err`.
///
/// ```
/// use gymdesk_core::error::ErrorBoundary;
/// use std::io;
///
/// #[derive(Debug, thiserror::Error)]
/// enum StoreError {
///     #[error("storage unavailable: {0}")]
///     Unavailable(String),
/// }
///
/// struct IoBoundary;
///
/// impl ErrorBoundary for IoBoundary {
///     type Inner = io::Error;
///     type Outer = StoreError;
///
///     fn convert(inner: io::Error) -> StoreError {
///         StoreError::Unavailable(inner.to_string())
///     }
/// }
///
/// let err = IoBoundary::convert(io::Error::other("disk full"));
/// assert_eq!(err.to_string(), "storage unavailable: disk full");
/// ```
pub trait ErrorBoundary {
    /// The inner error type (source of conversion).
    type Inner: Error + Send + Sync;

    /// The outer error type (target of conversion).
    type Outer: Error + Send + Sync;

    /// Convert from inner error to outer error.
    fn convert(inner: Self::Inner) -> Self::Outer;
}

/// Define a `From` conversion between two error types.
///
/// # Syntax
///
/// ```ignore
/// error_boundary!(SourceError => TargetError, |err_var| {
///     // conversion logic returning TargetError
/// });
/// ```
///
/// # Example
///
/// ```
/// use gymdesk_core::error_boundary;
/// use std::io;
///
/// #[derive(Debug, thiserror::Error)]
/// enum SessionError {
///     #[error("session file: {0}")]
///     File(String),
/// }
///
/// error_boundary!(io::Error => SessionError, |e| {
///     SessionError::File(e.to_string())
/// });
///
/// fn load_token() -> Result<String, SessionError> {
///     let token = std::fs::read_to_string("/nonexistent/session.json")?;
///     Ok(token)
/// }
///
/// assert!(load_token().is_err());
/// ```
#[macro_export]
macro_rules! error_boundary {
    ($inner:ty => $outer:ty, |$err:ident| $body:expr) => {
        impl ::std::convert::From<$inner> for $outer {
            fn from($err: $inner) -> $outer {
                $body
            }
        }
    };
}
