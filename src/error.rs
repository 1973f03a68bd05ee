//! Unified error type for request binding.
//!
//! Comparison and template-function failures have their own types
//! ([`CompareError`](crate::CompareError), [`FuncError`](crate::FuncError))
//! because they are reported to the template engine, not to a handler.

use std::str::Utf8Error;

use thiserror::Error;

/// Boxed error produced by the body of an incoming `http::Request`.
pub type BoxError = Box<dyn std::error::Error + Send + Sync + 'static>;

/// The error type returned by [`bind`](crate::bind) and
/// [`bind_params`](crate::bind_params).
///
/// Three families live here:
///
/// - **Input shape** (`EmptyBody`, `UnknownType`, `NotProtobuf`): the request
///   or the target cannot be bound at all.
/// - **Decode** (`MediaType`, `Json`, `Xml`, …): passed through from the
///   underlying parser untouched, message included.
/// - **Negotiation** (`UnsupportedMediaType`): the only variant that also
///   leaves a mark on the response (status 415).
///
/// Malformed values for individual scalar fields are *not* errors; the struct
/// binder skips those fields.
#[derive(Debug, Error)]
pub enum Error {
    #[error("request body cannot be empty")]
    EmptyBody,

    #[error("unsupported media type")]
    UnsupportedMediaType,

    /// A parameter matched a field whose type the struct binder cannot set.
    #[error("unknown type `{ty}` for field `{field}`")]
    UnknownType { field: &'static str, ty: &'static str },

    #[error("binding target does not decode protobuf messages")]
    NotProtobuf,

    #[error(transparent)]
    MediaType(#[from] mime::FromStrError),

    #[error(transparent)]
    Json(#[from] serde_json::Error),

    #[error(transparent)]
    Xml(#[from] quick_xml::de::DeError),

    #[error(transparent)]
    MsgPack(#[from] rmp_serde::decode::Error),

    #[error(transparent)]
    Toml(#[from] toml::de::Error),

    #[error(transparent)]
    Protobuf(#[from] prost::DecodeError),

    #[error(transparent)]
    Utf8(#[from] Utf8Error),

    #[error("failed to read request body: {0}")]
    Body(#[source] BoxError),
}
