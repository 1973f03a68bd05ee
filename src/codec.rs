//! Adapters over the wire-format decoders.
//!
//! The decoders themselves belong to their crates. Each adapter takes the
//! whole body and either produces a fresh value or fails with the decoder's
//! own error; the caller decides what to do with the target.

use serde::de::DeserializeOwned;

use crate::error::Error;

pub(crate) fn from_json<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    Ok(serde_json::from_slice(body)?)
}

pub(crate) fn from_xml<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    Ok(quick_xml::de::from_reader(body)?)
}

pub(crate) fn from_msgpack<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    Ok(rmp_serde::from_slice(body)?)
}

pub(crate) fn from_toml<T: DeserializeOwned>(body: &[u8]) -> Result<T, Error> {
    Ok(toml::from_str(std::str::from_utf8(body)?)?)
}

// ── Protobuf ──────────────────────────────────────────────────────────────────

/// Capability of a binding target to be replaced by a decoded protobuf
/// message.
///
/// Implemented for every [`prost::Message`]; a record exposes it to the
/// binder through [`Bind::protobuf`](crate::Bind::protobuf), usually with
/// `bindable!(#[protobuf] …)`.
pub trait DecodeProtobuf {
    /// Decodes `buf` as a complete message. On error `self` is unchanged.
    fn decode_protobuf(&mut self, buf: &[u8]) -> Result<(), prost::DecodeError>;
}

impl<M: prost::Message + Default> DecodeProtobuf for M {
    fn decode_protobuf(&mut self, buf: &[u8]) -> Result<(), prost::DecodeError> {
        *self = M::decode(buf)?;
        Ok(())
    }
}
