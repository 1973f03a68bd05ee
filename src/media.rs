//! Media types the binder knows how to decode.
//!
//! The table is fixed. Anything not listed is unsupported and answered with
//! `415 Unsupported Media Type`.

use std::fmt;

use mime::Mime;

/// A decoding strategy selected from a request's `content-type`.
#[derive(Clone, Copy, Debug, Eq, Hash, PartialEq)]
pub enum MediaType {
    Json,     // application/json
    Xml,      // application/xml
    MsgPack,  // application/msgpack, application/x-msgpack
    Protobuf, // application/protobuf, application/x-protobuf
    Toml,     // application/toml, application/x-toml
    Form,     // application/x-www-form-urlencoded, multipart/form-data
}

impl MediaType {
    /// Parses a `content-type` header value and looks its essence up in the
    /// dispatch table.
    ///
    /// Parameters such as `charset` are ignored. `Ok(None)` means the value
    /// parsed but is not a type the binder decodes.
    ///
    /// ```rust
    /// use tsu_bind::MediaType;
    ///
    /// let mt = MediaType::from_content_type("application/json; charset=utf-8").unwrap();
    /// assert_eq!(mt, Some(MediaType::Json));
    /// assert_eq!(MediaType::from_content_type("text/plain").unwrap(), None);
    /// assert!(MediaType::from_content_type("").is_err());
    /// ```
    pub fn from_content_type(value: &str) -> Result<Option<Self>, mime::FromStrError> {
        let mime: Mime = value.parse()?;
        Ok(Self::from_essence(mime.essence_str()))
    }

    fn from_essence(essence: &str) -> Option<Self> {
        match essence {
            "application/json"                  => Some(Self::Json),
            "application/xml"                   => Some(Self::Xml),
            "application/msgpack"
            | "application/x-msgpack"           => Some(Self::MsgPack),
            "application/protobuf"
            | "application/x-protobuf"          => Some(Self::Protobuf),
            "application/toml"
            | "application/x-toml"              => Some(Self::Toml),
            "application/x-www-form-urlencoded"
            | "multipart/form-data"             => Some(Self::Form),
            _                                   => None,
        }
    }

    pub fn as_str(self) -> &'static str {
        match self {
            Self::Json     => "json",
            Self::Xml      => "xml",
            Self::MsgPack  => "msgpack",
            Self::Protobuf => "protobuf",
            Self::Toml     => "toml",
            Self::Form     => "form",
        }
    }
}

impl fmt::Display for MediaType {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
