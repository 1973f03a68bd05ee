//! Content negotiation: pick a decoder from the request, run it, done.
//!
//! ```text
//! GET ───────────────────────────────────────────→ bind_params(query params)
//! other ─→ body? ─no→ EmptyBody
//!            │yes
//!            ↓
//!        content-type ─bad syntax→ MediaType error
//!            │
//!            ├─ json / xml / msgpack / toml ───→ serde decoder
//!            ├─ protobuf ──────────────────────→ prost, if the target opts in
//!            ├─ form / multipart ──────────────→ bind_params(request params)
//!            └─ anything else ─→ status 415, UnsupportedMediaType
//! ```
//!
//! Only the last branch writes to the response. A supported type that fails
//! to decode returns the decoder's error and leaves the response alone; the
//! handler decides what status that deserves.

use http::{Method, StatusCode};
use serde::de::DeserializeOwned;
use tracing::{debug, warn};

use crate::codec;
use crate::error::Error;
use crate::fields::{bind_params, Bind};
use crate::media::MediaType;
use crate::request::Request;
use crate::response::Response;

/// Binds `req` into `target`.
///
/// Serde-decoded bodies replace `*target` only when decoding succeeds.
/// Struct binding (GET, form bodies) writes field by field into the
/// existing value.
///
/// A body is decoded into a fresh `T`, so a field it leaves out is a
/// decode error unless `T` supplies a default for it, for example with
/// `#[serde(default)]`. Defaults come from `Default`, not from the prior
/// contents of `target`.
///
/// Every target must be both [`Bind`] and `Deserialize`, whichever branch a
/// request ends up taking. That includes GET-only records and prost
/// messages bound with `bindable!(#[protobuf] …)`, which need a serde
/// derive next to their `prost::Message` derive.
///
/// ```rust
/// use http::{Method, StatusCode};
/// use serde::Deserialize;
/// use tsu_bind::{bind, bindable, Request, Response};
///
/// #[derive(Default, Deserialize)]
/// struct Login { user: String, remember: bool }
/// bindable!(Login { user, remember });
///
/// let req = Request::builder()
///     .method(Method::POST)
///     .header("content-type", "application/json")
///     .body(r#"{"user":"alice","remember":true}"#)
///     .build();
/// let mut res = Response::default();
/// let mut login = Login::default();
///
/// bind(&mut login, &req, &mut res).unwrap();
/// assert_eq!(login.user, "alice");
/// assert!(login.remember);
/// assert_eq!(res.status_code(), StatusCode::OK);
/// ```
pub fn bind<T>(target: &mut T, req: &Request, res: &mut Response) -> Result<(), Error>
where
    T: Bind + DeserializeOwned,
{
    if *req.method() == Method::GET {
        return bind_params(target, req.params());
    }

    let body = req.body().ok_or(Error::EmptyBody)?;

    let Some(media_type) = MediaType::from_content_type(req.header("content-type").unwrap_or(""))? else {
        warn!(
            method = %req.method(),
            path = req.path(),
            content_type = req.header("content-type").unwrap_or(""),
            "unsupported media type"
        );
        res.set_status(StatusCode::UNSUPPORTED_MEDIA_TYPE);
        return Err(Error::UnsupportedMediaType);
    };

    debug!(method = %req.method(), path = req.path(), %media_type, len = body.len(), "binding request");

    match media_type {
        MediaType::Json    => *target = codec::from_json(body)?,
        MediaType::Xml     => *target = codec::from_xml(body)?,
        MediaType::MsgPack => *target = codec::from_msgpack(body)?,
        MediaType::Toml    => *target = codec::from_toml(body)?,
        MediaType::Protobuf => {
            target.protobuf().ok_or(Error::NotProtobuf)?.decode_protobuf(body)?;
        }
        MediaType::Form => bind_params(target, req.params())?,
    }

    Ok(())
}
