//! Incoming HTTP request type, as seen by the binder.
//!
//! The binder only ever *reads* a request. Build one with
//! [`Request::builder`] or convert an `http::Request` with
//! [`Request::from_http`].

use bytes::Bytes;
use http::Method;
use http_body_util::BodyExt;
use tracing::trace;

use crate::error::{BoxError, Error};
use crate::media::MediaType;
use crate::param::Param;

/// An incoming HTTP request: method, headers, an optional body and the
/// request parameters.
#[derive(Clone, Debug)]
pub struct Request {
    pub(crate) method: Method,
    pub(crate) path: String,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) body: Option<Bytes>,
    pub(crate) params: Vec<Param>,
}

impl Request {
    pub fn builder() -> RequestBuilder {
        RequestBuilder {
            req: Request {
                method: Method::GET,
                path: "/".to_owned(),
                headers: Vec::new(),
                body: None,
                params: Vec::new(),
            },
        }
    }

    /// Converts an `http::Request`, collecting its body.
    ///
    /// Parameters come from the form body (for
    /// `application/x-www-form-urlencoded`) followed by the query string, so
    /// a body field shadows a query field of the same name. An empty body
    /// becomes "no body".
    pub async fn from_http<B>(req: http::Request<B>) -> Result<Self, Error>
    where
        B: hyper::body::Body,
        B::Error: Into<BoxError>,
    {
        let (parts, body) = req.into_parts();
        let body = body
            .collect()
            .await
            .map_err(|e| Error::Body(e.into()))?
            .to_bytes();

        let headers: Vec<(String, String)> = parts.headers.iter()
            .filter_map(|(k, v)| Some((k.as_str().to_owned(), v.to_str().ok()?.to_owned())))
            .collect();

        let mut params = Vec::new();

        let is_form = headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case("content-type"))
            .and_then(|(_, v)| MediaType::from_content_type(v).ok().flatten())
            == Some(MediaType::Form);
        if is_form {
            params.extend(parse_urlencoded(&body));
        }
        if let Some(query) = parts.uri.query() {
            params.extend(parse_urlencoded(query.as_bytes()));
        }

        trace!(method = %parts.method, path = parts.uri.path(), params = params.len(), "request converted");

        Ok(Self {
            method: parts.method,
            path: parts.uri.path().to_owned(),
            headers,
            body: (!body.is_empty()).then_some(body),
            params,
        })
    }

    pub fn method(&self) -> &Method { &self.method }
    pub fn path(&self) -> &str { &self.path }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> Option<&Bytes> { self.body.as_ref() }
    pub fn params(&self) -> &[Param] { &self.params }

    /// Case-insensitive header lookup. Returns the first value.
    pub fn header(&self, name: &str) -> Option<&str> {
        self.headers.iter()
            .find(|(k, _)| k.eq_ignore_ascii_case(name))
            .map(|(_, v)| v.as_str())
    }

    /// Returns the first parameter named exactly `name`.
    pub fn param(&self, name: &str) -> Option<&Param> {
        self.params.iter().find(|p| p.name() == name)
    }
}

fn parse_urlencoded(input: &[u8]) -> impl Iterator<Item = Param> + '_ {
    url::form_urlencoded::parse(input).map(|(k, v)| Param::new(k, v))
}

// ── RequestBuilder ────────────────────────────────────────────────────────────

/// Fluent builder for [`Request`]. Defaults to `GET /`, no headers, no body.
///
/// ```rust
/// use tsu_bind::Request;
///
/// let req = Request::builder()
///     .method(http::Method::POST)
///     .header("content-type", "application/json")
///     .body(r#"{"name":"alice"}"#)
///     .build();
/// assert_eq!(req.header("Content-Type"), Some("application/json"));
/// ```
#[derive(Debug)]
pub struct RequestBuilder {
    req: Request,
}

impl RequestBuilder {
    pub fn method(mut self, method: Method) -> Self {
        self.req.method = method;
        self
    }

    pub fn path(mut self, path: &str) -> Self {
        self.req.path = path.to_owned();
        self
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.req.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    pub fn body(mut self, body: impl Into<Bytes>) -> Self {
        self.req.body = Some(body.into());
        self
    }

    pub fn param(mut self, name: &str, value: &str) -> Self {
        self.req.params.push(Param::new(name, value));
        self
    }

    pub fn params<I, P>(mut self, params: I) -> Self
    where
        I: IntoIterator<Item = P>,
        P: Into<Param>,
    {
        self.req.params.extend(params.into_iter().map(Into::into));
        self
    }

    pub fn build(self) -> Request { self.req }
}
