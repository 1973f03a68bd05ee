//! Outgoing HTTP response state.
//!
//! The binder touches exactly one thing here: the status code, and only when
//! it refuses a media type. Everything else belongs to the handler.

use bytes::Bytes;
use http::StatusCode;
use http_body_util::Full;

/// An outgoing HTTP response.
///
/// ```rust
/// use http::StatusCode;
/// use tsu_bind::Response;
///
/// let res = Response::json(br#"{"id":1}"#.to_vec());
/// assert_eq!(res.status_code(), StatusCode::OK);
///
/// let res = Response::status(StatusCode::NO_CONTENT);
/// assert!(res.body().is_empty());
/// ```
#[derive(Clone, Debug)]
pub struct Response {
    pub(crate) body: Vec<u8>,
    pub(crate) headers: Vec<(String, String)>,
    pub(crate) status: StatusCode,
}

impl Response {
    /// `200 OK` with an `application/json` body.
    pub fn json(body: Vec<u8>) -> Self {
        Self::bytes_raw("application/json", body)
    }

    /// `200 OK` with a `text/plain; charset=utf-8` body.
    pub fn text(body: impl Into<String>) -> Self {
        Self::bytes_raw("text/plain; charset=utf-8", body.into().into_bytes())
    }

    /// Response with no body.
    pub fn status(code: StatusCode) -> Self {
        Self { body: Vec::new(), headers: Vec::new(), status: code }
    }

    pub fn status_code(&self) -> StatusCode { self.status }
    pub fn headers(&self) -> &[(String, String)] { &self.headers }
    pub fn body(&self) -> &[u8] { &self.body }

    pub fn set_status(&mut self, code: StatusCode) {
        self.status = code;
    }

    pub fn header(mut self, name: &str, value: &str) -> Self {
        self.headers.push((name.to_owned(), value.to_owned()));
        self
    }

    /// Converts into an `http::Response` for the server layer.
    ///
    /// Headers whose name or value is not valid HTTP are dropped.
    pub fn into_http(self) -> http::Response<Full<Bytes>> {
        let mut res = http::Response::new(Full::new(Bytes::from(self.body)));
        *res.status_mut() = self.status;
        let headers = res.headers_mut();
        for (name, value) in &self.headers {
            let (Ok(name), Ok(value)) = (
                http::HeaderName::try_from(name.as_str()),
                http::HeaderValue::try_from(value.as_str()),
            ) else {
                continue;
            };
            headers.append(name, value);
        }
        res
    }

    fn bytes_raw(content_type: &str, body: Vec<u8>) -> Self {
        Self {
            body,
            headers: vec![("content-type".to_owned(), content_type.to_owned())],
            status: StatusCode::OK,
        }
    }
}

/// An empty `200 OK`.
impl Default for Response {
    fn default() -> Self { Self::status(StatusCode::OK) }
}
