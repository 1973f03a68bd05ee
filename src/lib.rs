//! # tsu-bind
//!
//! Request binding and template comparison for the tsu HTTP framework.
//!
//! ## Binding
//!
//! [`bind`] reads a [`Request`] into a typed record. The decoder is chosen
//! by the request, not by the handler:
//!
//! | Request | Decoder |
//! |---|---|
//! | `GET` | query parameters, field by field |
//! | `application/json` | `serde_json` |
//! | `application/xml` | `quick-xml` |
//! | `application/msgpack`, `application/x-msgpack` | `rmp-serde` |
//! | `application/protobuf`, `application/x-protobuf` | `prost` |
//! | `application/toml`, `application/x-toml` | `toml` |
//! | `application/x-www-form-urlencoded`, `multipart/form-data` | form parameters, field by field |
//! | anything else | `415 Unsupported Media Type` |
//!
//! Field-by-field binding needs a [`Bind`] impl, which [`bindable!`] writes
//! for you. A malformed value leaves its field alone; a field type the
//! binder cannot set is an error.
//!
//! ```rust
//! use http::Method;
//! use serde::Deserialize;
//! use tsu_bind::{bind, bindable, Request, Response};
//!
//! #[derive(Default, Deserialize)]
//! struct Signup {
//!     #[serde(rename = "Name")]
//!     name: String,
//!     #[serde(rename = "Age")]
//!     age: u8,
//! }
//! bindable!(Signup { name = "Name", age = "Age" });
//!
//! let req = Request::builder()
//!     .method(Method::POST)
//!     .header("content-type", "application/x-www-form-urlencoded")
//!     .body("Name=Alice&Age=30")
//!     .params([("Name", "Alice"), ("Age", "30")])
//!     .build();
//!
//! let mut signup = Signup::default();
//! bind(&mut signup, &req, &mut Response::default()).unwrap();
//! assert_eq!(signup.name, "Alice");
//! assert_eq!(signup.age, 30);
//! ```
//!
//! ## Template predicates
//!
//! [`compare`] holds `eq ne lt le gt ge` over [`Value`]s. Values of different
//! categories never compare; `1 == "1"` is an error, not `false`.
//! [`FuncMap::default`] registers them, together with a few string helpers,
//! under the names templates use.

mod binder;
mod codec;
mod error;
mod fields;
mod funcs;
mod media;
mod param;
mod request;
mod response;
mod value;

pub mod compare;

pub use binder::bind;
pub use codec::DecodeProtobuf;
pub use compare::{classify, Category, CompareError};
pub use error::{BoxError, Error};
pub use fields::{bind_params, Bind, Field, IntoSlot, Slot};
pub use funcs::{Func, FuncError, FuncMap};
pub use media::MediaType;
pub use param::{CoerceError, Param, ParamValue};
pub use request::{Request, RequestBuilder};
pub use response::Response;
pub use value::{Complex, Value};
