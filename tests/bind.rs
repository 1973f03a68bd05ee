//! End-to-end binding: one request in, one populated record out.

use http::{Method, StatusCode};
use pretty_assertions::assert_eq;
use proptest::prelude::*;
use serde::{Deserialize, Serialize};
use tsu_bind::{bind, bind_params, bindable, Error, Param, Request, Response};

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
struct Address {
    city: String,
    zip: u32,
}

#[derive(Clone, Debug, Default, Deserialize, PartialEq, Serialize)]
struct Signup {
    name: String,
    age: i32,
    admin: bool,
    score: f64,
    address: Address,
}

bindable!(Address { city, zip });
bindable!(Signup { name = "Name", age = "Age", admin, score, #[record] address });

fn init_tracing() {
    let _ = tracing_subscriber::fmt().with_test_writer().try_init();
}

fn alice() -> Signup {
    Signup {
        name: "Alice".into(),
        age: 30,
        admin: true,
        score: 9.5,
        address: Address { city: "Oslo".into(), zip: 150 },
    }
}

fn post(content_type: &str, body: impl Into<bytes::Bytes>) -> Request {
    Request::builder()
        .method(Method::POST)
        .path("/signup")
        .header("Content-Type", content_type)
        .body(body)
        .build()
}

fn bind_ok(req: &Request) -> (Signup, Response) {
    let mut res = Response::default();
    let mut signup = Signup::default();
    bind(&mut signup, req, &mut res).unwrap();
    (signup, res)
}

// ── Struct binding ────────────────────────────────────────────────────────────

#[test]
fn binds_scalar_fields_by_name() {
    #[derive(Debug, Default, PartialEq)]
    struct Person {
        name: String,
        age: i64,
    }
    bindable!(Person { name = "Name", age = "Age" });

    let mut p = Person::default();
    bind_params(&mut p, &[Param::new("Name", "Alice"), Param::new("Age", "30")]).unwrap();
    assert_eq!(p, Person { name: "Alice".into(), age: 30 });
}

#[test]
fn malformed_value_is_indistinguishable_from_absent() {
    #[derive(Debug, Default, PartialEq)]
    struct Person {
        age: i64,
    }
    bindable!(Person { age = "Age" });

    let mut bad = Person::default();
    bind_params(&mut bad, &[Param::new("Age", "notanumber")]).unwrap();
    let mut absent = Person::default();
    bind_params(&mut absent, &[]).unwrap();
    assert_eq!(bad, Person { age: 0 });
    assert_eq!(bad, absent);
}

#[test]
fn unsupported_field_type_is_fatal() {
    #[derive(Default)]
    struct Tagged {
        tags: Vec<String>,
        name: String,
    }
    bindable!(Tagged { tags, name });

    let mut t = Tagged::default();
    let err = bind_params(&mut t, &[Param::new("tags", "a,b"), Param::new("name", "x")]).unwrap_err();
    assert!(matches!(err, Error::UnknownType { field: "tags", .. }), "{err}");
    // Binding stopped at the slice; the later field was never reached.
    assert_eq!(t.name, "");
    assert!(t.tags.is_empty());
}

#[test]
fn unsupported_field_without_parameter_is_skipped() {
    #[derive(Default)]
    struct Tagged {
        tags: Vec<String>,
        name: String,
    }
    bindable!(Tagged { tags, name });

    let mut t = Tagged::default();
    bind_params(&mut t, &[Param::new("name", "x")]).unwrap();
    assert_eq!(t.name, "x");
}

#[test]
fn nested_record_error_aborts_the_outer_bind() {
    #[derive(Default)]
    struct Inner {
        ids: Option<u32>,
    }
    #[derive(Default)]
    struct Outer {
        inner: Inner,
        after: String,
    }
    bindable!(Inner { ids });
    bindable!(Outer { #[record] inner, after });

    let mut o = Outer::default();
    let err = bind_params(&mut o, &[Param::new("ids", "1"), Param::new("after", "x")]).unwrap_err();
    assert!(matches!(err, Error::UnknownType { field: "ids", .. }));
    assert_eq!(o.after, "");
}

#[test]
fn nested_records_share_the_parameter_namespace() {
    let req = Request::builder()
        .params([("Name", "Alice"), ("city", "Oslo"), ("zip", "150"), ("zip", "999")])
        .build();
    let (signup, _) = bind_ok(&req);
    assert_eq!(signup.address, Address { city: "Oslo".into(), zip: 150 });
}

// ── Negotiation ───────────────────────────────────────────────────────────────

#[test]
fn json_body() {
    init_tracing();
    let body = serde_json::to_vec(&alice()).unwrap();
    let (signup, res) = bind_ok(&post("application/json; charset=utf-8", body));
    assert_eq!(signup, alice());
    assert_eq!(res.status_code(), StatusCode::OK);
}

#[test]
fn xml_body() {
    let body = "<signup>\
        <name>Alice</name><age>30</age><admin>true</admin><score>9.5</score>\
        <address><city>Oslo</city><zip>150</zip></address>\
        </signup>";
    let (signup, _) = bind_ok(&post("application/xml", body));
    assert_eq!(signup, alice());
}

#[test]
fn msgpack_body_under_both_names() {
    let body = rmp_serde::to_vec_named(&alice()).unwrap();
    for ct in ["application/msgpack", "application/x-msgpack"] {
        let (signup, _) = bind_ok(&post(ct, body.clone()));
        assert_eq!(signup, alice(), "{ct}");
    }
}

#[test]
fn toml_body_under_both_names() {
    let body = r#"
        name = "Alice"
        age = 30
        admin = true
        score = 9.5

        [address]
        city = "Oslo"
        zip = 150
    "#;
    for ct in ["application/toml", "application/x-toml"] {
        let (signup, _) = bind_ok(&post(ct, body));
        assert_eq!(signup, alice(), "{ct}");
    }
}

#[derive(Clone, PartialEq, prost::Message, Deserialize)]
struct Ping {
    #[prost(uint64, tag = "1")]
    seq: u64,
    #[prost(string, tag = "2")]
    note: String,
}

bindable!(#[protobuf] Ping { seq, note });

#[test]
fn protobuf_body_under_both_names() {
    use prost::Message as _;

    let body = Ping { seq: 42, note: "hi".into() }.encode_to_vec();
    for ct in ["application/protobuf", "application/x-protobuf"] {
        let mut ping = Ping::default();
        let mut res = Response::default();
        bind(&mut ping, &post(ct, body.clone()), &mut res).unwrap();
        assert_eq!((ping.seq, ping.note.as_str()), (42, "hi"), "{ct}");
    }
}

#[test]
fn protobuf_decode_error_passes_through() {
    let mut ping = Ping { seq: 1, note: String::new() };
    let mut res = Response::default();
    let err = bind(&mut ping, &post("application/x-protobuf", vec![0x08]), &mut res).unwrap_err();
    assert!(matches!(err, Error::Protobuf(_)));
    assert_eq!(ping.seq, 1);
    assert_eq!(res.status_code(), StatusCode::OK);
}

#[test]
fn form_body_uses_request_params() {
    for ct in ["application/x-www-form-urlencoded", "multipart/form-data; boundary=----x"] {
        let req = Request::builder()
            .method(Method::PUT)
            .header("content-type", ct)
            .body("ignored by the binder")
            .params([("Name", "Alice"), ("Age", "30"), ("admin", "t"), ("score", "9.5"), ("city", "Oslo"), ("zip", "150")])
            .build();
        let (signup, _) = bind_ok(&req);
        assert_eq!(signup, alice(), "{ct}");
    }
}

#[tokio::test]
async fn from_http_form_round_trip() {
    let req = http::Request::builder()
        .method(Method::POST)
        .uri("/signup?Name=Bob&zip=7")
        .header("content-type", "application/x-www-form-urlencoded")
        .body(http_body_util::Full::new(bytes::Bytes::from_static(
            b"Name=Alice&Age=30&admin=true&score=9.5&city=Oslo",
        )))
        .unwrap();
    let req = Request::from_http(req).await.unwrap();

    let (signup, _) = bind_ok(&req);
    assert_eq!(signup.name, "Alice");
    assert_eq!(signup.address, Address { city: "Oslo".into(), zip: 7 });
}

#[test]
fn non_get_without_body_fails() {
    for method in [Method::POST, Method::PUT, Method::DELETE, Method::HEAD] {
        let req = Request::builder()
            .method(method.clone())
            .header("content-type", "application/json")
            .param("Name", "Alice")
            .build();
        let mut res = Response::default();
        let err = bind(&mut Signup::default(), &req, &mut res).unwrap_err();
        assert!(matches!(err, Error::EmptyBody), "{method}");
        assert_eq!(res.status_code(), StatusCode::OK);
    }
}

#[test]
fn bad_content_type_syntax_is_passed_through() {
    let mut res = Response::default();
    let err = bind(&mut Signup::default(), &post("json", "{}"), &mut res).unwrap_err();
    let Error::MediaType(inner) = &err else { panic!("unexpected {err:?}") };
    assert_eq!(err.to_string(), inner.to_string());
    assert_eq!(res.status_code(), StatusCode::OK);
}

#[test]
fn unsupported_types_set_415() {
    for ct in ["text/plain", "text/xml", "application/yaml", "image/png", "application/json+x"] {
        let mut res = Response::default();
        let err = bind(&mut Signup::default(), &post(ct, "x"), &mut res).unwrap_err();
        assert!(matches!(err, Error::UnsupportedMediaType), "{ct}");
        assert_eq!(err.to_string(), "unsupported media type");
        assert_eq!(res.status_code(), StatusCode::UNSUPPORTED_MEDIA_TYPE, "{ct}");
    }
}

#[test]
fn supported_types_never_touch_status_on_decode_failure() {
    let cases: [(&str, &[u8]); 8] = [
        ("application/json", b"{\"name\": "),
        ("application/xml", b"<signup><age>old</age></signup>"),
        ("application/msgpack", &[0xc1]),
        ("application/x-msgpack", &[0x81, 0xa4]),
        ("application/toml", b"age = "),
        ("application/x-toml", &[0xff, 0xfe]),
        ("application/protobuf", &[0x08]),
        ("application/x-protobuf", &[0x08]),
    ];
    for (ct, body) in cases {
        let mut res = Response::default();
        let mut signup = alice();
        let result = bind(&mut signup, &post(ct, body.to_vec()), &mut res);
        assert!(result.is_err(), "{ct}");
        assert_eq!(signup, alice(), "{ct}");
        assert_eq!(res.status_code(), StatusCode::OK, "{ct}");
    }
}

#[test]
fn body_missing_a_field_needs_a_serde_default() {
    #[derive(Debug, Default, Deserialize, PartialEq)]
    struct Login {
        user: String,
        remember: bool,
    }
    bindable!(Login { user, remember });

    #[derive(Debug, Default, Deserialize, PartialEq)]
    #[serde(default)]
    struct LenientLogin {
        user: String,
        remember: bool,
    }
    bindable!(LenientLogin { user, remember });

    let req = post("application/json", r#"{"user":"a"}"#);

    let mut strict = Login { user: "old".into(), remember: true };
    let err = bind(&mut strict, &req, &mut Response::default()).unwrap_err();
    assert!(matches!(err, Error::Json(_)), "{err}");
    assert!(err.to_string().contains("missing field `remember`"), "{err}");
    assert_eq!(strict, Login { user: "old".into(), remember: true });

    let mut lenient = LenientLogin::default();
    let mut res = Response::default();
    bind(&mut lenient, &req, &mut res).unwrap();
    assert_eq!(lenient, LenientLogin { user: "a".into(), remember: false });
    assert_eq!(res.status_code(), StatusCode::OK);
}

// ── Properties ────────────────────────────────────────────────────────────────

fn param_strategy() -> impl Strategy<Value = Vec<(String, String)>> {
    let name = prop_oneof![
        Just("Name".to_owned()),
        Just("Age".to_owned()),
        Just("admin".to_owned()),
        Just("score".to_owned()),
        Just("city".to_owned()),
        Just("zip".to_owned()),
        "[a-z]{1,4}",
    ];
    let value = prop_oneof!["-?[0-9]{1,6}", "[a-mo-zA-MO-Z]{0,6}", Just("true".to_owned()), "[0-9]{1,3}\\.[0-9]{1,2}"];
    prop::collection::vec((name, value), 0..10)
}

proptest! {
    /// GET query binding and form-body binding agree for any parameter list.
    #[test]
    fn get_and_form_bind_identically(params in param_strategy()) {
        let get = Request::builder().params(params.clone()).build();
        let form = Request::builder()
            .method(Method::POST)
            .header("content-type", "application/x-www-form-urlencoded")
            .body("x")
            .params(params)
            .build();

        let (from_get, get_res) = bind_ok(&get);
        let (from_form, form_res) = bind_ok(&form);
        prop_assert_eq!(from_get, from_form);
        prop_assert_eq!(get_res.status_code(), form_res.status_code());
    }
}
