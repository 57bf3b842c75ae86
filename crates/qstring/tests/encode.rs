//! Integration tests for encoding records into parameter collections.

#![cfg(feature = "derive")]

mod common;

use std::net::Ipv4Addr;

use chrono::{DateTime, FixedOffset, Utc};
use common::{MarshalInterfaceTest, Paging, RecursiveStruct, TestStruct};
use qstring::{encode, encode_to_string, EncodeQuery, Error, Invalid, QueryRecord, Values};

fn full_struct() -> TestStruct {
    TestStruct {
        name: "SomeName".into(),
        r#do: true,
        page: 1,
        id: 12,
        small: 13,
        med: 14,
        big: 15,
        upage: 2,
        uid: 16,
        usmall: 17,
        umed: 17,
        ubig: 17,
        float32: 6000.0,
        float64: 7000.0,
        fields: vec!["foo".into(), "bar".into()],
        do_fields: vec![true, false],
        counts: vec![1, 2],
        ids: vec![3, 4],
        smalls: vec![6, 7],
        meds: vec![9, 10],
        bigs: vec![12, 13],
        upages: vec![2, 3],
        uids: vec![5, 6],
        usmalls: vec![8, 9],
        umeds: vec![9, 10],
        ubigs: vec![12, 13],
        float32s: vec![6000.0, 6001.0],
        float64s: vec![7000.0, 7001.0],
        skipped: 3,
    }
}

// =============================================================================
// Scalars and sequences
// =============================================================================

#[test]
fn test_encode_string() {
    let query = encode_to_string(&full_struct()).unwrap();

    let expected = [
        "name=SomeName", "do=true", "page=1", "id=12", "small=13", "med=14", "big=15",
        "upage=2", "uid=16", "usmall=17", "umed=17", "ubig=17", "float32=6000",
        "float64=7000", "fields=foo", "fields=bar", "dofields=true", "dofields=false",
        "counts=1", "counts=2", "ids=3", "ids=4", "smalls=6", "smalls=7", "meds=9",
        "meds=10", "bigs=12", "bigs=13", "upages=2", "upages=3", "uids=5", "uids=6",
        "usmalls=8", "usmalls=9", "umeds=9", "umeds=10", "ubigs=12", "ubigs=13",
        "float32s=6000", "float32s=6001", "float64s=7000", "float64s=7001",
    ];
    for param in expected {
        assert!(
            query.split('&').any(|p| p == param),
            "expected {} to contain {}",
            query,
            param
        );
    }
}

#[test]
fn test_encode_values() {
    let values = encode(&full_struct()).unwrap();

    // Every settable field except the skipped one.
    assert_eq!(values.len(), 28);
    assert!(!values.contains_key("skipped"));
    assert_eq!(values.get("fields").unwrap(), ["foo", "bar"]);
    assert_eq!(values.get("float64s").unwrap(), ["7000", "7001"]);
    assert_eq!(values.first("do"), Some("true"));
}

#[test]
fn test_encode_is_sorted() {
    #[derive(QueryRecord)]
    struct Query {
        pub page: i32,
        pub names: Vec<String>,
        pub limit: i32,
    }

    let q = Query {
        page: 1,
        names: vec!["foo".into(), "bar".into()],
        limit: 50,
    };
    assert_eq!(
        encode_to_string(&q).unwrap(),
        "limit=50&names=foo&names=bar&page=1"
    );
}

#[test]
fn test_floats_are_shortest() {
    #[derive(QueryRecord)]
    struct Floats {
        pub a: f32,
        pub b: f64,
        pub c: f64,
    }

    let values = encode(&Floats { a: 0.1, b: 0.1, c: 1e21 }).unwrap();
    assert_eq!(values.first("a"), Some("0.1"));
    assert_eq!(values.first("b"), Some("0.1"));
    assert_eq!(values.first("c").unwrap().parse::<f64>().unwrap(), 1e21);
}

// =============================================================================
// omitempty
// =============================================================================

#[derive(QueryRecord, Default)]
struct Conditional {
    #[qstring("conditional,omitempty")]
    pub conditional: i32,
    #[qstring(",omitempty")]
    pub tags: Vec<String>,
    #[qstring(",omitempty")]
    pub note: String,
    #[qstring(",omitempty")]
    pub flag: bool,
    #[qstring(",omitempty")]
    pub at: DateTime<Utc>,
    #[qstring(",omitempty")]
    pub paging: Option<Paging>,
    pub always: Vec<String>,
}

#[test]
fn test_omitempty_drops_empty_values() {
    let values = encode(&Conditional::default()).unwrap();

    let keys: Vec<_> = values.keys().collect();
    assert_eq!(keys, ["always"]);
    assert!(values.get("always").unwrap().is_empty());
    assert_eq!(encode_to_string(&Conditional::default()).unwrap(), "");
}

#[test]
fn test_omitempty_keeps_set_values() {
    let c = Conditional {
        conditional: 5,
        tags: vec!["a".into()],
        note: "n".into(),
        flag: true,
        at: "2006-01-02T15:04:05Z".parse().unwrap(),
        paging: Some(Paging::default()),
        always: Vec::new(),
    };
    let values = encode(&c).unwrap();

    assert_eq!(values.first("conditional"), Some("5"));
    assert_eq!(values.first("tags"), Some("a"));
    assert_eq!(values.first("note"), Some("n"));
    assert_eq!(values.first("flag"), Some("true"));
    assert_eq!(values.first("at"), Some("2006-01-02T15:04:05Z"));
    assert_eq!(values.first("paging.page"), Some("0"));
}

#[test]
fn test_omitempty_is_a_fixed_point() {
    let c = Conditional {
        conditional: 5,
        ..Conditional::default()
    };
    let once = encode(&c).unwrap();

    let mut back = Conditional::default();
    qstring::decode(&once, &mut back).unwrap();
    assert_eq!(encode(&back).unwrap(), once);
}

// =============================================================================
// Invalid sources
// =============================================================================

#[test]
fn test_invalid_sources() {
    let err = encode(None::<&dyn EncodeQuery>).unwrap_err();
    assert!(matches!(err, Error::InvalidSource(Invalid::Nil)));
    assert_eq!(err.to_string(), "qstring: encode(nil)");

    let err = encode(None::<&TestStruct>).unwrap_err();
    assert!(matches!(
        err,
        Error::InvalidSource(Invalid::NilReference(ty)) if ty.ends_with("TestStruct")
    ));
    assert!(err.to_string().starts_with("qstring: encode(nil &"));
}

#[test]
fn test_sources() {
    let mut ts = full_struct();
    let by_ref = encode(&ts).unwrap();
    let by_mut = encode(&mut ts).unwrap();
    let by_dyn = encode(&ts as &dyn EncodeQuery).unwrap();
    let by_some = encode(Some(&ts)).unwrap();

    assert_eq!(by_ref, by_mut);
    assert_eq!(by_ref, by_dyn);
    assert_eq!(by_ref, by_some);
}

// =============================================================================
// Timestamps
// =============================================================================

#[test]
fn test_encode_time() {
    #[derive(QueryRecord)]
    struct Query {
        pub created: DateTime<Utc>,
        pub lastupdated: DateTime<FixedOffset>,
    }

    let q = Query {
        created: "2006-01-02T15:04:05Z".parse().unwrap(),
        lastupdated: DateTime::parse_from_rfc3339("2016-01-02T15:04:05-07:00").unwrap(),
    };
    let values = encode(&q).unwrap();

    assert_eq!(values.first("created"), Some("2006-01-02T15:04:05Z"));
    assert_eq!(values.first("lastupdated"), Some("2016-01-02T15:04:05-07:00"));

    let text = encode_to_string(&q).unwrap();
    let parsed = Values::parse(&text);
    assert_eq!(parsed, values);
}

// =============================================================================
// Nested records
// =============================================================================

#[derive(QueryRecord)]
struct Params {
    pub paging: Paging,
    pub name: String,
}

#[test]
fn test_encode_nested() {
    let params = Params {
        name: "SomeName".into(),
        paging: Paging { page: 1, limit: 50 },
    };
    let values = encode(&params).unwrap();

    assert!(!values.contains_key("paging"));
    assert_eq!(values.first("name"), Some("SomeName"));
    assert_eq!(values.first("paging.page"), Some("1"));
    assert_eq!(values.first("paging.limit"), Some("50"));
}

#[derive(QueryRecord)]
struct PtrParams {
    pub paging: Option<Paging>,
    pub boxed: Box<Paging>,
    pub name: String,
}

#[test]
fn test_encode_nested_optional() {
    let params = PtrParams {
        paging: Some(Paging { page: 1, limit: 50 }),
        boxed: Box::new(Paging { page: 2, limit: 5 }),
        name: "SomeName".into(),
    };
    let values = encode(&params).unwrap();

    assert!(!values.contains_key("paging"));
    assert_eq!(values.first("paging.page"), Some("1"));
    assert_eq!(values.first("paging.limit"), Some("50"));
    assert_eq!(values.first("boxed.page"), Some("2"));

    let params = PtrParams { paging: None, ..params };
    let values = encode(&params).unwrap();
    assert!(values.keys().all(|k| !k.starts_with("paging")));
}

#[test]
fn test_encode_recursive() {
    let s = RecursiveStruct {
        object: Some(Box::new(RecursiveStruct {
            object: None,
            value: "embedded-example".into(),
        })),
        value: "example".into(),
    };

    let values = encode(&s).unwrap();
    let keys: Vec<_> = values.keys().collect();
    assert_eq!(keys, ["object.value", "value"]);
    assert_eq!(values.first("object.value"), Some("embedded-example"));
}

// =============================================================================
// Codecs
// =============================================================================

#[test]
fn test_record_encoder() {
    let s = MarshalInterfaceTest {
        names: vec!["foo".into(), "bar".into()],
    };
    let values = encode(&s).unwrap();

    assert_eq!(values.len(), 1);
    assert_eq!(values.get("names").unwrap(), ["foo", "bar"]);
}

#[test]
fn test_record_encoder_when_nested() {
    #[derive(QueryRecord)]
    struct Wrapper {
        pub inner: MarshalInterfaceTest,
    }

    let w = Wrapper {
        inner: MarshalInterfaceTest {
            names: vec!["a".into()],
        },
    };
    assert_eq!(encode_to_string(&w).unwrap(), "inner.names=a");
}

#[derive(QueryRecord)]
struct Network {
    #[qstring(text)]
    pub origin: Ipv4Addr,
    #[qstring(display)]
    pub hosts: Vec<Ipv4Addr>,
    #[qstring(display, ",omitempty")]
    pub label: String,
    #[qstring("ids,comma")]
    pub ids: Vec<u32>,
}

#[test]
fn test_field_codecs() {
    let net = Network {
        origin: Ipv4Addr::new(10, 0, 0, 1),
        hosts: vec![Ipv4Addr::new(1, 1, 1, 1), Ipv4Addr::new(8, 8, 8, 8)],
        label: String::new(),
        ids: vec![1, 2, 3],
    };
    let values = encode(&net).unwrap();

    assert_eq!(values.first("origin"), Some("10.0.0.1"));
    assert_eq!(values.get("hosts").unwrap(), ["1.1.1.1", "8.8.8.8"]);
    assert_eq!(values.get("ids").unwrap(), ["1,2,3"]);
    assert!(!values.contains_key("label"));
}

#[derive(Debug, Default, PartialEq)]
struct Status(i32);

impl std::fmt::Display for Status {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "{}", self.0)
    }
}

impl std::str::FromStr for Status {
    type Err = std::num::ParseIntError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        s.parse().map(Status)
    }
}

#[derive(QueryRecord, Default)]
struct Labelled {
    #[qstring("label,omitempty", display)]
    pub label: String,
    #[qstring("status,omitempty", text)]
    pub status: Status,
    #[qstring(text)]
    pub kept: Status,
}

#[test]
fn test_omitempty_with_field_codecs() {
    let values = encode(&Labelled::default()).unwrap();
    let keys: Vec<_> = values.keys().collect();
    assert_eq!(keys, ["kept"]);
    assert_eq!(values.first("kept"), Some("0"));

    let l = Labelled {
        label: "x".into(),
        status: Status(3),
        ..Labelled::default()
    };
    let values = encode(&l).unwrap();
    assert_eq!(values.first("label"), Some("x"));
    assert_eq!(values.first("status"), Some("3"));
}

#[test]
fn test_omitempty_text_without_default_is_kept() {
    #[derive(QueryRecord)]
    struct Host {
        #[qstring(",omitempty", text)]
        pub addr: Ipv4Addr,
    }

    let values = encode(&Host {
        addr: Ipv4Addr::UNSPECIFIED,
    })
    .unwrap();
    assert_eq!(values.first("addr"), Some("0.0.0.0"));
}

#[test]
fn test_comma_string_is_escaped() {
    #[derive(QueryRecord)]
    struct Ids {
        #[qstring("ids,comma")]
        pub ids: Vec<u32>,
    }

    let text = encode_to_string(&Ids { ids: vec![1, 2] }).unwrap();
    assert_eq!(text, "ids=1%2C2");
}
