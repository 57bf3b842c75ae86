//! Records shared by the integration tests.

#![allow(dead_code)]

use qstring::{DecodeQuery, EncodeQuery, Error, QueryRecord, Values};

/// One field of every built-in scalar and sequence kind.
#[derive(QueryRecord, Debug, Default, Clone, PartialEq)]
pub struct TestStruct {
    #[qstring("name")]
    pub name: String,
    pub r#do: bool,

    // integer fields
    #[qstring("page")]
    pub page: isize,
    pub id: i8,
    pub small: i16,
    pub med: i32,
    pub big: i64,

    // unsigned fields
    pub upage: usize,
    pub uid: u8,
    pub usmall: u16,
    pub umed: u32,
    pub ubig: u64,

    pub float32: f32,
    pub float64: f64,

    // sequence fields
    #[qstring("fields")]
    pub fields: Vec<String>,
    #[qstring("dofields")]
    pub do_fields: Vec<bool>,
    pub counts: Vec<isize>,
    pub ids: Vec<i8>,
    pub smalls: Vec<i16>,
    pub meds: Vec<i32>,
    pub bigs: Vec<i64>,

    pub upages: Vec<usize>,
    pub uids: Vec<u8>,
    pub usmalls: Vec<u16>,
    pub umeds: Vec<u32>,
    pub ubigs: Vec<u64>,

    pub float32s: Vec<f32>,
    pub float64s: Vec<f64>,

    #[qstring("-")]
    pub skipped: i32,
}

#[derive(QueryRecord, Debug, Default, Clone, PartialEq)]
pub struct Paging {
    pub page: i32,
    pub limit: i32,
}

/// A record that references itself through an optional box.
#[derive(QueryRecord, Debug, Default, Clone, PartialEq)]
pub struct RecursiveStruct {
    pub object: Option<Box<RecursiveStruct>>,
    pub value: String,
}

/// A record with a hand-written codec for both directions.
#[derive(QueryRecord, Debug, Default, Clone, PartialEq)]
#[qstring(custom_decode, custom_encode)]
pub struct MarshalInterfaceTest {
    pub names: Vec<String>,
}

pub const NO_NAMES: &str = "No Names Provided";

impl DecodeQuery for MarshalInterfaceTest {
    fn decode_query(&mut self, values: &Values) -> qstring::Result<()> {
        match values.get("names") {
            Some(names) => {
                self.names = names.to_vec();
                Ok(())
            }
            None => Err(Error::custom(NO_NAMES)),
        }
    }
}

impl EncodeQuery for MarshalInterfaceTest {
    fn encode_query(&self) -> qstring::Result<Values> {
        let mut values = Values::new();
        values.insert("names", self.names.clone());
        Ok(values)
    }
}

/// Builds a collection from literal pairs.
pub fn values(pairs: &[(&str, &[&str])]) -> Values {
    pairs.iter().map(|(k, v)| (*k, v.iter().copied())).collect()
}
