use std::fs::File;
use std::io::{BufReader, Read, Seek, SeekFrom};
use std::path::Path;
use std::str::FromStr;

use anyhow::Context;
use byteseq_core::{ByteOrder, ByteSource, ReadError, SequentialReader, StreamSource};
use clap::ValueEnum;
use serde::Serialize;
use serde_json::Value;

use crate::CliError;

#[derive(Debug, Clone, Copy, PartialEq, Eq, ValueEnum)]
pub enum OrderArg {
    Big,
    Little,
}

impl From<OrderArg> for ByteOrder {
    fn from(value: OrderArg) -> Self {
        match value {
            OrderArg::Big => ByteOrder::BigEndian,
            OrderArg::Little => ByteOrder::LittleEndian,
        }
    }
}

/// One step of a decode request, as written on the command line.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum FieldSpec {
    U8,
    I8,
    U16,
    I16,
    U32,
    I32,
    I64,
    F32,
    F64,
    Fixed,
    Bytes(usize),
    Str(usize),
    CStr(usize),
    Skip(u64),
    Order(ByteOrder),
}

impl FromStr for FieldSpec {
    type Err = String;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let (name, arg) = match s.split_once(':') {
            Some((name, arg)) => (name, Some(arg)),
            None => (s, None),
        };
        let count = |arg: Option<&str>| -> Result<usize, String> {
            let raw = arg.ok_or_else(|| format!("'{name}' needs a length, e.g. {name}:4"))?;
            raw.parse::<usize>()
                .map_err(|_| format!("invalid length '{raw}' in '{s}'"))
        };
        let spec = match (name, arg) {
            ("u8", None) => FieldSpec::U8,
            ("i8", None) => FieldSpec::I8,
            ("u16", None) => FieldSpec::U16,
            ("i16", None) => FieldSpec::I16,
            ("u32", None) => FieldSpec::U32,
            ("i32", None) => FieldSpec::I32,
            ("i64", None) => FieldSpec::I64,
            ("f32", None) => FieldSpec::F32,
            ("f64", None) => FieldSpec::F64,
            ("fixed", None) => FieldSpec::Fixed,
            ("bytes", arg) => FieldSpec::Bytes(count(arg)?),
            ("str", arg) => FieldSpec::Str(count(arg)?),
            ("cstr", arg) => FieldSpec::CStr(count(arg)?),
            ("skip", arg) => FieldSpec::Skip(count(arg)? as u64),
            ("order", Some("big")) => FieldSpec::Order(ByteOrder::BigEndian),
            ("order", Some("little")) => FieldSpec::Order(ByteOrder::LittleEndian),
            _ => return Err(format!("unknown field '{s}'")),
        };
        Ok(spec)
    }
}

#[derive(Debug, Serialize)]
pub struct DecodedField {
    pub field: String,
    pub value: Value,
}

/// Decode `fields` in order from `reader`, stopping at the first failure.
pub fn decode_fields<S: ByteSource>(
    reader: &mut SequentialReader<S>,
    fields: &[(String, FieldSpec)],
) -> Result<Vec<DecodedField>, (usize, ReadError)> {
    let mut decoded = Vec::with_capacity(fields.len());
    for (index, (label, spec)) in fields.iter().enumerate() {
        let value = decode_one(reader, *spec).map_err(|err| (index, err))?;
        decoded.push(DecodedField {
            field: label.clone(),
            value,
        });
    }
    Ok(decoded)
}

fn decode_one<S: ByteSource>(
    reader: &mut SequentialReader<S>,
    spec: FieldSpec,
) -> Result<Value, ReadError> {
    let value = match spec {
        FieldSpec::U8 => Value::from(reader.read_u8()?),
        FieldSpec::I8 => Value::from(reader.read_i8()?),
        FieldSpec::U16 => Value::from(reader.read_u16()?),
        FieldSpec::I16 => Value::from(reader.read_i16()?),
        FieldSpec::U32 => Value::from(reader.read_u32()?),
        FieldSpec::I32 => Value::from(reader.read_i32()?),
        FieldSpec::I64 => Value::from(reader.read_i64()?),
        FieldSpec::F32 => float_value(f64::from(reader.read_f32()?)),
        FieldSpec::F64 => float_value(reader.read_f64()?),
        FieldSpec::Fixed => Value::from(reader.read_s15_fixed16()?),
        FieldSpec::Bytes(n) => Value::from(hex::encode(reader.read_bytes(n)?)),
        FieldSpec::Str(n) => Value::from(reader.read_string(n)?),
        FieldSpec::CStr(n) => Value::from(reader.read_null_terminated_string(n)?),
        FieldSpec::Skip(n) => {
            reader.skip(n)?;
            Value::Null
        }
        FieldSpec::Order(order) => {
            reader.set_byte_order(order);
            Value::Null
        }
    };
    Ok(value)
}

/// JSON has no NaN or infinity; those are emitted as the strings
/// `"NaN"`, `"inf"` and `"-inf"` so they stay distinct from `null`.
fn float_value(value: f64) -> Value {
    if value.is_finite() {
        Value::from(value)
    } else {
        Value::from(value.to_string())
    }
}

pub fn cmd_decode(
    input: &Path,
    offset: u64,
    order: OrderArg,
    fields: Vec<String>,
    pretty: bool,
) -> Result<(), CliError> {
    let specs = fields
        .into_iter()
        .map(|raw| {
            raw.parse::<FieldSpec>()
                .map(|spec| (raw, spec))
                .map_err(|msg| {
                    CliError::new(
                        msg,
                        Some("fields: u8 i8 u16 i16 u32 i32 i64 f32 f64 fixed bytes:N str:N cstr:N skip:N order:big|little".to_string()),
                    )
                })
        })
        .collect::<Result<Vec<_>, _>>()?;

    let mut file = File::open(input)
        .with_context(|| format!("Failed to open input file: {}", input.display()))?;
    file.seek(SeekFrom::Start(offset))
        .with_context(|| format!("Failed to seek to offset {offset}"))?;

    let decoded = run(BufReader::new(file), order.into(), &specs)?;
    let json = if pretty {
        serde_json::to_string_pretty(&decoded)
    } else {
        serde_json::to_string(&decoded)
    }
    .context("JSON serialization failed")?;
    println!("{json}");
    Ok(())
}

fn run<R: Read>(
    input: R,
    order: ByteOrder,
    specs: &[(String, FieldSpec)],
) -> Result<Vec<DecodedField>, CliError> {
    let mut reader = SequentialReader::with_byte_order(StreamSource::new(input), order);
    decode_fields(&mut reader, specs).map_err(|(index, err)| {
        let hint = if err.is_end_of_sequence() {
            Some("the input ends before all requested fields".to_string())
        } else {
            None
        };
        CliError::new(
            format!(
                "decode failed at field #{} ({}): {}",
                index + 1,
                specs[index].0,
                err
            ),
            hint,
        )
    })
}
