use crate::benchlog::ParsedLog;
use anyhow::Context;
use serde::Serialize;
use serde_json::ser::PrettyFormatter;
use std::fs;

/// JSON with 4-space indentation and fields in declaration order.
pub fn to_pretty_json<T: Serialize + ?Sized>(value: &T) -> anyhow::Result<String> {
    let mut buf = Vec::new();
    let formatter = PrettyFormatter::with_indent(b"    ");
    let mut ser = serde_json::Serializer::with_formatter(&mut buf, formatter);
    value.serialize(&mut ser)?;
    Ok(String::from_utf8(buf)?)
}

/// Where the parsed log of `log_path` is persisted: the same path with
/// `.json` appended (`run.log` -> `run.log.json`).
pub fn json_path_for(log_path: &str) -> String {
    format!("{}.json", log_path)
}

pub fn write_parsed_log(path: &str, parsed: &ParsedLog) -> anyhow::Result<()> {
    let json = to_pretty_json(parsed)?;
    fs::write(path, json).with_context(|| format!("write parsed log {}", path))
}

/// Load a parsed log previously written by [`write_parsed_log`].
pub fn read_parsed_log(path: &str) -> anyhow::Result<ParsedLog> {
    let text = fs::read_to_string(path).with_context(|| format!("read parsed log {}", path))?;
    serde_json::from_str(&text).with_context(|| format!("decode parsed log {}", path))
}
