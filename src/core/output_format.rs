//! Record formatters: JSON, raw text and ANSI tree text
//!
//! Every formatter appends exactly one rendering of the record to the
//! buffer, without the trailing newline.

use crate::core::attribute::{Attribute, Value};
use crate::core::humanize::{
    format_duration, format_float, format_int, format_timestamp, json_escape, text_escape,
};
use crate::core::level::ANSI_RESET;
use crate::core::record::Record;
use serde::{Deserialize, Serialize};

/// Configured output format of a sink.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum OutputFormat {
    #[default]
    Json,
    Text,
}

/// Concrete formatter selected for a sink.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum Formatter {
    Json,
    RawText,
    AnsiText,
}

impl Formatter {
    pub fn format(&self, record: &Record, buffer: &mut String) {
        match self {
            Formatter::Json => record_to_json(record, buffer),
            Formatter::RawText => record_to_raw_text(record, buffer),
            Formatter::AnsiText => record_to_ansi_text(record, buffer),
        }
    }

    pub fn name(&self) -> &'static str {
        match self {
            Formatter::Json => "json",
            Formatter::RawText => "raw text",
            Formatter::AnsiText => "ansi text",
        }
    }
}

/// `{"time":...,"level":...,"message":...}` followed by one member per
/// attribute. Groups become nested objects.
pub fn record_to_json(record: &Record, buffer: &mut String) {
    buffer.push_str("{\"time\":\"");
    format_timestamp(&record.timestamp, buffer);
    buffer.push_str("\",\"level\":\"");
    buffer.push_str(record.level.name());
    buffer.push_str("\",\"message\":");
    json_escape(&record.message, buffer);
    for attribute in &record.attributes {
        buffer.push(',');
        attribute_to_json(attribute, buffer);
    }
    buffer.push('}');
}

fn attribute_to_json(attribute: &Attribute, buffer: &mut String) {
    json_escape(&attribute.key, buffer);
    buffer.push(':');
    match &attribute.value {
        Value::Bool(v) => buffer.push_str(if *v { "true" } else { "false" }),
        Value::Int(v) => format_int(*v, buffer),
        Value::Float(v) => format_float(*v, buffer),
        Value::String(v) => json_escape(v, buffer),
        Value::Duration(v) => {
            buffer.push('"');
            format_duration(*v, buffer);
            buffer.push('"');
        }
        Value::Time(v) => {
            buffer.push('"');
            format_timestamp(v, buffer);
            buffer.push('"');
        }
        Value::Group(children) => {
            buffer.push('{');
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    buffer.push(',');
                }
                attribute_to_json(child, buffer);
            }
            buffer.push('}');
        }
    }
}

/// Text rendering of a leaf value; strings follow the text quoting rules.
fn scalar_to_text(value: &Value, buffer: &mut String) {
    match value {
        Value::Bool(v) => buffer.push_str(if *v { "true" } else { "false" }),
        Value::Int(v) => format_int(*v, buffer),
        Value::Float(v) => format_float(*v, buffer),
        Value::String(v) => text_escape(v, buffer),
        Value::Duration(v) => format_duration(*v, buffer),
        Value::Time(v) => format_timestamp(v, buffer),
        Value::Group(_) => {}
    }
}

/// `<time> <LEVEL> <message> key=value ...` with groups flattened into
/// dotted keys. Keys are written as they are, so they should be plain
/// identifiers.
pub fn record_to_raw_text(record: &Record, buffer: &mut String) {
    format_timestamp(&record.timestamp, buffer);
    buffer.push(' ');
    buffer.push_str(record.level.name());
    buffer.push(' ');
    text_escape(&record.message, buffer);

    let mut path = String::new();
    for attribute in &record.attributes {
        buffer.push(' ');
        attribute_to_text(attribute, &mut path, buffer);
    }
}

fn attribute_to_text(attribute: &Attribute, path: &mut String, buffer: &mut String) {
    match &attribute.value {
        Value::Group(children) => {
            let depth = path.len();
            path.push_str(&attribute.key);
            path.push('.');
            for (i, child) in children.iter().enumerate() {
                if i > 0 {
                    buffer.push(' ');
                }
                attribute_to_text(child, path, buffer);
            }
            path.truncate(depth);
        }
        value => {
            buffer.push_str(path);
            buffer.push_str(&attribute.key);
            buffer.push('=');
            scalar_to_text(value, buffer);
        }
    }
}

/// `<time> <colored LEVEL> <message>` followed by the attributes drawn as a
/// tree, one per line.
pub fn record_to_ansi_text(record: &Record, buffer: &mut String) {
    format_timestamp(&record.timestamp, buffer);
    buffer.push(' ');
    buffer.push_str(record.level.ansi_color());
    buffer.push_str(record.level.name());
    buffer.push_str(ANSI_RESET);
    buffer.push(' ');
    text_escape(&record.message, buffer);

    let mut prefix = String::from("\n");
    let count = record.attributes.len();
    for (i, attribute) in record.attributes.iter().enumerate() {
        attribute_to_tree(attribute, &mut prefix, i + 1 == count, buffer);
    }
}

fn attribute_to_tree(attribute: &Attribute, prefix: &mut String, is_last: bool, buffer: &mut String) {
    buffer.push_str(prefix);
    buffer.push_str(if is_last { "└── " } else { "├── " });
    buffer.push_str(&attribute.key);

    match &attribute.value {
        Value::Group(children) => {
            let depth = prefix.len();
            prefix.push_str(if is_last { "    " } else { "│   " });
            let count = children.len();
            for (i, child) in children.iter().enumerate() {
                attribute_to_tree(child, prefix, i + 1 == count, buffer);
            }
            prefix.truncate(depth);
        }
        value => {
            buffer.push('=');
            scalar_to_text(value, buffer);
        }
    }
}
