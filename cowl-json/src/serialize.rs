use alloc::string::{String, ToString};

use cowl_core::{FieldValue, Record};
use cowl_reflect::Sealed;

use crate::{JsonError, JsonErrorKind, Span};

/// Serializes a wrapped record to a JSON object, members in declaration
/// order.
///
/// Fails only if a member's value has no JSON representation (an opaque
/// member); floats that are not finite serialize as `null`.
pub fn to_string<T: Record>(wrapper: &Sealed<T>) -> Result<String, JsonError> {
    let mut out = String::new();
    write_value(&mut out, &T::shape().to_record_value(wrapper.value()))?;
    Ok(out)
}

fn write_value(out: &mut String, value: &FieldValue) -> Result<(), JsonError> {
    match value {
        FieldValue::Absent => out.push_str("null"),
        FieldValue::Bool(true) => out.push_str("true"),
        FieldValue::Bool(false) => out.push_str("false"),
        FieldValue::Int(v) => out.push_str(&v.to_string()),
        FieldValue::UInt(v) => out.push_str(&v.to_string()),
        FieldValue::Float(v) => {
            if v.is_finite() {
                out.push_str(&v.to_string());
            } else {
                out.push_str("null");
            }
        }
        FieldValue::Text(v) => write_json_string(out, v),
        FieldValue::List(items) => {
            out.push('[');
            for (position, item) in items.iter().enumerate() {
                if position > 0 {
                    out.push(',');
                }
                write_value(out, item)?;
            }
            out.push(']');
        }
        FieldValue::Record(pairs) => {
            out.push('{');
            for (position, (name, item)) in pairs.iter().enumerate() {
                if position > 0 {
                    out.push(',');
                }
                write_json_string(out, name);
                out.push(':');
                write_value(out, item)?;
            }
            out.push('}');
        }
        FieldValue::Opaque(opaque) => {
            return Err(JsonError {
                kind: JsonErrorKind::UnsupportedValue {
                    type_name: opaque.type_name(),
                },
                span: Span::new(out.len(), 0),
            });
        }
    }
    Ok(())
}

/// Properly escapes and writes a JSON string
fn write_json_string(out: &mut String, s: &str) {
    out.push('"');
    for c in s.chars() {
        match c {
            '"' => out.push_str("\\\""),
            '\\' => out.push_str("\\\\"),
            '\n' => out.push_str("\\n"),
            '\r' => out.push_str("\\r"),
            '\t' => out.push_str("\\t"),
            '\u{08}' => out.push_str("\\b"),
            '\u{0C}' => out.push_str("\\f"),
            c if (c as u32) < 0x20 => {
                // Remaining control characters get the long form.
                let code = c as u32;
                out.push_str("\\u00");
                let hex = b"0123456789abcdef";
                out.push(hex[(code >> 4) as usize] as char);
                out.push(hex[(code & 0xf) as usize] as char);
            }
            c => out.push(c),
        }
    }
    out.push('"');
}
