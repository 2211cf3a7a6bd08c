//! Property mapping
//!
//! Converts an element's attribute bag into the output property bag. Names are resolved against
//! the HTML or SVG schema ([`schema`]), values are coerced to the kind the schema declares, and
//! the `style` attribute is parsed into a map ([`style`]).

pub mod schema;
pub mod style;

pub use schema::Space;

use crate::output::{PropValue, Props};
use crate::tree::{AttrValue, Element};
use schema::Kind;

/// Map every attribute of `element` to output props.
///
/// Attributes whose name is invalid, or whose value is null or NaN, are skipped.
pub fn map_properties(element: &Element, space: Space) -> Props {
    let mut props = Props::new();
    for (name, value) in &element.attributes {
        let Some(info) = schema::find(space, name) else {
            log::trace!("dropping attribute `{name}` on <{}>", element.tag);
            continue;
        };
        let Some(value) = coerce(value, info.kind) else {
            continue;
        };
        let value = match (info.property.as_str(), value) {
            ("style", PropValue::String(source)) => PropValue::Style(style::parse_style(&source)),
            (_, value) => value,
        };
        props.insert(info.property, value);
    }
    props
}

fn coerce(value: &AttrValue, kind: Kind) -> Option<PropValue> {
    let value = match value {
        AttrValue::Null => return None,
        AttrValue::Number(number) if number.is_nan() => return None,
        AttrValue::Number(number) => PropValue::Number(*number),
        AttrValue::Bool(flag) => PropValue::Bool(*flag),
        AttrValue::List(items) => {
            let separator = match kind {
                Kind::CommaSeparated => ", ",
                _ => " ",
            };
            PropValue::String(items.join(separator))
        }
        AttrValue::String(text) => match kind {
            Kind::Boolean => PropValue::Bool(true),
            Kind::OverloadedBoolean if text.is_empty() => PropValue::Bool(true),
            Kind::Number => match text.trim().parse::<f64>() {
                Ok(number) if number.is_finite() => PropValue::Number(number),
                _ => PropValue::String(text.clone()),
            },
            _ => PropValue::String(text.clone()),
        },
    };
    Some(value)
}
