//! Typed content elements.

use std::fmt::Write;

use xmltree::{Element, XMLNode};

use crate::material::TypedValue;

/// Render a typed value as `<tag name="...">text</tag>`.
///
/// Texture values get a nested `<img src="..."/>` instead of text and
/// increment `textures`.
pub fn render_content(value: &TypedValue, textures: &mut usize) -> Element {
    let mut element = Element::new(value.tag());
    element
        .attributes
        .insert("name".to_string(), value.name().to_string());

    let text = match value {
        TypedValue::Float { value, .. } => format_scalar(*value),
        TypedValue::Float3Array { values, .. } => format_float_tuples(values),
        TypedValue::Float2Array { values, .. } => format_float_tuples(values),
        TypedValue::IntArray { values, .. } => format_ints(values),
        TypedValue::Texture { source_uri, .. } => {
            let mut img = Element::new("img");
            img.attributes
                .insert("src".to_string(), source_uri.clone());
            element.children.push(XMLNode::Element(img));
            *textures += 1;
            String::new()
        }
    };

    if !text.is_empty() {
        element.children.push(XMLNode::Text(text));
    }
    element
}

/// Shortest decimal that reads back as `value`, always with a fractional
/// part (`0.5`, `50.0`).
pub fn format_scalar(value: f32) -> String {
    let mut text = value.to_string();
    if value.is_finite() && !text.contains('.') {
        text.push_str(".0");
    }
    text
}

/// Every component of every tuple with 6 fractional digits, each followed
/// by a space. Tuples are not delimited.
pub fn format_float_tuples<const N: usize>(values: &[[f32; N]]) -> String {
    let mut text = String::with_capacity(values.len() * N * 10);
    for tuple in values {
        for component in tuple {
            let _ = write!(text, "{component:.6} ");
        }
    }
    text
}

/// Space-separated base-10 integers.
pub fn format_ints(values: &[u32]) -> String {
    let mut text = String::with_capacity(values.len() * 4);
    for (i, value) in values.iter().enumerate() {
        if i > 0 {
            text.push(' ');
        }
        let _ = write!(text, "{value}");
    }
    text
}
