//! The HTML control rendered for each field kind.

use std::collections::BTreeMap;
use std::fmt::Write as _;

use crate::field::FieldKind;

/// HTML attributes of a control, rendered in name order.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Attrs(BTreeMap<&'static str, String>);

impl Attrs {
    /// Creates an empty attribute set.
    pub fn new() -> Self {
        Self::default()
    }

    /// Sets an attribute, replacing any previous value.
    pub fn set(&mut self, name: &'static str, value: impl Into<String>) {
        self.0.insert(name, value.into());
    }

    /// Builder form of [`Attrs::set`].
    #[must_use]
    pub fn with(mut self, name: &'static str, value: impl Into<String>) -> Self {
        self.set(name, value);
        self
    }

    fn write_to(&self, out: &mut String) {
        for (name, value) in &self.0 {
            // Writing to a String cannot fail.
            let _ = write!(out, r#" {name}="{}""#, escape(value));
        }
    }
}

/// A form control.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Control {
    /// `<input type="...">`.
    Input(&'static str),
    /// `<textarea>` with a visible row count.
    Textarea(usize),
}

impl Control {
    /// Rows shown by the message box.
    pub const TEXTAREA_ROWS: usize = 5;

    /// Returns the control for a field kind.
    pub fn for_kind(kind: FieldKind) -> Self {
        match kind {
            FieldKind::Textarea => Self::Textarea(Self::TEXTAREA_ROWS),
            FieldKind::Text | FieldKind::Email => Self::Input(kind.input_type()),
        }
    }

    /// Renders the control with its current value.
    ///
    /// Empty values are left out of `<input>` markup.
    pub fn render(self, name: &str, value: &str, attrs: &Attrs) -> String {
        let mut out = String::new();
        match self {
            Self::Input(input_type) => {
                let _ = write!(out, r#"<input type="{input_type}" name="{}""#, escape(name));
                if !value.is_empty() {
                    let _ = write!(out, r#" value="{}""#, escape(value));
                }
                attrs.write_to(&mut out);
                out.push('>');
            }
            Self::Textarea(rows) => {
                let _ = write!(out, r#"<textarea name="{}" rows="{rows}""#, escape(name));
                attrs.write_to(&mut out);
                let _ = write!(out, ">{}</textarea>", escape(value));
            }
        }
        out
    }
}

/// Escapes text for use in HTML content and attribute values.
pub fn escape(s: &str) -> String {
    let mut out = String::with_capacity(s.len());
    for c in s.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#x27;"),
            c => out.push(c),
        }
    }
    out
}
