//! Form field definitions and their HTML rendering.
//!
//! Fields are plain data so any template layer can consume them (they
//! serialize with `serde`); [`RenderField`] is the built-in HTML rendering.
//! `label` and `help_text` hold trusted markup built by the form builder,
//! every other string is escaped on output.

use enum_dispatch::enum_dispatch;
use indexmap::IndexMap;
use serde::Serialize;

use super::plural::{self, PluralFramingError};

/// Render a field under its form name.
#[enum_dispatch]
pub trait RenderField {
    fn render(&self, name: &str) -> String;
}

/// One entry of a translation form.
#[enum_dispatch(RenderField)]
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(tag = "kind", rename_all = "camelCase")]
pub enum Field {
    Message(MessageField),
    Plural(PluralMessageField),
    Hidden(HiddenField),
    Boolean(BooleanField),
}

/// Single-value translation textarea.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MessageField {
    pub label: String,
    pub help_text: String,
    pub initial: String,
    pub attrs: IndexMap<String, String>,
}

/// Composite textarea set, one sub-field per plural form.
#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct PluralMessageField {
    pub label: String,
    pub help_text: String,
    /// Label of every sub-field (the escaped `msgid_plural`).
    pub sub_label: String,
    /// One initial value per plural form, in plural index order.
    pub initial: Vec<String>,
    pub attrs: IndexMap<String, String>,
}

impl PluralMessageField {
    pub fn sub_field_count(&self) -> usize {
        self.initial.len()
    }

    /// Form name of the `index`-th sub-field.
    pub fn sub_field_name(name: &str, index: usize) -> String {
        format!("{}_{}", name, index)
    }

    /// Split a posted composite value into one string per plural form.
    pub fn decompress(value: Option<&str>) -> Result<Vec<String>, PluralFramingError> {
        plural::decompress(value)
    }
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct HiddenField {
    pub initial: String,
}

#[derive(Debug, Clone, Default, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct BooleanField {
    pub initial: bool,
    /// Rendered as a hidden input instead of a checkbox.
    pub hidden: bool,
}

impl RenderField for MessageField {
    fn render(&self, name: &str) -> String {
        let mut html = render_label(name, &self.label);
        html.push_str(&format!(
            r#"<textarea name="{name}" id="id_{name}"{}>{}</textarea>"#,
            render_attrs(&self.attrs),
            html_escape(&self.initial),
        ));
        html.push_str(&render_help(&self.help_text));
        html
    }
}

impl RenderField for PluralMessageField {
    fn render(&self, name: &str) -> String {
        let mut html = render_label(name, &self.label);
        for (index, initial) in self.initial.iter().enumerate() {
            let sub_name = Self::sub_field_name(name, index);
            html.push_str(&format!(
                r#"<textarea name="{sub_name}" id="id_{sub_name}" title="{}"{}>{}</textarea>"#,
                html_escape(&self.sub_label),
                render_attrs(&self.attrs),
                html_escape(initial),
            ));
        }
        html.push_str(&render_help(&self.help_text));
        html
    }
}

impl RenderField for HiddenField {
    fn render(&self, name: &str) -> String {
        format!(
            r#"<input type="hidden" name="{name}" id="id_{name}" value="{}">"#,
            html_escape(&self.initial)
        )
    }
}

impl RenderField for BooleanField {
    fn render(&self, name: &str) -> String {
        if self.hidden {
            format!(
                r#"<input type="hidden" name="{name}" id="id_{name}" value="{}">"#,
                if self.initial { "True" } else { "False" }
            )
        } else {
            format!(
                r#"<input type="checkbox" name="{name}" id="id_{name}"{}>"#,
                if self.initial { " checked" } else { "" }
            )
        }
    }
}

pub(crate) fn html_escape(input: &str) -> String {
    input
        .replace('&', "&amp;")
        .replace('<', "&lt;")
        .replace('>', "&gt;")
        .replace('"', "&quot;")
        .replace('\'', "&#x27;")
}

fn render_attrs(attrs: &IndexMap<String, String>) -> String {
    attrs
        .iter()
        .map(|(key, value)| format!(r#" {}="{}""#, key, html_escape(value)))
        .collect()
}

fn render_label(name: &str, label: &str) -> String {
    if label.is_empty() {
        String::new()
    } else {
        format!(r#"<label for="id_{name}">{label}</label>"#)
    }
}

fn render_help(help_text: &str) -> String {
    if help_text.is_empty() {
        String::new()
    } else {
        format!(r#"<span class="helptext">{help_text}</span>"#)
    }
}
