//! Storage framing for plural translations.
//!
//! A plural field works on `Vec<String>` everywhere; only when the forms have
//! to travel as one value are they framed as `<byte length>:<text>` runs.
//! Nothing inside a form can break the framing, so a translation may contain
//! any text at all.

use thiserror::Error;

#[derive(Debug, Clone, PartialEq, Eq, Error)]
pub enum PluralFramingError {
    #[error("missing length prefix at byte {offset}")]
    MissingLength { offset: usize },
    #[error("invalid length prefix {prefix:?} at byte {offset}")]
    InvalidLength { offset: usize, prefix: String },
    #[error("plural form at byte {offset} is truncated or splits a character")]
    Truncated { offset: usize },
}

/// Join plural forms into one stored value. No forms, no value.
///
/// ```
/// use transkit::forms::plural::{compress, decompress};
///
/// let stored = compress(&["un", "des #|# deux"]).unwrap();
/// assert_eq!(stored, "2:un12:des #|# deux");
/// assert_eq!(decompress(Some(&stored)).unwrap(), vec!["un", "des #|# deux"]);
/// ```
pub fn compress<S: AsRef<str>>(parts: &[S]) -> Option<String> {
    if parts.is_empty() {
        return None;
    }
    let mut out = String::new();
    for part in parts {
        let part = part.as_ref();
        out.push_str(&part.len().to_string());
        out.push(':');
        out.push_str(part);
    }
    Some(out)
}

/// Split a stored value back into its plural forms.
///
/// An absent or empty value gives a single empty form.
pub fn decompress(value: Option<&str>) -> Result<Vec<String>, PluralFramingError> {
    let value = match value {
        Some(v) if !v.is_empty() => v,
        _ => return Ok(vec![String::new()]),
    };

    let mut parts = Vec::new();
    let mut offset = 0;
    while offset < value.len() {
        let rest = &value[offset..];
        let colon = rest
            .find(':')
            .ok_or(PluralFramingError::MissingLength { offset })?;
        let prefix = &rest[..colon];
        let len = prefix
            .parse::<usize>()
            .map_err(|_| PluralFramingError::InvalidLength {
                offset,
                prefix: prefix.to_string(),
            })?;

        let start = offset + colon + 1;
        let part = start
            .checked_add(len)
            .and_then(|end| value.get(start..end))
            .ok_or(PluralFramingError::Truncated { offset: start })?;
        parts.push(part.to_string());
        offset = start + len;
    }
    Ok(parts)
}
