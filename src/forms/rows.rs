use super::escape::escape;
use crate::catalog::CatalogEntry;

/// Characters per visual row of a translation textarea.
pub const DEFAULT_CHARS_PER_ROW: usize = 40;

/// Something whose text sizes a textarea: a catalog entry (its `msgid`)
/// or a bare string.
pub trait RowText {
    fn row_text(&self) -> &str;
}

impl RowText for CatalogEntry {
    fn row_text(&self) -> &str {
        &self.msgid
    }
}

impl RowText for str {
    fn row_text(&self) -> &str {
        self
    }
}

impl RowText for String {
    fn row_text(&self) -> &str {
        self
    }
}

/// Estimate how many rows a textarea needs to show `source` without scrolling.
///
/// ```
/// use transkit::forms::calculate_rows;
///
/// assert_eq!(calculate_rows(""), 1);
/// assert_eq!(calculate_rows(&"x".repeat(85)), 3);
/// ```
pub fn calculate_rows<T: RowText + ?Sized>(source: &T) -> usize {
    calculate_rows_with(source, DEFAULT_CHARS_PER_ROW)
}

/// [`calculate_rows`] with a custom row width.
///
/// The text is escaped first and each escaped `\n` marker becomes a
/// `<br />` plus a real line break, so the marker counts toward the width
/// of the line it ends.
pub fn calculate_rows_with<T: RowText + ?Sized>(source: &T, chars_per_row: usize) -> usize {
    let chars_per_row = chars_per_row.max(1);
    let replacement = escape(source.row_text()).replace(r"\n", "<br />\n");
    replacement
        .split('\n')
        .map(|line| line.chars().count() / chars_per_row)
        .sum::<usize>()
        + 1
}
