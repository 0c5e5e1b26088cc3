//! Column descriptors consumed by the rendering collaborator.

use std::fmt;
use std::sync::Arc;

/// Cell formatter: turns a row into display text for one column.
pub type CellFormat<T> = Arc<dyn Fn(&T) -> String + Send + Sync>;

/// A column definition.
///
/// `id` selects the row field (see `Row::sort_key`), `label` is the
/// header text. Both are opaque to the browser core; the column set is
/// resolved once when the browser is built and never changes afterwards.
pub struct Column<T> {
    /// Field selector on the row type.
    pub id: String,
    /// Header text.
    pub label: String,
    /// Whether the header toggles sorting. Only sortable column ids may
    /// be passed to `QueryState::set_sort`; that is the caller's
    /// contract, the store does not re-check it.
    pub sortable: bool,
    /// Optional display formatter. Absent means the renderer shows its
    /// own projection of the field.
    pub format: Option<CellFormat<T>>,
}

impl<T> Column<T> {
    /// Create a non-sortable column without a formatter.
    pub fn new(id: impl Into<String>, label: impl Into<String>) -> Self {
        Self {
            id: id.into(),
            label: label.into(),
            sortable: false,
            format: None,
        }
    }

    /// Mark this column as sortable.
    pub fn sortable(mut self) -> Self {
        self.sortable = true;
        self
    }

    /// Install a display formatter.
    pub fn with_format(mut self, format: impl Fn(&T) -> String + Send + Sync + 'static) -> Self {
        self.format = Some(Arc::new(format));
        self
    }

    /// Render one cell: the formatter when present, `fallback` otherwise.
    pub fn cell(&self, row: &T, fallback: impl FnOnce(&T) -> String) -> String {
        match &self.format {
            Some(format) => format(row),
            None => fallback(row),
        }
    }
}

impl<T> Clone for Column<T> {
    fn clone(&self) -> Self {
        Self {
            id: self.id.clone(),
            label: self.label.clone(),
            sortable: self.sortable,
            format: self.format.clone(),
        }
    }
}

impl<T> fmt::Debug for Column<T> {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.debug_struct("Column")
            .field("id", &self.id)
            .field("label", &self.label)
            .field("sortable", &self.sortable)
            .field("format", &self.format.is_some())
            .finish()
    }
}
