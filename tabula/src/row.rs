/// A record that can be browsed in a tabular view.
///
/// Implementors supply a stable unique id, the text the keyword filter
/// matches against, and a string projection for each sortable field.
///
/// # Example
///
/// ```ignore
/// #[derive(Clone)]
/// struct Ticket {
///     id: String,
///     subject: String,
///     opened_at: String,
/// }
///
/// impl Row for Ticket {
///     fn id(&self) -> String {
///         self.id.clone()
///     }
///
///     fn search_text(&self) -> String {
///         self.subject.clone()
///     }
///
///     fn sort_key(&self, field: &str) -> Option<String> {
///         match field {
///             "subject" => Some(self.subject.clone()),
///             "opened_at" => Some(self.opened_at.clone()),
///             _ => None,
///         }
///     }
/// }
/// ```
pub trait Row: Clone + Send + Sync + 'static {
    /// Unique identifier for this row.
    ///
    /// Ids must be unique across the whole collection. With duplicates,
    /// selection toggles become ambiguous and the browser does not
    /// detect it.
    fn id(&self) -> String;

    /// The text the keyword filter matches against, case-sensitively.
    fn search_text(&self) -> String;

    /// String projection of the given field, used by the sort comparator.
    ///
    /// Return `None` for unknown fields; the comparator treats missing
    /// values as empty strings, so rows keep their filtered order. The
    /// projection defines the ordering: emit zero-padded numbers or
    /// RFC 3339 timestamps where lexicographic order should match the
    /// underlying type's order.
    fn sort_key(&self, field: &str) -> Option<String>;
}
