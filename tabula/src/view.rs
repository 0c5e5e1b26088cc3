//! Pure derivation of the visible window: filter, sort, slice.

use crate::query::{Direction, QueryParams};
use crate::row::Row;

/// The derived window over the full collection.
#[derive(Debug, Clone, PartialEq)]
pub struct View<T> {
    /// Rows of the requested page, at most `per_page` of them, in
    /// display order.
    pub rows: Vec<T>,
    /// Row count after filtering and before slicing. Drives the page
    /// count and the page-selector visibility.
    pub total_count: usize,
}

impl<T> View<T> {
    /// A view with nothing in it.
    pub fn empty() -> Self {
        Self {
            rows: Vec::new(),
            total_count: 0,
        }
    }
}

impl<T: Row> View<T> {
    /// Ids of the rows on this page, in display order.
    pub fn page_ids(&self) -> Vec<String> {
        self.rows.iter().map(Row::id).collect()
    }
}

impl<T> Default for View<T> {
    fn default() -> Self {
        Self::empty()
    }
}

/// Derive the visible window from the full collection and the query.
///
/// Stateless and recomputed from scratch on every call: keep rows whose
/// search text contains the keyword (case-sensitive), stable-sort by the
/// string projection of the sort field, then slice out the requested
/// page. `total_count` is measured before slicing. A page index past the
/// end yields empty `rows`, never an error.
pub fn derive<T: Row>(rows: &[T], params: &QueryParams) -> View<T> {
    let mut matched: Vec<&T> = match params.keyword.as_deref() {
        Some(keyword) if !keyword.is_empty() => rows
            .iter()
            .filter(|row| row.search_text().contains(keyword))
            .collect(),
        _ => rows.iter().collect(),
    };

    // Missing projections compare as empty strings, so sorting on an
    // unknown field keeps the filtered order.
    matched.sort_by(|a, b| {
        let a_key = a.sort_key(&params.sort.field).unwrap_or_default();
        let b_key = b.sort_key(&params.sort.field).unwrap_or_default();
        match params.sort.direction {
            Direction::Asc => a_key.cmp(&b_key),
            Direction::Desc => b_key.cmp(&a_key),
        }
    });

    let total_count = matched.len();
    let start = params.page.page.saturating_mul(params.page.per_page);
    let rows = matched
        .into_iter()
        .skip(start)
        .take(params.page.per_page)
        .cloned()
        .collect();

    View { rows, total_count }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::query::{PageSpec, QueryParams, SortSpec};

    #[derive(Debug, Clone, PartialEq)]
    struct Doc {
        id: String,
        title: String,
        rank: String,
    }

    impl Row for Doc {
        fn id(&self) -> String {
            self.id.clone()
        }

        fn search_text(&self) -> String {
            self.title.clone()
        }

        fn sort_key(&self, field: &str) -> Option<String> {
            match field {
                "title" => Some(self.title.clone()),
                "rank" => Some(self.rank.clone()),
                _ => None,
            }
        }
    }

    fn doc(id: &str, title: &str, rank: &str) -> Doc {
        Doc {
            id: id.to_string(),
            title: title.to_string(),
            rank: rank.to_string(),
        }
    }

    fn docs() -> Vec<Doc> {
        vec![
            doc("1", "alpha report", "03"),
            doc("2", "Beta report", "01"),
            doc("3", "gamma notes", "02"),
            doc("4", "alpha summary", "01"),
        ]
    }

    fn params() -> QueryParams {
        QueryParams {
            keyword: None,
            filter: None,
            sort: SortSpec::asc("rank"),
            page: PageSpec { page: 0, per_page: 10 },
        }
    }

    fn ids<T: Row>(view: &View<T>) -> Vec<String> {
        view.page_ids()
    }

    #[test]
    fn test_no_keyword_keeps_every_row() {
        let view = derive(&docs(), &params());
        assert_eq!(view.total_count, 4);
        assert_eq!(view.rows.len(), 4);
    }

    #[test]
    fn test_keyword_is_case_sensitive_substring() {
        let mut p = params();
        p.keyword = Some("alpha".to_string());
        let view = derive(&docs(), &p);
        assert_eq!(ids(&view), ["4", "1"]);

        // "Beta" does not match "beta".
        p.keyword = Some("beta".to_string());
        let view = derive(&docs(), &p);
        assert_eq!(view.total_count, 0);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_ties_keep_filtered_order() {
        let view = derive(&docs(), &params());
        // rank 01 twice: doc 2 before doc 4, their original order.
        assert_eq!(ids(&view), ["2", "4", "3", "1"]);
    }

    #[test]
    fn test_descending_reverses_comparisons_only() {
        let mut p = params();
        p.sort = SortSpec::desc("rank");
        let view = derive(&docs(), &p);
        // The tie on rank 01 stays in original order even descending.
        assert_eq!(ids(&view), ["1", "3", "2", "4"]);
    }

    #[test]
    fn test_unknown_sort_field_keeps_filtered_order() {
        let mut p = params();
        p.sort = SortSpec::asc("nonexistent");
        let view = derive(&docs(), &p);
        assert_eq!(ids(&view), ["1", "2", "3", "4"]);
    }

    #[test]
    fn test_total_count_measured_before_slicing() {
        let rows: Vec<Doc> = (0..23)
            .map(|n| doc(&n.to_string(), &format!("item {n:02}"), "00"))
            .collect();
        let mut p = params();
        p.page = PageSpec { page: 2, per_page: 10 };
        let view = derive(&rows, &p);
        assert_eq!(view.total_count, 23);
        assert_eq!(view.rows.len(), 3);
    }

    #[test]
    fn test_page_past_the_end_is_empty_not_an_error() {
        let mut p = params();
        p.page = PageSpec { page: 7, per_page: 10 };
        let view = derive(&docs(), &p);
        assert_eq!(view.total_count, 4);
        assert!(view.rows.is_empty());
    }

    #[test]
    fn test_last_page_holds_the_remainder() {
        for per_page in [10, 25, 50] {
            let rows: Vec<Doc> = (0..23)
                .map(|n| doc(&n.to_string(), "row", "00"))
                .collect();
            let pages = 23usize.div_ceil(per_page);
            let mut p = params();
            for page in 0..pages {
                p.page = PageSpec { page, per_page };
                let view = derive(&rows, &p);
                assert!(!view.rows.is_empty());
                assert!(view.rows.len() <= per_page);
                if page + 1 < pages {
                    assert_eq!(view.rows.len(), per_page);
                }
            }
        }
    }

    #[test]
    fn test_filter_then_sort_then_slice() {
        let rows = vec![
            doc("1", "task one", "05"),
            doc("2", "note", "04"),
            doc("3", "task two", "03"),
            doc("4", "task three", "02"),
            doc("5", "task four", "01"),
        ];
        let p = QueryParams {
            keyword: Some("task".to_string()),
            filter: None,
            sort: SortSpec::asc("rank"),
            page: PageSpec { page: 1, per_page: 10 },
        };
        let view = derive(&rows, &p);
        // Four matches fit on one page, so page 1 is empty but the
        // total still reports the filtered count.
        assert_eq!(view.total_count, 4);
        assert!(view.rows.is_empty());
    }
}
