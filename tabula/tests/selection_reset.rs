use tabula::query::QueryState;
use tabula::selection::SelectionSet;

fn ids(list: &[&str]) -> Vec<String> {
    list.iter().map(|s| s.to_string()).collect()
}

#[test]
fn test_toggle_flips_membership() {
    let selection = SelectionSet::new();
    assert!(!selection.is_dirty());

    selection.toggle("a");
    assert!(selection.contains("a"));
    assert!(selection.is_dirty());

    selection.clear_dirty();
    selection.toggle("a");
    assert!(!selection.contains("a"));
    assert!(selection.is_empty());
}

#[test]
fn test_page_flags_follow_the_page() {
    let selection = SelectionSet::new();
    let page = ids(&["a", "b", "c"]);

    let flags = selection.page_flags(&page);
    assert!(!flags.all);
    assert!(!flags.some);

    selection.toggle("a");
    let flags = selection.page_flags(&page);
    assert!(!flags.all);
    assert!(flags.some);

    selection.toggle("b");
    selection.toggle("c");
    let flags = selection.page_flags(&page);
    assert!(flags.all);
    assert!(!flags.some);
}

#[test]
fn test_empty_page_never_reports_all() {
    let selection = SelectionSet::new();
    let flags = selection.page_flags(&[]);
    assert!(!flags.all);
    assert!(!flags.some);
}

#[test]
fn test_page_wide_set_touches_only_that_page() {
    let selection = SelectionSet::new();
    selection.toggle("elsewhere");

    selection.set_page_selected(&ids(&["a", "b"]), true);
    assert_eq!(selection.len(), 3);

    selection.set_page_selected(&ids(&["a", "b"]), false);
    assert_eq!(selection.len(), 1);
    assert!(selection.contains("elsewhere"));
}

#[test]
fn test_reshaping_mutations_clear_a_bound_selection() {
    let scenarios: Vec<(&str, Box<dyn Fn(&QueryState)>)> = vec![
        ("keyword", Box::new(|q| q.set_keyword("abc"))),
        ("filter", Box::new(|q| q.set_filter(Some("admin".to_string())))),
        ("sort field", Box::new(|q| q.set_sort("title"))),
        ("sort direction", Box::new(|q| q.set_sort("created_at"))),
        ("per page", Box::new(|q| {
            q.set_per_page(25);
        })),
    ];

    for (label, mutate) in scenarios {
        let query = QueryState::new("created_at");
        let selection = SelectionSet::new();
        selection.bind(&query);

        selection.toggle("a");
        selection.toggle("b");
        assert_eq!(selection.len(), 2);

        mutate(&query);
        assert!(selection.is_empty(), "{label} change should clear the selection");
    }
}

#[test]
fn test_page_moves_leave_a_bound_selection_alone() {
    let query = QueryState::new("created_at");
    let selection = SelectionSet::new();
    selection.bind(&query);

    selection.toggle("a");
    query.set_page(4);
    query.set_page(0);

    assert!(selection.contains("a"));
    assert_eq!(selection.len(), 1);
}

#[test]
fn test_unbound_selection_ignores_query_changes() {
    let query = QueryState::new("created_at");
    let selection = SelectionSet::new();

    selection.toggle("a");
    query.set_keyword("abc");

    assert!(selection.contains("a"));
}

#[test]
fn test_clones_share_one_selection() {
    let selection = SelectionSet::new();
    let other = selection.clone();
    selection.toggle("a");
    assert!(other.contains("a"));
    other.clear();
    assert!(selection.is_empty());
}
