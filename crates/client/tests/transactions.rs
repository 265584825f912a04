use api_types::transaction::{
    Account, Category, CategoryType, SortOrder, Transaction, TransactionPage,
};
use chrono::{DateTime, Utc};
use client::{ClientError, ListQuery, TransactionList, TypeFilter};

fn when(day: u32) -> DateTime<Utc> {
    format!("2025-06-{day:02}T12:00:00Z").parse().unwrap()
}

fn tx(id: i64, kind: CategoryType) -> Transaction {
    Transaction {
        id,
        description: format!("tx {id}"),
        amount: if kind == CategoryType::Income { 100.0 } else { -25.5 },
        date: when(1),
        category: Category {
            id: 1,
            name: "Misc".to_string(),
            kind,
            icon: None,
            color: "#888888".to_string(),
        },
        account: Account {
            id: 1,
            name: "Checking".to_string(),
            kind: "BANK".to_string(),
        },
        is_recurring: false,
        created_at: when(1),
        updated_at: when(1),
    }
}

fn expenses(ids: &[i64]) -> Vec<Transaction> {
    ids.iter().map(|id| tx(*id, CategoryType::Expense)).collect()
}

fn page(ids: &[i64], next: Option<&str>) -> TransactionPage {
    TransactionPage {
        results: expenses(ids),
        next: next.map(str::to_string),
    }
}

fn ids(list: &TransactionList) -> Vec<i64> {
    list.items().iter().map(|t| t.id).collect()
}

#[test]
fn next_page_is_noop_before_first_load_and_at_list_end() {
    let mut list = TransactionList::default();
    assert!(list.start_next_page().is_none());

    let req = list.start_first_page();
    list.apply(&req, Ok(page(&[1, 2], None))).unwrap();
    assert!(!list.has_next());

    // Repeated load-more calls at the end issue no request and change nothing.
    for _ in 0..3 {
        assert!(list.start_next_page().is_none());
    }
    assert_eq!(ids(&list), vec![1, 2]);
}

#[test]
fn overlapping_pages_are_deduplicated_by_id() {
    let mut list = TransactionList::default();

    let req = list.start_first_page();
    list.apply(&req, Ok(page(&[1, 2, 3], Some("page=2")))).unwrap();
    assert!(list.has_next());

    let req = list.start_next_page().unwrap();
    assert_eq!(req.params().page, 2);
    list.apply(&req, Ok(page(&[3, 4, 5], None))).unwrap();

    assert_eq!(ids(&list), vec![1, 2, 3, 4, 5]);
    assert!(!list.has_next());
}

#[test]
fn client_filter_is_pure_and_reversible() {
    let mut list = TransactionList::default();
    let req = list.start_first_page();
    let mut results = expenses(&[1, 3]);
    results.insert(1, tx(2, CategoryType::Income));
    list.apply(
        &req,
        Ok(TransactionPage {
            results,
            next: None,
        }),
    )
    .unwrap();

    let before: Vec<i64> = list.visible().iter().map(|t| t.id).collect();
    assert_eq!(before, vec![1, 2, 3]);

    list.set_filter(TypeFilter::Income);
    assert_eq!(list.visible().iter().map(|t| t.id).collect::<Vec<_>>(), vec![2]);

    list.set_filter(TypeFilter::Expense);
    assert_eq!(
        list.visible().iter().map(|t| t.id).collect::<Vec<_>>(),
        vec![1, 3]
    );

    // Back to `all`: the exact same visible set as before filtering.
    list.set_filter(TypeFilter::All);
    assert_eq!(list.visible().iter().map(|t| t.id).collect::<Vec<_>>(), before);
    assert_eq!(ids(&list), vec![1, 2, 3]);
}

#[test]
fn first_page_replaces_accumulated_pages() {
    let mut list = TransactionList::default();
    let req = list.start_first_page();
    list.apply(&req, Ok(page(&[1, 2], Some("page=2")))).unwrap();
    let req = list.start_next_page().unwrap();
    list.apply(&req, Ok(page(&[3, 4], Some("page=3")))).unwrap();
    assert_eq!(ids(&list), vec![1, 2, 3, 4]);

    let req = list.start_first_page();
    list.apply(&req, Ok(page(&[7, 8], Some("page=2")))).unwrap();
    assert_eq!(ids(&list), vec![7, 8]);
    assert!(list.has_next());
}

#[test]
fn two_page_walk_accumulates_in_server_order() {
    let mut list = TransactionList::default();

    let req = list.start_first_page();
    assert_eq!(req.params().page, 1);
    list.apply(&req, Ok(page(&[1, 2, 3], Some("page=2")))).unwrap();
    assert_eq!(ids(&list), vec![1, 2, 3]);

    let req = list.start_next_page().unwrap();
    list.apply(&req, Ok(page(&[3, 4, 5], None))).unwrap();

    assert_eq!(ids(&list), vec![1, 2, 3, 4, 5]);
    assert!(!list.has_next());
    assert!(list.start_next_page().is_none());
}

#[test]
fn query_changes_reset_and_noop_when_unchanged() {
    let mut list = TransactionList::default();
    let req = list.start_first_page();
    list.apply(&req, Ok(page(&[1, 2], Some("page=2")))).unwrap();

    // A changed search issues exactly one first-page reset.
    let req = list.set_search("coffee").expect("changed search must refetch");
    assert_eq!(req.params().page, 1);
    assert_eq!(req.params().search, "coffee");
    list.apply(&req, Ok(page(&[9], None))).unwrap();
    assert_eq!(ids(&list), vec![9]);

    // Same value again: no request.
    assert!(list.set_search("coffee").is_none());

    let req = list.set_sort(SortOrder::AmountDesc).expect("changed sort must refetch");
    assert_eq!(req.params().ordering, SortOrder::AmountDesc);
    assert!(list.set_sort(SortOrder::AmountDesc).is_none());
    list.apply(&req, Ok(page(&[5], None))).unwrap();
    assert_eq!(ids(&list), vec![5]);
}

#[test]
fn concurrent_next_page_calls_are_dropped_not_queued() {
    let mut list = TransactionList::default();
    let req = list.start_first_page();
    list.apply(&req, Ok(page(&[1], Some("page=2")))).unwrap();

    let first = list.start_next_page();
    assert!(first.is_some());
    assert!(list.is_in_flight());
    assert!(list.start_next_page().is_none());

    list.apply(&first.unwrap(), Ok(page(&[2], None))).unwrap();
    assert!(!list.is_in_flight());
    assert_eq!(ids(&list), vec![1, 2]);
}

#[test]
fn stale_page_response_is_dropped_after_reset() {
    let mut list = TransactionList::default();
    let req = list.start_first_page();
    list.apply(&req, Ok(page(&[1, 2], Some("page=2")))).unwrap();

    // A page-2 fetch goes out, then the query changes before it lands.
    let stale = list.start_next_page().unwrap();
    let fresh = list.set_search("rent").unwrap();

    // The slow stale response must not touch state reset by the new query.
    let applied = list.apply(&stale, Ok(page(&[3, 4], None))).unwrap();
    assert!(!applied);
    assert!(list.is_in_flight());
    assert_eq!(ids(&list), vec![1, 2]);

    let applied = list.apply(&fresh, Ok(page(&[10], None))).unwrap();
    assert!(applied);
    assert_eq!(ids(&list), vec![10]);
    assert!(!list.is_in_flight());
}

#[test]
fn refresh_supersedes_in_flight_next_page() {
    let mut list = TransactionList::new(ListQuery {
        search: String::new(),
        sort: SortOrder::DateDesc,
    });
    let req = list.start_first_page();
    list.apply(&req, Ok(page(&[1], Some("page=2")))).unwrap();

    let stale = list.start_next_page().unwrap();
    let refresh = list.start_refresh();

    assert!(!list.apply(&stale, Ok(page(&[2], None))).unwrap());
    assert!(list.apply(&refresh, Ok(page(&[1], Some("page=2")))).unwrap());
    assert_eq!(ids(&list), vec![1]);
    assert!(list.has_next());
}

#[test]
fn failed_fetch_leaves_accumulated_untouched() {
    let mut list = TransactionList::default();
    let req = list.start_first_page();
    list.apply(&req, Ok(page(&[1, 2], Some("page=2")))).unwrap();

    let req = list.start_next_page().unwrap();
    let err = list.apply(&req, Err(ClientError::Timeout)).unwrap_err();
    assert!(matches!(err, ClientError::Timeout));

    assert_eq!(ids(&list), vec![1, 2]);
    assert!(list.has_next());
    assert!(list.last_error().is_some());

    // The list recovers: the next successful fetch clears the error signal.
    let req = list.start_next_page().expect("fetch slot must be free again");
    list.apply(&req, Ok(page(&[3], None))).unwrap();
    assert!(list.last_error().is_none());
    assert_eq!(ids(&list), vec![1, 2, 3]);
}
