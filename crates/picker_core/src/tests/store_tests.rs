use std::num::NonZeroUsize;

use shared::{domain::FileHandle, error::RejectionReason};

use super::SelectionStore;

fn jpg(name: &str) -> FileHandle {
    FileHandle::new(name, "image/jpeg", vec![0xff, 0xd8])
}

fn png(name: &str) -> FileHandle {
    FileHandle::new(name, "image/png", vec![0x89, 0x50])
}

fn txt(name: &str) -> FileHandle {
    FileHandle::new(name, "text/plain", b"hello".to_vec())
}

fn names(store: &SelectionStore) -> Vec<&str> {
    store.selection().iter().map(|f| f.name()).collect()
}

#[test]
fn replace_commits_within_cap_image_only_candidates() {
    let mut store = SelectionStore::new(NonZeroUsize::new(5));
    let candidate = vec![jpg("a.jpg"), png("b.png")];
    let ids: Vec<_> = candidate.iter().map(|f| f.id()).collect();

    let committed = store.replace(candidate).expect("accepted");
    let committed_ids: Vec<_> = committed.iter().map(|f| f.id()).collect();
    assert_eq!(committed_ids, ids);
    assert_eq!(names(&store), ["a.jpg", "b.png"]);
}

#[test]
fn replace_rejects_over_cap_and_keeps_prior_selection() {
    let mut store = SelectionStore::new(NonZeroUsize::new(2));
    let err = store
        .replace(vec![jpg("a.jpg"), jpg("b.jpg"), jpg("c.jpg")])
        .expect_err("over cap");
    assert_eq!(err, RejectionReason::TooManyFiles { limit: 2 });
    assert!(store.selection().is_empty());
}

#[test]
fn replace_rejects_non_image_entry_regardless_of_count() {
    let mut store = SelectionStore::new(NonZeroUsize::new(5));
    store
        .replace(vec![jpg("keep.jpg")])
        .expect("initial selection");

    let err = store
        .replace(vec![jpg("a.jpg"), png("b.png"), txt("c.txt")])
        .expect_err("non-image entry");
    assert_eq!(
        err,
        RejectionReason::InvalidFileType {
            name: "c.txt".into()
        }
    );
    // Rejection is atomic: the prior selection is untouched.
    assert_eq!(names(&store), ["keep.jpg"]);
}

#[test]
fn count_check_runs_before_type_check() {
    let mut store = SelectionStore::new(NonZeroUsize::new(1));
    let err = store
        .replace(vec![txt("a.txt"), txt("b.txt")])
        .expect_err("rejected");
    assert_eq!(err, RejectionReason::TooManyFiles { limit: 1 });
}

#[test]
fn replace_without_cap_accepts_any_count() {
    let mut store = SelectionStore::new(None);
    let candidate: Vec<_> = (0..50).map(|i| jpg(&format!("{i}.jpg"))).collect();
    store.replace(candidate).expect("unbounded");
    assert_eq!(store.selection().len(), 50);
}

#[test]
fn duplicate_handles_are_permitted() {
    // Matching native multi-select: no duplicate-identity invariant.
    let mut store = SelectionStore::new(None);
    let file = jpg("same.jpg");
    store
        .replace(vec![file.clone(), file.clone()])
        .expect("duplicates allowed");
    assert_eq!(store.selection().len(), 2);
    assert_eq!(store.selection()[0], store.selection()[1]);
}

#[test]
fn remove_at_preserves_order_of_remaining_entries() {
    let mut store = SelectionStore::new(None);
    store
        .replace(vec![jpg("a.jpg"), jpg("b.jpg"), jpg("c.jpg")])
        .expect("selection");

    store.remove_at(1);
    assert_eq!(names(&store), ["a.jpg", "c.jpg"]);
}

#[test]
fn remove_at_out_of_range_is_a_noop() {
    let mut store = SelectionStore::new(None);
    store
        .replace(vec![jpg("a.jpg"), jpg("b.jpg")])
        .expect("selection");

    store.remove_at(2);
    store.remove_at(usize::MAX);
    assert_eq!(names(&store), ["a.jpg", "b.jpg"]);
}

#[test]
fn clear_is_idempotent() {
    let mut store = SelectionStore::new(None);
    store
        .replace(vec![jpg("a.jpg"), jpg("b.jpg")])
        .expect("selection");

    assert!(store.clear().is_empty());
    assert!(store.clear().is_empty());
}

#[test]
fn tightening_cap_truncates_to_first_entries() {
    let mut store = SelectionStore::new(None);
    store
        .replace(vec![jpg("a.jpg"), jpg("b.jpg"), jpg("c.jpg")])
        .expect("selection");

    let truncated = store.set_max_uploads(NonZeroUsize::new(2));
    assert!(truncated);
    assert_eq!(names(&store), ["a.jpg", "b.jpg"]);
}

#[test]
fn loosening_or_clearing_cap_never_truncates() {
    let mut store = SelectionStore::new(NonZeroUsize::new(3));
    store
        .replace(vec![jpg("a.jpg"), jpg("b.jpg"), jpg("c.jpg")])
        .expect("selection");

    assert!(!store.set_max_uploads(NonZeroUsize::new(5)));
    assert!(!store.set_max_uploads(None));
    assert_eq!(store.selection().len(), 3);
}

#[test]
fn cap_applies_to_replacements_after_truncation() {
    let mut store = SelectionStore::new(None);
    store
        .replace(vec![jpg("a.jpg"), jpg("b.jpg"), jpg("c.jpg")])
        .expect("selection");
    store.set_max_uploads(NonZeroUsize::new(2));

    let err = store
        .replace(vec![jpg("x.jpg"), jpg("y.jpg"), jpg("z.jpg")])
        .expect_err("over the tightened cap");
    assert_eq!(err, RejectionReason::TooManyFiles { limit: 2 });
    assert_eq!(names(&store), ["a.jpg", "b.jpg"]);
}
