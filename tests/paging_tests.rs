mod common;

use fileshuttle::browse::{load_page, BrowseState, PageEntry};
use fileshuttle::error::FilesError;
use common::drive_with_files;

fn files(range: std::ops::Range<usize>) -> Vec<PageEntry> {
    range.map(|i| PageEntry::File(format!("f{i:02}"))).collect()
}

fn at_drive() -> BrowseState {
    let mut state = BrowseState::new();
    state.enter_drive('U');
    state
}

#[test]
fn twenty_entries_page_forward_and_back() {
    let (_dir, drives) = drive_with_files(20);
    let mut state = at_drive();

    let first = load_page(&drives, &mut state).expect("first page");
    let mut expected = vec![PageEntry::Up];
    expected.extend(files(0..8));
    expected.push(PageEntry::NextPage);
    assert_eq!(first.entries, expected);
    assert_eq!(state.shown_entry_count, 8);

    state.next_page();
    let second = load_page(&drives, &mut state).expect("second page");
    let mut expected = vec![PageEntry::Up, PageEntry::PreviousPage];
    expected.extend(files(8..16));
    expected.push(PageEntry::NextPage);
    assert_eq!(second.entries, expected);
    assert_eq!(state.shown_entry_count, 16);

    state.next_page();
    let third = load_page(&drives, &mut state).expect("third page");
    let mut expected = vec![PageEntry::Up, PageEntry::PreviousPage];
    expected.extend(files(16..20));
    assert_eq!(third.entries, expected);
    assert!(!third.has_next());
    assert_eq!(state.shown_entry_count, 20);

    state.previous_page();
    assert_eq!(state.shown_entry_count, 8);
    let back = load_page(&drives, &mut state).expect("back to second");
    assert_eq!(back, second);

    state.previous_page();
    let start = load_page(&drives, &mut state).expect("back to first");
    assert_eq!(start, first);
}

#[test]
fn exactly_one_full_page_still_offers_next() {
    let (_dir, drives) = drive_with_files(8);
    let mut state = at_drive();

    let page = load_page(&drives, &mut state).expect("page");
    assert!(page.has_next());

    state.next_page();
    let empty = load_page(&drives, &mut state).expect("empty tail");
    assert_eq!(empty.entries, vec![PageEntry::Up, PageEntry::PreviousPage]);
}

#[test]
fn empty_directory_shows_only_up() {
    let (_dir, drives) = drive_with_files(0);
    let mut state = at_drive();
    let page = load_page(&drives, &mut state).expect("page");
    assert_eq!(page.entries, vec![PageEntry::Up]);
    assert_eq!(state.shown_entry_count, 0);
}

#[test]
fn shrinking_directory_fails_and_keeps_counter() {
    let (dir, drives) = drive_with_files(12);
    let mut state = at_drive();
    load_page(&drives, &mut state).expect("first page");

    for i in 0..10 {
        std::fs::remove_file(dir.path().join(format!("f{i:02}"))).expect("remove");
    }
    let err = load_page(&drives, &mut state).unwrap_err();
    assert!(matches!(err, FilesError::DirectoryUnreadable { .. }));
    assert_eq!(state.shown_entry_count, 8);
}

#[test]
fn missing_directory_is_unreadable() {
    let (_dir, drives) = drive_with_files(1);
    let mut state = at_drive();
    state.enter_folder("nowhere").expect("short path");
    let err = load_page(&drives, &mut state).unwrap_err();
    assert_eq!(err.to_string(), "Can not read the path U:/nowhere");
}
