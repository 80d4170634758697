// src/ui/icons.rs
//! Icon mappings for rows in the browser.

use crate::{
    app::{ListRow, MenuItem},
    browse::PageEntry,
    fs::{guess_from_name, FileCategory},
};

/// Icon for a file of the given category.
pub fn icon_for_category(category: FileCategory) -> &'static str {
    match category {
        FileCategory::Audio => "\u{f1c7}",
        FileCategory::Image => "\u{f1c5}",
        FileCategory::Video => "\u{f1c8}",
        FileCategory::Document => "\u{f15c}",
        FileCategory::Archive => "\u{f1c6}",
        FileCategory::Binary => "\u{f016}",
    }
}

/// Get the appropriate icon for a list row.
pub fn icon_for_row(row: &ListRow) -> &'static str {
    match row {
        ListRow::Entry(PageEntry::Drive(_)) => "\u{f0a0}",
        ListRow::Entry(PageEntry::Up) => "\u{f062}",
        ListRow::Entry(PageEntry::PreviousPage) => "\u{f053}",
        ListRow::Entry(PageEntry::NextPage) => "\u{f054}",
        ListRow::Entry(PageEntry::Folder(_)) => "\u{f07b}",
        ListRow::Entry(PageEntry::File(name)) => icon_for_category(guess_from_name(name).category),
        ListRow::Menu(MenuItem::Back) => "\u{f060}",
        ListRow::Menu(MenuItem::Send) => "\u{f1d8}",
        ListRow::Menu(MenuItem::Delete) => "\u{f1f8}",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn files_use_their_category_icon() {
        let row = ListRow::Entry(PageEntry::File("song.mp3".into()));
        assert_eq!(icon_for_row(&row), icon_for_category(FileCategory::Audio));
        let folder = ListRow::Entry(PageEntry::Folder("song.mp3".into()));
        assert_eq!(icon_for_row(&folder), "\u{f07b}");
    }
}
