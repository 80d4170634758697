// src/browse.rs
//! Paginated directory browsing.
//!
//! Directory cursors only move forward, so a page is rebuilt by reopening the
//! directory and skipping the entries that earlier pages already showed.
//! `shown_entry_count` is the only position record kept between pages.

use log::{debug, warn};

use crate::{
    config::{FN_MAX_LEN, PAGE_SIZE, PATH_MAX_LEN},
    error::{FilesError, Result},
    fs::{drive_root, join_path, path_parent, DirCursor, DirEntry, FileSystem},
};

/// Browse position of one applet instance.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct BrowseState {
    /// Directory being listed; empty means the drive list
    pub current_path: String,
    /// File chosen for the action menu
    pub selected_file: String,
    /// Entries of `current_path` rendered by this and all earlier pages
    pub shown_entry_count: usize,
}

impl BrowseState {
    pub fn new() -> Self {
        Self::default()
    }

    /// Restart the listing of the current directory from its first page.
    pub fn rewind(&mut self) {
        self.shown_entry_count = 0;
    }

    pub fn go_up(&mut self) {
        self.current_path = path_parent(&self.current_path);
        self.selected_file.clear();
        self.shown_entry_count = 0;
    }

    pub fn enter_drive(&mut self, letter: char) {
        self.current_path = drive_root(letter);
        self.selected_file.clear();
        self.shown_entry_count = 0;
    }

    /// Descend into `name`. The state is unchanged if the new path is too long.
    pub fn enter_folder(&mut self, name: &str) -> Result<()> {
        let path = join_path(&self.current_path, name);
        if path.len() > PATH_MAX_LEN {
            return Err(FilesError::PathTooLong {
                len: path.len(),
                max: PATH_MAX_LEN,
            });
        }
        self.current_path = path;
        self.selected_file.clear();
        self.shown_entry_count = 0;
        Ok(())
    }

    /// The next page needs no bookkeeping: the counter already sits on the boundary.
    pub fn next_page(&mut self) {}

    pub fn previous_page(&mut self) {
        self.shown_entry_count = previous_page_offset(self.shown_entry_count, PAGE_SIZE);
    }

    pub fn select_file(&mut self, name: &str) -> Result<()> {
        if name.len() > FN_MAX_LEN {
            return Err(FilesError::PathTooLong {
                len: name.len(),
                max: FN_MAX_LEN,
            });
        }
        self.selected_file = name.to_string();
        Ok(())
    }

    /// Leave the file action menu and list the directory from the top.
    pub fn back_to_listing(&mut self) {
        self.shown_entry_count = 0;
    }

    /// Full path of the selected file.
    pub fn selected_path(&self) -> String {
        join_path(&self.current_path, &self.selected_file)
    }
}

/// Counter value that makes the next page load show the previous page.
///
/// The counter points past the page on screen, so stepping back one page
/// means re-reading from two pages before it. A partial last page is rounded
/// down to its own start first.
pub fn previous_page_offset(shown: usize, page_size: usize) -> usize {
    if shown <= 2 * page_size {
        0
    } else if shown % page_size == 0 {
        shown - 2 * page_size
    } else {
        (shown / page_size - 1) * page_size
    }
}

/// One row of the browser list.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum PageEntry {
    Drive(char),
    Up,
    PreviousPage,
    Folder(String),
    File(String),
    NextPage,
}

impl PageEntry {
    pub fn label(&self) -> String {
        match self {
            PageEntry::Drive(letter) => letter.to_string(),
            PageEntry::Up => "Up".to_string(),
            PageEntry::PreviousPage => "Previous page".to_string(),
            PageEntry::Folder(name) | PageEntry::File(name) => name.clone(),
            PageEntry::NextPage => "Next page".to_string(),
        }
    }

    /// True for folders and files, false for navigation rows.
    pub fn is_real(&self) -> bool {
        matches!(self, PageEntry::Folder(_) | PageEntry::File(_))
    }
}

/// Rows of one rendered page.
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct Page {
    pub entries: Vec<PageEntry>,
}

impl Page {
    pub fn real_entries(&self) -> usize {
        self.entries.iter().filter(|e| e.is_real()).count()
    }

    pub fn has_next(&self) -> bool {
        self.entries.last() == Some(&PageEntry::NextPage)
    }
}

/// Build the page for `state`, advancing `shown_entry_count` past the rows emitted.
///
/// On error the counter is left untouched.
pub fn load_page<F: FileSystem>(fs: &F, state: &mut BrowseState) -> Result<Page> {
    if state.current_path.is_empty() {
        let entries = fs.volumes().into_iter().map(PageEntry::Drive).collect();
        return Ok(Page { entries });
    }

    let path = state.current_path.as_str();
    let unreadable = || FilesError::DirectoryUnreadable {
        path: path.to_string(),
    };

    let mut dir = fs.open_dir(path).map_err(|e| {
        warn!("open_dir {path} failed: {e}");
        unreadable()
    })?;

    let mut entries = vec![PageEntry::Up];
    if state.shown_entry_count != 0 {
        entries.push(PageEntry::PreviousPage);
    }

    for skipped in 0..state.shown_entry_count {
        match dir.read_entry() {
            Ok(raw) if !raw.is_empty() => {}
            Ok(_) => {
                warn!("{path} ended after {skipped} of {} entries", state.shown_entry_count);
                return Err(unreadable());
            }
            Err(e) => {
                warn!("skipping entries of {path} failed: {e}");
                return Err(unreadable());
            }
        }
    }

    let mut shown = state.shown_entry_count;
    let mut on_page = 0;
    loop {
        let raw = dir.read_entry().map_err(|e| {
            warn!("reading {path} failed: {e}");
            unreadable()
        })?;
        let Some(entry) = DirEntry::decode(&raw) else {
            break;
        };

        shown += 1;
        on_page += 1;
        entries.push(match entry {
            DirEntry::Folder(name) => PageEntry::Folder(name),
            DirEntry::File(name) => PageEntry::File(name),
        });

        if on_page == PAGE_SIZE {
            entries.push(PageEntry::NextPage);
            break;
        }
    }

    debug!("page of {path}: {on_page} entries, {shown} shown so far");
    state.shown_entry_count = shown;
    Ok(Page { entries })
}
