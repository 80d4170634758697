// src/app/state.rs
//! Applet state: browsing, the file action menu, transfers and lifecycle.

use std::time::{Duration, Instant};

use log::{debug, info};
use ratatui::{widgets::ListState, Frame};

use super::{notice::Notices, settings::SettingsPanel};
use crate::{
    browse::{load_page, BrowseState, PageEntry},
    config::{TransferSettings, FN_MAX_LEN, PATH_MAX_LEN},
    error::FilesError,
    fs::{detect_file_type, path_basename, FileSystem, FileType},
    transfer::{parse_request, MessageChannel, MessageKind, TransferEngine, TransferEvent},
    ui::{
        keybindings::NavigationAction,
        layout::{compute_layout, SectionVisibility},
        widgets::{render_file_list, render_settings_panel, render_shortcut, render_status_line},
    },
};

/// What the main list is showing.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum View {
    Browser,
    FileMenu,
}

/// Rows of the file action menu.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MenuItem {
    Back,
    Send,
    Delete,
}

impl MenuItem {
    pub fn label(self) -> &'static str {
        match self {
            MenuItem::Back => "Back",
            MenuItem::Send => "Send",
            MenuItem::Delete => "Delete",
        }
    }
}

/// One row of the main list. The row itself says what activating it does.
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ListRow {
    Entry(PageEntry),
    Menu(MenuItem),
}

impl ListRow {
    pub fn label(&self) -> String {
        match self {
            ListRow::Entry(entry) => entry.label(),
            ListRow::Menu(item) => item.label().to_string(),
        }
    }
}

/// How a row was activated.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Press {
    Release,
    Long,
}

/// One instance of the file applet.
pub struct FilesApp<F: FileSystem, C: MessageChannel> {
    /// Mounted drives
    pub fs: F,
    /// Where transmitted chunks go
    pub channel: C,
    /// Path, selected file and page position
    pub browse: BrowseState,
    /// Chunked sender and its periodic task
    pub transfer: TransferEngine<F::File>,
    /// Toast line
    pub notices: Notices,
    /// Rows of the main list
    pub rows: Vec<ListRow>,
    /// List widget state
    pub list_state: ListState,
    pub view: View,
    /// Section visibility (window, shortcut)
    pub visibility: SectionVisibility,
    /// Window title, the current path
    pub window_title: String,
    /// Shortcut label, present while the shortcut is open
    pub shortcut: Option<String>,
    /// Last known transfer percentage, for the shortcut gauge
    pub percent: Option<u8>,
    /// Send settings panel, when open
    pub settings_panel: Option<SettingsPanel>,
    /// Type of the file in the action menu
    pub file_info: Option<FileType>,
    /// Incoming message being typed
    pub prompt: Option<String>,
}

impl<F: FileSystem, C: MessageChannel> FilesApp<F, C> {
    /// Start the applet at the drive list with no window or shortcut.
    pub fn run(fs: F, channel: C, settings: TransferSettings) -> Self {
        Self {
            fs,
            channel,
            browse: BrowseState::new(),
            transfer: TransferEngine::new(settings),
            notices: Notices::new(),
            rows: Vec::new(),
            list_state: ListState::default(),
            view: View::Browser,
            visibility: SectionVisibility {
                window: false,
                shortcut: false,
            },
            window_title: String::new(),
            shortcut: None,
            percent: None,
            settings_panel: None,
            file_info: None,
            prompt: None,
        }
    }

    pub fn open_window(&mut self) {
        self.visibility.window = true;
        self.browse.rewind();
        self.window_title = self.browse.current_path.clone();
        self.settings_panel = None;
        self.load_listing();
    }

    /// Close the window. A running transfer is dropped without a final chunk.
    pub fn close_window(&mut self) {
        self.visibility.window = false;
        self.rows.clear();
        self.settings_panel = None;
        self.view = View::Browser;
        if self.transfer.cancel() {
            self.reset_shortcut();
        }
    }

    pub fn open_shortcut(&mut self) {
        self.visibility.shortcut = true;
        self.shortcut = Some(self.idle_label());
        if self.transfer.in_progress() {
            self.show_percent(self.percent);
        }
    }

    pub fn close_shortcut(&mut self) {
        self.visibility.shortcut = false;
        self.shortcut = None;
    }

    /// Shut the applet down. The periodic task is switched off and any open
    /// file closed.
    pub fn close(&mut self) {
        self.close_window();
        self.close_shortcut();
        info!("files applet closed");
    }

    pub fn selected_row(&self) -> Option<&ListRow> {
        self.list_state.selected().and_then(|i| self.rows.get(i))
    }

    /// Handle an input action. Returns true if the app should quit.
    pub fn on_action(&mut self, action: NavigationAction) -> bool {
        if self.prompt.is_some() {
            self.on_prompt_action(action);
            return false;
        }
        if self.settings_panel.is_some() {
            return self.on_settings_action(action);
        }

        match action {
            NavigationAction::ToggleSection(1) => {
                if self.visibility.window {
                    self.close_window();
                } else {
                    self.open_window();
                }
            }
            NavigationAction::ToggleSection(2) => {
                if self.visibility.shortcut {
                    self.close_shortcut();
                } else {
                    self.open_shortcut();
                }
            }
            NavigationAction::Down => self.move_selection(1),
            NavigationAction::Up => self.move_selection(-1),
            NavigationAction::Enter => self.press_selected(Press::Release),
            NavigationAction::LongPress => self.press_selected(Press::Long),
            NavigationAction::Back => match self.view {
                View::FileMenu => self.press(ListRow::Menu(MenuItem::Back), Press::Release),
                View::Browser if !self.browse.current_path.is_empty() => {
                    self.press(ListRow::Entry(PageEntry::Up), Press::Release)
                }
                View::Browser => {}
            },
            NavigationAction::Request => self.prompt = Some(String::new()),
            NavigationAction::Quit => {
                self.close();
                return true;
            }
            _ => {}
        }
        false
    }

    fn on_prompt_action(&mut self, action: NavigationAction) {
        let Some(buffer) = self.prompt.as_mut() else {
            return;
        };
        match action {
            NavigationAction::Input(c) => buffer.push(c),
            NavigationAction::Backspace => {
                buffer.pop();
            }
            NavigationAction::Enter => {
                let text = std::mem::take(buffer);
                self.prompt = None;
                self.on_message_received(MessageKind::Text, text.as_bytes());
            }
            NavigationAction::Cancel => self.prompt = None,
            _ => {}
        }
    }

    fn on_settings_action(&mut self, action: NavigationAction) -> bool {
        let Some(panel) = self.settings_panel.as_mut() else {
            return false;
        };
        let settings = self.transfer.settings_mut();
        let result = match action {
            NavigationAction::Up => {
                panel.previous();
                Ok(())
            }
            NavigationAction::Down => {
                panel.next();
                Ok(())
            }
            NavigationAction::Enter | NavigationAction::Toggle => panel.activate(settings),
            NavigationAction::Input(c) => {
                panel.input(c);
                Ok(())
            }
            NavigationAction::Backspace => {
                panel.backspace();
                Ok(())
            }
            NavigationAction::Cancel if panel.editing().is_some() => {
                panel.cancel_edit(settings);
                Ok(())
            }
            NavigationAction::Cancel | NavigationAction::LongPress => {
                self.settings_panel = None;
                Ok(())
            }
            NavigationAction::Quit => {
                self.close();
                return true;
            }
            _ => Ok(()),
        };
        if let Err(e) = result {
            self.notices.report_error(&e);
        }
        false
    }

    fn move_selection(&mut self, delta: isize) {
        if self.rows.is_empty() {
            return;
        }
        let len = self.rows.len() as isize;
        let current = self.list_state.selected().unwrap_or(0) as isize;
        let next = (current + delta).rem_euclid(len);
        self.list_state.select(Some(next as usize));
    }

    fn press_selected(&mut self, press: Press) {
        if let Some(row) = self.selected_row().cloned() {
            self.press(row, press);
        }
    }

    /// Single dispatcher for every list row.
    pub fn press(&mut self, row: ListRow, press: Press) {
        debug!("{press:?} on {row:?}");
        match (row, press) {
            (ListRow::Entry(PageEntry::Drive(letter)), Press::Release) => {
                self.navigate(|b| {
                    b.enter_drive(letter);
                    Ok(())
                });
            }
            (ListRow::Entry(PageEntry::Up), Press::Release) => {
                self.navigate(|b| {
                    b.go_up();
                    Ok(())
                });
            }
            (ListRow::Entry(PageEntry::PreviousPage), Press::Release) => {
                self.navigate(|b| {
                    b.previous_page();
                    Ok(())
                });
            }
            (ListRow::Entry(PageEntry::NextPage), Press::Release) => {
                self.navigate(|b| {
                    b.next_page();
                    Ok(())
                });
            }
            (ListRow::Entry(PageEntry::Folder(name)), Press::Release) => {
                self.navigate(|b| b.enter_folder(&name));
            }
            (ListRow::Entry(PageEntry::File(name)), Press::Release) => self.show_file_menu(&name),
            (ListRow::Menu(MenuItem::Back), Press::Release) => {
                self.navigate(|b| {
                    b.back_to_listing();
                    Ok(())
                });
            }
            (ListRow::Menu(MenuItem::Send), Press::Release) => self.send_selected(),
            (ListRow::Menu(MenuItem::Send), Press::Long) => self.toggle_settings_panel(),
            (ListRow::Menu(MenuItem::Delete), Press::Release) => {
                self.notices
                    .report("Press long the Delete button\nto remove the file");
            }
            (ListRow::Menu(MenuItem::Delete), Press::Long) => self.delete_selected(),
            (_, Press::Long) => {}
        }
    }

    /// Apply a browse mutation and rebuild the listing. On failure the
    /// previous browse state and rows are kept.
    fn navigate(&mut self, mutate: impl FnOnce(&mut BrowseState) -> crate::error::Result<()>) {
        let before = self.browse.clone();
        if let Err(e) = mutate(&mut self.browse) {
            self.browse = before;
            self.notices.report_error(&e);
            return;
        }
        let path_changed = before.current_path != self.browse.current_path;
        if !self.load_listing() {
            self.browse = before;
            return;
        }
        if path_changed {
            info!("browsing {:?}", self.browse.current_path);
            self.window_title = self.browse.current_path.clone();
            if !self.transfer.in_progress() {
                self.reset_shortcut();
            }
        }
    }

    /// Rebuild the browser list from the current browse state.
    fn load_listing(&mut self) -> bool {
        match load_page(&self.fs, &mut self.browse) {
            Ok(page) => {
                self.rows = page.entries.into_iter().map(ListRow::Entry).collect();
                self.view = View::Browser;
                self.file_info = None;
                self.settings_panel = None;
                self.list_state.select(if self.rows.is_empty() { None } else { Some(0) });
                true
            }
            Err(e) => {
                self.notices.report_error(&e);
                false
            }
        }
    }

    fn show_file_menu(&mut self, name: &str) {
        if let Err(e) = self.browse.select_file(name) {
            self.notices.report_error(&e);
            return;
        }
        let path = self.browse.selected_path();
        self.file_info = match detect_file_type(&self.fs, &path, name) {
            Ok(found) => Some(found),
            Err(e) => {
                debug!("could not sniff {path}: {e}");
                None
            }
        };
        self.rows = [MenuItem::Back, MenuItem::Send, MenuItem::Delete]
            .into_iter()
            .map(ListRow::Menu)
            .collect();
        self.view = View::FileMenu;
        self.list_state.select(Some(0));
    }

    fn toggle_settings_panel(&mut self) {
        self.settings_panel = match self.settings_panel {
            Some(_) => None,
            None => Some(SettingsPanel::open(self.transfer.settings())),
        };
    }

    fn send_selected(&mut self) {
        if self.transfer.in_progress() {
            self.notices.report_error(&FilesError::TransferBusy);
            return;
        }
        let path = self.browse.selected_path();
        self.start_send(&path);
    }

    /// Begin sending `path`, reporting the outcome.
    pub fn start_send(&mut self, path: &str) {
        let max = PATH_MAX_LEN + FN_MAX_LEN;
        if path.len() > max {
            self.notices
                .report_error(&FilesError::PathTooLong { len: path.len(), max });
            return;
        }
        match self.transfer.start_send(&self.fs, path, &mut self.channel) {
            Ok(event) => self.on_transfer_event(event),
            Err(e) => self.notices.report_error(&e),
        }
    }

    /// Deliver a message from another application.
    ///
    /// `U:/dir/file.txt?` asks this applet to send that file.
    pub fn on_message_received(&mut self, kind: MessageKind, payload: &[u8]) {
        if kind != MessageKind::Text {
            return;
        }
        match parse_request(payload) {
            Ok(Some(path)) => {
                info!("transfer requested for {path}");
                self.start_send(&path);
            }
            Ok(None) => debug!("ignoring {} B text message", payload.len()),
            Err(e) => self.notices.report_error(&e),
        }
    }

    /// Drive the periodic send task; call from the event loop.
    pub fn tick(&mut self, now: Instant) {
        match self.transfer.poll(now, &mut self.channel) {
            Ok(Some(event)) => self.on_transfer_event(event),
            Ok(None) => {}
            Err(e) => {
                self.notices.report_error(&e);
                if e.is_transfer() && !self.transfer.in_progress() {
                    self.reset_shortcut();
                }
            }
        }
    }

    /// Time until the send task wants to run again.
    pub fn next_due(&self, now: Instant) -> Option<Duration> {
        self.transfer.task().time_until_due(now)
    }

    fn on_transfer_event(&mut self, event: TransferEvent) {
        match event {
            TransferEvent::Started { name, percent } => {
                self.notices.report(format!("Sending\n{name}"));
                self.show_percent(percent);
            }
            TransferEvent::Progress { percent } => self.show_percent(percent),
            TransferEvent::Completed { name } => {
                debug!("{name} complete");
                self.notices.report("File sent");
                self.reset_shortcut();
            }
        }
    }

    fn delete_selected(&mut self) {
        let name = self.browse.selected_file.clone();
        let path = self.browse.selected_path();
        match self.fs.remove(&path) {
            Ok(()) => {
                info!("deleted {path}");
                self.notices.report(format!("{name} deleted"));
                self.navigate(|b| {
                    b.back_to_listing();
                    Ok(())
                });
            }
            Err(source) => self
                .notices
                .report_error(&FilesError::DeleteFailed { name, source }),
        }
    }

    fn idle_label(&self) -> String {
        match path_basename(&self.browse.current_path) {
            "" => "Files".to_string(),
            name => name.to_string(),
        }
    }

    fn show_percent(&mut self, percent: Option<u8>) {
        self.percent = percent;
        if self.shortcut.is_some() {
            self.shortcut = Some(match percent {
                Some(pct) => format!("Sending\n{pct}%"),
                None => "Sending".to_string(),
            });
        }
    }

    fn reset_shortcut(&mut self) {
        self.percent = None;
        if self.shortcut.is_some() {
            self.shortcut = Some(self.idle_label());
        }
    }

    /// Draw the application UI.
    pub fn draw(&mut self, f: &mut Frame<'_>) {
        let now = Instant::now();
        let layout = compute_layout(f.area(), &self.visibility);

        if let Some(area) = layout.window {
            let title = match self.view {
                View::Browser => format!(" {}", self.window_title),
                View::FileMenu => format!(" {}", self.browse.selected_path()),
            };
            render_file_list(
                f,
                area,
                &title,
                &self.rows,
                self.file_info.as_ref(),
                &mut self.list_state,
            );
            if let Some(panel) = &self.settings_panel {
                render_settings_panel(f, area, panel, self.transfer.settings());
            }
        }

        if let (Some(area), Some(label)) = (layout.shortcut, &self.shortcut) {
            render_shortcut(f, area, label, self.percent);
        }

        render_status_line(
            f,
            layout.status,
            self.prompt.as_deref(),
            self.notices.active(now),
        );
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::fs;

    use ratatui::{backend::TestBackend, Terminal};
    use tempfile::TempDir;

    use crate::fs::LocalDrives;

    type TestApp = FilesApp<LocalDrives, Vec<Vec<u8>>>;

    fn app_with(files: &[(&str, &[u8])]) -> (TempDir, TestApp) {
        let dir = TempDir::new().unwrap();
        fs::create_dir(dir.path().join("docs")).unwrap();
        for (name, data) in files {
            fs::write(dir.path().join(name), data).unwrap();
        }
        let settings = TransferSettings::new(4, 10).unwrap();
        let mut app = FilesApp::run(LocalDrives::single('U', dir.path()), Vec::new(), settings);
        app.open_window();
        app.open_shortcut();
        (dir, app)
    }

    fn labels(app: &TestApp) -> Vec<String> {
        app.rows.iter().map(ListRow::label).collect()
    }

    fn latest(app: &TestApp) -> String {
        app.notices.latest().map(|n| n.text.clone()).unwrap_or_default()
    }

    fn open_file_menu(app: &mut TestApp, name: &str) {
        app.press(ListRow::Entry(PageEntry::Drive('U')), Press::Release);
        app.press(ListRow::Entry(PageEntry::File(name.into())), Press::Release);
    }

    fn run_ticks(app: &mut TestApp) {
        let mut now = Instant::now();
        for _ in 0..100 {
            if !app.transfer.in_progress() {
                break;
            }
            now += Duration::from_secs(1);
            app.tick(now);
        }
    }

    #[test]
    fn window_starts_at_drive_list() {
        let (_dir, mut app) = app_with(&[]);
        assert_eq!(app.rows, vec![ListRow::Entry(PageEntry::Drive('U'))]);
        assert_eq!(app.shortcut.as_deref(), Some("Files"));

        app.on_action(NavigationAction::Enter);
        assert_eq!(app.window_title, "U:");
        assert_eq!(labels(&app), vec!["Up", "docs"]);
        assert_eq!(app.shortcut.as_deref(), Some("U:"));

        app.on_action(NavigationAction::Down);
        app.on_action(NavigationAction::Enter);
        assert_eq!(app.window_title, "U:/docs");
        assert_eq!(app.shortcut.as_deref(), Some("docs"));

        app.on_action(NavigationAction::Back);
        app.on_action(NavigationAction::Back);
        assert_eq!(app.window_title, "");
    }

    #[test]
    fn send_reports_progress_then_completion() {
        let (_dir, mut app) = app_with(&[("ten.bin", b"0123456789")]);
        open_file_menu(&mut app, "ten.bin");
        assert_eq!(app.view, View::FileMenu);
        assert!(app.file_info.is_some());

        app.press(ListRow::Menu(MenuItem::Send), Press::Release);
        assert_eq!(latest(&app), "Sending\nten.bin");
        assert_eq!(app.shortcut.as_deref(), Some("Sending\n40%"));

        run_ticks(&mut app);
        assert_eq!(latest(&app), "File sent");
        assert_eq!(app.shortcut.as_deref(), Some("U:"));
        assert_eq!(app.channel.concat(), b"0123456789".to_vec());
    }

    #[test]
    fn second_send_is_refused_while_busy() {
        let (_dir, mut app) = app_with(&[("ten.bin", b"0123456789")]);
        open_file_menu(&mut app, "ten.bin");
        app.press(ListRow::Menu(MenuItem::Send), Press::Release);
        app.press(ListRow::Menu(MenuItem::Send), Press::Release);
        assert_eq!(latest(&app), "File sending in progress");
        assert_eq!(app.channel.len(), 1);
    }

    #[test]
    fn delete_needs_a_long_press() {
        let (dir, mut app) = app_with(&[("old.txt", b"bye")]);
        open_file_menu(&mut app, "old.txt");

        app.press(ListRow::Menu(MenuItem::Delete), Press::Release);
        assert!(latest(&app).starts_with("Press long the Delete button"));
        assert!(dir.path().join("old.txt").exists());

        app.press(ListRow::Menu(MenuItem::Delete), Press::Long);
        assert_eq!(latest(&app), "old.txt deleted");
        assert!(!dir.path().join("old.txt").exists());
        assert_eq!(app.view, View::Browser);
        assert_eq!(labels(&app), vec!["Up", "docs"]);
    }

    #[test]
    fn failed_delete_is_reported() {
        let (dir, mut app) = app_with(&[("old.txt", b"bye")]);
        open_file_menu(&mut app, "old.txt");
        fs::remove_file(dir.path().join("old.txt")).unwrap();

        app.press(ListRow::Menu(MenuItem::Delete), Press::Long);
        assert_eq!(latest(&app), "Can not delete old.txt");
        assert_eq!(app.view, View::FileMenu);
    }

    #[test]
    fn request_message_starts_send() {
        let (_dir, mut app) = app_with(&[("a.txt", b"hi")]);
        app.on_message_received(MessageKind::Text, b"U:/a.txt");
        assert!(app.channel.is_empty());

        app.on_message_received(MessageKind::Text, b"U:/a.txt?");
        assert_eq!(app.channel, vec![b"hi".to_vec()]);
        assert_eq!(latest(&app), "File sent");
    }

    #[test]
    fn typed_prompt_is_delivered_on_enter() {
        let (_dir, mut app) = app_with(&[("a.txt", b"hi")]);
        app.on_action(NavigationAction::Request);
        for c in "U:/a.txt?".chars() {
            app.on_action(NavigationAction::Input(c));
        }
        app.on_action(NavigationAction::Enter);
        assert!(app.prompt.is_none());
        assert_eq!(app.channel, vec![b"hi".to_vec()]);
    }

    #[test]
    fn unreadable_folder_keeps_previous_listing() {
        let (dir, mut app) = app_with(&[]);
        app.press(ListRow::Entry(PageEntry::Drive('U')), Press::Release);
        fs::remove_dir(dir.path().join("docs")).unwrap();

        app.press(ListRow::Entry(PageEntry::Folder("docs".into())), Press::Release);
        assert_eq!(latest(&app), "Can not read the path U:/docs");
        assert_eq!(app.browse.current_path, "U:");
        assert_eq!(labels(&app), vec!["Up", "docs"]);
    }

    #[test]
    fn long_press_on_send_toggles_settings() {
        let (_dir, mut app) = app_with(&[("a.txt", b"hi")]);
        open_file_menu(&mut app, "a.txt");
        app.press(ListRow::Menu(MenuItem::Send), Press::Long);
        assert!(app.settings_panel.is_some());

        app.on_action(NavigationAction::Toggle);
        assert!(app.transfer.settings().options.file_name);

        app.on_action(NavigationAction::LongPress);
        assert!(app.settings_panel.is_none());
    }

    #[test]
    fn close_drops_running_transfer() {
        let (_dir, mut app) = app_with(&[("ten.bin", b"0123456789")]);
        open_file_menu(&mut app, "ten.bin");
        app.press(ListRow::Menu(MenuItem::Send), Press::Release);
        assert!(app.transfer.in_progress());

        assert!(app.on_action(NavigationAction::Quit));
        assert!(!app.transfer.in_progress());
        assert!(!app.transfer.task().is_armed());
        assert_eq!(app.channel.len(), 1);
    }

    #[test]
    fn draws_every_section() {
        let (_dir, mut app) = app_with(&[("a.txt", b"hi")]);
        open_file_menu(&mut app, "a.txt");
        app.press(ListRow::Menu(MenuItem::Send), Press::Long);

        let mut terminal = Terminal::new(TestBackend::new(80, 24)).unwrap();
        terminal.draw(|f| app.draw(f)).unwrap();
        let rendered: String = terminal
            .backend()
            .buffer()
            .content
            .iter()
            .map(|cell| cell.symbol())
            .collect();
        assert!(rendered.contains("Send settings"));
        assert!(rendered.contains("U:/a.txt"));
    }
}
