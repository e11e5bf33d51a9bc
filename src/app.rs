use std::sync::Arc;
use tokio::task::JoinHandle;

use crate::action::Action;
use crate::features::{links, snippets, timesheet};
use crate::host::{Clipboard, Command, CommandRegistry, Editor, MenuBuilder, MenuItem, Notifier};
use crate::shared::{Config, I18n};

/// Plugin state shared by every command invocation
pub struct App {
    /// Plugin settings
    config: Config,
    /// Localized strings for the current language
    i18n: I18n,
    /// Where user-facing notices go
    notifier: Arc<dyn Notifier>,
    /// Destination of copied links
    clipboard: Arc<dyn Clipboard>,
}

impl App {
    pub fn new(
        config: Config,
        notifier: Arc<dyn Notifier>,
        clipboard: Arc<dyn Clipboard>,
    ) -> Self {
        let i18n = I18n::from_config(&config);
        log::debug!("Using language {}", i18n.language().code());
        Self {
            config,
            i18n,
            notifier,
            clipboard,
        }
    }

    pub fn config(&self) -> &Config {
        &self.config
    }

    pub fn i18n(&self) -> &I18n {
        &self.i18n
    }

    /// Configuration change notification: swap settings and re-resolve the language
    pub fn apply_config(&mut self, config: Config) {
        self.i18n = I18n::from_config(&config);
        self.config = config;
        log::info!(
            "Settings changed (language {}, auto compute {})",
            self.i18n.language().code(),
            self.config.auto_compute
        );
    }

    /// Register one palette command per action
    pub fn register_commands(&self, registry: &mut dyn CommandRegistry) {
        for action in Action::all() {
            registry.add_command(Command {
                id: action.id(),
                name: self.i18n.t(action.name_key()).to_string(),
                action: *action,
            });
        }
    }

    /// Fill the editor context menu
    pub fn on_editor_menu(&self, menu: &mut dyn MenuBuilder, editor: &dyn Editor) {
        let cursor = editor.cursor();
        let on_link = editor
            .line(cursor.line)
            .is_some_and(|line| links::get_markdown_link(&line, cursor.ch).is_some());

        if on_link {
            menu.add_item(MenuItem {
                title: self.i18n.t("menu.copy_link").to_string(),
                icon: "link",
                action: Action::CopyLink,
            });
        }

        if self.config.auto_compute {
            menu.add_item(MenuItem {
                title: self.i18n.t("menu.compute_total_time").to_string(),
                icon: "clock",
                action: Action::ComputeTotalTime,
            });
        }
    }

    /// Run an action against the active editor.
    ///
    /// Returns the handle of the clipboard write when one was started; the
    /// action itself never waits for it.
    pub fn execute(&self, action: Action, editor: &mut dyn Editor) -> Option<JoinHandle<()>> {
        log::info!("Running {}", action.id());
        match action {
            Action::ComputeTotalTime => {
                self.compute_total_time(editor);
                None
            }
            Action::InsertTaskNotFinished => {
                editor.replace_selection(snippets::UNFINISHED_TASK);
                None
            }
            Action::InsertTaskFinished => {
                editor.replace_selection(snippets::FINISHED_TASK);
                None
            }
            Action::InsertClockTime => {
                editor.replace_selection(&snippets::current_clock_time());
                None
            }
            Action::CopyLink => self.copy_link_under_cursor(&*editor),
        }
    }

    /// Insert the time report at the cursor
    pub fn compute_total_time(&self, editor: &mut dyn Editor) {
        let report = timesheet::compute_total_time(&editor.value());
        let text = report.render(&self.i18n);
        let at = editor.cursor();
        editor.replace_range(&text, at);
        self.notifier.notice(self.i18n.t("notice.report_inserted"));
    }

    /// Copy `<text> <url>` of the link under the cursor
    pub fn copy_link_under_cursor(&self, editor: &dyn Editor) -> Option<JoinHandle<()>> {
        let cursor = editor.cursor();
        let line = editor.line(cursor.line).unwrap_or_default();

        let Some(link) = links::get_markdown_link(&line, cursor.ch) else {
            self.notifier.notice(self.i18n.t("notice.no_link"));
            return None;
        };
        let payload = links::get_markdown_url_info(link).clipboard_text();

        let write = self.clipboard.write_text(payload);
        let notifier = Arc::clone(&self.notifier);
        let success = self.i18n.t("notice.copy_success").to_string();
        let failure = self.i18n.t("notice.copy_failed").to_string();

        Some(tokio::spawn(async move {
            match write.await {
                Ok(()) => notifier.notice(&success),
                Err(err) => {
                    log::warn!("Clipboard write failed: {err:#}");
                    notifier.notice(&failure);
                }
            }
        }))
    }
}
