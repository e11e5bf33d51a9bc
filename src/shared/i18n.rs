use super::config::{Config, Language};

/// Internationalization support for user-facing text
#[derive(Debug, Clone, PartialEq)]
pub struct I18n {
    language: Language,
}

impl I18n {
    pub fn new(language: Language) -> Self {
        Self { language }
    }

    /// Resolve the language from settings, falling back to the system locale
    pub fn from_config(config: &Config) -> Self {
        let language = config.language.unwrap_or_else(|| {
            sys_locale::get_locale()
                .map(|tag| Language::from_locale(&tag))
                .unwrap_or_default()
        });
        Self::new(language)
    }

    pub fn language(&self) -> Language {
        self.language
    }

    pub fn t<'a>(&self, key: &'a str) -> &'a str {
        match self.language {
            Language::English => english(key),
            Language::ChineseSimplified => chinese(key),
        }
    }
}

fn english(key: &str) -> &str {
    match key {
        // Commands
        "command.compute_total_time" => "Compute total time",
        "command.insert_task_not_finished" => "Insert unfinished task",
        "command.insert_task_finished" => "Insert finished task",
        "command.insert_clock_time" => "Insert the current clock time",
        "command.copy_link" => "Copy link text and URL",

        // Context menu
        "menu.copy_link" => "Copy link",
        "menu.compute_total_time" => "Compute total time",

        // Report
        "report.header" => "Time spent",
        "report.total" => "Total time spent",
        "report.computed_at" => "Last computed",
        "unit.hours" => "hours",

        // Notices
        "notice.no_link" => "No link under the cursor",
        "notice.copy_success" => "Link copied to clipboard",
        "notice.copy_failed" => "Failed to copy link",
        "notice.report_inserted" => "Time report inserted",

        _ => key, // Fallback to key if not found
    }
}

fn chinese(key: &str) -> &str {
    match key {
        "command.compute_total_time" => "统计总时间",
        "command.insert_task_not_finished" => "插入未完成任务",
        "command.insert_task_finished" => "插入已完成任务",
        "command.insert_clock_time" => "插入当前时间",
        "command.copy_link" => "复制链接文本和地址",

        "menu.copy_link" => "复制链接",
        "menu.compute_total_time" => "统计总时间",

        "report.header" => "时间花费统计",
        "report.total" => "花费总时长",
        "report.computed_at" => "最后统计时间",
        "unit.hours" => "小时",

        "notice.no_link" => "光标处没有链接",
        "notice.copy_success" => "链接已复制到剪贴板",
        "notice.copy_failed" => "复制链接失败",
        "notice.report_inserted" => "已插入时间统计",

        _ => key,
    }
}
