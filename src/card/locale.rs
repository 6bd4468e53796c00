//! User-facing strings for the card and notifications.

use std::str::FromStr;

use chrono::{DateTime, Datelike, Utc};
use serde::{Deserialize, Serialize};

use crate::export::ExportMode;
use crate::Error;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Default, Serialize, Deserialize)]
#[serde(rename_all = "kebab-case")]
pub enum Locale {
    #[default]
    En,
    ZhCn,
}

impl FromStr for Locale {
    type Err = Error;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim().to_ascii_lowercase().as_str() {
            "en" | "en-us" => Ok(Locale::En),
            "zh" | "zh-cn" => Ok(Locale::ZhCn),
            other => Err(Error::ConfigError(format!("unsupported locale {:?}", other))),
        }
    }
}

impl Locale {
    pub fn description_placeholder(self) -> &'static str {
        match self {
            Locale::En => "No description provided.",
            Locale::ZhCn => "暂无描述。",
        }
    }

    pub fn stars(self, count: u64) -> String {
        format!("{} Stars", count)
    }

    pub fn forks(self, count: u64) -> String {
        format!("{} Forks", count)
    }

    /// Calendar date in the long form of the locale, UTC.
    pub fn date(self, at: &DateTime<Utc>) -> String {
        match self {
            Locale::En => at.format("%B %-d, %Y").to_string(),
            Locale::ZhCn => format!("{}年{}月{}日", at.year(), at.month(), at.day()),
        }
    }

    pub fn updated(self, at: &DateTime<Utc>) -> String {
        match self {
            Locale::En => format!("Updated {}", self.date(at)),
            Locale::ZhCn => format!("更新于 {}", self.date(at)),
        }
    }

    pub fn call_to_action(self) -> &'static str {
        match self {
            Locale::En => "View on GitHub",
            Locale::ZhCn => "查看 GitHub",
        }
    }

    pub fn lookup_succeeded(self) -> &'static str {
        match self {
            Locale::En => "Repository loaded.",
            Locale::ZhCn => "仓库信息获取成功！",
        }
    }

    /// Short form for notifications.
    pub fn lookup_failed(self, message: &str) -> String {
        match self {
            Locale::En => format!("Failed to fetch repository: {}", message),
            Locale::ZhCn => format!("获取仓库信息失败: {}", message),
        }
    }

    /// Long form shown inline under the form.
    pub fn lookup_failed_inline(self, message: &str) -> String {
        match self {
            Locale::En => format!(
                "Failed to fetch repository: {}. Check that the owner and repository name are correct.",
                message
            ),
            Locale::ZhCn => format!(
                "获取仓库信息失败: {}. 请检查用户名和仓库名是否正确。",
                message
            ),
        }
    }

    pub fn missing_fields(self) -> &'static str {
        match self {
            Locale::En => "Enter a GitHub owner and repository name.",
            Locale::ZhCn => "请输入 GitHub 用户名和仓库名。",
        }
    }

    pub fn missing_reference(self) -> &'static str {
        match self {
            Locale::En => "Enter a GitHub repository link.",
            Locale::ZhCn => "请输入 GitHub 仓库链接。",
        }
    }

    pub fn unparseable_reference(self) -> &'static str {
        match self {
            Locale::En => "Could not parse the GitHub link. Check the format.",
            Locale::ZhCn => "无法解析 GitHub 链接，请检查格式是否正确",
        }
    }

    pub fn nothing_to_export(self) -> &'static str {
        match self {
            Locale::En => "No card to save. Generate a card first.",
            Locale::ZhCn => "没有可保存的卡片。请先生成卡片。",
        }
    }

    pub fn export_succeeded(self, mode: ExportMode) -> &'static str {
        match (self, mode) {
            (Locale::En, ExportMode::Standard) => "Card saved as an image!",
            (Locale::En, ExportMode::Simple) => "Saved in simple mode!",
            (Locale::ZhCn, ExportMode::Standard) => "卡片已成功保存为图片！",
            (Locale::ZhCn, ExportMode::Simple) => "使用简单模式保存成功！",
        }
    }

    pub fn export_failed(self, mode: ExportMode, message: &str) -> String {
        match (self, mode) {
            (Locale::En, ExportMode::Standard) => format!("Failed to save image: {}", message),
            (Locale::En, ExportMode::Simple) => format!("Simple save failed: {}", message),
            (Locale::ZhCn, ExportMode::Standard) => format!("保存图片失败: {}", message),
            (Locale::ZhCn, ExportMode::Simple) => format!("简单保存失败: {}", message),
        }
    }
}
