// ==========================================
// 租赁商品表格导入 - 导入配置
// ==========================================
// 职责: 集中存放导入默认值，作为参数传入导入器
// 红线: 不含业务转换逻辑
// ==========================================

use anyhow::Context;
use serde::{Deserialize, Serialize};
use std::path::Path;
use tracing::warn;

/// 默认成色等级
pub const DEFAULT_FINENESS_GRADE: &str = "99新";

/// 默认起租天数
pub const DEFAULT_RENT_FROM_DAYS: u32 = 1;

/// 库存日历窗口（天）
pub const DEFAULT_CALENDAR_DAYS: u32 = 90;

// 日历窗口上限，防止误配置生成超大日历
const MAX_CALENDAR_DAYS: u32 = 3660;

// ==========================================
// 配置键（环境变量名）
// ==========================================
pub mod config_keys {
    pub const FINENESS_GRADE: &str = "RENTAL_CATALOG_FINENESS_GRADE";
    pub const RENT_FROM_DAYS: &str = "RENTAL_CATALOG_RENT_FROM_DAYS";
    pub const CALENDAR_DAYS: &str = "RENTAL_CATALOG_CALENDAR_DAYS";
    pub const STRICT_REQUIRED_COLUMNS: &str = "RENTAL_CATALOG_STRICT_REQUIRED_COLUMNS";
    pub const LOCALE: &str = "RENTAL_CATALOG_LOCALE";
}

// ==========================================
// ImportConfig - 导入配置
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(default)]
pub struct ImportConfig {
    /// 主行未填写成色时的默认值
    pub default_fineness_grade: String,

    /// 主行未填写或无法解析起租天数时的默认值（≥1）
    pub default_rent_from_days: u32,

    /// 库存日历天数（含当天）
    pub calendar_days: u32,

    /// true: 任一必填列（类目/标题/商品编码/详情页）缺失即整表失败
    /// false: 只有分组列缺失才整表失败
    pub strict_required_columns: bool,

    /// 错误消息语言（"zh-CN" / "en"）
    pub locale: String,
}

impl Default for ImportConfig {
    fn default() -> Self {
        Self {
            default_fineness_grade: DEFAULT_FINENESS_GRADE.to_string(),
            default_rent_from_days: DEFAULT_RENT_FROM_DAYS,
            calendar_days: DEFAULT_CALENDAR_DAYS,
            strict_required_columns: false,
            locale: "zh-CN".to_string(),
        }
    }
}

impl ImportConfig {
    /// 默认值 + 环境变量覆写
    pub fn from_env() -> Self {
        Self::default().with_overrides(|key| std::env::var(key).ok())
    }

    /// 从 JSON 文件加载（缺省字段取默认值），再应用环境变量覆写
    pub fn from_json_file(path: &Path) -> anyhow::Result<Self> {
        let text = std::fs::read_to_string(path)
            .with_context(|| format!("读取配置文件失败: {}", path.display()))?;
        let config: ImportConfig = serde_json::from_str(&text)
            .with_context(|| format!("配置文件格式错误: {}", path.display()))?;
        Ok(config
            .validated()
            .with_overrides(|key| std::env::var(key).ok()))
    }

    /// 按键查找覆写值；非法值记录警告并保留原值
    pub fn with_overrides<F>(mut self, lookup: F) -> Self
    where
        F: Fn(&str) -> Option<String>,
    {
        let get = |key: &str| {
            lookup(key)
                .map(|v| v.trim().to_string())
                .filter(|v| !v.is_empty())
        };

        if let Some(grade) = get(config_keys::FINENESS_GRADE) {
            self.default_fineness_grade = grade;
        }

        if let Some(raw) = get(config_keys::RENT_FROM_DAYS) {
            match raw.parse::<u32>() {
                Ok(days) if days >= 1 => self.default_rent_from_days = days,
                _ => warn!(key = config_keys::RENT_FROM_DAYS, value = %raw, "配置值非法，已忽略"),
            }
        }

        if let Some(raw) = get(config_keys::CALENDAR_DAYS) {
            match raw.parse::<u32>() {
                Ok(days) if (1..=MAX_CALENDAR_DAYS).contains(&days) => self.calendar_days = days,
                _ => warn!(key = config_keys::CALENDAR_DAYS, value = %raw, "配置值非法，已忽略"),
            }
        }

        if let Some(raw) = get(config_keys::STRICT_REQUIRED_COLUMNS) {
            match parse_flag(&raw) {
                Some(flag) => self.strict_required_columns = flag,
                None => warn!(
                    key = config_keys::STRICT_REQUIRED_COLUMNS,
                    value = %raw,
                    "配置值非法，已忽略"
                ),
            }
        }

        if let Some(locale) = get(config_keys::LOCALE) {
            self.locale = locale;
        }

        self
    }

    /// 把文件中的越界值拉回默认
    fn validated(mut self) -> Self {
        if self.default_rent_from_days == 0 {
            warn!("default_rent_from_days 必须 ≥ 1，已使用默认值");
            self.default_rent_from_days = DEFAULT_RENT_FROM_DAYS;
        }
        if !(1..=MAX_CALENDAR_DAYS).contains(&self.calendar_days) {
            warn!(calendar_days = self.calendar_days, "calendar_days 越界，已使用默认值");
            self.calendar_days = DEFAULT_CALENDAR_DAYS;
        }
        if self.default_fineness_grade.trim().is_empty() {
            self.default_fineness_grade = DEFAULT_FINENESS_GRADE.to_string();
        }
        self
    }
}

fn parse_flag(value: &str) -> Option<bool> {
    match value.to_lowercase().as_str() {
        "1" | "true" | "yes" | "y" | "on" => Some(true),
        "0" | "false" | "no" | "n" | "off" => Some(false),
        _ => None,
    }
}
