// ==========================================
// 租赁商品表格导入 - 配置层
// ==========================================
// 职责: 导入默认值（成色、起租天数、日历窗口等）
// 来源: 内置默认值 → JSON 文件 → 环境变量（逐级覆写）
// ==========================================

pub mod import_config;

// 重导出核心配置
pub use import_config::{config_keys, ImportConfig};
