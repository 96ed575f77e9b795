// ==========================================
// 租赁商品表格导入 - 核心库
// ==========================================
// 输入: 商家维护的商品表格（一行一个 SKU）
// 输出: 按商家商品编码分组的 商品 → SKU 嵌套目录
// ==========================================

// 初始化国际化系统
rust_i18n::i18n!("locales", fallback = "zh-CN");

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 目录实体与单元格类型
pub mod domain;

// 导入层 - 表格解析/映射/分组/转换
pub mod importer;

// 配置层 - 默认值与环境变量覆写
pub mod config;

// 外部协作方契约（图片上传/商品创建/图片登记）
pub mod gateway;

// 日志系统
pub mod logging;

// 国际化
pub mod i18n;

// ==========================================
// 重导出核心类型
// ==========================================

pub use config::ImportConfig;
pub use domain::{CatalogEntry, CellValue, DurationPrice, Product, Sku, StockCalendar, StockEntry};
pub use importer::{
    parse_catalog, CatalogImporter, CatalogImporterImpl, Clock, FixedClock, ImportError,
    ImportResult, SystemClock,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "租赁商品表格导入";
