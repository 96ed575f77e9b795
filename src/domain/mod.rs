// ==========================================
// 租赁商品表格导入 - 领域模型层
// ==========================================
// 职责: 定义单元格类型、导入中间结构、目录实体
// 红线: 不含文件读取逻辑,不含转换规则
// ==========================================

pub mod catalog;
pub mod types;

// 重导出核心类型
pub use catalog::{
    CatalogEntry, DurationPrice, ErrorEntry, Product, Sku, StockCalendar, StockEntry,
};
pub use types::{CatalogField, CatalogRow, CellValue, RawRow, RawTable};
