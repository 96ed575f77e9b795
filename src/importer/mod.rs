// ==========================================
// 租赁商品表格导入 - 导入层
// ==========================================
// 职责: 表格 → 商品/SKU 嵌套目录
// 支持: Excel (.xlsx/.xlsm/.xlsb/.xls/.ods), CSV
// ==========================================

// 模块声明
pub mod batch;
pub mod catalog_importer_impl;
pub mod catalog_importer_trait;
pub mod data_cleaner;
pub mod error;
pub mod field_mapper;
pub mod file_parser;
pub mod grouping;
pub mod stock_calendar;

// 重导出核心类型
pub use batch::parse_many;
pub use catalog_importer_impl::{into_catalog_entries, parse_catalog, CatalogImporterImpl};
pub use data_cleaner::DataCleaner;
pub use error::{ImportError, ImportResult};
pub use field_mapper::{ColumnMapping, FieldMapper as FieldMapperImpl};
pub use file_parser::{CsvParser, ExcelParser, UniversalFileParser};
pub use grouping::{group_by_item_id, GroupingOutcome, ProductGroup};
pub use stock_calendar::{build_stock_calendar, Clock, FixedClock, SystemClock};

// 重导出 Trait 接口
pub use catalog_importer_trait::{CatalogImporter, FieldMapper, FileParser};
