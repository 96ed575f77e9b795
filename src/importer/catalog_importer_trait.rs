// ==========================================
// 租赁商品表格导入 - 导入器 Trait
// ==========================================
// 职责: 定义导入管道各阶段接口（不包含实现）
// 流程: 文件解析 → 表头映射 → 分组 → 转换 → 目录
// ==========================================

use crate::domain::{CatalogRow, Product, RawRow, RawTable};
use crate::importer::error::ImportResult;
use crate::importer::field_mapper::ColumnMapping;
use std::path::Path;

// ==========================================
// CatalogImporter Trait
// ==========================================
// 用途: 目录导入主接口
// 实现者: CatalogImporterImpl
// 红线: 同步、无共享可变状态；可被多个线程同时调用
pub trait CatalogImporter: Send + Sync {
    /// 从表格文件导入商品目录
    ///
    /// # 返回
    /// - Ok(Vec<Product>): 按商品编码首次出现顺序排列的商品
    /// - Err: 文件无法解析为表格，或映射后缺少分组列
    fn import_file(&self, file_path: &Path) -> ImportResult<Vec<Product>>;

    /// 从已解析的表格导入（上传层已持有表格数据时使用）
    fn import_table(&self, table: RawTable) -> ImportResult<Vec<Product>>;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser, ExcelParser, UniversalFileParser
pub trait FileParser: Send + Sync {
    /// 解析文件为原始表格（表头 + 按列位置存放的单元格）
    ///
    /// # 返回
    /// - Ok(RawTable): 已跳过完全空白的行，空单元格已归一为 Absent
    /// - Err: 文件读取错误、格式错误
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable>;
}

// ==========================================
// FieldMapper Trait
// ==========================================
// 用途: 表头映射接口（阶段 1）
// 实现者: FieldMapperImpl
pub trait FieldMapper: Send + Sync {
    /// 将表头解析为 标准字段 → 列位置
    fn resolve_columns(&self, headers: &[String]) -> ColumnMapping;

    /// 按映射把原始行转换为标准字段行（未映射列被忽略）
    fn map_row(&self, row: &RawRow, mapping: &ColumnMapping) -> CatalogRow;
}
