// ==========================================
// 租赁商品表格导入 - 目录导入器实现
// ==========================================
// 职责: 整合导入流程，从文件到商品目录
// 流程: 解析 → 表头映射 → 表结构校验 → 分组 → 主行取值 → SKU 转换
// 致命错误只有两类: 文件无法解析为表格 / 映射后缺少分组列
// ==========================================

use crate::config::ImportConfig;
use crate::domain::{CatalogEntry, CatalogField, CatalogRow, Product, RawTable, Sku};
use crate::importer::catalog_importer_trait::{CatalogImporter, FieldMapper, FileParser};
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::error::{ImportError, ImportResult};
use crate::importer::field_mapper::{ColumnMapping, FieldMapper as FieldMapperImpl};
use crate::importer::file_parser::UniversalFileParser;
use crate::importer::grouping::{group_by_item_id, ProductGroup};
use crate::importer::stock_calendar::{build_stock_calendar, Clock, SystemClock};
use chrono::NaiveDate;
use std::path::Path;
use tracing::{debug, error, info, instrument, warn};
use uuid::Uuid;

// ==========================================
// CatalogImporterImpl - 目录导入器实现
// ==========================================
pub struct CatalogImporterImpl {
    // 默认值配置
    config: ImportConfig,

    // 参考日期来源
    clock: Box<dyn Clock>,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    field_mapper: Box<dyn FieldMapper>,
    data_cleaner: DataCleaner,
}

impl CatalogImporterImpl {
    /// 创建新的 CatalogImporter 实例
    ///
    /// # 参数
    /// - config: 导入配置（默认值）
    /// - clock: 参考日期来源
    /// - file_parser: 文件解析器
    /// - field_mapper: 字段映射器
    pub fn new(
        config: ImportConfig,
        clock: Box<dyn Clock>,
        file_parser: Box<dyn FileParser>,
        field_mapper: Box<dyn FieldMapper>,
    ) -> Self {
        Self {
            config,
            clock,
            file_parser,
            field_mapper,
            data_cleaner: DataCleaner,
        }
    }

    /// 标准组件: 按扩展名选择解析器 + 固定词表映射 + 系统日期
    pub fn with_config(config: ImportConfig) -> Self {
        Self::new(
            config,
            Box::new(SystemClock),
            Box::new(UniversalFileParser),
            Box::new(FieldMapperImpl::new()),
        )
    }

    pub fn config(&self) -> &ImportConfig {
        &self.config
    }

    /// 表结构校验（致命）
    fn check_schema(&self, headers: &[String], mapping: &ColumnMapping) -> ImportResult<()> {
        if !mapping.contains(CatalogField::OutItemId) {
            error!(columns = ?headers, "映射后缺少分组列 outItemId");
            return Err(ImportError::MissingGroupingColumn {
                column: CatalogField::OutItemId.source_label().to_string(),
                found: headers.to_vec(),
            });
        }

        let missing: Vec<String> = mapping
            .missing_required()
            .into_iter()
            .map(|f| f.source_label().to_string())
            .collect();
        if !missing.is_empty() {
            if self.config.strict_required_columns {
                error!(missing = ?missing, "缺少必填列");
                return Err(ImportError::MissingRequiredColumns(missing));
            }
            warn!(missing = ?missing, "缺少必填列，对应字段将输出为空");
        }

        if !mapping.unmapped().is_empty() {
            debug!(columns = ?mapping.unmapped(), "未识别的列已忽略");
        }

        Ok(())
    }

    /// 由分组构造商品（标量字段只取主行；默认值在此处应用）
    fn build_product(&self, group: &ProductGroup, today: NaiveDate) -> Product {
        let master = group.master();
        let cleaner = &self.data_cleaner;

        let rent_from_days = cleaner
            .parse_positive_int(master.get(CatalogField::RentFromDays))
            .unwrap_or(self.config.default_rent_from_days);

        let fineness_grade = cleaner.text_or_default(
            master.get(CatalogField::FinenessGrade),
            &self.config.default_fineness_grade,
        );

        Product {
            category_id: cleaner.text_or_empty(master.get(CatalogField::CategoryId)),
            title: cleaner.text_or_empty(master.get(CatalogField::Title)),
            out_item_id: group.key().to_string(),
            path: cleaner.text_or_empty(master.get(CatalogField::Path)),
            rent_from_days,
            fineness_grade,
            service_price: cleaner.parse_number(master.get(CatalogField::ServicePrice)),
            skus: group
                .rows()
                .iter()
                .map(|row| self.build_sku(row, today))
                .collect(),
        }
    }

    /// 由单行构造 SKU（各字段独立转换，失败互不影响）
    fn build_sku(&self, row: &CatalogRow, today: NaiveDate) -> Sku {
        let cleaner = &self.data_cleaner;

        let stock_quantity = cleaner.parse_stock_quantity(row.get(CatalogField::StockQuantity));
        if stock_quantity.is_none() && !row.get(CatalogField::StockQuantity).is_absent() {
            debug!(row = row.row_number, "库存数量无法解析，生成空库存日历");
        }

        Sku {
            out_sku_id: cleaner.text_or_empty(row.get(CatalogField::OutSkuId)),
            sale_price: cleaner.to_cents(row.get(CatalogField::SalePrice)),
            sku_name: cleaner.clean_text(row.get(CatalogField::SkuName)),
            rent_durations: cleaner.parse_rent_durations(row.get(CatalogField::RentDurations)),
            duration_price_list: cleaner
                .parse_duration_prices(row.get(CatalogField::DurationPrices)),
            stock_calendar: build_stock_calendar(stock_quantity, today, self.config.calendar_days),
        }
    }
}

impl CatalogImporter for CatalogImporterImpl {
    #[instrument(skip(self, file_path), fields(import_id))]
    fn import_file(&self, file_path: &Path) -> ImportResult<Vec<Product>> {
        let import_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("import_id", import_id.as_str());
        info!(file_path = %file_path.display(), "开始导入商品表格");

        // === 步骤 1: 解析文件 ===
        debug!("步骤 1: 解析文件");
        let table = self.file_parser.parse_to_raw_table(file_path).map_err(|e| {
            error!(error = %e, "文件解析失败");
            e
        })?;

        self.import_table(table)
    }

    fn import_table(&self, table: RawTable) -> ImportResult<Vec<Product>> {
        let total_rows = table.rows.len();
        info!(total_rows, columns = ?table.headers, "表格读取完成");

        // === 步骤 2: 表头映射 + 表结构校验 ===
        debug!("步骤 2: 表头映射");
        let mapping = self.field_mapper.resolve_columns(&table.headers);
        self.check_schema(&table.headers, &mapping)?;

        let rows: Vec<CatalogRow> = table
            .rows
            .iter()
            .map(|row| self.field_mapper.map_row(row, &mapping))
            .collect();

        // === 步骤 3: 分组 ===
        debug!("步骤 3: 按商品编码分组");
        let grouping = group_by_item_id(rows);
        if !grouping.skipped_rows.is_empty() {
            warn!(
                count = grouping.skipped_rows.len(),
                rows = ?grouping.skipped_rows,
                "商品编码为空的行已跳过"
            );
        }

        // === 步骤 4: 构造商品与 SKU ===
        debug!("步骤 4: 构造商品与 SKU");
        let today = self.clock.today();
        let products: Vec<Product> = grouping
            .groups
            .iter()
            .map(|group| self.build_product(group, today))
            .collect();

        info!(
            products = products.len(),
            skus = grouping.grouped_row_count(),
            skipped = grouping.skipped_rows.len(),
            reference_date = %today,
            "商品目录生成完成"
        );

        Ok(products)
    }
}

// ==========================================
// 输出边界
// ==========================================

/// 导入结果 → 输出序列（致命错误 → 单元素错误序列）
pub fn into_catalog_entries(result: ImportResult<Vec<Product>>) -> Vec<CatalogEntry> {
    match result {
        Ok(products) => products.into_iter().map(CatalogEntry::Product).collect(),
        Err(e) => CatalogEntry::failure(e.user_message()),
    }
}

/// 解析表格文件并返回输出序列
///
/// 调用方须先用 `CatalogEntry::error_message` 判断是否为错误序列
pub fn parse_catalog(importer: &dyn CatalogImporter, file_path: &Path) -> Vec<CatalogEntry> {
    into_catalog_entries(importer.import_file(file_path))
}
