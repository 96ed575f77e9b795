// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 生成 CSV 测试表格、构造固定日期的导入器
// ==========================================
#![allow(dead_code)]

use chrono::NaiveDate;
use rental_catalog_import::domain::CatalogField;
use rental_catalog_import::importer::{FieldMapperImpl, UniversalFileParser};
use rental_catalog_import::{logging, CatalogImporterImpl, FixedClock, ImportConfig};
use std::error::Error;
use rust_xlsxwriter::Workbook;
use std::io::Write;
use tempfile::{Builder, NamedTempFile};

/// 测试参考日期
pub fn reference_date() -> NaiveDate {
    NaiveDate::from_ymd_opt(2025, 1, 1).unwrap()
}

/// 固定日期的导入器
pub fn create_test_importer() -> CatalogImporterImpl {
    create_test_importer_with(ImportConfig::default())
}

pub fn create_test_importer_with(config: ImportConfig) -> CatalogImporterImpl {
    logging::init_test();
    CatalogImporterImpl::new(
        config,
        Box::new(FixedClock(reference_date())),
        Box::new(UniversalFileParser),
        Box::new(FieldMapperImpl::new()),
    )
}

/// 模板全部 13 列的中文表头
pub fn template_headers() -> Vec<&'static str> {
    CatalogField::ALL.iter().map(|f| f.source_label()).collect()
}

/// 按给定表头与行写出 CSV 临时文件
pub fn write_csv(headers: &[&str], rows: &[Vec<&str>]) -> Result<NamedTempFile, Box<dyn Error>> {
    let temp_file = Builder::new().suffix(".csv").tempfile()?;
    {
        let mut writer = csv::Writer::from_writer(temp_file.reopen()?);
        writer.write_record(headers)?;
        for row in rows {
            writer.write_record(row)?;
        }
        writer.flush()?;
    }
    Ok(temp_file)
}

/// 使用模板表头写出 CSV
pub fn write_template_csv(rows: &[Vec<&str>]) -> Result<NamedTempFile, Box<dyn Error>> {
    write_csv(&template_headers(), rows)
}

/// 模板行构造器（列顺序与 CatalogField::ALL 一致）
#[derive(Clone)]
pub struct RowBuilder {
    cells: Vec<&'static str>,
}

impl RowBuilder {
    pub fn new(out_item_id: &'static str, out_sku_id: &'static str) -> Self {
        let mut cells = vec![""; CatalogField::ALL.len()];
        cells[0] = "C001627013";
        cells[1] = "富士拍立得";
        cells[2] = out_item_id;
        cells[3] = "https://detail.tmall.com/item.htm?id=1";
        cells[7] = out_sku_id;
        Self { cells }
    }

    pub fn set(mut self, field: CatalogField, value: &'static str) -> Self {
        let idx = CatalogField::ALL
            .iter()
            .position(|f| *f == field)
            .expect("field in template");
        self.cells[idx] = value;
        self
    }

    pub fn build(self) -> Vec<&'static str> {
        self.cells
    }
}

/// 直接写入原始文本（用于构造非标准 CSV）
pub fn write_raw(content: &str, suffix: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut temp_file = Builder::new().suffix(suffix).tempfile()?;
    temp_file.write_all(content.as_bytes())?;
    temp_file.flush()?;
    Ok(temp_file)
}

// ==========================================
// Excel 测试表格
// ==========================================

/// 带类型的工作表单元格
#[derive(Clone, Copy)]
pub enum SheetCell {
    Text(&'static str),
    Number(f64),
    Blank,
}

/// 写出 .xlsx 临时文件（第一个工作表，首行为表头）
///
/// `rows` 中的 None 表示整行留空
pub fn write_xlsx(
    headers: &[&str],
    rows: &[Option<Vec<SheetCell>>],
) -> Result<NamedTempFile, Box<dyn Error>> {
    let temp_file = Builder::new().suffix(".xlsx").tempfile()?;

    let mut workbook = Workbook::new();
    let worksheet = workbook.add_worksheet();
    for (col, header) in headers.iter().enumerate() {
        worksheet.write_string(0, col as u16, *header)?;
    }
    for (idx, row) in rows.iter().enumerate() {
        let Some(cells) = row else { continue };
        let sheet_row = idx as u32 + 1;
        for (col, cell) in cells.iter().enumerate() {
            match cell {
                SheetCell::Text(text) => {
                    worksheet.write_string(sheet_row, col as u16, *text)?;
                }
                SheetCell::Number(n) => {
                    worksheet.write_number(sheet_row, col as u16, *n)?;
                }
                SheetCell::Blank => {}
            }
        }
    }
    workbook.save(temp_file.path())?;

    Ok(temp_file)
}
