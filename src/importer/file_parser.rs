// ==========================================
// 租赁商品表格导入 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 支持: Excel (.xlsx/.xlsm/.xlsb/.xls/.ods) / CSV (.csv)
// 输出: 表头 + 单元格（Absent / Number / Text）
// ==========================================

use crate::domain::{CellValue, RawRow, RawTable};
use crate::importer::catalog_importer_trait::FileParser;
use crate::importer::error::{ImportError, ImportResult};
use calamine::{open_workbook_auto, Data, Reader};
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::debug;

const EXCEL_EXTENSIONS: &[&str] = &["xlsx", "xlsm", "xlsb", "xls", "ods"];

fn extension_of(path: &Path) -> String {
    path.extension()
        .and_then(|e| e.to_str())
        .unwrap_or("")
        .to_lowercase()
}

fn ensure_exists(path: &Path) -> ImportResult<()> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }
    Ok(())
}

/// 表头清洗：去 BOM + TRIM
fn clean_header(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}').trim().to_string()
}

// ==========================================
// CSV Parser 实现
// ==========================================
// CSV 没有单元格类型，非空值一律为 Text，由转换阶段按需解析
pub struct CsvParser;

impl CsvParser {
    /// 从任意 Reader 解析（上传内容已在内存中时使用）
    pub fn parse_reader<R: Read>(&self, reader: R) -> ImportResult<RawTable> {
        let mut reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致
            .from_reader(reader);

        // 读取表头
        let headers: Vec<String> = reader.headers()?.iter().map(clean_header).collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::EmptyWorkbook);
        }

        // 读取所有行（表头为第 1 行）
        let mut rows = Vec::new();
        for (idx, result) in reader.records().enumerate() {
            let record = result?;
            let cells: Vec<CellValue> = record.iter().map(CellValue::from_text).collect();

            // 跳过完全空白的行
            if cells.iter().all(CellValue::is_absent) {
                continue;
            }

            rows.push(RawRow {
                row_number: idx + 2,
                cells,
            });
        }

        Ok(RawTable { headers, rows })
    }
}

impl FileParser for CsvParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        // 检查扩展名
        if file_path.extension().is_some() {
            let ext = extension_of(file_path);
            if ext != "csv" {
                return Err(ImportError::UnsupportedFormat(ext));
            }
        }

        let file = File::open(file_path)?;
        let table = self.parse_reader(file)?;
        debug!(rows = table.rows.len(), columns = table.headers.len(), "CSV 解析完成");
        Ok(table)
    }
}

// ==========================================
// Excel Parser 实现
// ==========================================
// 只读取第一个工作表
pub struct ExcelParser;

impl ExcelParser {
    /// 单元格 → CellValue（空白/错误单元格 → Absent）
    pub fn cell_value(cell: &Data) -> CellValue {
        match cell {
            Data::Empty | Data::Error(_) => CellValue::Absent,
            Data::Int(v) => CellValue::from_number(*v as f64),
            Data::Float(v) => CellValue::from_number(*v),
            Data::String(s) => CellValue::from_text(s),
            Data::Bool(b) => CellValue::Text(b.to_string()),
            other => CellValue::from_text(&other.to_string()),
        }
    }
}

impl FileParser for ExcelParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        ensure_exists(file_path)?;

        // 检查扩展名
        let ext = extension_of(file_path);
        if !EXCEL_EXTENSIONS.contains(&ext.as_str()) {
            return Err(ImportError::UnsupportedFormat(ext));
        }

        // 打开 Excel 文件（按扩展名自动选择格式）
        let mut workbook = open_workbook_auto(file_path)?;

        // 读取第一个 sheet
        let sheet_name = workbook
            .sheet_names()
            .first()
            .cloned()
            .ok_or_else(|| ImportError::ExcelParseError("Excel 文件无工作表".to_string()))?;

        let range = workbook.worksheet_range(&sheet_name)?;

        // range 起点不一定是 A1；行号按绝对位置计算
        let first_row = range.start().map(|(row, _)| row as usize).unwrap_or(0);

        // 提取表头（第一行）
        let mut rows = range.rows();
        let header_row = rows.next().ok_or(ImportError::EmptyWorkbook)?;
        let headers: Vec<String> = header_row
            .iter()
            .map(|cell| clean_header(&cell.to_string()))
            .collect();
        if headers.iter().all(|h| h.is_empty()) {
            return Err(ImportError::EmptyWorkbook);
        }

        // 读取数据行
        let mut records = Vec::new();
        for (idx, data_row) in rows.enumerate() {
            let cells: Vec<CellValue> = data_row.iter().map(Self::cell_value).collect();

            // 跳过完全空白的行
            if cells.iter().all(CellValue::is_absent) {
                continue;
            }

            records.push(RawRow {
                row_number: first_row + idx + 2,
                cells,
            });
        }

        debug!(
            sheet = %sheet_name,
            rows = records.len(),
            columns = headers.len(),
            "Excel 解析完成"
        );

        Ok(RawTable {
            headers,
            rows: records,
        })
    }
}

// ==========================================
// 通用文件解析器（根据扩展名自动选择）
// ==========================================
pub struct UniversalFileParser;

impl FileParser for UniversalFileParser {
    fn parse_to_raw_table(&self, file_path: &Path) -> ImportResult<RawTable> {
        let ext = extension_of(file_path);

        match ext.as_str() {
            "csv" => CsvParser.parse_to_raw_table(file_path),
            e if EXCEL_EXTENSIONS.contains(&e) => ExcelParser.parse_to_raw_table(file_path),
            _ => {
                ensure_exists(file_path)?;
                Err(ImportError::UnsupportedFormat(ext))
            }
        }
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;
    use tempfile::{Builder, NamedTempFile};

    fn temp_with_suffix(suffix: &str) -> NamedTempFile {
        Builder::new().suffix(suffix).tempfile().unwrap()
    }

    #[test]
    fn test_csv_parser_valid_file() {
        let temp_file = temp_with_suffix(".csv");
        {
            // 表头含半角逗号，需按 CSV 规则加引号
            let mut writer = csv::Writer::from_writer(temp_file.reopen().unwrap());
            writer
                .write_record(["商家商品编码(必填,用于分组)", "商家SKU编码", "最低日单价(元)"])
                .unwrap();
            writer.write_record(["ITEM_001", "SKU_A", "10"]).unwrap();
            writer.write_record(["ITEM_001", "SKU_B", "15.5"]).unwrap();
            writer.flush().unwrap();
        }

        let table = CsvParser.parse_to_raw_table(temp_file.path()).unwrap();

        assert_eq!(table.headers.len(), 3);
        assert_eq!(table.headers[0], "商家商品编码(必填,用于分组)");
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[0].row_number, 2);
        assert_eq!(table.rows[0].cell(1), &CellValue::Text("SKU_A".to_string()));
        assert_eq!(table.rows[1].cell(2), &CellValue::Text("15.5".to_string()));
    }

    #[test]
    fn test_csv_parser_file_not_found() {
        let result = CsvParser.parse_to_raw_table(Path::new("non_existent.csv"));
        assert!(matches!(result, Err(ImportError::FileNotFound(_))));
    }

    #[test]
    fn test_csv_parser_skip_empty_rows() {
        let mut temp_file = temp_with_suffix(".csv");
        writeln!(temp_file, "outItemId,outSkuId").unwrap();
        writeln!(temp_file, "ITEM_001,SKU_A").unwrap();
        writeln!(temp_file, " , ").unwrap(); // 空行
        writeln!(temp_file, "ITEM_002,SKU_B").unwrap();

        let table = CsvParser.parse_to_raw_table(temp_file.path()).unwrap();

        // 应跳过空行，行号保持原始位置
        assert_eq!(table.rows.len(), 2);
        assert_eq!(table.rows[1].row_number, 4);
    }

    #[test]
    fn test_csv_parser_blank_and_na_cells_absent() {
        let csv = "outItemId,skuName,stockQuantity\nITEM_001,,NaN\n";
        let table = CsvParser.parse_reader(csv.as_bytes()).unwrap();

        assert!(table.rows[0].cell(1).is_absent());
        assert!(table.rows[0].cell(2).is_absent());
        // 短行缺失的列同样视为 Absent
        assert!(table.rows[0].cell(7).is_absent());
    }

    #[test]
    fn test_csv_parser_strips_bom_and_whitespace_in_headers() {
        let csv = "\u{feff} outItemId , title \nITEM_001,相机\n";
        let table = CsvParser.parse_reader(csv.as_bytes()).unwrap();
        assert_eq!(table.headers, vec!["outItemId".to_string(), "title".to_string()]);
    }

    #[test]
    fn test_universal_parser_unsupported_format() {
        let temp_file = temp_with_suffix(".txt");
        let result = UniversalFileParser.parse_to_raw_table(temp_file.path());
        assert!(matches!(result, Err(ImportError::UnsupportedFormat(ext)) if ext == "txt"));
    }

    #[test]
    fn test_excel_parser_corrupt_file() {
        let mut temp_file = temp_with_suffix(".xlsx");
        temp_file.write_all(b"definitely not a zip archive").unwrap();

        let result = UniversalFileParser.parse_to_raw_table(temp_file.path());
        assert!(matches!(result, Err(ImportError::ExcelParseError(_))));
    }

    #[test]
    fn test_excel_cell_value_conversion() {
        assert_eq!(ExcelParser::cell_value(&Data::Empty), CellValue::Absent);
        assert_eq!(ExcelParser::cell_value(&Data::Int(20)), CellValue::Number(20.0));
        assert_eq!(ExcelParser::cell_value(&Data::Float(12.5)), CellValue::Number(12.5));
        assert_eq!(ExcelParser::cell_value(&Data::Float(f64::NAN)), CellValue::Absent);
        assert_eq!(
            ExcelParser::cell_value(&Data::String("  99新 ".to_string())),
            CellValue::Text("99新".to_string())
        );
        assert_eq!(
            ExcelParser::cell_value(&Data::String("   ".to_string())),
            CellValue::Absent
        );
    }
}
