// ==========================================
// 租赁商品表格导入 - 导入模块错误类型
// ==========================================
// 工具: thiserror 派生宏
// 范围: 只有文件级（致命）错误；字段/片段级转换失败
//       在 data_cleaner 内被丢弃或取默认值，不会出现在这里
// ==========================================

use crate::i18n::t_with_args;
use thiserror::Error;

/// 导入模块错误类型
#[derive(Error, Debug)]
pub enum ImportError {
    // ===== 文件相关错误 =====
    #[error("文件不存在: {0}")]
    FileNotFound(String),

    #[error("文件格式不支持: {0}（仅支持 .xlsx/.xlsm/.xlsb/.xls/.ods/.csv）")]
    UnsupportedFormat(String),

    #[error("文件读取失败: {0}")]
    FileReadError(String),

    #[error("Excel 解析失败: {0}")]
    ExcelParseError(String),

    #[error("CSV 解析失败: {0}")]
    CsvParseError(String),

    #[error("表格无表头行")]
    EmptyWorkbook,

    // ===== 表结构错误 =====
    #[error("缺少分组列 '{column}'（字段映射后不存在），实际列: {found:?}")]
    MissingGroupingColumn { column: String, found: Vec<String> },

    #[error("缺少必填列: {0:?}")]
    MissingRequiredColumns(Vec<String>),

    // ===== 通用错误 =====
    #[error("内部错误: {0}")]
    InternalError(String),
}

impl ImportError {
    /// 面向用户的本地化消息（用于错误序列 [{"error": ...}]）
    pub fn user_message(&self) -> String {
        match self {
            ImportError::FileNotFound(path) => {
                t_with_args("import.file_not_found", &[("path", path)])
            }
            ImportError::UnsupportedFormat(ext) => {
                t_with_args("import.unsupported_format", &[("ext", ext)])
            }
            ImportError::FileReadError(detail) => {
                t_with_args("import.file_read_error", &[("detail", detail)])
            }
            ImportError::ExcelParseError(detail) => {
                t_with_args("import.excel_parse_error", &[("detail", detail)])
            }
            ImportError::CsvParseError(detail) => {
                t_with_args("import.csv_parse_error", &[("detail", detail)])
            }
            ImportError::EmptyWorkbook => t_with_args("import.empty_workbook", &[]),
            ImportError::MissingGroupingColumn { column, found } => t_with_args(
                "import.missing_grouping_column",
                &[("column", column), ("found", &found.join(", "))],
            ),
            ImportError::MissingRequiredColumns(columns) => t_with_args(
                "import.missing_required_columns",
                &[("columns", &columns.join(", "))],
            ),
            ImportError::InternalError(detail) => {
                t_with_args("import.internal_error", &[("detail", detail)])
            }
        }
    }
}

// 实现 From<std::io::Error>
impl From<std::io::Error> for ImportError {
    fn from(err: std::io::Error) -> Self {
        ImportError::FileReadError(err.to_string())
    }
}

// 实现 From<csv::Error>
impl From<csv::Error> for ImportError {
    fn from(err: csv::Error) -> Self {
        ImportError::CsvParseError(err.to_string())
    }
}

// 实现 From<calamine::Error>
impl From<calamine::Error> for ImportError {
    fn from(err: calamine::Error) -> Self {
        ImportError::ExcelParseError(err.to_string())
    }
}

/// Result 类型别名
pub type ImportResult<T> = Result<T, ImportError>;
