// ==========================================
// 租赁商品表格导入 - 单元格类型与导入中间结构
// ==========================================
// 用途: 文件解析 → 字段映射 → 分组 之间传递的数据
// 生命周期: 仅在一次导入调用内
// ==========================================

use serde::{Deserialize, Serialize};
use std::collections::HashMap;

// 被视为"缺失"的文本哨兵值（与常见表格工具的 NA 约定一致）
const NA_SENTINELS: &[&str] = &[
    "#N/A", "#N/A N/A", "#NA", "-1.#IND", "-1.#QNAN", "-NaN", "-nan", "1.#IND", "1.#QNAN",
    "<NA>", "N/A", "NA", "NULL", "NaN", "None", "n/a", "nan", "null",
];

// ==========================================
// CellValue - 单元格值
// ==========================================
// 红线: 空白/NaN/错误单元格在入口处统一归一为 Absent，
//       下游转换只对这三种形态做穷尽匹配
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub enum CellValue {
    Absent,
    Number(f64),
    Text(String),
}

impl CellValue {
    /// 从文本构造（TRIM；空白或 NA 哨兵 → Absent）
    pub fn from_text(raw: &str) -> Self {
        let trimmed = raw.trim();
        if trimmed.is_empty() || NA_SENTINELS.contains(&trimmed) {
            CellValue::Absent
        } else {
            CellValue::Text(trimmed.to_string())
        }
    }

    /// 从数值构造（NaN/无穷 → Absent）
    pub fn from_number(value: f64) -> Self {
        if value.is_finite() {
            CellValue::Number(value)
        } else {
            CellValue::Absent
        }
    }

    pub fn is_absent(&self) -> bool {
        matches!(self, CellValue::Absent)
    }

    /// 渲染为文本
    ///
    /// 整数值的数值单元格不带小数部分（1001.0 → "1001"）
    pub fn as_text(&self) -> Option<String> {
        match self {
            CellValue::Absent => None,
            CellValue::Number(n) => Some(render_number(*n)),
            CellValue::Text(s) => Some(s.clone()),
        }
    }
}

fn render_number(n: f64) -> String {
    // 2^53 以内的整数可以无损转 i64
    if n.fract() == 0.0 && n.abs() < 9_007_199_254_740_992.0 {
        format!("{}", n as i64)
    } else {
        format!("{}", n)
    }
}

// ==========================================
// CatalogField - 标准字段
// ==========================================
// 源表头（中文标签）→ 标准字段名 的固定词表
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum CatalogField {
    CategoryId,
    Title,
    OutItemId,
    Path,
    ServicePrice,
    RentFromDays,
    FinenessGrade,
    OutSkuId,
    SalePrice,
    SkuName,
    RentDurations,
    DurationPrices,
    StockQuantity,
}

impl CatalogField {
    /// 全部字段（按模板列顺序）
    pub const ALL: [CatalogField; 13] = [
        CatalogField::CategoryId,
        CatalogField::Title,
        CatalogField::OutItemId,
        CatalogField::Path,
        CatalogField::ServicePrice,
        CatalogField::RentFromDays,
        CatalogField::FinenessGrade,
        CatalogField::OutSkuId,
        CatalogField::SalePrice,
        CatalogField::SkuName,
        CatalogField::RentDurations,
        CatalogField::DurationPrices,
        CatalogField::StockQuantity,
    ];

    /// 模板中的源表头标签
    pub fn source_label(self) -> &'static str {
        match self {
            CatalogField::CategoryId => "类目ID(必填)",
            CatalogField::Title => "商品标题(必填)",
            CatalogField::OutItemId => "商家商品编码(必填,用于分组)",
            CatalogField::Path => "商品详情页地址(必填)",
            CatalogField::ServicePrice => "增值服务价格(元)",
            CatalogField::RentFromDays => "起租天数(默认1)",
            CatalogField::FinenessGrade => "成色等级(默认99新)",
            CatalogField::OutSkuId => "商家SKU编码",
            CatalogField::SalePrice => "最低日单价(元)",
            CatalogField::SkuName => "SKU规格名称",
            CatalogField::RentDurations => "SKU租期(天,逗号分隔)",
            CatalogField::DurationPrices => "SKU租期总价(元,格式 天数:价格,逗号分隔)",
            CatalogField::StockQuantity => "每日库存数量",
        }
    }

    /// 标准字段名
    pub fn canonical_name(self) -> &'static str {
        match self {
            CatalogField::CategoryId => "categoryId",
            CatalogField::Title => "title",
            CatalogField::OutItemId => "outItemId",
            CatalogField::Path => "path",
            CatalogField::ServicePrice => "servicePrice",
            CatalogField::RentFromDays => "rentFromDays",
            CatalogField::FinenessGrade => "finenessGrade",
            CatalogField::OutSkuId => "outSkuId",
            CatalogField::SalePrice => "salePrice",
            CatalogField::SkuName => "skuName",
            CatalogField::RentDurations => "rentDurations",
            CatalogField::DurationPrices => "durationPriceList",
            CatalogField::StockQuantity => "stockQuantity",
        }
    }

    /// 旧版模板使用的下划线列名（兼容）
    pub fn legacy_key(self) -> Option<&'static str> {
        match self {
            CatalogField::ServicePrice => Some("service_price"),
            CatalogField::RentFromDays => Some("rent_from_numbers_of_day"),
            CatalogField::FinenessGrade => Some("item_fineness_grade"),
            CatalogField::SkuName => Some("sku_name"),
            CatalogField::RentDurations => Some("rent_durations"),
            CatalogField::DurationPrices => Some("sku_prices"),
            CatalogField::StockQuantity => Some("stock_quantity"),
            _ => None,
        }
    }

    /// 标签中标注了"必填"的字段
    pub fn is_required(self) -> bool {
        matches!(
            self,
            CatalogField::CategoryId
                | CatalogField::Title
                | CatalogField::OutItemId
                | CatalogField::Path
        )
    }
}

// ==========================================
// RawTable / RawRow - 文件解析产物
// ==========================================
// 单元格按列位置存放，与 headers 一一对应
#[derive(Debug, Clone, Default)]
pub struct RawTable {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

#[derive(Debug, Clone)]
pub struct RawRow {
    /// 表格中的行号（表头为第 1 行）
    pub row_number: usize,
    pub cells: Vec<CellValue>,
}

impl RawRow {
    pub fn cell(&self, column: usize) -> &CellValue {
        self.cells.get(column).unwrap_or(&ABSENT)
    }
}

static ABSENT: CellValue = CellValue::Absent;

// ==========================================
// CatalogRow - 字段映射后的行
// ==========================================
#[derive(Debug, Clone)]
pub struct CatalogRow {
    pub row_number: usize,
    values: HashMap<CatalogField, CellValue>,
}

impl CatalogRow {
    pub fn new(row_number: usize) -> Self {
        Self {
            row_number,
            values: HashMap::new(),
        }
    }

    pub fn with(mut self, field: CatalogField, value: CellValue) -> Self {
        self.set(field, value);
        self
    }

    pub fn set(&mut self, field: CatalogField, value: CellValue) {
        if value.is_absent() {
            self.values.remove(&field);
        } else {
            self.values.insert(field, value);
        }
    }

    /// 读取字段值（未映射或缺失 → Absent）
    pub fn get(&self, field: CatalogField) -> &CellValue {
        self.values.get(&field).unwrap_or(&ABSENT)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_from_text_blank_and_sentinels_are_absent() {
        assert_eq!(CellValue::from_text(""), CellValue::Absent);
        assert_eq!(CellValue::from_text("   "), CellValue::Absent);
        assert_eq!(CellValue::from_text("NaN"), CellValue::Absent);
        assert_eq!(CellValue::from_text("null"), CellValue::Absent);
        assert_eq!(
            CellValue::from_text("  SKU_A  "),
            CellValue::Text("SKU_A".to_string())
        );
    }

    #[test]
    fn test_from_number_nan_is_absent() {
        assert_eq!(CellValue::from_number(f64::NAN), CellValue::Absent);
        assert_eq!(CellValue::from_number(f64::INFINITY), CellValue::Absent);
        assert_eq!(CellValue::from_number(2.5), CellValue::Number(2.5));
    }

    #[test]
    fn test_as_text_integral_number() {
        assert_eq!(CellValue::Number(1001.0).as_text(), Some("1001".to_string()));
        assert_eq!(CellValue::Number(12.5).as_text(), Some("12.5".to_string()));
        assert_eq!(CellValue::Absent.as_text(), None);
    }

    #[test]
    fn test_catalog_row_absent_values_not_stored() {
        let row = CatalogRow::new(2)
            .with(CatalogField::Title, CellValue::Absent)
            .with(CatalogField::OutSkuId, CellValue::Text("S1".to_string()));

        assert!(row.get(CatalogField::Title).is_absent());
        assert!(row.get(CatalogField::Path).is_absent());
        assert_eq!(
            row.get(CatalogField::OutSkuId),
            &CellValue::Text("S1".to_string())
        );
    }

    #[test]
    fn test_required_fields() {
        let required: Vec<_> = CatalogField::ALL
            .iter()
            .filter(|f| f.is_required())
            .map(|f| f.canonical_name())
            .collect();
        assert_eq!(required, vec!["categoryId", "title", "outItemId", "path"]);
    }
}
