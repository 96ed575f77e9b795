// ==========================================
// 租赁商品表格导入 - 字段映射器实现
// ==========================================
// 阶段 1: 表头标签 → 标准字段
// 职责: 表头归一化 + 固定词表查找（含别名）
// ==========================================

use crate::domain::{CatalogField, CatalogRow, RawRow};
use crate::importer::catalog_importer_trait::FieldMapper as FieldMapperTrait;
use std::collections::HashMap;
use tracing::warn;

// ==========================================
// ColumnMapping - 表头解析结果
// ==========================================
#[derive(Debug, Clone, Default)]
pub struct ColumnMapping {
    columns: HashMap<CatalogField, usize>,
    unmapped: Vec<String>,
}

impl ColumnMapping {
    pub fn column_of(&self, field: CatalogField) -> Option<usize> {
        self.columns.get(&field).copied()
    }

    pub fn contains(&self, field: CatalogField) -> bool {
        self.columns.contains_key(&field)
    }

    /// 未被词表识别的表头（原样透传，不参与转换）
    pub fn unmapped(&self) -> &[String] {
        &self.unmapped
    }

    /// 映射后缺失的必填字段（按模板列顺序）
    pub fn missing_required(&self) -> Vec<CatalogField> {
        CatalogField::ALL
            .iter()
            .copied()
            .filter(|f| f.is_required() && !self.contains(*f))
            .collect()
    }
}

// ==========================================
// FieldMapper - 字段映射器
// ==========================================
pub struct FieldMapper {
    // 归一化标签 → 标准字段
    lookup: HashMap<String, CatalogField>,
}

impl FieldMapper {
    pub fn new() -> Self {
        let mut lookup = HashMap::new();
        for field in CatalogField::ALL {
            // 别名: 模板标签 / 标准字段名 / 旧版下划线列名
            let aliases = std::iter::once(field.source_label())
                .chain(std::iter::once(field.canonical_name()))
                .chain(field.legacy_key());
            for alias in aliases {
                lookup.insert(normalize_label(alias), field);
            }
        }
        // 旧版模板把 SKU 租期写作 rent_duration
        lookup.insert(normalize_label("rent_duration"), CatalogField::RentDurations);

        Self { lookup }
    }

    /// 查找单个表头对应的标准字段
    pub fn field_for(&self, header: &str) -> Option<CatalogField> {
        self.lookup.get(&normalize_label(header)).copied()
    }
}

impl Default for FieldMapper {
    fn default() -> Self {
        Self::new()
    }
}

impl FieldMapperTrait for FieldMapper {
    fn resolve_columns(&self, headers: &[String]) -> ColumnMapping {
        let mut mapping = ColumnMapping::default();

        for (idx, header) in headers.iter().enumerate() {
            match self.field_for(header) {
                Some(field) => {
                    if let Some(first) = mapping.column_of(field) {
                        // 同一字段出现多列：保留最左侧一列
                        warn!(
                            field = field.canonical_name(),
                            kept_column = first + 1,
                            ignored_column = idx + 1,
                            "表头重复映射到同一字段"
                        );
                    } else {
                        mapping.columns.insert(field, idx);
                    }
                }
                None => {
                    if !header.trim().is_empty() {
                        mapping.unmapped.push(header.clone());
                    }
                }
            }
        }

        mapping
    }

    fn map_row(&self, row: &RawRow, mapping: &ColumnMapping) -> CatalogRow {
        let mut mapped = CatalogRow::new(row.row_number);
        for (field, column) in &mapping.columns {
            mapped.set(*field, row.cell(*column).clone());
        }
        mapped
    }
}

/// 表头归一化
///
/// - 全角括号/逗号/冒号 → 半角
/// - 去除所有空白（含全角空格）
/// - ASCII 字母转小写
pub fn normalize_label(raw: &str) -> String {
    raw.trim_start_matches('\u{feff}')
        .chars()
        .filter(|c| !c.is_whitespace())
        .map(|c| match c {
            '（' => '(',
            '）' => ')',
            '，' => ',',
            '：' => ':',
            other => other.to_ascii_lowercase(),
        })
        .collect()
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::CellValue;

    fn headers(labels: &[&str]) -> Vec<String> {
        labels.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn test_template_labels_map_to_canonical_fields() {
        let mapper = FieldMapper::new();
        for field in CatalogField::ALL {
            assert_eq!(mapper.field_for(field.source_label()), Some(field));
        }
    }

    #[test]
    fn test_full_width_punctuation_and_spaces_folded() {
        let mapper = FieldMapper::new();
        assert_eq!(
            mapper.field_for(" 类目ID（必填） "),
            Some(CatalogField::CategoryId)
        );
        assert_eq!(
            mapper.field_for("SKU租期总价（元，格式　天数：价格，逗号分隔）"),
            Some(CatalogField::DurationPrices)
        );
    }

    #[test]
    fn test_canonical_and_legacy_aliases() {
        let mapper = FieldMapper::new();
        assert_eq!(mapper.field_for("outItemId"), Some(CatalogField::OutItemId));
        assert_eq!(mapper.field_for("sku_prices"), Some(CatalogField::DurationPrices));
        assert_eq!(
            mapper.field_for("rent_from_numbers_of_day"),
            Some(CatalogField::RentFromDays)
        );
        assert_eq!(mapper.field_for("备注"), None);
    }

    #[test]
    fn test_resolve_columns_unmapped_and_missing_required() {
        let mapper = FieldMapper::new();
        let mapping = mapper.resolve_columns(&headers(&[
            "商家商品编码(必填,用于分组)",
            "备注",
            "商家SKU编码",
        ]));

        assert_eq!(mapping.column_of(CatalogField::OutItemId), Some(0));
        assert_eq!(mapping.column_of(CatalogField::OutSkuId), Some(2));
        assert_eq!(mapping.unmapped(), &["备注".to_string()]);
        assert_eq!(
            mapping.missing_required(),
            vec![CatalogField::CategoryId, CatalogField::Title, CatalogField::Path]
        );
    }

    #[test]
    fn test_duplicate_header_keeps_leftmost() {
        let mapper = FieldMapper::new();
        let mapping = mapper.resolve_columns(&headers(&["outItemId", "商家商品编码(必填,用于分组)"]));
        assert_eq!(mapping.column_of(CatalogField::OutItemId), Some(0));
    }

    #[test]
    fn test_map_row() {
        let mapper = FieldMapper::new();
        let mapping = mapper.resolve_columns(&headers(&["备注", "outItemId", "title"]));
        let row = RawRow {
            row_number: 2,
            cells: vec![
                CellValue::Text("ignored".to_string()),
                CellValue::Text("ITEM_001".to_string()),
            ],
        };

        let mapped = mapper.map_row(&row, &mapping);
        assert_eq!(mapped.row_number, 2);
        assert_eq!(
            mapped.get(CatalogField::OutItemId),
            &CellValue::Text("ITEM_001".to_string())
        );
        // 短行：title 列不存在
        assert!(mapped.get(CatalogField::Title).is_absent());
    }
}
