// ==========================================
// 租赁商品表格导入 - 按商品编码分组
// ==========================================
// 阶段 2: 标准字段行 → 商品分组
// 规则:
// - 分组键: outItemId（TRIM 后文本；数值 1001.0 与文本 "1001" 同组）
// - 组间顺序: 键首次出现的顺序（同一文件多次导入结果一致）
// - 组内顺序: 原始行序
// - 分组键缺失的行被跳过
// ==========================================

use crate::domain::{CatalogField, CatalogRow};
use std::collections::HashMap;

// ==========================================
// ProductGroup - 单个商品的行集合
// ==========================================
// 红线: 至少包含一行（只能由首行创建）
#[derive(Debug, Clone)]
pub struct ProductGroup {
    key: String,
    rows: Vec<CatalogRow>,
}

impl ProductGroup {
    fn new(key: String, first: CatalogRow) -> Self {
        Self {
            key,
            rows: vec![first],
        }
    }

    pub fn key(&self) -> &str {
        &self.key
    }

    /// 主行（分组首行），提供商品级标量字段
    pub fn master(&self) -> &CatalogRow {
        &self.rows[0]
    }

    pub fn rows(&self) -> &[CatalogRow] {
        &self.rows
    }

    pub fn len(&self) -> usize {
        self.rows.len()
    }

    pub fn is_empty(&self) -> bool {
        self.rows.is_empty()
    }
}

/// 分组结果
#[derive(Debug, Clone, Default)]
pub struct GroupingOutcome {
    pub groups: Vec<ProductGroup>,
    /// 因分组键缺失被跳过的行号
    pub skipped_rows: Vec<usize>,
}

impl GroupingOutcome {
    /// 进入分组的行数（= 输出 SKU 总数）
    pub fn grouped_row_count(&self) -> usize {
        self.groups.iter().map(ProductGroup::len).sum()
    }
}

/// 按 outItemId 稳定分组
pub fn group_by_item_id(rows: Vec<CatalogRow>) -> GroupingOutcome {
    let mut outcome = GroupingOutcome::default();
    let mut index: HashMap<String, usize> = HashMap::new();

    for row in rows {
        let Some(key) = row.get(CatalogField::OutItemId).as_text() else {
            outcome.skipped_rows.push(row.row_number);
            continue;
        };

        match index.get(&key) {
            Some(&pos) => outcome.groups[pos].rows.push(row),
            None => {
                index.insert(key.clone(), outcome.groups.len());
                outcome.groups.push(ProductGroup::new(key, row));
            }
        }
    }

    outcome
}
