// ==========================================
// 租赁商品表格导入 - 数据清洗器实现
// ==========================================
// 阶段 3: 字段/取值转换
// 职责: 文本 TRIM / 金额元→分 / 逗号列表 / 天数:价格 对 / 整数
// 红线: 转换失败只影响当前字段或当前片段，
//       丢弃或取默认值，绝不中断所在行、所在商品
// ==========================================

use crate::domain::{CellValue, DurationPrice};
use rust_decimal::prelude::ToPrimitive;
use rust_decimal::{Decimal, RoundingStrategy};
use std::str::FromStr;

/// 列表分隔符（半角/全角逗号）
fn is_list_separator(c: char) -> bool {
    c == ',' || c == '，'
}

/// 天数与价格分隔符（半角/全角冒号）
fn is_pair_separator(c: char) -> bool {
    c == ':' || c == '：'
}

pub struct DataCleaner;

impl DataCleaner {
    // ==========================================
    // 文本
    // ==========================================

    /// 可选文本字段（Absent → None）
    pub fn clean_text(&self, value: &CellValue) -> Option<String> {
        value.as_text()
    }

    /// 必填文本字段（Absent → 空串，不阻断）
    pub fn text_or_empty(&self, value: &CellValue) -> String {
        value.as_text().unwrap_or_default()
    }

    /// 带默认值的文本字段
    pub fn text_or_default(&self, value: &CellValue, default: &str) -> String {
        value.as_text().unwrap_or_else(|| default.to_string())
    }

    // ==========================================
    // 数值
    // ==========================================

    /// 解析为有限浮点数
    pub fn parse_number(&self, value: &CellValue) -> Option<f64> {
        match value {
            CellValue::Absent => None,
            CellValue::Number(n) => Some(*n).filter(|n| n.is_finite()),
            CellValue::Text(s) => parse_number_text(s),
        }
    }

    /// 解析为正整数（向零截断；< 1 视为失败）
    pub fn parse_positive_int(&self, value: &CellValue) -> Option<u32> {
        self.parse_number(value).and_then(truncate_positive)
    }

    // ==========================================
    // 金额
    // ==========================================

    /// 元 → 分（失败/缺失/非正数 → 0）
    ///
    /// 舍入规则: 在分位做四舍五入（half-up），十进制精确计算，
    /// 例如 19.995 → 2000，12.50 → 1250
    pub fn to_cents(&self, value: &CellValue) -> u64 {
        self.parse_decimal(value)
            .and_then(yuan_to_fen)
            .unwrap_or(0)
    }

    /// 解析为十进制数（避免二进制浮点在分位上的误差）
    pub fn parse_decimal(&self, value: &CellValue) -> Option<Decimal> {
        match value {
            CellValue::Absent => None,
            CellValue::Number(n) => decimal_from_f64(*n),
            CellValue::Text(s) => parse_decimal_text(s),
        }
    }

    // ==========================================
    // 分隔字段
    // ==========================================

    /// 租期列表: "1,3,7" / "1，3，7" → [1, 3, 7]
    ///
    /// 无法解析的片段被丢弃，其余保持原顺序
    pub fn parse_rent_durations(&self, value: &CellValue) -> Vec<u32> {
        let Some(text) = value.as_text() else {
            return Vec::new();
        };

        text.split(is_list_separator)
            .filter_map(parse_duration_token)
            .collect()
    }

    /// 租期总价: "1:50,3:120" → [{1, 5000}, {3, 12000}]
    ///
    /// 每个片段独立解析；缺少冒号的片段被丢弃（不当作裸天数）
    pub fn parse_duration_prices(&self, value: &CellValue) -> Vec<DurationPrice> {
        let Some(text) = value.as_text() else {
            return Vec::new();
        };

        text.split(is_list_separator)
            .filter_map(parse_duration_price_token)
            .collect()
    }

    // ==========================================
    // 库存
    // ==========================================

    /// 每日库存数量（非负整数）
    ///
    /// - 数值单元格: 向零截断
    /// - 文本单元格: 必须是整数字面量（"5.5" 视为失败）
    /// - 负数/越界/无法解析 → None（生成空日历，而非 0 库存日历）
    pub fn parse_stock_quantity(&self, value: &CellValue) -> Option<u32> {
        match value {
            CellValue::Absent => None,
            CellValue::Number(n) => {
                if !n.is_finite() || *n < 0.0 {
                    return None;
                }
                let truncated = n.trunc();
                if truncated > f64::from(u32::MAX) {
                    None
                } else {
                    Some(truncated as u32)
                }
            }
            CellValue::Text(s) => s.trim().parse::<u32>().ok(),
        }
    }
}

// ==========================================
// 片段级转换（单个片段失败 → None）
// ==========================================

fn parse_duration_token(token: &str) -> Option<u32> {
    let token = token.trim();
    if token.is_empty() {
        return None;
    }
    parse_number_text(token).and_then(truncate_positive)
}

fn parse_duration_price_token(token: &str) -> Option<DurationPrice> {
    let (day_part, price_part) = token.trim().split_once(is_pair_separator)?;
    let duration = parse_duration_token(day_part)?;
    let price = parse_decimal_text(price_part.trim())?;
    let total_sale_price = yuan_to_fen(price).unwrap_or(0);

    Some(DurationPrice {
        duration,
        total_sale_price,
    })
}

fn parse_number_text(text: &str) -> Option<f64> {
    text.trim().parse::<f64>().ok().filter(|n| n.is_finite())
}

fn truncate_positive(n: f64) -> Option<u32> {
    let truncated = n.trunc();
    if truncated < 1.0 || truncated > f64::from(u32::MAX) {
        None
    } else {
        Some(truncated as u32)
    }
}

fn parse_decimal_text(text: &str) -> Option<Decimal> {
    let text = text.trim();
    if text.is_empty() {
        return None;
    }
    // 科学计数法等形式先按浮点解析，再取其最短十进制表示
    Decimal::from_str(text)
        .ok()
        .or_else(|| parse_number_text(text).and_then(decimal_from_f64))
}

fn decimal_from_f64(n: f64) -> Option<Decimal> {
    if !n.is_finite() {
        return None;
    }
    // f64 的 Display 输出最短可回读的十进制串（不含指数），
    // 因此 19.995 按 "19.995" 处理而非 19.99499999…
    Decimal::from_str(&n.to_string()).ok()
}

/// 元 → 分（half-up）；非正数返回 None
fn yuan_to_fen(yuan: Decimal) -> Option<u64> {
    if yuan <= Decimal::ZERO {
        return None;
    }
    yuan.checked_mul(Decimal::ONE_HUNDRED)?
        .round_dp_with_strategy(0, RoundingStrategy::MidpointAwayFromZero)
        .to_u64()
}
