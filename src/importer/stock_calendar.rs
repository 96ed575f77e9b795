// ==========================================
// 租赁商品表格导入 - 库存日历生成
// ==========================================
// 规则: 从参考日期（含）起连续 N 天，每天同一库存数量
// 日期格式: YYYYMMDD
// 说明: 参考日期取导入时的当前日期，目录始终开放滚动窗口；
//       测试中通过 Clock 注入固定日期
// ==========================================

use crate::domain::{StockCalendar, StockEntry};
use chrono::{Days, Local, NaiveDate};

/// 库存日历日期格式
pub const STOCK_DATE_FORMAT: &str = "%Y%m%d";

// ==========================================
// Clock - 参考日期来源
// ==========================================
pub trait Clock: Send + Sync {
    fn today(&self) -> NaiveDate;
}

/// 系统本地日期
pub struct SystemClock;

impl Clock for SystemClock {
    fn today(&self) -> NaiveDate {
        Local::now().date_naive()
    }
}

/// 固定日期（测试/重放用）
#[derive(Debug, Clone, Copy)]
pub struct FixedClock(pub NaiveDate);

impl Clock for FixedClock {
    fn today(&self) -> NaiveDate {
        self.0
    }
}

/// 生成库存日历
///
/// # 参数
/// - quantity: 每日库存；None 表示未填写或无法解析
/// - start: 参考日期（第一天）
/// - days: 窗口天数
///
/// # 返回
/// - quantity 为 None → 空日历（与"库存为 0"区分）
/// - 否则 → days 条连续日期记录
pub fn build_stock_calendar(quantity: Option<u32>, start: NaiveDate, days: u32) -> StockCalendar {
    let Some(quantity) = quantity else {
        return StockCalendar::empty();
    };

    let entries = (0..days)
        .map_while(|offset| start.checked_add_days(Days::new(u64::from(offset))))
        .map(|date| StockEntry {
            date: date.format(STOCK_DATE_FORMAT).to_string(),
            quantity,
        })
        .collect();

    StockCalendar::new(entries)
}

#[cfg(test)]
mod tests {
    use super::*;

    fn date(y: i32, m: u32, d: u32) -> NaiveDate {
        NaiveDate::from_ymd_opt(y, m, d).unwrap()
    }

    #[test]
    fn test_calendar_shape() {
        let calendar = build_stock_calendar(Some(5), date(2025, 1, 1), 90);

        assert_eq!(calendar.len(), 90);
        assert!(calendar.entries().iter().all(|e| e.quantity == 5));
        assert_eq!(calendar.entries()[0].date, "20250101");
        assert_eq!(calendar.entries()[89].date, "20250331");
    }

    #[test]
    fn test_calendar_consecutive_across_month_and_leap_day() {
        let calendar = build_stock_calendar(Some(1), date(2024, 2, 28), 3);
        let dates: Vec<&str> = calendar.entries().iter().map(|e| e.date.as_str()).collect();
        assert_eq!(dates, vec!["20240228", "20240229", "20240301"]);
    }

    #[test]
    fn test_calendar_absent_quantity_is_empty() {
        let calendar = build_stock_calendar(None, date(2025, 1, 1), 90);
        assert!(calendar.is_empty());
        assert_eq!(calendar.to_json(), "[]");
    }

    #[test]
    fn test_calendar_zero_quantity_is_not_empty() {
        let calendar = build_stock_calendar(Some(0), date(2025, 1, 1), 90);
        assert_eq!(calendar.len(), 90);
        assert!(calendar.entries().iter().all(|e| e.quantity == 0));
    }

    #[test]
    fn test_fixed_clock() {
        let clock = FixedClock(date(2025, 6, 1));
        assert_eq!(clock.today(), date(2025, 6, 1));
    }
}
