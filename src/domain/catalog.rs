// ==========================================
// 租赁商品表格导入 - 目录领域模型
// ==========================================
// 用途: 导入层输出，原样交给商品创建接口
// 序列化: camelCase，与下游上架接口的字段名一致
// ==========================================

use serde::{Deserialize, Deserializer, Serialize, Serializer};

// ==========================================
// Product - 商品
// ==========================================
// 红线: 同一 outItemId 的所有行归属同一个 Product，
//       标量字段取自分组首行（主行）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Product {
    pub category_id: String,
    pub title: String,
    pub out_item_id: String, // 分组键
    pub path: String,        // 商品详情页地址
    pub rent_from_days: u32,
    pub fineness_grade: String,
    pub service_price: Option<f64>, // 元，原样透传
    pub skus: Vec<Sku>,             // 行序
}

// ==========================================
// Sku - 可租规格
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct Sku {
    pub out_sku_id: String,
    pub sale_price: u64, // 分
    pub sku_name: Option<String>,
    pub rent_durations: Vec<u32>, // 天
    pub duration_price_list: Vec<DurationPrice>,
    pub stock_calendar: StockCalendar,
}

/// 租期总价（租期天数 → 总价，分）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DurationPrice {
    pub duration: u32,
    pub total_sale_price: u64,
}

// ==========================================
// StockCalendar - 库存日历
// ==========================================
// 下游接口要求库存日历为 JSON 文本，因此序列化为字符串：
// "[{\"date\":\"20250101\",\"quantity\":5}, ...]"
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct StockCalendar {
    entries: Vec<StockEntry>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StockEntry {
    pub date: String, // YYYYMMDD
    pub quantity: u32,
}

impl StockCalendar {
    pub fn new(entries: Vec<StockEntry>) -> Self {
        Self { entries }
    }

    /// 未填写库存（区别于"库存为 0"的日历）
    pub fn empty() -> Self {
        Self::default()
    }

    pub fn entries(&self) -> &[StockEntry] {
        &self.entries
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn to_json(&self) -> String {
        serde_json::to_string(&self.entries).unwrap_or_else(|_| "[]".to_string())
    }
}

impl Serialize for StockCalendar {
    fn serialize<S: Serializer>(&self, serializer: S) -> Result<S::Ok, S::Error> {
        let text = serde_json::to_string(&self.entries).map_err(serde::ser::Error::custom)?;
        serializer.serialize_str(&text)
    }
}

impl<'de> Deserialize<'de> for StockCalendar {
    fn deserialize<D: Deserializer<'de>>(deserializer: D) -> Result<Self, D::Error> {
        let text = String::deserialize(deserializer)?;
        let entries = serde_json::from_str(&text).map_err(serde::de::Error::custom)?;
        Ok(Self { entries })
    }
}

// ==========================================
// CatalogEntry - 输出序列元素
// ==========================================
// 正常: [Product, Product, ...]
// 致命错误: [{"error": "..."}]（单元素）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(untagged)]
pub enum CatalogEntry {
    Product(Product),
    Error(ErrorEntry),
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ErrorEntry {
    pub error: String,
}

impl CatalogEntry {
    /// 构造单元素错误序列
    pub fn failure(message: impl Into<String>) -> Vec<CatalogEntry> {
        vec![CatalogEntry::Error(ErrorEntry {
            error: message.into(),
        })]
    }

    /// 检测错误形态；调用方须在把序列当作商品列表之前先判断
    pub fn error_message(entries: &[CatalogEntry]) -> Option<&str> {
        match entries {
            [CatalogEntry::Error(entry)] => Some(entry.error.as_str()),
            _ => None,
        }
    }

    /// 提取全部商品（错误条目被忽略）
    pub fn products(entries: &[CatalogEntry]) -> Vec<&Product> {
        entries
            .iter()
            .filter_map(|entry| match entry {
                CatalogEntry::Product(product) => Some(product),
                CatalogEntry::Error(_) => None,
            })
            .collect()
    }
}
