// ==========================================
// 商品导入模板生成器
// ==========================================
// 用途: 生成带多规格示例的导入模板（CSV，可直接用 Excel 打开）
// 规则示例: 相同"商家商品编码"的行会合并为一个商品
// 用法: generate_template [输出路径]（默认 goods_template.csv）
// ==========================================

use csv::Writer;
use rental_catalog_import::domain::CatalogField;
use std::error::Error;
use std::fs::File;
use std::io::Write;

// 示例数据（同一商品两个 SKU）
const EXAMPLE_ROWS: &[[&str; 13]] = &[
    [
        "C001627013",
        "富士拍立得(多规格示例)",
        "ITEM_MULTI_001",
        "https://detail.tmall.com/item.htm?id=1",
        "20",
        "1",
        "99新",
        "SKU_A_001",
        "10",
        "套餐一(单机)",
        "1,3,7",
        "1:50,3:120,7:200",
        "20",
    ],
    [
        "C001627013",
        "富士拍立得(多规格示例)",
        "ITEM_MULTI_001",
        "https://detail.tmall.com/item.htm?id=1",
        "20",
        "1",
        "99新",
        "SKU_B_002",
        "15",
        "套餐二(含相纸)",
        "1,3,7",
        "1:60,3:150,7:250",
        "10",
    ],
];

fn main() -> Result<(), Box<dyn Error>> {
    let output = std::env::args()
        .nth(1)
        .unwrap_or_else(|| "goods_template.csv".to_string());

    let mut file = File::create(&output)?;
    // UTF-8 BOM，保证 Excel 正确识别中文表头
    file.write_all("\u{feff}".as_bytes())?;

    let mut writer = Writer::from_writer(file);
    writer.write_record(CatalogField::ALL.iter().map(|f| f.source_label()))?;
    for row in EXAMPLE_ROWS {
        writer.write_record(row)?;
    }
    writer.flush()?;

    println!("✓ 模板已生成: {}", output);
    Ok(())
}
