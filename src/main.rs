// ==========================================
// 租赁商品表格导入 - 命令行入口
// ==========================================
// 用法: rental-catalog-import <表格文件> [配置.json]
// 输出: 商品目录 JSON（stdout）；日志写 stderr
// 退出码: 0 成功 / 1 目录为错误序列 / 2 参数错误
// ==========================================

use rental_catalog_import::{
    i18n, logging, parse_catalog, CatalogEntry, CatalogImporterImpl, ImportConfig,
};
use std::path::PathBuf;
use std::process::ExitCode;

fn main() -> anyhow::Result<ExitCode> {
    // 初始化日志系统
    logging::init();

    let mut args = std::env::args().skip(1);
    let Some(file_path) = args.next().map(PathBuf::from) else {
        eprintln!("用法: rental-catalog-import <表格文件> [配置.json]");
        return Ok(ExitCode::from(2));
    };

    let config = match args.next() {
        Some(config_path) => ImportConfig::from_json_file(&PathBuf::from(config_path))?,
        None => ImportConfig::from_env(),
    };
    i18n::set_locale(&config.locale);

    tracing::info!(
        version = rental_catalog_import::VERSION,
        file = %file_path.display(),
        "{}",
        rental_catalog_import::APP_NAME
    );

    let importer = CatalogImporterImpl::with_config(config);
    let entries = parse_catalog(&importer, &file_path);

    println!("{}", serde_json::to_string_pretty(&entries)?);

    if CatalogEntry::error_message(&entries).is_some() {
        return Ok(ExitCode::from(1));
    }
    Ok(ExitCode::SUCCESS)
}
