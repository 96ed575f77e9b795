// ==========================================
// 租赁商品表格导入 - 批量导入
// ==========================================
// 用途: 同时上传的多个独立文件并发解析
// 说明: 单个文件的转换是同步 CPU 任务，放到 blocking 线程池；
//       每个文件的结果互相独立，某个文件失败不影响其他文件
// ==========================================

use crate::domain::Product;
use crate::importer::catalog_importer_trait::CatalogImporter;
use crate::importer::error::{ImportError, ImportResult};
use futures::future::join_all;
use std::path::PathBuf;
use std::sync::Arc;
use tracing::{error, info};

/// 并发解析多个文件
///
/// # 返回
/// - 与输入顺序一致的逐文件结果
pub async fn parse_many(
    importer: Arc<dyn CatalogImporter>,
    file_paths: Vec<PathBuf>,
) -> Vec<ImportResult<Vec<Product>>> {
    info!(count = file_paths.len(), "开始批量导入文件");

    // 为每个文件创建导入任务
    let tasks = file_paths.into_iter().map(|path| {
        let importer = Arc::clone(&importer);
        async move {
            let path_str = path.display().to_string();
            let joined =
                tokio::task::spawn_blocking(move || importer.import_file(&path)).await;

            match joined {
                Ok(Ok(products)) => {
                    info!(file = %path_str, products = products.len(), "文件导入成功");
                    Ok(products)
                }
                Ok(Err(e)) => {
                    error!(file = %path_str, error = %e, "文件导入失败");
                    Err(e)
                }
                Err(join_err) => {
                    error!(file = %path_str, error = %join_err, "导入任务异常退出");
                    Err(ImportError::InternalError(format!(
                        "文件 {} 导入任务异常退出: {}",
                        path_str, join_err
                    )))
                }
            }
        }
    });

    // 并发执行所有导入任务
    let results = join_all(tasks).await;

    info!(
        total = results.len(),
        success = results.iter().filter(|r| r.is_ok()).count(),
        failed = results.iter().filter(|r| r.is_err()).count(),
        "批量导入完成"
    );

    results
}
