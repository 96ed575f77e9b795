// ==========================================
// 租赁商品表格导入 - 目录提交
// ==========================================
// 规则:
// - 错误形态的序列（[{"error": ...}]）直接拒绝，不提交任何商品
// - 商品逐个顺序提交；单个失败记录结果后继续
// ==========================================

use crate::domain::CatalogEntry;
use crate::gateway::contracts::{AuthContext, GatewayError, ProductCreator};
use crate::i18n::t_with_args;
use serde::{Deserialize, Serialize};
use tracing::{info, warn};

/// 单个商品的提交结果
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct SubmissionResult {
    pub out_item_id: String,
    #[serde(flatten)]
    pub outcome: SubmissionOutcome,
}

#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(tag = "status", rename_all = "lowercase")]
pub enum SubmissionOutcome {
    Success {
        response: serde_json::Value,
    },
    Error {
        code: Option<u16>,
        message: String,
    },
}

impl SubmissionResult {
    pub fn is_success(&self) -> bool {
        matches!(self.outcome, SubmissionOutcome::Success { .. })
    }
}

/// 提交商品目录
///
/// # 返回
/// - Ok(Vec<SubmissionResult>): 与商品顺序一致的逐个结果
/// - Err(InvalidCatalog): 输入是错误序列
pub async fn submit_catalog<C>(
    creator: &C,
    auth: &AuthContext,
    entries: &[CatalogEntry],
) -> Result<Vec<SubmissionResult>, GatewayError>
where
    C: ProductCreator + ?Sized,
{
    if let Some(message) = CatalogEntry::error_message(entries) {
        warn!(error = %message, "目录为错误序列，拒绝提交");
        return Err(GatewayError::InvalidCatalog(t_with_args(
            "submit.invalid_catalog",
            &[("detail", message)],
        )));
    }

    let products = CatalogEntry::products(entries);
    info!(count = products.len(), app_id = auth.app_id, "开始提交商品");

    let mut results = Vec::with_capacity(products.len());
    for product in products {
        let outcome = match creator.create_product(product, auth).await {
            Ok(response) => SubmissionOutcome::Success { response },
            Err(e) => {
                warn!(out_item_id = %product.out_item_id, error = %e, "商品提交失败");
                SubmissionOutcome::Error {
                    code: e.status(),
                    message: e.to_string(),
                }
            }
        };
        results.push(SubmissionResult {
            out_item_id: product.out_item_id.clone(),
            outcome,
        });
    }

    info!(
        total = results.len(),
        success = results.iter().filter(|r| r.is_success()).count(),
        "商品提交完成"
    );

    Ok(results)
}
