// ==========================================
// 目录提交集成测试
// ==========================================
// 使用内存中的 ProductCreator 记录调用
// ==========================================

mod test_helpers;

use async_trait::async_trait;
use rental_catalog_import::gateway::{
    submit_catalog, AuthContext, GatewayError, ProductCreator, SubmissionOutcome,
};
use rental_catalog_import::{parse_catalog, CatalogEntry, Product};
use serde_json::{json, Value};
use std::sync::Mutex;
use test_helpers::*;

/// 记录提交顺序；指定的商品编码返回 HTTP 错误
struct RecordingCreator {
    fail_item: Option<&'static str>,
    calls: Mutex<Vec<String>>,
}

impl RecordingCreator {
    fn new(fail_item: Option<&'static str>) -> Self {
        Self {
            fail_item,
            calls: Mutex::new(Vec::new()),
        }
    }

    fn calls(&self) -> Vec<String> {
        self.calls.lock().unwrap().clone()
    }
}

#[async_trait]
impl ProductCreator for RecordingCreator {
    async fn create_product(
        &self,
        product: &Product,
        auth: &AuthContext,
    ) -> Result<Value, GatewayError> {
        self.calls.lock().unwrap().push(product.out_item_id.clone());

        if self.fail_item == Some(product.out_item_id.as_str()) {
            return Err(GatewayError::Http {
                status: 502,
                body: "bad gateway".to_string(),
            });
        }
        Ok(json!({"success": true, "appId": auth.app_id, "skus": product.skus.len()}))
    }
}

fn catalog_with_three_products() -> Vec<CatalogEntry> {
    let file = write_template_csv(&[
        RowBuilder::new("ITEM_A", "A1").build(),
        RowBuilder::new("ITEM_B", "B1").build(),
        RowBuilder::new("ITEM_B", "B2").build(),
        RowBuilder::new("ITEM_C", "C1").build(),
    ])
    .unwrap();
    parse_catalog(&create_test_importer(), file.path())
}

#[tokio::test]
async fn test_submit_catalog_all_success() {
    let creator = RecordingCreator::new(None);
    let auth = AuthContext::new("token-1");
    let entries = catalog_with_three_products();

    let results = submit_catalog(&creator, &auth, &entries).await.unwrap();

    assert_eq!(creator.calls(), vec!["ITEM_A", "ITEM_B", "ITEM_C"]);
    assert!(results.iter().all(|r| r.is_success()));
    match &results[1].outcome {
        SubmissionOutcome::Success { response } => assert_eq!(response["skus"], 2),
        other => panic!("expected success, got {:?}", other),
    }
}

#[tokio::test]
async fn test_submit_catalog_continues_after_failure() {
    let creator = RecordingCreator::new(Some("ITEM_B"));
    let auth = AuthContext::new("token-1");
    let entries = catalog_with_three_products();

    let results = submit_catalog(&creator, &auth, &entries).await.unwrap();

    assert_eq!(creator.calls().len(), 3);
    assert!(results[0].is_success());
    assert!(results[2].is_success());
    match &results[1].outcome {
        SubmissionOutcome::Error { code, message } => {
            assert_eq!(*code, Some(502));
            assert!(message.contains("bad gateway"));
        }
        other => panic!("expected error, got {:?}", other),
    }

    let value = serde_json::to_value(&results[1]).unwrap();
    assert_eq!(value["outItemId"], "ITEM_B");
    assert_eq!(value["status"], "error");
    assert_eq!(value["code"], 502);
}

#[tokio::test]
async fn test_submit_catalog_refuses_error_sequence() {
    let creator = RecordingCreator::new(None);
    let auth = AuthContext::new("token-1");
    let entries = CatalogEntry::failure("缺少分组列");

    let result = submit_catalog(&creator, &auth, &entries).await;

    assert!(matches!(result, Err(GatewayError::InvalidCatalog(_))));
    assert!(creator.calls().is_empty());
}

#[tokio::test]
async fn test_submit_catalog_uses_auth_context() {
    let creator = RecordingCreator::new(None);
    let auth = AuthContext::new("token-1").with_app_id(42);
    let entries = catalog_with_three_products();

    let results = submit_catalog(&creator, &auth, &entries).await.unwrap();

    match &results[0].outcome {
        SubmissionOutcome::Success { response } => assert_eq!(response["appId"], 42),
        other => panic!("expected success, got {:?}", other),
    }
}
