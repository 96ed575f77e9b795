// ==========================================
// 租赁商品表格导入 - 协作方契约
// ==========================================
// 实现者: 上架平台 API 客户端（不在本库内）
// ==========================================

use crate::domain::Product;
use async_trait::async_trait;
use serde::{Deserialize, Serialize};
use thiserror::Error;

/// 默认小程序应用 ID
pub const DEFAULT_APP_ID: u64 = 2021005181665859;

/// 协作方错误类型
#[derive(Error, Debug)]
pub enum GatewayError {
    #[error("HTTP 请求失败 (状态码 {status}): {body}")]
    Http { status: u16, body: String },

    #[error("网络错误: {0}")]
    Transport(String),

    #[error("平台拒绝请求: {0}")]
    Rejected(String),

    #[error("目录不可提交: {0}")]
    InvalidCatalog(String),
}

impl GatewayError {
    /// HTTP 状态码（仅 Http 错误有）
    pub fn status(&self) -> Option<u16> {
        match self {
            GatewayError::Http { status, .. } => Some(*status),
            _ => None,
        }
    }
}

/// 商品创建所需的鉴权信息
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct AuthContext {
    pub ctoken: String,
    pub app_id: u64,
}

impl AuthContext {
    pub fn new(ctoken: impl Into<String>) -> Self {
        Self {
            ctoken: ctoken.into(),
            app_id: DEFAULT_APP_ID,
        }
    }

    pub fn with_app_id(mut self, app_id: u64) -> Self {
        self.app_id = app_id;
        self
    }
}

/// 图片上传成功载荷
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct UploadedImage {
    pub url: String,
    pub file_id: String,
    pub image_id: String,
}

// ==========================================
// ImageUploader Trait
// ==========================================
#[async_trait]
pub trait ImageUploader: Send + Sync {
    /// 上传图片
    ///
    /// # 参数
    /// - file_name: 原始文件名（可含中文）
    /// - content: 文件内容
    async fn upload_image(
        &self,
        file_name: &str,
        content: Vec<u8>,
    ) -> Result<UploadedImage, GatewayError>;
}

// ==========================================
// ProductCreator Trait
// ==========================================
#[async_trait]
pub trait ProductCreator: Send + Sync {
    /// 创建单个商品
    ///
    /// # 返回
    /// - Ok(Value): 平台原始响应
    /// - Err: 带 HTTP 状态的错误或网络错误
    async fn create_product(
        &self,
        product: &Product,
        auth: &AuthContext,
    ) -> Result<serde_json::Value, GatewayError>;
}
