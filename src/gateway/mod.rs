// ==========================================
// 租赁商品表格导入 - 外部协作方
// ==========================================
// 职责: 定义上架平台协作方的边界契约（不含 HTTP 实现）
// - 图片上传 → {url, fileId, imageId}
// - 商品创建 → 平台原始响应 / 带 HTTP 状态的错误
// - 图片登记簿（folder/filename → 上传元数据，JSON 文件）
// ==========================================

pub mod contracts;
pub mod image_registry;
pub mod submission;

// 重导出核心类型
pub use contracts::{AuthContext, GatewayError, ImageUploader, ProductCreator, UploadedImage};
pub use image_registry::{ImageRecord, ImageRegistry};
pub use submission::{submit_catalog, SubmissionOutcome, SubmissionResult};
