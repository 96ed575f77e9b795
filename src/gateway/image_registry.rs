// ==========================================
// 租赁商品表格导入 - 图片登记簿
// ==========================================
// 存储: 单个 JSON 文件，键为 "folder/filename"
// 规则: 打开时整体加载（文件缺失 → 空登记簿），每次变更后整体写回
// 红线: 文件无法解析时拒绝打开，不覆盖；
//       单条记录无法识别时原样保留并写回
// 兼容: uploadTime 读取 Unix 秒（浮点）或 RFC3339 文本，写出 Unix 秒
// ==========================================

use crate::gateway::contracts::UploadedImage;
use anyhow::Context;
use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use serde_json::Value;
use std::collections::BTreeMap;
use std::fs;
use std::path::{Path, PathBuf};
use tracing::{debug, warn};

/// 默认文件夹
pub const DEFAULT_FOLDER: &str = "default";

/// 登记簿路径环境变量
pub const REGISTRY_PATH_ENV: &str = "RENTAL_CATALOG_IMAGE_MAP";

const REGISTRY_FILE_NAME: &str = "image_map.json";

fn default_folder() -> String {
    DEFAULT_FOLDER.to_string()
}

fn default_status() -> String {
    "success".to_string()
}

/// 单张图片的上传记录
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ImageRecord {
    pub name: String,
    #[serde(default = "default_folder")] // 早期记录没有 folder 字段
    pub folder: String,
    pub url: String,
    pub file_id: String,
    pub image_id: String,
    #[serde(default = "default_status")]
    pub status: String,
    #[serde(default, with = "epoch_seconds")]
    pub upload_time: DateTime<Utc>,
}

// ==========================================
// uploadTime 编解码
// ==========================================
mod epoch_seconds {
    use chrono::{DateTime, Utc};
    use serde::de::Error as _;
    use serde::{Deserialize, Deserializer, Serializer};

    #[derive(Deserialize)]
    #[serde(untagged)]
    enum RawTime {
        Seconds(f64),
        Text(String),
    }

    pub fn serialize<S: Serializer>(time: &DateTime<Utc>, serializer: S) -> Result<S::Ok, S::Error> {
        let secs = time.timestamp() as f64 + f64::from(time.timestamp_subsec_micros()) / 1e6;
        serializer.serialize_f64(secs)
    }

    pub fn deserialize<'de, D: Deserializer<'de>>(deserializer: D) -> Result<DateTime<Utc>, D::Error> {
        match RawTime::deserialize(deserializer)? {
            RawTime::Seconds(secs) => from_seconds(secs)
                .ok_or_else(|| D::Error::custom(format!("uploadTime 超出范围: {}", secs))),
            RawTime::Text(text) => DateTime::parse_from_rfc3339(text.trim())
                .map(|t| t.with_timezone(&Utc))
                .map_err(D::Error::custom),
        }
    }

    pub(super) fn from_seconds(secs: f64) -> Option<DateTime<Utc>> {
        if !secs.is_finite() {
            return None;
        }
        let whole = secs.floor();
        let nanos = (((secs - whole) * 1e9).round() as u32).min(999_999_999);
        DateTime::from_timestamp(whole as i64, nanos)
    }
}

// ==========================================
// ImageRegistry - 图片登记簿
// ==========================================
#[derive(Debug)]
pub struct ImageRegistry {
    path: PathBuf,
    entries: BTreeMap<String, ImageRecord>,
    // 无法识别的记录，写回时原样保留
    unrecognized: BTreeMap<String, Value>,
}

impl ImageRegistry {
    /// 默认路径
    ///
    /// 优先级: 环境变量 → 用户数据目录 → 当前目录
    pub fn default_path() -> PathBuf {
        if let Ok(path) = std::env::var(REGISTRY_PATH_ENV) {
            let trimmed = path.trim();
            if !trimmed.is_empty() {
                return PathBuf::from(trimmed);
            }
        }

        match dirs::data_dir() {
            Some(data_dir) => data_dir
                .join("rental-catalog-import")
                .join(REGISTRY_FILE_NAME),
            None => PathBuf::from(REGISTRY_FILE_NAME),
        }
    }

    /// 打开登记簿
    ///
    /// # 返回
    /// - Ok: 文件不存在时为空登记簿
    /// - Err: 文件读取失败或不是 JSON 对象（文件保持原样）
    pub fn open(path: impl Into<PathBuf>) -> anyhow::Result<Self> {
        let path = path.into();
        let raw: BTreeMap<String, Value> = match fs::read_to_string(&path) {
            Ok(text) => serde_json::from_str(&text)
                .with_context(|| format!("图片登记簿格式错误: {}", path.display()))?,
            Err(e) if e.kind() == std::io::ErrorKind::NotFound => BTreeMap::new(),
            Err(e) => {
                return Err(e).with_context(|| format!("读取图片登记簿失败: {}", path.display()))
            }
        };

        let mut entries = BTreeMap::new();
        let mut unrecognized = BTreeMap::new();
        for (key, value) in raw {
            match serde_json::from_value::<ImageRecord>(value.clone()) {
                Ok(record) => {
                    entries.insert(key, record);
                }
                Err(e) => {
                    warn!(key = %key, error = %e, "图片记录无法识别，已原样保留");
                    unrecognized.insert(key, value);
                }
            }
        }

        debug!(
            path = %path.display(),
            count = entries.len(),
            unrecognized = unrecognized.len(),
            "图片登记簿已加载"
        );
        Ok(Self {
            path,
            entries,
            unrecognized,
        })
    }

    pub fn path(&self) -> &Path {
        &self.path
    }

    /// 可识别的记录数
    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }

    /// 文件夹名清洗: 只保留字母数字、空格、'_'、'-'；清洗后为空 → "default"
    pub fn sanitize_folder(raw: &str) -> String {
        let cleaned: String = raw
            .chars()
            .filter(|c| c.is_alphanumeric() || matches!(c, ' ' | '_' | '-'))
            .collect();
        let cleaned = cleaned.trim();
        if cleaned.is_empty() {
            default_folder()
        } else {
            cleaned.to_string()
        }
    }

    /// 登记簿键
    pub fn registry_key(folder: &str, name: &str) -> String {
        format!("{}/{}", Self::sanitize_folder(folder), name)
    }

    pub fn get(&self, folder: &str, name: &str) -> Option<&ImageRecord> {
        self.entries.get(&Self::registry_key(folder, name))
    }

    /// 记录一次成功上传（同键覆盖），并写回文件
    pub fn record_upload(
        &mut self,
        folder: &str,
        name: &str,
        image: &UploadedImage,
        uploaded_at: DateTime<Utc>,
    ) -> anyhow::Result<ImageRecord> {
        let folder = Self::sanitize_folder(folder);
        let record = ImageRecord {
            name: name.to_string(),
            folder: folder.clone(),
            url: image.url.clone(),
            file_id: image.file_id.clone(),
            image_id: image.image_id.clone(),
            status: default_status(),
            upload_time: uploaded_at,
        };

        let key = format!("{}/{}", folder, name);
        self.unrecognized.remove(&key);
        self.entries.insert(key, record.clone());
        self.save()?;
        Ok(record)
    }

    /// 删除记录（存在时写回文件）
    pub fn remove(&mut self, folder: &str, name: &str) -> anyhow::Result<Option<ImageRecord>> {
        let key = Self::registry_key(folder, name);
        let dropped_raw = self.unrecognized.remove(&key).is_some();
        let removed = self.entries.remove(&key);
        if removed.is_some() || dropped_raw {
            self.save()?;
        }
        Ok(removed)
    }

    /// 全部记录，按上传时间倒序
    pub fn list(&self) -> Vec<&ImageRecord> {
        let mut records: Vec<&ImageRecord> = self.entries.values().collect();
        records.sort_by(|a, b| b.upload_time.cmp(&a.upload_time));
        records
    }

    fn save(&self) -> anyhow::Result<()> {
        if let Some(parent) = self.path.parent() {
            if !parent.as_os_str().is_empty() {
                fs::create_dir_all(parent)
                    .with_context(|| format!("创建目录失败: {}", parent.display()))?;
            }
        }

        let mut document: BTreeMap<&str, Value> = self
            .unrecognized
            .iter()
            .map(|(key, value)| (key.as_str(), value.clone()))
            .collect();
        for (key, record) in &self.entries {
            document.insert(key.as_str(), serde_json::to_value(record)?);
        }

        let text = serde_json::to_string_pretty(&document)?;
        fs::write(&self.path, text)
            .with_context(|| format!("写入图片登记簿失败: {}", self.path.display()))?;
        Ok(())
    }
}
