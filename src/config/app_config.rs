// ==========================================
// 联系人导入系统 - 运行时配置
// ==========================================
// 职责: 解析数据库路径 / ZIP 参考数据路径
// 来源: 环境变量 > 用户数据目录 > 当前目录
// ==========================================

use std::path::PathBuf;

/// 数据库路径环境变量
pub const ENV_DB_PATH: &str = "CONTACT_IMPORT_DB_PATH";

/// ZIP 参考数据路径环境变量
pub const ENV_ZIP_DATA_PATH: &str = "CONTACT_IMPORT_ZIP_DATA";

/// ZIP 参考数据默认文件名
pub const DEFAULT_ZIP_DATA_FILE: &str = "zipData.json";

const DB_FILE_NAME: &str = "contacts.db";

#[derive(Debug, Clone, PartialEq, Eq)]
pub struct AppConfig {
    pub db_path: String,
    pub zip_data_path: PathBuf,
}

impl AppConfig {
    /// 从环境变量解析配置（空白值视为未设置）
    pub fn from_env() -> Self {
        Self::resolve(
            non_blank_env(ENV_DB_PATH),
            non_blank_env(ENV_ZIP_DATA_PATH),
        )
    }

    /// 显式覆写 + 默认值回退
    pub fn resolve(db_path: Option<String>, zip_data_path: Option<String>) -> Self {
        Self {
            db_path: db_path.unwrap_or_else(default_db_path),
            zip_data_path: zip_data_path
                .map(PathBuf::from)
                .unwrap_or_else(|| PathBuf::from(DEFAULT_ZIP_DATA_FILE)),
        }
    }
}

fn non_blank_env(key: &str) -> Option<String> {
    std::env::var(key)
        .ok()
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

/// 默认数据库路径
///
/// 优先使用用户数据目录，拿不到时回退到当前目录
pub fn default_db_path() -> String {
    let mut path = PathBuf::from(format!("./{}", DB_FILE_NAME));

    if let Some(data_dir) = dirs::data_dir() {
        let dir = data_dir.join("contact-import");
        if std::fs::create_dir_all(&dir).is_ok() {
            path = dir.join(DB_FILE_NAME);
        }
    }

    path.to_string_lossy().to_string()
}
