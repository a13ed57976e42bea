// ==========================================
// 联系人导入系统 - 配置层
// ==========================================
// 职责: 运行时配置（数据库路径、ZIP 参考数据路径）
// ==========================================

pub mod app_config;

pub use app_config::{default_db_path, AppConfig, ENV_DB_PATH, ENV_ZIP_DATA_PATH};
