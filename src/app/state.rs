// ==========================================
// 联系人导入系统 - 应用状态
// ==========================================
// 职责: 启动时打开数据库、初始化 schema、加载 ZIP 参考表，组装 API 实例
// ==========================================

use std::sync::{Arc, Mutex};

use crate::api::ImportApi;
use crate::config::AppConfig;
use crate::db::{init_schema, open_sqlite_connection, read_schema_version, CURRENT_SCHEMA_VERSION};
use crate::reference::ZipReference;

/// 应用状态
///
/// 包含 API 实例和共享资源，进程内只创建一次
pub struct AppState {
    /// 数据库路径
    pub db_path: String,

    /// ZIP 参考表（只读）
    pub zip_reference: Arc<ZipReference>,

    /// 联系人导入 API
    pub import_api: Arc<ImportApi>,
}

impl AppState {
    /// 创建新的 AppState 实例
    ///
    /// # 说明
    /// 该方法会：
    /// 1. 打开数据库并统一 PRAGMA
    /// 2. 幂等初始化 schema
    /// 3. 加载 ZIP 参考表（加载失败时为空表，进程继续）
    /// 4. 创建 API 实例
    pub fn new(config: AppConfig) -> Result<Self, String> {
        tracing::info!(db_path = %config.db_path, "初始化 AppState");

        let conn = open_sqlite_connection(&config.db_path)
            .map_err(|e| format!("Failed to open database: {}", e))?;
        init_schema(&conn).map_err(|e| format!("Failed to initialize schema: {}", e))?;
        let schema_version = read_schema_version(&conn)
            .map_err(|e| format!("Failed to read schema version: {}", e))?;
        if schema_version > Some(CURRENT_SCHEMA_VERSION) {
            tracing::warn!(
                schema_version = ?schema_version,
                expected = CURRENT_SCHEMA_VERSION,
                "数据库 schema 版本高于当前程序"
            );
        }
        let conn = Arc::new(Mutex::new(conn));

        let zip_reference = Arc::new(ZipReference::load(&config.zip_data_path));
        if zip_reference.is_empty() {
            tracing::warn!(
                zip_data_path = %config.zip_data_path.display(),
                "ZIP 参考表为空，所有行都会因 ZIP 无效被拒绝"
            );
        }

        let import_api = Arc::new(ImportApi::new(conn, zip_reference.clone()));

        tracing::info!(zip_entries = zip_reference.len(), "AppState 初始化完成");

        Ok(Self {
            db_path: config.db_path,
            zip_reference,
            import_api,
        })
    }
}
