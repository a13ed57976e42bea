// ==========================================
// 联系人导入 API
// ==========================================
// 职责: 封装联系人导入、ZIP 查询与导入后查询
// 说明: 导入结果（含结构性失败）总是以 ImportResult 返回；
//       ApiError 只用于调用参数错误或导入器无法创建
// ==========================================

use crate::api::error::{ApiError, ApiResult};
use crate::domain::{ImportResult, StoredContact, ZipInfo};
use crate::importer::{ContactImporter, ContactImporterImpl};
use crate::reference::ZipReference;
use crate::repository::{ContactImportRepository, ContactImportRepositoryImpl};
use rusqlite::Connection;
use std::io::Cursor;
use std::sync::{Arc, Mutex};
use tracing::{info, instrument};

/// 列表查询上限
pub const MAX_LIST_LIMIT: usize = 1000;

/// 导入 API
pub struct ImportApi {
    conn: Arc<Mutex<Connection>>,
    zip_reference: Arc<ZipReference>,
}

impl ImportApi {
    /// 创建新的 ImportApi 实例
    ///
    /// # 参数
    /// - conn: 共享数据库连接（schema 已初始化）
    /// - zip_reference: 启动时加载的 ZIP 参考表
    pub fn new(conn: Arc<Mutex<Connection>>, zip_reference: Arc<ZipReference>) -> Self {
        Self { conn, zip_reference }
    }

    /// 从 CSV 文件导入联系人
    ///
    /// # 参数
    /// - file_path: CSV 文件路径
    /// - overwrite: 覆盖模式（同邮箱已存在时替换）
    ///
    /// # 返回
    /// - Ok(ImportResult): 导入结果（文件缺失等结构性失败也在这里，success=false）
    /// - Err(ApiError): 参数错误 / 导入器创建失败
    #[instrument(skip(self))]
    pub async fn import_contacts(&self, file_path: &str, overwrite: bool) -> ApiResult<ImportResult> {
        if file_path.trim().is_empty() {
            return Err(ApiError::InvalidInput("file path must not be empty".to_string()));
        }

        let importer = self.create_importer()?;
        let result = importer.import_from_path(file_path, overwrite).await;
        info!(success = result.success, valid_rows = result.valid_rows, "文件导入完成");
        Ok(result)
    }

    /// 从上传内容导入联系人
    #[instrument(skip(self, bytes), fields(size = bytes.len()))]
    pub async fn import_contacts_bytes(&self, bytes: &[u8], overwrite: bool) -> ApiResult<ImportResult> {
        let importer = self.create_importer()?;
        let result = importer.import_from_reader(Cursor::new(bytes), overwrite).await;
        info!(success = result.success, valid_rows = result.valid_rows, "上传内容导入完成");
        Ok(result)
    }

    /// 查询 ZIP 参考信息
    pub fn lookup_zip(&self, zip_code: &str) -> ApiResult<ZipInfo> {
        self.zip_reference
            .lookup(zip_code)
            .cloned()
            .ok_or_else(|| ApiError::NotFound(format!("ZIP code {}", zip_code.trim())))
    }

    /// 最近写入的联系人（id 倒序）
    pub async fn list_recent_contacts(&self, limit: usize) -> ApiResult<Vec<StoredContact>> {
        if limit == 0 || limit > MAX_LIST_LIMIT {
            return Err(ApiError::InvalidInput(format!(
                "limit must be between 1 and {}",
                MAX_LIST_LIMIT
            )));
        }

        let repo = self.create_repository()?;
        Ok(repo.list_recent_contacts(limit).await?)
    }

    /// 按邮箱查询（大小写不敏感）
    pub async fn find_contacts_by_email(&self, email: &str) -> ApiResult<Vec<StoredContact>> {
        if email.trim().is_empty() {
            return Err(ApiError::InvalidInput("email must not be empty".to_string()));
        }

        let repo = self.create_repository()?;
        Ok(repo.find_by_email(email).await?)
    }

    pub async fn count_contacts(&self) -> ApiResult<usize> {
        let repo = self.create_repository()?;
        Ok(repo.count_contacts().await?)
    }

    fn create_repository(&self) -> ApiResult<ContactImportRepositoryImpl> {
        Ok(ContactImportRepositoryImpl::from_connection(self.conn.clone())?)
    }

    fn create_importer(&self) -> ApiResult<ContactImporterImpl<ContactImportRepositoryImpl>> {
        let repo = self.create_repository()?;
        Ok(ContactImporterImpl::with_defaults(repo, self.zip_reference.clone()))
    }
}
