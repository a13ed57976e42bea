// ==========================================
// Mock 联系人仓储 - 用于集成测试
// ==========================================
// 用途: 模拟批量写入失败（磁盘错误等）
// ==========================================

use async_trait::async_trait;
use contact_import::domain::{NormalizedContact, StoredContact, WriteMode};
use contact_import::repository::{ContactImportRepository, RepositoryError, RepositoryResult};
use std::collections::HashSet;
use std::sync::atomic::{AtomicUsize, Ordering};

pub const MOCK_STORAGE_ERROR: &str = "disk I/O error";

/// 快照正常、批量写入必定失败的仓储
#[derive(Debug, Default)]
pub struct FailingBulkWriteRepo {
    pub existing_emails: HashSet<String>,
    pub fetch_calls: AtomicUsize,
    pub bulk_write_calls: AtomicUsize,
}

impl FailingBulkWriteRepo {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_existing(emails: &[&str]) -> Self {
        Self {
            existing_emails: emails.iter().map(|e| e.to_lowercase()).collect(),
            ..Self::default()
        }
    }

    pub fn fetch_count(&self) -> usize {
        self.fetch_calls.load(Ordering::SeqCst)
    }

    pub fn bulk_write_count(&self) -> usize {
        self.bulk_write_calls.load(Ordering::SeqCst)
    }
}

#[async_trait]
impl ContactImportRepository for FailingBulkWriteRepo {
    async fn fetch_existing_emails(&self) -> RepositoryResult<HashSet<String>> {
        self.fetch_calls.fetch_add(1, Ordering::SeqCst);
        Ok(self.existing_emails.clone())
    }

    async fn bulk_write(
        &self,
        _contacts: Vec<NormalizedContact>,
        _mode: WriteMode,
    ) -> RepositoryResult<usize> {
        self.bulk_write_calls.fetch_add(1, Ordering::SeqCst);
        Err(RepositoryError::DatabaseQueryError(
            MOCK_STORAGE_ERROR.to_string(),
        ))
    }

    async fn count_contacts(&self) -> RepositoryResult<usize> {
        Ok(0)
    }

    async fn find_by_email(&self, _email: &str) -> RepositoryResult<Vec<StoredContact>> {
        Ok(Vec::new())
    }

    async fn list_recent_contacts(&self, _limit: usize) -> RepositoryResult<Vec<StoredContact>> {
        Ok(Vec::new())
    }
}
