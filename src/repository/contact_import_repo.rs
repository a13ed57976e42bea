// ==========================================
// 联系人导入系统 - 联系人导入 Repository Trait
// ==========================================
// 职责: 定义导入相关数据访问接口（不包含业务逻辑）
// 红线: Repository 不含校验规则，只做数据读写
// ==========================================

use crate::domain::{NormalizedContact, StoredContact, WriteMode};
use crate::repository::error::RepositoryResult;
use async_trait::async_trait;
use std::collections::HashSet;

// ==========================================
// ContactImportRepository Trait
// ==========================================
// 用途: 导入管道所需的存储协作方
// 实现者: ContactImportRepositoryImpl（使用 rusqlite）
#[async_trait]
pub trait ContactImportRepository: Send + Sync {
    // ===== 快照读取 =====

    /// 读取库中全部邮箱（TRIM + 小写），用于重复邮箱快照
    ///
    /// # 说明
    /// - 每次导入最多调用一次，导入过程中不再刷新
    async fn fetch_existing_emails(&self) -> RepositoryResult<HashSet<String>>;

    // ===== 批量写入（事务化）=====

    /// 批量写入联系人
    ///
    /// # 参数
    /// - contacts: 校验通过的联系人（保持原始顺序）
    /// - mode: Insert / InsertOrReplace
    ///
    /// # 返回
    /// - Ok(usize): 写入的记录数
    /// - Err: 数据库错误（整个事务回滚，一条都不落库）
    async fn bulk_write(
        &self,
        contacts: Vec<NormalizedContact>,
        mode: WriteMode,
    ) -> RepositoryResult<usize>;

    // ===== 查询 =====

    /// 统计 contacts 表记录数
    async fn count_contacts(&self) -> RepositoryResult<usize>;

    /// 按邮箱查询（大小写不敏感）
    async fn find_by_email(&self, email: &str) -> RepositoryResult<Vec<StoredContact>>;

    /// 最近创建的联系人（按创建时间倒序）
    async fn list_recent_contacts(&self, limit: usize) -> RepositoryResult<Vec<StoredContact>>;
}
