// ==========================================
// 联系人导入系统 - 重复邮箱检测
// ==========================================
// 策略: 快照式。非覆盖模式下，在任何行校验之前读取一次库中邮箱，
//       导入过程中不再刷新；覆盖模式下完全跳过（改用替换写入）。
// 已知限制: 并发导入期间他人写入的同邮箱不会被发现
// ==========================================

use crate::repository::{ContactImportRepository, RepositoryResult};
use std::collections::HashSet;
use tracing::debug;

// ==========================================
// ExistingEmailSet - 已存在邮箱快照
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ExistingEmailSet {
    emails: HashSet<String>,
}

impl ExistingEmailSet {
    /// 构造快照（统一 TRIM + 小写）
    pub fn from_emails<I, S>(emails: I) -> Self
    where
        I: IntoIterator<Item = S>,
        S: AsRef<str>,
    {
        Self {
            emails: emails
                .into_iter()
                .map(|e| e.as_ref().trim().to_lowercase())
                .collect(),
        }
    }

    /// 判断邮箱是否已存在（大小写不敏感）
    pub fn contains(&self, email: &str) -> bool {
        self.emails.contains(&email.trim().to_lowercase())
    }

    pub fn len(&self) -> usize {
        self.emails.len()
    }

    pub fn is_empty(&self) -> bool {
        self.emails.is_empty()
    }
}

// ==========================================
// DuplicateDetector
// ==========================================
pub struct DuplicateDetector;

impl DuplicateDetector {
    /// 按覆盖开关决定是否拍快照
    ///
    /// # 返回
    /// - Ok(Some(set)): 非覆盖模式，快照已取
    /// - Ok(None): 覆盖模式，跳过重复检测
    pub async fn snapshot<R>(repo: &R, overwrite: bool) -> RepositoryResult<Option<ExistingEmailSet>>
    where
        R: ContactImportRepository + ?Sized,
    {
        if overwrite {
            debug!("覆盖模式，跳过邮箱快照");
            return Ok(None);
        }

        let emails = repo.fetch_existing_emails().await?;
        let snapshot = ExistingEmailSet::from_emails(emails);
        debug!(existing = snapshot.len(), "邮箱快照完成");
        Ok(Some(snapshot))
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::domain::{NormalizedContact, StoredContact, WriteMode};
    use async_trait::async_trait;
    use std::sync::atomic::{AtomicUsize, Ordering};

    struct CountingRepo {
        emails: Vec<String>,
        fetch_calls: AtomicUsize,
    }

    #[async_trait]
    impl ContactImportRepository for CountingRepo {
        async fn fetch_existing_emails(&self) -> RepositoryResult<HashSet<String>> {
            self.fetch_calls.fetch_add(1, Ordering::SeqCst);
            Ok(self.emails.iter().cloned().collect())
        }

        async fn bulk_write(
            &self,
            contacts: Vec<NormalizedContact>,
            _mode: WriteMode,
        ) -> RepositoryResult<usize> {
            Ok(contacts.len())
        }

        async fn count_contacts(&self) -> RepositoryResult<usize> {
            Ok(self.emails.len())
        }

        async fn find_by_email(&self, _email: &str) -> RepositoryResult<Vec<StoredContact>> {
            Ok(Vec::new())
        }

        async fn list_recent_contacts(&self, _limit: usize) -> RepositoryResult<Vec<StoredContact>> {
            Ok(Vec::new())
        }
    }

    fn repo_with(emails: &[&str]) -> CountingRepo {
        CountingRepo {
            emails: emails.iter().map(|e| e.to_string()).collect(),
            fetch_calls: AtomicUsize::new(0),
        }
    }

    #[test]
    fn test_existing_email_set_case_insensitive() {
        let set = ExistingEmailSet::from_emails([" A@X.com", "b@x.com"]);
        assert!(set.contains("a@x.com"));
        assert!(set.contains("  B@X.COM "));
        assert!(!set.contains("c@x.com"));
        assert_eq!(set.len(), 2);
    }

    #[tokio::test]
    async fn test_snapshot_taken_when_overwrite_disabled() {
        let repo = repo_with(&["A@x.com"]);

        let snapshot = DuplicateDetector::snapshot(&repo, false).await.unwrap();

        assert!(snapshot.unwrap().contains("a@x.com"));
        assert_eq!(repo.fetch_calls.load(Ordering::SeqCst), 1);
    }

    #[tokio::test]
    async fn test_snapshot_skipped_when_overwrite_enabled() {
        let repo = repo_with(&["a@x.com"]);

        let snapshot = DuplicateDetector::snapshot(&repo, true).await.unwrap();

        assert!(snapshot.is_none());
        assert_eq!(repo.fetch_calls.load(Ordering::SeqCst), 0);
    }
}
