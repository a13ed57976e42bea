// ==========================================
// 联系人导入系统 - 联系人导入 Repository 实现
// ==========================================
// 职责: 实现导入相关数据访问（使用 rusqlite）
// 红线: Repository 不含校验规则，只做数据读写
// ==========================================

use crate::db::{configure_sqlite_connection, open_sqlite_connection};
use crate::domain::{NormalizedContact, StoredContact, WriteMode};
use crate::repository::contact_import_repo::ContactImportRepository;
use crate::repository::error::{RepositoryError, RepositoryResult};
use async_trait::async_trait;
use chrono::NaiveDate;
use rusqlite::{params, Connection, Row, Transaction};
use std::collections::HashSet;
use std::sync::{Arc, Mutex};

const SELECT_CONTACT_COLUMNS: &str = r#"
    SELECT id, first_name, last_name, email, current_carrier, plan_type,
           effective_date, birth_date, tobacco_user, gender, state, zip_code,
           agent_id, last_emailed, created_at, updated_at
    FROM contacts
"#;

fn parse_stored_date(raw: Option<String>) -> Option<NaiveDate> {
    raw.and_then(|v| NaiveDate::parse_from_str(v.trim(), "%Y-%m-%d").ok())
}

fn map_stored_contact(row: &Row<'_>) -> rusqlite::Result<StoredContact> {
    Ok(StoredContact {
        id: row.get(0)?,
        first_name: row.get(1)?,
        last_name: row.get(2)?,
        email: row.get(3)?,
        current_carrier: row.get(4)?,
        plan_type: row.get(5)?,
        effective_date: parse_stored_date(row.get(6)?),
        birth_date: parse_stored_date(row.get(7)?),
        tobacco_user: row.get::<_, Option<i64>>(8)?.unwrap_or(0) != 0,
        gender: row.get(9)?,
        state: row.get(10)?,
        zip_code: row.get(11)?,
        agent_id: row.get(12)?,
        last_emailed: row.get(13)?,
        created_at: row.get::<_, Option<String>>(14)?.unwrap_or_default(),
        updated_at: row.get::<_, Option<String>>(15)?.unwrap_or_default(),
    })
}

// ==========================================
// ContactImportRepositoryImpl
// ==========================================
pub struct ContactImportRepositoryImpl {
    conn: Arc<Mutex<Connection>>,
}

impl ContactImportRepositoryImpl {
    /// 创建新的 Repository 实例
    ///
    /// # 参数
    /// - db_path: 数据库文件路径
    pub fn new(db_path: &str) -> RepositoryResult<Self> {
        let conn = open_sqlite_connection(db_path)
            .map_err(|e| RepositoryError::DatabaseConnectionError(e.to_string()))?;

        Ok(Self {
            conn: Arc::new(Mutex::new(conn)),
        })
    }

    /// 从已有连接创建（会再次应用统一 PRAGMA，幂等）
    pub fn from_connection(conn: Arc<Mutex<Connection>>) -> RepositoryResult<Self> {
        {
            let guard = conn
                .lock()
                .map_err(|e| RepositoryError::LockError(e.to_string()))?;
            configure_sqlite_connection(&guard)?;
        }

        Ok(Self { conn })
    }

    fn lock(&self) -> RepositoryResult<std::sync::MutexGuard<'_, Connection>> {
        self.conn
            .lock()
            .map_err(|e| RepositoryError::LockError(e.to_string()))
    }

    /// 在事务中批量写入联系人
    ///
    /// InsertOrReplace: 先删除同邮箱的已存在行再插入，
    /// 同一文件内的同邮箱行按顺序后者取代前者
    fn bulk_write_tx(
        tx: &Transaction,
        contacts: &[NormalizedContact],
        mode: WriteMode,
    ) -> RepositoryResult<usize> {
        let mut delete_stmt = tx.prepare("DELETE FROM contacts WHERE lower(trim(email)) = ?1")?;
        let mut insert_stmt = tx.prepare(
            r#"
            INSERT INTO contacts (
                first_name, last_name, email, current_carrier, plan_type,
                effective_date, birth_date, tobacco_user, gender,
                state, zip_code, created_at, updated_at
            ) VALUES (
                ?1, ?2, ?3, ?4, ?5, ?6, ?7, ?8, ?9, ?10, ?11,
                CURRENT_TIMESTAMP, CURRENT_TIMESTAMP
            )
            "#,
        )?;

        let mut count = 0;
        for contact in contacts {
            if mode == WriteMode::InsertOrReplace {
                delete_stmt.execute(params![contact.email])?;
            }

            insert_stmt.execute(params![
                contact.first_name,
                contact.last_name,
                contact.email,
                contact.current_carrier,
                contact.plan_type,
                contact.effective_date.to_string(),
                contact.birth_date.to_string(),
                contact.tobacco_user as i32,
                contact.gender.as_str(),
                contact.state,
                contact.zip_code,
            ])?;
            count += 1;
        }

        Ok(count)
    }
}

#[async_trait]
impl ContactImportRepository for ContactImportRepositoryImpl {
    async fn fetch_existing_emails(&self) -> RepositoryResult<HashSet<String>> {
        let conn = self.lock()?;
        let mut stmt = conn.prepare("SELECT email FROM contacts")?;

        let rows = stmt.query_map([], |row| row.get::<_, String>(0))?;
        let mut emails = HashSet::new();
        for row in rows {
            emails.insert(row?.trim().to_lowercase());
        }

        Ok(emails)
    }

    async fn bulk_write(
        &self,
        contacts: Vec<NormalizedContact>,
        mode: WriteMode,
    ) -> RepositoryResult<usize> {
        if contacts.is_empty() {
            return Ok(0);
        }

        let conn = self.lock()?;
        let tx = conn
            .unchecked_transaction()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;

        // 出错时 tx 随作用域 drop 自动回滚
        let count = Self::bulk_write_tx(&tx, &contacts, mode)?;

        tx.commit()
            .map_err(|e| RepositoryError::DatabaseTransactionError(e.to_string()))?;
        Ok(count)
    }

    async fn count_contacts(&self) -> RepositoryResult<usize> {
        let conn = self.lock()?;
        let count: i64 = conn.query_row("SELECT COUNT(*) FROM contacts", [], |row| row.get(0))?;
        Ok(count as usize)
    }

    async fn find_by_email(&self, email: &str) -> RepositoryResult<Vec<StoredContact>> {
        let conn = self.lock()?;
        let sql = format!(
            "{} WHERE lower(trim(email)) = ?1 ORDER BY id",
            SELECT_CONTACT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt.query_map(params![email.trim().to_lowercase()], map_stored_contact)?;
        let mut contacts = Vec::new();
        for row in rows {
            contacts.push(row?);
        }

        Ok(contacts)
    }

    async fn list_recent_contacts(&self, limit: usize) -> RepositoryResult<Vec<StoredContact>> {
        let conn = self.lock()?;
        let sql = format!(
            "{} ORDER BY created_at DESC, id DESC LIMIT ?1",
            SELECT_CONTACT_COLUMNS
        );
        let mut stmt = conn.prepare(&sql)?;

        let rows = stmt.query_map(params![limit as i64], map_stored_contact)?;
        let mut contacts = Vec::new();
        for row in rows {
            contacts.push(row?);
        }

        Ok(contacts)
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::db::init_schema;
    use crate::domain::Gender;

    fn create_repo() -> ContactImportRepositoryImpl {
        let conn = Connection::open_in_memory().unwrap();
        init_schema(&conn).unwrap();
        ContactImportRepositoryImpl::from_connection(Arc::new(Mutex::new(conn))).unwrap()
    }

    fn contact(email: &str, first_name: &str) -> NormalizedContact {
        NormalizedContact {
            first_name: first_name.to_string(),
            last_name: "Doe".to_string(),
            email: email.to_string(),
            current_carrier: "Aetna".to_string(),
            plan_type: "G".to_string(),
            effective_date: NaiveDate::from_ymd_opt(2024, 1, 1).unwrap(),
            birth_date: NaiveDate::from_ymd_opt(1955, 6, 15).unwrap(),
            tobacco_user: true,
            gender: Gender::F,
            state: "NY".to_string(),
            zip_code: "10001".to_string(),
        }
    }

    #[tokio::test]
    async fn test_bulk_insert_and_read_back() {
        let repo = create_repo();

        let count = repo
            .bulk_write(
                vec![contact("a@x.com", "Ann"), contact("b@x.com", "Bea")],
                WriteMode::Insert,
            )
            .await
            .unwrap();
        assert_eq!(count, 2);
        assert_eq!(repo.count_contacts().await.unwrap(), 2);

        let found = repo.find_by_email("A@X.COM").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "Ann");
        assert!(found[0].tobacco_user);
        assert_eq!(found[0].gender.as_deref(), Some("F"));
        assert_eq!(
            found[0].birth_date,
            Some(NaiveDate::from_ymd_opt(1955, 6, 15).unwrap())
        );

        let emails = repo.fetch_existing_emails().await.unwrap();
        assert!(emails.contains("a@x.com"));
        assert!(emails.contains("b@x.com"));
    }

    #[tokio::test]
    async fn test_insert_or_replace_supersedes_same_email() {
        let repo = create_repo();

        repo.bulk_write(vec![contact("a@x.com", "Old")], WriteMode::Insert)
            .await
            .unwrap();
        repo.bulk_write(vec![contact("a@x.com", "New")], WriteMode::InsertOrReplace)
            .await
            .unwrap();

        let found = repo.find_by_email("a@x.com").await.unwrap();
        assert_eq!(found.len(), 1);
        assert_eq!(found[0].first_name, "New");
    }

    #[tokio::test]
    async fn test_plain_insert_keeps_same_email_rows() {
        let repo = create_repo();

        repo.bulk_write(
            vec![contact("a@x.com", "One"), contact("a@x.com", "Two")],
            WriteMode::Insert,
        )
        .await
        .unwrap();

        assert_eq!(repo.find_by_email("a@x.com").await.unwrap().len(), 2);
    }

    #[tokio::test]
    async fn test_bulk_write_empty_is_noop() {
        let repo = create_repo();
        let count = repo.bulk_write(Vec::new(), WriteMode::Insert).await.unwrap();
        assert_eq!(count, 0);
        assert_eq!(repo.count_contacts().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_bulk_write_rolls_back_on_failure() {
        let repo = create_repo();
        {
            let conn = repo.lock().unwrap();
            conn.execute_batch(
                r#"
                CREATE TRIGGER reject_bad_email BEFORE INSERT ON contacts
                WHEN NEW.email = 'bad@x.com'
                BEGIN
                    SELECT RAISE(ABORT, 'rejected by trigger');
                END;
                "#,
            )
            .unwrap();
        }

        let result = repo
            .bulk_write(
                vec![contact("ok@x.com", "Ok"), contact("bad@x.com", "Bad")],
                WriteMode::Insert,
            )
            .await;

        assert!(result.is_err());
        assert_eq!(repo.count_contacts().await.unwrap(), 0);
    }

    #[tokio::test]
    async fn test_list_recent_contacts_limit() {
        let repo = create_repo();
        repo.bulk_write(
            vec![
                contact("a@x.com", "A"),
                contact("b@x.com", "B"),
                contact("c@x.com", "C"),
            ],
            WriteMode::Insert,
        )
        .await
        .unwrap();

        let recent = repo.list_recent_contacts(2).await.unwrap();
        assert_eq!(recent.len(), 2);
        // 同一时间戳下按 id 倒序
        assert_eq!(recent[0].email, "c@x.com");
    }
}
