// ==========================================
// 联系人导入系统 - 联系人导入器实现
// ==========================================
// 职责: 整合导入流程，从 CSV 到数据库
// 流程: 解析 → 表头校验 → 邮箱快照 → 逐行校验 → 单次批量写入 → 结果 + 错误报告
// 红线: 校验未通过的行绝不落库；批量写入全有或全无
// ==========================================

use crate::domain::{ImportResult, NormalizedContact, RawRow, RejectedRow, ValidationOutcome, WriteMode};
use crate::importer::contact_importer_trait::{ContactImporter, FileParser};
use crate::importer::duplicate_detector::DuplicateDetector;
use crate::importer::error::ImporterResult;
use crate::importer::error_report::ErrorReportGenerator;
use crate::importer::file_parser::{open_import_file, CsvParser, ParsedFile};
use crate::importer::required_fields::REQUIRED_FIELDS;
use crate::importer::row_validator::{RowValidator, ValidationContext};
use crate::reference::ZipReference;
use crate::repository::ContactImportRepository;
use async_trait::async_trait;
use std::io::{BufReader, Read};
use std::path::Path;
use std::sync::Arc;
use std::time::Instant;
use tracing::{debug, error, info, instrument};
use uuid::Uuid;

/// 文件首行为表头，数据行从第 2 行开始
const FIRST_DATA_ROW: usize = 2;

// ==========================================
// ContactImporterImpl - 联系人导入器实现
// ==========================================
pub struct ContactImporterImpl<R>
where
    R: ContactImportRepository,
{
    // 数据访问层
    import_repo: R,

    // 参考数据（只读，进程内共享）
    zip_reference: Arc<ZipReference>,

    // 导入组件
    file_parser: Box<dyn FileParser>,
    row_validator: RowValidator,
    report_generator: ErrorReportGenerator,
}

impl<R> ContactImporterImpl<R>
where
    R: ContactImportRepository,
{
    /// 创建新的 ContactImporter 实例
    ///
    /// # 参数
    /// - import_repo: 导入数据仓储
    /// - zip_reference: ZIP 参考表
    /// - file_parser: 文件解析器
    /// - row_validator: 行校验规则链
    pub fn new(
        import_repo: R,
        zip_reference: Arc<ZipReference>,
        file_parser: Box<dyn FileParser>,
        row_validator: RowValidator,
    ) -> Self {
        Self {
            import_repo,
            zip_reference,
            file_parser,
            row_validator,
            report_generator: ErrorReportGenerator,
        }
    }

    /// 标准组件：CSV 解析 + 六规则校验链
    pub fn with_defaults(import_repo: R, zip_reference: Arc<ZipReference>) -> Self {
        Self::new(
            import_repo,
            zip_reference,
            Box::new(CsvParser),
            RowValidator::standard(),
        )
    }

    pub fn repository(&self) -> &R {
        &self.import_repo
    }

    /// 解析（含表头校验）之后的全部阶段
    async fn process(&self, parsed: ParsedFile, overwrite: bool) -> ImporterResult<ImportResult> {
        let total_rows = parsed.rows.len();
        info!(total_rows = total_rows, "文件解析完成");

        if total_rows == 0 {
            return Ok(ImportResult {
                success: true,
                message: "No contacts found in file".to_string(),
                error_report: None,
                total_rows: 0,
                error_rows: 0,
                valid_rows: 0,
            });
        }

        // === 步骤 1: 邮箱快照（仅非覆盖模式） ===
        let existing_emails = DuplicateDetector::snapshot(&self.import_repo, overwrite).await?;

        // === 步骤 2: 逐行校验并分流 ===
        let (accepted_rows, contacts, rejected) = {
            let ctx = ValidationContext {
                zip_reference: self.zip_reference.as_ref(),
                existing_emails: existing_emails.as_ref(),
            };
            self.partition_rows(parsed.rows, &ctx)
        };
        info!(
            accepted = contacts.len(),
            rejected = rejected.len(),
            "行校验完成"
        );

        // === 步骤 3: 单次批量写入 ===
        let mode = WriteMode::for_overwrite(overwrite);
        let inserted = if contacts.is_empty() {
            0
        } else {
            match self.import_repo.bulk_write(contacts, mode).await {
                Ok(count) => {
                    info!(inserted = count, mode = %mode, "批量写入完成");
                    count
                }
                Err(e) => {
                    error!(error = %e, mode = %mode, "批量写入失败，整批回滚");
                    return self.bulk_failure_result(total_rows, accepted_rows, rejected, e.detail());
                }
            }
        };

        // === 步骤 4: 结果 + 错误报告 ===
        let error_rows = rejected.len();
        let error_report = if rejected.is_empty() {
            None
        } else {
            Some(self.report_generator.generate(&rejected)?)
        };

        let message = if error_rows == 0 {
            format!("Successfully imported {} contacts", inserted)
        } else {
            format!("Imported {} contacts with {} errors", inserted, error_rows)
        };

        Ok(ImportResult {
            success: true,
            message,
            error_report,
            total_rows,
            error_rows,
            valid_rows: inserted,
        })
    }

    /// 逐行校验，保持文件顺序分流
    ///
    /// # 返回
    /// (通过行的原始值, 通过行的标准化联系人, 被拒绝行)
    fn partition_rows(
        &self,
        rows: Vec<RawRow>,
        ctx: &ValidationContext<'_>,
    ) -> (Vec<(usize, RawRow)>, Vec<NormalizedContact>, Vec<RejectedRow>) {
        let mut accepted_rows = Vec::new();
        let mut contacts = Vec::new();
        let mut rejected = Vec::new();

        for (idx, row) in rows.into_iter().enumerate() {
            let row_number = idx + FIRST_DATA_ROW;
            match self.row_validator.validate(&row, ctx) {
                ValidationOutcome::Accepted(contact) => {
                    contacts.push(contact);
                    accepted_rows.push((row_number, row));
                }
                ValidationOutcome::Rejected(reason) => {
                    debug!(row_number = row_number, reason = %reason, "行被拒绝");
                    rejected.push(RejectedRow {
                        row_number,
                        values: row,
                        reason,
                    });
                }
            }
        }

        (accepted_rows, contacts, rejected)
    }

    /// 批量写入失败：所有行计为错误，报告覆盖全部行（按行号排序）
    fn bulk_failure_result(
        &self,
        total_rows: usize,
        accepted_rows: Vec<(usize, RawRow)>,
        rejected: Vec<RejectedRow>,
        storage_error: &str,
    ) -> ImporterResult<ImportResult> {
        let reason = format!("Bulk insert failed: {}", storage_error);
        let mut report_rows = rejected;
        report_rows.extend(accepted_rows.into_iter().map(|(row_number, values)| RejectedRow {
            row_number,
            values,
            reason: reason.clone(),
        }));
        report_rows.sort_by_key(|r| r.row_number);

        Ok(ImportResult {
            success: false,
            message: storage_error.to_string(),
            error_report: Some(self.report_generator.generate(&report_rows)?),
            total_rows,
            error_rows: total_rows,
            valid_rows: 0,
        })
    }
}

#[async_trait]
impl<R> ContactImporter for ContactImporterImpl<R>
where
    R: ContactImportRepository,
{
    #[instrument(skip(self, reader), fields(import_id))]
    async fn import_from_reader<Rd: Read + Send>(&self, reader: Rd, overwrite: bool) -> ImportResult {
        let start_time = Instant::now();
        let import_id = Uuid::new_v4().to_string();
        tracing::Span::current().record("import_id", import_id.as_str());
        info!(import_id = %import_id, overwrite = overwrite, "开始导入联系人");

        // 解析在任何 await 之前完成，读取端在此作用域结束时释放
        let parsed = {
            let mut reader = reader;
            self.file_parser.parse(&mut reader, &REQUIRED_FIELDS)
        };

        let outcome = match parsed {
            Ok(parsed) => self.process(parsed, overwrite).await,
            Err(e) => Err(e),
        };

        let result = match outcome {
            Ok(result) => result,
            Err(e) => {
                error!(error = %e, "导入失败");
                ImportResult::failure(e.to_string())
            }
        };

        info!(
            import_id = %import_id,
            success = result.success,
            total_rows = result.total_rows,
            valid_rows = result.valid_rows,
            error_rows = result.error_rows,
            elapsed_ms = start_time.elapsed().as_millis() as u64,
            "导入结束"
        );

        result
    }

    #[instrument(skip(self, file_path))]
    async fn import_from_path<P: AsRef<Path> + Send>(&self, file_path: P, overwrite: bool) -> ImportResult {
        let path = file_path.as_ref();
        debug!(file_path = %path.display(), "打开导入文件");

        match open_import_file(path) {
            Ok(file) => self.import_from_reader(BufReader::new(file), overwrite).await,
            Err(e) => {
                error!(file_path = %path.display(), error = %e, "无法打开导入文件");
                ImportResult::failure(e.to_string())
            }
        }
    }
}
