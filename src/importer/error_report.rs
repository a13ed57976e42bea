// ==========================================
// 联系人导入系统 - 错误报告生成
// ==========================================
// 格式: CSV，表头 = Row + 10 个必填列 + Error
// 单元格为原始值（未清洗），缺失列输出空串
// ==========================================

use crate::domain::RejectedRow;
use crate::importer::error::{ImportError, ImporterResult};
use crate::importer::required_fields::{raw_value, REQUIRED_FIELDS};
use csv::Writer;

pub const ROW_COLUMN: &str = "Row";
pub const ERROR_COLUMN: &str = "Error";

pub struct ErrorReportGenerator;

impl ErrorReportGenerator {
    /// 报告表头
    pub fn header() -> Vec<&'static str> {
        let mut header = Vec::with_capacity(REQUIRED_FIELDS.len() + 2);
        header.push(ROW_COLUMN);
        header.extend_from_slice(&REQUIRED_FIELDS);
        header.push(ERROR_COLUMN);
        header
    }

    /// 生成错误报告文本（按传入顺序输出，调用方负责按行号排序）
    pub fn generate(&self, rejected: &[RejectedRow]) -> ImporterResult<String> {
        let mut writer = Writer::from_writer(Vec::new());
        writer.write_record(Self::header())?;

        for row in rejected {
            let mut record = Vec::with_capacity(REQUIRED_FIELDS.len() + 2);
            record.push(row.row_number.to_string());
            record.extend(
                REQUIRED_FIELDS
                    .iter()
                    .map(|field| raw_value(&row.values, field).to_string()),
            );
            record.push(row.reason.clone());
            writer.write_record(&record)?;
        }

        let bytes = writer
            .into_inner()
            .map_err(|e| ImportError::ReportGenerationError(e.to_string()))?;
        String::from_utf8(bytes).map_err(|e| ImportError::ReportGenerationError(e.to_string()))
    }
}
