// ==========================================
// 联系人导入系统 - 导入层
// ==========================================
// 职责: CSV 联系人导入，校验后批量落库并生成错误报告
// 流程: 解析 → 表头校验 → 邮箱快照 → 规则链 → 批量写入 → 报告
// ==========================================

// 模块声明
pub mod contact_importer;
pub mod contact_importer_trait;
pub mod data_cleaner;
pub mod duplicate_detector;
pub mod error;
pub mod error_report;
pub mod file_parser;
pub mod required_fields;
pub mod row_validator;

// 重导出核心类型
pub use contact_importer::ContactImporterImpl;
pub use data_cleaner::DataCleaner;
pub use duplicate_detector::{DuplicateDetector, ExistingEmailSet};
pub use error::{ImportError, ImporterResult};
pub use error_report::ErrorReportGenerator;
pub use file_parser::{open_import_file, CsvParser, ParsedFile};
pub use required_fields::REQUIRED_FIELDS;
pub use row_validator::{
    ContactDraft, DateFormatRule, DuplicateEmailRule, GenderRule, RequiredValuesRule,
    RowValidator, TobaccoFlagRule, ValidationContext, ZipCodeRule,
};

// 重导出 Trait 接口
pub use contact_importer_trait::{ContactImporter, FileParser, RowRule};
