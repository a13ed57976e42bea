// ==========================================
// 联系人导入系统 - 领域模型层
// ==========================================
// 职责: 定义领域实体、类型
// 红线: 不含数据访问逻辑,不含导入流程逻辑
// ==========================================

pub mod contact;
pub mod import;
pub mod types;
pub mod zip;

// 重导出核心类型
pub use contact::{NormalizedContact, StoredContact};
pub use import::{ImportResult, RawRow, RejectedRow, ValidationOutcome};
pub use types::{Gender, WriteMode};
pub use zip::ZipInfo;
