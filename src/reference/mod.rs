// ==========================================
// 联系人导入系统 - 参考数据层
// ==========================================
// 职责: 进程级只读参考数据（显式构造后注入导入管道）
// ==========================================

pub mod zip_reference;

pub use zip_reference::ZipReference;
