// ==========================================
// 联系人导入系统 - 应用层
// ==========================================
// 职责: 组装配置、数据库与 API，供 CLI 入口使用
// ==========================================

pub mod state;

// 重导出
pub use state::AppState;
