// ==========================================
// 联系人导入系统 - 核心库
// ==========================================
// 技术栈: Rust + SQLite
// 系统定位: CSV 联系人批量导入（校验 → 批量落库 → 错误报告）
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 数据仓储层 - 数据访问
pub mod repository;

// 参考数据 - ZIP 表
pub mod reference;

// 导入层 - 外部数据
pub mod importer;

// 配置层 - 运行时配置
pub mod config;

// 数据库基础设施（连接初始化/PRAGMA 统一/schema）
pub mod db;

// 日志系统
pub mod logging;

// API 层 - 业务接口
pub mod api;

// 应用层 - 状态组装
pub mod app;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{Gender, WriteMode};

// 领域实体
pub use domain::{ImportResult, NormalizedContact, RejectedRow, StoredContact, ZipInfo};

// 导入器
pub use importer::{ContactImporter, ContactImporterImpl, RowValidator};

// 参考数据
pub use reference::ZipReference;

// API
pub use api::ImportApi;

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "contact-import";
