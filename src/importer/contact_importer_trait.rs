// ==========================================
// 联系人导入系统 - 联系人导入 Trait
// ==========================================
// 职责: 定义导入管道各组件接口（不包含实现）
// ==========================================

use crate::domain::{ImportResult, RawRow};
use crate::importer::error::ImporterResult;
use crate::importer::file_parser::ParsedFile;
use crate::importer::row_validator::{ContactDraft, ValidationContext};
use async_trait::async_trait;
use std::io::Read;
use std::path::Path;

// ==========================================
// ContactImporter Trait
// ==========================================
// 用途: 联系人导入主接口
// 实现者: ContactImporterImpl
#[async_trait]
pub trait ContactImporter: Send + Sync {
    /// 从任意字节流导入（上传内容）
    ///
    /// # 参数
    /// - reader: CSV 字节流（读完即释放）
    /// - overwrite: 是否启用覆盖模式
    ///
    /// # 返回
    /// - ImportResult: 结构性失败也折叠进结果（success=false），不返回 Err
    ///
    /// # 导入流程
    /// 1. 解析 CSV + 表头校验
    /// 2. 邮箱快照（仅非覆盖模式）
    /// 3. 逐行校验，分流 accepted / rejected
    /// 4. 单次批量写入（全有或全无）
    /// 5. 汇总结果 + 错误报告
    async fn import_from_reader<Rd: Read + Send>(&self, reader: Rd, overwrite: bool)
        -> ImportResult;

    /// 从 CSV 文件导入
    async fn import_from_path<P: AsRef<Path> + Send>(&self, file_path: P, overwrite: bool)
        -> ImportResult;
}

// ==========================================
// FileParser Trait
// ==========================================
// 用途: 文件解析接口（阶段 0）
// 实现者: CsvParser
pub trait FileParser: Send + Sync {
    /// 解析为表头 + 原始行记录（HashMap<列名, 原始值>）
    ///
    /// # 参数
    /// - required_columns: 必填列，读取任何数据行之前先校验表头
    ///
    /// # 返回
    /// - Ok(ParsedFile)
    /// - Err(MissingRequiredColumns): 表头缺列（数据行不再读取）
    /// - Err: 读取错误、格式错误（结构性失败）
    fn parse(&self, reader: &mut dyn Read, required_columns: &[&str]) -> ImporterResult<ParsedFile>;
}

// ==========================================
// RowRule Trait
// ==========================================
// 用途: 行校验规则（有序链中的一环）
// 实现者: row_validator 中的各规则
pub trait RowRule: Send + Sync {
    /// 规则名（日志用）
    fn name(&self) -> &'static str;

    /// 校验一行
    ///
    /// # 参数
    /// - row: 原始行
    /// - ctx: 参考数据 + 邮箱快照
    /// - draft: 本行的派生值暂存（如 ZIP 查出的 state）
    ///
    /// # 返回
    /// - Ok(()): 通过，继续下一条规则
    /// - Err(reason): 拒绝原因，链路立即终止
    fn check(
        &self,
        row: &RawRow,
        ctx: &ValidationContext<'_>,
        draft: &mut ContactDraft,
    ) -> Result<(), String>;
}
