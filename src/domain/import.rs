// ==========================================
// 联系人导入系统 - 导入领域模型
// ==========================================
// 职责: 原始行 / 拒绝行 / 校验结果 / 导入结果
// ==========================================

use crate::domain::contact::NormalizedContact;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;

/// 原始行记录（列名 → 原始值，值保持文件中的原样）
pub type RawRow = HashMap<String, String>;

// ==========================================
// RejectedRow - 被拒绝的行
// ==========================================
// 红线: 一行只会出现在 accepted / rejected 其中之一
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RejectedRow {
    pub row_number: usize, // 文件行号（表头为第 1 行）
    pub values: RawRow,    // 原始字段值（不做任何清洗，保证报告保真）
    pub reason: String,    // 唯一的拒绝原因
}

// ==========================================
// ValidationOutcome - 单行校验结果
// ==========================================
#[derive(Debug, Clone, PartialEq, Eq)]
pub enum ValidationOutcome {
    Accepted(NormalizedContact),
    Rejected(String),
}

impl ValidationOutcome {
    pub fn is_accepted(&self) -> bool {
        matches!(self, ValidationOutcome::Accepted(_))
    }
}

// ==========================================
// ImportResult - 导入结果
// ==========================================
// 用途: 导入接口唯一返回值
// 不变量: valid_rows + error_rows == total_rows
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ImportResult {
    pub success: bool,
    pub message: String,
    pub error_report: Option<String>, // CSV 格式错误报告（无拒绝行时为空）
    pub total_rows: usize,
    pub error_rows: usize,
    pub valid_rows: usize,
}

impl ImportResult {
    /// 结构性失败（文件不可读、表头缺列等）：计数全部为 0
    pub fn failure(message: impl Into<String>) -> Self {
        Self {
            success: false,
            message: message.into(),
            error_report: None,
            total_rows: 0,
            error_rows: 0,
            valid_rows: 0,
        }
    }

    /// 计数是否自洽
    pub fn is_consistent(&self) -> bool {
        self.valid_rows + self.error_rows == self.total_rows
    }
}
