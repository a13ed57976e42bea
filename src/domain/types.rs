// ==========================================
// 联系人导入系统 - 领域类型定义
// ==========================================

use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 性别 (Gender)
// ==========================================
// 仅接受 M / F 两个代码（大小写不敏感，入库统一大写）
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Gender {
    M,
    F,
}

impl Gender {
    /// 从原始代码解析（TRIM + UPPER 后必须恰好为 "M" 或 "F"）
    pub fn from_code(raw: &str) -> Option<Self> {
        match raw.trim().to_uppercase().as_str() {
            "M" => Some(Gender::M),
            "F" => Some(Gender::F),
            _ => None,
        }
    }

    pub fn as_str(&self) -> &'static str {
        match self {
            Gender::M => "M",
            Gender::F => "F",
        }
    }
}

impl fmt::Display for Gender {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// 批量写入模式 (Write Mode)
// ==========================================
// Insert: 普通插入（重复邮箱已由快照校验拦截）
// InsertOrReplace: 覆盖模式，同邮箱的已存在行被新行取代
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "SCREAMING_SNAKE_CASE")]
pub enum WriteMode {
    Insert,
    InsertOrReplace,
}

impl WriteMode {
    /// 根据覆盖开关选择写入模式
    pub fn for_overwrite(overwrite: bool) -> Self {
        if overwrite {
            WriteMode::InsertOrReplace
        } else {
            WriteMode::Insert
        }
    }
}

impl fmt::Display for WriteMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            WriteMode::Insert => write!(f, "INSERT"),
            WriteMode::InsertOrReplace => write!(f, "INSERT_OR_REPLACE"),
        }
    }
}
