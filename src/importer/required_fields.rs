// ==========================================
// 联系人导入系统 - 必填列定义
// ==========================================
// 职责: 必填列清单（有序）+ 表头校验 + 行取值
// 约束: 表头校验每次导入只做一次，且在任何行处理之前
// ==========================================

use crate::domain::RawRow;

pub const FIRST_NAME: &str = "First Name";
pub const LAST_NAME: &str = "Last Name";
pub const EMAIL: &str = "Email";
pub const CURRENT_CARRIER: &str = "Current Carrier";
pub const PLAN_TYPE: &str = "Plan Type";
pub const EFFECTIVE_DATE: &str = "Effective Date";
pub const BIRTH_DATE: &str = "Birth Date";
pub const TOBACCO_USER: &str = "Tobacco User";
pub const GENDER: &str = "Gender";
pub const ZIP_CODE: &str = "ZIP Code";

/// 必填列（顺序即错误报告列顺序）
pub const REQUIRED_FIELDS: [&str; 10] = [
    FIRST_NAME,
    LAST_NAME,
    EMAIL,
    CURRENT_CARRIER,
    PLAN_TYPE,
    EFFECTIVE_DATE,
    BIRTH_DATE,
    TOBACCO_USER,
    GENDER,
    ZIP_CODE,
];

/// 表头中缺失的必填列（按 required 顺序）
pub fn missing_columns(headers: &[String], required: &[&str]) -> Vec<String> {
    required
        .iter()
        .filter(|field| !headers.iter().any(|h| h.as_str() == **field))
        .map(|field| field.to_string())
        .collect()
}

/// 原始值（列不存在时视为空串）
pub fn raw_value<'a>(row: &'a RawRow, field: &str) -> &'a str {
    row.get(field).map(String::as_str).unwrap_or("")
}

/// TRIM 后的值
pub fn trimmed_value<'a>(row: &'a RawRow, field: &str) -> &'a str {
    raw_value(row, field).trim()
}
