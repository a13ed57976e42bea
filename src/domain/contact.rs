// ==========================================
// 联系人导入系统 - 联系人领域模型
// ==========================================
// 对齐: contacts 表
// ==========================================

use crate::domain::types::Gender;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// NormalizedContact - 校验通过的联系人
// ==========================================
// 用途: 行校验器全部规则通过后产出，只读，交给批量写入
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct NormalizedContact {
    pub first_name: String,
    pub last_name: String,
    pub email: String, // 小写
    pub current_carrier: String,
    pub plan_type: String,
    pub effective_date: NaiveDate,
    pub birth_date: NaiveDate,
    pub tobacco_user: bool,
    pub gender: Gender,
    pub state: String, // 由 ZIP 查询派生
    pub zip_code: String,
}

// ==========================================
// StoredContact - 已落库的联系人
// ==========================================
// 用途: 仓储读取（查询/测试核对）
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct StoredContact {
    pub id: i64,
    pub first_name: String,
    pub last_name: String,
    pub email: String,
    pub current_carrier: Option<String>,
    pub plan_type: Option<String>,
    pub effective_date: Option<NaiveDate>,
    pub birth_date: Option<NaiveDate>,
    pub tobacco_user: bool,
    pub gender: Option<String>,
    pub state: Option<String>,
    pub zip_code: Option<String>,
    pub agent_id: Option<i64>,
    pub last_emailed: Option<String>,
    pub created_at: String,
    pub updated_at: String,
}
