// ==========================================
// 联系人导入系统 - 数据清洗器实现
// ==========================================
// 职责: TRIM / 大小写标准化 / 日期解析 / 吸烟标记宽松解析
// ==========================================

use chrono::NaiveDate;

/// 固定日期格式（YYYY-MM-DD）
pub const DATE_FORMAT: &str = "%Y-%m-%d";

/// 视为"是"的吸烟标记取值（TRIM + 小写后比较）
const TRUTHY_FLAGS: [&str; 4] = ["yes", "true", "1", "y"];

pub struct DataCleaner;

impl DataCleaner {
    /// 清洗文本字段（TRIM）
    pub fn clean_text(&self, value: &str) -> String {
        value.trim().to_string()
    }

    /// 空值判定（空串 / 纯空白）
    pub fn is_blank(&self, value: &str) -> bool {
        value.trim().is_empty()
    }

    /// 邮箱标准化（TRIM + 小写）
    pub fn normalize_email(&self, value: &str) -> String {
        value.trim().to_lowercase()
    }

    /// 解析日期（YYYY-MM-DD → NaiveDate）
    pub fn parse_date_ymd(&self, value: &str) -> Option<NaiveDate> {
        NaiveDate::parse_from_str(value.trim(), DATE_FORMAT).ok()
    }

    /// 吸烟标记宽松解析：只有 yes/true/1/y 为真，其余一律为假（不拒绝）
    pub fn parse_tobacco_flag(&self, value: &str) -> bool {
        let normalized = value.trim().to_lowercase();
        TRUTHY_FLAGS.contains(&normalized.as_str())
    }
}
