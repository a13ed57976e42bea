// ==========================================
// 联系人导入系统 - 行校验器
// ==========================================
// 职责: 按固定顺序执行规则链，首个失败规则即为唯一拒绝原因
// 顺序: 必填值 → ZIP → 性别 → 重复邮箱 → 日期 → 吸烟标记
// 扩展: 新规则实现 RowRule 后追加到链上，不需要改动已有规则
// ==========================================

use crate::domain::{Gender, NormalizedContact, RawRow, ValidationOutcome};
use crate::importer::contact_importer_trait::RowRule;
use crate::importer::data_cleaner::DataCleaner;
use crate::importer::duplicate_detector::ExistingEmailSet;
use crate::importer::required_fields::{
    raw_value, trimmed_value, BIRTH_DATE, CURRENT_CARRIER, EFFECTIVE_DATE, EMAIL, FIRST_NAME,
    GENDER, LAST_NAME, PLAN_TYPE, REQUIRED_FIELDS, TOBACCO_USER, ZIP_CODE,
};
use crate::reference::ZipReference;
use chrono::NaiveDate;
use tracing::trace;

// ==========================================
// ValidationContext - 校验上下文
// ==========================================
// existing_emails 为 None 表示覆盖模式（跳过重复邮箱规则）
#[derive(Debug, Clone, Copy)]
pub struct ValidationContext<'a> {
    pub zip_reference: &'a ZipReference,
    pub existing_emails: Option<&'a ExistingEmailSet>,
}

// ==========================================
// ContactDraft - 单行派生值暂存
// ==========================================
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ContactDraft {
    pub state: Option<String>,
    pub gender: Option<Gender>,
    pub effective_date: Option<NaiveDate>,
    pub birth_date: Option<NaiveDate>,
    pub tobacco_user: bool,
}

impl ContactDraft {
    /// 全部规则通过后组装 NormalizedContact
    fn into_contact(self, row: &RawRow) -> Result<NormalizedContact, String> {
        let cleaner = DataCleaner;

        Ok(NormalizedContact {
            first_name: cleaner.clean_text(raw_value(row, FIRST_NAME)),
            last_name: cleaner.clean_text(raw_value(row, LAST_NAME)),
            email: cleaner.normalize_email(raw_value(row, EMAIL)),
            current_carrier: cleaner.clean_text(raw_value(row, CURRENT_CARRIER)),
            plan_type: cleaner.clean_text(raw_value(row, PLAN_TYPE)),
            effective_date: self.effective_date.ok_or_else(|| missing_derived(EFFECTIVE_DATE))?,
            birth_date: self.birth_date.ok_or_else(|| missing_derived(BIRTH_DATE))?,
            tobacco_user: self.tobacco_user,
            gender: self.gender.ok_or_else(|| missing_derived(GENDER))?,
            state: self.state.ok_or_else(|| missing_derived("State"))?,
            zip_code: cleaner.clean_text(raw_value(row, ZIP_CODE)),
        })
    }
}

// 规则链配置不完整时才会出现
fn missing_derived(field: &str) -> String {
    format!("Missing derived value: {}", field)
}

// ==========================================
// 规则 1: 必填值
// ==========================================
pub struct RequiredValuesRule;

impl RowRule for RequiredValuesRule {
    fn name(&self) -> &'static str {
        "required_values"
    }

    fn check(
        &self,
        row: &RawRow,
        _ctx: &ValidationContext<'_>,
        _draft: &mut ContactDraft,
    ) -> Result<(), String> {
        let cleaner = DataCleaner;
        let missing: Vec<&str> = REQUIRED_FIELDS
            .iter()
            .copied()
            .filter(|field| cleaner.is_blank(raw_value(row, field)))
            .collect();

        if missing.is_empty() {
            Ok(())
        } else {
            Err(format!("Missing values for: {}", missing.join(", ")))
        }
    }
}

// ==========================================
// 规则 2: ZIP 有效性（派生 state）
// ==========================================
pub struct ZipCodeRule;

impl RowRule for ZipCodeRule {
    fn name(&self) -> &'static str {
        "zip_code"
    }

    fn check(
        &self,
        row: &RawRow,
        ctx: &ValidationContext<'_>,
        draft: &mut ContactDraft,
    ) -> Result<(), String> {
        let zip = trimmed_value(row, ZIP_CODE);
        match ctx.zip_reference.lookup(zip) {
            Some(info) => {
                draft.state = Some(info.state.clone());
                Ok(())
            }
            None => Err(format!("Invalid ZIP code: {}", zip)),
        }
    }
}

// ==========================================
// 规则 3: 性别
// ==========================================
pub struct GenderRule;

impl RowRule for GenderRule {
    fn name(&self) -> &'static str {
        "gender"
    }

    fn check(
        &self,
        row: &RawRow,
        _ctx: &ValidationContext<'_>,
        draft: &mut ContactDraft,
    ) -> Result<(), String> {
        let raw = trimmed_value(row, GENDER);
        match Gender::from_code(raw) {
            Some(gender) => {
                draft.gender = Some(gender);
                Ok(())
            }
            None => Err(format!("Invalid gender: {}. Must be 'M' or 'F'", raw)),
        }
    }
}

// ==========================================
// 规则 4: 重复邮箱（仅非覆盖模式）
// ==========================================
pub struct DuplicateEmailRule;

impl RowRule for DuplicateEmailRule {
    fn name(&self) -> &'static str {
        "duplicate_email"
    }

    fn check(
        &self,
        row: &RawRow,
        ctx: &ValidationContext<'_>,
        _draft: &mut ContactDraft,
    ) -> Result<(), String> {
        let Some(existing) = ctx.existing_emails else {
            return Ok(());
        };

        let email = trimmed_value(row, EMAIL);
        if existing.contains(email) {
            Err(format!("Email already exists: {}", email))
        } else {
            Ok(())
        }
    }
}

// ==========================================
// 规则 5: 日期格式（YYYY-MM-DD）
// ==========================================
pub struct DateFormatRule;

impl RowRule for DateFormatRule {
    fn name(&self) -> &'static str {
        "date_format"
    }

    fn check(
        &self,
        row: &RawRow,
        _ctx: &ValidationContext<'_>,
        draft: &mut ContactDraft,
    ) -> Result<(), String> {
        let cleaner = DataCleaner;
        let effective = cleaner.parse_date_ymd(raw_value(row, EFFECTIVE_DATE));
        let birth = cleaner.parse_date_ymd(raw_value(row, BIRTH_DATE));

        match (effective, birth) {
            (Some(effective), Some(birth)) => {
                draft.effective_date = Some(effective);
                draft.birth_date = Some(birth);
                Ok(())
            }
            _ => Err("Invalid date format. Dates should be YYYY-MM-DD".to_string()),
        }
    }
}

// ==========================================
// 规则 6: 吸烟标记（宽松解析，从不拒绝）
// ==========================================
pub struct TobaccoFlagRule;

impl RowRule for TobaccoFlagRule {
    fn name(&self) -> &'static str {
        "tobacco_flag"
    }

    fn check(
        &self,
        row: &RawRow,
        _ctx: &ValidationContext<'_>,
        draft: &mut ContactDraft,
    ) -> Result<(), String> {
        draft.tobacco_user = DataCleaner.parse_tobacco_flag(raw_value(row, TOBACCO_USER));
        Ok(())
    }
}

// ==========================================
// RowValidator - 有序规则链
// ==========================================
pub struct RowValidator {
    rules: Vec<Box<dyn RowRule>>,
}

impl RowValidator {
    pub fn new(rules: Vec<Box<dyn RowRule>>) -> Self {
        Self { rules }
    }

    /// 标准六规则链
    pub fn standard() -> Self {
        Self::new(vec![
            Box::new(RequiredValuesRule),
            Box::new(ZipCodeRule),
            Box::new(GenderRule),
            Box::new(DuplicateEmailRule),
            Box::new(DateFormatRule),
            Box::new(TobaccoFlagRule),
        ])
    }

    /// 在链尾追加规则
    pub fn with_rule(mut self, rule: Box<dyn RowRule>) -> Self {
        self.rules.push(rule);
        self
    }

    /// 校验单行：首个失败规则决定拒绝原因，后续规则不再执行
    pub fn validate(&self, row: &RawRow, ctx: &ValidationContext<'_>) -> ValidationOutcome {
        let mut draft = ContactDraft::default();

        for rule in &self.rules {
            if let Err(reason) = rule.check(row, ctx, &mut draft) {
                trace!(rule = rule.name(), reason = %reason, "行校验未通过");
                return ValidationOutcome::Rejected(reason);
            }
        }

        match draft.into_contact(row) {
            Ok(contact) => ValidationOutcome::Accepted(contact),
            Err(reason) => ValidationOutcome::Rejected(reason),
        }
    }
}

impl Default for RowValidator {
    fn default() -> Self {
        Self::standard()
    }
}
