// ==========================================
// 测试辅助函数
// ==========================================
// 职责: 临时数据库、合成 ZIP 参考表、CSV 构造
// ==========================================
#![allow(dead_code)]

use contact_import::db::{init_schema, open_sqlite_connection};
use contact_import::domain::ZipInfo;
use contact_import::importer::REQUIRED_FIELDS;
use contact_import::reference::ZipReference;
use std::error::Error;
use std::io::Write;
use std::sync::Arc;
use tempfile::NamedTempFile;

/// 创建临时测试数据库并初始化 schema
///
/// # 返回
/// - NamedTempFile: 临时数据库文件（需要保持存活）
/// - String: 数据库文件路径
pub fn create_test_db() -> Result<(NamedTempFile, String), Box<dyn Error>> {
    let temp_file = NamedTempFile::new()?;
    let db_path = temp_file.path().to_string_lossy().to_string();

    let conn = open_sqlite_connection(&db_path)?;
    init_schema(&conn)?;

    Ok((temp_file, db_path))
}

fn zip_info(state: &str, county: &str, city: &str) -> ZipInfo {
    ZipInfo {
        state: state.to_string(),
        counties: vec![county.to_string()],
        cities: vec![city.to_string()],
    }
}

/// 合成 ZIP 参考表（10001 NY / 90210 CA / 60601 IL）
pub fn test_zip_reference() -> Arc<ZipReference> {
    Arc::new(ZipReference::from_iter([
        ("10001".to_string(), zip_info("NY", "New York", "New York")),
        ("90210".to_string(), zip_info("CA", "Los Angeles", "Beverly Hills")),
        ("60601".to_string(), zip_info("IL", "Cook", "Chicago")),
    ]))
}

/// 与合成表一致的 zipData.json 内容
pub fn test_zip_json() -> &'static str {
    r#"{
        "10001": {"state": "NY", "counties": ["New York"], "cities": ["New York"]},
        "90210": {"state": "CA", "counties": ["Los Angeles"], "cities": ["Beverly Hills"]},
        "60601": {"state": "IL", "counties": ["Cook"], "cities": ["Chicago"]}
    }"#
}

// ==========================================
// ContactRowBuilder - 单行构造
// ==========================================
#[derive(Debug, Clone)]
pub struct ContactRowBuilder {
    values: Vec<String>,
}

impl ContactRowBuilder {
    /// 一条合法行（字段顺序与 REQUIRED_FIELDS 一致）
    pub fn new(email: &str) -> Self {
        Self {
            values: vec![
                "Jane".to_string(),
                "Doe".to_string(),
                email.to_string(),
                "Aetna".to_string(),
                "Plan G".to_string(),
                "2024-01-01".to_string(),
                "1955-06-15".to_string(),
                "No".to_string(),
                "F".to_string(),
                "10001".to_string(),
            ],
        }
    }

    pub fn set(mut self, field: &str, value: &str) -> Self {
        if let Some(idx) = REQUIRED_FIELDS.iter().position(|f| *f == field) {
            self.values[idx] = value.to_string();
        }
        self
    }

    pub fn first_name(self, value: &str) -> Self {
        self.set("First Name", value)
    }

    pub fn zip(self, value: &str) -> Self {
        self.set("ZIP Code", value)
    }

    pub fn gender(self, value: &str) -> Self {
        self.set("Gender", value)
    }

    pub fn tobacco(self, value: &str) -> Self {
        self.set("Tobacco User", value)
    }

    pub fn build(&self) -> String {
        self.values
            .iter()
            .map(|v| quote_cell(v))
            .collect::<Vec<_>>()
            .join(",")
    }
}

fn quote_cell(value: &str) -> String {
    if value.contains(',') || value.contains('"') {
        format!("\"{}\"", value.replace('"', "\"\""))
    } else {
        value.to_string()
    }
}

/// 以标准表头拼接 CSV 文本
pub fn build_csv(rows: &[ContactRowBuilder]) -> String {
    build_csv_with_headers(&REQUIRED_FIELDS, rows)
}

/// 自定义表头拼接 CSV 文本
pub fn build_csv_with_headers(headers: &[&str], rows: &[ContactRowBuilder]) -> String {
    let mut content = headers.join(",");
    content.push('\n');
    for row in rows {
        content.push_str(&row.build());
        content.push('\n');
    }
    content
}

/// 写入临时 CSV 文件
pub fn write_csv_file(content: &str) -> Result<NamedTempFile, Box<dyn Error>> {
    let mut file = tempfile::Builder::new().suffix(".csv").tempfile()?;
    file.write_all(content.as_bytes())?;
    file.flush()?;
    Ok(file)
}

/// 错误报告的数据行（去掉表头）
pub fn report_lines(report: &str) -> Vec<String> {
    report.lines().skip(1).map(|l| l.to_string()).collect()
}
