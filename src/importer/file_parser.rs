// ==========================================
// 联系人导入系统 - 文件解析器实现
// ==========================================
// 阶段 0: 文件读取与解析
// 约束: 单元格值保持原样（错误报告需要原始值），只清洗表头
// ==========================================

use crate::domain::RawRow;
use crate::importer::contact_importer_trait::FileParser;
use crate::importer::error::{ImportError, ImporterResult};
use crate::importer::required_fields::missing_columns;
use csv::ReaderBuilder;
use std::fs::File;
use std::io::Read;
use std::path::Path;
use tracing::warn;

/// 解析结果：表头 + 数据行（顺序与文件一致）
#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ParsedFile {
    pub headers: Vec<String>,
    pub rows: Vec<RawRow>,
}

// ==========================================
// CSV Parser 实现
// ==========================================
pub struct CsvParser;

impl FileParser for CsvParser {
    fn parse(&self, reader: &mut dyn Read, required_columns: &[&str]) -> ImporterResult<ParsedFile> {
        let mut csv_reader = ReaderBuilder::new()
            .has_headers(true)
            .flexible(true) // 允许行长度不一致，缺失单元格按空值处理
            .from_reader(reader);

        // 读取表头（去掉 BOM 与首尾空白）
        let headers: Vec<String> = csv_reader
            .headers()?
            .iter()
            .map(|h| h.trim_start_matches('\u{feff}').trim().to_string())
            .collect();

        // 表头缺列时直接失败，不读取任何数据行
        let missing = missing_columns(&headers, required_columns);
        if !missing.is_empty() {
            warn!(missing = ?missing, "缺少必填列");
            return Err(ImportError::MissingRequiredColumns(missing));
        }

        let mut rows = Vec::new();
        for result in csv_reader.records() {
            let record = result?;
            let mut row = RawRow::new();

            for (col_idx, value) in record.iter().enumerate() {
                if let Some(header) = headers.get(col_idx) {
                    row.insert(header.clone(), value.to_string());
                }
            }

            rows.push(row);
        }

        Ok(ParsedFile { headers, rows })
    }
}

/// 打开待导入文件（存在性检查 + 打开）
pub fn open_import_file(path: &Path) -> ImporterResult<File> {
    if !path.exists() {
        return Err(ImportError::FileNotFound(path.display().to_string()));
    }

    Ok(File::open(path)?)
}
