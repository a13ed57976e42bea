// ==========================================
// 联系人导入系统 - ZIP 参考数据
// ==========================================
// 职责: ZIP → {state, counties, cities} 只读映射
// 约束: 进程启动时加载一次，之后不可变
// 降级: 加载失败返回空表（所有查询均为未命中），不阻断启动
// ==========================================

use crate::domain::ZipInfo;
use std::collections::HashMap;
use std::path::Path;
use tracing::{error, info};

#[derive(Debug, Clone, Default)]
pub struct ZipReference {
    entries: HashMap<String, ZipInfo>,
}

impl ZipReference {
    /// 从 JSON 文件加载（形如 {"10001": {"state": "NY", "counties": [...], "cities": [...]}}）
    ///
    /// 任何失败（文件缺失 / JSON 非法）都只记日志并返回空表
    pub fn load<P: AsRef<Path>>(path: P) -> Self {
        let path = path.as_ref();
        match Self::try_load(path) {
            Ok(reference) => {
                info!(path = %path.display(), zip_count = reference.len(), "ZIP 参考数据加载完成");
                reference
            }
            Err(e) => {
                error!(path = %path.display(), error = %e, "ZIP 参考数据加载失败，ZIP 校验将全部未命中");
                Self::default()
            }
        }
    }

    fn try_load(path: &Path) -> Result<Self, Box<dyn std::error::Error>> {
        let raw = std::fs::read_to_string(path)?;
        let entries: HashMap<String, ZipInfo> = serde_json::from_str(&raw)?;
        Ok(Self { entries })
    }

    /// 用合成数据构造（测试 / 依赖注入）
    pub fn from_map(entries: HashMap<String, ZipInfo>) -> Self {
        Self { entries }
    }

    /// 查询 ZIP（输入先 TRIM）
    pub fn lookup(&self, zip_code: &str) -> Option<&ZipInfo> {
        self.entries.get(zip_code.trim())
    }

    pub fn len(&self) -> usize {
        self.entries.len()
    }

    pub fn is_empty(&self) -> bool {
        self.entries.is_empty()
    }
}

impl FromIterator<(String, ZipInfo)> for ZipReference {
    fn from_iter<I: IntoIterator<Item = (String, ZipInfo)>>(iter: I) -> Self {
        Self {
            entries: iter.into_iter().collect(),
        }
    }
}
