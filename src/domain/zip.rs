// ==========================================
// 联系人导入系统 - ZIP 参考数据模型
// ==========================================

use serde::{Deserialize, Serialize};

/// 单个 ZIP 对应的地理信息（zipData.json 中的一项）
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct ZipInfo {
    pub state: String,
    #[serde(default)]
    pub counties: Vec<String>,
    #[serde(default)]
    pub cities: Vec<String>,
}
