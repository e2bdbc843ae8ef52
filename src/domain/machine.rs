// ==========================================
// CNC车间排产系统 - 机台领域模型
// ==========================================
// 机台是槽位争用的资源主体: 同一机台同一槽位 ≥2 条排产即为冲突
// ==========================================

use crate::domain::types::MachineId;
use serde::{Deserialize, Serialize};

// ==========================================
// Machine - 机台
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Machine {
    pub machine_id: MachineId, // 机台ID
    pub name: String,          // 机台名称
    #[serde(rename = "type")]
    pub machine_type: String,  // 机台类别 (自由文本, 如 "Lathe" / "Mill")
}

impl Machine {
    /// 机台显示标签;悬空引用时由快照层合成 "Machine {id}" 占位
    pub fn label(&self) -> &str {
        &self.name
    }
}
