// ==========================================
// CNC车间排产系统 - 零件与工序领域模型
// ==========================================
// 零件 (Part) 与其工序链 (Operation) 为核心层的只读参照数据
// 引用完整性由上游数据源负责,核心层对悬空引用降级为占位标签
// ==========================================

use crate::domain::types::{OperationId, PartId};
use serde::{Deserialize, Serialize};

// ==========================================
// Part - 零件
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Part {
    pub part_id: PartId,       // 零件ID
    pub name: String,          // 零件名称
    pub total_operations: i32, // 工序总数 (参考信息)
}

impl Part {
    /// 零件显示标签;悬空引用时由快照层合成 "Part {id}" 占位
    pub fn label(&self) -> &str {
        &self.name
    }
}

// ==========================================
// Operation - 工序
// ==========================================
// 每道工序归属唯一零件;sequence_number 定义零件内加工顺序
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct Operation {
    pub operation_id: OperationId, // 工序ID
    pub part_id: PartId,           // 所属零件
    pub sequence_number: i32,      // 工序序号 (零件内唯一)
    pub machining_time: f64,       // 加工时间 (分钟, 正值)
    pub loading_time: f64,         // 装夹时间 (分钟)
}

impl Operation {
    /// 工序显示标签 "OP{序号}"
    pub fn label(&self) -> String {
        format!("OP{}", self.sequence_number)
    }
}
