// ==========================================
// CNC车间排产系统 - 产量计划领域模型
// ==========================================
// 月度计划与周度预测为偏差报告的"计划侧"输入,核心层只读
// 红线: 偏差报告的零件域由计划定义;只有排产没有计划的零件不出现在报告中
// ==========================================

use crate::domain::types::{PartId, PlanId};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// MonthlyPlan - 月度产量计划
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct MonthlyPlan {
    pub plan_id: PlanId,                // 计划ID
    pub part_id: PartId,                // 零件ID
    pub month: NaiveDate,               // 计划月份 (周期标识, 核心层不展开)
    pub planned_quantity: Option<i64>,  // 计划数量 (缺失按 0)
}

impl MonthlyPlan {
    /// 有效计划数量: 缺失按 0 处理
    pub fn effective_quantity(&self) -> i64 {
        self.planned_quantity.unwrap_or(0)
    }
}

// ==========================================
// ForecastPlan - 周度产量预测
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ForecastPlan {
    pub forecast_id: PlanId,              // 预测ID
    pub part_id: PartId,                  // 零件ID
    pub month: NaiveDate,                 // 所属月份
    pub week: u8,                         // 月内周序号 (1..=4)
    pub forecasted_quantity: Option<i64>, // 预测数量 (缺失按 0)
}

impl ForecastPlan {
    /// 有效预测数量: 缺失按 0 处理
    pub fn effective_quantity(&self) -> i64 {
        self.forecasted_quantity.unwrap_or(0)
    }
}
