// ==========================================
// CNC车间排产系统 - 机台利用率聚合引擎
// ==========================================
// 职责: 按机台统计日期窗口内 已用槽位/可用槽位 与取整百分比
// 算法: total = 窗口天数 × 4;used = 窗口内该机台排产条数 (冲突各算一条)
// 红线: 双订槽位按两条计入 used,百分比可超 100% —— 这是可见的超订信号,
//       不做钳制
// 红线: total = 0 (零窗口/倒置窗口) 时百分比定义为 0,不产生 NaN
// ==========================================

use crate::domain::machine::Machine;
use crate::domain::schedule::ProductionSchedule;
use crate::domain::types::{DateWindow, MachineId};
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// UtilizationEntry - 单机台利用率
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct UtilizationEntry {
    pub machine: Machine,              // 机台
    pub used_slots: i64,               // 已用槽位数 (每条排产计 1,含冲突重复计)
    pub total_slots: i64,              // 可用槽位数 (窗口天数 × 4)
    pub utilization_percentage: i64,   // 取整百分比 (四舍五入,可 >100)
    pub scheduled_operations: usize,   // 窗口内排产条数 (仪表盘字段,与 used_slots 同源)
}

// ==========================================
// UtilizationAggregator - 利用率聚合引擎
// ==========================================
pub struct UtilizationAggregator {
    // 无状态引擎,不需要注入依赖
}

impl UtilizationAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 计算窗口内每台机台的利用率
    ///
    /// # 参数
    /// - `machines`: 机台列表 (迭代域;无排产的机台也产出零值条目)
    /// - `schedules`: 排产集合 (窗口外记录被过滤)
    /// - `window`: 聚合日期窗口 (闭区间)
    ///
    /// # 返回
    /// machine_id -> UtilizationEntry 映射
    #[instrument(skip(self, machines, schedules), fields(machine_count = machines.len()))]
    pub fn compute(
        &self,
        machines: &[Machine],
        schedules: &[ProductionSchedule],
        window: &DateWindow,
    ) -> HashMap<MachineId, UtilizationEntry> {
        let total_slots = window.total_slots();

        // 窗口内排产按机台计数
        let mut used_by_machine: HashMap<MachineId, i64> = HashMap::new();
        for schedule in schedules {
            if window.contains(schedule.date) {
                *used_by_machine.entry(schedule.machine_id).or_insert(0) += 1;
            }
        }

        let mut result = HashMap::with_capacity(machines.len());
        for machine in machines {
            let used_slots = used_by_machine
                .get(&machine.machine_id)
                .copied()
                .unwrap_or(0);
            result.insert(
                machine.machine_id,
                UtilizationEntry {
                    machine: machine.clone(),
                    used_slots,
                    total_slots,
                    utilization_percentage: percentage(used_slots, total_slots),
                    scheduled_operations: used_slots as usize,
                },
            );
        }

        debug!(
            total_slots,
            machine_count = result.len(),
            "机台利用率聚合完成"
        );
        result
    }
}

impl Default for UtilizationAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// 取整百分比: round(used / total × 100),四舍五入 (0.5 远离零取整)
///
/// total = 0 时显式定义为 0
fn percentage(used: i64, total: i64) -> i64 {
    if total == 0 {
        return 0;
    }
    (used as f64 / total as f64 * 100.0).round() as i64
}
