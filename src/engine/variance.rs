// ==========================================
// CNC车间排产系统 - 计划/实际产量偏差聚合引擎
// ==========================================
// 职责: 按零件对比计划量与完工量,输出偏差与取整偏差百分比
// 算法: planned = 该零件全部计划量求和;actual = 仅 completed 排产数量求和
// 红线: 报告零件域由计划定义 —— 只有排产没有计划的零件不产出条目
//       (既有口径,测试显式钉住;未来更改须是可见决策)
// 红线: planned = 0 时百分比定义为 0,不产生 NaN/无穷
// ==========================================

use crate::domain::part::Part;
use crate::domain::plan::{ForecastPlan, MonthlyPlan};
use crate::domain::schedule::ProductionSchedule;
use crate::domain::types::PartId;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// VarianceEntry - 单零件偏差
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct VarianceEntry {
    pub part: Option<Part>,           // 零件 (悬空引用时为 None)
    pub part_label: String,           // 显示标签 (悬空引用合成 "Part {id}")
    pub planned: i64,                 // 计划数量合计
    pub actual: i64,                  // 完工数量合计 (仅 status = completed)
    pub variance: i64,                // 偏差 = actual - planned
    pub variance_percentage: i64,     // 取整偏差百分比 (planned = 0 时为 0)
}

// ==========================================
// VarianceAggregator - 偏差聚合引擎
// ==========================================
pub struct VarianceAggregator {
    // 无状态引擎,不需要注入依赖
}

impl VarianceAggregator {
    pub fn new() -> Self {
        Self {}
    }

    /// 月度计划 vs 实际完工
    ///
    /// # 参数
    /// - `plans`: 月度计划 (定义报告零件域)
    /// - `schedules`: 排产集合 (仅完工记录计入实际)
    /// - `parts`: 零件参照 (悬空引用降级为占位标签)
    #[instrument(skip(self, plans, schedules, parts), fields(plan_count = plans.len()))]
    pub fn compute(
        &self,
        plans: &[MonthlyPlan],
        schedules: &[ProductionSchedule],
        parts: &[Part],
    ) -> HashMap<PartId, VarianceEntry> {
        self.aggregate(
            plans.iter().map(|p| (p.part_id, p.effective_quantity())),
            schedules,
            parts,
        )
    }

    /// 周度预测 vs 实际完工 (与月度口径一致,仅计划侧换源)
    #[instrument(skip(self, forecasts, schedules, parts), fields(forecast_count = forecasts.len()))]
    pub fn compute_forecast(
        &self,
        forecasts: &[ForecastPlan],
        schedules: &[ProductionSchedule],
        parts: &[Part],
    ) -> HashMap<PartId, VarianceEntry> {
        self.aggregate(
            forecasts.iter().map(|f| (f.part_id, f.effective_quantity())),
            schedules,
            parts,
        )
    }

    fn aggregate(
        &self,
        planned_pairs: impl Iterator<Item = (PartId, i64)>,
        schedules: &[ProductionSchedule],
        parts: &[Part],
    ) -> HashMap<PartId, VarianceEntry> {
        let part_by_id: HashMap<PartId, &Part> =
            parts.iter().map(|p| (p.part_id, p)).collect();

        // 1. 计划侧定义零件域并求和
        let mut result: HashMap<PartId, VarianceEntry> = HashMap::new();
        for (part_id, quantity) in planned_pairs {
            let entry = result.entry(part_id).or_insert_with(|| {
                let part = part_by_id.get(&part_id).map(|&p| p.clone());
                let part_label = part
                    .as_ref()
                    .map(|p| p.name.clone())
                    .unwrap_or_else(|| format!("Part {}", part_id));
                VarianceEntry {
                    part,
                    part_label,
                    planned: 0,
                    actual: 0,
                    variance: 0,
                    variance_percentage: 0,
                }
            });
            entry.planned += quantity;
        }

        // 2. 实际侧: 仅完工排产累加;计划域外的零件不产出条目
        for schedule in schedules {
            if !schedule.status.is_completed() {
                continue;
            }
            if let Some(entry) = result.get_mut(&schedule.part_id) {
                entry.actual += schedule.effective_quantity();
            }
        }

        // 3. 偏差与百分比
        for entry in result.values_mut() {
            entry.variance = entry.actual - entry.planned;
            entry.variance_percentage = variance_percentage(entry.actual, entry.planned);
        }

        debug!(part_count = result.len(), "产量偏差聚合完成");
        result
    }
}

impl Default for VarianceAggregator {
    fn default() -> Self {
        Self::new()
    }
}

/// 取整偏差百分比: round((actual - planned) / planned × 100)
///
/// planned = 0 时显式定义为 0 (不区分"无计划"与"零偏差")
fn variance_percentage(actual: i64, planned: i64) -> i64 {
    if planned == 0 {
        return 0;
    }
    ((actual - planned) as f64 / planned as f64 * 100.0).round() as i64
}
