// ==========================================
// CNC车间排产系统 - 外部数据源边界
// ==========================================
// 职责: 定义核心层消费的五类只读拉取接口,实现依赖倒置
// 说明: 核心层定义 trait,持久化/API 层实现适配器;核心层自身不做 I/O
// 红线: 任一拉取失败即整次刷新失败,旧快照保持不变 (不允许半建索引)
// ==========================================

use crate::domain::machine::Machine;
use crate::domain::part::{Operation, Part};
use crate::domain::plan::{ForecastPlan, MonthlyPlan};
use crate::domain::schedule::ProductionSchedule;
use crate::domain::types::DateWindow;
use crate::engine::snapshot::ScheduleSnapshot;

/// 排产数据源
///
/// 上游协作方 (数据库/HTTP API) 实现本 trait;错误统一走 `anyhow`,
/// 由引擎层包装为 `EngineError::SnapshotRefresh`。
pub trait ScheduleDataSource {
    /// 拉取全部零件
    fn fetch_parts(&self) -> anyhow::Result<Vec<Part>>;

    /// 拉取全部机台
    fn fetch_machines(&self) -> anyhow::Result<Vec<Machine>>;

    /// 拉取全部工序
    fn fetch_operations(&self) -> anyhow::Result<Vec<Operation>>;

    /// 拉取排产记录;`window = None` 表示全量
    fn fetch_schedules(&self, window: Option<&DateWindow>) -> anyhow::Result<Vec<ProductionSchedule>>;

    /// 拉取月度计划
    fn fetch_monthly_plans(&self) -> anyhow::Result<Vec<MonthlyPlan>>;

    /// 拉取周度预测
    fn fetch_forecast_plans(&self) -> anyhow::Result<Vec<ForecastPlan>>;
}

/// 一次性拉取完整快照
///
/// 五类实体全部成功才返回快照;任一失败立即透传错误,调用方保留旧状态。
pub fn load_snapshot(
    source: &dyn ScheduleDataSource,
    window: Option<&DateWindow>,
) -> anyhow::Result<ScheduleSnapshot> {
    let parts = source.fetch_parts()?;
    let machines = source.fetch_machines()?;
    let operations = source.fetch_operations()?;
    let schedules = source.fetch_schedules(window)?;
    let monthly_plans = source.fetch_monthly_plans()?;
    let forecast_plans = source.fetch_forecast_plans()?;

    Ok(ScheduleSnapshot::new(
        parts,
        machines,
        operations,
        schedules,
        monthly_plans,
        forecast_plans,
    ))
}
