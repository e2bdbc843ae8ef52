// ==========================================
// CNC车间排产系统 - 领域层
// ==========================================
// 职责: 实体与类型定义,不含聚合逻辑
// 除 ProductionSchedule 外全部为不可变值记录
// ==========================================

pub mod machine;
pub mod part;
pub mod plan;
pub mod schedule;
pub mod types;

// 重导出领域实体
pub use machine::Machine;
pub use part::{Operation, Part};
pub use plan::{ForecastPlan, MonthlyPlan};
pub use schedule::{ProductionSchedule, ScheduleCandidate};
pub use types::{
    DateWindow, MachineId, MachineSlotKey, OperationId, PartId, PlanId, ScheduleId,
    ScheduleStatus, SlotKey, WritePolicy, SHIFTS_PER_DAY, SLOTS_PER_DAY, SLOTS_PER_SHIFT,
};
