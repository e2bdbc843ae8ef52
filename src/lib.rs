// ==========================================
// CNC车间排产系统 - 核心库
// ==========================================
// 系统定位: 槽位冲突检测与产能利用/产量偏差聚合引擎 (纯计算,不做 I/O)
// 班次模型: 每日 2 班次 × 每班次 2 槽位,槽位为离散资源单元
// 红线: 冲突是记录并上报的事实,不是被拒绝的校验错误
// ==========================================

// ==========================================
// 模块声明
// ==========================================

// 领域层 - 实体与类型
pub mod domain;

// 引擎层 - 索引/冲突/聚合
pub mod engine;

// 日志系统
pub mod logging;

// ==========================================
// 重导出核心类型
// ==========================================

// 领域类型
pub use domain::types::{
    DateWindow, MachineId, MachineSlotKey, OperationId, PartId, PlanId, ScheduleId,
    ScheduleStatus, SlotKey, WritePolicy, SHIFTS_PER_DAY, SLOTS_PER_DAY, SLOTS_PER_SHIFT,
};

// 领域实体
pub use domain::{
    ForecastPlan, Machine, MonthlyPlan, Operation, Part, ProductionSchedule, ScheduleCandidate,
};

// 引擎
pub use engine::{
    ConflictDetector, ConflictPreview, ConflictRecord, EngineError, EngineResult,
    ScheduleDataSource, ScheduleOrchestrator, ScheduleSnapshot, SlotIndex,
    UtilizationAggregator, UtilizationEntry, ValidationError, VarianceAggregator, VarianceEntry,
    WriteCheck,
};

// ==========================================
// 常量定义
// ==========================================

// 系统版本
pub const VERSION: &str = env!("CARGO_PKG_VERSION");

// 系统名称
pub const APP_NAME: &str = "CNC车间排产系统";
