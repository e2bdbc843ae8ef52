// ==========================================
// CNC车间排产系统 - 引擎层
// ==========================================
// 职责: 槽位索引/冲突检测/利用率聚合/偏差聚合的纯计算实现
// 红线: 引擎不做 I/O,不持久化;全部聚合是全函数,对任意快照都有结果
// 红线: 同一快照上的各聚合互不依赖,可并行独立运行
// ==========================================

pub mod conflict;
pub mod data_source;
pub mod error;
pub mod orchestrator;
pub mod slot_index;
pub mod snapshot;
pub mod utilization;
pub mod validation;
pub mod variance;

// 重导出核心引擎
pub use conflict::{ConflictDetector, ConflictPreview, ConflictRecord};
pub use data_source::{load_snapshot, ScheduleDataSource};
pub use error::{EngineError, EngineResult};
pub use orchestrator::{ScheduleOrchestrator, WriteCheck};
pub use slot_index::SlotIndex;
pub use snapshot::ScheduleSnapshot;
pub use utilization::{UtilizationAggregator, UtilizationEntry};
pub use validation::{validate_candidate, ValidationError};
pub use variance::{VarianceAggregator, VarianceEntry};
