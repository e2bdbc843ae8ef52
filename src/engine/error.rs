// ==========================================
// CNC车间排产系统 - 引擎层错误类型
// ==========================================
// 职责: 聚合引擎对外的错误出口
// 红线: 聚合计算本身是全函数 (任意快照都有结果);错误只来自
//       写路径候选校验与外部数据源边界
// 工具: thiserror 派生宏
// ==========================================

use crate::engine::validation::ValidationError;
use thiserror::Error;

/// 引擎层错误类型
#[derive(Error, Debug)]
pub enum EngineError {
    // ===== 写路径错误 =====
    #[error("候选排产校验失败: {0}")]
    Validation(#[from] ValidationError),

    // ===== 数据源边界错误 =====
    // 刷新失败时旧快照/旧索引保持不变,不允许半建状态外泄
    #[error("快照刷新失败 (保留旧快照): {0}")]
    SnapshotRefresh(anyhow::Error),

    // ===== 通用错误 =====
    #[error(transparent)]
    Other(#[from] anyhow::Error),
}

/// Result 类型别名
pub type EngineResult<T> = Result<T, EngineError>;
