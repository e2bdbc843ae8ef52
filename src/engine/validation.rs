// ==========================================
// CNC车间排产系统 - 写路径候选校验
// ==========================================
// 职责: 校验进入排产集之前的候选记录 (班次/槽位范围, 数量下限)
// 红线: 校验只作用于写路径候选;快照内已存在的脏数据一律容错,不在此拦截
// 工具: thiserror 派生宏
// ==========================================

use crate::domain::schedule::ScheduleCandidate;
use crate::domain::types::{SHIFTS_PER_DAY, SLOTS_PER_SHIFT};
use thiserror::Error;

/// 候选排产校验错误
#[derive(Error, Debug, Clone, PartialEq, Eq)]
pub enum ValidationError {
    #[error("班次号越界: shift_number={value}, 合法范围 1..={max}", max = SHIFTS_PER_DAY)]
    ShiftOutOfRange { value: u8 },

    #[error("槽位号越界: slot_number={value}, 合法范围 1..={max}", max = SLOTS_PER_SHIFT)]
    SlotOutOfRange { value: u8 },

    #[error("排产数量非正: quantity_scheduled={value}, 要求 ≥1")]
    NonPositiveQuantity { value: i64 },
}

/// 校验候选排产记录
///
/// # 规则
/// - `shift_number` ∈ {1, 2}
/// - `slot_number` ∈ {1, 2}
/// - `quantity_scheduled` 给定时必须 ≥1 (缺失不在此拦截,偏差聚合按 0 处理)
pub fn validate_candidate(candidate: &ScheduleCandidate) -> Result<(), ValidationError> {
    if candidate.shift_number < 1 || candidate.shift_number > SHIFTS_PER_DAY {
        return Err(ValidationError::ShiftOutOfRange {
            value: candidate.shift_number,
        });
    }
    if candidate.slot_number < 1 || candidate.slot_number > SLOTS_PER_SHIFT {
        return Err(ValidationError::SlotOutOfRange {
            value: candidate.slot_number,
        });
    }
    if let Some(qty) = candidate.quantity_scheduled {
        if qty < 1 {
            return Err(ValidationError::NonPositiveQuantity { value: qty });
        }
    }
    Ok(())
}
