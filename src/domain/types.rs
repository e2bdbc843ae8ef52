// ==========================================
// CNC车间排产系统 - 领域类型定义
// ==========================================
// 班次模型: 每日 2 班次 × 每班次 2 槽位 = 4 槽位/机台/日
// 红线: 槽位是离散资源单元,不是连续时间区间
// ==========================================

use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::fmt;

// ==========================================
// 标识类型别名
// ==========================================
// 上游数据源使用整数主键,核心层原样透传

pub type PartId = i64;
pub type MachineId = i64;
pub type OperationId = i64;
pub type ScheduleId = i64;
pub type PlanId = i64;

// ==========================================
// 槽位常量
// ==========================================

/// 每日班次数
pub const SHIFTS_PER_DAY: u8 = 2;

/// 每班次槽位数
pub const SLOTS_PER_SHIFT: u8 = 2;

/// 每机台每日槽位总数 (2 班次 × 2 槽位)
pub const SLOTS_PER_DAY: i64 = (SHIFTS_PER_DAY * SLOTS_PER_SHIFT) as i64;

// ==========================================
// 排产状态 (Schedule Status)
// ==========================================
// 序列化格式: snake_case (与上游 API 字符串一致)
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum ScheduleStatus {
    Planned,    // 已计划
    InProgress, // 进行中
    Completed,  // 已完工
    Delayed,    // 已延期
}

impl ScheduleStatus {
    /// 转换为字符串标识
    pub fn as_str(&self) -> &str {
        match self {
            ScheduleStatus::Planned => "planned",
            ScheduleStatus::InProgress => "in_progress",
            ScheduleStatus::Completed => "completed",
            ScheduleStatus::Delayed => "delayed",
        }
    }

    /// 判断是否已完工 (只有完工数量计入实际产量)
    pub fn is_completed(&self) -> bool {
        *self == ScheduleStatus::Completed
    }

    /// 判断是否已延期
    pub fn is_delayed(&self) -> bool {
        *self == ScheduleStatus::Delayed
    }
}

impl Default for ScheduleStatus {
    fn default() -> Self {
        ScheduleStatus::Planned
    }
}

impl fmt::Display for ScheduleStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{}", self.as_str())
    }
}

// ==========================================
// SlotKey - 槽位键
// ==========================================
// 派生键,不落库: (日期, 班次, 槽位) 唯一确定一个排产单元
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct SlotKey {
    pub date: NaiveDate,  // 排产日期 (无时间分量)
    pub shift_number: u8, // 班次号 (1..=2)
    pub slot_number: u8,  // 槽位号 (1..=2)
}

impl SlotKey {
    pub fn new(date: NaiveDate, shift_number: u8, slot_number: u8) -> Self {
        Self {
            date,
            shift_number,
            slot_number,
        }
    }
}

impl fmt::Display for SlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(f, "{} S{}:{}", self.date, self.shift_number, self.slot_number)
    }
}

// ==========================================
// MachineSlotKey - 机台槽位键
// ==========================================
// 槽位键 + 机台 = 受争用的有限资源;同键 ≥2 条排产即为冲突
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord, Serialize, Deserialize)]
pub struct MachineSlotKey {
    pub date: NaiveDate,       // 排产日期
    pub shift_number: u8,      // 班次号
    pub slot_number: u8,       // 槽位号
    pub machine_id: MachineId, // 机台ID
}

impl MachineSlotKey {
    pub fn new(date: NaiveDate, shift_number: u8, slot_number: u8, machine_id: MachineId) -> Self {
        Self {
            date,
            shift_number,
            slot_number,
            machine_id,
        }
    }

    /// 去掉机台维度,得到槽位键
    pub fn slot_key(&self) -> SlotKey {
        SlotKey::new(self.date, self.shift_number, self.slot_number)
    }
}

impl fmt::Display for MachineSlotKey {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        write!(
            f,
            "{} S{}:{} M{}",
            self.date, self.shift_number, self.slot_number, self.machine_id
        )
    }
}

// ==========================================
// DateWindow - 聚合日期窗口
// ==========================================
// 显式传入,核心层不持有任何隐式全局过滤状态
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct DateWindow {
    pub start: NaiveDate, // 窗口起始日 (含)
    pub end: NaiveDate,   // 窗口结束日 (含)
}

impl DateWindow {
    pub fn new(start: NaiveDate, end: NaiveDate) -> Self {
        Self { start, end }
    }

    /// 单日窗口
    pub fn single_day(date: NaiveDate) -> Self {
        Self {
            start: date,
            end: date,
        }
    }

    /// 窗口天数 (闭区间, end - start + 1)
    ///
    /// 倒置窗口 (end < start) 按 0 天处理,聚合降级为零值而不报错
    pub fn day_count(&self) -> i64 {
        if self.end < self.start {
            return 0;
        }
        (self.end - self.start).num_days() + 1
    }

    /// 窗口内单机台的槽位总数 (天数 × 4)
    pub fn total_slots(&self) -> i64 {
        self.day_count() * SLOTS_PER_DAY
    }

    /// 判断日期是否落在窗口内
    pub fn contains(&self, date: NaiveDate) -> bool {
        date >= self.start && date <= self.end
    }
}

// ==========================================
// WritePolicy - 写入冲突策略
// ==========================================
// 冲突是事实记录而不是校验错误;是否拒绝冲突写入由调用方策略决定
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub enum WritePolicy {
    /// 仅告警: 冲突写入照常接受,附带冲突提示 (默认)
    Advisory,
    /// 硬拒绝: 预检出冲突时 accepted = false
    RejectOnConflict,
}

impl Default for WritePolicy {
    fn default() -> Self {
        WritePolicy::Advisory
    }
}
