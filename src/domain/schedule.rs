// ==========================================
// CNC车间排产系统 - 排产记录领域模型
// ==========================================
// 排产记录是核心层唯一的可变实体,增/改/删由上游写路径负责
// 核心层只读当前快照并输出冲突/利用率/偏差报告
// ==========================================

use crate::domain::types::{
    MachineId, MachineSlotKey, OperationId, PartId, ScheduleId, ScheduleStatus, SlotKey,
};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};

// ==========================================
// ProductionSchedule - 排产记录
// ==========================================
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ProductionSchedule {
    pub schedule_id: ScheduleId,         // 排产ID
    pub date: NaiveDate,                 // 排产日期 (日历日)
    pub shift_number: u8,                // 班次号 (1..=2)
    pub slot_number: u8,                 // 槽位号 (1..=2)
    pub part_id: PartId,                 // 零件ID
    pub operation_id: OperationId,       // 工序ID (须归属该零件)
    pub machine_id: MachineId,           // 机台ID
    pub quantity_scheduled: Option<i64>, // 排产数量 (≥1;缺失/为零不计入偏差)
    pub sub_batch_id: Option<String>,    // 子批次标签 (仅展示/分组, 不参与冲突判定)
    pub status: ScheduleStatus,          // 排产状态
}

impl ProductionSchedule {
    /// 槽位键 (日期, 班次, 槽位)
    pub fn slot_key(&self) -> SlotKey {
        SlotKey::new(self.date, self.shift_number, self.slot_number)
    }

    /// 机台槽位键 (日期, 班次, 槽位, 机台)
    pub fn machine_slot_key(&self) -> MachineSlotKey {
        MachineSlotKey::new(self.date, self.shift_number, self.slot_number, self.machine_id)
    }

    /// 有效数量: 缺失按 0 处理 (快照内已存在的脏数据容错,不崩溃)
    pub fn effective_quantity(&self) -> i64 {
        self.quantity_scheduled.unwrap_or(0)
    }
}

// ==========================================
// ScheduleCandidate - 写路径候选排产
// ==========================================
// 尚未获得 schedule_id 的写入请求体;预检冲突时模拟插入目标机台槽位
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ScheduleCandidate {
    pub date: NaiveDate,                 // 目标日期
    pub shift_number: u8,                // 目标班次
    pub slot_number: u8,                 // 目标槽位
    pub part_id: PartId,                 // 零件ID
    pub operation_id: OperationId,       // 工序ID
    pub machine_id: MachineId,           // 目标机台
    pub quantity_scheduled: Option<i64>, // 排产数量
    pub sub_batch_id: Option<String>,    // 子批次标签
    #[serde(default)]
    pub status: ScheduleStatus,          // 初始状态 (默认 planned)
}

impl ScheduleCandidate {
    /// 目标机台槽位键
    pub fn machine_slot_key(&self) -> MachineSlotKey {
        MachineSlotKey::new(self.date, self.shift_number, self.slot_number, self.machine_id)
    }

    /// 赋予写入后权威ID,得到正式排产记录
    pub fn into_schedule(self, schedule_id: ScheduleId) -> ProductionSchedule {
        ProductionSchedule {
            schedule_id,
            date: self.date,
            shift_number: self.shift_number,
            slot_number: self.slot_number,
            part_id: self.part_id,
            operation_id: self.operation_id,
            machine_id: self.machine_id,
            quantity_scheduled: self.quantity_scheduled,
            sub_batch_id: self.sub_batch_id,
            status: self.status,
        }
    }
}
