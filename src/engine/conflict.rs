// ==========================================
// CNC车间排产系统 - 槽位冲突检测引擎
// ==========================================
// 职责: 机台槽位分组基数 ≥2 即判冲突,逐机台槽位产出一条冲突记录
// 红线: 冲突是资源争用事实,不是校验错误 —— 记录并上报,不在此拒绝写入
// 红线: 状态/零件/数量一概不影响冲突判定
// 输入: SlotIndex
// 输出: ConflictRecord 列表 / ConflictPreview 写前预检
// ==========================================

use crate::domain::schedule::{ProductionSchedule, ScheduleCandidate};
use crate::domain::types::{MachineId, MachineSlotKey, ScheduleId};
use crate::engine::slot_index::SlotIndex;
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use serde_json::json;
use tracing::{debug, instrument};

// ==========================================
// ConflictRecord - 冲突记录
// ==========================================
// schedules 保持输入序,"谁先到"对调用方有意义
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictRecord {
    pub date: NaiveDate,                     // 冲突日期
    pub shift_number: u8,                    // 班次号
    pub slot_number: u8,                     // 槽位号
    pub machine_id: MachineId,               // 被双订的机台
    pub schedules: Vec<ProductionSchedule>,  // 争用该资源的全部排产 (≥2 条)
}

impl ConflictRecord {
    /// 冲突所在的机台槽位键
    pub fn machine_slot_key(&self) -> MachineSlotKey {
        MachineSlotKey::new(self.date, self.shift_number, self.slot_number, self.machine_id)
    }
}

// ==========================================
// ConflictPreview - 写前冲突预检结果
// ==========================================
// 模拟把候选插入目标机台槽位,不改动索引
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct ConflictPreview {
    pub machine_slot: MachineSlotKey,       // 候选的目标机台槽位
    pub would_conflict: bool,               // 插入后基数是否 ≥2
    pub existing: Vec<ProductionSchedule>,  // 与候选争用的既有排产
}

impl ConflictPreview {
    /// 写路径响应的告警载荷 (与存储成功并行返回,冲突仅为提示)
    pub fn warning_payload(&self) -> serde_json::Value {
        if self.would_conflict {
            json!({
                "conflicts_detected": true,
                "message": format!(
                    "Machine {} is double-booked on {} shift {} slot {}",
                    self.machine_slot.machine_id,
                    self.machine_slot.date,
                    self.machine_slot.shift_number,
                    self.machine_slot.slot_number,
                ),
                "conflicts": &self.existing,
            })
        } else {
            json!({
                "conflicts_detected": false,
                "message": "No conflicts detected",
                "conflicts": [],
            })
        }
    }
}

// ==========================================
// ConflictDetector - 冲突检测引擎
// ==========================================
pub struct ConflictDetector {
    // 无状态引擎,不需要注入依赖
}

impl ConflictDetector {
    pub fn new() -> Self {
        Self {}
    }

    // ==========================================
    // 全量检测
    // ==========================================

    /// 检测索引内全部冲突
    ///
    /// # 排序
    /// 按机台分组,机台内按 (日期, 班次, 槽位) 升序;
    /// 记录内 schedules 保持输入序
    #[instrument(skip(self, index), fields(schedule_count = index.len()))]
    pub fn detect(&self, index: &SlotIndex) -> Vec<ConflictRecord> {
        self.collect_conflicts(index, |_| true)
    }

    /// 检测指定日期的冲突
    pub fn detect_for_date(&self, index: &SlotIndex, date: NaiveDate) -> Vec<ConflictRecord> {
        self.collect_conflicts(index, |key| key.date == date)
    }

    /// 检测指定机台的冲突
    pub fn detect_for_machine(
        &self,
        index: &SlotIndex,
        machine_id: MachineId,
    ) -> Vec<ConflictRecord> {
        self.collect_conflicts(index, |key| key.machine_id == machine_id)
    }

    fn collect_conflicts<F>(&self, index: &SlotIndex, filter: F) -> Vec<ConflictRecord>
    where
        F: Fn(&MachineSlotKey) -> bool,
    {
        let mut conflicts: Vec<ConflictRecord> = index
            .machine_slot_groups()
            .filter(|(key, group)| group.len() >= 2 && filter(key))
            .map(|(key, group)| ConflictRecord {
                date: key.date,
                shift_number: key.shift_number,
                slot_number: key.slot_number,
                machine_id: key.machine_id,
                schedules: group.to_vec(),
            })
            .collect();

        // 机台优先,机台内按 (日期, 班次, 槽位) 升序
        conflicts.sort_by_key(|c| (c.machine_id, c.date, c.shift_number, c.slot_number));

        debug!(conflict_count = conflicts.len(), "冲突检测完成");
        conflicts
    }

    // ==========================================
    // 写前预检 (不改动索引)
    // ==========================================

    /// 预检候选排产: 插入目标机台槽位后基数是否 ≥2
    pub fn check_candidate(
        &self,
        candidate: &ScheduleCandidate,
        index: &SlotIndex,
    ) -> ConflictPreview {
        self.check_candidate_excluding(candidate, None, index)
    }

    /// 预检候选排产,排除指定排产ID
    ///
    /// 更新场景: 排产移动槽位时不得与自身旧记录判冲突
    pub fn check_candidate_excluding(
        &self,
        candidate: &ScheduleCandidate,
        exclude: Option<ScheduleId>,
        index: &SlotIndex,
    ) -> ConflictPreview {
        let key = candidate.machine_slot_key();
        let existing: Vec<ProductionSchedule> = index
            .lookup_machine_slot(key)
            .iter()
            .filter(|s| Some(s.schedule_id) != exclude)
            .cloned()
            .collect();

        ConflictPreview {
            machine_slot: key,
            would_conflict: !existing.is_empty(),
            existing,
        }
    }
}

impl Default for ConflictDetector {
    fn default() -> Self {
        Self::new()
    }
}
