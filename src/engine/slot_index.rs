// ==========================================
// CNC车间排产系统 - 槽位索引
// ==========================================
// 职责: 按 (日期,班次,槽位) 与 (日期,班次,槽位,机台) 两级分组排产记录,
//       提供 O(1) 均摊的冲突查询底座
// 构建: O(n);查询: O(1) 均摊 + O(k) 结果拷贝
// 红线: 纯派生视图,无副作用;排产集变更后整体重建或增量修补
// 红线: 组内保持输入序 (先到先见),不按任何字段重排
// ==========================================

use crate::domain::schedule::ProductionSchedule;
use crate::domain::types::{MachineSlotKey, ScheduleId, SlotKey};
use std::collections::HashMap;
use tracing::{debug, instrument};

// ==========================================
// SlotIndex - 槽位索引
// ==========================================
// 多线程宿主中按"每次构建独立持有"使用,跨线程共享需外部同步
#[derive(Debug, Clone, Default)]
pub struct SlotIndex {
    by_slot: HashMap<SlotKey, Vec<ProductionSchedule>>,
    by_machine_slot: HashMap<MachineSlotKey, Vec<ProductionSchedule>>,
    schedule_count: usize,
}

impl SlotIndex {
    /// 从排产集合构建索引 (O(n))
    #[instrument(skip(schedules), fields(schedule_count = schedules.len()))]
    pub fn build(schedules: &[ProductionSchedule]) -> Self {
        let mut index = Self::default();
        for schedule in schedules {
            index.insert(schedule.clone());
        }
        debug!(
            slots = index.by_slot.len(),
            machine_slots = index.by_machine_slot.len(),
            "槽位索引构建完成"
        );
        index
    }

    /// 空索引
    pub fn empty() -> Self {
        Self::default()
    }

    // ==========================================
    // 查询
    // ==========================================

    /// 查询槽位内全部排产 (跨机台视图);无则返回空切片
    pub fn lookup(&self, key: SlotKey) -> &[ProductionSchedule] {
        self.by_slot.get(&key).map(Vec::as_slice).unwrap_or(&[])
    }

    /// 查询机台槽位 (受争用资源) 内的排产;无则返回空切片
    pub fn lookup_machine_slot(&self, key: MachineSlotKey) -> &[ProductionSchedule] {
        self.by_machine_slot
            .get(&key)
            .map(Vec::as_slice)
            .unwrap_or(&[])
    }

    /// 遍历所有机台槽位分组 (冲突检测的输入)
    pub fn machine_slot_groups(
        &self,
    ) -> impl Iterator<Item = (&MachineSlotKey, &[ProductionSchedule])> {
        self.by_machine_slot
            .iter()
            .map(|(key, group)| (key, group.as_slice()))
    }

    /// 索引内排产记录总数
    pub fn len(&self) -> usize {
        self.schedule_count
    }

    pub fn is_empty(&self) -> bool {
        self.schedule_count == 0
    }

    // ==========================================
    // 增量修补 (单条排产变更时避免整体重建)
    // ==========================================

    /// 插入单条排产 (追加到组尾,保持到达序)
    pub fn insert(&mut self, schedule: ProductionSchedule) {
        self.by_slot
            .entry(schedule.slot_key())
            .or_default()
            .push(schedule.clone());
        self.by_machine_slot
            .entry(schedule.machine_slot_key())
            .or_default()
            .push(schedule);
        self.schedule_count += 1;
    }

    /// 按 (排产ID, 机台槽位键) 移除单条排产,返回是否确有移除
    ///
    /// 调用方负责提供记录当前所在的机台槽位键 (移动排产时为旧键)
    pub fn remove(&mut self, schedule_id: ScheduleId, key: MachineSlotKey) -> bool {
        let mut removed = false;

        if let Some(group) = self.by_machine_slot.get_mut(&key) {
            let before = group.len();
            group.retain(|s| s.schedule_id != schedule_id);
            removed = group.len() != before;
            if group.is_empty() {
                self.by_machine_slot.remove(&key);
            }
        }

        if removed {
            let slot_key = key.slot_key();
            if let Some(group) = self.by_slot.get_mut(&slot_key) {
                group.retain(|s| s.schedule_id != schedule_id);
                if group.is_empty() {
                    self.by_slot.remove(&slot_key);
                }
            }
            self.schedule_count -= 1;
        }

        removed
    }
}
