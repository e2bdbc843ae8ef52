// ==========================================
// CNC车间排产系统 - 实体快照
// ==========================================
// 职责: 持有一次性拉取的实体集合,提供 O(1) 参照查询与占位标签合成
// 红线: 悬空引用 (排产指向不存在的零件/机台/工序) 降级为占位标签,
//       聚合永不因此失败 —— 上游数据分表拉取,瞬时不一致是常态
// ==========================================

use crate::domain::machine::Machine;
use crate::domain::part::{Operation, Part};
use crate::domain::plan::{ForecastPlan, MonthlyPlan};
use crate::domain::schedule::ProductionSchedule;
use crate::domain::types::{MachineId, OperationId, PartId, ScheduleId};
use std::collections::HashMap;

// ==========================================
// ScheduleSnapshot - 实体快照
// ==========================================
// 一次计算周期内不可变;写钩子通过 upsert/remove 产生下一个一致状态
#[derive(Debug, Clone, Default)]
pub struct ScheduleSnapshot {
    parts: Vec<Part>,
    machines: Vec<Machine>,
    operations: Vec<Operation>,
    schedules: Vec<ProductionSchedule>,
    monthly_plans: Vec<MonthlyPlan>,
    forecast_plans: Vec<ForecastPlan>,

    // 参照索引 (实体ID -> Vec 下标)
    part_index: HashMap<PartId, usize>,
    machine_index: HashMap<MachineId, usize>,
    operation_index: HashMap<OperationId, usize>,
}

impl ScheduleSnapshot {
    /// 从上游拉取的实体集合构建快照
    pub fn new(
        parts: Vec<Part>,
        machines: Vec<Machine>,
        operations: Vec<Operation>,
        schedules: Vec<ProductionSchedule>,
        monthly_plans: Vec<MonthlyPlan>,
        forecast_plans: Vec<ForecastPlan>,
    ) -> Self {
        let part_index = parts
            .iter()
            .enumerate()
            .map(|(i, p)| (p.part_id, i))
            .collect();
        let machine_index = machines
            .iter()
            .enumerate()
            .map(|(i, m)| (m.machine_id, i))
            .collect();
        let operation_index = operations
            .iter()
            .enumerate()
            .map(|(i, op)| (op.operation_id, i))
            .collect();

        Self {
            parts,
            machines,
            operations,
            schedules,
            monthly_plans,
            forecast_plans,
            part_index,
            machine_index,
            operation_index,
        }
    }

    /// 空快照 (零实体,所有聚合降级为零值)
    pub fn empty() -> Self {
        Self::default()
    }

    // ==========================================
    // 实体集合访问
    // ==========================================

    pub fn parts(&self) -> &[Part] {
        &self.parts
    }

    pub fn machines(&self) -> &[Machine] {
        &self.machines
    }

    pub fn operations(&self) -> &[Operation] {
        &self.operations
    }

    pub fn schedules(&self) -> &[ProductionSchedule] {
        &self.schedules
    }

    pub fn monthly_plans(&self) -> &[MonthlyPlan] {
        &self.monthly_plans
    }

    pub fn forecast_plans(&self) -> &[ForecastPlan] {
        &self.forecast_plans
    }

    // ==========================================
    // 参照查询
    // ==========================================

    pub fn part(&self, part_id: PartId) -> Option<&Part> {
        self.part_index.get(&part_id).map(|&i| &self.parts[i])
    }

    pub fn machine(&self, machine_id: MachineId) -> Option<&Machine> {
        self.machine_index
            .get(&machine_id)
            .map(|&i| &self.machines[i])
    }

    pub fn operation(&self, operation_id: OperationId) -> Option<&Operation> {
        self.operation_index
            .get(&operation_id)
            .map(|&i| &self.operations[i])
    }

    /// 零件的工序链 (按工序序号升序)
    pub fn operations_for_part(&self, part_id: PartId) -> Vec<&Operation> {
        let mut ops: Vec<&Operation> = self
            .operations
            .iter()
            .filter(|op| op.part_id == part_id)
            .collect();
        ops.sort_by_key(|op| op.sequence_number);
        ops
    }

    // ==========================================
    // 显示标签 (悬空引用占位合成)
    // ==========================================

    /// 零件标签;未找到时合成 "Part {id}"
    pub fn part_label(&self, part_id: PartId) -> String {
        match self.part(part_id) {
            Some(part) => part.name.clone(),
            None => format!("Part {}", part_id),
        }
    }

    /// 机台标签;未找到时合成 "Machine {id}"
    pub fn machine_label(&self, machine_id: MachineId) -> String {
        match self.machine(machine_id) {
            Some(machine) => machine.name.clone(),
            None => format!("Machine {}", machine_id),
        }
    }

    /// 工序标签 "OP{序号}";未找到时合成 "OP{工序ID}"
    pub fn operation_label(&self, operation_id: OperationId) -> String {
        match self.operation(operation_id) {
            Some(op) => op.label(),
            None => format!("OP{}", operation_id),
        }
    }

    // ==========================================
    // 排产筛选视图
    // ==========================================

    /// 已延期排产列表 (驾驶舱提示用)
    pub fn delayed_schedules(&self) -> Vec<&ProductionSchedule> {
        self.schedules
            .iter()
            .filter(|s| s.status.is_delayed())
            .collect()
    }

    // ==========================================
    // 写钩子维护 (与 SlotIndex 增量修补同步调用)
    // ==========================================

    /// 写入排产记录: 同ID存在则原位替换,否则追加到末尾 (保持输入序)
    pub fn upsert_schedule(&mut self, schedule: ProductionSchedule) {
        match self
            .schedules
            .iter_mut()
            .find(|s| s.schedule_id == schedule.schedule_id)
        {
            Some(existing) => *existing = schedule,
            None => self.schedules.push(schedule),
        }
    }

    /// 删除排产记录,返回是否确有删除
    pub fn remove_schedule(&mut self, schedule_id: ScheduleId) -> bool {
        let before = self.schedules.len();
        self.schedules.retain(|s| s.schedule_id != schedule_id);
        self.schedules.len() != before
    }
}
