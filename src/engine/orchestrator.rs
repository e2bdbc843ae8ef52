// ==========================================
// CNC车间排产系统 - 排产视图编排器
// ==========================================
// 职责: 持有当前快照与槽位索引,串联冲突/利用率/偏差三类只读聚合,
//       并暴露写路径的三个钩子 (created/updated/deleted) 与写前预检
// 红线: 刷新失败保留旧快照与旧索引,不允许半建状态外泄
// 红线: 冲突默认仅告警 (accepted = true);是否硬拒绝由 WritePolicy 决定
// 并发: 单次计算同步完成;跨线程共享编排器需外部同步
// ==========================================

use crate::domain::schedule::{ProductionSchedule, ScheduleCandidate};
use crate::domain::types::{
    DateWindow, MachineId, MachineSlotKey, PartId, ScheduleId, WritePolicy,
};
use crate::engine::conflict::{ConflictDetector, ConflictPreview, ConflictRecord};
use crate::engine::data_source::{load_snapshot, ScheduleDataSource};
use crate::engine::error::{EngineError, EngineResult};
use crate::engine::slot_index::SlotIndex;
use crate::engine::snapshot::ScheduleSnapshot;
use crate::engine::utilization::{UtilizationAggregator, UtilizationEntry};
use crate::engine::validation::validate_candidate;
use crate::engine::variance::{VarianceAggregator, VarianceEntry};
use chrono::NaiveDate;
use serde::{Deserialize, Serialize};
use std::collections::HashMap;
use tracing::{info, instrument, warn};

// ==========================================
// WriteCheck - 写前预检结果
// ==========================================
// 写路径语义: 即使 accepted = true 也可能携带冲突提示 (警示后放行)
#[derive(Debug, Clone, PartialEq, Serialize, Deserialize)]
pub struct WriteCheck {
    pub accepted: bool,                   // 按当前策略是否接受写入
    pub conflicts: Vec<ConflictPreview>,  // 目标机台槽位的冲突预检
}

impl WriteCheck {
    /// 是否预检出冲突
    pub fn has_conflicts(&self) -> bool {
        self.conflicts.iter().any(|p| p.would_conflict)
    }
}

// ==========================================
// ScheduleOrchestrator - 排产视图编排器
// ==========================================
pub struct ScheduleOrchestrator {
    snapshot: ScheduleSnapshot,
    index: SlotIndex,
    detector: ConflictDetector,
    utilization: UtilizationAggregator,
    variance: VarianceAggregator,
    policy: WritePolicy,
}

impl ScheduleOrchestrator {
    /// 从快照构建编排器 (索引一次性建立)
    pub fn new(snapshot: ScheduleSnapshot) -> Self {
        Self::with_policy(snapshot, WritePolicy::default())
    }

    /// 指定写入策略构建
    pub fn with_policy(snapshot: ScheduleSnapshot, policy: WritePolicy) -> Self {
        let index = SlotIndex::build(snapshot.schedules());
        Self {
            snapshot,
            index,
            detector: ConflictDetector::new(),
            utilization: UtilizationAggregator::new(),
            variance: VarianceAggregator::new(),
            policy,
        }
    }

    /// 空编排器 (零实体)
    pub fn empty() -> Self {
        Self::new(ScheduleSnapshot::empty())
    }

    pub fn policy(&self) -> WritePolicy {
        self.policy
    }

    pub fn set_policy(&mut self, policy: WritePolicy) {
        self.policy = policy;
    }

    pub fn snapshot(&self) -> &ScheduleSnapshot {
        &self.snapshot
    }

    pub fn index(&self) -> &SlotIndex {
        &self.index
    }

    // ==========================================
    // 快照刷新
    // ==========================================

    /// 整体换入新快照并重建索引
    #[instrument(skip(self, snapshot), fields(schedule_count = snapshot.schedules().len()))]
    pub fn refresh(&mut self, snapshot: ScheduleSnapshot) {
        self.index = SlotIndex::build(snapshot.schedules());
        self.snapshot = snapshot;
        info!("排产快照已刷新");
    }

    /// 从外部数据源拉取并刷新
    ///
    /// 任一拉取失败即整次失败,旧快照与旧索引保持不变
    pub fn refresh_from(
        &mut self,
        source: &dyn ScheduleDataSource,
        window: Option<&DateWindow>,
    ) -> EngineResult<()> {
        match load_snapshot(source, window) {
            Ok(snapshot) => {
                self.refresh(snapshot);
                Ok(())
            }
            Err(err) => {
                warn!(error = %err, "快照刷新失败,保留旧快照");
                Err(EngineError::SnapshotRefresh(err))
            }
        }
    }

    // ==========================================
    // 写前预检
    // ==========================================

    /// 创建场景的写前预检
    ///
    /// 候选先过范围/数量校验 (校验失败是错误,冲突不是);
    /// 冲突是否导致 accepted = false 由 WritePolicy 决定
    pub fn check_write(&self, candidate: &ScheduleCandidate) -> EngineResult<WriteCheck> {
        self.check_write_excluding(candidate, None)
    }

    /// 更新场景的写前预检: 排除排产自身旧记录
    pub fn check_update(
        &self,
        candidate: &ScheduleCandidate,
        schedule_id: ScheduleId,
    ) -> EngineResult<WriteCheck> {
        self.check_write_excluding(candidate, Some(schedule_id))
    }

    fn check_write_excluding(
        &self,
        candidate: &ScheduleCandidate,
        exclude: Option<ScheduleId>,
    ) -> EngineResult<WriteCheck> {
        validate_candidate(candidate)?;

        let preview = self
            .detector
            .check_candidate_excluding(candidate, exclude, &self.index);
        let accepted = match self.policy {
            WritePolicy::Advisory => true,
            WritePolicy::RejectOnConflict => !preview.would_conflict,
        };

        if preview.would_conflict {
            warn!(
                machine_slot = %preview.machine_slot,
                existing = preview.existing.len(),
                accepted,
                "写前预检出机台槽位冲突"
            );
        }

        Ok(WriteCheck {
            accepted,
            conflicts: vec![preview],
        })
    }

    // ==========================================
    // 写钩子 (上游在落库成功后调用,传入权威记录)
    // ==========================================

    /// 排产创建钩子: 增量修补索引,返回受影响机台槽位的现存冲突
    #[instrument(skip(self, schedule), fields(schedule_id = schedule.schedule_id))]
    pub fn on_schedule_created(&mut self, schedule: ProductionSchedule) -> Vec<ConflictRecord> {
        let key = schedule.machine_slot_key();
        self.snapshot.upsert_schedule(schedule.clone());
        self.index.insert(schedule);
        self.conflict_at(key).into_iter().collect()
    }

    /// 排产更新钩子: 旧槽位可能解除冲突,新槽位可能新增冲突
    ///
    /// # 参数
    /// - `old_key`: 记录更新前所在的机台槽位键
    /// - `updated`: 更新后的权威记录
    #[instrument(skip(self, updated), fields(schedule_id = updated.schedule_id))]
    pub fn on_schedule_updated(
        &mut self,
        old_key: MachineSlotKey,
        updated: ProductionSchedule,
    ) -> Vec<ConflictRecord> {
        let new_key = updated.machine_slot_key();
        self.index.remove(updated.schedule_id, old_key);
        self.snapshot.upsert_schedule(updated.clone());
        self.index.insert(updated);

        let mut affected: Vec<ConflictRecord> = Vec::new();
        affected.extend(self.conflict_at(old_key));
        if new_key != old_key {
            affected.extend(self.conflict_at(new_key));
        }
        affected
    }

    /// 排产删除钩子: 返回该机台槽位剩余的冲突 (若仍 ≥2 条)
    #[instrument(skip(self))]
    pub fn on_schedule_deleted(
        &mut self,
        schedule_id: ScheduleId,
        key: MachineSlotKey,
    ) -> Vec<ConflictRecord> {
        self.index.remove(schedule_id, key);
        self.snapshot.remove_schedule(schedule_id);
        self.conflict_at(key).into_iter().collect()
    }

    /// 单个机台槽位的现存冲突
    fn conflict_at(&self, key: MachineSlotKey) -> Option<ConflictRecord> {
        let group = self.index.lookup_machine_slot(key);
        if group.len() < 2 {
            return None;
        }
        Some(ConflictRecord {
            date: key.date,
            shift_number: key.shift_number,
            slot_number: key.slot_number,
            machine_id: key.machine_id,
            schedules: group.to_vec(),
        })
    }

    // ==========================================
    // 只读聚合 (同一快照上可并行独立运行)
    // ==========================================

    /// 全量冲突列表
    pub fn conflicts(&self) -> Vec<ConflictRecord> {
        self.detector.detect(&self.index)
    }

    /// 指定日期的冲突列表
    pub fn conflicts_for_date(&self, date: NaiveDate) -> Vec<ConflictRecord> {
        self.detector.detect_for_date(&self.index, date)
    }

    /// 指定机台的冲突列表
    pub fn conflicts_for_machine(&self, machine_id: MachineId) -> Vec<ConflictRecord> {
        self.detector.detect_for_machine(&self.index, machine_id)
    }

    /// 窗口内机台利用率
    pub fn machine_utilization(&self, window: &DateWindow) -> HashMap<MachineId, UtilizationEntry> {
        self.utilization
            .compute(self.snapshot.machines(), self.snapshot.schedules(), window)
    }

    /// 月度计划 vs 实际完工偏差
    pub fn plan_variance(&self) -> HashMap<PartId, VarianceEntry> {
        self.variance.compute(
            self.snapshot.monthly_plans(),
            self.snapshot.schedules(),
            self.snapshot.parts(),
        )
    }

    /// 周度预测 vs 实际完工偏差
    pub fn forecast_variance(&self) -> HashMap<PartId, VarianceEntry> {
        self.variance.compute_forecast(
            self.snapshot.forecast_plans(),
            self.snapshot.schedules(),
            self.snapshot.parts(),
        )
    }

    /// 已延期排产列表
    pub fn delayed_schedules(&self) -> Vec<&ProductionSchedule> {
        self.snapshot.delayed_schedules()
    }
}
