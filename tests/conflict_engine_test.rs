// ==========================================
// ConflictDetector 引擎集成测试
// ==========================================
// 测试目标: 冲突对称性/完备性、排序约定、写前预检不改动索引
// 口径: 机台槽位基数 ≥2 即冲突;状态/零件/数量不影响判定
// ==========================================


use cnc_workshop_aps::domain::types::{MachineSlotKey, ScheduleStatus};
use cnc_workshop_aps::engine::{ConflictDetector, SlotIndex};
use crate::test_helpers::{create_test_candidate, create_test_schedule, date};

#[test]
fn test_scenario_double_booked_slot_yields_single_record() {
    let d = date(2024, 1, 1);
    // 机台 M1: 槽位 1 两条 (S10, S11),槽位 2 一条 (S12)
    let schedules = vec![
        create_test_schedule(10, d, 1, 1, 1, 1, 10, Some(100), ScheduleStatus::Planned),
        create_test_schedule(11, d, 1, 1, 1, 2, 20, Some(75), ScheduleStatus::Planned),
        create_test_schedule(12, d, 1, 2, 1, 1, 11, Some(50), ScheduleStatus::Planned),
    ];
    let index = SlotIndex::build(&schedules);
    let conflicts = ConflictDetector::new().detect(&index);

    assert_eq!(conflicts.len(), 1);
    let record = &conflicts[0];
    assert_eq!(record.date, d);
    assert_eq!(record.shift_number, 1);
    assert_eq!(record.slot_number, 1);
    assert_eq!(record.machine_id, 1);

    let ids: Vec<i64> = record.schedules.iter().map(|s| s.schedule_id).collect();
    assert_eq!(ids, vec![10, 11]); // 输入序保持
}

#[test]
fn test_conflict_completeness() {
    let d = date(2024, 1, 1);
    let schedules = vec![
        // M1 槽位 1: 3 条 (冲突)
        create_test_schedule(1, d, 1, 1, 1, 1, 10, Some(10), ScheduleStatus::Planned),
        create_test_schedule(2, d, 1, 1, 1, 2, 20, Some(10), ScheduleStatus::InProgress),
        create_test_schedule(3, d, 1, 1, 1, 3, 30, Some(10), ScheduleStatus::Completed),
        // M1 槽位 2: 1 条 (不冲突)
        create_test_schedule(4, d, 1, 2, 1, 1, 10, Some(10), ScheduleStatus::Planned),
        // M2 槽位 1: 2 条 (冲突)
        create_test_schedule(5, d, 1, 1, 2, 1, 10, Some(10), ScheduleStatus::Delayed),
        create_test_schedule(6, d, 1, 1, 2, 2, 20, None, ScheduleStatus::Planned),
    ];
    let index = SlotIndex::build(&schedules);
    let conflicts = ConflictDetector::new().detect(&index);

    // 冲突记录覆盖的排产集合 = 所有基数 ≥2 分组的并集,恰好不含 4 号
    let mut covered: Vec<i64> = conflicts
        .iter()
        .flat_map(|c| c.schedules.iter().map(|s| s.schedule_id))
        .collect();
    covered.sort_unstable();
    assert_eq!(covered, vec![1, 2, 3, 5, 6]);
}

#[test]
fn test_status_does_not_affect_classification() {
    let d = date(2024, 1, 1);
    // 完工 + 延期同槽位照样是冲突: 争用事实与状态无关
    let schedules = vec![
        create_test_schedule(1, d, 2, 2, 1, 1, 10, Some(10), ScheduleStatus::Completed),
        create_test_schedule(2, d, 2, 2, 1, 2, 20, None, ScheduleStatus::Delayed),
    ];
    let index = SlotIndex::build(&schedules);
    assert_eq!(ConflictDetector::new().detect(&index).len(), 1);
}

#[test]
fn test_ordering_machine_then_slot_ascending() {
    let d1 = date(2024, 1, 1);
    let d2 = date(2024, 1, 2);
    let schedules = vec![
        // M2 在 d1 冲突
        create_test_schedule(1, d1, 1, 1, 2, 1, 10, Some(10), ScheduleStatus::Planned),
        create_test_schedule(2, d1, 1, 1, 2, 2, 20, Some(10), ScheduleStatus::Planned),
        // M1 在 d2 冲突
        create_test_schedule(3, d2, 2, 1, 1, 1, 10, Some(10), ScheduleStatus::Planned),
        create_test_schedule(4, d2, 2, 1, 1, 2, 20, Some(10), ScheduleStatus::Planned),
        // M1 在 d1 冲突
        create_test_schedule(5, d1, 1, 2, 1, 1, 10, Some(10), ScheduleStatus::Planned),
        create_test_schedule(6, d1, 1, 2, 1, 2, 20, Some(10), ScheduleStatus::Planned),
    ];
    let index = SlotIndex::build(&schedules);
    let conflicts = ConflictDetector::new().detect(&index);

    let keys: Vec<(i64, chrono::NaiveDate, u8, u8)> = conflicts
        .iter()
        .map(|c| (c.machine_id, c.date, c.shift_number, c.slot_number))
        .collect();
    // 机台优先,机台内按 (日期, 班次, 槽位) 升序
    assert_eq!(
        keys,
        vec![(1, d1, 1, 2), (1, d2, 2, 1), (2, d1, 1, 1)]
    );
}

#[test]
fn test_detect_for_date_and_machine() {
    let d1 = date(2024, 1, 1);
    let d2 = date(2024, 1, 2);
    let schedules = vec![
        create_test_schedule(1, d1, 1, 1, 1, 1, 10, Some(10), ScheduleStatus::Planned),
        create_test_schedule(2, d1, 1, 1, 1, 2, 20, Some(10), ScheduleStatus::Planned),
        create_test_schedule(3, d2, 1, 1, 2, 1, 10, Some(10), ScheduleStatus::Planned),
        create_test_schedule(4, d2, 1, 1, 2, 2, 20, Some(10), ScheduleStatus::Planned),
    ];
    let index = SlotIndex::build(&schedules);
    let detector = ConflictDetector::new();

    let by_date = detector.detect_for_date(&index, d1);
    assert_eq!(by_date.len(), 1);
    assert_eq!(by_date[0].machine_id, 1);

    let by_machine = detector.detect_for_machine(&index, 2);
    assert_eq!(by_machine.len(), 1);
    assert_eq!(by_machine[0].date, d2);

    assert!(detector.detect_for_date(&index, date(2024, 2, 1)).is_empty());
    assert!(detector.detect_for_machine(&index, 99).is_empty());
}

#[test]
fn test_check_candidate_previews_without_mutation() {
    let d = date(2024, 1, 1);
    let schedules = vec![create_test_schedule(
        1, d, 1, 1, 1, 1, 10, Some(100), ScheduleStatus::Planned,
    )];
    let index = SlotIndex::build(&schedules);
    let detector = ConflictDetector::new();

    // 占用槽位 -> 预检出冲突
    let candidate = create_test_candidate(d, 1, 1, 1, 2, 20, Some(75));
    let preview = detector.check_candidate(&candidate, &index);
    assert!(preview.would_conflict);
    assert_eq!(preview.existing.len(), 1);
    assert_eq!(preview.existing[0].schedule_id, 1);
    assert_eq!(preview.machine_slot, MachineSlotKey::new(d, 1, 1, 1));

    // 空槽位 -> 无冲突
    let free = create_test_candidate(d, 1, 2, 1, 2, 20, Some(75));
    assert!(!detector.check_candidate(&free, &index).would_conflict);

    // 预检不改动索引
    assert_eq!(index.len(), 1);
    assert!(detector.detect(&index).is_empty());
}

#[test]
fn test_check_candidate_excludes_own_identity() {
    let d = date(2024, 1, 1);
    // 更新场景: 1 号排产留在原槽位,不得与自身判冲突
    let schedules = vec![create_test_schedule(
        1, d, 1, 1, 1, 1, 10, Some(100), ScheduleStatus::Planned,
    )];
    let index = SlotIndex::build(&schedules);
    let detector = ConflictDetector::new();

    let candidate = create_test_candidate(d, 1, 1, 1, 1, 10, Some(80));
    let preview = detector.check_candidate_excluding(&candidate, Some(1), &index);
    assert!(!preview.would_conflict);
    assert!(preview.existing.is_empty());
}

#[test]
fn test_warning_payload_shape() {
    let d = date(2024, 1, 1);
    let schedules = vec![create_test_schedule(
        1, d, 1, 1, 1, 1, 10, Some(100), ScheduleStatus::Planned,
    )];
    let index = SlotIndex::build(&schedules);
    let candidate = create_test_candidate(d, 1, 1, 1, 2, 20, Some(75));

    let preview = ConflictDetector::new().check_candidate(&candidate, &index);
    let payload = preview.warning_payload();
    assert_eq!(payload["conflicts_detected"], true);
    assert_eq!(payload["conflicts"].as_array().unwrap().len(), 1);
    assert!(payload["message"].as_str().unwrap().contains("double-booked"));
}

#[test]
fn test_detect_is_idempotent() {
    let d = date(2024, 1, 1);
    let schedules = vec![
        create_test_schedule(1, d, 1, 1, 1, 1, 10, Some(10), ScheduleStatus::Planned),
        create_test_schedule(2, d, 1, 1, 1, 2, 20, Some(10), ScheduleStatus::Planned),
    ];
    let index = SlotIndex::build(&schedules);
    let detector = ConflictDetector::new();

    assert_eq!(detector.detect(&index), detector.detect(&index));
}
