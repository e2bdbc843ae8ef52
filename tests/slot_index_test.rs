// ==========================================
// SlotIndex 槽位索引集成测试
// ==========================================
// 测试目标: 两级分组查询、输入序保持、增量修补与整体重建一致
// ==========================================


use cnc_workshop_aps::domain::types::{MachineSlotKey, ScheduleStatus, SlotKey};
use cnc_workshop_aps::engine::SlotIndex;
use crate::test_helpers::{create_test_schedule, date};

#[test]
fn test_lookup_returns_all_machines_in_slot() {
    let d = date(2024, 1, 1);
    // 同一槽位,两台机台各一条
    let schedules = vec![
        create_test_schedule(1, d, 1, 1, 100, 1, 10, Some(50), ScheduleStatus::Planned),
        create_test_schedule(2, d, 1, 1, 200, 2, 20, Some(30), ScheduleStatus::Planned),
        create_test_schedule(3, d, 2, 1, 100, 1, 10, Some(40), ScheduleStatus::Planned),
    ];
    let index = SlotIndex::build(&schedules);

    let slot = index.lookup(SlotKey::new(d, 1, 1));
    assert_eq!(slot.len(), 2);

    let machine_slot = index.lookup_machine_slot(MachineSlotKey::new(d, 1, 1, 100));
    assert_eq!(machine_slot.len(), 1);
    assert_eq!(machine_slot[0].schedule_id, 1);
}

#[test]
fn test_lookup_missing_slot_is_empty() {
    let index = SlotIndex::build(&[]);
    assert!(index.is_empty());
    assert!(index.lookup(SlotKey::new(date(2024, 1, 1), 1, 1)).is_empty());
    assert!(index
        .lookup_machine_slot(MachineSlotKey::new(date(2024, 1, 1), 1, 1, 100))
        .is_empty());
}

#[test]
fn test_group_preserves_input_order() {
    let d = date(2024, 1, 1);
    // 同一机台槽位三条,输入序 = 7, 3, 9 ("谁先到"对调用方有意义)
    let schedules = vec![
        create_test_schedule(7, d, 1, 1, 100, 1, 10, Some(10), ScheduleStatus::Planned),
        create_test_schedule(3, d, 1, 1, 100, 2, 20, Some(10), ScheduleStatus::Planned),
        create_test_schedule(9, d, 1, 1, 100, 3, 30, Some(10), ScheduleStatus::Planned),
    ];
    let index = SlotIndex::build(&schedules);

    let group = index.lookup_machine_slot(MachineSlotKey::new(d, 1, 1, 100));
    let ids: Vec<i64> = group.iter().map(|s| s.schedule_id).collect();
    assert_eq!(ids, vec![7, 3, 9]);
}

#[test]
fn test_incremental_patch_matches_rebuild() {
    let d = date(2024, 1, 1);
    let s1 = create_test_schedule(1, d, 1, 1, 100, 1, 10, Some(10), ScheduleStatus::Planned);
    let s2 = create_test_schedule(2, d, 1, 1, 100, 2, 20, Some(10), ScheduleStatus::Planned);
    let s3 = create_test_schedule(3, d, 1, 2, 100, 1, 10, Some(10), ScheduleStatus::Planned);

    // 整体构建
    let built = SlotIndex::build(&[s1.clone(), s2.clone(), s3.clone()]);

    // 增量构建
    let mut patched = SlotIndex::empty();
    patched.insert(s1.clone());
    patched.insert(s2.clone());
    patched.insert(s3.clone());

    let key = MachineSlotKey::new(d, 1, 1, 100);
    assert_eq!(built.len(), patched.len());
    assert_eq!(
        built.lookup_machine_slot(key),
        patched.lookup_machine_slot(key)
    );

    // 移除一条后槽位基数回落
    assert!(patched.remove(2, key));
    assert_eq!(patched.lookup_machine_slot(key).len(), 1);
    assert_eq!(patched.len(), 2);

    // 同键重复移除无效果
    assert!(!patched.remove(2, key));
    assert_eq!(patched.len(), 2);
}

#[test]
fn test_remove_clears_empty_groups() {
    let d = date(2024, 1, 1);
    let s1 = create_test_schedule(1, d, 1, 1, 100, 1, 10, Some(10), ScheduleStatus::Planned);
    let key = s1.machine_slot_key();

    let mut index = SlotIndex::build(&[s1]);
    assert!(index.remove(1, key));
    assert!(index.is_empty());
    assert!(index.lookup(key.slot_key()).is_empty());
    assert!(index.lookup_machine_slot(key).is_empty());
}

#[test]
fn test_rebuild_is_idempotent() {
    let d = date(2024, 1, 1);
    let schedules = vec![
        create_test_schedule(1, d, 1, 1, 100, 1, 10, Some(10), ScheduleStatus::Planned),
        create_test_schedule(2, d, 1, 1, 100, 2, 20, Some(10), ScheduleStatus::Planned),
    ];
    let a = SlotIndex::build(&schedules);
    let b = SlotIndex::build(&schedules);

    let key = MachineSlotKey::new(d, 1, 1, 100);
    assert_eq!(a.lookup_machine_slot(key), b.lookup_machine_slot(key));
    assert_eq!(a.len(), b.len());
}
