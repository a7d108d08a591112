use renumber_core::{
    check_shift, Directory, EngineOptions, MemoryDirectory, Range, RangeError, Renamer,
    RenumberError, Snapshot, Strategy,
};

fn renamer(files: &[&str]) -> Renamer<MemoryDirectory> {
    Renamer::new(
        MemoryDirectory::with_files(files.iter().copied()),
        EngineOptions::default(),
    )
    .unwrap()
}

#[test]
fn test_collision_examples() {
    let s = Snapshot::from_names(["1.txt", "2.txt", "3.txt"]);
    assert!(!check_shift(&s, Range::new(0, 2), 1));
    assert!(check_shift(&s, Range::new(0, 3), 5));
    assert!(check_shift(&s, Range::new(1, 3), 1));
}

#[test]
fn test_shift_by_ten() {
    let mut r = renamer(&["1.txt", "2.txt", "3.txt"]);
    r.shift(Range::new(0, 3), 10).unwrap();
    assert_eq!(r.directory().names(), ["11.txt", "12.txt", "13.txt"]);
}

#[test]
fn test_shift_then_inverse_restores_names() {
    let mut r = renamer(&["1.txt", "2.txt", "3.txt", "notes.md"]);
    r.shift(Range::new(0, 3), 7).unwrap();
    r.shift(Range::new(0, 3), -7).unwrap();
    assert_eq!(
        r.directory().names(),
        ["1.txt", "2.txt", "3.txt", "notes.md"]
    );
    assert_eq!(r.directory().contents("2.txt"), Some("2.txt"));
}

#[test]
fn test_backward_range_shifts_same_files() {
    let mut r = renamer(&["1.txt", "2.txt", "3.txt"]);
    r.shift(Range::new(0, 3).reverse(), 1).unwrap();
    assert_eq!(r.directory().names(), ["2.txt", "3.txt", "4.txt"]);
}

#[test]
fn test_insert_moves_first_file_to_end() {
    let mut r = renamer(&["0.txt", "1.txt", "2.txt", "3.txt"]);
    r.insert(Range::new(0, 1), 3).unwrap();
    let dir = r.directory();
    assert_eq!(dir.contents("3.txt"), Some("0.txt"));
    assert_eq!(dir.contents("0.txt"), Some("1.txt"));
    assert_eq!(dir.names().len(), 4);
}

#[test]
fn test_insert_then_inverse_restores_contents() {
    let mut r = renamer(&["1.png", "2.png", "3.png", "4.png", "5.png"]);
    r.insert(Range::new(0, 2), 4).unwrap();
    r.insert(Range::new(3, 5), 0).unwrap();
    for name in ["1.png", "2.png", "3.png", "4.png", "5.png"] {
        assert_eq!(r.directory().contents(name), Some(name));
    }
}

#[test]
fn test_best_effort_partial_failure() {
    let mut r = renamer(&["1.txt", "2.txt", "abc.txt"]);
    // Negative shifts visit positions upward, so abc.txt is reached last
    let err = r.shift(Range::new(0, 3), -1).unwrap_err();
    assert!(matches!(err, RenumberError::NotNumeric { name } if name == "abc.txt"));
    assert_eq!(r.directory().names(), ["0.txt", "1.txt", "abc.txt"]);
    assert_eq!(r.snapshot().names(), ["0.txt", "1.txt", "abc.txt"]);
}

#[test]
fn test_plan_then_commit_is_all_or_nothing() {
    let options = EngineOptions {
        strategy: Strategy::PlanThenCommit,
        ..EngineOptions::default()
    };
    let dir = MemoryDirectory::with_files(["1.txt", "2.txt", "abc.txt"]);
    let mut r = Renamer::new(dir, options).unwrap();
    assert!(r.shift(Range::new(0, 3), -1).is_err());
    assert_eq!(r.directory().names(), ["1.txt", "2.txt", "abc.txt"]);
}

#[test]
fn test_collision_leaves_directory_untouched() {
    let mut r = renamer(&["1.txt", "2.txt", "5.txt"]);
    let err = r.shift(Range::new(0, 2), 3).unwrap_err();
    match err {
        RenumberError::Collision {
            name,
            target,
            existing,
        } => {
            assert_eq!(name, "2.txt");
            assert_eq!(target, "5.txt");
            assert_eq!(existing, "5.txt");
        },
        other => panic!("expected collision, got {other:?}"),
    }
    assert_eq!(r.directory().rename_count(), 0);
}

#[test]
fn test_normalize_to_width_three() {
    let mut r = renamer(&["7.txt"]);
    r.normalize(3).unwrap();
    assert_eq!(r.directory().names(), ["007.txt"]);
}

#[test]
fn test_shift_without_auto_normalize() {
    let options = EngineOptions {
        normalize: false,
        ..EngineOptions::default()
    };
    let dir = MemoryDirectory::with_files(["8.txt", "9.txt"]);
    let mut r = Renamer::new(dir, options).unwrap();
    let outcome = r.shift(Range::new(1, 2), 1).unwrap();
    assert!(outcome.normalized.is_empty());
    assert_eq!(r.directory().names(), ["10.txt", "8.txt"]);
}

#[test]
fn test_filesystem_failure_mid_shift_is_reported() {
    let mut dir = MemoryDirectory::with_files(["1.txt", "2.txt", "3.txt"]);
    dir.fail_renames_of("1.txt");
    let mut r = Renamer::new(dir, EngineOptions::default()).unwrap();

    let err = r.shift(Range::new(0, 3), 1).unwrap_err();
    assert!(matches!(err, RenumberError::Filesystem { .. }));
    // 3.txt and 2.txt were already moved; nothing is rolled back
    assert_eq!(r.snapshot().names(), ["1.txt", "3.txt", "4.txt"]);
}

#[test]
fn test_out_of_bounds_range_is_rejected() {
    let mut r = renamer(&["1.txt"]);
    assert!(matches!(
        r.shift(Range::new(0, 2), 1),
        Err(RenumberError::Range(RangeError::OutOfBounds { len: 1, .. }))
    ));
}

#[test]
fn test_flag_groups_in_both_directions() {
    let mut r = renamer(&["1.txt", "2-.txt", "3.txt", "4+.txt", "5.txt"]);
    let reports = r.parse_and_increment_groups().unwrap();
    assert_eq!(reports.len(), 2);
    assert!(r
        .directory()
        .names()
        .iter()
        .all(|name| !name.contains('+') && !name.contains("-.")));
    assert_eq!(r.directory().contents("1.txt"), Some("2-.txt"));
    assert_eq!(r.directory().contents("0.txt"), Some("1.txt"));
    assert_eq!(r.directory().contents("5.txt"), Some("4+.txt"));
    assert_eq!(r.directory().contents("6.txt"), Some("5.txt"));
}

#[test]
fn test_change_directory_keeps_previous_on_failure() {
    let dir = MemoryDirectory::with_files(["1.txt"]).with_dir("/b", ["9.txt"]);
    let mut r = Renamer::new(dir, EngineOptions::default()).unwrap();
    let err = r
        .change_directory(std::path::Path::new("/nope"))
        .unwrap_err();
    assert!(matches!(err, RenumberError::InvalidLocation { .. }));
    assert_eq!(r.snapshot().names(), ["1.txt"]);
    assert_eq!(r.directory().list_entries().unwrap(), ["1.txt"]);
}
