use std::fs;

use tempfile::tempdir;

use belief_fusion_cli::adapter::{load_system, store_system, write_combination_trace};
use belief_fusion_core::{Belief, BeliefSystem, IGNORANCE_LABEL};

#[test]
fn load_names_the_system_after_the_file_stem() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("engine_readings.txt");
    fs::write(&path, "engine_fault\t0.6\n\nsensor_drift;0.25\njunk line\n").unwrap();

    let system = load_system(&path).unwrap();
    assert_eq!(system.name, "engine_readings");

    // The empty line is skipped; the junk line degrades instead of failing
    // the whole load.
    assert_eq!(system.beliefs().len(), 3);
    assert!((system.weight_of("engine_fault") - 0.6).abs() < 1e-12);
    assert!((system.weight_of("sensor_drift") - 0.25).abs() < 1e-12);
    assert_eq!(system.beliefs()[2].label(), "");
    assert_eq!(system.beliefs()[2].weight, 0.0);
}

#[test]
fn load_tolerates_windows_line_endings() {
    let dir = tempdir().unwrap();
    let path = dir.path().join("crlf.txt");
    fs::write(&path, "engine_fault\t0.6\r\nsensor_drift\t0.4\r\n").unwrap();

    let system = load_system(&path).unwrap();
    assert!((system.weight_of("engine_fault") - 0.6).abs() < 1e-12);
    assert!((system.weight_of("sensor_drift") - 0.4).abs() < 1e-12);
}

#[test]
fn load_surfaces_io_failures() {
    let dir = tempdir().unwrap();
    let missing = dir.path().join("missing.txt");
    assert!(load_system(&missing).is_err());
}

#[test]
fn stored_systems_load_back_with_the_same_masses() {
    let dir = tempdir().unwrap();
    let mut system = BeliefSystem::new("combined");
    system.push(Belief::new("engine_fault", 0.62));
    system.push(Belief::new("sensor_drift", 0.2));
    system.prepare();

    let path = store_system(&system, dir.path()).unwrap();
    assert_eq!(path, dir.path().join("combined.txt"));

    let loaded = load_system(&path).unwrap();
    assert_eq!(loaded.name, "combined");
    assert_eq!(loaded.beliefs().len(), 3);
    for original in system.ordered_records() {
        let reloaded = loaded.weight_of(original.label());
        assert!((original.weight - reloaded).abs() < 1e-12);
    }
    assert!((loaded.total_mass() - 1.0).abs() < 1e-12);
    // The ignorance record written by prepare comes back classified.
    assert!(loaded.beliefs().iter().any(|b| b.is_ignorance()));
}

#[test]
fn store_writes_ordered_records_and_drops_unset_ones() {
    let dir = tempdir().unwrap();
    let mut system = BeliefSystem::new("ordering");
    system.push(Belief::new(IGNORANCE_LABEL, 0.2));
    system.push(Belief::new("zeta", 0.3));
    system.push(Belief::new("alpha", 0.5));
    system.push(Belief::new("", 0.0));

    let path = store_system(&system, dir.path()).unwrap();
    let text = fs::read_to_string(&path).unwrap();
    let labels: Vec<&str> = text
        .lines()
        .map(|line| line.split('\t').next().unwrap())
        .collect();
    assert_eq!(labels, vec!["alpha", "zeta", IGNORANCE_LABEL]);
}

#[test]
fn combine_round_trips_through_the_file_format() {
    let dir = tempdir().unwrap();
    let path_a = dir.path().join("a.txt");
    let path_b = dir.path().join("b.txt");
    fs::write(&path_a, "x\t0.6\n").unwrap();
    fs::write(&path_b, "x\t0.5\n").unwrap();

    let a = load_system(&path_a).unwrap();
    let b = load_system(&path_b).unwrap();
    let combined = a.combine(&b);
    let out = store_system(&combined, dir.path()).unwrap();

    let reloaded = load_system(&out).unwrap();
    assert_eq!(reloaded.name, "a+b");
    assert!((reloaded.weight_of("x") - 0.8).abs() < 1e-12);
    assert!((reloaded.weight_of(IGNORANCE_LABEL) - 0.2).abs() < 1e-12);
}

#[test]
fn trace_table_lines_up_headers_and_cells() {
    let dir = tempdir().unwrap();
    let mut a = BeliefSystem::new("a");
    a.push(Belief::new("x", 0.6));
    let mut b = BeliefSystem::new("b");
    b.push(Belief::new("x", 0.5));
    b.push(Belief::new("y", 0.3));

    let path = write_combination_trace(&a, &b, dir.path()).unwrap();
    assert_eq!(path, dir.path().join("axb.txt"));

    let text = fs::read_to_string(&path).unwrap();
    let lines: Vec<&str> = text.lines().collect();

    // caption, column header, then one row per prepared left record
    assert_eq!(lines.len(), 4);
    assert_eq!(lines[0], "\tm(b)");
    assert!(lines[1].starts_with("m(a)\tm(x)=0.5\tm(y)=0.3\tm(Pheta)="));

    // every row carries exactly one cell per column
    let header_fields = lines[1].split('\t').count();
    for row in &lines[2..] {
        assert_eq!(row.split('\t').count(), header_fields);
    }

    // x against y conflicts; the cell is still rendered
    assert!(lines[2].starts_with("m(x)=0.6\tm(x)=0.3"));
    assert!(lines[2].contains("m(Phy)="));
}
