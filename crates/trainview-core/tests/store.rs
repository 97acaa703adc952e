// File: crates/trainview-core/tests/store.rs
// Purpose: Series Store load lifecycle, concurrency, and shared domains.

use std::sync::{Arc, Mutex};
use std::time::Duration;

use trainview_core::{SeriesStore, SourceDescriptor, SourceState};

const TIMEOUT: Duration = Duration::from_secs(10);

fn write_csv(dir: &tempfile::TempDir, name: &str, contents: &str) -> SourceDescriptor {
    std::fs::write(dir.path().join(name), contents).expect("write csv");
    SourceDescriptor::new(
        name.trim_end_matches(".csv"),
        name,
        name,
        "steelblue",
    )
}

#[test]
fn request_transitions_pending_to_loaded() {
    let dir = tempfile::tempdir().expect("temp dir");
    let desc = write_csv(&dir, "train_loss.csv", "Step,Loss\n0,1.0\n1,0.8\n");

    let mut store = SeriesStore::new(dir.path().to_str().unwrap());
    store.request(&desc);
    assert!(matches!(store.state("train_loss"), Some(SourceState::Pending)));
    assert!(store.get("train_loss").is_none(), "get never blocks while pending");

    assert!(store.pump_until_loaded(&["train_loss"], TIMEOUT));
    let series = store.get("train_loss").expect("loaded");
    assert_eq!(series.len(), 2);
}

#[test]
fn failed_load_leaves_key_absent_but_inspectable() {
    let dir = tempfile::tempdir().expect("temp dir");
    let desc = SourceDescriptor::new("val_loss", "Val Loss", "missing.csv", "green");

    let mut store = SeriesStore::new(dir.path().to_str().unwrap());
    store.request(&desc);
    while !matches!(store.state("val_loss"), Some(SourceState::Failed)) {
        let updated = store.pump_blocking(TIMEOUT);
        assert!(!updated.is_empty(), "timed out waiting for failure");
    }
    assert!(store.get("val_loss").is_none());
}

#[test]
fn concurrent_sources_complete_in_any_order() {
    let dir = tempfile::tempdir().expect("temp dir");
    let a = write_csv(&dir, "util.csv", "t,v\n0,50\n1,60\n2,70\n");
    let b = write_csv(&dir, "memPercent.csv", "t,v\n5,1\n6,2\n");
    let c = write_csv(&dir, "memBytes.csv", "t,v\n0,10\n9,20\n");

    let mut store = SeriesStore::new(dir.path().to_str().unwrap());
    for d in [&a, &b, &c] {
        store.request(d);
    }
    assert!(store.pump_until_loaded(&["util", "memPercent", "memBytes"], TIMEOUT));

    // Each key holds exactly its own data regardless of completion order.
    assert_eq!(store.get("util").unwrap().len(), 3);
    assert_eq!(store.get("memPercent").unwrap().len(), 2);
    assert_eq!(store.get("memBytes").unwrap().len(), 2);
}

#[test]
fn chart_is_drawable_without_unrelated_sources() {
    let dir = tempfile::tempdir().expect("temp dir");
    let train = write_csv(&dir, "train_loss.csv", "Step,Loss\n0,1.0\n");
    let val = write_csv(&dir, "val_loss.csv", "Step,Loss\n0,1.2\n");
    // A source that will never resolve is simply never requested here; the
    // loss pair gates only on itself.
    let mut store = SeriesStore::new(dir.path().to_str().unwrap());
    store.request(&train);
    store.request(&val);

    assert!(store.pump_until_loaded(&["train_loss", "val_loss"], TIMEOUT));
    assert!(store.all_loaded(&["train_loss", "val_loss"]));
    assert!(!store.all_loaded(&["train_loss", "val_loss", "memBytes"]));
}

#[test]
fn shared_x_domain_is_the_union_of_required_series() {
    let dir = tempfile::tempdir().expect("temp dir");
    let a = write_csv(&dir, "train_loss.csv", "Step,Loss\n2,1.0\n8,0.5\n");
    let b = write_csv(&dir, "val_loss.csv", "Step,Loss\n0,1.2\n5,0.9\n");

    let mut store = SeriesStore::new(dir.path().to_str().unwrap());
    store.request(&a);
    store.request(&b);
    assert!(store.pump_until_loaded(&["train_loss", "val_loss"], TIMEOUT));

    let x = store.shared_x_domain(&["train_loss", "val_loss"]).expect("domain");
    assert_eq!(x.min, 0.0);
    assert_eq!(x.max, 8.0);

    // Restricting the required keys narrows the shared axis.
    let x = store.shared_x_domain(&["train_loss"]).expect("domain");
    assert_eq!(x.min, 2.0);
}

#[test]
fn duplicate_request_does_not_reload() {
    let dir = tempfile::tempdir().expect("temp dir");
    let desc = write_csv(&dir, "train_loss.csv", "Step,Loss\n0,1.0\n");

    let mut store = SeriesStore::new(dir.path().to_str().unwrap());
    let seen = Arc::new(Mutex::new(Vec::<String>::new()));
    let sink = Arc::clone(&seen);
    store.on_update(move |key| sink.lock().unwrap().push(key.to_string()));

    store.request(&desc);
    assert!(store.pump_until_loaded(&["train_loss"], TIMEOUT));
    store.request(&desc);
    store.pump();

    assert_eq!(seen.lock().unwrap().as_slice(), ["train_loss"]);
}

#[test]
fn reload_replaces_the_series_wholesale() {
    let dir = tempfile::tempdir().expect("temp dir");
    let desc = write_csv(&dir, "train_loss.csv", "Step,Loss\n0,1.0\n");

    let mut store = SeriesStore::new(dir.path().to_str().unwrap());
    store.request(&desc);
    assert!(store.pump_until_loaded(&["train_loss"], TIMEOUT));
    assert_eq!(store.get("train_loss").unwrap().len(), 1);

    std::fs::write(dir.path().join("train_loss.csv"), "Step,Loss\n0,1.0\n1,0.8\n2,0.6\n")
        .expect("rewrite");
    store.reload(&desc);
    assert!(store.get("train_loss").is_none(), "pending again during reload");
    assert!(store.pump_until_loaded(&["train_loss"], TIMEOUT));
    assert_eq!(store.get("train_loss").unwrap().len(), 3);
}
