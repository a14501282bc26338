//! Shared test utilities for store integration tests

use tempfile::TempDir;

use ecotrace::{Journey, TraceStore, TransportMode};

/// Creates a store backed by a temporary database
pub fn temp_store() -> (TempDir, TraceStore) {
    let dir = TempDir::new().expect("Failed to create temp dir");
    let store = TraceStore::open(&dir.path().join("trace.db")).expect("Failed to open store");
    (dir, store)
}

/// Log `count` identical journeys through the recorder
pub fn log_journeys(store: &TraceStore, count: usize, distance_km: f64, mode: &str, emissions_kg: f64) {
    let recorder = store.recorder();
    for _ in 0..count {
        let journey = Journey::new(distance_km, TransportMode::from_label(mode), emissions_kg);
        recorder
            .record_journey(&journey)
            .expect("Failed to record journey");
    }
}
