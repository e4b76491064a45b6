//! Shared fixtures for the integration tests.

#![allow(dead_code)]

use std::path::Path;

use chrono::{DateTime, TimeZone, Utc};
use greenfield_core::{
    FileRepository, InMemoryRepository, JourneyStore, ManualClock, StoreOptions,
};
use greenfield_types::{PhasePolicy, SNAPSHOT_KEY};
use greenfield_utils::{AtomicWriteOptions, FileMode, FileSyncPolicy};

pub fn start_time() -> DateTime<Utc> {
    Utc.with_ymd_and_hms(2026, 2, 14, 8, 0, 0).unwrap()
}

pub fn clock() -> ManualClock {
    ManualClock::new(start_time())
}

/// File repository without fsync, for fast tests.
pub fn file_repo(dir: &Path) -> FileRepository {
    FileRepository::new(dir, SNAPSHOT_KEY).with_options(AtomicWriteOptions {
        sync: FileSyncPolicy::SkipSync,
        mode: FileMode::Default,
    })
}

pub fn file_store(dir: &Path, clock: &ManualClock) -> JourneyStore<FileRepository, ManualClock> {
    JourneyStore::with_clock(file_repo(dir), clock.clone(), StoreOptions::default())
}

pub fn memory_store(
    repo: &InMemoryRepository,
    policy: PhasePolicy,
) -> JourneyStore<InMemoryRepository, ManualClock> {
    JourneyStore::with_clock(
        repo.clone(),
        clock(),
        StoreOptions {
            phase_policy: policy,
        },
    )
}

/// The six milestones worth 33 of 106 points.
pub const PLANNING_SET: [&str; 6] = [
    "first-tool-use",
    "basic-data-entry",
    "real-wage-calculated",
    "cognitive-debt-assessed",
    "values-identified",
    "financial-clarity",
];
