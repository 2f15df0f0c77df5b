//! Unit tests for Schemaboard.

mod hit_testing_tests;
mod perf_tests;
mod settings_watcher_tests;
mod snapshot_tests;
