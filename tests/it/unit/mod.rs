//! Unit tests for stageview components.

mod config_tests;
mod fusion_tests;
mod touch_tests;
mod transform_tests;
