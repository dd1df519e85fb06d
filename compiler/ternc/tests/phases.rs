//! Whole-pipeline tests: analysis and execution driven through `Session`.
//!
//! There is no CFG builder in the workspace, so `common::Cfg` writes the
//! execution annotations onto analyzed trees by hand.

#![allow(clippy::unwrap_used, clippy::expect_used, reason = "tests")]

#[path = "phases/common/mod.rs"]
mod common;

#[path = "phases/gta/mod.rs"]
mod gta;

#[path = "phases/eval/mod.rs"]
mod eval;

#[path = "phases/end_to_end/mod.rs"]
mod end_to_end;
