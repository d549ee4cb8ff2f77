// Copyright (C) 2026 Parity Technologies (UK) Ltd.
// SPDX-License-Identifier: GPL-3.0-or-later

pub mod fixtures;
pub mod utils;

pub use fixtures::{Fixture, FixtureCase, FixtureLoader};
pub use utils::{ComparisonResult, Difference, compare_json};
