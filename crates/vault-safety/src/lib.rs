// Copyright (c) 2025 Felix Kahle.
//
// Permission is hereby granted, free of charge, to any person obtaining
// a copy of this software and associated documentation files (the
// "Software"), to deal in the Software without restriction, including
// without limitation the rights to use, copy, modify, merge, publish,
// distribute, sublicense, and/or sell copies of the Software, and to
// permit persons to whom the Software is furnished to do so, subject to
// the following conditions:
//
// The above copyright notice and this permission notice shall be
// included in all copies or substantial portions of the Software.
//
// THE SOFTWARE IS PROVIDED "AS IS", WITHOUT WARRANTY OF ANY KIND,
// EXPRESS OR IMPLIED, INCLUDING BUT NOT LIMITED TO THE WARRANTIES OF
// MERCHANTABILITY, FITNESS FOR A PARTICULAR PURPOSE AND
// NONINFRINGEMENT. IN NO EVENT SHALL THE AUTHORS OR COPYRIGHT HOLDERS BE
// LIABLE FOR ANY CLAIM, DAMAGES OR OTHER LIABILITY, WHETHER IN AN ACTION
// OF CONTRACT, TORT OR OTHERWISE, ARISING FROM, OUT OF OR IN CONNECTION
// WITH THE SOFTWARE OR THE USE OR OTHER DEALINGS IN THE SOFTWARE.

//! Vault-Safety: the Banker's algorithm safety check
//!
//! Decides whether a `vault_model::snapshot::Snapshot` is in a safe state,
//! i.e. whether some order exists in which every process can obtain its
//! remaining need, run to completion and release what it holds.
//!
//! Core flow
//! - Load or build a `Snapshot<T>`.
//! - Run `checker::SafetyChecker::check`, or `check_with_monitor` to observe
//!   each step (`monitor::log::LogMonitor` prints the classic trace).
//! - Inspect the `result::SafetyOutcome`: verdict, final work vector and
//!   statistics.
//!
//! Guarantees
//! - Deterministic: the lowest-index eligible process is always selected.
//! - Terminates after at most `N` successful scans plus one failing scan.
//! - Never fails; malformed snapshots are rejected earlier by the model.
//!
//! Module map
//! - `checker`: the algorithm and the `check_safety` shortcut.
//! - `monitor`: step monitors (log, composite, no-op).
//! - `result`: verdict and outcome types.
//! - `stats`: counters and timing.
//! - `verify`: replays a proposed sequence to confirm it.

pub mod checker;
pub mod monitor;
pub mod result;
pub mod stats;
pub mod verify;
