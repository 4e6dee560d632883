// SPDX-FileCopyrightText: 2026 Switchboard Contributors
// SPDX-License-Identifier: MIT OR Apache-2.0

//! Test utilities for Switchboard integration tests.
//!
//! Provides stub implementations, ready-made adapters and a harness that
//! wires a fresh registry to a dispatcher, so tests never share state.
//!
//! # Components
//!
//! - [`CountingFunction`] - records how often it was called and with what
//! - [`FailingFunction`] - always fails with a fixed implementation error
//! - [`EchoFunction`] - returns its arguments as an object
//! - [`fixtures`] - `math`, `uuid` and other sample adapters
//! - [`TestHarness`] - registry plus dispatcher, built from a list of adapters

pub mod fixtures;
pub mod harness;
pub mod mock_function;

pub use harness::{TestHarness, TestHarnessBuilder};
pub use mock_function::{CountingFunction, EchoFunction, FailingFunction};
