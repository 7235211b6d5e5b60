// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared test doubles and fixtures for QECP visualizer crates.
#![forbid(unsafe_code)]
//!
//! # Modules
//!
//! - [`config`] - In-memory config store fake for testing without filesystem
//! - [`simulation`] - Simulator grid builder
//! - [`case`] - Decoding case builder
//! - [`data`] - Whole-dataset builder

pub mod case;
pub mod config;
pub mod data;
pub mod simulation;

pub use case::CaseBuilder;
pub use config::InMemoryConfigStore;
pub use data::VizDataBuilder;
pub use simulation::SimulationBuilder;
