// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Shared application services for the QECP visualizer (config, render
//! settings, prefs). Keeps the engine and its adapters thin and
//! framework-agnostic.

pub mod config;
pub mod config_port;
pub mod prefs;
pub mod render_port;
pub mod settings;
