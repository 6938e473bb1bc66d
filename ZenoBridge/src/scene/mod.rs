//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! Scene/graph bridge
//!
//! Per-scene registries of named graph endpoints and groupings, plus the
//! [`Session`] driver that runs one declare, register, apply, read-back
//! cycle against a [`GraphEngine`].

mod endpoints;
mod engine;
mod lines;
mod session;

pub use endpoints::{GraphEndpoints, PendingSource};
pub use engine::{EvaluationContext, GraphEngine, SceneHandle};
pub use lines::LineBuffers;
pub use session::{SceneOutput, Session};
