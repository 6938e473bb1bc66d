//! SPDX-FileCopyrightText: 2025 `CyberDeco`
//!
//! SPDX-License-Identifier: MIT
//!
//! Armature pose resolution
//!
//! Bones arrive depth-first (every parent before its children) carrying a
//! local pose delta and their rest-pose basis; forward kinematics turns that
//! into global rotations and posed head positions.

mod forward_kinematics;

pub use forward_kinematics::{BonePose, check_bone_order, resolve_bone_tree, resolve_poses};
