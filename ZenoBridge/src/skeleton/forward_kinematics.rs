//! Forward kinematics over a depth-first bone list.
//!
//! Poses are propagated as quaternion + offset pairs rather than by
//! accumulating affine matrices, which would need a rotation/scale
//! decomposition at every bone.

use glam::{Mat3, Quat, Vec3};

use crate::error::{Error, Result};
use crate::mesh::Bone;

/// Global pose of one bone.
///
/// A rest-pose point `p` attached to the bone moves to
/// `rotation * p + offset`.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct BonePose {
    /// `(w, x, y, z)`
    pub rotation: [f32; 4],
    /// Posed head position in world space.
    pub translation: [f32; 3],
    /// Translation part of the posed rigid transform.
    pub offset: [f32; 3],
}

/// Fail unless every bone's parent precedes it.
pub fn check_bone_order(bones: &[Bone]) -> Result<()> {
    for (index, bone) in bones.iter().enumerate() {
        let parent = bone.parent_index;
        if parent < -1 || (parent >= 0 && parent as usize >= index) {
            return Err(Error::BoneOrderViolation { index, parent });
        }
    }
    Ok(())
}

/// Resolve global poses for a depth-first ordered bone list.
///
/// The whole list is checked before any bone is resolved.
pub fn resolve_poses(bones: &[Bone]) -> Result<Vec<BonePose>> {
    check_bone_order(bones)?;

    // (rotation, offset) per resolved bone, indexed like `bones`
    let mut resolved: Vec<(Quat, Vec3)> = Vec::with_capacity(bones.len());
    let mut poses = Vec::with_capacity(bones.len());

    for bone in bones {
        let basis = bone.axis.linear();
        let delta_rot = rotate_quat(basis, quat_from_wxyz(bone.quaternion));
        let delta_t = basis * Vec3::from_array(bone.translation);
        let head = Vec3::from_array(bone.axis.origin());

        let (rotation, offset) = if bone.is_root() {
            (delta_rot, head - delta_rot * head + delta_t)
        } else {
            let (parent_rot, parent_offset) = resolved[bone.parent_index as usize];
            let rotation = parent_rot * delta_rot;
            (
                rotation,
                parent_offset - rotation * head + parent_rot * (head + delta_t),
            )
        };

        resolved.push((rotation, offset));
        poses.push(BonePose {
            rotation: quat_to_wxyz(rotation),
            translation: (rotation * head + offset).to_array(),
            offset: offset.to_array(),
        });
    }

    tracing::debug!("Resolved {} bone poses", poses.len());
    Ok(poses)
}

/// Resolve poses and return the bones with global rotation and posed head
/// position in place of their local deltas.
pub fn resolve_bone_tree(bones: &[Bone]) -> Result<Vec<Bone>> {
    let poses = resolve_poses(bones)?;
    Ok(bones
        .iter()
        .zip(poses)
        .map(|(bone, pose)| Bone {
            quaternion: pose.rotation,
            translation: pose.translation,
            ..bone.clone()
        })
        .collect())
}

/// Express a local-frame rotation in the global frame by rotating its
/// vector part with `basis`; the scalar part is kept.
fn rotate_quat(basis: Mat3, q: Quat) -> Quat {
    let v = basis * Vec3::new(q.x, q.y, q.z);
    let rotated = Quat::from_xyzw(v.x, v.y, v.z, q.w);
    if rotated.length_squared() > 0.0 {
        rotated.normalize()
    } else {
        Quat::IDENTITY
    }
}

fn quat_from_wxyz(q: [f32; 4]) -> Quat {
    Quat::from_xyzw(q[1], q[2], q[3], q[0])
}

fn quat_to_wxyz(q: Quat) -> [f32; 4] {
    [q.w, q.x, q.y, q.z]
}
