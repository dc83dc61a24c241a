use detector_types::ReplicaMode;
use geometry_kernel::{Rotation, Transform};

/// Transforms of copies `0..count` of a replica group.
///
/// Linear copies keep the original rotation and translate by `j * shift`.
/// Rotational copies keep the original position; copy `j` carries the step
/// rotation `Rz(shift.z) * Ry(shift.y) * Rx(shift.x)` applied `j` times on top
/// of the original rotation. Copy 0 always equals the original.
pub fn replica_transforms(
    original: &Transform,
    mode: ReplicaMode,
    shift: [f64; 3],
    count: u32,
) -> Vec<Transform> {
    match mode {
        ReplicaMode::Linear => (0..count)
            .map(|j| {
                let j = j as f64;
                Transform::new(
                    original.rotation,
                    [
                        original.translation[0] + j * shift[0],
                        original.translation[1] + j * shift[1],
                        original.translation[2] + j * shift[2],
                    ],
                )
            })
            .collect(),
        ReplicaMode::Rotational => {
            let step = Rotation::from_angles(shift);
            (0..count)
                .scan(original.rotation, |rotation, _| {
                    let current = *rotation;
                    *rotation = step.compose(current);
                    Some(Transform::new(current, original.translation))
                })
                .collect()
        }
    }
}
