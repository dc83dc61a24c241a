use detector_types::GridDefinition;

use crate::types::{GridError, GridLayout, PillarRole, PillarSlot};

/// Validate a grid definition and compute its container extent and pillar centres.
///
/// For `N` = `pillar_count` the row holds `2N + 1` pillars along X, A at even
/// indices and B at odd indices, packed edge to edge. B pillars sit flush with
/// the container's lower Y face.
pub fn compute_layout(def: &GridDefinition) -> Result<GridLayout, GridError> {
    if def.name.is_empty() {
        return Err(GridError::MissingName);
    }
    if def.pillar_a.iter().any(|d| *d < 0.0) {
        return Err(GridError::NegativeDimension {
            pillar: PillarRole::A,
            dims: def.pillar_a,
        });
    }
    if def.pillar_b.iter().any(|d| *d < 0.0) {
        return Err(GridError::NegativeDimension {
            pillar: PillarRole::B,
            dims: def.pillar_b,
        });
    }
    if def.pillar_count < 0 {
        return Err(GridError::NegativePillarCount {
            count: def.pillar_count,
        });
    }
    let [aw, ah, ad] = def.pillar_a;
    let [bw, bh, bd] = def.pillar_b;
    if bh > ah {
        return Err(GridError::ExtentExceeded { axis: 'Y', a: ah, b: bh });
    }
    if bd > ad {
        return Err(GridError::ExtentExceeded { axis: 'Z', a: ad, b: bd });
    }

    let n = def.pillar_count as u32;
    let width = n as f64 * bw + (n + 1) as f64 * aw;
    let start = -width / 2.0 + aw / 2.0;
    let step = aw / 2.0 + bw / 2.0;
    let b_offset = -(ah / 2.0 - bh / 2.0);

    let slots = (0..2 * n + 1)
        .map(|i| {
            let x = start + i as f64 * step;
            if i % 2 == 0 {
                PillarSlot {
                    index: i,
                    role: PillarRole::A,
                    center: [x, 0.0, 0.0],
                }
            } else {
                PillarSlot {
                    index: i,
                    role: PillarRole::B,
                    center: [x, b_offset, 0.0],
                }
            }
        })
        .collect();

    Ok(GridLayout {
        container_size: [width, ah, ad],
        slots,
    })
}

#[cfg(test)]
mod tests {
    use super::*;

    fn grid(n: i32, a: [f64; 3], b: [f64; 3]) -> GridDefinition {
        GridDefinition {
            name: "g".into(),
            pillar_count: n,
            pillar_a: a,
            pillar_b: b,
            position: [0.0; 3],
            rotation: [0.0; 3],
            mother: "World".into(),
            placed: true,
        }
    }

    #[test]
    fn single_pillar_grid() {
        let layout = compute_layout(&grid(0, [2.0, 4.0, 6.0], [1.0, 1.0, 1.0])).unwrap();
        assert_eq!(layout.container_size, [2.0, 4.0, 6.0]);
        assert_eq!(layout.slots.len(), 1);
        assert_eq!(layout.slots[0].center, [0.0, 0.0, 0.0]);
    }

    #[test]
    fn b_pillars_sit_on_lower_face() {
        let layout = compute_layout(&grid(1, [2.0, 10.0, 5.0], [1.0, 4.0, 5.0])).unwrap();
        let b = layout.slots[1];
        assert_eq!(b.role, PillarRole::B);
        assert!((b.center[1] + 3.0).abs() < 1e-12);
    }

    #[test]
    fn equal_extents_are_accepted() {
        assert!(compute_layout(&grid(2, [1.0, 3.0, 3.0], [1.0, 3.0, 3.0])).is_ok());
    }
}
