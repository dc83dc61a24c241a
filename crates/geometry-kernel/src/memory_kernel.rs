//! MemoryKernel: deterministic in-memory kernel implementing Kernel + KernelIntrospect.
//!
//! Records solids, logical volumes and placements without any navigation or
//! tracking. Used by the assembler tests, the test harness and the CLI.

use std::collections::HashMap;

use detector_types::BooleanOp;
use slotmap::SlotMap;
use tracing::debug;

use crate::materials::MaterialTable;
use crate::traits::{Kernel, KernelIntrospect};
use crate::transform::Transform;
use crate::types::*;

pub struct MemoryKernel {
    materials: SlotMap<MaterialHandle, Material>,
    material_names: HashMap<String, MaterialHandle>,
    solids: SlotMap<SolidHandle, Solid>,
    volumes: SlotMap<VolumeHandle, LogicalVolume>,
    volume_names: HashMap<String, VolumeHandle>,
    placements: SlotMap<PlacementHandle, Placement>,
    placement_order: Vec<PlacementHandle>,
}

impl MemoryKernel {
    /// Kernel preloaded with [`MaterialTable::standard`].
    pub fn new() -> Self {
        Self::with_materials(&MaterialTable::standard())
    }

    pub fn with_materials(table: &MaterialTable) -> Self {
        let mut kernel = Self {
            materials: SlotMap::with_key(),
            material_names: HashMap::new(),
            solids: SlotMap::with_key(),
            volumes: SlotMap::with_key(),
            volume_names: HashMap::new(),
            placements: SlotMap::with_key(),
            placement_order: Vec::new(),
        };
        for m in table.iter() {
            kernel.add_material(&m.name, m.density);
        }
        kernel
    }

    pub fn add_material(&mut self, name: &str, density: f64) -> MaterialHandle {
        if let Some(&h) = self.material_names.get(name) {
            if let Some(m) = self.materials.get_mut(h) {
                m.density = density;
            }
            return h;
        }
        let h = self.materials.insert(Material {
            name: name.to_string(),
            density,
        });
        self.material_names.insert(name.to_string(), h);
        h
    }

    /// Drop every solid, volume and placement. Materials are kept.
    pub fn clear_geometry(&mut self) {
        self.solids.clear();
        self.volumes.clear();
        self.volume_names.clear();
        self.placements.clear();
        self.placement_order.clear();
    }

    pub fn solid_count(&self) -> usize {
        self.solids.len()
    }

    pub fn volume_count(&self) -> usize {
        self.volumes.len()
    }

    pub fn placement_count(&self) -> usize {
        self.placement_order.len()
    }

    /// Placements carrying `name`, in creation order.
    pub fn placements_named(&self, name: &str) -> Vec<&Placement> {
        self.placement_order
            .iter()
            .filter_map(|h| self.placements.get(*h))
            .filter(|p| p.name == name)
            .collect()
    }

    fn check_solid(&self, handle: SolidHandle) -> Result<(), KernelError> {
        if self.solids.contains_key(handle) {
            Ok(())
        } else {
            Err(KernelError::EntityNotFound {
                entity: format!("solid {handle:?}"),
            })
        }
    }

    fn check_volume(&self, handle: VolumeHandle) -> Result<(), KernelError> {
        if self.volumes.contains_key(handle) {
            Ok(())
        } else {
            Err(KernelError::EntityNotFound {
                entity: format!("volume {handle:?}"),
            })
        }
    }

    fn volume_mut(&mut self, handle: VolumeHandle) -> Result<&mut LogicalVolume, KernelError> {
        self.volumes
            .get_mut(handle)
            .ok_or_else(|| KernelError::EntityNotFound {
                entity: format!("volume {handle:?}"),
            })
    }

    fn combine(
        &mut self,
        name: &str,
        op: BooleanOp,
        a: SolidHandle,
        b: SolidHandle,
        b_transform: &Transform,
    ) -> Result<SolidHandle, KernelError> {
        self.check_solid(a)?;
        self.check_solid(b)?;
        debug!(name, ?op, "creating boolean solid");
        Ok(self.solids.insert(Solid {
            name: name.to_string(),
            shape: SolidShape::Boolean {
                op,
                left: a,
                right: b,
                right_transform: *b_transform,
            },
        }))
    }
}

impl Default for MemoryKernel {
    fn default() -> Self {
        Self::new()
    }
}

impl Kernel for MemoryKernel {
    fn material(&self, name: &str) -> Result<MaterialHandle, KernelError> {
        self.material_names
            .get(name)
            .copied()
            .ok_or_else(|| KernelError::MaterialNotFound {
                name: name.to_string(),
            })
    }

    fn make_box(&mut self, name: &str, half_extents: [f64; 3]) -> Result<SolidHandle, KernelError> {
        if half_extents.iter().any(|h| !h.is_finite() || *h <= 0.0) {
            return Err(KernelError::InvalidDimensions {
                name: name.to_string(),
                reason: format!("box half-extents must be positive, got {half_extents:?}"),
            });
        }
        debug!(name, ?half_extents, "creating box solid");
        Ok(self.solids.insert(Solid {
            name: name.to_string(),
            shape: SolidShape::Box { half_extents },
        }))
    }

    fn make_tube(
        &mut self,
        name: &str,
        inner_radius: f64,
        outer_radius: f64,
        half_length: f64,
    ) -> Result<SolidHandle, KernelError> {
        if inner_radius < 0.0 || outer_radius <= inner_radius || half_length <= 0.0 {
            return Err(KernelError::InvalidDimensions {
                name: name.to_string(),
                reason: format!(
                    "tube needs 0 <= rmin < rmax and positive length, got rmin={inner_radius} rmax={outer_radius} dz={half_length}"
                ),
            });
        }
        debug!(name, inner_radius, outer_radius, half_length, "creating tube solid");
        Ok(self.solids.insert(Solid {
            name: name.to_string(),
            shape: SolidShape::Tube {
                inner_radius,
                outer_radius,
                half_length,
                start_phi: 0.0,
                delta_phi: std::f64::consts::TAU,
            },
        }))
    }

    fn boolean_union(
        &mut self,
        name: &str,
        a: SolidHandle,
        b: SolidHandle,
        b_transform: &Transform,
    ) -> Result<SolidHandle, KernelError> {
        self.combine(name, BooleanOp::Union, a, b, b_transform)
    }

    fn boolean_subtract(
        &mut self,
        name: &str,
        a: SolidHandle,
        b: SolidHandle,
        b_transform: &Transform,
    ) -> Result<SolidHandle, KernelError> {
        self.combine(name, BooleanOp::Subtract, a, b, b_transform)
    }

    fn boolean_intersect(
        &mut self,
        name: &str,
        a: SolidHandle,
        b: SolidHandle,
        b_transform: &Transform,
    ) -> Result<SolidHandle, KernelError> {
        self.combine(name, BooleanOp::Intersect, a, b, b_transform)
    }

    fn make_volume(
        &mut self,
        name: &str,
        solid: SolidHandle,
        material: MaterialHandle,
    ) -> Result<VolumeHandle, KernelError> {
        self.check_solid(solid)?;
        if !self.materials.contains_key(material) {
            return Err(KernelError::EntityNotFound {
                entity: format!("material {material:?}"),
            });
        }
        let h = self.volumes.insert(LogicalVolume {
            name: name.to_string(),
            solid,
            material,
            vis: None,
            max_step: None,
            sensitive_detector: None,
        });
        // Lookups by name resolve to the first registration.
        self.volume_names.entry(name.to_string()).or_insert(h);
        debug!(name, "registered logical volume");
        Ok(h)
    }

    fn place(&mut self, request: PlacementRequest) -> Result<PlacementHandle, KernelError> {
        self.check_volume(request.volume)?;
        if let Some(mother) = request.mother {
            self.check_volume(mother)?;
        }
        debug!(
            name = %request.name,
            copy = request.copy_number,
            translation = ?request.transform.translation,
            "placing volume"
        );
        let h = self.placements.insert(request.into());
        self.placement_order.push(h);
        Ok(h)
    }

    fn set_vis_attributes(
        &mut self,
        volume: VolumeHandle,
        vis: VisAttributes,
    ) -> Result<(), KernelError> {
        self.volume_mut(volume)?.vis = Some(vis);
        Ok(())
    }

    fn set_step_limit(&mut self, volume: VolumeHandle, max_step: f64) -> Result<(), KernelError> {
        let lv = self.volume_mut(volume)?;
        if max_step.is_nan() || max_step <= 0.0 {
            return Err(KernelError::InvalidStepLength {
                volume: lv.name.clone(),
                max_step,
            });
        }
        lv.max_step = Some(max_step);
        Ok(())
    }

    fn attach_sensitive_detector(
        &mut self,
        volume: VolumeHandle,
        detector: &str,
    ) -> Result<(), KernelError> {
        self.volume_mut(volume)?.sensitive_detector = Some(detector.to_string());
        Ok(())
    }
}

impl KernelIntrospect for MemoryKernel {
    fn find_volume(&self, name: &str) -> Option<VolumeHandle> {
        self.volume_names.get(name).copied()
    }

    fn volume(&self, handle: VolumeHandle) -> Option<&LogicalVolume> {
        self.volumes.get(handle)
    }

    fn solid(&self, handle: SolidHandle) -> Option<&Solid> {
        self.solids.get(handle)
    }

    fn placement(&self, handle: PlacementHandle) -> Option<&Placement> {
        self.placements.get(handle)
    }

    fn material_info(&self, handle: MaterialHandle) -> Option<&Material> {
        self.materials.get(handle)
    }

    fn placements(&self) -> Vec<PlacementHandle> {
        self.placement_order.clone()
    }
}
