use crate::transform::Transform;
use crate::types::*;

/// Construction side of the geometry kernel.
/// Implemented by MemoryKernel; a simulation toolkit binding implements it the same way.
pub trait Kernel {
    /// Resolve a material key from the kernel's material catalogue.
    fn material(&self, name: &str) -> Result<MaterialHandle, KernelError>;

    /// Axis-aligned box centred on the origin.
    fn make_box(&mut self, name: &str, half_extents: [f64; 3]) -> Result<SolidHandle, KernelError>;

    /// Full-sweep tube along Z centred on the origin.
    fn make_tube(
        &mut self,
        name: &str,
        inner_radius: f64,
        outer_radius: f64,
        half_length: f64,
    ) -> Result<SolidHandle, KernelError>;

    /// Union of `a` with `b` placed at `b_transform` in the frame of `a`.
    fn boolean_union(
        &mut self,
        name: &str,
        a: SolidHandle,
        b: SolidHandle,
        b_transform: &Transform,
    ) -> Result<SolidHandle, KernelError>;

    /// `a` minus `b` placed at `b_transform`.
    fn boolean_subtract(
        &mut self,
        name: &str,
        a: SolidHandle,
        b: SolidHandle,
        b_transform: &Transform,
    ) -> Result<SolidHandle, KernelError>;

    /// Intersection of `a` with `b` placed at `b_transform`.
    fn boolean_intersect(
        &mut self,
        name: &str,
        a: SolidHandle,
        b: SolidHandle,
        b_transform: &Transform,
    ) -> Result<SolidHandle, KernelError>;

    /// Bind a solid to a material and register it under `name`.
    fn make_volume(
        &mut self,
        name: &str,
        solid: SolidHandle,
        material: MaterialHandle,
    ) -> Result<VolumeHandle, KernelError>;

    /// Place a volume inside its mother.
    fn place(&mut self, request: PlacementRequest) -> Result<PlacementHandle, KernelError>;

    fn set_vis_attributes(
        &mut self,
        volume: VolumeHandle,
        vis: VisAttributes,
    ) -> Result<(), KernelError>;

    /// Bound the tracking step length inside a volume.
    fn set_step_limit(&mut self, volume: VolumeHandle, max_step: f64) -> Result<(), KernelError>;

    /// Route hits inside a volume to the named sensitive detector.
    fn attach_sensitive_detector(
        &mut self,
        volume: VolumeHandle,
        detector: &str,
    ) -> Result<(), KernelError>;
}

/// Read-only queries over the kernel's registries and placement graph.
pub trait KernelIntrospect {
    /// First volume registered under `name`.
    fn find_volume(&self, name: &str) -> Option<VolumeHandle>;

    fn volume(&self, handle: VolumeHandle) -> Option<&LogicalVolume>;

    fn solid(&self, handle: SolidHandle) -> Option<&Solid>;

    fn placement(&self, handle: PlacementHandle) -> Option<&Placement>;

    fn material_info(&self, handle: MaterialHandle) -> Option<&Material>;

    /// All placements in creation order.
    fn placements(&self) -> Vec<PlacementHandle>;

    /// Placements whose mother is `mother`, in creation order.
    fn daughters(&self, mother: VolumeHandle) -> Vec<PlacementHandle> {
        self.placements()
            .into_iter()
            .filter(|h| {
                self.placement(*h)
                    .map(|p| p.mother == Some(mother))
                    .unwrap_or(false)
            })
            .collect()
    }

    /// Name lookup with a typed not-found error.
    fn lookup_volume(&self, name: &str) -> Result<VolumeHandle, KernelError> {
        self.find_volume(name)
            .ok_or_else(|| KernelError::VolumeNotFound {
                name: name.to_string(),
            })
    }
}
