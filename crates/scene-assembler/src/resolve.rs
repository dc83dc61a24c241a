use detector_types::{PrimitiveDefinition, Shape};
use geometry_kernel::{
    Kernel, KernelError, KernelIntrospect, MaterialHandle, Rotation, SolidHandle, Transform,
    VolumeHandle,
};

use crate::types::AssemblyError;

/// Look up a volume by name, mapping a miss to the caller's error.
pub fn resolve_volume(
    kernel: &dyn KernelIntrospect,
    name: &str,
    missing: impl FnOnce() -> AssemblyError,
) -> Result<VolumeHandle, AssemblyError> {
    kernel.find_volume(name).ok_or_else(missing)
}

pub fn resolve_mother(
    kernel: &dyn KernelIntrospect,
    def: &PrimitiveDefinition,
) -> Result<VolumeHandle, AssemblyError> {
    resolve_volume(kernel, &def.mother, || AssemblyError::MotherNotFound {
        volume: def.name.clone(),
        mother: def.mother.clone(),
    })
}

pub fn resolve_material<K: Kernel + ?Sized>(
    kernel: &K,
    def: &PrimitiveDefinition,
) -> Result<MaterialHandle, AssemblyError> {
    kernel
        .material(&def.material)
        .map_err(|_| AssemblyError::MaterialNotFound {
            volume: def.name.clone(),
            material: def.material.clone(),
        })
}

/// Kernel solid for a primitive. Sizes are full lengths; the kernel takes halves.
pub fn make_solid<K: Kernel + ?Sized>(
    kernel: &mut K,
    def: &PrimitiveDefinition,
) -> Result<SolidHandle, KernelError> {
    match def.shape {
        Shape::Box { size } => {
            kernel.make_box(&def.name, [size[0] / 2.0, size[1] / 2.0, size[2] / 2.0])
        }
        Shape::Tube {
            inner_radius,
            outer_radius,
            length,
        } => kernel.make_tube(&def.name, inner_radius, outer_radius, length / 2.0),
    }
}

/// Local transform of a primitive, rotation converted from degrees.
pub fn local_transform(def: &PrimitiveDefinition) -> Transform {
    Transform::new(Rotation::from_degrees(def.rotation), def.position)
}
