//! Kernel units. Lengths are millimetres, angles are radians.

pub const NM: f64 = 1.0e-6;
pub const UM: f64 = 1.0e-3;
pub const MM: f64 = 1.0;
pub const CM: f64 = 10.0;
pub const M: f64 = 1000.0;
pub const KM: f64 = 1.0e6;

pub const RAD: f64 = 1.0;
pub const DEG: f64 = std::f64::consts::PI / 180.0;

use crate::modes::DefinitionError;

/// Scale factor from a length unit symbol to millimetres.
pub fn length_unit(symbol: &str) -> Result<f64, DefinitionError> {
    match symbol {
        "nm" => Ok(NM),
        "um" | "mum" => Ok(UM),
        "mm" => Ok(MM),
        "cm" => Ok(CM),
        "m" => Ok(M),
        "km" => Ok(KM),
        other => Err(DefinitionError::UnknownUnit {
            symbol: other.to_string(),
        }),
    }
}

/// Scale factor from an angle unit symbol to radians.
pub fn angle_unit(symbol: &str) -> Result<f64, DefinitionError> {
    match symbol {
        "rad" => Ok(RAD),
        "mrad" => Ok(1.0e-3),
        "deg" => Ok(DEG),
        other => Err(DefinitionError::UnknownUnit {
            symbol: other.to_string(),
        }),
    }
}
