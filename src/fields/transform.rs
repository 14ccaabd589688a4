use crate::lorentz::LorentzFrame;
use crate::math::{R2, Scalar};

/// Field components that stay in the plane under a boost along x: in-plane E
/// and out-of-plane B.
#[cfg_attr(feature = "serde", derive(serde::Serialize, serde::Deserialize))]
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PlaneFields {
    /// In-plane electric field.
    pub electric: R2,
    /// Out-of-plane magnetic field B_z.
    pub magnetic_z: Scalar,
}

/// Expresses `fields` in a frame moving with velocity `frame.beta() · c` along +x.
///
/// E∥ is invariant; E⊥ and B⊥ mix:
/// E'y = γ(Ey − v·Bz), B'z = γ(Bz − v·Ey/c²).
#[must_use]
pub fn transform_fields(fields: PlaneFields, frame: &LorentzFrame, speed_of_light: Scalar) -> PlaneFields {
    let g = frame.gamma();
    let v = frame.beta() * speed_of_light;
    let PlaneFields { electric, magnetic_z } = fields;
    PlaneFields {
        electric: R2::new(electric.x, g * (electric.y - v * magnetic_z)),
        magnetic_z: g * (magnetic_z - v * electric.y / (speed_of_light * speed_of_light)),
    }
}
