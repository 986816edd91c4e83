use orrery_resources::TextureId;
use serde::{Deserialize, Serialize};

/// Per-draw shading parameters.
///
/// A value type constructed fresh per draw call. `texture` is a weak
/// reference into the registry's texture table, never an owner.
#[derive(Debug, Clone, Copy, PartialEq, Serialize, Deserialize)]
pub struct Material {
    pub emission: f32,
    pub shininess: f32,
    pub specular_amp: f32,
    pub texture: TextureId,
}

impl Material {
    /// A lit surface with default highlight parameters.
    pub fn lit(texture: TextureId) -> Self {
        Self {
            emission: 0.0,
            shininess: 32.0,
            specular_amp: 0.5,
            texture,
        }
    }

    /// A self-lit surface; highlights are irrelevant at full emission.
    pub fn emissive(texture: TextureId, emission: f32) -> Self {
        Self {
            emission,
            shininess: 0.0,
            specular_amp: 0.0,
            texture,
        }
    }
}
