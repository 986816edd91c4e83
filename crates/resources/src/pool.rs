use orrery_common::RawHandle;
use serde::{Deserialize, Serialize};

/// Capacity of the texture table.
pub const MAX_TEXTURE: usize = 8;
/// Capacity of the cube-map table.
pub const MAX_CUBE_MAP: usize = 2;
/// Capacity of the mesh table.
pub const MAX_MESH: usize = 8;

/// Index into the pool's texture table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct TextureId(pub usize);

/// Index into the pool's cube-map table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct CubeMapId(pub usize);

/// Index into the pool's mesh table.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub struct MeshId(pub usize);

/// A GPU-resident drawable: index count plus its buffer handles.
///
/// `draw_count` reflects the index buffer's element count at creation time
/// and is never mutated afterward.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize, Deserialize)]
pub struct Mesh {
    pub draw_count: u32,
    pub vao: RawHandle,
    pub vbo: RawHandle,
    pub ebo: RawHandle,
}

/// Which table a pool operation addressed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum ResourceKind {
    Texture,
    CubeMap,
    Mesh,
}

impl std::fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        match self {
            Self::Texture => write!(f, "texture"),
            Self::CubeMap => write!(f, "cube map"),
            Self::Mesh => write!(f, "mesh"),
        }
    }
}

/// Errors from registry operations.
#[derive(Debug, thiserror::Error)]
pub enum PoolError {
    #[error("{kind} table full (capacity {capacity})")]
    Capacity {
        kind: ResourceKind,
        capacity: usize,
    },
}

/// Fixed-capacity handle tables with live counts.
///
/// Registration appends; a full table is a caller-recoverable failure.
#[derive(Debug, Clone)]
pub struct ResourcePool {
    textures: [RawHandle; MAX_TEXTURE],
    texture_count: usize,
    cube_maps: [RawHandle; MAX_CUBE_MAP],
    cube_map_count: usize,
    meshes: [Mesh; MAX_MESH],
    mesh_count: usize,
}

const EMPTY_MESH: Mesh = Mesh {
    draw_count: 0,
    vao: 0,
    vbo: 0,
    ebo: 0,
};

impl Default for ResourcePool {
    fn default() -> Self {
        Self {
            textures: [0; MAX_TEXTURE],
            texture_count: 0,
            cube_maps: [0; MAX_CUBE_MAP],
            cube_map_count: 0,
            meshes: [EMPTY_MESH; MAX_MESH],
            mesh_count: 0,
        }
    }
}

impl ResourcePool {
    pub fn new() -> Self {
        Self::default()
    }

    /// Register a texture handle. Fails when the table is full; the table
    /// is left unchanged on failure.
    pub fn register_texture(&mut self, handle: RawHandle) -> Result<TextureId, PoolError> {
        if self.texture_count == MAX_TEXTURE {
            return Err(PoolError::Capacity {
                kind: ResourceKind::Texture,
                capacity: MAX_TEXTURE,
            });
        }
        let index = self.texture_count;
        self.textures[index] = handle;
        self.texture_count += 1;
        tracing::debug!(index, handle, "registered texture");
        Ok(TextureId(index))
    }

    /// Register a cube-map handle. Same contract as [`register_texture`].
    ///
    /// [`register_texture`]: Self::register_texture
    pub fn register_cube_map(&mut self, handle: RawHandle) -> Result<CubeMapId, PoolError> {
        if self.cube_map_count == MAX_CUBE_MAP {
            return Err(PoolError::Capacity {
                kind: ResourceKind::CubeMap,
                capacity: MAX_CUBE_MAP,
            });
        }
        let index = self.cube_map_count;
        self.cube_maps[index] = handle;
        self.cube_map_count += 1;
        tracing::debug!(index, handle, "registered cube map");
        Ok(CubeMapId(index))
    }

    /// Register a mesh, bundling all four fields atomically as one entry.
    pub fn register_mesh(
        &mut self,
        draw_count: u32,
        vao: RawHandle,
        vbo: RawHandle,
        ebo: RawHandle,
    ) -> Result<MeshId, PoolError> {
        if self.mesh_count == MAX_MESH {
            return Err(PoolError::Capacity {
                kind: ResourceKind::Mesh,
                capacity: MAX_MESH,
            });
        }
        let index = self.mesh_count;
        self.meshes[index] = Mesh {
            draw_count,
            vao,
            vbo,
            ebo,
        };
        self.mesh_count += 1;
        tracing::debug!(index, draw_count, "registered mesh");
        Ok(MeshId(index))
    }

    /// Look up a texture handle.
    pub fn texture(&self, id: TextureId) -> Option<RawHandle> {
        (id.0 < self.texture_count).then(|| self.textures[id.0])
    }

    /// Look up a cube-map handle.
    pub fn cube_map(&self, id: CubeMapId) -> Option<RawHandle> {
        (id.0 < self.cube_map_count).then(|| self.cube_maps[id.0])
    }

    /// Look up a mesh entry.
    pub fn mesh(&self, id: MeshId) -> Option<&Mesh> {
        (id.0 < self.mesh_count).then(|| &self.meshes[id.0])
    }

    pub fn texture_count(&self) -> usize {
        self.texture_count
    }

    pub fn cube_map_count(&self) -> usize {
        self.cube_map_count
    }

    pub fn mesh_count(&self) -> usize {
        self.mesh_count
    }

    /// Live texture handles, in registration order.
    pub fn textures(&self) -> &[RawHandle] {
        &self.textures[..self.texture_count]
    }

    /// Live cube-map handles, in registration order.
    pub fn cube_maps(&self) -> &[RawHandle] {
        &self.cube_maps[..self.cube_map_count]
    }

    /// Live mesh entries, in registration order.
    pub fn meshes(&self) -> &[Mesh] {
        &self.meshes[..self.mesh_count]
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn register_texture_returns_sequential_indices() {
        let mut pool = ResourcePool::new();
        assert_eq!(pool.register_texture(100).unwrap(), TextureId(0));
        assert_eq!(pool.register_texture(200).unwrap(), TextureId(1));
        assert_eq!(pool.texture(TextureId(0)), Some(100));
        assert_eq!(pool.texture(TextureId(1)), Some(200));
        assert_eq!(pool.texture_count(), 2);
    }

    #[test]
    fn texture_table_rejects_overflow_unchanged() {
        let mut pool = ResourcePool::new();
        for i in 0..MAX_TEXTURE {
            pool.register_texture(i as u32).unwrap();
        }
        assert_eq!(pool.texture_count(), MAX_TEXTURE);

        let err = pool.register_texture(999).unwrap_err();
        assert!(matches!(
            err,
            PoolError::Capacity {
                kind: ResourceKind::Texture,
                capacity: MAX_TEXTURE,
            }
        ));
        // Count and contents untouched by the failed registration.
        assert_eq!(pool.texture_count(), MAX_TEXTURE);
        assert_eq!(pool.textures().last(), Some(&((MAX_TEXTURE - 1) as u32)));
    }

    #[test]
    fn cube_map_table_rejects_overflow() {
        let mut pool = ResourcePool::new();
        for i in 0..MAX_CUBE_MAP {
            pool.register_cube_map(i as u32).unwrap();
        }
        let err = pool.register_cube_map(42).unwrap_err();
        assert!(matches!(
            err,
            PoolError::Capacity {
                kind: ResourceKind::CubeMap,
                ..
            }
        ));
        assert_eq!(pool.cube_map_count(), MAX_CUBE_MAP);
    }

    #[test]
    fn mesh_table_rejects_overflow() {
        let mut pool = ResourcePool::new();
        for i in 0..MAX_MESH {
            pool.register_mesh(36, i as u32, 1, 2).unwrap();
        }
        let err = pool.register_mesh(36, 99, 1, 2).unwrap_err();
        assert!(matches!(
            err,
            PoolError::Capacity {
                kind: ResourceKind::Mesh,
                ..
            }
        ));
        assert_eq!(pool.mesh_count(), MAX_MESH);
    }

    #[test]
    fn register_mesh_bundles_all_fields() {
        let mut pool = ResourcePool::new();
        let id = pool.register_mesh(2880, 7, 8, 9).unwrap();
        let mesh = pool.mesh(id).unwrap();
        assert_eq!(mesh.draw_count, 2880);
        assert_eq!(mesh.vao, 7);
        assert_eq!(mesh.vbo, 8);
        assert_eq!(mesh.ebo, 9);
    }

    #[test]
    fn lookup_beyond_live_count_is_none() {
        let mut pool = ResourcePool::new();
        pool.register_texture(1).unwrap();
        assert!(pool.texture(TextureId(1)).is_none());
        assert!(pool.mesh(MeshId(0)).is_none());
        assert!(pool.cube_map(CubeMapId(0)).is_none());
    }

    #[test]
    fn empty_pool_has_zero_counts() {
        let pool = ResourcePool::new();
        assert_eq!(pool.texture_count(), 0);
        assert_eq!(pool.cube_map_count(), 0);
        assert_eq!(pool.mesh_count(), 0);
        assert!(pool.meshes().is_empty());
    }
}
