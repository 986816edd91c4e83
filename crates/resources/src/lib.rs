//! Fixed-capacity GPU resource registry.
//!
//! The scene is author-defined and small, so the registry is a set of
//! arena-style tables that only grow during setup and are discarded whole
//! at teardown. There is no removal operation.
//!
//! # Invariants
//! - Each live count is always <= its table's capacity.
//! - A full table rejects registration with [`PoolError::Capacity`];
//!   nothing is truncated or overwritten.
//! - A returned id stays valid for the life of the pool.

mod pool;

pub use pool::{
    CubeMapId, Mesh, MeshId, PoolError, ResourceKind, ResourcePool, TextureId, MAX_CUBE_MAP,
    MAX_MESH, MAX_TEXTURE,
};
