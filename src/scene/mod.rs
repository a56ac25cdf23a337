//! Renderer-facing scene description.
//!
//! A demo session is turned into a [`SceneFrame`] every frame: a flat list
//! of [`DrawItem`]s referencing meshes registered once in a
//! [`MeshLibrary`], plus lighting, shading and camera. The GPU layer only
//! ever sees this description.

/// Carousel draw-list builder.
pub mod carousel;
/// Crane draw-list builder.
pub mod crane;
/// Mesh builders.
pub mod mesh;

use std::fmt;

use glam::{Mat4, Vec3};
pub use mesh::{MeshData, Vertex};

use crate::camera::Camera;

/// How lit surfaces are shaded.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub enum ShadingMode {
    /// Diffuse only.
    Lambert,
    /// Diffuse plus specular highlight.
    Phong,
    /// Diffuse quantized into bands.
    Toon,
    /// Color from the surface normal.
    Normal,
    /// Flat color, no lighting.
    #[default]
    Basic,
}

impl ShadingMode {
    /// Mode index understood by the mesh shader.
    #[must_use]
    pub fn shader_index(self) -> u32 {
        match self {
            Self::Lambert => 0,
            Self::Phong => 1,
            Self::Toon => 2,
            Self::Normal => 3,
            Self::Basic => 4,
        }
    }
}

impl fmt::Display for ShadingMode {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            Self::Lambert => "lambert",
            Self::Phong => "phong",
            Self::Toon => "toon",
            Self::Normal => "normal",
            Self::Basic => "basic",
        })
    }
}

/// Handle to a mesh in a [`MeshLibrary`].
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub struct MeshId(usize);

impl MeshId {
    /// Position of the mesh in its library.
    #[must_use]
    pub fn index(self) -> usize {
        self.0
    }
}

/// Append-only store of the meshes a demo draws.
#[derive(Debug, Default)]
pub struct MeshLibrary {
    meshes: Vec<MeshData>,
}

impl MeshLibrary {
    /// Empty library.
    #[must_use]
    pub fn new() -> Self {
        Self::default()
    }

    /// Store `mesh` and return its handle.
    pub fn add(&mut self, mesh: MeshData) -> MeshId {
        self.meshes.push(mesh);
        MeshId(self.meshes.len() - 1)
    }

    /// Mesh behind `id`.
    #[must_use]
    pub fn get(&self, id: MeshId) -> Option<&MeshData> {
        self.meshes.get(id.0)
    }

    /// Meshes with their handles, in insertion order.
    pub fn iter(&self) -> impl Iterator<Item = (MeshId, &MeshData)> {
        self.meshes.iter().enumerate().map(|(i, m)| (MeshId(i), m))
    }

    /// Number of meshes.
    #[must_use]
    pub fn len(&self) -> usize {
        self.meshes.len()
    }

    /// Whether no mesh has been added.
    #[must_use]
    pub fn is_empty(&self) -> bool {
        self.meshes.is_empty()
    }
}

/// One mesh instance to draw.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    /// Mesh to draw.
    pub mesh: MeshId,
    /// Object-to-world transform.
    pub model: Mat4,
    /// Linear RGB base color.
    pub color: Vec3,
    /// Ignore lighting and shading mode.
    pub unlit: bool,
}

impl DrawItem {
    /// Lit instance of `mesh`.
    #[must_use]
    pub fn new(mesh: MeshId, model: Mat4, color: Vec3) -> Self {
        Self {
            mesh,
            model,
            color,
            unlit: false,
        }
    }

    /// Mark the instance as unlit.
    #[must_use]
    pub fn unlit(mut self) -> Self {
        self.unlit = true;
        self
    }
}

/// Omnidirectional light with inverse-square falloff.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct PointLight {
    /// World position.
    pub position: Vec3,
    /// Color times intensity.
    pub radiance: Vec3,
}

/// Light arriving from one direction everywhere.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DirectionalLight {
    /// Unit vector pointing toward the light.
    pub direction: Vec3,
    /// Color times intensity.
    pub radiance: Vec3,
}

/// All lights of a frame.
#[derive(Debug, Clone, PartialEq, Default)]
pub struct Lighting {
    /// Ambient term (color times intensity).
    pub ambient: Vec3,
    /// Optional directional light.
    pub directional: Option<DirectionalLight>,
    /// Point lights.
    pub points: Vec<PointLight>,
}

/// Everything needed to render one frame.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneFrame {
    /// Instances to draw.
    pub items: Vec<DrawItem>,
    /// Lights.
    pub lighting: Lighting,
    /// Shading mode for lit items.
    pub shading: ShadingMode,
    /// Draw edges instead of filled triangles.
    pub wireframe: bool,
    /// Background color.
    pub clear_color: Vec3,
    /// Viewing camera.
    pub camera: Camera,
}

/// Color from a `0xRRGGBB` literal.
#[must_use]
pub fn rgb(hex: u32) -> Vec3 {
    let channel = |shift: u32| ((hex >> shift) & 0xff) as f32 / 255.0;
    Vec3::new(channel(16), channel(8), channel(0))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn hex_colors_decode() {
        assert_eq!(rgb(0xff0000), Vec3::X);
        assert_eq!(rgb(0x000000), Vec3::ZERO);
        assert!((rgb(0xffa500).y - 165.0 / 255.0).abs() < 1e-6);
    }

    #[test]
    fn library_hands_out_sequential_ids() {
        let mut library = MeshLibrary::new();
        let a = library.add(MeshData::cuboid(Vec3::ONE));
        let b = library.add(MeshData::frustum(1.0, 1.0, 1.0, 8));
        assert_eq!((a.index(), b.index()), (0, 1));
        assert_eq!(library.len(), 2);
        assert_eq!(library.get(a).map(MeshData::triangle_count), Some(12));
        assert_eq!(library.iter().count(), 2);
    }

    #[test]
    fn shading_indices_are_distinct() {
        let modes = [
            ShadingMode::Lambert,
            ShadingMode::Phong,
            ShadingMode::Toon,
            ShadingMode::Normal,
            ShadingMode::Basic,
        ];
        for (i, mode) in modes.into_iter().enumerate() {
            assert_eq!(mode.shader_index() as usize, i);
        }
    }
}
