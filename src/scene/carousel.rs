//! Draw list for the carousel demo.

use glam::{Mat4, Vec3};

use super::{
    rgb, DirectionalLight, DrawItem, Lighting, MeshData, MeshId, MeshLibrary,
    PointLight, SceneFrame,
};
use crate::carousel::{
    ring_radii, CarouselSession, SurfaceFn, COLUMN_HEIGHT, COLUMN_RADIUS,
    MOBIUS_RADIUS, RING_COUNT, RING_DEPTH, SKYDOME_RADIUS,
};

const RING_COLORS: [u32; RING_COUNT] = [0xd44343, 0xffb400, 0x9ed450];
const COLUMN_COLOR: u32 = 0xea7c22;
const MOBIUS_COLOR: u32 = 0x4bb1df;
const SURFACE_COLOR: u32 = 0xb2568c;
const SKY_COLOR: u32 = 0x8a7bb0;
const BACKGROUND: u32 = 0x392954;
const AMBIENT: (u32, f32) = (0xffa500, 0.2);
const DIRECTIONAL_SOURCE: Vec3 = Vec3::new(10.0, 10.0, 10.0);
const MOBIUS_LIGHT_INTENSITY: f32 = 3.0;
const SPOT_LIGHT_INTENSITY: f32 = 30.0;
const SURFACE_GRID: u32 = 15;

/// Handles of the meshes the carousel scene draws.
#[derive(Debug, Clone, Copy)]
pub struct CarouselMeshes {
    column: MeshId,
    rings: [MeshId; RING_COUNT],
    mobius: MeshId,
    surfaces: [MeshId; 8],
    skydome: MeshId,
}

impl CarouselMeshes {
    /// Build the carousel's meshes into `library`.
    pub fn register(library: &mut MeshLibrary) -> Self {
        Self {
            column: library.add(MeshData::frustum(
                COLUMN_RADIUS,
                COLUMN_RADIUS,
                COLUMN_HEIGHT,
                32,
            )),
            rings: std::array::from_fn(|i| {
                let (inner, outer) = ring_radii(i);
                library.add(MeshData::annulus(inner, outer, RING_DEPTH, 64))
            }),
            mobius: library.add(MeshData::mobius(MOBIUS_RADIUS, 16, 5)),
            surfaces: SurfaceFn::ALL.map(|f| {
                library.add(MeshData::parametric(
                    SURFACE_GRID,
                    SURFACE_GRID,
                    |u, v| f.point(u, v),
                ))
            }),
            skydome: library.add(MeshData::dome(SKYDOME_RADIUS, 60, 20)),
        }
    }
}

/// Describe the current carousel frame.
#[must_use]
pub fn carousel_frame(
    session: &CarouselSession,
    meshes: &CarouselMeshes,
) -> SceneFrame {
    let column = session.column_transform()
        * Mat4::from_translation(Vec3::new(0.0, COLUMN_HEIGHT * 0.5, 0.0));
    let mut items = vec![
        DrawItem::new(meshes.column, column, rgb(COLUMN_COLOR)),
        DrawItem::new(
            meshes.mobius,
            session.mobius_transform(),
            rgb(MOBIUS_COLOR),
        ),
        DrawItem::new(meshes.skydome, Mat4::IDENTITY, rgb(SKY_COLOR)).unlit(),
    ];
    for (index, (mesh, color)) in
        meshes.rings.iter().zip(RING_COLORS).enumerate()
    {
        items.push(DrawItem::new(
            *mesh,
            session.ring_transform(index),
            rgb(color),
        ));
    }
    for (function, model) in session.surface_transforms() {
        items.push(DrawItem::new(
            meshes.surfaces[function.index()],
            model,
            rgb(SURFACE_COLOR),
        ));
    }

    let white = Vec3::ONE;
    let mut points: Vec<PointLight> = session
        .mobius_light_positions()
        .into_iter()
        .map(|position| PointLight {
            position,
            radiance: white * MOBIUS_LIGHT_INTENSITY,
        })
        .collect();
    if session.spot_lights() {
        points.extend(session.spot_light_positions().into_iter().map(
            |position| PointLight {
                position,
                radiance: white * SPOT_LIGHT_INTENSITY,
            },
        ));
    }
    let directional =
        session.directional_light().then(|| DirectionalLight {
            direction: DIRECTIONAL_SOURCE.normalize(),
            radiance: white,
        });

    SceneFrame {
        items,
        lighting: Lighting {
            ambient: rgb(AMBIENT.0) * AMBIENT.1,
            directional,
            points,
        },
        shading: session.shading(),
        wireframe: false,
        clear_color: rgb(BACKGROUND),
        camera: *session.camera(),
    }
}
