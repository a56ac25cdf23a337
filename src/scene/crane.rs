//! Draw list for the crane demo.

use glam::{Mat4, Quat, Vec3};

use super::{
    rgb, DrawItem, Lighting, MeshData, MeshId, MeshLibrary, SceneFrame,
    ShadingMode,
};
use crate::crane::pose::{
    APEX_CENTER, APEX_HEIGHT, BASE_CENTER, BASE_SIZE, BLOCK_SIZE, CABIN_SIZE,
    CABLE_RADIUS, COUNTERWEIGHT_CENTER, COUNTERWEIGHT_SIZE, FINGER_LENGTH,
    JIB_CENTER, JIB_SIZE, TIE_CABLES, TOWER_CENTER, TOWER_SIZE, TROLLEY_SIZE,
};
use crate::session::CraneSession;

/// Drop-off container position.
pub const CONTAINER_CENTER: Vec3 = Vec3::new(18.0, 0.0, 0.0);
/// Drop-off container size.
pub const CONTAINER_SIZE: Vec3 = Vec3::new(4.0, 2.0, 4.0);
/// Cargo cube edge length.
pub const CARGO_SIZE: f32 = 1.0;

const SEGMENTS: u32 = 24;
const LINE_COLOR: u32 = 0x000000;
const BACKGROUND: u32 = 0xffffff;

/// Handles of the meshes the crane scene draws.
#[derive(Debug, Clone, Copy)]
pub struct CraneMeshes {
    base: MeshId,
    tower: MeshId,
    cabin: MeshId,
    jib: MeshId,
    counterweight: MeshId,
    apex: MeshId,
    cable: MeshId,
    trolley: MeshId,
    block: MeshId,
    finger: MeshId,
    cargo: MeshId,
    container: MeshId,
}

impl CraneMeshes {
    /// Build the crane's meshes into `library`.
    pub fn register(library: &mut MeshLibrary) -> Self {
        Self {
            base: library.add(MeshData::cuboid(BASE_SIZE)),
            tower: library.add(MeshData::cuboid(TOWER_SIZE)),
            cabin: library.add(MeshData::cuboid(CABIN_SIZE)),
            jib: library.add(MeshData::cuboid(JIB_SIZE)),
            counterweight: library.add(MeshData::cuboid(COUNTERWEIGHT_SIZE)),
            apex: library.add(MeshData::frustum(0.0, 1.0, APEX_HEIGHT, SEGMENTS)),
            // Unit length, hanging from the origin down to y = -1.
            cable: library.add(
                MeshData::frustum(CABLE_RADIUS, CABLE_RADIUS, 1.0, 8)
                    .translated(Vec3::new(0.0, -0.5, 0.0)),
            ),
            trolley: library.add(MeshData::cuboid(TROLLEY_SIZE)),
            block: library.add(MeshData::cuboid(BLOCK_SIZE)),
            finger: library.add(
                MeshData::frustum(0.5, 0.0, FINGER_LENGTH, SEGMENTS)
                    .translated(Vec3::new(0.0, -FINGER_LENGTH * 0.5, 0.0)),
            ),
            cargo: library.add(MeshData::cuboid(Vec3::splat(CARGO_SIZE))),
            container: library.add(MeshData::open_box(CONTAINER_SIZE)),
        }
    }
}

/// Transform placing the unit cable mesh between two points.
fn cable_between(from: Vec3, to: Vec3) -> Mat4 {
    let span = to - from;
    let rotation = Quat::from_rotation_arc(Vec3::NEG_Y, span.normalize());
    Mat4::from_scale_rotation_translation(
        Vec3::new(1.0, span.length(), 1.0),
        rotation,
        from,
    )
}

/// Describe the current crane frame.
#[must_use]
pub fn crane_frame(session: &CraneSession, meshes: &CraneMeshes) -> SceneFrame {
    let frames = session.rig().frames();
    let color = rgb(LINE_COLOR);
    let item = |mesh, model| DrawItem::new(mesh, model, color);

    let mut items = vec![
        item(meshes.base, Mat4::from_translation(BASE_CENTER)),
        item(meshes.tower, Mat4::from_translation(TOWER_CENTER)),
        item(meshes.cabin, frames.cabin),
        item(meshes.jib, frames.cabin * Mat4::from_translation(JIB_CENTER)),
        item(
            meshes.counterweight,
            frames.cabin * Mat4::from_translation(COUNTERWEIGHT_CENTER),
        ),
        item(meshes.apex, frames.cabin * Mat4::from_translation(APEX_CENTER)),
        item(meshes.trolley, frames.trolley),
        item(meshes.cable, frames.cable),
        item(meshes.block, frames.block),
        item(
            meshes.container,
            Mat4::from_translation(CONTAINER_CENTER),
        ),
    ];
    for ([ax, ay], [bx, by]) in TIE_CABLES {
        let tie = cable_between(Vec3::new(ax, ay, 0.0), Vec3::new(bx, by, 0.0));
        items.push(item(meshes.cable, frames.cabin * tie));
    }
    for finger in frames.fingers {
        items.push(item(meshes.finger, finger));
    }
    for marker in session.cargo() {
        items.push(item(
            meshes.cargo,
            Mat4::from_translation(marker.position()),
        ));
    }

    SceneFrame {
        items,
        lighting: Lighting {
            ambient: Vec3::ONE,
            ..Lighting::default()
        },
        shading: ShadingMode::Basic,
        wireframe: session.wireframe(),
        clear_color: rgb(BACKGROUND),
        camera: *session.cameras().current(),
    }
}

#[cfg(test)]
mod tests {
    use glam::Vec2;

    use super::*;
    use crate::collision::CargoMarker;
    use crate::options::Options;

    #[test]
    fn frame_draws_every_part_and_marker() {
        let cargo = vec![
            CargoMarker::new(Vec2::new(-8.0, 3.0), 0.866),
            CargoMarker::new(Vec2::new(6.0, -7.0), 0.866),
        ];
        let session = CraneSession::with_cargo(&Options::default(), cargo)
            .unwrap();
        let mut library = MeshLibrary::new();
        let meshes = CraneMeshes::register(&mut library);
        let frame = crane_frame(&session, &meshes);

        // 10 rigid parts, 2 tie cables, 4 fingers, 2 cargo cubes.
        assert_eq!(frame.items.len(), 18);
        assert!(frame.wireframe);
        assert_eq!(frame.shading, ShadingMode::Basic);
        assert!(frame
            .items
            .iter()
            .all(|item| library.get(item.mesh).is_some()));
    }

    #[test]
    fn tie_cable_reaches_its_far_end() {
        let m = cable_between(Vec3::new(0.0, 5.9, 0.0), Vec3::new(16.0, 3.4, 0.0));
        let end = m.transform_point3(Vec3::NEG_Y);
        assert!((end - Vec3::new(16.0, 3.4, 0.0)).length() < 1e-3);
    }
}
