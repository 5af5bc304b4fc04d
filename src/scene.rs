//! Narrow interfaces to the host engine.
//!
//! The sky core never touches the renderer or game loop directly; it
//! asks for scene primitives through [`SceneGraph`] and registers for
//! frame callbacks through [`TickSource`]. Hosts keep full ownership
//! of their scene and lend it to the controller per call.

use glam::Vec3;

use crate::canvas::{Face, FaceCanvas};

/// Opaque mesh identifier issued by the host scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct MeshHandle(pub u64);

/// Opaque light identifier issued by the host scene graph.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct LightHandle(pub u64);

/// Opaque per-frame callback registration.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub struct TickHandle(pub u64);

/// Mesh primitives the sky asks the host to build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum MeshDesc {
    /// Solid-color cube seen from the inside, excluded from fog.
    SkyboxOuter { size: f32 },
    /// Canvas-textured cube nested just inside the outer one; its six
    /// materials are fed from the controller's face canvases.
    SkyboxInner { size: f32 },
}

/// Light primitives the sky asks the host to build.
#[derive(Debug, Clone, Copy, PartialEq)]
pub enum LightDesc {
    /// Sky/ground hemisphere fill light.
    Hemisphere {
        sky_color: [f32; 3],
        ground_color: [f32; 3],
        intensity: f32,
    },
    /// Parallel sun light.
    Directional { color: [f32; 3], intensity: f32 },
}

/// The slice of a host scene graph the sky controller consumes.
pub trait SceneGraph {
    fn add_mesh(&mut self, desc: MeshDesc) -> MeshHandle;
    fn remove_mesh(&mut self, mesh: MeshHandle);
    fn add_light(&mut self, desc: LightDesc) -> LightHandle;
    fn remove_light(&mut self, light: LightHandle);

    /// Current camera position in world space, used to recenter the
    /// skybox every tick.
    fn camera_position(&self) -> Vec3;

    /// Place a mesh and set its rotation about the x axis.
    fn set_mesh_transform(&mut self, mesh: MeshHandle, position: Vec3, spin: f32);

    /// Tint every material of a mesh.
    fn set_mesh_color(&mut self, mesh: MeshHandle, color: [f32; 3]);

    fn set_light_color(&mut self, light: LightHandle, color: [f32; 3]);
    fn set_light_intensity(&mut self, light: LightHandle, intensity: f32);

    /// Place a light and aim it at `target`. Hosts may ignore the
    /// target for lights without a direction.
    fn set_light_transform(&mut self, light: LightHandle, position: Vec3, target: Vec3);

    /// Tint the scene fog. Returns false when the scene has no fog.
    fn set_fog_color(&mut self, color: [f32; 3]) -> bool;

    /// Re-upload a repainted face surface to the matching material of
    /// the inner skybox mesh.
    fn upload_face(&mut self, mesh: MeshHandle, face: Face, surface: &FaceCanvas);
}

/// Host per-frame callback registration.
pub trait TickSource {
    fn subscribe(&mut self, name: &'static str) -> TickHandle;
    fn unsubscribe(&mut self, handle: TickHandle);
}
