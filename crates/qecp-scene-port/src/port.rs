// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! Scene port trait defining the renderer contract.

use qecp_geom::{Ray, Transform};

use crate::{
    CameraState, GeometryDesc, GeometryId, Hit, MaterialDesc, MaterialId, ObjectId, PickTag,
    PortError,
};

/// Scene rendering port trait.
///
/// The visualizer core drives an implementation of this trait to create and
/// update meshes; adapters (a GPU backend, the headless test double) own the
/// actual resources.
///
/// # Ownership
///
/// Geometries and materials are shared: many meshes may reference the same
/// ids. Removing a mesh never disposes its geometry or material. Setters on
/// unknown or removed objects are no-ops.
pub trait ScenePort {
    /// Upload a geometry.
    fn create_geometry(&mut self, desc: &GeometryDesc) -> Result<GeometryId, PortError>;

    /// Release a geometry. Meshes still referencing it must be removed first.
    fn dispose_geometry(&mut self, geometry: GeometryId);

    /// Create a material.
    fn create_material(&mut self, desc: &MaterialDesc) -> Result<MaterialId, PortError>;

    /// Insert a visible mesh at the identity transform.
    fn add_mesh(&mut self, geometry: GeometryId, material: MaterialId)
        -> Result<ObjectId, PortError>;

    /// Remove a mesh from the scene and release it.
    fn remove_mesh(&mut self, object: ObjectId);

    /// Set a mesh's world transform.
    fn set_transform(&mut self, object: ObjectId, transform: &Transform);

    /// Show or hide a mesh.
    fn set_visible(&mut self, object: ObjectId, visible: bool);

    /// Whether a mesh is currently visible (`false` for unknown ids).
    fn is_visible(&self, object: ObjectId) -> bool;

    /// Swap a mesh's material.
    fn set_material(&mut self, object: ObjectId, material: MaterialId);

    /// Current material of a mesh.
    fn material(&self, object: ObjectId) -> Option<MaterialId>;

    /// Attach (or clear) the interaction tag of a mesh.
    fn set_tag(&mut self, object: ObjectId, tag: Option<PickTag>);

    /// Every mesh the ray intersects, nearest first, hidden ones included.
    fn pick(&self, ray: &Ray) -> Vec<Hit>;

    /// Set camera state.
    fn set_camera(&mut self, camera: &CameraState);

    /// Render the current scene.
    fn render(&mut self);

    /// Resize viewport.
    fn resize(&mut self, width: u32, height: u32, dpr: f32);

    /// Render once at `scale` times the viewport size and return a
    /// `data:image/png;base64,...` URL.
    fn export_png(&mut self, scale: f32) -> Result<String, PortError>;

    /// Dispose all resources.
    fn dispose(&mut self);
}
