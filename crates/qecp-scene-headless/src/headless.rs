// SPDX-License-Identifier: Apache-2.0
// © James Ross Ω FLYING•ROBOTS <https://github.com/flyingrobots>
//! In-memory scene adapter.
//!
//! HeadlessScene tracks scene state in ordered maps without any GPU
//! rendering. Use it to verify pool bookkeeping (nothing leaks, nothing is
//! recreated needlessly) and to drive picking in tests and tooling.

use std::collections::BTreeMap;

use qecp_geom::{Ray, Transform};
use qecp_scene_port::{
    CameraState, GeometryDesc, GeometryId, Hit, MaterialDesc, MaterialId, ObjectId, PickTag,
    PortError, ScenePort,
};
use tracing::debug;

use crate::{raster, shape};

/// A mesh as tracked by the headless scene.
#[derive(Debug, Clone, PartialEq)]
pub struct MeshRecord {
    /// Geometry used.
    pub geometry: GeometryId,
    /// Current material.
    pub material: MaterialId,
    /// World transform.
    pub transform: Transform,
    /// Visibility flag.
    pub visible: bool,
    /// Interaction tag.
    pub tag: Option<PickTag>,
}

/// Headless scene adapter for tests and offline tooling.
#[derive(Debug)]
pub struct HeadlessScene {
    geometries: BTreeMap<GeometryId, GeometryDesc>,
    materials: BTreeMap<MaterialId, MaterialDesc>,
    objects: BTreeMap<ObjectId, MeshRecord>,
    next_id: u32,
    /// Geometries released so far.
    pub geometries_disposed: usize,
    /// Meshes removed so far.
    pub meshes_removed: usize,
    /// Meshes created so far.
    pub meshes_created: usize,
    /// Current camera state.
    pub camera: CameraState,
    /// Number of render calls.
    pub render_count: u32,
    /// Current viewport dimensions.
    pub viewport: (u32, u32, f32),
    /// Whether dispose has been called.
    pub disposed: bool,
}

impl Default for HeadlessScene {
    fn default() -> Self {
        Self {
            geometries: BTreeMap::new(),
            materials: BTreeMap::new(),
            objects: BTreeMap::new(),
            next_id: 1,
            geometries_disposed: 0,
            meshes_removed: 0,
            meshes_created: 0,
            camera: CameraState::default(),
            render_count: 0,
            viewport: (800, 600, 1.0),
            disposed: false,
        }
    }
}

impl HeadlessScene {
    /// Create an empty headless scene.
    pub fn new() -> Self {
        Self::default()
    }

    fn allocate_id(&mut self) -> u32 {
        let id = self.next_id;
        self.next_id = self.next_id.wrapping_add(1);
        id
    }

    /// Number of meshes currently in the scene.
    pub fn live_objects(&self) -> usize {
        self.objects.len()
    }

    /// Number of meshes currently visible.
    pub fn visible_objects(&self) -> usize {
        self.objects.values().filter(|m| m.visible).count()
    }

    /// Number of geometries not yet disposed.
    pub fn live_geometries(&self) -> usize {
        self.geometries.len()
    }

    /// Number of materials created.
    pub fn material_count(&self) -> usize {
        self.materials.len()
    }

    /// Get a mesh by id.
    pub fn object(&self, id: ObjectId) -> Option<&MeshRecord> {
        self.objects.get(&id)
    }

    /// Iterate over all meshes in id order.
    pub fn objects(&self) -> impl Iterator<Item = (ObjectId, &MeshRecord)> {
        self.objects.iter().map(|(id, m)| (*id, m))
    }

    /// Get a geometry description by id.
    pub fn geometry(&self, id: GeometryId) -> Option<&GeometryDesc> {
        self.geometries.get(&id)
    }

    /// Get a material description by id.
    pub fn material_desc(&self, id: MaterialId) -> Option<&MaterialDesc> {
        self.materials.get(&id)
    }

    /// Number of visible meshes using `geometry`.
    pub fn visible_with_geometry(&self, geometry: GeometryId) -> usize {
        self.objects
            .values()
            .filter(|m| m.visible && m.geometry == geometry)
            .count()
    }

    /// Renders the scene into RGBA8 pixels at `scale` times the viewport.
    pub fn rasterize(&self, scale: f32) -> (u32, u32, Vec<u8>) {
        raster::rasterize(self, scale)
    }

    pub(crate) fn world_hits(&self, ray: &Ray) -> Vec<(ObjectId, f32)> {
        let mut hits: Vec<(ObjectId, f32)> = self
            .objects
            .iter()
            .filter_map(|(id, mesh)| {
                let desc = self.geometries.get(&mesh.geometry)?;
                let d = shape::hit_distance(desc, &mesh.transform.to_mat4(), ray)?;
                Some((*id, d))
            })
            .collect();
        hits.sort_by(|a, b| a.1.total_cmp(&b.1).then(a.0.cmp(&b.0)));
        hits
    }
}

impl ScenePort for HeadlessScene {
    fn create_geometry(&mut self, desc: &GeometryDesc) -> Result<GeometryId, PortError> {
        let id = GeometryId(self.allocate_id());
        self.geometries.insert(id, desc.clone());
        Ok(id)
    }

    fn dispose_geometry(&mut self, geometry: GeometryId) {
        if self.geometries.remove(&geometry).is_some() {
            self.geometries_disposed += 1;
        }
    }

    fn create_material(&mut self, desc: &MaterialDesc) -> Result<MaterialId, PortError> {
        let id = MaterialId(self.allocate_id());
        self.materials.insert(id, *desc);
        Ok(id)
    }

    fn add_mesh(
        &mut self,
        geometry: GeometryId,
        material: MaterialId,
    ) -> Result<ObjectId, PortError> {
        if !self.geometries.contains_key(&geometry) {
            return Err(PortError::UnknownId {
                kind: "geometry",
                id: geometry.0,
            });
        }
        if !self.materials.contains_key(&material) {
            return Err(PortError::UnknownId {
                kind: "material",
                id: material.0,
            });
        }
        let id = ObjectId(self.allocate_id());
        self.objects.insert(
            id,
            MeshRecord {
                geometry,
                material,
                transform: Transform::identity(),
                visible: true,
                tag: None,
            },
        );
        self.meshes_created += 1;
        Ok(id)
    }

    fn remove_mesh(&mut self, object: ObjectId) {
        if self.objects.remove(&object).is_some() {
            self.meshes_removed += 1;
        }
    }

    fn set_transform(&mut self, object: ObjectId, transform: &Transform) {
        if let Some(mesh) = self.objects.get_mut(&object) {
            mesh.transform = *transform;
        }
    }

    fn set_visible(&mut self, object: ObjectId, visible: bool) {
        if let Some(mesh) = self.objects.get_mut(&object) {
            mesh.visible = visible;
        }
    }

    fn is_visible(&self, object: ObjectId) -> bool {
        self.objects.get(&object).is_some_and(|m| m.visible)
    }

    fn set_material(&mut self, object: ObjectId, material: MaterialId) {
        if let Some(mesh) = self.objects.get_mut(&object) {
            mesh.material = material;
        }
    }

    fn material(&self, object: ObjectId) -> Option<MaterialId> {
        self.objects.get(&object).map(|m| m.material)
    }

    fn set_tag(&mut self, object: ObjectId, tag: Option<PickTag>) {
        if let Some(mesh) = self.objects.get_mut(&object) {
            mesh.tag = tag;
        }
    }

    fn pick(&self, ray: &Ray) -> Vec<Hit> {
        self.world_hits(ray)
            .into_iter()
            .filter_map(|(object, distance)| {
                let mesh = self.objects.get(&object)?;
                Some(Hit {
                    object,
                    distance,
                    visible: mesh.visible,
                    tag: mesh.tag,
                })
            })
            .collect()
    }

    fn set_camera(&mut self, camera: &CameraState) {
        self.camera = *camera;
    }

    fn render(&mut self) {
        self.render_count += 1;
    }

    fn resize(&mut self, width: u32, height: u32, dpr: f32) {
        self.viewport = (width, height, dpr);
    }

    fn export_png(&mut self, scale: f32) -> Result<String, PortError> {
        let (w, h, pixels) = raster::rasterize(self, scale);
        let png = raster::encode_png(w, h, &pixels)?;
        debug!(width = w, height = h, bytes = png.len(), "exported png");
        Ok(format!("data:image/png;base64,{}", raster::base64(&png)))
    }

    fn dispose(&mut self) {
        self.disposed = true;
        self.meshes_removed += self.objects.len();
        self.geometries_disposed += self.geometries.len();
        self.objects.clear();
        self.geometries.clear();
        self.materials.clear();
    }
}
