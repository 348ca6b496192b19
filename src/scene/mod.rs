//! The fixed scene: a floor, four blocks and a sphere.
//!
//! Objects are described by a mesh, a translate/scale pair and a colour.
//! [`Scene::draw_items`] composes each object's model-view matrix through a
//! [`MatrixStack`], mirroring the push / transform / draw / pop sequence of a
//! classic immediate-mode display callback.

/// Procedural cube and sphere meshes.
pub mod mesh_gen;

use glam::{Mat4, Vec3, Vec4};

use crate::util::matrix_stack::{MatrixStack, MatrixStackError};

/// Named RGBA colours used by the scene.
pub mod palette {
    /// Opaque blue.
    pub const BLUE: [f32; 4] = [0.0, 0.0, 1.0, 1.0];
    /// Opaque cyan.
    pub const CYAN: [f32; 4] = [0.0, 1.0, 1.0, 1.0];
    /// Opaque red.
    pub const RED: [f32; 4] = [1.0, 0.0, 0.0, 1.0];
    /// Opaque yellow.
    pub const YELLOW: [f32; 4] = [1.0, 1.0, 0.0, 1.0];
    /// Opaque green.
    pub const GREEN: [f32; 4] = [0.0, 1.0, 0.0, 1.0];
    /// Light grey used for the floor.
    pub const FLOOR: [f32; 4] = [0.9, 0.9, 0.9, 0.9];
}

/// Identifies a GPU mesh. Spheres are keyed by tessellation so each distinct
/// (slices, stacks) pair is generated and uploaded once.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum MeshKey {
    /// The unit cube.
    Cube,
    /// A unit-radius sphere.
    Sphere {
        /// Azimuthal subdivisions.
        slices: u32,
        /// Polar subdivisions.
        stacks: u32,
    },
}

/// One renderable object.
#[derive(Debug, Clone, PartialEq)]
pub struct SceneObject {
    /// Short name used in logs.
    pub name: &'static str,
    /// Mesh drawn for this object.
    pub mesh: MeshKey,
    /// Applied first to the modelview (outermost).
    pub translation: Vec3,
    /// Applied after the translation (innermost, hits vertices first).
    pub scale: Vec3,
    /// RGBA surface colour.
    pub color: [f32; 4],
}

/// A resolved draw: which mesh, where, and in what colour.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DrawItem {
    /// Mesh to draw.
    pub mesh: MeshKey,
    /// Eye-space transform (view * model).
    pub model_view: Mat4,
    /// RGBA surface colour.
    pub color: Vec4,
}

/// Ordered list of scene objects.
#[derive(Debug, Clone, PartialEq)]
pub struct Scene {
    objects: Vec<SceneObject>,
}

impl Scene {
    /// The floor, the sphere and blocks B1-B4, in draw order.
    ///
    /// `sphere_slices` / `sphere_stacks` set the sphere tessellation.
    #[must_use]
    pub fn new(sphere_slices: u32, sphere_stacks: u32) -> Self {
        let sphere = MeshKey::Sphere {
            slices: sphere_slices,
            stacks: sphere_stacks,
        };
        let objects = vec![
            SceneObject {
                name: "floor",
                mesh: MeshKey::Cube,
                translation: Vec3::ZERO,
                scale: Vec3::new(10.0, 0.01, 10.0),
                color: palette::FLOOR,
            },
            SceneObject {
                name: "sphere",
                mesh: sphere,
                translation: Vec3::new(0.0, 1.0, 0.0),
                scale: Vec3::ONE,
                color: palette::BLUE,
            },
            SceneObject {
                name: "B1",
                mesh: MeshKey::Cube,
                translation: Vec3::new(1.5, 1.5, 0.0),
                scale: Vec3::new(1.0, 3.0, 1.0),
                color: palette::CYAN,
            },
            SceneObject {
                name: "B2",
                mesh: MeshKey::Cube,
                translation: Vec3::new(-1.5, 0.75, 0.0),
                scale: Vec3::new(1.0, 1.5, 1.0),
                color: palette::RED,
            },
            SceneObject {
                name: "B3",
                mesh: MeshKey::Cube,
                translation: Vec3::new(0.0, 0.5, 1.5),
                scale: Vec3::new(2.0, 1.0, 1.0),
                color: palette::YELLOW,
            },
            SceneObject {
                name: "B4",
                mesh: MeshKey::Cube,
                translation: Vec3::new(0.0, 0.5, -1.5),
                scale: Vec3::new(2.0, 1.0, 1.0),
                color: palette::GREEN,
            },
        ];
        Self { objects }
    }

    /// Objects in draw order.
    #[must_use]
    pub fn objects(&self) -> &[SceneObject] {
        &self.objects
    }

    /// Distinct meshes referenced by the scene, sorted.
    #[must_use]
    pub fn meshes(&self) -> Vec<MeshKey> {
        let mut keys: Vec<MeshKey> =
            self.objects.iter().map(|o| o.mesh).collect();
        keys.sort_unstable();
        keys.dedup();
        keys
    }

    /// Compose every object's model-view matrix on top of `view`.
    ///
    /// # Errors
    ///
    /// Propagates [`MatrixStackError`] on unbalanced stack use.
    pub fn draw_items(
        &self,
        view: Mat4,
    ) -> Result<Vec<DrawItem>, MatrixStackError> {
        let mut stack = MatrixStack::new();
        stack.load(view);

        let mut items = Vec::with_capacity(self.objects.len());
        for object in &self.objects {
            stack.push()?;
            stack.translate(object.translation);
            stack.scale(object.scale);
            items.push(DrawItem {
                mesh: object.mesh,
                model_view: stack.current(),
                color: Vec4::from_array(object.color),
            });
            let _ = stack.pop()?;
        }
        Ok(items)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn scene_lists_six_objects_in_draw_order() {
        let scene = Scene::new(20, 10);
        let names: Vec<&str> = scene.objects().iter().map(|o| o.name).collect();
        assert_eq!(names, ["floor", "sphere", "B1", "B2", "B3", "B4"]);
    }

    #[test]
    fn meshes_are_deduplicated() {
        let scene = Scene::new(20, 10);
        assert_eq!(
            scene.meshes(),
            vec![
                MeshKey::Cube,
                MeshKey::Sphere {
                    slices: 20,
                    stacks: 10
                }
            ]
        );
    }

    #[test]
    fn identity_view_yields_model_matrices() {
        let scene = Scene::new(20, 10);
        let items = scene.draw_items(Mat4::IDENTITY).unwrap();
        assert_eq!(items.len(), 6);

        // B1: a 1x3x1 block standing on the floor at x = 1.5.
        let b1 = items[2].model_view;
        let top = b1.transform_point3(Vec3::new(0.5, 0.5, 0.5));
        let bottom = b1.transform_point3(Vec3::new(-0.5, -0.5, -0.5));
        assert!((top - Vec3::new(2.0, 3.0, 0.5)).length() < 1e-6);
        assert!((bottom - Vec3::new(1.0, 0.0, -0.5)).length() < 1e-6);
        assert_eq!(items[2].color, Vec4::from_array(palette::CYAN));

        // Sphere is lifted one unit so it rests on the floor.
        let centre = items[1].model_view.transform_point3(Vec3::ZERO);
        assert_eq!(centre, Vec3::new(0.0, 1.0, 0.0));
    }

    #[test]
    fn view_is_premultiplied() {
        let scene = Scene::new(20, 10);
        let view = Mat4::look_at_rh(
            Vec3::new(-6.0, 8.0, 6.0),
            Vec3::new(0.0, 0.75, 0.0),
            Vec3::Y,
        );
        let world = scene.draw_items(Mat4::IDENTITY).unwrap();
        let eye = scene.draw_items(view).unwrap();
        for (w, e) in world.iter().zip(&eye) {
            let expected = view * w.model_view;
            assert!(e.model_view.abs_diff_eq(expected, 1e-5));
        }
    }

    #[test]
    fn floor_is_thin_slab() {
        let scene = Scene::new(20, 10);
        let floor = scene.draw_items(Mat4::IDENTITY).unwrap()[0];
        let corner = floor.model_view.transform_point3(Vec3::splat(0.5));
        assert!((corner - Vec3::new(5.0, 0.005, 5.0)).length() < 1e-6);
    }
}
