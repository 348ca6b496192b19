//! Options methods for SceneEngine

use super::SceneEngine;
use crate::{
    camera::{animator::CameraAnimator, core::Projection},
    error::TableauError,
    options::Options,
    scene::Scene,
};

impl SceneEngine {
    /// Current options.
    #[must_use]
    pub fn options(&self) -> &Options {
        &self.options
    }

    /// Replace options and push the changed sections to the subsystems.
    ///
    /// A new camera section restarts the camera from rest. A new sphere
    /// tessellation rebuilds the scene.
    ///
    /// # Errors
    ///
    /// Returns [`TableauError::Mesh`] if the new tessellation is invalid;
    /// the previous options stay in effect.
    pub fn set_options(&mut self, new: Options) -> Result<(), TableauError> {
        let display = &new.display;
        if (display.sphere_slices, display.sphere_stacks)
            != (
                self.options.display.sphere_slices,
                self.options.display.sphere_stacks,
            )
        {
            let scene = Scene::new(display.sphere_slices, display.sphere_stacks);
            self.solid.sync_meshes(&self.context.device, &scene.meshes())?;
            self.scene = scene;
        }

        if new.lighting != self.options.lighting {
            self.lighting.apply_options(&self.context.queue, &new.lighting);
        }
        if new.projection != self.options.projection {
            let mut projection = Projection::from_options(&new.projection);
            let (width, height) = self.context.size();
            projection.resize(width, height);
            self.camera_controller.projection = projection;
        }
        if new.camera != self.options.camera {
            self.camera_controller.animator = CameraAnimator::new(&new.camera);
        }

        self.options = new;
        log::debug!("options applied");
        Ok(())
    }
}
