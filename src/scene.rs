//! The editable list of nested axes instances and its render traversal.
//!
//! Each [`AxesInstance`] is a rotation/translation/scale record. The list
//! is mutated only at the front: new instances are added there, removal
//! stops at one, and user input adjusts the front record's fields by fixed
//! per-frame steps. The traversal walks the list front to back, pushing
//! every instance's local transform onto the [`TransformStack`] without
//! popping in between, so instance N is placed inside instance N-1's
//! frame, and then pops once per instance to restore the base.

use std::collections::VecDeque;

use crate::camera::{Camera, CameraError, Projection, ProjectionError};
use crate::math::{Mat4, Vec3};
use crate::stack::{StackUnderflow, TransformStack};

/// Translation step per enabled axis per frame.
pub const TRANSLATE_STEP: f32 = 0.05;
/// Rotation step in degrees per enabled axis per frame.
pub const ROTATE_STEP: f32 = 2.0;
/// Scale step per enabled axis per frame. Unclamped: scale may reach zero
/// or go negative, flipping the geometry.
pub const SCALE_STEP: f32 = 0.01;

/// Default camera eye position.
pub const DEFAULT_EYE: Vec3 = Vec3::new(3.5, 3.5, 3.5);
/// Default vertical field of view in degrees.
pub const DEFAULT_FOV: f32 = 53.13;
/// Default near plane.
pub const DEFAULT_NEAR: f32 = 0.1;
/// Default far plane.
pub const DEFAULT_FAR: f32 = 1000.0;

/// One nested, user-editable axes instance.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct AxesInstance {
    /// Per-axis rotation in degrees.
    pub rotation: Vec3,
    pub translation: Vec3,
    pub scale: Vec3,
}

impl Default for AxesInstance {
    fn default() -> Self {
        Self {
            rotation: Vec3::ZERO,
            translation: Vec3::ZERO,
            scale: Vec3::ONE,
        }
    }
}

impl AxesInstance {
    /// The instance's local transform: translate, then rotate X, Y, Z, then
    /// scale, composed in exactly that order.
    pub fn local_matrix(&self) -> Mat4 {
        Mat4::from_translation(self.translation)
            * Mat4::from_rotation_x(self.rotation.x)
            * Mat4::from_rotation_y(self.rotation.y)
            * Mat4::from_rotation_z(self.rotation.z)
            * Mat4::from_scale(self.scale)
    }
}

/// Which axes the next adjustment applies to. Three independent toggles,
/// not a mask.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Default)]
pub struct AxisFlags {
    pub x: bool,
    pub y: bool,
    pub z: bool,
}

/// One of the six per-frame adjustments of the front instance.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Adjust {
    TranslateInc,
    TranslateDec,
    RotateInc,
    RotateDec,
    ScaleInc,
    ScaleDec,
}

/// Per-frame snapshot of everything the scene consumes from input.
#[derive(Debug, Clone, Copy, Default)]
pub struct InputSnapshot {
    /// The user asked to close the demo.
    pub exit: bool,
    /// Add a fresh default instance at the front.
    pub add_instance: bool,
    /// Remove the front instance (no-op when only one remains).
    pub remove_instance: bool,
    /// The held adjustment action, if any.
    pub action: Option<Adjust>,
    /// Axis toggles the action applies to.
    pub axes: AxisFlags,
}

/// The ordered, front-mutated list of instances. Never empty.
#[derive(Debug, Clone)]
pub struct InstanceList {
    items: VecDeque<AxesInstance>,
}

impl Default for InstanceList {
    fn default() -> Self {
        Self::new()
    }
}

impl InstanceList {
    /// Creates a list seeded with one default instance.
    pub fn new() -> Self {
        let mut items = VecDeque::new();
        items.push_front(AxesInstance::default());
        Self { items }
    }

    pub fn len(&self) -> usize {
        self.items.len()
    }

    /// The front instance: the most recently added one, and the only one
    /// input mutates.
    pub fn front(&self) -> &AxesInstance {
        self.items.front().expect("list invariant: never empty")
    }

    pub fn front_mut(&mut self) -> &mut AxesInstance {
        self.items.front_mut().expect("list invariant: never empty")
    }

    /// Adds a fresh default instance at the front.
    pub fn push_front(&mut self) {
        self.items.push_front(AxesInstance::default());
    }

    /// Removes the front instance, unless it is the last one.
    pub fn pop_front(&mut self) {
        if self.items.len() > 1 {
            self.items.pop_front();
        }
    }

    /// Front-to-back iteration, the order the traversal nests in.
    pub fn iter(&self) -> impl Iterator<Item = &AxesInstance> {
        self.items.iter()
    }

    /// Adjusts the front instance by one fixed step on every enabled axis.
    pub fn apply(&mut self, action: Adjust, axes: AxisFlags) {
        let front = self.front_mut();
        let step = |enabled: bool, amount: f32| if enabled { amount } else { 0.0 };

        match action {
            Adjust::TranslateInc | Adjust::TranslateDec => {
                let sign = if action == Adjust::TranslateInc { 1.0 } else { -1.0 };
                front.translation.x += step(axes.x, sign * TRANSLATE_STEP);
                front.translation.y += step(axes.y, sign * TRANSLATE_STEP);
                front.translation.z += step(axes.z, sign * TRANSLATE_STEP);
            }
            Adjust::RotateInc | Adjust::RotateDec => {
                let sign = if action == Adjust::RotateInc { 1.0 } else { -1.0 };
                front.rotation.x += step(axes.x, sign * ROTATE_STEP);
                front.rotation.y += step(axes.y, sign * ROTATE_STEP);
                front.rotation.z += step(axes.z, sign * ROTATE_STEP);
            }
            Adjust::ScaleInc | Adjust::ScaleDec => {
                let sign = if action == Adjust::ScaleInc { 1.0 } else { -1.0 };
                front.scale.x += step(axes.x, sign * SCALE_STEP);
                front.scale.y += step(axes.y, sign * SCALE_STEP);
                front.scale.z += step(axes.z, sign * SCALE_STEP);
            }
        }
    }
}

/// Walks the list front to back, pushing each instance's local transform
/// and handing the accumulated top to `visit` (one draw per instance),
/// then pops once per instance. The stack depth is the same before and
/// after for any list length.
pub fn traverse<F>(
    list: &InstanceList,
    stack: &mut TransformStack,
    mut visit: F,
) -> Result<(), StackUnderflow>
where
    F: FnMut(&Mat4),
{
    for instance in list.iter() {
        stack.push(&instance.local_matrix());
        visit(stack.top());
    }
    for _ in 0..list.len() {
        stack.pop()?;
    }
    Ok(())
}

/// The whole demo state: camera, projection, instance list, and the
/// transform stack the traversal runs on.
#[derive(Debug, Clone)]
pub struct Scene {
    pub camera: Camera,
    pub projection: Projection,
    pub instances: InstanceList,
    stack: TransformStack,
}

impl Scene {
    /// Builds the default scene for a viewport with the given aspect ratio:
    /// camera at (3.5, 3.5, 3.5) looking at the origin, a 53.13° perspective,
    /// and one default instance.
    pub fn new(aspect: f32) -> Result<Self, ProjectionError> {
        Ok(Self {
            camera: Camera::new(DEFAULT_EYE, Vec3::ZERO),
            projection: Projection::new(DEFAULT_FOV, DEFAULT_NEAR, DEFAULT_FAR, aspect)?,
            instances: InstanceList::new(),
            stack: TransformStack::new(),
        })
    }

    /// Applies one frame's input: list growth/shrink first, then the held
    /// adjustment. Always runs before the frame's traversal.
    pub fn update(&mut self, input: &InputSnapshot) {
        if input.add_instance {
            self.instances.push_front();
        }
        if input.remove_instance {
            self.instances.pop_front();
        }
        if let Some(action) = input.action {
            self.instances.apply(action, input.axes);
        }
    }

    /// Runs the render traversal, returning one accumulated model matrix
    /// per instance in draw order.
    pub fn model_matrices(&mut self) -> Result<Vec<Mat4>, StackUnderflow> {
        let mut matrices = Vec::with_capacity(self.instances.len());
        traverse(&self.instances, &mut self.stack, |top| {
            matrices.push(*top);
        })?;
        Ok(matrices)
    }

    pub fn view_matrix(&self) -> Result<Mat4, CameraError> {
        self.camera.view_matrix()
    }

    pub fn resize(&mut self, width: u32, height: u32) {
        self.projection.resize(width, height);
    }

    /// Stack depth, exposed for the balance invariant.
    pub fn stack_depth(&self) -> usize {
        self.stack.depth()
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    const EPS: f32 = 1e-5;

    fn flags(x: bool, y: bool, z: bool) -> AxisFlags {
        AxisFlags { x, y, z }
    }

    #[test]
    fn list_never_drops_below_one() {
        let mut list = InstanceList::new();
        for _ in 0..100 {
            list.pop_front();
        }
        assert_eq!(list.len(), 1);
        assert_eq!(*list.front(), AxesInstance::default());
    }

    #[test]
    fn add_then_remove_returns_to_default() {
        let mut list = InstanceList::new();
        for _ in 0..25 {
            list.push_front();
        }
        assert_eq!(list.len(), 26);
        for _ in 0..25 {
            list.pop_front();
        }
        assert_eq!(list.len(), 1);
        assert_eq!(*list.front(), AxesInstance::default());
    }

    #[test]
    fn apply_only_touches_enabled_axes() {
        let mut list = InstanceList::new();

        list.apply(Adjust::TranslateInc, flags(true, false, false));
        assert_eq!(list.front().translation, Vec3::new(TRANSLATE_STEP, 0.0, 0.0));

        list.apply(Adjust::RotateDec, flags(false, true, true));
        assert_eq!(list.front().rotation, Vec3::new(0.0, -ROTATE_STEP, -ROTATE_STEP));

        list.apply(Adjust::ScaleInc, flags(false, false, true));
        assert_eq!(list.front().scale, Vec3::new(1.0, 1.0, 1.0 + SCALE_STEP));

        // No axes enabled: nothing moves.
        let before = *list.front();
        list.apply(Adjust::TranslateDec, flags(false, false, false));
        assert_eq!(*list.front(), before);
    }

    #[test]
    fn scale_is_unclamped_and_may_flip() {
        let mut list = InstanceList::new();
        for _ in 0..150 {
            list.apply(Adjust::ScaleDec, flags(true, false, false));
        }
        assert!(list.front().scale.x < 0.0);
    }

    #[test]
    fn apply_mutates_only_the_front() {
        let mut list = InstanceList::new();
        list.apply(Adjust::TranslateInc, flags(true, true, true));
        list.push_front();
        list.apply(Adjust::RotateInc, flags(true, false, false));

        let all: Vec<_> = list.iter().copied().collect();
        assert_eq!(all[0].rotation.x, ROTATE_STEP);
        assert_eq!(all[0].translation, Vec3::ZERO);
        assert_eq!(all[1].translation, Vec3::new(TRANSLATE_STEP, TRANSLATE_STEP, TRANSLATE_STEP));
        assert_eq!(all[1].rotation, Vec3::ZERO);
    }

    #[test]
    fn traversal_keeps_the_stack_balanced() {
        let mut stack = TransformStack::new();
        let mut list = InstanceList::new();
        for n in [0usize, 1, 5, 12] {
            while list.len() < n.max(1) {
                list.push_front();
            }
            let before = stack.depth();
            traverse(&list, &mut stack, |_| {}).unwrap();
            assert_eq!(stack.depth(), before);
            assert_eq!(stack.depth(), 1);
        }
    }

    #[test]
    fn traversal_nests_each_instance_in_the_previous_frame() {
        let mut list = InstanceList::new();
        list.front_mut().translation = Vec3::new(1.0, 0.0, 0.0);
        list.push_front();
        list.front_mut().translation = Vec3::new(0.0, 2.0, 0.0);

        let mut stack = TransformStack::new();
        let mut tops = Vec::new();
        traverse(&list, &mut stack, |top| tops.push(*top)).unwrap();

        assert_eq!(tops.len(), 2);
        // Second visited matrix is the first one composed with the second
        // record's local transform: nesting, not flat world placement.
        let all: Vec<_> = list.iter().copied().collect();
        let expected = tops[0] * all[1].local_matrix();
        assert_eq!(tops[1], expected);

        // The back record's origin ends up translated by both records.
        let origin = tops[1].transform([0.0, 0.0, 0.0, 1.0]);
        assert!((origin[0] - 1.0).abs() < EPS);
        assert!((origin[1] - 2.0).abs() < EPS);
    }

    #[test]
    fn scene_front_translate_scenario() {
        // Three instances, x-axis only, one translate step on the front.
        let mut scene = Scene::new(1.0).unwrap();
        scene.update(&InputSnapshot {
            add_instance: true,
            ..Default::default()
        });
        scene.update(&InputSnapshot {
            add_instance: true,
            ..Default::default()
        });
        assert_eq!(scene.instances.len(), 3);

        scene.update(&InputSnapshot {
            action: Some(Adjust::TranslateInc),
            axes: flags(true, false, false),
            ..Default::default()
        });

        let all: Vec<_> = scene.instances.iter().copied().collect();
        assert_eq!(all[0].translation, Vec3::new(TRANSLATE_STEP, 0.0, 0.0));
        assert_eq!(all[1], AxesInstance::default());
        assert_eq!(all[2], AxesInstance::default());

        let matrices = scene.model_matrices().unwrap();
        assert_eq!(matrices.len(), 3);
        assert_eq!(scene.stack_depth(), 1);

        // The back record has no local translation of its own but sits
        // under the accumulated transform of the two in front of it.
        let expected_back =
            matrices[1] * all[2].local_matrix();
        assert_eq!(matrices[2], expected_back);
        let origin = matrices[2].transform([0.0, 0.0, 0.0, 1.0]);
        assert!((origin[0] - TRANSLATE_STEP).abs() < EPS);
    }

    #[test]
    fn stack_stays_balanced_when_the_list_changes_between_frames() {
        let mut scene = Scene::new(1.0).unwrap();
        for _ in 0..4 {
            scene.update(&InputSnapshot {
                add_instance: true,
                ..Default::default()
            });
            scene.model_matrices().unwrap();
            assert_eq!(scene.stack_depth(), 1);
        }
        for _ in 0..10 {
            scene.update(&InputSnapshot {
                remove_instance: true,
                ..Default::default()
            });
            scene.model_matrices().unwrap();
            assert_eq!(scene.stack_depth(), 1);
        }
        assert_eq!(scene.instances.len(), 1);
    }

    #[test]
    fn local_matrix_composes_in_fixed_order() {
        let instance = AxesInstance {
            rotation: Vec3::new(10.0, 20.0, 30.0),
            translation: Vec3::new(1.0, 2.0, 3.0),
            scale: Vec3::new(2.0, 1.0, 0.5),
        };

        let expected = Mat4::from_translation(instance.translation)
            * Mat4::from_rotation_x(10.0)
            * Mat4::from_rotation_y(20.0)
            * Mat4::from_rotation_z(30.0)
            * Mat4::from_scale(instance.scale);
        assert_eq!(instance.local_matrix(), expected);

        // Rotation order matters: X-Y-Z is not Z-Y-X.
        let reversed = Mat4::from_translation(instance.translation)
            * Mat4::from_rotation_z(30.0)
            * Mat4::from_rotation_y(20.0)
            * Mat4::from_rotation_x(10.0)
            * Mat4::from_scale(instance.scale);
        assert_ne!(instance.local_matrix(), reversed);
    }
}
