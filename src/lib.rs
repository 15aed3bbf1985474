//! # Armature
//!
//! **An interactive demo of nested coordinate-frame transforms.**
//!
//! Armature renders a set of colored unit axes (X red, Y green, Z blue)
//! and lets you nest, translate, rotate, and scale copies of them live.
//! Every instance is placed relative to the one in front of it through a
//! [`TransformStack`]: the traversal pushes each instance's local
//! transform without popping in between, so editing one frame moves
//! everything nested inside it.
//!
//! The interesting parts are all CPU-side and plain values:
//!
//! - [`Mat4`] and [`Vec3`]: column-major matrix math with degree-based
//!   rotation constructors and fallible normalization.
//! - [`TransformStack`]: the LIFO of accumulated transforms with an
//!   unpoppable base.
//! - [`Scene`]: the editable instance list, the per-frame input
//!   snapshot, and the push-all-then-pop-all render traversal.
//! - [`Camera`] and [`Projection`]: an inverse-free look-at view matrix
//!   and a validated perspective projection.
//!
//! The wgpu/winit side ([`GpuContext`], [`AxesMesh`], [`AxesPass`], and
//! the binary) is a thin shell that hands each accumulated matrix to one
//! line draw.
//!
//! ## Controls
//!
//! | Key | Effect |
//! |-----|--------|
//! | `X` / `Y` / `Z` | Toggle which axes the actions below affect |
//! | `1` / `2` | Translate the front instance +/- |
//! | `3` / `4` | Rotate the front instance +/- |
//! | `5` / `6` | Scale the front instance +/- |
//! | `+` / `-` | Add / remove a nested instance |
//! | `Esc` | Quit |

mod axes;
mod axes_pass;
mod camera;
mod gpu;
mod input;
mod math;
mod scene;
mod stack;

pub use axes::{AxesMesh, LineVertex};
pub use axes_pass::{AxesPass, CameraUniforms, ModelUniforms};
pub use camera::{Camera, CameraError, Projection, ProjectionError, WORLD_UP};
pub use gpu::GpuContext;
pub use input::Input;
pub use math::{Mat4, MathError, Vec3};
pub use scene::{
    Adjust, AxesInstance, AxisFlags, InputSnapshot, InstanceList, Scene, traverse,
    DEFAULT_EYE, DEFAULT_FAR, DEFAULT_FOV, DEFAULT_NEAR, ROTATE_STEP, SCALE_STEP,
    TRANSLATE_STEP,
};
pub use stack::{StackUnderflow, TransformStack};

// Re-export commonly used winit types for convenience
pub use winit::keyboard::KeyCode;
