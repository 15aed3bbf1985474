//! The LIFO stack of composed transforms that realizes nested placement.
//!
//! Pushing composes the new local transform against the current top, so a
//! child's transform is always expressed in its parent's frame. The stack is
//! created with a single base matrix that can never be popped; a traversal
//! that pushes N times and pops N times always returns the stack to that
//! base state.

use crate::math::Mat4;

/// Attempted to pop the base matrix off a [`TransformStack`].
///
/// This is a traversal bug, not a runtime condition: a balanced render pass
/// pops exactly as many times as it pushed.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct StackUnderflow;

impl std::fmt::Display for StackUnderflow {
    fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
        write!(f, "transform stack underflow: the base matrix cannot be popped")
    }
}

impl std::error::Error for StackUnderflow {}

/// A stack of accumulated 4×4 transforms.
#[derive(Debug, Clone)]
pub struct TransformStack {
    entries: Vec<Mat4>,
}

impl Default for TransformStack {
    fn default() -> Self {
        Self::new()
    }
}

impl TransformStack {
    /// Creates a stack whose base is the identity matrix.
    pub fn new() -> Self {
        Self::with_base(Mat4::IDENTITY)
    }

    /// Creates a stack with an arbitrary base transform.
    pub fn with_base(base: Mat4) -> Self {
        Self {
            entries: vec![base],
        }
    }

    /// Composes `local` against the current top and pushes the result.
    ///
    /// The new top equals `top() * local`, i.e. `local` is interpreted in
    /// the frame of whatever was on top before the call.
    pub fn push(&mut self, local: &Mat4) {
        let composed = *self.top() * *local;
        self.entries.push(composed);
    }

    /// Removes the most recently pushed transform.
    pub fn pop(&mut self) -> Result<(), StackUnderflow> {
        if self.entries.len() > 1 {
            self.entries.pop();
            Ok(())
        } else {
            Err(StackUnderflow)
        }
    }

    /// The current accumulated transform.
    pub fn top(&self) -> &Mat4 {
        self.entries
            .last()
            .expect("stack invariant: at least the base entry exists")
    }

    /// Number of entries including the base. A freshly created or balanced
    /// stack has depth 1.
    pub fn depth(&self) -> usize {
        self.entries.len()
    }
}
