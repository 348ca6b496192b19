//! Bounded modelview stack emulating classic push/pop transform handling.
//!
//! The stack keeps a *current* matrix alongside the saved entries. Transforms
//! post-multiply the current matrix, so the last transform applied is the
//! first one a vertex sees:
//!
//! ```
//! # use glam::{Mat4, Vec3};
//! # use tableau::util::matrix_stack::MatrixStack;
//! let mut stack = MatrixStack::new();
//! stack.push().unwrap();
//! stack.translate(Vec3::new(0.0, 1.0, 0.0));
//! stack.scale(Vec3::splat(2.0));
//! let model = stack.current();
//! stack.pop().unwrap();
//! assert_eq!(stack.current(), Mat4::IDENTITY);
//! # let _ = model;
//! ```

use std::fmt;

use glam::{Mat4, Vec3};

/// Default number of matrices the stack can hold.
pub const DEFAULT_CAPACITY: usize = 32;

/// Unbalanced stack usage.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum MatrixStackError {
    /// `push` on a full stack.
    Overflow {
        /// Capacity of the stack that overflowed.
        capacity: usize,
    },
    /// `pop` on an empty stack.
    Underflow,
}

impl fmt::Display for MatrixStackError {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        match self {
            Self::Overflow { capacity } => {
                write!(f, "matrix stack overflow (capacity {capacity})")
            }
            Self::Underflow => write!(f, "matrix stack underflow"),
        }
    }
}

impl std::error::Error for MatrixStackError {}

/// A fixed-capacity stack of 4x4 matrices plus the current matrix.
#[derive(Debug, Clone)]
pub struct MatrixStack {
    current: Mat4,
    saved: Vec<Mat4>,
    capacity: usize,
}

impl Default for MatrixStack {
    fn default() -> Self {
        Self::new()
    }
}

impl MatrixStack {
    /// Empty stack with [`DEFAULT_CAPACITY`] and an identity current matrix.
    #[must_use]
    pub fn new() -> Self {
        Self::with_capacity(DEFAULT_CAPACITY)
    }

    /// Empty stack holding at most `capacity` saved matrices.
    #[must_use]
    pub fn with_capacity(capacity: usize) -> Self {
        Self {
            current: Mat4::IDENTITY,
            saved: Vec::with_capacity(capacity),
            capacity,
        }
    }

    /// Save the current matrix.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixStackError::Overflow`] if the stack is full.
    pub fn push(&mut self) -> Result<(), MatrixStackError> {
        if self.saved.len() >= self.capacity {
            return Err(MatrixStackError::Overflow {
                capacity: self.capacity,
            });
        }
        self.saved.push(self.current);
        Ok(())
    }

    /// Restore the most recently saved matrix and return it.
    ///
    /// # Errors
    ///
    /// Returns [`MatrixStackError::Underflow`] if nothing was pushed.
    pub fn pop(&mut self) -> Result<Mat4, MatrixStackError> {
        let restored = self.saved.pop().ok_or(MatrixStackError::Underflow)?;
        self.current = restored;
        Ok(restored)
    }

    /// Replace the current matrix.
    pub fn load(&mut self, m: Mat4) {
        self.current = m;
    }

    /// Post-multiply the current matrix (`current = current * m`).
    pub fn multiply(&mut self, m: Mat4) {
        self.current *= m;
    }

    /// Post-multiply by a translation.
    pub fn translate(&mut self, offset: Vec3) {
        self.multiply(Mat4::from_translation(offset));
    }

    /// Post-multiply by a non-uniform scale.
    pub fn scale(&mut self, factors: Vec3) {
        self.multiply(Mat4::from_scale(factors));
    }

    /// The current matrix.
    #[must_use]
    pub fn current(&self) -> Mat4 {
        self.current
    }

    /// Number of saved matrices.
    #[must_use]
    pub fn depth(&self) -> usize {
        self.saved.len()
    }

    /// Maximum number of saved matrices.
    #[must_use]
    pub fn capacity(&self) -> usize {
        self.capacity
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn push_pop_restores_current() {
        let mut stack = MatrixStack::new();
        let view = Mat4::from_translation(Vec3::new(0.0, 0.0, -5.0));
        stack.load(view);

        stack.push().unwrap();
        stack.translate(Vec3::new(1.5, 1.5, 0.0));
        stack.scale(Vec3::new(1.0, 3.0, 1.0));
        assert_ne!(stack.current(), view);

        let restored = stack.pop().unwrap();
        assert_eq!(restored, view);
        assert_eq!(stack.current(), view);
        assert_eq!(stack.depth(), 0);
    }

    #[test]
    fn translate_then_scale_scales_first() {
        let mut stack = MatrixStack::new();
        stack.translate(Vec3::new(0.0, 0.5, 1.5));
        stack.scale(Vec3::new(2.0, 1.0, 1.0));

        // Corner of the unit cube: scaled, then moved.
        let p = stack.current().transform_point3(Vec3::new(0.5, 0.5, 0.5));
        assert!((p - Vec3::new(1.0, 1.0, 2.0)).length() < 1e-6);
    }

    #[test]
    fn pop_on_empty_is_underflow() {
        let mut stack = MatrixStack::new();
        assert_eq!(stack.pop(), Err(MatrixStackError::Underflow));
    }

    #[test]
    fn push_past_capacity_is_overflow() {
        let mut stack = MatrixStack::with_capacity(2);
        stack.push().unwrap();
        stack.push().unwrap();
        assert_eq!(
            stack.push(),
            Err(MatrixStackError::Overflow { capacity: 2 })
        );
        assert_eq!(stack.depth(), 2);
    }

    #[test]
    fn nested_scopes_unwind_in_order() {
        let mut stack = MatrixStack::new();
        stack.push().unwrap();
        stack.translate(Vec3::X);
        let outer = stack.current();
        stack.push().unwrap();
        stack.translate(Vec3::Y);
        let _ = stack.pop().unwrap();
        assert_eq!(stack.current(), outer);
        let _ = stack.pop().unwrap();
        assert_eq!(stack.current(), Mat4::IDENTITY);
    }
}
