//! Offset arithmetic shared by every flat container.
//!
//! A [`Layout`] keeps only the accumulated strides of a shape. An index tuple
//! `[i0, i1, ..., i(D-1)]` maps to
//!
//! ```text
//! offset = i0 + i1 * strides[0] + i2 * strides[1] + ... + i(D-1) * strides[D-2]
//! ```
//!
//! so the first index is the unscaled base term and varies fastest in memory.
//!
//! Per-axis bounds are only checked when `debug_assertions` or the `checked`
//! feature are enabled. Release builds trust the caller: an out-of-range tuple
//! lands on some other offset of the same buffer.

use crate::{shape::accumulated_strides, Error, Result, Shape};

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Layout<const D: usize> {
    strides: [usize; D],
}

impl<const D: usize> Layout<D> {
    pub fn new(dims: [usize; D]) -> Result<Self> {
        Ok(Self {
            strides: accumulated_strides(dims)?,
        })
    }

    pub fn of<S: Shape<D>>() -> Result<Self> {
        Self::new(S::dims())
    }

    /// Accumulated strides, `strides[D - 1]` being the element count.
    #[inline]
    pub fn strides(&self) -> &[usize; D] {
        &self.strides
    }

    #[inline]
    pub fn element_count(&self) -> usize {
        self.strides[D - 1]
    }

    #[inline]
    pub fn rank(&self) -> usize {
        D
    }

    /// Size of `axis`, recovered from the strides.
    ///
    /// # Panics
    ///
    /// Panics if `axis >= D`.
    #[inline]
    pub fn dim(&self, axis: usize) -> usize {
        if axis == 0 {
            self.strides[0]
        } else {
            self.strides[axis] / self.strides[axis - 1]
        }
    }

    pub fn dims(&self) -> [usize; D] {
        std::array::from_fn(|axis| self.dim(axis))
    }

    /// Linear offset of `index`.
    #[inline(always)]
    pub fn offset(&self, index: [usize; D]) -> usize {
        #[cfg(any(debug_assertions, feature = "checked"))]
        self.assert_in_bounds(&index);
        self.offset_unchecked(&index)
    }

    #[cfg(any(debug_assertions, feature = "checked"))]
    #[track_caller]
    fn assert_in_bounds(&self, index: &[usize]) {
        if let Err(err) = self.check(index) {
            panic!("{err}");
        }
    }

    #[inline(always)]
    fn offset_unchecked(&self, index: &[usize]) -> usize {
        index[1..]
            .iter()
            .zip(self.strides.iter())
            .fold(index[0], |acc, (i, stride)| acc + i * stride)
    }

    /// Checked offset for callers whose rank is only known at runtime.
    pub fn try_offset(&self, index: &[usize]) -> Result<usize> {
        if index.len() != D {
            return Err(Error::DimensionalityMismatch {
                expected: D,
                got: index.len(),
            });
        }
        self.check(index)?;
        Ok(self.offset_unchecked(index))
    }

    fn check(&self, index: &[usize]) -> Result<()> {
        for (axis, &i) in index.iter().enumerate() {
            let size = self.dim(axis);
            if i >= size {
                return Err(Error::IndexOutOfRange {
                    axis,
                    index: i,
                    size,
                });
            }
        }
        Ok(())
    }

    /// Inverse of [`Layout::offset`].
    ///
    /// # Panics
    ///
    /// Panics if `offset >= element_count()`.
    pub fn unravel(&self, offset: usize) -> [usize; D] {
        assert!(
            offset < self.element_count(),
            "offset {offset} is out of range for {} elements",
            self.element_count()
        );
        let mut rest = offset;
        let mut index = [0usize; D];
        for axis in (1..D).rev() {
            index[axis] = rest / self.strides[axis - 1];
            rest %= self.strides[axis - 1];
        }
        index[0] = rest;
        index
    }

    /// Every valid index tuple in buffer order.
    pub fn indices(&self) -> impl Iterator<Item = [usize; D]> + '_ {
        (0..self.element_count()).map(|offset| self.unravel(offset))
    }
}
