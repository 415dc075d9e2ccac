use std::ops::{Index, IndexMut};

use rand::Rng;

use crate::{layout::Layout, Context, DType, Error, Result, Shape};

/// A rank-`D` tensor stored in one contiguous buffer it exclusively owns.
///
/// Element `[i0, i1, ..., i(D-1)]` lives at offset
/// `i0 + i1 * strides[0] + ... + i(D-1) * strides[D-2]`, see [`Layout`].
/// Only functions which allocate or copy data return `Result`s.
///
/// Tensors are not `Clone`.
#[derive(Debug, PartialEq)]
pub struct Tensor<T, const D: usize> {
    data: Vec<T>,
    layout: Layout<D>,
}

impl<T, const D: usize> Tensor<T, D> {
    /// Take ownership of `data`, whose order becomes the buffer order.
    pub fn from_vec(data: Vec<T>, dims: [usize; D]) -> Result<Self> {
        let layout = Layout::new(dims)?;
        if data.len() != layout.element_count() {
            return Err(Error::LengthMismatch {
                expected: layout.element_count(),
                got: data.len(),
            });
        }
        tracing::trace!(?dims, len = data.len(), "tensor from vec");
        Ok(Self { data, layout })
    }

    /// Collect exactly `element_count(dims)` items from `iter`.
    ///
    /// At most one item past the element count is pulled, so unbounded
    /// sources are rejected too. For a long source the `got` of the
    /// [`Error::LengthMismatch`] is a lower bound, `expected + 1`.
    pub fn from_iter_exact<I>(iter: I, dims: [usize; D]) -> Result<Self>
    where
        I: IntoIterator<Item = T>,
    {
        let layout = Layout::new(dims)?;
        let expected = layout.element_count();
        let mut data = Vec::with_capacity(expected);
        let mut iter = iter.into_iter();
        data.extend(iter.by_ref().take(expected));
        if data.len() != expected {
            return Err(Error::LengthMismatch {
                expected,
                got: data.len(),
            });
        }
        if iter.next().is_some() {
            return Err(Error::LengthMismatch {
                expected,
                got: expected + 1,
            });
        }
        tracing::trace!(?dims, len = expected, "tensor from iterator");
        Ok(Self { data, layout })
    }

    /// Build every element from its index tuple, in buffer order.
    pub fn from_fn<F>(dims: [usize; D], mut f: F) -> Result<Self>
    where
        F: FnMut([usize; D]) -> T,
    {
        let layout = Layout::new(dims)?;
        tracing::trace!(?dims, len = layout.element_count(), "tensor from fn");
        let data = layout.indices().map(&mut f).collect();
        Ok(Self { data, layout })
    }

    #[inline]
    pub fn get(&self, index: [usize; D]) -> &T {
        &self.data[self.layout.offset(index)]
    }

    /// Shares [`Layout::offset`] with [`Tensor::get`].
    #[inline]
    pub fn get_mut(&mut self, index: [usize; D]) -> &mut T {
        let offset = self.layout.offset(index);
        &mut self.data[offset]
    }

    pub fn try_get(&self, index: &[usize]) -> Result<&T> {
        let offset = self.layout.try_offset(index)?;
        self.data
            .get(offset)
            .context("offset is past the end of the buffer")
    }

    pub fn try_get_mut(&mut self, index: &[usize]) -> Result<&mut T> {
        let offset = self.layout.try_offset(index)?;
        self.data
            .get_mut(offset)
            .context("offset is past the end of the buffer")
    }

    pub fn layout(&self) -> &Layout<D> {
        &self.layout
    }

    pub fn strides(&self) -> &[usize; D] {
        self.layout.strides()
    }

    pub fn dims(&self) -> [usize; D] {
        self.layout.dims()
    }

    pub fn len(&self) -> usize {
        self.data.len()
    }

    pub fn is_empty(&self) -> bool {
        self.data.is_empty()
    }

    pub fn as_slice(&self) -> &[T] {
        &self.data
    }

    pub fn as_mut_slice(&mut self) -> &mut [T] {
        &mut self.data
    }

    pub fn into_vec(self) -> Vec<T> {
        self.data
    }

    /// Elements paired with their index tuples, in buffer order.
    pub fn iter_indexed(&self) -> impl Iterator<Item = ([usize; D], &T)> + '_ {
        self.layout.indices().zip(self.data.iter())
    }
}

impl<T: Clone, const D: usize> Tensor<T, D> {
    /// Create a tensor filled with some value.
    pub fn new(dims: [usize; D], value: T) -> Result<Self> {
        let layout = Layout::new(dims)?;
        tracing::trace!(?dims, len = layout.element_count(), "allocating tensor");
        Ok(Self {
            data: vec![value; layout.element_count()],
            layout,
        })
    }

    /// Copy `data` into a fresh buffer.
    pub fn from_slice(data: &[T], dims: [usize; D]) -> Result<Self> {
        Self::from_iter_exact(data.iter().cloned(), dims)
    }
}

impl<T: DType, const D: usize> Tensor<T, D> {
    pub fn full(dims: [usize; D], value: T) -> Result<Self> {
        Self::new(dims, value)
    }

    pub fn zeros(dims: [usize; D]) -> Result<Self> {
        Self::new(dims, T::ZERO)
    }

    pub fn ones(dims: [usize; D]) -> Result<Self> {
        Self::new(dims, T::ONE)
    }

    pub fn zeros_of<S: Shape<D>>() -> Result<Self> {
        Self::zeros(S::dims())
    }

    /// Uniform values in `[0, 1)` for floats, the full range for `u32`.
    pub fn rand<R: Rng + ?Sized>(dims: [usize; D], rng: &mut R) -> Result<Self> {
        let mut tensor = Self::zeros(dims)?;
        T::fill_with_uniform(rng, &mut tensor.data)?;
        Ok(tensor)
    }

    pub fn randn<R: Rng + ?Sized>(dims: [usize; D], mean: T, std: T, rng: &mut R) -> Result<Self> {
        let mut tensor = Self::zeros(dims)?;
        T::fill_with_normal(rng, &mut tensor.data, mean, std)?;
        Ok(tensor)
    }
}

impl<T, const D: usize> Index<[usize; D]> for Tensor<T, D> {
    type Output = T;

    #[inline]
    fn index(&self, index: [usize; D]) -> &T {
        self.get(index)
    }
}

impl<T, const D: usize> IndexMut<[usize; D]> for Tensor<T, D> {
    #[inline]
    fn index_mut(&mut self, index: [usize; D]) -> &mut T {
        self.get_mut(index)
    }
}
