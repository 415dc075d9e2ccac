use std::{marker::PhantomData, ops::Index};

use crate::{
    env::{Bounds, HandleCollection},
    layout::Layout,
    Context, Result, Shape,
};

/// A rank-`D` grid of handles stored in one collection allocated by an
/// external environment.
///
/// The grid uses the same offsets as [`crate::Tensor`]. It holds the
/// collection, but the environment finalizes it: handles are only valid while
/// the environment is alive and has not been ended. There is no mutable
/// accessor since handles are proxies that mutate through the environment.
#[derive(Debug)]
pub struct VarTensor<'env, C: HandleCollection<'env>, const D: usize> {
    collection: C,
    layout: Layout<D>,
    _env: PhantomData<&'env C::Env>,
}

impl<'env, C: HandleCollection<'env>, const D: usize> VarTensor<'env, C, D> {
    /// Allocate one collection with the environment's default bounds.
    pub fn new(env: &'env C::Env, dims: [usize; D]) -> Result<Self> {
        Self::with_bounds(env, dims, C::default_bounds(env))
    }

    pub fn with_bounds(env: &'env C::Env, dims: [usize; D], bounds: Bounds) -> Result<Self> {
        let layout = Layout::new(dims)?;
        let collection = C::allocate(env, layout.element_count(), bounds)?;
        tracing::debug!(
            ?dims,
            len = layout.element_count(),
            "allocated handle tensor"
        );
        Ok(Self {
            collection,
            layout,
            _env: PhantomData,
        })
    }

    pub fn of<S: Shape<D>>(env: &'env C::Env) -> Result<Self> {
        Self::new(env, S::dims())
    }

    #[inline]
    pub fn get(&self, index: [usize; D]) -> &C::Handle {
        &self.collection.handles()[self.layout.offset(index)]
    }

    pub fn try_get(&self, index: &[usize]) -> Result<&C::Handle> {
        let offset = self.layout.try_offset(index)?;
        self.collection
            .handles()
            .get(offset)
            .context("offset is past the end of the collection")
    }

    pub fn collection(&self) -> &C {
        &self.collection
    }

    pub fn handles(&self) -> &[C::Handle] {
        self.collection.handles()
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
        self.layout.element_count()
    }

    pub fn is_empty(&self) -> bool {
        self.len() == 0
    }
}

impl<'env, C: HandleCollection<'env>, const D: usize> Index<[usize; D]>
    for VarTensor<'env, C, D>
{
    type Output = C::Handle;

    #[inline]
    fn index(&self, index: [usize; D]) -> &C::Handle {
        self.get(index)
    }
}
