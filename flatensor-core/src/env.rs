//! A minimal modelling environment whose decision variables and constraint
//! ranges are addressed through handles.
//!
//! The [`Env`] owns every variable and range it hands out. Collections and
//! handles only borrow it, so they cannot outlive it, and [`Env::end`]
//! finalizes all of them at once. After that every handle reports
//! [`Error::EnvEnded`].

use std::{
    cell::{Ref, RefCell, RefMut},
    fmt,
    ops::Index,
};

use crate::{bail, Error, Result};

/// Closed interval `[lb, ub]` attached to a variable or range.
#[derive(Debug, Clone, Copy, PartialEq)]
pub struct Bounds {
    pub lb: f64,
    pub ub: f64,
}

impl Bounds {
    pub const NON_NEGATIVE: Bounds = Bounds {
        lb: 0.0,
        ub: f64::INFINITY,
    };

    pub fn new(lb: f64, ub: f64) -> Result<Self> {
        if lb.is_nan() || ub.is_nan() {
            bail!("bounds must not be NaN, got [{lb}, {ub}]");
        }
        if lb > ub {
            return Err(Error::InvalidBounds { lb, ub });
        }
        Ok(Self { lb, ub })
    }

    /// `[0, ub]`
    pub fn upper(ub: f64) -> Result<Self> {
        Self::new(0.0, ub)
    }
}

impl Default for Bounds {
    fn default() -> Self {
        Self::NON_NEGATIVE
    }
}

#[derive(Debug, Clone, Copy, Default)]
pub struct EnvConfig {
    /// Bounds used when a collection is allocated without explicit ones.
    pub default_bounds: Bounds,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct EnvStats {
    pub vars: usize,
    pub ranges: usize,
    /// Collections still live, zero once the environment has ended.
    pub collections: usize,
    pub ended: bool,
}

#[derive(Debug, Clone)]
struct Entry {
    bounds: Bounds,
    name: Option<String>,
}

#[derive(Debug, Default)]
struct EnvState {
    vars: Vec<Entry>,
    ranges: Vec<Entry>,
    collections: usize,
    ended: bool,
}

#[derive(Debug, Default)]
pub struct Env {
    config: EnvConfig,
    state: RefCell<EnvState>,
}

impl Env {
    pub fn new() -> Self {
        Self::default()
    }

    pub fn with_config(config: EnvConfig) -> Self {
        Self {
            config,
            state: RefCell::default(),
        }
    }

    pub fn config(&self) -> &EnvConfig {
        &self.config
    }

    /// Allocate `len` decision variables in one call.
    pub fn num_var_array(&self, len: usize, bounds: Bounds) -> Result<NumVarArray<'_>> {
        let first = self.allocate(len, bounds, |state| &mut state.vars)?;
        tracing::debug!(len, lb = bounds.lb, ub = bounds.ub, "allocated variable array");
        Ok(NumVarArray {
            handles: (first..first + len).map(|id| NumVar { id, env: self }).collect(),
        })
    }

    /// Allocate `len` constraint ranges in one call.
    pub fn range_array(&self, len: usize, bounds: Bounds) -> Result<RangeArray<'_>> {
        let first = self.allocate(len, bounds, |state| &mut state.ranges)?;
        tracing::debug!(len, lb = bounds.lb, ub = bounds.ub, "allocated range array");
        Ok(RangeArray {
            handles: (first..first + len).map(|id| Range { id, env: self }).collect(),
        })
    }

    fn allocate(
        &self,
        len: usize,
        bounds: Bounds,
        entries: impl FnOnce(&mut EnvState) -> &mut Vec<Entry>,
    ) -> Result<usize> {
        let bounds = Bounds::new(bounds.lb, bounds.ub)?;
        let mut state = self.live_mut()?;
        state.collections += 1;
        let entries = entries(&mut *state);
        let first = entries.len();
        entries.extend(std::iter::repeat_n(Entry { bounds, name: None }, len));
        Ok(first)
    }

    /// Finalize every collection this environment handed out. Idempotent.
    pub fn end(&self) {
        let mut state = self.state.borrow_mut();
        if state.ended {
            return;
        }
        tracing::debug!(
            vars = state.vars.len(),
            ranges = state.ranges.len(),
            collections = state.collections,
            "ending environment"
        );
        state.vars = Vec::new();
        state.ranges = Vec::new();
        state.collections = 0;
        state.ended = true;
    }

    pub fn is_ended(&self) -> bool {
        self.state.borrow().ended
    }

    pub fn stats(&self) -> EnvStats {
        let state = self.state.borrow();
        EnvStats {
            vars: state.vars.len(),
            ranges: state.ranges.len(),
            collections: state.collections,
            ended: state.ended,
        }
    }

    fn live(&self) -> Result<Ref<'_, EnvState>> {
        let state = self.state.borrow();
        if state.ended {
            return Err(Error::EnvEnded);
        }
        Ok(state)
    }

    fn live_mut(&self) -> Result<RefMut<'_, EnvState>> {
        let state = self.state.borrow_mut();
        if state.ended {
            return Err(Error::EnvEnded);
        }
        Ok(state)
    }
}

impl Drop for Env {
    fn drop(&mut self) {
        self.end();
    }
}

macro_rules! handle {
    ($name:ident, $array:ident, $field:ident, $what:literal) => {
        #[doc = concat!("Handle to one ", $what, " owned by an [`Env`].")]
        #[derive(Clone, Copy)]
        pub struct $name<'env> {
            id: usize,
            env: &'env Env,
        }

        impl<'env> $name<'env> {
            pub fn id(&self) -> usize {
                self.id
            }

            pub fn env(&self) -> &'env Env {
                self.env
            }

            pub fn bounds(&self) -> Result<Bounds> {
                Ok(self.env.live()?.$field[self.id].bounds)
            }

            pub fn lb(&self) -> Result<f64> {
                Ok(self.bounds()?.lb)
            }

            pub fn ub(&self) -> Result<f64> {
                Ok(self.bounds()?.ub)
            }

            pub fn set_bounds(&self, bounds: Bounds) -> Result<()> {
                let bounds = Bounds::new(bounds.lb, bounds.ub)?;
                self.env.live_mut()?.$field[self.id].bounds = bounds;
                Ok(())
            }

            pub fn name(&self) -> Result<Option<String>> {
                Ok(self.env.live()?.$field[self.id].name.clone())
            }

            pub fn set_name(&self, name: impl Into<String>) -> Result<()> {
                self.env.live_mut()?.$field[self.id].name = Some(name.into());
                Ok(())
            }
        }

        impl PartialEq for $name<'_> {
            fn eq(&self, other: &Self) -> bool {
                self.id == other.id && std::ptr::eq(self.env, other.env)
            }
        }

        impl Eq for $name<'_> {}

        impl fmt::Debug for $name<'_> {
            fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
                write!(f, "{}({})", stringify!($name), self.id)
            }
        }

        #[doc = concat!("One bulk allocation of ", $what, "s.")]
        #[derive(Debug)]
        pub struct $array<'env> {
            handles: Vec<$name<'env>>,
        }

        impl<'env> $array<'env> {
            pub fn len(&self) -> usize {
                self.handles.len()
            }

            pub fn is_empty(&self) -> bool {
                self.handles.is_empty()
            }

            pub fn iter(&self) -> std::slice::Iter<'_, $name<'env>> {
                self.handles.iter()
            }
        }

        impl<'env> Index<usize> for $array<'env> {
            type Output = $name<'env>;

            fn index(&self, index: usize) -> &Self::Output {
                &self.handles[index]
            }
        }
    };
}

handle!(NumVar, NumVarArray, vars, "decision variable");
handle!(Range, RangeArray, ranges, "constraint range");

/// A flat collection of handles that some environment allocates in one call.
///
/// Implementations borrow their environment for `'env`; the environment, not
/// the collection, decides when the underlying objects are finalized.
pub trait HandleCollection<'env>: Sized {
    type Env: ?Sized + 'env;
    type Handle;

    fn allocate(env: &'env Self::Env, len: usize, bounds: Bounds) -> Result<Self>;

    /// Bounds used by [`crate::VarTensor::new`].
    fn default_bounds(_env: &Self::Env) -> Bounds {
        Bounds::default()
    }

    fn handles(&self) -> &[Self::Handle];
}

impl<'env> HandleCollection<'env> for NumVarArray<'env> {
    type Env = Env;
    type Handle = NumVar<'env>;

    fn allocate(env: &'env Env, len: usize, bounds: Bounds) -> Result<Self> {
        env.num_var_array(len, bounds)
    }

    fn default_bounds(env: &Env) -> Bounds {
        env.config.default_bounds
    }

    fn handles(&self) -> &[NumVar<'env>] {
        &self.handles
    }
}

impl<'env> HandleCollection<'env> for RangeArray<'env> {
    type Env = Env;
    type Handle = Range<'env>;

    fn allocate(env: &'env Env, len: usize, bounds: Bounds) -> Result<Self> {
        env.range_array(len, bounds)
    }

    fn default_bounds(env: &Env) -> Bounds {
        env.config.default_bounds
    }

    fn handles(&self) -> &[Range<'env>] {
        &self.handles
    }
}
