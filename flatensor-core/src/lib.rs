//! Flatensor stores N-dimensional data in a single contiguous block and reaches
//! any element with one offset computation instead of one pointer dereference
//! per dimension.
//!
//! The rank `D` is a const generic, so index tuples are `[usize; D]` and passing
//! the wrong number of indices is a compile error. The strides are inclusive
//! running products of the dimensions, and the first index of a tuple varies
//! fastest in memory.
//!
//! There are two containers sharing the same [`Layout`]:
//! - [`Tensor`] owns a `Vec<T>` of primitive elements.
//! - [`VarTensor`] holds one collection of handles allocated in bulk by an
//!   external environment, such as the decision variables of an [`Env`]. The
//!   environment stays responsible for finalizing them.
//!
//! Per-axis bounds are checked with `debug_assertions` or the `checked`
//! feature. Otherwise the hot path trusts its caller.
//!
//! ## What can you do with it?
//! ```
//! use flatensor_core::{Bounds, Env, NumVarArray, Tensor, VarTensor, R2};
//!
//! let mut t = Tensor::<f32, 2>::zeros_of::<R2<3, 4>>().unwrap();
//! t[[2, 3]] = 9.0;
//! assert_eq!(t.strides(), &[3, 12]);
//! assert_eq!(t.as_slice()[11], 9.0);
//!
//! let env = Env::new();
//! let x = VarTensor::<NumVarArray, 2>::with_bounds(&env, [3, 4], Bounds::upper(1.0).unwrap())
//!     .unwrap();
//! x[[1, 2]].set_name("x_1_2").unwrap();
//! assert_eq!(x[[1, 2]].ub().unwrap(), 1.0);
//! env.end();
//! ```

mod dtype;
pub mod env;
mod error;
mod layout;
mod shape;
mod tensor;

pub use dtype::{DType, RandDispatch};
pub use env::{
    Bounds, Env, EnvConfig, EnvStats, HandleCollection, NumVar, NumVarArray, Range, RangeArray,
};
pub use error::{Context, Error, Result};
pub use layout::Layout;
pub use shape::{accumulated_strides, element_count, Shape, R1, R2, R3, R4, R5, R6};
pub use tensor::{Tensor, VarTensor};
