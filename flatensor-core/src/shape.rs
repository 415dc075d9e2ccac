use crate::{Error, Result};

/// A shape known at compile time, usable wherever runtime dimensions are accepted.
pub trait Shape<const D: usize> {
    fn dims() -> [usize; D];

    fn element_count() -> usize {
        Self::dims().iter().product()
    }
}

macro_rules! shape {
    (($($C:ident),*), ($($N:tt),*), $name:ident, $rank:literal) => {
        pub struct $name<$($C $N: usize, )*>;

        impl<$($C $N: usize, )*> Shape<$rank> for $name<$({ $N }, )*> {
            fn dims() -> [usize; $rank] {
                [$($N, )*]
            }
        }
    };
}

shape!((const), (A), R1, 1);
shape!((const, const), (A, B), R2, 2);
shape!((const, const, const), (A, B, C), R3, 3);
shape!((const, const, const, const), (A, B, C, D), R4, 4);
shape!((const, const, const, const, const), (A, B, C, D, E), R5, 5);
shape!((const, const, const, const, const, const), (A, B, C, D, E, F), R6, 6);

/// Inclusive running product of `dims`: `strides[0] = dims[0]` and
/// `strides[i] = strides[i - 1] * dims[i]`.
///
/// The last stride is the element count. Axes of size zero and products that
/// overflow `usize` are rejected.
pub fn accumulated_strides<const D: usize>(dims: [usize; D]) -> Result<[usize; D]> {
    const { assert!(D > 0, "tensors must have at least one dimension") };

    let mut strides = [0usize; D];
    let mut acc = 1usize;
    for (axis, (&dim, stride)) in dims.iter().zip(strides.iter_mut()).enumerate() {
        if dim == 0 {
            return Err(Error::ZeroDim { axis });
        }
        acc = acc.checked_mul(dim).ok_or_else(|| Error::ShapeOverflow {
            dims: dims.to_vec(),
        })?;
        *stride = acc;
    }
    Ok(strides)
}

/// Total number of elements described by `dims`.
pub fn element_count<const D: usize>(dims: [usize; D]) -> Result<usize> {
    Ok(accumulated_strides(dims)?[D - 1])
}
