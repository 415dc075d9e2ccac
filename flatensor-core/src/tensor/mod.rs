pub mod handle;
pub mod owned;

pub use handle::VarTensor;
pub use owned::Tensor;
