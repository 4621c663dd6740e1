//! Algebra-parametrized traversals over indexed storage.

/// derivatives on a regular grid
pub mod finite_difference;
/// repeated scaling
pub mod scale_helper;
/// element-wise tolerance comparison
pub mod sequences_similar;
/// summing over a pair of equal-extent axes
pub mod tensor_contract;
/// all products of two tensors
pub mod tensor_outer_product;
/// element-wise maps and zips
pub mod transform;

pub use finite_difference::finite_difference;
pub use sequences_similar::sequences_similar;
pub use tensor_contract::tensor_contract;
pub use tensor_outer_product::tensor_outer_product;
pub use transform::{fixed_transform2, transform2, transform3};
