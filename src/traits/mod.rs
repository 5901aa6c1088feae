pub mod dual_ops;
pub mod num_traits_impls;
