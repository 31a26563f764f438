pub mod domains;
pub mod propagation;
pub(crate) mod search;
