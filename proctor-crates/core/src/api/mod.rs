pub mod outputs;
pub(crate) mod solver;

pub use solver::solve;
pub use solver::Solver;
pub use solver::SolverOptions;
pub use solver::DEFAULT_INVIGILATOR_POOL_SIZE;
