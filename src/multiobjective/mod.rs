//! Multi-objective model checking by weighted refinement.
//!
//! Given a Markov decision process and several expected reward
//! objectives, the [`MultiObjectiveEngine`] approximates the set of
//! achievable objective value vectors from above and below, and uses
//! the approximations to answer achievability, numerical and Pareto
//! queries.
//!
//! Internally every objective is oriented for maximization: minimized
//! objectives have their rewards and thresholds negated.  Points and
//! polytopes in a [`MultiObjectiveHelperReturnType`] live in this
//! oriented space, see
//! [`to_original_orientation`](MultiObjectiveHelperReturnType::to_original_orientation).

mod engine;
mod error;
mod model;
mod policy;
mod query;
mod returntype;

pub use engine::*;
pub use error::*;
pub use model::*;
pub use policy::*;
pub use query::*;
pub use returntype::*;
