mod assignment;
pub mod formula;
mod problem;
mod solver;

#[cfg(test)]
mod brute_force;

#[derive(PartialEq, Eq, Clone, Debug)]
pub enum SatResult {
    Satisfiable(Model),
    Unsatisfiable,
}

impl SatResult {
    pub fn is_satisfiable(&self) -> bool {
        matches!(self, SatResult::Satisfiable(_))
    }

    pub fn model(&self) -> Option<&Model> {
        match self {
            SatResult::Satisfiable(model) => Some(model),
            SatResult::Unsatisfiable => None,
        }
    }
}

pub use assignment::Model;
pub use formula::{Atom, Clause, Formula, Literal};
pub use problem::{Problem, ProblemError};
pub use solver::{Solver, Stats};
