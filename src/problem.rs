use crate::formula::{Clause, Formula, Literal};
use crate::solver::Solver;
use crate::SatResult;
use thiserror::Error;

/// Malformed input to a [`Problem`]. These are raised before any search starts.
#[derive(Debug, Error, PartialEq, Eq)]
pub enum ProblemError {
    #[error("atom count must be positive")]
    ZeroAtoms,
    #[error("problem is already initialized with {0} atoms")]
    AlreadyInitialized(usize),
    #[error("problem used before initialize")]
    NotInitialized,
    #[error("literal 0 does not name an atom")]
    ZeroLiteral,
    #[error("literal {literal} references an atom outside 1..={atom_count}")]
    AtomOutOfRange { literal: isize, atom_count: usize },
}

/// Builds a formula clause by clause, then solves it.
///
/// ```
/// use dpsat::{Problem, SatResult};
///
/// let mut problem = Problem::new();
/// problem.initialize(2).unwrap();
/// problem.add_clause(vec![1, 2]).unwrap();
/// problem.add_clause(vec![-1]).unwrap();
/// match problem.run().unwrap() {
///     SatResult::Satisfiable(model) => assert_eq!(model.values(), &[false, true]),
///     SatResult::Unsatisfiable => unreachable!(),
/// }
/// ```
#[derive(Default)]
pub struct Problem {
    formula: Option<Formula>,
}

impl Problem {
    pub fn new() -> Self {
        Self::default()
    }

    /// Prepares an empty formula over atoms `1..=atom_count`. Must be called exactly once:
    /// a second call is rejected with [`ProblemError::AlreadyInitialized`] and leaves the
    /// formula built so far untouched.
    pub fn initialize(&mut self, atom_count: usize) -> Result<(), ProblemError> {
        if let Some(formula) = &self.formula {
            return Err(ProblemError::AlreadyInitialized(formula.atom_count()));
        }
        if atom_count == 0 {
            return Err(ProblemError::ZeroAtoms);
        }
        self.formula = Some(Formula::new(atom_count));
        Ok(())
    }

    /// Appends one clause, given as non-zero signed literals. An empty clause is accepted
    /// and makes the problem unsatisfiable.
    pub fn add_clause(&mut self, literals: impl IntoIterator<Item = isize>) -> Result<(), ProblemError> {
        let formula = self.formula.as_mut().ok_or(ProblemError::NotInitialized)?;
        let atom_count = formula.atom_count();
        let clause = literals
            .into_iter()
            .map(|x| {
                let literal = Literal::from_signed(x).ok_or(ProblemError::ZeroLiteral)?;
                if literal.atom().0 > atom_count {
                    return Err(ProblemError::AtomOutOfRange { literal: x, atom_count });
                }
                Ok(literal)
            })
            .collect::<Result<Vec<_>, _>>()?;
        formula.push(Clause::new(clause));
        Ok(())
    }

    pub fn formula(&self) -> Result<&Formula, ProblemError> {
        self.formula.as_ref().ok_or(ProblemError::NotInitialized)
    }

    pub fn into_formula(self) -> Result<Formula, ProblemError> {
        self.formula.ok_or(ProblemError::NotInitialized)
    }

    /// Decides the formula. Unsatisfiability is an `Ok` outcome.
    pub fn run(&self) -> Result<SatResult, ProblemError> {
        let formula = self.formula()?;
        Ok(Solver::new(formula).solve())
    }
}
