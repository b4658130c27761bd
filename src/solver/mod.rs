mod propagate;
mod pure;

pub(crate) use propagate::{next_unit_clause, propagate};
pub(crate) use pure::find_pure_literals;

use crate::assignment::{Assignment, Model};
use crate::formula::{Atom, Clause, Formula, Literal};
use crate::SatResult;
use log::{debug, trace};
use std::fmt::{self, Display, Formatter};
use std::rc::Rc;

/// The clauses still to be satisfied at a search node. Clauses are shared between a node
/// and its descendants until propagation has to rewrite them.
pub(crate) type ClauseSet = Vec<Rc<Clause>>;

pub(crate) fn clause_set(formula: &Formula) -> ClauseSet {
    formula.clauses().cloned().map(Rc::new).collect()
}

/// Counters for the most recent call to [`Solver::solve`].
#[derive(Clone, Copy, Default, PartialEq, Eq, Debug)]
pub struct Stats {
    pub decisions: usize,
    pub pure_literals: usize,
    pub unit_clauses: usize,
    pub conflicts: usize,
    pub max_depth: usize,
}

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Reason {
    Decision,
    Pure,
    Unit,
}

impl Display for Reason {
    fn fmt(&self, f: &mut Formatter) -> fmt::Result {
        f.write_str(match self {
            Reason::Decision => "decision",
            Reason::Pure => "pure",
            Reason::Unit => "unit",
        })
    }
}

/// A search node waiting to be expanded. `decision` is bound and propagated first.
struct Branch {
    clauses: ClauseSet,
    assignment: Assignment,
    decision: Option<Literal>,
    depth: usize,
}

enum Outcome {
    Satisfied(Model),
    Conflict,
    Split {
        atom: Atom,
        clauses: ClauseSet,
        assignment: Assignment,
    },
}

/// Depth-first Davis-Putnam search with pure-literal and unit-clause simplification.
pub struct Solver {
    atom_count: usize,
    clauses: ClauseSet,
    stats: Stats,
}

impl Solver {
    pub fn new(formula: &Formula) -> Self {
        Self {
            atom_count: formula.atom_count(),
            clauses: clause_set(formula),
            stats: Stats::default(),
        }
    }

    pub fn stats(&self) -> Stats {
        self.stats
    }

    /// Searches for a model. Pending branches live on an explicit stack: the false branch
    /// of a node sits beneath its true branch, so the true branch is always explored first
    /// and the first model found ends the search.
    pub fn solve(&mut self) -> SatResult {
        self.stats = Stats::default();
        let mut stack = vec![Branch {
            clauses: self.clauses.clone(),
            assignment: Assignment::new(self.atom_count),
            decision: None,
            depth: 0,
        }];

        while let Some(branch) = stack.pop() {
            let depth = branch.depth;
            match self.expand(branch) {
                Outcome::Satisfied(model) => {
                    debug!("satisfiable at depth {}, {:?}", depth, self.stats);
                    return SatResult::Satisfiable(model);
                }
                Outcome::Conflict => {
                    self.stats.conflicts += 1;
                    debug!("conflict at depth {}, backtracking", depth);
                }
                Outcome::Split {
                    atom,
                    clauses,
                    assignment,
                } => {
                    stack.push(Branch {
                        clauses: clauses.clone(),
                        assignment: assignment.clone(),
                        decision: Some(Literal::Negative(atom)),
                        depth: depth + 1,
                    });
                    stack.push(Branch {
                        clauses,
                        assignment,
                        decision: Some(Literal::Positive(atom)),
                        depth: depth + 1,
                    });
                }
            }
        }

        debug!("unsatisfiable, {:?}", self.stats);
        SatResult::Unsatisfiable
    }

    /// Applies the branch's decision, simplifies to a fixpoint, and reports whether the
    /// node is solved, failed, or needs to split on an atom.
    fn expand(&mut self, branch: Branch) -> Outcome {
        let Branch {
            mut clauses,
            mut assignment,
            decision,
            depth,
        } = branch;
        self.stats.max_depth = self.stats.max_depth.max(depth);

        if let Some(literal) = decision {
            self.stats.decisions += 1;
            clauses = self.bind(literal, Reason::Decision, depth, &clauses, &mut assignment);
        }

        loop {
            if clauses.is_empty() {
                return Outcome::Satisfied(assignment.complete());
            }
            if clauses.iter().any(|c| c.is_empty()) {
                return Outcome::Conflict;
            }

            let forced = if let Some(&literal) = find_pure_literals(&clauses, self.atom_count).first() {
                self.stats.pure_literals += 1;
                Some((literal, Reason::Pure))
            } else if let Some(literal) = next_unit_clause(&clauses) {
                self.stats.unit_clauses += 1;
                Some((literal, Reason::Unit))
            } else {
                None
            };

            match forced {
                Some((literal, reason)) => {
                    clauses = self.bind(literal, reason, depth, &clauses, &mut assignment);
                }
                None => break,
            }
        }

        // Every atom left in a non-empty clause set is unbound, so there is one to split on.
        match assignment.first_unbound() {
            Some(atom) => Outcome::Split {
                atom,
                clauses,
                assignment,
            },
            None => Outcome::Conflict,
        }
    }

    fn bind(
        &self,
        literal: Literal,
        reason: Reason,
        depth: usize,
        clauses: &[Rc<Clause>],
        assignment: &mut Assignment,
    ) -> ClauseSet {
        trace!("{} {} at depth {}", reason, literal, depth);
        assignment.assign(literal);
        propagate(literal, clauses, assignment)
    }
}
