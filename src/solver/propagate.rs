use super::ClauseSet;
use crate::assignment::{Assignment, Value};
use crate::formula::{Clause, Literal};
use std::rc::Rc;

/// Simplifies `clauses` after the atom of `literal` has been bound in `assignment`.
///
/// A clause with an occurrence of the atom that is now true is dropped. Otherwise every
/// occurrence of the atom is false and is removed from the clause, which may leave an
/// empty clause behind; that clause stays in the result as the conflict marker.
/// Clauses that don't mention the atom are shared with the input, which is left untouched.
pub(crate) fn propagate(literal: Literal, clauses: &[Rc<Clause>], assignment: &Assignment) -> ClauseSet {
    let atom = literal.atom();
    debug_assert_ne!(assignment.value(atom), Value::Unbound);

    let mut simplified = Vec::with_capacity(clauses.len());
    for clause in clauses {
        if !clause.mentions(atom) {
            simplified.push(Rc::clone(clause));
            continue;
        }
        let satisfied = clause
            .literals()
            .any(|l| l.atom() == atom && assignment.literal_value(l) == Value::True);
        if !satisfied {
            let remaining = clause.literals().filter(|l| l.atom() != atom).copied();
            simplified.push(Rc::new(Clause::new(remaining)));
        }
    }
    simplified
}

/// The literal of the first unit clause, scanning in clause order.
pub(crate) fn next_unit_clause(clauses: &[Rc<Clause>]) -> Option<Literal> {
    clauses.iter().find_map(|clause| clause.unit())
}
