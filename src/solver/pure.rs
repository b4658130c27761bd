use crate::formula::{Atom, Clause, Literal};
use std::rc::Rc;

#[derive(Clone, Copy, PartialEq, Eq, Debug)]
enum Polarity {
    Absent,
    Positive,
    Negative,
    Mixed,
}

/// Every atom occurring in `clauses` with a single polarity, as the literal of that
/// polarity, in ascending atom order.
pub(crate) fn find_pure_literals(clauses: &[Rc<Clause>], atom_count: usize) -> Vec<Literal> {
    let mut polarities = vec![Polarity::Absent; atom_count];
    for clause in clauses {
        for literal in clause.literals() {
            let polarity = &mut polarities[literal.atom().index()];
            *polarity = match (*polarity, literal.is_positive()) {
                (Polarity::Absent, true) | (Polarity::Positive, true) => Polarity::Positive,
                (Polarity::Absent, false) | (Polarity::Negative, false) => Polarity::Negative,
                _ => Polarity::Mixed,
            };
        }
    }

    polarities
        .iter()
        .enumerate()
        .filter_map(|(i, polarity)| match polarity {
            Polarity::Positive => Some(Literal::Positive(Atom(i + 1))),
            Polarity::Negative => Some(Literal::Negative(Atom(i + 1))),
            Polarity::Absent | Polarity::Mixed => None,
        })
        .collect()
}
