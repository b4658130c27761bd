use crate::formula::Formula;

// Exhaustive enumeration, used as an oracle by the property tests.
// Returns the first satisfying assignment, indexed by `atom.index()`.
pub(crate) fn solve_brute_force(f: &Formula) -> Option<Vec<bool>> {
    let num_atoms = f.atom_count();
    assert!(num_atoms <= 15); // just for safety

    fn value_for(assignment: u32, index: usize) -> bool {
        assignment & (1 << index) != 0
    }

    'search: for assignment in 0..2u32.pow(num_atoms as u32) {
        'clauses: for clause in f.clauses() {
            for literal in clause.literals() {
                if value_for(assignment, literal.atom().index()) == literal.is_positive() {
                    // this clause is satisfied, let's go to the next one
                    continue 'clauses;
                }
            }
            // if we got here, this clause was not satisfied, so this assignment is bogus
            continue 'search;
        }
        // if we got here, every clause was satisfied
        return Some((0..num_atoms).map(|i| value_for(assignment, i)).collect());
    }
    // no assignment is valid
    None
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::formula::{formula, n, p};

    #[test]
    fn solve_bcp_sat() {
        let f = formula(2, vec![vec![p(1), p(2)], vec![n(1)]]);
        assert_eq!(solve_brute_force(&f), Some(vec![false, true]));
    }

    #[test]
    fn solve_bcp_unsat() {
        let f = formula(2, vec![vec![p(1), p(2)], vec![n(1)], vec![n(2)]]);
        assert_eq!(solve_brute_force(&f), None);
    }

    #[test]
    fn empty_clause_unsat() {
        let f = formula(1, vec![vec![]]);
        assert_eq!(solve_brute_force(&f), None);
    }

    #[test]
    fn empty_formula_sat() {
        let f = formula(3, vec![]);
        assert_eq!(solve_brute_force(&f), Some(vec![false, false, false]));
    }
}
