use crate::formula::Formula;
use crate::problem::{Problem, ProblemError};
use std::fs::File;
use std::io::{self, BufRead, BufReader, Read};
use std::path::Path;
use thiserror::Error;

/// Reads a DIMACS CNF formula. Clauses may span lines; a lone `0` is the empty clause.
/// Input after the number of clauses announced by the header is ignored.
pub fn parse<R: Read>(reader: R) -> Result<Formula, DimacsParseError> {
    let reader = BufReader::new(reader);

    let mut problem = Problem::new();
    let mut num_clauses = None;
    let mut clauses_read = 0;
    let mut clause = vec![];

    'lines: for line in reader.lines() {
        let line = line?;
        let mut line = line.split_whitespace().peekable();

        match line.peek() {
            Some(&"c") | None => continue,
            Some(&"%") => break,
            Some(&"p") => {
                let _ = line.next();

                if num_clauses.is_some() {
                    return Err(DimacsParseError::Format("duplicate 'p' line".into()));
                }
                if line.next() != Some("cnf") {
                    return Err(DimacsParseError::Format("missing 'cnf'".into()));
                }

                let num_atoms = line
                    .next()
                    .and_then(|c| usize::from_str_radix(c, 10).ok())
                    .ok_or_else(|| DimacsParseError::Format("invalid num_variables".into()))?;

                num_clauses = Some(
                    line.next()
                        .and_then(|c| usize::from_str_radix(c, 10).ok())
                        .ok_or_else(|| DimacsParseError::Format("invalid num_clauses".into()))?,
                );

                problem.initialize(num_atoms)?;
            }
            Some(_) => {
                let expected = num_clauses
                    .ok_or_else(|| DimacsParseError::Format("missing 'p' line before clauses".into()))?;
                if clauses_read >= expected {
                    break 'lines;
                }

                for x in line {
                    match parse_literal(x)? {
                        0 => {
                            problem.add_clause(clause.drain(..))?;
                            clauses_read += 1;
                            if clauses_read >= expected {
                                break 'lines;
                            }
                        }
                        l => clause.push(l),
                    }
                }
            }
        }
    }

    if num_clauses.is_none() {
        return Err(DimacsParseError::Format("missing 'p' line before clauses".into()));
    }
    if !clause.is_empty() {
        return Err(DimacsParseError::Format("unterminated clause at end of input".into()));
    }

    Ok(problem.into_formula()?)
}

pub fn parse_file<P: AsRef<Path>>(path: P) -> Result<Formula, DimacsParseError> {
    let file = File::open(path)?;
    parse(file)
}

fn parse_literal(s: &str) -> Result<isize, DimacsParseError> {
    isize::from_str_radix(s, 10).map_err(|_| DimacsParseError::Format(format!("invalid literal '{}'", s)))
}

#[derive(Debug, Error)]
pub enum DimacsParseError {
    #[error("i/o error: {0}")]
    Io(#[from] io::Error),
    #[error("invalid DIMACS input: {0}")]
    Format(String),
    #[error("invalid problem: {0}")]
    Problem(#[from] ProblemError),
}

#[cfg(test)]
mod tests {
    use crate::formula::{n, p, Clause};
    use crate::{SatResult, Solver};

    use super::*;

    fn clauses(f: &Formula) -> Vec<Clause> {
        f.clauses().cloned().collect()
    }

    #[test]
    fn parse_cnf_basic() {
        let cnf = "c  simple_v3_c2.cnf
c
p cnf 3 2
1 -3 0
2 3 -1 0";
        let f = parse(cnf.as_bytes()).expect("failed to parse");
        assert_eq!(f.atom_count(), 3);
        assert_eq!(f.clauses().count(), 2);

        assert_eq!(
            clauses(&f),
            vec![Clause::new(vec![p(1), n(3)]), Clause::new(vec![p(2), p(3), n(1)])]
        );
    }

    #[test]
    fn parse_clause_across_lines() {
        let cnf = "p cnf 4 3
1 -2
  3 0 -4 0
0
%
0
";
        let f = parse(cnf.as_bytes()).expect("failed to parse");
        assert_eq!(
            clauses(&f),
            vec![
                Clause::new(vec![p(1), n(2), p(3)]),
                Clause::new(vec![n(4)]),
                Clause::new(vec![]),
            ]
        );
    }

    #[test]
    fn stops_after_declared_clauses() {
        let cnf = "p cnf 2 1\n1 2 0\n-1 0\n";
        let f = parse(cnf.as_bytes()).expect("failed to parse");
        assert_eq!(f.num_clauses(), 1);
    }

    #[test]
    fn no_clauses_declared() {
        let cnf = "p cnf 2 0\n1 0\n-1 0\n";
        let f = parse(cnf.as_bytes()).expect("failed to parse");
        assert_eq!(f.num_clauses(), 0);

        // a trailing empty clause is ignored too, so the formula stays satisfiable
        let f = parse("p cnf 2 0\n0\n".as_bytes()).expect("failed to parse");
        assert_eq!(f.num_clauses(), 0);
        assert!(Solver::new(&f).solve().is_satisfiable());
    }

    #[test]
    fn missing_header() {
        let err = parse("1 2 0\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DimacsParseError::Format(_)));

        let err = parse("c nothing here\n".as_bytes()).unwrap_err();
        assert!(matches!(err, DimacsParseError::Format(_)));
    }

    #[test]
    fn bad_tokens() {
        assert!(matches!(
            parse("p dnf 2 1\n".as_bytes()),
            Err(DimacsParseError::Format(_))
        ));
        assert!(matches!(
            parse("p cnf 2 1\n1 x 0\n".as_bytes()),
            Err(DimacsParseError::Format(_))
        ));
        assert!(matches!(
            parse("p cnf 2 1\n1 2\n".as_bytes()),
            Err(DimacsParseError::Format(_))
        ));
    }

    #[test]
    fn atom_out_of_range() {
        let err = parse("p cnf 2 1\n1 -3 0\n".as_bytes()).unwrap_err();
        match err {
            DimacsParseError::Problem(e) => assert_eq!(
                e,
                ProblemError::AtomOutOfRange {
                    literal: -3,
                    atom_count: 2
                }
            ),
            e => panic!("unexpected error {}", e),
        }
    }

    #[test]
    fn parse_from_file() {
        use std::io::Write;
        use tempfile::NamedTempFile;

        let mut file = NamedTempFile::new().unwrap();
        writeln!(file, "p cnf 2 2").unwrap();
        writeln!(file, "-1 2 0").unwrap();
        writeln!(file, "1 0").unwrap();
        file.flush().unwrap();

        let f = parse_file(file.path()).expect("failed to parse");
        let result = Solver::new(&f).solve();
        assert_eq!(result.model().map(|m| m.values().to_vec()), Some(vec![true, true]));

        assert!(matches!(
            parse_file(file.path().with_extension("missing")),
            Err(DimacsParseError::Io(_))
        ));
    }

    #[test]
    fn solve_cnf_quinn() {
        let cnf = "c  quinn.cnf
c
p cnf 16 18
  1    2  0
 -2   -4  0
  3    4  0
 -4   -5  0
  5   -6  0
  6   -7  0
  6    7  0
  7  -16  0
  8   -9  0
 -8  -14  0
  9   10  0
  9  -10  0
-10  -11  0
 10   12  0
 11   12  0
 13   14  0
 14  -15  0
 15   16  0
";

        let f = parse(cnf.as_bytes()).expect("failed to parse");

        let mut solver = Solver::new(&f);
        let r = solver.solve();

        assert!(r.is_satisfiable());
        assert!(r.model().unwrap().satisfies(&f));
    }

    #[test]
    fn solve_cnf_unsat() {
        let cnf = "p cnf 2 4\n1 2 0\n-1 2 0\n1 -2 0\n-1 -2 0\n";
        let f = parse(cnf.as_bytes()).expect("failed to parse");
        assert_eq!(Solver::new(&f).solve(), SatResult::Unsatisfiable);
    }
}
