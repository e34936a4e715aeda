use sweepfield_core::{LineByLineSolver, NeighbourhoodSolver, Solver};

pub type SolverFactory = fn() -> Box<dyn Solver>;

const SOLVERS: &[(&str, SolverFactory)] = &[
    ("line-by-line", line_by_line),
    ("neighbourhood", neighbourhood),
];

fn line_by_line() -> Box<dyn Solver> {
    Box::new(LineByLineSolver)
}

fn neighbourhood() -> Box<dyn Solver> {
    Box::new(NeighbourhoodSolver::new())
}

/// Finds a built-in solver by the name used on the command line.
pub fn lookup_solver(name: &str) -> Option<SolverFactory> {
    SOLVERS
        .iter()
        .find(|(known, _)| known.eq_ignore_ascii_case(name))
        .map(|&(_, factory)| factory)
}

pub fn solver_names() -> impl Iterator<Item = &'static str> {
    SOLVERS.iter().map(|&(name, _)| name)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn every_name_resolves() {
        for name in solver_names() {
            let factory = lookup_solver(name).unwrap();
            assert_eq!(factory().name(), name);
        }
    }

    #[test]
    fn lookup_ignores_case() {
        assert!(lookup_solver("Line-By-Line").is_some());
        assert!(lookup_solver("oracle").is_none());
    }
}
