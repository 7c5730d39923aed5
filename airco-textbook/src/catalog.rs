use crate::{Report, TextbookError, problems};

/// A worked problem that can be run by name.
#[derive(Debug, Clone, Copy)]
pub struct Problem {
    pub name: &'static str,
    pub description: &'static str,
    run: fn() -> Result<Report, TextbookError>,
}

impl Problem {
    /// Works the problem.
    ///
    /// # Errors
    ///
    /// Returns the first error raised while solving.
    pub fn run(&self) -> Result<Report, TextbookError> {
        tracing::debug!(problem = self.name, "running worked problem");
        (self.run)()
    }
}

/// Returns every worked problem, in textbook order.
#[must_use]
pub fn catalog() -> &'static [Problem] {
    const PROBLEMS: &[Problem] = &[
        Problem {
            name: "airco_proc_01",
            description: "Heating, cooling, evaporative cooling, humidification, and mixing",
            run: problems::airco_proc_01,
        },
        Problem {
            name: "airco_proc_02",
            description: "Space conditioning with mixing, coils, reheat, bypass, and humidification",
            run: problems::airco_proc_02,
        },
        Problem {
            name: "cav_design",
            description: "Single-zone CAV design for summer, high latent, and winter peaks",
            run: problems::cav_design,
        },
        Problem {
            name: "cav_vav_part_load",
            description: "Single-zone system at part load as CAV with reheat and as VAV",
            run: problems::cav_vav_part_load,
        },
        Problem {
            name: "vav_multizone_design",
            description: "Two-zone VAV summer and winter design, step by step",
            run: problems::vav_multizone_design,
        },
        Problem {
            name: "vav_multizone_system",
            description: "Two-zone VAV summer and winter design with VavSystem",
            run: problems::vav_multizone_system,
        },
        Problem {
            name: "vav_multizone_analysis",
            description: "Two-zone VAV part-load analysis with VavPartLoad",
            run: problems::vav_multizone_analysis,
        },
    ];
    PROBLEMS
}

/// Looks up a problem by name.
///
/// # Errors
///
/// Returns [`TextbookError::UnknownProblem`] if no problem has that name.
pub fn find(name: &str) -> Result<&'static Problem, TextbookError> {
    catalog()
        .iter()
        .find(|problem| problem.name == name)
        .ok_or_else(|| TextbookError::UnknownProblem(name.to_owned()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn names_are_unique() {
        let mut names: Vec<_> = catalog().iter().map(|p| p.name).collect();
        names.sort_unstable();
        names.dedup();
        assert_eq!(names.len(), catalog().len());
    }

    #[test]
    fn finds_by_name() {
        assert_eq!(find("cav_design").map(|p| p.name), Ok("cav_design"));
        assert_eq!(
            find("nope").map(|p| p.name),
            Err(TextbookError::UnknownProblem("nope".into()))
        );
    }
}
