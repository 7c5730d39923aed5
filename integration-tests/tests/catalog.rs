use airco_textbook::{TextbookError, catalog, find};

#[test]
fn every_problem_solves() -> Result<(), TextbookError> {
    for problem in catalog() {
        let report = problem.run()?;
        assert!(!report.entries.is_empty(), "{} reported nothing", problem.name);
        assert!(
            report.entries.iter().all(|entry| !entry.label.is_empty()),
            "{} has an unlabeled entry",
            problem.name
        );
    }
    Ok(())
}

#[test]
fn problems_are_found_by_name() -> Result<(), TextbookError> {
    assert_eq!(find("cav_design")?.name, "cav_design");
    assert!(matches!(
        find("cav-design"),
        Err(TextbookError::UnknownProblem(name)) if name == "cav-design"
    ));
    Ok(())
}
