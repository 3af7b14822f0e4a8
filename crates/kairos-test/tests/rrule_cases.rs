include!(concat!(env!("CARGO_MANIFEST_DIR"), "/tests/rrule_cases_data/mod.rs"));

/// ## Summary
/// Every RFC 5545 recurrence example expands to the listed instances.
#[test_log::test]
fn rrule_cases_rfc5545() {
    for case in rrule_cases() {
        assert_case(&case);
    }
}

#[test]
fn rrule_cases_have_unique_names() {
    let cases = rrule_cases();
    let mut names: Vec<&str> = cases.iter().map(|case| case.name).collect();
    names.sort_unstable();
    names.dedup();
    assert_eq!(names.len(), cases.len());
}
