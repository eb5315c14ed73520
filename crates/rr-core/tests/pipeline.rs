//! End-to-end: raw resume text → profile → ranked catalog → recommendation.

use rr_core::catalog::{parse_catalog, RawJobRecord};
use rr_core::extraction::FieldExtractionPipeline;
use rr_core::matching::MatcherKind;
use rr_core::recommend::recommend_jobs;
use rr_core::EducationLevel;

fn pipeline() -> FieldExtractionPipeline {
    rr_core::logging::init("pipeline-tests");
    FieldExtractionPipeline::new()
}

const RESUME: &str = "\
Jane Doe
jane.doe@example.com | +1 555 123 4567

Education
Bachelor of Science in Data Science and Analytics, Harvard University
GPA: 3.75

Work Experience
Data Analyst Intern, Jan 2020 - Dec 2020
Research Assistant, Jan 2021 - Jun 2021

Projects
Built dashboards with Python, SQL and Tableau.
Strong communication and teamwork across departments.
";

fn raw_job(
    title: &str,
    industry: &str,
    hard: &str,
    soft: &str,
    field: &str,
    education: &str,
    years: f64,
) -> RawJobRecord {
    serde_json::from_value(serde_json::json!({
        "title": title,
        "industry": industry,
        "hard_skills": hard,
        "soft_skills": soft,
        "required_degree_field": field,
        "required_education": education,
        "years_experience_required": years,
    }))
    .unwrap()
}

fn catalog() -> Vec<rr_core::JobPosting> {
    let records = vec![
        raw_job(
            "Data Analyst",
            "Finance",
            "['Python', 'SQL', 'Tableau']",
            "['Communication', 'Teamwork']",
            "Data Science",
            "Bachelor",
            1.0,
        ),
        raw_job(
            "Machine Learning Engineer",
            "Tech",
            "['Python', 'PyTorch', 'Machine Learning']",
            "['Collaboration']",
            "Computer Science",
            "Master",
            3.0,
        ),
        raw_job(
            "Frontend Developer",
            "Media",
            r#"["JavaScript", "React", "CSS"]"#,
            r#"["Creativity"]"#,
            "Computer Science",
            "Diploma",
            1.0,
        ),
        raw_job(
            "Accountant",
            "Finance",
            "['Excel']",
            "['Attention to detail']",
            "Accounting",
            "Bachelor",
            2.0,
        ),
        raw_job(
            "Warehouse Supervisor",
            "Logistics",
            "[]",
            "['Leadership']",
            "Any",
            "High School",
            5.0,
        ),
    ];
    parse_catalog(&records).unwrap()
}

#[test]
fn extraction_builds_the_expected_profile() {
    let pipeline = pipeline();
    let profile = pipeline.extract(RESUME).unwrap();

    assert_eq!(profile.name, "Jane Doe");
    assert_eq!(profile.emails, vec!["jane.doe@example.com"]);
    assert_eq!(profile.contact, "+1 555 123 4567");
    assert_eq!(profile.education_level, EducationLevel::Bachelor);
    assert_eq!(profile.degree_field, "Data Science and Analytics");
    assert_eq!(profile.university.as_deref(), Some("Harvard University"));
    assert_eq!(profile.gpa_or_classification.as_deref(), Some("3.75"));
    // Jan-Dec 2020 (12) + Jan-Jun 2021 (6) = 18 months
    assert_eq!(profile.work_experience_years, 1.5);
    assert!(profile.hard_skills.contains("python"));
    assert!(profile.hard_skills.contains("sql"));
    assert!(profile.hard_skills.contains("tableau"));
    assert!(profile.soft_skills.contains("communication"));
    assert!(profile.soft_skills.contains("teamwork"));
}

#[test]
fn weighted_matcher_recommends_the_aligned_job_first() {
    let pipeline = pipeline();
    let profile = pipeline.extract(RESUME).unwrap();

    let record = recommend_jobs(&profile, &catalog(), MatcherKind::Weighted, 5);

    assert_eq!(record.name, "Jane Doe");
    assert_eq!(record.first_recommendation.as_deref(), Some("Data Analyst"));
    assert!(record.fifth_recommendation.is_some());
}

#[test]
fn weighted_ranking_is_reproducible() {
    let pipeline = pipeline();
    let profile = pipeline.extract(RESUME).unwrap();
    let jobs = catalog();

    let a = recommend_jobs(&profile, &jobs, MatcherKind::Weighted, 5);
    let b = recommend_jobs(&profile, &jobs, MatcherKind::Weighted, 5);

    assert_eq!(a, b);
}

#[test]
fn cluster_matcher_is_reproducible_and_capped_at_five() {
    let pipeline = pipeline();
    let profile = pipeline.extract(RESUME).unwrap();
    let jobs = catalog();

    let a = recommend_jobs(&profile, &jobs, MatcherKind::Cluster, 5);
    let b = recommend_jobs(&profile, &jobs, MatcherKind::Cluster, 5);

    assert_eq!(a, b);
    assert_eq!(a.name, "Jane Doe");
    // The cluster restriction may fill fewer than five slots; the filled
    // ones must be a prefix.
    let slots = [
        &a.first_recommendation,
        &a.second_recommendation,
        &a.third_recommendation,
        &a.fourth_recommendation,
        &a.fifth_recommendation,
    ];
    let mut seen_none = false;
    for slot in slots {
        if slot.is_none() {
            seen_none = true;
        } else {
            assert!(!seen_none, "filled slot after an empty one");
        }
    }
}

#[test]
fn requesting_more_than_available_leaves_slots_null() {
    let pipeline = pipeline();
    let profile = pipeline.extract(RESUME).unwrap();
    let jobs = &catalog()[..2];

    let record = recommend_jobs(&profile, jobs, MatcherKind::Weighted, 5);

    assert!(record.first_recommendation.is_some());
    assert!(record.second_recommendation.is_some());
    assert!(record.third_recommendation.is_none());
    assert!(record.fourth_recommendation.is_none());
    assert!(record.fifth_recommendation.is_none());
}
