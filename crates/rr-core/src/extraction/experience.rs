//! Work-experience duration: sum of "Month Year – Month Year" ranges found
//! inside the work/experience section of the resume.

use lazy_static::lazy_static;
use regex::Regex;
use tracing::warn;

lazy_static! {
    // "Sep 2024 – Jan 2025", "September 2024 - January 2025"
    static ref DATE_RANGE_RE: Regex =
        Regex::new(r"([A-Za-z]+)\s+(\d{4})\s*[-–]\s*([A-Za-z]+)\s+(\d{4})").unwrap();
}

/// Total years of work experience, rounded to one decimal place.
///
/// The text segment between a work/experience heading and the next
/// education/project heading is scanned for date ranges; each range
/// contributes an inclusive month count. Ranges that fail to parse are
/// skipped, never aborting the run.
pub fn extract_work_experience_years(text: &str) -> f64 {
    let section = work_section(text);

    let mut total_months: i64 = 0;
    for caps in DATE_RANGE_RE.captures_iter(&section) {
        let parsed = (
            month_ordinal(&caps[1]),
            caps[2].parse::<i64>().ok(),
            month_ordinal(&caps[3]),
            caps[4].parse::<i64>().ok(),
        );

        match parsed {
            (Some(sm), Some(sy), Some(em), Some(ey)) => {
                // Inclusive month count: Jan–Dec of one year is 12.
                total_months += (ey * 12 + em) - (sy * 12 + sm) + 1;
            }
            _ => {
                warn!(range = &caps[0], "skipping unparseable date range");
            }
        }
    }

    let years = total_months as f64 / 12.0;
    ((years * 10.0).round() / 10.0).max(0.0)
}

/// Lines between a work/experience heading and the next education/project
/// heading.
fn work_section(text: &str) -> String {
    let mut section = String::new();
    let mut in_work_section = false;

    for line in text.lines() {
        let lower = line.to_lowercase();
        if !in_work_section {
            if lower.contains("work") || lower.contains("experience") {
                in_work_section = true;
            }
            continue;
        }
        if lower.trim().starts_with("education") || lower.contains("project") {
            break;
        }
        section.push_str(line);
        section.push('\n');
    }

    section
}

fn month_ordinal(name: &str) -> Option<i64> {
    const MONTHS: [&str; 12] = [
        "jan", "feb", "mar", "apr", "may", "jun", "jul", "aug", "sep", "oct", "nov", "dec",
    ];

    let lower = name.to_lowercase();
    MONTHS
        .iter()
        .position(|prefix| lower.starts_with(prefix))
        .map(|idx| idx as i64 + 1)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn sums_inclusive_months_across_ranges() {
        let text = "Work Experience\n\
                    Analyst Intern, Jan 2020 - Dec 2020\n\
                    Data Intern, Jan 2021 - Jun 2021\n\
                    Education\n\
                    Bachelor of Science";
        // 12 + 6 months = 1.5 years
        assert_eq!(extract_work_experience_years(text), 1.5);
    }

    #[test]
    fn accepts_full_month_names_and_en_dashes() {
        let text = "Experience\nSeptember 2024 – January 2025\n";
        // Sep..Jan inclusive = 5 months
        assert_eq!(extract_work_experience_years(text), 0.4);
    }

    #[test]
    fn ranges_outside_the_work_section_are_ignored() {
        let text = "Education\nJan 2019 - Dec 2019 exchange semester\n";
        assert_eq!(extract_work_experience_years(text), 0.0);
    }

    #[test]
    fn unparseable_ranges_are_skipped() {
        let text = "Work Experience\nFrob 2020 - Dec 2020\nJan 2021 - Mar 2021\n";
        // Only the 3-month range counts.
        assert_eq!(extract_work_experience_years(text), 0.3);
    }

    #[test]
    fn no_section_means_zero_years() {
        assert_eq!(extract_work_experience_years("no dates at all"), 0.0);
    }

    #[test]
    fn month_names_parse_by_prefix() {
        assert_eq!(month_ordinal("Jan"), Some(1));
        assert_eq!(month_ordinal("september"), Some(9));
        assert_eq!(month_ordinal("Frob"), None);
    }
}
