//! Job board: a fixed catalog of local openings, searched by keyword and
//! ordered so that openings near the user come first.

pub mod handlers;

use serde::Serialize;

/// Openings returned by default, and the step for each "load more".
pub const PAGE_SIZE: usize = 6;
pub const MAX_LIMIT: usize = 60;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
pub enum JobType {
    Internship,
    #[serde(rename = "Part-time")]
    PartTime,
    #[serde(rename = "Full-time")]
    FullTime,
    Temporary,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Job {
    pub id: &'static str,
    pub title: &'static str,
    pub company: &'static str,
    pub location: &'static str,
    pub description: &'static str,
    #[serde(rename = "type")]
    pub job_type: JobType,
}

pub static JOB_CATALOG: &[Job] = &[
    Job {
        id: "pune-swe",
        title: "Software Engineer Intern",
        company: "Tech Solutions Pvt. Ltd.",
        location: "Pune, Maharashtra",
        description: "Assist senior engineers in developing and testing new software features. Basic knowledge of Python or Java required.",
        job_type: JobType::Internship,
    },
    Job {
        id: "jaipur-de",
        title: "Data Entry Operator (Part-time)",
        company: "Local Business Hub",
        location: "Jaipur, Rajasthan",
        description: "Accurately enter data from various sources into our database system. Good typing speed and attention to detail needed.",
        job_type: JobType::PartTime,
    },
    Job {
        id: "haryana-sales",
        title: "Field Sales Executive",
        company: "AgriConnect",
        location: "Rural Hub, Haryana",
        description: "Visit local farmers and promote our agricultural products. Good communication skills in Hindi required.",
        job_type: JobType::FullTime,
    },
    Job {
        id: "gujarat-mech",
        title: "Workshop Assistant (Temporary)",
        company: "Mechanic Services",
        location: "Near Industrial Area, Gujarat",
        description: "Assist mechanics with basic tasks, tool handling, and workshop maintenance. Temporary position for 3 months.",
        job_type: JobType::Temporary,
    },
    Job {
        id: "remote-csr",
        title: "Customer Support Representative",
        company: "BPO India",
        location: "Remote",
        description: "Handle customer inquiries via phone and email. Requires good communication skills and basic computer knowledge.",
        job_type: JobType::FullTime,
    },
    Job {
        id: "pune-da",
        title: "Data Analyst",
        company: "FinTech Innovations",
        location: "Pune, Maharashtra",
        description: "Analyze financial data, create reports, and identify trends. Experience with SQL and Excel preferred.",
        job_type: JobType::FullTime,
    },
    Job {
        id: "jaipur-gd",
        title: "Graphic Designer",
        company: "Creative Studios",
        location: "Jaipur, Rajasthan",
        description: "Design marketing materials, social media posts, and website graphics using Adobe Creative Suite.",
        job_type: JobType::FullTime,
    },
];

/// One page of search results.
#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct JobPage {
    pub jobs: Vec<Job>,
    /// Matches before the limit was applied.
    pub total: usize,
    pub has_more: bool,
    /// The profile location used to order results, if any.
    pub prioritized_location: Option<String>,
}

/// Case-insensitive match on title, company, description or location.
/// A blank term matches everything.
pub fn matches_term(job: &Job, term: &str) -> bool {
    let term = term.trim().to_lowercase();
    if term.is_empty() {
        return true;
    }
    [job.title, job.company, job.description, job.location]
        .iter()
        .any(|field| field.to_lowercase().contains(&term))
}

fn is_local(job: &Job, location: &str) -> bool {
    job.location.to_lowercase().contains(location)
}

/// Filters `catalog` by `term`, moves jobs in `location` to the front and
/// keeps the first `limit`.
///
/// The ordering is stable: within the local and non-local groups jobs keep
/// their catalog order.
pub fn search_jobs(
    catalog: &[Job],
    term: &str,
    location: Option<&str>,
    limit: usize,
) -> JobPage {
    let mut matched: Vec<&Job> = catalog.iter().filter(|job| matches_term(job, term)).collect();

    let location = location.map(str::trim).filter(|l| !l.is_empty());
    if let Some(location) = location {
        let needle = location.to_lowercase();
        matched.sort_by_key(|job| !is_local(job, &needle));
    }

    let total = matched.len();
    JobPage {
        jobs: matched.into_iter().take(limit).cloned().collect(),
        total,
        has_more: total > limit,
        prioritized_location: location.map(String::from),
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn ids(page: &JobPage) -> Vec<&'static str> {
        page.jobs.iter().map(|job| job.id).collect()
    }

    #[test]
    fn test_no_term_lists_catalog_in_order() {
        let page = search_jobs(JOB_CATALOG, "", None, MAX_LIMIT);
        assert_eq!(page.total, JOB_CATALOG.len());
        assert_eq!(ids(&page)[0], "pune-swe");
        assert_eq!(ids(&page)[6], "jaipur-gd");
        assert!(!page.has_more);
    }

    #[test]
    fn test_term_matches_any_text_field() {
        // company
        assert_eq!(ids(&search_jobs(JOB_CATALOG, "agriconnect", None, 6)), vec!["haryana-sales"]);
        // description
        assert_eq!(ids(&search_jobs(JOB_CATALOG, "SQL", None, 6)), vec!["pune-da"]);
        // location
        assert_eq!(
            ids(&search_jobs(JOB_CATALOG, " jaipur ", None, 6)),
            vec!["jaipur-de", "jaipur-gd"]
        );
        assert_eq!(search_jobs(JOB_CATALOG, "astronaut", None, 6).total, 0);
    }

    #[test]
    fn test_local_jobs_come_first_in_catalog_order() {
        let page = search_jobs(JOB_CATALOG, "", Some("Jaipur"), MAX_LIMIT);
        assert_eq!(
            ids(&page),
            vec![
                "jaipur-de",
                "jaipur-gd",
                "pune-swe",
                "haryana-sales",
                "gujarat-mech",
                "remote-csr",
                "pune-da",
            ]
        );
    }

    #[test]
    fn test_location_ordering_applies_after_search() {
        let page = search_jobs(JOB_CATALOG, "data", Some("pune"), 6);
        assert_eq!(ids(&page), vec!["pune-da", "jaipur-de"]);
        assert_eq!(page.prioritized_location.as_deref(), Some("pune"));
    }

    #[test]
    fn test_limit_pages_results() {
        let page = search_jobs(JOB_CATALOG, "", None, PAGE_SIZE);
        assert_eq!(page.jobs.len(), PAGE_SIZE);
        assert_eq!(page.total, 7);
        assert!(page.has_more);
    }

    #[test]
    fn test_blank_location_keeps_catalog_order() {
        let page = search_jobs(JOB_CATALOG, "", Some("  "), MAX_LIMIT);
        assert_eq!(ids(&page)[0], "pune-swe");
        assert_eq!(page.prioritized_location, None);
    }
}
