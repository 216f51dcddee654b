//! In-process stand-in for the job platform, used when no `PLATFORM_BASE_URL`
//! is configured. Search results are derived from the queried title; every
//! submission is accepted unless its job id is on the reject list.

use std::collections::HashSet;

use async_trait::async_trait;
use tracing::debug;

use crate::models::job::{CandidateData, JobId, JobPosting};
use crate::platform::{ApplicationSubmitter, JobBoard, PlatformError, SubmissionOutcome};

struct Template {
    title: fn(&str) -> String,
    company: &'static str,
    location: &'static str,
    salary: &'static str,
    description: &'static str,
    posted: &'static str,
    remote: bool,
}

const FIRST_ID: u64 = 101;

const TEMPLATES: &[Template] = &[
    Template {
        title: |t| format!("Senior {t}"),
        company: "TechCorp Inc.",
        location: "San Francisco, CA",
        salary: "$120K - $150K",
        description: "Own the design and delivery of customer-facing features alongside a cross-functional team.",
        posted: "2 days ago",
        remote: true,
    },
    Template {
        title: |t| t.to_string(),
        company: "Innovation Labs",
        location: "New York, NY",
        salary: "$110K - $140K",
        description: "Ship product work in short iterations on a team that values clean, well-tested code.",
        posted: "1 week ago",
        remote: false,
    },
    Template {
        title: |t| format!("{t} (Mid-level)"),
        company: "Future Technologies",
        location: "Remote",
        salary: "$100K - $130K",
        description: "Work independently on the next generation of our platform with a flexible schedule.",
        posted: "3 days ago",
        remote: true,
    },
    Template {
        title: |t| format!("Lead {t}"),
        company: "Digital Solutions",
        location: "Austin, TX",
        salary: "$115K - $145K",
        description: "Guide the core product roadmap, mentor engineers and set technical direction with stakeholders.",
        posted: "5 days ago",
        remote: false,
    },
    Template {
        title: |t| format!("Junior {t}"),
        company: "Tech Innovators",
        location: "Seattle, WA",
        salary: "$80K - $100K",
        description: "An early-career role with structured mentorship and real ownership from the first month.",
        posted: "1 day ago",
        remote: true,
    },
    Template {
        title: |t| format!("Contract {t}"),
        company: "GrowthWorks",
        location: "Chicago, IL",
        salary: "$70/hr - $90/hr",
        description: "Six-month engagement for enterprise clients, with an option to convert to full-time.",
        posted: "4 days ago",
        remote: true,
    },
    Template {
        title: |t| format!("{t} - Startup Environment"),
        company: "NextGen Startup",
        location: "Miami, FL",
        salary: "$90K - $120K + equity",
        description: "Wear many hats at a fast-growing startup and shape product decisions directly.",
        posted: "1 week ago",
        remote: false,
    },
    Template {
        title: |t| format!("{t} - Healthcare Focus"),
        company: "HealthTech Solutions",
        location: "Boston, MA",
        salary: "$115K - $135K",
        description: "Build tools that streamline clinical workflows. Healthcare experience is a plus.",
        posted: "2 weeks ago",
        remote: true,
    },
];

#[derive(Debug, Default, Clone)]
pub struct SimulatedPlatform {
    rejected: HashSet<JobId>,
}

impl SimulatedPlatform {
    pub fn new(rejected: impl IntoIterator<Item = JobId>) -> Self {
        Self {
            rejected: rejected.into_iter().collect(),
        }
    }
}

#[async_trait]
impl JobBoard for SimulatedPlatform {
    async fn search(&self, title: &str) -> Result<Vec<JobPosting>, PlatformError> {
        let postings = TEMPLATES
            .iter()
            .zip(FIRST_ID..)
            .map(|(tpl, id)| JobPosting {
                id: JobId(id),
                title: (tpl.title)(title),
                company: tpl.company.to_string(),
                location: tpl.location.to_string(),
                salary: tpl.salary.to_string(),
                description: tpl.description.to_string(),
                posted_relative: tpl.posted.to_string(),
                remote: tpl.remote,
                link: format!("https://jobs.example.com/view/{id}"),
            })
            .collect();
        Ok(postings)
    }
}

#[async_trait]
impl ApplicationSubmitter for SimulatedPlatform {
    async fn submit_application(
        &self,
        job_id: JobId,
        _candidate: &CandidateData,
    ) -> SubmissionOutcome {
        if self.rejected.contains(&job_id) {
            debug!(%job_id, "Simulated platform rejecting application");
            SubmissionOutcome::rejected("Could not submit form.")
        } else {
            SubmissionOutcome::accepted()
        }
    }
}
