//! Built-in role catalog for the keyword matcher.
//!
//! Keyword weights: 1.0 for skills that define the role, 0.5 for supporting ones.

pub struct RoleProfile {
    pub id: u64,
    pub title: &'static str,
    pub keywords: &'static [(&'static str, f32)],
    /// Used when the résumé gives no keyword evidence.
    pub why_match: &'static str,
    pub responsibilities: &'static [&'static str],
    pub why_excel: &'static str,
}

pub const ROLE_CATALOG: &[RoleProfile] = &[
    RoleProfile {
        id: 1,
        title: "Senior Frontend Developer",
        keywords: &[
            ("react", 1.0),
            ("javascript", 1.0),
            ("typescript", 1.0),
            ("css", 0.5),
            ("html", 0.5),
            ("redux", 0.5),
            ("next.js", 0.5),
            ("performance", 0.5),
        ],
        why_match: "Frontend roles reward the UI and web experience most résumés in this pool show.",
        responsibilities: &[
            "Develop responsive web applications in React",
            "Turn design specs into accessible, polished interfaces",
            "Profile and improve client-side performance",
        ],
        why_excel: "Attention to detail in shipped UI work is what sets strong frontend candidates apart.",
    },
    RoleProfile {
        id: 2,
        title: "Full Stack Engineer",
        keywords: &[
            ("node", 1.0),
            ("react", 0.5),
            ("javascript", 0.5),
            ("typescript", 0.5),
            ("sql", 1.0),
            ("postgres", 0.5),
            ("rest", 0.5),
            ("api", 0.5),
        ],
        why_match: "A mix of frontend and backend exposure maps well onto full stack work.",
        responsibilities: &[
            "Build features end to end across web client and API",
            "Design and evolve relational database schemas",
            "Own services from development through deployment",
        ],
        why_excel: "Breadth across the stack lets you unblock yourself and your team.",
    },
    RoleProfile {
        id: 3,
        title: "UX/UI Developer",
        keywords: &[
            ("figma", 1.0),
            ("ux", 1.0),
            ("ui", 1.0),
            ("prototyping", 0.5),
            ("wireframes", 0.5),
            ("usability", 0.5),
            ("css", 0.5),
            ("design systems", 0.5),
        ],
        why_match: "Hybrid design and development roles value anyone who can bridge both worlds.",
        responsibilities: &[
            "Create wireframes and interactive prototypes",
            "Implement responsive designs in code",
            "Run usability tests and iterate on findings",
        ],
        why_excel: "Understanding user experience principles makes your implementations land the first time.",
    },
    RoleProfile {
        id: 4,
        title: "DevOps Engineer",
        keywords: &[
            ("docker", 1.0),
            ("kubernetes", 1.0),
            ("ci/cd", 1.0),
            ("terraform", 0.5),
            ("aws", 0.5),
            ("linux", 0.5),
            ("ansible", 0.5),
            ("monitoring", 0.5),
        ],
        why_match: "Automation and infrastructure experience transfers directly into DevOps.",
        responsibilities: &[
            "Set up and maintain CI/CD pipelines",
            "Manage cloud infrastructure as code",
            "Improve deployment reliability and observability",
        ],
        why_excel: "A habit of automating repetitive work is the core of the role.",
    },
    RoleProfile {
        id: 5,
        title: "Technical Lead",
        keywords: &[
            ("lead", 1.0),
            ("mentor", 1.0),
            ("architecture", 1.0),
            ("team", 0.5),
            ("stakeholders", 0.5),
            ("roadmap", 0.5),
            ("code review", 0.5),
        ],
        why_match: "Leadership signals combined with hands-on engineering fit a tech lead track.",
        responsibilities: &[
            "Lead a team of developers through delivery",
            "Make and document architectural decisions",
            "Mentor junior team members",
        ],
        why_excel: "Clear communication and a record of growing others make you effective here.",
    },
    RoleProfile {
        id: 6,
        title: "Backend Engineer",
        keywords: &[
            ("rust", 1.0),
            ("go", 1.0),
            ("java", 1.0),
            ("python", 0.5),
            ("microservices", 1.0),
            ("distributed systems", 0.5),
            ("kafka", 0.5),
            ("sql", 0.5),
        ],
        why_match: "Server-side programming experience is the foundation of backend roles.",
        responsibilities: &[
            "Design and operate reliable backend services",
            "Model data and own service APIs",
            "Diagnose production issues across distributed components",
        ],
        why_excel: "Caring about correctness under load distinguishes strong backend engineers.",
    },
    RoleProfile {
        id: 7,
        title: "Data Scientist",
        keywords: &[
            ("python", 1.0),
            ("machine learning", 1.0),
            ("statistics", 1.0),
            ("pandas", 0.5),
            ("sql", 0.5),
            ("pytorch", 0.5),
            ("tensorflow", 0.5),
            ("experimentation", 0.5),
        ],
        why_match: "Analytical and modelling experience points toward data science.",
        responsibilities: &[
            "Build and evaluate predictive models",
            "Design experiments and analyse results",
            "Communicate findings to product and business partners",
        ],
        why_excel: "Turning analysis into decisions people act on is the rarest data skill.",
    },
    RoleProfile {
        id: 8,
        title: "Mobile Developer",
        keywords: &[
            ("ios", 1.0),
            ("android", 1.0),
            ("swift", 1.0),
            ("kotlin", 1.0),
            ("react native", 0.5),
            ("flutter", 0.5),
        ],
        why_match: "App development experience carries over to native and cross-platform mobile work.",
        responsibilities: &[
            "Ship features to iOS and Android apps",
            "Keep apps fast and stable across devices",
            "Work with designers on native interaction patterns",
        ],
        why_excel: "Polish on small screens is noticed immediately by users and reviewers.",
    },
];
