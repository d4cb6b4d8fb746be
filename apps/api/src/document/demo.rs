//! Sample document used to seed the session when `SEED_DEMO` is set.

use crate::models::resume::{
    Education, Experience, PersonalInfo, Project, ResumeData, TemplateKind, Theme,
    DEFAULT_PRIMARY_COLOR,
};
use crate::models::section::SectionOrder;

pub fn demo_document() -> ResumeData {
    ResumeData {
        personal_info: PersonalInfo {
            full_name: "Morgan Ellery".to_string(),
            email: "morgan.ellery@example.com".to_string(),
            phone: "+44 20 7946 0321".to_string(),
            location: "London, UK".to_string(),
            linkedin: "linkedin.com/in/morgan-ellery".to_string(),
            website: "ellery.dev".to_string(),
        },
        theme: Theme {
            primary_color: DEFAULT_PRIMARY_COLOR.to_string(),
            template: TemplateKind::Timeline,
        },
        summary: "Platform engineer with ten years of experience building payment and \
                  ledger systems. Comfortable owning services from design review to on-call, \
                  and at home in Rust, Go and PostgreSQL."
            .to_string(),
        experience: vec![
            Experience {
                id: "1".to_string(),
                role: "Staff Engineer".to_string(),
                company: "Northwind Payments, London".to_string(),
                start_date: "Mar 2021".to_string(),
                end_date: String::new(),
                current: true,
                description: "• Led the rewrite of the settlement engine in Rust, cutting batch time from 4h to 25m.\n\
                              • Introduced contract tests between 14 services, halving integration incidents.\n\
                              • Mentored five engineers through promotion to senior."
                    .to_string(),
            },
            Experience {
                id: "2".to_string(),
                role: "Senior Software Engineer".to_string(),
                company: "Harbor Ledger, Amsterdam".to_string(),
                start_date: "Jun 2017".to_string(),
                end_date: "Feb 2021".to_string(),
                current: false,
                description: "Built the double-entry ledger API serving 2M accounts.\n\
                              Owned the PostgreSQL partitioning migration with zero downtime."
                    .to_string(),
            },
            Experience {
                id: "3".to_string(),
                role: "Software Engineer".to_string(),
                company: "Fieldstone Labs".to_string(),
                start_date: "Sep 2014".to_string(),
                end_date: "May 2017".to_string(),
                current: false,
                description: String::new(),
            },
        ],
        education: vec![Education {
            id: "1".to_string(),
            school: "University of Leeds".to_string(),
            degree: "BSc".to_string(),
            field: "Computer Science".to_string(),
            start_date: "2011".to_string(),
            end_date: "2014".to_string(),
            current: false,
            description: String::new(),
        }],
        skills: "Rust, Go, PostgreSQL, Kafka, Kubernetes, Terraform, Distributed Systems".to_string(),
        projects: vec![Project {
            id: "1".to_string(),
            name: "ledgerlint".to_string(),
            description: "- Static checker for double-entry invariants in SQL migrations".to_string(),
            link: "github.com/mellery/ledgerlint".to_string(),
            technologies: "Rust, sqlparser".to_string(),
        }],
        section_order: Some(SectionOrder::canonical()),
    }
}
