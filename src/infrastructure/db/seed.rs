//! Demo content for a fresh database. A table that already has rows is left alone,
//! so running the seed twice changes nothing.

use serde_json::json;
use sqlx::PgPool;

use crate::{
    entities::{
        experience::{ExperienceInput, ExperienceKind},
        project::ProjectInput,
        skill::SkillInput,
    },
    errors::AppError,
    repositories::{
        dashboard::DashboardRepository,
        experience::ExperienceRepository,
        project::ProjectRepository,
        setting::SettingRepository,
        skill::SkillRepository,
        sqlx_repo::{
            SqlxDashboardRepo, SqlxExperienceRepo, SqlxProjectRepo, SqlxSettingRepo, SqlxSkillRepo,
        },
    },
};

/// Rows written per table.
#[derive(Debug, Default, Clone, Copy, PartialEq, Eq)]
pub struct SeedReport {
    pub projects: usize,
    pub skills: usize,
    pub experience: usize,
    pub settings: usize,
}

pub async fn seed_demo_content(pool: &PgPool) -> Result<SeedReport, AppError> {
    let counts = SqlxDashboardRepo::new(pool.clone()).content_counts().await?;
    let mut report = SeedReport::default();

    if counts.projects == 0 {
        let repo = SqlxProjectRepo::new(pool.clone());
        for project in demo_projects() {
            repo.create_project(&project).await?;
            report.projects += 1;
        }
    }

    if counts.skills == 0 {
        let repo = SqlxSkillRepo::new(pool.clone());
        for skill in demo_skills() {
            repo.create_skill(&skill).await?;
            report.skills += 1;
        }
    }

    if counts.work_experience + counts.education == 0 {
        let repo = SqlxExperienceRepo::new(pool.clone());
        for entry in demo_experience() {
            repo.create_experience(&entry).await?;
            report.experience += 1;
        }
    }

    let settings = SqlxSettingRepo::new(pool.clone());
    for (key, value) in demo_settings() {
        if settings.get_setting(key).await?.is_none() {
            settings.upsert_setting(key, &value).await?;
            report.settings += 1;
        }
    }

    tracing::info!(?report, "Demo content seeded");
    Ok(report)
}

fn demo_projects() -> Vec<ProjectInput> {
    let project = |title: &str, description: &str, long: &str, stack: &[&str], slug: &str, featured: bool, order: i32| {
        ProjectInput {
            title: title.to_string(),
            description: description.to_string(),
            long_description: Some(long.to_string()),
            tech_stack: stack.iter().map(|s| s.to_string()).collect(),
            live_url: Some(format!("https://{}-demo.example.com", slug)),
            code_url: Some(format!("https://github.com/example/{}", slug)),
            image_url: None,
            featured,
            order,
        }
    };

    vec![
        project(
            "E-commerce Platform",
            "Full-stack e-commerce solution with payment integration",
            "Catalog, cart and checkout with **Stripe** payments, plus an admin dashboard for inventory.",
            &["Next.js", "TypeScript", "PostgreSQL", "Stripe"],
            "ecommerce-platform",
            true,
            1,
        ),
        project(
            "Task Management App",
            "Collaborative task management with real-time updates",
            "Kanban boards with drag and drop, live sync between teammates and deadline tracking.",
            &["React", "Node.js", "Socket.io", "MongoDB"],
            "task-manager",
            true,
            2,
        ),
        project(
            "Weather Dashboard",
            "Weather app with location-based forecasts",
            "Current conditions and a 7-day forecast with charts and location detection.",
            &["Vue.js", "Chart.js", "OpenWeather API"],
            "weather-dashboard",
            false,
            3,
        ),
    ]
}

fn demo_skills() -> Vec<SkillInput> {
    [
        ("TypeScript", "frontend", 5, "ts"),
        ("React", "frontend", 5, "react"),
        ("Tailwind CSS", "frontend", 4, "tailwind"),
        ("Rust", "backend", 4, "rust"),
        ("Node.js", "backend", 4, "nodejs"),
        ("PostgreSQL", "database", 4, "postgresql"),
        ("Redis", "database", 3, "redis"),
        ("Git", "tools", 5, "git"),
        ("Docker", "tools", 3, "docker"),
    ]
    .into_iter()
    .enumerate()
    .map(|(i, (name, category, level, icon))| SkillInput {
        name: name.to_string(),
        category: category.to_string(),
        level,
        icon: Some(icon.to_string()),
        icon_url: None,
        order: i as i32 + 1,
    })
    .collect()
}

fn demo_experience() -> Vec<ExperienceInput> {
    vec![
        ExperienceInput {
            kind: ExperienceKind::Work,
            title: "Senior Full Stack Developer".to_string(),
            organization: "Tech Innovations Inc.".to_string(),
            location: Some("San Francisco, CA".to_string()),
            start_date: "2022-01".to_string(),
            end_date: None,
            current: true,
            description: "Leads development of web applications and the CI/CD pipeline behind them.".to_string(),
            highlights: vec![
                "Led a team of 5 developers on a customer portal".to_string(),
                "Cut production bugs by 60% with automated testing".to_string(),
            ],
            order: 3,
        },
        ExperienceInput {
            kind: ExperienceKind::Work,
            title: "Full Stack Developer".to_string(),
            organization: "Digital Solutions LLC".to_string(),
            location: Some("New York, NY".to_string()),
            start_date: "2020-03".to_string(),
            end_date: Some("2021-12".to_string()),
            current: false,
            description: "Built and maintained React and Node.js applications backed by PostgreSQL.".to_string(),
            highlights: vec!["Served 10,000+ daily active users".to_string()],
            order: 2,
        },
        ExperienceInput {
            kind: ExperienceKind::Education,
            title: "BSc Computer Science".to_string(),
            organization: "University of Technology".to_string(),
            location: Some("Boston, MA".to_string()),
            start_date: "2014-08".to_string(),
            end_date: Some("2018-05".to_string()),
            current: false,
            description: "Software engineering, algorithms and data structures.".to_string(),
            highlights: vec!["Dean's List for 6 semesters".to_string()],
            order: 1,
        },
    ]
}

fn demo_settings() -> Vec<(&'static str, serde_json::Value)> {
    vec![
        (
            "personal_info",
            json!({
                "name": "Jane Doe",
                "title": "Full Stack Developer",
                "bio": "Full-stack developer building fast, accessible web applications.",
                "email": "jane.doe@example.com",
                "location": "San Francisco, CA",
            }),
        ),
        (
            "site_settings",
            json!({
                "title": "Jane Doe - Full Stack Developer",
                "description": "Portfolio of Jane Doe.",
                "keywords": ["full stack developer", "rust", "react"],
            }),
        ),
    ]
}
