//! Runs against a real Postgres when `TEST_DATABASE_URL` is set; otherwise each test returns early.

mod test_utils;

use chrono::Utc;
use portfolio_backend::{
    db::seed::{seed_demo_content, SeedReport},
    entities::{
        contact_message::{MessageStatus, NewContactMessage, ReplyRecord},
        experience::{ExperienceInput, ExperienceKind},
        option_fields::OptionField,
        project::ProjectInput,
        skill::SkillInput,
        social_link::{NewSocialLink, UpdateSocialLink},
    },
    repositories::{
        contact_message::ContactMessageRepository,
        dashboard::DashboardRepository,
        experience::ExperienceRepository,
        project::ProjectRepository,
        skill::SkillRepository,
        social_link::SocialLinkRepository,
        sqlx_repo::{
            SqlxContactMessageRepo, SqlxDashboardRepo, SqlxExperienceRepo, SqlxProjectRepo,
            SqlxSkillRepo, SqlxSocialLinkRepo,
        },
    },
};
use reqwest::StatusCode;
use serde_json::{json, Value};
use test_utils::*;
use uuid::Uuid;

fn project(title: &str, order: i32) -> ProjectInput {
    ProjectInput {
        title: title.to_string(),
        description: format!("{} description", title),
        long_description: None,
        tech_stack: vec!["rust".to_string()],
        live_url: None,
        code_url: None,
        image_url: None,
        featured: false,
        order,
    }
}

fn skill(name: &str, order: i32) -> SkillInput {
    SkillInput {
        name: name.to_string(),
        category: "backend".to_string(),
        level: 4,
        icon: None,
        icon_url: None,
        order,
    }
}

fn job(title: &str, order: i32) -> ExperienceInput {
    ExperienceInput {
        kind: ExperienceKind::Work,
        title: title.to_string(),
        organization: "Acme".to_string(),
        location: None,
        start_date: "2021-03".to_string(),
        end_date: None,
        current: false,
        description: "Built things".to_string(),
        highlights: Vec::new(),
        order,
    }
}

fn social(name: &str) -> NewSocialLink {
    NewSocialLink {
        name: name.to_string(),
        url: format!("https://{}.com/someone", name.to_lowercase()),
        icon_url: None,
        default_emoji: "🔗".to_string(),
        color: "bg-gray-800".to_string(),
    }
}

fn visitor(name: &str) -> NewContactMessage {
    NewContactMessage {
        name: name.to_string(),
        email: format!("{}@example.com", name.to_lowercase()),
        message: "Hello there".to_string(),
    }
}

#[actix_rt::test]
async fn content_lists_come_back_in_display_order() {
    let Some(db) = TestDb::acquire().await else { return };

    let projects = SqlxProjectRepo::new(db.pool.clone());
    projects.create_project(&project("Third", 3)).await.unwrap();
    projects.create_project(&project("First", 1)).await.unwrap();
    projects.create_project(&project("Second", 2)).await.unwrap();
    let titles: Vec<String> = projects.list_projects(false).await.unwrap().into_iter().map(|p| p.title).collect();
    assert_eq!(titles, ["First", "Second", "Third"]);

    let skills = SqlxSkillRepo::new(db.pool.clone());
    skills.create_skill(&skill("Zig", 1)).await.unwrap();
    skills.create_skill(&skill("Axum", 1)).await.unwrap();
    skills.create_skill(&skill("Actix", 0)).await.unwrap();
    let names: Vec<String> = skills.list_skills().await.unwrap().into_iter().map(|s| s.name).collect();
    assert_eq!(names, ["Actix", "Axum", "Zig"]);

    // newest roles carry the highest order and are listed first
    let experience = SqlxExperienceRepo::new(db.pool.clone());
    experience.create_experience(&job("Intern", 1)).await.unwrap();
    experience.create_experience(&job("Lead", 3)).await.unwrap();
    experience.create_experience(&job("Engineer", 2)).await.unwrap();
    let roles: Vec<String> = experience
        .list_experience(Some(ExperienceKind::Work))
        .await
        .unwrap()
        .into_iter()
        .map(|e| e.title)
        .collect();
    assert_eq!(roles, ["Lead", "Engineer", "Intern"]);
    assert!(experience.list_experience(Some(ExperienceKind::Education)).await.unwrap().is_empty());
}

#[actix_rt::test]
async fn social_links_append_and_patch_icon_three_ways() {
    let Some(db) = TestDb::acquire().await else { return };
    let repo = SqlxSocialLinkRepo::new(db.pool.clone());

    let github = repo.create_social_link(&social("GitHub")).await.unwrap();
    let linkedin = repo.create_social_link(&social("LinkedIn")).await.unwrap();
    assert_eq!((github.order, linkedin.order), (1, 2));

    let set = UpdateSocialLink {
        icon_url: OptionField::SetToValue("/images/social/gh.png".to_string()),
        ..Default::default()
    };
    let updated = repo.update_social_link(&github.id, &set).await.unwrap().unwrap();
    assert_eq!(updated.icon_url.as_deref(), Some("/images/social/gh.png"));

    let rename_only = UpdateSocialLink {
        name: Some("GitHub Profile".to_string()),
        ..Default::default()
    };
    let updated = repo.update_social_link(&github.id, &rename_only).await.unwrap().unwrap();
    assert_eq!(updated.name, "GitHub Profile");
    assert_eq!(updated.icon_url.as_deref(), Some("/images/social/gh.png"));

    let clear = UpdateSocialLink {
        icon_url: OptionField::SetToNull,
        ..Default::default()
    };
    let updated = repo.update_social_link(&github.id, &clear).await.unwrap().unwrap();
    assert_eq!(updated.icon_url, None);

    assert!(repo.update_social_link(&Uuid::new_v4(), &rename_only).await.unwrap().is_none());
}

#[actix_rt::test]
async fn reply_record_marks_message_replied() {
    let Some(db) = TestDb::acquire().await else { return };
    let repo = SqlxContactMessageRepo::new(db.pool.clone());

    let saved = repo.create_message(&visitor("Ada").prepare_for_insert()).await.unwrap();
    assert_eq!(saved.status, MessageStatus::New);

    let record = ReplyRecord {
        reply_text: "Thanks!".to_string(),
        replied_at: Utc::now(),
        email_sent: true,
        email_message_id: "<abc@mail>".to_string(),
    };
    assert_eq!(repo.record_reply(&saved.id, &record).await.unwrap(), Some(saved.id));
    assert_eq!(repo.record_reply(&Uuid::new_v4(), &record).await.unwrap(), None);

    let stored = repo.get_message(&saved.id).await.unwrap().unwrap();
    assert_eq!(stored.status, MessageStatus::Replied);
    assert_eq!(stored.reply_text.as_deref(), Some("Thanks!"));
    assert_eq!(stored.email_sent, Some(true));
    assert_eq!(stored.email_message_id.as_deref(), Some("<abc@mail>"));

    let stats = repo.message_stats().await.unwrap();
    assert_eq!((stats.total, stats.replied, stats.new), (1, 1, 0));
}

#[actix_rt::test]
async fn demo_seed_runs_once() {
    let Some(db) = TestDb::acquire().await else { return };
    let dashboard = SqlxDashboardRepo::new(db.pool.clone());

    let first = seed_demo_content(&db.pool).await.unwrap();
    assert!(first.projects > 0 && first.skills > 0 && first.experience > 0 && first.settings > 0);
    let counts = dashboard.content_counts().await.unwrap();
    assert_eq!(counts.projects, first.projects as i64);

    let second = seed_demo_content(&db.pool).await.unwrap();
    assert_eq!(second, SeedReport::default());
    assert_eq!(dashboard.content_counts().await.unwrap(), counts);
}

#[actix_rt::test]
async fn submitted_message_opens_as_read() {
    let Some((app, _db)) = TestApp::spawn_with_db().await else { return };

    let response = app.client
        .post(app.url("/api/v1/contact"))
        .json(&json!({ "name": "Ada", "email": "ada@example.com", "message": "Hi!" }))
        .send()
        .await
        .unwrap();
    // the notification email fails, the submission still lands
    assert_eq!(response.status(), StatusCode::CREATED);
    let id = response.json::<Value>().await.unwrap()["id"].as_str().unwrap().to_string();

    let listed: Value = app.client
        .get(app.url("/api/v1/admin/messages?status=new"))
        .bearer_auth(app.admin_token())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(listed["total"], 1);
    assert_eq!(listed["messages"][0]["id"], id.as_str());

    let opened: Value = app.client
        .get(app.url(&format!("/api/v1/admin/messages/{}", id)))
        .bearer_auth(app.admin_token())
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(opened["status"], "read");
    assert_eq!(opened["message"], "Hi!");
}

#[actix_rt::test]
async fn bulk_operations_skip_ids_that_are_gone() {
    let Some((app, db)) = TestApp::spawn_with_db().await else { return };
    let repo = SqlxContactMessageRepo::new(db.pool.clone());
    let a = repo.create_message(&visitor("A").prepare_for_insert()).await.unwrap().id;
    let b = repo.create_message(&visitor("B").prepare_for_insert()).await.unwrap().id;
    let gone = repo.create_message(&visitor("C").prepare_for_insert()).await.unwrap().id;
    repo.delete_message(&gone).await.unwrap();

    let ids = json!([a.to_string(), b.to_string(), gone.to_string()]);
    let body: Value = app.client
        .post(app.url("/api/v1/admin/messages/bulk/status"))
        .bearer_auth(app.admin_token())
        .json(&json!({ "ids": ids, "status": "read" }))
        .send()
        .await
        .unwrap()
        .json()
        .await
        .unwrap();
    assert_eq!(body["processed"].as_array().unwrap().len(), 2);
    assert_eq!(body["skipped"], json!([gone.to_string()]));
    assert_eq!(repo.message_stats().await.unwrap().read, 2);

    let response = app.client
        .post(app.url("/api/v1/admin/messages/bulk/delete"))
        .bearer_auth(app.admin_token())
        .json(&json!({ "ids": ids }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::OK);
    let body: Value = response.json().await.unwrap();
    assert_eq!(body["processed"].as_array().unwrap().len(), 2);
    assert_eq!(body["skipped"], json!([gone.to_string()]));
    assert_eq!(repo.message_stats().await.unwrap().total, 0);
}

#[actix_rt::test]
async fn failed_reply_leaves_the_message_unreplied() {
    let Some((app, db)) = TestApp::spawn_with_db().await else { return };
    let repo = SqlxContactMessageRepo::new(db.pool.clone());
    let id = repo.create_message(&visitor("Ada").prepare_for_insert()).await.unwrap().id;

    // nothing listens on the configured SMTP port
    let response = app.client
        .post(app.url("/api/v1/admin/messages/reply"))
        .bearer_auth(app.admin_token())
        .json(&json!({ "message_id": id.to_string(), "reply_text": "Thanks!" }))
        .send()
        .await
        .unwrap();
    assert_eq!(response.status(), StatusCode::BAD_GATEWAY);

    let stored = repo.get_message(&id).await.unwrap().unwrap();
    assert_eq!(stored.status, MessageStatus::New);
    assert_eq!(stored.reply_text, None);
    assert_eq!(stored.replied_at, None);
}
