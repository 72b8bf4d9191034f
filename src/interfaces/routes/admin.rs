use actix_web::web;

use crate::{
    constants::ADMIN_PREFIX,
    handlers::{content, dashboard, messages, system::admin_health_check, uploads},
};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::scope(ADMIN_PREFIX)
            .service(admin_health_check)
            .service(web::resource("/dashboard").route(web::get().to(dashboard::dashboard_summary)))
            .service(
                web::scope("/projects")
                    .service(
                        web::resource("")
                            .route(web::post().to(content::create_project))
                            .route(web::get().to(content::admin_list_projects))
                    )
                    .service(
                        web::resource("/{project_id}")
                            .route(web::get().to(content::get_project))
                            .route(web::put().to(content::update_project))
                            .route(web::delete().to(content::delete_project))
                    )
            )
            .service(
                web::scope("/skills")
                    .service(
                        web::resource("")
                            .route(web::post().to(content::create_skill))
                            .route(web::get().to(content::admin_list_skills))
                    )
                    .service(
                        web::resource("/{skill_id}")
                            .route(web::get().to(content::get_skill))
                            .route(web::put().to(content::update_skill))
                            .route(web::delete().to(content::delete_skill))
                    )
            )
            .service(
                web::scope("/experience")
                    .service(
                        web::resource("")
                            .route(web::post().to(content::create_experience))
                            .route(web::get().to(content::admin_list_experience))
                    )
                    .service(
                        web::resource("/{experience_id}")
                            .route(web::get().to(content::get_experience))
                            .route(web::put().to(content::update_experience))
                            .route(web::delete().to(content::delete_experience))
                    )
            )
            .service(
                web::scope("/settings")
                    .service(web::resource("").route(web::get().to(content::list_settings)))
                    .service(web::resource("/{key}").route(web::put().to(content::upsert_setting)))
            )
            .service(
                web::scope("/social-links")
                    .service(
                        web::resource("")
                            .route(web::post().to(content::create_social_link))
                            .route(web::get().to(content::admin_list_social_links))
                    )
                    .service(
                        web::resource("/{link_id}")
                            .route(web::patch().to(content::update_social_link))
                            .route(web::delete().to(content::delete_social_link))
                    )
            )
            .service(
                web::scope("/messages")
                    .service(web::resource("").route(web::get().to(messages::list_messages)))
                    .service(web::resource("/stats").route(web::get().to(messages::message_stats)))
                    .service(web::resource("/reply").route(web::post().to(messages::reply)))
                    .service(web::resource("/bulk/status").route(web::post().to(messages::bulk_update_status)))
                    .service(web::resource("/bulk/delete").route(web::post().to(messages::bulk_delete)))
                    .service(
                        web::resource("/{message_id}")
                            .route(web::get().to(messages::open_message))
                            .route(web::delete().to(messages::delete_message))
                    )
                    .service(web::resource("/{message_id}/status").route(web::patch().to(messages::update_status)))
                    .service(web::resource("/{message_id}/read").route(web::post().to(messages::mark_read)))
                    .service(web::resource("/{message_id}/unread").route(web::post().to(messages::mark_unread)))
            )
            .service(
                web::scope("/uploads")
                    .service(
                        web::resource("")
                            .route(web::post().to(uploads::upload_image))
                            .route(web::delete().to(uploads::delete_image))
                    )
                    .service(web::resource("/validate-url").route(web::post().to(uploads::validate_image_url)))
            )
    );
}
