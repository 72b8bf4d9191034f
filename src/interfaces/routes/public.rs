use actix_web::web;

use crate::handlers::{contact, content};

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(web::resource("/projects").route(web::get().to(content::list_projects)))
        .service(web::resource("/skills").route(web::get().to(content::list_skills)))
        .service(
            web::scope("/experience")
                .service(web::resource("").route(web::get().to(content::list_experience)))
                .service(web::resource("/work").route(web::get().to(content::list_work_experience)))
                .service(web::resource("/education").route(web::get().to(content::list_education)))
        )
        .service(web::resource("/settings/{key}").route(web::get().to(content::get_setting)))
        .service(web::resource("/social-links").route(web::get().to(content::list_social_links)))
        .service(web::resource("/contact").route(web::post().to(contact::submit_contact_message)));
}
