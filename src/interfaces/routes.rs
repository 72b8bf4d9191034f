use actix_web::web;

use crate::{constants::API_PREFIX, handlers::{home::home, json_error::not_found}};

mod admin;
mod images;
mod json_error;
mod public;

pub use json_error::multipart_config;

pub fn configure_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(home);

    cfg.configure(json_error::config_routes);

    // admin scope is registered first so `/api/v1/admin/...` is not swallowed by the public scope
    cfg.configure(admin::config_routes);

    cfg.service(
        web::scope(API_PREFIX)
            .configure(public::config_routes)
    );

    cfg.configure(images::config_routes);

    cfg.default_service(web::route().to(not_found));
}
