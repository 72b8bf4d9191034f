use actix_web::web;

use crate::handlers::images;

pub fn config_routes(cfg: &mut web::ServiceConfig) {
    cfg.service(
        web::resource("/images/{section}/{file_name}")
            .route(web::get().to(images::serve_image))
    );
}
