use actix_web::web;

use crate::middleware::jwt_extract::JwtExtract;

pub mod games;
pub mod health;

/// Mount every route. `main` wraps the whole app in the request middleware
/// stack; tests call this directly with `App::new().configure(..)`.
pub fn configure(cfg: &mut web::ServiceConfig) {
    cfg.route("/", web::get().to(health::root));
    health::configure_routes(cfg);

    cfg.service(
        web::scope("/api/games")
            .wrap(JwtExtract)
            .configure(games::configure_routes),
    );
}
