use crate::{
    api::{attendance, employee, report},
    auth::{handlers, middleware::auth_middleware},
    config::Config,
};
use actix_governor::{
    Governor, GovernorConfigBuilder, PeerIpKeyExtractor, governor::middleware::NoOpMiddleware,
};
use actix_web::{middleware::from_fn, web};
use std::sync::Arc;

pub fn configure(cfg: &mut web::ServiceConfig, config: Config) {
    // Helper to build per-route limiter
    fn build_limiter(requests_per_min: u32) -> Governor<PeerIpKeyExtractor, NoOpMiddleware> {
        let per_ms = if requests_per_min == 0 {
            1
        } else {
            60_000 / requests_per_min as u64
        };
        let cfg = GovernorConfigBuilder::default()
            .per_millisecond(per_ms)
            .burst_size(requests_per_min)
            .key_extractor(PeerIpKeyExtractor)
            .finish()
            .unwrap();
        Governor::new(&cfg)
    }

    let login_limiter = Arc::new(build_limiter(config.rate_login_per_min));
    let protected_limiter = Arc::new(build_limiter(config.rate_protected_per_min));

    // Public routes
    cfg.service(
        web::scope("/auth").service(
            web::resource("/login")
                .wrap(login_limiter.clone())
                .route(web::post().to(handlers::login)),
        ),
    );

    // Protected routes
    cfg.service(
        web::scope(&config.api_prefix)
            .wrap(from_fn(auth_middleware)) // authentication
            .wrap(protected_limiter) // rate limiting
            .service(web::resource("/users").route(web::get().to(employee::list_users)))
            .service(web::resource("/users/{id}").route(web::get().to(employee::get_user)))
            .service(
                web::scope("/attendance")
                    // /attendance
                    .service(
                        web::resource("").route(web::get().to(attendance::list_attendance)),
                    )
                    .service(
                        web::resource("/checkin").route(web::post().to(attendance::check_in)),
                    )
                    .service(
                        web::resource("/checkout").route(web::post().to(attendance::check_out)),
                    )
                    // literal segments above must come before the id match
                    .service(
                        web::resource("/{user_id}/today")
                            .route(web::get().to(attendance::today_record)),
                    )
                    .service(
                        web::resource("/{user_id}")
                            .route(web::get().to(attendance::employee_history)),
                    ),
            )
            .service(
                web::scope("/reports")
                    .service(web::resource("/daily").route(web::get().to(report::daily_summary)))
                    .service(
                        web::resource("/departments")
                            .route(web::get().to(report::department_summary)),
                    )
                    .service(
                        web::resource("/employees/{id}")
                            .route(web::get().to(report::employee_report)),
                    ),
            ),
    );
}
