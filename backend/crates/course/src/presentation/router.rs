//! Course Router

use axum::{
    Router, middleware,
    routing::{get, put},
};
use std::sync::Arc;

use crate::application::config::CourseConfig;
use crate::domain::repository::CourseStore;
use crate::infra::postgres::PgCourseRepository;
use crate::presentation::handlers::{self, CourseAppState};
use crate::presentation::middleware::require_login;

/// Create the course router with PostgreSQL repository
pub fn course_router(repo: PgCourseRepository, config: CourseConfig) -> Router {
    course_router_generic(repo, config)
}

/// Create a generic course router for any repository implementation
pub fn course_router_generic<R>(repo: R, config: CourseConfig) -> Router
where
    R: CourseStore,
{
    let state = CourseAppState {
        repo: Arc::new(repo),
        config: Arc::new(config),
    };

    Router::new()
        .route(
            "/bin/course",
            put(handlers::bin_course::<R>).delete(handlers::restore_course::<R>),
        )
        .route(
            "/sessions/ongoing",
            get(handlers::get_ongoing_sessions::<R>),
        )
        .route(
            "/course",
            put(handlers::save_course::<R>)
                .post(handlers::create_course::<R>)
                .delete(handlers::delete_course::<R>),
        )
        .route("/course/archive", put(handlers::archive_course::<R>))
        .route_layer(middleware::from_fn_with_state(
            state.clone(),
            require_login::<R>,
        ))
        .with_state(state)
}
