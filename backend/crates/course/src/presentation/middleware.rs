//! Login Middleware
//!
//! Resolves the caller from the gateway header and stores [`UserInfo`] in the
//! request extensions. Requests without an identity stop here with 401.

use axum::extract::{Request, State};
use axum::middleware::Next;
use axum::response::{IntoResponse, Response};

use crate::application::{ResolveUserUseCase, UserInfo};
use crate::domain::repository::CourseStore;
use crate::presentation::handlers::CourseAppState;

pub async fn require_login<R>(
    State(state): State<CourseAppState<R>>,
    mut req: Request,
    next: Next,
) -> Response
where
    R: CourseStore,
{
    let raw_google_id = req
        .headers()
        .get(state.config.google_id_header.as_str())
        .and_then(|value| value.to_str().ok())
        .map(str::to_owned);

    let use_case = ResolveUserUseCase::new(state.repo.clone(), state.config.clone());
    let user: UserInfo = match use_case.execute(raw_google_id.as_deref()).await {
        Ok(user) => user,
        Err(e) => return e.into_response(),
    };

    tracing::debug!(
        google_id = %user.id,
        is_admin = user.is_admin,
        is_instructor = user.is_instructor,
        "Request authenticated"
    );

    req.extensions_mut().insert(user);
    next.run(req).await
}
