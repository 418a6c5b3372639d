//! HTTP Handlers

use axum::Json;
use axum::body::Bytes;
use axum::extract::{Extension, Query, State};
use axum::http::StatusCode;
use kernel::error::app_error::AppError;
use serde::de::DeserializeOwned;
use std::collections::HashMap;
use std::sync::Arc;

use crate::application::config::CourseConfig;
use crate::application::{
    ArchiveCourseUseCase, BinCourseUseCase, CreateCourseInput, CreateCourseUseCase,
    DeleteCourseUseCase, OngoingSessionsInput, OngoingSessionsUseCase, RestoreCourseUseCase,
    SaveCourseInput, SaveCourseUseCase, UserInfo,
};
use crate::domain::repository::CourseStore;
use crate::domain::value_object::course_id::CourseId;
use crate::error::{CourseError, CourseResult};
use crate::presentation::dto::{
    CourseArchiveData, CourseArchiveRequest, CourseCreateRequest, CourseData, CourseSaveRequest,
    MessageOutput, OngoingSessionsData, RequestBody,
};

/// Shared state for course handlers
#[derive(Clone)]
pub struct CourseAppState<R>
where
    R: CourseStore,
{
    pub repo: Arc<R>,
    pub config: Arc<CourseConfig>,
}

pub const PARAM_COURSE_ID: &str = "courseid";
pub const PARAM_START_TIME: &str = "starttime";
pub const PARAM_END_TIME: &str = "endtime";

type Params = Query<HashMap<String, String>>;

fn required_param<'a>(params: &'a HashMap<String, String>, name: &str) -> CourseResult<&'a str> {
    params
        .get(name)
        .map(String::as_str)
        .ok_or_else(|| CourseError::missing_parameter(name))
}

/// Access checks only need the parameter to be present; a course id in the
/// wrong format is reported as a missing course by the gate keeper.
fn course_id_param(params: &HashMap<String, String>) -> CourseResult<CourseId> {
    required_param(params, PARAM_COURSE_ID).map(CourseId::lookup)
}

/// Parse a JSON body so that every failure renders as a course error
fn parse_body<T: DeserializeOwned>(body: &Bytes) -> CourseResult<T> {
    serde_json::from_slice(body).map_err(|e| {
        let err = AppError::from(e);
        CourseError::InvalidRequestBody(err.message().to_string())
    })
}

fn parse_validated_body<T: DeserializeOwned + RequestBody>(body: &Bytes) -> CourseResult<T> {
    let request: T = parse_body(body)?;
    request.validate()?;
    Ok(request)
}

// ============================================================================
// Recycle Bin
// ============================================================================

/// PUT /api/bin/course
pub async fn bin_course<R>(
    State(state): State<CourseAppState<R>>,
    Extension(user): Extension<UserInfo>,
    Query(params): Params,
) -> CourseResult<Json<CourseData>>
where
    R: CourseStore,
{
    let course_id = course_id_param(&params)?;
    let use_case = BinCourseUseCase::new(state.repo.clone());
    let course = use_case.execute(&user, &course_id).await?;

    Ok(Json(CourseData::from(&course)))
}

/// DELETE /api/bin/course
pub async fn restore_course<R>(
    State(state): State<CourseAppState<R>>,
    Extension(user): Extension<UserInfo>,
    Query(params): Params,
) -> CourseResult<Json<MessageOutput>>
where
    R: CourseStore,
{
    let course_id = course_id_param(&params)?;
    let use_case = RestoreCourseUseCase::new(state.repo.clone());
    use_case.execute(&user, &course_id).await?;

    Ok(Json(MessageOutput::new(format!(
        "The course {} has been restored.",
        course_id
    ))))
}

// ============================================================================
// Ongoing Sessions
// ============================================================================

/// GET /api/sessions/ongoing
pub async fn get_ongoing_sessions<R>(
    State(state): State<CourseAppState<R>>,
    Extension(user): Extension<UserInfo>,
    Query(params): Params,
) -> CourseResult<Json<OngoingSessionsData>>
where
    R: CourseStore,
{
    user.require_admin()?;

    let input = OngoingSessionsInput::parse(
        params.get(PARAM_START_TIME).map(String::as_str),
        params.get(PARAM_END_TIME).map(String::as_str),
    )?;

    let use_case = OngoingSessionsUseCase::new(state.repo.clone());
    let output = use_case.execute(&user, input).await?;

    Ok(Json(OngoingSessionsData::from(output)))
}

// ============================================================================
// Course
// ============================================================================

/// POST /api/course
pub async fn create_course<R>(
    State(state): State<CourseAppState<R>>,
    Extension(user): Extension<UserInfo>,
    body: Bytes,
) -> CourseResult<(StatusCode, Json<CourseData>)>
where
    R: CourseStore,
{
    user.require_instructor()?;
    let req: CourseCreateRequest = parse_validated_body(&body)?;

    let input = CreateCourseInput {
        course_id: req.course_id.unwrap_or_default(),
        course_name: req.basic.course_name.unwrap_or_default(),
        time_zone: req.basic.time_zone.unwrap_or_default(),
    };

    let use_case = CreateCourseUseCase::new(state.repo.clone());
    let course = use_case.execute(&user, input).await?;

    Ok((StatusCode::CREATED, Json(CourseData::from(&course))))
}

/// PUT /api/course
pub async fn save_course<R>(
    State(state): State<CourseAppState<R>>,
    Extension(user): Extension<UserInfo>,
    Query(params): Params,
    body: Bytes,
) -> CourseResult<Json<MessageOutput>>
where
    R: CourseStore,
{
    let course_id = course_id_param(&params)?;
    let use_case = SaveCourseUseCase::new(state.repo.clone());
    let access = use_case.authorize(&user, &course_id).await?;

    let req: CourseSaveRequest = parse_validated_body(&body)?;
    let input = SaveCourseInput {
        course_name: req.course_name.unwrap_or_default(),
        time_zone: req.time_zone.unwrap_or_default(),
    };
    let course = use_case.execute(access, input).await?;

    Ok(Json(MessageOutput::new(format!(
        "Updated course [{}] details: Name: {}, Time zone: {}",
        course.course_id, course.name, course.time_zone
    ))))
}

/// DELETE /api/course
pub async fn delete_course<R>(
    State(state): State<CourseAppState<R>>,
    Extension(user): Extension<UserInfo>,
    Query(params): Params,
) -> CourseResult<Json<MessageOutput>>
where
    R: CourseStore,
{
    let course_id = course_id_param(&params)?;
    let use_case = DeleteCourseUseCase::new(state.repo.clone());
    use_case.execute(&user, &course_id).await?;

    Ok(Json(MessageOutput::new(format!(
        "The course {} has been permanently deleted.",
        course_id
    ))))
}

/// PUT /api/course/archive
pub async fn archive_course<R>(
    State(state): State<CourseAppState<R>>,
    Extension(user): Extension<UserInfo>,
    Query(params): Params,
    body: Bytes,
) -> CourseResult<Json<CourseArchiveData>>
where
    R: CourseStore,
{
    let course_id = course_id_param(&params)?;
    let use_case = ArchiveCourseUseCase::new(state.repo.clone());
    let access = use_case.authorize(&user, &course_id).await?;

    let req: CourseArchiveRequest = parse_body(&body)?;
    let is_archived = use_case
        .execute(&user, &access, req.archive_status)
        .await?;

    Ok(Json(CourseArchiveData {
        course_id: access.course().course_id.to_string(),
        is_archived,
    }))
}
