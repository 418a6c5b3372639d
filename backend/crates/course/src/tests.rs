//! Handler tests for the course crate
//!
//! Every test drives the full router (login middleware included) over the
//! in-memory repository.

#[cfg(test)]
mod support {
    use axum::Router;
    use axum::body::Body;
    use axum::http::{Method, Request, StatusCode};
    use chrono::{DateTime, Duration, Utc};
    use kernel::id::FeedbackSessionId;
    use serde_json::Value;
    use tower::ServiceExt;

    use crate::application::config::CourseConfig;
    use crate::domain::entity::{
        account::Account, course::Course, feedback_session::FeedbackSession,
        instructor::Instructor,
    };
    use crate::domain::repository::CourseStore;
    use crate::domain::value_object::{
        course_id::CourseId, course_name::CourseName, google_id::GoogleId,
        privilege::InstructorRole, time_zone::TimeZone,
    };
    use crate::infra::memory::InMemoryCourseRepository;
    use crate::presentation::router::course_router_generic;

    pub const COURSE: &str = "idOfTypicalCourse1";
    pub const OWNER: &str = "idOfInstructor1OfCourse1";
    pub const OBSERVER: &str = "idOfObserverOfCourse1";
    pub const STUDENT: &str = "idOfStudent1";
    pub const ADMIN: &str = "admin.user";

    pub fn course_id(id: &str) -> CourseId {
        CourseId::new(id).unwrap()
    }

    pub fn google_id(id: &str) -> GoogleId {
        GoogleId::new(id).unwrap()
    }

    pub fn course(id: &str) -> Course {
        Course::new(
            course_id(id),
            CourseName::new("Typical Course 1").unwrap(),
            TimeZone::parse("Africa/Johannesburg").unwrap(),
        )
    }

    pub fn account(id: &str, institute: &str) -> Account {
        Account {
            google_id: google_id(id),
            name: format!("{id} name"),
            email: format!("{id}@example.com"),
            institute: institute.to_string(),
            is_instructor: true,
        }
    }

    pub fn session(course: &str, name: &str, start: DateTime<Utc>, end: DateTime<Utc>) -> FeedbackSession {
        FeedbackSession {
            session_id: FeedbackSessionId::new(),
            course_id: course_id(course),
            name: name.to_string(),
            creator_email: format!("{OWNER}@example.com"),
            time_zone: TimeZone::parse("Africa/Johannesburg").unwrap(),
            start_time: start,
            end_time: end,
            session_visible_from: start - Duration::days(1),
            grace_period: Duration::minutes(15),
            deleted_at: None,
        }
    }

    /// One course with a co-owner (who has an account) and an observer
    pub async fn seeded_repo() -> InMemoryCourseRepository {
        let repo = InMemoryCourseRepository::new();
        repo.insert_course(course(COURSE)).await;
        repo.insert_account(account(OWNER, "TEAMMATES Test Institute 1"))
            .await;
        repo.insert_instructor(Instructor::co_owner(
            course_id(COURSE),
            google_id(OWNER),
            "Instructor 1",
            "instr1@example.com",
        ))
        .await;
        repo.insert_instructor(Instructor::new(
            course_id(COURSE),
            Some(google_id(OBSERVER)),
            "Observer",
            "observer@example.com",
            InstructorRole::Observer,
        ))
        .await;
        repo
    }

    pub fn app<R: CourseStore>(repo: R) -> Router {
        course_router_generic(repo, CourseConfig::default().with_admins([ADMIN]))
    }

    pub async fn send(
        app: &Router,
        method: Method,
        uri: &str,
        user: Option<&str>,
        body: Option<Value>,
    ) -> (StatusCode, Value) {
        let mut builder = Request::builder().method(method).uri(uri);
        if let Some(user) = user {
            builder = builder.header("X-Google-Id", user);
        }
        let body = match body {
            Some(json) => {
                builder = builder.header("content-type", "application/json");
                Body::from(json.to_string())
            }
            None => Body::empty(),
        };

        let response = app
            .clone()
            .oneshot(builder.body(body).unwrap())
            .await
            .unwrap();
        let status = response.status();
        let bytes = axum::body::to_bytes(response.into_body(), usize::MAX)
            .await
            .unwrap();
        let json = serde_json::from_slice(&bytes).unwrap_or(Value::Null);
        (status, json)
    }
}

#[cfg(test)]
mod login_tests {
    use super::support::*;
    use axum::http::{Method, StatusCode};

    #[tokio::test]
    async fn test_missing_identity_is_unauthorized() {
        let app = app(seeded_repo().await);
        let uri = format!("/bin/course?courseid={COURSE}");

        let (status, body) = send(&app, Method::PUT, &uri, None, None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
        assert_eq!(body["detail"], "User is not logged in");

        let (status, _) = send(&app, Method::PUT, &uri, Some("   "), None).await;
        assert_eq!(status, StatusCode::UNAUTHORIZED);
    }

    #[tokio::test]
    async fn test_error_body_is_problem_json() {
        let app = app(seeded_repo().await);
        let (status, body) = send(&app, Method::PUT, "/bin/course", Some(OWNER), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["status"], 400);
        assert_eq!(body["title"], "Bad Request");
        assert_eq!(body["detail"], "The [courseid] HTTP parameter is null.");
    }
}

#[cfg(test)]
mod bin_course_tests {
    use super::support::*;
    use axum::http::{Method, StatusCode};
    use chrono::{DateTime, Utc};

    use crate::domain::entity::{
        account::Account,
        course::{Course, CourseUpdate},
        feedback_session::FeedbackSession,
        instructor::Instructor,
    };
    use crate::domain::repository::{
        AccountRepository, CourseRepository, FeedbackSessionRepository, InstructorRepository,
    };
    use crate::domain::value_object::{course_id::CourseId, google_id::GoogleId};
    use crate::error::CourseResult;
    use crate::infra::memory::InMemoryCourseRepository;
    use crate::presentation::dto::CourseData;

    #[tokio::test]
    async fn test_bin_returns_course_before_binning() {
        let repo = seeded_repo().await;
        let app = app(repo.clone());

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/bin/course?courseid={COURSE}"),
            Some(OWNER),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let data: CourseData = serde_json::from_value(body).unwrap();
        assert_eq!(data.course_id, COURSE);
        assert_eq!(data.time_zone, "Africa/Johannesburg");
        assert_eq!(data.deletion_timestamp, None);

        let stored = repo.course(&course_id(COURSE)).await.unwrap();
        assert!(stored.is_in_recycle_bin());
    }

    #[tokio::test]
    async fn test_bin_without_privilege_is_forbidden() {
        let repo = seeded_repo().await;
        let app = app(repo.clone());
        let uri = format!("/bin/course?courseid={COURSE}");

        let (status, body) = send(&app, Method::PUT, &uri, Some(OBSERVER), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["detail"],
            "You do not have the required privilege (canmodifycourse) to perform this action."
        );

        let (status, body) = send(&app, Method::PUT, &uri, Some(STUDENT), None).await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["detail"],
            "Instructor privilege is required to access this resource."
        );

        assert!(!repo.course(&course_id(COURSE)).await.unwrap().is_in_recycle_bin());
    }

    #[tokio::test]
    async fn test_bin_unknown_course_is_not_found() {
        let app = app(seeded_repo().await);
        let (status, body) = send(
            &app,
            Method::PUT,
            "/bin/course?courseid=NoSuchCourse",
            Some(OWNER),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Course not found");
    }

    #[tokio::test]
    async fn test_bin_malformed_course_id_is_not_found() {
        let app = app(seeded_repo().await);
        let (status, body) = send(
            &app,
            Method::PUT,
            "/bin/course?courseid=no%20such",
            Some(OWNER),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "Course not found");
    }

    /// Serves a stale course snapshot while the store itself no longer has it
    #[derive(Clone)]
    struct VanishingCourseRepository {
        inner: InMemoryCourseRepository,
        snapshot: Course,
    }

    impl CourseRepository for VanishingCourseRepository {
        async fn find_course(&self, course_id: &CourseId) -> CourseResult<Option<Course>> {
            Ok((course_id == &self.snapshot.course_id).then(|| self.snapshot.clone()))
        }

        async fn create_course_and_instructor(
            &self,
            course: &Course,
            instructor: &Instructor,
        ) -> CourseResult<()> {
            self.inner.create_course_and_instructor(course, instructor).await
        }

        async fn update_course_cascade(&self, update: &CourseUpdate) -> CourseResult<Course> {
            self.inner.update_course_cascade(update).await
        }

        async fn move_course_to_recycle_bin(
            &self,
            course_id: &CourseId,
        ) -> CourseResult<DateTime<Utc>> {
            self.inner.move_course_to_recycle_bin(course_id).await
        }

        async fn restore_course_from_recycle_bin(&self, course_id: &CourseId) -> CourseResult<()> {
            self.inner.restore_course_from_recycle_bin(course_id).await
        }

        async fn delete_course_cascade(&self, course_id: &CourseId) -> CourseResult<()> {
            self.inner.delete_course_cascade(course_id).await
        }
    }

    impl InstructorRepository for VanishingCourseRepository {
        async fn find_instructor_for_google_id(
            &self,
            course_id: &CourseId,
            google_id: &GoogleId,
        ) -> CourseResult<Option<Instructor>> {
            self.inner
                .find_instructor_for_google_id(course_id, google_id)
                .await
        }

        async fn find_instructors_for_course(
            &self,
            course_id: &CourseId,
        ) -> CourseResult<Vec<Instructor>> {
            self.inner.find_instructors_for_course(course_id).await
        }

        async fn is_instructor(&self, google_id: &GoogleId) -> CourseResult<bool> {
            self.inner.is_instructor(google_id).await
        }

        async fn set_archive_status(
            &self,
            course_id: &CourseId,
            google_id: &GoogleId,
            is_archived: bool,
        ) -> CourseResult<()> {
            self.inner
                .set_archive_status(course_id, google_id, is_archived)
                .await
        }
    }

    impl AccountRepository for VanishingCourseRepository {
        async fn find_account(&self, google_id: &GoogleId) -> CourseResult<Option<Account>> {
            self.inner.find_account(google_id).await
        }
    }

    impl FeedbackSessionRepository for VanishingCourseRepository {
        async fn find_ongoing_sessions(
            &self,
            start: DateTime<Utc>,
            end: DateTime<Utc>,
        ) -> CourseResult<Vec<FeedbackSession>> {
            self.inner.find_ongoing_sessions(start, end).await
        }
    }

    #[tokio::test]
    async fn test_bin_course_vanished_before_mutation_is_not_found() {
        let inner = InMemoryCourseRepository::new();
        inner
            .insert_instructor(Instructor::co_owner(
                course_id("Vanishing"),
                google_id(OWNER),
                "Instructor 1",
                "instr1@example.com",
            ))
            .await;
        let app = app(VanishingCourseRepository {
            inner,
            snapshot: course("Vanishing"),
        });

        let (status, body) = send(
            &app,
            Method::PUT,
            "/bin/course?courseid=Vanishing",
            Some(OWNER),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
        assert_eq!(body["detail"], "The course Vanishing does not exist.");
    }

    #[tokio::test]
    async fn test_restore_clears_deletion_timestamp() {
        let repo = seeded_repo().await;
        repo.move_course_to_recycle_bin(&course_id(COURSE))
            .await
            .unwrap();
        let app = app(repo.clone());

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/bin/course?courseid={COURSE}"),
            Some(OWNER),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            format!("The course {COURSE} has been restored.")
        );
        assert!(repo.course(&course_id(COURSE)).await.unwrap().deleted_at.is_none());
    }
}

#[cfg(test)]
mod delete_course_tests {
    use super::support::*;
    use axum::http::{Method, StatusCode};

    use crate::domain::repository::CourseRepository;

    #[tokio::test]
    async fn test_delete_binned_course() {
        let repo = seeded_repo().await;
        repo.move_course_to_recycle_bin(&course_id(COURSE))
            .await
            .unwrap();
        let app = app(repo.clone());

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/course?courseid={COURSE}"),
            Some(OWNER),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            format!("The course {COURSE} has been permanently deleted.")
        );
        assert!(repo.course(&course_id(COURSE)).await.is_none());
        assert!(repo.instructors_of(&course_id(COURSE)).await.is_empty());
    }

    #[tokio::test]
    async fn test_delete_active_course_gives_same_message() {
        let repo = seeded_repo().await;
        let app = app(repo.clone());

        let (status, body) = send(
            &app,
            Method::DELETE,
            &format!("/course?courseid={COURSE}"),
            Some(OWNER),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            format!("The course {COURSE} has been permanently deleted.")
        );
    }

    #[tokio::test]
    async fn test_delete_requires_modify_course() {
        let repo = seeded_repo().await;
        let app = app(repo.clone());

        let (status, _) = send(
            &app,
            Method::DELETE,
            &format!("/course?courseid={COURSE}"),
            Some(OBSERVER),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert!(repo.course(&course_id(COURSE)).await.is_some());
    }
}

#[cfg(test)]
mod save_course_tests {
    use super::support::*;
    use axum::http::{Method, StatusCode};
    use chrono::{Duration, Utc};
    use serde_json::json;

    #[tokio::test]
    async fn test_save_updates_course_and_sessions() {
        let repo = seeded_repo().await;
        let now = Utc::now();
        repo.insert_session(session(COURSE, "First", now, now + Duration::days(1)))
            .await;
        let app = app(repo.clone());

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/course?courseid={COURSE}"),
            Some(OWNER),
            Some(json!({"courseName": "New Name", "timeZone": "Asia/Singapore"})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(
            body["message"],
            format!("Updated course [{COURSE}] details: Name: New Name, Time zone: Asia/Singapore")
        );

        let stored = repo.course(&course_id(COURSE)).await.unwrap();
        assert_eq!(stored.name.as_str(), "New Name");
        assert_eq!(stored.time_zone.as_str(), "Asia/Singapore");
        let sessions = repo.sessions_of(&course_id(COURSE)).await;
        assert_eq!(sessions[0].time_zone.as_str(), "Asia/Singapore");
    }

    #[tokio::test]
    async fn test_save_rejects_invalid_time_zone_without_update() {
        let repo = seeded_repo().await;
        let app = app(repo.clone());

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/course?courseid={COURSE}"),
            Some(OWNER),
            Some(json!({"courseName": "New Name", "timeZone": "Not/AZone"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(!body["detail"].as_str().unwrap().is_empty());

        let stored = repo.course(&course_id(COURSE)).await.unwrap();
        assert_eq!(stored.name.as_str(), "Typical Course 1");
        assert_eq!(stored.time_zone.as_str(), "Africa/Johannesburg");
    }

    #[tokio::test]
    async fn test_save_rejects_incomplete_or_malformed_body() {
        let app = app(seeded_repo().await);
        let uri = format!("/course?courseid={COURSE}");

        let (status, body) = send(
            &app,
            Method::PUT,
            &uri,
            Some(OWNER),
            Some(json!({"courseName": "New Name"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Time zone should not be null");

        let (status, body) = send(&app, Method::PUT, &uri, Some(OWNER), None).await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert!(
            body["detail"]
                .as_str()
                .unwrap()
                .starts_with("Invalid request body")
        );
    }

    #[tokio::test]
    async fn test_save_checks_privilege_before_body() {
        let repo = seeded_repo().await;
        let app = app(repo.clone());

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/course?courseid={COURSE}"),
            Some(OBSERVER),
            Some(json!({"courseName": "x"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["detail"],
            "You do not have the required privilege (canmodifycourse) to perform this action."
        );

        let stored = repo.course(&course_id(COURSE)).await.unwrap();
        assert_eq!(stored.name.as_str(), "Typical Course 1");
    }

    #[tokio::test]
    async fn test_save_unknown_course_is_not_found() {
        let app = app(seeded_repo().await);
        let (status, _) = send(
            &app,
            Method::PUT,
            "/course?courseid=NoSuchCourse",
            Some(OWNER),
            Some(json!({"courseName": "New Name", "timeZone": "UTC"})),
        )
        .await;
        assert_eq!(status, StatusCode::NOT_FOUND);
    }
}

#[cfg(test)]
mod create_course_tests {
    use super::support::*;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    use crate::domain::value_object::privilege::{InstructorRole, Privilege};
    use crate::presentation::dto::CourseData;

    #[tokio::test]
    async fn test_create_course_makes_caller_co_owner() {
        let repo = seeded_repo().await;
        let app = app(repo.clone());

        let (status, body) = send(
            &app,
            Method::POST,
            "/course",
            Some(OWNER),
            Some(json!({"courseId": "CS2103", "courseName": "Software Engineering", "timeZone": "Asia/Singapore"})),
        )
        .await;
        assert_eq!(status, StatusCode::CREATED);
        let data: CourseData = serde_json::from_value(body).unwrap();
        assert_eq!(data.course_id, "CS2103");
        assert_eq!(data.course_name, "Software Engineering");

        let instructors = repo.instructors_of(&course_id("CS2103")).await;
        assert_eq!(instructors.len(), 1);
        assert_eq!(instructors[0].role, InstructorRole::CoOwner);
        assert!(instructors[0].has_privilege(Privilege::ModifyCourse));
        assert_eq!(instructors[0].name, format!("{OWNER} name"));
    }

    #[tokio::test]
    async fn test_create_course_missing_id() {
        let app = app(seeded_repo().await);
        let (status, body) = send(
            &app,
            Method::POST,
            "/course",
            Some(OWNER),
            Some(json!({"courseName": "Software Engineering", "timeZone": "UTC"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Course ID should not be null");
    }

    #[tokio::test]
    async fn test_create_duplicate_course_is_conflict() {
        let app = app(seeded_repo().await);
        let (status, body) = send(
            &app,
            Method::POST,
            "/course",
            Some(OWNER),
            Some(json!({"courseId": COURSE, "courseName": "Again", "timeZone": "UTC"})),
        )
        .await;
        assert_eq!(status, StatusCode::CONFLICT);
        assert_eq!(
            body["detail"],
            format!(
                "The course ID {COURSE} has been used by another course, possibly by some other user. \
                 Please try again with a different course ID."
            )
        );
    }

    #[tokio::test]
    async fn test_create_course_requires_instructor() {
        let app = app(seeded_repo().await);
        let (status, _) = send(
            &app,
            Method::POST,
            "/course",
            Some(STUDENT),
            Some(json!({"courseId": "CS2103", "courseName": "SE", "timeZone": "UTC"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
    }
}

#[cfg(test)]
mod archive_course_tests {
    use super::support::*;
    use axum::http::{Method, StatusCode};
    use serde_json::json;

    #[tokio::test]
    async fn test_archive_is_per_instructor() {
        let repo = seeded_repo().await;
        let app = app(repo.clone());

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/course/archive?courseid={COURSE}"),
            Some(OBSERVER),
            Some(json!({"archiveStatus": true})),
        )
        .await;
        assert_eq!(status, StatusCode::OK);
        assert_eq!(body["courseId"], COURSE);
        assert_eq!(body["isArchived"], true);

        let instructors = repo.instructors_of(&course_id(COURSE)).await;
        let observer = instructors
            .iter()
            .find(|i| i.google_id == Some(google_id(OBSERVER)))
            .unwrap();
        let owner = instructors
            .iter()
            .find(|i| i.google_id == Some(google_id(OWNER)))
            .unwrap();
        assert!(observer.is_archived);
        assert!(!owner.is_archived);
    }

    #[tokio::test]
    async fn test_archive_checks_access_before_body() {
        let app = app(seeded_repo().await);

        let (status, body) = send(
            &app,
            Method::PUT,
            &format!("/course/archive?courseid={COURSE}"),
            Some(STUDENT),
            Some(json!({"archiveStatus": "yes"})),
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(
            body["detail"],
            "Instructor privilege is required to access this resource."
        );

        let (status, _) = send(
            &app,
            Method::PUT,
            &format!("/course/archive?courseid={COURSE}"),
            Some(OBSERVER),
            Some(json!({"archiveStatus": "yes"})),
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
    }
}

#[cfg(test)]
mod ongoing_sessions_tests {
    use super::support::*;
    use axum::http::{Method, StatusCode};
    use chrono::{Duration, Utc};

    use crate::domain::entity::instructor::Instructor;
    use crate::domain::services::UNKNOWN_INSTITUTION;
    use crate::presentation::dto::OngoingSessionsData;

    #[tokio::test]
    async fn test_requires_admin() {
        let app = app(seeded_repo().await);
        let (status, body) = send(
            &app,
            Method::GET,
            "/sessions/ongoing?starttime=0&endtime=1",
            Some(OWNER),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::FORBIDDEN);
        assert_eq!(body["detail"], "Admin privilege is required to access this resource.");
    }

    #[tokio::test]
    async fn test_reversed_range_never_queries() {
        let repo = seeded_repo().await;
        let app = app(repo.clone());

        let (status, body) = send(
            &app,
            Method::GET,
            "/sessions/ongoing?starttime=2000&endtime=1000",
            Some(ADMIN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(
            body["detail"],
            "The filter range is not valid. End time should be after start time."
        );
        assert_eq!(repo.ongoing_query_count(), 0);
    }

    #[tokio::test]
    async fn test_non_numeric_bounds_never_query() {
        let repo = seeded_repo().await;
        let app = app(repo.clone());

        let (status, body) = send(
            &app,
            Method::GET,
            "/sessions/ongoing?starttime=yesterday&endtime=1000",
            Some(ADMIN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Invalid startTime parameter");

        let (status, body) = send(
            &app,
            Method::GET,
            "/sessions/ongoing?starttime=1000&endtime=1e9",
            Some(ADMIN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::BAD_REQUEST);
        assert_eq!(body["detail"], "Invalid endTime parameter");
        assert_eq!(repo.ongoing_query_count(), 0);
    }

    #[tokio::test]
    async fn test_report_groups_by_institute() {
        let repo = seeded_repo().await;
        let now = Utc::now();

        repo.insert_session(session(COURSE, "Open", now - Duration::hours(1), now + Duration::hours(1)))
            .await;
        repo.insert_session(session(COURSE, "Awaiting", now + Duration::days(1), now + Duration::days(2)))
            .await;
        repo.insert_session(session(COURSE, "Closed", now - Duration::days(2), now - Duration::days(1)))
            .await;
        let mut deleted = session(COURSE, "Deleted", now - Duration::hours(1), now + Duration::hours(1));
        deleted.deleted_at = Some(now);
        repo.insert_session(deleted).await;
        repo.insert_session(session(COURSE, "Outside", now + Duration::days(10), now + Duration::days(11)))
            .await;

        // no registered instructor: institute unknown
        repo.insert_course(course("Orphan")).await;
        repo.insert_instructor(Instructor::new(
            course_id("Orphan"),
            None,
            "Unregistered",
            "unreg@example.com",
            crate::domain::value_object::privilege::InstructorRole::CoOwner,
        ))
        .await;
        repo.insert_session(session("Orphan", "Orphaned", now - Duration::hours(2), now + Duration::hours(2)))
            .await;

        let app = app(repo.clone());
        let start = (now - Duration::days(3)).timestamp_millis();
        let end = (now + Duration::days(3)).timestamp_millis();
        let (status, body) = send(
            &app,
            Method::GET,
            &format!("/sessions/ongoing?starttime={start}&endtime={end}"),
            Some(ADMIN),
            None,
        )
        .await;
        assert_eq!(status, StatusCode::OK);

        let data: OngoingSessionsData = serde_json::from_value(body).unwrap();
        assert_eq!(data.total_ongoing_sessions, 4);
        assert_eq!(data.total_open_sessions, 2);
        assert_eq!(data.total_closed_sessions, 1);
        assert_eq!(data.total_awaiting_sessions, 1);
        assert_eq!(data.total_institutes, 1);

        let known = &data.sessions["TEAMMATES Test Institute 1"];
        let names: Vec<&str> = known.iter().map(|s| s.feedback_session_name.as_str()).collect();
        assert_eq!(names, vec!["Closed", "Open", "Awaiting"]);
        assert!(known.iter().all(|s| s.instructor_google_id.as_deref() == Some(OWNER)));

        let unknown = &data.sessions[UNKNOWN_INSTITUTION];
        assert_eq!(unknown.len(), 1);
        assert_eq!(unknown[0].course_id, "Orphan");
        assert_eq!(unknown[0].instructor_google_id, None);
        assert_eq!(repo.ongoing_query_count(), 1);
    }
}
