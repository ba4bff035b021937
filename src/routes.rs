use axum::async_trait;
use axum::body::HttpBody;
use axum::extract::{FromRequest, Path, RequestParts};
use axum::handler::Handler;
use axum::http::header::CONTENT_TYPE;
use axum::routing::{get, post};
use axum::{BoxError, Extension, Form, Json, Router};
use serde::de::DeserializeOwned;
use serde::Serialize;
use uuid::Uuid;

use crate::err::handler404;
use crate::models::{SignupRequest, StudentInfo, UpdateStudent};
use crate::service::{StudentService, UpdateOutcome};
use crate::{proceeds, Error, Payload};

pub fn router(students: StudentService) -> Router {
    Router::new()
        .route("/signup", post(signup))
        .route("/students", get(list_students))
        .route(
            "/students/:id",
            get(get_student).patch(update_student).delete(delete_student),
        )
        .fallback(handler404.into_service())
        .layer(Extension(students))
}

/// Request body read as `application/x-www-form-urlencoded` when the
/// `Content-Type` says so, as JSON otherwise.
///
/// Form bodies cannot express `null`: a form field is either absent or a
/// (possibly empty) string.
#[derive(Debug)]
pub struct Body<T>(pub T);

#[async_trait]
impl<T, B> FromRequest<B> for Body<T>
where
    T: DeserializeOwned,
    B: HttpBody + Send,
    B::Data: Send,
    B::Error: Into<BoxError>,
{
    type Rejection = Error;

    async fn from_request(req: &mut RequestParts<B>) -> Result<Self, Self::Rejection> {
        let form = req
            .headers()
            .get(CONTENT_TYPE)
            .and_then(|value| value.to_str().ok())
            .map_or(false, |value| {
                value.starts_with("application/x-www-form-urlencoded")
            });
        if form {
            let Form(value) = Form::<T>::from_request(req).await?;
            Ok(Self(value))
        } else {
            let Json(value) = Json::<T>::from_request(req).await?;
            Ok(Self(value))
        }
    }
}

async fn signup(
    Extension(students): Extension<StudentService>,
    Body(request): Body<SignupRequest>,
) -> Payload<CreatedStudent> {
    let student_id = students.signup(request).await?;
    proceeds(CreatedStudent {
        message: "User created successfully.",
        student_id,
    })
}

async fn list_students(Extension(students): Extension<StudentService>) -> Payload<StudentList> {
    proceeds(StudentList {
        students: students.list().await?,
    })
}

async fn get_student(
    Extension(students): Extension<StudentService>,
    Path(id): Path<String>,
) -> Payload<FoundStudent> {
    proceeds(FoundStudent {
        student: students.get(&id).await?,
    })
}

async fn update_student(
    Extension(students): Extension<StudentService>,
    Path(id): Path<String>,
    Body(request): Body<UpdateStudent>,
) -> Payload<Message> {
    let message = match students.update(&id, request).await? {
        UpdateOutcome::Updated => "Student updated successfully.",
        UpdateOutcome::Unchanged => "No updates.",
    };
    proceeds(Message { message })
}

async fn delete_student(
    Extension(students): Extension<StudentService>,
    Path(id): Path<String>,
) -> Payload<Message> {
    students.delete(&id).await?;
    proceeds(Message {
        message: "Student deleted successfully.",
    })
}

#[derive(Debug, Clone, Serialize)]
pub struct Message {
    message: &'static str,
}

#[derive(Debug, Clone, Serialize)]
pub struct CreatedStudent {
    message: &'static str,
    student_id: Uuid,
}

#[derive(Debug, Clone, Serialize)]
pub struct StudentList {
    students: Vec<StudentInfo>,
}

#[derive(Debug, Clone, Serialize)]
pub struct FoundStudent {
    student: StudentInfo,
}
