//! Form extraction that mirrors how browsers submit HTML forms.

use axum::{
    extract::{FromRequest, Query, Request},
    http::{header::CONTENT_TYPE, HeaderMap},
    Form,
};
use bookstore_http::error::AppError;
use serde::de::DeserializeOwned;

use crate::modules::books::models::BookForm;

/// Form types whose missing fields can be filled from another submission.
pub trait FormFields: DeserializeOwned + Default + Send {
    fn or(self, fallback: Self) -> Self;
}

impl FormFields for BookForm {
    fn or(self, fallback: Self) -> Self {
        BookForm::or(self, fallback)
    }
}

/// Fields from a urlencoded body, falling back to the query string.
///
/// Requests without a urlencoded body are not rejected; only their query
/// string is read. A query string that fails to parse counts as empty.
#[derive(Debug)]
pub struct Submitted<T>(pub T);

impl<S, T> FromRequest<S> for Submitted<T>
where
    S: Send + Sync,
    T: FormFields,
{
    type Rejection = AppError;

    async fn from_request(req: Request, state: &S) -> Result<Self, Self::Rejection> {
        let from_query = Query::<T>::try_from_uri(req.uri())
            .map(|Query(fields)| fields)
            .unwrap_or_default();

        if !is_urlencoded(req.headers()) {
            return Ok(Self(from_query));
        }

        let Form(from_body) = Form::<T>::from_request(req, state)
            .await
            .map_err(|rejection| AppError::bad_request(rejection.body_text()))?;

        Ok(Self(from_body.or(from_query)))
    }
}

fn is_urlencoded(headers: &HeaderMap) -> bool {
    headers
        .get(CONTENT_TYPE)
        .and_then(|value| value.to_str().ok())
        .and_then(|value| value.split(';').next())
        .is_some_and(|mime| {
            mime.trim()
                .eq_ignore_ascii_case("application/x-www-form-urlencoded")
        })
}
