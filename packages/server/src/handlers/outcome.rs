use axum::{
    Json,
    http::StatusCode,
    response::{IntoResponse, Redirect, Response},
};
use serde::{Deserialize, Serialize};

use crate::error::AppError;

/// Optional post-success redirect for form-driven clients.
#[derive(Debug, Default, Deserialize, utoipa::IntoParams)]
#[into_params(parameter_in = Query)]
pub struct RedirectQuery {
    /// Site-relative path to redirect to (303) on success. A
    /// `createSuccess`, `updateSuccess` or `deleteSuccess` flag is appended.
    #[param(example = "/tools")]
    pub redirect: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub enum Flash {
    Created,
    Updated,
    Deleted,
}

impl Flash {
    fn param(self) -> &'static str {
        match self {
            Flash::Created => "createSuccess",
            Flash::Updated => "updateSuccess",
            Flash::Deleted => "deleteSuccess",
        }
    }
}

/// How a successful mutation is answered: a JSON body or a redirect.
#[derive(Debug)]
pub struct Outcome {
    location: Option<String>,
}

impl RedirectQuery {
    /// Check the redirect target up front so a bad target fails the request
    /// before anything is written.
    pub fn outcome(&self, flash: Flash) -> Result<Outcome, AppError> {
        let Some(target) = self
            .redirect
            .as_deref()
            .map(str::trim)
            .filter(|t| !t.is_empty())
        else {
            return Ok(Outcome { location: None });
        };
        if !is_site_relative(target) {
            return Err(AppError::Validation(
                "redirect must be a site-relative path".into(),
            ));
        }

        let (path, fragment) = match target.split_once('#') {
            Some((path, fragment)) => (path, Some(fragment)),
            None => (target, None),
        };
        let separator = if path.contains('?') { '&' } else { '?' };
        let mut location = format!("{path}{separator}{}=true", flash.param());
        if let Some(fragment) = fragment {
            location.push('#');
            location.push_str(fragment);
        }
        Ok(Outcome {
            location: Some(location),
        })
    }
}

impl Outcome {
    pub fn json<T: Serialize>(self, status: StatusCode, body: T) -> Response {
        match self.location {
            Some(location) => Redirect::to(&location).into_response(),
            None => (status, Json(body)).into_response(),
        }
    }

    pub fn no_content(self) -> Response {
        match self.location {
            Some(location) => Redirect::to(&location).into_response(),
            None => StatusCode::NO_CONTENT.into_response(),
        }
    }

    pub fn location(&self) -> Option<&str> {
        self.location.as_deref()
    }
}

fn is_site_relative(target: &str) -> bool {
    target.starts_with('/')
        && !target.starts_with("//")
        && !target.contains('\\')
        && !target.chars().any(char::is_control)
}
