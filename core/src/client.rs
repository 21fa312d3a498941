//! Stateless HTTP request builder and response parser for the todo API.
//!
//! # Design
//! `TodoClient` holds only a `base_url`. Each operation is split into a
//! `build_*` method that produces an `HttpRequest` and a `parse_*` method
//! that consumes an `HttpResponse`, so the client itself never does I/O.

use serde::de::DeserializeOwned;
use serde::Deserialize;

use crate::error::ApiError;
use crate::http::{HttpMethod, HttpRequest, HttpResponse};
use crate::types::{CreateTodo, Message, Todo, UpdateTodo};

#[derive(Debug, Clone)]
pub struct TodoClient {
    base_url: String,
}

impl TodoClient {
    pub fn new(base_url: &str) -> Self {
        Self {
            base_url: base_url.trim_end_matches('/').to_string(),
        }
    }

    fn url(&self, path: &str) -> String {
        format!("{}{path}", self.base_url)
    }

    pub fn build_root(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.url("/"))
    }

    pub fn build_list_todos(&self) -> HttpRequest {
        HttpRequest::new(HttpMethod::Get, self.url("/todos"))
    }

    pub fn build_create_todo(&self, input: &CreateTodo) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(HttpRequest::new(HttpMethod::Post, self.url("/todos")).with_json(body))
    }

    pub fn build_update_todo(&self, id: i64, input: &UpdateTodo) -> Result<HttpRequest, ApiError> {
        let body = to_json(input)?;
        Ok(HttpRequest::new(HttpMethod::Put, self.url(&format!("/todos/{id}"))).with_json(body))
    }

    pub fn build_delete_todo(&self, id: i64) -> HttpRequest {
        HttpRequest::new(HttpMethod::Delete, self.url(&format!("/todos/{id}")))
    }

    pub fn parse_root(&self, response: HttpResponse) -> Result<String, ApiError> {
        let message: Message = parse_json(response, 200)?;
        Ok(message.message)
    }

    pub fn parse_list_todos(&self, response: HttpResponse) -> Result<Vec<Todo>, ApiError> {
        parse_json(response, 200)
    }

    pub fn parse_create_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 201)
    }

    pub fn parse_update_todo(&self, response: HttpResponse) -> Result<Todo, ApiError> {
        parse_json(response, 200)
    }

    /// Returns the server's confirmation message.
    pub fn parse_delete_todo(&self, response: HttpResponse) -> Result<String, ApiError> {
        let message: Message = parse_json(response, 200)?;
        Ok(message.message)
    }
}

fn to_json<T: serde::Serialize>(value: &T) -> Result<String, ApiError> {
    serde_json::to_string(value).map_err(|e| ApiError::Serialization(e.to_string()))
}

fn parse_json<T: DeserializeOwned>(response: HttpResponse, expected: u16) -> Result<T, ApiError> {
    check_status(&response, expected)?;
    serde_json::from_str(&response.body).map_err(|e| ApiError::Deserialization(e.to_string()))
}

#[derive(Deserialize)]
struct ErrorBody {
    detail: serde_json::Value,
}

/// `detail` is a string for 404s; keep anything else as its JSON text.
fn detail(body: &str) -> String {
    match serde_json::from_str::<ErrorBody>(body) {
        Ok(ErrorBody {
            detail: serde_json::Value::String(text),
        }) => text,
        Ok(ErrorBody { detail }) => detail.to_string(),
        Err(_) => body.to_string(),
    }
}

/// Map non-success status codes to the appropriate `ApiError` variant.
fn check_status(response: &HttpResponse, expected: u16) -> Result<(), ApiError> {
    match response.status {
        status if status == expected => Ok(()),
        404 => Err(ApiError::NotFound {
            detail: detail(&response.body),
        }),
        422 => Err(ApiError::Validation {
            detail: detail(&response.body),
        }),
        status => Err(ApiError::Http {
            status,
            body: response.body.clone(),
        }),
    }
}
