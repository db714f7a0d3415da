use actix_web::{http::StatusCode, HttpResponse, Result};

use crate::utils::escape_html;

pub fn error_page(status: StatusCode, message: &str) -> HttpResponse {
    let reason = status.canonical_reason().unwrap_or("Error");
    HttpResponse::build(status)
        .content_type("text/html; charset=utf-8")
        .body(format!(
            "<!DOCTYPE html>\n<html lang=\"en\">\n<head><meta charset=\"utf-8\"><title>{code} {reason}</title></head>\n<body>\n    <h1>{code} {reason}</h1>\n    <p>{message}</p>\n</body>\n</html>\n",
            code = status.as_u16(),
            reason = reason,
            message = escape_html(message),
        ))
}

pub async fn not_found() -> Result<HttpResponse> {
    Ok(error_page(StatusCode::NOT_FOUND, "Page not found"))
}
