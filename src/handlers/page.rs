use actix_web::{http::StatusCode, web, HttpResponse, Result};

use crate::handlers::error_page;
use crate::models::{PageModel, SearchForm};
use crate::AppState;

pub async fn index(state: web::Data<AppState>) -> Result<HttpResponse> {
    let model = PageModel::empty(&state.config.app);
    Ok(render_page(&state, &model))
}

pub async fn search(
    state: web::Data<AppState>,
    form: web::Form<SearchForm>,
) -> Result<HttpResponse> {
    let query = form.into_inner().input;

    match state.search_service.search(&query).await {
        Ok(responses) => {
            let model = PageModel::new(&state.config.app, query, responses);
            Ok(render_page(&state, &model))
        }
        Err(e) => {
            tracing::error!("Search error: {:?}", e);
            Ok(error_page(
                StatusCode::INTERNAL_SERVER_ERROR,
                "The search service could not complete this request.",
            ))
        }
    }
}

fn render_page(state: &AppState, model: &PageModel) -> HttpResponse {
    HttpResponse::Ok()
        .content_type("text/html; charset=utf-8")
        .body(state.renderer.render(model))
}
