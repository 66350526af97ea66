use std::io;
use std::sync::Arc;

use ntex::web;
use ntex::web::HttpRequest;
use serde::Serialize;
use spdlog::{info, warn};

use crate::article_collection::ArticleCollection;
use crate::config::Config;
use crate::error::ContentError;
use crate::query_string::{ListingQuery, QueryString};
use crate::view::article_view::ArticleRenderer;
use crate::view::list_view::ListRenderer;

/// Loaded once at startup and only read afterwards, so handlers share it without locking.
struct AppState {
    collection: ArticleCollection,
    page_size: u32,
}

#[derive(Serialize)]
struct ErrorBody {
    error: String,
}

fn json_response<T: Serialize>(value: &T) -> web::HttpResponse {
    match serde_json::to_string(value) {
        Ok(body) => web::HttpResponse::Ok()
            .content_type("application/json")
            .body(body),
        Err(e) => web::HttpResponse::InternalServerError()
            .body(format!("Error serializing response: {}", e)),
    }
}

fn error_response(err: &ContentError) -> web::HttpResponse {
    let body = serde_json::to_string(&ErrorBody { error: err.to_string() })
        .unwrap_or_else(|_| "{}".to_string());
    let mut builder = if err.is_not_found() {
        web::HttpResponse::NotFound()
    } else {
        web::HttpResponse::InternalServerError()
    };
    builder.content_type("application/json").body(body)
}

fn get_listing_query(req: &HttpRequest) -> ListingQuery {
    match req.uri().query() {
        Some(query_str) => QueryString::from(query_str).to_listing_query(),
        None => ListingQuery::default(),
    }
}

#[web::get("/articles")]
async fn list(req: HttpRequest, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let query = get_listing_query(&req);
    let page = ListRenderer::new(state.page_size).render(&state.collection, &query);
    json_response(&page)
}

#[web::get("/articles/{slug}")]
async fn view(slug: web::types::Path<String>, state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    let slug = slug.into_inner();
    match ArticleRenderer::render(&state.collection, &slug) {
        Ok(view) => json_response(&view),
        Err(e) => {
            warn!("Article lookup failed: {}", e);
            error_response(&e)
        }
    }
}

#[web::get("/categories")]
async fn categories(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    json_response(&state.collection.categories())
}

#[web::get("/slugs")]
async fn slugs(state: web::types::State<Arc<AppState>>) -> web::HttpResponse {
    json_response(&state.collection.slugs())
}

pub async fn server_run(config: Config, collection: ArticleCollection) -> io::Result<()> {
    let bind_addr = config.server.address.clone();
    let bind_port = config.server.port;
    info!("Serving {} articles on {}:{}", collection.len(), bind_addr, bind_port);

    let app_state = Arc::new(AppState {
        collection,
        page_size: config.page_size(),
    });

    web::HttpServer::new(move || {
        web::App::new()
            .state(app_state.clone())
            .service(list)
            .service(view)
            .service(categories)
            .service(slugs)
    })
        .bind((bind_addr, bind_port))?
        .run()
        .await
}
