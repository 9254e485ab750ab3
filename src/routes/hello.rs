use actix_web::{get, web, HttpResponse};
use serde::Deserialize;

#[derive(Debug, Deserialize)]
pub struct HelloQuery {
    name: String,
}

#[tracing::instrument(name = "Say hello.")]
#[get("/endpoint")]
pub async fn hello(query: web::Query<HelloQuery>) -> HttpResponse {
    HttpResponse::Ok().body(format!("Hello {}", query.name))
}
