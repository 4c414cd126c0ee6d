use std::sync::Arc;

use axum::{
    Json,
    extract::{Query, State, rejection::QueryRejection},
    http::header,
    response::IntoResponse,
};
use log::debug;
use serde::Deserialize;

use crate::{error::Result, gateway::PosterGateway, types::PosterResponse};

use super::GistProxy;

#[derive(Debug, Deserialize)]
pub(crate) struct CacheQuery {
    imdb: Option<String>,
}

pub(crate) async fn cache_handler(
    State(gateway): State<Arc<PosterGateway>>,
    query: std::result::Result<Query<CacheQuery>, QueryRejection>,
) -> Result<Json<PosterResponse>> {
    let imdb = match query {
        Ok(Query(CacheQuery { imdb })) => imdb.unwrap_or_default(),
        Err(rejection) => {
            debug!("Failed to parse query string: {}", rejection.body_text());
            String::new()
        }
    };

    let response = gateway.get_poster(&imdb).await?;
    Ok(Json(response))
}

pub(crate) async fn gist_handler(
    State(gist): State<Arc<GistProxy>>,
) -> Result<impl IntoResponse> {
    let body = gist.fetch().await?;
    Ok(([(header::CONTENT_TYPE, "text/plain; charset=utf-8")], body))
}
