use axum::{
    body::Body,
    extract::{Json, State},
    http::{Method, Request, StatusCode},
    response::{IntoResponse, Response},
};

use app_api::ChartRequest;

use crate::{assets, errors::HttpError, state::HttpState};

pub async fn user_funnel(
    State(state): State<HttpState>,
    Json(req): Json<ChartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::user_funnel(&state.context, req)?;
    Ok(Json(response))
}

pub async fn funnel_counts(
    State(state): State<HttpState>,
    Json(req): Json<ChartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::funnel_counts(&state.context, req)?;
    Ok(Json(response))
}

pub async fn spend_series(
    State(state): State<HttpState>,
    Json(req): Json<ChartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::spend_series(&state.context, req)?;
    Ok(Json(response))
}

pub async fn ad_counts(
    State(state): State<HttpState>,
    Json(req): Json<ChartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::ad_counts(&state.context, req)?;
    Ok(Json(response))
}

pub async fn markers(
    State(state): State<HttpState>,
    Json(req): Json<ChartRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::markers(&state.context, req)?;
    Ok(Json(response))
}

pub async fn reload(
    State(state): State<HttpState>,
    Json(_): Json<app_api::EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::reload(&state.context)?;
    Ok(Json(response))
}

pub async fn workbook_info(
    State(state): State<HttpState>,
    Json(_): Json<app_api::EmptyRequest>,
) -> Result<impl IntoResponse, HttpError> {
    let response = app_api::workbook_info(&state.context)?;
    Ok(Json(response))
}

pub async fn ui_fallback(
    State(state): State<HttpState>,
    req: Request<Body>,
) -> Result<Response, HttpError> {
    if req.method() != Method::GET && req.method() != Method::HEAD {
        return Err(HttpError::new(
            StatusCode::METHOD_NOT_ALLOWED,
            "method not allowed",
            None,
        ));
    }

    let path = req.uri().path().trim_start_matches('/');
    if path.is_empty() {
        return render_index(&state.csrf_token);
    }

    if let Some(asset) = assets::lookup(path) {
        return Ok(asset_response(asset));
    }

    if !path.contains('.') {
        return render_index(&state.csrf_token);
    }

    Err(HttpError::not_found("not found"))
}

fn render_index(csrf_token: &str) -> Result<Response, HttpError> {
    let index = assets::index().ok_or_else(|| HttpError::internal("missing index.html"))?;
    let html = std::str::from_utf8(index.bytes)
        .map_err(|_| HttpError::internal("invalid index.html encoding"))?;
    let injected = inject_csrf(html, csrf_token);
    let mut response = Response::new(Body::from(injected));
    response
        .headers_mut()
        .insert("content-type", index.mime.parse().unwrap());
    Ok(response)
}

fn inject_csrf(html: &str, csrf_token: &str) -> String {
    let snippet = format!(
        "<script>window.__FUNNEL_DASH_CSRF__=\"{}\";</script>",
        csrf_token
    );
    if html.contains("</head>") {
        html.replacen("</head>", &format!("{snippet}</head>"), 1)
    } else {
        format!("{html}{snippet}")
    }
}

fn asset_response(asset: &assets::EmbeddedAsset) -> Response {
    let mut response = Response::new(Body::from(asset.bytes));
    response
        .headers_mut()
        .insert("content-type", asset.mime.parse().unwrap());
    response
}
