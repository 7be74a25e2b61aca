use std::sync::Arc;

use axum::response::{IntoResponse, Response};
use axum::Json;
use base64::engine::general_purpose::STANDARD;
use base64::Engine;

use crate::admin::payload::{AdminError, HistoryItem, HistoryReply, StatusReply};
use crate::http::request::FormFields;
use crate::region::RegionStore;
use crate::routing::{Route, ScriptedRoute};
use crate::script::Script;

type AdminResult = Result<Response, AdminError>;

fn success() -> AdminResult {
    Ok(Json(StatusReply::success()).into_response())
}

fn method_and_path(form: &FormFields) -> Result<(&str, &str), AdminError> {
    match (form.first("method"), form.first("path")) {
        (Some(method), Some(path)) => Ok((method, path)),
        _ => Err(AdminError::InvalidParameter),
    }
}

/// Scripted route behind `target`'s (method, path). Checks run in order:
/// region (3), fields (1), route (3).
fn scripted_route(
    store: &RegionStore,
    target: &str,
    form: &FormFields,
) -> Result<Arc<ScriptedRoute>, AdminError> {
    if !store.contains(target) {
        return Err(AdminError::HistoryNotExist);
    }
    let (method, path) = method_and_path(form)?;
    match store.lookup(target, method, path) {
        Some(Route::Scripted(route)) => Ok(route),
        _ => Err(AdminError::HistoryNotExist),
    }
}

pub fn add(store: &RegionStore, target: &str, form: &FormFields) -> AdminResult {
    let (method, path) = method_and_path(form)?;
    let cmd = form.first("cmd").ok_or(AdminError::InvalidParameter)?;
    let script = Script::decode(cmd)?;

    store.register(target, method, path, script);
    tracing::info!(region = %target, method = %method, path = %path, "Route registered");
    success()
}

pub fn remove(store: &RegionStore, target: &str, form: &FormFields) -> AdminResult {
    if !store.contains(target) {
        return Err(AdminError::RouteNotExist);
    }
    let (method, path) = method_and_path(form)?;

    // The region may vanish between the check and here; removal is a no-op then.
    let removed = store.unregister(target, method, path).unwrap_or(false);
    tracing::info!(region = %target, method = %method, path = %path, removed, "Route removed");
    success()
}

pub fn remove_all(store: &RegionStore, target: &str) -> AdminResult {
    let existed = store.remove_region(target);
    tracing::info!(region = %target, existed, "Region removed");
    success()
}

pub fn history(store: &RegionStore, target: &str, form: &FormFields) -> AdminResult {
    let route = scripted_route(store, target, form)?;
    let history = route
        .history()
        .into_iter()
        .map(|entry| HistoryItem {
            query_raw: STANDARD.encode(entry.query_raw.as_bytes()),
            body_raw: STANDARD.encode(&entry.body_raw),
        })
        .collect();

    Ok(Json(HistoryReply { status: 0, history }).into_response())
}

pub fn clear_history(store: &RegionStore, target: &str, form: &FormFields) -> AdminResult {
    let route = scripted_route(store, target, form)?;
    route.clear_history();
    tracing::info!(region = %target, method = %route.method(), path = %route.path(), "History cleared");
    success()
}
