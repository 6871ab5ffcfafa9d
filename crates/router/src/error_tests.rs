use super::*;
use axum::response::IntoResponse;

#[test]
fn bad_request_maps_to_400() {
    let resp = ApiError::BadRequest("bad".to_string()).into_response();
    assert_eq!(resp.status(), StatusCode::BAD_REQUEST);
}

#[test]
fn conflict_maps_to_409() {
    let resp = ApiError::Conflict("dup".to_string()).into_response();
    assert_eq!(resp.status(), StatusCode::CONFLICT);
}

#[test]
fn not_found_maps_to_404() {
    let resp = ApiError::NotFound("missing".to_string()).into_response();
    assert_eq!(resp.status(), StatusCode::NOT_FOUND);
}

#[test]
fn internal_maps_to_500() {
    let resp = ApiError::Internal("boom".to_string()).into_response();
    assert_eq!(resp.status(), StatusCode::INTERNAL_SERVER_ERROR);
}

#[test]
fn registry_not_found_maps_to_api_not_found() {
    let err: ApiError = RegistryError::NotFound("a".to_string()).into();
    assert!(matches!(err, ApiError::NotFound(_)));
}

#[test]
fn registry_already_exists_maps_to_api_conflict() {
    let err: ApiError = RegistryError::AlreadyExists("a".to_string()).into();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[test]
fn flow_store_name_conflict_maps_to_api_conflict() {
    let err: ApiError = FlowStoreError::NameConflict("f".to_string()).into();
    assert!(matches!(err, ApiError::Conflict(_)));
}

#[test]
fn engine_no_start_agents_maps_to_bad_request() {
    let err: ApiError = EngineError::NoStartAgents.into();
    assert!(matches!(err, ApiError::BadRequest(_)));
}
