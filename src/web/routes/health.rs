use axum::{extract::State, Json};
use serde_json::{json, Value};

use crate::web::SharedConfig;

pub async fn health_handler(State(config): State<SharedConfig>) -> Json<Value> {
    Json(json!({
        "status": "ok",
        "roster_present": config.roster_path.exists(),
        "activity_present": config.activity_path.exists(),
    }))
}
