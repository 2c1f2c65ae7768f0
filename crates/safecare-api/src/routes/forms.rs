use axum::Json;
use axum::extract::Path;
use serde::Serialize;

use safecare_core::models::form_kind::FormKind;
use safecare_core::schema::FieldDef;
use safecare_forms::{all_forms, find_form};

use crate::error::ApiError;

#[derive(Serialize)]
pub struct FormSummary {
    kind: FormKind,
    name: String,
    route: String,
}

#[derive(Serialize)]
pub struct FormDetail {
    kind: FormKind,
    name: String,
    fields: Vec<FieldDef>,
}

pub async fn list_forms() -> Json<Vec<FormSummary>> {
    let forms: Vec<FormSummary> = all_forms()
        .iter()
        .map(|f| FormSummary {
            kind: f.kind(),
            name: f.name().to_string(),
            route: f.kind().route().to_string(),
        })
        .collect();
    Json(forms)
}

pub async fn get_form_detail(Path(slug): Path<String>) -> Result<Json<FormDetail>, ApiError> {
    let form = find_form(&slug).ok_or_else(|| ApiError::NotFound(format!("form not found: {slug}")))?;

    Ok(Json(FormDetail {
        kind: form.kind(),
        name: form.name().to_string(),
        fields: form.fields().to_vec(),
    }))
}
