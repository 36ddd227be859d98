//! Dashboard, search and CRUD pages for medicines.

use axum::{
    extract::{Path, Query, State},
    http::HeaderMap,
    response::Response,
    routing::{get, post},
    Form, Router,
};
use chrono::{Local, NaiveDate, Utc};
use serde::Deserialize;
use sqlx::{Sqlite, SqlitePool, Transaction};

use super::AppState;
use crate::error::AppError;
use crate::flash::{self, Flash};
use crate::models::{Medicine, MedicineForm, NewMedicine};
use crate::views::{self, Summary};

/// Creates the medicines router.
pub fn router(state: AppState) -> Router {
    Router::new()
        .route("/", get(dashboard))
        .route("/search", get(search))
        .route("/add", get(add_form).post(add_medicine))
        .route("/view/{id}", get(view_medicine))
        .route("/update/{id}", get(edit_form).post(update_medicine))
        .route("/delete/{id}", post(delete_medicine))
        .with_state(state)
}

/// Query string for the search page.
#[derive(Debug, Default, Deserialize)]
pub struct SearchParams {
    #[serde(default)]
    pub q: String,
}

fn today() -> NaiveDate {
    Local::now().date_naive()
}

/// GET /
///
/// Lists every medicine, newest first, with total and near-expiry counts.
async fn dashboard(
    State(state): State<AppState>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let medicines = fetch_all(&state.pool).await?;
    let today = today();
    let summary = Summary::of(&medicines, today);

    let flash = Flash::from_headers(&headers);
    let html = views::dashboard(&medicines, summary, today, None, flash.as_ref());
    Ok(flash::page(html, flash.as_ref()))
}

/// GET /search?q=
///
/// Case-insensitive substring match on the name. An empty query matches
/// nothing, and the near-expiry counter is not computed for results.
async fn search(
    State(state): State<AppState>,
    Query(params): Query<SearchParams>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let query = params.q.trim();
    let results = if query.is_empty() {
        Vec::new()
    } else {
        search_by_name(&state.pool, query).await?
    };

    let flash = Flash::from_headers(&headers);
    let html = views::dashboard(
        &results,
        Summary::search(&results),
        today(),
        Some(query),
        flash.as_ref(),
    );
    Ok(flash::page(html, flash.as_ref()))
}

/// GET /add
async fn add_form(headers: HeaderMap) -> Response {
    let flash = Flash::from_headers(&headers);
    flash::page(views::form(None, flash.as_ref()), flash.as_ref())
}

/// POST /add
///
/// The row is inserted inside a transaction that only commits once its QR
/// image is on disk and the path is recorded.
async fn add_medicine(
    State(state): State<AppState>,
    Form(form): Form<MedicineForm>,
) -> Result<Response, AppError> {
    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => return Ok(Flash::danger(e.to_string()).redirect("/add")),
    };

    let mut tx = state.pool.begin().await?;
    let id = insert_medicine(&mut tx, &input).await?;

    let qr_path = state.codes.write(&input.label()).await?;
    let qr_path = qr_path.to_string_lossy().into_owned();

    if let Err(e) = finish_insert(tx, id, &qr_path).await {
        state.codes.discard(&qr_path).await;
        return Err(e.into());
    }

    tracing::info!(id, name = %input.name, qr_path = %qr_path, "medicine added");
    Ok(Flash::success("Medicine added successfully with QR code.").redirect("/"))
}

/// GET /view/{id}
async fn view_medicine(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let medicine = find_medicine(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound(id))?;

    let flash = Flash::from_headers(&headers);
    Ok(flash::page(views::view(&medicine, flash.as_ref()), flash.as_ref()))
}

/// GET /update/{id}
async fn edit_form(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    headers: HeaderMap,
) -> Result<Response, AppError> {
    let medicine = find_medicine(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound(id))?;

    let flash = Flash::from_headers(&headers);
    Ok(flash::page(
        views::form(Some(&medicine), flash.as_ref()),
        flash.as_ref(),
    ))
}

/// POST /update/{id}
///
/// Overwrites every field and always regenerates the QR image. The previous
/// image is removed once the new row is stored.
async fn update_medicine(
    State(state): State<AppState>,
    Path(id): Path<i64>,
    Form(form): Form<MedicineForm>,
) -> Result<Response, AppError> {
    let existing = find_medicine(&state.pool, id)
        .await?
        .ok_or(AppError::NotFound(id))?;

    let input = match form.validate() {
        Ok(input) => input,
        Err(e) => return Ok(Flash::danger(e.to_string()).redirect(&format!("/update/{}", id))),
    };

    let qr_path = state.codes.write(&input.label()).await?;
    let qr_path = qr_path.to_string_lossy().into_owned();
    let last_updated = existing.next_update_time(Utc::now());

    let result = sqlx::query(
        r#"
        UPDATE medicine
        SET name = ?, manufacturer = ?, manufacture_date = ?, expiry_date = ?,
            price = ?, additional_info = ?, qr_path = ?, last_updated = ?
        WHERE id = ?
        "#,
    )
    .bind(&input.name)
    .bind(&input.manufacturer)
    .bind(&input.manufacture_date)
    .bind(&input.expiry_date)
    .bind(input.price)
    .bind(&input.additional_info)
    .bind(&qr_path)
    .bind(last_updated)
    .bind(id)
    .execute(&state.pool)
    .await;

    match result {
        Err(e) => {
            state.codes.discard(&qr_path).await;
            return Err(e.into());
        }
        // Deleted between the lookup and the update
        Ok(done) if done.rows_affected() == 0 => {
            state.codes.discard(&qr_path).await;
            return Err(AppError::NotFound(id));
        }
        Ok(_) => {}
    }

    if !existing.qr_path.is_empty() && existing.qr_path != qr_path {
        state.codes.discard(&existing.qr_path).await;
    }

    tracing::info!(id, name = %input.name, qr_path = %qr_path, "medicine updated");
    Ok(Flash::success("Medicine updated successfully with updated QR text.").redirect("/"))
}

/// POST /delete/{id}
///
/// Removes the QR image if it is still on disk, then the row. Unknown ids
/// are not an error.
async fn delete_medicine(
    State(state): State<AppState>,
    Path(id): Path<i64>,
) -> Result<Response, AppError> {
    let qr_path: Option<String> = sqlx::query_scalar("SELECT qr_path FROM medicine WHERE id = ?")
        .bind(id)
        .fetch_optional(&state.pool)
        .await?;

    if let Some(path) = qr_path.as_deref().filter(|p| !p.is_empty()) {
        state.codes.remove(path).await?;
    }

    let deleted = sqlx::query("DELETE FROM medicine WHERE id = ?")
        .bind(id)
        .execute(&state.pool)
        .await?
        .rows_affected();

    tracing::info!(id, deleted, "medicine deleted");
    Ok(Flash::info("Medicine deleted.").redirect("/"))
}

async fn fetch_all(pool: &SqlitePool) -> Result<Vec<Medicine>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM medicine ORDER BY id DESC")
        .fetch_all(pool)
        .await
}

async fn find_medicine(pool: &SqlitePool, id: i64) -> Result<Option<Medicine>, sqlx::Error> {
    sqlx::query_as("SELECT * FROM medicine WHERE id = ?")
        .bind(id)
        .fetch_optional(pool)
        .await
}

/// SQLite's LIKE is case-insensitive for ASCII. Wildcards in the query are
/// escaped so they match literally.
async fn search_by_name(pool: &SqlitePool, query: &str) -> Result<Vec<Medicine>, sqlx::Error> {
    sqlx::query_as(
        r#"
        SELECT * FROM medicine
        WHERE name LIKE '%' || ? || '%' ESCAPE '\'
        ORDER BY id DESC
        "#,
    )
    .bind(escape_like(query))
    .fetch_all(pool)
    .await
}

fn escape_like(query: &str) -> String {
    let mut escaped = String::with_capacity(query.len());
    for c in query.chars() {
        if matches!(c, '%' | '_' | '\\') {
            escaped.push('\\');
        }
        escaped.push(c);
    }
    escaped
}

/// Inserts the row with an empty image path, reserving its id.
async fn insert_medicine(
    tx: &mut Transaction<'_, Sqlite>,
    input: &NewMedicine,
) -> Result<i64, sqlx::Error> {
    let result = sqlx::query(
        r#"
        INSERT INTO medicine
            (name, manufacturer, manufacture_date, expiry_date, price, additional_info, qr_path, last_updated)
        VALUES (?, ?, ?, ?, ?, ?, '', ?)
        "#,
    )
    .bind(&input.name)
    .bind(&input.manufacturer)
    .bind(&input.manufacture_date)
    .bind(&input.expiry_date)
    .bind(input.price)
    .bind(&input.additional_info)
    .bind(Utc::now())
    .execute(&mut **tx)
    .await?;

    Ok(result.last_insert_rowid())
}

/// Records the image path and commits the insert.
async fn finish_insert(
    mut tx: Transaction<'_, Sqlite>,
    id: i64,
    qr_path: &str,
) -> Result<(), sqlx::Error> {
    sqlx::query("UPDATE medicine SET qr_path = ? WHERE id = ?")
        .bind(qr_path)
        .bind(id)
        .execute(&mut *tx)
        .await?;
    tx.commit().await
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_escape_like() {
        assert_eq!(escape_like("asp"), "asp");
        assert_eq!(escape_like("50%"), "50\\%");
        assert_eq!(escape_like("a_b\\c"), "a\\_b\\\\c");
    }

    #[test]
    fn test_search_params_default_to_empty() {
        let uri: axum::http::Uri = "/search".parse().unwrap();
        let Query(params) = Query::<SearchParams>::try_from_uri(&uri).unwrap();
        assert_eq!(params.q, "");
    }
}
