//! HTML pages for the dashboard.

use chrono::NaiveDate;
use medstock_core::ExpiryStatus;

use crate::codes::CodeStore;
use crate::flash::Flash;
use crate::models::Medicine;

/// Counters shown above the medicine table.
#[derive(Debug, Clone, Copy, PartialEq, Eq)]
pub struct Summary {
    pub total: usize,
    pub near_expiry: usize,
}

impl Summary {
    /// Counts every record and the ones at or near expiry on `today`.
    pub fn of(medicines: &[Medicine], today: NaiveDate) -> Self {
        Self {
            total: medicines.len(),
            near_expiry: medstock_core::count_near_expiry(
                medicines.iter().map(|m| m.expiry_date.as_str()),
                today,
            ),
        }
    }

    /// Search results report their size but not the near-expiry count.
    pub fn search(results: &[Medicine]) -> Self {
        Self {
            total: results.len(),
            near_expiry: 0,
        }
    }
}

/// Escapes text for use inside HTML element content and quoted attributes.
pub fn escape(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&#39;"),
            _ => out.push(c),
        }
    }
    out
}

fn layout(title: &str, flash: Option<&Flash>, search: &str, body: &str) -> String {
    let mut html = format!(
        r#"<!DOCTYPE html>
<html lang="en">
<head>
<meta charset="utf-8">
<meta name="viewport" content="width=device-width, initial-scale=1">
<title>{title} - Medicine Inventory</title>
<style>
body {{ font-family: sans-serif; margin: 0 auto; max-width: 1100px; padding: 1rem; }}
nav {{ display: flex; gap: 1rem; align-items: center; margin-bottom: 1rem; }}
table {{ border-collapse: collapse; width: 100%; }}
th, td {{ border-bottom: 1px solid #ddd; padding: .4rem; text-align: left; }}
.alert {{ padding: .6rem; border-radius: 4px; margin-bottom: 1rem; }}
.alert-success {{ background: #d1e7dd; }}
.alert-info {{ background: #cff4fc; }}
.alert-warning {{ background: #fff3cd; }}
.alert-danger {{ background: #f8d7da; }}
.status-expired {{ color: #b02a37; font-weight: bold; }}
.status-near_expiry {{ color: #997404; font-weight: bold; }}
.status-ok {{ color: #146c43; }}
.status-unknown {{ color: #6c757d; }}
.cards {{ display: flex; gap: 1rem; margin-bottom: 1rem; }}
.card {{ border: 1px solid #ddd; border-radius: 4px; padding: .6rem 1rem; }}
form.inline {{ display: inline; }}
label {{ display: block; margin-top: .6rem; }}
</style>
</head>
<body>
<nav>
<a href="/">Dashboard</a>
<a href="/add">Add medicine</a>
<form action="/search" method="get">
<input type="search" name="q" value="{search}" placeholder="Search by name">
<button type="submit">Search</button>
</form>
</nav>
"#,
        title = escape(title),
        search = escape(search),
    );

    if let Some(flash) = flash {
        html.push_str(&format!(
            "<div class=\"alert alert-{}\">{}</div>\n",
            flash.level.as_str(),
            escape(&flash.message)
        ));
    }

    html.push_str(body);
    html.push_str("</body>\n</html>\n");
    html
}

/// Dashboard and search results page.
///
/// `query` is `Some` when rendering search results.
pub fn dashboard(
    medicines: &[Medicine],
    summary: Summary,
    today: NaiveDate,
    query: Option<&str>,
    flash: Option<&Flash>,
) -> String {
    let heading = match query {
        Some(q) => format!("Search results for \"{}\"", escape(q)),
        None => "Dashboard".to_string(),
    };
    let mut body = format!(
        r#"<h1>{heading}</h1>
<div class="cards">
<div class="card">Total medicines: <strong id="total-count">{}</strong></div>
<div class="card">Near expiry: <strong id="near-expiry-count">{}</strong></div>
</div>
"#,
        summary.total, summary.near_expiry
    );

    if medicines.is_empty() {
        body.push_str("<p>No medicines found.</p>\n");
    } else {
        body.push_str(
            "<table>\n<thead><tr><th>ID</th><th>Name</th><th>Manufacturer</th>\
             <th>Expiry</th><th>Status</th><th>Price</th><th>Actions</th></tr></thead>\n<tbody>\n",
        );
        for medicine in medicines {
            body.push_str(&table_row(medicine, medicine.expiry_status(today)));
        }
        body.push_str("</tbody>\n</table>\n");
    }

    layout(
        if query.is_some() { "Search" } else { "Dashboard" },
        flash,
        query.unwrap_or(""),
        &body,
    )
}

fn table_row(medicine: &Medicine, status: ExpiryStatus) -> String {
    let status_class = match status {
        ExpiryStatus::Expired => "expired",
        ExpiryStatus::NearExpiry => "near_expiry",
        ExpiryStatus::Ok => "ok",
        ExpiryStatus::Unknown => "unknown",
    };
    format!(
        r#"<tr data-id="{id}">
<td>{id}</td>
<td><a href="/view/{id}">{name}</a></td>
<td>{manufacturer}</td>
<td>{expiry}</td>
<td class="status-{status_class}">{status}</td>
<td>{price:.2}</td>
<td>
<a href="/update/{id}">Edit</a>
<form class="inline" action="/delete/{id}" method="post" onsubmit="return confirm('Delete this medicine?');">
<button type="submit">Delete</button>
</form>
</td>
</tr>
"#,
        id = medicine.id,
        name = escape(&medicine.name),
        manufacturer = escape(&medicine.manufacturer),
        expiry = escape(&medicine.expiry_date),
        status = status.label(),
        price = medicine.price,
    )
}

/// Detail page for one medicine, including its QR image.
pub fn view(medicine: &Medicine, flash: Option<&Flash>) -> String {
    let qr = match CodeStore::url_for(&medicine.qr_path) {
        Some(url) => format!(
            r#"<img src="{}" alt="QR code for {}" width="250">"#,
            escape(&url),
            escape(&medicine.name)
        ),
        None => "<p>No QR code available.</p>".to_string(),
    };

    let body = format!(
        r#"<h1>{name}</h1>
<dl>
<dt>Manufacturer</dt><dd>{manufacturer}</dd>
<dt>Manufacture date</dt><dd>{mdate}</dd>
<dt>Expiry date</dt><dd>{edate}</dd>
<dt>Price</dt><dd>{price:.2}</dd>
<dt>Additional info</dt><dd>{info}</dd>
<dt>Last updated</dt><dd>{updated}</dd>
</dl>
{qr}
<p><a href="/update/{id}">Edit</a></p>
"#,
        id = medicine.id,
        name = escape(&medicine.name),
        manufacturer = escape(&medicine.manufacturer),
        mdate = escape(&medicine.manufacture_date),
        edate = escape(&medicine.expiry_date),
        price = medicine.price,
        info = escape(&medicine.additional_info),
        updated = medicine.last_updated.format("%Y-%m-%d %H:%M:%S UTC"),
    );

    layout(&medicine.name, flash, "", &body)
}

fn field(medicine: Option<&Medicine>, get: impl Fn(&Medicine) -> &String) -> String {
    medicine.map(|m| escape(get(m))).unwrap_or_default()
}

/// Add form when `medicine` is `None`, edit form otherwise.
pub fn form(medicine: Option<&Medicine>, flash: Option<&Flash>) -> String {
    let (title, action) = match medicine {
        Some(m) => ("Update medicine", format!("/update/{}", m.id)),
        None => ("Add medicine", "/add".to_string()),
    };
    let price = medicine.map(|m| m.price.to_string()).unwrap_or_default();

    let body = format!(
        r#"<h1>{title}</h1>
<form action="{action}" method="post">
<label>Name <input type="text" name="name" value="{name}" required></label>
<label>Manufacturer <input type="text" name="manufacturer" value="{manufacturer}"></label>
<label>Manufacture date <input type="date" name="mdate" value="{mdate}"></label>
<label>Expiry date <input type="date" name="edate" value="{edate}" required></label>
<label>Price <input type="number" step="0.01" min="0" name="price" value="{price}"></label>
<label>Additional info <textarea name="info" rows="4">{info}</textarea></label>
<p><button type="submit">Save</button> <a href="/">Cancel</a></p>
</form>
"#,
        name = field(medicine, |m| &m.name),
        manufacturer = field(medicine, |m| &m.manufacturer),
        mdate = field(medicine, |m| &m.manufacture_date),
        edate = field(medicine, |m| &m.expiry_date),
        info = field(medicine, |m| &m.additional_info),
    );

    layout(title, flash, "", &body)
}
