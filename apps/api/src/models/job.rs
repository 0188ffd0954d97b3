use sqlx::FromRow;

/// A row in the externally-owned `job` catalog table, narrowed to the
/// columns the matching pipeline reads. "Active" means `enable` is set and
/// `end_date` is in the future; the store queries filter on that, so rows
/// handed to the scoring pipeline are always active postings.
#[derive(Debug, Clone, FromRow)]
pub struct JobRow {
    pub id: i32,
    pub name: String,
    pub detail: String,
}
