//! Bulk loads of raw JSON into the staging tables.

use crate::config::{LocalStaging, S3Staging};
use crate::schema::tables::{STAGING_EVENTS_TABLE, STAGING_SONGS_TABLE};
use crate::schema::Table;

/// Name of the scalar function the local engine registers to read
/// newline-delimited JSON into a JSON array.
pub const READ_NDJSON_FUNCTION: &str = "read_ndjson";

/// Quote `value` as a SQL string literal.
pub fn sql_literal(value: &str) -> String {
    format!("'{}'", value.replace('\'', "''"))
}

/// Redshift COPY statements, events first.
pub fn s3_copy_queries(staging: &S3Staging) -> Vec<String> {
    let credentials = sql_literal(&format!("aws_iam_role={}", staging.iam_role_arn));
    let region = sql_literal(&staging.region);

    let staging_events_copy = format!(
        "
    copy {} from {}
    credentials {}
    json {} region {}
",
        STAGING_EVENTS_TABLE.name,
        sql_literal(&staging.log_data),
        credentials,
        sql_literal(&staging.log_jsonpath),
        region
    );

    let staging_songs_copy = format!(
        "
    copy {} from {}
    credentials {}
    json 'auto' region {}
",
        STAGING_SONGS_TABLE.name,
        sql_literal(&staging.song_data),
        credentials,
        region
    );

    vec![staging_events_copy, staging_songs_copy]
}

/// Local equivalents of the COPY statements: every JSON key that matches a
/// staging column name lands in that column.
pub fn local_copy_queries(staging: &LocalStaging) -> Vec<String> {
    vec![
        local_copy_query(&STAGING_EVENTS_TABLE, &staging.log_data),
        local_copy_query(&STAGING_SONGS_TABLE, &staging.song_data),
    ]
}

fn local_copy_query(table: &Table, source: &str) -> String {
    let columns = table.column_names();
    let extracts = columns
        .iter()
        .map(|column| format!("json_extract(value, '$.{}')", column))
        .collect::<Vec<_>>()
        .join(",\n       ");
    format!(
        "
INSERT INTO {} ({})
SELECT {}
FROM json_each({}({}))
",
        table.name,
        columns.join(", "),
        extracts,
        READ_NDJSON_FUNCTION,
        sql_literal(source)
    )
}
