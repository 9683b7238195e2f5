//! Fact and dimension inserts. Every statement reads only from the staging
//! tables, never from another fact or dimension table.

use crate::schema::Dialect;

/// Expression turning the epoch-millisecond `ts` of `staging_events e` into a
/// timestamp.
fn start_time_expr(dialect: Dialect) -> &'static str {
    match dialect {
        Dialect::Redshift => "DATE_ADD('ms', e.ts, '1970-01-01')",
        Dialect::Sqlite => "strftime('%Y-%m-%d %H:%M:%f', e.ts / 1000.0, 'unixepoch')",
    }
}

pub fn songplay_table_insert(dialect: Dialect) -> String {
    format!(
        "
INSERT INTO songplays (start_time, user_id, level, song_id, artist_id, session_id, location, user_agent)
SELECT {}, e.user_id, e.level, s.song_id, s.artist_id, e.session_id, e.location, e.user_agent
FROM staging_events e
LEFT JOIN staging_songs s ON s.artist_name = e.artist AND s.title = e.song
WHERE e.page = 'NextSong'
",
        start_time_expr(dialect)
    )
}

/// Distinct over the whole tuple, so a user seen at two levels gets two rows.
pub const USER_TABLE_INSERT: &str = "
INSERT INTO users (user_id, first_name, last_name, gender, level)
SELECT DISTINCT user_id, first_name, last_name, gender, level
FROM staging_events
WHERE page = 'NextSong'
";

pub const SONG_TABLE_INSERT: &str = "
INSERT INTO songs (song_id, title, artist_id, year, duration)
SELECT DISTINCT song_id, title, artist_id, year, duration
FROM staging_songs
";

pub const ARTIST_TABLE_INSERT: &str = "
INSERT INTO artists (artist_id, name, location, latitude, longitude)
SELECT DISTINCT artist_id, artist_name, artist_location, artist_latitude, artist_longitude
FROM staging_songs
";

pub fn time_table_insert(dialect: Dialect) -> String {
    match dialect {
        // Redshift resolves the start_time alias inside the same select list.
        Dialect::Redshift => format!(
            "
INSERT INTO time (start_time, hour, day, week, month, year, weekday)
SELECT  DISTINCT {} as start_time,
        EXTRACT(hour FROM start_time),
        EXTRACT(day FROM start_time),
        EXTRACT(week FROM start_time),
        EXTRACT(month FROM start_time),
        EXTRACT(year FROM start_time),
        EXTRACT(weekday FROM start_time)
FROM staging_events e
WHERE e.page = 'NextSong'
",
            start_time_expr(dialect)
        ),
        Dialect::Sqlite => format!(
            "
INSERT INTO time (start_time, hour, day, week, month, year, weekday)
SELECT  DISTINCT start_time,
        CAST(strftime('%H', start_time) AS INTEGER),
        CAST(strftime('%d', start_time) AS INTEGER),
        CAST(strftime('%V', start_time) AS INTEGER),
        CAST(strftime('%m', start_time) AS INTEGER),
        CAST(strftime('%Y', start_time) AS INTEGER),
        CAST(strftime('%w', start_time) AS INTEGER)
FROM (
    SELECT {} AS start_time
    FROM staging_events e
    WHERE e.page = 'NextSong'
)
",
            start_time_expr(dialect)
        ),
    }
}

/// All inserts, fact table first.
pub fn insert_table_queries(dialect: Dialect) -> Vec<String> {
    vec![
        songplay_table_insert(dialect),
        USER_TABLE_INSERT.to_string(),
        SONG_TABLE_INSERT.to_string(),
        ARTIST_TABLE_INSERT.to_string(),
        time_table_insert(dialect),
    ]
}
