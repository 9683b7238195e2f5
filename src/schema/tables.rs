//! The warehouse star schema: two staging tables, the songplays fact table and
//! four dimensions.

use super::{Column, DistStyle, SqlType, Table};
use crate::warehouse_column;

pub const STAGING_EVENTS_TABLE: Table = Table {
    name: "staging_events",
    columns: &[
        warehouse_column!("artist", &SqlType::Varchar(255)),
        warehouse_column!("auth", &SqlType::Varchar(25), non_null = true),
        warehouse_column!("first_name", &SqlType::Varchar(50)),
        warehouse_column!("gender", &SqlType::Char(1)),
        warehouse_column!("item_in_session", &SqlType::Integer, non_null = true),
        warehouse_column!("last_name", &SqlType::Varchar(50)),
        warehouse_column!("length", &SqlType::Decimal(18, 8)),
        warehouse_column!("level", &SqlType::Varchar(25), non_null = true),
        warehouse_column!("location", &SqlType::Varchar(255)),
        warehouse_column!("method", &SqlType::Varchar(10), non_null = true),
        warehouse_column!("page", &SqlType::Varchar(100), non_null = true),
        warehouse_column!("registration", &SqlType::Float),
        warehouse_column!("session_id", &SqlType::Integer, non_null = true),
        warehouse_column!("song", &SqlType::Varchar(255)),
        warehouse_column!("status", &SqlType::Integer, non_null = true),
        // Epoch milliseconds.
        warehouse_column!("ts", &SqlType::BigInt, non_null = true),
        warehouse_column!("user_agent", &SqlType::Varchar(255)),
        warehouse_column!("user_id", &SqlType::Integer),
    ],
    dist_style: None,
};

pub const STAGING_SONGS_TABLE: Table = Table {
    name: "staging_songs",
    columns: &[
        warehouse_column!("num_songs", &SqlType::Integer, non_null = true),
        warehouse_column!("artist_id", &SqlType::Varchar(25), non_null = true),
        warehouse_column!("artist_latitude", &SqlType::Decimal(11, 8)),
        warehouse_column!("artist_longitude", &SqlType::Decimal(11, 8)),
        warehouse_column!("artist_location", &SqlType::Varchar(255)),
        warehouse_column!("artist_name", &SqlType::Varchar(255), non_null = true),
        warehouse_column!("song_id", &SqlType::Varchar(25), non_null = true),
        warehouse_column!("title", &SqlType::Varchar(255), non_null = true),
        warehouse_column!("duration", &SqlType::Decimal(18, 8), non_null = true),
        warehouse_column!("year", &SqlType::Integer, non_null = true),
    ],
    dist_style: None,
};

pub const SONGPLAYS_TABLE: Table = Table {
    name: "songplays",
    columns: &[
        warehouse_column!(
            "songplay_id",
            &SqlType::Integer,
            is_identity = true,
            is_primary_key = true
        ),
        warehouse_column!(
            "start_time",
            &SqlType::Timestamp,
            non_null = true,
            is_sort_key = true
        ),
        warehouse_column!("user_id", &SqlType::Integer, non_null = true),
        warehouse_column!("level", &SqlType::Varchar(25), non_null = true),
        // Null when the play has no match in the song catalog.
        warehouse_column!("song_id", &SqlType::Varchar(25), is_dist_key = true),
        warehouse_column!("artist_id", &SqlType::Varchar(25)),
        warehouse_column!("session_id", &SqlType::Integer, non_null = true),
        warehouse_column!("location", &SqlType::Varchar(255)),
        warehouse_column!("user_agent", &SqlType::Varchar(255)),
    ],
    dist_style: Some(DistStyle::Key),
};

pub const USERS_TABLE: Table = Table {
    name: "users",
    columns: &[
        warehouse_column!(
            "user_id",
            &SqlType::Integer,
            non_null = true,
            is_primary_key = true,
            is_sort_key = true
        ),
        warehouse_column!("first_name", &SqlType::Varchar(50)),
        warehouse_column!("last_name", &SqlType::Varchar(50)),
        warehouse_column!("gender", &SqlType::Char(1)),
        warehouse_column!("level", &SqlType::Varchar(25), non_null = true),
    ],
    dist_style: Some(DistStyle::All),
};

pub const SONGS_TABLE: Table = Table {
    name: "songs",
    columns: &[
        warehouse_column!(
            "song_id",
            &SqlType::Varchar(25),
            non_null = true,
            is_primary_key = true,
            is_dist_key = true
        ),
        warehouse_column!("title", &SqlType::Varchar(255), non_null = true),
        warehouse_column!("artist_id", &SqlType::Varchar(25), non_null = true),
        warehouse_column!("year", &SqlType::Integer, non_null = true),
        warehouse_column!("duration", &SqlType::Decimal(18, 8), non_null = true),
    ],
    dist_style: Some(DistStyle::Key),
};

pub const ARTISTS_TABLE: Table = Table {
    name: "artists",
    columns: &[
        warehouse_column!(
            "artist_id",
            &SqlType::Varchar(25),
            non_null = true,
            is_primary_key = true,
            is_sort_key = true
        ),
        warehouse_column!("name", &SqlType::Varchar(255), non_null = true),
        warehouse_column!("location", &SqlType::Varchar(255)),
        warehouse_column!("latitude", &SqlType::Decimal(11, 8)),
        warehouse_column!("longitude", &SqlType::Decimal(11, 8)),
    ],
    dist_style: Some(DistStyle::All),
};

pub const TIME_TABLE: Table = Table {
    name: "time",
    columns: &[
        warehouse_column!(
            "start_time",
            &SqlType::Timestamp,
            non_null = true,
            is_primary_key = true,
            is_sort_key = true
        ),
        warehouse_column!("hour", &SqlType::SmallInt, non_null = true),
        warehouse_column!("day", &SqlType::SmallInt, non_null = true),
        warehouse_column!("week", &SqlType::SmallInt, non_null = true),
        warehouse_column!("month", &SqlType::SmallInt, non_null = true),
        warehouse_column!("year", &SqlType::SmallInt, non_null = true),
        warehouse_column!("weekday", &SqlType::SmallInt, non_null = true),
    ],
    dist_style: None,
};

/// Every table, in the order they are dropped and created.
pub const ALL_TABLES: &[Table] = &[
    STAGING_EVENTS_TABLE,
    STAGING_SONGS_TABLE,
    SONGPLAYS_TABLE,
    USERS_TABLE,
    SONGS_TABLE,
    ARTISTS_TABLE,
    TIME_TABLE,
];
