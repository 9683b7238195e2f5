//! Raw event and song records in the shape the staging COPY expects.

use serde_json::{json, Value};

pub const USER_7: i64 = 7;
pub const USER_8: i64 = 8;

pub const MATCHED_SONG_ID: &str = "SOUPIRU12A6D4FA1E1";
pub const MATCHED_ARTIST_ID: &str = "ARJNIUY12298900C91";
pub const MATCHED_ARTIST_NAME: &str = "Adelitas Way";
pub const MATCHED_TITLE: &str = "Der Kleine Dompfaff";

/// 2018-11-01 20:57:10.796 UTC
pub const TS_1: i64 = 1541105830796;
/// 2018-11-01 21:01:46.796 UTC
pub const TS_2: i64 = 1541106106796;
/// 2018-11-01 21:05:52.796 UTC
pub const TS_3: i64 = 1541106352796;
/// 2018-11-01 21:17:33.796 UTC
pub const TS_4: i64 = 1541107053796;
/// 2018-11-01 21:24:53.796 UTC
pub const TS_5: i64 = 1541107493796;

pub fn next_song_event(user_id: i64, level: &str, artist: &str, song: &str, ts: i64) -> Value {
    let (first_name, last_name, gender) = match user_id {
        USER_7 => ("Adelyn", "Jordan", "F"),
        _ => ("Ryan", "Smith", "M"),
    };
    json!({
        "artist": artist,
        "auth": "Logged In",
        "first_name": first_name,
        "gender": gender,
        "item_in_session": 0,
        "last_name": last_name,
        "length": 223.60771,
        "level": level,
        "location": "Chicago-Naperville-Elgin, IL-IN-WI",
        "method": "PUT",
        "page": "NextSong",
        "registration": 1540130971796.0,
        "session_id": 139,
        "song": song,
        "status": 200,
        "ts": ts,
        "user_agent": "Mozilla/5.0 (Windows NT 6.1; WOW64)",
        "user_id": user_id,
    })
}

/// A non-play event, which never reaches the fact or dimension tables.
pub fn page_event(user_id: Option<i64>, page: &str, level: &str, ts: i64) -> Value {
    let auth = if user_id.is_some() {
        "Logged In"
    } else {
        "Logged Out"
    };
    json!({
        "artist": null,
        "auth": auth,
        "first_name": null,
        "gender": null,
        "item_in_session": 1,
        "last_name": null,
        "length": null,
        "level": level,
        "location": null,
        "method": "GET",
        "page": page,
        "registration": null,
        "session_id": 140,
        "song": null,
        "status": 200,
        "ts": ts,
        "user_agent": null,
        "user_id": user_id,
    })
}

pub fn song_record(song_id: &str, title: &str, artist_id: &str, artist_name: &str) -> Value {
    json!({
        "num_songs": 1,
        "artist_id": artist_id,
        "artist_latitude": null,
        "artist_longitude": null,
        "artist_location": "",
        "artist_name": artist_name,
        "song_id": song_id,
        "title": title,
        "duration": 152.92036,
        "year": 0,
    })
}

/// Three plays by user 7: two at level free with no catalog match and one
/// paid play of a cataloged song. Then a play of the same song by user 8 and
/// two non-play events.
pub fn scenario_events() -> Vec<Value> {
    vec![
        next_song_event(USER_7, "free", "Some Band", "Unknown Song", TS_1),
        next_song_event(USER_7, "free", "Another Band", "Also Unknown", TS_2),
        next_song_event(USER_7, "paid", MATCHED_ARTIST_NAME, MATCHED_TITLE, TS_3),
        next_song_event(USER_8, "free", MATCHED_ARTIST_NAME, MATCHED_TITLE, TS_4),
        page_event(Some(USER_7), "Home", "paid", TS_5),
        page_event(None, "Login", "free", TS_5 + 1),
    ]
}

pub fn scenario_songs() -> Vec<Value> {
    vec![
        song_record(
            MATCHED_SONG_ID,
            MATCHED_TITLE,
            MATCHED_ARTIST_ID,
            MATCHED_ARTIST_NAME,
        ),
        song_record(
            "SOXVLOJ12AB0189215",
            "Amor De Cabaret",
            "ARKRRTF1187B9984DA",
            "Sonora Santanera",
        ),
    ]
}
