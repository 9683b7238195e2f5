//! End-to-end tests for the ETL pipeline
//!
//! Stages the fixture sources, then checks the fact and dimension tables.

mod common;

use common::*;
use sparkify_warehouse::pipeline;

// =============================================================================
// Staging
// =============================================================================

#[tokio::test]
async fn test_staging_holds_every_raw_record() {
    let mut test = TestWarehouse::loaded_scenario().await;

    assert_eq!(
        test.count("SELECT COUNT(*) FROM staging_events").await,
        scenario_events().len() as u64
    );
    assert_eq!(
        test.count("SELECT COUNT(*) FROM staging_songs").await,
        scenario_songs().len() as u64
    );

    let rows = test
        .query("SELECT ts, user_id, page FROM staging_events WHERE page = 'Login'")
        .await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(0), Some((TS_5 + 1).to_string().as_str()));
    assert_eq!(rows[0].get(1), None);
}

// =============================================================================
// Songplays
// =============================================================================

#[tokio::test]
async fn test_songplays_match_next_song_events() {
    let mut test = TestWarehouse::loaded_scenario().await;

    let next_song = test
        .count("SELECT COUNT(*) FROM staging_events WHERE page = 'NextSong'")
        .await;
    assert_eq!(next_song, 4);
    assert_eq!(test.count("SELECT COUNT(*) FROM songplays").await, next_song);
}

#[tokio::test]
async fn test_unmatched_play_keeps_row_with_null_ids() {
    let mut test = TestWarehouse::loaded_scenario().await;

    let rows = test
        .query("SELECT song_id, artist_id, level FROM songplays WHERE user_id = 7 AND level = 'free'")
        .await;
    assert_eq!(rows.len(), 2);
    for row in &rows {
        assert_eq!(row.get(0), None);
        assert_eq!(row.get(1), None);
    }
}

#[tokio::test]
async fn test_songplay_start_time_from_epoch_millis() {
    let mut test = TestWarehouse::loaded_scenario().await;

    let rows = test
        .query("SELECT start_time FROM songplays WHERE user_id = 8")
        .await;
    assert_eq!(rows.len(), 1);
    assert_eq!(rows[0].get(0), Some("2018-11-01 21:17:33.796"));
}

#[tokio::test]
async fn test_songplay_ids_are_generated() {
    let mut test = TestWarehouse::loaded_scenario().await;

    assert_eq!(
        test.count("SELECT COUNT(DISTINCT songplay_id) FROM songplays")
            .await,
        4
    );
}

// =============================================================================
// Dimensions
// =============================================================================

#[tokio::test]
async fn test_users_are_distinct_over_full_tuple() {
    let mut test = TestWarehouse::loaded_scenario().await;

    let rows = test
        .query("SELECT user_id, first_name, last_name, gender, level FROM users WHERE user_id = 7 ORDER BY level")
        .await;
    assert_eq!(rows.len(), 2);
    assert_eq!(rows[0].to_string(), "(7, Adelyn, Jordan, F, free)");
    assert_eq!(rows[1].to_string(), "(7, Adelyn, Jordan, F, paid)");

    // Only NextSong events feed the dimension.
    assert_eq!(test.count("SELECT COUNT(*) FROM users").await, 3);
}

#[tokio::test]
async fn test_songs_and_artists_are_deduplicated() {
    let mut songs = scenario_songs();
    songs.push(songs[0].clone());
    let mut test = TestWarehouse::with_sources(&scenario_events(), &songs).await;
    test.reset().await;
    test.load().await;

    assert_eq!(test.count("SELECT COUNT(*) FROM staging_songs").await, 3);
    assert_eq!(test.count("SELECT COUNT(*) FROM songs").await, 2);
    assert_eq!(test.count("SELECT COUNT(*) FROM artists").await, 2);

    let rows = test
        .query(&format!(
            "SELECT name, location FROM artists WHERE artist_id = '{}'",
            MATCHED_ARTIST_ID
        ))
        .await;
    assert_eq!(rows[0].get(0), Some(MATCHED_ARTIST_NAME));
    assert_eq!(rows[0].get(1), Some(""));
}

#[tokio::test]
async fn test_time_has_one_row_per_start_time() {
    let mut test = TestWarehouse::loaded_scenario().await;

    assert_eq!(test.count("SELECT COUNT(*) FROM time").await, 4);
    assert_eq!(
        test.count("SELECT COUNT(DISTINCT start_time) FROM time")
            .await,
        4
    );

    let rows = test
        .query("SELECT hour, day, week, month, year, weekday FROM time ORDER BY start_time")
        .await;
    // 2018-11-01 was the Thursday of ISO week 44.
    assert_eq!(rows[0].to_string(), "(20, 1, 44, 11, 2018, 4)");
    assert_eq!(rows[1].to_string(), "(21, 1, 44, 11, 2018, 4)");
}

#[tokio::test]
async fn test_repeated_timestamp_yields_single_time_row() {
    let events = vec![
        next_song_event(USER_7, "free", "A", "B", TS_1),
        next_song_event(USER_8, "free", "C", "D", TS_1),
    ];
    let mut test = TestWarehouse::with_sources(&events, &[]).await;
    test.reset().await;
    test.load().await;

    assert_eq!(test.count("SELECT COUNT(*) FROM songplays").await, 2);
    assert_eq!(test.count("SELECT COUNT(*) FROM time").await, 1);
}

// =============================================================================
// Whole scenario
// =============================================================================

#[tokio::test]
async fn test_end_to_end_user_7() {
    let mut test = TestWarehouse::loaded_scenario().await;

    assert_eq!(
        test.count("SELECT COUNT(*) FROM songplays WHERE user_id = 7")
            .await,
        3
    );
    assert_eq!(
        test.count("SELECT COUNT(*) FROM songplays WHERE user_id = 7 AND song_id IS NULL AND artist_id IS NULL")
            .await,
        2
    );

    let matched = test
        .query("SELECT song_id, artist_id, level FROM songplays WHERE user_id = 7 AND song_id IS NOT NULL")
        .await;
    assert_eq!(matched.len(), 1);
    assert_eq!(matched[0].get(0), Some(MATCHED_SONG_ID));
    assert_eq!(matched[0].get(1), Some(MATCHED_ARTIST_ID));
    assert_eq!(matched[0].get(2), Some("paid"));

    assert_eq!(
        test.count("SELECT COUNT(*) FROM users WHERE user_id = 7").await,
        2
    );
}

#[tokio::test]
async fn test_row_counts_after_load() {
    let mut test = TestWarehouse::loaded_scenario().await;

    let counts = pipeline::table_row_counts(test.warehouse.as_mut())
        .await
        .unwrap();
    assert_eq!(
        counts,
        vec![
            ("staging_events", 6),
            ("staging_songs", 2),
            ("songplays", 4),
            ("users", 3),
            ("songs", 2),
            ("artists", 2),
            ("time", 4),
        ]
    );
}

#[tokio::test]
async fn test_loading_twice_accumulates_fact_rows() {
    let mut test = TestWarehouse::loaded_scenario().await;
    test.load().await;

    assert_eq!(test.count("SELECT COUNT(*) FROM staging_events").await, 12);
    // Staging now holds every play twice, and songplays keeps the first run.
    assert_eq!(test.count("SELECT COUNT(*) FROM songplays").await, 4 + 8);
}

#[tokio::test]
async fn test_missing_source_fails_load() {
    let mut test = TestWarehouse::with_sources(&scenario_events(), &scenario_songs()).await;
    test.reset().await;
    test.catalog.copy_table_queries[1] = test.catalog.copy_table_queries[1]
        .replace("song_data", "no_such_dir");

    let result = pipeline::run_etl(test.warehouse.as_mut(), &test.catalog).await;
    assert!(result.is_err());
    // The events copy already committed, nothing was inserted.
    assert_eq!(test.count("SELECT COUNT(*) FROM staging_events").await, 6);
    assert_eq!(test.count("SELECT COUNT(*) FROM songplays").await, 0);
}
