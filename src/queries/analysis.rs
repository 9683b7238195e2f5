//! Read-only aggregates over the star schema. All aggregation happens in the
//! warehouse.

/// Top five songs by number of plays.
pub const POPULAR_SONGS: &str = "
SELECT s.title as song_title, a.name as artist_name, COUNT(*) as count_plays
FROM songplays p
INNER JOIN songs s ON s.song_id = p.song_id
INNER JOIN artists a ON a.artist_id = p.artist_id
GROUP BY s.title, a.name
ORDER BY count_plays DESC
LIMIT 5
";

pub const SONGPLAYS_BY_HOUR_AND_LEVEL: &str = "
SELECT t.hour, p.level, COUNT(*) as count_plays
FROM songplays p
INNER JOIN time t ON t.start_time = p.start_time
GROUP BY t.hour, p.level
ORDER BY t.hour, p.level
";

pub const SONGPLAYS_PER_USER_FOR_LEVEL_AND_GENDER: &str = "
SELECT p.level, u.gender, CAST (COUNT(*) AS float) / COUNT(DISTINCT u.user_id) as plays_per_user
FROM songplays p
INNER JOIN users u ON u.user_id = p.user_id
GROUP BY p.level, u.gender
";

pub fn analysis_queries() -> Vec<String> {
    [
        POPULAR_SONGS,
        SONGPLAYS_BY_HOUR_AND_LEVEL,
        SONGPLAYS_PER_USER_FOR_LEVEL_AND_GENDER,
    ]
    .iter()
    .map(|query| query.to_string())
    .collect()
}
