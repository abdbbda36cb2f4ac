use crate::database::Database;
use crate::model::UserProgress;

/// Fetch a user's progression, creating and persisting a fresh record if
/// they have never played.
pub async fn get_or_create_progress(db: &Database, user_id: u64) -> anyhow::Result<UserProgress> {
    db.users()
        .get_or_insert_with(&user_id.to_string(), UserProgress::default)
        .await
}

/// Read-only lookup that does not create a record.
pub async fn peek_progress(db: &Database, user_id: u64) -> UserProgress {
    db.users()
        .get(&user_id.to_string())
        .await
        .unwrap_or_default()
}

/// Highest coin balances first; ties broken by catch count, then user id.
pub async fn leaderboard(db: &Database, limit: usize) -> Vec<(u64, UserProgress)> {
    let mut ranked: Vec<(u64, UserProgress)> = db
        .users()
        .entries()
        .await
        .into_iter()
        .filter_map(|(key, progress)| key.parse::<u64>().ok().map(|id| (id, progress)))
        .collect();

    ranked.sort_unstable_by(|(left_id, left), (right_id, right)| {
        right
            .coins
            .cmp(&left.coins)
            .then_with(|| right.catches.cmp(&left.catches))
            .then_with(|| left_id.cmp(right_id))
    });
    ranked.truncate(limit);
    ranked
}
