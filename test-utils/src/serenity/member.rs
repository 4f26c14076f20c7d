//! Test factory for creating Serenity Member objects.

use serenity::all::Member;

use super::user::user_json;

/// Guild id every factory member belongs to.
pub const TEST_GUILD_ID: u64 = 100000000000000001;

/// Creates a test guild Member holding the given role ids.
///
/// The member joined on 2024-01-15T12:00:00Z, has no nickname and is not a bot.
///
/// # Panics
/// - If the JSON cannot be deserialized into a Member (indicates invalid test data)
pub fn create_test_member(user_id: u64, name: &str, role_ids: &[u64]) -> Member {
    create_test_member_with(user_id, name, role_ids, None, false)
}

/// Creates a test guild Member with an optional nickname and bot flag.
pub fn create_test_member_with(
    user_id: u64,
    name: &str,
    role_ids: &[u64],
    nick: Option<&str>,
    bot: bool,
) -> Member {
    let roles: Vec<String> = role_ids.iter().map(|id| id.to_string()).collect();

    serde_json::from_value(serde_json::json!({
        "user": user_json(user_id, name, bot),
        "nick": nick,
        "avatar": null,
        "roles": roles,
        "joined_at": "2024-01-15T12:00:00.000000+00:00",
        "premium_since": null,
        "deaf": false,
        "mute": false,
        "flags": 0,
        "pending": false,
        "permissions": null,
        "communication_disabled_until": null,
        "guild_id": TEST_GUILD_ID.to_string(),
        "unusual_dm_activity_until": null,
    }))
    .expect("Failed to create test member - invalid JSON structure")
}
