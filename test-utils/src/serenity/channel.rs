//! Test factory for creating Serenity GuildChannel objects.

use serenity::all::GuildChannel;

use super::member::TEST_GUILD_ID;

/// Discord channel type codes.
pub const TEXT: u8 = 0;
pub const VOICE: u8 = 2;
pub const CATEGORY: u8 = 4;

/// Creates a test guild channel of the given Discord channel type.
///
/// # Arguments
/// - `kind` - Channel type code (`TEXT`, `VOICE` or `CATEGORY`)
/// - `parent_id` - Category holding the channel, if any
///
/// # Panics
/// - If the JSON cannot be deserialized into a GuildChannel (indicates invalid test data)
pub fn create_test_channel(
    channel_id: u64,
    name: &str,
    kind: u8,
    parent_id: Option<u64>,
    position: u16,
) -> GuildChannel {
    serde_json::from_value(serde_json::json!({
        "id": channel_id.to_string(),
        "type": kind,
        "guild_id": TEST_GUILD_ID.to_string(),
        "name": name,
        "position": position,
        "parent_id": parent_id.map(|id| id.to_string()),
        "permission_overwrites": [],
        "nsfw": false,
    }))
    .expect("Failed to create test channel - invalid JSON structure")
}
