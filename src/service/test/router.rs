use test_utils::{builder::TestBuilder, factory};

use super::platform::{Call, RecordingPlatform, BOT_USER_ID};
use super::{member, message, test_config, COUNTING, GUILD, LOG_CHANNEL};
use crate::{
    error::AppError,
    model::{
        event::{GuildEvent, PresenceStatus},
        guild::{CategorySnapshot, GuildMemberEntry, GuildSnapshot, RoleSnapshot, BASE_ROLE_NAME},
    },
    service::{
        audit::{builder, AuditEventRouter},
        counting::EDITED_NOTICE,
    },
};

/// Guild with a stats category and two unsorted class roles.
fn guild() -> GuildSnapshot {
    GuildSnapshot {
        id: GUILD,
        name: "PSU CS".to_string(),
        members: vec![
            GuildMemberEntry {
                id: 200,
                bot: false,
                role_ids: vec![2],
            },
            GuildMemberEntry {
                id: 201,
                bot: false,
                role_ids: vec![2, 3],
            },
            GuildMemberEntry {
                id: 202,
                bot: false,
                role_ids: vec![3],
            },
            GuildMemberEntry {
                id: 203,
                bot: false,
                role_ids: vec![3],
            },
            GuildMemberEntry {
                id: BOT_USER_ID,
                bot: true,
                role_ids: vec![],
            },
        ],
        roles: vec![
            RoleSnapshot {
                id: GUILD,
                name: BASE_ROLE_NAME.to_string(),
                position: 0,
            },
            RoleSnapshot {
                id: 2,
                name: "CMPSC 131".to_string(),
                position: 2,
            },
            RoleSnapshot {
                id: 3,
                name: "MATH 141".to_string(),
                position: 1,
            },
        ],
        categories: vec![CategorySnapshot {
            id: 80,
            name: "Server Stats".to_string(),
            channel_ids: vec![81],
        }],
    }
}

/// Tests the join flow when the new member has DMs closed.
///
/// Expected: count refreshed, DM attempted, exactly one joined record
#[tokio::test]
async fn join_logs_once_when_welcome_dm_fails() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = RecordingPlatform::new()
        .with_guild(guild())
        .failing_direct_messages();
    let config = test_config();

    AuditEventRouter::new(db, &platform, &config)
        .dispatch(GuildEvent::MemberJoined(member(123, "alice")))
        .await?;

    let calls = platform.calls();
    assert_eq!(calls[0], Call::DeleteChannel { channel_id: 81 });
    assert_eq!(
        calls[1],
        Call::CreateVoiceChannel {
            guild_id: GUILD,
            category_id: 80,
            name: "Total Members: 4".to_string(),
        }
    );
    assert!(matches!(
        &calls[2],
        Call::DirectMessage { user_id: 123, content } if content.starts_with("Welcome to PSU CS!")
    ));

    let records = platform.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].0, LOG_CHANNEL);
    assert_eq!(records[0].1.author, "alice");
    assert_eq!(records[0].1.color, builder::MEMBERSHIP_COLOR);

    Ok(())
}

/// Tests the leave flow.
///
/// Expected: count refreshed, roles re-ranked, notice text then leave record
#[tokio::test]
async fn leave_reranks_roles_and_logs() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = RecordingPlatform::new().with_guild(guild());
    let mut config = test_config();
    config.role_denylist.clear();

    AuditEventRouter::new(db, &platform, &config)
        .dispatch(GuildEvent::MemberLeft(member(123, "alice")))
        .await?;

    let moves: Vec<Call> = platform
        .calls()
        .into_iter()
        .filter(|call| matches!(call, Call::SetRolePosition { .. }))
        .collect();
    // MATH 141 outnumbers CMPSC 131, which already sits at its target of 2.
    assert_eq!(
        moves,
        vec![Call::SetRolePosition {
            guild_id: GUILD,
            role_id: 3,
            position: 3,
        }]
    );
    assert_eq!(
        platform.texts(),
        vec![(LOG_CHANNEL, "alice left the server 🙁.".to_string())]
    );
    let records = platform.records();
    assert_eq!(records.len(), 1);
    assert!(records[0]
        .1
        .field_value("Member left or was kicked from the server")
        .is_some());

    Ok(())
}

/// Tests that a missing guild aborts the join before anything is sent.
#[tokio::test]
async fn join_fails_without_guild() {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = RecordingPlatform::new();
    let config = test_config();

    let result = AuditEventRouter::new(db, &platform, &config)
        .dispatch(GuildEvent::MemberJoined(member(123, "alice")))
        .await;

    assert!(result.is_err());
    assert!(platform.calls().is_empty());
}

/// Tests logging a deleted message with its content.
#[tokio::test]
async fn logs_deleted_message() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = RecordingPlatform::new().with_channel(60, "general");
    let config = test_config();

    AuditEventRouter::new(db, &platform, &config)
        .dispatch(GuildEvent::MessageDeleted(message(42, 60, "see you in lab")))
        .await?;

    let records = platform.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].1.author, "Message by carol#0001 deleted in #general");
    assert_eq!(records[0].1.field_value("Message Content"), Some("see you in lab"));

    Ok(())
}

/// Tests that deleted command messages and the bot's own messages are not logged.
#[tokio::test]
async fn skips_commands_and_own_messages() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = RecordingPlatform::new();
    let config = test_config();
    let router = AuditEventRouter::new(db, &platform, &config);

    router
        .dispatch(GuildEvent::MessageDeleted(message(1, 60, "!join cmpsc 131")))
        .await?;
    router
        .dispatch(GuildEvent::MessageDeleted(message(2, 60, "!Leave MATH 141")))
        .await?;

    let mut own = message(3, 60, "Total Members: 4");
    own.author.id = BOT_USER_ID;
    router.dispatch(GuildEvent::MessageDeleted(own)).await?;

    assert!(platform.calls().is_empty());

    Ok(())
}

/// Tests that a deleted message merely mentioning a command is still logged.
#[tokio::test]
async fn logs_message_with_command_later_in_text() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = RecordingPlatform::new();
    let config = test_config();

    AuditEventRouter::new(db, &platform, &config)
        .dispatch(GuildEvent::MessageDeleted(message(1, 60, "type !join to enter")))
        .await?;

    assert_eq!(platform.records().len(), 1);

    Ok(())
}

/// Tests that deleting the current counting number logs and reposts it.
#[tokio::test]
async fn deleted_counting_number_is_logged_and_reposted() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_counting_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_counting_channel(db, 5).await?;
    let platform = RecordingPlatform::new().with_channel(COUNTING, "counting");
    let config = test_config();

    AuditEventRouter::new(db, &platform, &config)
        .dispatch(GuildEvent::MessageDeleted(message(9, COUNTING, "101")))
        .await?;

    assert_eq!(platform.records().len(), 1);
    let texts = platform.texts();
    assert_eq!(texts.len(), 2);
    assert_eq!(texts[1], (COUNTING, "101".to_string()));

    Ok(())
}

/// Tests uncached deletions.
///
/// Expected: logged with the message id when the channel resolves, silent otherwise
#[tokio::test]
async fn logs_uncached_deletion_only_for_known_channel() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = RecordingPlatform::new()
        .with_channel(60, "general")
        .with_missing_channel(61);
    let config = test_config();
    let router = AuditEventRouter::new(db, &platform, &config);

    router
        .dispatch(GuildEvent::UncachedMessageDeleted {
            channel_id: 61,
            message_id: 7,
        })
        .await?;
    assert!(platform.calls().is_empty());

    router
        .dispatch(GuildEvent::UncachedMessageDeleted {
            channel_id: 60,
            message_id: 7,
        })
        .await?;
    let records = platform.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].1.author, "Uncached Message deleted in #general");
    assert_eq!(records[0].1.description.as_deref(), Some("► Message ID: 7"));

    Ok(())
}

/// Tests logging an edit with both versions of the content.
#[tokio::test]
async fn logs_edit_with_both_versions() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = RecordingPlatform::new().with_channel(60, "general");
    let config = test_config();

    AuditEventRouter::new(db, &platform, &config)
        .dispatch(GuildEvent::MessageEdited {
            before: Some(message(42, 60, "teh answer")),
            after: message(42, 60, "the answer"),
        })
        .await?;

    let records = platform.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].1.field_value("Original Content"), Some("teh answer"));
    assert_eq!(records[0].1.field_value("New Content"), Some("the answer"));

    Ok(())
}

/// Tests edits that produce no record.
///
/// Expected: uncached, unchanged and bot-authored edits are not logged
#[tokio::test]
async fn skips_edits_without_visible_change() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = RecordingPlatform::new();
    let config = test_config();
    let router = AuditEventRouter::new(db, &platform, &config);

    router
        .dispatch(GuildEvent::MessageEdited {
            before: None,
            after: message(42, 60, "the answer"),
        })
        .await?;
    router
        .dispatch(GuildEvent::MessageEdited {
            before: Some(message(42, 60, "https://psu.edu")),
            after: message(42, 60, "https://psu.edu"),
        })
        .await?;

    let mut before = message(43, 60, "old");
    let mut after = message(43, 60, "new");
    before.author.id = BOT_USER_ID;
    after.author.id = BOT_USER_ID;
    router
        .dispatch(GuildEvent::MessageEdited {
            before: Some(before),
            after,
        })
        .await?;

    assert!(platform.calls().is_empty());

    Ok(())
}

/// Tests that an edit by the bot in the counting channel still runs the counting check.
///
/// Expected: no record, but the number is reposted
#[tokio::test]
async fn bot_edit_still_checks_counting() -> Result<(), AppError> {
    let test = TestBuilder::new()
        .with_counting_tables()
        .build()
        .await
        .unwrap();
    let db = test.db.as_ref().unwrap();
    factory::create_counting_channel(db, 6).await?;
    let platform = RecordingPlatform::new().with_latest_message(COUNTING, 8);
    let config = test_config();

    let mut before = message(8, COUNTING, "110");
    let mut after = message(8, COUNTING, "oops");
    before.author.id = BOT_USER_ID;
    after.author.id = BOT_USER_ID;

    AuditEventRouter::new(db, &platform, &config)
        .dispatch(GuildEvent::MessageEdited {
            before: Some(before),
            after,
        })
        .await?;

    assert!(platform.records().is_empty());
    assert_eq!(
        platform.texts(),
        vec![
            (COUNTING, EDITED_NOTICE.to_string()),
            (COUNTING, "110".to_string())
        ]
    );

    Ok(())
}

/// Tests that nickname updates are logged only when the nickname changed.
#[tokio::test]
async fn logs_nickname_changes_only() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = RecordingPlatform::new();
    let config = test_config();
    let router = AuditEventRouter::new(db, &platform, &config);

    let before = member(5, "dave");
    let mut roles_changed = before.clone();
    roles_changed.role_names.push("PHYS 211".to_string());
    router
        .dispatch(GuildEvent::NicknameChanged {
            before: before.clone(),
            after: roles_changed,
        })
        .await?;
    assert!(platform.calls().is_empty());

    let mut renamed = before.clone();
    renamed.nickname = Some("Dave (TA)".to_string());
    router
        .dispatch(GuildEvent::NicknameChanged {
            before,
            after: renamed,
        })
        .await?;

    let records = platform.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].1.color, builder::PROFILE_COLOR);
    assert_eq!(records[0].1.field_value("New Nickname"), Some("Dave (TA)"));

    Ok(())
}

/// Tests that presence updates are logged only when the status changed.
#[tokio::test]
async fn logs_status_changes_only() -> Result<(), AppError> {
    let test = TestBuilder::new().build().await.unwrap();
    let db = test.db.as_ref().unwrap();
    let platform = RecordingPlatform::new();
    let config = test_config();
    let router = AuditEventRouter::new(db, &platform, &config);

    router
        .dispatch(GuildEvent::PresenceChanged {
            member: member(5, "dave"),
            before: PresenceStatus::Online,
            after: PresenceStatus::Online,
        })
        .await?;
    assert!(platform.calls().is_empty());

    router
        .dispatch(GuildEvent::PresenceChanged {
            member: member(5, "dave"),
            before: PresenceStatus::Online,
            after: PresenceStatus::Idle,
        })
        .await?;

    let records = platform.records();
    assert_eq!(records.len(), 1);
    assert_eq!(records[0].1.field_value("Original Status"), Some("online"));
    assert_eq!(records[0].1.field_value("New Status"), Some("idle"));

    Ok(())
}
