//! Role ordering by population.
//!
//! Class roles are kept sorted so the most joined classes sit at the top of the
//! member list. Ranking is computed from a guild snapshot as a pure function and
//! then applied one role at a time.

use crate::{
    config::Config,
    error::AppError,
    model::guild::GuildSnapshot,
    service::platform::GuildPlatform,
};

/// A role's place in the computed order.
#[derive(Debug, Clone, PartialEq, Eq)]
pub struct RankedRole {
    pub role_id: u64,
    pub name: String,
    pub member_count: usize,
    pub current_position: u16,
    pub target_position: u16,
}

impl RankedRole {
    pub fn needs_update(&self) -> bool {
        self.current_position != self.target_position
    }
}

/// Computes the target position of every rankable role.
///
/// Roles named in `denylist` and the base role are left out. The rest are sorted
/// by member count descending, then by name descending. The first role targets
/// `total roles - denylist length` and each following role one less, never going
/// below 1. Several roles can end up clamped to position 1 in guilds where the
/// denylist is longer than the number of denylisted roles actually present.
///
/// # Arguments
/// - `guild` - Snapshot holding every role of the guild, base role included
/// - `denylist` - Role names never moved
///
/// # Returns
/// - Ranked roles in target order, highest first
pub fn rank_roles(guild: &GuildSnapshot, denylist: &[String]) -> Vec<RankedRole> {
    let populations = guild.role_populations();
    let top_position = populations.len() as i64 - denylist.len() as i64;

    let mut rankable: Vec<_> = populations
        .into_iter()
        .filter(|role| !denylist.iter().any(|name| name == &role.name))
        .filter(|role| !guild.is_base_role(role.id, &role.name))
        .collect();

    rankable.sort_by(|a, b| {
        b.member_count
            .cmp(&a.member_count)
            .then_with(|| b.name.cmp(&a.name))
    });

    rankable
        .into_iter()
        .enumerate()
        .map(|(index, role)| {
            let target = (top_position - index as i64).max(1);
            RankedRole {
                role_id: role.id,
                name: role.name,
                member_count: role.member_count,
                current_position: role.position,
                target_position: u16::try_from(target).unwrap_or(u16::MAX),
            }
        })
        .collect()
}

pub struct RoleOrderService<'a> {
    platform: &'a dyn GuildPlatform,
    config: &'a Config,
}

impl<'a> RoleOrderService<'a> {
    pub fn new(platform: &'a dyn GuildPlatform, config: &'a Config) -> Self {
        Self { platform, config }
    }

    /// Moves every misplaced role to its ranked position.
    ///
    /// Updates are sent one at a time with `config.role_update_delay` between
    /// them. Roles already in place are skipped, so a second run over an
    /// unchanged guild sends nothing.
    ///
    /// # Returns
    /// - `Ok(usize)` - Number of roles moved
    /// - `Err(AppError)` - A position update failed; later roles are not moved
    pub async fn reorder(&self, guild: &GuildSnapshot) -> Result<usize, AppError> {
        let ranked = rank_roles(guild, &self.config.role_denylist);
        let mut moved = 0;

        for role in ranked {
            if !role.needs_update() {
                tracing::debug!(
                    "{} already in position {}",
                    role.name,
                    role.target_position
                );
                continue;
            }

            if moved > 0 {
                tokio::time::sleep(self.config.role_update_delay).await;
            }

            tracing::info!(
                "Set {} to position {} (was {})",
                role.name,
                role.target_position,
                role.current_position
            );
            self.platform
                .set_role_position(guild.id, role.role_id, role.target_position)
                .await?;
            moved += 1;
        }

        Ok(moved)
    }
}
