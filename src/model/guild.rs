//! Guild snapshots used by the member count presenter and the role ranker.
//!
//! A snapshot is fetched once per event and never refreshed. Two events handled
//! concurrently may each act on a snapshot the other has already made stale.

/// Name Discord gives the base role present in every guild.
pub const BASE_ROLE_NAME: &str = "@everyone";

#[derive(Debug, Clone, PartialEq)]
pub struct GuildSnapshot {
    pub id: u64,
    pub name: String,
    pub members: Vec<GuildMemberEntry>,
    /// All roles including the base role.
    pub roles: Vec<RoleSnapshot>,
    pub categories: Vec<CategorySnapshot>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct GuildMemberEntry {
    pub id: u64,
    pub bot: bool,
    pub role_ids: Vec<u64>,
}

#[derive(Debug, Clone, PartialEq)]
pub struct RoleSnapshot {
    pub id: u64,
    pub name: String,
    pub position: u16,
}

#[derive(Debug, Clone, PartialEq)]
pub struct CategorySnapshot {
    pub id: u64,
    pub name: String,
    /// Child channel ids ordered by channel position.
    pub channel_ids: Vec<u64>,
}

/// A role together with how many members hold it.
#[derive(Debug, Clone, PartialEq)]
pub struct RolePopulation {
    pub id: u64,
    pub name: String,
    pub position: u16,
    pub member_count: usize,
}

impl GuildSnapshot {
    /// Number of members that are not bot accounts.
    pub fn human_member_count(&self) -> u64 {
        self.members.iter().filter(|member| !member.bot).count() as u64
    }

    /// Whether the role is the guild's base role.
    ///
    /// Discord gives the base role the guild's own id.
    pub fn is_base_role(&self, role_id: u64, name: &str) -> bool {
        role_id == self.id || name == BASE_ROLE_NAME
    }

    /// Every role with its member count, ordered by ascending position.
    pub fn role_populations(&self) -> Vec<RolePopulation> {
        let mut populations: Vec<RolePopulation> = self
            .roles
            .iter()
            .map(|role| RolePopulation {
                id: role.id,
                name: role.name.clone(),
                position: role.position,
                member_count: self
                    .members
                    .iter()
                    .filter(|member| member.role_ids.contains(&role.id))
                    .count(),
            })
            .collect();
        populations.sort_by_key(|role| role.position);
        populations
    }

    /// First category whose name contains `needle`, ignoring case.
    pub fn find_category(&self, needle: &str) -> Option<&CategorySnapshot> {
        let needle = needle.to_lowercase();
        self.categories
            .iter()
            .find(|category| category.name.to_lowercase().contains(&needle))
    }
}
