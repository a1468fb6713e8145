use cosmwasm_std::Addr;
use cw_storage_plus::{Item, Map};

/// Number of addresses currently holding the admin role
pub const ADMIN_COUNT: Item<u64> = Item::new("admin_count");
/// (role key, member) -> granted
pub const ROLE_MEMBERS: Map<(&str, &Addr), bool> = Map::new("role_members");
/// Frozen flag, independent of role membership
pub const FROZEN: Map<&Addr, bool> = Map::new("frozen");
