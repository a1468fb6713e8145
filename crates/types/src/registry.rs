//! Message interface of the role registry contract

use cosmwasm_schema::{cw_serde, QueryResponses};

use crate::Role;

#[cw_serde]
pub struct InstantiateMsg {
    /// Initial admin; defaults to the instantiating account
    pub admin: Option<String>,
}

#[cw_serde]
pub enum ExecuteMsg {
    /// Grant a role (admin only)
    Grant { role: Role, address: String },
    /// Revoke a role (admin only, no-op if not held)
    Revoke { role: Role, address: String },
    /// Freeze an address and strip its operational roles (admin only)
    Freeze { address: String },
    /// Clear the frozen flag; roles are not restored (admin only)
    Unfreeze { address: String },
}

#[cw_serde]
#[derive(QueryResponses)]
pub enum QueryMsg {
    #[returns(ConfigResponse)]
    Config {},

    #[returns(HasRoleResponse)]
    HasRole { address: String, role: Role },

    #[returns(IsFrozenResponse)]
    IsFrozen { address: String },

    /// Roles and frozen flag of one address in a single round trip
    #[returns(ParticipantResponse)]
    Participant { address: String },

    #[returns(MembersResponse)]
    Members {
        role: Role,
        start_after: Option<String>,
        limit: Option<u32>,
    },
}

#[cw_serde]
pub struct ConfigResponse {
    pub admin_count: u64,
}

#[cw_serde]
pub struct HasRoleResponse {
    pub has_role: bool,
}

#[cw_serde]
pub struct IsFrozenResponse {
    pub frozen: bool,
}

#[cw_serde]
pub struct ParticipantResponse {
    pub address: String,
    pub roles: Vec<Role>,
    pub frozen: bool,
}

impl ParticipantResponse {
    /// Whether the address may act under `role` right now
    pub fn can_act_as(&self, role: Role) -> bool {
        self.roles.contains(&role) && (role.is_admin() || !self.frozen)
    }
}

#[cw_serde]
pub struct MembersResponse {
    pub role: Role,
    pub members: Vec<String>,
}
