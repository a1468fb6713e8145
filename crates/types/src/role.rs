use std::fmt;

use cosmwasm_schema::cw_serde;

/// Participant roles recognised by the role registry
#[cw_serde]
#[derive(Copy, Eq, Hash, PartialOrd, Ord)]
pub enum Role {
    /// Grants/revokes roles and freezes addresses
    Admin,
    Manufacturer,
    Distributor,
    Retailer,
}

impl Role {
    pub const ALL: [Role; 4] = [
        Role::Admin,
        Role::Manufacturer,
        Role::Distributor,
        Role::Retailer,
    ];

    /// Roles removed when an address is frozen
    pub const OPERATIONAL: [Role; 3] = [Role::Manufacturer, Role::Distributor, Role::Retailer];

    /// Stable key used in storage and event attributes
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Manufacturer => "manufacturer",
            Role::Distributor => "distributor",
            Role::Retailer => "retailer",
        }
    }

    pub fn from_key(key: &str) -> Option<Role> {
        Self::ALL.into_iter().find(|role| role.as_str() == key)
    }

    pub fn is_admin(&self) -> bool {
        matches!(self, Role::Admin)
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_role_keys_round_trip() {
        for role in Role::ALL {
            assert_eq!(Role::from_key(role.as_str()), Some(role));
        }
        assert_eq!(Role::from_key("pharmacy"), None);
    }

    #[test]
    fn test_operational_roles_exclude_admin() {
        assert!(!Role::OPERATIONAL.iter().any(Role::is_admin));
    }

    #[test]
    fn test_role_serializes_snake_case() {
        let json = serde_json::to_string(&Role::Manufacturer).unwrap();
        assert_eq!(json, "\"manufacturer\"");
    }
}
