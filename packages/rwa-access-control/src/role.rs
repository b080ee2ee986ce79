use cosmwasm_schema::cw_serde;
use std::fmt;

/// Capability tags checked per operation. Each tag maps to a set of accounts.
#[cw_serde]
#[derive(Copy, Eq, Hash)]
pub enum Role {
    /// Grants and revokes roles, replaces the issuer, wires hooks.
    Admin,
    /// Mints and burns shares, deposits revenue.
    Issuer,
    /// Maintains the allowlist.
    KycAdmin,
    /// Flips the pause switch.
    Pauser,
}

impl Role {
    pub fn as_str(&self) -> &'static str {
        match self {
            Role::Admin => "admin",
            Role::Issuer => "issuer",
            Role::KycAdmin => "kyc_admin",
            Role::Pauser => "pauser",
        }
    }
}

impl fmt::Display for Role {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}
