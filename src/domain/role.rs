//! The three fixed GEM asset roles and a role-indexed container.

use crate::domain::error::GemError;
use std::collections::HashMap;
use std::fmt;
use std::str::FromStr;

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, PartialOrd, Ord)]
pub enum AssetRole {
    DomesticEquity,
    InternationalEquity,
    Defensive,
}

impl AssetRole {
    pub const ALL: [AssetRole; 3] = [
        AssetRole::DomesticEquity,
        AssetRole::InternationalEquity,
        AssetRole::Defensive,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            AssetRole::DomesticEquity => "domestic_equity",
            AssetRole::InternationalEquity => "international_equity",
            AssetRole::Defensive => "defensive",
        }
    }
}

impl fmt::Display for AssetRole {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for AssetRole {
    type Err = GemError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        match s.trim() {
            "domestic_equity" => Ok(AssetRole::DomesticEquity),
            "international_equity" => Ok(AssetRole::InternationalEquity),
            "defensive" => Ok(AssetRole::Defensive),
            other => Err(GemError::InvalidRoleSet {
                reason: format!("unknown role '{other}'"),
            }),
        }
    }
}

/// Exactly one value per [`AssetRole`].
#[derive(Debug, Clone, PartialEq)]
pub struct RoleSet<T> {
    pub domestic_equity: T,
    pub international_equity: T,
    pub defensive: T,
}

impl<T> RoleSet<T> {
    pub fn new(domestic_equity: T, international_equity: T, defensive: T) -> Self {
        Self {
            domestic_equity,
            international_equity,
            defensive,
        }
    }

    pub fn get(&self, role: AssetRole) -> &T {
        match role {
            AssetRole::DomesticEquity => &self.domestic_equity,
            AssetRole::InternationalEquity => &self.international_equity,
            AssetRole::Defensive => &self.defensive,
        }
    }

    pub fn map<U>(&self, mut f: impl FnMut(AssetRole, &T) -> U) -> RoleSet<U> {
        RoleSet {
            domestic_equity: f(AssetRole::DomesticEquity, &self.domestic_equity),
            international_equity: f(AssetRole::InternationalEquity, &self.international_equity),
            defensive: f(AssetRole::Defensive, &self.defensive),
        }
    }

    pub fn iter(&self) -> impl Iterator<Item = (AssetRole, &T)> {
        AssetRole::ALL.into_iter().map(move |role| (role, self.get(role)))
    }

    /// Build from a role-keyed map that must hold every role.
    pub fn from_map(mut map: HashMap<AssetRole, T>) -> Result<Self, GemError> {
        let missing: Vec<&str> = AssetRole::ALL
            .iter()
            .filter(|r| !map.contains_key(r))
            .map(|r| r.as_str())
            .collect();
        if !missing.is_empty() {
            return Err(GemError::InvalidRoleSet {
                reason: format!("missing roles: {}", missing.join(", ")),
            });
        }
        let mut take = |role: AssetRole| {
            map.remove(&role).ok_or_else(|| GemError::InvalidRoleSet {
                reason: format!("missing role {role}"),
            })
        };
        Ok(Self {
            domestic_equity: take(AssetRole::DomesticEquity)?,
            international_equity: take(AssetRole::InternationalEquity)?,
            defensive: take(AssetRole::Defensive)?,
        })
    }

    /// Build from a name-keyed map. Unknown or missing names are rejected.
    pub fn from_named(map: HashMap<String, T>) -> Result<Self, GemError> {
        let mut by_role = HashMap::with_capacity(map.len());
        for (name, value) in map {
            let role: AssetRole = name.parse()?;
            by_role.insert(role, value);
        }
        Self::from_map(by_role)
    }
}

impl RoleSet<String> {
    /// SPY / VEU / BND.
    pub fn default_instruments() -> Self {
        Self::new("SPY".to_string(), "VEU".to_string(), "BND".to_string())
    }

    pub fn instrument(&self, role: AssetRole) -> &str {
        self.get(role)
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn role_round_trips_through_str() {
        for role in AssetRole::ALL {
            assert_eq!(role.as_str().parse::<AssetRole>().unwrap(), role);
        }
    }

    #[test]
    fn unknown_role_is_invalid_role_set() {
        let err = "equity_us".parse::<AssetRole>().unwrap_err();
        assert!(matches!(err, GemError::InvalidRoleSet { .. }));
    }

    #[test]
    fn from_map_complete() {
        let map = HashMap::from([
            (AssetRole::DomesticEquity, 1),
            (AssetRole::InternationalEquity, 2),
            (AssetRole::Defensive, 3),
        ]);
        let set = RoleSet::from_map(map).unwrap();
        assert_eq!(*set.get(AssetRole::DomesticEquity), 1);
        assert_eq!(*set.get(AssetRole::InternationalEquity), 2);
        assert_eq!(*set.get(AssetRole::Defensive), 3);
    }

    #[test]
    fn from_map_missing_role() {
        let map = HashMap::from([(AssetRole::DomesticEquity, 1), (AssetRole::Defensive, 3)]);
        let err = RoleSet::from_map(map).unwrap_err();
        match err {
            GemError::InvalidRoleSet { reason } => {
                assert!(reason.contains("international_equity"))
            }
            other => panic!("unexpected error: {other}"),
        }
    }

    #[test]
    fn from_named_rejects_extra_key() {
        let map = HashMap::from([
            ("domestic_equity".to_string(), 1),
            ("international_equity".to_string(), 2),
            ("defensive".to_string(), 3),
            ("gold".to_string(), 4),
        ]);
        assert!(matches!(
            RoleSet::from_named(map),
            Err(GemError::InvalidRoleSet { .. })
        ));
    }

    #[test]
    fn from_named_accepts_exact_roles() {
        let map = HashMap::from([
            ("domestic_equity".to_string(), "SPY"),
            ("international_equity".to_string(), "VEU"),
            ("defensive".to_string(), "BND"),
        ]);
        let set = RoleSet::from_named(map).unwrap();
        assert_eq!(set.international_equity, "VEU");
    }

    #[test]
    fn map_and_iter_follow_role_order() {
        let set = RoleSet::default_instruments();
        let lengths = set.map(|_, s| s.len());
        assert_eq!(lengths, RoleSet::new(3, 3, 3));
        let roles: Vec<AssetRole> = set.iter().map(|(r, _)| r).collect();
        assert_eq!(roles, AssetRole::ALL.to_vec());
        assert_eq!(set.instrument(AssetRole::Defensive), "BND");
    }
}
