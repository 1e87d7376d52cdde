use serde::{Deserialize, Serialize};
use uuid::Uuid;

/// Strongly typed UUID wrapper. Transparent for serde and sqlx, so the wire
/// and the database only ever see the plain UUID.
macro_rules! define_id {
    ($id_type:ident, $name:literal) => {
        #[doc = $name]
        #[derive(
            Debug,
            Default,
            Clone,
            Copy,
            PartialEq,
            Eq,
            Hash,
            Serialize,
            Deserialize,
            sqlx::Type,
        )]
        #[serde(transparent)]
        #[sqlx(transparent)]
        pub struct $id_type(Uuid);

        impl $id_type {
            pub fn new() -> Self {
                Self(Uuid::new_v4())
            }

            pub fn raw(self) -> Uuid {
                self.0
            }
        }

        impl From<Uuid> for $id_type {
            fn from(value: Uuid) -> Self {
                Self(value)
            }
        }

        impl std::str::FromStr for $id_type {
            type Err = uuid::Error;

            fn from_str(s: &str) -> Result<Self, Self::Err> {
                Ok(Self(Uuid::parse_str(s)?))
            }
        }

        impl std::fmt::Display for $id_type {
            fn fmt(&self, f: &mut std::fmt::Formatter<'_>) -> std::fmt::Result {
                self.0.fmt(f)
            }
        }
    };
}

define_id!(ReservationId, "Identifier of a reservation request.");
define_id!(StatusChangeId, "Identifier of one status transition log entry.");
define_id!(ContactId, "Identifier of a contact form message.");
define_id!(AdminId, "Identifier of an admin account.");
define_id!(OutboxEmailId, "Identifier of a queued outbound email.");

#[cfg(test)]
mod tests {
    use super::*;
    use std::str::FromStr;

    #[test]
    fn id_round_trips_through_display_and_from_str() {
        let id = ReservationId::new();
        let parsed = ReservationId::from_str(&id.to_string()).unwrap();
        assert_eq!(id, parsed);
    }

    #[test]
    fn id_serializes_as_bare_uuid() {
        let id = ContactId::new();
        let json = serde_json::to_string(&id).unwrap();
        assert_eq!(json, format!("\"{}\"", id.raw()));
    }
}
