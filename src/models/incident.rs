// src/models/incident.rs

use std::fmt;

use chrono::{DateTime, Utc};
use serde::{Deserialize, Serialize};
use utoipa::ToSchema;
use uuid::Uuid;
use validator::Validate;

use crate::db::{Collection, Entity};

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IncidentRoom {
    Kitchen,
    Bathroom,
    Bedroom,
    LivingRoom,
    Exterior,
    CommonAreas,
    Other,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IncidentType {
    Plumbing,
    Electrical,
    Heating,
    Appliance,
    Structural,
    Pest,
    Other,
}

// ---
// Ciclo de vida de um incidente
// ---
//  draft -> reported -> in_charge -> in_progress -> resolved -> closed
//  resolved -> in_progress (reaberto)
//  cancelamento pelo inquilino até `reported`, pelo proprietário até `in_progress`
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq, Hash, ToSchema)]
#[serde(rename_all = "snake_case")]
pub enum IncidentStatus {
    Draft,
    Reported,
    InCharge,
    InProgress,
    Resolved,
    Closed,
    CancelledTenant,
    CancelledOwner,
}

impl IncidentStatus {
    pub const ALL: [IncidentStatus; 8] = [
        IncidentStatus::Draft,
        IncidentStatus::Reported,
        IncidentStatus::InCharge,
        IncidentStatus::InProgress,
        IncidentStatus::Resolved,
        IncidentStatus::Closed,
        IncidentStatus::CancelledTenant,
        IncidentStatus::CancelledOwner,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            IncidentStatus::Draft => "draft",
            IncidentStatus::Reported => "reported",
            IncidentStatus::InCharge => "in_charge",
            IncidentStatus::InProgress => "in_progress",
            IncidentStatus::Resolved => "resolved",
            IncidentStatus::Closed => "closed",
            IncidentStatus::CancelledTenant => "cancelled_tenant",
            IncidentStatus::CancelledOwner => "cancelled_owner",
        }
    }

    /// Rótulo exibido na interface.
    pub fn label(&self) -> &'static str {
        match self {
            IncidentStatus::Draft => "Brouillon",
            IncidentStatus::Reported => "Signalé",
            IncidentStatus::InCharge => "Pris en charge",
            IncidentStatus::InProgress => "En cours",
            IncidentStatus::Resolved => "Résolu",
            IncidentStatus::Closed => "Clôturé",
            IncidentStatus::CancelledTenant => "Annulé par le locataire",
            IncidentStatus::CancelledOwner => "Annulé par le propriétaire",
        }
    }

    /// Cor do badge na interface.
    pub fn color(&self) -> &'static str {
        match self {
            IncidentStatus::Draft => "#9CA3AF",
            IncidentStatus::Reported => "#F59E0B",
            IncidentStatus::InCharge => "#3B82F6",
            IncidentStatus::InProgress => "#6366F1",
            IncidentStatus::Resolved => "#10B981",
            IncidentStatus::Closed => "#374151",
            IncidentStatus::CancelledTenant | IncidentStatus::CancelledOwner => "#EF4444",
        }
    }

    pub fn is_terminal(&self) -> bool {
        matches!(
            self,
            IncidentStatus::Closed
                | IncidentStatus::CancelledTenant
                | IncidentStatus::CancelledOwner
        )
    }

    pub fn can_transition_to(&self, next: IncidentStatus) -> bool {
        use IncidentStatus::*;

        matches!(
            (*self, next),
            (Draft, Reported)
                | (Draft, CancelledTenant)
                | (Reported, InCharge)
                | (Reported, CancelledTenant)
                | (Reported, CancelledOwner)
                | (InCharge, InProgress)
                | (InCharge, CancelledOwner)
                | (InProgress, Resolved)
                | (InProgress, CancelledOwner)
                | (Resolved, Closed)
                | (Resolved, InProgress)
        )
    }

    pub fn allowed_transitions(&self) -> Vec<IncidentStatus> {
        Self::ALL
            .into_iter()
            .filter(|next| self.can_transition_to(*next))
            .collect()
    }
}

impl fmt::Display for IncidentStatus {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct Incident {
    pub id: Uuid,
    pub property_id: Uuid,
    pub tenancy_id: Option<Uuid>,
    pub reported_by: Uuid,
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub room: IncidentRoom,
    pub incident_type: IncidentType,
    pub status: IncidentStatus,
    pub created_at: DateTime<Utc>,
    pub updated_at: DateTime<Utc>,
}

impl Entity for Incident {
    const COLLECTION: Collection = Collection::Incidents;
    const LABEL: &'static str = "Incidente";

    fn id(&self) -> Uuid {
        self.id
    }
}

#[derive(Debug, Clone, Deserialize, Validate, ToSchema)]
#[serde(rename_all = "camelCase")]
pub struct CreateIncidentPayload {
    pub property_id: Uuid,
    pub tenancy_id: Option<Uuid>,
    #[validate(length(min = 1, message = "required"))]
    #[schema(example = "Fuite sous l'évier")]
    pub title: String,
    #[serde(default)]
    pub description: String,
    pub room: IncidentRoom,
    pub incident_type: IncidentType,
    // `true` envia direto como `reported`; senão fica em rascunho
    #[serde(default)]
    pub submit: bool,
}

#[derive(Debug, Clone, Deserialize, ToSchema)]
pub struct TransitionIncidentPayload {
    pub status: IncidentStatus,
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn terminal_states_have_no_exit() {
        for status in IncidentStatus::ALL.into_iter().filter(IncidentStatus::is_terminal) {
            assert!(status.allowed_transitions().is_empty(), "{} deveria ser final", status);
        }
    }

    #[test]
    fn happy_path_is_legal() {
        use IncidentStatus::*;
        let path = [Draft, Reported, InCharge, InProgress, Resolved, Closed];
        for pair in path.windows(2) {
            assert!(pair[0].can_transition_to(pair[1]), "{} -> {}", pair[0], pair[1]);
        }
    }

    #[test]
    fn tenant_cannot_cancel_once_taken_in_charge() {
        assert!(!IncidentStatus::InCharge.can_transition_to(IncidentStatus::CancelledTenant));
        assert!(IncidentStatus::InCharge.can_transition_to(IncidentStatus::CancelledOwner));
        assert!(!IncidentStatus::Draft.can_transition_to(IncidentStatus::Resolved));
    }

    #[test]
    fn every_status_has_a_label_and_color() {
        for status in IncidentStatus::ALL {
            assert!(!status.label().is_empty());
            assert!(status.color().starts_with('#'));
        }
    }

    #[test]
    fn status_serializes_as_snake_case() {
        let json = serde_json::to_string(&IncidentStatus::CancelledTenant).unwrap();
        assert_eq!(json, "\"cancelled_tenant\"");
        assert_eq!(IncidentStatus::InCharge.as_str(), "in_charge");
    }
}
