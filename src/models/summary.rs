//! The pre-computed note summary and its entities.
//!
//! Every entity carries at least one [`Citation`] tying it back to the
//! source note it was derived from. The summary is produced upstream and
//! is read-only here.

use serde::{Deserialize, Serialize};

use super::enums::{
    BinaryStatus, LivingArrangement, NeedStatus, Priority, SocialNeedType, SubstanceUseStatus,
    TherapyType,
};
use super::note::NoteId;

/// A (note id, quoted text) pair linking a summary assertion to its source.
#[derive(Debug, Clone, Serialize, Deserialize, PartialEq, Eq)]
pub struct Citation {
    pub note_id: NoteId,
    pub quote: String,
}

/// A community resource connected to an action.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Resource {
    pub name: String,
    pub date_of_connection: Option<String>,
    pub barriers: Option<String>,
    pub citation: Citation,
}

/// Something done (or planned) for the patient, with its evidence.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Action {
    pub description: String,
    pub date: Option<String>,
    pub outcome: Option<String>,
    pub citation: Citation,
    #[serde(default)]
    pub resources: Vec<Resource>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SocialNeed {
    pub social_need_type: SocialNeedType,
    pub description: String,
    pub citation: Citation,
    #[serde(default)]
    pub previous_actions: Vec<Action>,
    #[serde(default)]
    pub current_actions: Vec<Action>,
    #[serde(default)]
    pub planned_actions: Vec<Action>,
    pub status: Option<NeedStatus>,
    pub priority: Option<Priority>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Housing {
    pub current_living_arrangement: Option<LivingArrangement>,
    pub past_living_arrangement: Option<LivingArrangement>,
    pub summary: Option<String>,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Consult {
    pub reason: Option<String>,
    pub priority: Option<Priority>,
    pub citation: Citation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Admission {
    pub reason: Option<String>,
    pub citation: Option<Citation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct OneLiner {
    pub summary: Option<String>,
    pub citation: Option<Citation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Discharge {
    pub summary: Option<String>,
    pub details: Option<String>,
    pub citation: Option<Citation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EncounterDx {
    pub diagnosis: Option<String>,
    pub citation: Option<Citation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct Therapy {
    pub rehab_type: TherapyType,
    pub has_consult: BinaryStatus,
    pub summary: String,
    pub citation: Citation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PatientContact {
    pub name: String,
    pub contact_info: Option<String>,
    pub relation: Option<String>,
    pub citation: Citation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SupportAtHome {
    pub summary: String,
    pub citation: Citation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SubstanceUse {
    pub status: SubstanceUseStatus,
    pub summary: String,
    pub date_of_last_use: Option<String>,
    pub on_methadone: Option<String>,
    pub citation: Citation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct SevereMedicalCondition {
    pub diagnosis: String,
    pub date_of_diagnosis: Option<String>,
    pub citation: Citation,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct EdVisits {
    pub summary: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct PsychHospitalization {
    pub summary: String,
    #[serde(default)]
    pub citations: Vec<Citation>,
}

/// Durable medical equipment noted for the patient.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct DmeDevice {
    pub device_type: String,
    pub summary: String,
    pub citation: Citation,
}

/// The full structured summary derived from one patient's notes.
#[derive(Debug, Clone, Default, Serialize, Deserialize)]
pub struct NoteSummary {
    #[serde(default)]
    pub identified_needs: Vec<SocialNeed>,
    pub housing_situation: Option<Housing>,
    pub reason_for_consult: Option<Consult>,
    pub reason_for_admission: Option<Admission>,
    pub one_liner: Option<OneLiner>,
    pub discharge: Option<Discharge>,
    pub dx_for_encounter: Option<EncounterDx>,
    #[serde(default)]
    pub therapy: Vec<Therapy>,
    #[serde(default)]
    pub patient_contacts: Vec<PatientContact>,
    pub support_at_home: Option<SupportAtHome>,
    pub substance_use: Option<SubstanceUse>,
    #[serde(default)]
    pub severe_med_cond: Vec<SevereMedicalCondition>,
    pub ed_visits: Option<EdVisits>,
    pub psych_hospital: Option<PsychHospitalization>,
    #[serde(default)]
    pub dme: Vec<DmeDevice>,
}

impl NoteSummary {
    /// Every citation the summary carries, across all entities.
    ///
    /// Used to audit the summary against the loaded note set: a citation
    /// whose note id is absent can never resolve to a highlight.
    pub fn citations(&self) -> Vec<&Citation> {
        let mut out = Vec::new();

        for need in &self.identified_needs {
            out.push(&need.citation);
            for action in need
                .previous_actions
                .iter()
                .chain(&need.current_actions)
                .chain(&need.planned_actions)
            {
                out.push(&action.citation);
                out.extend(action.resources.iter().map(|r| &r.citation));
            }
        }
        if let Some(housing) = &self.housing_situation {
            out.extend(housing.citations.iter());
        }
        if let Some(consult) = &self.reason_for_consult {
            out.push(&consult.citation);
        }
        if let Some(admission) = &self.reason_for_admission {
            out.extend(admission.citation.iter());
        }
        if let Some(one_liner) = &self.one_liner {
            out.extend(one_liner.citation.iter());
        }
        if let Some(discharge) = &self.discharge {
            out.extend(discharge.citation.iter());
        }
        if let Some(dx) = &self.dx_for_encounter {
            out.extend(dx.citation.iter());
        }
        out.extend(self.therapy.iter().map(|t| &t.citation));
        out.extend(self.patient_contacts.iter().map(|c| &c.citation));
        if let Some(support) = &self.support_at_home {
            out.push(&support.citation);
        }
        if let Some(substance) = &self.substance_use {
            out.push(&substance.citation);
        }
        out.extend(self.severe_med_cond.iter().map(|c| &c.citation));
        if let Some(ed) = &self.ed_visits {
            out.extend(ed.citations.iter());
        }
        if let Some(psych) = &self.psych_hospital {
            out.extend(psych.citations.iter());
        }
        out.extend(self.dme.iter().map(|d| &d.citation));

        out
    }
}
