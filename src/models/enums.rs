use serde::{Deserialize, Serialize};

/// Yes/no answers carried verbatim from the summarizer output.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum BinaryStatus {
    Yes,
    No,
}

/// Completion state of a planned or recorded action.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum TimeStatus {
    Completed,
    InProgress,
    Planned,
}

/// Lifecycle of an identified social need.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum NeedStatus {
    Resolved,
    Ongoing,
    New,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum Priority {
    High,
    Medium,
    Low,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum TherapyType {
    Rehab,
    Speech,
    Nutrition,
    Language,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SubstanceUseStatus {
    #[serde(rename = "unknown")]
    Unknown,
    #[serde(rename = "past")]
    Past,
    #[serde(rename = "current")]
    Current,
    #[serde(rename = "no use")]
    NoUse,
}

/// Housing categories as the intake forms spell them.
#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum LivingArrangement {
    #[serde(rename = "Rent or Own")]
    RentOrOwn,
    #[serde(rename = "Rent Unit with Support Services Onsite")]
    RentWithSupport,
    #[serde(rename = "Residential Treatment / Jail - will exit homeless")]
    JailHomeless,
    #[serde(rename = "Living Outside (Street / Vehicle / Makeshift)")]
    LivingOutside,
    #[serde(rename = "Temporarily with Friend / Family")]
    Temporary,
    #[serde(rename = "Stabilization Room / Hotel / SRO")]
    StabilizationRoom,
    #[serde(rename = "Shelter / Navigation Center")]
    Shelter,
    #[serde(rename = "Permanent Supportive Housing")]
    SupportiveHousing,
    #[serde(rename = "Residential Treatment / Jail - will exit housed")]
    JailHoused,
    #[serde(rename = "Unknown")]
    Unknown,
}

#[derive(Debug, Clone, Copy, Serialize, Deserialize, PartialEq, Eq)]
pub enum SocialNeedType {
    #[serde(rename = "interpersonal violence")]
    InterpersonalViolence,
    #[serde(rename = "tobacco use")]
    TobaccoUse,
    #[serde(rename = "housing")]
    Housing,
    #[serde(rename = "immigration")]
    Immigration,
    #[serde(rename = "food_insecurity")]
    FoodInsecurity,
    #[serde(rename = "substance use")]
    SubstanceUse,
    #[serde(rename = "alcohol use")]
    AlcoholUse,
    #[serde(rename = "mental health")]
    MentalHealth,
}
