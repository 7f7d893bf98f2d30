use serde::{Deserialize, Serialize};

pub mod fallback;
pub mod framing;

/// Local-storage key the browser client keeps its onboarding state under.
pub const PROFILE_STORAGE_KEY: &str = "fitness_tracker_data";

/// The five facial sub-metrics scored by the analysis flow. Keys are fixed:
/// consumers index into this mapping by name and do not tolerate extras.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FacialScores {
    pub jawline: u8,
    pub skin: u8,
    pub masculinity: u8,
    pub cheekbones: u8,
    pub hair: u8,
}

impl FacialScores {
    /// Overall score as the rounded mean of the sub-metrics.
    pub fn overall(&self) -> u8 {
        let total = self.jawline as u32
            + self.skin as u32
            + self.masculinity as u32
            + self.cheekbones as u32
            + self.hair as u32;
        ((total as f32 / 5.0).round()) as u8
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct RoadmapStep {
    pub category: String,
    pub suggestion: String,
}

/// Normalized output of the selfie analysis flow, as served to the client.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FaceAnalysis {
    pub score: u8,
    #[serde(rename = "detailedScores")]
    pub detailed_scores: FacialScores,
    pub roadmap: Vec<RoadmapStep>,
    pub summary: String,
}

/// One diet or workout recommendation as returned by the fitness flow.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanEntry {
    pub title: String,
    pub description: String,
}

impl From<&PlanItem> for PlanEntry {
    fn from(item: &PlanItem) -> Self {
        Self {
            title: item.title.clone(),
            description: item.description.clone(),
        }
    }
}

fn default_valid() -> bool {
    true
}

/// Normalized output of the full-body fitness analysis flow. `score` is
/// absent when the plan came from the static fallback tables.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessAnalysis {
    #[serde(default = "default_valid")]
    pub valid: bool,
    #[serde(default, skip_serializing_if = "Option::is_none")]
    pub score: Option<u8>,
    pub summary: String,
    pub workout_items: Vec<PlanEntry>,
    pub dietary_recommendations: Vec<PlanEntry>,
}

/// User-entered body metrics collected during onboarding. The photo itself
/// travels as a separate multipart field and is never part of this record.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct BioProfile {
    pub gender: String,
    pub age: u32,
    pub height: u32,
    pub weight: u32,
    pub activity: String,
    pub goal: String,
}

/// Training goal selected during onboarding. Parsed lossily: the goal
/// arrives as free text from the client and unrecognized values fall back
/// to a goal-agnostic baseline plan.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash)]
pub enum FitnessGoal {
    FixPosture,
    MuscleGain,
    FatLoss,
    WeightMaintenance,
    AthleticPerformance,
    FlexibilityMobility,
    Other,
}

impl FitnessGoal {
    pub fn from_str_lossy(s: &str) -> Self {
        match s.trim().to_lowercase().as_str() {
            "fix posture" => Self::FixPosture,
            "muscle gain" => Self::MuscleGain,
            "fat loss" => Self::FatLoss,
            "weight maintenance" => Self::WeightMaintenance,
            "athletic performance" => Self::AthleticPerformance,
            "flexibility & mobility" => Self::FlexibilityMobility,
            _ => Self::Other,
        }
    }

    pub const ALL: [FitnessGoal; 7] = [
        Self::FixPosture,
        Self::MuscleGain,
        Self::FatLoss,
        Self::WeightMaintenance,
        Self::AthleticPerformance,
        Self::FlexibilityMobility,
        Self::Other,
    ];
}

/// One editable plan item held in client state. Ids are stable per slot
/// (`d0..`, `w0..`) so in-place edits survive re-renders.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct PlanItem {
    pub id: String,
    pub title: String,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct FitnessPlan {
    pub diet: Vec<PlanItem>,
    pub workout: Vec<PlanItem>,
}

/// The document a browser client persists in local storage, overwritten
/// wholesale on every onboarding completion. Never sent to the server-side
/// cache.
#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
pub struct StoredProfile {
    pub bio: BioProfile,
    pub plan: Option<FitnessPlan>,
    #[serde(rename = "isOnboarded")]
    pub is_onboarded: bool,
}
