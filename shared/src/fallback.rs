//! Static diet/workout tables served when the hosted vision model is
//! unavailable. The generator is total: every goal value, including
//! unrecognized ones, maps to a non-empty plan.

use crate::{FitnessGoal, FitnessPlan, PlanItem};

const POSTURE_DIET: &[(&str, &str)] = &[
    (
        "Anti-Inflammatory Breakfast",
        "Turmeric ginger oats with walnuts and chia seeds.",
    ),
    (
        "High Magnesium Lunch",
        "Spinach and kale salad with pumpkin seeds and chicken.",
    ),
    ("Core Support Snack", "Bone broth or collagen-rich smoothie."),
    (
        "Recovery Dinner",
        "Rich fatty fish (Mackerel/Salmon) with asparagus.",
    ),
];

const POSTURE_WORKOUT: &[(&str, &str)] = &[
    (
        "Thoracic Opening",
        "Wall slides and foam rolling thoracic spine (3x15).",
    ),
    (
        "Scapular Retraction",
        "Face pulls and Band Pull-aparts (3x20).",
    ),
    (
        "Posterior Chain",
        "Bird-dog and Deadbugs for pelvic stability.",
    ),
    (
        "Deep Neck Flexors",
        "Chin tucks to counteract forward head posture.",
    ),
];

const FAT_LOSS_DIET: &[(&str, &str)] = &[
    (
        "Calorie Deficit Breakfast",
        "Egg white scramble with lots of veggies.",
    ),
    (
        "Metabolic Lunch",
        "Large mixed green salad with lean protein (Tuna/Turkey).",
    ),
    (
        "Fiber Snack",
        "Greek yogurt with berries or a handful of almonds.",
    ),
    (
        "Light Dinner",
        "Grilled white fish with steamed zucchini and broccoli.",
    ),
];

const FAT_LOSS_WORKOUT: &[(&str, &str)] = &[
    (
        "High Intensity Cardio",
        "15 min HIIT circuit (Burpees, Mountain Climbers).",
    ),
    (
        "Functional Strength",
        "Full body kettlebell or dumbbell circuit (3x15).",
    ),
    ("Core Blast", "Plank variations and Russian twists."),
    ("NEAT Walk", "30 min brisk walk after the final meal."),
];

const BASELINE_DIET: &[(&str, &str)] = &[
    ("Metabolic Breakfast", "Oats with nuts and seasonal fruit."),
    (
        "Balanced Lunch",
        "Lean protein with complex carbs and greens.",
    ),
    ("Energy Snack", "Mixed nuts or a piece of dark chocolate."),
    ("Recovery Dinner", "Light protein with roasted vegetables."),
];

const BASELINE_WORKOUT: &[(&str, &str)] = &[
    ("Dynamic Warmup", "5 min mobility and dynamic stretching."),
    ("Strength Pillar", "Pushups, Squats, and Lunges (3x12)."),
    ("Core Integration", "Plank and Deadbugs (3x45s)."),
    ("Recovery Walk", "15 min brisk walk after the final meal."),
];

fn items(prefix: &str, table: &[(&str, &str)]) -> Vec<PlanItem> {
    table
        .iter()
        .enumerate()
        .map(|(i, (title, description))| PlanItem {
            id: format!("{prefix}{i}"),
            title: (*title).to_string(),
            description: (*description).to_string(),
        })
        .collect()
}

/// Deterministic goal-conditioned plan used when the remote model fails.
pub fn fallback_plan(goal: FitnessGoal) -> FitnessPlan {
    let (diet, workout) = match goal {
        FitnessGoal::FixPosture => (POSTURE_DIET, POSTURE_WORKOUT),
        FitnessGoal::FatLoss => (FAT_LOSS_DIET, FAT_LOSS_WORKOUT),
        _ => (BASELINE_DIET, BASELINE_WORKOUT),
    };

    FitnessPlan {
        diet: items("d", diet),
        workout: items("w", workout),
    }
}

/// Plan summary shown alongside a fallback-generated plan.
pub fn fallback_summary(goal: FitnessGoal) -> &'static str {
    match goal {
        FitnessGoal::FixPosture => {
            "A posture-first protocol built around thoracic mobility and scapular control."
        }
        FitnessGoal::FatLoss => {
            "A fat-loss protocol pairing high-intensity conditioning with a sustainable calorie deficit."
        }
        _ => "A balanced baseline protocol covering strength fundamentals and recovery-friendly nutrition.",
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn posture_plan_leads_with_thoracic_mobility() {
        let plan = fallback_plan(FitnessGoal::FixPosture);
        let first = &plan.workout[0];
        assert!(
            first.title.contains("Thoracic") || first.description.contains("thoracic"),
            "first posture workout item should concern thoracic mobility, got {:?}",
            first
        );
        assert!(plan.workout.iter().any(|w| w.title.contains("Scapular")));
    }

    #[test]
    fn fat_loss_plan_includes_high_intensity_cardio() {
        let plan = fallback_plan(FitnessGoal::FatLoss);
        assert!(
            plan.workout
                .iter()
                .any(|w| w.title.contains("High Intensity") || w.description.contains("HIIT"))
        );
    }

    #[test]
    fn unrecognized_goal_gets_baseline_plan() {
        let plan = fallback_plan(FitnessGoal::from_str_lossy("telekinesis"));
        assert_eq!(plan, fallback_plan(FitnessGoal::Other));
        assert!(!plan.diet.is_empty());
        assert!(!plan.workout.is_empty());
    }

    #[test]
    fn every_goal_maps_to_a_non_empty_plan() {
        for goal in FitnessGoal::ALL {
            let plan = fallback_plan(goal);
            assert!(!plan.diet.is_empty(), "empty diet for {goal:?}");
            assert!(!plan.workout.is_empty(), "empty workout for {goal:?}");
            assert!(!fallback_summary(goal).is_empty());
        }
    }

    #[test]
    fn plan_item_ids_are_stable_per_slot() {
        let plan = fallback_plan(FitnessGoal::FixPosture);
        let diet_ids: Vec<&str> = plan.diet.iter().map(|d| d.id.as_str()).collect();
        assert_eq!(diet_ids, vec!["d0", "d1", "d2", "d3"]);
        assert_eq!(plan.workout[0].id, "w0");
    }
}
