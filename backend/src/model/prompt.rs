//! Instruction prompts for the two analysis flows. Builders are pure so
//! the same request always produces the same prompt; the consumer relies
//! on the exact JSON shapes named here, with no tolerance for missing or
//! extra fields.

use shared::BioProfile;

use super::groq::VisionPrompt;

const TEMPERATURE: f32 = 0.1;

const FACE_INSTRUCTION: &str = r#"You are NextSelf AI, a premium grooming and self-improvement coach.
A user has uploaded a selfie for analysis. Score the subject's facial
presentation and generate a HIGHLY PERSONALIZED transformation roadmap.
Be specific. Be honest but constructive.

Respond STRICTLY in this JSON format:
{
  "isValid": boolean (true only if a clear human face is visible),
  "error": "short reason, only when isValid is false",
  "score": number (0-100, overall),
  "detailedScores": {
    "jawline": number (0-100),
    "skin": number (0-100),
    "masculinity": number (0-100),
    "cheekbones": number (0-100),
    "hair": number (0-100)
  },
  "roadmap": [
    { "category": "category name", "suggestion": "..." }
  ] (exactly 6 steps),
  "summary": "2-3 sentence overall assessment"
}"#;

const FITNESS_INSTRUCTION: &str = r#"Analyze this full-body photo for fitness and posture.
Respond with a JSON object:
{
    "valid": boolean (true if human full body is visible),
    "score": number (0-100),
    "summary": "2-sentence analysis",
    "workout_items": [{"title": "string", "description": "string"}],
    "dietary_recommendations": [{"title": "string", "description": "string"}]
}"#;

const FITNESS_SYSTEM: &str = "You are a professional fitness analyst. Return strictly JSON.";

pub fn face_analysis_prompt(model: &str) -> VisionPrompt {
    VisionPrompt {
        model: model.to_string(),
        system: None,
        instruction: FACE_INSTRUCTION.to_string(),
        temperature: TEMPERATURE,
    }
}

pub fn fitness_prompt(model: &str, bio: Option<&BioProfile>) -> VisionPrompt {
    let mut instruction = FITNESS_INSTRUCTION.to_string();
    if let Some(bio) = bio {
        instruction.push_str(&format!(
            "\n\nSubject profile: {} year old {}, {} cm, {} kg, activity level \"{}\", primary goal \"{}\". Tailor the plan to this profile.",
            bio.age, bio.gender, bio.height, bio.weight, bio.activity, bio.goal
        ));
    }

    VisionPrompt {
        model: model.to_string(),
        system: Some(FITNESS_SYSTEM.to_string()),
        instruction,
        temperature: TEMPERATURE,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn face_prompt_names_every_required_field() {
        let prompt = face_analysis_prompt("m");
        for key in [
            "isValid",
            "score",
            "detailedScores",
            "jawline",
            "skin",
            "masculinity",
            "cheekbones",
            "hair",
            "roadmap",
            "summary",
        ] {
            assert!(
                prompt.instruction.contains(key),
                "face prompt missing `{key}`"
            );
        }
    }

    #[test]
    fn fitness_prompt_names_every_required_field() {
        let prompt = fitness_prompt("m", None);
        for key in [
            "valid",
            "score",
            "summary",
            "workout_items",
            "dietary_recommendations",
        ] {
            assert!(
                prompt.instruction.contains(key),
                "fitness prompt missing `{key}`"
            );
        }
        assert_eq!(prompt.system.as_deref(), Some(FITNESS_SYSTEM));
    }

    #[test]
    fn prompts_are_deterministic() {
        assert_eq!(face_analysis_prompt("m"), face_analysis_prompt("m"));
        assert_eq!(fitness_prompt("m", None), fitness_prompt("m", None));
    }

    #[test]
    fn fitness_prompt_appends_bio_context_when_present() {
        let bio = BioProfile {
            gender: "Female".to_string(),
            age: 31,
            height: 168,
            weight: 62,
            activity: "Lightly Active (1-2 days/week)".to_string(),
            goal: "Fix Posture".to_string(),
        };

        let with_bio = fitness_prompt("m", Some(&bio));
        let without = fitness_prompt("m", None);

        assert!(with_bio.instruction.starts_with(&without.instruction));
        assert!(with_bio.instruction.contains("31 year old Female"));
        assert!(with_bio.instruction.contains("Fix Posture"));
    }
}
