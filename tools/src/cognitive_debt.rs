//! Cognitive debt assessment: eighteen weighted questions across six categories.
//!
//! Each response is a 0..=4 agreement score. Unanswered questions count as 0.

use std::collections::{BTreeMap, HashMap};
use std::fmt;

use serde::{Deserialize, Serialize};

use crate::CalculatorError;

pub const MAX_RESPONSE: u8 = 4;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum DebtCategory {
    MentalFog,
    EmotionalExhaustion,
    CreativeShutdown,
    RelationshipDecay,
    PhysicalSymptoms,
    IdentityErosion,
}

impl DebtCategory {
    pub const ALL: [DebtCategory; 6] = [
        Self::MentalFog,
        Self::EmotionalExhaustion,
        Self::CreativeShutdown,
        Self::RelationshipDecay,
        Self::PhysicalSymptoms,
        Self::IdentityErosion,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::MentalFog => "mental_fog",
            Self::EmotionalExhaustion => "emotional_exhaustion",
            Self::CreativeShutdown => "creative_shutdown",
            Self::RelationshipDecay => "relationship_decay",
            Self::PhysicalSymptoms => "physical_symptoms",
            Self::IdentityErosion => "identity_erosion",
        }
    }

    #[must_use]
    pub const fn display_name(self) -> &'static str {
        match self {
            Self::MentalFog => "Mental Fog",
            Self::EmotionalExhaustion => "Emotional Exhaustion",
            Self::CreativeShutdown => "Creative Shutdown",
            Self::RelationshipDecay => "Relationship Decay",
            Self::PhysicalSymptoms => "Physical Symptoms",
            Self::IdentityErosion => "Identity Erosion",
        }
    }

    #[must_use]
    pub const fn description(self) -> &'static str {
        match self {
            Self::MentalFog => {
                "Reduced cognitive function, difficulty concentrating and thinking clearly"
            }
            Self::EmotionalExhaustion => "Feeling drained, overwhelmed, and increasingly cynical",
            Self::CreativeShutdown => "Loss of inspiration, innovation, and original thinking",
            Self::RelationshipDecay => "Damaged personal relationships and increasing isolation",
            Self::PhysicalSymptoms => {
                "Stress-induced health issues and reliance on coping substances"
            }
            Self::IdentityErosion => "Loss of sense of self, purpose, and core values",
        }
    }

    const fn recommendations(self) -> [&'static str; 2] {
        match self {
            Self::MentalFog => [
                "Practice mindfulness meditation to improve focus",
                "Reduce multitasking and implement single-tasking periods",
            ],
            Self::EmotionalExhaustion => [
                "Build a daily decompression routine after work",
                "Connect with others who understand your situation",
            ],
            Self::CreativeShutdown => [
                "Engage in creative activities outside of work",
                "Challenge yourself with new learning opportunities",
            ],
            Self::RelationshipDecay => [
                "Schedule regular quality time with loved ones",
                "Communicate openly about your work stress",
            ],
            Self::PhysicalSymptoms => [
                "Consult with a healthcare provider about stress symptoms",
                "Incorporate regular exercise and stress-reduction techniques",
            ],
            Self::IdentityErosion => [
                "Reconnect with your core values and life purpose",
                "Consider working with a life coach or therapist",
            ],
        }
    }
}

impl fmt::Display for DebtCategory {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct DebtQuestion {
    pub id: &'static str,
    pub category: DebtCategory,
    pub question: &'static str,
    pub description: &'static str,
    pub weight: f64,
}

const fn q(
    id: &'static str,
    category: DebtCategory,
    question: &'static str,
    description: &'static str,
    weight: f64,
) -> DebtQuestion {
    DebtQuestion {
        id,
        category,
        question,
        description,
        weight,
    }
}

#[rustfmt::skip]
pub const QUESTIONS: [DebtQuestion; 18] = {
    use DebtCategory::{
        CreativeShutdown, EmotionalExhaustion, IdentityErosion, MentalFog, PhysicalSymptoms,
        RelationshipDecay,
    };
    [
        q("mf1", MentalFog, "I have trouble concentrating or focusing on tasks",
          "Difficulty maintaining attention, easily distracted", 1.2),
        q("mf2", MentalFog, "I feel mentally \"cloudy\" or like my thinking is slower than usual",
          "Processing information takes more effort, decisions feel harder", 1.1),
        q("mf3", MentalFog, "I forget things more often than I used to",
          "Memory lapses, missing appointments, forgetting conversations", 1.0),
        q("ee1", EmotionalExhaustion, "I feel emotionally drained after work",
          "Depleted energy for personal life, relationships, hobbies", 1.3),
        q("ee2", EmotionalExhaustion, "I feel cynical or negative about my work and colleagues",
          "Growing resentment, loss of faith in the system", 1.2),
        q("ee3", EmotionalExhaustion, "Small frustrations at work feel overwhelming",
          "Minor issues trigger disproportionate emotional responses", 1.1),
        q("cs1", CreativeShutdown, "I rarely have new ideas or creative insights anymore",
          "Mental stagnation, loss of innovative thinking", 1.2),
        q("cs2", CreativeShutdown, "I avoid taking on challenging or novel projects",
          "Preferring routine, safe tasks over growth opportunities", 1.1),
        q("cs3", CreativeShutdown, "I have lost interest in learning new skills or pursuing curiosity",
          "Intellectual apathy, no desire for growth or exploration", 1.3),
        q("rd1", RelationshipDecay, "I am too tired or stressed to invest in my relationships",
          "Neglecting family, friends, romantic partnerships", 1.4),
        q("rd2", RelationshipDecay, "I avoid social situations or feel disconnected when I attend them",
          "Social isolation, feeling like an outsider", 1.2),
        q("rd3", RelationshipDecay, "My work stress negatively affects my mood at home",
          "Bringing workplace toxicity into personal life", 1.3),
        q("ps1", PhysicalSymptoms, "I experience physical symptoms like headaches, tension, or stomach issues",
          "Body manifestations of chronic stress", 1.1),
        q("ps2", PhysicalSymptoms, "My sleep quality has deteriorated",
          "Trouble falling asleep, staying asleep, or feeling rested", 1.2),
        q("ps3", PhysicalSymptoms, "I rely on substances (caffeine, alcohol, etc.) to cope with work stress",
          "Using external aids to manage overwhelming feelings", 1.3),
        q("ie1", IdentityErosion, "I have lost touch with my personal values and what matters to me",
          "Values drift, feeling disconnected from core beliefs", 1.4),
        q("ie2", IdentityErosion, "I feel like I am just going through the motions",
          "Existential emptiness, lack of purpose or meaning", 1.3),
        q("ie3", IdentityErosion, "I no longer recognize the person I have become",
          "Fundamental shift away from authentic self", 1.5),
    ]
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtResponse {
    pub question_id: String,
    pub score: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Serialize, Deserialize)]
#[serde(rename_all = "lowercase")]
pub enum RiskLevel {
    Low,
    Moderate,
    High,
    Critical,
}

impl RiskLevel {
    #[must_use]
    pub fn for_percentage(percentage: f64) -> Self {
        if percentage >= 75.0 {
            Self::Critical
        } else if percentage >= 50.0 {
            Self::High
        } else if percentage >= 25.0 {
            Self::Moderate
        } else {
            Self::Low
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Low => "low",
            Self::Moderate => "moderate",
            Self::High => "high",
            Self::Critical => "critical",
        }
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Default, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct CategoryScore {
    pub score: f64,
    pub max_score: f64,
    pub percentage: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct DebtAssessment {
    pub total_score: f64,
    pub max_possible_score: f64,
    pub percentage_score: f64,
    pub category_scores: BTreeMap<DebtCategory, CategoryScore>,
    pub risk_level: RiskLevel,
    /// Categories above 60 %, worst first.
    pub primary_concerns: Vec<DebtCategory>,
    pub recommendations: Vec<&'static str>,
    pub message: String,
}

/// Score a set of responses. Later answers to the same question win.
pub fn assess_cognitive_debt(
    responses: &[DebtResponse],
) -> Result<DebtAssessment, CalculatorError> {
    let mut answers: HashMap<&str, u8> = HashMap::new();
    for response in responses {
        let Some(question) = QUESTIONS.iter().find(|q| q.id == response.question_id) else {
            return Err(CalculatorError::UnknownQuestion(response.question_id.clone()));
        };
        if response.score > MAX_RESPONSE {
            return Err(CalculatorError::ScoreOutOfRange {
                question: response.question_id.clone(),
                score: response.score,
            });
        }
        answers.insert(question.id, response.score);
    }

    let mut category_scores: BTreeMap<DebtCategory, CategoryScore> = DebtCategory::ALL
        .into_iter()
        .map(|c| (c, CategoryScore::default()))
        .collect();
    let mut total_score = 0.0;
    let mut max_possible_score = 0.0;

    for question in &QUESTIONS {
        let answer = f64::from(answers.get(question.id).copied().unwrap_or(0));
        let weighted = answer * question.weight;
        let max = f64::from(MAX_RESPONSE) * question.weight;
        total_score += weighted;
        max_possible_score += max;
        let entry = category_scores.entry(question.category).or_default();
        entry.score += weighted;
        entry.max_score += max;
    }
    for score in category_scores.values_mut() {
        if score.max_score > 0.0 {
            score.percentage = score.score / score.max_score * 100.0;
        }
    }

    let percentage_score = total_score / max_possible_score * 100.0;
    let risk_level = RiskLevel::for_percentage(percentage_score);

    let mut primary_concerns: Vec<DebtCategory> = category_scores
        .iter()
        .filter(|(_, s)| s.percentage > 60.0)
        .map(|(c, _)| *c)
        .collect();
    primary_concerns.sort_by(|a, b| {
        category_scores[b]
            .percentage
            .total_cmp(&category_scores[a].percentage)
    });

    let recommendations = recommendations(&category_scores, risk_level);
    let message = personalized_message(risk_level, &primary_concerns);

    Ok(DebtAssessment {
        total_score,
        max_possible_score,
        percentage_score,
        category_scores,
        risk_level,
        primary_concerns,
        recommendations,
        message,
    })
}

fn recommendations(
    scores: &BTreeMap<DebtCategory, CategoryScore>,
    risk: RiskLevel,
) -> Vec<&'static str> {
    let mut out = Vec::new();
    if risk == RiskLevel::Critical {
        out.push("Consider speaking with a mental health professional immediately");
        out.push("Take time off work if possible to reset and recover");
    }
    if risk >= RiskLevel::High {
        out.push("Begin planning your exit strategy with the Runway Calculator");
        out.push("Set firm boundaries between work and personal time");
    }
    for (category, score) in scores {
        if score.percentage > 50.0 {
            out.extend(category.recommendations());
        }
    }
    if out.is_empty() {
        out.push("Continue monitoring your cognitive debt levels");
        out.push("Maintain healthy work-life boundaries");
    }
    out
}

fn personalized_message(risk: RiskLevel, concerns: &[DebtCategory]) -> String {
    match risk {
        RiskLevel::Critical => {
            "Your cognitive debt levels are in the critical range. This is not sustainable and requires immediate attention. You are paying a severe psychological price for your current work situation.".to_owned()
        }
        RiskLevel::High => {
            let concern_text = if concerns.is_empty() {
                String::new()
            } else {
                format!(" Your primary areas of concern are {}.", format_concerns(concerns))
            };
            format!(
                "Your cognitive debt is substantial and unsustainable.{concern_text} It's time to seriously consider your options and plan your path to freedom."
            )
        }
        RiskLevel::Moderate => {
            "You're experiencing moderate cognitive debt. While manageable in the short term, these levels suggest you should begin planning changes to prevent further deterioration.".to_owned()
        }
        RiskLevel::Low => {
            "Your cognitive debt levels are relatively low. You're managing the mental costs of your work situation well, but continue to monitor and maintain healthy boundaries.".to_owned()
        }
    }
}

/// `"a"`, `"a and b"`, `"a, b, and c"` with underscores turned into spaces.
fn format_concerns(concerns: &[DebtCategory]) -> String {
    let names: Vec<String> = concerns.iter().map(|c| c.as_str().replace('_', " ")).collect();
    match names.as_slice() {
        [] => String::new(),
        [one] => one.clone(),
        [a, b] => format!("{a} and {b}"),
        [init @ .., last] => format!("{}, and {last}", init.join(", ")),
    }
}
