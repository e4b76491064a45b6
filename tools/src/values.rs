//! Values assessment and values-to-vocation matching.
//!
//! Fifty weighted questions score twenty core values on a 1..=5 importance
//! scale. The resulting profile is matched against a small catalog of
//! freedom-friendly vocations.

use std::collections::{BTreeMap, HashMap};
use std::fmt;
use std::str::FromStr;

use serde::{Deserialize, Serialize};
use thiserror::Error;

use crate::CalculatorError;

pub const MIN_IMPORTANCE: u8 = 1;
pub const MAX_IMPORTANCE: u8 = 5;

/// Matches scoring below this are not worth showing.
const MIN_ALIGNMENT: f64 = 40.0;
const MAX_MATCHES: usize = 10;
const DOMINANT_COUNT: usize = 5;

#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum CoreValue {
    Autonomy,
    Creativity,
    Impact,
    Growth,
    Security,
    Balance,
    Connection,
    Recognition,
    Challenge,
    Service,
    Authenticity,
    Mastery,
    Variety,
    Leadership,
    Adventure,
    Spirituality,
    Justice,
    Beauty,
    Knowledge,
    Family,
}

impl CoreValue {
    pub const ALL: [CoreValue; 20] = [
        Self::Autonomy,
        Self::Creativity,
        Self::Impact,
        Self::Growth,
        Self::Security,
        Self::Balance,
        Self::Connection,
        Self::Recognition,
        Self::Challenge,
        Self::Service,
        Self::Authenticity,
        Self::Mastery,
        Self::Variety,
        Self::Leadership,
        Self::Adventure,
        Self::Spirituality,
        Self::Justice,
        Self::Beauty,
        Self::Knowledge,
        Self::Family,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Autonomy => "autonomy",
            Self::Creativity => "creativity",
            Self::Impact => "impact",
            Self::Growth => "growth",
            Self::Security => "security",
            Self::Balance => "balance",
            Self::Connection => "connection",
            Self::Recognition => "recognition",
            Self::Challenge => "challenge",
            Self::Service => "service",
            Self::Authenticity => "authenticity",
            Self::Mastery => "mastery",
            Self::Variety => "variety",
            Self::Leadership => "leadership",
            Self::Adventure => "adventure",
            Self::Spirituality => "spirituality",
            Self::Justice => "justice",
            Self::Beauty => "beauty",
            Self::Knowledge => "knowledge",
            Self::Family => "family",
        }
    }

    /// What a vocation that works against this value tends to cost.
    fn conflict_description(self, title: &str) -> String {
        match self {
            Self::Autonomy => format!(
                "{title} may involve client dependencies or market constraints that limit complete autonomy"
            ),
            Self::Creativity => {
                format!("{title} might have limited opportunities for creative expression")
            }
            Self::Impact => {
                format!("{title} may not provide the level of social impact you're seeking")
            }
            Self::Growth => {
                format!("{title} could have limited learning and development opportunities")
            }
            Self::Security => {
                format!("{title} involves financial uncertainty and irregular income")
            }
            Self::Balance => format!("{title} may require long hours or high stress periods"),
            Self::Connection => {
                format!("{title} might involve significant solo work with limited collaboration")
            }
            Self::Recognition => {
                format!("{title} may not provide the professional recognition you value")
            }
            Self::Challenge => {
                format!("{title} might not offer sufficient intellectual stimulation")
            }
            Self::Service => format!("{title} may have limited direct service to others"),
            Self::Authenticity => {
                format!("{title} might require compromising on personal values")
            }
            Self::Mastery => {
                format!("{title} may have limited opportunities for deep skill development")
            }
            Self::Variety => format!("{title} could involve repetitive or routine work"),
            Self::Leadership => format!("{title} might not provide leadership opportunities"),
            Self::Adventure => format!("{title} may offer limited excitement or risk"),
            Self::Spirituality => {
                format!("{title} might not connect to higher purpose or meaning")
            }
            Self::Justice => {
                format!("{title} may not contribute to social justice or fairness")
            }
            Self::Beauty => {
                format!("{title} might have limited aesthetic or artistic elements")
            }
            Self::Knowledge => {
                format!("{title} may not involve significant intellectual pursuit")
            }
            Self::Family => format!("{title} could conflict with family time and priorities"),
        }
    }
}

impl fmt::Display for CoreValue {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown core value: {0}")]
pub struct CoreValueError(pub String);

impl FromStr for CoreValue {
    type Err = CoreValueError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase();
        Self::ALL
            .into_iter()
            .find(|v| v.as_str() == wanted)
            .ok_or_else(|| CoreValueError(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq)]
pub struct ValueQuestion {
    pub id: &'static str,
    pub value: CoreValue,
    pub scenario: &'static str,
    pub description: &'static str,
    pub weight: f64,
}

const fn q(
    id: &'static str,
    value: CoreValue,
    scenario: &'static str,
    description: &'static str,
    weight: f64,
) -> ValueQuestion {
    ValueQuestion {
        id,
        value,
        scenario,
        description,
        weight,
    }
}

#[rustfmt::skip]
pub const VALUE_QUESTIONS: [ValueQuestion; 50] = {
    use CoreValue::{
        Adventure, Authenticity, Autonomy, Balance, Beauty, Challenge, Connection, Creativity,
        Family, Growth, Impact, Justice, Knowledge, Leadership, Mastery, Recognition, Security,
        Service, Spirituality, Variety,
    };
    [
        q("autonomy_1", Autonomy, "Decision-making freedom in your work",
          "How important is it to have control over how, when, and where you work?", 1.2),
        q("autonomy_2", Autonomy, "Freedom from micromanagement",
          "How important is it to work without constant oversight or approval-seeking?", 1.0),
        q("autonomy_3", Autonomy, "Setting your own schedule",
          "How important is it to determine your own work hours and rhythms?", 1.1),
        q("creativity_1", Creativity, "Expressing original ideas",
          "How important is it to generate and implement new ideas in your work?", 1.0),
        q("creativity_2", Creativity, "Artistic or aesthetic expression",
          "How important is it to create something beautiful or aesthetically pleasing?", 1.1),
        q("creativity_3", Creativity, "Innovation and experimentation",
          "How important is it to try new approaches and break conventional thinking?", 1.0),
        q("impact_1", Impact, "Making a meaningful difference",
          "How important is it that your work creates positive change in the world?", 1.3),
        q("impact_2", Impact, "Legacy and lasting contribution",
          "How important is it to create something that outlasts your immediate effort?", 1.1),
        q("impact_3", Impact, "Solving important problems",
          "How important is it to work on challenges that really matter to society?", 1.2),
        q("growth_1", Growth, "Continuous learning",
          "How important is it to constantly develop new skills and knowledge?", 1.0),
        q("growth_2", Growth, "Personal evolution",
          "How important is it that your work challenges you to become a better person?", 1.1),
        q("growth_3", Growth, "Expanding capabilities",
          "How important is it to regularly push beyond your comfort zone?", 1.0),
        q("security_1", Security, "Financial predictability",
          "How important is it to have stable, predictable income?", 1.2),
        q("security_2", Security, "Job stability",
          "How important is it to have long-term employment security?", 1.0),
        q("security_3", Security, "Clear expectations",
          "How important is it to know exactly what is expected of you?", 0.9),
        q("balance_1", Balance, "Time for personal life",
          "How important is it to have adequate time for family, friends, and hobbies?", 1.3),
        q("balance_2", Balance, "Avoiding overwork",
          "How important is it to maintain reasonable working hours?", 1.1),
        q("balance_3", Balance, "Energy preservation",
          "How important is it to avoid work that drains you completely?", 1.2),
        q("connection_1", Connection, "Building relationships",
          "How important is it to form meaningful relationships through your work?", 1.0),
        q("connection_2", Connection, "Collaborative work",
          "How important is it to work closely with others toward shared goals?", 0.9),
        q("connection_3", Connection, "Community building",
          "How important is it to help create or strengthen communities?", 1.1),
        q("recognition_1", Recognition, "Acknowledgment of contributions",
          "How important is it to receive credit and appreciation for your work?", 0.9),
        q("recognition_2", Recognition, "Professional reputation",
          "How important is it to be known and respected in your field?", 1.0),
        q("recognition_3", Recognition, "Status and prestige",
          "How important is it to have a position that others view as successful?", 0.8),
        q("challenge_1", Challenge, "Complex problem-solving",
          "How important is it to work on difficult, intellectually demanding problems?", 1.0),
        q("challenge_2", Challenge, "Mental stimulation",
          "How important is it to be intellectually engaged and stimulated?", 1.1),
        q("challenge_3", Challenge, "Pushing boundaries",
          "How important is it to tackle things others think are impossible?", 0.9),
        q("service_1", Service, "Helping others directly",
          "How important is it to personally help individuals improve their lives?", 1.2),
        q("service_2", Service, "Contributing to society",
          "How important is it that your work serves the broader community?", 1.1),
        q("service_3", Service, "Caring and compassion",
          "How important is it to work in a caring, supportive environment?", 1.0),
        q("authenticity_1", Authenticity, "Being true to yourself",
          "How important is it to express your genuine personality at work?", 1.4),
        q("authenticity_2", Authenticity, "Aligning values and actions",
          "How important is it that your work reflects your personal values?", 1.3),
        q("authenticity_3", Authenticity, "Avoiding compromising situations",
          "How important is it to avoid work that conflicts with your principles?", 1.2),
        q("mastery_1", Mastery, "Developing deep expertise",
          "How important is it to become exceptionally skilled at something?", 1.0),
        q("mastery_2", Mastery, "Craftsmanship and quality",
          "How important is it to create high-quality, excellent work?", 1.1),
        q("mastery_3", Mastery, "Technical excellence",
          "How important is it to be known for your technical or professional skills?", 0.9),
        q("variety_1", Variety, "Diverse experiences",
          "How important is it to have varied, non-repetitive work?", 1.0),
        q("variety_2", Variety, "Avoiding routine",
          "How important is it to avoid predictable, routine tasks?", 0.9),
        q("leadership_1", Leadership, "Guiding and influencing others",
          "How important is it to lead teams or influence decision-making?", 1.0),
        q("leadership_2", Leadership, "Driving change",
          "How important is it to be responsible for creating organizational change?", 1.1),
        q("adventure_1", Adventure, "Excitement and novelty",
          "How important is it to have exciting, unpredictable work experiences?", 1.0),
        q("adventure_2", Adventure, "Risk and uncertainty",
          "How important is it to work in environments with some risk or uncertainty?", 0.8),
        q("spirituality_1", Spirituality, "Higher purpose",
          "How important is it that your work connects to something greater than material success?", 1.2),
        q("spirituality_2", Spirituality, "Meaning and transcendence",
          "How important is it that your work contributes to spiritual or philosophical growth?", 1.1),
        q("justice_1", Justice, "Fighting unfairness",
          "How important is it to work against injustice and inequality?", 1.2),
        q("justice_2", Justice, "Advocating for others",
          "How important is it to stand up for those who cannot advocate for themselves?", 1.1),
        q("beauty_1", Beauty, "Creating beautiful things",
          "How important is it to create or work with aesthetically pleasing things?", 1.0),
        q("knowledge_1", Knowledge, "Understanding and discovery",
          "How important is it to expand human knowledge or understanding?", 1.0),
        q("family_1", Family, "Prioritizing family time",
          "How important is it that your work allows quality time with family?", 1.3),
        q("family_2", Family, "Supporting family needs",
          "How important is it that your work supports your family's wellbeing?", 1.2),
    ]
};

/// Value pairs that pull against each other, with a 1..=10 tension level.
const VALUE_TENSIONS: [(CoreValue, CoreValue, u8); 13] = {
    use CoreValue::{
        Adventure, Authenticity, Autonomy, Balance, Challenge, Creativity, Family, Growth,
        Leadership, Mastery, Recognition, Security, Service, Spirituality, Variety,
    };
    [
        (Security, Adventure, 8),
        (Security, Autonomy, 6),
        (Balance, Challenge, 7),
        (Balance, Leadership, 6),
        (Balance, Growth, 5),
        (Security, Creativity, 5),
        (Recognition, Authenticity, 6),
        (Family, Challenge, 7),
        (Family, Leadership, 8),
        (Family, Adventure, 9),
        (Mastery, Variety, 6),
        (Service, Recognition, 4),
        (Spirituality, Recognition, 7),
    ]
};

#[derive(Debug, Clone, PartialEq, Eq, Serialize, Deserialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueResponse {
    pub question_id: String,
    pub importance: u8,
}

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct ValueAssessmentInputs {
    pub responses: Vec<ValueResponse>,
    pub current_role: Option<String>,
    pub industry: Option<String>,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RankedValue {
    pub value: CoreValue,
    pub score: f64,
    pub percentage: f64,
    pub rank: usize,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueConflict {
    pub value1: CoreValue,
    pub value2: CoreValue,
    pub tension_level: u8,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueProfile {
    /// Every value, highest percentage first.
    pub core_values: Vec<RankedValue>,
    pub value_distribution: BTreeMap<CoreValue, f64>,
    pub dominant_values: Vec<CoreValue>,
    pub conflicting_values: Vec<ValueConflict>,
    pub authenticity_score: u8,
}

impl ValueProfile {
    fn is_dominant(&self, value: CoreValue) -> bool {
        self.dominant_values.contains(&value)
    }
}

/// Score responses into a ranked profile. Later answers to the same question win.
pub fn calculate_value_profile(
    inputs: &ValueAssessmentInputs,
) -> Result<ValueProfile, CalculatorError> {
    let mut answers: HashMap<&str, u8> = HashMap::new();
    for response in &inputs.responses {
        let Some(question) = VALUE_QUESTIONS.iter().find(|q| q.id == response.question_id) else {
            return Err(CalculatorError::UnknownQuestion(response.question_id.clone()));
        };
        if !(MIN_IMPORTANCE..=MAX_IMPORTANCE).contains(&response.importance) {
            return Err(CalculatorError::OutOfRange {
                field: response.question_id.clone(),
                value: response.importance,
                min: MIN_IMPORTANCE,
                max: MAX_IMPORTANCE,
            });
        }
        answers.insert(question.id, response.importance);
    }

    let mut scores: BTreeMap<CoreValue, (f64, f64)> =
        CoreValue::ALL.into_iter().map(|v| (v, (0.0, 0.0))).collect();
    for question in &VALUE_QUESTIONS {
        if let Some(importance) = answers.get(question.id) {
            let entry = scores.entry(question.value).or_default();
            entry.0 += f64::from(*importance) * question.weight;
            entry.1 += f64::from(MAX_IMPORTANCE) * question.weight;
        }
    }

    // Ties keep catalog order.
    let mut core_values: Vec<RankedValue> = CoreValue::ALL
        .into_iter()
        .map(|value| {
            let (score, max) = scores[&value];
            RankedValue {
                value,
                score,
                percentage: if max > 0.0 { score / max * 100.0 } else { 0.0 },
                rank: 0,
            }
        })
        .collect();
    core_values.sort_by(|a, b| b.percentage.total_cmp(&a.percentage));
    for (i, value) in core_values.iter_mut().enumerate() {
        value.rank = i + 1;
    }

    let dominant_values: Vec<CoreValue> = core_values
        .iter()
        .take(DOMINANT_COUNT)
        .map(|v| v.value)
        .collect();
    let conflicting_values = value_conflicts(&dominant_values, &core_values);
    let authenticity_score = if inputs.current_role.is_some() && inputs.industry.is_some() {
        65
    } else {
        50
    };

    Ok(ValueProfile {
        value_distribution: scores.into_iter().map(|(v, (score, _))| (v, score)).collect(),
        core_values,
        dominant_values,
        conflicting_values,
        authenticity_score,
    })
}

fn tension(a: CoreValue, b: CoreValue) -> Option<u8> {
    VALUE_TENSIONS
        .iter()
        .find(|(x, y, _)| (*x == a && *y == b) || (*x == b && *y == a))
        .map(|(_, _, level)| *level)
}

/// Tensions of 5 or more between dominant values that both score at least 60 %.
fn value_conflicts(dominant: &[CoreValue], ranked: &[RankedValue]) -> Vec<ValueConflict> {
    let pct = |value: CoreValue| {
        ranked
            .iter()
            .find(|v| v.value == value)
            .map_or(0.0, |v| v.percentage)
    };
    let mut conflicts = Vec::new();
    for (i, &value1) in dominant.iter().enumerate() {
        for &value2 in &dominant[i + 1..] {
            let Some(tension_level) = tension(value1, value2) else {
                continue;
            };
            if tension_level >= 5 && pct(value1) >= 60.0 && pct(value2) >= 60.0 {
                conflicts.push(ValueConflict {
                    value1,
                    value2,
                    tension_level,
                });
            }
        }
    }
    conflicts.sort_by(|a, b| b.tension_level.cmp(&a.tension_level));
    conflicts
}

#[derive(Debug, Clone, Default, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueInsights {
    pub top_strengths: Vec<String>,
    pub potential_challenges: Vec<String>,
    pub career_themes: Vec<String>,
    pub recommendations: Vec<String>,
}

#[must_use]
pub fn value_insights(profile: &ValueProfile) -> ValueInsights {
    use CoreValue::{
        Authenticity, Autonomy, Balance, Challenge, Creativity, Impact, Leadership, Security,
        Service,
    };

    let has = |v| profile.is_dominant(v);
    let mut out = ValueInsights::default();

    if has(Autonomy) {
        out.top_strengths.push("Strong drive for independence and self-direction".to_owned());
        out.career_themes.push("Remote work, freelancing, or entrepreneurship".to_owned());
        if has(Security) {
            out.potential_challenges
                .push("Tension between freedom and financial security".to_owned());
        }
    }
    if has(Impact) {
        out.top_strengths.push("Mission-driven approach to work and life".to_owned());
        out.career_themes
            .push("Social impact, non-profit, or purpose-driven companies".to_owned());
    }
    if has(Creativity) {
        out.top_strengths.push("Innovative thinking and creative problem-solving".to_owned());
        out.career_themes.push("Creative industries, design, or innovation roles".to_owned());
    }
    if has(Balance) {
        out.top_strengths.push("Sustainable approach to work and life integration".to_owned());
        if has(Challenge) || has(Leadership) {
            out.potential_challenges
                .push("Balancing ambition with work-life boundaries".to_owned());
        }
    }
    if has(Authenticity) {
        out.top_strengths
            .push("Strong sense of personal integrity and values alignment".to_owned());
        if profile.authenticity_score < 60 {
            out.recommendations
                .push("Consider roles that better align with your authentic self".to_owned());
        }
    }

    for conflict in &profile.conflicting_values {
        if conflict.tension_level >= 7 {
            out.potential_challenges.push(format!(
                "High tension between {} and {} may require careful career choices",
                conflict.value1, conflict.value2
            ));
        }
    }

    if profile.authenticity_score < 50 {
        out.recommendations.push(
            "Significant values misalignment detected - consider major career pivot".to_owned(),
        );
    } else if profile.authenticity_score < 70 {
        out.recommendations.push(
            "Moderate alignment - look for ways to incorporate more of your values into current work"
                .to_owned(),
        );
    }

    let entrepreneurial = [Autonomy, Creativity, Impact];
    if profile
        .dominant_values
        .iter()
        .take(3)
        .all(|v| entrepreneurial.contains(v))
    {
        out.recommendations
            .push("Your profile strongly suggests entrepreneurial or freelance paths".to_owned());
    }
    if has(Service) && has(Impact) {
        out.recommendations
            .push("Consider social enterprise or mission-driven organizations".to_owned());
    }

    out
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
#[serde(rename_all = "snake_case")]
pub enum WorkArrangement {
    RemoteEmployee,
    HybridEmployee,
    TraditionalEmployee,
    Freelancer,
    Consultant,
    Contractor,
    Entrepreneur,
    Solopreneur,
    CoFounder,
    DigitalNomad,
    PortfolioCareer,
    PartTimeMulti,
    SeasonalWork,
    ProjectBased,
}

impl WorkArrangement {
    pub const ALL: [WorkArrangement; 14] = [
        Self::RemoteEmployee,
        Self::HybridEmployee,
        Self::TraditionalEmployee,
        Self::Freelancer,
        Self::Consultant,
        Self::Contractor,
        Self::Entrepreneur,
        Self::Solopreneur,
        Self::CoFounder,
        Self::DigitalNomad,
        Self::PortfolioCareer,
        Self::PartTimeMulti,
        Self::SeasonalWork,
        Self::ProjectBased,
    ];

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::RemoteEmployee => "remote_employee",
            Self::HybridEmployee => "hybrid_employee",
            Self::TraditionalEmployee => "traditional_employee",
            Self::Freelancer => "freelancer",
            Self::Consultant => "consultant",
            Self::Contractor => "contractor",
            Self::Entrepreneur => "entrepreneur",
            Self::Solopreneur => "solopreneur",
            Self::CoFounder => "co_founder",
            Self::DigitalNomad => "digital_nomad",
            Self::PortfolioCareer => "portfolio_career",
            Self::PartTimeMulti => "part_time_multi",
            Self::SeasonalWork => "seasonal_work",
            Self::ProjectBased => "project_based",
        }
    }
}

impl fmt::Display for WorkArrangement {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown work arrangement: {0}")]
pub struct WorkArrangementError(pub String);

impl FromStr for WorkArrangement {
    type Err = WorkArrangementError;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        let wanted = s.trim().to_ascii_lowercase().replace('-', "_");
        Self::ALL
            .into_iter()
            .find(|a| a.as_str() == wanted)
            .ok_or_else(|| WorkArrangementError(s.to_owned()))
    }
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Pathway {
    pub name: &'static str,
    pub timeframe: &'static str,
    pub steps: &'static [&'static str],
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct RealityCheck {
    pub average_income: &'static str,
    pub time_to_viability: &'static str,
    /// 1..=10
    pub difficulty_level: u8,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct LiberationPotential {
    pub autonomy_level: u8,
    pub flexibility_level: u8,
    pub income_stability: u8,
    pub growth_ceiling: u8,
    pub time_to_freedom: &'static str,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct Vocation {
    pub id: &'static str,
    pub title: &'static str,
    pub category: &'static str,
    pub primary_values: &'static [CoreValue],
    pub secondary_values: &'static [CoreValue],
    pub conflicting_values: &'static [CoreValue],
    pub arrangements: &'static [WorkArrangement],
    pub skills_required: &'static [&'static str],
    pub pathways: &'static [Pathway],
    pub reality_check: RealityCheck,
    pub liberation_potential: LiberationPotential,
}

impl Vocation {
    fn support_for(&self, value: CoreValue) -> f64 {
        if self.primary_values.contains(&value) {
            90.0
        } else if self.secondary_values.contains(&value) {
            60.0
        } else if self.conflicting_values.contains(&value) {
            10.0
        } else {
            40.0
        }
    }
}

pub static VOCATIONS: [Vocation; 11] = {
    use CoreValue::{
        Adventure, Authenticity, Autonomy, Balance, Challenge, Connection, Creativity, Growth,
        Impact, Leadership, Mastery, Recognition, Security, Service, Variety,
    };
    use WorkArrangement::{
        CoFounder, Consultant, Contractor, DigitalNomad, Entrepreneur, Freelancer, PartTimeMulti,
        PortfolioCareer, RemoteEmployee, SeasonalWork, Solopreneur,
    };
    [
        Vocation {
            id: "software_developer_freelance",
            title: "Freelance Software Developer",
            category: "technology",
            primary_values: &[Autonomy, Creativity, Challenge, Mastery],
            secondary_values: &[Growth, Variety, Balance],
            conflicting_values: &[Security, Connection],
            arrangements: &[Freelancer, Contractor, DigitalNomad, RemoteEmployee],
            skills_required: &[
                "Programming languages",
                "Software architecture",
                "Problem-solving",
                "Client communication",
            ],
            pathways: &[
                Pathway {
                    name: "Skill Building Path",
                    timeframe: "6-12 months",
                    steps: &[
                        "Learn a high-demand programming language (Python, JavaScript, Go)",
                        "Build 3-5 portfolio projects showcasing different skills",
                        "Contribute to open source projects",
                        "Create professional online presence (GitHub, portfolio site)",
                        "Start with small freelance projects to build reputation",
                    ],
                },
                Pathway {
                    name: "Corporate Escape Path",
                    timeframe: "3-6 months",
                    steps: &[
                        "Build freelance client base while employed",
                        "Save 6-month emergency fund",
                        "Establish business processes and contracts",
                        "Make transition when freelance income reaches 75% of salary",
                        "Scale to premium pricing and ideal clients",
                    ],
                },
            ],
            reality_check: RealityCheck {
                average_income: "$60-150/hour ($75k-300k annually)",
                time_to_viability: "6-18 months",
                difficulty_level: 6,
            },
            liberation_potential: LiberationPotential {
                autonomy_level: 9,
                flexibility_level: 10,
                income_stability: 6,
                growth_ceiling: 9,
                time_to_freedom: "1-2 years",
            },
        },
        Vocation {
            id: "ux_designer_consultant",
            title: "UX Design Consultant",
            category: "technology",
            primary_values: &[Creativity, Impact, Challenge, Autonomy],
            secondary_values: &[Growth, Variety, Recognition],
            conflicting_values: &[Security, Variety],
            arrangements: &[Consultant, Freelancer, Contractor, RemoteEmployee],
            skills_required: &[
                "User research",
                "Design thinking",
                "Prototyping tools",
                "Visual design",
                "Client presentation",
            ],
            pathways: &[Pathway {
                name: "Design Foundation Path",
                timeframe: "9-15 months",
                steps: &[
                    "Complete UX design certification or bootcamp",
                    "Master design tools (Figma, Adobe Creative Suite)",
                    "Create 3-4 case studies for portfolio",
                    "Network with local startups and agencies",
                    "Start with pro bono work to build experience",
                ],
            }],
            reality_check: RealityCheck {
                average_income: "$75-200/hour ($90k-250k annually)",
                time_to_viability: "12-24 months",
                difficulty_level: 7,
            },
            liberation_potential: LiberationPotential {
                autonomy_level: 8,
                flexibility_level: 9,
                income_stability: 7,
                growth_ceiling: 8,
                time_to_freedom: "1-3 years",
            },
        },
        Vocation {
            id: "content_creator",
            title: "Content Creator & Educator",
            category: "creative_arts",
            primary_values: &[Creativity, Autonomy, Impact, Authenticity],
            secondary_values: &[Growth, Variety, Recognition],
            conflicting_values: &[Security],
            arrangements: &[Solopreneur, DigitalNomad, PortfolioCareer],
            skills_required: &[
                "Content creation",
                "Video editing",
                "Audience building",
                "Marketing",
                "Teaching",
            ],
            pathways: &[Pathway {
                name: "Audience Building Path",
                timeframe: "12-24 months",
                steps: &[
                    "Choose content niche based on expertise and passion",
                    "Create consistent content schedule (daily/weekly)",
                    "Build email list and social media following",
                    "Create first digital product or course",
                    "Scale to multiple income streams",
                ],
            }],
            reality_check: RealityCheck {
                average_income: "$30k-500k+ annually (highly variable)",
                time_to_viability: "18-36 months",
                difficulty_level: 8,
            },
            liberation_potential: LiberationPotential {
                autonomy_level: 10,
                flexibility_level: 10,
                income_stability: 4,
                growth_ceiling: 10,
                time_to_freedom: "2-4 years",
            },
        },
        Vocation {
            id: "freelance_writer",
            title: "Freelance Writer & Copywriter",
            category: "creative_arts",
            primary_values: &[Creativity, Autonomy, Variety, Balance],
            secondary_values: &[Mastery, Impact, Variety],
            conflicting_values: &[Security],
            arrangements: &[Freelancer, Contractor, DigitalNomad, RemoteEmployee],
            skills_required: &[
                "Writing",
                "Research",
                "Marketing psychology",
                "SEO",
                "Client management",
            ],
            pathways: &[Pathway {
                name: "Portfolio Building Path",
                timeframe: "6-12 months",
                steps: &[
                    "Identify writing niche (B2B, health, finance, etc.)",
                    "Create portfolio with 5-8 strong samples",
                    "Join freelance platforms and pitch consistently",
                    "Build relationships with content agencies",
                    "Transition to direct clients and premium rates",
                ],
            }],
            reality_check: RealityCheck {
                average_income: "$25-100/hour ($40k-120k annually)",
                time_to_viability: "6-12 months",
                difficulty_level: 5,
            },
            liberation_potential: LiberationPotential {
                autonomy_level: 8,
                flexibility_level: 9,
                income_stability: 6,
                growth_ceiling: 7,
                time_to_freedom: "1-2 years",
            },
        },
        Vocation {
            id: "business_consultant",
            title: "Independent Business Consultant",
            category: "consulting",
            primary_values: &[Challenge, Impact, Autonomy, Recognition],
            secondary_values: &[Mastery, Variety, Growth],
            conflicting_values: &[Security, Variety],
            arrangements: &[Consultant, Contractor, PortfolioCareer],
            skills_required: &[
                "Industry expertise",
                "Problem-solving",
                "Presentation skills",
                "Business analysis",
                "Networking",
            ],
            pathways: &[Pathway {
                name: "Expertise Monetization Path",
                timeframe: "3-9 months",
                steps: &[
                    "Identify unique expertise and market demand",
                    "Create consulting framework and methodologies",
                    "Build professional brand and thought leadership",
                    "Network with former colleagues and industry contacts",
                    "Start with project work while maintaining employment",
                ],
            }],
            reality_check: RealityCheck {
                average_income: "$100-500/hour ($150k-400k annually)",
                time_to_viability: "6-18 months",
                difficulty_level: 7,
            },
            liberation_potential: LiberationPotential {
                autonomy_level: 9,
                flexibility_level: 8,
                income_stability: 7,
                growth_ceiling: 9,
                time_to_freedom: "1-2 years",
            },
        },
        Vocation {
            id: "social_entrepreneur",
            title: "Social Entrepreneur",
            category: "social_impact",
            primary_values: &[Impact, Authenticity, Service, Challenge],
            secondary_values: &[Creativity, Leadership, Growth],
            conflicting_values: &[Security],
            arrangements: &[Entrepreneur, CoFounder, Solopreneur],
            skills_required: &[
                "Business development",
                "Social impact measurement",
                "Fundraising",
                "Leadership",
                "Partnership building",
            ],
            pathways: &[Pathway {
                name: "Mission-First Path",
                timeframe: "18-36 months",
                steps: &[
                    "Identify social problem you're passionate about solving",
                    "Research existing solutions and gaps",
                    "Develop minimal viable solution or pilot program",
                    "Build partnerships with relevant organizations",
                    "Scale impact while ensuring financial sustainability",
                ],
            }],
            reality_check: RealityCheck {
                average_income: "$30k-150k annually (varies widely)",
                time_to_viability: "24-48 months",
                difficulty_level: 9,
            },
            liberation_potential: LiberationPotential {
                autonomy_level: 10,
                flexibility_level: 7,
                income_stability: 4,
                growth_ceiling: 8,
                time_to_freedom: "3-5 years",
            },
        },
        Vocation {
            id: "life_coach",
            title: "Life & Career Coach",
            category: "coaching",
            primary_values: &[Service, Impact, Connection, Authenticity],
            secondary_values: &[Growth, Variety, Balance],
            conflicting_values: &[Challenge, Mastery],
            arrangements: &[Solopreneur, Contractor, PartTimeMulti],
            skills_required: &[
                "Active listening",
                "Coaching techniques",
                "Psychology basics",
                "Business development",
                "Online presence",
            ],
            pathways: &[Pathway {
                name: "Certification Path",
                timeframe: "9-18 months",
                steps: &[
                    "Complete accredited coaching certification program",
                    "Practice with pro bono clients to build skills",
                    "Develop coaching niche and methodology",
                    "Build online presence and marketing system",
                    "Scale to full practice with premium pricing",
                ],
            }],
            reality_check: RealityCheck {
                average_income: "$50-200/hour ($50k-150k annually)",
                time_to_viability: "12-24 months",
                difficulty_level: 6,
            },
            liberation_potential: LiberationPotential {
                autonomy_level: 9,
                flexibility_level: 9,
                income_stability: 6,
                growth_ceiling: 7,
                time_to_freedom: "1-3 years",
            },
        },
        Vocation {
            id: "craftsperson",
            title: "Independent Craftsperson/Artisan",
            category: "trades",
            primary_values: &[Mastery, Creativity, Authenticity, Balance],
            secondary_values: &[Variety, Challenge, Autonomy],
            conflicting_values: &[Security, Growth],
            arrangements: &[Solopreneur, Contractor, SeasonalWork],
            skills_required: &[
                "Craft-specific skills",
                "Quality control",
                "Customer service",
                "Basic business",
                "Marketing",
            ],
            pathways: &[Pathway {
                name: "Skill Mastery Path",
                timeframe: "12-36 months",
                steps: &[
                    "Master fundamental techniques through practice/apprenticeship",
                    "Create initial product line or service offerings",
                    "Build local customer base through markets/referrals",
                    "Develop online presence for broader reach",
                    "Scale through teaching, custom work, or premium products",
                ],
            }],
            reality_check: RealityCheck {
                average_income: "$30k-80k annually",
                time_to_viability: "18-36 months",
                difficulty_level: 6,
            },
            liberation_potential: LiberationPotential {
                autonomy_level: 8,
                flexibility_level: 7,
                income_stability: 5,
                growth_ceiling: 6,
                time_to_freedom: "2-4 years",
            },
        },
        Vocation {
            id: "health_practitioner",
            title: "Independent Health Practitioner",
            category: "healthcare",
            primary_values: &[Service, Impact, Balance, Authenticity],
            secondary_values: &[Connection, Mastery, Growth],
            conflicting_values: &[Challenge, Variety],
            arrangements: &[Solopreneur, Contractor, PartTimeMulti],
            skills_required: &[
                "Health/wellness certification",
                "Client care",
                "Business basics",
                "Continuing education",
                "Professional networking",
            ],
            pathways: &[Pathway {
                name: "Certification Path",
                timeframe: "12-24 months",
                steps: &[
                    "Complete required certification/licensing program",
                    "Gain supervised practice experience",
                    "Set up legal business structure and insurance",
                    "Build initial client base through referrals",
                    "Develop specialization and premium services",
                ],
            }],
            reality_check: RealityCheck {
                average_income: "$40-120/hour ($45k-100k annually)",
                time_to_viability: "12-24 months",
                difficulty_level: 5,
            },
            liberation_potential: LiberationPotential {
                autonomy_level: 7,
                flexibility_level: 8,
                income_stability: 6,
                growth_ceiling: 6,
                time_to_freedom: "2-3 years",
            },
        },
        Vocation {
            id: "real_estate_investor",
            title: "Real Estate Investor/Wholesaler",
            category: "real_estate",
            primary_values: &[Autonomy, Challenge, Growth, Variety],
            secondary_values: &[Mastery, Recognition, Adventure],
            conflicting_values: &[Security, Service],
            arrangements: &[Entrepreneur, Solopreneur, PortfolioCareer],
            skills_required: &[
                "Market analysis",
                "Negotiation",
                "Finance basics",
                "Property evaluation",
                "Network building",
            ],
            pathways: &[Pathway {
                name: "Wholesaling Path",
                timeframe: "6-18 months",
                steps: &[
                    "Learn local real estate market and laws",
                    "Build network of investors and contractors",
                    "Find first wholesale deal with minimal capital",
                    "Reinvest profits into larger deals",
                    "Scale to buy-and-hold or fix-and-flip",
                ],
            }],
            reality_check: RealityCheck {
                average_income: "$40k-200k+ annually (highly variable)",
                time_to_viability: "6-24 months",
                difficulty_level: 8,
            },
            liberation_potential: LiberationPotential {
                autonomy_level: 9,
                flexibility_level: 8,
                income_stability: 5,
                growth_ceiling: 9,
                time_to_freedom: "2-5 years",
            },
        },
        Vocation {
            id: "digital_marketing_consultant",
            title: "Digital Marketing Consultant",
            category: "business",
            primary_values: &[Variety, Challenge, Growth, Autonomy],
            secondary_values: &[Creativity, Impact, Recognition],
            conflicting_values: &[Security, Mastery],
            arrangements: &[Consultant, Freelancer, Contractor, RemoteEmployee],
            skills_required: &[
                "Digital marketing strategy",
                "Analytics",
                "Content creation",
                "Ad platform management",
                "Client communication",
            ],
            pathways: &[Pathway {
                name: "Specialist Path",
                timeframe: "9-18 months",
                steps: &[
                    "Choose one marketing channel to master (Facebook ads, SEO, etc.)",
                    "Get certified and practice on own projects",
                    "Offer services to local businesses at low rates",
                    "Build case studies and testimonials",
                    "Expand to additional channels and premium pricing",
                ],
            }],
            reality_check: RealityCheck {
                average_income: "$50-150/hour ($75k-200k annually)",
                time_to_viability: "9-18 months",
                difficulty_level: 6,
            },
            liberation_potential: LiberationPotential {
                autonomy_level: 8,
                flexibility_level: 9,
                income_stability: 7,
                growth_ceiling: 8,
                time_to_freedom: "1-3 years",
            },
        },
    ]
};

#[derive(Debug, Clone, Default, PartialEq, Eq)]
pub struct MatchPreferences {
    /// Empty means no preference.
    pub preferred_arrangements: Vec<WorkArrangement>,
    pub prioritize_income: bool,
    pub low_risk_tolerance: bool,
}

#[derive(Debug, Clone, Copy, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ValueMatch {
    pub value: CoreValue,
    pub importance: f64,
    pub vocation_support: f64,
    pub alignment: f64,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ConflictArea {
    pub value: CoreValue,
    pub conflict_severity: f64,
    pub description: String,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ArrangementFit {
    pub arrangement: WorkArrangement,
    pub suitability_score: u8,
    pub reasoning: String,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionDifficulty {
    Easy,
    Moderate,
    Challenging,
    Difficult,
}

#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum TransitionRisk {
    Low,
    Medium,
    High,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct TransitionStrategy {
    pub difficulty: TransitionDifficulty,
    pub timeframe: &'static str,
    pub key_steps: Vec<&'static str>,
    pub skill_gaps: Vec<&'static str>,
    pub risk_level: TransitionRisk,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocationMatch {
    pub vocation: &'static Vocation,
    pub alignment_score: f64,
    pub value_matches: Vec<ValueMatch>,
    pub conflict_areas: Vec<ConflictArea>,
    pub recommended_arrangements: Vec<ArrangementFit>,
    pub transition_strategy: TransitionStrategy,
}

/// Average alignment of the top matches, in four bands.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Serialize)]
#[serde(rename_all = "lowercase")]
pub enum AlignmentBand {
    Excellent,
    Good,
    Moderate,
    Limited,
}

impl AlignmentBand {
    #[must_use]
    pub fn for_average(average: f64) -> Self {
        if average >= 75.0 {
            Self::Excellent
        } else if average >= 60.0 {
            Self::Good
        } else if average >= 45.0 {
            Self::Moderate
        } else {
            Self::Limited
        }
    }

    #[must_use]
    pub const fn as_str(self) -> &'static str {
        match self {
            Self::Excellent => "excellent",
            Self::Good => "good",
            Self::Moderate => "moderate",
            Self::Limited => "limited",
        }
    }

    const fn summary(self) -> &'static str {
        match self {
            Self::Excellent => {
                "Excellent values alignment with multiple career paths. Your authentic self has strong market opportunities."
            }
            Self::Good => {
                "Good values alignment with several options. Some compromise may be needed but authentic paths exist."
            }
            Self::Moderate => {
                "Moderate alignment found. Consider values clarification or skill development to improve options."
            }
            Self::Limited => {
                "Limited alignment with current options. Deep values work or significant skill development may be needed."
            }
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct MatchingInsights {
    pub alignment_band: AlignmentBand,
    pub value_alignment: &'static str,
    pub career_themes: Vec<String>,
    pub strength_areas: Vec<String>,
    pub caution_areas: Vec<String>,
    pub recommendations: Vec<String>,
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct ExplorationSuggestion {
    pub action: String,
    pub purpose: &'static str,
    pub timeframe: &'static str,
}

#[derive(Debug, Clone, PartialEq, Serialize)]
#[serde(rename_all = "camelCase")]
pub struct VocationMatchingResult {
    pub top_matches: Vec<VocationMatch>,
    pub insights: MatchingInsights,
    pub exploration_suggestions: Vec<ExplorationSuggestion>,
}

/// Rank the vocation catalog against a profile. At most ten matches scoring 40 or more.
#[must_use]
pub fn match_vocations(profile: &ValueProfile, prefs: &MatchPreferences) -> VocationMatchingResult {
    let mut top_matches: Vec<VocationMatch> = VOCATIONS
        .iter()
        .map(|vocation| vocation_match(vocation, profile, prefs))
        .filter(|m| m.alignment_score >= MIN_ALIGNMENT)
        .collect();
    top_matches.sort_by(|a, b| b.alignment_score.total_cmp(&a.alignment_score));
    top_matches.truncate(MAX_MATCHES);

    let insights = matching_insights(profile, &top_matches);
    let exploration_suggestions = exploration_suggestions(profile, &top_matches);

    VocationMatchingResult {
        top_matches,
        insights,
        exploration_suggestions,
    }
}

fn vocation_match(
    vocation: &'static Vocation,
    profile: &ValueProfile,
    prefs: &MatchPreferences,
) -> VocationMatch {
    let value_matches: Vec<ValueMatch> = profile
        .core_values
        .iter()
        .map(|ranked| {
            let vocation_support = vocation.support_for(ranked.value);
            ValueMatch {
                value: ranked.value,
                importance: ranked.percentage,
                vocation_support,
                alignment: ranked.percentage * 0.6 + vocation_support * 0.4,
            }
        })
        .collect();

    let mut conflict_areas: Vec<ConflictArea> = profile
        .core_values
        .iter()
        .filter(|ranked| {
            vocation.conflicting_values.contains(&ranked.value) && ranked.percentage >= 60.0
        })
        .map(|ranked| ConflictArea {
            value: ranked.value,
            conflict_severity: ranked.percentage,
            description: ranked.value.conflict_description(vocation.title),
        })
        .collect();
    conflict_areas.sort_by(|a, b| b.conflict_severity.total_cmp(&a.conflict_severity));

    let alignment_score =
        overall_alignment(vocation, profile, &value_matches, &conflict_areas, prefs);

    VocationMatch {
        vocation,
        alignment_score,
        recommended_arrangements: arrangement_fits(vocation, profile, prefs),
        transition_strategy: transition_strategy(vocation, profile, alignment_score),
        value_matches,
        conflict_areas,
    }
}

fn overall_alignment(
    vocation: &Vocation,
    profile: &ValueProfile,
    value_matches: &[ValueMatch],
    conflicts: &[ConflictArea],
    prefs: &MatchPreferences,
) -> f64 {
    let top: f64 = value_matches
        .iter()
        .filter(|m| profile.is_dominant(m.value))
        .take(DOMINANT_COUNT)
        .map(|m| m.alignment)
        .sum::<f64>()
        / DOMINANT_COUNT as f64;

    let secondary: Vec<f64> = value_matches
        .iter()
        .filter(|m| !profile.is_dominant(m.value))
        .map(|m| m.alignment)
        .collect();
    let secondary = if secondary.is_empty() {
        50.0
    } else {
        secondary.iter().sum::<f64>() / secondary.len() as f64
    };

    let potential = &vocation.liberation_potential;
    let liberation = f64::from(
        potential.autonomy_level + potential.flexibility_level + potential.growth_ceiling,
    ) / 3.0
        * 10.0;
    let reality = f64::from(10 - vocation.reality_check.difficulty_level.min(10)) * 10.0;

    let penalty: f64 = conflicts
        .iter()
        .map(|c| {
            if c.conflict_severity >= 80.0 {
                15.0
            } else if c.conflict_severity >= 60.0 {
                10.0
            } else {
                5.0
            }
        })
        .sum();

    let mut score =
        (top * 0.6 + secondary * 0.25 + liberation * 0.1 + reality * 0.05 - penalty).max(0.0);

    if !prefs.preferred_arrangements.is_empty()
        && !vocation
            .arrangements
            .iter()
            .any(|a| prefs.preferred_arrangements.contains(a))
    {
        score *= 0.8;
    }
    if prefs.prioritize_income && vocation.reality_check.average_income.contains("$30k") {
        score *= 0.7;
    }
    if prefs.low_risk_tolerance && vocation.reality_check.difficulty_level >= 8 {
        score *= 0.6;
    }

    score.clamp(0.0, 100.0)
}

fn arrangement_fits(
    vocation: &Vocation,
    profile: &ValueProfile,
    prefs: &MatchPreferences,
) -> Vec<ArrangementFit> {
    use CoreValue::{Autonomy, Balance, Security, Variety};
    use WorkArrangement::{
        DigitalNomad, Entrepreneur, Freelancer, HybridEmployee, PartTimeMulti, PortfolioCareer,
        ProjectBased, RemoteEmployee, SeasonalWork, Solopreneur, TraditionalEmployee,
    };

    let mut fits: Vec<ArrangementFit> = vocation
        .arrangements
        .iter()
        .map(|&arrangement| {
            let mut score: i32 = 70;
            let mut reasons: Vec<&str> = Vec::new();

            if profile.is_dominant(Autonomy)
                && matches!(arrangement, Freelancer | Entrepreneur | Solopreneur)
            {
                score += 20;
                reasons.push("High autonomy match.");
            }
            if profile.is_dominant(Balance)
                && matches!(arrangement, PartTimeMulti | RemoteEmployee | SeasonalWork)
            {
                score += 15;
                reasons.push("Supports work-life balance.");
            }
            if profile.is_dominant(Security) {
                if matches!(arrangement, TraditionalEmployee | HybridEmployee) {
                    score += 10;
                    reasons.push("Provides more security.");
                } else if matches!(arrangement, Entrepreneur | Freelancer) {
                    score -= 15;
                    reasons.push("Lower security than desired.");
                }
            }
            if profile.is_dominant(Variety)
                && matches!(arrangement, PortfolioCareer | DigitalNomad | ProjectBased)
            {
                score += 15;
                reasons.push("Offers variety and change.");
            }
            if prefs.preferred_arrangements.contains(&arrangement) {
                score += 10;
                reasons.push("Matches stated preference.");
            }

            ArrangementFit {
                arrangement,
                suitability_score: score.clamp(0, 100) as u8,
                reasoning: if reasons.is_empty() {
                    "Standard compatibility for this arrangement.".to_owned()
                } else {
                    reasons.join(" ")
                },
            }
        })
        .collect();
    fits.sort_by(|a, b| b.suitability_score.cmp(&a.suitability_score));
    fits
}

fn transition_strategy(
    vocation: &Vocation,
    profile: &ValueProfile,
    alignment_score: f64,
) -> TransitionStrategy {
    let difficulty_level = vocation.reality_check.difficulty_level;
    let difficulty = if difficulty_level <= 4 && alignment_score >= 70.0 {
        TransitionDifficulty::Easy
    } else if difficulty_level <= 6 && alignment_score >= 60.0 {
        TransitionDifficulty::Moderate
    } else if difficulty_level <= 8 {
        TransitionDifficulty::Challenging
    } else {
        TransitionDifficulty::Difficult
    };

    let mut key_steps: Vec<&'static str> = Vec::new();
    if profile.authenticity_score < 50 {
        key_steps.push("Clarify values and ensure strong alignment before committing");
    }
    if profile.is_dominant(CoreValue::Security) {
        key_steps.push("Build 6-12 month emergency fund before transition");
    }
    if let Some(pathway) = vocation.pathways.first() {
        key_steps.extend(pathway.steps);
    }

    let stability = vocation.liberation_potential.income_stability;
    let risk_level = if stability >= 7 {
        TransitionRisk::Low
    } else if stability >= 5 {
        TransitionRisk::Medium
    } else {
        TransitionRisk::High
    };

    TransitionStrategy {
        difficulty,
        timeframe: vocation.reality_check.time_to_viability,
        key_steps,
        skill_gaps: vocation.skills_required.iter().take(3).copied().collect(),
        risk_level,
    }
}

fn matching_insights(profile: &ValueProfile, matches: &[VocationMatch]) -> MatchingInsights {
    let basic = value_insights(profile);

    // Most frequent category among the top five; first seen wins a tie.
    let mut counts: Vec<(&str, usize)> = Vec::new();
    for m in matches.iter().take(5) {
        match counts.iter_mut().find(|(c, _)| *c == m.vocation.category) {
            Some((_, n)) => *n += 1,
            None => counts.push((m.vocation.category, 1)),
        }
    }
    let dominant_category = counts
        .iter()
        .fold(None::<(&str, usize)>, |best, &(c, n)| match best {
            Some((_, best_n)) if best_n >= n => best,
            _ => Some((c, n)),
        })
        .map(|(c, _)| c);

    let average = if matches.is_empty() {
        0.0
    } else {
        matches.iter().map(|m| m.alignment_score).sum::<f64>() / matches.len() as f64
    };
    let alignment_band = AlignmentBand::for_average(average);

    let mut career_themes = basic.career_themes;
    if let Some(category) = dominant_category {
        career_themes.push(format!("Strong fit for {} sector", category.replacen('_', " ", 1)));
    }

    let mut strength_areas = basic.top_strengths;
    if matches
        .iter()
        .any(|m| m.vocation.liberation_potential.autonomy_level >= 8)
    {
        strength_areas.push("High autonomy potential in top matches".to_owned());
    }

    let mut caution_areas = basic.potential_challenges;
    if matches
        .iter()
        .any(|m| m.vocation.reality_check.difficulty_level >= 8)
    {
        caution_areas.push("Some top matches require significant skill development".to_owned());
    }

    let mut recommendations = basic.recommendations;
    if let Some(top) = matches.first() {
        recommendations.push(format!(
            "Consider exploring: {} ({:.0}% match)",
            top.vocation.title, top.alignment_score
        ));
        recommendations.push(
            if top.transition_strategy.difficulty == TransitionDifficulty::Easy {
                "You have accessible transition options - consider taking action soon"
            } else {
                "Top matches require preparation - start building relevant skills now"
            }
            .to_owned(),
        );
    }

    MatchingInsights {
        alignment_band,
        value_alignment: alignment_band.summary(),
        career_themes,
        strength_areas,
        caution_areas,
        recommendations,
    }
}

fn exploration_suggestions(
    profile: &ValueProfile,
    matches: &[VocationMatch],
) -> Vec<ExplorationSuggestion> {
    let mut out = Vec::new();

    if let Some(top) = matches.first() {
        out.push(ExplorationSuggestion {
            action: format!("Conduct informational interviews with {}s", top.vocation.title),
            purpose: "Validate assumptions and understand day-to-day reality",
            timeframe: "This month",
        });
        out.push(ExplorationSuggestion {
            action: format!("Start a small experiment in {}", top.vocation.category),
            purpose: "Test your interest and aptitude before full commitment",
            timeframe: "Next 3 months",
        });
        if let Some(gap) = top.transition_strategy.skill_gaps.first() {
            out.push(ExplorationSuggestion {
                action: format!("Begin learning: {gap}"),
                purpose: "Close critical skill gap for your top career match",
                timeframe: "Next 6 months",
            });
        }
    }

    if profile.authenticity_score < 60 {
        out.push(ExplorationSuggestion {
            action: "Complete a deeper values clarification exercise".to_owned(),
            purpose: "Improve self-understanding before making major career decisions",
            timeframe: "This month",
        });
    }
    if profile.is_dominant(CoreValue::Autonomy) {
        out.push(ExplorationSuggestion {
            action: "Join local entrepreneur or freelancer meetups".to_owned(),
            purpose: "Build network and learn from others on similar paths",
            timeframe: "Ongoing",
        });
    }

    out
}

#[cfg(test)]
mod tests {
    use super::{
        AlignmentBand, CoreValue, MatchPreferences, TransitionDifficulty, TransitionRisk,
        VALUE_QUESTIONS, VOCATIONS, ValueAssessmentInputs, ValueResponse, WorkArrangement,
        calculate_value_profile, match_vocations, transition_strategy, value_insights,
        vocation_match,
    };
    use crate::CalculatorError;

    /// Every question answered: `high` for the listed values, `low` for the rest.
    fn inputs(high_values: &[CoreValue], high: u8, low: u8) -> ValueAssessmentInputs {
        ValueAssessmentInputs {
            responses: VALUE_QUESTIONS
                .iter()
                .map(|q| ValueResponse {
                    question_id: q.id.to_owned(),
                    importance: if high_values.contains(&q.value) { high } else { low },
                })
                .collect(),
            ..ValueAssessmentInputs::default()
        }
    }

    const FREELANCER: [CoreValue; 5] = [
        CoreValue::Autonomy,
        CoreValue::Creativity,
        CoreValue::Challenge,
        CoreValue::Mastery,
        CoreValue::Growth,
    ];

    #[test]
    fn catalog_covers_every_value() {
        assert_eq!(VALUE_QUESTIONS.len(), 50);
        for value in CoreValue::ALL {
            assert!(VALUE_QUESTIONS.iter().any(|q| q.value == value), "{value}");
        }
        assert_eq!(VOCATIONS.len(), 11);
    }

    #[test]
    fn profile_ranks_values_and_keeps_catalog_order_on_ties() {
        let profile = calculate_value_profile(&inputs(&FREELANCER, 5, 2)).unwrap();

        assert_eq!(profile.core_values[0].rank, 1);
        assert!((profile.core_values[0].percentage - 100.0).abs() < 1e-9);
        // catalog order among the 100 % values
        assert_eq!(
            profile.dominant_values,
            vec![
                CoreValue::Autonomy,
                CoreValue::Creativity,
                CoreValue::Growth,
                CoreValue::Challenge,
                CoreValue::Mastery,
            ]
        );
        assert!((profile.core_values[5].percentage - 40.0).abs() < 1e-9);
        assert_eq!(profile.authenticity_score, 50);
        // autonomy: 5 * (1.2 + 1.0 + 1.1)
        assert!((profile.value_distribution[&CoreValue::Autonomy] - 16.5).abs() < 1e-9);
    }

    #[test]
    fn unanswered_values_score_zero() {
        let profile = calculate_value_profile(&ValueAssessmentInputs {
            responses: vec![ValueResponse {
                question_id: "family_1".to_owned(),
                importance: 3,
            }],
            current_role: Some("Analyst".to_owned()),
            industry: Some("Finance".to_owned()),
        })
        .unwrap();
        assert_eq!(profile.dominant_values[0], CoreValue::Family);
        assert!((profile.core_values[0].percentage - 60.0).abs() < 1e-9);
        assert_eq!(profile.core_values[1].percentage, 0.0);
        assert_eq!(profile.authenticity_score, 65);
    }

    #[test]
    fn conflicts_need_both_values_high() {
        let family_adventure = [
            CoreValue::Family,
            CoreValue::Adventure,
            CoreValue::Security,
            CoreValue::Balance,
            CoreValue::Challenge,
        ];
        let profile = calculate_value_profile(&inputs(&family_adventure, 5, 1)).unwrap();
        let tensions: Vec<u8> = profile
            .conflicting_values
            .iter()
            .map(|c| c.tension_level)
            .collect();
        // family/adventure 9, security/adventure 8, balance/challenge 7, family/challenge 7
        assert_eq!(tensions, vec![9, 8, 7, 7]);

        let insights = value_insights(&profile);
        assert!(
            insights
                .potential_challenges
                .iter()
                .any(|c| c.contains("between adventure and family"))
        );
        assert!(
            insights
                .potential_challenges
                .contains(&"Balancing ambition with work-life boundaries".to_owned())
        );
    }

    #[test]
    fn importance_outside_scale_is_rejected() {
        let err = calculate_value_profile(&ValueAssessmentInputs {
            responses: vec![ValueResponse {
                question_id: "autonomy_1".to_owned(),
                importance: 0,
            }],
            ..ValueAssessmentInputs::default()
        })
        .unwrap_err();
        assert!(matches!(err, CalculatorError::OutOfRange { value: 0, min: 1, max: 5, .. }));

        let err = calculate_value_profile(&ValueAssessmentInputs {
            responses: vec![ValueResponse {
                question_id: "wanderlust_1".to_owned(),
                importance: 4,
            }],
            ..ValueAssessmentInputs::default()
        })
        .unwrap_err();
        assert_eq!(err, CalculatorError::UnknownQuestion("wanderlust_1".to_owned()));
    }

    #[test]
    fn freelancer_profile_matches_freelance_development_first() {
        let profile = calculate_value_profile(&inputs(&FREELANCER, 5, 2)).unwrap();
        let result = match_vocations(&profile, &MatchPreferences::default());

        let top = &result.top_matches[0];
        assert_eq!(top.vocation.id, "software_developer_freelance");
        assert!(result.top_matches.len() >= 3);
        assert!(
            result
                .top_matches
                .windows(2)
                .all(|w| w[0].alignment_score >= w[1].alignment_score)
        );
        assert!(result.top_matches.iter().all(|m| m.alignment_score >= 40.0));
        assert_eq!(top.transition_strategy.skill_gaps.len(), 3);
        assert_eq!(top.recommended_arrangements[0].suitability_score, 90);
        assert!(
            result
                .insights
                .recommendations
                .iter()
                .any(|r| r.starts_with("Consider exploring: Freelance Software Developer ("))
        );
        assert_eq!(
            result.exploration_suggestions[0].action,
            "Conduct informational interviews with Freelance Software Developers"
        );
    }

    #[test]
    fn security_profile_gets_fund_first_step_and_conflicts() {
        let security = [
            CoreValue::Security,
            CoreValue::Family,
            CoreValue::Balance,
            CoreValue::Connection,
            CoreValue::Service,
        ];
        let mut profile = calculate_value_profile(&inputs(&security, 5, 1)).unwrap();
        let developer = &VOCATIONS[0];

        let strategy = transition_strategy(developer, &profile, 50.0);
        assert_eq!(strategy.key_steps[0], "Build 6-12 month emergency fund before transition");
        assert_eq!(strategy.key_steps.len(), 6);
        assert_eq!(strategy.risk_level, TransitionRisk::Medium);
        assert_eq!(strategy.difficulty, TransitionDifficulty::Challenging);

        profile.authenticity_score = 40;
        let strategy = transition_strategy(developer, &profile, 50.0);
        assert_eq!(
            strategy.key_steps[..2],
            [
                "Clarify values and ensure strong alignment before committing",
                "Build 6-12 month emergency fund before transition",
            ]
        );

        let matched = vocation_match(developer, &profile, &MatchPreferences::default());
        let conflicted: Vec<CoreValue> = matched.conflict_areas.iter().map(|c| c.value).collect();
        assert_eq!(conflicted, vec![CoreValue::Security, CoreValue::Connection]);
        assert_eq!(
            matched.conflict_areas[0].description,
            "Freelance Software Developer involves financial uncertainty and irregular income"
        );
        let freelancer = matched
            .recommended_arrangements
            .iter()
            .find(|a| a.arrangement == WorkArrangement::Freelancer)
            .unwrap();
        assert_eq!(freelancer.suitability_score, 55);
        assert_eq!(freelancer.reasoning, "Lower security than desired.");
    }

    #[test]
    fn preferences_discount_mismatched_vocations() {
        let profile = calculate_value_profile(&inputs(&FREELANCER, 5, 2)).unwrap();
        let open = match_vocations(&profile, &MatchPreferences::default());
        let picky = match_vocations(
            &profile,
            &MatchPreferences {
                preferred_arrangements: vec![WorkArrangement::CoFounder],
                prioritize_income: false,
                low_risk_tolerance: true,
            },
        );

        let score = |result: &super::VocationMatchingResult, id: &str| {
            result
                .top_matches
                .iter()
                .find(|m| m.vocation.id == id)
                .map(|m| m.alignment_score)
        };
        let before = score(&open, "software_developer_freelance").unwrap();
        let after = score(&picky, "software_developer_freelance").unwrap();
        assert!((after - before * 0.8).abs() < 1e-9);
        assert!(picky.top_matches.len() <= open.top_matches.len());
    }

    #[test]
    fn no_answers_give_limited_alignment() {
        let profile = calculate_value_profile(&ValueAssessmentInputs::default()).unwrap();
        let result = match_vocations(&profile, &MatchPreferences::default());

        assert!(result.top_matches.is_empty());
        assert_eq!(result.insights.alignment_band, AlignmentBand::Limited);
        let actions: Vec<&str> = result
            .exploration_suggestions
            .iter()
            .map(|s| s.action.as_str())
            .collect();
        assert_eq!(
            actions,
            vec![
                "Complete a deeper values clarification exercise",
                "Join local entrepreneur or freelancer meetups",
            ]
        );
    }

    #[test]
    fn parses_values_and_arrangements() {
        assert_eq!("Autonomy".parse::<CoreValue>().unwrap(), CoreValue::Autonomy);
        assert!("freedom".parse::<CoreValue>().is_err());
        assert_eq!(
            "part-time-multi".parse::<WorkArrangement>().unwrap(),
            WorkArrangement::PartTimeMulti
        );
    }
}
