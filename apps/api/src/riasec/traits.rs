use serde::{Deserialize, Serialize};

/// The six Holland interest types, in canonical R-I-A-S-E-C order.
#[derive(Debug, Clone, Copy, PartialEq, Eq, PartialOrd, Ord, Hash, Serialize, Deserialize)]
pub enum RiasecTrait {
    #[serde(rename = "R")]
    Realistic,
    #[serde(rename = "I")]
    Investigative,
    #[serde(rename = "A")]
    Artistic,
    #[serde(rename = "S")]
    Social,
    #[serde(rename = "E")]
    Enterprising,
    #[serde(rename = "C")]
    Conventional,
}

impl RiasecTrait {
    pub const ALL: [RiasecTrait; 6] = [
        RiasecTrait::Realistic,
        RiasecTrait::Investigative,
        RiasecTrait::Artistic,
        RiasecTrait::Social,
        RiasecTrait::Enterprising,
        RiasecTrait::Conventional,
    ];

    pub fn code(self) -> &'static str {
        match self {
            RiasecTrait::Realistic => "R",
            RiasecTrait::Investigative => "I",
            RiasecTrait::Artistic => "A",
            RiasecTrait::Social => "S",
            RiasecTrait::Enterprising => "E",
            RiasecTrait::Conventional => "C",
        }
    }

    pub fn from_code(code: &str) -> Option<Self> {
        Self::ALL
            .into_iter()
            .find(|t| t.code().eq_ignore_ascii_case(code.trim()))
    }

    pub fn name(self) -> &'static str {
        self.description().name
    }

    pub fn description(self) -> &'static TraitDescription {
        match self {
            RiasecTrait::Realistic => &REALISTIC,
            RiasecTrait::Investigative => &INVESTIGATIVE,
            RiasecTrait::Artistic => &ARTISTIC,
            RiasecTrait::Social => &SOCIAL,
            RiasecTrait::Enterprising => &ENTERPRISING,
            RiasecTrait::Conventional => &CONVENTIONAL,
        }
    }
}

#[derive(Debug, Clone, Serialize)]
pub struct TraitDescription {
    pub name: &'static str,
    pub description: &'static str,
    pub skills: &'static [&'static str],
    pub work_env: &'static str,
    pub common_careers: &'static [&'static str],
}

/// Full trait name for a code, "Unknown" otherwise.
pub fn trait_name(code: &str) -> &'static str {
    RiasecTrait::from_code(code).map_or("Unknown", RiasecTrait::name)
}

/// Reference card for a code; unknown codes get an empty card.
pub fn trait_description(code: &str) -> &'static TraitDescription {
    RiasecTrait::from_code(code).map_or(&UNKNOWN, RiasecTrait::description)
}

static REALISTIC: TraitDescription = TraitDescription {
    name: "Realistic",
    description: "Practical, physical, hands-on, tool-oriented people who enjoy working with machines, tools, plants and animals.",
    skills: &["Manual dexterity", "Technical skills", "Mechanical ability", "Physical coordination"],
    work_env: "Outdoor, hands-on, practical work environments",
    common_careers: &["Engineer", "Mechanic", "Farmer", "Police Officer", "Military"],
};

static INVESTIGATIVE: TraitDescription = TraitDescription {
    name: "Investigative",
    description: "Analytical, intellectual, scientific, explorative people who enjoy observation, investigation and problem-solving.",
    skills: &["Analytical thinking", "Research skills", "Scientific reasoning", "Problem-solving"],
    work_env: "Research labs, academic settings, scientific environments",
    common_careers: &["Scientist", "Researcher", "Doctor", "Programmer", "Mathematician"],
};

static ARTISTIC: TraitDescription = TraitDescription {
    name: "Artistic",
    description: "Creative, original, intuitive, expressive people who enjoy creative activities like art, drama, crafts, dance, music, or creative writing.",
    skills: &["Creativity", "Imagination", "Artistic ability", "Originality"],
    work_env: "Unstructured environments allowing creative expression",
    common_careers: &["Artist", "Designer", "Writer", "Musician", "Actor"],
};

static SOCIAL: TraitDescription = TraitDescription {
    name: "Social",
    description: "Cooperative, supportive, helpful, empathetic people who enjoy working with people to educate, help, or serve them.",
    skills: &["Communication", "Empathy", "Teaching ability", "Interpersonal skills"],
    work_env: "Team-oriented, community-focused, helping environments",
    common_careers: &["Teacher", "Counselor", "Nurse", "Social Worker", "Psychologist"],
};

static ENTERPRISING: TraitDescription = TraitDescription {
    name: "Enterprising",
    description: "Persuasive, energetic, ambitious, risk-taking people who enjoy leadership roles, business activities, and influencing others.",
    skills: &["Leadership", "Persuasion", "Negotiation", "Strategic planning"],
    work_env: "Competitive, fast-paced, business-oriented environments",
    common_careers: &["Entrepreneur", "Manager", "Lawyer", "Sales Executive", "Politician"],
};

static CONVENTIONAL: TraitDescription = TraitDescription {
    name: "Conventional",
    description: "Detail-oriented, organized, structured people who enjoy working with data, numbers, and systematic approaches to tasks.",
    skills: &["Organization", "Attention to detail", "Numerical ability", "Reliability"],
    work_env: "Structured, orderly, systematic work environments",
    common_careers: &["Accountant", "Banker", "Administrator", "Data Analyst", "Office Manager"],
};

static UNKNOWN: TraitDescription = TraitDescription {
    name: "Unknown",
    description: "No description available",
    skills: &[],
    work_env: "Unknown",
    common_careers: &[],
};
