use serde::{Deserialize, Serialize};
use std::fmt;
use std::str::FromStr;
use thiserror::Error;

/// Forum category. The set is closed; anything else is rejected at write time.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize, Deserialize)]
pub enum Category {
    #[serde(rename = "Academic Stress")]
    AcademicStress,
    #[serde(rename = "Anxiety")]
    Anxiety,
    #[serde(rename = "Depression")]
    Depression,
    #[serde(rename = "Sleep Issues")]
    SleepIssues,
    #[serde(rename = "Social Life")]
    SocialLife,
    #[serde(rename = "Relationship")]
    Relationship,
    #[serde(rename = "Self Care")]
    SelfCare,
    #[serde(rename = "Study Tips")]
    StudyTips,
    #[serde(rename = "General Support")]
    GeneralSupport,
}

#[derive(Debug, Clone, PartialEq, Eq, Error)]
#[error("unknown category: {0}")]
pub struct UnknownCategory(pub String);

impl Category {
    /// Every category in display order
    pub const ALL: [Category; 9] = [
        Category::AcademicStress,
        Category::Anxiety,
        Category::Depression,
        Category::SleepIssues,
        Category::SocialLife,
        Category::Relationship,
        Category::SelfCare,
        Category::StudyTips,
        Category::GeneralSupport,
    ];

    pub fn as_str(&self) -> &'static str {
        match self {
            Category::AcademicStress => "Academic Stress",
            Category::Anxiety => "Anxiety",
            Category::Depression => "Depression",
            Category::SleepIssues => "Sleep Issues",
            Category::SocialLife => "Social Life",
            Category::Relationship => "Relationship",
            Category::SelfCare => "Self Care",
            Category::StudyTips => "Study Tips",
            Category::GeneralSupport => "General Support",
        }
    }
}

impl fmt::Display for Category {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(self.as_str())
    }
}

impl FromStr for Category {
    type Err = UnknownCategory;

    fn from_str(s: &str) -> Result<Self, Self::Err> {
        Category::ALL
            .iter()
            .copied()
            .find(|category| category.as_str() == s)
            .ok_or_else(|| UnknownCategory(s.to_string()))
    }
}

// Used by sqlx when decoding the TEXT column
impl TryFrom<String> for Category {
    type Error = UnknownCategory;

    fn try_from(value: String) -> Result<Self, Self::Error> {
        value.parse()
    }
}
