use serde::Serialize;

use super::super::domain::{AchievementLevel, Category};

/// Accreditation groupings with a fixed target count of approved records.
#[derive(Debug, Clone, Copy, PartialEq, Eq, Hash, Serialize)]
#[serde(rename_all = "snake_case")]
pub enum ComplianceBucket {
    SocietyActivities,
    Hackathons,
    Certifications,
    Internships,
    ResearchPapers,
    Mentorship,
}

impl ComplianceBucket {
    pub const fn ordered() -> [ComplianceBucket; 6] {
        [
            ComplianceBucket::SocietyActivities,
            ComplianceBucket::Hackathons,
            ComplianceBucket::Certifications,
            ComplianceBucket::Internships,
            ComplianceBucket::ResearchPapers,
            ComplianceBucket::Mentorship,
        ]
    }

    pub const fn label(self) -> &'static str {
        match self {
            Self::SocietyActivities => "Professional Society / Workshop Activities",
            Self::Hackathons => "Hackathons & Competitive Events",
            Self::Certifications => "Industry Certifications",
            Self::Internships => "Internships",
            Self::ResearchPapers => "Research Papers / Conference Presentations",
            Self::Mentorship => "Mentorship / Research Group Activities",
        }
    }

    /// Categories counted towards the bucket. Conference feeds two buckets.
    pub const fn categories(self) -> &'static [Category] {
        match self {
            Self::SocietyActivities => &[Category::Workshop, Category::Conference],
            Self::Hackathons => &[Category::Hackathon, Category::Competition],
            Self::Certifications => &[Category::Certification],
            Self::Internships => &[Category::Internship],
            Self::ResearchPapers => &[Category::Conference],
            Self::Mentorship => &[Category::ResearchMentorship],
        }
    }

    pub const fn target(self) -> usize {
        match self {
            Self::SocietyActivities => 5,
            Self::Hackathons => 5,
            Self::Certifications => 3,
            Self::Internships => 4,
            Self::ResearchPapers => 2,
            Self::Mentorship => 2,
        }
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct BucketStatus {
    pub bucket: ComplianceBucket,
    pub label: &'static str,
    pub target: usize,
    pub actual: usize,
    pub compliant: bool,
}

/// International / National / everything else.
#[derive(Debug, Clone, Copy, Default, PartialEq, Eq, Serialize)]
pub struct LevelCounts {
    pub international: usize,
    pub national: usize,
    pub other: usize,
    pub total: usize,
}

impl LevelCounts {
    pub(crate) fn record(&mut self, level: AchievementLevel) {
        match level {
            AchievementLevel::International => self.international += 1,
            AchievementLevel::National => self.national += 1,
            AchievementLevel::State | AchievementLevel::Industry | AchievementLevel::Institutional => {
                self.other += 1
            }
        }
        self.total += 1;
    }
}

#[derive(Debug, Clone, PartialEq, Eq, Serialize)]
pub struct LevelBreakdownRow {
    pub category: Category,
    pub category_label: &'static str,
    #[serde(flatten)]
    pub counts: LevelCounts,
}
