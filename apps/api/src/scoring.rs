use crate::extraction::ExtractedFields;

pub const MAX_SCORE: u32 = 100;

const SKILL_WEIGHT: u32 = 2;
const EDUCATION_WEIGHT: u32 = 2;
const EXPERIENCE_WEIGHT: u32 = 3;

/// Resume score: `2*skills + 2*education + 3*experience`, capped at 100.
///
/// Education is the number of degree entries; experience is the number of
/// experience lines. Absent fields count as zero.
pub fn compute_resume_score(fields: &ExtractedFields) -> u32 {
    let weighted = weighted_count(fields.skills.len(), SKILL_WEIGHT)
        .saturating_add(weighted_count(fields.degree.len(), EDUCATION_WEIGHT))
        .saturating_add(weighted_count(fields.experience.len(), EXPERIENCE_WEIGHT));
    weighted.min(MAX_SCORE)
}

fn weighted_count(count: usize, weight: u32) -> u32 {
    u32::try_from(count).unwrap_or(u32::MAX).saturating_mul(weight)
}
