//! List view over the flat, comma-separated `skills` string.
//!
//! Parse: split on `,`, trim, drop empty tokens. Join: `", "`. The pair is idempotent after
//! one cycle but not the identity on arbitrary input (repeated commas and padding collapse).

/// Splits a raw skills string into its ordered, non-empty tokens.
pub fn parse_skills(raw: &str) -> Vec<String> {
    raw.split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(str::to_string)
        .collect()
}

pub fn join_skills<S: AsRef<str>>(skills: &[S]) -> String {
    skills
        .iter()
        .map(|s| s.as_ref())
        .collect::<Vec<_>>()
        .join(", ")
}

/// Appends `skill` (trimmed). Blank input leaves `raw` untouched.
pub fn add_skill(raw: &str, skill: &str) -> String {
    let skill = skill.trim();
    if skill.is_empty() {
        return raw.to_string();
    }
    let mut list = parse_skills(raw);
    list.push(skill.to_string());
    join_skills(&list)
}

/// Replaces the token at `index`. Out-of-range indices leave `raw` untouched.
///
/// A blank replacement is written as-is and disappears on the next parse.
pub fn update_skill(raw: &str, index: usize, value: &str) -> String {
    let mut list = parse_skills(raw);
    match list.get_mut(index) {
        Some(slot) => {
            *slot = value.trim().to_string();
            join_skills(&list)
        }
        None => raw.to_string(),
    }
}

/// Drops the token at `index`. Out-of-range indices leave `raw` untouched.
pub fn remove_skill(raw: &str, index: usize) -> String {
    let mut list = parse_skills(raw);
    if index >= list.len() {
        return raw.to_string();
    }
    list.remove(index);
    join_skills(&list)
}
