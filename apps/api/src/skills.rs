//! Skill comparison shared by scoring and candidate filtering.
//!
//! Two skills are the same when they are equal after trimming and lowercasing.
//! No substring matching: "Java" does not match "JavaScript".

/// Canonical comparison key for a skill.
///
/// The Postgres store applies `lower(btrim(..))` to stored skills instead.
/// The two agree on ASCII; for other scripts `lower` follows the database
/// collation (a `C`-locale database only folds ASCII), so non-ASCII skill
/// filters may miss on Postgres while matching in memory.
pub fn skill_key(skill: &str) -> String {
    skill.trim().to_lowercase()
}

/// True if `have` contains a skill equal to `wanted`.
pub fn has_skill<S: AsRef<str>>(have: &[S], wanted: &str) -> bool {
    let wanted = skill_key(wanted);
    have.iter().any(|s| skill_key(s.as_ref()) == wanted)
}
