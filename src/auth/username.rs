/**
 * Unique Username Derivation
 *
 * Usernames are derived, not chosen: a deterministic slug of the display
 * name (falling back to the email local part, then "user"), with a random
 * hex suffix appended on collision. The unique index on `users.username`
 * remains the final authority; this module only produces good candidates.
 *
 * The derivation contract is deliberately small so a deployment can swap
 * in its own provider without touching registration.
 */

use sqlx::PgPool;
use uuid::Uuid;

use crate::auth::users::get_user_by_username;

const MAX_SUFFIX_ATTEMPTS: usize = 5;

/// Lowercase a source string into username-safe characters
///
/// Keeps ASCII alphanumerics, folds runs of anything else into single
/// underscores, and trims leading/trailing underscores.
pub fn slugify(source: &str) -> String {
    let mut slug = String::with_capacity(source.len());
    let mut last_was_sep = true;
    for c in source.chars() {
        if c.is_ascii_alphanumeric() {
            slug.push(c.to_ascii_lowercase());
            last_was_sep = false;
        } else if !last_was_sep {
            slug.push('_');
            last_was_sep = true;
        }
    }
    while slug.ends_with('_') {
        slug.pop();
    }
    slug
}

/// Deterministic base candidate from display name and email
pub fn candidate_base(name: &str, email: &str) -> String {
    let from_name = slugify(name);
    if !from_name.is_empty() {
        return from_name;
    }
    let local_part = email.split('@').next().unwrap_or("");
    let from_email = slugify(local_part);
    if !from_email.is_empty() {
        return from_email;
    }
    "user".to_string()
}

/// Short random suffix for collision avoidance
fn random_suffix() -> String {
    Uuid::new_v4().simple().to_string()[..4].to_string()
}

/// Derive a username that is not yet taken
///
/// Tries the deterministic base first, then suffixed candidates, and
/// finally falls back to a UUID-derived name that cannot realistically
/// collide.
pub async fn generate_unique_username(
    pool: &PgPool,
    name: &str,
    email: &str,
) -> Result<String, sqlx::Error> {
    let base = candidate_base(name, email);

    if get_user_by_username(pool, &base).await?.is_none() {
        return Ok(base);
    }

    for _ in 0..MAX_SUFFIX_ATTEMPTS {
        let candidate = format!("{}_{}", base, random_suffix());
        if get_user_by_username(pool, &candidate).await?.is_none() {
            return Ok(candidate);
        }
    }

    Ok(format!("user_{}", Uuid::new_v4().simple()))
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_slugify_display_name() {
        assert_eq!(slugify("Jane Doe"), "jane_doe");
        assert_eq!(slugify("  Jane   Doe  "), "jane_doe");
        assert_eq!(slugify("JANE"), "jane");
    }

    #[test]
    fn test_slugify_drops_symbols() {
        assert_eq!(slugify("j@ne+d0e!"), "j_ne_d0e");
        assert_eq!(slugify("---"), "");
    }

    #[test]
    fn test_base_prefers_name_over_email() {
        assert_eq!(candidate_base("Jane Doe", "jd@x.com"), "jane_doe");
    }

    #[test]
    fn test_base_falls_back_to_email_local_part() {
        assert_eq!(candidate_base("", "jane.doe@x.com"), "jane_doe");
        assert_eq!(candidate_base("!!!", "jd@x.com"), "jd");
    }

    #[test]
    fn test_base_final_fallback() {
        assert_eq!(candidate_base("", "@x.com"), "user");
        assert_eq!(candidate_base("", ""), "user");
    }

    #[test]
    fn test_random_suffix_shape() {
        let s = random_suffix();
        assert_eq!(s.len(), 4);
        assert!(s.chars().all(|c| c.is_ascii_hexdigit()));
    }
}
