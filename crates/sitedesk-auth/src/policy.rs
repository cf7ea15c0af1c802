//! Access policy for the admin panel.
//!
//! The same rule is evaluated twice in the system: at login time against a
//! freshly fetched identity profile, and on every protected request against
//! the session token's embedded claims. Both call sites go through
//! [`is_authorized`] so the two checks cannot drift apart.

/// Decides whether an identity may access protected endpoints.
///
/// Grants access when the role is exactly `admin`, or when a site identifier
/// is configured for this deployment and the identity's site list contains it.
/// Without a configured site, non-admin identities are always denied.
#[must_use]
pub fn is_authorized(role: Option<&str>, sites: &[String], configured_site_id: Option<&str>) -> bool {
    if role == Some("admin") {
        return true;
    }

    match configured_site_id {
        Some(site_id) if !site_id.is_empty() => sites.iter().any(|s| s == site_id),
        _ => false,
    }
}

#[cfg(test)]
mod tests {
    use super::*;

    fn sites(names: &[&str]) -> Vec<String> {
        names.iter().map(ToString::to_string).collect()
    }

    #[test]
    fn test_authorization_table() {
        // (role, sites, configured site, expected)
        let cases: &[(Option<&str>, &[&str], Option<&str>, bool)] = &[
            // Admin role always wins, regardless of sites or configuration.
            (Some("admin"), &[], None, true),
            (Some("admin"), &[], Some("site-a"), true),
            (Some("admin"), &["site-b"], Some("site-a"), true),
            // Role matching is case-sensitive and exact.
            (Some("Admin"), &[], Some("site-a"), false),
            (Some("administrator"), &[], Some("site-a"), false),
            // Non-admin with a configured site: membership decides.
            (Some("viewer"), &["site-a"], Some("site-a"), true),
            (Some("viewer"), &["site-b"], Some("site-a"), false),
            (Some("viewer"), &["site-b", "site-a"], Some("site-a"), true),
            (None, &["site-a"], Some("site-a"), true),
            (None, &["site-b"], Some("site-a"), false),
            // No configured site: non-admins are always denied.
            (Some("viewer"), &["site-a"], None, false),
            (Some("viewer"), &["site-a"], Some(""), false),
            (None, &[], None, false),
            (None, &[], Some("site-a"), false),
        ];

        for (role, site_list, configured, expected) in cases {
            assert_eq!(
                is_authorized(*role, &sites(site_list), *configured),
                *expected,
                "role={role:?} sites={site_list:?} configured={configured:?}"
            );
        }
    }
}
