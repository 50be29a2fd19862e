//! Active profiles and profile-specific configuration file names.

/// Environment variable holding the comma-separated active profiles.
pub const PROFILES_ENV_VAR: &str = "SLUICE_PROFILES_ACTIVE";

/// Split a comma-separated profile list, trimming entries and dropping empties.
pub fn parse_profiles(value: &str) -> Vec<String> {
    value
        .split(',')
        .map(str::trim)
        .filter(|s| !s.is_empty())
        .map(String::from)
        .collect()
}

/// Return the base name followed by one derived name per active profile.
///
/// The profile is inserted as a `<profile>-` prefix of the last path segment,
/// so `conf/sluice.yml` with profiles `dev,ci` yields
/// `conf/sluice.yml`, `conf/dev-sluice.yml`, `conf/ci-sluice.yml`.
/// A `scheme:` prefix (`file:sluice.yml`) counts as a segment separator when no
/// `/` is present.
pub fn derived_names(base_name: &str, profiles: &[String]) -> Vec<String> {
    let mut names = Vec::with_capacity(profiles.len() + 1);
    names.push(base_name.to_string());

    let normalized = base_name.replace('\\', "/");
    let split_at = normalized.rfind('/').or_else(|| normalized.rfind(':'));

    for profile in profiles {
        let name = match split_at {
            Some(pos) => format!(
                "{}{}-{}",
                &normalized[..=pos],
                profile,
                &normalized[pos + 1..]
            ),
            None => format!("{}-{}", profile, normalized),
        };
        names.push(name);
    }
    names
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_profiles() {
        assert_eq!(parse_profiles(" dev, ,ci,"), vec!["dev", "ci"]);
        assert!(parse_profiles("").is_empty());
    }

    #[test]
    fn test_derived_names_without_profiles() {
        assert_eq!(derived_names("sluice.yml", &[]), vec!["sluice.yml"]);
    }

    #[test]
    fn test_derived_names_plain_file() {
        let profiles = parse_profiles("dev,foo");
        assert_eq!(
            derived_names("sluice.yml", &profiles),
            vec!["sluice.yml", "dev-sluice.yml", "foo-sluice.yml"]
        );
    }

    #[test]
    fn test_derived_names_nested_path() {
        let profiles = parse_profiles("dev");
        assert_eq!(
            derived_names("conf\\app\\sluice.yml", &profiles),
            vec!["conf\\app\\sluice.yml", "conf/app/dev-sluice.yml"]
        );
    }

    #[test]
    fn test_derived_names_scheme_prefix() {
        let profiles = parse_profiles("prod");
        assert_eq!(
            derived_names("file:sluice.yml", &profiles)[1],
            "file:prod-sluice.yml"
        );
    }
}
