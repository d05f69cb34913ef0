//! Benchmark identity recovered from main classes and file suffixes.
//!
//! Java Grande runs name the benchmark in their main class
//! (`JGFMolDynBenchSizeB`); DaCapo runs share the `Harness` main class and
//! carry the benchmark in the `profileExt` option (`-xalan-prof-4.py`).
//! Thread counts are encoded the same way (`-8-threads-prof-0.py`).

use super::Profile;
use crate::utils::config::{HARNESS_MAIN_CLASS, JGF_PREFIX, JGF_SUFFIX_LEN};
use crate::utils::error::AccessError;

const PROFILE_EXT: &str = "profileExt";

/// Strip `JGF` and the trailing `BenchSizeX` from a Java Grande class name
///
/// Names without the `JGF` prefix come back unchanged.
pub fn jgf_name(main_class: &str) -> String {
    let Some(rest) = main_class.strip_prefix(JGF_PREFIX) else {
        return main_class.to_string();
    };
    let chars: Vec<char> = rest.chars().collect();
    let keep = chars.len().saturating_sub(JGF_SUFFIX_LEN);
    chars[..keep].iter().collect()
}

pub fn is_jgf(profile: &Profile) -> bool {
    profile.main_class().starts_with(JGF_PREFIX)
}

/// Second hyphen-separated field of `profileExt`
fn profile_ext_field(profile: &Profile) -> Result<&str, AccessError> {
    let ext = profile.options().get_str(PROFILE_EXT)?;
    ext.split('-').nth(1).ok_or_else(|| AccessError::Malformed {
        key: PROFILE_EXT.to_string(),
        message: format!("no benchmark field in '{}'", ext),
    })
}

/// DaCapo benchmark name from `profileExt`
pub fn harness_name(profile: &Profile) -> Result<String, AccessError> {
    profile_ext_field(profile).map(str::to_string)
}

/// Benchmark name for any profile
///
/// `jgf_name` for Java Grande runs, `harness_name` for DaCapo, the main
/// class otherwise.
pub fn bench_name(profile: &Profile) -> Result<String, AccessError> {
    if is_jgf(profile) {
        Ok(jgf_name(profile.main_class()))
    } else if profile.main_class() == HARNESS_MAIN_CLASS {
        harness_name(profile)
    } else {
        Ok(profile.main_class().to_string())
    }
}

/// Thread count encoded in `profileExt`
pub fn thread_count(profile: &Profile) -> Result<u32, AccessError> {
    let field = profile_ext_field(profile)?;
    field.parse::<u32>().map_err(|e| AccessError::Malformed {
        key: PROFILE_EXT.to_string(),
        message: format!("thread count '{}': {}", field, e),
    })
}

/// Whether `profileExt` starts with `-<threads>-threads`
///
/// Profiles without a `profileExt` never match.
pub fn runs_with_threads(profile: &Profile, threads: u32) -> bool {
    let prefix = format!("-{}-threads", threads);
    profile
        .option(PROFILE_EXT)
        .is_some_and(|ext| ext.starts_with(&prefix))
}

/// First character upper-case, the rest lower-case
pub fn capitalize(name: &str) -> String {
    let mut chars = name.chars();
    match chars.next() {
        Some(first) => first
            .to_uppercase()
            .chain(chars.flat_map(char::to_lowercase))
            .collect(),
        None => String::new(),
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::parser::parse_record;

    fn profile(name: &str, options: &str) -> Profile {
        let text = format!(r#"{{"options" : {}}}"#, options);
        Profile::from_record(parse_record(&text).unwrap(), name, name).unwrap()
    }

    #[test]
    fn test_jgf_name() {
        assert_eq!(jgf_name("JGFSeriesBenchSizeC"), "Series");
        assert_eq!(jgf_name("JGFMolDynBenchSizeB"), "MolDyn");
        assert_eq!(jgf_name("Harness"), "Harness");
        assert_eq!(jgf_name("JGFShort"), "");
    }

    #[test]
    fn test_bench_name() {
        let jgf = profile("JGFLUFactBenchSizeC-4-threads-prof-0.py", "{}");
        assert!(is_jgf(&jgf));
        assert_eq!(bench_name(&jgf).unwrap(), "LUFact");

        let dacapo = profile(
            "xalan-prof-4.py",
            r#"{"mainClass" : "Harness", "profileExt" : "-xalan-prof-4.py"}"#,
        );
        assert!(!is_jgf(&dacapo));
        assert_eq!(bench_name(&dacapo).unwrap(), "xalan");

        let other = profile("Custom-1.py", "{}");
        assert_eq!(bench_name(&other).unwrap(), "Custom");
    }

    #[test]
    fn test_thread_count() {
        let p = profile(
            "JGFSeriesBenchSizeC-8-threads-prof-0.py",
            r#"{"profileExt" : "-8-threads-prof-0.py"}"#,
        );
        assert_eq!(thread_count(&p).unwrap(), 8);

        let dacapo = profile("x.py", r#"{"profileExt" : "-xalan-prof-4.py"}"#);
        assert!(matches!(
            thread_count(&dacapo),
            Err(AccessError::Malformed { .. })
        ));

        let missing = profile("x.py", "{}");
        assert_eq!(
            thread_count(&missing),
            Err(AccessError::MissingKey("profileExt".to_string()))
        );
    }

    #[test]
    fn test_runs_with_threads() {
        let eight = profile("x.py", r#"{"profileExt" : "-8-threads-prof-0.py"}"#);
        assert!(runs_with_threads(&eight, 8));
        assert!(!runs_with_threads(&eight, 4));

        let eighty = profile("x.py", r#"{"profileExt" : "-80-threads-prof-0.py"}"#);
        assert!(!runs_with_threads(&eighty, 8));
        assert!(!runs_with_threads(&profile("x.py", "{}"), 8));
    }

    #[test]
    fn test_capitalize() {
        assert_eq!(capitalize("xalan"), "Xalan");
        assert_eq!(capitalize("MolDyn"), "Moldyn");
        assert_eq!(capitalize("SOR"), "Sor");
        assert_eq!(capitalize(""), "");
    }
}
