/// Read the named credential from the environment.
///
/// Never fails: an unset variable, an empty value or a value that is not
/// valid unicode all count as "no credential".
pub fn try_get_credential(name: &str) -> Option<String> {
    if name.is_empty() || name.contains('=') || name.contains('\0') {
        return None;
    }
    std::env::var_os(name)
        .and_then(|v| v.into_string().ok())
        .map(|v| v.trim().to_string())
        .filter(|v| !v.is_empty())
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn unset_variable_is_absent() {
        assert_eq!(try_get_credential("QUANTUM_NEXUS_TEST_SURELY_UNSET_KEY"), None);
    }

    #[test]
    fn invalid_names_are_absent() {
        assert_eq!(try_get_credential(""), None);
        assert_eq!(try_get_credential("A=B"), None);
        assert_eq!(try_get_credential("A\0B"), None);
    }

    #[test]
    fn present_variable_is_returned() {
        // PATH is set in any test environment we run in.
        assert!(try_get_credential("PATH").is_some());
    }
}
