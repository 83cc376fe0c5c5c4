use std::path::{Path, PathBuf};

/// Captured-output artifact for a fixture: sibling file with a `got`
/// extension (`calls.go` → `calls.got`)
pub fn got_path(fixture: impl AsRef<Path>) -> PathBuf {
    fixture.as_ref().with_extension("got")
}

/// Checked-in expectation for a fixture: sibling file with a `golden`
/// extension (`calls.go` → `calls.golden`)
pub fn golden_path(fixture: impl AsRef<Path>) -> PathBuf {
    fixture.as_ref().with_extension("golden")
}

#[cfg(test)]
mod tests {
    use super::*;
    use pretty_assertions::assert_eq;

    #[test]
    fn artifacts_are_siblings_of_the_fixture() {
        assert_eq!(
            got_path("testdata/src/main/calls.go"),
            PathBuf::from("testdata/src/main/calls.got")
        );
        assert_eq!(
            golden_path("testdata/src/main/calls.go"),
            PathBuf::from("testdata/src/main/calls.golden")
        );
        assert_eq!(got_path("fixtures/peers.rs"), PathBuf::from("fixtures/peers.got"));
        assert_eq!(
            golden_path("fixtures/describe-json.rs"),
            PathBuf::from("fixtures/describe-json.golden")
        );
    }
}
