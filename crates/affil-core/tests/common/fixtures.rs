//! Saved E-utilities responses under `test_fixtures/`

use std::path::PathBuf;

pub fn fixture_path(source: &str, name: &str) -> PathBuf {
    [env!("CARGO_MANIFEST_DIR"), "test_fixtures", source, name]
        .iter()
        .collect()
}

/// Load a PubMed efetch/esearch response fixture
pub fn load_pubmed_fixture(name: &str) -> String {
    let path = fixture_path("pubmed", name);
    std::fs::read_to_string(&path)
        .unwrap_or_else(|e| panic!("Failed to load fixture {}: {}", path.display(), e))
}
