//! GraphQL query examples
//!
//! Queries executed by the end-to-end tests are saved as `.graphql` files and
//! published as API documentation. Identifiers generated by the server are
//! replaced with a constant so the files only change when the queries do.
use anyhow::Context;
use regex::Regex;
use std::fs;
use std::path::{Path, PathBuf};

use crate::config::Config;

/// Matches identifiers generated by Director
pub const UUID_PATTERN: &str =
    "(?i)[a-f0-9]{8}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{4}-[a-f0-9]{12}";
pub const PLACEHOLDER_UUID: &str = "aaaaaaaa-aaaa-aaaa-aaaa-aaaaaaaaaaaa";
pub const GENERATED_HEADER: &str =
    "# Code generated by Director end-to-end tests, DO NOT EDIT.\n";
/// Location of the examples relative to the module root
pub const EXAMPLES_SUBPATH: &str = "src/director/examples";

/// "Create Application" => "create-application"
pub fn sanitize_example_name(name: &str) -> String {
    name.replace(' ', "-").to_lowercase()
}

/// Replace every UUID in the query with [`PLACEHOLDER_UUID`]
pub fn sanitize_query(query: &str) -> Result<String, regex::Error> {
    let r = Regex::new(UUID_PATTERN)?;
    Ok(r.replace_all(query, PLACEHOLDER_UUID).into_owned())
}

/// Writes query examples into a single directory
#[derive(Clone, Debug)]
pub struct ExampleWriter {
    dir: PathBuf,
}

impl ExampleWriter {
    /// Writer for `<module_root>/src/director/examples`
    pub fn new(module_root: impl AsRef<Path>) -> Self {
        Self {
            dir: module_root.as_ref().join(EXAMPLES_SUBPATH),
        }
    }

    pub fn from_config(config: &Config) -> Self {
        Self::new(&config.examples_root)
    }

    pub fn dir(&self) -> &Path {
        &self.dir
    }

    /// Path of the example file for the name
    pub fn path_for(&self, example_name: &str) -> PathBuf {
        self.dir
            .join(format!("{}.graphql", sanitize_example_name(example_name)))
    }

    /// Save sanitized query, replacing an existing example of the same name
    pub fn save(&self, query: &str, example_name: &str) -> anyhow::Result<PathBuf> {
        let query = sanitize_query(query).context("Can not compile UUID pattern")?;
        let content = format!("{}{}", GENERATED_HEADER, query);

        fs::create_dir_all(&self.dir)
            .with_context(|| format!("Can not create examples directory {:?}", self.dir))?;

        let path = self.path_for(example_name);
        if let Err(e) = write_example(&path, &content) {
            // no partial output
            let _ = fs::remove_file(&path);
            return Err(e);
        }

        tracing::info!("Saved example {:?}", path);
        Ok(path)
    }
}

// rw-rw----, independent of umask and of the previous file mode
#[cfg(unix)]
fn write_example(path: &Path, content: &str) -> anyhow::Result<()> {
    use std::io::Write;
    use std::os::unix::fs::{OpenOptionsExt, PermissionsExt};

    let mut file = fs::OpenOptions::new()
        .write(true)
        .create(true)
        .truncate(true)
        .mode(0o660)
        .open(path)
        .with_context(|| format!("Can not write example {:?}", path))?;
    file.write_all(content.as_bytes())
        .with_context(|| format!("Can not write example {:?}", path))?;
    fs::set_permissions(path, fs::Permissions::from_mode(0o660))
        .with_context(|| format!("Can not set permissions of {:?}", path))
}

#[cfg(not(unix))]
fn write_example(path: &Path, content: &str) -> anyhow::Result<()> {
    fs::write(path, content).with_context(|| format!("Can not write example {:?}", path))
}
