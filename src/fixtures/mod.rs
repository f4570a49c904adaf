//! Fixture utilities for the deterministic CLI harness.
//!
//! This module discovers recorded frame captures, loads them, parses
//! optional expectation JSON, and compares recognized words against it.
//! It backs `gloss_cli` and the integration tests.

use std::fs;
use std::path::{Path, PathBuf};

use anyhow::{anyhow, Context, Result};
use serde::{Deserialize, Serialize};

use crate::landmarks::Frame;

/// Default location for fixture JSON assets.
pub const DEFAULT_FIXTURE_ROOT: &str = concat!(env!("CARGO_MANIFEST_DIR"), "/fixtures");

const FRAMES_SUFFIX: &str = ".frames.json";
const EXPECT_SUFFIX: &str = ".expect.json";

/// Metadata describing an available fixture.
#[derive(Clone, Debug, Serialize)]
pub struct FixtureMetadata {
    pub name: String,
    pub frames_path: PathBuf,
    pub expect_path: Option<PathBuf>,
}

/// Loaded fixture data with decoded frames.
pub struct FixtureData {
    pub metadata: FixtureMetadata,
    pub frames: Vec<Frame>,
    pub expectations: Option<FixtureExpectations>,
}

/// On-disk frame capture: either a bare frame array or a translate request body.
#[derive(Deserialize)]
#[serde(untagged)]
enum FrameFile {
    Bare(Vec<Frame>),
    Request { frames: Vec<Frame> },
}

impl From<FrameFile> for Vec<Frame> {
    fn from(file: FrameFile) -> Self {
        match file {
            FrameFile::Bare(frames) | FrameFile::Request { frames } => frames,
        }
    }
}

/// JSON expectation schema for fixture verification.
#[derive(Debug, Clone, Deserialize)]
pub struct FixtureExpectations {
    pub fixture: String,
    #[serde(default)]
    pub notes: Option<String>,
    pub words: Vec<String>,
}

impl FixtureExpectations {
    /// Compare recognized words position by position
    pub fn verify(&self, actual: &[String]) -> std::result::Result<(), ExpectationDiff> {
        let len = self.words.len().max(actual.len());
        let failures: Vec<ExpectationFailure> = (0..len)
            .filter_map(|index| {
                let expected = self.words.get(index);
                let got = actual.get(index);
                (expected != got).then(|| ExpectationFailure {
                    index,
                    expected: expected.cloned(),
                    actual: got.cloned(),
                })
            })
            .collect();

        if failures.is_empty() {
            Ok(())
        } else {
            Err(ExpectationDiff {
                expected: self.words.clone(),
                actual: actual.to_vec(),
                failures,
            })
        }
    }
}

/// Outcome of comparing actual words with expectations.
#[derive(Debug)]
pub struct ExpectationDiff {
    pub expected: Vec<String>,
    pub actual: Vec<String>,
    pub failures: Vec<ExpectationFailure>,
}

impl ExpectationDiff {
    pub fn to_json(&self) -> serde_json::Value {
        serde_json::json!({
            "expected": self.expected,
            "actual": self.actual,
            "failures": self.failures.iter().map(|failure| {
                serde_json::json!({
                    "index": failure.index,
                    "expected": failure.expected,
                    "actual": failure.actual,
                })
            }).collect::<Vec<_>>()
        })
    }
}

/// Detailed diff entry for a single word position.
#[derive(Debug)]
pub struct ExpectationFailure {
    pub index: usize,
    pub expected: Option<String>,
    pub actual: Option<String>,
}

/// Catalog responsible for discovering fixtures on disk.
pub struct FixtureCatalog {
    root: PathBuf,
}

impl FixtureCatalog {
    pub fn new<P: Into<PathBuf>>(root: P) -> Self {
        Self { root: root.into() }
    }

    pub fn root(&self) -> &Path {
        &self.root
    }

    /// List all fixtures by their metadata.
    pub fn discover(&self) -> Result<Vec<FixtureMetadata>> {
        let mut fixtures = Vec::new();
        if !self.root.exists() {
            return Ok(fixtures);
        }

        for entry in fs::read_dir(&self.root)
            .with_context(|| format!("reading fixture dir {}", self.root.display()))?
        {
            let entry = entry?;
            if !entry.file_type()?.is_file() {
                continue;
            }
            let path = entry.path();
            if fixture_name(&path).is_some() {
                fixtures.push(self.metadata_for_path(&path)?);
            }
        }

        fixtures.sort_by(|a, b| a.name.cmp(&b.name));
        Ok(fixtures)
    }

    /// Load fixture frames + expectations for provided name or path.
    pub fn load(&self, fixture: &str, override_expect: Option<PathBuf>) -> Result<FixtureData> {
        let frames_path = self.resolve_fixture_path(fixture)?;
        let metadata = self.metadata_for_path(&frames_path)?;
        let frames = read_frames(&frames_path)?;

        let expectation_path = override_expect.or(metadata.expect_path.clone());
        let expectations = match expectation_path {
            Some(path) => {
                let json = fs::read_to_string(&path)
                    .with_context(|| format!("reading expectation {}", path.display()))?;
                Some(
                    serde_json::from_str(&json)
                        .with_context(|| format!("parsing {}", path.display()))?,
                )
            }
            None => None,
        };

        log::debug!(
            "[Fixtures] Loaded {} ({} frames, expectations: {})",
            metadata.name,
            frames.len(),
            expectations.is_some()
        );

        Ok(FixtureData {
            metadata,
            frames,
            expectations,
        })
    }

    fn resolve_fixture_path(&self, fixture: &str) -> Result<PathBuf> {
        let as_path = Path::new(fixture);
        if as_path.is_file() {
            return Ok(as_path.to_path_buf());
        }

        let candidate = self.root.join(format!("{fixture}{FRAMES_SUFFIX}"));
        if candidate.exists() {
            Ok(candidate)
        } else {
            Err(anyhow!(
                "Fixture '{fixture}' not found in {}",
                self.root.display()
            ))
        }
    }

    fn metadata_for_path(&self, frames_path: &Path) -> Result<FixtureMetadata> {
        let name = fixture_name(frames_path)
            .or_else(|| {
                frames_path
                    .file_stem()
                    .and_then(|s| s.to_str())
                    .map(str::to_string)
            })
            .ok_or_else(|| anyhow!("Invalid fixture name for {}", frames_path.display()))?;
        let expect_path = frames_path.with_file_name(format!("{name}{EXPECT_SUFFIX}"));
        Ok(FixtureMetadata {
            name,
            frames_path: frames_path.to_path_buf(),
            expect_path: expect_path.exists().then_some(expect_path),
        })
    }
}

impl Default for FixtureCatalog {
    fn default() -> Self {
        Self::new(DEFAULT_FIXTURE_ROOT)
    }
}

/// Fixture name for `<name>.frames.json`, None for any other file
fn fixture_name(path: &Path) -> Option<String> {
    path.file_name()
        .and_then(|n| n.to_str())
        .and_then(|n| n.strip_suffix(FRAMES_SUFFIX))
        .filter(|n| !n.is_empty())
        .map(str::to_string)
}

/// Read a frame capture from disk
pub fn read_frames(path: &Path) -> Result<Vec<Frame>> {
    let json =
        fs::read_to_string(path).with_context(|| format!("reading frames {}", path.display()))?;
    let file: FrameFile =
        serde_json::from_str(&json).with_context(|| format!("parsing {}", path.display()))?;
    Ok(file.into())
}
