use serde::{Deserialize, Serialize};
use std::fmt;
use std::path::PathBuf;

const TAGGER_URL: &str = "http://nlp.stanford.edu/software/stanford-postagger-2015-01-29.zip";
const PARSER_URL: &str = "http://nlp.stanford.edu/software/stanford-parser-full-2015-01-29.zip";
const GLOVE_URL: &str = "http://www-nlp.stanford.edu/data/glove.840B.300d.zip";
const SICK_TRAIN_URL: &str = "http://alt.qcri.org/semeval2014/task1/data/uploads/sick_train.zip";
const SICK_TRIAL_URL: &str = "http://alt.qcri.org/semeval2014/task1/data/uploads/sick_trial.zip";
const SICK_TEST_URL: &str =
    "http://alt.qcri.org/semeval2014/task1/data/uploads/sick_test_annotated.zip";

// No archive carries a built-in expected size; sizes are only checked when a config file sets them.

#[derive(Clone, Copy, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "snake_case")]
pub enum ResourceKind {
    Tagger,
    Parser,
    WordVectors,
    Dataset,
}

impl fmt::Display for ResourceKind {
    fn fmt(&self, f: &mut fmt::Formatter<'_>) -> fmt::Result {
        f.write_str(match self {
            ResourceKind::Tagger => "Stanford POS Tagger",
            ResourceKind::Parser => "Stanford Parser",
            ResourceKind::WordVectors => "Glove vectors",
            ResourceKind::Dataset => "SICK dataset",
        })
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ArchiveDef {
    pub url: String,
    /// Known-good size in bytes; `None` disables the size check.
    #[serde(default)]
    pub expected_size: Option<u64>,
}

impl ArchiveDef {
    pub fn new(url: impl Into<String>) -> Self {
        Self {
            url: url.into(),
            expected_size: None,
        }
    }
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct ResourceDef {
    pub kind: ResourceKind,
    /// Directory the archives are unpacked in, relative to the base directory.
    pub target_dir: PathBuf,
    /// Directory the archives are downloaded to when it must differ from `target_dir`.
    ///
    /// `target_dir` is then only created once every archive is downloaded and verified, which
    /// matters when `target_dir` doubles as the marker.
    #[serde(default)]
    pub download_dir: Option<PathBuf>,
    /// Path whose existence means the resource is installed, relative to the base directory.
    pub marker: PathBuf,
    pub archives: Vec<ArchiveDef>,
    /// Canonical name for the archive's top-level directory after extraction.
    #[serde(default)]
    pub rename_top_level_to: Option<String>,
}

#[derive(Clone, Debug, Deserialize, Serialize, PartialEq, Eq)]
#[serde(deny_unknown_fields)]
pub struct Config {
    #[serde(default)]
    pub base_dir: Option<PathBuf>,
    #[serde(default = "default_resources")]
    pub resources: Vec<ResourceDef>,
}

impl Default for Config {
    fn default() -> Self {
        Self {
            base_dir: None,
            resources: default_resources(),
        }
    }
}

/// The four resources installed by default, in installation order.
pub fn default_resources() -> Vec<ResourceDef> {
    vec![
        ResourceDef {
            kind: ResourceKind::Tagger,
            target_dir: PathBuf::from("lib/stanford-tagger"),
            download_dir: Some(PathBuf::from("lib")),
            marker: PathBuf::from("lib/stanford-tagger"),
            archives: vec![ArchiveDef::new(TAGGER_URL)],
            rename_top_level_to: None,
        },
        ResourceDef {
            kind: ResourceKind::Parser,
            target_dir: PathBuf::from("lib"),
            download_dir: None,
            marker: PathBuf::from("lib/stanford-parser"),
            archives: vec![ArchiveDef::new(PARSER_URL)],
            rename_top_level_to: Some("stanford-parser".to_string()),
        },
        ResourceDef {
            kind: ResourceKind::WordVectors,
            target_dir: PathBuf::from("data/glove"),
            download_dir: None,
            marker: PathBuf::from("data/glove"),
            archives: vec![ArchiveDef::new(GLOVE_URL)],
            rename_top_level_to: None,
        },
        ResourceDef {
            kind: ResourceKind::Dataset,
            target_dir: PathBuf::from("data/sick"),
            download_dir: None,
            marker: PathBuf::from("data/sick"),
            archives: vec![
                ArchiveDef::new(SICK_TRAIN_URL),
                ArchiveDef::new(SICK_TRIAL_URL),
                ArchiveDef::new(SICK_TEST_URL),
            ],
            rename_top_level_to: None,
        },
    ]
}
