//! Configuration loading and discovery.
//!
//! This module provides configuration file discovery by:
//! 1. Walking up from the current directory to find project config
//! 2. Loading user config from XDG config directory
//! 3. Merging with sensible defaults
//!
//! # Supported formats
//!
//! The following configuration file formats are supported:
//! - TOML (`.toml`)
//! - YAML (`.yaml`, `.yml`)
//! - JSON (`.json`)
//!
//! # Config file locations (in order of precedence, highest first):
//! - `PHRASEMINE_*` environment variables
//! - files passed explicitly (`--config`)
//! - `phrasemine.<ext>` in current directory or any parent
//! - `.phrasemine.<ext>` in current directory or any parent
//! - `~/.config/phrasemine/config.<ext>` (user config)
//!
//! Where `<ext>` is one of: `toml`, `yaml`, `yml`, `json`
//!
//! When multiple files exist in the same directory, all are merged via figment.
//! Later extensions override earlier: toml < yaml < yml < json.
//!
//! # Example
//! ```no_run
//! use camino::Utf8PathBuf;
//! use phrasemine_core::config::ConfigLoader;
//!
//! let cwd = std::env::current_dir().unwrap();
//! let cwd = Utf8PathBuf::try_from(cwd).expect("current directory is not valid UTF-8");
//! let (config, _sources) = ConfigLoader::new()
//!     .with_project_search(&cwd)
//!     .load()
//!     .unwrap();
//! let catalog = config.catalog().unwrap();
//! ```

use camino::{Utf8Path, Utf8PathBuf};
use figment::Figment;
use figment::providers::{Env, Format, Json, Serialized, Toml, Yaml};
use serde::{Deserialize, Serialize};

use crate::collocation::{DEFAULT_TOP_N, Pattern, PatternCatalog, ScanEngine, ScanOptions};
use crate::error::{CatalogError, ConfigError, ConfigResult};
use crate::frequency::FrequencyOptions;
use crate::nlp::StopwordSet;
use crate::normalize::NormalizeOptions;
use crate::pipeline::CorpusOptions;

/// The configuration for phrasemine.
///
/// Deserialized from config files found during discovery (TOML, YAML, or
/// JSON) and converted into the option structs the library functions take.
#[derive(Debug, Clone, Deserialize, Serialize, PartialEq, Eq)]
#[serde(default)]
pub struct Config {
    /// Log level for the application (e.g., "debug", "info", "warn", "error").
    pub log_level: LogLevel,
    /// Directory for daily JSON log files; no file logging when unset.
    pub log_dir: Option<Utf8PathBuf>,
    /// Phrases kept per collocation label.
    pub top_n: usize,
    /// Shortest counted word, in characters.
    pub min_word_length: usize,
    /// Drop stop words from the frequency table.
    pub remove_stopwords: bool,
    /// Count lemmas instead of surface forms.
    pub lemmatize: bool,
    /// Keep digits during normalization.
    pub keep_digits: bool,
    /// Extra characters kept by symbol stripping.
    pub extra_keep: Vec<char>,
    /// Remove `Name:` speaker labels from transcripts.
    pub strip_speaker_labels: bool,
    /// Words added to the English stop-word list.
    pub extra_stopwords: Vec<String>,
    /// Start from the built-in 29-pattern catalog.
    pub builtin_patterns: bool,
    /// Additional collocation patterns, appended after the built-ins.
    pub patterns: Vec<Pattern>,
    /// Scan window; defaults to the longest pattern.
    pub window_size: Option<usize>,
    /// Let the scan window shrink at the end of the token stream.
    pub clip_tail: bool,
    /// Collocation matching engine.
    pub engine: ScanEngine,
    /// Include globs for corpus directories (default: `*.txt`, `*.md`).
    pub include: Vec<String>,
    /// Maximum input size in bytes (default: 5 MiB).
    ///
    /// Omit to use the default. Use `disable_input_limit` to remove the
    /// limit entirely.
    pub max_input_bytes: Option<usize>,
    /// Disable the input size limit entirely.
    ///
    /// When `true`, `max_input_bytes` is ignored and no size check is performed.
    pub disable_input_limit: bool,
}

impl Default for Config {
    fn default() -> Self {
        let frequency = FrequencyOptions::default();
        let scan = ScanOptions::default();
        Self {
            log_level: LogLevel::default(),
            log_dir: None,
            top_n: DEFAULT_TOP_N,
            min_word_length: frequency.min_word_length,
            remove_stopwords: frequency.remove_stopwords,
            lemmatize: frequency.lemmatize,
            keep_digits: false,
            extra_keep: Vec::new(),
            strip_speaker_labels: true,
            extra_stopwords: Vec::new(),
            builtin_patterns: true,
            patterns: Vec::new(),
            window_size: scan.window_size,
            clip_tail: scan.clip_tail,
            engine: scan.engine,
            include: Vec::new(),
            max_input_bytes: None,
            disable_input_limit: false,
        }
    }
}

impl Config {
    /// Normalization options.
    pub fn normalize_options(&self) -> NormalizeOptions {
        NormalizeOptions {
            keep_digits: self.keep_digits,
            extra_keep: self.extra_keep.clone(),
        }
    }

    /// Word counting options.
    pub const fn frequency_options(&self) -> FrequencyOptions {
        FrequencyOptions {
            remove_stopwords: self.remove_stopwords,
            min_word_length: self.min_word_length,
            lemmatize: self.lemmatize,
        }
    }

    /// Collocation scan options.
    pub const fn scan_options(&self) -> ScanOptions {
        ScanOptions {
            top_n: self.top_n,
            window_size: self.window_size,
            clip_tail: self.clip_tail,
            engine: self.engine,
        }
    }

    /// Options for the corpus pipeline.
    pub fn corpus_options(&self) -> CorpusOptions {
        CorpusOptions {
            normalize: self.normalize_options(),
            frequency: self.frequency_options(),
            scan: self.scan_options(),
            strip_speaker_labels: self.strip_speaker_labels,
        }
    }

    /// English stop words plus the configured extras.
    pub fn stopwords(&self) -> StopwordSet {
        StopwordSet::english().with_words(&self.extra_stopwords)
    }

    /// The active pattern catalog.
    ///
    /// # Errors
    ///
    /// [`CatalogError`] when a configured pattern is empty or reuses a label.
    pub fn catalog(&self) -> Result<PatternCatalog, CatalogError> {
        let base = if self.builtin_patterns {
            PatternCatalog::builtin()
        } else {
            PatternCatalog::default()
        };
        base.extend(self.patterns.iter().cloned())
    }

    /// Effective input size cap, `None` when disabled.
    pub fn input_limit(&self) -> Option<usize> {
        if self.disable_input_limit {
            None
        } else {
            Some(self.max_input_bytes.unwrap_or(crate::DEFAULT_MAX_INPUT_BYTES))
        }
    }
}

/// Log level configuration.
#[derive(Debug, Clone, Default, Deserialize, Serialize, PartialEq, Eq)]
#[serde(rename_all = "lowercase")]
pub enum LogLevel {
    /// Verbose output for debugging and development.
    Debug,
    /// Standard operational information (default).
    #[default]
    Info,
    /// Warnings about potential issues.
    Warn,
    /// Errors that indicate failures.
    Error,
}

impl LogLevel {
    /// Returns the log level as a lowercase string slice.
    pub const fn as_str(&self) -> &'static str {
        match self {
            Self::Debug => "debug",
            Self::Info => "info",
            Self::Warn => "warn",
            Self::Error => "error",
        }
    }
}

/// Metadata about which configuration sources were loaded.
///
/// Returned alongside [`Config`] from [`ConfigLoader::load()`] so commands
/// can report the actual config files without re-discovering them.
#[derive(Debug, Clone, Default, Serialize)]
pub struct ConfigSources {
    /// Project config files found by walking up, ordered low→high precedence.
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub project_files: Vec<Utf8PathBuf>,
    /// User config file from XDG config directory.
    #[serde(skip_serializing_if = "Option::is_none")]
    pub user_file: Option<Utf8PathBuf>,
    /// Explicit config files loaded (e.g., from `--config` flag).
    #[serde(skip_serializing_if = "Vec::is_empty")]
    pub explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigSources {
    /// Returns the highest-precedence config file that was loaded.
    ///
    /// Precedence: explicit files > project files > user file.
    pub fn primary_file(&self) -> Option<&Utf8Path> {
        self.explicit_files
            .last()
            .map(Utf8PathBuf::as_path)
            .or_else(|| self.project_files.last().map(Utf8PathBuf::as_path))
            .or(self.user_file.as_deref())
    }
}

/// Supported configuration file extensions (in order of preference).
const CONFIG_EXTENSIONS: &[&str] = &["toml", "yaml", "yml", "json"];

/// Application name for XDG directory lookup and config file names.
const APP_NAME: &str = "phrasemine";

/// Prefix for environment overrides.
pub const ENV_PREFIX: &str = "PHRASEMINE_";

/// Builder for loading configuration from multiple sources.
#[derive(Debug, Default)]
pub struct ConfigLoader {
    /// Starting directory for project config search.
    project_search_root: Option<Utf8PathBuf>,
    /// Whether to include user config from XDG directory.
    include_user_config: bool,
    /// Stop searching when we hit a directory containing this file/dir.
    boundary_marker: Option<String>,
    /// Explicit config files to load (for testing or programmatic use).
    explicit_files: Vec<Utf8PathBuf>,
}

impl ConfigLoader {
    /// Create a new config loader with default settings.
    pub fn new() -> Self {
        Self {
            project_search_root: None,
            include_user_config: true,
            boundary_marker: Some(".git".to_string()),
            explicit_files: Vec::new(),
        }
    }

    /// Set the starting directory for project config search.
    ///
    /// The loader will walk up from this directory looking for config files.
    pub fn with_project_search<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.project_search_root = Some(path.as_ref().to_path_buf());
        self
    }

    /// Set whether to include user config from `~/.config/phrasemine/`.
    pub const fn with_user_config(mut self, include: bool) -> Self {
        self.include_user_config = include;
        self
    }

    /// Set a boundary marker to stop directory traversal.
    ///
    /// When walking up directories, stop if we find a directory containing
    /// this file or directory name. Default is `.git`.
    pub fn with_boundary_marker<S: Into<String>>(mut self, marker: S) -> Self {
        self.boundary_marker = Some(marker.into());
        self
    }

    /// Disable boundary marker (search all the way to filesystem root).
    pub fn without_boundary_marker(mut self) -> Self {
        self.boundary_marker = None;
        self
    }

    /// Add an explicit config file to load.
    ///
    /// Files are loaded in order, with later files taking precedence.
    /// Explicit files are loaded after discovered files.
    pub fn with_file<P: AsRef<Utf8Path>>(mut self, path: P) -> Self {
        self.explicit_files.push(path.as_ref().to_path_buf());
        self
    }

    /// Load configuration, merging all discovered sources.
    ///
    /// Precedence (highest to lowest):
    /// 1. `PHRASEMINE_*` environment variables
    /// 2. Explicit files (in order added via `with_file`)
    /// 3. Project config (closest to search root)
    /// 4. User config (`~/.config/phrasemine/config.<ext>`)
    /// 5. Default values
    #[tracing::instrument(skip(self), fields(search_root = ?self.project_search_root))]
    pub fn load(self) -> ConfigResult<(Config, ConfigSources)> {
        tracing::debug!("loading configuration");
        let mut figment = Figment::new().merge(Serialized::defaults(Config::default()));
        let mut sources = ConfigSources::default();

        if self.include_user_config
            && let Some(user_config) = self.find_user_config()
        {
            figment = Self::merge_file(figment, &user_config);
            sources.user_file = Some(user_config);
        }

        if let Some(ref root) = self.project_search_root {
            let project_configs = self.find_project_configs(root);
            for pc in &project_configs {
                figment = Self::merge_file(figment, pc);
            }
            sources.project_files = project_configs;
        }

        for file in &self.explicit_files {
            figment = Self::merge_file(figment, file);
        }
        sources.explicit_files = self.explicit_files;

        // PHRASEMINE_TOP_N=10, PHRASEMINE_ENGINE=automaton, etc.
        figment = figment.merge(Env::prefixed(ENV_PREFIX).lowercase(true));

        let config: Config = figment
            .extract()
            .map_err(|e| ConfigError::Deserialize(Box::new(e)))?;
        tracing::info!(
            log_level = config.log_level.as_str(),
            top_n = config.top_n,
            patterns = config.patterns.len(),
            "configuration loaded"
        );
        Ok((config, sources))
    }

    /// Find project config files by walking up from the given directory.
    ///
    /// Returns all matching config files from the closest directory that has
    /// any match, ordered low-to-high precedence: dotfiles before regular
    /// files.
    fn find_project_configs(&self, start: &Utf8Path) -> Vec<Utf8PathBuf> {
        let mut current = Some(start.to_path_buf());

        while let Some(dir) = current {
            let mut found = Vec::new();

            for ext in CONFIG_EXTENSIONS {
                let dotfile = dir.join(format!(".{APP_NAME}.{ext}"));
                if dotfile.is_file() {
                    found.push(dotfile);
                }
            }
            for ext in CONFIG_EXTENSIONS {
                let regular = dir.join(format!("{APP_NAME}.{ext}"));
                if regular.is_file() {
                    found.push(regular);
                }
            }

            if !found.is_empty() {
                return found;
            }

            // Check for boundary marker AFTER checking config files,
            // so a config in the same directory as the marker is found.
            if let Some(ref marker) = self.boundary_marker
                && dir.join(marker).exists()
                && dir != start
            {
                break;
            }

            current = dir.parent().map(Utf8Path::to_path_buf);
        }

        Vec::new()
    }

    /// Find user config in XDG config directory.
    fn find_user_config(&self) -> Option<Utf8PathBuf> {
        let config_dir = user_config_dir()?;
        CONFIG_EXTENSIONS
            .iter()
            .map(|ext| config_dir.join(format!("config.{ext}")))
            .find(|path| path.is_file())
    }

    /// Merge a config file into the figment, detecting format from extension.
    fn merge_file(figment: Figment, path: &Utf8Path) -> Figment {
        match path.extension() {
            Some("yaml" | "yml") => figment.merge(Yaml::file_exact(path.as_str())),
            Some("json") => figment.merge(Json::file_exact(path.as_str())),
            _ => figment.merge(Toml::file_exact(path.as_str())),
        }
    }
}

/// Get the project directories for XDG-compliant path resolution.
///
/// Returns `None` if the home directory cannot be determined.
fn project_dirs() -> Option<directories::ProjectDirs> {
    directories::ProjectDirs::from("", "", APP_NAME)
}

/// Get the user config directory path.
///
/// Returns `~/.config/phrasemine/` on Linux, `~/Library/Application Support/phrasemine/`
/// on macOS, and equivalent on other platforms.
pub fn user_config_dir() -> Option<Utf8PathBuf> {
    let proj_dirs = project_dirs()?;
    Utf8PathBuf::from_path_buf(proj_dirs.config_dir().to_path_buf()).ok()
}
