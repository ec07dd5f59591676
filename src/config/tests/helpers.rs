//! Shared test helpers for configuration tests.

use camino::{Utf8Path, Utf8PathBuf};
use ortho_config::MergeComposer;
use serde_json::Value;
use tempfile::TempDir;

use crate::config::InboxConfig;

/// Applies a configuration layer to the composer based on the layer type.
pub fn apply_layer(composer: &mut MergeComposer, layer_type: &str, value: Value) {
    match layer_type {
        "defaults" => composer.push_defaults(value),
        "file" => composer.push_file(value, None),
        "cli" => composer.push_cli(value),
        _ => panic!("unknown layer type: {layer_type}"),
    }
}

/// Composes an [`InboxConfig`] from a sequence of `(layer_type, value)` pairs.
pub fn build_config_from_layers(layers: &[(&str, Value)]) -> InboxConfig {
    let mut composer = MergeComposer::new();

    for (layer_type, value) in layers {
        apply_layer(&mut composer, layer_type, value.clone());
    }

    InboxConfig::merge_from_layers(composer.layers()).expect("merge should succeed")
}

/// Temporary directory with a UTF-8 path.
pub struct TempConfigDir {
    _dir: TempDir,
    path: Utf8PathBuf,
}

impl TempConfigDir {
    pub fn new() -> Self {
        let dir = TempDir::new().expect("should create temp directory");
        let path = Utf8PathBuf::from_path_buf(dir.path().to_path_buf())
            .expect("temp directory should be UTF-8");
        Self { _dir: dir, path }
    }

    pub fn path(&self) -> &Utf8Path {
        &self.path
    }

    /// Writes `contents` to `relative`, creating parent directories.
    pub fn write(&self, relative: &str, contents: &str) -> Utf8PathBuf {
        let target = self.path.join(relative);
        if let Some(parent) = target.parent() {
            std::fs::create_dir_all(parent).expect("should create parent directories");
        }
        std::fs::write(&target, contents).expect("should write config file");
        target
    }
}
