//! Tunables the rest of the crate treats as configuration rather than
//! hardcoded constants, so a host application can adjust allocation caps and
//! mod-identification rules without a new build of this crate.

/// Bundles the allocation caps and lookup tables callers may want to adjust
/// per deployment.
#[derive(Clone, Debug)]
pub struct SaveEngineConfig {
    /// Maximum bytes a single length-prefixed string may allocate.
    pub max_string_bytes: u32,
    /// Maximum bytes a single segment payload may allocate.
    pub max_segment_bytes: u32,
    /// Maximum bytes the decompressor may grow its output buffer to when no
    /// size hint is present.
    pub max_decompressed_bytes: u64,
    /// Directory name (sibling to the save file) backup snapshots are
    /// written into.
    pub backup_dir_name: String,
    /// Module identifiers that indicate the naval expansion is active,
    /// matched case-insensitively.
    pub naval_expansion_module_ids: Vec<String>,
}

impl Default for SaveEngineConfig {
    fn default() -> SaveEngineConfig {
        SaveEngineConfig {
            max_string_bytes: 16 * 1024 * 1024,
            max_segment_bytes: 64 * 1024 * 1024,
            max_decompressed_bytes: 512 * 1024 * 1024,
            backup_dir_name: "_SaveEditorBackups".to_owned(),
            naval_expansion_module_ids: vec!["WarSails".to_owned(), "NavalExpansion".to_owned()],
        }
    }
}

impl SaveEngineConfig {
    /// Returns `true` if `module_ids` indicates the naval expansion is
    /// installed, matching case-insensitively.
    pub fn has_naval_expansion<S: AsRef<str>>(&self, module_ids: &[S]) -> bool {
        module_ids.iter().any(|id| {
            self.naval_expansion_module_ids
                .iter()
                .any(|known| known.eq_ignore_ascii_case(id.as_ref()))
        })
    }
}
