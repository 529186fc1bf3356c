/// Directory under the asset root holding the gallery manifest.
pub const RELATIVE_MANIFEST_PATH: &str = "gallery";

pub const MANIFEST_FILE_NAME: &str = "manifest.json";
