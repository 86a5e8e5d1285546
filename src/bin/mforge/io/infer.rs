use std::path::Path;

use mol_forge::Format;

pub fn format_from_path(path: &Path) -> Option<Format> {
    let ext = path.extension()?.to_str()?.to_lowercase();
    match ext.as_str() {
        "mol" | "mdl" => Some(Format::Mol),
        _ => None,
    }
}
