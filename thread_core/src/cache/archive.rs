use flate2::{write::GzEncoder, Compression};

use std::io::ErrorKind;
use std::path::Path;

use crate::cache::ItemType;
use crate::error::Result;

pub(crate) const ARCHIVE_ROOT: &str = "cache";

fn builder() -> tar::Builder<GzEncoder<Vec<u8>>> {
    tar::Builder::new(GzEncoder::new(Vec::new(), Compression::default()))
}

fn finish(builder: tar::Builder<GzEncoder<Vec<u8>>>) -> Result<Vec<u8>> {
    let encoder = builder.into_inner()?;
    Ok(encoder.finish()?)
}

/// Archive the `<item type>/<id>.json` files of a cache directory, naming it `cache` inside
/// the archive. Anything else in the directory, such as a write still in progress, is left out.
pub(crate) fn archive_dir(root: &Path) -> Result<Vec<u8>> {
    let mut builder = builder();
    for item_type in ItemType::ALL {
        let dir = root.join(item_type.as_str());
        let entries = match std::fs::read_dir(&dir) {
            Ok(entries) => entries,
            Err(e) if e.kind() == ErrorKind::NotFound => continue,
            Err(e) => return Err(e.into()),
        };
        let mut files = Vec::new();
        for entry in entries {
            let entry = entry?;
            let path = entry.path();
            if entry.file_type()?.is_file() && path.extension().map_or(false, |ext| ext == "json") {
                files.push((entry.file_name(), path));
            }
        }
        files.sort();
        for (name, path) in files {
            let name = format!("{}/{}/{}", ARCHIVE_ROOT, item_type, name.to_string_lossy());
            builder.append_path_with_name(path, name)?;
        }
    }
    finish(builder)
}

/// Archive in-memory records with the same layout as a cache directory.
pub(crate) fn archive_records<I>(records: I) -> Result<Vec<u8>>
where
    I: IntoIterator<Item = (ItemType, u64, String)>,
{
    let mut builder = builder();
    for (item_type, id, json) in records {
        let path = format!("{}/{}/{}.json", ARCHIVE_ROOT, item_type, id);
        let mut header = tar::Header::new_gnu();
        header.set_size(json.len() as u64);
        header.set_mode(0o644);
        header.set_entry_type(tar::EntryType::Regular);
        builder.append_data(&mut header, path, json.as_bytes())?;
    }
    finish(builder)
}
