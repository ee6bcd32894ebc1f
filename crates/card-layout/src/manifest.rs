//! Card manifest loading (CSV)

use crate::types::{CardManifestEntry, FaceType, LayoutError, Result, Skip};
use std::io::Read;
use std::path::Path;

/// Manifest entries plus the rows that were dropped while reading them
#[derive(Debug, Clone, Default, PartialEq)]
pub struct ManifestLoad {
    pub entries: Vec<CardManifestEntry>,
    pub skips: Vec<Skip>,
}

pub async fn load_manifest(path: impl AsRef<Path>) -> Result<ManifestLoad> {
    let path = path.as_ref().to_owned();

    let contents = tokio::fs::read(&path).await?;

    let load = tokio::task::spawn_blocking(move || parse_manifest(contents.as_slice())).await??;

    log::info!(
        "Loaded {} manifest entries from {} ({} rows skipped)",
        load.entries.len(),
        path.display(),
        load.skips.len()
    );
    Ok(load)
}

/// Parse a manifest from CSV.
///
/// The header must contain an `id` column; `count` and `type` are optional
/// and matched case-insensitively. Bad rows are recorded as skips.
pub fn parse_manifest<R: Read>(reader: R) -> Result<ManifestLoad> {
    let mut reader = csv::ReaderBuilder::new()
        .trim(csv::Trim::All)
        .flexible(true)
        .from_reader(reader);

    let headers = reader.headers()?.clone();
    let column = |name: &str| headers.iter().position(|h| h.eq_ignore_ascii_case(name));
    let id_col = column("id")
        .ok_or_else(|| LayoutError::Config("Manifest has no 'id' column".to_string()))?;
    let count_col = column("count");
    let type_col = column("type");

    let mut load = ManifestLoad::default();

    for result in reader.records() {
        let record = result?;
        let line = record.position().map(|pos| pos.line());
        let field = |col: Option<usize>| col.and_then(|c| record.get(c)).unwrap_or("");

        let mut skip = |id: Option<&str>, reason: String| {
            log::warn!("Skipping manifest row {}: {}", line.unwrap_or_default(), reason);
            load.skips.push(Skip::InvalidManifestRow {
                line,
                id: id.map(str::to_string),
                reason,
            });
        };

        let id = field(Some(id_col));
        if id.is_empty() {
            skip(None, "missing id".to_string());
            continue;
        }

        // An explicit type wins; otherwise fall back to the id prefix
        let face_type = field(type_col)
            .parse::<FaceType>()
            .ok()
            .or_else(|| FaceType::from_id_prefix(id));
        let Some(face_type) = face_type else {
            skip(Some(id), "unknown face type".to_string());
            continue;
        };

        let count = match count_col {
            None => 1,
            Some(_) => match field(count_col).parse::<i64>() {
                Ok(count) => count,
                Err(_) if field(count_col).is_empty() => {
                    skip(Some(id), "missing count".to_string());
                    continue;
                }
                Err(_) => {
                    skip(Some(id), format!("invalid count '{}'", field(count_col)));
                    continue;
                }
            },
        };

        load.entries
            .push(CardManifestEntry::new(id, face_type, count));
    }

    Ok(load)
}

#[cfg(test)]
mod tests {
    use super::*;

    #[test]
    fn test_parse_with_type_column() {
        let csv = "id,type,count,name\nambush,Action,2,Ambush\nstorm,event,1,Storm\n";

        let load = parse_manifest(csv.as_bytes()).unwrap();

        assert_eq!(
            load.entries,
            vec![
                CardManifestEntry::new("ambush", FaceType::Action, 2),
                CardManifestEntry::new("storm", FaceType::Event, 1),
            ]
        );
        assert!(load.skips.is_empty());
    }

    #[test]
    fn test_parse_derives_type_from_prefix() {
        let csv = "id,count\naction_ambush,3\nevent_storm,1\nrules_card,1\n";

        let load = parse_manifest(csv.as_bytes()).unwrap();

        assert_eq!(load.entries.len(), 2);
        assert_eq!(load.entries[0].face_type, FaceType::Action);
        assert_eq!(load.entries[1].face_type, FaceType::Event);
        assert_eq!(load.skips.len(), 1);
        assert!(matches!(
            &load.skips[0],
            Skip::InvalidManifestRow { line: Some(4), id: Some(id), .. } if id == "rules_card"
        ));
    }

    #[test]
    fn test_unrecognised_type_falls_back_to_prefix() {
        let csv = "id,type,count\naction_guard,Creature,1\n";

        let load = parse_manifest(csv.as_bytes()).unwrap();

        assert_eq!(load.entries[0].face_type, FaceType::Action);
    }

    #[test]
    fn test_bad_counts_are_skipped() {
        let csv = "id,count\naction_a,\naction_b,two\naction_c,0\naction_d,-1\naction_e\n";

        let load = parse_manifest(csv.as_bytes()).unwrap();

        let ids: Vec<_> = load.entries.iter().map(|e| e.id.as_str()).collect();
        // Zero and negative counts are the expander's business
        assert_eq!(ids, vec!["action_c", "action_d"]);
        assert_eq!(load.skips.len(), 3);
    }

    #[test]
    fn test_missing_id_is_skipped() {
        let csv = "id,count\n,2\naction_a,1\n";

        let load = parse_manifest(csv.as_bytes()).unwrap();

        assert_eq!(load.entries.len(), 1);
        assert!(matches!(
            &load.skips[0],
            Skip::InvalidManifestRow { id: None, .. }
        ));
    }

    #[test]
    fn test_no_count_column_means_one_copy() {
        let csv = "ID,Name\naction_a,A\n";

        let load = parse_manifest(csv.as_bytes()).unwrap();

        assert_eq!(load.entries[0].count, 1);
    }

    #[test]
    fn test_missing_id_column() {
        let csv = "name,count\nA,1\n";
        assert!(matches!(
            parse_manifest(csv.as_bytes()),
            Err(LayoutError::Config(_))
        ));
    }
}
