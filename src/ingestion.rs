// Copyright (c) MySocial Team
// SPDX-License-Identifier: Apache-2.0

use std::path::Path;

use anyhow::{Context, Result};
use serde::{Deserialize, Serialize};
use tracing::{error, info, warn};

use crate::store::IngestionQueue;

/// One raw row from the interactions export, prior to any coercion.
///
/// Every field stays a string here; normalization happens when the queue is
/// drained. Columns that may legitimately be absent default to empty.
#[derive(Debug, Clone, Serialize, Deserialize)]
pub struct RawInteractionRow {
    pub user_id: String,
    pub content_id: String,
    pub content_name: String,
    pub timestamp: String,
    pub interaction_type: String,
    pub watch_duration_seconds: String,
    #[serde(default)]
    pub comment_text: String,
    #[serde(default)]
    pub platform: String,
    #[serde(default)]
    pub content_type: String,
    #[serde(default)]
    pub category: String,
}

/// Read a delimited export (header row expected) into the ingestion queue.
///
/// File-level failures are reported and abort the load without propagating;
/// a row that fails to deserialize is logged and skipped while the rest of
/// the file continues loading. Returns the number of rows enqueued.
pub fn read_rows(path: &Path, delimiter: u8, queue: &mut IngestionQueue<RawInteractionRow>) -> usize {
    match try_read_rows(path, delimiter, queue) {
        Ok(count) => {
            info!("Loaded {} raw rows from {}", count, path.display());
            count
        }
        Err(e) => {
            error!("Failed to load interactions file {}: {:#}", path.display(), e);
            0
        }
    }
}

fn try_read_rows(
    path: &Path,
    delimiter: u8,
    queue: &mut IngestionQueue<RawInteractionRow>,
) -> Result<usize> {
    let mut reader = csv::ReaderBuilder::new()
        .delimiter(delimiter)
        .flexible(false)
        .from_path(path)
        .with_context(|| format!("opening {}", path.display()))?;

    let mut count = 0;
    for (line, record) in reader.deserialize::<RawInteractionRow>().enumerate() {
        match record {
            Ok(row) => {
                queue.enqueue(row);
                count += 1;
            }
            Err(e) => {
                warn!("Skipping malformed row {}: {}", line + 2, e);
            }
        }
    }
    Ok(count)
}

#[cfg(test)]
mod tests {
    use super::*;
    use std::io::Write;

    const HEADER: &str = "user_id;content_id;content_name;timestamp;interaction_type;watch_duration_seconds;comment_text;platform;content_type;category";

    fn write_file(rows: &[&str]) -> tempfile::NamedTempFile {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{HEADER}").unwrap();
        for row in rows {
            writeln!(file, "{row}").unwrap();
        }
        file
    }

    #[test]
    fn test_reads_all_rows_in_file_order() {
        let file = write_file(&[
            "1;100;Morning News;2024-05-01T08:00:00;view_start;120;;Web;video;news",
            "2;100;Morning News;2024-05-01T09:00:00;like;0;;Mobile;video;news",
        ]);
        let mut queue = IngestionQueue::new();
        let count = read_rows(file.path(), b';', &mut queue);

        assert_eq!(count, 2);
        let first = queue.dequeue().unwrap();
        assert_eq!(first.user_id, "1");
        assert_eq!(first.platform, "Web");
        let second = queue.dequeue().unwrap();
        assert_eq!(second.interaction_type, "like");
        assert!(queue.is_empty());
    }

    #[test]
    fn test_missing_file_reports_and_returns_zero() {
        let mut queue = IngestionQueue::new();
        let count = read_rows(Path::new("/nonexistent/interactions.csv"), b';', &mut queue);
        assert_eq!(count, 0);
        assert!(queue.is_empty());
    }

    #[test]
    fn test_malformed_row_is_skipped_not_fatal() {
        let file = write_file(&[
            "1;100;Morning News;2024-05-01T08:00:00;view_start;120;;Web;video;news",
            "not;enough;fields",
            "2;101;Evening Show;2024-05-01T20:00:00;comment;0;loved it;Web;video;tv",
        ]);
        let mut queue = IngestionQueue::new();
        let count = read_rows(file.path(), b';', &mut queue);
        assert_eq!(count, 2);
    }

    #[test]
    fn test_custom_delimiter() {
        let mut file = tempfile::NamedTempFile::new().unwrap();
        writeln!(file, "{}", HEADER.replace(';', ",")).unwrap();
        writeln!(file, "1,100,Quiz Show,2024-05-01T08:00:00,vote,0,,TV,video,games").unwrap();

        let mut queue = IngestionQueue::new();
        assert_eq!(read_rows(file.path(), b',', &mut queue), 1);
        assert_eq!(queue.dequeue().unwrap().interaction_type, "vote");
    }
}
