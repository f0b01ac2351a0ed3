use crate::routes::gallery::db_model::MediaItem;
use color_eyre::eyre::eyre;
use common_artydrop::MediaKind;
use futures::future::join_all;
use std::future::Future;
use std::io::{Cursor, Write};
use tracing::warn;
use zip::CompressionMethod;
use zip::write::{SimpleFileOptions, ZipWriter};

/// How many media fetches run concurrently per pass. Bounds memory and
/// outbound connections; does not affect entry ordering.
pub const FETCH_BATCH_SIZE: usize = 4;

/// Archive entry name for a media item: the stored file name, or a
/// synthesized `{kind}-{index}.{ext}` when none was recorded.
#[must_use]
pub fn entry_name(item: &MediaItem, index: usize) -> String {
    if let Some(name) = &item.file_name
        && !name.is_empty()
    {
        return name.clone();
    }
    let ext = url_extension(&item.url).unwrap_or_else(|| {
        match item.kind {
            MediaKind::Image => "jpg",
            MediaKind::Video => "mp4",
        }
        .to_string()
    });
    format!("{}-{}.{}", item.kind, index, ext)
}

fn url_extension(url: &str) -> Option<String> {
    let path = url.split(['?', '#']).next()?;
    let file = path.rsplit('/').next()?;
    let (_, ext) = file.rsplit_once('.')?;
    if ext.is_empty() || !ext.chars().all(|c| c.is_ascii_alphanumeric()) {
        return None;
    }
    Some(ext.to_ascii_lowercase())
}

/// Fetch every item's bytes and pair them with archive entry names.
///
/// Items are fetched in fixed-size concurrent batches; an item whose fetch
/// fails is logged and skipped, so a partial result is a success, not an
/// error. Entry order follows the input order regardless of batch
/// boundaries or which items were skipped.
pub async fn assemble_entries<F, Fut>(items: &[MediaItem], fetch: F) -> Vec<(String, Vec<u8>)>
where
    F: Fn(String) -> Fut,
    Fut: Future<Output = color_eyre::Result<bytes::Bytes>>,
{
    let mut entries = Vec::with_capacity(items.len());
    for (batch_start, batch) in items.chunks(FETCH_BATCH_SIZE).enumerate() {
        let fetches = batch.iter().enumerate().map(|(offset, item)| {
            let index = batch_start * FETCH_BATCH_SIZE + offset;
            let fut = fetch(item.url.clone());
            async move {
                match fut.await {
                    Ok(bytes) => Some((entry_name(item, index), bytes.to_vec())),
                    Err(e) => {
                        warn!("Skipping media item {} in archive: {:?}", item.id, e);
                        None
                    }
                }
            }
        });
        entries.extend(join_all(fetches).await.into_iter().flatten());
    }
    entries
}

/// Suggested download filename: the gallery title lower-cased with
/// everything non-alphanumeric stripped. Collisions across galleries with
/// the same normalized title are possible and unhandled.
#[must_use]
pub fn archive_file_name(title: &str) -> String {
    let normalized: String = title
        .chars()
        .filter(char::is_ascii_alphanumeric)
        .map(|c| c.to_ascii_lowercase())
        .collect();
    if normalized.is_empty() {
        "gallery.zip".to_string()
    } else {
        format!("{normalized}.zip")
    }
}

/// Assemble named entries into a single in-memory ZIP buffer. Compression
/// is fixed deflate, not negotiated.
///
/// # Errors
///
/// Returns an error if the ZIP writer fails, which only happens on
/// pathological input (duplicate bookkeeping, not I/O — the sink is a
/// `Vec<u8>`).
pub fn build_zip(entries: Vec<(String, Vec<u8>)>) -> color_eyre::Result<Vec<u8>> {
    let mut writer = ZipWriter::new(Cursor::new(Vec::new()));
    let options = SimpleFileOptions::default().compression_method(CompressionMethod::Deflated);

    for (name, bytes) in entries {
        writer
            .start_file(name, options)
            .map_err(|e| eyre!("Failed to start archive entry: {e}"))?;
        writer.write_all(&bytes)?;
    }

    let cursor = writer
        .finish()
        .map_err(|e| eyre!("Failed to finalize archive: {e}"))?;
    Ok(cursor.into_inner())
}

#[cfg(test)]
mod tests {
    use super::*;
    use chrono::Utc;
    use std::io::Read;
    use zip::ZipArchive;

    fn media_item(file_name: Option<&str>, url: &str, kind: MediaKind) -> MediaItem {
        MediaItem {
            id: "m1".into(),
            gallery_id: "g1".into(),
            storage_path: "galleries/g1/m1".into(),
            url: url.into(),
            thumbnail_url: None,
            file_name: file_name.map(Into::into),
            file_size: None,
            kind,
            position: 0,
            folder_id: None,
            created_at: Utc::now(),
        }
    }

    #[test]
    fn entry_name_prefers_stored_file_name() {
        let item = media_item(Some("Beach Day 01.JPG"), "https://cdn/x.jpg", MediaKind::Image);
        assert_eq!(entry_name(&item, 3), "Beach Day 01.JPG");
    }

    #[test]
    fn entry_name_is_synthesized_from_kind_index_and_url_extension() {
        let item = media_item(None, "https://cdn/bucket/abc.PNG?sig=123", MediaKind::Image);
        assert_eq!(entry_name(&item, 7), "image-7.png");

        let clip = media_item(None, "https://cdn/bucket/clip.mov", MediaKind::Video);
        assert_eq!(entry_name(&clip, 0), "video-0.mov");
    }

    #[test]
    fn entry_name_falls_back_to_kind_default_extension() {
        let item = media_item(None, "https://cdn/bucket/no-extension", MediaKind::Video);
        assert_eq!(entry_name(&item, 2), "video-2.mp4");
    }

    #[test]
    fn archive_file_name_strips_and_lowercases() {
        assert_eq!(archive_file_name("Smith & Jones Wedding '26"), "smithjoneswedding26.zip");
        assert_eq!(archive_file_name("日本"), "gallery.zip");
        assert_eq!(archive_file_name(""), "gallery.zip");
    }

    #[test]
    fn built_zip_round_trips_entries_in_order() {
        let entries = vec![
            ("first.jpg".to_string(), vec![1u8, 2, 3]),
            ("second.jpg".to_string(), vec![4u8, 5]),
        ];
        let buffer = build_zip(entries).unwrap();

        let mut archive = ZipArchive::new(Cursor::new(buffer)).unwrap();
        assert_eq!(archive.len(), 2);
        assert_eq!(archive.by_index(0).unwrap().name(), "first.jpg");

        let mut contents = Vec::new();
        archive
            .by_name("second.jpg")
            .unwrap()
            .read_to_end(&mut contents)
            .unwrap();
        assert_eq!(contents, vec![4u8, 5]);
    }

    #[test]
    fn empty_zip_is_still_a_valid_archive() {
        let buffer = build_zip(Vec::new()).unwrap();
        let archive = ZipArchive::new(Cursor::new(buffer)).unwrap();
        assert_eq!(archive.len(), 0);
    }

    #[tokio::test]
    async fn one_failed_fetch_is_skipped_and_order_is_kept() {
        let items: Vec<MediaItem> = (0..6)
            .map(|i| media_item(None, &format!("https://cdn/{i}.jpg"), MediaKind::Image))
            .collect();

        // Item 2's fetch fails; everything else returns its url as bytes.
        let entries = assemble_entries(&items, |url| async move {
            if url.ends_with("/2.jpg") {
                Err(eyre!("connection reset"))
            } else {
                Ok(bytes::Bytes::from(url.into_bytes()))
            }
        })
        .await;

        assert_eq!(entries.len(), items.len() - 1);
        let names: Vec<&str> = entries.iter().map(|(name, _)| name.as_str()).collect();
        assert_eq!(
            names,
            ["image-0.jpg", "image-1.jpg", "image-3.jpg", "image-4.jpg", "image-5.jpg"]
        );
        assert_eq!(entries[2].1, b"https://cdn/3.jpg");

        let buffer = build_zip(entries).unwrap();
        let archive = ZipArchive::new(Cursor::new(buffer)).unwrap();
        assert_eq!(archive.len(), 5);
    }
}
