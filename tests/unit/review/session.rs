//! Tests for importing, marking and exporting review images

#[cfg(test)]
mod tests {
    use crate::common::{corrupt, write_tile};
    use image::{ImageBuffer, Luma};
    use std::fs;
    use std::path::{Path, PathBuf};
    use tempfile::TempDir;
    use tilestitch::review::mark::Mark;
    use tilestitch::review::session::{ReviewItem, ReviewSession, collect_image_files};
    use tilestitch::{StatusKind, StatusMessage};

    fn kinds(messages: &[StatusMessage]) -> Vec<StatusKind> {
        messages.iter().map(|m| m.kind).collect()
    }

    fn session_with(root: &Path, names: &[&str]) -> ReviewSession {
        let mut session = ReviewSession::new();
        for name in names {
            let path = root.join(name);
            write_tile(&path, 8, 6, 100);
            session.push(path);
        }
        session
    }

    // Tests that a folder's own images come before those of its subfolders
    #[test]
    fn test_collect_lists_files_before_subfolders() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        fs::create_dir_all(root.join("b_sub")).unwrap();
        fs::create_dir_all(root.join("A_sub")).unwrap();
        write_tile(&root.join("z.png"), 2, 2, 0);
        write_tile(&root.join("B.TIF"), 2, 2, 0);
        write_tile(&root.join("b_sub").join("inner.tif"), 2, 2, 0);
        write_tile(&root.join("A_sub").join("first.png"), 2, 2, 0);
        fs::write(root.join("notes.txt"), b"skip").unwrap();
        write_tile(&root.join("photo.jpg"), 2, 2, 0);

        let files = collect_image_files(root).unwrap();

        assert_eq!(
            files,
            vec![
                root.join("B.TIF"),
                root.join("z.png"),
                root.join("A_sub").join("first.png"),
                root.join("b_sub").join("inner.tif"),
            ]
        );
    }

    #[test]
    fn test_import_skips_unreadable_images() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_tile(&root.join("a.tif"), 4, 4, 0);
        let broken = root.join("b.tif");
        write_tile(&broken, 4, 4, 0);
        corrupt(&broken);

        let mut session = ReviewSession::default();
        let added = session.import_folder(root).unwrap();

        assert_eq!(added, 1);
        assert_eq!(session.len(), 1);
        assert_eq!(session.items().first().unwrap().path(), root.join("a.tif"));
        assert_eq!(session.items().first().unwrap().mark(), Mark::Unmarked);
        assert!(session.import_folder(&root.join("absent")).is_err());
    }

    // Tests that a file whose header parses but whose pixel data is cut short is skipped
    #[test]
    fn test_import_skips_truncated_images() {
        let temp_dir = TempDir::new().unwrap();
        let root = temp_dir.path();
        write_tile(&root.join("a.tif"), 4, 4, 0);
        let truncated = root.join("b.png");
        ImageBuffer::from_fn(50, 50, |x, y| Luma([((x * 37 + y * 91) % 251) as u8]))
            .save(&truncated)
            .unwrap();
        let bytes = fs::read(&truncated).unwrap();
        fs::write(&truncated, bytes.get(..bytes.len() / 2).unwrap()).unwrap();
        assert_eq!(image::image_dimensions(&truncated).unwrap(), (50, 50));

        let mut session = ReviewSession::default();
        let added = session.import_folder(root).unwrap();

        assert_eq!(added, 1);
        assert_eq!(session.items().first().unwrap().path(), root.join("a.tif"));
    }

    #[test]
    fn test_toggle_set_and_remove() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session_with(temp_dir.path(), &["a.tif", "b.tif", "c.tif"]);

        assert_eq!(session.toggle(0), Some(Mark::Good));
        assert_eq!(session.toggle(0), Some(Mark::Bad));
        assert_eq!(session.set_mark(1, Mark::Good), Some(Mark::Unmarked));
        assert_eq!(session.toggle(7), None);
        assert_eq!(session.set_mark(7, Mark::Bad), None);

        let removed = session.remove(0).unwrap();
        assert_eq!(removed.mark(), Mark::Bad);
        assert!(session.remove(5).is_none());
        assert_eq!(session.len(), 2);
        assert_eq!(session.marked(Mark::Good).count(), 1);
        assert!(!session.is_empty());
    }

    // Tests that filters hide only marked items
    #[test]
    fn test_visible_filters() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session_with(temp_dir.path(), &["a.tif", "b.tif", "c.tif"]);
        session.set_mark(0, Mark::Good);
        session.set_mark(1, Mark::Bad);

        let indices = |good, bad| -> Vec<usize> {
            session.visible(good, bad).map(|(i, _)| i).collect()
        };

        assert_eq!(indices(true, true), vec![0, 1, 2]);
        assert_eq!(indices(false, true), vec![1, 2]);
        assert_eq!(indices(true, false), vec![0, 2]);
        assert_eq!(indices(false, false), vec![2]);
    }

    #[test]
    fn test_export_path_drops_everything_after_first_dot() {
        let mut item = ReviewItem::new(PathBuf::from("/in/sample.ome.tif"));
        let dest = Path::new("/out");
        assert_eq!(item.export_path(dest), None);

        let mut session = ReviewSession::new();
        session.push(PathBuf::from("/in/A01_CH1.png"));
        session.set_mark(0, Mark::Bad);
        assert_eq!(
            session.items().first().unwrap().export_path(dest),
            Some(PathBuf::from("/out/A01_CH1_bad.tif"))
        );

        session.push(item.path().to_path_buf());
        session.set_mark(1, Mark::Good);
        item = session.items().get(1).unwrap().clone();
        assert_eq!(
            item.export_path(dest),
            Some(PathBuf::from("/out/sample_good.tif"))
        );
    }

    // Tests that exports are full resolution TIFFs named by verdict
    #[test]
    fn test_export_writes_marked_images() {
        let temp_dir = TempDir::new().unwrap();
        let source = temp_dir.path().join("in");
        fs::create_dir_all(&source).unwrap();
        let wide = source.join("wide.png");
        ImageBuffer::from_pixel(400, 100, Luma([42u8]))
            .save(&wide)
            .unwrap();
        let mut session = ReviewSession::new();
        session.push(wide);
        session.push(source.join("other.png"));
        write_tile(&source.join("other.png"), 8, 8, 1);
        session.set_mark(0, Mark::Good);
        session.set_mark(1, Mark::Bad);
        let dest = temp_dir.path().join("out");

        let messages = session.export(Mark::Good, &dest);

        assert_eq!(
            kinds(&messages),
            vec![StatusKind::Saved, StatusKind::Complete]
        );
        assert_eq!(messages.last().unwrap().text, "Good images saved.");
        let exported = dest.join("wide_good.tif");
        let reloaded = image::open(&exported).unwrap();
        assert_eq!((reloaded.width(), reloaded.height()), (400, 100));
        assert_eq!(reloaded.to_luma8().get_pixel(399, 99).0[0], 42);
        assert!(!dest.join("other_bad.tif").exists());
    }

    #[test]
    fn test_export_continues_after_failure() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session_with(temp_dir.path(), &["a.tif", "b.tif"]);
        corrupt(&temp_dir.path().join("a.tif"));
        session.set_mark(0, Mark::Bad);
        session.set_mark(1, Mark::Bad);
        let dest = temp_dir.path().join("out");

        let messages = session.export(Mark::Bad, &dest);

        assert_eq!(
            kinds(&messages),
            vec![
                StatusKind::LoadFailure,
                StatusKind::Saved,
                StatusKind::Complete,
            ]
        );
        let first = messages.first().unwrap();
        assert!(first.text.starts_with("Failed to save image"));
        assert!(dest.join("b_bad.tif").exists());
    }

    #[test]
    fn test_export_rejects_bad_requests() {
        let temp_dir = TempDir::new().unwrap();
        let mut session = session_with(temp_dir.path(), &["a.tif"]);
        session.set_mark(0, Mark::Good);

        let unmarked = session.export(Mark::Unmarked, temp_dir.path());
        assert_eq!(kinds(&unmarked), vec![StatusKind::InvalidRequest]);

        let no_dest = session.export(Mark::Good, Path::new(""));
        assert_eq!(kinds(&no_dest), vec![StatusKind::NoSelection]);
    }

    #[test]
    fn test_export_with_nothing_marked_only_completes() {
        let temp_dir = TempDir::new().unwrap();
        let session = session_with(temp_dir.path(), &["a.tif"]);

        let messages = session.export(Mark::Bad, &temp_dir.path().join("out"));

        assert_eq!(kinds(&messages), vec![StatusKind::Complete]);
    }

    // Tests that thumbnails fit the box and keep their aspect ratio
    #[test]
    fn test_thumbnail_fits_box() {
        let temp_dir = TempDir::new().unwrap();
        let path = temp_dir.path().join("wide.png");
        write_tile(&path, 400, 100, 3);

        let thumb = ReviewItem::new(path).thumbnail().unwrap();

        assert_eq!((thumb.width(), thumb.height()), (220, 55));
    }
}
