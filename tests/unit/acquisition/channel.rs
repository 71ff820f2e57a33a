//! Tests for channel token detection and partitioning

#[cfg(test)]
mod tests {
    use rand::rngs::StdRng;
    use rand::{Rng, SeedableRng};
    use std::path::PathBuf;
    use tilestitch::acquisition::channel::{ChannelTag, classify};

    fn paths(names: &[&str]) -> Vec<PathBuf> {
        names.iter().map(PathBuf::from).collect()
    }

    #[test]
    fn test_detect_each_token() {
        let cases = [
            ("XY01_00001_CH1.tif", ChannelTag::Ch1),
            ("XY01_00001_CH2.tif", ChannelTag::Ch2),
            ("XY01_00001_CH3.tif", ChannelTag::Ch3),
            ("XY01_00001_CH4.tif", ChannelTag::Ch4),
            ("XY01_00001_Overlay.tif", ChannelTag::Overlay),
        ];
        for (name, tag) in cases {
            assert_eq!(ChannelTag::detect(name), Some(tag), "{name}");
        }
        assert_eq!(ChannelTag::detect("XY01_00001.tif"), None);
    }

    // Tests that a name carrying several tokens goes to the first one checked
    #[test]
    fn test_detect_first_token_in_check_order_wins() {
        assert_eq!(ChannelTag::detect("CH3_vs_CH1.tif"), Some(ChannelTag::Ch1));
        assert_eq!(ChannelTag::detect("Overlay_CH4.tif"), Some(ChannelTag::Ch4));
    }

    #[test]
    fn test_detect_is_case_sensitive() {
        assert_eq!(ChannelTag::detect("xy01_ch1.tif"), None);
        assert_eq!(ChannelTag::detect("xy01_overlay.tif"), None);
        assert_eq!(ChannelTag::detect("xy01_OVERLAY.tif"), None);
    }

    #[test]
    fn test_display_is_token() {
        assert_eq!(ChannelTag::Ch2.to_string(), "CH2");
        assert_eq!(ChannelTag::Overlay.to_string(), "Overlay");
    }

    #[test]
    fn test_classify_keeps_relative_order() {
        let groups = classify(paths(&[
            "b_CH2.tif",
            "a_CH1.tif",
            "c_CH2.tif",
            "notes.tif",
            "a_CH2.tif",
        ]));

        assert_eq!(
            groups.get(ChannelTag::Ch1),
            paths(&["a_CH1.tif"]).as_slice()
        );
        assert_eq!(
            groups.get(ChannelTag::Ch2),
            paths(&["b_CH2.tif", "c_CH2.tif", "a_CH2.tif"]).as_slice()
        );
        assert!(groups.get(ChannelTag::Ch3).is_empty());
        assert_eq!(groups.unmatched(), paths(&["notes.tif"]).as_slice());
        assert_eq!(groups.populated(), 2);
    }

    // Tests that tokens in parent folders are ignored
    #[test]
    fn test_classify_inspects_file_name_only() {
        let groups = classify(paths(&["/data/CH1/XY01/tile_00001.tif"]));

        assert_eq!(groups.populated(), 0);
        assert_eq!(groups.unmatched().len(), 1);
    }

    #[test]
    fn test_iter_lists_every_channel_in_check_order() {
        let groups = classify(paths(&["x_Overlay.tif"]));

        let tags: Vec<ChannelTag> = groups.iter().map(|(tag, _)| tag).collect();
        assert_eq!(tags, ChannelTag::ALL.to_vec());
        let sizes: Vec<usize> = groups.iter().map(|(_, files)| files.len()).collect();
        assert_eq!(sizes, vec![0, 0, 0, 0, 1]);
    }

    #[test]
    fn test_reorder_sees_every_channel() {
        let mut groups = classify(paths(&["b_CH1.tif", "a_CH1.tif", "z_CH4.tif"]));
        let mut seen = Vec::new();

        groups.reorder(|tag, files| {
            seen.push(tag);
            files.sort();
        });

        assert_eq!(seen, ChannelTag::ALL.to_vec());
        assert_eq!(
            groups.get(ChannelTag::Ch1),
            paths(&["a_CH1.tif", "b_CH1.tif"]).as_slice()
        );
    }

    // Tests that random file sets are partitioned without loss or duplication
    #[test]
    fn test_classify_partitions_random_names() {
        let fragments = ["CH1", "CH2", "CH3", "CH4", "Overlay", "ch1", "XY", "_", "7"];
        let mut rng = StdRng::seed_from_u64(42);

        for _ in 0..50 {
            let count = rng.random_range(0..40);
            let files: Vec<PathBuf> = (0..count)
                .map(|i| {
                    let parts = rng.random_range(1..4);
                    let mut name = format!("f{i}_");
                    for _ in 0..parts {
                        let pick = rng.random_range(0..fragments.len());
                        name.push_str(fragments.get(pick).unwrap());
                    }
                    PathBuf::from(format!("{name}.tif"))
                })
                .collect();

            let groups = classify(files.clone());

            let mut regrouped: Vec<PathBuf> = groups
                .iter()
                .flat_map(|(_, files)| files.iter().cloned())
                .chain(groups.unmatched().iter().cloned())
                .collect();
            regrouped.sort();
            let mut expected = files;
            expected.sort();
            assert_eq!(regrouped, expected);

            for (tag, files) in groups.iter() {
                for file in files {
                    let name = file.to_string_lossy();
                    assert_eq!(ChannelTag::detect(&name), Some(tag));
                }
            }
        }
    }
}
