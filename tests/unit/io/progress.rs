//! Tests for progress tracking across acquisition folders

#[cfg(test)]
mod tests {
    use tilestitch::io::configuration::MAX_INDIVIDUAL_PROGRESS_BARS;
    use tilestitch::io::progress::ProgressManager;

    #[test]
    fn test_small_run_tracks_each_folder() {
        let mut pm = ProgressManager::new();
        pm.initialize(2);
        assert!(pm.shows_individual_bars());

        let bar = pm.start_folder("A01", 3);
        assert_eq!(bar.length(), Some(3));
        ProgressManager::complete_channel(&bar, "A01_CH1");
        ProgressManager::complete_channel(&bar, "A01_CH2");
        assert_eq!(bar.position(), 2);

        pm.complete_folder(&bar);
        assert!(bar.is_finished());
        pm.finish();
    }

    // Tests that large runs fall back to the batch bar only
    #[test]
    fn test_large_run_hides_folder_bars() {
        let mut pm = ProgressManager::default();
        pm.initialize(MAX_INDIVIDUAL_PROGRESS_BARS + 1);
        assert!(!pm.shows_individual_bars());

        let bar = pm.start_folder("A01", 5);
        assert!(bar.is_hidden());
        ProgressManager::complete_channel(&bar, "A01_CH1");
        pm.complete_folder(&bar);
        pm.finish();
    }

    #[test]
    fn test_threshold_is_inclusive() {
        let mut pm = ProgressManager::new();
        pm.initialize(MAX_INDIVIDUAL_PROGRESS_BARS);
        assert!(pm.shows_individual_bars());

        pm.initialize(0);
        assert!(pm.shows_individual_bars());
        pm.finish();
    }
}
