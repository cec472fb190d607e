use crate::settings::Settings;

/// Slice `argv` by the configured start and stop bounds.
///
/// The stop bound is clamped to the input length; a start past the stop bound
/// yields an empty slice.
pub fn read<'a, S>(settings: &Settings, argv: &'a [S]) -> &'a [S] {
    let stop = settings
        .stop_index
        .map_or(argv.len(), |stop| stop.min(argv.len()));
    let start = settings.start_index.min(stop);
    &argv[start..stop]
}

#[cfg(test)]
mod tests {
    use super::*;

    fn argv(items: &[&str]) -> Vec<String> {
        items.iter().map(|s| s.to_string()).collect()
    }

    #[test]
    fn default_bounds_keep_everything() {
        let input = argv(&["--test", "test"]);
        assert_eq!(read(&Settings::default(), &input), input.as_slice());
    }

    #[test]
    fn start_and_stop_bounds_slice_input() {
        let input = argv(&["a", "--config", "file.json", "b"]);
        let settings = Settings::default().start_index(1).stop_index(3);
        assert_eq!(read(&settings, &input), &input[1..3]);
    }

    #[test]
    fn bounds_past_the_end_are_clamped() {
        let input = argv(&["--config", "file.json"]);
        assert_eq!(read(&Settings::default().stop_index(10), &input), input.as_slice());
        assert!(read(&Settings::default().start_index(5), &input).is_empty());
    }
}
