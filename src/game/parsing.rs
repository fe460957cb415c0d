use crate::game::chart::{Chart, NoteColor};
use log::{debug, info};
use std::fs;
use std::path::Path;

const SECTION_HEADER: &str = "[ExpertSingle]";
const SECTION_FOOTER: &str = "}";

/// Reads and parses a `.chart` file. An unreadable file is fatal for the
/// play session: the caller gets an error and no notes will ever spawn.
pub fn load_chart_file(path: &Path) -> Result<Chart, String> {
    let contents = fs::read_to_string(path)
        .map_err(|e| format!("failed to read chart file {}: {e}", path.display()))?;
    let chart = parse_chart_str(&contents);
    info!(
        "loaded chart {}: {} notes, last frame {}",
        path.display(),
        chart.total_notes(),
        chart.song_length
    );
    Ok(chart)
}

/// Parses chart text. Only lines inside the `[ExpertSingle]` section count;
/// a well-formed line is `<frame> = N <noteType> <sustain>`. Malformed
/// lines are skipped, never fatal.
pub fn parse_chart_str(contents: &str) -> Chart {
    let mut chart = Chart::default();
    let mut in_section = false;

    for raw_line in contents.lines() {
        let line = raw_line.trim();

        if line == SECTION_HEADER {
            in_section = true;
            continue;
        }
        if in_section && line == SECTION_FOOTER {
            in_section = false;
            continue;
        }
        if !in_section {
            continue;
        }

        // Exactly one '=' splits frame from note data.
        let parts: Vec<&str> = line.split('=').collect();
        if parts.len() != 2 {
            continue;
        }
        let Ok(frame) = parts[0].trim().parse::<u32>() else {
            debug!("skipping chart line with bad frame: {line:?}");
            continue;
        };

        // Every line with a parseable frame counts toward song length,
        // even when it contributes no note.
        chart.song_length = chart.song_length.max(frame);

        let tokens: Vec<&str> = parts[1].split_whitespace().collect();
        if tokens.len() < 3 || tokens[0] != "N" {
            debug!("skipping malformed note data at frame {frame}: {line:?}");
            continue;
        }
        let Ok(code) = tokens[1].parse::<u32>() else {
            debug!("skipping note with bad type token at frame {frame}: {line:?}");
            continue;
        };

        match NoteColor::from_note_type(code) {
            Some(color) => chart.frames.entry(frame).or_default().push(color),
            None => debug!("dropping unknown note type {code} at frame {frame}"),
        }
    }

    chart
}

#[cfg(test)]
mod tests {
    use super::{load_chart_file, parse_chart_str};
    use crate::game::chart::NoteColor;
    use std::path::Path;

    fn in_expert_single(body: &str) -> String {
        format!("[ExpertSingle]\n{{\n{body}\n}}\n")
    }

    #[test]
    fn parses_frames_and_colors_in_order() {
        let chart = parse_chart_str(&in_expert_single("192 = N 0 0\n384 = N 2 0"));
        assert_eq!(chart.frames[&192], vec![NoteColor::Red]);
        assert_eq!(chart.frames[&384], vec![NoteColor::Green]);
        assert!(chart.song_length >= 384, "song length must cover the last frame");
    }

    #[test]
    fn preserves_per_frame_insertion_order() {
        let chart = parse_chart_str(&in_expert_single("96 = N 3 0\n96 = N 1 0"));
        assert_eq!(chart.frames[&96], vec![NoteColor::Blue, NoteColor::Yellow]);
    }

    #[test]
    fn ignores_lines_outside_the_section() {
        let contents = "0 = N 0 0\n[Song]\n{\n0 = N 1 0\n}\n[ExpertSingle]\n{\n48 = N 2 0\n}\n96 = N 3 0\n";
        let chart = parse_chart_str(contents);
        assert_eq!(chart.total_notes(), 1);
        assert_eq!(chart.frames[&48], vec![NoteColor::Green]);
        assert_eq!(chart.song_length, 48);
    }

    #[test]
    fn skips_malformed_lines() {
        let chart = parse_chart_str(&in_expert_single(
            "not a line\n12 = 34 = N 0 0\nx = N 0 0\n192 = N 0\n384 = S 1 0\n480 = N 1 0",
        ));
        assert_eq!(chart.total_notes(), 1);
        assert_eq!(chart.frames[&480], vec![NoteColor::Yellow]);
    }

    #[test]
    fn unknown_note_type_drops_note_but_tracks_length() {
        let chart = parse_chart_str(&in_expert_single("100 = N 2 0\n960 = N 7 0"));
        assert_eq!(chart.total_notes(), 1);
        assert_eq!(chart.song_length, 960);
    }

    #[test]
    fn short_note_data_still_tracks_length() {
        let chart = parse_chart_str(&in_expert_single("768 = N 0"));
        assert_eq!(chart.total_notes(), 0);
        assert_eq!(chart.song_length, 768);
    }

    #[test]
    fn missing_file_is_an_error() {
        let err = load_chart_file(Path::new("does/not/exist.chart"));
        assert!(err.is_err());
    }
}
