//! Subtitle Generator: wraps a transcript into timed SRT or WebVTT cues.

use crate::flavor::FlavorSource;
use crate::report::ReportWriter;
use crate::tool::{Tool, chosen, chosen_many, join_labels, leading_number, yes_no};
use tf_core::catalog::{CatalogEntry, OptionCatalog};
use tf_core::form::FormState;
use tf_core::schema::{Category, FieldSpec, ToolSchema};
use tf_core::table::{KeyedTable, LookupTable};

pub static CONTENT_TYPE: OptionCatalog = OptionCatalog::new(
    "content_type",
    &[
        CatalogEntry::new("tutorial", "Tutorial", "Step-by-step instructional video"),
        CatalogEntry::new("interview", "Interview", "Two or more speakers in conversation"),
        CatalogEntry::new("vlog", "Vlog", "Personal video diary"),
        CatalogEntry::new("documentary", "Documentary", "Narrated factual film"),
        CatalogEntry::new("webinar", "Webinar", "Presentation with slides"),
    ],
    "tutorial",
);

pub static LANGUAGE: OptionCatalog = OptionCatalog::new(
    "subtitle_language",
    &[
        CatalogEntry::new("en", "English", "English captions"),
        CatalogEntry::new("es", "Spanish", "Spanish captions"),
        CatalogEntry::new("fr", "French", "French captions"),
        CatalogEntry::new("de", "German", "German captions"),
        CatalogEntry::new("pt", "Portuguese", "Portuguese captions"),
    ],
    "en",
);

pub static FORMAT: OptionCatalog = OptionCatalog::new(
    "subtitle_format",
    &[
        CatalogEntry::new("srt", "SubRip (.srt)", "Widest player support"),
        CatalogEntry::new("vtt", "WebVTT (.vtt)", "HTML5 video track format"),
    ],
    "srt",
);

pub static MAX_CHARS: OptionCatalog = OptionCatalog::new(
    "max_chars_per_line",
    &[
        CatalogEntry::new("32", "32 characters", "Mobile and vertical video"),
        CatalogEntry::new("42", "42 characters", "Broadcast standard"),
        CatalogEntry::new("50", "50 characters", "Desktop and widescreen"),
    ],
    "42",
);

pub static READING_SPEED: OptionCatalog = OptionCatalog::new(
    "reading_speed",
    &[
        CatalogEntry::new("slow", "Slow (12 cps)", "Children and language learners"),
        CatalogEntry::new("normal", "Normal (15 cps)", "General audiences"),
        CatalogEntry::new("fast", "Fast (20 cps)", "Experienced readers"),
    ],
    "normal",
);

pub static FEATURES: OptionCatalog = OptionCatalog::new(
    "subtitle_features",
    &[
        CatalogEntry::new("sound-effects", "Sound Effect Tags", "[music], [applause] and similar"),
        CatalogEntry::new("auto-punctuation", "Auto Punctuation", "Restore sentence punctuation"),
        CatalogEntry::new("profanity-filter", "Profanity Filter", "Mask offensive words"),
        CatalogEntry::new("translation", "Translation Track", "Second language track"),
    ],
    "auto-punctuation",
);

pub static SCHEMA: ToolSchema = ToolSchema {
    id: "subtitle-generator",
    title: "AI Subtitle Generator",
    description: "Turn a transcript into perfectly timed subtitles in SRT or WebVTT.",
    category: Category::Media,
    latency_ms: 3500,
    fields: &[
        FieldSpec::text("transcript", "Transcript", "Paste the spoken text of your video"),
        FieldSpec::choice("contentType", "Content type", &CONTENT_TYPE),
        FieldSpec::choice("language", "Language", &LANGUAGE),
        FieldSpec::choice("format", "Subtitle format", &FORMAT),
        FieldSpec::choice("maxCharsPerLine", "Max characters per line", &MAX_CHARS),
        FieldSpec::choice("readingSpeed", "Reading speed", &READING_SPEED),
        FieldSpec::toggle("speakerLabels", "Speaker labels", false),
        FieldSpec::multi(
            "features",
            "Features",
            &FEATURES,
            &["auto-punctuation"],
        ),
    ],
};

/// Transcript used when none is pasted.
pub const SAMPLE_TRANSCRIPT: KeyedTable<&str> = LookupTable::new(
    "subtitle_sample_transcript",
    &[
        (
            "interview",
            "Thanks for joining us today. It's a pleasure to be here. Let's start with how the project began. It started as a weekend experiment that slowly took over my evenings.",
        ),
        (
            "vlog",
            "Good morning everyone and welcome back to the channel. Today we're exploring the old town market before the crowds arrive.",
        ),
        (
            "documentary",
            "Beneath the surface of the northern sea lies a forest of kelp that shelters thousands of species through the long winter.",
        ),
        (
            "webinar",
            "Welcome to today's session. Over the next forty minutes we'll cover the roadmap, the new pricing model and your questions.",
        ),
    ],
    "Hi everyone, in this tutorial we'll set up the project from scratch. First, open your terminal and create a new folder. Then install the dependencies and run the development server.",
);

/// Characters per second.
const CPS: KeyedTable<f64> =
    LookupTable::new("subtitle_cps", &[("slow", 12.0), ("fast", 20.0)], 15.0);

const LINES_PER_CUE: usize = 2;
const MIN_CUE_MS: u64 = 1000;
const GAP_MS: u64 = 120;

pub struct SubtitleGenerator;

impl Tool for SubtitleGenerator {
    fn schema(&self) -> &'static ToolSchema {
        &SCHEMA
    }

    fn render(&self, form: &FormState, flavor: &mut dyn FlavorSource) -> String {
        let content = chosen(form, "contentType", &CONTENT_TYPE);
        let language = chosen(form, "language", &LANGUAGE);
        let format = chosen(form, "format", &FORMAT);
        let max_chars = leading_number(chosen(form, "maxCharsPerLine", &MAX_CHARS), 42);
        let speed = chosen(form, "readingSpeed", &READING_SPEED);
        let features = chosen_many(form, "features", &FEATURES, &["auto-punctuation"]);
        let speakers = form.flag("speakerLabels");
        let vtt = format.id == "vtt";

        let typed = form.text("transcript").trim();
        let (transcript, is_sample) = if typed.is_empty() {
            (*SAMPLE_TRANSCRIPT.get(content.id), true)
        } else {
            (typed, false)
        };

        let lines = wrap(transcript, max_chars);
        let cues = time_cues(&lines, *CPS.get(speed.id));

        let mut body = String::new();
        if vtt {
            body.push_str("WEBVTT\n\n");
        }
        for (i, cue) in cues.iter().enumerate() {
            if !vtt || speakers {
                body.push_str(&format!("{}\n", i + 1));
            }
            body.push_str(&format!(
                "{} --> {}\n",
                timestamp(cue.start_ms, vtt),
                timestamp(cue.end_ms, vtt)
            ));
            for (n, line) in cue.lines.iter().enumerate() {
                if speakers && n == 0 {
                    body.push_str(&format!("{}: ", speaker_for(content.id, i)));
                }
                body.push_str(line);
                body.push('\n');
            }
            body.push('\n');
        }

        let total_ms = cues.last().map_or(0, |c| c.end_ms);
        let longest = lines.iter().map(|l| l.chars().count()).max().unwrap_or(0);

        let mut w = ReportWriter::new();
        w.title(&format!("Subtitles: {}", content.label))
            .field("Language", language.label)
            .field("Format", format.label)
            .field("Max Characters per Line", max_chars)
            .field("Reading Speed", speed.label)
            .field("Speaker Labels", yes_no(speakers))
            .field("Features", join_labels(&features));
        if is_sample {
            w.paragraph("_No transcript provided, using a sample transcript for this content type._");
        }

        w.heading("Subtitle File")
            .code_block(format.id, &body);

        w.heading("Statistics")
            .field("Cues", cues.len())
            .field("Lines", lines.len())
            .field("Longest Line", format!("{} characters", longest))
            .field("Total Duration", timestamp(total_ms, vtt))
            .field("Sync Accuracy", format!("{}%", flavor.percent(94, 99)));

        w.heading("Delivery Notes");
        for feature in &features {
            w.bullet(format!("{}: {}", feature.label, feature.description));
        }
        w.bullet(format!(
            "Save as `captions.{}` and upload it next to your video.",
            format.id
        ));

        w.finish()
    }
}

#[derive(Debug)]
struct Cue {
    start_ms: u64,
    end_ms: u64,
    lines: Vec<String>,
}

/// Greedy word wrap. A word longer than `max` is split on character boundaries.
fn wrap(text: &str, max: usize) -> Vec<String> {
    let max = max.max(1);
    let mut lines = Vec::new();
    let mut current = String::new();
    for word in text.split_whitespace() {
        let mut word: String = word.to_string();
        while word.chars().count() > max {
            if !current.is_empty() {
                lines.push(std::mem::take(&mut current));
            }
            let head: String = word.chars().take(max).collect();
            word = word.chars().skip(max).collect();
            lines.push(head);
        }
        if word.is_empty() {
            continue;
        }
        let needed = if current.is_empty() {
            word.chars().count()
        } else {
            current.chars().count() + 1 + word.chars().count()
        };
        if needed > max {
            lines.push(std::mem::take(&mut current));
        }
        if !current.is_empty() {
            current.push(' ');
        }
        current.push_str(&word);
    }
    if !current.is_empty() {
        lines.push(current);
    }
    lines
}

fn time_cues(lines: &[String], cps: f64) -> Vec<Cue> {
    let mut cues = Vec::new();
    let mut clock = 0u64;
    for chunk in lines.chunks(LINES_PER_CUE) {
        let chars: usize = chunk.iter().map(|l| l.chars().count()).sum();
        let duration = ((chars as f64 / cps) * 1000.0).round() as u64;
        let duration = duration.max(MIN_CUE_MS);
        cues.push(Cue {
            start_ms: clock,
            end_ms: clock + duration,
            lines: chunk.to_vec(),
        });
        clock += duration + GAP_MS;
    }
    cues
}

/// `HH:MM:SS,mmm` for SRT, `HH:MM:SS.mmm` for WebVTT.
fn timestamp(ms: u64, vtt: bool) -> String {
    let sep = if vtt { '.' } else { ',' };
    format!(
        "{:02}:{:02}:{:02}{}{:03}",
        ms / 3_600_000,
        (ms / 60_000) % 60,
        (ms / 1000) % 60,
        sep,
        ms % 1000
    )
}

fn speaker_for(content: &str, cue: usize) -> &'static str {
    match content {
        "interview" if cue % 2 == 0 => "HOST",
        "interview" => "GUEST",
        "documentary" => "NARRATOR",
        "webinar" => "PRESENTER",
        _ => "SPEAKER",
    }
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::flavor::FixedFlavor;

    #[test]
    fn test_wrap_respects_max_chars() {
        let text = SAMPLE_TRANSCRIPT.default;
        for max in [32, 42, 50] {
            let lines = wrap(text, max);
            assert!(!lines.is_empty());
            assert!(lines.iter().all(|l| l.chars().count() <= max), "max {max}");
            assert_eq!(lines.join(" "), text.split_whitespace().collect::<Vec<_>>().join(" "));
        }
    }

    #[test]
    fn test_wrap_splits_long_words() {
        let lines = wrap("a supercalifragilistic b", 8);
        assert!(lines.iter().all(|l| l.chars().count() <= 8));
        assert_eq!(lines.concat().replace(' ', ""), "asupercalifragilisticb");
    }

    #[test]
    fn test_timestamp_formats() {
        assert_eq!(timestamp(1500, false), "00:00:01,500");
        assert_eq!(timestamp(1500, true), "00:00:01.500");
        assert_eq!(timestamp(3_723_004, false), "01:02:03,004");
    }

    #[test]
    fn test_cues_are_sequential() {
        let lines = wrap(SAMPLE_TRANSCRIPT.default, 32);
        let cues = time_cues(&lines, 15.0);
        assert_eq!(cues.len(), lines.len().div_ceil(LINES_PER_CUE));
        for pair in cues.windows(2) {
            assert!(pair[0].end_ms < pair[1].start_ms);
        }
        assert!(cues.iter().all(|c| c.end_ms - c.start_ms >= MIN_CUE_MS));
    }

    #[test]
    fn test_srt_and_vtt_output() {
        let mut form = SCHEMA.initial_state();
        let srt = SubtitleGenerator.render(&form, &mut FixedFlavor);
        assert!(srt.contains("```srt\n1\n00:00:00,000 --> "));
        assert!(srt.contains("using a sample transcript"));

        form.set_field("format", "vtt").unwrap();
        form.set_field("transcript", "Hello there.").unwrap();
        let vtt = SubtitleGenerator.render(&form, &mut FixedFlavor);
        assert!(vtt.contains("```vtt\nWEBVTT\n\n00:00:00.000 --> 00:00:01.000\nHello there.\n"));
    }

    #[test]
    fn test_speaker_labels_alternate_for_interviews() {
        let mut form = SCHEMA.initial_state();
        form.set_field("contentType", "interview").unwrap();
        form.set_field("speakerLabels", true).unwrap();
        let out = SubtitleGenerator.render(&form, &mut FixedFlavor);
        assert!(out.contains("HOST: "));
        assert!(out.contains("GUEST: "));
    }
}
