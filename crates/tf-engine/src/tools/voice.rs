//! Voice Synthesizer: narration script, SSML preview and audio metadata.

use crate::flavor::FlavorSource;
use crate::report::ReportWriter;
use crate::tool::{Tool, chosen, chosen_many, join_labels, yes_no};
use tf_core::catalog::{CatalogEntry, OptionCatalog};
use tf_core::form::FormState;
use tf_core::schema::{Category, FieldSpec, ToolSchema};
use tf_core::table::{KeyedTable, LookupTable};

pub static VOICE_STYLE: OptionCatalog = OptionCatalog::new(
    "voice_style",
    &[
        CatalogEntry::new("natural", "Natural", "Everyday conversational delivery"),
        CatalogEntry::new("calm", "Calm", "Slow, soothing and even"),
        CatalogEntry::new("energetic", "Energetic", "Upbeat with lively emphasis"),
        CatalogEntry::new("professional", "Professional", "Clear corporate narration"),
        CatalogEntry::new("storyteller", "Storyteller", "Expressive, character-driven reading"),
    ],
    "natural",
);

pub static LANGUAGE: OptionCatalog = OptionCatalog::new(
    "language",
    &[
        CatalogEntry::new("en-US", "English (US)", "American English"),
        CatalogEntry::new("en-GB", "English (UK)", "British English"),
        CatalogEntry::new("es-ES", "Spanish", "Castilian Spanish"),
        CatalogEntry::new("fr-FR", "French", "Metropolitan French"),
        CatalogEntry::new("de-DE", "German", "Standard German"),
        CatalogEntry::new("ja-JP", "Japanese", "Standard Japanese"),
    ],
    "en-US",
);

pub static SPEED: OptionCatalog = OptionCatalog::new(
    "speed",
    &[
        CatalogEntry::new("slow", "Slow (0.8x)", "For learners and accessibility"),
        CatalogEntry::new("normal", "Normal (1.0x)", "Natural speaking rate"),
        CatalogEntry::new("fast", "Fast (1.25x)", "Quick summaries"),
    ],
    "normal",
);

pub static PITCH: OptionCatalog = OptionCatalog::new(
    "pitch",
    &[
        CatalogEntry::new("low", "Low", "Deeper tone"),
        CatalogEntry::new("medium", "Medium", "Neutral tone"),
        CatalogEntry::new("high", "High", "Brighter tone"),
    ],
    "medium",
);

pub static OUTPUT_FORMAT: OptionCatalog = OptionCatalog::new(
    "output_format",
    &[
        CatalogEntry::new("mp3", "MP3", "Compressed, universal playback"),
        CatalogEntry::new("wav", "WAV", "Uncompressed studio quality"),
        CatalogEntry::new("ogg", "OGG Vorbis", "Open compressed format"),
    ],
    "mp3",
);

pub static EFFECTS: OptionCatalog = OptionCatalog::new(
    "effects",
    &[
        CatalogEntry::new("normalize", "Loudness Normalization", "Target -16 LUFS"),
        CatalogEntry::new("noise-reduction", "Noise Reduction", "Remove background hiss"),
        CatalogEntry::new("reverb", "Room Reverb", "Small room ambience"),
        CatalogEntry::new("echo", "Echo", "Subtle delay tail"),
    ],
    "normalize",
);

pub static SCHEMA: ToolSchema = ToolSchema {
    id: "voice-synthesizer",
    title: "AI Voice Synthesizer",
    description: "Turn text into natural speech with adjustable style, pacing and effects.",
    category: Category::Media,
    latency_ms: 4000,
    fields: &[
        FieldSpec::text("text", "Text to speak", "Type or paste the text to narrate"),
        FieldSpec::choice("voiceStyle", "Voice style", &VOICE_STYLE),
        FieldSpec::choice("language", "Language", &LANGUAGE),
        FieldSpec::choice("speed", "Speed", &SPEED),
        FieldSpec::choice("pitch", "Pitch", &PITCH),
        FieldSpec::choice("outputFormat", "Output format", &OUTPUT_FORMAT),
        FieldSpec::multi("effects", "Audio effects", &EFFECTS, &["normalize"]),
        FieldSpec::toggle("addPauses", "Natural pauses", true),
        FieldSpec::toggle("backgroundMusic", "Background music", false),
    ],
};

/// Narration used when the text field is empty.
pub const SAMPLE_TEXT: KeyedTable<&str> = LookupTable::new(
    "voice_sample_text",
    &[
        (
            "calm",
            "Take a slow, deep breath. Let your shoulders relax, and allow this moment to be exactly as it is.",
        ),
        (
            "energetic",
            "Get ready, because today is the day we turn big ideas into real results. Let's go!",
        ),
        (
            "professional",
            "Welcome to our quarterly update. In the next few minutes we will review performance, priorities and next steps.",
        ),
        (
            "storyteller",
            "Once upon a time, in a village at the edge of a great forest, there lived a clockmaker who never slept.",
        ),
    ],
    "Hello! This is a preview of your synthesized voice. Adjust the style, speed and pitch to find the sound you like.",
);

/// Words per minute for each speed.
const WPM: KeyedTable<u32> = LookupTable::new("voice_wpm", &[("slow", 120), ("fast", 185)], 150);

/// (SSML rate, SSML pitch) attributes.
const PROSODY: KeyedTable<&str> = LookupTable::new(
    "voice_prosody_pitch",
    &[("low", "-10%"), ("high", "+10%")],
    "+0%",
);

const RATE: KeyedTable<&str> = LookupTable::new(
    "voice_prosody_rate",
    &[("slow", "80%"), ("fast", "125%")],
    "100%",
);

/// (bitrate, sample rate, bytes per second)
const ENCODING: KeyedTable<(&str, &str, u64)> = LookupTable::new(
    "voice_encoding",
    &[
        ("wav", ("1411 kbps", "44.1 kHz / 16-bit", 176_400)),
        ("ogg", ("192 kbps", "48 kHz", 24_000)),
    ],
    ("320 kbps", "44.1 kHz", 40_000),
);

pub struct VoiceSynthesizer;

impl Tool for VoiceSynthesizer {
    fn schema(&self) -> &'static ToolSchema {
        &SCHEMA
    }

    fn render(&self, form: &FormState, flavor: &mut dyn FlavorSource) -> String {
        let style = chosen(form, "voiceStyle", &VOICE_STYLE);
        let language = chosen(form, "language", &LANGUAGE);
        let speed = chosen(form, "speed", &SPEED);
        let pitch = chosen(form, "pitch", &PITCH);
        let format = chosen(form, "outputFormat", &OUTPUT_FORMAT);
        let effects = chosen_many(form, "effects", &EFFECTS, &["normalize"]);
        let pauses = form.flag("addPauses");
        let music = form.flag("backgroundMusic");

        let typed = form.text("text").trim();
        let (text, is_sample) = if typed.is_empty() {
            (*SAMPLE_TEXT.get(style.id), true)
        } else {
            (typed, false)
        };

        let words = text.split_whitespace().count();
        let wpm = *WPM.get(speed.id);
        let mut seconds = (words as f64 / f64::from(wpm) * 60.0).ceil() as u64;
        if pauses {
            let sentences = text.matches(['.', '!', '?']).count() as u64;
            seconds += sentences / 2;
        }
        let seconds = seconds.max(1);
        let (bitrate, sample_rate, bytes_per_sec) = *ENCODING.get(format.id);
        let size_kb = (bytes_per_sec * seconds).div_ceil(1024);

        let mut w = ReportWriter::new();
        w.title("Voice Synthesis Result")
            .field("Voice Style", style.label)
            .field("Language", language.label)
            .field("Speed", speed.label)
            .field("Pitch", pitch.label)
            .field("Output Format", format.label);

        w.heading("Narration Script");
        if is_sample {
            w.paragraph("_No text provided, using the sample script for this voice style._");
        }
        w.quote(text);

        w.heading("Audio Details")
            .field("Word Count", words)
            .field("Estimated Duration", format!("{}:{:02}", seconds / 60, seconds % 60))
            .field("Bitrate", bitrate)
            .field("Sample Rate", sample_rate)
            .field("Estimated File Size", format!("{} KB", size_kb))
            .field("Natural Pauses", yes_no(pauses))
            .field("Background Music", yes_no(music));

        let ssml = format!(
            "<speak xml:lang=\"{}\">\n  <prosody rate=\"{}\" pitch=\"{}\">\n    {}\n  </prosody>\n</speak>",
            language.id,
            RATE.get(speed.id),
            PROSODY.get(pitch.id),
            escape_xml(text)
        );
        w.heading("SSML Preview").code_block("xml", &ssml);

        w.heading("Processing Pipeline");
        w.numbered(1, format!("Text normalization ({})", language.label))
            .numbered(2, format!("Prosody modelling: {}", style.description))
            .numbered(3, format!("Post-processing: {}", join_labels(&effects)));
        if music {
            w.numbered(4, "Background music bed mixed at -24 dB");
        }

        w.heading("Quality Metrics")
            .bullet(format!("Naturalness score: {}%", flavor.percent(88, 99)))
            .bullet(format!("Pronunciation accuracy: {}%", flavor.percent(92, 99)))
            .bullet(format!(
                "Rendering time: {} ms",
                flavor.count(800, 2400)
            ));

        w.finish()
    }
}

fn escape_xml(text: &str) -> String {
    let mut out = String::with_capacity(text.len());
    for c in text.chars() {
        match c {
            '&' => out.push_str("&amp;"),
            '<' => out.push_str("&lt;"),
            '>' => out.push_str("&gt;"),
            '"' => out.push_str("&quot;"),
            '\'' => out.push_str("&apos;"),
            _ => out.push(c),
        }
    }
    out
}
