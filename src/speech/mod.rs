//! Text-to-speech seam.
//!
//! Audio output and voice enumeration belong to the host environment. The crate only decides
//! *what* to say, at which volume and with which voice, and hands that to a
//! [`SpeechSynthesizer`].

use std::fs::File;
use std::io::BufReader;
use std::path::Path;

use crate::assets::volume::SliderValue;
use crate::foundation::error::{MemeError, MemeResult};
use crate::session::state::CaptionPair;

/// One voice offered by the synthesis capability.
#[derive(Clone, Debug, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct Voice {
    pub name: String,
    /// BCP 47 language tag, e.g. `en-US`.
    pub lang: String,
    #[serde(default)]
    pub is_default: bool,
}

impl Voice {
    pub fn new(name: impl Into<String>, lang: impl Into<String>) -> Self {
        Self {
            name: name.into(),
            lang: lang.into(),
            is_default: false,
        }
    }

    pub fn default_voice(mut self) -> Self {
        self.is_default = true;
        self
    }

    /// Read a JSON array of voices, e.g. `[{"name": "Alex", "lang": "en-US", "is_default": true}]`.
    pub fn list_from_reader<R: std::io::Read>(r: R) -> MemeResult<Vec<Self>> {
        serde_json::from_reader(r).map_err(|e| MemeError::serde(format!("parse voices JSON: {e}")))
    }

    pub fn list_from_path(path: impl AsRef<Path>) -> MemeResult<Vec<Self>> {
        let path = path.as_ref();
        let f = File::open(path).map_err(|e| {
            MemeError::validation(format!("open voices JSON '{}': {e}", path.display()))
        })?;
        Self::list_from_reader(BufReader::new(f))
    }

    /// Label shown in the voice picker, e.g. `Alex (en-US) -- DEFAULT`.
    pub fn label(&self) -> String {
        let mut out = format!("{} ({})", self.name, self.lang);
        if self.is_default {
            out.push_str(" -- DEFAULT");
        }
        out
    }
}

/// Voices enumerated once from the synthesizer, in the order it reported them.
#[derive(Clone, Debug, Default, PartialEq, Eq)]
pub struct VoiceList {
    voices: Vec<Voice>,
}

impl VoiceList {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self { voices }
    }

    /// Populate from a synthesizer. A missing synthesizer yields an empty list.
    pub fn populate(synth: Option<&dyn SpeechSynthesizer>) -> Self {
        match synth {
            Some(s) => Self::new(s.voices()),
            None => Self::default(),
        }
    }

    pub fn voices(&self) -> &[Voice] {
        &self.voices
    }

    pub fn labels(&self) -> Vec<String> {
        self.voices.iter().map(Voice::label).collect()
    }

    pub fn is_empty(&self) -> bool {
        self.voices.is_empty()
    }

    /// Name lookup. When several voices share a name the last one wins.
    pub fn find(&self, name: &str) -> Option<&Voice> {
        self.voices.iter().rev().find(|v| v.name == name)
    }

    /// Name the picker starts on: the default voice, else the first one.
    pub fn initial_selection(&self) -> Option<&str> {
        self.voices
            .iter()
            .find(|v| v.is_default)
            .or_else(|| self.voices.first())
            .map(|v| v.name.as_str())
    }
}

/// A single request to speak.
#[derive(Clone, Debug, PartialEq)]
pub struct Utterance {
    pub text: String,
    /// Output volume in `[0, 1]`.
    pub volume: f32,
    /// `None` lets the synthesizer use its default voice.
    pub voice: Option<Voice>,
}

/// External speech synthesis capability.
pub trait SpeechSynthesizer {
    /// Available voices.
    fn voices(&self) -> Vec<Voice>;
    /// Queue one utterance for playback.
    fn speak(&mut self, utterance: Utterance) -> MemeResult<()>;
}

/// Read both captions aloud as two utterances, top first, using the raw (not upper-cased) text.
pub fn read_aloud(
    captions: &CaptionPair,
    volume: SliderValue,
    selected_voice: Option<&str>,
    voices: &VoiceList,
    synth: &mut dyn SpeechSynthesizer,
) -> MemeResult<()> {
    let voice = selected_voice.and_then(|name| voices.find(name)).cloned();
    for text in [&captions.top, &captions.bottom] {
        synth.speak(Utterance {
            text: text.clone(),
            volume: volume.normalized(),
            voice: voice.clone(),
        })?;
    }
    Ok(())
}

/// In-memory synthesizer for tests and embedding.
#[derive(Debug, Default)]
pub struct RecordingSynthesizer {
    voices: Vec<Voice>,
    spoken: Vec<Utterance>,
}

impl RecordingSynthesizer {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self {
            voices,
            spoken: Vec::new(),
        }
    }

    /// Utterances in the order they were requested.
    pub fn spoken(&self) -> &[Utterance] {
        &self.spoken
    }
}

impl SpeechSynthesizer for RecordingSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: Utterance) -> MemeResult<()> {
        self.spoken.push(utterance);
        Ok(())
    }
}

/// Synthesizer that only logs what it would say. Used by the CLI, which has no audio device.
#[derive(Debug, Default)]
pub struct TracingSynthesizer {
    voices: Vec<Voice>,
}

impl TracingSynthesizer {
    pub fn new(voices: Vec<Voice>) -> Self {
        Self { voices }
    }
}

impl SpeechSynthesizer for TracingSynthesizer {
    fn voices(&self) -> Vec<Voice> {
        self.voices.clone()
    }

    fn speak(&mut self, utterance: Utterance) -> MemeResult<()> {
        tracing::info!(
            text = %utterance.text,
            volume = utterance.volume,
            voice = utterance.voice.as_ref().map(|v| v.name.as_str()).unwrap_or("<default>"),
            "speak"
        );
        Ok(())
    }
}

#[cfg(test)]
#[path = "../../tests/unit/speech/mod.rs"]
mod tests;
