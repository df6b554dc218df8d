//! UI state controller: which controls are enabled, and what each event should do.
//!
//! [`next_state`] is a pure function. It never touches pixels or speech; it returns the
//! [`Effect`]s the session must run for the event.

use crate::assets::decode::{ImageSource, SourceImage};
use crate::assets::volume::SliderValue;

/// Top and bottom caption text exactly as typed.
#[derive(Clone, Debug, Default, PartialEq, Eq, serde::Serialize, serde::Deserialize)]
pub struct CaptionPair {
    pub top: String,
    pub bottom: String,
}

impl CaptionPair {
    pub fn new(top: impl Into<String>, bottom: impl Into<String>) -> Self {
        Self {
            top: top.into(),
            bottom: bottom.into(),
        }
    }

    /// Both captions upper-cased for drawing.
    pub fn upper(&self) -> Self {
        Self {
            top: self.top.to_uppercase(),
            bottom: self.bottom.to_uppercase(),
        }
    }
}

/// Lifecycle position of the page.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub enum UiMode {
    /// Nothing loaded, or just cleared.
    #[default]
    Empty,
    /// An image is drawn, no captions yet.
    ImageLoaded,
    /// Captions have been drawn over the image.
    MemeGenerated,
}

/// Enabled flags of the four stateful controls.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash, serde::Serialize)]
pub struct Controls {
    /// "Generate" form submit button.
    pub submit: bool,
    /// "Clear" button.
    pub reset: bool,
    /// "Read text" button.
    pub read: bool,
    /// Voice picker.
    pub voice_select: bool,
}

impl Controls {
    /// Configuration on page load and after clearing.
    pub const INITIAL: Self = Self {
        submit: true,
        reset: false,
        read: false,
        voice_select: false,
    };

    /// Configuration right after captions are drawn.
    pub const GENERATED: Self = Self {
        submit: false,
        reset: true,
        read: true,
        voice_select: true,
    };
}

impl Default for Controls {
    fn default() -> Self {
        Self::INITIAL
    }
}

/// Complete controller state.
///
/// `controls` is not derived from `mode`: loading an image only enables `reset` and leaves the
/// other flags as the previous cycle left them.
#[derive(Clone, Copy, Debug, Default, PartialEq, Eq, Hash, serde::Serialize)]
pub struct UiState {
    pub mode: UiMode,
    pub controls: Controls,
}

/// A single user action or environment notification.
#[derive(Clone, Debug, PartialEq)]
pub enum Event {
    /// A file was picked (`Some`) or the selection was cleared (`None`).
    ImageSelected(Option<ImageSource>),
    /// Decoding of the last selection finished. `None` means the source is empty.
    ImageDecoded(Option<SourceImage>),
    /// The caption form was submitted.
    FormSubmitted(CaptionPair),
    /// The clear button was clicked.
    ResetClicked,
    /// The read-aloud button was clicked, with the current field values.
    ReadClicked(CaptionPair),
    /// The volume slider moved.
    VolumeChanged(SliderValue),
    /// A voice was picked by name.
    VoiceSelected(String),
}

impl Event {
    pub fn name(&self) -> &'static str {
        match self {
            Self::ImageSelected(_) => "image_selected",
            Self::ImageDecoded(_) => "image_decoded",
            Self::FormSubmitted(_) => "form_submitted",
            Self::ResetClicked => "reset_clicked",
            Self::ReadClicked(_) => "read_clicked",
            Self::VolumeChanged(_) => "volume_changed",
            Self::VoiceSelected(_) => "voice_selected",
        }
    }
}

/// Work the session performs in response to an event, in order.
#[derive(Clone, Copy, Debug, PartialEq, Eq, Hash)]
pub enum Effect {
    /// Decode the selected source and enqueue [`Event::ImageDecoded`].
    DecodeSource,
    /// Clear the canvas and fill the opaque background.
    PaintBackground,
    /// Draw the current image into its fit rectangle.
    DrawImage,
    /// Draw the event's captions upper-cased.
    DrawCaptions,
    /// Clear all canvas pixels without repainting the background.
    ClearCanvas,
    /// Read the event's captions aloud.
    Speak,
    /// Store the slider value and refresh the volume icon.
    SetVolume,
    /// Store the picked voice name.
    SelectVoice,
}

/// Result of [`next_state`].
#[derive(Clone, Debug, PartialEq, Eq)]
pub struct Transition {
    pub state: UiState,
    pub effects: Vec<Effect>,
}

impl Transition {
    fn ignored(state: UiState) -> Self {
        Self {
            state,
            effects: Vec::new(),
        }
    }
}

/// Compute the state after `event` and the effects to run.
///
/// Events aimed at a disabled control are ignored.
pub fn next_state(current: &UiState, event: &Event) -> Transition {
    let mut state = *current;
    let effects = match event {
        Event::ImageSelected(_) => vec![Effect::DecodeSource],
        Event::ImageDecoded(Some(_)) => {
            state.mode = UiMode::ImageLoaded;
            state.controls.reset = true;
            vec![Effect::PaintBackground, Effect::DrawImage]
        }
        Event::ImageDecoded(None) => {
            state.mode = UiMode::Empty;
            state.controls.reset = false;
            vec![Effect::PaintBackground]
        }
        Event::FormSubmitted(_) => {
            if !current.controls.submit {
                return Transition::ignored(state);
            }
            state.mode = UiMode::MemeGenerated;
            state.controls = Controls::GENERATED;
            vec![Effect::DrawCaptions]
        }
        Event::ResetClicked => {
            if !current.controls.reset {
                return Transition::ignored(state);
            }
            state = UiState::default();
            vec![Effect::ClearCanvas]
        }
        Event::ReadClicked(_) => {
            if !current.controls.read {
                return Transition::ignored(state);
            }
            vec![Effect::Speak]
        }
        Event::VolumeChanged(_) => vec![Effect::SetVolume],
        Event::VoiceSelected(_) => {
            if !current.controls.voice_select {
                return Transition::ignored(state);
            }
            vec![Effect::SelectVoice]
        }
    };
    Transition { state, effects }
}

#[cfg(test)]
#[path = "../../tests/unit/session/state.rs"]
mod tests;
