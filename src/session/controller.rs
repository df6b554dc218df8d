use std::collections::VecDeque;

use crate::assets::decode::{SourceImage, decode_image};
use crate::assets::volume::{SliderValue, VolumeLevel};
use crate::config::MemeConfig;
use crate::foundation::error::{MemeError, MemeResult};
use crate::layout::fit::FitResult;
use crate::render::pipeline::{RenderPipeline, resolve_caption_font};
use crate::render::surface::CanvasSurface;
use crate::render::text::CaptionFont;
use crate::session::state::{Effect, Event, UiState, next_state};
use crate::speech::{SpeechSynthesizer, VoiceList, read_aloud};

/// The meme page as one object: canvas, current image, control state, volume and voices.
///
/// Created once and fed [`Event`]s through [`MemeSession::dispatch`]. Events are queued and
/// handled one at a time in arrival order; image decoding enqueues its own completion event.
/// Failures inside the event flow are logged and otherwise ignored.
pub struct MemeSession<S> {
    config: MemeConfig,
    surface: CanvasSurface,
    pipeline: RenderPipeline,
    state: UiState,
    image: Option<SourceImage>,
    last_fit: Option<FitResult>,
    volume: SliderValue,
    voices: VoiceList,
    selected_voice: Option<String>,
    synth: Option<S>,
    queue: VecDeque<Event>,
}

impl<S: SpeechSynthesizer> MemeSession<S> {
    /// Build a session, resolving the caption font from the configuration.
    pub fn new(config: MemeConfig, synth: Option<S>) -> MemeResult<Self> {
        config.validate()?;
        let font = match resolve_caption_font(&config.caption) {
            Ok(font) => Some(font),
            Err(err) => {
                tracing::warn!(error = %err, "no caption font; captions will not be drawn");
                None
            }
        };
        Self::with_font(config, font, synth)
    }

    /// Build a session with an explicit caption font (or none).
    pub fn with_font(
        config: MemeConfig,
        font: Option<CaptionFont>,
        synth: Option<S>,
    ) -> MemeResult<Self> {
        config.validate()?;
        let surface = CanvasSurface::new(config.canvas)?;
        let pipeline = RenderPipeline::new(&config, font.as_ref());
        let voices = VoiceList::populate(synth.as_ref().map(|s| s as &dyn SpeechSynthesizer));
        let selected_voice = voices.initial_selection().map(str::to_owned);
        tracing::debug!(
            canvas = ?config.canvas,
            voices = voices.voices().len(),
            captions = pipeline.has_text(),
            "session created"
        );

        Ok(Self {
            config,
            surface,
            pipeline,
            state: UiState::default(),
            image: None,
            last_fit: None,
            volume: SliderValue::default(),
            voices,
            selected_voice,
            synth,
            queue: VecDeque::new(),
        })
    }

    /// Queue `event` and process the queue until it is empty.
    pub fn dispatch(&mut self, event: Event) {
        self.queue.push_back(event);
        while let Some(next) = self.queue.pop_front() {
            self.handle(next);
        }
    }

    fn handle(&mut self, event: Event) {
        let transition = next_state(&self.state, &event);
        if transition.effects.is_empty() {
            tracing::debug!(event = event.name(), mode = ?self.state.mode, "event ignored");
            return;
        }
        tracing::debug!(
            event = event.name(),
            from = ?self.state.mode,
            to = ?transition.state.mode,
            effects = ?transition.effects,
            "transition"
        );
        self.state = transition.state;

        for effect in transition.effects {
            if let Err(err) = self.run_effect(effect, &event) {
                tracing::warn!(event = event.name(), ?effect, error = %err, "effect failed");
            }
        }
    }

    fn run_effect(&mut self, effect: Effect, event: &Event) -> MemeResult<()> {
        match (effect, event) {
            (Effect::DecodeSource, Event::ImageSelected(source)) => {
                // A source that fails to decode never reports completion.
                let decoded = match source {
                    Some(src) => match decode_image(&src.bytes) {
                        Ok(image) => Some(image),
                        Err(err) => {
                            tracing::warn!(source = %src.name, error = %err, "image decode failed");
                            return Ok(());
                        }
                    },
                    None => None,
                };
                self.queue.push_back(Event::ImageDecoded(decoded));
                Ok(())
            }
            (Effect::PaintBackground, Event::ImageDecoded(image)) => {
                self.image = image.clone();
                self.last_fit = None;
                self.pipeline.paint_background(&mut self.surface)
            }
            (Effect::DrawImage, _) => {
                let Some(image) = self.image.as_ref() else {
                    return Ok(());
                };
                let fit = self.pipeline.draw_image(&mut self.surface, image)?;
                self.last_fit = Some(fit);
                Ok(())
            }
            (Effect::DrawCaptions, Event::FormSubmitted(captions)) => {
                self.pipeline.draw_captions(&mut self.surface, captions)
            }
            (Effect::ClearCanvas, _) => {
                self.pipeline.clear(&mut self.surface);
                Ok(())
            }
            (Effect::Speak, Event::ReadClicked(captions)) => {
                let Some(synth) = self.synth.as_mut() else {
                    return Err(MemeError::validation("speech synthesis unavailable"));
                };
                read_aloud(
                    captions,
                    self.volume,
                    self.selected_voice.as_deref(),
                    &self.voices,
                    synth,
                )
            }
            (Effect::SetVolume, Event::VolumeChanged(value)) => {
                self.volume = *value;
                tracing::debug!(
                    volume = value.get(),
                    icon = %value.level().icon_path(),
                    "volume changed"
                );
                Ok(())
            }
            (Effect::SelectVoice, Event::VoiceSelected(name)) => {
                if self.voices.find(name).is_none() {
                    tracing::debug!(voice = %name, "selected voice not in list; default will be used");
                }
                self.selected_voice = Some(name.clone());
                Ok(())
            }
            (effect, event) => Err(MemeError::validation(format!(
                "effect {effect:?} does not apply to event {}",
                event.name()
            ))),
        }
    }

    /// Configuration the session was built with.
    pub fn config(&self) -> &MemeConfig {
        &self.config
    }

    /// Current mode and control flags.
    pub fn state(&self) -> UiState {
        self.state
    }

    /// The canvas as drawn so far.
    pub fn surface(&self) -> &CanvasSurface {
        &self.surface
    }

    /// The last decoded image. Clearing the canvas keeps it; an empty selection drops it.
    pub fn image(&self) -> Option<&SourceImage> {
        self.image.as_ref()
    }

    /// Destination rectangle of the image currently drawn, if any.
    pub fn last_fit(&self) -> Option<FitResult> {
        self.last_fit
    }

    /// Last slider value; starts at 100.
    pub fn volume(&self) -> SliderValue {
        self.volume
    }

    /// Icon level for the current slider value.
    pub fn volume_icon(&self) -> VolumeLevel {
        self.volume.level()
    }

    /// Voices enumerated from the synthesizer at construction.
    pub fn voices(&self) -> &VoiceList {
        &self.voices
    }

    /// Name picked in the voice selector, which may not match any listed voice.
    pub fn selected_voice(&self) -> Option<&str> {
        self.selected_voice.as_deref()
    }

    /// The speech backend, if one was supplied.
    pub fn synthesizer(&self) -> Option<&S> {
        self.synth.as_ref()
    }

    /// Whether a caption font was resolved.
    pub fn can_draw_captions(&self) -> bool {
        self.pipeline.has_text()
    }
}

#[cfg(test)]
#[path = "../../tests/unit/session/controller.rs"]
mod tests;
