//! memeforge captions an image meme-style on a fixed-size canvas.
//!
//! A [`MemeSession`] owns everything the classic meme page kept in globals: the canvas, the
//! current image, which controls are enabled, the volume slider and the voice picker. Hosts feed
//! it [`Event`]s; it runs them through the pure [`next_state`] controller and executes the
//! resulting effects.
//!
//! # Pipeline overview
//!
//! 1. **Select**: `Event::ImageSelected` carries the encoded file bytes
//! 2. **Decode**: the session decodes and enqueues `Event::ImageDecoded`
//! 3. **Fit**: [`fit`] scales the image to fill one canvas axis and centers it on the other
//! 4. **Draw**: background, image and upper-cased captions land on a [`CanvasSurface`]
//! 5. **Speak** (optional): captions go to a [`SpeechSynthesizer`] at the slider volume
//!
//! Design constraints:
//!
//! - **No unsafe**: `unsafe` is forbidden in this crate.
//! - **Pure core**: [`fit`] and [`next_state`] have no side effects.
//! - **Quiet failures**: problems inside the event flow are logged through `tracing`, never
//!   surfaced as errors.
//! - **Premultiplied RGBA8** on the canvas; exports are converted to straight alpha.
#![forbid(unsafe_code)]

mod assets;
mod config;
mod foundation;
mod render;

pub mod layout;
pub mod session;
pub mod speech;

pub use crate::assets::color::Rgba8;
pub use crate::assets::decode::{ImageSource, SourceImage, decode_image};
pub use crate::assets::volume::{SliderValue, VolumeLevel};
pub use crate::config::{Background, CaptionConfig, MemeConfig};
pub use crate::foundation::core::{Affine, Canvas, MAX_CANVAS_DIM, Point, Rect};
pub use crate::foundation::error::{MemeError, MemeResult};
pub use crate::layout::fit::{FitResult, fit, fit_image};
pub use crate::render::pipeline::{RenderPipeline, caption_anchors, resolve_caption_font};
pub use crate::render::surface::{CanvasSurface, TextStyle};
pub use crate::render::text::CaptionFont;
pub use crate::session::controller::MemeSession;
pub use crate::session::state::{
    CaptionPair, Controls, Effect, Event, Transition, UiMode, UiState, next_state,
};
pub use crate::speech::{
    RecordingSynthesizer, SpeechSynthesizer, TracingSynthesizer, Utterance, Voice, VoiceList,
    read_aloud,
};
