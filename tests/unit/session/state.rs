use super::*;

fn image() -> SourceImage {
    SourceImage::from_premul_rgba8(2, 1, vec![0; 8]).unwrap()
}

fn step(state: UiState, event: Event) -> Transition {
    next_state(&state, &event)
}

#[test]
fn initial_state_enables_only_submit() {
    let s = UiState::default();
    assert_eq!(s.mode, UiMode::Empty);
    assert_eq!(
        s.controls,
        Controls {
            submit: true,
            reset: false,
            read: false,
            voice_select: false
        }
    );
}

#[test]
fn full_lifecycle() {
    let s0 = UiState::default();

    let t = step(s0, Event::ImageSelected(Some(ImageSource::new("a.png", vec![1u8]))));
    assert_eq!(t.state, s0);
    assert_eq!(t.effects, vec![Effect::DecodeSource]);

    let t = step(t.state, Event::ImageDecoded(Some(image())));
    assert_eq!(t.state.mode, UiMode::ImageLoaded);
    assert!(t.state.controls.reset);
    assert!(t.state.controls.submit);
    assert!(!t.state.controls.read);
    assert_eq!(t.effects, vec![Effect::PaintBackground, Effect::DrawImage]);

    let t = step(t.state, Event::FormSubmitted(CaptionPair::new("top", "bottom")));
    assert_eq!(t.state.mode, UiMode::MemeGenerated);
    assert_eq!(t.state.controls, Controls::GENERATED);
    assert_eq!(t.effects, vec![Effect::DrawCaptions]);

    let t = step(t.state, Event::ReadClicked(CaptionPair::new("top", "bottom")));
    assert_eq!(t.state.mode, UiMode::MemeGenerated);
    assert_eq!(t.effects, vec![Effect::Speak]);

    let t = step(t.state, Event::ResetClicked);
    assert_eq!(t.state, UiState::default());
    assert_eq!(t.effects, vec![Effect::ClearCanvas]);
}

#[test]
fn new_image_after_generate_keeps_submit_disabled() {
    let generated = UiState {
        mode: UiMode::MemeGenerated,
        controls: Controls::GENERATED,
    };
    let t = step(generated, Event::ImageDecoded(Some(image())));
    assert_eq!(t.state.mode, UiMode::ImageLoaded);
    assert_eq!(t.state.controls, Controls::GENERATED);
}

#[test]
fn empty_source_disables_reset_only() {
    let generated = UiState {
        mode: UiMode::MemeGenerated,
        controls: Controls::GENERATED,
    };
    let t = step(generated, Event::ImageDecoded(None));
    assert_eq!(t.state.mode, UiMode::Empty);
    assert_eq!(
        t.state.controls,
        Controls {
            submit: false,
            reset: false,
            read: true,
            voice_select: true
        }
    );
    assert_eq!(t.effects, vec![Effect::PaintBackground]);
}

#[test]
fn disabled_controls_ignore_events() {
    let s0 = UiState::default();
    for event in [
        Event::ResetClicked,
        Event::ReadClicked(CaptionPair::default()),
        Event::VoiceSelected("Alex".into()),
    ] {
        let t = step(s0, event);
        assert_eq!(t.state, s0);
        assert!(t.effects.is_empty());
    }

    let generated = UiState {
        mode: UiMode::MemeGenerated,
        controls: Controls::GENERATED,
    };
    let t = step(generated, Event::FormSubmitted(CaptionPair::default()));
    assert_eq!(t.state, generated);
    assert!(t.effects.is_empty());
}

#[test]
fn submit_before_upload_is_permitted() {
    let t = step(UiState::default(), Event::FormSubmitted(CaptionPair::new("a", "b")));
    assert_eq!(t.state.mode, UiMode::MemeGenerated);
    assert_eq!(t.effects, vec![Effect::DrawCaptions]);
}

#[test]
fn volume_is_always_accepted() {
    let t = step(UiState::default(), Event::VolumeChanged(SliderValue::new(3)));
    assert_eq!(t.state, UiState::default());
    assert_eq!(t.effects, vec![Effect::SetVolume]);
}

#[test]
fn captions_upper_case_unicode() {
    let c = CaptionPair::new("straße", "ok").upper();
    assert_eq!(c.top, "STRASSE");
    assert_eq!(c.bottom, "OK");
}

#[test]
fn event_names_are_stable() {
    assert_eq!(Event::ResetClicked.name(), "reset_clicked");
    assert_eq!(Event::ImageDecoded(None).name(), "image_decoded");
}
