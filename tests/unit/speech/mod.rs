use super::*;

fn voices() -> Vec<Voice> {
    vec![
        Voice::new("Alex", "en-US"),
        Voice::new("Amelie", "fr-CA").default_voice(),
        Voice::new("Alex", "en-GB"),
    ]
}

fn captions() -> CaptionPair {
    CaptionPair::new("one does not simply", "Read Aloud")
}

#[test]
fn labels_mark_default_voice() {
    let list = VoiceList::new(voices());
    assert_eq!(
        list.labels(),
        vec![
            "Alex (en-US)".to_string(),
            "Amelie (fr-CA) -- DEFAULT".to_string(),
            "Alex (en-GB)".to_string(),
        ]
    );
    assert_eq!(list.initial_selection(), Some("Amelie"));
}

#[test]
fn populate_without_synth_is_empty() {
    let list = VoiceList::populate(None);
    assert!(list.is_empty());
    assert_eq!(list.initial_selection(), None);

    let synth = RecordingSynthesizer::new(voices());
    assert_eq!(VoiceList::populate(Some(&synth)).voices().len(), 3);
}

#[test]
fn read_aloud_speaks_raw_text_in_order() {
    let list = VoiceList::new(voices());
    let mut synth = RecordingSynthesizer::new(voices());
    read_aloud(
        &captions(),
        SliderValue::new(50),
        Some("Amelie"),
        &list,
        &mut synth,
    )
    .unwrap();

    let spoken = synth.spoken();
    assert_eq!(spoken.len(), 2);
    assert_eq!(spoken[0].text, "one does not simply");
    assert_eq!(spoken[1].text, "Read Aloud");
    for u in spoken {
        assert_eq!(u.volume, 0.5);
        assert_eq!(u.voice.as_ref().map(|v| v.lang.as_str()), Some("fr-CA"));
    }
}

#[test]
fn duplicate_names_resolve_to_last_match() {
    let list = VoiceList::new(voices());
    let mut synth = RecordingSynthesizer::default();
    read_aloud(&captions(), SliderValue::new(100), Some("Alex"), &list, &mut synth).unwrap();
    assert_eq!(
        synth.spoken()[0].voice.as_ref().map(|v| v.lang.as_str()),
        Some("en-GB")
    );
}

#[test]
fn unknown_or_missing_voice_falls_back_to_default() {
    let list = VoiceList::new(voices());
    let mut synth = RecordingSynthesizer::default();
    read_aloud(&captions(), SliderValue::new(0), Some("Nobody"), &list, &mut synth).unwrap();
    read_aloud(&captions(), SliderValue::new(0), None, &VoiceList::default(), &mut synth)
        .unwrap();
    assert_eq!(synth.spoken().len(), 4);
    assert!(synth.spoken().iter().all(|u| u.voice.is_none() && u.volume == 0.0));
}

#[test]
fn voice_list_reads_json_array() {
    let json = r#"[
        { "name": "Alex", "lang": "en-US" },
        { "name": "Amelie", "lang": "fr-CA", "is_default": true }
    ]"#;
    let list = VoiceList::new(Voice::list_from_reader(json.as_bytes()).unwrap());
    assert_eq!(list.voices().len(), 2);
    assert!(!list.voices()[0].is_default);
    assert_eq!(list.initial_selection(), Some("Amelie"));
}

#[test]
fn voice_list_rejects_bad_json() {
    let err = Voice::list_from_reader(r#"{ "name": "Alex" }"#.as_bytes()).unwrap_err();
    assert!(err.to_string().contains("voices JSON"), "{err}");
    assert!(Voice::list_from_path("does/not/exist.json").is_err());
}
