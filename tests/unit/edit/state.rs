use super::*;

fn color(i: u8) -> HexColor {
    HexColor::rgb(i, i, i)
}

#[test]
fn history_evicts_oldest_first() {
    let mut h = ColorHistory::new();
    for i in 1..=6 {
        h.push(color(i));
    }
    assert_eq!(h.len(), 5);
    let kept: Vec<HexColor> = h.iter().collect();
    assert_eq!(kept, (2..=6).map(color).collect::<Vec<_>>());
}

#[test]
fn six_picks_from_initial_state_keep_picks_two_through_six() {
    let mut state = EditState::from_template(&TemplateSpec::default());
    assert_eq!(state.color_history.iter().collect::<Vec<_>>(), vec![DEFAULT_COLOR]);
    for i in 1..=6 {
        state.pick_custom_color(color(i));
    }
    assert_eq!(state.selected_color, color(6));
    let kept: Vec<HexColor> = state.color_history.iter().collect();
    assert_eq!(kept, (2..=6).map(color).collect::<Vec<_>>());
}

#[test]
fn history_keeps_duplicates() {
    let mut h = ColorHistory::new();
    h.push(color(1));
    h.push(color(1));
    assert_eq!(h.len(), 2);
}

#[test]
fn selecting_from_history_does_not_push() {
    let mut state = EditState::from_template(&TemplateSpec::default());
    state.pick_custom_color(color(9));
    assert_eq!(state.select_history(0), Some(DEFAULT_COLOR));
    assert_eq!(state.selected_color, DEFAULT_COLOR);
    assert_eq!(state.color_history.len(), 2);
    assert_eq!(state.select_history(7), None);
    assert_eq!(state.selected_color, DEFAULT_COLOR);
}

#[test]
fn initial_state_uses_template_defaults() {
    let template = TemplateSpec::default();
    let state = EditState::from_template(&template);
    assert_eq!(
        state.selected_caption,
        "1 & 2 BHK Luxury Apartments at just Rs.34.97 Lakhs"
    );
    assert_eq!(state.selected_cta, "Shop Now");
    assert_eq!(state.selected_mask_source, template.urls.mask_url);

    let mut bare = template.clone();
    bare.caption = None;
    bare.cta = None;
    let state = EditState::from_template(&bare);
    assert!(state.selected_caption.is_empty());
    assert!(state.selected_cta.is_empty());
}

#[test]
fn mask_upload_becomes_data_uri_and_failures_keep_previous() {
    let dir = std::env::temp_dir().join("adframe_state_test");
    std::fs::create_dir_all(&dir).unwrap();
    let path = dir.join("photo.jpg");
    std::fs::write(&path, [1u8, 2, 3]).unwrap();

    let mut state = EditState::from_template(&TemplateSpec::default());
    state.set_mask_file(&path).unwrap();
    assert!(state.selected_mask_source.starts_with("data:image/jpeg;base64,"));

    let before = state.selected_mask_source.clone();
    assert!(state.set_mask_file(dir.join("missing.jpg")).is_err());
    assert_eq!(state.selected_mask_source, before);
}
