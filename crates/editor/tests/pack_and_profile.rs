mod common;

use assert_matches::assert_matches;

use common::{admin_profile, image, Call, FakePacks, FakeProfile, NEW_PACK_ID};
use voyage_core::models::{Destination, Pack};
use voyage_editor::{EditorError, EntityEditor, NavigateTo, PreviewRegistry, ProfileEditor};

#[tokio::test]
async fn pack_takes_country_from_its_destination() {
    let backend = FakePacks::default();
    let mut editor = EntityEditor::for_create(backend.clone(), PreviewRegistry::new());
    let destinations = vec![Destination {
        id: Some(5),
        name: "Tozeur".into(),
        country: "Tunisia".into(),
        ..Default::default()
    }];
    {
        let draft = editor.draft_mut().unwrap();
        draft.name = "Sahara Escape".into();
        draft.hotel_id = Some(2);
        assert!(draft.select_destination_by_id(5, &destinations));
        draft.activities[0].activity = "Camel ride".into();
        draft.faq[0].question = "Visa?".into();
        draft.faq[0].answer = "On arrival".into();
    }

    let outcome = editor.submit().await.unwrap();

    assert_eq!(outcome.navigate, NavigateTo::Detail(NEW_PACK_ID));
    let calls = backend.calls();
    assert_eq!(calls.len(), 1);
    assert_matches!(&calls[0], Call::Create(payload)
        if payload["country"] == "Tunisia" && payload["destinationId"] == 5 && payload["hotelId"] == 2);
}

#[tokio::test]
async fn pack_without_references_is_rejected() {
    let backend = FakePacks::default();
    let mut editor = EntityEditor::for_create(backend.clone(), PreviewRegistry::new());
    editor.draft_mut().unwrap().name = "Sahara Escape".into();

    let err = editor.submit().await.unwrap_err();

    let fields: Vec<String> = match err {
        EditorError::Validation(v) => v.into_iter().map(|f| f.field).collect(),
        other => panic!("expected validation error, got {other:?}"),
    };
    assert!(fields.contains(&"hotelId".to_string()));
    assert!(fields.contains(&"destinationId".to_string()));
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn packs_have_no_image_uploads() {
    let previews = PreviewRegistry::new();
    let mut editor = EntityEditor::for_create(FakePacks::default(), previews.clone());

    assert_matches!(
        editor.select_primary_file(image("x.jpg")),
        Err(EditorError::Unsupported(_))
    );
    assert_eq!(previews.created_count(), 0);
}

#[tokio::test]
async fn editing_an_empty_pack_reseeds_its_lists() {
    let backend = FakePacks::with(Pack {
        id: Some(8),
        name: "Weekend".into(),
        days: 2,
        ..Default::default()
    });
    let editor = EntityEditor::for_edit(backend, PreviewRegistry::new(), Some("8")).await;

    assert_eq!(editor.draft().activities.len(), 1);
    assert_eq!(editor.draft().faq.len(), 1);
}

#[tokio::test]
async fn profile_saves_fields_then_image() {
    let backend = FakeProfile::with(admin_profile());
    let previews = PreviewRegistry::new();
    let mut editor = ProfileEditor::load(backend.clone(), previews.clone())
        .await
        .unwrap();
    editor.draft_mut().name = "Samira".into();
    editor.draft_mut().city_state = "Sousse".into();
    editor.select_image(image("me.png"));

    let saved = editor.save().await.unwrap();

    assert_eq!(saved.name, "Samira");
    assert_eq!(saved.image_url.as_deref(), Some("/uploads/admins/me.png"));
    let calls = backend.calls();
    assert_eq!(calls.len(), 3);
    assert_eq!(calls[0], Call::FetchProfile);
    assert_matches!(&calls[1], Call::UpdateProfile(body)
        if body["cityState"] == "Sousse" && body.get("postalCode").is_none());
    assert_eq!(calls[2], Call::UploadProfileImage("me.png".into()));
    assert_eq!(previews.active_count(), 0);
}

#[tokio::test]
async fn profile_image_failure_keeps_saved_fields() {
    let backend = FakeProfile::with(admin_profile());
    let previews = PreviewRegistry::new();
    let mut editor = ProfileEditor::load(backend.clone(), previews.clone())
        .await
        .unwrap();
    editor.draft_mut().name = "Samira".into();
    editor.select_image(image("me.png"));
    backend.faults(|f| f.primary_upload = true);

    assert_matches!(editor.save().await, Err(EditorError::Upload { entity: "profile", .. }));
    assert_eq!(editor.profile().map(|p| p.name.as_str()), Some("Samira"));
    assert!(editor.last_error().is_some());
    assert!(editor.image_preview().is_some());
    assert_eq!(previews.active_count(), 1);
}

#[tokio::test]
async fn blank_profile_name_is_not_sent() {
    let backend = FakeProfile::with(admin_profile());
    let mut editor = ProfileEditor::load(backend.clone(), PreviewRegistry::new())
        .await
        .unwrap();
    editor.draft_mut().name = "  ".into();

    assert_matches!(editor.save().await, Err(EditorError::Validation(_)));
    assert_eq!(backend.calls(), vec![Call::FetchProfile]);
}
