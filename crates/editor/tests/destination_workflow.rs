mod common;

use assert_matches::assert_matches;

use common::{destination_with_images, image, Call, FakeDestinations, NEW_DESTINATION_ID};
use voyage_core::ordered::is_contiguous;
use voyage_core::types::Date;
use voyage_editor::{EditorError, EditorState, EntityEditor, NavigateTo, PreviewRegistry};

#[tokio::test]
async fn create_with_one_activity_and_one_image() {
    let backend = FakeDestinations::default();
    let previews = PreviewRegistry::new();
    let mut editor = EntityEditor::for_create(backend.clone(), previews.clone());
    {
        let draft = editor.draft_mut().unwrap();
        draft.name = "Sea View".into();
        assert_eq!(draft.activities.len(), 1);
        assert_eq!(draft.activities[0].day, 1);
        draft.activities[0].activity = "Snorkeling".into();
        draft.remove_faq(0);
    }
    editor.select_primary_file(image("beach.jpg")).unwrap();

    let outcome = editor.submit().await.unwrap();

    let calls = backend.calls();
    assert_eq!(calls.len(), 2);
    assert_matches!(&calls[0], Call::Create(payload) if payload["activities"]
        == serde_json::json!([{ "day": 1, "activity": "Snorkeling" }]));
    assert_eq!(
        calls[1],
        Call::UploadImages {
            id: NEW_DESTINATION_ID,
            files: vec!["beach.jpg".into()]
        }
    );
    assert!(!calls.iter().any(|c| matches!(c, Call::UploadItemImage { .. })));
    assert_eq!(outcome.navigate, NavigateTo::Detail(NEW_DESTINATION_ID));
    assert_eq!(outcome.entity.images, vec!["/uploads/destinations/beach.jpg"]);
    assert_eq!(previews.active_count(), 0);
}

#[tokio::test]
async fn gallery_selection_appends_and_can_be_trimmed_before_submit() {
    let backend = FakeDestinations::with(destination_with_images(3, 1));
    let previews = PreviewRegistry::new();
    let mut editor = EntityEditor::for_edit(backend.clone(), previews.clone(), Some("3")).await;
    editor.draft_mut().unwrap().faq.clear();

    let dropped = editor.select_primary_file(image("one.jpg")).unwrap();
    editor.select_primary_file(image("two.jpg")).unwrap();
    editor.select_primary_file(image("three.jpg")).unwrap();
    assert_eq!(previews.active_count(), 3);

    editor.remove_primary_file(0).unwrap();
    assert!(!previews.is_active(&dropped));
    assert_matches!(
        editor.remove_primary_file(9),
        Err(EditorError::OutOfRange { index: 9, .. })
    );

    let outcome = editor.submit().await.unwrap();

    assert_eq!(
        backend.upload_calls(),
        vec![Call::UploadImages {
            id: 3,
            files: vec!["two.jpg".into(), "three.jpg".into()]
        }]
    );
    assert_eq!(outcome.entity.images.len(), 3);
    assert_eq!(previews.active_count(), 0);
}

#[tokio::test]
async fn activity_days_follow_positions_through_edits() {
    let mut editor = EntityEditor::for_create(FakeDestinations::default(), PreviewRegistry::new());
    let draft = editor.draft_mut().unwrap();
    draft.add_activity();
    draft.add_activity();
    draft.add_activity();
    draft.remove_activity(1);
    assert!(is_contiguous(&draft.activities));
    draft.add_activity();
    draft.remove_activity(0);
    draft.remove_activity(2);

    let days: Vec<u32> = draft.activities.iter().map(|a| a.day).collect();
    assert_eq!(days, vec![1, 2]);
}

#[tokio::test]
async fn inverted_availability_blocks_submission() {
    let backend = FakeDestinations::default();
    let mut editor = EntityEditor::for_create(backend.clone(), PreviewRegistry::new());
    {
        let draft = editor.draft_mut().unwrap();
        draft.name = "Tozeur".into();
        draft.activities[0].activity = "Oasis walk".into();
        draft.faq.clear();
        draft.available_from = Date::from_ymd_opt(2025, 7, 10);
        draft.available_to = Date::from_ymd_opt(2025, 7, 1);
    }

    let err = editor.submit().await.unwrap_err();

    assert_matches!(&err, EditorError::Validation(v) if v.len() == 1 && v[0].field == "availableTo");
    assert!(backend.calls().is_empty());
}

#[tokio::test]
async fn delete_third_of_five_images() {
    let backend = FakeDestinations::with(destination_with_images(3, 5));
    let mut editor =
        EntityEditor::for_edit(backend.clone(), PreviewRegistry::new(), Some("3")).await;

    editor.delete_image(2).await.unwrap();

    assert_eq!(backend.calls()[1], Call::DeleteImage { id: 3, index: 2 });
    let persisted = editor.persisted().unwrap();
    assert_eq!(Some(persisted), backend.stored().as_ref());
    assert_eq!(
        persisted.images,
        vec![
            "/uploads/destinations/0.jpg",
            "/uploads/destinations/1.jpg",
            "/uploads/destinations/3.jpg",
            "/uploads/destinations/4.jpg",
        ]
    );
}

#[tokio::test]
async fn failed_create_leaves_nothing_persisted() {
    let backend = FakeDestinations::default();
    backend.faults(|f| f.save = true);
    let mut editor = EntityEditor::for_create(backend.clone(), PreviewRegistry::new());
    {
        let draft = editor.draft_mut().unwrap();
        draft.name = "Tozeur".into();
        draft.activities[0].activity = "Oasis walk".into();
        draft.faq.clear();
    }
    editor.select_primary_file(image("a.jpg")).unwrap();

    assert_matches!(editor.submit().await, Err(EditorError::Save { .. }));
    assert_eq!(editor.persisted(), None);
    assert_eq!(editor.entity_id(), None);
    assert!(backend.upload_calls().is_empty());

    // Editing continues after a failure.
    assert!(editor.draft_mut().is_ok());
    assert_eq!(editor.state(), EditorState::Ready);
    assert!(editor.last_error().is_some());
}
