use uuid::Uuid;

use wayfinder_api::domain::types::LocationDraft;
use wayfinder_api::error::ApiError;
use wayfinder_api::usecase::location::{
    CreateLocationUseCase, DeleteLocationUseCase, GetLocationFullInfoUseCase,
    ListLocationsUseCase, UpdateLocationUseCase,
};
use wayfinder_domain::location::LocationType;

use crate::helpers::{MockStore, sample_locations};

fn draft() -> LocationDraft {
    LocationDraft {
        id: None,
        name: Some("Prohodna Cave".to_owned()),
        description: Some("the eyes of god".to_owned()),
        location_type: Some(LocationType::Cave),
        lat: Some(43.17),
        lon: Some(24.0),
    }
}

fn validation_message(result: Result<impl std::fmt::Debug, ApiError>) -> String {
    match result {
        Err(ApiError::Validation(message)) => message,
        other => panic!("expected Validation, got {other:?}"),
    }
}

// ── ListLocations ────────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_locations_in_id_order() {
    let mut shuffled = sample_locations();
    shuffled.reverse();
    let store = MockStore::with_locations(shuffled);
    let usecase = ListLocationsUseCase {
        repo: store.locations(),
    };

    let ids: Vec<i32> = usecase.execute().await.unwrap().iter().map(|l| l.id).collect();
    assert_eq!(ids, vec![1, 2, 3, 4, 5]);
}

// ── CreateLocation ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_create_valid_location() {
    let store = MockStore::new();
    let usecase = CreateLocationUseCase {
        repo: store.locations(),
    };

    let created = usecase.execute(draft()).await.unwrap();
    assert_eq!(created.id, 1);
    assert_eq!(created.name, "Prohodna Cave");
    assert_eq!(created.location_type, LocationType::Cave);
    assert_eq!(store.location_count(), 1);
}

#[tokio::test]
async fn should_reject_missing_name_before_other_fields() {
    let store = MockStore::new();
    let usecase = CreateLocationUseCase {
        repo: store.locations(),
    };

    let message = validation_message(usecase.execute(LocationDraft::default()).await);
    assert_eq!(message, "name is required");
    assert_eq!(store.location_count(), 0);
}

#[tokio::test]
async fn should_reject_nan_longitude() {
    let usecase = CreateLocationUseCase {
        repo: MockStore::new().locations(),
    };
    let message = validation_message(
        usecase
            .execute(LocationDraft {
                lon: Some(f64::NAN),
                ..draft()
            })
            .await,
    );
    assert!(message.starts_with("longitude"));
}

#[tokio::test]
async fn should_reject_missing_latitude() {
    let usecase = CreateLocationUseCase {
        repo: MockStore::new().locations(),
    };
    let message = validation_message(
        usecase
            .execute(LocationDraft {
                lat: None,
                ..draft()
            })
            .await,
    );
    assert!(message.starts_with("latitude"));
}

#[tokio::test]
async fn should_reject_missing_type() {
    let usecase = CreateLocationUseCase {
        repo: MockStore::new().locations(),
    };
    let message = validation_message(
        usecase
            .execute(LocationDraft {
                location_type: None,
                ..draft()
            })
            .await,
    );
    assert_eq!(message, "type is required");
}

// ── UpdateLocation ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_id_for_update() {
    let usecase = UpdateLocationUseCase {
        repo: MockStore::with_locations(sample_locations()).locations(),
    };
    let message = validation_message(usecase.execute(draft()).await);
    assert_eq!(message, "id is required");
}

#[tokio::test]
async fn should_update_existing_location() {
    let store = MockStore::with_locations(sample_locations());
    let usecase = UpdateLocationUseCase {
        repo: store.locations(),
    };

    let updated = usecase
        .execute(LocationDraft {
            id: Some(2),
            ..draft()
        })
        .await
        .unwrap();
    assert_eq!(updated.id, 2);
    assert_eq!(updated.name, "Prohodna Cave");
    assert_eq!(store.location_count(), 5);
}

#[tokio::test]
async fn should_return_not_found_when_updating_unknown_id() {
    let usecase = UpdateLocationUseCase {
        repo: MockStore::with_locations(sample_locations()).locations(),
    };
    let result = usecase
        .execute(LocationDraft {
            id: Some(99),
            ..draft()
        })
        .await;
    assert!(
        matches!(result, Err(ApiError::LocationNotFound)),
        "expected LocationNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_validate_update_fields_like_create() {
    let usecase = UpdateLocationUseCase {
        repo: MockStore::with_locations(sample_locations()).locations(),
    };
    let message = validation_message(
        usecase
            .execute(LocationDraft {
                id: Some(1),
                name: Some(String::new()),
                ..draft()
            })
            .await,
    );
    assert_eq!(message, "name is required");
}

// ── DeleteLocation ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_require_id_for_delete() {
    let usecase = DeleteLocationUseCase {
        repo: MockStore::new().locations(),
    };
    let message = validation_message(usecase.execute(None).await);
    assert_eq!(message, "id is required");
}

#[tokio::test]
async fn should_delete_location_and_its_favourites() {
    let store = MockStore::with_locations(sample_locations());
    let user_id = Uuid::now_v7();
    store.add_favourite(user_id, 3);

    let usecase = DeleteLocationUseCase {
        repo: store.locations(),
    };
    usecase.execute(Some(3)).await.unwrap();

    assert_eq!(store.location_count(), 4);
    assert!(store.data.lock().unwrap().favourites.is_empty());
}

#[tokio::test]
async fn should_treat_deleting_unknown_id_as_success() {
    let store = MockStore::with_locations(sample_locations());
    let usecase = DeleteLocationUseCase {
        repo: store.locations(),
    };
    usecase.execute(Some(42)).await.unwrap();
    assert_eq!(store.location_count(), 5);
}

// ── GetLocationFullInfo ──────────────────────────────────────────────────────

#[tokio::test]
async fn should_return_full_info_for_favourited_location() {
    let store = MockStore::with_locations(sample_locations());
    let user_id = Uuid::now_v7();
    store.add_favourite(user_id, 4);

    let usecase = GetLocationFullInfoUseCase {
        repo: store.locations(),
        favourites: store.favourites(),
    };
    let info = usecase.execute(Some(4), Some(user_id)).await.unwrap().unwrap();
    assert!(info.is_favourite);
    assert_eq!(info.location.name, "Kostenets Waterfall");
    assert_eq!(info.location.description.as_deref(), Some("about Kostenets Waterfall"));
}

#[tokio::test]
async fn should_return_none_when_not_favourited() {
    let store = MockStore::with_locations(sample_locations());
    let usecase = GetLocationFullInfoUseCase {
        repo: store.locations(),
        favourites: store.favourites(),
    };
    let info = usecase.execute(Some(4), Some(Uuid::now_v7())).await.unwrap();
    assert!(info.is_none());
}

#[tokio::test]
async fn should_return_none_for_anonymous_caller() {
    let store = MockStore::with_locations(sample_locations());
    store.add_favourite(Uuid::now_v7(), 1);
    let usecase = GetLocationFullInfoUseCase {
        repo: store.locations(),
        favourites: store.favourites(),
    };
    assert!(usecase.execute(Some(1), None).await.unwrap().is_none());
}

#[tokio::test]
async fn should_require_id_for_full_info() {
    let store = MockStore::new();
    let usecase = GetLocationFullInfoUseCase {
        repo: store.locations(),
        favourites: store.favourites(),
    };
    let message = validation_message(usecase.execute(None, Some(Uuid::now_v7())).await);
    assert_eq!(message, "id is required");
}
