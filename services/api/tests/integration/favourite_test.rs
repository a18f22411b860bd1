use wayfinder_api::error::ApiError;
use wayfinder_api::usecase::favourite::{ListFavouritesUseCase, ToggleFavouriteUseCase};
use wayfinder_domain::user::UserRole;

use crate::helpers::{
    MockFavouriteRepo, MockLocationRepo, MockStore, MockUserRepo, active_user, sample_locations,
};

const EMAIL: &str = "hiker@wayfinder.dev";

fn setup() -> MockStore {
    let store = MockStore::with_locations(sample_locations());
    store.add_user(active_user(EMAIL, "pw", UserRole::User));
    store
}

fn toggle(store: &MockStore) -> ToggleFavouriteUseCase<MockLocationRepo, MockUserRepo, MockFavouriteRepo> {
    ToggleFavouriteUseCase {
        locations: store.locations(),
        users: store.users(),
        favourites: store.favourites(),
    }
}

fn list(store: &MockStore) -> ListFavouritesUseCase<MockUserRepo, MockFavouriteRepo> {
    ListFavouritesUseCase {
        users: store.users(),
        favourites: store.favourites(),
    }
}

// ── ToggleFavourite ──────────────────────────────────────────────────────────

#[tokio::test]
async fn should_add_then_remove_on_repeated_toggle() {
    let store = setup();
    let usecase = toggle(&store);

    assert!(usecase.execute(3, EMAIL).await.unwrap());
    assert_eq!(list(&store).execute(EMAIL).await.unwrap(), vec![3]);

    assert!(!usecase.execute(3, EMAIL).await.unwrap());
    assert!(list(&store).execute(EMAIL).await.unwrap().is_empty());
}

#[tokio::test]
async fn should_keep_other_favourites_when_toggling() {
    let store = setup();
    let usecase = toggle(&store);
    usecase.execute(1, EMAIL).await.unwrap();
    usecase.execute(4, EMAIL).await.unwrap();
    usecase.execute(1, EMAIL).await.unwrap();

    assert_eq!(list(&store).execute(EMAIL).await.unwrap(), vec![4]);
}

#[tokio::test]
async fn should_reject_empty_email() {
    let store = setup();
    let result = toggle(&store).execute(1, "").await;
    assert!(
        matches!(result, Err(ApiError::Validation(ref m)) if m == "email is required"),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_reject_malformed_email() {
    let store = setup();
    let result = toggle(&store).execute(1, "not-an-email").await;
    assert!(
        matches!(result, Err(ApiError::Validation(_))),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_location_not_found() {
    let store = setup();
    let result = toggle(&store).execute(99, EMAIL).await;
    assert!(
        matches!(result, Err(ApiError::LocationNotFound)),
        "expected LocationNotFound, got {result:?}"
    );
}

#[tokio::test]
async fn should_return_user_not_found() {
    let store = setup();
    let result = toggle(&store).execute(1, "ghost@wayfinder.dev").await;
    assert!(
        matches!(result, Err(ApiError::UserNotFound)),
        "expected UserNotFound, got {result:?}"
    );
}

// ── ListFavourites ───────────────────────────────────────────────────────────

#[tokio::test]
async fn should_list_favourites_sorted_by_location_id() {
    let store = setup();
    let user_id = store.data.lock().unwrap().users[0].id;
    store.add_favourite(user_id, 5);
    store.add_favourite(user_id, 2);

    assert_eq!(list(&store).execute(EMAIL).await.unwrap(), vec![2, 5]);
}

#[tokio::test]
async fn should_validate_email_when_listing() {
    let store = setup();
    let result = list(&store).execute("  ").await;
    assert!(
        matches!(result, Err(ApiError::Validation(_))),
        "expected Validation, got {result:?}"
    );
}

#[tokio::test]
async fn should_resolve_case_variant_to_the_same_account() {
    let store = setup();
    let user_id = store.data.lock().unwrap().users[0].id;
    store.add_favourite(user_id, 4);

    assert_eq!(
        list(&store).execute("Hiker@Wayfinder.dev").await.unwrap(),
        vec![4]
    );
    assert!(!toggle(&store).execute(4, "HIKER@wayfinder.dev").await.unwrap());
}
