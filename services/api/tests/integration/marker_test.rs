use uuid::Uuid;

use wayfinder_api::usecase::marker::{GetMarkersUseCase, MarkerQuery};
use wayfinder_domain::location::LocationType;

use crate::helpers::{MockStore, sample_locations};

fn usecase(
    store: &MockStore,
) -> GetMarkersUseCase<crate::helpers::MockLocationRepo, crate::helpers::MockFavouriteRepo> {
    GetMarkersUseCase {
        repo: store.locations(),
        favourites: store.favourites(),
    }
}

fn ids(markers: &[wayfinder_api::domain::types::Marker]) -> Vec<i32> {
    markers.iter().map(|m| m.id).collect()
}

#[tokio::test]
async fn should_return_every_location_without_criteria() {
    let store = MockStore::with_locations(sample_locations());
    let markers = usecase(&store)
        .execute(MarkerQuery::default(), None)
        .await
        .unwrap();

    assert_eq!(ids(&markers), vec![1, 2, 3, 4, 5]);
    assert_eq!(markers[1].name, "Temnata Cave");
    assert_eq!(markers[1].location_type, LocationType::Cave);
}

#[tokio::test]
async fn should_filter_by_type_set() {
    let store = MockStore::with_locations(sample_locations());
    let markers = usecase(&store)
        .execute(
            MarkerQuery {
                types: vec![LocationType::Cave, LocationType::Waterfall],
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(ids(&markers), vec![2, 4]);
}

#[tokio::test]
async fn should_match_name_case_insensitively() {
    let store = MockStore::with_locations(sample_locations());
    let markers = usecase(&store)
        .execute(
            MarkerQuery {
                search_text: Some("LAKE".to_owned()),
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(ids(&markers), vec![1, 3, 5]);
}

#[tokio::test]
async fn should_combine_text_and_type_filters() {
    let store = MockStore::with_locations(sample_locations());
    let markers = usecase(&store)
        .execute(
            MarkerQuery {
                search_text: Some("te".to_owned()),
                types: vec![LocationType::Lake],
                favourites_only: false,
            },
            None,
        )
        .await
        .unwrap();

    // "Temnata Cave" contains "te" but is a cave.
    assert_eq!(ids(&markers), vec![1, 5]);
    assert!(markers.iter().all(|m| m.location_type == LocationType::Lake));
}

#[tokio::test]
async fn should_treat_empty_type_set_and_blank_text_as_absent() {
    let store = MockStore::with_locations(sample_locations());
    let markers = usecase(&store)
        .execute(
            MarkerQuery {
                search_text: Some("  ".to_owned()),
                types: vec![],
                favourites_only: false,
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(markers.len(), 5);
}

#[tokio::test]
async fn should_keep_only_favourites_for_known_caller() {
    let store = MockStore::with_locations(sample_locations());
    let user_id = Uuid::now_v7();
    store.add_favourite(user_id, 5);
    store.add_favourite(user_id, 2);

    let markers = usecase(&store)
        .execute(
            MarkerQuery {
                favourites_only: true,
                ..Default::default()
            },
            Some(user_id),
        )
        .await
        .unwrap();
    assert_eq!(ids(&markers), vec![2, 5]);
}

#[tokio::test]
async fn should_intersect_favourites_with_filters() {
    let store = MockStore::with_locations(sample_locations());
    let user_id = Uuid::now_v7();
    store.add_favourite(user_id, 2);
    store.add_favourite(user_id, 3);

    let markers = usecase(&store)
        .execute(
            MarkerQuery {
                types: vec![LocationType::Lake],
                favourites_only: true,
                ..Default::default()
            },
            Some(user_id),
        )
        .await
        .unwrap();
    assert_eq!(ids(&markers), vec![3]);
}

#[tokio::test]
async fn should_ignore_favourites_flag_for_anonymous_caller() {
    let store = MockStore::with_locations(sample_locations());
    store.add_favourite(Uuid::now_v7(), 1);

    let markers = usecase(&store)
        .execute(
            MarkerQuery {
                favourites_only: true,
                ..Default::default()
            },
            None,
        )
        .await
        .unwrap();
    assert_eq!(markers.len(), 5);
}
