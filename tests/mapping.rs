// tests/mapping.rs
//! Collection mapping through the public surface: envelope hoisting,
//! heterogeneous dispatch, and idempotence over the input document.

mod common;

use common::{credentials, ok_json, MockTransport};
use pretty_assertions::assert_eq;
use serde_json::json;
use std::sync::Arc;
use tidalrs::{
    map_json, map_json_typed, CatalogItem, CatalogResolver, SessionConfig, TidalSession, Track,
};

fn mixed_items_page() -> serde_json::Value {
    json!({
        "limit": 10,
        "offset": 0,
        "totalNumberOfItems": 3,
        "items": [
            {
                "item": { "id": 11, "title": "Song", "trackNumber": 4 },
                "created": "2024-02-02T00:00:00.000Z",
                "type": "track"
            },
            {
                "item": { "id": 12, "title": "Clip", "duration": 240 },
                "created": "2024-02-03T00:00:00.000Z",
                "type": "video"
            },
            {
                "item": { "id": 13, "title": "Encore", "trackNumber": 1 },
                "created": null,
                "type": "TRACKS"
            }
        ]
    })
}

/// A playlist's items page parses each element by its declared type.
#[tokio::test]
async fn playlist_items_dispatch_per_type() {
    let transport = Arc::new(MockTransport::new(|_req| ok_json(mixed_items_page())));
    let session = TidalSession::with_transport(transport, SessionConfig::default());
    session.load_credentials(credentials());

    let items = session
        .playlist("7ab5d2b6-93fb-4181-a008-a1d18e2cebfa")
        .items(Some(10), 0)
        .await
        .unwrap();

    assert_eq!(items.len(), 3);
    match &items[0] {
        CatalogItem::Track(track) => {
            assert_eq!(track.id, 11);
            assert_eq!(track.track_number, Some(4));
            assert!(track.date_added.is_some());
        }
        other => panic!("expected a track, got {:?}", other),
    }
    match &items[1] {
        CatalogItem::Video(video) => {
            assert_eq!(video.id, 12);
            assert_eq!(video.duration, Some(240));
        }
        other => panic!("expected a video, got {:?}", other),
    }
    // Tag spelling is normalized; a null `created` hoists nothing.
    match &items[2] {
        CatalogItem::Track(track) => assert_eq!(track.date_added, None),
        other => panic!("expected a track, got {:?}", other),
    }
}

/// Mapping never mutates its input, and mapping the same document twice
/// yields identical output.
#[test]
fn mapping_is_idempotent_and_non_mutating() {
    let page = mixed_items_page();
    let snapshot = page.clone();

    let first = map_json_typed(&page, &CatalogResolver).unwrap();
    let second = map_json_typed(&page, &CatalogResolver).unwrap();

    assert_eq!(first, second);
    assert_eq!(page, snapshot);
}

/// The uniform mapper handles single objects and bare pages with the
/// same parse function.
#[test]
fn uniform_mapper_covers_both_shapes() {
    let single = json!({ "id": 5, "title": "Lone" });
    let mapped = map_json(&single, Track::parse).unwrap();
    assert_eq!(mapped.into_collection()[0].id, 5);

    let page = json!({ "items": [
        { "id": 6, "title": "Six" },
        { "id": 7, "title": "Seven" }
    ]});
    let tracks = map_json(&page, Track::parse).unwrap().into_collection();
    assert_eq!(tracks.len(), 2);
    assert_eq!(tracks[1].title, "Seven");
}

/// A playlist fetch returns the metadata as a single object.
#[tokio::test]
async fn playlist_metadata_is_a_single_object() {
    let transport = Arc::new(MockTransport::new(|_req| {
        ok_json(json!({
            "uuid": "7ab5d2b6-93fb-4181-a008-a1d18e2cebfa",
            "title": "Morning",
            "numberOfTracks": 3,
            "created": "2023-01-15T08:30:00.000Z"
        }))
    }));
    let session = TidalSession::with_transport(transport, SessionConfig::default());
    session.load_credentials(credentials());

    let playlist = session
        .playlist("7ab5d2b6-93fb-4181-a008-a1d18e2cebfa")
        .get()
        .await
        .unwrap();

    assert_eq!(playlist.title, "Morning");
    assert_eq!(playlist.number_of_tracks, Some(3));
}
