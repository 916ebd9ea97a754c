use std::sync::mpsc::Sender;
use std::thread;

use tracing::debug;

use crate::app::Event;
use crate::library::CatalogFetch;

/// Fetch tracks and images on their own threads.
///
/// Each result is delivered as its own event, so a slow or failing image list
/// never holds back the tracks (and the reverse).
pub fn spawn_catalog_loaders<C>(catalog: C, events: &Sender<Event>)
where
    C: CatalogFetch + Clone + Send + 'static,
{
    let tracks_source = catalog.clone();
    let tracks_tx = events.clone();
    thread::spawn(move || {
        let tracks = tracks_source.tracks();
        if tracks_tx.send(Event::TracksLoaded(tracks)).is_err() {
            debug!("event loop gone before tracks arrived");
        }
    });

    let images_tx = events.clone();
    thread::spawn(move || {
        let images = catalog.images();
        if images_tx.send(Event::ImagesLoaded(images)).is_err() {
            debug!("event loop gone before images arrived");
        }
    });
}

#[cfg(test)]
mod tests {
    use super::*;
    use crate::library::{Image, Track};
    use std::sync::mpsc;
    use std::time::Duration;

    #[derive(Clone)]
    struct StaticCatalog {
        tracks: Vec<Track>,
    }

    impl CatalogFetch for StaticCatalog {
        fn tracks(&self) -> Vec<Track> {
            self.tracks.clone()
        }
        fn images(&self) -> Vec<Image> {
            Vec::new()
        }
    }

    #[test]
    fn both_lists_arrive_as_separate_events() {
        let (tx, rx) = mpsc::channel();
        let catalog = StaticCatalog {
            tracks: vec![Track {
                file: "a.mp3".into(),
                title: "A".into(),
                tags: Default::default(),
            }],
        };
        spawn_catalog_loaders(catalog, &tx);

        let mut got_tracks = false;
        let mut got_images = false;
        for _ in 0..2 {
            match rx.recv_timeout(Duration::from_secs(5)).unwrap() {
                Event::TracksLoaded(t) => {
                    assert_eq!(t.len(), 1);
                    got_tracks = true;
                }
                Event::ImagesLoaded(i) => {
                    assert!(i.is_empty());
                    got_images = true;
                }
                other => panic!("unexpected event {other:?}"),
            }
        }
        assert!(got_tracks && got_images);
    }
}
